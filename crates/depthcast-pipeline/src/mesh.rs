//! Height-field mesh construction.
//!
//! Every depth sample becomes one vertex on a regular grid; every grid
//! cell becomes two triangles. The grid is scaled so its longer side
//! spans `crystal_size` millimetres, with the image's top row at the
//! largest `y` so the model is not mirrored when viewed from `+z`.
//!
//! ```text
//!   i ─── i+1          row r      (higher y)
//!   │  ╲   │
//!   │   ╲  │
//!  i+w ── i+w+1        row r + 1  (lower y)
//! ```

use crate::types::{DepthMap, Mesh, MeshConfig, PipelineError};

/// Build the height-field mesh for `depth`.
///
/// # Errors
///
/// Returns [`PipelineError::InvalidConfig`] if the grid has fewer than
/// two samples along either axis, or more vertices than a `u32` index
/// can address.
pub fn build_mesh(depth: &DepthMap, config: &MeshConfig) -> Result<Mesh, PipelineError> {
    let (w, h) = (depth.width(), depth.height());
    if w < 2 || h < 2 {
        return Err(PipelineError::InvalidConfig(format!(
            "mesh grid must be at least 2x2, got {w}x{h}"
        )));
    }
    if u64::from(w) * u64::from(h) > u64::from(u32::MAX) {
        return Err(PipelineError::InvalidConfig(format!(
            "mesh grid {w}x{h} exceeds the u32 index range"
        )));
    }

    #[allow(clippy::cast_precision_loss)]
    let step = config.crystal_size / (w.max(h) - 1) as f32;

    let mut vertices = Vec::with_capacity(w as usize * h as usize);
    for row in 0..h {
        #[allow(clippy::cast_precision_loss)]
        let y = (h - 1 - row) as f32 * step;
        for col in 0..w {
            #[allow(clippy::cast_precision_loss)]
            let x = col as f32 * step;
            let z = depth.get(col, row).unwrap_or(0.0) * config.depth_intensity;
            vertices.push([x, y, z]);
        }
    }

    Ok(Mesh {
        vertices,
        faces: grid_faces(w, h),
    })
}

/// Two counter-clockwise (seen from `+z`) triangles per grid cell.
#[must_use]
pub fn grid_faces(width: u32, height: u32) -> Vec<[u32; 3]> {
    let cells = width.saturating_sub(1) as usize * height.saturating_sub(1) as usize;
    let mut faces = Vec::with_capacity(cells * 2);
    for row in 0..height.saturating_sub(1) {
        for col in 0..width.saturating_sub(1) {
            let i = row * width + col;
            faces.push([i, i + width, i + 1]);
            faces.push([i + 1, i + width, i + width + 1]);
        }
    }
    faces
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn config() -> MeshConfig {
        MeshConfig {
            crystal_size: 10.0,
            depth_intensity: 2.0,
        }
    }

    #[test]
    fn face_count_is_two_per_cell() {
        assert_eq!(grid_faces(4, 3).len(), 2 * 3 * 2);
        assert!(grid_faces(1, 5).is_empty());
    }

    #[test]
    fn first_cell_winding() {
        let faces = grid_faces(3, 2);
        assert_eq!(faces[0], [0, 3, 1]);
        assert_eq!(faces[1], [1, 3, 4]);
    }

    #[test]
    fn vertices_span_crystal_size() {
        let depth = DepthMap::new(3, 3, vec![0.0; 9]).unwrap();
        let mesh = build_mesh(&depth, &config()).unwrap();
        let (lo, hi) = mesh.bounds().unwrap();
        assert_eq!(lo, [0.0, 0.0, 0.0]);
        assert_eq!(hi, [10.0, 10.0, 0.0]);
    }

    #[test]
    fn top_row_has_largest_y() {
        let depth = DepthMap::new(2, 2, vec![1.0, 1.0, 0.0, 0.0]).unwrap();
        let mesh = build_mesh(&depth, &config()).unwrap();
        // Vertex 0 is the image's top-left.
        assert_eq!(mesh.vertices[0], [0.0, 10.0, 2.0]);
        assert_eq!(mesh.vertices[2], [0.0, 0.0, 0.0]);
    }

    #[test]
    fn depth_scales_by_intensity() {
        let depth = DepthMap::new(2, 2, vec![0.5; 4]).unwrap();
        let mesh = build_mesh(&depth, &config()).unwrap();
        assert!(mesh.vertices.iter().all(|v| (v[2] - 1.0).abs() < 1e-6));
    }

    #[test]
    fn faces_point_up() {
        let depth = DepthMap::new(3, 3, vec![0.0; 9]).unwrap();
        let mesh = build_mesh(&depth, &config()).unwrap();
        for [a, b, c] in &mesh.faces {
            let (a, b, c) = (
                mesh.vertices[*a as usize],
                mesh.vertices[*b as usize],
                mesh.vertices[*c as usize],
            );
            let (ux, uy) = (b[0] - a[0], b[1] - a[1]);
            let (vx, vy) = (c[0] - a[0], c[1] - a[1]);
            assert!(ux * vy - uy * vx > 0.0, "face normal should be +z");
        }
    }

    #[test]
    fn degenerate_grid_is_rejected() {
        let depth = DepthMap::new(1, 4, vec![0.0; 4]).unwrap();
        assert!(matches!(
            build_mesh(&depth, &config()),
            Err(PipelineError::InvalidConfig(_))
        ));
    }
}
