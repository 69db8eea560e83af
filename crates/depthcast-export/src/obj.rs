//! Wavefront OBJ export serializer.
//!
//! Writes the shared vertex table once (`v x y z`) followed by the
//! triangles (`f a b c`) with OBJ's **1-based** indices. Lines beginning
//! with `#` are comments.

use std::fmt::Write;

use depthcast_pipeline::Mesh;

use crate::{ExportError, ExportMetadata};

/// Serialize `mesh` as an OBJ text string.
///
/// # Errors
///
/// Returns [`ExportError::FaceIndex`] if a face is out of range.
pub fn to_obj(mesh: &Mesh, metadata: &ExportMetadata<'_>) -> Result<String, ExportError> {
    let vertex_count = mesh.vertices.len();
    if let Some((face, &index)) = mesh
        .faces
        .iter()
        .enumerate()
        .find_map(|(face, f)| f.iter().find(|&&i| i as usize >= vertex_count).map(|i| (face, i)))
    {
        return Err(ExportError::FaceIndex {
            face,
            index,
            vertex_count,
        });
    }

    let mut out = String::new();

    let _ = writeln!(out, "# depthcast");
    if let Some(title) = metadata.title {
        for line in title.lines() {
            let _ = writeln!(out, "# Source: {line}");
        }
    }
    if let Some(description) = metadata.description {
        for line in description.lines() {
            let _ = writeln!(out, "# {line}");
        }
    }
    let _ = writeln!(
        out,
        "# {vertex_count} vertices, {} faces",
        mesh.faces.len()
    );

    for [x, y, z] in &mesh.vertices {
        let _ = writeln!(out, "v {x} {y} {z}");
    }
    for [a, b, c] in &mesh.faces {
        let _ = writeln!(out, "f {} {} {}", a + 1, b + 1, c + 1);
    }

    Ok(out)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::tests::triangle;

    #[test]
    fn vertices_then_one_based_faces() {
        let obj = to_obj(&triangle(), &ExportMetadata::default()).unwrap();
        let body: Vec<&str> = obj.lines().filter(|l| !l.starts_with('#')).collect();
        assert_eq!(body, ["v 0 0 0", "v 1 0 0", "v 0 1 0", "f 1 2 3"]);
    }

    #[test]
    fn header_carries_metadata() {
        let meta = ExportMetadata {
            title: Some("cat.png"),
            description: Some("depth_intensity = 5\ncrystal_size = 50"),
        };
        let obj = to_obj(&triangle(), &meta).unwrap();
        let header: Vec<&str> = obj.lines().take_while(|l| l.starts_with('#')).collect();
        assert_eq!(
            header,
            [
                "# depthcast",
                "# Source: cat.png",
                "# depth_intensity = 5",
                "# crystal_size = 50",
                "# 3 vertices, 1 faces",
            ]
        );
    }

    #[test]
    fn reports_first_bad_face() {
        let mesh = Mesh {
            vertices: vec![[0.0; 3]; 2],
            faces: vec![[0, 1, 0], [0, 2, 5]],
        };
        assert_eq!(
            to_obj(&mesh, &ExportMetadata::default()),
            Err(ExportError::FaceIndex {
                face: 1,
                index: 2,
                vertex_count: 2,
            })
        );
    }
}
