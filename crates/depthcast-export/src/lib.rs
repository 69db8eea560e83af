//! depthcast-export: Pure mesh serializers (sans-IO)
//!
//! Converts a relief [`Mesh`] into the downloadable 3D formats: binary
//! or ASCII STL, Wavefront OBJ and DXF. Every serializer returns bytes
//! or a `String`; writing them anywhere is the caller's business.

pub mod dxf;
pub mod obj;
pub mod stl;

use depthcast_api::ExportFormat;
use depthcast_pipeline::Mesh;

pub use dxf::to_dxf;
pub use obj::to_obj;
pub use stl::{to_stl_ascii, to_stl_binary};

/// Metadata embedded as comments (or the STL header) where the format
/// has room for it.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExportMetadata<'a> {
    /// Source image filename.
    pub title: Option<&'a str>,

    /// Human-readable relief parameters, one per line.
    pub description: Option<&'a str>,
}

/// Errors raised while serializing a mesh.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ExportError {
    /// A face refers to a vertex that does not exist.
    #[error("face {face} references vertex {index}, but the mesh has {vertex_count} vertices")]
    FaceIndex {
        /// Position of the offending face in `Mesh::faces`.
        face: usize,
        /// The out-of-range vertex index.
        index: u32,
        /// Number of vertices in the mesh.
        vertex_count: usize,
    },
}

/// Serialize `mesh` in `format`.
///
/// STL is written in the binary flavour.
///
/// # Errors
///
/// Returns [`ExportError::FaceIndex`] if any face points past the end
/// of the vertex list.
pub fn serialize(
    mesh: &Mesh,
    format: ExportFormat,
    metadata: &ExportMetadata<'_>,
) -> Result<Vec<u8>, ExportError> {
    match format {
        ExportFormat::Stl => to_stl_binary(mesh, metadata),
        ExportFormat::Obj => to_obj(mesh, metadata).map(String::into_bytes),
        ExportFormat::Dxf => Ok(to_dxf(mesh, metadata).into_bytes()),
    }
}

/// Resolve every face of `mesh` to its three vertex positions.
fn triangles(mesh: &Mesh) -> Result<Vec<[[f32; 3]; 3]>, ExportError> {
    mesh.faces
        .iter()
        .enumerate()
        .map(|(face, indices)| {
            let mut corners = [[0.0; 3]; 3];
            for (corner, &index) in corners.iter_mut().zip(indices) {
                *corner = *mesh
                    .vertices
                    .get(index as usize)
                    .ok_or(ExportError::FaceIndex {
                        face,
                        index,
                        vertex_count: mesh.vertices.len(),
                    })?;
            }
            Ok(corners)
        })
        .collect()
}

/// Unit normal of a triangle by the right-hand rule, or zero when the
/// triangle is degenerate.
fn facet_normal([a, b, c]: &[[f32; 3]; 3]) -> [f32; 3] {
    let u = [b[0] - a[0], b[1] - a[1], b[2] - a[2]];
    let v = [c[0] - a[0], c[1] - a[1], c[2] - a[2]];
    let n = [
        u[1].mul_add(v[2], -(u[2] * v[1])),
        u[2].mul_add(v[0], -(u[0] * v[2])),
        u[0].mul_add(v[1], -(u[1] * v[0])),
    ];
    let len = n[0].mul_add(n[0], n[1].mul_add(n[1], n[2] * n[2])).sqrt();
    if len > f32::EPSILON {
        n.map(|c| c / len)
    } else {
        [0.0; 3]
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    /// A single up-facing right triangle.
    pub(crate) fn triangle() -> Mesh {
        Mesh {
            vertices: vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
            faces: vec![[0, 1, 2]],
        }
    }

    #[test]
    fn out_of_range_face_is_rejected() {
        let mut mesh = triangle();
        mesh.faces.push([0, 1, 7]);
        let err = serialize(&mesh, ExportFormat::Stl, &ExportMetadata::default()).unwrap_err();
        assert_eq!(
            err,
            ExportError::FaceIndex {
                face: 1,
                index: 7,
                vertex_count: 3,
            }
        );
        assert!(serialize(&mesh, ExportFormat::Obj, &ExportMetadata::default()).is_err());
    }

    #[test]
    fn normal_follows_winding() {
        let tri = triangles(&triangle()).unwrap();
        assert_eq!(facet_normal(&tri[0]), [0.0, 0.0, 1.0]);

        let [a, b, c] = tri[0];
        assert_eq!(facet_normal(&[a, c, b]), [0.0, 0.0, -1.0]);
    }

    #[test]
    fn degenerate_triangle_has_zero_normal() {
        let p = [1.0, 2.0, 3.0];
        assert_eq!(facet_normal(&[p, p, p]), [0.0; 3]);
    }

    #[test]
    fn serialize_dispatches_by_format() {
        let mesh = triangle();
        let meta = ExportMetadata::default();

        let stl = serialize(&mesh, ExportFormat::Stl, &meta).unwrap();
        assert_eq!(stl.len(), 84 + 50);

        let obj = String::from_utf8(serialize(&mesh, ExportFormat::Obj, &meta).unwrap()).unwrap();
        assert!(obj.contains("f 1 2 3"));

        let dxf = String::from_utf8(serialize(&mesh, ExportFormat::Dxf, &meta).unwrap()).unwrap();
        assert!(dxf.trim_end().ends_with("EOF"));
    }
}
