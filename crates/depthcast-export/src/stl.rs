//! STL export serializer.
//!
//! STL stores a bare triangle soup: every facet carries its own normal
//! and three corner positions, with no shared vertex table. Slicers and
//! laser-etching software accept both flavours:
//!
//! - **Binary**: an 80-byte free-form header, a little-endian `u32`
//!   facet count, then 50 bytes per facet (normal, three vertices as
//!   `f32` triples, and a `u16` attribute word that is always zero).
//! - **ASCII**: `solid <name>` … `endsolid <name>` wrapping
//!   `facet normal` / `outer loop` blocks.
//!
//! Units are millimetres. Normals are recomputed from the winding
//! rather than taken from the mesh.

use std::fmt::Write;

use depthcast_pipeline::Mesh;

use crate::{ExportError, ExportMetadata, facet_normal, triangles};

/// Size of the binary STL header in bytes.
pub const HEADER_LEN: usize = 80;

/// Size of one binary STL facet record in bytes.
pub const FACET_LEN: usize = 50;

/// Serialize `mesh` as binary STL.
///
/// The header holds `depthcast` followed by the title, truncated to
/// fit. It never starts with `solid`, which some readers use to sniff
/// the ASCII flavour.
///
/// # Errors
///
/// Returns [`ExportError::FaceIndex`] if a face is out of range.
pub fn to_stl_binary(mesh: &Mesh, metadata: &ExportMetadata<'_>) -> Result<Vec<u8>, ExportError> {
    let tris = triangles(mesh)?;
    let count = u32::try_from(tris.len()).unwrap_or(u32::MAX);

    let mut out = Vec::with_capacity(HEADER_LEN + 4 + tris.len() * FACET_LEN);

    let mut header = String::from("depthcast");
    if let Some(title) = metadata.title {
        header.push_str(": ");
        header.push_str(title);
    }
    let mut header = header.into_bytes();
    header.resize(HEADER_LEN, 0);
    out.extend_from_slice(&header);

    out.extend_from_slice(&count.to_le_bytes());

    for tri in tris.iter().take(count as usize) {
        for value in facet_normal(tri).into_iter().chain(tri.iter().flatten().copied()) {
            out.extend_from_slice(&value.to_le_bytes());
        }
        out.extend_from_slice(&0u16.to_le_bytes());
    }

    Ok(out)
}

/// Serialize `mesh` as ASCII STL with the solid named `name`.
///
/// Whitespace in `name` is replaced by `_` so the `solid` line stays a
/// single token.
///
/// # Errors
///
/// Returns [`ExportError::FaceIndex`] if a face is out of range.
pub fn to_stl_ascii(mesh: &Mesh, name: &str) -> Result<String, ExportError> {
    let tris = triangles(mesh)?;
    let name: String = name
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect();

    let mut out = String::new();
    let _ = writeln!(out, "solid {name}");
    for tri in &tris {
        let [nx, ny, nz] = facet_normal(tri);
        let _ = writeln!(out, "  facet normal {nx:e} {ny:e} {nz:e}");
        let _ = writeln!(out, "    outer loop");
        for [x, y, z] in tri {
            let _ = writeln!(out, "      vertex {x:e} {y:e} {z:e}");
        }
        let _ = writeln!(out, "    endloop");
        let _ = writeln!(out, "  endfacet");
    }
    let _ = writeln!(out, "endsolid {name}");

    Ok(out)
}
