//! DXF export serializer.
//!
//! Emits a minimal ASCII DXF (R12, `AC1009`) that CAD and laser
//! software import as a point cloud: one `POINT` entity per mesh
//! vertex on layer `0`. Faces are not written.
//!
//! DXF is a flat list of *group code* / *value* line pairs. The codes
//! used here:
//!
//! | code | meaning |
//! |------|---------|
//! | 0    | entity / section marker |
//! | 2    | section name |
//! | 8    | layer |
//! | 9    | header variable name |
//! | 10, 20, 30 | x, y, z |
//! | 999  | comment |

use std::fmt::Write;

use depthcast_pipeline::Mesh;

use crate::ExportMetadata;

/// Serialize the vertices of `mesh` as DXF `POINT` entities.
#[must_use]
pub fn to_dxf(mesh: &Mesh, metadata: &ExportMetadata<'_>) -> String {
    let mut out = String::new();

    group(&mut out, 999, "depthcast");
    if let Some(title) = metadata.title {
        for line in title.lines() {
            group(&mut out, 999, &format!("Source: {line}"));
        }
    }

    group(&mut out, 0, "SECTION");
    group(&mut out, 2, "HEADER");
    group(&mut out, 9, "$ACADVER");
    group(&mut out, 1, "AC1009");
    group(&mut out, 0, "ENDSEC");

    group(&mut out, 0, "SECTION");
    group(&mut out, 2, "ENTITIES");
    for [x, y, z] in &mesh.vertices {
        group(&mut out, 0, "POINT");
        group(&mut out, 8, "0");
        group(&mut out, 10, &x.to_string());
        group(&mut out, 20, &y.to_string());
        group(&mut out, 30, &z.to_string());
    }
    group(&mut out, 0, "ENDSEC");
    group(&mut out, 0, "EOF");

    out
}

fn group(out: &mut String, code: u16, value: &str) {
    let _ = writeln!(out, "{code:>3}\n{value}");
}
