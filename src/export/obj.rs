//! Wavefront OBJ preview of a mesh buffer.
//!
//! OBJ is a simple, widely-supported text-based 3D format, handy for looking
//! at a Tiny Glade buffer in any viewer. Coordinates are written as stored
//! (Tiny Glade is Y-up, like most OBJ readers). Vertex colors go on the `v`
//! lines.

use crate::buffer::MeshBuffer;
use crate::error::Result;
use std::fmt::Write;

/// Export a decoded buffer to OBJ text.
pub fn export_obj(buffer: &MeshBuffer, name: &str) -> Result<String> {
    let vertex_count = buffer.vertex_count();
    let triangle_count = buffer.triangle_count();
    let has_colors = buffer.colors().len() == vertex_count && vertex_count > 0;
    let has_uvs = buffer.uvs().len() == vertex_count && vertex_count > 0;
    let has_normals = buffer.normals().len() == vertex_count && vertex_count > 0;

    // ~60 bytes per attribute line, ~40 per face
    let mut obj = String::with_capacity(256 + vertex_count * 180 + triangle_count * 40);

    writeln!(obj, "# Tiny Glade mesh buffer")?;
    writeln!(obj, "# Vertices: {}", vertex_count)?;
    writeln!(obj, "# Triangles: {}", triangle_count)?;
    writeln!(obj)?;
    writeln!(obj, "o {}", name)?;
    writeln!(obj)?;

    for (i, p) in buffer.positions().iter().enumerate() {
        if has_colors {
            let c = buffer.colors()[i];
            writeln!(obj, "v {} {} {} {} {} {}", p[0], p[1], p[2], c[0], c[1], c[2])?;
        } else {
            writeln!(obj, "v {} {} {}", p[0], p[1], p[2])?;
        }
    }

    if has_uvs {
        writeln!(obj)?;
        for uv in buffer.uvs() {
            writeln!(obj, "vt {} {}", uv[0], uv[1])?;
        }
    }

    if has_normals {
        writeln!(obj)?;
        for n in buffer.normals() {
            writeln!(obj, "vn {} {} {}", n[0], n[1], n[2])?;
        }
    }

    writeln!(obj)?;
    for triangle in buffer.triangles() {
        let [i0, i1, i2] = triangle.map(|i| i as usize + 1);
        match (has_uvs, has_normals) {
            (true, true) => writeln!(
                obj,
                "f {}/{}/{} {}/{}/{} {}/{}/{}",
                i0, i0, i0, i1, i1, i1, i2, i2, i2
            )?,
            (true, false) => writeln!(obj, "f {}/{} {}/{} {}/{}", i0, i0, i1, i1, i2, i2)?,
            (false, true) => writeln!(obj, "f {}//{} {}//{} {}//{}", i0, i0, i1, i1, i2, i2)?,
            (false, false) => writeln!(obj, "f {} {} {}", i0, i1, i2)?,
        }
    }

    Ok(obj)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> MeshBuffer {
        let mut buffer = MeshBuffer::new();
        buffer.set_positions(vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]]);
        buffer.set_indices(vec![0, 1, 2]);
        buffer
    }

    #[test]
    fn test_export_simple_obj() {
        let mut buffer = triangle();
        buffer.set_normals(vec![[0.0, 1.0, 0.0]; 3]);
        buffer.set_uvs(vec![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]]);

        let obj = export_obj(&buffer, "test").unwrap();

        assert!(obj.contains("o test"));
        assert!(obj.contains("v 0 0 0"));
        assert!(obj.contains("vt 0 0"));
        assert!(obj.contains("vn 0 1 0"));
        assert!(obj.contains("f 1/1/1 2/2/2 3/3/3"));
    }

    #[test]
    fn test_export_positions_only() {
        let obj = export_obj(&triangle(), "bare").unwrap();
        assert!(obj.contains("f 1 2 3"));
        assert!(!obj.contains("vt "));
        assert!(!obj.contains("vn "));
    }

    #[test]
    fn test_export_colored_vertices() {
        let mut buffer = triangle();
        buffer.set_colors(vec![[1.0, 0.5, 0.0]; 3]);
        let obj = export_obj(&buffer, "colored").unwrap();
        assert!(obj.contains("v 1 0 0 1 0.5 0"));
    }
}
