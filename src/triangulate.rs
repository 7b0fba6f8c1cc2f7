//! Polygon triangulation.
//!
//! Triangulation works on corner indices, not vertex indices, so per-corner
//! layers stay addressable after the split.

use crate::adapter::MeshSource;
use crate::error::{MeshBufferError, Result};

/// Splits one polygon into triangles.
pub trait Triangulator {
    /// `corners` are the polygon's corner indices in winding order. Returns
    /// triangles as corner index triples.
    fn triangulate(&self, corners: &[u32]) -> Vec<[u32; 3]>;
}

/// Fan triangulation around the first corner. Exact for convex polygons and
/// preserves winding.
#[derive(Debug, Clone, Copy, Default)]
pub struct FanTriangulator;

impl Triangulator for FanTriangulator {
    fn triangulate(&self, corners: &[u32]) -> Vec<[u32; 3]> {
        if corners.len() < 3 {
            return Vec::new();
        }
        (1..corners.len() - 1)
            .map(|i| [corners[0], corners[i], corners[i + 1]])
            .collect()
    }
}

/// Triangulate every polygon of `mesh` and return flat vertex indices,
/// three per triangle, in polygon order.
pub fn triangulate_mesh(mesh: &dyn MeshSource, triangulator: &dyn Triangulator) -> Result<Vec<u32>> {
    let corner_vertices = mesh.corner_vertices();
    let vertex_count = mesh.vertex_count();
    let mut indices = Vec::with_capacity(corner_vertices.len() * 3);

    for (polygon_index, polygon) in mesh.polygons().iter().enumerate() {
        let corners: Vec<u32> = polygon.corners().map(|c| c as u32).collect();
        for triangle in triangulator.triangulate(&corners) {
            for corner in triangle {
                let vertex = corner_vertices
                    .get(corner as usize)
                    .copied()
                    .filter(|&v| (v as usize) < vertex_count)
                    .ok_or_else(|| {
                        MeshBufferError::format(format!(
                            "polygon {} has invalid corner {}",
                            polygon_index, corner
                        ))
                    })?;
                indices.push(vertex);
            }
        }
    }

    Ok(indices)
}
