//! Conversion between per-corner and per-vertex attribute storage.
//!
//! The host stores colors and UVs per corner, the buffer format per vertex.
//! On export, corners are walked in polygon order and then in corner order
//! within each polygon, and the first value seen for a vertex wins. That
//! traversal order is part of the format contract: changing it changes which
//! side of a UV seam ends up in the file.

use crate::adapter::Polygon;
use crate::error::{MeshBufferError, Result};
use log::warn;

/// Collapse per-corner values to one value per vertex, first seen wins.
///
/// Vertices no polygon references get `T::default()`.
pub fn collapse_corners<T: Copy + Default>(
    polygons: &[Polygon],
    corner_vertices: &[u32],
    corner_values: &[T],
    vertex_count: usize,
) -> Result<Vec<T>> {
    if corner_values.len() != corner_vertices.len() {
        return Err(MeshBufferError::format(format!(
            "corner layer has {} values for {} corners",
            corner_values.len(),
            corner_vertices.len()
        )));
    }

    let mut collapsed: Vec<Option<T>> = vec![None; vertex_count];
    for polygon in polygons {
        for corner in checked_corners(polygon, corner_vertices.len())? {
            let vertex = corner_vertices[corner] as usize;
            let slot = collapsed.get_mut(vertex).ok_or_else(|| {
                MeshBufferError::format(format!(
                    "corner {} references vertex {} of {}",
                    corner, vertex, vertex_count
                ))
            })?;
            if slot.is_none() {
                *slot = Some(corner_values[corner]);
            }
        }
    }

    let unreferenced = collapsed.iter().filter(|value| value.is_none()).count();
    if unreferenced > 0 {
        warn!(
            "{} of {} vertices are not used by any polygon, writing default values",
            unreferenced, vertex_count
        );
    }

    Ok(collapsed
        .into_iter()
        .map(|value| value.unwrap_or_default())
        .collect())
}

/// Expand per-vertex values to every corner that references the vertex.
pub fn fan_out_corners<T: Copy>(
    polygons: &[Polygon],
    corner_vertices: &[u32],
    vertex_values: &[T],
) -> Result<Vec<T>> {
    let mut corners = Vec::with_capacity(corner_vertices.len());
    for polygon in polygons {
        for corner in checked_corners(polygon, corner_vertices.len())? {
            let vertex = corner_vertices[corner] as usize;
            let value = vertex_values.get(vertex).ok_or_else(|| {
                MeshBufferError::format(format!(
                    "corner {} references vertex {} but only {} values exist",
                    corner,
                    vertex,
                    vertex_values.len()
                ))
            })?;
            corners.push(*value);
        }
    }

    if corners.len() != corner_vertices.len() {
        return Err(MeshBufferError::format(format!(
            "polygons cover {} of {} corners",
            corners.len(),
            corner_vertices.len()
        )));
    }

    Ok(corners)
}

fn checked_corners(polygon: &Polygon, corner_count: usize) -> Result<std::ops::Range<usize>> {
    let corners = polygon.corners();
    if corners.end > corner_count {
        return Err(MeshBufferError::format(format!(
            "polygon corners {:?} exceed {} corners",
            corners, corner_count
        )));
    }
    Ok(corners)
}
