//! The in-memory form of a Tiny Glade mesh buffer document.

use crate::error::{MeshBufferError, Result};
use crate::types::{AttributeName, BoundingBox};

/// A decoded (or about to be encoded) mesh buffer document.
///
/// Attribute order is the order in which setters were first called. It is
/// written out as the `attributes` array and as the record order, so build
/// a buffer in the exporter's order: position, normal, color, UV, then the
/// material flags.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshBuffer {
    order: Vec<AttributeName>,
    positions: Option<Vec<[f32; 3]>>,
    normals: Option<Vec<[f32; 3]>>,
    colors: Option<Vec<[f32; 3]>>,
    uvs: Option<Vec<[f32; 2]>>,
    is_metal: Option<Vec<i32>>,
    is_glass: Option<Vec<i32>>,
    prim_center: Option<Vec<[f32; 3]>>,
    appear_pos: Option<Vec<[f32; 3]>>,
    indices: Option<Vec<u32>>,
}

impl MeshBuffer {
    /// Create an empty document with no attributes and `indices: null`.
    pub fn new() -> Self {
        Self::default()
    }

    fn declare(&mut self, name: AttributeName) {
        if !self.order.contains(&name) {
            self.order.push(name);
        }
    }

    pub fn set_positions(&mut self, positions: Vec<[f32; 3]>) {
        self.declare(AttributeName::VertexPosition);
        self.positions = Some(positions);
    }

    pub fn set_normals(&mut self, normals: Vec<[f32; 3]>) {
        self.declare(AttributeName::VertexNormal);
        self.normals = Some(normals);
    }

    pub fn set_colors(&mut self, colors: Vec<[f32; 3]>) {
        self.declare(AttributeName::VertexColor);
        self.colors = Some(colors);
    }

    pub fn set_uvs(&mut self, uvs: Vec<[f32; 2]>) {
        self.declare(AttributeName::VertexUv);
        self.uvs = Some(uvs);
    }

    pub fn set_is_metal(&mut self, values: Vec<i32>) {
        self.declare(AttributeName::IsMetal);
        self.is_metal = Some(values);
    }

    pub fn set_is_glass(&mut self, values: Vec<i32>) {
        self.declare(AttributeName::IsGlass);
        self.is_glass = Some(values);
    }

    pub fn set_prim_center(&mut self, points: Vec<[f32; 3]>) {
        self.declare(AttributeName::PrimCenter);
        self.prim_center = Some(points);
    }

    pub fn set_appear_pos(&mut self, points: Vec<[f32; 3]>) {
        self.declare(AttributeName::AppearPos);
        self.appear_pos = Some(points);
    }

    /// Set the flat triangle index list. `indices` stays out of `attributes`.
    pub fn set_indices(&mut self, indices: Vec<u32>) {
        self.indices = Some(indices);
    }

    /// Attributes present, in declaration order.
    pub fn attribute_names(&self) -> &[AttributeName] {
        &self.order
    }

    /// Check whether an attribute record is present.
    pub fn has(&self, name: AttributeName) -> bool {
        self.order.contains(&name)
    }

    /// Whether `indices` holds a buffer (rather than `null`).
    pub fn has_indices(&self) -> bool {
        self.indices.is_some()
    }

    pub fn positions(&self) -> &[[f32; 3]] {
        self.positions.as_deref().unwrap_or_default()
    }

    pub fn normals(&self) -> &[[f32; 3]] {
        self.normals.as_deref().unwrap_or_default()
    }

    pub fn colors(&self) -> &[[f32; 3]] {
        self.colors.as_deref().unwrap_or_default()
    }

    pub fn uvs(&self) -> &[[f32; 2]] {
        self.uvs.as_deref().unwrap_or_default()
    }

    pub fn is_metal(&self) -> &[i32] {
        self.is_metal.as_deref().unwrap_or_default()
    }

    pub fn is_glass(&self) -> &[i32] {
        self.is_glass.as_deref().unwrap_or_default()
    }

    pub fn prim_center(&self) -> &[[f32; 3]] {
        self.prim_center.as_deref().unwrap_or_default()
    }

    pub fn appear_pos(&self) -> &[[f32; 3]] {
        self.appear_pos.as_deref().unwrap_or_default()
    }

    pub fn indices(&self) -> &[u32] {
        self.indices.as_deref().unwrap_or_default()
    }

    /// Number of vertices (length of `Vertex_Position`).
    pub fn vertex_count(&self) -> usize {
        self.positions().len()
    }

    /// Number of complete triangles in `indices`.
    pub fn triangle_count(&self) -> usize {
        self.indices().len() / 3
    }

    /// Iterate over index triples.
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices()
            .chunks_exact(3)
            .map(|tri| [tri[0], tri[1], tri[2]])
    }

    /// Length of the buffer stored under `name` (0 when absent).
    pub fn attribute_len(&self, name: AttributeName) -> usize {
        match name {
            AttributeName::VertexPosition => self.positions().len(),
            AttributeName::VertexNormal => self.normals().len(),
            AttributeName::VertexColor => self.colors().len(),
            AttributeName::VertexUv => self.uvs().len(),
            AttributeName::IsMetal => self.is_metal().len(),
            AttributeName::IsGlass => self.is_glass().len(),
            AttributeName::PrimCenter => self.prim_center().len(),
            AttributeName::AppearPos => self.appear_pos().len(),
        }
    }

    /// Bounding box of `Vertex_Position`, in interchange coordinates.
    pub fn bounds(&self) -> Option<BoundingBox> {
        BoundingBox::from_points(self.positions().iter().copied())
    }

    /// Check the document invariants.
    ///
    /// - `indices` length is a multiple of 3.
    /// - Every index is below the vertex count.
    /// - Per-vertex attributes match the position count when positions exist.
    /// - Float attributes are finite.
    pub fn validate(&self) -> Result<()> {
        let indices = self.indices();
        if indices.len() % 3 != 0 {
            return Err(MeshBufferError::format(format!(
                "indices length {} is not a multiple of 3",
                indices.len()
            )));
        }

        let vertex_count = self.vertex_count();
        if let Some((slot, &index)) = indices
            .iter()
            .enumerate()
            .find(|&(_, &i)| i as usize >= vertex_count)
        {
            return Err(MeshBufferError::format(format!(
                "index {} at position {} is out of range for {} vertices",
                index, slot, vertex_count
            )));
        }

        if self.has(AttributeName::VertexPosition) {
            for &name in &self.order {
                if !name.is_per_vertex() {
                    continue;
                }
                let len = self.attribute_len(name);
                if len != vertex_count {
                    return Err(MeshBufferError::format(format!(
                        "{} has {} entries but Vertex_Position has {}",
                        name, len, vertex_count
                    )));
                }
            }
        }

        for &name in &self.order {
            if let Some(slot) = self.first_non_finite(name) {
                return Err(MeshBufferError::format(format!(
                    "{}[{}] is not a finite number",
                    name, slot
                )));
            }
        }

        Ok(())
    }

    fn first_non_finite(&self, name: AttributeName) -> Option<usize> {
        fn find<const N: usize>(values: &[[f32; N]]) -> Option<usize> {
            values
                .iter()
                .position(|value| value.iter().any(|v| !v.is_finite()))
        }

        match name {
            AttributeName::VertexPosition => find(self.positions()),
            AttributeName::VertexNormal => find(self.normals()),
            AttributeName::VertexColor => find(self.colors()),
            AttributeName::VertexUv => find(self.uvs()),
            AttributeName::PrimCenter => find(self.prim_center()),
            AttributeName::AppearPos => find(self.appear_pos()),
            AttributeName::IsMetal | AttributeName::IsGlass => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> MeshBuffer {
        let mut buffer = MeshBuffer::new();
        buffer.set_positions(vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]);
        buffer.set_indices(vec![0, 1, 2]);
        buffer
    }

    #[test]
    fn test_declaration_order() {
        let mut buffer = MeshBuffer::new();
        buffer.set_is_metal(vec![0]);
        buffer.set_positions(vec![[0.0; 3]]);
        buffer.set_is_metal(vec![1]);

        assert_eq!(
            buffer.attribute_names(),
            &[AttributeName::IsMetal, AttributeName::VertexPosition]
        );
        assert_eq!(buffer.is_metal(), &[1]);
        assert!(!buffer.has(AttributeName::VertexNormal));
    }

    #[test]
    fn test_empty_buffer() {
        let buffer = MeshBuffer::new();
        assert_eq!(buffer.vertex_count(), 0);
        assert_eq!(buffer.triangle_count(), 0);
        assert!(!buffer.has_indices());
        assert!(buffer.bounds().is_none());
        assert!(buffer.validate().is_ok());
    }

    #[test]
    fn test_validate_triangle() {
        let buffer = triangle();
        assert!(buffer.validate().is_ok());
        assert_eq!(buffer.triangles().collect::<Vec<_>>(), vec![[0, 1, 2]]);
    }

    #[test]
    fn test_validate_index_out_of_range() {
        let mut buffer = triangle();
        buffer.set_indices(vec![0, 1, 3]);
        let err = buffer.validate().unwrap_err();
        assert!(matches!(err, MeshBufferError::InvalidFormat(_)));
    }

    #[test]
    fn test_validate_partial_triangle() {
        let mut buffer = triangle();
        buffer.set_indices(vec![0, 1]);
        assert!(buffer.validate().unwrap_err().is_invalid_format());
    }

    #[test]
    fn test_validate_length_mismatch() {
        let mut buffer = triangle();
        buffer.set_normals(vec![[0.0, 1.0, 0.0]; 2]);
        assert!(buffer.validate().is_err());

        // Point lists are not per-vertex.
        let mut buffer = triangle();
        buffer.set_prim_center(vec![[0.0; 3]; 7]);
        assert!(buffer.validate().is_ok());
    }

    #[test]
    fn test_validate_non_finite() {
        let mut buffer = triangle();
        buffer.set_uvs(vec![[0.0, 0.0], [f32::NAN, 0.0], [0.0, 1.0]]);
        let err = buffer.validate().unwrap_err();
        assert!(err.to_string().contains("Vertex_UV[1]"));

        let mut buffer = triangle();
        buffer.set_appear_pos(vec![[0.0, f32::INFINITY, 0.0]]);
        assert!(buffer.validate().unwrap_err().is_invalid_format());
    }

    #[test]
    fn test_flags_without_positions() {
        let mut buffer = MeshBuffer::new();
        buffer.set_is_glass(vec![0, 1, 1]);
        assert!(buffer.validate().is_ok());
    }
}
