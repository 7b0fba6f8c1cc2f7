//! Material flag highlighting.
//!
//! Produces the point list a viewport would draw over flagged vertices. The
//! toggle lives in [`OverlayContext`], passed in by the caller on every draw.

use crate::adapter::{ColorLayer, HostMesh, SceneObject};
use crate::types::MaterialFlag;
use glam::Vec3;

/// Point size used when drawing the overlay, in pixels.
pub const OVERLAY_POINT_SIZE: f32 = 10.0;

/// Draw-time state for the overlay.
#[derive(Debug, Clone, Copy)]
pub struct OverlayContext {
    /// The user-facing "Material Attributes" toggle.
    pub show_material_overlay: bool,
    /// Whether the object is being edited. The overlay only draws in edit mode.
    pub edit_mode: bool,
    pub point_size: f32,
}

impl Default for OverlayContext {
    fn default() -> Self {
        Self {
            show_material_overlay: false,
            edit_mode: false,
            point_size: OVERLAY_POINT_SIZE,
        }
    }
}

impl OverlayContext {
    /// Context with the overlay shown while editing.
    pub fn editing() -> Self {
        Self {
            show_material_overlay: true,
            edit_mode: true,
            ..Self::default()
        }
    }

    pub fn is_active(&self) -> bool {
        self.show_material_overlay && self.edit_mode
    }
}

/// One highlighted vertex.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayPoint {
    /// World-space position.
    pub position: [f32; 3],
    /// RGBA: red for metal, blue for glass, both channels for both.
    pub color: [f32; 4],
}

fn flag_color(metal: bool, glass: bool) -> [f32; 4] {
    [
        if metal { 1.0 } else { 0.0 },
        0.0,
        if glass { 1.0 } else { 0.0 },
        1.0,
    ]
}

fn is_set(values: Option<&[i32]>, vertex: usize) -> bool {
    values
        .and_then(|values| values.get(vertex))
        .is_some_and(|&value| value == 1)
}

/// Points to draw for `object`. Empty when the overlay is inactive, the
/// object is not a mesh, or no vertex carries a flag.
pub fn flagged_points(object: &dyn SceneObject, ctx: &OverlayContext) -> Vec<OverlayPoint> {
    if !ctx.is_active() {
        return Vec::new();
    }
    let Some(mesh) = object.mesh() else {
        return Vec::new();
    };

    let metal = mesh.int_attribute(MaterialFlag::Metal.attribute_name());
    let glass = mesh.int_attribute(MaterialFlag::Glass.attribute_name());
    if metal.is_none() && glass.is_none() {
        return Vec::new();
    }

    let matrix = object.world_matrix();
    mesh.positions()
        .iter()
        .enumerate()
        .filter_map(|(vertex, &position)| {
            let is_metal = is_set(metal, vertex);
            let is_glass = is_set(glass, vertex);
            (is_metal || is_glass).then(|| OverlayPoint {
                position: matrix.transform_point3(Vec3::from_array(position)).to_array(),
                color: flag_color(is_metal, is_glass),
            })
        })
        .collect()
}

/// Bake the material flags into a point color layer: red for metal, blue
/// for glass, black otherwise. Replaces the active color layer.
pub fn visualize_flags(mesh: &mut HostMesh) {
    let colors = (0..mesh.vertex_count())
        .map(|vertex| {
            flag_color(
                mesh.has_flag(MaterialFlag::Metal, vertex),
                mesh.has_flag(MaterialFlag::Glass, vertex),
            )
        })
        .collect();
    mesh.colors = Some(ColorLayer::Point(colors));
}
