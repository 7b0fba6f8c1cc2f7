//! Host-side mesh model.
//!
//! The conversion pipeline never talks to a 3D application directly. It reads
//! through [`MeshSource`] / [`SceneObject`] and hands finished objects to a
//! [`SceneSink`]. [`HostMesh`], [`HostObject`] and [`HostScene`] are plain
//! in-memory implementations shaped like a polygon mesh with loops (corners).

use crate::types::MaterialFlag;
use glam::{Mat4, Vec3};
use std::collections::BTreeMap;
use std::ops::Range;

/// A polygon as a contiguous run of corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Polygon {
    /// First corner of this polygon.
    pub loop_start: u32,
    /// Number of corners.
    pub loop_total: u32,
}

impl Polygon {
    pub fn new(loop_start: u32, loop_total: u32) -> Self {
        Self {
            loop_start,
            loop_total,
        }
    }

    /// Corner indices of this polygon.
    pub fn corners(&self) -> Range<usize> {
        let start = self.loop_start as usize;
        start..start + self.loop_total as usize
    }
}

/// Storage domain of a color layer.
#[derive(Debug, Clone, PartialEq)]
pub enum ColorLayer {
    /// One RGBA value per vertex.
    Point(Vec<[f32; 4]>),
    /// One RGBA value per corner.
    Corner(Vec<[f32; 4]>),
}

/// Read-only view of a host mesh.
pub trait MeshSource {
    /// Vertex positions in object space.
    fn positions(&self) -> &[[f32; 3]];

    /// Per-vertex normals in object space. May be empty if the host has not
    /// computed them.
    fn vertex_normals(&self) -> &[[f32; 3]];

    /// Polygons in stored order.
    fn polygons(&self) -> &[Polygon];

    /// Vertex index of each corner.
    fn corner_vertices(&self) -> &[u32];

    /// Active color layer, if any.
    fn color_layer(&self) -> Option<&ColorLayer>;

    /// Active UV layer (one value per corner), if any.
    fn uv_layer(&self) -> Option<&[[f32; 2]]>;

    /// Integer point attribute by name.
    fn int_attribute(&self, name: &str) -> Option<&[i32]>;

    fn vertex_count(&self) -> usize {
        self.positions().len()
    }
}

/// A scene object the exporter may be pointed at.
pub trait SceneObject {
    fn name(&self) -> &str;

    /// Object-to-world transform applied to positions on export.
    fn world_matrix(&self) -> Mat4;

    /// Mesh data, or `None` if the object is not a mesh.
    fn mesh(&self) -> Option<&dyn MeshSource>;
}

/// Receives objects created by an import.
pub trait SceneSink {
    fn link_mesh(&mut self, name: &str, mesh: HostMesh);

    fn link_points(&mut self, name: &str, points: Vec<[f32; 3]>);
}

/// An in-memory polygon mesh.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HostMesh {
    /// Vertex positions.
    pub positions: Vec<[f32; 3]>,
    /// Per-vertex normals. Empty until set or computed.
    pub normals: Vec<[f32; 3]>,
    /// Polygons referencing runs of `corner_vertices`.
    pub polygons: Vec<Polygon>,
    /// Vertex index of each corner.
    pub corner_vertices: Vec<u32>,
    /// Active color layer.
    pub colors: Option<ColorLayer>,
    /// Name of the active color layer.
    pub color_layer_name: Option<String>,
    /// Active UV layer, per corner.
    pub uvs: Option<Vec<[f32; 2]>>,
    /// Name of the active UV layer.
    pub uv_layer_name: Option<String>,
    /// Named integer point attributes (`is_metal`, `is_glass`, ...).
    pub int_attributes: BTreeMap<String, Vec<i32>>,
}

impl HostMesh {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a mesh from positions and polygons given as vertex index lists.
    pub fn from_polygons<P: AsRef<[u32]>>(positions: Vec<[f32; 3]>, polygons: &[P]) -> Self {
        let mut mesh = Self {
            positions,
            ..Self::default()
        };
        for polygon in polygons {
            mesh.add_polygon(polygon.as_ref());
        }
        mesh
    }

    /// Add a vertex and return its index.
    pub fn add_vertex(&mut self, position: [f32; 3]) -> u32 {
        let index = self.positions.len() as u32;
        self.positions.push(position);
        index
    }

    /// Add a polygon by vertex indices and return its index.
    pub fn add_polygon(&mut self, vertices: &[u32]) -> usize {
        let loop_start = self.corner_vertices.len() as u32;
        self.corner_vertices.extend_from_slice(vertices);
        self.polygons
            .push(Polygon::new(loop_start, vertices.len() as u32));
        self.polygons.len() - 1
    }

    /// Add a triangle by vertex indices.
    pub fn add_triangle(&mut self, i0: u32, i1: u32, i2: u32) -> usize {
        self.add_polygon(&[i0, i1, i2])
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn polygon_count(&self) -> usize {
        self.polygons.len()
    }

    pub fn corner_count(&self) -> usize {
        self.corner_vertices.len()
    }

    /// Vertex indices of one polygon.
    pub fn polygon_vertices(&self, polygon: usize) -> &[u32] {
        match self.polygons.get(polygon) {
            Some(p) => self.corner_vertices.get(p.corners()).unwrap_or_default(),
            None => &[],
        }
    }

    /// Reverse the corner order of every polygon, flipping face orientation.
    /// Per-corner layers are reordered with their corners.
    pub fn flip_winding(&mut self) {
        for polygon in &self.polygons {
            let corners = polygon.corners();
            if corners.end > self.corner_vertices.len() {
                continue;
            }
            self.corner_vertices[corners.clone()].reverse();
            if let Some(uvs) = self.uvs.as_mut().filter(|uvs| uvs.len() >= corners.end) {
                uvs[corners.clone()].reverse();
            }
            if let Some(ColorLayer::Corner(colors)) = self.colors.as_mut() {
                if colors.len() >= corners.end {
                    colors[corners].reverse();
                }
            }
        }
    }

    /// Compute area-weighted vertex normals from polygon geometry.
    pub fn compute_normals(&self) -> Vec<[f32; 3]> {
        compute_vertex_normals(self)
    }

    /// Store normals computed by [`compute_normals`](Self::compute_normals).
    pub fn update_normals(&mut self) {
        self.normals = self.compute_normals();
    }

    /// Value of a material flag per vertex, if the attribute exists.
    pub fn flag(&self, flag: MaterialFlag) -> Option<&[i32]> {
        self.int_attributes
            .get(flag.attribute_name())
            .map(|values| values.as_slice())
    }

    /// Whether `vertex` has `flag` set.
    pub fn has_flag(&self, flag: MaterialFlag, vertex: usize) -> bool {
        self.flag(flag)
            .and_then(|values| values.get(vertex))
            .is_some_and(|&value| value == 1)
    }

    /// Flip a material flag (0 <-> 1) on the given vertices, creating the
    /// attribute as all zeros if it does not exist. Out-of-range indices are
    /// skipped. Returns the number of vertices toggled.
    pub fn toggle_flag(&mut self, flag: MaterialFlag, selected: &[u32]) -> usize {
        let vertex_count = self.positions.len();
        let values = self
            .int_attributes
            .entry(flag.attribute_name().to_string())
            .or_insert_with(|| vec![0; vertex_count]);
        values.resize(vertex_count, 0);

        let mut toggled = 0;
        for &vertex in selected {
            if let Some(value) = values.get_mut(vertex as usize) {
                *value = if *value == 0 { 1 } else { 0 };
                toggled += 1;
            }
        }
        toggled
    }
}

impl MeshSource for HostMesh {
    fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }

    fn vertex_normals(&self) -> &[[f32; 3]] {
        &self.normals
    }

    fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }

    fn corner_vertices(&self) -> &[u32] {
        &self.corner_vertices
    }

    fn color_layer(&self) -> Option<&ColorLayer> {
        self.colors.as_ref()
    }

    fn uv_layer(&self) -> Option<&[[f32; 2]]> {
        self.uvs.as_deref()
    }

    fn int_attribute(&self, name: &str) -> Option<&[i32]> {
        self.int_attributes.get(name).map(|values| values.as_slice())
    }
}

/// Area-weighted vertex normals of any mesh source.
///
/// Polygon normals come from Newell's method, so non-planar polygons still
/// get a sensible direction. Vertices outside every polygon get a zero normal.
pub fn compute_vertex_normals(mesh: &dyn MeshSource) -> Vec<[f32; 3]> {
    let positions = mesh.positions();
    let corner_vertices = mesh.corner_vertices();
    let mut sums = vec![Vec3::ZERO; positions.len()];

    for polygon in mesh.polygons() {
        let vertices = corner_vertices.get(polygon.corners()).unwrap_or_default();
        let points: Vec<Vec3> = vertices
            .iter()
            .filter_map(|&v| positions.get(v as usize))
            .map(|&p| Vec3::from_array(p))
            .collect();
        if points.len() < 3 || points.len() != vertices.len() {
            continue;
        }

        let mut normal = Vec3::ZERO;
        for (i, current) in points.iter().enumerate() {
            let next = points[(i + 1) % points.len()];
            normal.x += (current.y - next.y) * (current.z + next.z);
            normal.y += (current.z - next.z) * (current.x + next.x);
            normal.z += (current.x - next.x) * (current.y + next.y);
        }

        for &v in vertices {
            sums[v as usize] += normal;
        }
    }

    sums.into_iter()
        .map(|n| n.normalize_or_zero().to_array())
        .collect()
}

/// Data carried by a [`HostObject`].
#[derive(Debug, Clone, PartialEq)]
pub enum ObjectData {
    Mesh(HostMesh),
    /// A vertex-only point cloud.
    Points(Vec<[f32; 3]>),
    /// An object without geometry (camera, light, empty, ...).
    Empty,
}

/// A named object with a world transform.
#[derive(Debug, Clone, PartialEq)]
pub struct HostObject {
    pub name: String,
    pub world_matrix: Mat4,
    pub data: ObjectData,
}

impl HostObject {
    pub fn new(name: impl Into<String>, data: ObjectData) -> Self {
        Self {
            name: name.into(),
            world_matrix: Mat4::IDENTITY,
            data,
        }
    }

    pub fn with_matrix(mut self, world_matrix: Mat4) -> Self {
        self.world_matrix = world_matrix;
        self
    }

    pub fn as_mesh(&self) -> Option<&HostMesh> {
        match &self.data {
            ObjectData::Mesh(mesh) => Some(mesh),
            _ => None,
        }
    }

    pub fn as_mesh_mut(&mut self) -> Option<&mut HostMesh> {
        match &mut self.data {
            ObjectData::Mesh(mesh) => Some(mesh),
            _ => None,
        }
    }
}

impl SceneObject for HostObject {
    fn name(&self) -> &str {
        &self.name
    }

    fn world_matrix(&self) -> Mat4 {
        self.world_matrix
    }

    fn mesh(&self) -> Option<&dyn MeshSource> {
        self.as_mesh().map(|mesh| mesh as &dyn MeshSource)
    }
}

/// A flat list of objects, in link order.
#[derive(Debug, Clone, Default)]
pub struct HostScene {
    pub objects: Vec<HostObject>,
}

impl HostScene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Find an object by name.
    pub fn object(&self, name: &str) -> Option<&HostObject> {
        self.objects.iter().find(|object| object.name == name)
    }
}

impl SceneSink for HostScene {
    fn link_mesh(&mut self, name: &str, mesh: HostMesh) {
        self.objects
            .push(HostObject::new(name, ObjectData::Mesh(mesh)));
    }

    fn link_points(&mut self, name: &str, points: Vec<[f32; 3]>) {
        self.objects
            .push(HostObject::new(name, ObjectData::Points(points)));
    }
}
