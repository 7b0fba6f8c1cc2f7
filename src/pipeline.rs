//! Export and import between host meshes and mesh buffer documents.
//!
//! Export reads a [`SceneObject`] and builds a fresh [`MeshBuffer`]. Import
//! validates a buffer completely and builds an [`ImportedScene`] value; the
//! host only sees the result once [`ImportedScene::commit`] is called, so a
//! failed import leaves nothing behind.

use crate::adapter::{compute_vertex_normals, ColorLayer, HostMesh, MeshSource, SceneObject, SceneSink};
use crate::buffer::MeshBuffer;
use crate::codec;
use crate::collapse::{collapse_corners, fan_out_corners};
use crate::error::{MeshBufferError, Result};
use crate::transform::{to_host_array, to_interchange_array, AXIS_SWAP};
use crate::triangulate::Triangulator;
use crate::types::{AttributeName, MaterialFlag};
use glam::{Mat3, Vec3};
use log::{debug, info, warn};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the point-cloud object created for `prim_center`.
pub const PRIM_CENTER_OBJECT: &str = "PrimCenterObject";
/// Name of the point-cloud object created for `appear_pos`.
pub const APPEAR_POS_OBJECT: &str = "AppearPosObject";
/// Name given to the color layer created on import.
pub const COLOR_LAYER_NAME: &str = "Vertex_Color";
/// Name given to the UV layer created on import.
pub const UV_LAYER_NAME: &str = "Vertex_UV";

/// Which parts of a mesh to export.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Export world-space vertex positions.
    pub include_vertex_position: bool,
    /// Export per-vertex normals.
    pub include_vertex_normal: bool,
    /// Export vertex colors (alpha dropped).
    pub include_vertex_color: bool,
    /// Export the UV layer collapsed to one value per vertex.
    pub include_vertex_uv: bool,
    /// Export the `is_metal` flag.
    pub include_is_metal: bool,
    /// Export the `is_glass` flag.
    pub include_is_glass: bool,
    /// Export triangulated face indices.
    pub include_faces_indices: bool,
    /// Rotate and scale normals by the world matrix. Off by default: the
    /// Tiny Glade exporter writes object-space normals.
    pub transform_normals: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            include_vertex_position: true,
            include_vertex_normal: false,
            include_vertex_color: false,
            include_vertex_uv: false,
            include_is_metal: false,
            include_is_glass: false,
            include_faces_indices: true,
            transform_normals: false,
        }
    }
}

impl ExportOptions {
    /// Export every attribute the format knows about.
    pub fn all() -> Self {
        Self {
            include_vertex_position: true,
            include_vertex_normal: true,
            include_vertex_color: true,
            include_vertex_uv: true,
            include_is_metal: true,
            include_is_glass: true,
            include_faces_indices: true,
            transform_normals: false,
        }
    }

    /// Enable exporting both material flags.
    pub fn with_material_flags(mut self) -> Self {
        self.include_is_metal = true;
        self.include_is_glass = true;
        self
    }
}

/// How to build host objects from a buffer.
#[derive(Debug, Clone)]
pub struct ImportOptions {
    /// Fail when the document has no `Vertex_Position`.
    pub require_positions: bool,
    /// Reverse the winding of every imported triangle.
    pub flip_winding: bool,
    /// Use `Vertex_Normal` when present instead of computing normals.
    pub use_buffer_normals: bool,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            require_positions: true,
            flip_winding: true,
            use_buffer_normals: true,
        }
    }
}

/// The objects an import produces, not yet handed to the host.
#[derive(Debug, Clone)]
pub struct ImportedScene {
    /// Name for the mesh object.
    pub object_name: String,
    /// The imported mesh.
    pub mesh: HostMesh,
    /// `prim_center` points in host coordinates, if any.
    pub prim_center: Option<Vec<[f32; 3]>>,
    /// `appear_pos` points in host coordinates, if any.
    pub appear_pos: Option<Vec<[f32; 3]>>,
}

impl ImportedScene {
    /// Link every imported object into the host.
    pub fn commit(self, sink: &mut dyn SceneSink) {
        sink.link_mesh(&self.object_name, self.mesh);
        if let Some(points) = self.prim_center {
            sink.link_points(PRIM_CENTER_OBJECT, points);
        }
        if let Some(points) = self.appear_pos {
            sink.link_points(APPEAR_POS_OBJECT, points);
        }
    }
}

/// Build a buffer from the active object.
///
/// Attributes are added in the order position, normal, color, UV,
/// `is_metal`, `is_glass`; indices come last.
pub fn export_mesh(
    object: Option<&dyn SceneObject>,
    options: &ExportOptions,
    triangulator: &dyn Triangulator,
) -> Result<MeshBuffer> {
    let object =
        object.ok_or_else(|| MeshBufferError::InvalidTarget("no active object".to_string()))?;
    let mesh = object.mesh().ok_or_else(|| {
        MeshBufferError::InvalidTarget(format!("selected object '{}' is not a mesh", object.name()))
    })?;

    let vertex_count = mesh.vertex_count();
    debug!(
        "Exporting '{}': {} vertices, {} polygons",
        object.name(),
        vertex_count,
        mesh.polygons().len()
    );

    let mut buffer = MeshBuffer::new();

    if options.include_vertex_position {
        let matrix = object.world_matrix();
        let positions = mesh
            .positions()
            .iter()
            .map(|&p| to_interchange_array(matrix.transform_point3(Vec3::from_array(p)).to_array()))
            .collect();
        buffer.set_positions(positions);
    }

    if options.include_vertex_normal {
        let normal_matrix = if options.transform_normals {
            AXIS_SWAP * Mat3::from_mat4(object.world_matrix()).inverse().transpose()
        } else {
            AXIS_SWAP
        };
        let normals = if mesh.vertex_normals().len() == vertex_count {
            mesh.vertex_normals().to_vec()
        } else {
            debug!("Mesh has no stored normals, computing from polygons");
            compute_vertex_normals(mesh)
        };
        let normals = normals
            .into_iter()
            .map(|n| {
                (normal_matrix * Vec3::from_array(n))
                    .normalize_or_zero()
                    .to_array()
            })
            .collect();
        buffer.set_normals(normals);
    }

    if options.include_vertex_color {
        match export_colors(mesh)? {
            Some(colors) => buffer.set_colors(colors),
            None => debug!("Mesh has no color layer, skipping Vertex_Color"),
        }
    }

    if options.include_vertex_uv {
        match mesh.uv_layer() {
            Some(uvs) => buffer.set_uvs(collapse_corners(
                mesh.polygons(),
                mesh.corner_vertices(),
                uvs,
                vertex_count,
            )?),
            None => debug!("Mesh has no UV layer, skipping Vertex_UV"),
        }
    }

    if options.include_is_metal {
        if let Some(values) = export_flag(mesh, MaterialFlag::Metal)? {
            buffer.set_is_metal(values);
        }
    }

    if options.include_is_glass {
        if let Some(values) = export_flag(mesh, MaterialFlag::Glass)? {
            buffer.set_is_glass(values);
        }
    }

    if options.include_faces_indices {
        if buffer.has(AttributeName::VertexPosition) {
            buffer.set_indices(crate::triangulate::triangulate_mesh(mesh, triangulator)?);
        } else {
            warn!("Skipping indices: they need Vertex_Position to index into");
        }
    }

    buffer.validate()?;

    Ok(buffer)
}

fn export_colors(mesh: &dyn MeshSource) -> Result<Option<Vec<[f32; 3]>>> {
    let rgba = match mesh.color_layer() {
        None => return Ok(None),
        Some(ColorLayer::Point(values)) => {
            if values.len() != mesh.vertex_count() {
                return Err(MeshBufferError::format(format!(
                    "point color layer has {} values for {} vertices",
                    values.len(),
                    mesh.vertex_count()
                )));
            }
            values.clone()
        }
        Some(ColorLayer::Corner(values)) => collapse_corners(
            mesh.polygons(),
            mesh.corner_vertices(),
            values,
            mesh.vertex_count(),
        )?,
    };
    Ok(Some(rgba.into_iter().map(|[r, g, b, _]| [r, g, b]).collect()))
}

fn export_flag(mesh: &dyn MeshSource, flag: MaterialFlag) -> Result<Option<Vec<i32>>> {
    let Some(values) = mesh.int_attribute(flag.attribute_name()) else {
        debug!("Mesh has no {} attribute", flag.attribute_name());
        return Ok(None);
    };
    if values.len() != mesh.vertex_count() {
        return Err(MeshBufferError::format(format!(
            "{} has {} values for {} vertices",
            flag.attribute_name(),
            values.len(),
            mesh.vertex_count()
        )));
    }
    Ok(Some(values.to_vec()))
}

/// `path` with `.json` appended unless it already ends in `.json`.
pub fn json_path(path: &Path) -> PathBuf {
    let has_json_extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if has_json_extension {
        path.to_path_buf()
    } else {
        let mut name = OsString::from(path.as_os_str());
        name.push(".json");
        PathBuf::from(name)
    }
}

/// Export and write the compact encoding. Nothing is written on failure.
/// Returns the path actually written.
pub fn export_to_path(
    path: &Path,
    object: Option<&dyn SceneObject>,
    options: &ExportOptions,
    triangulator: &dyn Triangulator,
) -> Result<PathBuf> {
    let buffer = export_mesh(object, options, triangulator)?;
    let bytes = codec::encode(&buffer)?;
    let path = json_path(path);
    fs::write(&path, bytes)?;
    info!("Exported data to {}", path.display());
    Ok(path)
}

/// Build host objects from a buffer.
pub fn import_buffer(
    buffer: &MeshBuffer,
    object_name: &str,
    options: &ImportOptions,
) -> Result<ImportedScene> {
    buffer.validate()?;

    if options.require_positions && !buffer.has(AttributeName::VertexPosition) {
        return Err(MeshBufferError::format("document has no Vertex_Position"));
    }

    // validate() only compares lengths against Vertex_Position when it is
    // present. The host mesh needs one value per vertex either way.
    let vertex_count = buffer.vertex_count();
    for &name in buffer.attribute_names() {
        if name.is_per_vertex() && buffer.attribute_len(name) != vertex_count {
            return Err(MeshBufferError::format(format!(
                "{} has {} entries for {} vertices",
                name,
                buffer.attribute_len(name),
                vertex_count
            )));
        }
    }

    let positions = buffer.positions().iter().map(|&p| to_host_array(p)).collect();
    let mut mesh = HostMesh::from_polygons(positions, &buffer.triangles().collect::<Vec<_>>());
    if options.flip_winding {
        mesh.flip_winding();
    }

    if options.use_buffer_normals && buffer.has(AttributeName::VertexNormal) {
        mesh.normals = buffer.normals().iter().map(|&n| to_host_array(n)).collect();
    } else {
        mesh.update_normals();
    }

    if buffer.has(AttributeName::VertexColor) {
        let colors = buffer.colors().iter().map(|&[r, g, b]| [r, g, b, 1.0]).collect();
        mesh.colors = Some(ColorLayer::Point(colors));
        mesh.color_layer_name = Some(COLOR_LAYER_NAME.to_string());
    }

    if buffer.has(AttributeName::VertexUv) {
        mesh.uvs = Some(fan_out_corners(&mesh.polygons, &mesh.corner_vertices, buffer.uvs())?);
        mesh.uv_layer_name = Some(UV_LAYER_NAME.to_string());
    }

    for flag in MaterialFlag::ALL {
        if buffer.has(flag.buffer_attribute()) {
            let values = match flag {
                MaterialFlag::Metal => buffer.is_metal(),
                MaterialFlag::Glass => buffer.is_glass(),
            };
            mesh.int_attributes
                .insert(flag.attribute_name().to_string(), values.to_vec());
        }
    }

    let points = |values: &[[f32; 3]]| -> Option<Vec<[f32; 3]>> {
        (!values.is_empty()).then(|| values.iter().map(|&p| to_host_array(p)).collect())
    };

    debug!(
        "Imported '{}': {} vertices, {} triangles",
        object_name,
        mesh.vertex_count(),
        mesh.polygon_count()
    );

    Ok(ImportedScene {
        object_name: object_name.to_string(),
        mesh,
        prim_center: points(buffer.prim_center()),
        appear_pos: points(buffer.appear_pos()),
    })
}

/// Read, decode and import a file. The object is named after the file stem.
pub fn import_from_path(path: &Path, options: &ImportOptions) -> Result<ImportedScene> {
    let bytes = fs::read(path)?;
    let buffer = codec::decode(&bytes)?;
    let object_name = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("TinyGladeObject");
    info!("Importing {} as '{}'", path.display(), object_name);
    import_buffer(&buffer, object_name, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::{HostObject, HostScene, ObjectData};
    use crate::triangulate::FanTriangulator;
    use glam::Mat4;

    /// A unit quad on the host XY plane with a corner UV seam on vertex 0.
    fn quad_mesh() -> HostMesh {
        let mut mesh = HostMesh::from_polygons(
            vec![
                [0.0, 0.0, 0.0],
                [1.0, 0.0, 0.0],
                [1.0, 1.0, 0.0],
                [0.0, 1.0, 0.0],
                [0.5, 0.5, 2.0],
            ],
            &[vec![0u32, 1, 2, 3], vec![0, 4, 1]],
        );
        mesh.uvs = Some(vec![
            [0.0, 0.0],
            [1.0, 0.0],
            [1.0, 1.0],
            [0.0, 1.0],
            [0.25, 0.25],
            [0.5, 1.0],
            [0.9, 0.9],
        ]);
        mesh.update_normals();
        mesh
    }

    fn quad_object() -> HostObject {
        HostObject::new("Quad", ObjectData::Mesh(quad_mesh()))
    }

    #[test]
    fn test_export_defaults() {
        let object = quad_object();
        let buffer = export_mesh(Some(&object), &ExportOptions::default(), &FanTriangulator).unwrap();

        assert_eq!(buffer.attribute_names(), &[AttributeName::VertexPosition]);
        assert_eq!(buffer.vertex_count(), 5);
        assert_eq!(buffer.indices(), &[0, 1, 2, 0, 2, 3, 0, 4, 1]);
        assert_eq!(buffer.positions()[2], [-1.0, 0.0, 1.0]);
    }

    #[test]
    fn test_export_attribute_order() {
        let mut object = quad_object();
        let mesh = object.as_mesh_mut().unwrap();
        mesh.toggle_flag(MaterialFlag::Glass, &[1]);
        mesh.toggle_flag(MaterialFlag::Metal, &[0]);
        mesh.colors = Some(ColorLayer::Point(vec![[1.0, 0.5, 0.25, 0.1]; 5]));

        let buffer = export_mesh(Some(&object), &ExportOptions::all(), &FanTriangulator).unwrap();
        assert_eq!(
            buffer.attribute_names(),
            &[
                AttributeName::VertexPosition,
                AttributeName::VertexNormal,
                AttributeName::VertexColor,
                AttributeName::VertexUv,
                AttributeName::IsMetal,
                AttributeName::IsGlass,
            ]
        );
        assert_eq!(buffer.colors()[0], [1.0, 0.5, 0.25]);
        assert_eq!(buffer.is_glass(), &[0, 1, 0, 0, 0]);
    }

    #[test]
    fn test_export_uv_first_seen() {
        let object = quad_object();
        let options = ExportOptions {
            include_vertex_uv: true,
            ..ExportOptions::default()
        };
        let buffer = export_mesh(Some(&object), &options, &FanTriangulator).unwrap();

        // Vertex 0 keeps the quad's UV, vertex 4 only appears in the triangle.
        assert_eq!(buffer.uvs()[0], [0.0, 0.0]);
        assert_eq!(buffer.uvs()[4], [0.5, 1.0]);
    }

    #[test]
    fn test_export_corner_colors_collapse() {
        let mut object = quad_object();
        let mesh = object.as_mesh_mut().unwrap();
        let corner_colors = (0..7).map(|i| [i as f32 / 10.0, 0.0, 0.0, 1.0]).collect();
        mesh.colors = Some(ColorLayer::Corner(corner_colors));

        let options = ExportOptions {
            include_vertex_color: true,
            ..ExportOptions::default()
        };
        let buffer = export_mesh(Some(&object), &options, &FanTriangulator).unwrap();
        let reds: Vec<f32> = buffer.colors().iter().map(|c| c[0]).collect();
        assert_eq!(reds, vec![0.0, 0.1, 0.2, 0.3, 0.5]);
    }

    #[test]
    fn test_export_applies_world_matrix() {
        let object = quad_object().with_matrix(Mat4::from_translation(Vec3::new(0.0, 0.0, 10.0)));
        let buffer = export_mesh(Some(&object), &ExportOptions::default(), &FanTriangulator).unwrap();
        // Host Z becomes interchange Y.
        assert_eq!(buffer.positions()[0], [-0.0, 10.0, 0.0]);
    }

    #[test]
    fn test_export_missing_layers_are_omitted() {
        let mut object = quad_object();
        object.as_mesh_mut().unwrap().uvs = None;

        let buffer = export_mesh(Some(&object), &ExportOptions::all(), &FanTriangulator).unwrap();
        assert_eq!(
            buffer.attribute_names(),
            &[AttributeName::VertexPosition, AttributeName::VertexNormal]
        );
    }

    #[test]
    fn test_export_invalid_target() {
        let err = export_mesh(None, &ExportOptions::default(), &FanTriangulator).unwrap_err();
        assert!(matches!(err, MeshBufferError::InvalidTarget(_)));

        let camera = HostObject::new("Camera", ObjectData::Empty);
        let err = export_mesh(Some(&camera), &ExportOptions::default(), &FanTriangulator).unwrap_err();
        assert!(matches!(err, MeshBufferError::InvalidTarget(_)));
        assert!(err.to_string().contains("Camera"));
    }

    #[test]
    fn test_export_to_path_appends_extension() {
        let dir = tempfile::tempdir().unwrap();
        let object = quad_object();

        let written = export_to_path(
            &dir.path().join("quad"),
            Some(&object),
            &ExportOptions::default(),
            &FanTriangulator,
        )
        .unwrap();
        assert_eq!(written, dir.path().join("quad.json"));
        assert!(written.exists());

        let kept = json_path(Path::new("model.JSON"));
        assert_eq!(kept, PathBuf::from("model.JSON"));
    }

    #[test]
    fn test_export_failure_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.json");
        let camera = HostObject::new("Camera", ObjectData::Empty);

        let result = export_to_path(&path, Some(&camera), &ExportOptions::default(), &FanTriangulator);
        assert!(result.is_err());
        assert!(!path.exists());
    }

    #[test]
    fn test_roundtrip_positions_and_flags() {
        let mut object = quad_object();
        object
            .as_mesh_mut()
            .unwrap()
            .toggle_flag(MaterialFlag::Metal, &[0, 2]);
        let options = ExportOptions::default().with_material_flags();

        let buffer = export_mesh(Some(&object), &options, &FanTriangulator).unwrap();
        assert_eq!(buffer.is_metal(), &[1, 0, 1, 0, 0]);
        assert!(!buffer.has(AttributeName::IsGlass));

        let decoded = codec::decode(&codec::encode(&buffer).unwrap()).unwrap();
        let scene = import_buffer(&decoded, "Quad", &ImportOptions::default()).unwrap();

        assert_eq!(scene.mesh.positions, quad_mesh().positions);
        assert_eq!(
            scene.mesh.flag(MaterialFlag::Metal),
            Some(&[1, 0, 1, 0, 0][..])
        );
        assert!(scene.mesh.flag(MaterialFlag::Glass).is_none());
    }

    #[test]
    fn test_import_flips_winding() {
        let mut buffer = MeshBuffer::new();
        buffer.set_positions(vec![[0.0; 3], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]]);
        buffer.set_indices(vec![0, 1, 2]);

        let flipped = import_buffer(&buffer, "Tri", &ImportOptions::default()).unwrap();
        assert_eq!(flipped.mesh.polygon_vertices(0), &[2, 1, 0]);

        let options = ImportOptions {
            flip_winding: false,
            ..ImportOptions::default()
        };
        let kept = import_buffer(&buffer, "Tri", &options).unwrap();
        assert_eq!(kept.mesh.polygon_vertices(0), &[0, 1, 2]);
    }

    #[test]
    fn test_import_layers() {
        let mut buffer = MeshBuffer::new();
        buffer.set_positions(vec![[0.0; 3], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]]);
        buffer.set_normals(vec![[0.0, 1.0, 0.0]; 3]);
        buffer.set_colors(vec![[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]);
        buffer.set_uvs(vec![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]]);
        buffer.set_prim_center(vec![[1.0, 2.0, 3.0]]);
        buffer.set_indices(vec![0, 1, 2]);

        let scene = import_buffer(&buffer, "Tri", &ImportOptions::default()).unwrap();
        let mesh = &scene.mesh;

        assert_eq!(mesh.normals[0], [-0.0, 0.0, 1.0]);
        assert_eq!(
            mesh.colors,
            Some(ColorLayer::Point(vec![
                [1.0, 0.0, 0.0, 1.0],
                [0.0, 1.0, 0.0, 1.0],
                [0.0, 0.0, 1.0, 1.0]
            ]))
        );
        // Winding flipped to [2, 1, 0]; UVs follow the corners' vertices.
        assert_eq!(
            mesh.uvs,
            Some(vec![[0.0, 1.0], [1.0, 0.0], [0.0, 0.0]])
        );
        assert_eq!(mesh.color_layer_name.as_deref(), Some("Vertex_Color"));
        assert_eq!(mesh.uv_layer_name.as_deref(), Some("Vertex_UV"));
        assert_eq!(scene.prim_center, Some(vec![[-1.0, 3.0, 2.0]]));
        assert!(scene.appear_pos.is_none());
    }

    #[test]
    fn test_import_layer_names_only_when_present() {
        let mut buffer = MeshBuffer::new();
        buffer.set_positions(vec![[0.0; 3], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]]);
        buffer.set_indices(vec![0, 1, 2]);

        let scene = import_buffer(&buffer, "Tri", &ImportOptions::default()).unwrap();
        assert!(scene.mesh.color_layer_name.is_none());
        assert!(scene.mesh.uv_layer_name.is_none());
    }

    #[test]
    fn test_import_flags_without_positions() {
        let mut buffer = MeshBuffer::new();
        buffer.set_is_metal(vec![1, 0, 1]);
        assert!(buffer.validate().is_ok());

        let options = ImportOptions {
            require_positions: false,
            ..ImportOptions::default()
        };
        let err = import_buffer(&buffer, "Flags", &options).unwrap_err();
        assert!(matches!(err, MeshBufferError::InvalidFormat(_)));
        assert!(err.to_string().contains("is_metal"));
    }

    #[test]
    fn test_export_normals_use_axis_swap() {
        let object = quad_object();
        let options = ExportOptions {
            include_vertex_normal: true,
            ..ExportOptions::default()
        };
        let buffer = export_mesh(Some(&object), &options, &FanTriangulator).unwrap();
        // Host +Z faces interchange +Y.
        assert_eq!(buffer.normals()[2], [0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_export_without_positions_skips_indices() {
        let mut object = quad_object();
        object
            .as_mesh_mut()
            .unwrap()
            .toggle_flag(MaterialFlag::Glass, &[3]);
        let options = ExportOptions {
            include_vertex_position: false,
            include_is_glass: true,
            ..ExportOptions::default()
        };

        let buffer = export_mesh(Some(&object), &options, &FanTriangulator).unwrap();
        assert!(!buffer.has_indices());
        assert_eq!(buffer.is_glass(), &[0, 0, 0, 1, 0]);
        assert!(codec::decode(&codec::encode(&buffer).unwrap()).is_ok());
    }

    #[test]
    fn test_export_rejects_non_finite_positions() {
        let mut object = quad_object();
        object.as_mesh_mut().unwrap().positions[1] = [f32::NAN, 0.0, 0.0];
        let err = export_mesh(Some(&object), &ExportOptions::default(), &FanTriangulator).unwrap_err();
        assert!(matches!(err, MeshBufferError::InvalidFormat(_)));
    }

    #[test]
    fn test_import_requires_positions() {
        let buffer = codec::decode_str(r#"{"attributes":[],"indices":{"buffer":[]}}"#).unwrap();
        let err = import_buffer(&buffer, "Empty", &ImportOptions::default()).unwrap_err();
        assert!(matches!(err, MeshBufferError::InvalidFormat(_)));

        let options = ImportOptions {
            require_positions: false,
            ..ImportOptions::default()
        };
        let scene = import_buffer(&buffer, "Empty", &options).unwrap();
        assert_eq!(scene.mesh.vertex_count(), 0);
    }

    #[test]
    fn test_failed_import_commits_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(
            &path,
            r#"{"Vertex_Position":{"buffer":[[0,0,0]]},"indices":{"buffer":[0,0,5]}}"#,
        )
        .unwrap();

        let mut scene = HostScene::new();
        let result = import_from_path(&path, &ImportOptions::default()).map(|s| s.commit(&mut scene));
        assert!(result.is_err());
        assert!(scene.objects.is_empty());
    }

    #[test]
    fn test_import_from_path_commits_objects() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tower.json");
        fs::write(
            &path,
            r#"{"attributes":["Vertex_Position","appear_pos"],"indices":{"type":["int",1],"buffer":[0,1,2]},
                "Vertex_Position":{"type":["float",3],"buffer":[[0,0,0],[1,0,0],[0,1,0]]},
                "appear_pos":{"type":["float",3],"buffer":[[0,5,0]]}}"#,
        )
        .unwrap();

        let mut scene = HostScene::new();
        import_from_path(&path, &ImportOptions::default())
            .unwrap()
            .commit(&mut scene);

        assert_eq!(scene.objects.len(), 2);
        assert!(scene.object("tower").unwrap().as_mesh().is_some());
        assert_eq!(
            scene.object(APPEAR_POS_OBJECT).unwrap().data,
            ObjectData::Points(vec![[-0.0, 0.0, 5.0]])
        );
    }
}
