//! # Tiny Glade Mesh
//!
//! A Rust library for reading and writing Tiny Glade JSON mesh buffers.
//!
//! ## Overview
//!
//! Tiny Glade stores mesh assets as a flat JSON document: one record per
//! attribute (`Vertex_Position`, `Vertex_Normal`, `Vertex_Color`,
//! `Vertex_UV`, `is_metal`, `is_glass`, ...) plus a triangle index list.
//! This crate converts between that document and a polygon mesh with
//! per-corner attributes, the way a 3D modeling tool stores geometry.
//!
//! ## Quick Start
//!
//! ```ignore
//! use tiny_glade_mesh::{export_mesh, ExportOptions, FanTriangulator, HostObject};
//!
//! // Wrap your mesh in something implementing SceneObject
//! let object: HostObject = /* ... */;
//!
//! // Build the document and encode it
//! let buffer = export_mesh(Some(&object), &ExportOptions::all(), &FanTriangulator)?;
//! let json = tiny_glade_mesh::encode(&buffer)?;
//! ```
//!
//! ## Host Integration
//!
//! Implement [`SceneObject`] and [`MeshSource`] over your application's mesh
//! type to export, and [`SceneSink`] to receive imported objects:
//!
//! ```ignore
//! use tiny_glade_mesh::{import_from_path, ImportOptions};
//!
//! let scene = import_from_path("castle.json".as_ref(), &ImportOptions::default())?;
//! scene.commit(&mut my_host_scene);
//! ```

pub mod error;
pub mod types;
pub mod buffer;
pub mod codec;
pub mod transform;
pub mod collapse;
pub mod triangulate;
pub mod adapter;
pub mod pipeline;
pub mod overlay;
pub mod export;

// Re-export main types for convenience
pub use error::{MeshBufferError, Result};
pub use types::{AttributeName, AttributeType, BoundingBox, ElementKind, MaterialFlag};
pub use buffer::MeshBuffer;
pub use codec::{decode, decode_str, encode, encode_pretty};
pub use adapter::{
    ColorLayer, HostMesh, HostObject, HostScene, MeshSource, ObjectData, Polygon, SceneObject,
    SceneSink,
};
pub use triangulate::{FanTriangulator, Triangulator};
pub use pipeline::{
    export_mesh, export_to_path, import_buffer, import_from_path, ExportOptions, ImportOptions,
    ImportedScene,
};
pub use overlay::{flagged_points, visualize_flags, OverlayContext, OverlayPoint};
pub use export::obj::export_obj;

/// Load and validate a mesh buffer from a file.
pub fn load_buffer<P: AsRef<std::path::Path>>(path: P) -> Result<MeshBuffer> {
    let bytes = std::fs::read(path)?;
    codec::decode(&bytes)
}

/// Write a mesh buffer to a file using the compact encoding.
pub fn save_buffer<P: AsRef<std::path::Path>>(path: P, buffer: &MeshBuffer) -> Result<()> {
    std::fs::write(path, codec::encode(buffer)?)?;
    Ok(())
}

#[cfg(feature = "wasm")]
pub mod wasm;
