//! WASM bindings for tiny-glade-mesh.
//!
//! This module provides JavaScript-friendly APIs for use in the browser.

use wasm_bindgen::prelude::*;

use crate::buffer::MeshBuffer;

#[wasm_bindgen(start)]
pub fn init() {
    // Set up better panic messages in the browser console
    console_error_panic_hook::set_once();
}

/// A decoded and validated Tiny Glade mesh buffer.
#[wasm_bindgen]
pub struct TinyGladeMesh {
    inner: MeshBuffer,
}

#[wasm_bindgen]
impl TinyGladeMesh {
    /// Decode a buffer from its JSON text.
    #[wasm_bindgen(js_name = fromJson)]
    pub fn from_json(json: &str) -> Result<TinyGladeMesh, JsError> {
        let inner = crate::codec::decode_str(json).map_err(|e| JsError::new(&e.to_string()))?;
        Ok(TinyGladeMesh { inner })
    }

    /// Get the number of vertices.
    #[wasm_bindgen(getter, js_name = vertexCount)]
    pub fn vertex_count(&self) -> usize {
        self.inner.vertex_count()
    }

    /// Get the number of triangles.
    #[wasm_bindgen(getter, js_name = triangleCount)]
    pub fn triangle_count(&self) -> usize {
        self.inner.triangle_count()
    }

    /// Names of the attributes present, in document order.
    #[wasm_bindgen(js_name = attributeNames)]
    pub fn attribute_names(&self) -> Vec<String> {
        self.inner
            .attribute_names()
            .iter()
            .map(|name| name.as_str().to_string())
            .collect()
    }

    /// Flattened positions (x, y, z per vertex).
    pub fn positions(&self) -> js_sys::Float32Array {
        let flat: Vec<f32> = self.inner.positions().iter().flatten().copied().collect();
        js_sys::Float32Array::from(flat.as_slice())
    }

    /// Flattened normals, empty when the buffer has none.
    pub fn normals(&self) -> js_sys::Float32Array {
        let flat: Vec<f32> = self.inner.normals().iter().flatten().copied().collect();
        js_sys::Float32Array::from(flat.as_slice())
    }

    /// Triangle indices, empty when the buffer has none.
    pub fn indices(&self) -> js_sys::Uint32Array {
        js_sys::Uint32Array::from(self.inner.indices())
    }

    /// Re-encode to compact JSON.
    #[wasm_bindgen(js_name = toJson)]
    pub fn to_json(&self) -> Result<String, JsError> {
        let bytes = crate::codec::encode(&self.inner).map_err(|e| JsError::new(&e.to_string()))?;
        String::from_utf8(bytes).map_err(|e| JsError::new(&e.to_string()))
    }

    /// Wavefront OBJ preview of the buffer.
    #[wasm_bindgen(js_name = toObj)]
    pub fn to_obj(&self, name: &str) -> Result<String, JsError> {
        crate::export::obj::export_obj(&self.inner, name).map_err(|e| JsError::new(&e.to_string()))
    }
}
