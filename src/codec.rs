//! JSON encoding and decoding of mesh buffer documents.
//!
//! The compact encoding matches what the Tiny Glade tooling writes:
//!
//! ```text
//! {"attributes":["Vertex_Position"],"indices":{"type":["int",1],"buffer":[0,1,2]},
//!  "Vertex_Position":{"type":["float",3],"buffer":[[0.0,0.0,0.0],...]}}
//! ```
//!
//! Keys appear as `attributes`, `indices`, then one record per attribute in
//! `attributes` order. Arity-1 buffers are flat number arrays.

use crate::buffer::MeshBuffer;
use crate::error::{MeshBufferError, Result};
use crate::types::{AttributeName, AttributeType};
use log::debug;
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

const ATTRIBUTES_KEY: &str = "attributes";
const INDICES_KEY: &str = "indices";

/// Validate a buffer and encode it as compact JSON.
pub fn encode(buffer: &MeshBuffer) -> Result<Vec<u8>> {
    buffer.validate()?;
    Ok(serde_json::to_vec(&Document(buffer))?)
}

/// Validate a buffer and encode it as JSON indented by four spaces.
pub fn encode_pretty(buffer: &MeshBuffer) -> Result<Vec<u8>> {
    buffer.validate()?;
    let mut out = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
    Document(buffer).serialize(&mut serializer)?;
    Ok(out)
}

/// Decode a buffer from JSON bytes and validate it.
pub fn decode(bytes: &[u8]) -> Result<MeshBuffer> {
    let raw: RawDocument = serde_json::from_slice(bytes)?;
    raw.into_buffer()
}

/// Decode a buffer from a JSON string and validate it.
pub fn decode_str(json: &str) -> Result<MeshBuffer> {
    decode(json.as_bytes())
}

struct Document<'a>(&'a MeshBuffer);

#[derive(Serialize)]
struct Record<'a, T: Serialize> {
    #[serde(rename = "type")]
    ty: AttributeType,
    buffer: &'a [T],
}

impl<'a, T: Serialize> Record<'a, T> {
    fn new(ty: AttributeType, buffer: &'a [T]) -> Self {
        Self { ty, buffer }
    }
}

impl Serialize for Document<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let buffer = self.0;
        let names = buffer.attribute_names();
        let mut map = serializer.serialize_map(Some(names.len() + 2))?;

        let listed: Vec<&str> = names.iter().map(|name| name.as_str()).collect();
        map.serialize_entry(ATTRIBUTES_KEY, &listed)?;

        if buffer.has_indices() {
            map.serialize_entry(
                INDICES_KEY,
                &Record::new(AttributeType::INT1, buffer.indices()),
            )?;
        } else {
            map.serialize_entry(INDICES_KEY, &Option::<()>::None)?;
        }

        for &name in names {
            let key = name.as_str();
            let ty = name.attribute_type();
            match name {
                AttributeName::VertexPosition => {
                    map.serialize_entry(key, &Record::new(ty, buffer.positions()))?
                }
                AttributeName::VertexNormal => {
                    map.serialize_entry(key, &Record::new(ty, buffer.normals()))?
                }
                AttributeName::VertexColor => {
                    map.serialize_entry(key, &Record::new(ty, buffer.colors()))?
                }
                AttributeName::VertexUv => map.serialize_entry(key, &Record::new(ty, buffer.uvs()))?,
                AttributeName::IsMetal => {
                    map.serialize_entry(key, &Record::new(ty, buffer.is_metal()))?
                }
                AttributeName::IsGlass => {
                    map.serialize_entry(key, &Record::new(ty, buffer.is_glass()))?
                }
                AttributeName::PrimCenter => {
                    map.serialize_entry(key, &Record::new(ty, buffer.prim_center()))?
                }
                AttributeName::AppearPos => {
                    map.serialize_entry(key, &Record::new(ty, buffer.appear_pos()))?
                }
            }
        }

        map.end()
    }
}

#[derive(Deserialize)]
struct RawDocument {
    #[serde(default)]
    attributes: Option<Vec<String>>,
    #[serde(flatten)]
    records: HashMap<String, Value>,
}

#[derive(Deserialize)]
struct RawRecord {
    #[serde(default, rename = "type")]
    ty: Option<AttributeType>,
    #[serde(default)]
    buffer: Option<Vec<Value>>,
}

impl RawDocument {
    /// Look up a record, treating a missing key, `null` or a missing
    /// `buffer` as absent.
    fn record(&self, key: &str, expected: AttributeType) -> Result<Option<Vec<Value>>> {
        let value = match self.records.get(key) {
            None | Some(Value::Null) => return Ok(None),
            Some(value) => value,
        };

        let record = RawRecord::deserialize(value)
            .map_err(|e| MeshBufferError::format(format!("{}: malformed record: {}", key, e)))?;

        if let Some(ty) = record.ty {
            if ty != expected {
                return Err(MeshBufferError::format(format!(
                    "{}: unsupported type {}, expected {}",
                    key, ty, expected
                )));
            }
        }

        Ok(record.buffer)
    }

    /// Attribute order: names from the `attributes` array first, then any
    /// other known records found in the document.
    fn attribute_order(&self) -> Vec<AttributeName> {
        let mut order = Vec::new();

        for listed in self.attributes.iter().flatten() {
            match AttributeName::from_str(listed) {
                Some(name) if !order.contains(&name) => order.push(name),
                Some(_) => {}
                None => debug!("Ignoring unknown attribute {:?}", listed),
            }
        }

        for name in AttributeName::ALL {
            if !order.contains(&name) && self.records.contains_key(name.as_str()) {
                debug!("{} has a record but is not listed in attributes", name);
                order.push(name);
            }
        }

        order
    }

    fn into_buffer(self) -> Result<MeshBuffer> {
        let mut buffer = MeshBuffer::new();

        for name in self.attribute_order() {
            let Some(values) = self.record(name.as_str(), name.attribute_type())? else {
                debug!("{} is listed but has no buffer", name);
                continue;
            };
            read_attribute(&mut buffer, name, &values)?;
        }

        if let Some(values) = self.record(INDICES_KEY, AttributeType::INT1)? {
            buffer.set_indices(index_values(&values)?);
        }

        buffer.validate()?;
        Ok(buffer)
    }
}

fn read_attribute(buffer: &mut MeshBuffer, name: AttributeName, values: &[Value]) -> Result<()> {
    match name {
        AttributeName::VertexPosition => buffer.set_positions(float_tuples(name, values)?),
        AttributeName::VertexNormal => buffer.set_normals(float_tuples(name, values)?),
        AttributeName::VertexColor => buffer.set_colors(float_tuples(name, values)?),
        AttributeName::VertexUv => buffer.set_uvs(float_tuples(name, values)?),
        AttributeName::IsMetal => buffer.set_is_metal(flag_values(name, values)?),
        AttributeName::IsGlass => buffer.set_is_glass(flag_values(name, values)?),
        AttributeName::PrimCenter => buffer.set_prim_center(float_tuples(name, values)?),
        AttributeName::AppearPos => buffer.set_appear_pos(float_tuples(name, values)?),
    }
    Ok(())
}

fn float_tuples<const N: usize>(name: AttributeName, values: &[Value]) -> Result<Vec<[f32; N]>> {
    values
        .iter()
        .enumerate()
        .map(|(i, value)| {
            let items = match value.as_array() {
                Some(items) if items.len() == N => items,
                _ => {
                    return Err(MeshBufferError::format(format!(
                        "{}[{}]: expected {} numbers, found {}",
                        name, i, N, value
                    )))
                }
            };

            let mut out = [0.0f32; N];
            for (slot, item) in out.iter_mut().zip(items) {
                let number = item.as_f64().ok_or_else(|| {
                    MeshBufferError::format(format!("{}[{}]: {} is not a number", name, i, item))
                })? as f32;
                if !number.is_finite() {
                    return Err(MeshBufferError::format(format!(
                        "{}[{}]: {} is out of range for a 32-bit float",
                        name, i, item
                    )));
                }
                *slot = number;
            }
            Ok(out)
        })
        .collect()
}

/// Read an arity-1 integer entry, written either as `n` or `[n]`.
fn scalar_int(key: &str, i: usize, value: &Value) -> Result<i64> {
    let number = match value {
        Value::Array(items) if items.len() == 1 => &items[0],
        other => other,
    };

    let parsed = match number.as_i64() {
        Some(n) => Some(n),
        None => number
            .as_f64()
            .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
            .map(|f| f as i64),
    };

    parsed.ok_or_else(|| {
        MeshBufferError::format(format!("{}[{}]: {} is not an integer", key, i, value))
    })
}

fn flag_values(name: AttributeName, values: &[Value]) -> Result<Vec<i32>> {
    values
        .iter()
        .enumerate()
        .map(|(i, value)| {
            let n = scalar_int(name.as_str(), i, value)?;
            i32::try_from(n).map_err(|_| {
                MeshBufferError::format(format!("{}[{}]: {} is out of range", name, i, n))
            })
        })
        .collect()
}

fn index_values(values: &[Value]) -> Result<Vec<u32>> {
    values
        .iter()
        .enumerate()
        .map(|(i, value)| {
            let n = scalar_int(INDICES_KEY, i, value)?;
            u32::try_from(n).map_err(|_| {
                MeshBufferError::format(format!("{}[{}]: {} is not a valid index", INDICES_KEY, i, n))
            })
        })
        .collect()
}
