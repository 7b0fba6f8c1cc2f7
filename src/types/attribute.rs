//! Attribute names and element types of the Tiny Glade buffer format.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Scalar kind stored in an attribute buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Float,
    Int,
}

/// Declared `type` of an attribute record, serialized as `["float", 3]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AttributeType(pub ElementKind, pub u8);

impl AttributeType {
    pub const FLOAT2: AttributeType = AttributeType(ElementKind::Float, 2);
    pub const FLOAT3: AttributeType = AttributeType(ElementKind::Float, 3);
    pub const INT1: AttributeType = AttributeType(ElementKind::Int, 1);

    pub fn kind(&self) -> ElementKind {
        self.0
    }

    pub fn arity(&self) -> usize {
        self.1 as usize
    }
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.0 {
            ElementKind::Float => "float",
            ElementKind::Int => "int",
        };
        write!(f, "[{}, {}]", kind, self.1)
    }
}

/// Named attribute records a document may carry.
///
/// `indices` is not an attribute: it is never listed in the `attributes`
/// array and has its own slot in [`MeshBuffer`](crate::MeshBuffer).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AttributeName {
    VertexPosition,
    VertexNormal,
    VertexColor,
    VertexUv,
    IsMetal,
    IsGlass,
    PrimCenter,
    AppearPos,
}

impl AttributeName {
    /// All attributes in the order the exporter evaluates them.
    pub const ALL: [AttributeName; 8] = [
        AttributeName::VertexPosition,
        AttributeName::VertexNormal,
        AttributeName::VertexColor,
        AttributeName::VertexUv,
        AttributeName::IsMetal,
        AttributeName::IsGlass,
        AttributeName::PrimCenter,
        AttributeName::AppearPos,
    ];

    /// Key used in the JSON document. Case-sensitive.
    pub fn as_str(&self) -> &'static str {
        match self {
            AttributeName::VertexPosition => "Vertex_Position",
            AttributeName::VertexNormal => "Vertex_Normal",
            AttributeName::VertexColor => "Vertex_Color",
            AttributeName::VertexUv => "Vertex_UV",
            AttributeName::IsMetal => "is_metal",
            AttributeName::IsGlass => "is_glass",
            AttributeName::PrimCenter => "prim_center",
            AttributeName::AppearPos => "appear_pos",
        }
    }

    /// Parse from a document key (exact match).
    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|name| name.as_str() == s)
    }

    /// The fixed element type of this attribute.
    pub fn attribute_type(&self) -> AttributeType {
        match self {
            AttributeName::VertexUv => AttributeType::FLOAT2,
            AttributeName::IsMetal | AttributeName::IsGlass => AttributeType::INT1,
            AttributeName::VertexPosition
            | AttributeName::VertexNormal
            | AttributeName::VertexColor
            | AttributeName::PrimCenter
            | AttributeName::AppearPos => AttributeType::FLOAT3,
        }
    }

    /// Whether the buffer holds one entry per `Vertex_Position` entry.
    pub fn is_per_vertex(&self) -> bool {
        !matches!(self, AttributeName::PrimCenter | AttributeName::AppearPos)
    }
}

impl fmt::Display for AttributeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-vertex boolean material flag stored as an integer point attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaterialFlag {
    Metal,
    Glass,
}

impl MaterialFlag {
    pub const ALL: [MaterialFlag; 2] = [MaterialFlag::Metal, MaterialFlag::Glass];

    /// Name of the host attribute holding this flag.
    pub fn attribute_name(&self) -> &'static str {
        self.buffer_attribute().as_str()
    }

    /// Document attribute carrying this flag.
    pub fn buffer_attribute(&self) -> AttributeName {
        match self {
            MaterialFlag::Metal => AttributeName::IsMetal,
            MaterialFlag::Glass => AttributeName::IsGlass,
        }
    }
}
