//! Coordinate conversion between the host and Tiny Glade.
//!
//! Both directions use the same signed axis permutation
//! `(x, y, z) -> (-x, z, y)`. Applying it twice gives
//! `(-(-x), y, z) = (x, y, z)`, so the permutation is its own inverse and
//! an export followed by an import restores the original vectors up to
//! float precision.

use glam::{Mat3, Vec3};

/// The axis permutation as a matrix. Columns are the images of X, Y and Z.
pub const AXIS_SWAP: Mat3 = Mat3::from_cols(
    Vec3::new(-1.0, 0.0, 0.0),
    Vec3::new(0.0, 0.0, 1.0),
    Vec3::new(0.0, 1.0, 0.0),
);

/// Apply the signed axis permutation once.
#[inline]
pub fn flip_orientation(v: Vec3) -> Vec3 {
    Vec3::new(-v.x, v.z, v.y)
}

/// Convert a host vector into interchange coordinates.
#[inline]
pub fn to_interchange(v: Vec3) -> Vec3 {
    flip_orientation(v)
}

/// Convert an interchange vector into host coordinates.
#[inline]
pub fn to_host(v: Vec3) -> Vec3 {
    flip_orientation(v)
}

/// Array form of [`to_interchange`] for buffer data.
#[inline]
pub fn to_interchange_array(v: [f32; 3]) -> [f32; 3] {
    to_interchange(Vec3::from_array(v)).to_array()
}

/// Array form of [`to_host`] for buffer data.
#[inline]
pub fn to_host_array(v: [f32; 3]) -> [f32; 3] {
    to_host(Vec3::from_array(v)).to_array()
}
