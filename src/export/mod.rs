//! Secondary export formats.
//!
//! The Tiny Glade JSON format itself lives in [`crate::codec`].

pub mod obj;

pub use obj::export_obj;
