//! Material library parsing
//!
//! Reads Wavefront `.mtl` streams into name-keyed [`Material`] records.

pub mod mtl_parser;

pub use mtl_parser::{Material, MaterialMap, MtlParser};
