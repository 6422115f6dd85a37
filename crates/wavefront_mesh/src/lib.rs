//! # Wavefront Mesh
//!
//! Loads Wavefront geometry (`.obj`) and material library (`.mtl`) files
//! into triangle meshes ready for a renderer or an export tool.
//!
//! ## Features
//!
//! - **Flat or indexed output**: replicate attributes per face corner, or
//!   deduplicate identical corner tokens into a shared index buffer
//! - **Mesh objects**: `g`/`o` partitions with material and smoothing metadata
//! - **Materials**: colors, shininess, transparency and texture maps
//! - **Typed errors**: every malformed line aborts with its line number
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use wavefront_mesh::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (mesh, materials) = ObjLoader::load("models/cube.obj", true)?;
//!     for object in mesh.objects() {
//!         let material = materials.get(object.material_ref());
//!         println!("{}: {} indices, {:?}", object.name(), object.count(), material.map(|m| m.kd));
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names)]

pub mod foundation;
pub mod config;
pub mod assets;

pub use assets::ObjError;

/// Common imports for loader users
pub mod prelude {
    pub use crate::{
        assets::{
            Material, MaterialMap, MeshObject, MtlParser, ObjError, ObjLoader, ParsedObj,
            TriangleMesh,
        },
        config::{Config, LoaderConfig},
        foundation::math::{Vec2, Vec3},
    };
}
