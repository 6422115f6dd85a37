//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the loader:
//! - Math types shared by meshes and materials
//! - Logging utilities

pub mod math;
pub mod logging;
