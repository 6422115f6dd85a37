//! Math utilities and types
//!
//! Fixed-size vector aliases used for attribute tuples and material colors.

pub use nalgebra::{Vector2, Vector3};

/// 2D vector type (texture coordinates)
pub type Vec2 = Vector2<f32>;

/// 3D vector type (positions, normals, colors)
pub type Vec3 = Vector3<f32>;

/// Build a `Vec3` from a stride-3 attribute slice.
///
/// Returns `None` when the slice does not hold exactly three components.
pub fn vec3_from_slice(values: &[f32]) -> Option<Vec3> {
    match values {
        [x, y, z] => Some(Vec3::new(*x, *y, *z)),
        _ => None,
    }
}

/// Build a `Vec2` from a stride-2 attribute slice.
pub fn vec2_from_slice(values: &[f32]) -> Option<Vec2> {
    match values {
        [u, v] => Some(Vec2::new(*u, *v)),
        _ => None,
    }
}
