//! Asset loading: Wavefront geometry and material libraries

pub mod attribute_buffer;
pub mod face;
pub mod geometry;
pub mod objects;
pub mod mesh;
pub mod materials;
pub mod obj_loader;

pub use attribute_buffer::{AttributeBuffer, BufferError};
pub use face::FaceCorner;
pub use geometry::{GeometryAssembler, OutputMode};
pub use objects::{ObjectTracker, ObjectState};
pub use mesh::{TriangleMesh, MeshObject};
pub use materials::{Material, MaterialMap, MtlParser};
pub use obj_loader::{ObjLoader, ParsedObj};

#[cfg(test)]
mod test_mesh_loading;

use std::path::PathBuf;
use thiserror::Error;

/// Which per-vertex attribute a face corner referenced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeKind {
    /// `v` position
    Position,
    /// `vt` texture coordinate
    TexCoord,
    /// `vn` normal
    Normal,
}

impl std::fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Position => "position",
            Self::TexCoord => "texture coordinate",
            Self::Normal => "normal",
        };
        f.write_str(name)
    }
}

/// Geometry and material loading errors
///
/// Every variant aborts the load; line numbers are 1-based.
#[derive(Error, Debug)]
pub enum ObjError {
    /// Geometry file missing or unreadable
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// Path that failed to open
        path: PathBuf,
        /// Underlying open error
        #[source]
        source: std::io::Error,
    },

    /// `mtllib` target could not be opened
    #[error("material library not found: {}", path.display())]
    MaterialLibraryNotFound {
        /// Resolved material library path
        path: PathBuf,
        /// Underlying open error
        #[source]
        source: std::io::Error,
    },

    /// Non-numeric token where a number was required
    #[error("line {line}: invalid number '{token}' in '{content}'")]
    NumberFormat {
        /// Line number
        line: usize,
        /// Offending token
        token: String,
        /// Offending line
        content: String,
    },

    /// Face with other than three corners
    #[error("line {line}: face has {count} corners, only triangles are supported: '{content}'")]
    UnsupportedFaceArity {
        /// Line number
        line: usize,
        /// Number of corners found
        count: usize,
        /// Offending line
        content: String,
    },

    /// Corner token with a wrong part count or a missing required part
    #[error("line {line}: malformed face corner '{token}': {reason}")]
    MalformedFaceToken {
        /// Line number
        line: usize,
        /// Offending corner token
        token: String,
        /// What is wrong with it
        reason: &'static str,
    },

    /// Corner referencing an attribute that has not been declared yet
    #[error("line {line}: corner '{token}' references {attribute} {index} but only {count} declared")]
    DanglingReference {
        /// Line number
        line: usize,
        /// Offending corner token
        token: String,
        /// Referenced attribute
        attribute: AttributeKind,
        /// 1-based index as written in the file
        index: usize,
        /// Number of vectors declared so far
        count: usize,
    },

    /// Negative (relative) corner index
    #[error("line {line}: relative index in corner '{token}' is not supported")]
    RelativeIndex {
        /// Line number
        line: usize,
        /// Offending corner token
        token: String,
    },

    /// Directive with the wrong number of operands
    #[error("line {line}: '{directive}' expects {expected} values, found {found}")]
    DirectiveArity {
        /// Line number
        line: usize,
        /// Directive keyword
        directive: String,
        /// Required operand count
        expected: usize,
        /// Operand count present
        found: usize,
    },

    /// More distinct vertices than a `u32` index buffer can address
    #[error("line {line}: vertex count {count} exceeds the u32 index range")]
    IndexOverflow {
        /// Line number
        line: usize,
        /// Vertex count that no longer fits
        count: usize,
    },

    /// Read failure after the file was opened
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Split a trimmed line into its directive keyword and operands.
///
/// Blank lines and `#` comments yield `None`.
pub(crate) fn split_directive(line: &str) -> Option<(&str, Vec<&str>)> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    let mut tokens = line.split_whitespace();
    let keyword = tokens.next()?;
    Some((keyword, tokens.collect()))
}

/// Parse exactly `N` floats from the operands of `directive`.
pub(crate) fn parse_floats<const N: usize>(
    operands: &[&str],
    directive: &str,
    line: usize,
    content: &str,
) -> Result<[f32; N], ObjError> {
    if operands.len() != N {
        return Err(ObjError::DirectiveArity {
            line,
            directive: directive.to_string(),
            expected: N,
            found: operands.len(),
        });
    }
    let mut values = [0.0; N];
    for (value, token) in values.iter_mut().zip(operands) {
        *value = token.parse::<f32>().map_err(|_| ObjError::NumberFormat {
            line,
            token: (*token).to_string(),
            content: content.to_string(),
        })?;
    }
    Ok(values)
}

/// Join the operands of a directive whose value may contain spaces
/// (material names, file names).
pub(crate) fn rest_of_line(operands: &[&str], directive: &str, line: usize) -> Result<String, ObjError> {
    if operands.is_empty() {
        return Err(ObjError::DirectiveArity {
            line,
            directive: directive.to_string(),
            expected: 1,
            found: 0,
        });
    }
    Ok(operands.join(" "))
}
