//! Fixed-stride attribute storage
//!
//! Positions, normals and texture coordinates are kept in one flat `Vec<f32>`
//! per attribute so that appending a vector never allocates per tuple and the
//! finished buffer can be handed to a renderer as-is.

use thiserror::Error;

/// Attribute buffer errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BufferError {
    /// Vector index past the end of the buffer
    #[error("index {index} out of range for buffer of {count} vectors")]
    IndexOutOfRange {
        /// Requested vector index (0-based)
        index: usize,
        /// Number of vectors stored
        count: usize,
    },
}

/// Growable buffer of fixed-width `f32` tuples
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeBuffer {
    values: Vec<f32>,
    stride: usize,
}

impl AttributeBuffer {
    /// Stride of positions and normals
    pub const VEC3: usize = 3;
    /// Stride of texture coordinates
    pub const VEC2: usize = 2;

    /// Create an empty buffer holding tuples of `stride` components
    pub fn new(stride: usize) -> Self {
        Self::with_capacity(stride, 0)
    }

    /// Create an empty buffer with room for `vectors` tuples
    pub fn with_capacity(stride: usize, vectors: usize) -> Self {
        assert!(stride > 0, "attribute stride must be non-zero");
        Self {
            values: Vec::with_capacity(stride * vectors),
            stride,
        }
    }

    /// Append one tuple
    ///
    /// # Panics
    /// If `vector` is not exactly `stride` components long.
    pub fn append(&mut self, vector: &[f32]) {
        assert_eq!(vector.len(), self.stride, "attribute width must match buffer stride");
        self.values.extend_from_slice(vector);
    }

    /// Append `stride` zeros
    pub fn append_zeroed(&mut self) {
        self.values.resize(self.values.len() + self.stride, 0.0);
    }

    /// Tuple at vector index `index`
    pub fn get(&self, index: usize) -> Result<&[f32], BufferError> {
        index
            .checked_mul(self.stride)
            .and_then(|start| self.values.get(start..start.checked_add(self.stride)?))
            .ok_or(BufferError::IndexOutOfRange { index, count: self.count() })
    }

    /// Number of tuples stored
    pub fn count(&self) -> usize {
        self.values.len() / self.stride
    }

    /// Components per tuple
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// True when no tuple has been appended
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Flat component view
    pub fn as_slice(&self) -> &[f32] {
        &self.values
    }

    /// Iterate tuple by tuple
    pub fn iter(&self) -> std::slice::ChunksExact<'_, f32> {
        self.values.chunks_exact(self.stride)
    }

    /// Consume the buffer, returning the flat component vector
    pub fn into_vec(self) -> Vec<f32> {
        self.values
    }
}
