//! Triangle mesh produced by a load
//!
//! Pure data with read-only accessors. Positions, normals and texture
//! coordinates are flat `f32` buffers so they can be emitted as literal
//! arrays or uploaded to a GPU without conversion.
//!
//! In flat mode every triangle owns three consecutive vertices and there is
//! no index buffer; object ranges count vertices. In indexed mode the
//! vertex buffers hold one entry per distinct corner token and object
//! ranges count entries of [`TriangleMesh::vertex_index`].

use super::attribute_buffer::AttributeBuffer;
use crate::foundation::math::{vec2_from_slice, vec3_from_slice, Vec2, Vec3};

/// A named, contiguous sub-range of the output geometry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeshObject {
    name: String,
    offset: usize,
    count: usize,
    material_ref: String,
    smooth: bool,
}

impl MeshObject {
    pub(crate) fn new(name: String, offset: usize, count: usize, material_ref: String, smooth: bool) -> Self {
        Self { name, offset, count, material_ref, smooth }
    }

    /// Object or group name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// First element belonging to this object
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Number of elements
    pub fn count(&self) -> usize {
        self.count
    }

    /// Element range `offset..offset + count`
    pub fn range(&self) -> std::ops::Range<usize> {
        self.offset..self.offset + self.count
    }

    /// Material set by `usemtl`, empty if none
    pub fn material_ref(&self) -> &str {
        &self.material_ref
    }

    /// Smoothing flag set by `s`
    pub fn smooth(&self) -> bool {
        self.smooth
    }
}

/// Immutable triangle mesh
#[derive(Debug, Clone, PartialEq)]
pub struct TriangleMesh {
    vertices: AttributeBuffer,
    normals: Option<AttributeBuffer>,
    texcoords: Option<AttributeBuffer>,
    vertex_index: Option<Vec<u32>>,
    objects: Vec<MeshObject>,
}

impl TriangleMesh {
    pub(crate) fn new(
        vertices: AttributeBuffer,
        normals: Option<AttributeBuffer>,
        texcoords: Option<AttributeBuffer>,
        vertex_index: Option<Vec<u32>>,
        objects: Vec<MeshObject>,
    ) -> Self {
        Self { vertices, normals, texcoords, vertex_index, objects }
    }

    /// Flat `x, y, z` positions
    pub fn vertices(&self) -> &[f32] {
        self.vertices.as_slice()
    }

    /// Flat `x, y, z` normals, if any corner referenced one
    pub fn normals(&self) -> Option<&[f32]> {
        self.normals.as_ref().map(AttributeBuffer::as_slice)
    }

    /// Flat `u, v` texture coordinates, if any corner referenced one
    pub fn texcoords(&self) -> Option<&[f32]> {
        self.texcoords.as_ref().map(AttributeBuffer::as_slice)
    }

    /// Index buffer (indexed mode only)
    pub fn vertex_index(&self) -> Option<&[u32]> {
        self.vertex_index.as_deref()
    }

    /// Mesh objects in order of first appearance
    pub fn objects(&self) -> &[MeshObject] {
        &self.objects
    }

    /// Positions, texture coordinates and normals in one call
    pub fn vtn(&self) -> (&[f32], Option<&[f32]>, Option<&[f32]>) {
        (self.vertices(), self.texcoords(), self.normals())
    }

    /// Number of position vectors
    pub fn vertex_count(&self) -> usize {
        self.vertices.count()
    }

    /// Position `index` as a vector
    pub fn position(&self, index: usize) -> Option<Vec3> {
        self.vertices.get(index).ok().and_then(vec3_from_slice)
    }

    /// Normal `index` as a vector
    pub fn normal(&self, index: usize) -> Option<Vec3> {
        self.normals.as_ref()?.get(index).ok().and_then(vec3_from_slice)
    }

    /// Texture coordinate `index` as a vector
    pub fn texcoord(&self, index: usize) -> Option<Vec2> {
        self.texcoords.as_ref()?.get(index).ok().and_then(vec2_from_slice)
    }

    /// Whether the mesh carries an index buffer
    pub fn is_indexed(&self) -> bool {
        self.vertex_index.is_some()
    }

    /// Elements spanned by objects: indices when indexed, vertices otherwise
    pub fn element_count(&self) -> usize {
        match &self.vertex_index {
            Some(indices) => indices.len(),
            None => self.vertex_count(),
        }
    }

    /// Number of triangles
    pub fn triangle_count(&self) -> usize {
        self.element_count() / 3
    }

    /// True when no face was parsed
    pub fn is_empty(&self) -> bool {
        self.element_count() == 0
    }

    /// Positions as raw bytes for buffer uploads
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.vertices())
    }

    /// Index buffer as raw bytes for buffer uploads
    pub fn index_bytes(&self) -> Option<&[u8]> {
        self.vertex_index().map(bytemuck::cast_slice)
    }
}
