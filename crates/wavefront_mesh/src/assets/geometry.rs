//! Geometry assembly
//!
//! Holds the attribute vectors declared so far and turns each triangular
//! face into output data, either replicated per corner (flat) or
//! deduplicated by corner token text (indexed).

use std::collections::HashMap;

use super::attribute_buffer::AttributeBuffer;
use super::face::FaceCorner;
use super::mesh::{MeshObject, TriangleMesh};
use super::{AttributeKind, ObjError};

/// Output layout, chosen once per load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// One output vertex per face corner, no index buffer
    Flat,
    /// One output vertex per distinct corner token plus an index buffer
    Indexed,
}

impl OutputMode {
    /// `Indexed` when `indexed` is true
    pub fn from_indexed(indexed: bool) -> Self {
        if indexed { Self::Indexed } else { Self::Flat }
    }
}

/// Builds output buffers from declared attributes and face records
#[derive(Debug)]
pub struct GeometryAssembler {
    mode: OutputMode,

    // Declared with v / vn / vt
    positions: AttributeBuffer,
    normals: AttributeBuffer,
    texcoords: AttributeBuffer,

    out_vertices: AttributeBuffer,
    out_normals: AttributeBuffer,
    out_texcoords: AttributeBuffer,
    uses_normals: bool,
    uses_texcoords: bool,

    vertex_index: Vec<u32>,
    seen_corners: HashMap<String, u32>,
}

impl GeometryAssembler {
    /// Create an empty assembler
    pub fn new(mode: OutputMode) -> Self {
        Self {
            mode,
            positions: AttributeBuffer::new(AttributeBuffer::VEC3),
            normals: AttributeBuffer::new(AttributeBuffer::VEC3),
            texcoords: AttributeBuffer::new(AttributeBuffer::VEC2),
            out_vertices: AttributeBuffer::new(AttributeBuffer::VEC3),
            out_normals: AttributeBuffer::new(AttributeBuffer::VEC3),
            out_texcoords: AttributeBuffer::new(AttributeBuffer::VEC2),
            uses_normals: false,
            uses_texcoords: false,
            vertex_index: Vec::new(),
            seen_corners: HashMap::new(),
        }
    }

    /// Output mode of this assembler
    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    /// Declare a position (`v`)
    pub fn add_position(&mut self, position: [f32; 3]) {
        self.positions.append(&position);
    }

    /// Declare a normal (`vn`)
    pub fn add_normal(&mut self, normal: [f32; 3]) {
        self.normals.append(&normal);
    }

    /// Declare a texture coordinate (`vt`)
    pub fn add_texcoord(&mut self, texcoord: [f32; 2]) {
        self.texcoords.append(&texcoord);
    }

    /// Elements written so far: vertices when flat, indices when indexed
    pub fn output_len(&self) -> usize {
        match self.mode {
            OutputMode::Flat => self.out_vertices.count(),
            OutputMode::Indexed => self.vertex_index.len(),
        }
    }

    /// Add one face from its corner tokens. Returns the number of output
    /// elements written, always 3.
    pub fn add_face(&mut self, corners: &[&str], line: usize, content: &str) -> Result<usize, ObjError> {
        if corners.len() != 3 {
            return Err(ObjError::UnsupportedFaceArity {
                line,
                count: corners.len(),
                content: content.to_string(),
            });
        }

        let before = self.output_len();
        for token in corners {
            match self.mode {
                OutputMode::Flat => {
                    let corner = FaceCorner::parse(token, line, content)?;
                    self.emit_vertex(&corner, token, line)?;
                }
                OutputMode::Indexed => {
                    let id = match self.seen_corners.get(*token).copied() {
                        Some(id) => id,
                        None => {
                            let corner = FaceCorner::parse(token, line, content)?;
                            let id = Self::vertex_id(self.out_vertices.count(), line)?;
                            self.emit_vertex(&corner, token, line)?;
                            self.seen_corners.insert((*token).to_string(), id);
                            id
                        }
                    };
                    self.vertex_index.push(id);
                }
            }
        }
        Ok(self.output_len() - before)
    }

    /// Freeze the output buffers into a mesh
    pub fn finish(self, objects: Vec<MeshObject>) -> TriangleMesh {
        let vertex_index = match self.mode {
            OutputMode::Flat => None,
            OutputMode::Indexed => Some(self.vertex_index),
        };
        TriangleMesh::new(
            self.out_vertices,
            self.uses_normals.then_some(self.out_normals),
            self.uses_texcoords.then_some(self.out_texcoords),
            vertex_index,
            objects,
        )
    }

    /// Index buffer id for the vertex appended after `count` others
    fn vertex_id(count: usize, line: usize) -> Result<u32, ObjError> {
        u32::try_from(count).map_err(|_| ObjError::IndexOverflow { line, count })
    }

    /// Append the attributes referenced by `corner` to the output buffers.
    /// All lookups happen before anything is written.
    fn emit_vertex(&mut self, corner: &FaceCorner, token: &str, line: usize) -> Result<(), ObjError> {
        let position = Self::lookup(&self.positions, AttributeKind::Position, corner.position, token, line)?;
        let texcoord = corner
            .texcoord
            .map(|index| Self::lookup(&self.texcoords, AttributeKind::TexCoord, index, token, line))
            .transpose()?;
        let normal = corner
            .normal
            .map(|index| Self::lookup(&self.normals, AttributeKind::Normal, index, token, line))
            .transpose()?;

        self.out_vertices.append(position);
        match texcoord {
            Some(texcoord) => {
                self.out_texcoords.append(texcoord);
                self.uses_texcoords = true;
            }
            None => self.out_texcoords.append_zeroed(),
        }
        match normal {
            Some(normal) => {
                self.out_normals.append(normal);
                self.uses_normals = true;
            }
            None => self.out_normals.append_zeroed(),
        }
        Ok(())
    }

    fn lookup<'a>(
        buffer: &'a AttributeBuffer,
        attribute: AttributeKind,
        index: usize,
        token: &str,
        line: usize,
    ) -> Result<&'a [f32], ObjError> {
        buffer.get(index - 1).map_err(|_| ObjError::DanglingReference {
            line,
            token: token.to_string(),
            attribute,
            index,
            count: buffer.count(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(mode: OutputMode) -> GeometryAssembler {
        let mut assembler = GeometryAssembler::new(mode);
        assembler.add_position([-1.0, 0.0, 1.0]);
        assembler.add_position([1.0, 0.0, 1.0]);
        assembler.add_position([-1.0, 0.0, -1.0]);
        assembler.add_position([1.0, 0.0, -1.0]);
        assembler.add_normal([0.0, 1.0, 0.0]);
        assembler
    }

    #[test]
    fn test_flat_replicates_corners() {
        let mut assembler = square(OutputMode::Flat);
        assert_eq!(assembler.add_face(&["2//1", "4//1", "3//1"], 1, "").unwrap(), 3);
        assert_eq!(assembler.add_face(&["1//1", "2//1", "3//1"], 2, "").unwrap(), 3);
        let mesh = assembler.finish(Vec::new());

        assert_eq!(mesh.vertex_count(), 6);
        assert!(mesh.vertex_index().is_none());
        assert!(mesh.texcoords().is_none());
        let normals = mesh.normals().unwrap();
        assert_eq!(normals.len(), 18);
        for normal in normals.chunks_exact(3) {
            assert_eq!(normal, &[0.0, 1.0, 0.0]);
        }
        assert_eq!(&mesh.vertices()[0..3], &[1.0, 0.0, 1.0]);
    }

    #[test]
    fn test_indexed_deduplicates_tokens() {
        let mut assembler = square(OutputMode::Indexed);
        assembler.add_face(&["2//1", "4//1", "3//1"], 1, "").unwrap();
        assembler.add_face(&["1//1", "2//1", "3//1"], 2, "").unwrap();
        let mesh = assembler.finish(Vec::new());

        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.vertex_index().unwrap(), &[0, 1, 2, 3, 0, 2]);
        assert_eq!(mesh.normals().unwrap().len(), 12);
    }

    #[test]
    fn test_indexed_dedup_is_textual() {
        let mut assembler = square(OutputMode::Indexed);
        // "1" and "1//1" share a position but are distinct tokens
        assembler.add_face(&["1", "2", "3"], 1, "").unwrap();
        assembler.add_face(&["1//1", "2", "4"], 2, "").unwrap();
        let mesh = assembler.finish(Vec::new());

        assert_eq!(mesh.vertex_count(), 5);
        assert_eq!(mesh.vertex_index().unwrap(), &[0, 1, 2, 3, 1, 4]);
    }

    #[test]
    fn test_partial_normals_are_zero_filled() {
        let mut assembler = square(OutputMode::Flat);
        assembler.add_face(&["1", "2", "3//1"], 1, "").unwrap();
        let mesh = assembler.finish(Vec::new());

        let normals = mesh.normals().unwrap();
        assert_eq!(normals.len(), mesh.vertices().len());
        assert_eq!(&normals[0..3], &[0.0, 0.0, 0.0]);
        assert_eq!(&normals[6..9], &[0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_texcoords() {
        let mut assembler = square(OutputMode::Flat);
        assembler.add_texcoord([0.0, 0.0]);
        assembler.add_texcoord([1.0, 1.0]);
        assembler.add_face(&["1/1/1", "2/2/1", "3/1/1"], 1, "").unwrap();
        let mesh = assembler.finish(Vec::new());

        assert_eq!(mesh.texcoords().unwrap(), &[0.0, 0.0, 1.0, 1.0, 0.0, 0.0]);
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_vertex_id_range() {
        assert_eq!(GeometryAssembler::vertex_id(7, 1).unwrap(), 7);
        assert_eq!(GeometryAssembler::vertex_id(u32::MAX as usize, 1).unwrap(), u32::MAX);

        let overflow = u32::MAX as usize + 1;
        match GeometryAssembler::vertex_id(overflow, 12) {
            Err(ObjError::IndexOverflow { line, count }) => {
                assert_eq!(line, 12);
                assert_eq!(count, overflow);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_quad_rejected() {
        let mut assembler = square(OutputMode::Flat);
        let err = assembler.add_face(&["1", "2", "3", "4"], 7, "f 1 2 3 4").unwrap_err();
        assert!(matches!(err, ObjError::UnsupportedFaceArity { line: 7, count: 4, .. }));
    }

    #[test]
    fn test_dangling_position() {
        let mut assembler = square(OutputMode::Flat);
        let err = assembler.add_face(&["1", "2", "5"], 3, "f 1 2 5").unwrap_err();
        match err {
            ObjError::DanglingReference { attribute, index, count, .. } => {
                assert_eq!(attribute, AttributeKind::Position);
                assert_eq!(index, 5);
                assert_eq!(count, 4);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_dangling_normal_and_texcoord() {
        let mut assembler = square(OutputMode::Indexed);
        let err = assembler.add_face(&["1//2", "2//1", "3//1"], 1, "").unwrap_err();
        assert!(matches!(
            err,
            ObjError::DanglingReference { attribute: AttributeKind::Normal, .. }
        ));

        let err = assembler.add_face(&["1/1/1", "2//1", "3//1"], 2, "").unwrap_err();
        assert!(matches!(
            err,
            ObjError::DanglingReference { attribute: AttributeKind::TexCoord, count: 0, .. }
        ));
    }
}
