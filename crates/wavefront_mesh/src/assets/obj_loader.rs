//! OBJ file loader for 3D models
//!
//! Streams a geometry file once, dispatching each directive to the
//! attribute buffers, the geometry assembler or the object tracker, then
//! loads every referenced material library from the geometry file's
//! directory.

use std::fs::{self, File};
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use super::geometry::{GeometryAssembler, OutputMode};
use super::materials::{MaterialMap, MtlParser};
use super::mesh::TriangleMesh;
use super::objects::{ObjectTracker, DEFAULT_OBJECT_NAME};
use super::{parse_floats, rest_of_line, split_directive, ObjError};
use crate::config::LoaderConfig;

/// Result of parsing a geometry stream
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedObj {
    /// Assembled mesh
    pub mesh: TriangleMesh,
    /// `mtllib` names in order of appearance, unresolved
    pub material_libraries: Vec<String>,
}

/// Per-load parse state; never outlives a single `parse` call
struct ObjParseContext {
    assembler: GeometryAssembler,
    objects: ObjectTracker,
    material_libraries: Vec<String>,
}

impl ObjParseContext {
    fn new(mode: OutputMode) -> Self {
        Self {
            assembler: GeometryAssembler::new(mode),
            objects: ObjectTracker::new(),
            material_libraries: Vec::new(),
        }
    }

    fn handle_line(&mut self, line_num: usize, line: &str) -> Result<(), ObjError> {
        let Some((directive, operands)) = split_directive(line) else {
            return Ok(());
        };
        let content = line.trim();

        match directive {
            "v" => {
                let position = parse_floats::<3>(&operands, directive, line_num, content)?;
                self.assembler.add_position(position);
            }
            "vn" => {
                let normal = parse_floats::<3>(&operands, directive, line_num, content)?;
                self.assembler.add_normal(normal);
            }
            "vt" => {
                let texcoord = parse_floats::<2>(&operands, directive, line_num, content)?;
                self.assembler.add_texcoord(texcoord);
            }
            "f" => {
                let before = self.assembler.output_len();
                let written = self.assembler.add_face(&operands, line_num, content)?;
                self.objects.record(before, written);
            }
            "g" | "o" => {
                let name = operands.first().copied().unwrap_or(DEFAULT_OBJECT_NAME);
                self.objects.open(name);
            }
            "s" => self.objects.set_smooth(operands.first() == Some(&"1")),
            "mtllib" => {
                let library = rest_of_line(&operands, directive, line_num)?;
                self.material_libraries.push(library);
            }
            "usemtl" => {
                let material = rest_of_line(&operands, directive, line_num)?;
                self.objects.set_material(&material);
            }
            // Ignore other commands
            _ => {}
        }
        Ok(())
    }

    fn finish(self) -> ParsedObj {
        let objects = self.objects.finish();
        ParsedObj {
            mesh: self.assembler.finish(objects),
            material_libraries: self.material_libraries,
        }
    }
}

/// Wavefront OBJ loader
pub struct ObjLoader;

impl ObjLoader {
    /// Load an OBJ file and its material libraries
    ///
    /// # Arguments
    /// * `path` - Path to the .obj file
    /// * `indexed` - Deduplicate corners into an index buffer instead of
    ///   replicating them per face
    ///
    /// # Returns
    /// The mesh and all materials keyed by name
    pub fn load<P: AsRef<Path>>(path: P, indexed: bool) -> Result<(TriangleMesh, MaterialMap), ObjError> {
        Self::load_with_config(path, &LoaderConfig::new().with_indexed(indexed))
    }

    /// Load an OBJ file using the output mode and material policy of `config`
    pub fn load_with_config<P: AsRef<Path>>(
        path: P,
        config: &LoaderConfig,
    ) -> Result<(TriangleMesh, MaterialMap), ObjError> {
        let path = path.as_ref();
        let not_found = |source| ObjError::FileNotFound {
            path: path.to_path_buf(),
            source,
        };
        let path = fs::canonicalize(path).map_err(not_found)?;
        log::debug!("Loading OBJ {:?} (indexed: {})", path, config.indexed);

        let parsed = {
            let file = Self::open_regular_file(&path).map_err(not_found)?;
            Self::parse(BufReader::new(file), config.indexed)?
        };

        let base_dir = path.parent().unwrap_or_else(|| Path::new(""));
        let mut materials = MaterialMap::new();
        for library in &parsed.material_libraries {
            let library_path = Self::resolve_library(base_dir, library);
            match Self::open_regular_file(&library_path) {
                Ok(file) => {
                    log::debug!("Reading material library {:?}", library_path);
                    materials.extend(MtlParser::parse_reader(BufReader::new(file))?);
                }
                Err(source) if config.require_material_library => {
                    return Err(ObjError::MaterialLibraryNotFound {
                        path: library_path,
                        source,
                    });
                }
                Err(err) => {
                    log::warn!("Skipping material library {:?}: {}", library_path, err);
                }
            }
        }

        let mesh = parsed.mesh;
        log::info!(
            "Loaded {:?}: {} vertices, {} triangles, {} objects, {} materials",
            path.file_name().unwrap_or_default(),
            mesh.vertex_count(),
            mesh.triangle_count(),
            mesh.objects().len(),
            materials.len()
        );
        Ok((mesh, materials))
    }

    /// Parse a geometry stream without touching the filesystem
    ///
    /// `mtllib` directives are collected but not resolved.
    pub fn parse<R: BufRead>(reader: R, indexed: bool) -> Result<ParsedObj, ObjError> {
        let mut context = ObjParseContext::new(OutputMode::from_indexed(indexed));
        for (line_idx, line) in reader.lines().enumerate() {
            context.handle_line(line_idx + 1, &line?)?;
        }
        Ok(context.finish())
    }

    /// Open `path` for reading; fails for anything but a regular file
    fn open_regular_file(path: &Path) -> io::Result<File> {
        let file = File::open(path)?;
        if file.metadata()?.is_file() {
            Ok(file)
        } else {
            Err(io::Error::new(io::ErrorKind::InvalidInput, "not a regular file"))
        }
    }

    /// `library` relative to `base_dir` unless already absolute
    pub fn resolve_library(base_dir: &Path, library: &str) -> PathBuf {
        let library = Path::new(library);
        if library.is_absolute() {
            library.to_path_buf()
        } else {
            base_dir.join(library)
        }
    }
}
