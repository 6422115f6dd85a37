//! Test mesh loading from disk
//!
//! Loads the fixtures under `resources/models` through the full loader,
//! including material library resolution.

#[cfg(test)]
mod tests {
    use crate::assets::{ObjError, ObjLoader, TriangleMesh};
    use crate::config::LoaderConfig;
    use crate::foundation::logging;
    use crate::foundation::math::Vec3;
    use approx::assert_relative_eq;
    use std::path::PathBuf;

    fn get_test_model_path(filename: &str) -> PathBuf {
        // Get workspace root (2 levels up from crates/wavefront_mesh)
        let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        path.pop(); // Remove wavefront_mesh
        path.pop(); // Remove crates
        path.push("resources");
        path.push("models");
        path.push(filename);
        path
    }

    /// Object ranges must tile `0..element_count` in order
    fn assert_objects_tile(mesh: &TriangleMesh) {
        let mut expected_offset = 0;
        for object in mesh.objects() {
            assert_eq!(object.offset(), expected_offset, "gap before {}", object.name());
            expected_offset += object.count();
        }
        assert_eq!(expected_offset, mesh.element_count());
    }

    #[test]
    fn test_load_square_flat() {
        logging::try_init_for_tests();
        let (mesh, materials) = ObjLoader::load(get_test_model_path("square.obj"), false).unwrap();

        assert_eq!(mesh.vertex_count(), 6);
        assert_eq!(mesh.normals().unwrap().len(), 18);
        assert!(mesh.vertex_index().is_none());
        assert_eq!(mesh.objects().len(), 1);
        assert_eq!((mesh.objects()[0].offset(), mesh.objects()[0].count()), (0, 6));
        assert_objects_tile(&mesh);

        let square = &materials["square"];
        assert_relative_eq!(square.kd, Vec3::new(0.64, 0.64, 0.64));
        assert_relative_eq!(square.ks, Vec3::new(0.5, 0.5, 0.5));
        assert_relative_eq!(square.ns, 96.078431);
        assert_relative_eq!(square.tr, 1.0);
        assert_eq!(square.kd_map.as_deref(), Some("square diffuse.png"));
    }

    #[test]
    fn test_load_square_indexed() {
        logging::try_init_for_tests();
        let (mesh, _) = ObjLoader::load(get_test_model_path("square.obj"), true).unwrap();

        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.vertex_index().unwrap().len(), 6);
        assert_objects_tile(&mesh);
    }

    #[test]
    fn test_load_cubes_flat() {
        logging::try_init_for_tests();
        let (mesh, materials) = ObjLoader::load(get_test_model_path("cubes.obj"), false).unwrap();

        assert_eq!(mesh.vertex_count(), 72);
        assert_eq!(mesh.triangle_count(), 24);
        assert_objects_tile(&mesh);

        let names: Vec<&str> = mesh.objects().iter().map(|o| o.name()).collect();
        assert_eq!(names, vec!["redCube", "blueCube"]);
        assert!(mesh.objects()[0].smooth());
        assert!(!mesh.objects()[1].smooth());

        for object in mesh.objects() {
            assert!(materials.contains_key(object.material_ref()));
        }
        assert_relative_eq!(materials["blueCube"].kd, Vec3::new(0.0, 0.0, 0.64));
    }

    #[test]
    fn test_load_cubes_indexed() {
        logging::try_init_for_tests();
        let (mesh, _) = ObjLoader::load(get_test_model_path("cubes.obj"), true).unwrap();
        let indices = mesh.vertex_index().unwrap();

        assert_eq!(indices.len(), 72);
        assert_eq!(mesh.vertex_count(), 32);
        assert!(indices.iter().all(|&i| (i as usize) < mesh.vertex_count()));
        assert_eq!((mesh.objects()[1].offset(), mesh.objects()[1].count()), (36, 36));
        assert_objects_tile(&mesh);
    }

    #[test]
    fn test_indexed_matches_flat_geometry() {
        let path = get_test_model_path("cubes.obj");
        let (flat, _) = ObjLoader::load(&path, false).unwrap();
        let (indexed, _) = ObjLoader::load(&path, true).unwrap();

        for (corner, &index) in indexed.vertex_index().unwrap().iter().enumerate() {
            assert_eq!(flat.position(corner), indexed.position(index as usize));
            assert_eq!(flat.normal(corner), indexed.normal(index as usize));
        }
    }

    #[test]
    fn test_reload_is_deterministic() {
        let path = get_test_model_path("cubes.obj");
        let first = ObjLoader::load(&path, true).unwrap();
        let second = ObjLoader::load(&path, true).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_load_textured_quad() {
        let (mesh, materials) = ObjLoader::load(get_test_model_path("textured_quad.obj"), true).unwrap();

        assert!(materials.is_empty());
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.vertex_index().unwrap(), &[0, 1, 2, 0, 2, 3]);
        assert_eq!(mesh.texcoords().unwrap().len(), 8);
        assert_relative_eq!(mesh.texcoord(2).unwrap(), crate::foundation::math::Vec2::new(1.0, 1.0));
    }

    #[test]
    fn test_missing_material_library_fails_load() {
        logging::try_init_for_tests();
        let err = ObjLoader::load(get_test_model_path("missing_library.obj"), false).unwrap_err();
        match err {
            ObjError::MaterialLibraryNotFound { path, .. } => {
                assert!(path.ends_with("models/does_not_exist.mtl"), "resolved to {path:?}");
            }
            other => panic!("expected MaterialLibraryNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_material_library_tolerated_by_config() {
        logging::try_init_for_tests();
        let config = LoaderConfig::new().with_required_material_library(false);
        let (mesh, materials) =
            ObjLoader::load_with_config(get_test_model_path("missing_library.obj"), &config).unwrap();

        assert!(materials.is_empty());
        assert_eq!(mesh.triangle_count(), 1);
        assert_eq!(mesh.objects()[0].material_ref(), "ghost");
    }

    #[test]
    fn test_directory_as_material_library_is_not_found() {
        let err = ObjLoader::load(get_test_model_path("directory_library.obj"), false).unwrap_err();
        assert!(
            matches!(err, ObjError::MaterialLibraryNotFound { .. }),
            "expected MaterialLibraryNotFound, got {err:?}"
        );
    }

    #[test]
    fn test_directory_as_geometry_file_is_not_found() {
        let err = ObjLoader::load(get_test_model_path(""), false).unwrap_err();
        assert!(matches!(err, ObjError::FileNotFound { .. }), "got {err:?}");
    }

    #[test]
    fn test_nonexistent_geometry_file() {
        let err = ObjLoader::load(get_test_model_path("nonexistent.obj"), false).unwrap_err();
        assert!(matches!(err, ObjError::FileNotFound { .. }), "got {err:?}");
    }
}
