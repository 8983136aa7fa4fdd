//! Integration tests for multi-format model loading.
//!
//! Tests format detection and loading for STL and Wavefront OBJ using
//! synthetic in-memory fixtures, plus the path-based entry points against
//! files written to a scratch directory.

use std::path::PathBuf;

use modelsheet::formats::{self, FormatLoader, LoadError, DEFAULT_COLOR};
use modelsheet::render;

// ===========================================================================
// Fixtures
// ===========================================================================

fn scratch_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("modelsheet_formats_{}_{}", tag, std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

/// Binary STL with a single triangle in the XY plane.
fn binary_stl_triangle() -> Vec<u8> {
    let verts: [[f32; 3]; 3] = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]];
    let mut out = vec![0u8; 80];
    out.extend_from_slice(&1u32.to_le_bytes());
    out.extend_from_slice(&[0u8; 12]);
    for v in &verts {
        for c in v {
            out.extend_from_slice(&c.to_le_bytes());
        }
    }
    out.extend_from_slice(&0u16.to_le_bytes());
    out
}

const ASCII_STL: &str = "\
solid plate
  facet normal 0 0 1
    outer loop
      vertex 0 0 0
      vertex 2 0 0
      vertex 0 2 0
    endloop
  endfacet
  facet normal 0 0 1
    outer loop
      vertex 2 0 0
      vertex 2 2 0
      vertex 0 2 0
    endloop
  endfacet
endsolid plate
";

const OBJ_QUAD: &str = "\
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
f 1 2 3 4
";

// ===========================================================================
// Format detection tests
// ===========================================================================

#[test]
fn test_stl_detection_by_extension() {
    let loader = formats::stl::StlLoader;
    assert!(loader.can_load(b"anything at all", Some("stl")));
    assert!(loader.can_load(b"anything at all", Some("STL"))); // case insensitive
}

#[test]
fn test_stl_detection_by_content() {
    let loader = formats::stl::StlLoader;
    assert!(loader.can_load(ASCII_STL.as_bytes(), None));
    assert!(loader.can_load(&binary_stl_triangle(), None));
    assert!(!loader.can_load(OBJ_QUAD.as_bytes(), None));
}

#[test]
fn test_obj_detection_by_content() {
    let loader = formats::obj::ObjLoader;
    assert!(loader.can_load(OBJ_QUAD.as_bytes(), None));
    assert!(!loader.can_load(ASCII_STL.as_bytes(), None));
}

#[test]
fn test_find_loader_prefers_extension() {
    let loader = formats::find_loader(ASCII_STL.as_bytes(), Some("stl")).unwrap();
    assert_eq!(loader.name(), "STL");
}

#[test]
fn test_unrecognized_data_is_rejected() {
    let result = formats::load_model(b"\x7fELF\x02\x01\x01", None);
    assert!(matches!(result, Err(LoadError::UnrecognizedFormat)));
}

// ===========================================================================
// Parsing tests (synthetic data)
// ===========================================================================

#[test]
fn test_binary_stl_triangle_count() {
    let mesh = formats::load_model(&binary_stl_triangle(), Some("stl")).unwrap();
    assert_eq!(mesh.triangles.len(), 1);
    assert_eq!(mesh.triangles[0].color, DEFAULT_COLOR);
}

#[test]
fn test_ascii_stl_triangle_count() {
    let mesh = formats::load_model(ASCII_STL.as_bytes(), Some("stl")).unwrap();
    assert_eq!(mesh.triangles.len(), 2);
    let b = mesh.bounds().unwrap();
    assert_eq!(b.min, [0.0, 0.0, 0.0]);
    assert_eq!(b.max, [2.0, 2.0, 0.0]);
}

#[test]
fn test_obj_quad_triangulates() {
    let mesh = formats::load_model(OBJ_QUAD.as_bytes(), Some("obj")).unwrap();
    assert_eq!(mesh.triangles.len(), 2);
}

// ===========================================================================
// Path-based loading
// ===========================================================================

#[test]
fn test_load_stl_from_path() {
    let dir = scratch_dir("stl_path");
    let path = dir.join("tri.stl");
    std::fs::write(&path, binary_stl_triangle()).unwrap();

    let mesh = formats::load_model_from_path(&path).unwrap();
    assert_eq!(mesh.triangles.len(), 1);
}

#[test]
fn test_obj_mtl_diffuse_color_from_path() {
    let dir = scratch_dir("obj_mtl");
    let obj = "\
mtllib colors.mtl
v 0 0 0
v 1 0 0
v 0 1 0
usemtl red
f 1 2 3
";
    let mtl = "newmtl red\nKd 1.0 0.0 0.0\n";
    let obj_path = dir.join("part.obj");
    std::fs::write(&obj_path, obj).unwrap();
    std::fs::write(dir.join("colors.mtl"), mtl).unwrap();

    let mesh = formats::load_model_from_path(&obj_path).unwrap();
    assert_eq!(mesh.triangles.len(), 1);
    assert_eq!(mesh.triangles[0].color, [1.0, 0.0, 0.0]);
}

#[test]
fn test_missing_file_is_io_error() {
    let result = formats::load_model_from_path(std::path::Path::new("no_such_file.stl"));
    assert!(matches!(result, Err(LoadError::IoError(_))));
}

// ===========================================================================
// Loaded meshes render
// ===========================================================================

#[test]
fn test_loaded_stl_renders_to_pixels() {
    let mesh = formats::load_model(ASCII_STL.as_bytes(), Some("stl")).unwrap();
    let pixels = render::render_scene(&[&mesh], None, 2.8, 48, 48).unwrap();
    assert_eq!(pixels.len(), 48 * 48 * 4);
}
