//! Provides the format loader trait and common types for multi-format model support.
//!
//! This module defines a common interface for loading 3D model files (STL,
//! Wavefront OBJ) into a unified triangle-list representation that the
//! software rasterizer consumes. Printable-geometry formats carry no UV or
//! texture data, so the unified form is positions plus a flat per-triangle
//! color.
//!
//! # Examples
//! ```
//! use modelsheet::formats;
//!
//! let result = formats::load_model(b"invalid", None);
//! assert!(result.is_err());
//! ```

pub mod obj;
pub mod stl;

use std::path::Path;

/// A 3D vector type used by format loaders.
///
/// # Examples
/// ```
/// use modelsheet::formats::Vec3;
///
/// let v: Vec3 = [1.0, 2.0, 3.0];
/// assert_eq!(v, [1.0, 2.0, 3.0]);
/// ```
pub type Vec3 = [f32; 3];

/// The flat color applied to geometry without material information.
pub const DEFAULT_COLOR: [f32; 3] = [0.85, 0.85, 0.85];

/// Represents a triangle with vertex positions and a flat color.
///
/// # Examples
/// ```
/// use modelsheet::formats::Triangle;
///
/// let tri = Triangle {
///     verts: [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
///     color: [1.0, 1.0, 1.0],
/// };
/// let _ = tri;
/// ```
#[derive(Clone, Debug)]
pub struct Triangle {
    /// Triangle vertex positions.
    pub verts: [Vec3; 3],
    /// Flat RGB color.
    pub color: [f32; 3],
}

/// An axis-aligned bounding box over mesh geometry.
///
/// # Examples
/// ```
/// use modelsheet::formats::Bounds;
///
/// let b = Bounds { min: [0.0, 0.0, 0.0], max: [2.0, 2.0, 2.0] };
/// assert_eq!(b.center(), [1.0, 1.0, 1.0]);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    /// Minimum corner.
    pub min: Vec3,
    /// Maximum corner.
    pub max: Vec3,
}

impl Bounds {
    /// Returns the box center.
    pub fn center(&self) -> Vec3 {
        [
            (self.min[0] + self.max[0]) * 0.5,
            (self.min[1] + self.max[1]) * 0.5,
            (self.min[2] + self.max[2]) * 0.5,
        ]
    }

    /// Returns half the diagonal length, the radius of the enclosing sphere.
    pub fn radius(&self) -> f32 {
        let dx = self.max[0] - self.min[0];
        let dy = self.max[1] - self.min[1];
        let dz = self.max[2] - self.min[2];
        (dx * dx + dy * dy + dz * dz).sqrt() * 0.5
    }

    /// Returns the smallest box containing both boxes.
    pub fn union(&self, other: &Bounds) -> Bounds {
        Bounds {
            min: [
                self.min[0].min(other.min[0]),
                self.min[1].min(other.min[1]),
                self.min[2].min(other.min[2]),
            ],
            max: [
                self.max[0].max(other.max[0]),
                self.max[1].max(other.max[1]),
                self.max[2].max(other.max[2]),
            ],
        }
    }
}

/// Represents loaded model data ready for rendering.
///
/// # Examples
/// ```
/// use modelsheet::formats::{MeshData, Triangle};
///
/// let tri = Triangle {
///     verts: [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
///     color: [1.0, 1.0, 1.0],
/// };
/// let mesh = MeshData { triangles: vec![tri] };
/// assert_eq!(mesh.triangles.len(), 1);
/// ```
pub struct MeshData {
    /// Triangles ready for rasterization.
    pub triangles: Vec<Triangle>,
}

impl MeshData {
    /// Computes the bounding box of all vertices, or `None` for empty meshes.
    ///
    /// # Examples
    /// ```
    /// use modelsheet::formats::MeshData;
    ///
    /// let mesh = MeshData { triangles: vec![] };
    /// assert!(mesh.bounds().is_none());
    /// ```
    pub fn bounds(&self) -> Option<Bounds> {
        if self.triangles.is_empty() {
            return None;
        }
        let mut min = [f32::INFINITY; 3];
        let mut max = [f32::NEG_INFINITY; 3];
        for tri in &self.triangles {
            for v in &tri.verts {
                for i in 0..3 {
                    min[i] = min[i].min(v[i]);
                    max[i] = max[i].max(v[i]);
                }
            }
        }
        Some(Bounds { min, max })
    }
}

/// The result type for format loading.
pub type LoadResult = Result<MeshData, LoadError>;

/// Errors that can occur during format loading.
///
/// # Examples
/// ```
/// use modelsheet::formats::LoadError;
///
/// let err = LoadError::NoGeometry;
/// assert_eq!(format!("{}", err), "No geometry found");
/// ```
#[derive(Debug)]
pub enum LoadError {
    /// Represents invalid or corrupted file data.
    InvalidData(String),
    /// Indicates the file format is not recognized.
    UnrecognizedFormat,
    /// Represents an IO error reading the file.
    IoError(std::io::Error),
    /// Indicates no geometry was found in the model.
    NoGeometry,
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::InvalidData(msg) => write!(f, "Invalid data: {}", msg),
            LoadError::UnrecognizedFormat => write!(f, "Unrecognized format"),
            LoadError::IoError(e) => write!(f, "IO error: {}", e),
            LoadError::NoGeometry => write!(f, "No geometry found"),
        }
    }
}

impl std::error::Error for LoadError {}

impl From<std::io::Error> for LoadError {
    fn from(e: std::io::Error) -> Self {
        LoadError::IoError(e)
    }
}

/// A trait for format-specific model loaders.
///
/// # Examples
/// ```
/// use modelsheet::formats::{self, FormatLoader};
///
/// let loader = formats::stl::StlLoader;
/// assert_eq!(loader.name(), "STL");
/// ```
pub trait FormatLoader: Send + Sync {
    /// Returns the human-readable name for this format.
    fn name(&self) -> &'static str;

    /// Returns the file extensions this loader handles (lowercase, without dot).
    fn extensions(&self) -> &'static [&'static str];

    /// Checks whether this loader can handle the given data.
    ///
    /// This should be a quick check (magic bytes, a leading keyword) without
    /// fully parsing the file.
    fn can_load(&self, data: &[u8], extension: Option<&str>) -> bool;

    /// Loads a model from raw bytes.
    ///
    /// # Errors
    /// Returns an error if the data cannot be parsed or contains no geometry.
    fn load_from_bytes(&self, data: &[u8]) -> LoadResult;

    /// Loads a model from a file path.
    ///
    /// Default implementation reads the file and calls `load_from_bytes`,
    /// but loaders can override this to resolve companion files.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    fn load_from_path(&self, path: &Path) -> LoadResult {
        let data = std::fs::read(path)?;
        self.load_from_bytes(&data)
    }
}

/// Returns all registered format loaders.
///
/// # Examples
/// ```
/// use modelsheet::formats;
///
/// let loaders = formats::get_loaders();
/// assert!(!loaders.is_empty());
/// ```
pub fn get_loaders() -> Vec<Box<dyn FormatLoader>> {
    vec![Box::new(stl::StlLoader), Box::new(obj::ObjLoader)]
}

/// Finds a loader that can handle the given data and extension.
///
/// # Examples
/// ```
/// use modelsheet::formats;
///
/// let loader = formats::find_loader(b"solid part\n", Some("stl"));
/// assert!(loader.is_some());
/// ```
pub fn find_loader(data: &[u8], extension: Option<&str>) -> Option<Box<dyn FormatLoader>> {
    let mut loaders = get_loaders();

    // First, try to match by extension if provided
    if let Some(ext) = extension {
        let ext_lower = ext.to_lowercase();
        if let Some(idx) = loaders.iter().position(|loader| {
            loader.extensions().contains(&ext_lower.as_str())
                && loader.can_load(data, Some(&ext_lower))
        }) {
            return Some(loaders.swap_remove(idx));
        }
    }

    // Fall back to content-based detection
    loaders.into_iter().find(|loader| loader.can_load(data, extension))
}

/// Loads a model from bytes, auto-detecting the format.
///
/// # Errors
/// Returns an error if no loader recognizes the data or parsing fails.
///
/// # Examples
/// ```
/// use modelsheet::formats::{self, LoadError};
///
/// let result = formats::load_model(b"invalid", None);
/// assert!(matches!(result, Err(LoadError::UnrecognizedFormat)));
/// ```
pub fn load_model(data: &[u8], extension: Option<&str>) -> LoadResult {
    find_loader(data, extension)
        .ok_or(LoadError::UnrecognizedFormat)?
        .load_from_bytes(data)
}

/// Loads a model from a file path, auto-detecting the format.
///
/// # Errors
/// Returns an error if the file cannot be read or the format is unrecognized.
///
/// # Examples
/// ```
/// use std::path::Path;
///
/// use modelsheet::formats;
///
/// let result = formats::load_model_from_path(Path::new("does_not_exist.stl"));
/// assert!(result.is_err());
/// ```
pub fn load_model_from_path(path: &Path) -> LoadResult {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_lowercase());

    let data = std::fs::read(path)?;

    let loader = find_loader(&data, extension.as_deref()).ok_or(LoadError::UnrecognizedFormat)?;

    // Use path-based loading for formats that resolve companion files
    loader.load_from_path(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_union() {
        let a = Bounds { min: [0.0, 0.0, 0.0], max: [1.0, 1.0, 1.0] };
        let b = Bounds { min: [-1.0, 0.5, 0.0], max: [0.5, 2.0, 1.0] };
        let u = a.union(&b);
        assert_eq!(u.min, [-1.0, 0.0, 0.0]);
        assert_eq!(u.max, [1.0, 2.0, 1.0]);
    }

    #[test]
    fn test_bounds_radius_unit_cube() {
        let b = Bounds { min: [0.0, 0.0, 0.0], max: [1.0, 1.0, 1.0] };
        let expected = (3.0_f32).sqrt() * 0.5;
        assert!((b.radius() - expected).abs() < 1e-6);
    }

    #[test]
    fn test_mesh_bounds() {
        let mesh = MeshData {
            triangles: vec![Triangle {
                verts: [[0.0, 0.0, 0.0], [2.0, 0.0, 0.0], [0.0, 3.0, -1.0]],
                color: DEFAULT_COLOR,
            }],
        };
        let b = mesh.bounds().unwrap();
        assert_eq!(b.min, [0.0, 0.0, -1.0]);
        assert_eq!(b.max, [2.0, 3.0, 0.0]);
    }

    #[test]
    fn test_unknown_data_has_no_loader() {
        assert!(find_loader(b"\x00\x01\x02\x03", None).is_none());
    }
}
