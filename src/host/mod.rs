//! Provides the scene host interface the driver loop renders through.
//!
//! The original workflow ran inside a content-creation application that owned
//! the scene graph, camera, and renderer; the automation layer only sequenced
//! calls against it. This module captures that boundary as the [`SceneHost`]
//! trait: clear the scene, load a model, aim the camera, render to a file.
//! Handles are typed values handed out by the host, replacing the original's
//! fragile name-prefix scans over scene objects.
//!
//! [`software::SoftwareHost`] is the built-in implementation backed by the
//! crate's own rasterizer, so the tool runs without any external application.
//!
//! # Examples
//! ```
//! use modelsheet::host::RenderPass;
//!
//! let passes = RenderPass::default_passes();
//! assert_eq!(passes.len(), 2);
//! ```

pub mod software;

use std::path::Path;

use crate::formats::LoadError;

/// Identifies a model loaded into the host scene.
///
/// # Examples
/// ```
/// use modelsheet::host::ModelHandle;
///
/// let h = ModelHandle(7);
/// assert_eq!(h, ModelHandle(7));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ModelHandle(pub u64);

/// Identifies a camera owned by the host scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CameraHandle(pub u64);

/// Describes one render pass over each model: the camera distance it renders
/// at, the suffix its image files carry, and the gallery sheet it feeds.
///
/// # Examples
/// ```
/// use modelsheet::host::RenderPass;
///
/// let normal = &RenderPass::default_passes()[0];
/// assert_eq!(normal.gallery_file, "stl.html");
/// assert_eq!(normal.image_suffix, "");
/// ```
#[derive(Clone, Debug)]
pub struct RenderPass {
    /// Short name used in logs.
    pub name: String,
    /// Suffix appended to the model path before `.png` (for example `_zoom`).
    pub image_suffix: String,
    /// File name of the gallery sheet this pass feeds.
    pub gallery_file: String,
    /// Camera distance as a multiple of the framed model's bounding radius.
    pub distance_factor: f32,
}

impl RenderPass {
    /// Returns the two historical passes: a full view and a close-up.
    pub fn default_passes() -> Vec<RenderPass> {
        vec![
            RenderPass {
                name: "normal".into(),
                image_suffix: String::new(),
                gallery_file: "stl.html".into(),
                distance_factor: 2.8,
            },
            RenderPass {
                name: "zoom".into(),
                image_suffix: "_zoom".into(),
                gallery_file: "stl_zoom.html".into(),
                distance_factor: 1.6,
            },
        ]
    }
}

/// Errors reported by scene host operations.
#[derive(Debug)]
pub enum HostError {
    /// The model file could not be loaded.
    Load(LoadError),
    /// The handle does not name a model currently in the scene.
    UnknownModel(ModelHandle),
    /// The handle does not name a camera owned by the scene.
    UnknownCamera(CameraHandle),
    /// A render was requested before the camera was aimed at a model.
    NoCameraTarget,
    /// The scene rendered to nothing (empty or degenerate geometry).
    NothingVisible,
    /// Writing the rendered image failed.
    Io(std::io::Error),
    /// Encoding the rendered image failed.
    Image(image::ImageError),
}

impl std::fmt::Display for HostError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HostError::Load(e) => write!(f, "model load failed: {}", e),
            HostError::UnknownModel(h) => write!(f, "no model with handle {} in scene", h.0),
            HostError::UnknownCamera(h) => write!(f, "no camera with handle {} in scene", h.0),
            HostError::NoCameraTarget => write!(f, "camera has no target; aim it before rendering"),
            HostError::NothingVisible => write!(f, "scene rendered to nothing"),
            HostError::Io(e) => write!(f, "image write failed: {}", e),
            HostError::Image(e) => write!(f, "image encode failed: {}", e),
        }
    }
}

impl std::error::Error for HostError {}

impl From<LoadError> for HostError {
    fn from(e: LoadError) -> Self {
        HostError::Load(e)
    }
}

impl From<std::io::Error> for HostError {
    fn from(e: std::io::Error) -> Self {
        HostError::Io(e)
    }
}

impl From<image::ImageError> for HostError {
    fn from(e: image::ImageError) -> Self {
        HostError::Image(e)
    }
}

/// The scene host interface: an injected session rather than ambient global
/// state.
///
/// All operations are synchronous and blocking. The scene is expected to hold
/// at most one user model when a render is taken; callers enforce this by
/// clearing before every load. Hosts are free to accept multiple loaded
/// models, in which case renders show all of them.
pub trait SceneHost {
    /// Unlinks every user model from the scene.
    fn clear_models(&mut self) -> Result<(), HostError>;

    /// Loads a model file into the scene and returns its handle.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    fn load_model(&mut self, path: &Path) -> Result<ModelHandle, HostError>;

    /// Returns handles for every model currently in the scene.
    fn loaded_models(&self) -> Vec<ModelHandle>;

    /// Returns the handle of the scene camera.
    fn camera(&self) -> CameraHandle;

    /// Constrains the camera to track the given model.
    ///
    /// # Errors
    /// Returns an error if either handle is not part of the scene.
    fn aim_camera(&mut self, camera: CameraHandle, target: ModelHandle) -> Result<(), HostError>;

    /// Renders the current scene through the given pass and writes a PNG.
    ///
    /// # Errors
    /// Returns an error if the camera is not aimed, nothing is visible, or
    /// the image cannot be written.
    fn render_to_file(&mut self, pass: &RenderPass, output: &Path) -> Result<(), HostError>;
}
