//! Provides the driver loop tying hosts, passes, and galleries together.
//!
//! For each input model the driver clears the scene, loads the model, aims
//! the camera at it, then takes every configured render pass and appends a
//! cell to that pass's gallery sheet. The clear-before-load discipline is the
//! one real invariant: the scene holds at most one user model whenever a
//! render is taken.
//!
//! There is no retry or partial-failure handling. The first error aborts the
//! run and propagates to the caller; gallery file handles are released on
//! drop either way.

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::gallery::GalleryWriter;
use crate::host::{HostError, RenderPass, SceneHost};

/// Title of the generated sheets.
const GALLERY_TITLE: &str = "some model files";

/// What a completed run produced.
#[derive(Debug)]
pub struct RunSummary {
    /// Number of models rendered.
    pub models_rendered: usize,
    /// Paths of the written gallery documents, one per pass.
    pub galleries: Vec<PathBuf>,
}

/// Errors that abort a run.
#[derive(Debug)]
pub enum RunError {
    /// A scene host operation failed.
    Host(HostError),
    /// Writing a gallery document failed.
    Gallery(io::Error),
}

impl std::fmt::Display for RunError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunError::Host(e) => write!(f, "host error: {}", e),
            RunError::Gallery(e) => write!(f, "gallery write failed: {}", e),
        }
    }
}

impl std::error::Error for RunError {}

impl From<HostError> for RunError {
    fn from(e: HostError) -> Self {
        RunError::Host(e)
    }
}

/// Runs the batch in the current working directory.
///
/// # Errors
/// Returns the first host or gallery error; nothing is retried.
pub fn run<H: SceneHost>(config: &Config, host: &mut H) -> Result<RunSummary, RunError> {
    run_in_dir(config, host, Path::new("."))
}

/// Runs the batch, writing gallery documents into `gallery_dir`.
///
/// Thumbnails are always written next to their model files; only the sheets
/// land in `gallery_dir`.
///
/// # Errors
/// Returns the first host or gallery error; nothing is retried.
pub fn run_in_dir<H: SceneHost>(
    config: &Config,
    host: &mut H,
    gallery_dir: &Path,
) -> Result<RunSummary, RunError> {
    let camera = host.camera();

    let mut sheets = Vec::with_capacity(config.passes.len());
    for pass in &config.passes {
        let path = gallery_dir.join(&pass.gallery_file);
        let file = File::create(&path).map_err(RunError::Gallery)?;
        let sheet = GalleryWriter::new(BufWriter::new(file), GALLERY_TITLE, config.row_width)
            .map_err(RunError::Gallery)?;
        sheets.push((pass, sheet, path));
    }

    for model in &config.models {
        log::info!("loading {}", model.display());

        host.clear_models()?;
        let handle = host.load_model(model)?;
        host.aim_camera(camera, handle)?;

        for (pass, sheet, _) in sheets.iter_mut() {
            let pass: &RenderPass = *pass;
            let image = pass_image_path(model, pass);
            host.render_to_file(pass, &image)?;
            sheet
                .push_entry(&image.to_string_lossy(), &model.to_string_lossy())
                .map_err(RunError::Gallery)?;
        }
    }

    let mut galleries = Vec::with_capacity(sheets.len());
    for (_, sheet, path) in sheets {
        sheet.finish().map_err(RunError::Gallery)?;
        log::info!("wrote {}", path.display());
        galleries.push(path);
    }

    Ok(RunSummary {
        models_rendered: config.models.len(),
        galleries,
    })
}

/// Appends the pass suffix and `.png` to the model path, keeping the image
/// next to its source (`widget.stl` becomes `widget.stl_zoom.png` for the
/// zoom pass).
pub fn pass_image_path(model: &Path, pass: &RenderPass) -> PathBuf {
    let mut name = model.as_os_str().to_os_string();
    name.push(&pass.image_suffix);
    name.push(".png");
    PathBuf::from(name)
}
