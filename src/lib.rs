//! Provides batch thumbnail rendering of 3D model files into HTML contact
//! sheets.
//!
//! Given a list of model files (STL, Wavefront OBJ), the driver renders each
//! one to PNG thumbnails (a full view and a close-up) and writes gallery
//! pages linking every thumbnail back to its source file. Rendering happens
//! through the [`host::SceneHost`] interface; the bundled
//! [`host::software::SoftwareHost`] rasterizes on the CPU so no external
//! application is needed.
//!
//! # Usage
//! ```text
//! RENDER_MODELS="$(echo prints/*.stl)" modelsheet-cli
//! ```
//!
//! # Examples
//! ```no_run
//! use modelsheet::config::Config;
//! use modelsheet::host::software::SoftwareHost;
//! use modelsheet::runner;
//!
//! let config = Config::from_env().expect("RENDER_MODELS not set");
//! let mut host = SoftwareHost::new(config.thumb_size);
//! let summary = runner::run(&config, &mut host).unwrap();
//! println!("rendered {} models", summary.models_rendered);
//! ```

pub mod config;
pub mod formats;
pub mod gallery;
pub mod host;
pub mod render;
pub mod runner;
