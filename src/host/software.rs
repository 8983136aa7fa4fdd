//! Provides the built-in software scene host.
//!
//! `SoftwareHost` stands in for the external content-creation application:
//! it keeps loaded meshes in memory, remembers what the camera is aimed at,
//! and renders through the crate's CPU rasterizer. Loaded models accumulate
//! until cleared, so a driver that skips the clear step gets exactly what the
//! original host gave it: every stale mesh in the frame.

use std::path::Path;

use image::{ImageBuffer, Rgba};

use crate::formats::{self, MeshData};
use crate::render;

use super::{CameraHandle, HostError, ModelHandle, RenderPass, SceneHost};

/// A self-contained scene host backed by the software rasterizer.
///
/// # Examples
/// ```
/// use modelsheet::host::{SceneHost, software::SoftwareHost};
///
/// let host = SoftwareHost::new(256);
/// assert!(host.loaded_models().is_empty());
/// ```
pub struct SoftwareHost {
    size: u32,
    next_id: u64,
    scene: Vec<(ModelHandle, MeshData)>,
    camera: CameraHandle,
    target: Option<ModelHandle>,
}

impl SoftwareHost {
    /// Creates a host rendering square images of `size` pixels.
    pub fn new(size: u32) -> Self {
        SoftwareHost {
            size,
            next_id: 1,
            scene: Vec::new(),
            camera: CameraHandle(0),
            target: None,
        }
    }
}

impl SceneHost for SoftwareHost {
    fn clear_models(&mut self) -> Result<(), HostError> {
        self.scene.clear();
        self.target = None;
        Ok(())
    }

    fn load_model(&mut self, path: &Path) -> Result<ModelHandle, HostError> {
        let mesh = formats::load_model_from_path(path)?;
        let handle = ModelHandle(self.next_id);
        self.next_id += 1;
        log::debug!(
            "scene: loaded {} ({} triangles) as handle {}",
            path.display(),
            mesh.triangles.len(),
            handle.0
        );
        self.scene.push((handle, mesh));
        Ok(handle)
    }

    fn loaded_models(&self) -> Vec<ModelHandle> {
        self.scene.iter().map(|(h, _)| *h).collect()
    }

    fn camera(&self) -> CameraHandle {
        self.camera
    }

    fn aim_camera(&mut self, camera: CameraHandle, target: ModelHandle) -> Result<(), HostError> {
        if camera != self.camera {
            return Err(HostError::UnknownCamera(camera));
        }
        if !self.scene.iter().any(|(h, _)| *h == target) {
            return Err(HostError::UnknownModel(target));
        }
        self.target = Some(target);
        Ok(())
    }

    fn render_to_file(&mut self, pass: &RenderPass, output: &Path) -> Result<(), HostError> {
        let target = self.target.ok_or(HostError::NoCameraTarget)?;
        let frame = self
            .scene
            .iter()
            .find(|(h, _)| *h == target)
            .and_then(|(_, mesh)| mesh.bounds())
            .ok_or(HostError::UnknownModel(target))?;

        let meshes: Vec<&MeshData> = self.scene.iter().map(|(_, m)| m).collect();
        let pixels = render::render_scene(&meshes, Some(frame), pass.distance_factor, self.size, self.size)
            .ok_or(HostError::NothingVisible)?;

        let img: ImageBuffer<Rgba<u8>, _> = ImageBuffer::from_raw(self.size, self.size, pixels)
            .ok_or(HostError::NothingVisible)?;
        img.save(output)?;

        log::debug!("scene: wrote {} pass to {}", pass.name, output.display());
        Ok(())
    }
}
