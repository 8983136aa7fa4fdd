//! Provides the software rasterizer behind the built-in scene host.
//!
//! This module handles format-agnostic rasterization: taking the triangles of
//! every mesh in the scene and converting them to pixels using a perspective
//! orbit camera, flat shading, and a z-buffer. The camera is framed on a
//! caller-supplied bounding box; how far it orbits from that box is the knob
//! that distinguishes the normal and zoom gallery passes.
//!
//! No GPU is required; it runs entirely on the CPU.
//!
//! # Examples
//! ```
//! use modelsheet::render;
//!
//! let pixels = render::render_scene(&[], None, 2.8, 64, 64);
//! assert!(pixels.is_none());
//! ```

use glam::{Mat4, Vec3, Vec4};

use crate::formats::{Bounds, MeshData};

/// Page background of the generated galleries; renders use the same color so
/// thumbnails sit flush on the sheet.
pub const BACKGROUND_RGB: [f32; 3] = [0x22 as f32 / 255.0; 3];

/// Renders every mesh in the scene into an RGBA pixel buffer.
///
/// The camera orbits the `frame` box (falling back to the union of all mesh
/// bounds when `None`) at `distance_factor` times its bounding radius.
/// Returns `None` when there is nothing to render or the framed geometry is
/// degenerate.
///
/// # Examples
/// ```
/// use modelsheet::formats::{MeshData, Triangle};
/// use modelsheet::render;
///
/// let mesh = MeshData {
///     triangles: vec![Triangle {
///         verts: [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
///         color: [1.0, 1.0, 1.0],
///     }],
/// };
/// let pixels = render::render_scene(&[&mesh], None, 2.8, 64, 64);
/// assert_eq!(pixels.unwrap().len(), 64 * 64 * 4);
/// ```
pub fn render_scene(
    meshes: &[&MeshData],
    frame: Option<Bounds>,
    distance_factor: f32,
    width: u32,
    height: u32,
) -> Option<Vec<u8>> {
    let frame = frame.or_else(|| scene_bounds(meshes))?;

    let center = Vec3::from_array(frame.center());
    let radius = frame.radius();
    if radius < 1e-6 {
        return None;
    }

    let view_proj = orbit_camera(center, radius, distance_factor, width as f32 / height as f32);

    // ---- Framebuffer ----
    let w = width as usize;
    let h = height as usize;
    let bg = [BACKGROUND_RGB[0], BACKGROUND_RGB[1], BACKGROUND_RGB[2], 1.0];
    let mut color_buf = vec![bg; w * h];
    let mut depth_buf = vec![f32::INFINITY; w * h];

    // ---- Lighting ----
    let light_dir = Vec3::new(0.5, 0.8, 0.3).normalize();
    let fill_dir = Vec3::new(-0.3, 0.2, -0.5).normalize();

    // ---- Rasterize each triangle of each mesh ----
    for mesh in meshes {
        for tri in &mesh.triangles {
            let mut screen = [Vec3::ZERO; 3];
            let mut visible = true;

            for i in 0..3 {
                let v = Vec3::from_array(tri.verts[i]);
                let clip: Vec4 = view_proj * v.extend(1.0);

                if clip.w <= 0.0 {
                    visible = false;
                    break;
                }

                let inv_w = 1.0 / clip.w;
                screen[i] = Vec3::new(
                    (clip.x * inv_w * 0.5 + 0.5) * width as f32,
                    (0.5 - clip.y * inv_w * 0.5) * height as f32,
                    clip.z * inv_w,
                );
            }

            if !visible {
                continue;
            }

            // Face normal in world space (flat shading)
            let v0 = Vec3::from_array(tri.verts[0]);
            let v1 = Vec3::from_array(tri.verts[1]);
            let v2 = Vec3::from_array(tri.verts[2]);
            let normal = (v1 - v0).cross(v2 - v0).normalize();

            let ndl_main = normal.dot(light_dir).abs();
            let ndl_fill = normal.dot(fill_dir).abs();

            let ambient = 0.15;
            let diffuse = ndl_main * 0.60 + ndl_fill * 0.15;
            let specular = ndl_main.powf(32.0) * 0.10;
            let shade = (ambient + diffuse + specular).min(1.0);

            let shaded = [
                (tri.color[0] * shade).min(1.0),
                (tri.color[1] * shade).min(1.0),
                (tri.color[2] * shade).min(1.0),
            ];

            // Screen-space bounding box
            let min_x = screen[0].x.min(screen[1].x).min(screen[2].x).max(0.0) as usize;
            let max_x = (screen[0].x.max(screen[1].x).max(screen[2].x).ceil() as usize).min(w);
            let min_y = screen[0].y.min(screen[1].y).min(screen[2].y).max(0.0) as usize;
            let max_y = (screen[0].y.max(screen[1].y).max(screen[2].y).ceil() as usize).min(h);

            // Rasterize
            for y in min_y..max_y {
                for x in min_x..max_x {
                    let px = x as f32 + 0.5;
                    let py = y as f32 + 0.5;

                    let (u, v, wb) = barycentric(screen, px, py);

                    if u >= 0.0 && v >= 0.0 && wb >= 0.0 {
                        let z = u * screen[0].z + v * screen[1].z + wb * screen[2].z;
                        let idx = y * w + x;

                        if z < depth_buf[idx] {
                            depth_buf[idx] = z;
                            color_buf[idx] = [shaded[0], shaded[1], shaded[2], 1.0];
                        }
                    }
                }
            }
        }
    }

    // ---- Convert f32 → u8 RGBA ----
    let mut pixels = vec![0u8; w * h * 4];
    for i in 0..w * h {
        pixels[i * 4] = (color_buf[i][0].clamp(0.0, 1.0) * 255.0) as u8;
        pixels[i * 4 + 1] = (color_buf[i][1].clamp(0.0, 1.0) * 255.0) as u8;
        pixels[i * 4 + 2] = (color_buf[i][2].clamp(0.0, 1.0) * 255.0) as u8;
        pixels[i * 4 + 3] = (color_buf[i][3].clamp(0.0, 1.0) * 255.0) as u8;
    }

    Some(pixels)
}

/// Unions the bounds of every mesh in the scene.
pub fn scene_bounds(meshes: &[&MeshData]) -> Option<Bounds> {
    meshes
        .iter()
        .filter_map(|m| m.bounds())
        .reduce(|acc, b| acc.union(&b))
}

/// Builds the combined view-projection matrix for the orbit camera.
///
/// Azimuth is rotated 180° so models face the camera instead of away.
fn orbit_camera(center: Vec3, radius: f32, distance_factor: f32, aspect: f32) -> Mat4 {
    let azimuth: f32 = (35.0 + 180.0_f32).to_radians();
    let elevation: f32 = 25.0_f32.to_radians();
    let dist = radius * distance_factor;

    let eye = Vec3::new(
        center.x + dist * elevation.cos() * azimuth.sin(),
        center.y + dist * elevation.sin(),
        center.z + dist * elevation.cos() * azimuth.cos(),
    );

    let view = Mat4::look_at_rh(eye, center, Vec3::Y);
    let near = radius * 0.01;
    let far = radius * 100.0;
    let proj = Mat4::perspective_rh_gl(45.0_f32.to_radians(), aspect, near, far);
    proj * view
}

// ===========================================================================
// Rasterization helpers
// ===========================================================================

fn barycentric(tri: [Vec3; 3], px: f32, py: f32) -> (f32, f32, f32) {
    let v0x = tri[1].x - tri[0].x;
    let v0y = tri[1].y - tri[0].y;
    let v1x = tri[2].x - tri[0].x;
    let v1y = tri[2].y - tri[0].y;
    let v2x = px - tri[0].x;
    let v2y = py - tri[0].y;

    let d00 = v0x * v0x + v0y * v0y;
    let d01 = v0x * v1x + v0y * v1y;
    let d11 = v1x * v1x + v1y * v1y;
    let d20 = v2x * v0x + v2y * v0y;
    let d21 = v2x * v1x + v2y * v1y;

    let denom = d00 * d11 - d01 * d01;
    if denom.abs() < 1e-10 {
        return (-1.0, -1.0, -1.0);
    }

    let inv = 1.0 / denom;
    let v = (d11 * d20 - d01 * d21) * inv;
    let w = (d00 * d21 - d01 * d20) * inv;
    let u = 1.0 - v - w;

    (u, v, w)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::{Triangle, DEFAULT_COLOR};

    fn tetrahedron() -> MeshData {
        let p = [
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.5, 1.0, 0.0],
            [0.5, 0.5, 1.0],
        ];
        let faces = [[0, 1, 2], [0, 1, 3], [1, 2, 3], [0, 2, 3]];
        MeshData {
            triangles: faces
                .iter()
                .map(|f| Triangle {
                    verts: [p[f[0]], p[f[1]], p[f[2]]],
                    color: DEFAULT_COLOR,
                })
                .collect(),
        }
    }

    fn background_pixel() -> [u8; 4] {
        let c = (BACKGROUND_RGB[0].clamp(0.0, 1.0) * 255.0) as u8;
        [c, c, c, 0xFF]
    }

    #[test]
    fn test_empty_scene_renders_nothing() {
        assert!(render_scene(&[], None, 2.8, 64, 64).is_none());
    }

    #[test]
    fn test_degenerate_bounds_renders_nothing() {
        let point = MeshData {
            triangles: vec![Triangle {
                verts: [[1.0; 3], [1.0; 3], [1.0; 3]],
                color: DEFAULT_COLOR,
            }],
        };
        assert!(render_scene(&[&point], None, 2.8, 64, 64).is_none());
    }

    #[test]
    fn test_output_dimensions() {
        let mesh = tetrahedron();
        let pixels = render_scene(&[&mesh], None, 2.8, 96, 64).unwrap();
        assert_eq!(pixels.len(), 96 * 64 * 4);
    }

    #[test]
    fn test_mesh_covers_some_pixels() {
        let mesh = tetrahedron();
        let pixels = render_scene(&[&mesh], None, 2.8, 64, 64).unwrap();
        let bg = background_pixel();
        let foreground = pixels.chunks(4).filter(|px| *px != bg.as_slice()).count();
        assert!(foreground > 0, "expected at least one shaded pixel");
    }

    #[test]
    fn test_zoom_pass_covers_more_pixels() {
        let mesh = tetrahedron();
        let bg = background_pixel();
        let coverage = |factor: f32| {
            render_scene(&[&mesh], None, factor, 64, 64)
                .unwrap()
                .chunks(4)
                .filter(|px| *px != bg.as_slice())
                .count()
        };
        assert!(coverage(1.6) > coverage(2.8));
    }

    #[test]
    fn test_background_matches_page_color() {
        let mesh = tetrahedron();
        let pixels = render_scene(&[&mesh], None, 2.8, 64, 64).unwrap();
        // Corner pixel is off-model for this geometry
        assert_eq!(&pixels[0..4], background_pixel().as_slice());
    }
}
