//! Provides an STL (stereolithography) format loader.
//!
//! STL is the common interchange format for 3D printing. Both encodings are
//! handled: binary (80-byte header, little-endian triangle count, 50-byte
//! facet records) and ASCII (`solid`/`facet normal`/`vertex` grammar). Facet
//! normals stored in the file are ignored; the rasterizer recomputes face
//! normals from vertex winding.

use super::{FormatLoader, LoadError, LoadResult, MeshData, Triangle, DEFAULT_COLOR};

/// Byte length of the binary header.
const BINARY_HEADER_LEN: usize = 80;
/// Byte length of one binary facet record: normal + 3 vertices + attribute word.
const BINARY_RECORD_LEN: usize = 50;

pub struct StlLoader;

impl FormatLoader for StlLoader {
    fn name(&self) -> &'static str {
        "STL"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["stl"]
    }

    fn can_load(&self, data: &[u8], extension: Option<&str>) -> bool {
        if let Some(ext) = extension {
            if ext.to_lowercase() == "stl" {
                return true;
            }
        }

        looks_like_ascii(data) || binary_triangle_count(data).is_some()
    }

    fn load_from_bytes(&self, data: &[u8]) -> LoadResult {
        // Binary exporters sometimes write headers starting with "solid", so
        // the ASCII check requires facet syntax, not just the keyword.
        if looks_like_ascii(data) {
            parse_ascii(data)
        } else {
            parse_binary(data)
        }
    }
}

/// Checks for ASCII STL: leading `solid` keyword plus facet syntax near the top.
fn looks_like_ascii(data: &[u8]) -> bool {
    let text = match std::str::from_utf8(&data[..data.len().min(1024)]) {
        Ok(t) => t,
        Err(_) => return false,
    };
    let trimmed = text.trim_start();
    trimmed.starts_with("solid") && (text.contains("facet") || !text.contains('\0'))
}

/// Returns the facet count a well-formed binary file of this size would carry.
fn binary_triangle_count(data: &[u8]) -> Option<u32> {
    if data.len() < BINARY_HEADER_LEN + 4 {
        return None;
    }
    let count = u32::from_le_bytes([data[80], data[81], data[82], data[83]]);
    let expected = BINARY_HEADER_LEN + 4 + count as usize * BINARY_RECORD_LEN;
    if data.len() >= expected {
        Some(count)
    } else {
        None
    }
}

fn read_f32(data: &[u8], offset: usize) -> f32 {
    f32::from_le_bytes([data[offset], data[offset + 1], data[offset + 2], data[offset + 3]])
}

fn parse_binary(data: &[u8]) -> LoadResult {
    let count = binary_triangle_count(data).ok_or_else(|| {
        LoadError::InvalidData(format!(
            "binary STL truncated: {} bytes is too short for its facet count",
            data.len()
        ))
    })?;

    let mut triangles = Vec::with_capacity(count as usize);
    let mut offset = BINARY_HEADER_LEN + 4;

    for _ in 0..count {
        // 12 bytes of stored normal are skipped
        let mut verts = [[0.0_f32; 3]; 3];
        for (i, v) in verts.iter_mut().enumerate() {
            let base = offset + 12 + i * 12;
            *v = [read_f32(data, base), read_f32(data, base + 4), read_f32(data, base + 8)];
        }
        triangles.push(Triangle { verts, color: DEFAULT_COLOR });
        offset += BINARY_RECORD_LEN;
    }

    if triangles.is_empty() {
        return Err(LoadError::NoGeometry);
    }

    Ok(MeshData { triangles })
}

fn parse_ascii(data: &[u8]) -> LoadResult {
    let text = std::str::from_utf8(data)
        .map_err(|_| LoadError::InvalidData("ASCII STL is not valid UTF-8".into()))?;

    let mut triangles = Vec::new();
    let mut pending: Vec<[f32; 3]> = Vec::with_capacity(3);

    for (line_no, line) in text.lines().enumerate() {
        let mut words = line.split_whitespace();
        match words.next() {
            Some("vertex") => {
                let mut v = [0.0_f32; 3];
                for coord in &mut v {
                    *coord = words
                        .next()
                        .and_then(|w| w.parse().ok())
                        .ok_or_else(|| {
                            LoadError::InvalidData(format!(
                                "bad vertex on line {}",
                                line_no + 1
                            ))
                        })?;
                }
                pending.push(v);
            }
            Some("endfacet") => {
                if pending.len() != 3 {
                    return Err(LoadError::InvalidData(format!(
                        "facet ending on line {} has {} vertices",
                        line_no + 1,
                        pending.len()
                    )));
                }
                triangles.push(Triangle {
                    verts: [pending[0], pending[1], pending[2]],
                    color: DEFAULT_COLOR,
                });
                pending.clear();
            }
            // solid/endsolid/facet/outer/endloop carry no geometry
            _ => {}
        }
    }

    if triangles.is_empty() {
        return Err(LoadError::NoGeometry);
    }

    Ok(MeshData { triangles })
}
