// src/ui/images.rs
//! Catalog pictures uploaded as ImGui textures
//!
//! Every image is decoded and uploaded once, when the window opens. Images
//! that fail to load are logged and left out; the inventory then shows only
//! the description.

use std::collections::HashMap;

use imgui::TextureId;
use imgui_wgpu::{Renderer, Texture, TextureConfig};
use log::{debug, error};
use wgpu::{Device, Extent3d, Queue, TextureFormat};

use crate::error::{Result, RoomError};

/// One uploaded picture
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UiImage {
    pub texture_id: TextureId,
    /// Source size in pixels
    pub size: [f32; 2],
}

impl UiImage {
    /// Size that fits `max_width` while keeping the aspect ratio; never upscales
    pub fn fit_width(&self, max_width: f32) -> [f32; 2] {
        fit_width(self.size, max_width)
    }
}

/// Uploaded pictures keyed by catalog image path
#[derive(Debug, Default)]
pub struct UiImages {
    images: HashMap<String, UiImage>,
}

impl UiImages {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, path: &str) -> Option<&UiImage> {
        self.images.get(path)
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Decodes and uploads every path not loaded yet
    ///
    /// # Arguments
    /// * `device` - WGPU device for texture creation
    /// * `queue` - WGPU queue for the pixel upload
    /// * `renderer` - ImGui renderer that owns the texture registry
    /// * `paths` - Image files to load; duplicates are uploaded once
    ///
    /// # Returns
    /// Number of images newly uploaded. Failures are logged and skipped.
    pub fn load_all<'a>(
        &mut self,
        device: &Device,
        queue: &Queue,
        renderer: &mut Renderer,
        paths: impl IntoIterator<Item = &'a str>,
    ) -> usize {
        let mut loaded = 0;
        for path in paths {
            if self.images.contains_key(path) {
                continue;
            }
            match load_rgba(path) {
                Ok(rgba) => {
                    let image = upload(device, queue, renderer, path, &rgba);
                    debug!("Uploaded '{path}' ({}x{})", rgba.width(), rgba.height());
                    self.images.insert(path.to_string(), image);
                    loaded += 1;
                }
                Err(e) => error!("{e}"),
            }
        }
        loaded
    }
}

/// Reads an image file into 8-bit RGBA pixels
pub fn load_rgba(path: &str) -> Result<image::RgbaImage> {
    image::open(path)
        .map(|decoded| decoded.to_rgba8())
        .map_err(|source| RoomError::ImageLoad {
            path: path.to_string(),
            source,
        })
}

fn upload(
    device: &Device,
    queue: &Queue,
    renderer: &mut Renderer,
    label: &str,
    rgba: &image::RgbaImage,
) -> UiImage {
    let (width, height) = rgba.dimensions();
    let texture = Texture::new(
        device,
        renderer,
        TextureConfig {
            size: Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            label: Some(label),
            format: Some(TextureFormat::Rgba8Unorm),
            ..Default::default()
        },
    );
    texture.write(queue, rgba.as_raw(), width, height);

    UiImage {
        texture_id: renderer.textures.insert(texture),
        size: [width as f32, height as f32],
    }
}

fn fit_width(size: [f32; 2], max_width: f32) -> [f32; 2] {
    let [width, height] = size;
    if width <= max_width || width <= 0.0 {
        return size;
    }
    let scale = max_width / width;
    [max_width, height * scale]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("roomwalk-{}-{name}", std::process::id()))
    }

    #[test]
    fn test_decodes_png_to_rgba() {
        let path = temp_path("swatch.png");
        let mut swatch = image::RgbaImage::new(3, 2);
        swatch.put_pixel(0, 0, image::Rgba([255, 0, 0, 255]));
        swatch.save(&path).unwrap();

        let rgba = load_rgba(path.to_str().unwrap()).unwrap();
        assert_eq!(rgba.dimensions(), (3, 2));
        assert_eq!(rgba.get_pixel(0, 0), &image::Rgba([255, 0, 0, 255]));

        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_missing_file_reports_path() {
        let path = temp_path("missing.png");
        let err = load_rgba(path.to_str().unwrap()).unwrap_err();
        assert!(matches!(err, RoomError::ImageLoad { .. }));
        assert!(err.to_string().contains("missing.png"));
    }

    #[test]
    fn test_fit_width_keeps_aspect_and_never_upscales() {
        assert_eq!(fit_width([200.0, 100.0], 100.0), [100.0, 50.0]);
        assert_eq!(fit_width([64.0, 32.0], 100.0), [64.0, 32.0]);
    }
}
