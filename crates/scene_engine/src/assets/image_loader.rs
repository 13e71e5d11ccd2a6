//! Image loading utilities for texture data
//!
//! Decodes PNG and JPEG files into 8-bit pixel buffers that keep the file's
//! native channel count, so the texture registry can decide what it accepts.

use std::path::Path;

use image::DynamicImage;

use crate::assets::AssetError;

/// Decoded image data ready for GPU upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    /// Raw 8-bit pixel data, `channels` bytes per pixel, rows top to bottom
    pub data: Vec<u8>,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Number of color channels (1 = gray, 2 = gray+alpha, 3 = RGB, 4 = RGBA)
    pub channels: u8,
}

impl ImageData {
    /// Load an image from a file path
    ///
    /// With `flip_vertically` the first row of `data` is the bottom row of
    /// the file, matching a bottom-left texture coordinate origin.
    pub fn from_file<P: AsRef<Path>>(path: P, flip_vertically: bool) -> Result<Self, AssetError> {
        let path_ref = path.as_ref();

        log::debug!("Loading image from: {:?}", path_ref);

        let img = image::open(path_ref)
            .map_err(|e| AssetError::LoadFailed(format!("{}: {}", path_ref.display(), e)))?;

        Ok(Self::from_dynamic(img, flip_vertically))
    }

    /// Load image from memory (useful for embedded resources)
    pub fn from_bytes(bytes: &[u8], flip_vertically: bool) -> Result<Self, AssetError> {
        let img = image::load_from_memory(bytes).map_err(|e| {
            AssetError::LoadFailed(format!("Failed to load image from bytes: {}", e))
        })?;

        Ok(Self::from_dynamic(img, flip_vertically))
    }

    /// Wrap already-decoded pixels, checking the buffer length
    pub fn from_raw(
        data: Vec<u8>,
        width: u32,
        height: u32,
        channels: u8,
    ) -> Result<Self, AssetError> {
        let expected = pixel_count(width, height) * channels as usize;
        if data.len() != expected {
            return Err(AssetError::InvalidData(format!(
                "{}x{}x{} needs {} bytes, got {}",
                width,
                height,
                channels,
                expected,
                data.len()
            )));
        }

        Ok(Self {
            data,
            width,
            height,
            channels,
        })
    }

    /// Create a solid color RGBA image (useful for testing and defaults)
    pub fn solid_color(width: u32, height: u32, color: [u8; 4]) -> Self {
        let pixels = pixel_count(width, height);
        let mut data = Vec::with_capacity(pixels * 4);

        for _ in 0..pixels {
            data.extend_from_slice(&color);
        }

        Self {
            data,
            width,
            height,
            channels: 4,
        }
    }

    /// Get the size of the image data in bytes
    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }

    /// Check if image dimensions are power of two (useful for mipmaps)
    pub fn is_power_of_two(&self) -> bool {
        self.width.is_power_of_two() && self.height.is_power_of_two()
    }

    /// Number of mip levels a full chain down to 1x1 needs
    pub fn mip_level_count(&self) -> u32 {
        32 - self.width.max(self.height).max(1).leading_zeros()
    }

    fn from_dynamic(img: DynamicImage, flip_vertically: bool) -> Self {
        let img = if flip_vertically { img.flipv() } else { img };
        let channels = img.color().channel_count();
        let (width, height) = (img.width(), img.height());

        // Higher bit depths are narrowed to 8 bits, keeping the channel layout.
        let data = match channels {
            1 => img.to_luma8().into_raw(),
            2 => img.to_luma_alpha8().into_raw(),
            3 => img.to_rgb8().into_raw(),
            _ => img.to_rgba8().into_raw(),
        };

        log::info!(
            "Loaded image {}x{} with {} channel(s), flipped: {}",
            width,
            height,
            channels,
            flip_vertically
        );

        Self {
            data,
            width,
            height,
            channels: channels.min(4),
        }
    }
}

/// Pixel count computed in `usize`, so large dimensions do not wrap in `u32`
fn pixel_count(width: u32, height: u32) -> usize {
    width as usize * height as usize
}
