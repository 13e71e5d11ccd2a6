//! Texture registry
//!
//! Decodes image files, uploads them through a [`TextureBackend`] and keeps
//! the resulting GPU handles in a fixed table of [`MAX_TEXTURE_SLOTS`] slots.
//! Slot *i* is bound to texture unit *i*, so the slot index is also the
//! sampler value pushed to the shader.

use std::path::Path;

use thiserror::Error;

use crate::assets::{AssetError, ImageData};
use crate::render::backend::{BackendError, TextureBackend, TextureHandle, TextureParams};

/// Number of texture units the scene shader samples from
pub const MAX_TEXTURE_SLOTS: usize = 16;

/// Sampler value pushed when a texture tag is unknown
pub const NO_TEXTURE_SLOT: i32 = -1;

/// A populated texture slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureSlot {
    /// Name the scene refers to the texture by
    pub tag: String,
    /// Backend handle of the uploaded texture
    pub handle: TextureHandle,
}

/// Texture registration errors
#[derive(Error, Debug)]
pub enum TextureError {
    /// All slots are populated
    #[error("Texture table full ({capacity} slots), cannot register '{tag}'")]
    CapacityExceeded {
        /// Rejected tag
        tag: String,
        /// Table capacity
        capacity: usize,
    },

    /// Another slot already uses this tag
    #[error("Texture tag '{0}' is already registered")]
    DuplicateTag(String),

    /// The image could not be decoded
    #[error("Texture decode failed: {0}")]
    Decode(#[from] AssetError),

    /// Only RGB and RGBA images can be uploaded
    #[error("Texture '{tag}' has {channels} channel(s); only 3 or 4 are supported")]
    UnsupportedChannels {
        /// Rejected tag
        tag: String,
        /// Channel count of the decoded image
        channels: u8,
    },

    /// The backend refused an operation
    #[error(transparent)]
    Backend(#[from] BackendError),

    /// The table's GPU resources were already released
    #[error("Texture registry already released")]
    Released,
}

/// Fixed-capacity table of uploaded textures
#[derive(Debug)]
pub struct TextureRegistry {
    slots: [Option<TextureSlot>; MAX_TEXTURE_SLOTS],
    count: usize,
    params: TextureParams,
    flip_vertically: bool,
    released: bool,
}

impl Default for TextureRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TextureRegistry {
    /// Create an empty registry with repeat wrapping, linear filtering and mipmaps
    pub fn new() -> Self {
        Self::with_params(TextureParams::default(), true)
    }

    /// Create an empty registry with explicit upload parameters
    pub fn with_params(params: TextureParams, flip_vertically: bool) -> Self {
        Self {
            slots: Default::default(),
            count: 0,
            params,
            flip_vertically,
            released: false,
        }
    }

    /// Decode `path` and register it under `tag`
    ///
    /// Returns the slot index. On failure the error is logged and the table
    /// is left untouched.
    pub fn register<B, P>(
        &mut self,
        backend: &mut B,
        path: P,
        tag: &str,
    ) -> Result<usize, TextureError>
    where
        B: TextureBackend + ?Sized,
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let result = self
            .check_insertable(tag)
            .and_then(|()| {
                ImageData::from_file(path, self.flip_vertically).map_err(TextureError::from)
            })
            .and_then(|image| self.insert(backend, &image, tag));

        match &result {
            Ok(slot) => {
                log::info!("Loaded texture '{}' from {} into slot {}", tag, path.display(), slot);
            }
            Err(e) => log::warn!("Could not load texture '{}' from {}: {}", tag, path.display(), e),
        }

        result
    }

    /// Register already-decoded pixels under `tag`
    pub fn register_image<B>(
        &mut self,
        backend: &mut B,
        image: &ImageData,
        tag: &str,
    ) -> Result<usize, TextureError>
    where
        B: TextureBackend + ?Sized,
    {
        let result = self
            .check_insertable(tag)
            .and_then(|()| self.insert(backend, image, tag));

        if let Err(e) = &result {
            log::warn!("Could not register texture '{}': {}", tag, e);
        }

        result
    }

    /// Bind every populated slot to the texture unit of the same index
    ///
    /// Call once after all registrations and before rendering.
    pub fn bind_all<B>(&self, backend: &mut B) -> Result<usize, TextureError>
    where
        B: TextureBackend + ?Sized,
    {
        if self.released {
            return Err(TextureError::Released);
        }

        for (unit, slot) in (0u32..).zip(self.iter()) {
            backend.bind_texture_unit(unit, slot.handle)?;
            log::debug!("Bound texture '{}' ({:?}) to unit {}", slot.tag, slot.handle, unit);
        }

        Ok(self.count)
    }

    /// Slot index of the first texture registered under `tag`
    pub fn find_slot(&self, tag: &str) -> Option<usize> {
        self.iter().position(|slot| slot.tag == tag)
    }

    /// Handle of the first texture registered under `tag`
    pub fn find_handle(&self, tag: &str) -> Option<TextureHandle> {
        self.iter().find(|slot| slot.tag == tag).map(|slot| slot.handle)
    }

    /// Sampler value for `tag`, [`NO_TEXTURE_SLOT`] when absent
    pub fn shader_slot(&self, tag: &str) -> i32 {
        self.find_slot(tag)
            .and_then(|slot| i32::try_from(slot).ok())
            .unwrap_or(NO_TEXTURE_SLOT)
    }

    /// Release the GPU texture of every populated slot
    ///
    /// Entries stay in the table, so lookups keep returning the pre-release
    /// handles. A second call does nothing. Every slot is attempted even if
    /// one release fails; the first failure is returned.
    pub fn release_all<B>(&mut self, backend: &mut B) -> Result<usize, TextureError>
    where
        B: TextureBackend + ?Sized,
    {
        if self.released {
            log::debug!("Texture registry already released");
            return Ok(0);
        }
        self.released = true;

        let mut first_error = None;
        for slot in self.slots.iter().flatten() {
            if let Err(e) = backend.release_texture(slot.handle) {
                log::warn!("Failed to release texture '{}': {}", slot.tag, e);
                first_error.get_or_insert(e);
            }
        }

        log::debug!("Released {} texture(s)", self.count);

        match first_error {
            Some(e) => Err(e.into()),
            None => Ok(self.count),
        }
    }

    /// Populated slots in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &TextureSlot> {
        self.slots[..self.count].iter().flatten()
    }

    /// Number of populated slots
    pub const fn len(&self) -> usize {
        self.count
    }

    /// True when no texture is registered
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Total number of slots
    pub const fn capacity(&self) -> usize {
        MAX_TEXTURE_SLOTS
    }

    /// True once [`release_all`](Self::release_all) has run
    pub const fn is_released(&self) -> bool {
        self.released
    }

    fn check_insertable(&self, tag: &str) -> Result<(), TextureError> {
        if self.released {
            return Err(TextureError::Released);
        }
        if self.count >= MAX_TEXTURE_SLOTS {
            return Err(TextureError::CapacityExceeded {
                tag: tag.to_string(),
                capacity: MAX_TEXTURE_SLOTS,
            });
        }
        if self.find_slot(tag).is_some() {
            return Err(TextureError::DuplicateTag(tag.to_string()));
        }
        Ok(())
    }

    fn insert<B>(
        &mut self,
        backend: &mut B,
        image: &ImageData,
        tag: &str,
    ) -> Result<usize, TextureError>
    where
        B: TextureBackend + ?Sized,
    {
        if !matches!(image.channels, 3 | 4) {
            return Err(TextureError::UnsupportedChannels {
                tag: tag.to_string(),
                channels: image.channels,
            });
        }

        let handle = backend.create_texture_2d(image, &self.params)?;

        let slot = self.count;
        self.slots[slot] = Some(TextureSlot {
            tag: tag.to_string(),
            handle,
        });
        self.count += 1;

        log::debug!(
            "Registered texture '{}' as {:?} in slot {} ({}x{}, {} channels)",
            tag,
            handle,
            slot,
            image.width,
            image.height,
            image.channels
        );

        Ok(slot)
    }
}

impl Drop for TextureRegistry {
    fn drop(&mut self) {
        if !self.released && self.count > 0 {
            log::warn!("TextureRegistry dropped with {} unreleased texture(s)", self.count);
        }
    }
}
