//! Backend abstraction traits for GPU texture resources
//!
//! The scene pipeline never talks to a graphics API directly. Texture
//! creation, unit binding and release go through [`TextureBackend`], which a
//! real renderer implements on top of its API and tests implement in memory.

use thiserror::Error;

use crate::assets::ImageData;

/// Opaque GPU texture id handed out by a backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u32);

/// Texture filtering modes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterMode {
    /// Nearest neighbor filtering
    Nearest,
    /// Linear filtering
    Linear,
}

/// Texture wrapping modes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WrapMode {
    /// Repeat the texture
    Repeat,
    /// Mirror the texture
    MirroredRepeat,
    /// Clamp to edge
    ClampToEdge,
}

/// Texture creation parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureParams {
    /// Minification and magnification filter
    pub filter_mode: FilterMode,
    /// Wrapping along both S and T
    pub wrap_mode: WrapMode,
    /// Generate mipmaps after upload
    pub generate_mipmaps: bool,
}

impl Default for TextureParams {
    fn default() -> Self {
        Self {
            filter_mode: FilterMode::Linear,
            wrap_mode: WrapMode::Repeat,
            generate_mipmaps: true,
        }
    }
}

/// Errors reported by a backend
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// The GPU rejected the upload
    #[error("Texture upload failed: {0}")]
    UploadFailed(String),

    /// A handle the backend does not know about
    #[error("Unknown texture handle {0:?}")]
    UnknownHandle(TextureHandle),
}

/// Result type for backend operations
pub type BackendResult<T> = Result<T, BackendError>;

/// GPU facility that owns texture objects
pub trait TextureBackend {
    /// Upload a 2D texture (3 or 4 channels) and return its handle
    fn create_texture_2d(
        &mut self,
        image: &ImageData,
        params: &TextureParams,
    ) -> BackendResult<TextureHandle>;

    /// Make `handle` the texture bound to texture unit `unit`
    fn bind_texture_unit(&mut self, unit: u32, handle: TextureHandle) -> BackendResult<()>;

    /// Free the GPU storage behind `handle`
    fn release_texture(&mut self, handle: TextureHandle) -> BackendResult<()>;
}

impl<B: TextureBackend + ?Sized> TextureBackend for &mut B {
    fn create_texture_2d(
        &mut self,
        image: &ImageData,
        params: &TextureParams,
    ) -> BackendResult<TextureHandle> {
        (**self).create_texture_2d(image, params)
    }

    fn bind_texture_unit(&mut self, unit: u32, handle: TextureHandle) -> BackendResult<()> {
        (**self).bind_texture_unit(unit, handle)
    }

    fn release_texture(&mut self, handle: TextureHandle) -> BackendResult<()> {
        (**self).release_texture(handle)
    }
}
