//! In-memory GPU stand-in
//!
//! [`HeadlessGpu`] implements [`TextureBackend`] and [`MeshLibrary`] without
//! a graphics context. It keeps every texture it was given, tracks unit
//! bindings and records draw calls, which makes it the backend of choice for
//! tests and for running the scene without a window.

use std::collections::{BTreeMap, HashMap};

use crate::assets::ImageData;
use crate::render::backend::{
    BackendError, BackendResult, TextureBackend, TextureHandle, TextureParams,
};
use crate::render::mesh::{MeshKind, MeshLibrary, MeshSet};

/// Metadata of a texture living in a [`HeadlessGpu`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureInfo {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Channel count
    pub channels: u8,
    /// Mip levels that would be allocated
    pub mip_levels: u32,
    /// Parameters used at creation
    pub params: TextureParams,
}

/// Headless texture and mesh backend
#[derive(Debug, Default)]
pub struct HeadlessGpu {
    next_handle: u32,
    textures: HashMap<TextureHandle, TextureInfo>,
    units: BTreeMap<u32, TextureHandle>,
    released: Vec<TextureHandle>,
    loaded_meshes: MeshSet,
    draw_calls: Vec<MeshKind>,
    uploaded_bytes: usize,
    fail_uploads: bool,
}

impl HeadlessGpu {
    /// Create an empty backend
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every following upload fail
    pub fn set_fail_uploads(&mut self, fail: bool) {
        self.fail_uploads = fail;
    }

    /// True if `handle` was created and not yet released
    pub fn is_live(&self, handle: TextureHandle) -> bool {
        self.textures.contains_key(&handle)
    }

    /// Number of live textures
    pub fn live_texture_count(&self) -> usize {
        self.textures.len()
    }

    /// Metadata of a live texture
    pub fn texture_info(&self, handle: TextureHandle) -> Option<&TextureInfo> {
        self.textures.get(&handle)
    }

    /// Texture bound to `unit`
    pub fn bound_unit(&self, unit: u32) -> Option<TextureHandle> {
        self.units.get(&unit).copied()
    }

    /// Handles released so far, in release order
    pub fn released_handles(&self) -> &[TextureHandle] {
        &self.released
    }

    /// Total pixel bytes uploaded
    pub const fn uploaded_bytes(&self) -> usize {
        self.uploaded_bytes
    }

    /// Kinds loaded through [`MeshLibrary::load_mesh`]
    pub const fn loaded_meshes(&self) -> MeshSet {
        self.loaded_meshes
    }

    /// Draw calls issued so far
    pub fn draw_calls(&self) -> &[MeshKind] {
        &self.draw_calls
    }

    /// Return and forget the recorded draw calls
    pub fn take_draw_calls(&mut self) -> Vec<MeshKind> {
        std::mem::take(&mut self.draw_calls)
    }
}

impl TextureBackend for HeadlessGpu {
    fn create_texture_2d(
        &mut self,
        image: &ImageData,
        params: &TextureParams,
    ) -> BackendResult<TextureHandle> {
        if self.fail_uploads {
            return Err(BackendError::UploadFailed("uploads disabled".to_string()));
        }
        if !matches!(image.channels, 3 | 4) {
            return Err(BackendError::UploadFailed(format!(
                "{} channel(s) not supported",
                image.channels
            )));
        }

        // Handle 0 is never issued, mirroring GL's reserved texture name.
        self.next_handle += 1;
        let handle = TextureHandle(self.next_handle);

        let mip_levels = if params.generate_mipmaps { image.mip_level_count() } else { 1 };
        self.textures.insert(
            handle,
            TextureInfo {
                width: image.width,
                height: image.height,
                channels: image.channels,
                mip_levels,
                params: params.clone(),
            },
        );
        self.uploaded_bytes += image.size_bytes();

        log::trace!("Created {:?} ({}x{}, {} mips)", handle, image.width, image.height, mip_levels);
        Ok(handle)
    }

    fn bind_texture_unit(&mut self, unit: u32, handle: TextureHandle) -> BackendResult<()> {
        if !self.is_live(handle) {
            return Err(BackendError::UnknownHandle(handle));
        }
        self.units.insert(unit, handle);
        Ok(())
    }

    fn release_texture(&mut self, handle: TextureHandle) -> BackendResult<()> {
        if self.textures.remove(&handle).is_none() {
            return Err(BackendError::UnknownHandle(handle));
        }
        self.units.retain(|_, bound| *bound != handle);
        self.released.push(handle);
        Ok(())
    }
}

impl MeshLibrary for HeadlessGpu {
    fn load_mesh(&mut self, kind: MeshKind) {
        log::trace!("Loaded mesh {}", kind);
        self.loaded_meshes |= MeshSet::from_kind(kind);
    }

    fn draw_mesh(&mut self, kind: MeshKind) {
        self.draw_calls.push(kind);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_texture_lifecycle() {
        let mut gpu = HeadlessGpu::new();
        let image = ImageData::solid_color(8, 4, [0, 0, 0, 255]);
        let handle = gpu.create_texture_2d(&image, &TextureParams::default()).unwrap();

        assert_ne!(handle, TextureHandle(0));
        assert_eq!(gpu.texture_info(handle).unwrap().mip_levels, 4);
        assert_eq!(gpu.uploaded_bytes(), 8 * 4 * 4);

        gpu.bind_texture_unit(0, handle).unwrap();
        assert_eq!(gpu.bound_unit(0), Some(handle));

        gpu.release_texture(handle).unwrap();
        assert!(!gpu.is_live(handle));
        assert_eq!(gpu.bound_unit(0), None);
        assert_eq!(gpu.release_texture(handle), Err(BackendError::UnknownHandle(handle)));
    }

    #[test]
    fn test_binding_unknown_handle_fails() {
        let mut gpu = HeadlessGpu::new();
        assert!(gpu.bind_texture_unit(0, TextureHandle(42)).is_err());
    }

    #[test]
    fn test_mesh_recording() {
        let mut gpu = HeadlessGpu::new();
        gpu.load_mesh(MeshKind::Sphere);
        gpu.draw_mesh(MeshKind::Sphere);
        gpu.draw_mesh(MeshKind::Plane);

        assert!(gpu.loaded_meshes().has(MeshKind::Sphere));
        assert_eq!(gpu.take_draw_calls(), vec![MeshKind::Sphere, MeshKind::Plane]);
        assert!(gpu.draw_calls().is_empty());
    }
}
