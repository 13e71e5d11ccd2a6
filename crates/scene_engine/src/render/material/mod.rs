//! Texture and material registries

pub mod material_registry;
pub mod texture_registry;

pub use material_registry::{Material, MaterialRegistry};
pub use texture_registry::{
    TextureError, TextureRegistry, TextureSlot, MAX_TEXTURE_SLOTS, NO_TEXTURE_SLOT,
};
