//! Rendering: textures, materials, lights and shader uniforms

pub mod backend;
pub mod headless;
pub mod lighting;
pub mod material;
pub mod mesh;
pub mod uniform_block;
pub mod uniforms;

pub use backend::{
    BackendError, FilterMode, TextureBackend, TextureHandle, TextureParams, WrapMode,
};
pub use headless::HeadlessGpu;
pub use lighting::{
    DirectionalLight, LightingError, LightingSetup, PointLight, MAX_POINT_LIGHTS,
};
pub use material::{
    Material, MaterialRegistry, TextureError, TextureRegistry, TextureSlot, MAX_TEXTURE_SLOTS,
    NO_TEXTURE_SLOT,
};
pub use mesh::{MeshKind, MeshLibrary, MeshSet};
pub use uniform_block::{ShaderUniforms, UniformBlockSink};
pub use uniforms::{LightField, RecordingSink, UniformId, UniformSink, UniformValue};
