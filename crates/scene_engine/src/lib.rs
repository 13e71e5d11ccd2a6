//! # Scene Engine
//!
//! Building blocks for rendering a static 3D scene made of primitive meshes.
//!
//! ## Features
//!
//! - **Texture Registry**: 16 tagged texture slots, slot *i* bound to unit *i*
//! - **Material Registry**: named Phong materials looked up per draw
//! - **Lighting**: one directional light and up to three point lights
//! - **Typed Uniforms**: every shader write goes through a [`UniformSink`](render::UniformSink)
//! - **Headless Backend**: run and test the whole pipeline without a GPU
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use scene_engine::prelude::*;
//!
//! fn main() -> Result<(), SceneError> {
//!     let config = SceneConfig::default();
//!     let mut gpu = HeadlessGpu::new();
//!     let mut meshes = HeadlessGpu::new();
//!     let mut sink = RecordingSink::new();
//!
//!     let mut scene = SceneManager::from_config(&config);
//!     let sand = Material::new("sand", Vec3::new(0.7, 0.4, 0.2), Vec3::repeat(0.3), 20.0);
//!     scene.materials_mut().define(sand);
//!     let manifest = [TextureSource::new("sand.png", "ground")];
//!     scene.prepare_scene(&mut gpu, &mut sink, &mut meshes, &manifest)?;
//!
//!     let ground = DrawCommand::new("ground", MeshKind::Plane)
//!         .scale(20.0, 1.0, 10.0)
//!         .texture("ground")
//!         .material("sand");
//!     scene.render_scene(&mut sink, &mut meshes, &[ground]);
//!
//!     scene.teardown(&mut gpu)?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]

pub mod assets;
pub mod config;
pub mod core;
pub mod foundation;
pub mod render;
pub mod scene;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        assets::{AssetError, ImageData},
        config::{Config, ConfigError},
        core::SceneConfig,
        foundation::math::{Mat4, ModelTransform, Vec2, Vec3, Vec4},
        render::{
            DirectionalLight, HeadlessGpu, LightingSetup, Material, MaterialRegistry, MeshKind,
            MeshLibrary, MeshSet, PointLight, RecordingSink, TextureBackend, TextureError,
            TextureHandle, TextureRegistry, UniformBlockSink, UniformId, UniformSink, UniformValue,
        },
        scene::{
            DrawCommand, FrameStats, PrepareReport, SceneError, SceneManager, SceneResult,
            TextureSource,
        },
    };
}
