//! Scene Manager
//!
//! Owns the texture and material registries plus the lighting setup, and
//! turns [`DrawCommand`]s into shader state followed by a draw call.
//!
//! Every draw pushes its state in a fixed order:
//! 1. model matrix (`T * Rz * Ry * Rx * S`)
//! 2. flat color (`bUseTexture = false`, `objectColor`)
//! 3. texture (`bUseTexture = true`, `objectTexture`)
//! 4. UV scale
//! 5. material
//! 6. draw boundary ([`UniformSink::before_draw`]) and the draw call
//!
//! Steps 2 to 5 are optional per command. Later writes overwrite earlier
//! ones, so a command with both a color and a texture ends up textured.

use std::path::PathBuf;

use crate::core::config::SceneConfig;
use crate::foundation::math::{ModelTransform, Vec2, Vec3, Vec4};
use crate::render::backend::{TextureBackend, TextureParams};
use crate::render::lighting::LightingSetup;
use crate::render::material::{MaterialRegistry, TextureRegistry};
use crate::render::mesh::{MeshLibrary, MeshSet};
use crate::render::uniforms::{UniformId, UniformSink, UniformValue};
use crate::scene::{DrawCommand, SceneResult};

/// Texture file to register during preparation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureSource {
    /// File name, resolved against the configured texture directory
    pub file: PathBuf,
    /// Tag draws refer to the texture by
    pub tag: String,
}

impl TextureSource {
    /// Create a manifest entry
    pub fn new(file: impl Into<PathBuf>, tag: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            tag: tag.into(),
        }
    }
}

/// Outcome of [`SceneManager::prepare_scene`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PrepareReport {
    /// Textures registered
    pub textures_loaded: usize,
    /// Textures that failed and were skipped
    pub textures_failed: usize,
    /// Mesh kinds loaded
    pub meshes_loaded: usize,
}

/// Per-frame statistics from [`SceneManager::render_scene`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Zero-based frame number
    pub frame: u64,
    /// Draw calls issued
    pub draws: usize,
    /// Commands skipped because their mesh was not loaded
    pub skipped: usize,
    /// Uniform writes pushed
    pub uniform_writes: usize,
}

/// Counts writes on their way to another sink
struct CountingSink<'a, S: ?Sized> {
    inner: &'a mut S,
    writes: usize,
}

impl<S: UniformSink + ?Sized> UniformSink for CountingSink<'_, S> {
    fn set_uniform(&mut self, id: UniformId, value: UniformValue) {
        self.writes += 1;
        self.inner.set_uniform(id, value);
    }

    fn before_draw(&mut self) {
        self.inner.before_draw();
    }
}

/// Static scene: registries, lights and the per-draw uniform pipeline
#[derive(Debug)]
pub struct SceneManager {
    textures: TextureRegistry,
    materials: MaterialRegistry,
    lighting: LightingSetup,
    config: SceneConfig,
    loaded_meshes: MeshSet,
    frames_rendered: u64,
}

impl Default for SceneManager {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneManager {
    /// Create a scene manager with default settings
    pub fn new() -> Self {
        Self::from_config(&SceneConfig::default())
    }

    /// Create a scene manager from runtime settings
    pub fn from_config(config: &SceneConfig) -> Self {
        Self {
            textures: TextureRegistry::with_params(
                TextureParams::default(),
                config.flip_textures_vertically,
            ),
            materials: MaterialRegistry::new(),
            lighting: LightingSetup::new().with_enabled(config.lighting_enabled),
            config: config.clone(),
            loaded_meshes: MeshSet::empty(),
            frames_rendered: 0,
        }
    }

    /// Texture registry
    pub fn textures(&self) -> &TextureRegistry {
        &self.textures
    }

    /// Mutable texture registry
    pub fn textures_mut(&mut self) -> &mut TextureRegistry {
        &mut self.textures
    }

    /// Material registry
    pub fn materials(&self) -> &MaterialRegistry {
        &self.materials
    }

    /// Mutable material registry
    pub fn materials_mut(&mut self) -> &mut MaterialRegistry {
        &mut self.materials
    }

    /// Lighting setup
    pub fn lighting(&self) -> &LightingSetup {
        &self.lighting
    }

    /// Mutable lighting setup
    pub fn lighting_mut(&mut self) -> &mut LightingSetup {
        &mut self.lighting
    }

    /// Settings the scene was created from
    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// Mesh kinds loaded so far
    pub const fn loaded_meshes(&self) -> MeshSet {
        self.loaded_meshes
    }

    /// Frames rendered so far
    pub const fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    /// Push the model matrix for the given scale, rotation (degrees) and position
    pub fn set_transformations<S: UniformSink + ?Sized>(
        &self,
        sink: &mut S,
        scale: Vec3,
        x_rotation_degrees: f32,
        y_rotation_degrees: f32,
        z_rotation_degrees: f32,
        position: Vec3,
    ) {
        let transform = ModelTransform::new(
            scale,
            Vec3::new(x_rotation_degrees, y_rotation_degrees, z_rotation_degrees),
            position,
        );
        self.push_transform(sink, &transform);
    }

    /// Push a flat color and switch texturing off
    pub fn set_shader_color<S: UniformSink + ?Sized>(&self, sink: &mut S, color: Vec4) {
        sink.set_bool(UniformId::UseTexture, false);
        sink.set_vec4(UniformId::ObjectColor, color);
    }

    /// Switch texturing on and select the slot registered under `tag`
    ///
    /// An unknown tag still enables texturing, with the sampler set to
    /// [`NO_TEXTURE_SLOT`](crate::render::material::NO_TEXTURE_SLOT). Returns
    /// whether the tag was found.
    pub fn set_shader_texture<S: UniformSink + ?Sized>(&self, sink: &mut S, tag: &str) -> bool {
        let slot = self.textures.shader_slot(tag);
        sink.set_bool(UniformId::UseTexture, true);
        sink.set_int(UniformId::ObjectTexture, slot);

        let found = slot >= 0;
        if !found {
            log::warn!("Texture '{}' is not registered", tag);
        }
        found
    }

    /// Push the texture coordinate scale
    pub fn set_texture_uv_scale<S: UniformSink + ?Sized>(&self, sink: &mut S, u: f32, v: f32) {
        sink.set_vec2(UniformId::UvScale, Vec2::new(u, v));
    }

    /// Push the material defined under `tag`
    ///
    /// An unknown tag is logged and pushes nothing, leaving the previous
    /// material in effect. Returns whether the tag was found.
    pub fn set_shader_material<S: UniformSink + ?Sized>(&self, sink: &mut S, tag: &str) -> bool {
        match self.materials.find(tag) {
            Some(material) => {
                sink.set_vec3(UniformId::MaterialDiffuse, material.diffuse_color);
                sink.set_vec3(UniformId::MaterialSpecular, material.specular_color);
                sink.set_float(UniformId::MaterialShininess, material.shininess);
                true
            }
            None => {
                log::warn!("Material '{}' is not defined", tag);
                false
            }
        }
    }

    /// Push the state of `command` and issue its draw call
    ///
    /// Commands whose mesh was never loaded are skipped before any uniform is
    /// written. Returns whether the draw call was issued.
    pub fn draw<S, M>(&self, sink: &mut S, meshes: &mut M, command: &DrawCommand) -> bool
    where
        S: UniformSink + ?Sized,
        M: MeshLibrary + ?Sized,
    {
        if !self.loaded_meshes.has(command.mesh) {
            log::warn!("Skipping '{}': mesh {} is not loaded", command.label, command.mesh);
            return false;
        }

        self.push_transform(sink, &command.transform);
        if let Some(color) = command.color {
            self.set_shader_color(sink, color);
        }
        if let Some(tag) = &command.texture {
            self.set_shader_texture(sink, tag);
        }
        if let Some(uv) = command.uv_scale {
            self.set_texture_uv_scale(sink, uv.x, uv.y);
        }
        if let Some(tag) = &command.material {
            self.set_shader_material(sink, tag);
        }

        sink.before_draw();
        meshes.draw_mesh(command.mesh);
        log::trace!("Drew '{}' ({})", command.label, command.mesh);
        true
    }

    /// Load the mesh kinds in `set`
    pub fn load_meshes<M: MeshLibrary + ?Sized>(&mut self, meshes: &mut M, set: MeshSet) -> usize {
        let mut loaded = 0;
        for kind in set.kinds() {
            meshes.load_mesh(kind);
            loaded += 1;
        }
        self.loaded_meshes |= set;
        loaded
    }

    /// One-time setup before rendering
    ///
    /// Registers every texture in `manifest` (failures are logged, counted
    /// and skipped), binds the registered textures to their units, pushes the
    /// lighting setup and loads every primitive mesh.
    pub fn prepare_scene<B, S, M>(
        &mut self,
        backend: &mut B,
        sink: &mut S,
        meshes: &mut M,
        manifest: &[TextureSource],
    ) -> SceneResult<PrepareReport>
    where
        B: TextureBackend + ?Sized,
        S: UniformSink + ?Sized,
        M: MeshLibrary + ?Sized,
    {
        let mut report = PrepareReport::default();

        for source in manifest {
            let path = self.config.texture_path(&source.file);
            match self.textures.register(&mut *backend, &path, &source.tag) {
                Ok(_) => report.textures_loaded += 1,
                Err(_) => report.textures_failed += 1,
            }
        }

        self.textures.bind_all(backend)?;
        self.lighting.apply(sink);
        report.meshes_loaded = self.load_meshes(meshes, MeshSet::all());

        log::info!(
            "Scene prepared: {} texture(s) loaded, {} failed, {} material(s), {} mesh kind(s)",
            report.textures_loaded,
            report.textures_failed,
            self.materials.len(),
            report.meshes_loaded
        );

        Ok(report)
    }

    /// Draw every command in order
    pub fn render_scene<S, M>(
        &mut self,
        sink: &mut S,
        meshes: &mut M,
        commands: &[DrawCommand],
    ) -> FrameStats
    where
        S: UniformSink + ?Sized,
        M: MeshLibrary + ?Sized,
    {
        let mut counting = CountingSink { inner: sink, writes: 0 };
        let mut stats = FrameStats {
            frame: self.frames_rendered,
            ..FrameStats::default()
        };

        for command in commands {
            if self.draw(&mut counting, &mut *meshes, command) {
                stats.draws += 1;
            } else {
                stats.skipped += 1;
            }
        }
        stats.uniform_writes = counting.writes;

        self.frames_rendered += 1;
        log::debug!(
            "Frame {}: {} draw(s), {} skipped, {} uniform write(s)",
            stats.frame,
            stats.draws,
            stats.skipped,
            stats.uniform_writes
        );

        stats
    }

    /// Release every GPU texture
    pub fn teardown<B: TextureBackend + ?Sized>(&mut self, backend: &mut B) -> SceneResult<usize> {
        let released = self.textures.release_all(backend)?;
        log::info!("Scene torn down, {} texture(s) released", released);
        Ok(released)
    }

    fn push_transform<S: UniformSink + ?Sized>(&self, sink: &mut S, transform: &ModelTransform) {
        sink.set_mat4(UniformId::Model, transform.to_matrix());
    }
}
