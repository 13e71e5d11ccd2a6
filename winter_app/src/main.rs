//! Winter scene demo application
//!
//! Prepares the snowman tableau, renders a configurable number of frames
//! through the headless backend and tears everything down again.

mod winter_scene;

use scene_engine::foundation::logging;
use scene_engine::prelude::*;
use scene_engine::render::ShaderUniforms;

const CONFIG_PATH: &str = "winter_scene.toml";

struct WinterSceneApp {
    config: SceneConfig,
    scene: SceneManager,
    textures: HeadlessGpu,
    geometry: HeadlessGpu,
    uniforms: UniformBlockSink,
    draw_list: Vec<DrawCommand>,
    blocks_uploaded: usize,
    last_frame: Vec<ShaderUniforms>,
}

impl WinterSceneApp {
    fn new(config: SceneConfig) -> Self {
        log::info!("Creating winter scene application...");
        let scene = SceneManager::from_config(&config);

        Self {
            config,
            scene,
            textures: HeadlessGpu::new(),
            geometry: HeadlessGpu::new(),
            uniforms: UniformBlockSink::new(),
            draw_list: winter_scene::draw_list(),
            blocks_uploaded: 0,
            last_frame: Vec::new(),
        }
    }

    fn initialize(&mut self) -> SceneResult<PrepareReport> {
        log::info!("Initializing winter scene from {}", self.config.texture_dir.display());

        winter_scene::define_materials(self.scene.materials_mut());
        winter_scene::configure_lighting(self.scene.lighting_mut())?;

        let report = self.scene.prepare_scene(
            &mut self.textures,
            &mut self.uniforms,
            &mut self.geometry,
            &winter_scene::texture_manifest(),
        )?;

        if report.textures_failed > 0 {
            log::warn!(
                "{} texture(s) missing from {}; affected objects sample an empty unit",
                report.textures_failed,
                self.config.texture_dir.display()
            );
        }

        Ok(report)
    }

    fn run(&mut self) -> Vec<FrameStats> {
        let mut frames = Vec::with_capacity(self.config.frames as usize);

        for _ in 0..self.config.frames {
            let stats = self
                .scene
                .render_scene(&mut self.uniforms, &mut self.geometry, &self.draw_list);
            let upload = self.uniforms.upload_bytes().len();
            let blocks = self.uniforms.take_draw_blocks();
            self.blocks_uploaded += blocks.len();

            log::info!(
                "Frame {}: {} draw(s), {} skipped, {} uniform write(s), {} block(s) / {} bytes",
                stats.frame,
                stats.draws,
                stats.skipped,
                stats.uniform_writes,
                blocks.len(),
                upload
            );

            self.last_frame = blocks;
            self.geometry.take_draw_calls();
            frames.push(stats);
        }

        if self.uniforms.rejected_writes() > 0 {
            log::warn!("{} uniform write(s) rejected", self.uniforms.rejected_writes());
        }

        frames
    }

    fn cleanup(&mut self) -> SceneResult<usize> {
        log::info!("Cleaning up winter scene...");
        let released = self.scene.teardown(&mut self.textures)?;
        log::info!(
            "Done after {} frame(s); {} block(s) and {} byte(s) of texture data uploaded",
            self.scene.frames_rendered(),
            self.blocks_uploaded,
            self.textures.uploaded_bytes()
        );
        Ok(released)
    }
}

fn main() -> SceneResult<()> {
    let config = SceneConfig::load_or_default(CONFIG_PATH)?;
    logging::init(config.log_level_filter());

    log::info!("Starting winter scene demo");

    let mut app = WinterSceneApp::new(config);
    app.initialize()?;
    app.run();
    app.cleanup()?;

    Ok(())
}
