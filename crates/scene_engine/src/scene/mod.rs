//! Scene description and the per-draw uniform pipeline

pub mod draw_command;
pub mod scene_manager;

pub use draw_command::DrawCommand;
pub use scene_manager::{FrameStats, PrepareReport, SceneManager, TextureSource};

use thiserror::Error;

use crate::config::ConfigError;
use crate::render::lighting::LightingError;
use crate::render::material::TextureError;

/// Errors surfaced while configuring, preparing or tearing down a scene
#[derive(Error, Debug)]
pub enum SceneError {
    /// Texture registration, binding or release failed
    #[error("Texture error: {0}")]
    Texture(#[from] TextureError),

    /// Invalid light configuration
    #[error("Lighting error: {0}")]
    Lighting(#[from] LightingError),

    /// Settings could not be loaded
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type for scene operations
pub type SceneResult<T> = Result<T, SceneError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::core::SceneConfig;
    use crate::foundation::math::Vec3;
    use crate::render::lighting::{LightingSetup, PointLight, MAX_POINT_LIGHTS};

    fn fill_point_lights(setup: &mut LightingSetup, count: usize) -> SceneResult<()> {
        for _ in 0..count {
            setup.add_point_light(PointLight::new(
                Vec3::zeros(),
                Vec3::zeros(),
                Vec3::zeros(),
                Vec3::zeros(),
            ))?;
        }
        Ok(())
    }

    fn load_config(name: &str) -> SceneResult<SceneConfig> {
        Ok(SceneConfig::load_from_file(std::env::temp_dir().join(name))?)
    }

    #[test]
    fn test_lighting_errors_convert() {
        let mut setup = LightingSetup::new();
        assert!(fill_point_lights(&mut setup, MAX_POINT_LIGHTS).is_ok());
        assert!(matches!(
            fill_point_lights(&mut setup, 1),
            Err(SceneError::Lighting(LightingError::TooManyPointLights { .. }))
        ));
    }

    #[test]
    fn test_config_errors_convert() {
        let result = load_config("scene_engine_no_such_config.yaml");
        assert!(matches!(result, Err(SceneError::Config(_))));
    }
}
