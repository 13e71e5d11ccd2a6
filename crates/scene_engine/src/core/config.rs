//! # Scene Configuration
//!
//! Runtime settings for preparing and rendering a static scene: where texture
//! files live, how they are decoded, how many frames a headless run draws and
//! the default log level.
//!
//! Both TOML and RON files are accepted through the [`Config`] trait.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub use crate::config::{Config, ConfigError};

/// Settings consumed by scene preparation and the render loop
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Directory texture paths are resolved against
    pub texture_dir: PathBuf,
    /// Flip images vertically while decoding (bottom-left UV origin)
    pub flip_textures_vertically: bool,
    /// Whether the lighting flag is pushed as enabled
    pub lighting_enabled: bool,
    /// Frames to render before shutting down
    pub frames: u32,
    /// Default log level when `RUST_LOG` is not set
    pub log_level: String,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            texture_dir: PathBuf::from("textures"),
            flip_textures_vertically: true,
            lighting_enabled: true,
            frames: 3,
            log_level: "info".to_string(),
        }
    }
}

impl Config for SceneConfig {}

impl SceneConfig {
    /// Resolve a texture file name against the configured directory
    pub fn texture_path(&self, file_name: impl AsRef<Path>) -> PathBuf {
        self.texture_dir.join(file_name)
    }

    /// Parsed log level filter
    pub fn log_level_filter(&self) -> log::LevelFilter {
        crate::foundation::logging::level_from_str(&self.log_level)
    }
}
