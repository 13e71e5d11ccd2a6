//! Asset loading

pub mod image_loader;

pub use image_loader::ImageData;

use thiserror::Error;

/// Asset loading errors
#[derive(Error, Debug)]
pub enum AssetError {
    /// The file could not be read or decoded
    #[error("Failed to load asset: {0}")]
    LoadFailed(String),

    /// Decoded pixel data does not match its declared dimensions
    #[error("Invalid image data: {0}")]
    InvalidData(String),
}
