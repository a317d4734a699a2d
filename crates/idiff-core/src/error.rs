use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum IdiffError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image format error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("Image \"{}\" not recognized: {info}", path.display())]
    ImageNotRecognized { path: PathBuf, info: String },

    #[error("Invalid composite bounds: {width}x{height}")]
    InvalidBounds { width: u32, height: u32 },

    #[error("Invalid duration {input:?}: expected <number>(s|ms)")]
    InvalidDuration { input: String },

    #[error("Unknown view: {0}")]
    UnknownView(String),

    #[error("At least {required} images are required, got {actual}")]
    NotEnoughImages { required: usize, actual: usize },

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("External tool `{command}` failed: {reason}")]
    ExternalTool { command: String, reason: String },
}

pub type Result<T> = std::result::Result<T, IdiffError>;
