//! Error types for rendering and frame export

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("frame size {width}x{height} is not drawable")]
    InvalidSize { width: u32, height: u32 },

    #[error("failed to encode frame as PNG")]
    Encode(#[from] png::EncodingError),

    #[error("failed to write frame to {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
