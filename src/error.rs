//! Crate-level error types.

use std::fmt;

use crate::gpu::render_context::RenderContextError;

/// Errors produced by the orbitview crate.
///
/// The camera and pointer router are total and never produce these; they
/// come from configuration, asset loading and the GPU backend.
#[derive(Debug)]
pub enum OrbitViewError {
    /// GPU context initialization failure.
    Gpu(RenderContextError),
    /// WGSL shader module or pipeline failed validation.
    Shader {
        /// Debug label of the shader or pipeline.
        label: String,
        /// Validation message reported by wgpu.
        message: String,
    },
    /// An image could not be decoded or has unusable dimensions.
    Texture {
        /// Path of the offending image.
        path: String,
        /// What went wrong.
        message: String,
    },
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Options parsed but hold values the camera cannot work with.
    InvalidOptions(String),
    /// Bad command-line arguments.
    Usage(String),
    /// Viewer event-loop failure.
    Viewer(String),
}

impl fmt::Display for OrbitViewError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gpu(e) => write!(f, "GPU error: {e}"),
            Self::Shader { label, message } => {
                write!(f, "shader '{label}' failed validation: {message}")
            }
            Self::Texture { path, message } => {
                write!(f, "texture '{path}': {message}")
            }
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::InvalidOptions(msg) => write!(f, "invalid options: {msg}"),
            Self::Usage(msg) => write!(f, "usage error: {msg}"),
            Self::Viewer(msg) => write!(f, "viewer error: {msg}"),
        }
    }
}

impl std::error::Error for OrbitViewError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Gpu(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<RenderContextError> for OrbitViewError {
    fn from(e: RenderContextError) -> Self {
        Self::Gpu(e)
    }
}

impl From<std::io::Error> for OrbitViewError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
