//! Rendering error kinds
//!
//! One variant per bootstrap stage or per-frame failure. Only compilation and
//! link failures carry driver diagnostics; the rest report which call failed.

use thiserror::Error;

use crate::assets::DecodeError;
use crate::render::api::{ApiCallError, ShaderStage};

/// Errors raised while bootstrapping or rendering
#[derive(Error, Debug)]
pub enum RenderError {
    /// No native or default display could be obtained
    #[error("No display available")]
    DisplayUnavailable,

    /// Display connection could not be initialized
    #[error("Display initialization failed: {0}")]
    InitializationFailed(ApiCallError),

    /// Configuration selection did not fill exactly the requested slot
    #[error("No matching configuration: {found} match(es) for {requested} slot(s)")]
    NoMatchingConfiguration {
        /// Number of slots requested
        requested: usize,
        /// Number of configurations returned
        found: usize,
    },

    /// Window surface creation failed, including the offscreen retry
    #[error("Surface creation failed: {0}")]
    SurfaceCreationFailed(ApiCallError),

    /// Rendering context creation failed
    #[error("Context creation failed: {0}")]
    ContextCreationFailed(ApiCallError),

    /// Context could not be made current
    #[error("Context activation failed: {0}")]
    ContextActivationFailed(ApiCallError),

    /// Shader source did not compile
    #[error("{stage:?} shader compilation failed: {diagnostic}")]
    CompilationFailed {
        /// Stage that failed
        stage: ShaderStage,
        /// Driver info log, possibly empty
        diagnostic: String,
    },

    /// Program did not link
    #[error("Program link failed: {diagnostic}")]
    LinkFailed {
        /// Driver info log, possibly empty
        diagnostic: String,
    },

    /// Uniform name is not active in the linked program
    #[error("Unknown uniform: {0}")]
    UnknownUniform(String),

    /// Linked attribute location differs from its binding table entry
    #[error("Attribute '{name}' bound to {expected} but program reports {actual:?}")]
    AttributeBindingMismatch {
        /// Attribute name
        name: String,
        /// Index from the binding table
        expected: u32,
        /// Location reported after link
        actual: Option<u32>,
    },

    /// Vertex data does not fit its attribute table
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    /// A GPU object needed for drawing could not be created, or a draw raised an error
    #[error("Draw failed: {0}")]
    DrawFailed(ApiCallError),

    /// Frame could not be presented
    #[error("Present failed: {0}")]
    PresentFailed(ApiCallError),

    /// Pixel source failed to decode a texture
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

impl RenderError {
    /// Compile or link log text, when the failure carries one
    pub fn diagnostic(&self) -> Option<&str> {
        match self {
            Self::CompilationFailed { diagnostic, .. } | Self::LinkFailed { diagnostic } => {
                Some(diagnostic.as_str())
            }
            _ => None,
        }
    }
}

/// Result type for rendering operations
pub type RenderResult<T> = Result<T, RenderError>;
