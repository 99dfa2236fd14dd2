//! GPU-facing seams
//!
//! The bootstrap talks to the GPU through two traits so the same sequencing
//! runs against glutin/glow in production and a counting fake in tests:
//!
//! - [`DisplayApi`]: display, configuration, surface and context calls
//! - [`GlApi`]: shader, program, buffer, texture and draw calls
//!
//! Both report raw failures as [`ApiCallError`]; the callers decide which
//! [`RenderError`](crate::render::RenderError) stage a failure belongs to.

pub mod display_api;
pub mod gl_api;

pub use display_api::{ConfigRequirements, ContextAttributes, DisplayApi, SurfaceSize};
pub use gl_api::{GlApi, ShaderStage, NO_ERROR};

use thiserror::Error;

/// A single GPU API call that reported failure
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{call}: {detail}")]
pub struct ApiCallError {
    /// Name of the failing call
    pub call: &'static str,
    /// Whatever the API reported
    pub detail: String,
}

impl ApiCallError {
    /// Create a new call error
    pub fn new(call: &'static str, detail: impl Into<String>) -> Self {
        Self {
            call,
            detail: detail.into(),
        }
    }
}

/// Result type for raw API calls
pub type ApiResult<T> = Result<T, ApiCallError>;
