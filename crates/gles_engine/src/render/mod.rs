//! Rendering bootstrap
//!
//! # Architecture Overview
//!
//! ```text
//! ┌──────────────────────────────┐
//! │ LifecycleController          │  create → run → teardown
//! └──────┬──────────────┬────────┘
//!        │              │
//! ┌──────▼────────┐ ┌───▼──────────────┐
//! │ SurfaceContext│ │ shader (compile, │
//! │ Manager       │ │ link, uniforms)  │
//! └──────┬────────┘ └───┬──────────────┘
//!        │              │
//!        └──────┬───────┘
//!        ┌──────▼───────┐
//!        │ FrameDriver  │  Idle → Rendering → Terminated
//!        └──────────────┘
//! ```
//!
//! The components only see the GPU through [`api::DisplayApi`] and
//! [`api::GlApi`]; [`backends`] holds the glutin/glow implementations and the
//! window system is reached through [`window::WindowSystem`].

pub mod animation;
pub mod api;
pub mod backends;
pub mod error;
pub mod frame;
pub mod geometry;
pub mod lifecycle;
pub mod shader;
pub mod surface;
pub mod texture;
pub mod window;

#[cfg(test)]
pub(crate) mod testing;

#[cfg(test)]
mod tests;

pub use animation::{AnimationState, FrameTransform, ScaleStep};
pub use error::{RenderError, RenderResult};
pub use frame::{FrameDriver, FrameOutcome, FrameScene, FrameState, TerminationReason};
pub use geometry::{Geometry, VertexAttributeBinding};
pub use lifecycle::{LifecycleController, RunSummary, Scene, SceneTexture};
pub use shader::ShaderProgram;
pub use surface::{SurfaceContextManager, SurfaceKind};
