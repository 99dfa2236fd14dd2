//! # GLES Engine
//!
//! A minimal GLES2/EGL rendering bootstrap: open a display, pick one
//! configuration, create a surface and context on a native window, compile
//! and link one shader program, then draw one triangle fan per frame until
//! the window asks to stop.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use gles_engine::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ApplicationConfig::new("Polygon").with_animation(AnimationConfig::still());
//!     let scene = Scene {
//!         vertex_source: "attribute highp vec4 position; void main() { gl_Position = position; }".into(),
//!         fragment_source: "void main() { gl_FragColor = vec4(1.0, 1.0, 0.0, 1.0); }".into(),
//!         geometry: Geometry::regular_polygon(7, 0.5)?,
//!         transform_uniform: None,
//!         texture: None,
//!     };
//!
//!     let mut window = GlfwWindow::new(&config.window)?;
//!     let mut lifecycle = LifecycleController::new(GlutinDisplay::new());
//!     lifecycle.run(&config, &scene, &mut window, &ImageFileSource)?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]

pub mod assets;
pub mod config;
pub mod core;
pub mod foundation;
pub mod render;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        assets::{DecodeError, ImageData, ImageFileSource, PixelSource},
        core::{AnimationConfig, ApplicationConfig, Config, ConfigError},
        foundation::{
            logging,
            math::{rotation_scale_matrix, Mat4, RotationAxis, Vec3},
        },
        render::{
            backends::{GlowGl, GlutinDisplay},
            window::{GlfwWindow, InputCommand, TerminationFlag, WindowError, WindowSystem},
            Geometry, LifecycleController, RenderError, RenderResult, RunSummary, Scene, SceneTexture,
            TerminationReason, VertexAttributeBinding,
        },
    };
}
