//! Production implementations of the GPU seams
//!
//! - [`GlutinDisplay`]: [`DisplayApi`](crate::render::api::DisplayApi) over EGL via glutin
//! - [`GlowGl`]: [`GlApi`](crate::render::api::GlApi) over GLES2 via glow

pub mod glow_gl;
pub mod glutin_display;

pub use glow_gl::GlowGl;
pub use glutin_display::GlutinDisplay;
