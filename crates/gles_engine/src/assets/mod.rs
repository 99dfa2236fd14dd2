//! Asset loading
//!
//! Only one kind of asset exists here: decoded pixels for the textured scene.

pub mod image_loader;

pub use image_loader::{DecodeError, ImageData, ImageFileSource, PixelSource};
