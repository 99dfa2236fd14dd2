//! # Core Engine Module
//!
//! Shared configuration types used by every bootstrap stage.

pub mod config;

pub use config::{
    AnimationConfig,
    ApplicationConfig,
    EngineConfig,
    RendererConfig,
    SurfaceConfig,
    WindowConfig,
    Config,
    ConfigError,
};
