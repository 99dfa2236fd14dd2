//! # Unified Configuration System
//!
//! All tunables for one bootstrap-and-render run live in [`ApplicationConfig`].
//! Every section has defaults, so a config file only needs the keys it changes.
//!
//! ## Configuration Categories
//!
//! - **Engine**: log filter and an optional frame limit
//! - **Window**: title and client size
//! - **Surface**: what the rendering configuration must provide
//! - **Renderer**: clear colour and viewport
//! - **Animation**: rotation and the pulsing scale law

use serde::{Serialize, Deserialize};

use crate::foundation::math::RotationAxis;

pub use crate::config::{Config, ConfigError};

/// # Engine Configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Default log filter when `RUST_LOG` is not set
    pub log_level: String,
    /// Stop normally after this many presented frames
    pub frame_limit: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            frame_limit: None,
        }
    }
}

/// # Window Configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Client width in pixels
    pub width: u32,
    /// Client height in pixels
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "GLES Bootstrap".to_string(),
            width: 540,
            height: 540,
        }
    }
}

/// # Surface Configuration
///
/// Requirements handed to configuration selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceConfig {
    /// Required depth buffer bits, `None` for don't-care
    pub depth_size: Option<u8>,
    /// Requested client API major version
    pub client_version: u8,
    /// Number of configuration slots requested; exactly one must be filled
    pub config_slots: usize,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            depth_size: None,
            client_version: 2,
            config_slots: 1,
        }
    }
}

/// # Renderer Configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RendererConfig {
    /// RGBA clear colour
    pub clear_color: [f32; 4],
    /// `[x, y, width, height]`; defaults to a square of the window height
    pub viewport: Option<[i32; 4]>,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            clear_color: [0.6, 0.8, 1.0, 1.0],
            viewport: None,
        }
    }
}

/// # Animation Configuration
///
/// Every `scale_interval_frames` frames the scale is multiplied by
/// `scale_factor`; once it reaches `scale_bound` it snaps back to
/// `scale_baseline` on that same step.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Starting angle in degrees
    pub initial_angle_deg: f32,
    /// Continuous spin added every frame, in degrees (0 = none)
    pub angle_step_deg: f32,
    /// Rotation applied per Left/Right key press, in degrees
    pub keyboard_angle_step_deg: f32,
    /// Starting rotation axis
    pub axis: RotationAxis,
    /// Scale the pulse starts from and resets to
    pub scale_baseline: f32,
    /// Multiplicative step
    pub scale_factor: f32,
    /// Frames between scale steps
    pub scale_interval_frames: u32,
    /// Scale at or above which the pulse resets
    pub scale_bound: f32,
}

impl AnimationConfig {
    /// Configuration that never moves: angle 0, scale fixed at 1
    pub fn still() -> Self {
        Self {
            scale_factor: 1.0,
            scale_bound: f32::INFINITY,
            ..Self::default()
        }
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            initial_angle_deg: 0.0,
            angle_step_deg: 0.0,
            keyboard_angle_step_deg: 5.0,
            axis: RotationAxis::Z,
            scale_baseline: 1.0,
            scale_factor: 1.005,
            scale_interval_frames: 20,
            scale_bound: 1.3,
        }
    }
}

/// # Complete Application Configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationConfig {
    /// Engine core configuration
    pub engine: EngineConfig,
    /// Window configuration
    pub window: WindowConfig,
    /// Rendering configuration requirements
    pub surface: SurfaceConfig,
    /// Per-frame renderer settings
    pub renderer: RendererConfig,
    /// Animation constants
    pub animation: AnimationConfig,
}

impl ApplicationConfig {
    /// Create a configuration with the given window title and defaults elsewhere
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            window: WindowConfig {
                title: title.into(),
                ..WindowConfig::default()
            },
            ..Self::default()
        }
    }

    /// Replace the animation section
    pub fn with_animation(mut self, animation: AnimationConfig) -> Self {
        self.animation = animation;
        self
    }

    /// Stop after `frames` presented frames
    pub fn with_frame_limit(mut self, frames: u64) -> Self {
        self.engine.frame_limit = Some(frames);
        self
    }

    /// Viewport to set before the first frame
    pub fn viewport(&self) -> [i32; 4] {
        self.renderer.viewport.unwrap_or_else(|| {
            let side = i32::try_from(self.window.height).unwrap_or(i32::MAX);
            [0, 0, side, side]
        })
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window.title.is_empty() {
            return Err(ConfigError::Invalid("window title cannot be empty".to_string()));
        }
        if self.window.width == 0 || self.window.height == 0 {
            return Err(ConfigError::Invalid("window size must be non-zero".to_string()));
        }
        if self.surface.config_slots == 0 {
            return Err(ConfigError::Invalid("at least one config slot is required".to_string()));
        }

        let anim = &self.animation;
        if anim.scale_baseline <= 0.0 || anim.scale_factor <= 0.0 {
            return Err(ConfigError::Invalid("scale baseline and factor must be positive".to_string()));
        }
        if anim.scale_bound < anim.scale_baseline {
            return Err(ConfigError::Invalid("scale bound is below the baseline".to_string()));
        }
        if anim.scale_interval_frames == 0 {
            return Err(ConfigError::Invalid("scale interval must be at least one frame".to_string()));
        }
        Ok(())
    }
}

impl Config for ApplicationConfig {}
