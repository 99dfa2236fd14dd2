//! Per-frame animation state
//!
//! [`AnimationState`] is owned by the frame driver and advanced once per
//! iteration. The scale pulses: every `scale_interval_frames` frames it is
//! multiplied by `scale_factor`, and the step that first reaches
//! `scale_bound` snaps it back to `scale_baseline` instead.

use crate::core::AnimationConfig;
use crate::foundation::math::{rotation_scale_matrix, Mat4, RotationAxis};
use crate::render::window::InputCommand;

/// Mutable animation state for one run
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationState {
    /// Current angle in degrees
    pub angle_deg: f32,
    /// Current uniform scale
    pub scale: f32,
    /// Frames since the last scale step
    pub frame_counter: u32,
    /// Axis the transform rotates about
    pub axis: RotationAxis,
}

/// What happened to the scale during one [`AnimationState::advance`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaleStep {
    /// Counter advanced, scale unchanged
    None,
    /// Scale multiplied by the factor
    Grew,
    /// Scale reached the bound and was reset to the baseline
    Reset,
}

impl AnimationState {
    /// Starting state for `config`
    pub fn new(config: &AnimationConfig) -> Self {
        Self {
            angle_deg: config.initial_angle_deg,
            scale: config.scale_baseline,
            frame_counter: 0,
            axis: config.axis,
        }
    }

    /// Advance by one frame
    pub fn advance(&mut self, config: &AnimationConfig) -> ScaleStep {
        self.angle_deg = wrap_degrees(self.angle_deg + config.angle_step_deg);

        self.frame_counter += 1;
        if self.frame_counter < config.scale_interval_frames {
            return ScaleStep::None;
        }
        self.frame_counter = 0;

        let next = self.scale * config.scale_factor;
        if next >= config.scale_bound {
            self.scale = config.scale_baseline;
            ScaleStep::Reset
        } else {
            self.scale = next;
            ScaleStep::Grew
        }
    }

    /// Apply one input command
    pub fn apply(&mut self, command: InputCommand, config: &AnimationConfig) {
        match command {
            InputCommand::CycleAxis => {
                self.axis = self.axis.next();
                log::debug!("Rotation axis: {:?}", self.axis);
            }
            InputCommand::IncreaseAngle => {
                self.angle_deg = wrap_degrees(self.angle_deg + config.keyboard_angle_step_deg);
            }
            InputCommand::DecreaseAngle => {
                self.angle_deg = wrap_degrees(self.angle_deg - config.keyboard_angle_step_deg);
            }
        }
    }

    /// Transform for the current state
    pub fn transform(&self) -> FrameTransform {
        FrameTransform(rotation_scale_matrix(self.axis, self.angle_deg, self.scale))
    }
}

fn wrap_degrees(angle: f32) -> f32 {
    angle.rem_euclid(360.0)
}

/// Transform uploaded for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTransform(pub Mat4);

impl FrameTransform {
    /// Identity transform
    pub fn identity() -> Self {
        Self(Mat4::identity())
    }

    /// Column-major element array, ready for an untransposed upload
    pub fn to_column_major(&self) -> [f32; 16] {
        let mut out = [0.0; 16];
        out.copy_from_slice(self.0.as_slice());
        out
    }

    /// Underlying matrix
    pub fn matrix(&self) -> &Mat4 {
        &self.0
    }
}
