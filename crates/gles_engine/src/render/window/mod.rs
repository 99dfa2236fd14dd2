//! Window/input collaborator
//!
//! The bootstrap needs three things from the window system: native handles
//! for surface creation, a termination signal it can poll at the top of each
//! frame, and a non-blocking drain of pending input. [`WindowSystem`] is that
//! contract; [`GlfwWindow`] implements it with glfw.

pub mod backend;
pub mod glfw_window;

pub use backend::WindowSystem;
pub use glfw_window::{map_event, GlfwWindow, WindowAction, WindowError};

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Single-writer, single-reader "terminate requested" flag
///
/// Cloning shares the flag. The window layer raises it, the frame driver
/// reads it once per iteration.
#[derive(Debug, Clone, Default)]
pub struct TerminationFlag(Arc<AtomicBool>);

impl TerminationFlag {
    /// New, unraised flag
    pub fn new() -> Self {
        Self::default()
    }

    /// Request termination
    pub fn request(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// Whether termination was requested
    pub fn is_requested(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Input the frame driver applies to its animation state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputCommand {
    /// Switch to the next rotation axis
    CycleAxis,
    /// Add one keyboard step to the angle
    IncreaseAngle,
    /// Subtract one keyboard step from the angle
    DecreaseAngle,
}
