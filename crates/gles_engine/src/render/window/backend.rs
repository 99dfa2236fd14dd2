//! Window system contract

use raw_window_handle::{RawDisplayHandle, RawWindowHandle};

use super::{InputCommand, TerminationFlag};

/// What the render bootstrap needs from a window system
///
/// Implementations live on the thread that owns the rendering context.
pub trait WindowSystem {
    /// Native display handle, `None` when the platform exposes none
    fn display_handle(&self) -> Option<RawDisplayHandle>;

    /// Native window handle, `None` when it is not (yet) valid
    fn window_handle(&self) -> Option<RawWindowHandle>;

    /// Client size in pixels
    fn size(&self) -> (u32, u32);

    /// Shared termination flag
    fn termination(&self) -> &TerminationFlag;

    /// Pump pending events once without blocking
    ///
    /// Close and escape requests raise the termination flag; key presses
    /// the renderer cares about come back as commands.
    fn drain_events(&mut self) -> Vec<InputCommand>;

    /// Release window-system resources; called once during teardown
    fn shutdown(&mut self);

    /// Whether termination was requested
    fn terminate_requested(&self) -> bool {
        self.termination().is_requested()
    }
}
