//! GLFW window for EGL rendering
//!
//! The window is created without a client API; the EGL surface and context
//! are created separately against its native handles.

use glfw::{Action, Key, WindowEvent};
use raw_window_handle::{HasDisplayHandle, HasWindowHandle, RawDisplayHandle, RawWindowHandle};
use thiserror::Error;

use super::{InputCommand, TerminationFlag, WindowSystem};
use crate::core::WindowConfig;

/// Window management errors
#[derive(Error, Debug)]
pub enum WindowError {
    /// GLFW could not be initialized
    #[error("GLFW initialization failed: {0}")]
    InitializationFailed(String),

    /// Window creation failed
    #[error("Window creation failed")]
    CreationFailed,
}

/// What a window event means to the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowAction {
    /// Raise the termination flag
    Terminate,
    /// Hand a command to the frame driver
    Command(InputCommand),
}

/// Map a glfw event; events the renderer ignores map to `None`
pub fn map_event(event: &WindowEvent) -> Option<WindowAction> {
    match event {
        WindowEvent::Close | WindowEvent::Key(Key::Escape, _, Action::Press, _) => Some(WindowAction::Terminate),
        WindowEvent::Key(Key::Space, _, Action::Press, _) => Some(WindowAction::Command(InputCommand::CycleAxis)),
        WindowEvent::Key(Key::Right, _, Action::Press | Action::Repeat, _) => {
            Some(WindowAction::Command(InputCommand::IncreaseAngle))
        }
        WindowEvent::Key(Key::Left, _, Action::Press | Action::Repeat, _) => {
            Some(WindowAction::Command(InputCommand::DecreaseAngle))
        }
        _ => None,
    }
}

/// GLFW window wrapper
pub struct GlfwWindow {
    glfw: glfw::Glfw,
    window: Option<glfw::PWindow>,
    events: glfw::GlfwReceiver<(f64, WindowEvent)>,
    termination: TerminationFlag,
}

impl GlfwWindow {
    /// Open a window sized and titled per `config`
    pub fn new(config: &WindowConfig) -> Result<Self, WindowError> {
        let mut glfw = glfw::init(glfw::fail_on_errors)
            .map_err(|e| WindowError::InitializationFailed(format!("{:?}", e)))?;

        // EGL owns the context
        glfw.window_hint(glfw::WindowHint::ClientApi(glfw::ClientApiHint::NoApi));
        glfw.window_hint(glfw::WindowHint::Resizable(false));

        let (mut window, events) = glfw
            .create_window(config.width, config.height, &config.title, glfw::WindowMode::Windowed)
            .ok_or(WindowError::CreationFailed)?;

        window.set_key_polling(true);
        window.set_close_polling(true);

        log::info!("Created {}x{} window '{}'", config.width, config.height, config.title);

        Ok(Self {
            glfw,
            window: Some(window),
            events,
            termination: TerminationFlag::new(),
        })
    }
}

impl WindowSystem for GlfwWindow {
    fn display_handle(&self) -> Option<RawDisplayHandle> {
        let window = self.window.as_ref()?;
        window.display_handle().ok().map(|handle| handle.as_raw())
    }

    fn window_handle(&self) -> Option<RawWindowHandle> {
        let window = self.window.as_ref()?;
        window.window_handle().ok().map(|handle| handle.as_raw())
    }

    fn size(&self) -> (u32, u32) {
        self.window
            .as_ref()
            .map(|window| {
                let (width, height) = window.get_size();
                (width.max(0) as u32, height.max(0) as u32)
            })
            .unwrap_or((0, 0))
    }

    fn termination(&self) -> &TerminationFlag {
        &self.termination
    }

    fn drain_events(&mut self) -> Vec<InputCommand> {
        self.glfw.poll_events();
        let mut commands = Vec::new();
        for (_, event) in glfw::flush_messages(&self.events) {
            match map_event(&event) {
                Some(WindowAction::Terminate) => self.termination.request(),
                Some(WindowAction::Command(command)) => commands.push(command),
                None => {}
            }
        }
        commands
    }

    fn shutdown(&mut self) {
        if let Some(window) = self.window.take() {
            drop(window);
            log::debug!("Window destroyed");
        }
    }
}
