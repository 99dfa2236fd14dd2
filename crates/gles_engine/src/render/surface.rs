//! Surface/context manager
//!
//! Walks the display through acquire → initialize → select configuration →
//! create surface → create context → make current, checking each call before
//! the next. Every object it creates is held in an `Option` so [`teardown`]
//! can run on any partial state and release each object exactly once.
//!
//! [`teardown`]: SurfaceContextManager::teardown

use raw_window_handle::{RawDisplayHandle, RawWindowHandle};

use crate::core::SurfaceConfig;
use crate::render::api::{ApiCallError, ConfigRequirements, ContextAttributes, DisplayApi, SurfaceSize};
use crate::render::error::{RenderError, RenderResult};

/// Which target the surface was created against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceKind {
    /// The native window
    Window,
    /// The null/offscreen fallback target
    Offscreen,
}

/// Owns the display connection, configuration, surface and context
pub struct SurfaceContextManager<D: DisplayApi> {
    api: D,
    display: Option<D::Display>,
    config: Option<D::Config>,
    surface: Option<D::Surface>,
    surface_kind: Option<SurfaceKind>,
    context: Option<D::Context>,
    current: bool,
}

impl<D: DisplayApi> SurfaceContextManager<D> {
    /// Wrap a display API; nothing is acquired yet
    pub fn new(api: D) -> Self {
        Self {
            api,
            display: None,
            config: None,
            surface: None,
            surface_kind: None,
            context: None,
            current: false,
        }
    }

    /// Obtain a display, falling back to the platform default
    pub fn acquire_display(&mut self, native: Option<RawDisplayHandle>) -> RenderResult<()> {
        let display = match native {
            Some(handle) => match self.api.get_display(Some(handle)) {
                Ok(display) => Ok(display),
                Err(e) => {
                    log::warn!("Native display unavailable ({}), trying the default display", e);
                    self.api.get_default_display()
                }
            },
            None => {
                log::warn!("Window system exposes no display handle, using the default display");
                self.api.get_default_display()
            }
        };

        let display = display.map_err(|e| {
            log::error!("No display: {}", e);
            RenderError::DisplayUnavailable
        })?;
        self.display = Some(display);
        Ok(())
    }

    /// Initialize the display connection
    pub fn initialize(&mut self) -> RenderResult<(i32, i32)> {
        let display = self.display.as_mut().ok_or(RenderError::DisplayUnavailable)?;
        let (major, minor) = self.api.initialize(display).map_err(RenderError::InitializationFailed)?;
        log::info!("Display initialized, version {}.{}", major, minor);
        Ok((major, minor))
    }

    /// Select the one configuration this run renders with
    ///
    /// Zero matches, or more matches than slots requested, is a failure.
    pub fn select_configuration(&mut self, requirements: &ConfigRequirements, slots: usize) -> RenderResult<()> {
        let display = self.display.as_ref().ok_or(RenderError::DisplayUnavailable)?;
        let configs = self.api.choose_configs(display, requirements, slots).map_err(|e| {
            log::error!("Configuration query failed: {}", e);
            RenderError::NoMatchingConfiguration { requested: slots, found: 0 }
        })?;

        if configs.is_empty() || configs.len() > slots {
            return Err(RenderError::NoMatchingConfiguration {
                requested: slots,
                found: configs.len(),
            });
        }

        log::info!("Selected configuration ({:?})", requirements);
        self.config = configs.into_iter().next();
        Ok(())
    }

    /// Create the drawable surface, retrying once against an offscreen target
    pub fn create_surface(&mut self, window: Option<RawWindowHandle>, size: SurfaceSize) -> RenderResult<SurfaceKind> {
        let display = self.display.as_ref().ok_or(RenderError::DisplayUnavailable)?;
        let config = self.config.as_ref().ok_or_else(|| missing("eglCreateWindowSurface", "configuration"))?;
        let config = config.clone();

        let first = self.api.create_window_surface(display, &config, window, size);
        let (surface, kind) = match (first, window) {
            (Ok(surface), Some(_)) => (surface, SurfaceKind::Window),
            (Ok(surface), None) => (surface, SurfaceKind::Offscreen),
            (Err(e), Some(_)) => {
                log::warn!("Window surface creation failed ({}), retrying offscreen", e);
                let surface = self
                    .api
                    .create_window_surface(display, &config, None, size)
                    .map_err(RenderError::SurfaceCreationFailed)?;
                (surface, SurfaceKind::Offscreen)
            }
            (Err(e), None) => return Err(RenderError::SurfaceCreationFailed(e)),
        };

        log::info!("Created {:?} surface {}x{}", kind, size.width, size.height);
        self.surface = Some(surface);
        self.surface_kind = Some(kind);
        Ok(kind)
    }

    /// Create the rendering context
    pub fn create_context(&mut self, attributes: &ContextAttributes) -> RenderResult<()> {
        let display = self.display.as_ref().ok_or(RenderError::DisplayUnavailable)?;
        let config = self
            .config
            .as_ref()
            .ok_or_else(|| RenderError::ContextCreationFailed(ApiCallError::new("eglCreateContext", "no configuration")))?;

        let context = self
            .api
            .create_context(display, config, attributes)
            .map_err(RenderError::ContextCreationFailed)?;
        log::info!("Created GLES{} context", attributes.client_version);
        self.context = Some(context);
        Ok(())
    }

    /// Bind the context to the surface on this thread
    pub fn make_current(&mut self) -> RenderResult<()> {
        let display = self.display.as_ref().ok_or(RenderError::DisplayUnavailable)?;
        let (Some(surface), Some(context)) = (self.surface.as_ref(), self.context.as_mut()) else {
            return Err(RenderError::ContextActivationFailed(ApiCallError::new(
                "eglMakeCurrent",
                "surface or context missing",
            )));
        };

        self.api
            .make_current(display, surface, context)
            .map_err(RenderError::ContextActivationFailed)?;
        self.current = true;
        log::info!("Context is current");
        Ok(())
    }

    /// Load GL entry points for the current context
    pub fn load_gl(&mut self) -> RenderResult<D::Gl> {
        if !self.current {
            return Err(RenderError::ContextActivationFailed(ApiCallError::new(
                "getProcAddress",
                "no current context",
            )));
        }
        let display = self.display.as_ref().ok_or(RenderError::DisplayUnavailable)?;
        Ok(self.api.load_gl(display))
    }

    /// Publish the rendered frame
    pub fn present(&mut self) -> RenderResult<()> {
        let (Some(display), Some(surface), Some(context)) =
            (self.display.as_ref(), self.surface.as_ref(), self.context.as_ref())
        else {
            return Err(RenderError::PresentFailed(ApiCallError::new(
                "eglSwapBuffers",
                "surface torn down",
            )));
        };
        self.api
            .swap_buffers(display, surface, context)
            .map_err(RenderError::PresentFailed)
    }

    /// Surface kind, once a surface exists
    pub fn surface_kind(&self) -> Option<SurfaceKind> {
        self.surface_kind
    }

    /// Whether the context is current
    pub fn is_current(&self) -> bool {
        self.current
    }

    /// Detach the context and release everything created so far
    ///
    /// Safe on any partial state and safe to repeat.
    pub fn teardown(&mut self) {
        let Some(display) = self.display.take() else {
            return;
        };

        if let Some(context) = self.context.as_mut() {
            if let Err(e) = self.api.make_not_current(&display, context) {
                log::warn!("Failed to detach context: {}", e);
            }
        }
        self.current = false;

        if let Some(surface) = self.surface.take() {
            self.api.destroy_surface(&display, surface);
        }
        self.surface_kind = None;
        if let Some(context) = self.context.take() {
            self.api.destroy_context(&display, context);
        }
        self.config = None;

        self.api.terminate(display);
        log::info!("Display connection released");
    }

    /// Underlying API, for inspection
    pub fn api(&self) -> &D {
        &self.api
    }
}

impl<D: DisplayApi> Drop for SurfaceContextManager<D> {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// Requirements and attributes from the surface section of the config
pub fn requirements_from(config: &SurfaceConfig) -> (ConfigRequirements, ContextAttributes) {
    (
        ConfigRequirements {
            window_surface: true,
            client_version: config.client_version,
            depth_size: config.depth_size,
        },
        ContextAttributes {
            client_version: config.client_version,
        },
    )
}

fn missing(call: &'static str, what: &str) -> RenderError {
    RenderError::SurfaceCreationFailed(ApiCallError::new(call, format!("no {}", what)))
}
