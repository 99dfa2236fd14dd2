//! Display, configuration, surface and context calls

use raw_window_handle::{RawDisplayHandle, RawWindowHandle};

use super::{ApiResult, GlApi};

/// What a rendering configuration must provide
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigRequirements {
    /// Config must support window surfaces
    pub window_surface: bool,
    /// Required client API major version (2 = GLES2)
    pub client_version: u8,
    /// Minimum depth bits, `None` for don't-care
    pub depth_size: Option<u8>,
}

impl Default for ConfigRequirements {
    fn default() -> Self {
        Self {
            window_surface: true,
            client_version: 2,
            depth_size: None,
        }
    }
}

/// Attributes for context creation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContextAttributes {
    /// Requested client API major version
    pub client_version: u8,
}

impl Default for ContextAttributes {
    fn default() -> Self {
        Self { client_version: 2 }
    }
}

/// Drawable size in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceSize {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

/// EGL-shaped display API
///
/// Objects are returned by value and handed back for destruction, so the
/// caller owns every handle it created and decides when it goes away.
pub trait DisplayApi {
    /// Initialized or uninitialized display connection
    type Display;
    /// Matched rendering configuration
    type Config: Clone;
    /// Drawable surface
    type Surface;
    /// Rendering context, current or not
    type Context;
    /// GL function table loaded from this display
    type Gl: GlApi;

    /// Display for a native display handle, `None` when the window system has none
    fn get_display(&mut self, native: Option<RawDisplayHandle>) -> ApiResult<Self::Display>;

    /// Platform default display
    fn get_default_display(&mut self) -> ApiResult<Self::Display>;

    /// Initialize the connection, returning the implementation version
    fn initialize(&mut self, display: &mut Self::Display) -> ApiResult<(i32, i32)>;

    /// Up to `max` configurations matching `requirements`
    fn choose_configs(
        &mut self,
        display: &Self::Display,
        requirements: &ConfigRequirements,
        max: usize,
    ) -> ApiResult<Vec<Self::Config>>;

    /// Surface for `window`; `None` asks for an offscreen target of `size`
    fn create_window_surface(
        &mut self,
        display: &Self::Display,
        config: &Self::Config,
        window: Option<RawWindowHandle>,
        size: SurfaceSize,
    ) -> ApiResult<Self::Surface>;

    /// Create a context for `config`
    fn create_context(
        &mut self,
        display: &Self::Display,
        config: &Self::Config,
        attributes: &ContextAttributes,
    ) -> ApiResult<Self::Context>;

    /// Bind `context` to `surface` on the calling thread
    fn make_current(
        &mut self,
        display: &Self::Display,
        surface: &Self::Surface,
        context: &mut Self::Context,
    ) -> ApiResult<()>;

    /// Detach `context` from the calling thread
    fn make_not_current(&mut self, display: &Self::Display, context: &mut Self::Context) -> ApiResult<()>;

    /// Publish the back buffer
    fn swap_buffers(
        &mut self,
        display: &Self::Display,
        surface: &Self::Surface,
        context: &Self::Context,
    ) -> ApiResult<()>;

    /// Load GL entry points; only valid with a current context
    fn load_gl(&mut self, display: &Self::Display) -> Self::Gl;

    /// Destroy a surface
    fn destroy_surface(&mut self, display: &Self::Display, surface: Self::Surface);

    /// Destroy a context
    fn destroy_context(&mut self, display: &Self::Display, context: Self::Context);

    /// Release the display connection
    fn terminate(&mut self, display: Self::Display);
}
