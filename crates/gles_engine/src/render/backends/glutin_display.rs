//! EGL display through glutin

use std::ffi::CString;
use std::mem;
use std::num::NonZeroU32;

use glutin::config::{Api, Config, ConfigSurfaceTypes, ConfigTemplateBuilder};
use glutin::context::{ContextApi, ContextAttributesBuilder, NotCurrentContext, PossiblyCurrentContext, Version};
use glutin::display::{Display, DisplayApiPreference};
use glutin::prelude::*;
use glutin::surface::{PbufferSurface, Surface, SurfaceAttributesBuilder, WindowSurface};
use raw_window_handle::{RawDisplayHandle, RawWindowHandle};

use super::GlowGl;
use crate::render::api::{ApiCallError, ApiResult, ConfigRequirements, ContextAttributes, DisplayApi, SurfaceSize};

/// Surface against the window or the offscreen fallback
pub enum GlutinSurface {
    /// Window-backed surface
    Window(Surface<WindowSurface>),
    /// Pbuffer used when the window handle was rejected
    Offscreen(Surface<PbufferSurface>),
}

/// Context in whichever state glutin last left it
pub enum GlutinContext {
    /// Created, not bound
    NotCurrent(NotCurrentContext),
    /// Bound to this thread
    Current(PossiblyCurrentContext),
    /// A failed transition consumed the context
    Lost,
}

/// [`DisplayApi`] over EGL
#[derive(Debug, Default, Clone, Copy)]
pub struct GlutinDisplay;

impl GlutinDisplay {
    /// New EGL display API
    pub fn new() -> Self {
        Self
    }
}

fn call_error(call: &'static str, error: glutin::error::Error) -> ApiCallError {
    ApiCallError::new(call, error.to_string())
}

#[cfg(target_os = "windows")]
fn default_display_handle() -> RawDisplayHandle {
    RawDisplayHandle::Windows(raw_window_handle::WindowsDisplayHandle::new())
}

#[cfg(not(target_os = "windows"))]
fn default_display_handle() -> RawDisplayHandle {
    RawDisplayHandle::Xlib(raw_window_handle::XlibDisplayHandle::new(None, 0))
}

/// `"EGL 1.5 ..."` → `(1, 5)`
fn parse_version(version: &str) -> Option<(i32, i32)> {
    version.split_whitespace().find_map(|token| {
        let (major, minor) = token.split_once('.')?;
        let minor: String = minor.chars().take_while(char::is_ascii_digit).collect();
        Some((major.parse().ok()?, minor.parse().ok()?))
    })
}

fn surface_dimensions(size: SurfaceSize) -> ApiResult<(NonZeroU32, NonZeroU32)> {
    match (NonZeroU32::new(size.width), NonZeroU32::new(size.height)) {
        (Some(width), Some(height)) => Ok((width, height)),
        _ => Err(ApiCallError::new(
            "eglCreateWindowSurface",
            format!("zero-sized surface {}x{}", size.width, size.height),
        )),
    }
}

impl DisplayApi for GlutinDisplay {
    type Display = Display;
    type Config = Config;
    type Surface = GlutinSurface;
    type Context = GlutinContext;
    type Gl = GlowGl;

    fn get_display(&mut self, native: Option<RawDisplayHandle>) -> ApiResult<Display> {
        let raw = native.ok_or_else(|| ApiCallError::new("eglGetDisplay", "no native display"))?;
        unsafe { Display::new(raw, DisplayApiPreference::Egl) }.map_err(|e| call_error("eglGetDisplay", e))
    }

    fn get_default_display(&mut self) -> ApiResult<Display> {
        self.get_display(Some(default_display_handle()))
    }

    fn initialize(&mut self, display: &mut Display) -> ApiResult<(i32, i32)> {
        // glutin initializes EGL when the display is created; report what it negotiated
        let version = display.version_string();
        parse_version(&version)
            .ok_or_else(|| ApiCallError::new("eglInitialize", format!("unrecognized version '{}'", version)))
    }

    fn choose_configs(
        &mut self,
        display: &Display,
        requirements: &ConfigRequirements,
        max: usize,
    ) -> ApiResult<Vec<Config>> {
        let mut template = ConfigTemplateBuilder::new().with_api(if requirements.client_version >= 3 {
            Api::GLES3
        } else {
            Api::GLES2
        });
        if requirements.window_surface {
            template = template.with_surface_type(ConfigSurfaceTypes::WINDOW | ConfigSurfaceTypes::PBUFFER);
        }
        if let Some(depth) = requirements.depth_size {
            template = template.with_depth_size(depth);
        }

        let configs = unsafe { display.find_configs(template.build()) }
            .map_err(|e| call_error("eglChooseConfig", e))?;
        Ok(configs.take(max).collect())
    }

    fn create_window_surface(
        &mut self,
        display: &Display,
        config: &Config,
        window: Option<RawWindowHandle>,
        size: SurfaceSize,
    ) -> ApiResult<GlutinSurface> {
        let (width, height) = surface_dimensions(size)?;
        match window {
            Some(handle) => {
                let attributes = SurfaceAttributesBuilder::<WindowSurface>::new().build(handle, width, height);
                unsafe { display.create_window_surface(config, &attributes) }
                    .map(GlutinSurface::Window)
                    .map_err(|e| call_error("eglCreateWindowSurface", e))
            }
            None => {
                let attributes = SurfaceAttributesBuilder::<PbufferSurface>::new().build(width, height);
                unsafe { display.create_pbuffer_surface(config, &attributes) }
                    .map(GlutinSurface::Offscreen)
                    .map_err(|e| call_error("eglCreatePbufferSurface", e))
            }
        }
    }

    fn create_context(
        &mut self,
        display: &Display,
        config: &Config,
        attributes: &ContextAttributes,
    ) -> ApiResult<GlutinContext> {
        let version = Version::new(attributes.client_version, 0);
        let attributes = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::Gles(Some(version)))
            .build(None);
        unsafe { display.create_context(config, &attributes) }
            .map(GlutinContext::NotCurrent)
            .map_err(|e| call_error("eglCreateContext", e))
    }

    fn make_current(
        &mut self,
        _display: &Display,
        surface: &GlutinSurface,
        context: &mut GlutinContext,
    ) -> ApiResult<()> {
        let next = match mem::replace(context, GlutinContext::Lost) {
            GlutinContext::NotCurrent(not_current) => match surface {
                GlutinSurface::Window(s) => not_current.make_current(s),
                GlutinSurface::Offscreen(s) => not_current.make_current(s),
            }
            .map_err(|e| call_error("eglMakeCurrent", e))?,
            GlutinContext::Current(current) => {
                let result = match surface {
                    GlutinSurface::Window(s) => current.make_current(s),
                    GlutinSurface::Offscreen(s) => current.make_current(s),
                };
                *context = GlutinContext::Current(current);
                return result.map_err(|e| call_error("eglMakeCurrent", e));
            }
            GlutinContext::Lost => return Err(ApiCallError::new("eglMakeCurrent", "context lost")),
        };
        *context = GlutinContext::Current(next);
        Ok(())
    }

    fn make_not_current(&mut self, _display: &Display, context: &mut GlutinContext) -> ApiResult<()> {
        match mem::replace(context, GlutinContext::Lost) {
            GlutinContext::Current(current) => {
                let not_current = current
                    .make_not_current()
                    .map_err(|e| call_error("eglMakeCurrent", e))?;
                *context = GlutinContext::NotCurrent(not_current);
                Ok(())
            }
            other => {
                *context = other;
                Ok(())
            }
        }
    }

    fn swap_buffers(&mut self, _display: &Display, surface: &GlutinSurface, context: &GlutinContext) -> ApiResult<()> {
        let GlutinContext::Current(current) = context else {
            return Err(ApiCallError::new("eglSwapBuffers", "context not current"));
        };
        match surface {
            GlutinSurface::Window(s) => s.swap_buffers(current),
            GlutinSurface::Offscreen(s) => s.swap_buffers(current),
        }
        .map_err(|e| call_error("eglSwapBuffers", e))
    }

    fn load_gl(&mut self, display: &Display) -> GlowGl {
        let gl = unsafe {
            glow::Context::from_loader_function(|symbol| {
                CString::new(symbol)
                    .map(|name| display.get_proc_address(&name))
                    .unwrap_or(std::ptr::null())
            })
        };
        GlowGl::new(gl)
    }

    fn destroy_surface(&mut self, _display: &Display, surface: GlutinSurface) {
        drop(surface);
    }

    fn destroy_context(&mut self, _display: &Display, context: GlutinContext) {
        drop(context);
    }

    fn terminate(&mut self, display: Display) {
        drop(display);
    }
}
