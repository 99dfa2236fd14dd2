//! Resource-counting fakes for the GPU seams and the window system
//!
//! All fakes created from one [`FakeGpu`] share a [`Ledger`] that counts live
//! objects and records the calls that matter to the frame loop. [`Faults`]
//! scripts which calls fail.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use raw_window_handle::{RawDisplayHandle, RawWindowHandle, XlibDisplayHandle, XlibWindowHandle};

use crate::assets::{DecodeError, ImageData, PixelSource};
use crate::render::api::{
    ApiCallError, ApiResult, ConfigRequirements, ContextAttributes, DisplayApi, GlApi, ShaderStage, SurfaceSize,
    NO_ERROR,
};
use crate::render::geometry::VertexAttributeBinding;
use crate::render::window::{InputCommand, TerminationFlag, WindowSystem};

/// `GL_INVALID_OPERATION`
pub const INVALID_OPERATION: u32 = 0x0502;

/// Scripted failures
#[derive(Debug, Clone)]
pub struct Faults {
    pub native_display: bool,
    pub default_display: bool,
    pub initialize: bool,
    /// Configurations returned regardless of the requested maximum
    pub configs_returned: usize,
    pub window_surface: bool,
    pub offscreen_surface: bool,
    pub context: bool,
    pub make_current: bool,
    pub link: bool,
    pub vertex_buffer: bool,
    /// Report this location for the named attribute instead of the bound one
    pub attrib_override: Option<(String, u32)>,
    /// Raise a GL error after the draw with this 1-based index
    pub draw_error_on: Option<usize>,
    /// Fail the present with this 1-based index
    pub present_fail_on: Option<usize>,
}

impl Default for Faults {
    fn default() -> Self {
        Self {
            native_display: false,
            default_display: false,
            initialize: false,
            configs_returned: 1,
            window_surface: false,
            offscreen_surface: false,
            context: false,
            make_current: false,
            link: false,
            vertex_buffer: false,
            attrib_override: None,
            draw_error_on: None,
            present_fail_on: None,
        }
    }
}

/// Live object counts and recorded calls
#[derive(Debug, Default)]
pub struct Ledger {
    pub displays: i32,
    pub surfaces: i32,
    pub contexts: i32,
    pub shaders: i32,
    pub programs: i32,
    pub buffers: i32,
    pub textures: i32,

    pub current: bool,
    pub default_display_used: bool,
    /// One entry per surface attempt: whether a window handle was passed
    pub surface_attempts: Vec<bool>,
    pub make_not_current_calls: u32,
    pub terminate_calls: u32,
    pub window_shutdowns: u32,

    pub used_programs: Vec<u32>,
    pub clears: usize,
    pub draws: Vec<i32>,
    pub presents: usize,
    pub matrices: Vec<[f32; 16]>,
    pub enabled_attributes: Vec<VertexAttributeBinding>,
    pub sampler_units: Vec<i32>,
    pub viewport: Option<[i32; 4]>,
    pub clear_color: Option<[f32; 4]>,
    pub buffer_data: Vec<f32>,
}

impl Ledger {
    /// Sum of every live GPU object
    pub fn live_objects(&self) -> i32 {
        self.displays + self.surfaces + self.contexts + self.shaders + self.programs + self.buffers + self.textures
    }
}

type Shared = Rc<RefCell<Ledger>>;

/// Factory for fakes sharing one ledger
#[derive(Clone, Default)]
pub struct FakeGpu {
    pub ledger: Shared,
    pub faults: Faults,
}

impl FakeGpu {
    pub fn new(faults: Faults) -> Self {
        Self {
            ledger: Shared::default(),
            faults,
        }
    }

    pub fn display(&self) -> FakeDisplay {
        FakeDisplay {
            ledger: self.ledger.clone(),
            faults: self.faults.clone(),
            next_id: 1,
        }
    }

    pub fn gl(&self) -> FakeGl {
        FakeGl::new(self.ledger.clone(), self.faults.clone())
    }

    pub fn window(&self) -> FakeWindow {
        FakeWindow {
            ledger: self.ledger.clone(),
            termination: TerminationFlag::new(),
            window_handle: Some(RawWindowHandle::Xlib(XlibWindowHandle::new(7))),
            display_handle: Some(RawDisplayHandle::Xlib(XlibDisplayHandle::new(None, 0))),
            size: (540, 540),
            script: VecDeque::new(),
            terminate_after_drains: None,
            drains: 0,
        }
    }

    pub fn ledger(&self) -> std::cell::Ref<'_, Ledger> {
        self.ledger.borrow()
    }
}

fn fail(call: &'static str) -> ApiCallError {
    ApiCallError::new(call, "scripted failure")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FakeSurface {
    pub id: u32,
    pub offscreen: bool,
}

#[derive(Debug, PartialEq, Eq)]
pub struct FakeContext {
    pub id: u32,
}

pub struct FakeDisplay {
    ledger: Shared,
    faults: Faults,
    next_id: u32,
}

impl FakeDisplay {
    fn id(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }
}

impl DisplayApi for FakeDisplay {
    type Display = u32;
    type Config = u32;
    type Surface = FakeSurface;
    type Context = FakeContext;
    type Gl = FakeGl;

    fn get_display(&mut self, native: Option<RawDisplayHandle>) -> ApiResult<u32> {
        if native.is_none() || self.faults.native_display {
            return Err(fail("eglGetDisplay"));
        }
        self.ledger.borrow_mut().displays += 1;
        Ok(self.id())
    }

    fn get_default_display(&mut self) -> ApiResult<u32> {
        if self.faults.default_display {
            return Err(fail("eglGetDisplay(EGL_DEFAULT_DISPLAY)"));
        }
        let mut ledger = self.ledger.borrow_mut();
        ledger.displays += 1;
        ledger.default_display_used = true;
        drop(ledger);
        Ok(self.id())
    }

    fn initialize(&mut self, _display: &mut u32) -> ApiResult<(i32, i32)> {
        if self.faults.initialize {
            return Err(fail("eglInitialize"));
        }
        Ok((1, 5))
    }

    fn choose_configs(&mut self, _display: &u32, _requirements: &ConfigRequirements, _max: usize) -> ApiResult<Vec<u32>> {
        Ok((0..self.faults.configs_returned as u32).collect())
    }

    fn create_window_surface(
        &mut self,
        _display: &u32,
        _config: &u32,
        window: Option<RawWindowHandle>,
        _size: SurfaceSize,
    ) -> ApiResult<FakeSurface> {
        self.ledger.borrow_mut().surface_attempts.push(window.is_some());
        let failed = if window.is_some() {
            self.faults.window_surface
        } else {
            self.faults.offscreen_surface
        };
        if failed {
            return Err(fail("eglCreateWindowSurface"));
        }
        self.ledger.borrow_mut().surfaces += 1;
        Ok(FakeSurface {
            id: self.id(),
            offscreen: window.is_none(),
        })
    }

    fn create_context(&mut self, _display: &u32, _config: &u32, _attributes: &ContextAttributes) -> ApiResult<FakeContext> {
        if self.faults.context {
            return Err(fail("eglCreateContext"));
        }
        self.ledger.borrow_mut().contexts += 1;
        Ok(FakeContext { id: self.id() })
    }

    fn make_current(&mut self, _display: &u32, _surface: &FakeSurface, _context: &mut FakeContext) -> ApiResult<()> {
        if self.faults.make_current {
            return Err(fail("eglMakeCurrent"));
        }
        self.ledger.borrow_mut().current = true;
        Ok(())
    }

    fn make_not_current(&mut self, _display: &u32, _context: &mut FakeContext) -> ApiResult<()> {
        let mut ledger = self.ledger.borrow_mut();
        ledger.current = false;
        ledger.make_not_current_calls += 1;
        Ok(())
    }

    fn swap_buffers(&mut self, _display: &u32, _surface: &FakeSurface, _context: &FakeContext) -> ApiResult<()> {
        let mut ledger = self.ledger.borrow_mut();
        if self.faults.present_fail_on == Some(ledger.presents + 1) {
            return Err(fail("eglSwapBuffers"));
        }
        ledger.presents += 1;
        Ok(())
    }

    fn load_gl(&mut self, _display: &u32) -> FakeGl {
        FakeGl::new(self.ledger.clone(), self.faults.clone())
    }

    fn destroy_surface(&mut self, _display: &u32, _surface: FakeSurface) {
        self.ledger.borrow_mut().surfaces -= 1;
    }

    fn destroy_context(&mut self, _display: &u32, _context: FakeContext) {
        self.ledger.borrow_mut().contexts -= 1;
    }

    fn terminate(&mut self, _display: u32) {
        let mut ledger = self.ledger.borrow_mut();
        ledger.displays -= 1;
        ledger.terminate_calls += 1;
    }
}

#[derive(Debug, Default)]
struct GlObjects {
    next_id: u32,
    sources: HashMap<u32, String>,
    compiled: HashMap<u32, bool>,
    attached: HashMap<u32, Vec<u32>>,
    bound: HashMap<u32, HashMap<String, u32>>,
    linked: HashMap<u32, bool>,
    pending_error: u32,
}

impl GlObjects {
    fn id(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }

    /// Names declared with `keyword` (`attribute` or `uniform`) across the program's sources
    fn declared(&self, program: u32, keyword: &str) -> Vec<String> {
        let mut names = Vec::new();
        for shader in self.attached.get(&program).into_iter().flatten() {
            let Some(source) = self.sources.get(shader) else { continue };
            for statement in source.split(';') {
                let tokens: Vec<&str> = statement.split_whitespace().collect();
                if tokens.first() == Some(&keyword) {
                    if let Some(name) = tokens.last() {
                        names.push(name.to_string());
                    }
                }
            }
        }
        names
    }
}

/// GL fake; shader source without `main` fails to compile
pub struct FakeGl {
    ledger: Shared,
    faults: Faults,
    objects: RefCell<GlObjects>,
}

impl FakeGl {
    fn new(ledger: Shared, faults: Faults) -> Self {
        Self {
            ledger,
            faults,
            objects: RefCell::new(GlObjects::default()),
        }
    }
}

impl GlApi for FakeGl {
    type Shader = u32;
    type Program = u32;
    type UniformLocation = i32;
    type Buffer = u32;
    type Texture = u32;

    fn create_shader(&self, _stage: ShaderStage) -> ApiResult<u32> {
        self.ledger.borrow_mut().shaders += 1;
        Ok(self.objects.borrow_mut().id())
    }

    fn shader_source(&self, shader: u32, source: &str) {
        self.objects.borrow_mut().sources.insert(shader, source.to_string());
    }

    fn compile_shader(&self, shader: u32) {
        let mut objects = self.objects.borrow_mut();
        let ok = objects.sources.get(&shader).is_some_and(|s| s.contains("void main"));
        objects.compiled.insert(shader, ok);
    }

    fn compile_status(&self, shader: u32) -> bool {
        self.objects.borrow().compiled.get(&shader).copied().unwrap_or(false)
    }

    fn shader_info_log(&self, shader: u32) -> String {
        if self.compile_status(shader) {
            String::new()
        } else {
            "ERROR: 0:1: 'main' : function not defined".to_string()
        }
    }

    fn delete_shader(&self, _shader: u32) {
        self.ledger.borrow_mut().shaders -= 1;
    }

    fn create_program(&self) -> ApiResult<u32> {
        self.ledger.borrow_mut().programs += 1;
        Ok(self.objects.borrow_mut().id())
    }

    fn attach_shader(&self, program: u32, shader: u32) {
        self.objects.borrow_mut().attached.entry(program).or_default().push(shader);
    }

    fn bind_attrib_location(&self, program: u32, index: u32, name: &str) {
        self.objects
            .borrow_mut()
            .bound
            .entry(program)
            .or_default()
            .insert(name.to_string(), index);
    }

    fn link_program(&self, program: u32) {
        let ok = !self.faults.link;
        self.objects.borrow_mut().linked.insert(program, ok);
    }

    fn link_status(&self, program: u32) -> bool {
        self.objects.borrow().linked.get(&program).copied().unwrap_or(false)
    }

    fn program_info_log(&self, program: u32) -> String {
        if self.link_status(program) {
            String::new()
        } else {
            "ERROR: Linking failed: varying mismatch".to_string()
        }
    }

    fn delete_program(&self, _program: u32) {
        self.ledger.borrow_mut().programs -= 1;
    }

    fn use_program(&self, program: u32) {
        self.ledger.borrow_mut().used_programs.push(program);
    }

    fn attrib_location(&self, program: u32, name: &str) -> Option<u32> {
        if let Some((overridden, location)) = &self.faults.attrib_override {
            if overridden == name {
                return Some(*location);
            }
        }
        let objects = self.objects.borrow();
        let declared = objects.declared(program, "attribute");
        let position = declared.iter().position(|n| n == name)?;
        let bound = objects.bound.get(&program).and_then(|b| b.get(name)).copied();
        Some(bound.unwrap_or(position as u32))
    }

    fn uniform_location(&self, program: u32, name: &str) -> Option<i32> {
        if !self.link_status(program) {
            return None;
        }
        let declared = self.objects.borrow().declared(program, "uniform");
        declared.iter().position(|n| n == name).map(|i| i as i32)
    }

    fn uniform_matrix4(&self, _location: &i32, matrix: &[f32; 16]) {
        self.ledger.borrow_mut().matrices.push(*matrix);
    }

    fn uniform_sampler(&self, _location: &i32, unit: i32) {
        self.ledger.borrow_mut().sampler_units.push(unit);
    }

    fn create_vertex_buffer(&self, data: &[f32]) -> ApiResult<u32> {
        if self.faults.vertex_buffer {
            return Err(fail("glGenBuffers"));
        }
        let mut ledger = self.ledger.borrow_mut();
        ledger.buffers += 1;
        ledger.buffer_data = data.to_vec();
        drop(ledger);
        Ok(self.objects.borrow_mut().id())
    }

    fn bind_vertex_buffer(&self, _buffer: u32) {}

    fn delete_buffer(&self, _buffer: u32) {
        self.ledger.borrow_mut().buffers -= 1;
    }

    fn enable_vertex_attrib(&self, binding: &VertexAttributeBinding) {
        self.ledger.borrow_mut().enabled_attributes.push(binding.clone());
    }

    fn create_texture_rgba(&self, _width: u32, _height: u32, _pixels: &[u8]) -> ApiResult<u32> {
        self.ledger.borrow_mut().textures += 1;
        Ok(self.objects.borrow_mut().id())
    }

    fn bind_texture(&self, _unit: u32, _texture: u32) {}

    fn delete_texture(&self, _texture: u32) {
        self.ledger.borrow_mut().textures -= 1;
    }

    fn clear_color(&self, rgba: [f32; 4]) {
        self.ledger.borrow_mut().clear_color = Some(rgba);
    }

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        self.ledger.borrow_mut().viewport = Some([x, y, width, height]);
    }

    fn clear_color_buffer(&self) {
        self.ledger.borrow_mut().clears += 1;
    }

    fn draw_triangle_fan(&self, count: i32) {
        let mut ledger = self.ledger.borrow_mut();
        ledger.draws.push(count);
        if self.faults.draw_error_on == Some(ledger.draws.len()) {
            self.objects.borrow_mut().pending_error = INVALID_OPERATION;
        }
    }

    fn get_error(&self) -> u32 {
        std::mem::replace(&mut self.objects.borrow_mut().pending_error, NO_ERROR)
    }
}

/// Window fake with scripted input
pub struct FakeWindow {
    ledger: Shared,
    pub termination: TerminationFlag,
    pub window_handle: Option<RawWindowHandle>,
    pub display_handle: Option<RawDisplayHandle>,
    pub size: (u32, u32),
    /// Commands returned by successive drains
    pub script: VecDeque<Vec<InputCommand>>,
    /// Raise the termination flag during this (1-based) drain
    pub terminate_after_drains: Option<u32>,
    drains: u32,
}

impl WindowSystem for FakeWindow {
    fn display_handle(&self) -> Option<RawDisplayHandle> {
        self.display_handle
    }

    fn window_handle(&self) -> Option<RawWindowHandle> {
        self.window_handle
    }

    fn size(&self) -> (u32, u32) {
        self.size
    }

    fn termination(&self) -> &TerminationFlag {
        &self.termination
    }

    fn drain_events(&mut self) -> Vec<InputCommand> {
        self.drains += 1;
        if self.terminate_after_drains == Some(self.drains) {
            self.termination.request();
        }
        self.script.pop_front().unwrap_or_default()
    }

    fn shutdown(&mut self) {
        self.ledger.borrow_mut().window_shutdowns += 1;
    }
}

/// Pixel source returning a solid 2x2 image, or a decode error for `missing.*`
pub struct FakePixels;

impl PixelSource for FakePixels {
    fn load(&self, path: &str) -> Result<ImageData, DecodeError> {
        if path.starts_with("missing") {
            return Err(DecodeError {
                path: path.to_string(),
                reason: "file not found".to_string(),
            });
        }
        Ok(ImageData::solid_color(2, 2, [255, 0, 0, 255]))
    }
}
