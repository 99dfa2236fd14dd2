//! Lifecycle controller
//!
//! Owns one run: bootstrap the display and program, drive frames, then tear
//! everything down. Success and failure leave through the same teardown,
//! which runs exactly once.

use crate::assets::PixelSource;
use crate::core::ApplicationConfig;
use crate::render::api::{DisplayApi, GlApi, SurfaceSize};
use crate::render::error::{RenderError, RenderResult};
use crate::render::frame::{FrameDriver, FrameScene, TerminationReason};
use crate::render::geometry::Geometry;
use crate::render::shader::{self, ShaderProgram};
use crate::render::surface::{self as surface_mgr, SurfaceContextManager};
use crate::render::texture;
use crate::render::window::WindowSystem;

/// Texture sampled by the fragment shader
#[derive(Debug, Clone)]
pub struct SceneTexture {
    /// Image path handed to the pixel source
    pub path: String,
    /// Sampler uniform set to the texture unit
    pub sampler_uniform: String,
}

/// What one run draws
#[derive(Debug, Clone)]
pub struct Scene {
    /// Vertex shader text
    pub vertex_source: String,
    /// Fragment shader text
    pub fragment_source: String,
    /// Vertex data and attribute table
    pub geometry: Geometry,
    /// Matrix uniform updated every frame, if the vertex shader has one
    pub transform_uniform: Option<String>,
    /// Optional texture
    pub texture: Option<SceneTexture>,
}

/// How a completed run went
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSummary {
    /// Frames presented
    pub frames: u64,
    /// Average frames per second
    pub average_fps: f32,
    /// Why the loop stopped
    pub reason: TerminationReason,
}

/// GPU objects created after the context became current
struct GpuObjects<G: GlApi> {
    gl: G,
    program: Option<ShaderProgram<G>>,
    vertex_buffer: Option<G::Buffer>,
    texture: Option<G::Texture>,
}

impl<G: GlApi> GpuObjects<G> {
    fn release(&mut self) {
        if let Some(texture) = self.texture.take() {
            self.gl.delete_texture(texture);
        }
        if let Some(buffer) = self.vertex_buffer.take() {
            self.gl.delete_buffer(buffer);
        }
        if let Some(program) = self.program.take() {
            shader::release_program(&self.gl, program);
        }
    }
}

/// Sequences bootstrap, frame loop and teardown
pub struct LifecycleController<D: DisplayApi> {
    surface: SurfaceContextManager<D>,
    objects: Option<GpuObjects<D::Gl>>,
    torn_down: bool,
}

impl<D: DisplayApi> LifecycleController<D> {
    /// Controller over a display API
    pub fn new(api: D) -> Self {
        Self {
            surface: SurfaceContextManager::new(api),
            objects: None,
            torn_down: false,
        }
    }

    /// Bootstrap, render until termination, and tear down
    ///
    /// A controller can run again after a previous run finished.
    pub fn run<W, P>(
        &mut self,
        config: &ApplicationConfig,
        scene: &Scene,
        window: &mut W,
        pixels: &P,
    ) -> RenderResult<RunSummary>
    where
        W: WindowSystem,
        P: PixelSource + ?Sized,
    {
        // Each run owns its teardown
        self.torn_down = false;
        let mut driver = FrameDriver::new(config.animation.clone(), config.engine.frame_limit);
        let result = self.bootstrap_and_render(config, scene, window, pixels, &mut driver);

        if let Err(e) = &result {
            log::error!("Run failed: {}", e);
            if let Some(diagnostic) = e.diagnostic() {
                log::error!("Shader diagnostic:\n{}", diagnostic);
            }
        }
        self.teardown(window);

        log::info!(
            "Rendered {} frame(s) at {:.1} fps, final state {:?}",
            driver.frames(),
            driver.average_fps(),
            driver.state()
        );

        let reason = result?;
        Ok(RunSummary {
            frames: driver.frames(),
            average_fps: driver.average_fps(),
            reason,
        })
    }

    fn bootstrap_and_render<W, P>(
        &mut self,
        config: &ApplicationConfig,
        scene: &Scene,
        window: &mut W,
        pixels: &P,
        driver: &mut FrameDriver,
    ) -> RenderResult<TerminationReason>
    where
        W: WindowSystem,
        P: PixelSource + ?Sized,
    {
        let (requirements, attributes) = surface_mgr::requirements_from(&config.surface);
        let (width, height) = window.size();

        self.surface.acquire_display(window.display_handle())?;
        self.surface.initialize()?;
        self.surface.select_configuration(&requirements, config.surface.config_slots)?;
        self.surface.create_surface(window.window_handle(), SurfaceSize { width, height })?;
        self.surface.create_context(&attributes)?;
        self.surface.make_current()?;

        let gl = self.surface.load_gl()?;
        let objects = self.objects.insert(GpuObjects {
            gl,
            program: None,
            vertex_buffer: None,
            texture: None,
        });
        let gl = &objects.gl;

        let geometry = &scene.geometry;
        let program: &ShaderProgram<D::Gl> = objects.program.insert(shader::build_program(
            gl,
            &scene.vertex_source,
            &scene.fragment_source,
            geometry.bindings(),
        )?);
        shader::validate_bindings(gl, program, geometry.bindings())?;

        let transform = scene
            .transform_uniform
            .as_deref()
            .map(|name| shader::resolve_uniform(gl, program, name))
            .transpose()?;
        let sampler = scene
            .texture
            .as_ref()
            .map(|t| shader::resolve_uniform(gl, program, &t.sampler_uniform))
            .transpose()?;

        let vertex_count = i32::try_from(geometry.vertex_count())
            .map_err(|_| RenderError::InvalidGeometry("too many vertices".to_string()))?;
        let vertex_buffer = gl
            .create_vertex_buffer(geometry.vertices())
            .map_err(RenderError::DrawFailed)?;
        objects.vertex_buffer = Some(vertex_buffer);

        if let Some(scene_texture) = &scene.texture {
            objects.texture = Some(texture::load_texture(gl, pixels, &scene_texture.path)?);
        }

        let program = program.handle();
        gl.use_program(program);
        if let Some(sampler) = &sampler {
            gl.uniform_sampler(sampler, texture::TEXTURE_UNIT as i32);
        }
        let [x, y, w, h] = config.viewport();
        gl.viewport(x, y, w, h);
        gl.clear_color(config.renderer.clear_color);

        let frame_scene = FrameScene {
            gl,
            program,
            transform: transform.as_ref(),
            vertex_buffer,
            bindings: geometry.bindings(),
            vertex_count,
        };
        driver.run(&mut self.surface, &frame_scene, window)
    }

    /// Release program, buffers, context, display and window, once
    pub fn teardown<W: WindowSystem>(&mut self, window: &mut W) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;

        if let Some(mut objects) = self.objects.take() {
            objects.release();
        }
        self.surface.teardown();
        window.shutdown();
    }

    /// Surface manager, for inspection
    pub fn surface(&self) -> &SurfaceContextManager<D> {
        &self.surface
    }
}

impl<D: DisplayApi> Drop for LifecycleController<D> {
    fn drop(&mut self) {
        if let Some(mut objects) = self.objects.take() {
            objects.release();
        }
        self.surface.teardown();
    }
}
