//! Frame driver
//!
//! `Idle → Rendering → Terminated`. The driver enters `Rendering` when handed
//! a [`FrameScene`], which can only be built from a linked program, its
//! resolved transform location and an uploaded vertex buffer. Each iteration:
//!
//! 1. stop if termination was requested (never mid-draw)
//! 2. advance the animation state
//! 3. rebuild the frame transform
//! 4. clear
//! 5. upload the transform
//! 6. bind attributes and draw one triangle fan
//! 7. check for a GL error
//! 8. present
//! 9. drain window events once, without blocking
//!
//! A failure in steps 4 to 8 terminates the loop; nothing is retried.

use crate::core::AnimationConfig;
use crate::foundation::time::Timer;
use crate::render::animation::{AnimationState, FrameTransform};
use crate::render::api::{ApiCallError, DisplayApi, GlApi, NO_ERROR};
use crate::render::error::{RenderError, RenderResult};
use crate::render::geometry::VertexAttributeBinding;
use crate::render::surface::SurfaceContextManager;
use crate::render::window::WindowSystem;

/// Why the loop ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationReason {
    /// The window system requested shutdown
    Requested,
    /// The configured frame limit was reached
    FrameLimit,
    /// A draw failed
    DrawFailed,
    /// A present failed
    PresentFailed,
}

/// Frame driver state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameState {
    /// Waiting for a scene
    Idle,
    /// Rendering frames
    Rendering,
    /// Loop ended
    Terminated(TerminationReason),
}

/// Result of one iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// A frame was presented
    Presented,
    /// The loop ended without error
    Stopped(TerminationReason),
}

/// Everything a frame draws with
pub struct FrameScene<'a, G: GlApi> {
    /// GL function table
    pub gl: &'a G,
    /// Linked program in use
    pub program: G::Program,
    /// Transform uniform, when the vertex shader has one
    pub transform: Option<&'a G::UniformLocation>,
    /// Uploaded vertex data
    pub vertex_buffer: G::Buffer,
    /// Attribute table for the buffer
    pub bindings: &'a [VertexAttributeBinding],
    /// Vertices per fan draw
    pub vertex_count: i32,
}

/// Drives the per-frame loop
pub struct FrameDriver {
    state: FrameState,
    animation: AnimationState,
    config: AnimationConfig,
    frame_limit: Option<u64>,
    timer: Timer,
    last_transform: Option<FrameTransform>,
}

impl FrameDriver {
    /// Idle driver for `config`
    pub fn new(config: AnimationConfig, frame_limit: Option<u64>) -> Self {
        Self {
            state: FrameState::Idle,
            animation: AnimationState::new(&config),
            config,
            frame_limit,
            timer: Timer::new(),
            last_transform: None,
        }
    }

    /// Current state
    pub fn state(&self) -> FrameState {
        self.state
    }

    /// Current animation state
    pub fn animation(&self) -> &AnimationState {
        &self.animation
    }

    /// Transform uploaded by the most recent frame
    pub fn last_transform(&self) -> Option<FrameTransform> {
        self.last_transform
    }

    /// Frames presented so far
    pub fn frames(&self) -> u64 {
        self.timer.frame_count()
    }

    /// Average presented frames per second
    pub fn average_fps(&self) -> f32 {
        self.timer.average_fps()
    }

    /// Enter `Rendering` with the program bound
    pub fn begin<G: GlApi>(&mut self, scene: &FrameScene<'_, G>) {
        if self.state != FrameState::Idle {
            return;
        }
        scene.gl.use_program(scene.program);
        self.timer = Timer::new();
        self.state = FrameState::Rendering;
        log::info!("Rendering {} vertices per frame", scene.vertex_count);
    }

    /// Run until termination, returning why the loop stopped
    pub fn run<D, W>(
        &mut self,
        surface: &mut SurfaceContextManager<D>,
        scene: &FrameScene<'_, D::Gl>,
        window: &mut W,
    ) -> RenderResult<TerminationReason>
    where
        D: DisplayApi,
        W: WindowSystem,
    {
        self.begin(scene);
        loop {
            if let FrameOutcome::Stopped(reason) = self.step(surface, scene, window)? {
                return Ok(reason);
            }
        }
    }

    /// Run one iteration
    pub fn step<D, W>(
        &mut self,
        surface: &mut SurfaceContextManager<D>,
        scene: &FrameScene<'_, D::Gl>,
        window: &mut W,
    ) -> RenderResult<FrameOutcome>
    where
        D: DisplayApi,
        W: WindowSystem,
    {
        match self.state {
            FrameState::Rendering => {}
            FrameState::Terminated(reason) => return Ok(FrameOutcome::Stopped(reason)),
            FrameState::Idle => self.begin(scene),
        }

        if window.terminate_requested() {
            log::info!("Termination requested");
            return Ok(self.stop(TerminationReason::Requested));
        }
        if self.frame_limit.is_some_and(|limit| self.timer.frame_count() >= limit) {
            log::info!("Frame limit reached");
            return Ok(self.stop(TerminationReason::FrameLimit));
        }

        self.animation.advance(&self.config);
        let transform = self.animation.transform();

        if let Err(e) = self.draw(scene, &transform) {
            log::error!("{}", e);
            self.stop(TerminationReason::DrawFailed);
            return Err(e);
        }
        self.last_transform = Some(transform);

        if let Err(e) = surface.present() {
            log::error!("{}", e);
            self.stop(TerminationReason::PresentFailed);
            return Err(e);
        }
        self.timer.tick();
        log::trace!(
            "Frame {} presented after {:.2} ms",
            self.timer.frame_count(),
            self.timer.delta_time() * 1000.0
        );

        for command in window.drain_events() {
            self.animation.apply(command, &self.config);
        }
        Ok(FrameOutcome::Presented)
    }

    fn draw<G: GlApi>(&self, scene: &FrameScene<'_, G>, transform: &FrameTransform) -> RenderResult<()> {
        let gl = scene.gl;
        gl.clear_color_buffer();

        if let Some(location) = scene.transform {
            gl.uniform_matrix4(location, &transform.to_column_major());
        }

        gl.bind_vertex_buffer(scene.vertex_buffer);
        for binding in scene.bindings {
            gl.enable_vertex_attrib(binding);
        }
        gl.draw_triangle_fan(scene.vertex_count);

        match gl.get_error() {
            NO_ERROR => Ok(()),
            code => Err(RenderError::DrawFailed(ApiCallError::new(
                "glDrawArrays",
                format!("GL error 0x{:04X}", code),
            ))),
        }
    }

    fn stop(&mut self, reason: TerminationReason) -> FrameOutcome {
        self.state = FrameState::Terminated(reason);
        FrameOutcome::Stopped(reason)
    }
}
