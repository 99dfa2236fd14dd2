//! GLES2 calls through glow

use glow::HasContext;

use crate::render::api::{ApiCallError, ApiResult, GlApi, ShaderStage};
use crate::render::geometry::VertexAttributeBinding;

/// [`GlApi`] over a glow context
pub struct GlowGl {
    gl: glow::Context,
}

impl GlowGl {
    /// Wrap a loaded glow context
    pub fn new(gl: glow::Context) -> Self {
        Self { gl }
    }
}

fn stage_enum(stage: ShaderStage) -> u32 {
    match stage {
        ShaderStage::Vertex => glow::VERTEX_SHADER,
        ShaderStage::Fragment => glow::FRAGMENT_SHADER,
    }
}

impl GlApi for GlowGl {
    type Shader = <glow::Context as HasContext>::Shader;
    type Program = <glow::Context as HasContext>::Program;
    type UniformLocation = <glow::Context as HasContext>::UniformLocation;
    type Buffer = <glow::Context as HasContext>::Buffer;
    type Texture = <glow::Context as HasContext>::Texture;

    fn create_shader(&self, stage: ShaderStage) -> ApiResult<Self::Shader> {
        unsafe { self.gl.create_shader(stage_enum(stage)) }.map_err(|e| ApiCallError::new("glCreateShader", e))
    }

    fn shader_source(&self, shader: Self::Shader, source: &str) {
        unsafe { self.gl.shader_source(shader, source) }
    }

    fn compile_shader(&self, shader: Self::Shader) {
        unsafe { self.gl.compile_shader(shader) }
    }

    fn compile_status(&self, shader: Self::Shader) -> bool {
        unsafe { self.gl.get_shader_compile_status(shader) }
    }

    fn shader_info_log(&self, shader: Self::Shader) -> String {
        unsafe { self.gl.get_shader_info_log(shader) }
    }

    fn delete_shader(&self, shader: Self::Shader) {
        unsafe { self.gl.delete_shader(shader) }
    }

    fn create_program(&self) -> ApiResult<Self::Program> {
        unsafe { self.gl.create_program() }.map_err(|e| ApiCallError::new("glCreateProgram", e))
    }

    fn attach_shader(&self, program: Self::Program, shader: Self::Shader) {
        unsafe { self.gl.attach_shader(program, shader) }
    }

    fn bind_attrib_location(&self, program: Self::Program, index: u32, name: &str) {
        unsafe { self.gl.bind_attrib_location(program, index, name) }
    }

    fn link_program(&self, program: Self::Program) {
        unsafe { self.gl.link_program(program) }
    }

    fn link_status(&self, program: Self::Program) -> bool {
        unsafe { self.gl.get_program_link_status(program) }
    }

    fn program_info_log(&self, program: Self::Program) -> String {
        unsafe { self.gl.get_program_info_log(program) }
    }

    fn delete_program(&self, program: Self::Program) {
        unsafe { self.gl.delete_program(program) }
    }

    fn use_program(&self, program: Self::Program) {
        unsafe { self.gl.use_program(Some(program)) }
    }

    fn attrib_location(&self, program: Self::Program, name: &str) -> Option<u32> {
        unsafe { self.gl.get_attrib_location(program, name) }
    }

    fn uniform_location(&self, program: Self::Program, name: &str) -> Option<Self::UniformLocation> {
        unsafe { self.gl.get_uniform_location(program, name) }
    }

    fn uniform_matrix4(&self, location: &Self::UniformLocation, matrix: &[f32; 16]) {
        unsafe { self.gl.uniform_matrix_4_f32_slice(Some(location), false, matrix) }
    }

    fn uniform_sampler(&self, location: &Self::UniformLocation, unit: i32) {
        unsafe { self.gl.uniform_1_i32(Some(location), unit) }
    }

    fn create_vertex_buffer(&self, data: &[f32]) -> ApiResult<Self::Buffer> {
        unsafe {
            let buffer = self
                .gl
                .create_buffer()
                .map_err(|e| ApiCallError::new("glGenBuffers", e))?;
            self.gl.bind_buffer(glow::ARRAY_BUFFER, Some(buffer));
            self.gl
                .buffer_data_u8_slice(glow::ARRAY_BUFFER, bytemuck::cast_slice(data), glow::STATIC_DRAW);
            Ok(buffer)
        }
    }

    fn bind_vertex_buffer(&self, buffer: Self::Buffer) {
        unsafe { self.gl.bind_buffer(glow::ARRAY_BUFFER, Some(buffer)) }
    }

    fn delete_buffer(&self, buffer: Self::Buffer) {
        unsafe { self.gl.delete_buffer(buffer) }
    }

    fn enable_vertex_attrib(&self, binding: &VertexAttributeBinding) {
        unsafe {
            self.gl.vertex_attrib_pointer_f32(
                binding.index,
                binding.components as i32,
                glow::FLOAT,
                false,
                binding.stride_bytes(),
                binding.offset_bytes(),
            );
            self.gl.enable_vertex_attrib_array(binding.index);
        }
    }

    fn create_texture_rgba(&self, width: u32, height: u32, pixels: &[u8]) -> ApiResult<Self::Texture> {
        unsafe {
            let texture = self
                .gl
                .create_texture()
                .map_err(|e| ApiCallError::new("glGenTextures", e))?;
            self.gl.bind_texture(glow::TEXTURE_2D, Some(texture));
            self.gl
                .tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MIN_FILTER, glow::LINEAR as i32);
            self.gl
                .tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MAG_FILTER, glow::LINEAR as i32);
            self.gl
                .tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_S, glow::CLAMP_TO_EDGE as i32);
            self.gl
                .tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_T, glow::CLAMP_TO_EDGE as i32);
            self.gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                glow::RGBA as i32,
                width as i32,
                height as i32,
                0,
                glow::RGBA,
                glow::UNSIGNED_BYTE,
                Some(pixels),
            );

            match self.gl.get_error() {
                glow::NO_ERROR => Ok(texture),
                code => {
                    self.gl.delete_texture(texture);
                    Err(ApiCallError::new("glTexImage2D", format!("GL error 0x{:04X}", code)))
                }
            }
        }
    }

    fn bind_texture(&self, unit: u32, texture: Self::Texture) {
        unsafe {
            self.gl.active_texture(glow::TEXTURE0 + unit);
            self.gl.bind_texture(glow::TEXTURE_2D, Some(texture));
        }
    }

    fn delete_texture(&self, texture: Self::Texture) {
        unsafe { self.gl.delete_texture(texture) }
    }

    fn clear_color(&self, rgba: [f32; 4]) {
        let [r, g, b, a] = rgba;
        unsafe { self.gl.clear_color(r, g, b, a) }
    }

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        unsafe { self.gl.viewport(x, y, width, height) }
    }

    fn clear_color_buffer(&self) {
        unsafe { self.gl.clear(glow::COLOR_BUFFER_BIT) }
    }

    fn draw_triangle_fan(&self, count: i32) {
        unsafe { self.gl.draw_arrays(glow::TRIANGLE_FAN, 0, count) }
    }

    fn get_error(&self) -> u32 {
        unsafe { self.gl.get_error() }
    }
}
