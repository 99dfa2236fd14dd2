//! GLES2-shaped GL calls
//!
//! Object creation reports failure through [`ApiResult`]. Everything else
//! mirrors GL: state-setting calls return nothing and errors surface through
//! [`GlApi::get_error`].

use super::ApiResult;
use crate::render::geometry::VertexAttributeBinding;

/// `GL_NO_ERROR`
pub const NO_ERROR: u32 = 0;

/// Shader stage kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    /// Vertex shader
    Vertex,
    /// Fragment shader
    Fragment,
}

/// GLES2 function table
pub trait GlApi {
    /// Shader object name
    type Shader: Copy + std::fmt::Debug;
    /// Program object name
    type Program: Copy + std::fmt::Debug;
    /// Resolved uniform location
    type UniformLocation: Clone + std::fmt::Debug;
    /// Buffer object name
    type Buffer: Copy + std::fmt::Debug;
    /// Texture object name
    type Texture: Copy + std::fmt::Debug;

    // Shaders and programs

    /// Create an empty shader of `stage`
    fn create_shader(&self, stage: ShaderStage) -> ApiResult<Self::Shader>;
    /// Replace the shader's source text
    fn shader_source(&self, shader: Self::Shader, source: &str);
    /// Compile the shader's source
    fn compile_shader(&self, shader: Self::Shader);
    /// Whether the last compile succeeded
    fn compile_status(&self, shader: Self::Shader) -> bool;
    /// Compiler info log, possibly empty
    fn shader_info_log(&self, shader: Self::Shader) -> String;
    /// Delete a shader object
    fn delete_shader(&self, shader: Self::Shader);

    /// Create an empty program
    fn create_program(&self) -> ApiResult<Self::Program>;
    /// Attach a compiled shader
    fn attach_shader(&self, program: Self::Program, shader: Self::Shader);
    /// Bind an attribute name to an index; takes effect at the next link
    fn bind_attrib_location(&self, program: Self::Program, index: u32, name: &str);
    /// Link the attached shaders
    fn link_program(&self, program: Self::Program);
    /// Whether the last link succeeded
    fn link_status(&self, program: Self::Program) -> bool;
    /// Linker info log, possibly empty
    fn program_info_log(&self, program: Self::Program) -> String;
    /// Delete a program object
    fn delete_program(&self, program: Self::Program);
    /// Install the program for drawing
    fn use_program(&self, program: Self::Program);

    /// Attribute index after link, `None` when inactive
    fn attrib_location(&self, program: Self::Program, name: &str) -> Option<u32>;
    /// Uniform location after link, `None` when inactive
    fn uniform_location(&self, program: Self::Program, name: &str) -> Option<Self::UniformLocation>;
    /// Upload a column-major 4x4 matrix, untransposed
    fn uniform_matrix4(&self, location: &Self::UniformLocation, matrix: &[f32; 16]);
    /// Point a sampler uniform at a texture unit
    fn uniform_sampler(&self, location: &Self::UniformLocation, unit: i32);

    // Vertex data

    /// Create a static array buffer holding `data`
    fn create_vertex_buffer(&self, data: &[f32]) -> ApiResult<Self::Buffer>;
    /// Bind an array buffer
    fn bind_vertex_buffer(&self, buffer: Self::Buffer);
    /// Delete a buffer
    fn delete_buffer(&self, buffer: Self::Buffer);
    /// Describe and enable one float attribute of the bound buffer
    fn enable_vertex_attrib(&self, binding: &VertexAttributeBinding);

    // Textures

    /// Create a 2D RGBA8 texture with linear filtering and clamp-to-edge wrapping
    fn create_texture_rgba(&self, width: u32, height: u32, pixels: &[u8]) -> ApiResult<Self::Texture>;
    /// Bind a 2D texture to `unit`
    fn bind_texture(&self, unit: u32, texture: Self::Texture);
    /// Delete a texture
    fn delete_texture(&self, texture: Self::Texture);

    // Frame

    /// Set the clear colour
    fn clear_color(&self, rgba: [f32; 4]);
    /// Set the viewport
    fn viewport(&self, x: i32, y: i32, width: i32, height: i32);
    /// Clear the colour buffer
    fn clear_color_buffer(&self);
    /// Non-indexed triangle fan over `count` vertices
    fn draw_triangle_fan(&self, count: i32);
    /// Pop the oldest error flag, [`NO_ERROR`] when clear
    fn get_error(&self) -> u32;
}
