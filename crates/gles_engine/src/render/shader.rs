//! Shader compiler and linker
//!
//! Compiles one vertex and one fragment stage and links them into a single
//! program. Attribute indices are bound before the link. Failed objects are
//! deleted before the error is returned, so a failure never leaks a shader or
//! a program. Uniform lookups are not cached here.

use std::fmt;

use crate::render::api::{GlApi, ShaderStage};
use crate::render::error::{RenderError, RenderResult};
use crate::render::geometry::VertexAttributeBinding;

/// Linked program and the shader objects attached to it
pub struct ShaderProgram<G: GlApi> {
    handle: G::Program,
    shaders: [G::Shader; 2],
}

impl<G: GlApi> fmt::Debug for ShaderProgram<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShaderProgram")
            .field("handle", &self.handle)
            .field("shaders", &self.shaders)
            .finish()
    }
}

impl<G: GlApi> ShaderProgram<G> {
    /// Program name
    pub fn handle(&self) -> G::Program {
        self.handle
    }
}

/// Compile `source` as a `stage` shader
pub fn compile<G: GlApi>(gl: &G, source: &str, stage: ShaderStage) -> RenderResult<G::Shader> {
    let shader = gl.create_shader(stage).map_err(|e| RenderError::CompilationFailed {
        stage,
        diagnostic: e.to_string(),
    })?;

    gl.shader_source(shader, source);
    gl.compile_shader(shader);

    if !gl.compile_status(shader) {
        let diagnostic = gl.shader_info_log(shader);
        gl.delete_shader(shader);
        log::error!("{:?} shader failed to compile: {}", stage, diagnostic);
        return Err(RenderError::CompilationFailed { stage, diagnostic });
    }

    log::debug!("Compiled {:?} shader {:?}", stage, shader);
    Ok(shader)
}

/// Link a vertex and fragment shader, binding each attribute to its index first
///
/// On failure the program is deleted and the shaders are left to the caller.
pub fn link<G: GlApi>(
    gl: &G,
    vertex: G::Shader,
    fragment: G::Shader,
    bindings: &[VertexAttributeBinding],
) -> RenderResult<ShaderProgram<G>> {
    let program = gl.create_program().map_err(|e| RenderError::LinkFailed {
        diagnostic: e.to_string(),
    })?;

    gl.attach_shader(program, vertex);
    gl.attach_shader(program, fragment);
    for binding in bindings {
        gl.bind_attrib_location(program, binding.index, &binding.name);
    }
    gl.link_program(program);

    if !gl.link_status(program) {
        let diagnostic = gl.program_info_log(program);
        gl.delete_program(program);
        log::error!("Program failed to link: {}", diagnostic);
        return Err(RenderError::LinkFailed { diagnostic });
    }

    log::info!("Linked program {:?} with {} attribute binding(s)", program, bindings.len());
    Ok(ShaderProgram {
        handle: program,
        shaders: [vertex, fragment],
    })
}

/// Compile both stages and link them, deleting whatever was created if a step fails
pub fn build_program<G: GlApi>(
    gl: &G,
    vertex_source: &str,
    fragment_source: &str,
    bindings: &[VertexAttributeBinding],
) -> RenderResult<ShaderProgram<G>> {
    let vertex = compile(gl, vertex_source, ShaderStage::Vertex)?;
    let fragment = match compile(gl, fragment_source, ShaderStage::Fragment) {
        Ok(fragment) => fragment,
        Err(e) => {
            release_shader(gl, vertex);
            return Err(e);
        }
    };

    link(gl, vertex, fragment, bindings).map_err(|e| {
        release_shader(gl, vertex);
        release_shader(gl, fragment);
        e
    })
}

/// Location of a uniform that the linked program actually uses
pub fn resolve_uniform<G: GlApi>(gl: &G, program: &ShaderProgram<G>, name: &str) -> RenderResult<G::UniformLocation> {
    gl.uniform_location(program.handle, name)
        .ok_or_else(|| RenderError::UnknownUniform(name.to_string()))
}

/// Check every binding landed on its declared index
pub fn validate_bindings<G: GlApi>(
    gl: &G,
    program: &ShaderProgram<G>,
    bindings: &[VertexAttributeBinding],
) -> RenderResult<()> {
    for binding in bindings {
        let actual = gl.attrib_location(program.handle, &binding.name);
        if actual != Some(binding.index) {
            return Err(RenderError::AttributeBindingMismatch {
                name: binding.name.clone(),
                expected: binding.index,
                actual,
            });
        }
    }
    Ok(())
}

/// Delete a shader object
pub fn release_shader<G: GlApi>(gl: &G, shader: G::Shader) {
    gl.delete_shader(shader);
}

/// Delete a program and the shaders attached to it
pub fn release_program<G: GlApi>(gl: &G, program: ShaderProgram<G>) {
    for shader in program.shaders {
        gl.delete_shader(shader);
    }
    gl.delete_program(program.handle);
    log::debug!("Released program {:?}", program.handle);
}
