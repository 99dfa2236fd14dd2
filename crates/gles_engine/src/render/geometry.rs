//! Vertex data and its attribute table
//!
//! A [`Geometry`] is a flat `f32` buffer plus the [`VertexAttributeBinding`]s
//! that say how each vertex is sliced into shader attributes. Strides and
//! offsets are counted in floats; the GL backend converts them to bytes.

use crate::foundation::math::utils::deg_to_rad;
use crate::render::error::{RenderError, RenderResult};

/// How one named attribute is read from the interleaved buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VertexAttributeBinding {
    /// Attribute name in the vertex shader
    pub name: String,
    /// Attribute index bound before linking
    pub index: u32,
    /// Floats per vertex for this attribute (1..=4)
    pub components: u32,
    /// Floats between consecutive vertices
    pub stride: u32,
    /// Floats from the start of a vertex to this attribute
    pub offset: u32,
}

impl VertexAttributeBinding {
    /// Create a binding
    pub fn new(name: impl Into<String>, index: u32, components: u32, stride: u32, offset: u32) -> Self {
        Self {
            name: name.into(),
            index,
            components,
            stride,
            offset,
        }
    }

    /// Stride in bytes
    pub fn stride_bytes(&self) -> i32 {
        (self.stride as usize * std::mem::size_of::<f32>()) as i32
    }

    /// Offset in bytes
    pub fn offset_bytes(&self) -> i32 {
        (self.offset as usize * std::mem::size_of::<f32>()) as i32
    }
}

/// Vertex buffer contents and attribute layout for one fan draw
#[derive(Debug, Clone)]
pub struct Geometry {
    vertices: Vec<f32>,
    floats_per_vertex: u32,
    bindings: Vec<VertexAttributeBinding>,
}

impl Geometry {
    /// Create geometry, rejecting buffers that do not fit the attribute table
    pub fn new(
        vertices: Vec<f32>,
        floats_per_vertex: u32,
        bindings: Vec<VertexAttributeBinding>,
    ) -> RenderResult<Self> {
        if floats_per_vertex == 0 {
            return Err(RenderError::InvalidGeometry("vertex stride is zero".to_string()));
        }
        if vertices.is_empty() {
            return Err(RenderError::InvalidGeometry("no vertices".to_string()));
        }
        if vertices.len() % floats_per_vertex as usize != 0 {
            return Err(RenderError::InvalidGeometry(format!(
                "{} floats is not a whole number of {}-float vertices",
                vertices.len(),
                floats_per_vertex
            )));
        }
        if bindings.is_empty() {
            return Err(RenderError::InvalidGeometry("no attribute bindings".to_string()));
        }

        for (i, binding) in bindings.iter().enumerate() {
            if !(1..=4).contains(&binding.components) {
                return Err(RenderError::InvalidGeometry(format!(
                    "attribute '{}' has {} components",
                    binding.name, binding.components
                )));
            }
            if binding.stride != floats_per_vertex || binding.offset + binding.components > binding.stride {
                return Err(RenderError::InvalidGeometry(format!(
                    "attribute '{}' does not fit a {}-float vertex",
                    binding.name, floats_per_vertex
                )));
            }
            if bindings[..i].iter().any(|b| b.index == binding.index || b.name == binding.name) {
                return Err(RenderError::InvalidGeometry(format!(
                    "attribute '{}' or index {} bound twice",
                    binding.name, binding.index
                )));
            }
        }

        Ok(Self {
            vertices,
            floats_per_vertex,
            bindings,
        })
    }

    /// Unit-ish textured quad: position(3) + uv(2), bound to indices 0 and 1
    pub fn textured_quad() -> Self {
        #[rustfmt::skip]
        let vertices = vec![
            -0.5,  0.5, 0.0,   0.0, 1.0,
            -0.5, -0.5, 0.0,   0.0, 0.0,
             0.5, -0.5, 0.0,   1.0, 0.0,
             0.5,  0.5, 0.0,   1.0, 1.0,
        ];
        Self {
            vertices,
            floats_per_vertex: 5,
            bindings: vec![
                VertexAttributeBinding::new("position", 0, 3, 5, 0),
                VertexAttributeBinding::new("uv", 1, 2, 5, 3),
            ],
        }
    }

    /// Regular polygon with a flat bottom edge, 2D positions bound to index 0
    ///
    /// Vertex `k` sits at `270 - 180/n + k * 360/n` degrees, so the fan apex is
    /// the bottom-left corner and no centre point is emitted.
    pub fn regular_polygon(sides: u32, radius: f32) -> RenderResult<Self> {
        if sides < 3 {
            return Err(RenderError::InvalidGeometry(format!("a polygon needs 3 sides, got {}", sides)));
        }
        let n = sides as f32;
        let vertices = (0..sides)
            .flat_map(|k| {
                let angle = deg_to_rad(270.0 - 180.0 / n + k as f32 * 360.0 / n);
                [radius * angle.cos(), radius * angle.sin()]
            })
            .collect();
        Self::new(vertices, 2, vec![VertexAttributeBinding::new("position", 0, 2, 2, 0)])
    }

    /// Heart outline: a square with two half-circle lobes, 3D positions bound to index 0
    pub fn heart(radius: f32, step_deg: f32) -> RenderResult<Self> {
        if step_deg <= 0.0 {
            return Err(RenderError::InvalidGeometry("arc step must be positive".to_string()));
        }
        let r = radius;
        #[rustfmt::skip]
        let mut vertices = vec![
            -r,  r, 0.0,
            -r, -r, 0.0,
             r, -r, 0.0,
             r,  r, 0.0,
        ];

        // Upper lobe around (0, r), then right lobe around (r, 0)
        for angle in arc_steps(0.0, 180.0, step_deg) {
            let a = deg_to_rad(angle);
            vertices.extend_from_slice(&[r * a.cos(), r + r * a.sin(), 0.0]);
        }
        for angle in arc_steps(-90.0, 90.0, step_deg) {
            let a = deg_to_rad(angle);
            vertices.extend_from_slice(&[r + r * a.cos(), r * a.sin(), 0.0]);
        }

        Self::new(vertices, 3, vec![VertexAttributeBinding::new("position", 0, 3, 3, 0)])
    }

    /// Flat vertex data
    pub fn vertices(&self) -> &[f32] {
        &self.vertices
    }

    /// Attribute table
    pub fn bindings(&self) -> &[VertexAttributeBinding] {
        &self.bindings
    }

    /// Floats per vertex
    pub fn floats_per_vertex(&self) -> u32 {
        self.floats_per_vertex
    }

    /// Number of vertices the fan draw requests
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / self.floats_per_vertex as usize
    }
}

/// Inclusive angles from `start` to `end`, indexed so rounding never skips the end point
fn arc_steps(start: f32, end: f32, step: f32) -> impl Iterator<Item = f32> {
    let count = ((end - start) / step + 1e-4).floor() as u32;
    (0..=count).map(move |i| start + i as f32 * step)
}
