//! Math utilities and types
//!
//! Every transform uploaded to a shader is built by [`rotation_scale_matrix`].
//!
//! # Numeric convention
//!
//! - Matrices are stored column-major (nalgebra's native layout) and uploaded
//!   with `transpose = false`.
//! - A positive angle rotates counter-clockwise about the chosen axis when
//!   looking down that axis towards the origin (right-handed).
//! - Scale is uniform on x, y and z and applied after the rotation: `M = S * R`.

pub use nalgebra::{Matrix4, Vector3};

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// Axis a frame transform rotates about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub enum RotationAxis {
    /// Rotate about +X
    X,
    /// Rotate about +Y
    Y,
    /// Rotate about +Z (in-plane rotation)
    #[default]
    Z,
}

impl RotationAxis {
    /// Next axis in the X -> Y -> Z -> X cycle
    pub fn next(self) -> Self {
        match self {
            Self::X => Self::Y,
            Self::Y => Self::Z,
            Self::Z => Self::X,
        }
    }

    fn unit(self) -> nalgebra::Unit<Vec3> {
        match self {
            Self::X => Vec3::x_axis(),
            Self::Y => Vec3::y_axis(),
            Self::Z => Vec3::z_axis(),
        }
    }
}

/// Build the rotation-then-uniform-scale matrix used for every frame transform
pub fn rotation_scale_matrix(axis: RotationAxis, angle_deg: f32, scale: f32) -> Mat4 {
    let rotation = Mat4::from_axis_angle(&axis.unit(), utils::deg_to_rad(angle_deg));
    Mat4::new_scaling(scale) * rotation
}

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;
}

/// Math utility functions
pub mod utils {
    use super::constants;

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }
}
