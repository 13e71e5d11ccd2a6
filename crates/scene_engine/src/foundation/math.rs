//! Math utilities and types
//!
//! Provides the vector/matrix aliases used by the scene pipeline and the
//! model transform composed for every draw.

pub use nalgebra::{Matrix4, Vector2, Vector3, Vector4};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Placement of a single mesh: scale, per-axis Euler rotation in degrees, position.
///
/// The model matrix is composed as `T * Rz * Ry * Rx * S`, so an object is
/// scaled first, then rotated about X, Y and Z in that order, then translated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelTransform {
    /// Scale factors along X, Y, Z
    pub scale: Vec3,
    /// Rotation about X, Y, Z in degrees
    pub rotation_degrees: Vec3,
    /// World-space position
    pub position: Vec3,
}

impl Default for ModelTransform {
    fn default() -> Self {
        Self {
            scale: Vec3::new(1.0, 1.0, 1.0),
            rotation_degrees: Vec3::zeros(),
            position: Vec3::zeros(),
        }
    }
}

impl ModelTransform {
    /// Create a transform from its three parts
    pub const fn new(scale: Vec3, rotation_degrees: Vec3, position: Vec3) -> Self {
        Self {
            scale,
            rotation_degrees,
            position,
        }
    }

    /// Create a transform from raw component arrays
    pub fn from_parts(scale: [f32; 3], rotation_degrees: [f32; 3], position: [f32; 3]) -> Self {
        Self::new(
            Vec3::from(scale),
            Vec3::from(rotation_degrees),
            Vec3::from(position),
        )
    }

    /// Convert to the model matrix pushed to the shader
    pub fn to_matrix(&self) -> Mat4 {
        let scale = Mat4::new_nonuniform_scaling(&self.scale);
        let rotation_x = Mat4::rotation_x(utils::deg_to_rad(self.rotation_degrees.x));
        let rotation_y = Mat4::rotation_y(utils::deg_to_rad(self.rotation_degrees.y));
        let rotation_z = Mat4::rotation_z(utils::deg_to_rad(self.rotation_degrees.z));
        let translation = Mat4::new_translation(&self.position);

        translation * rotation_z * rotation_y * rotation_x * scale
    }

    /// Apply this transform to an object-space point
    pub fn transform_point(&self, point: Point3) -> Point3 {
        self.to_matrix().transform_point(&point)
    }
}

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;

    /// Radians to degrees conversion factor
    pub const RAD_TO_DEG: f32 = 180.0 / PI;
}

/// Math utility functions
pub mod utils {
    use super::constants;

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }

    /// Convert radians to degrees
    pub fn rad_to_deg(radians: f32) -> f32 {
        radians * constants::RAD_TO_DEG
    }
}

/// Extension trait for Mat4 with single-axis rotations
pub trait Mat4Ext {
    /// Create a rotation matrix around the X axis
    fn rotation_x(angle: f32) -> Mat4;

    /// Create a rotation matrix around the Y axis
    fn rotation_y(angle: f32) -> Mat4;

    /// Create a rotation matrix around the Z axis
    fn rotation_z(angle: f32) -> Mat4;
}

impl Mat4Ext for Mat4 {
    fn rotation_x(angle: f32) -> Mat4 {
        Mat4::from_axis_angle(&Vec3::x_axis(), angle)
    }

    fn rotation_y(angle: f32) -> Mat4 {
        Mat4::from_axis_angle(&Vec3::y_axis(), angle)
    }

    fn rotation_z(angle: f32) -> Mat4 {
        Mat4::from_axis_angle(&Vec3::z_axis(), angle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn test_default_transform_is_identity() {
        let matrix = ModelTransform::default().to_matrix();
        assert_relative_eq!(matrix, Mat4::identity(), epsilon = EPSILON);
    }

    #[test]
    fn test_scale_then_rotate_z_then_translate() {
        let transform =
            ModelTransform::from_parts([2.0, 1.0, 1.0], [0.0, 0.0, 90.0], [1.0, 0.0, 0.0]);

        // (1,0,0) -> S -> (2,0,0) -> Rz(90) -> (0,2,0) -> T -> (1,2,0)
        let world = transform.transform_point(Point3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(world, Point3::new(1.0, 2.0, 0.0), epsilon = EPSILON);

        // Unit scale isolates rotation + translation.
        let unscaled =
            ModelTransform::from_parts([1.0, 1.0, 1.0], [0.0, 0.0, 90.0], [1.0, 0.0, 0.0]);
        let world = unscaled.transform_point(Point3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(world, Point3::new(1.0, 1.0, 0.0), epsilon = EPSILON);
    }

    #[test]
    fn test_composition_order_matches_explicit_product() {
        let transform =
            ModelTransform::from_parts([0.3, 1.7, 0.5], [10.0, 180.0, 90.0], [5.0, 7.5, 6.0]);

        let expected = Mat4::new_translation(&Vec3::new(5.0, 7.5, 6.0))
            * Mat4::rotation_z(utils::deg_to_rad(90.0))
            * Mat4::rotation_y(utils::deg_to_rad(180.0))
            * Mat4::rotation_x(utils::deg_to_rad(10.0))
            * Mat4::new_nonuniform_scaling(&Vec3::new(0.3, 1.7, 0.5));

        assert_relative_eq!(transform.to_matrix(), expected, epsilon = EPSILON);
    }

    #[test]
    fn test_x_rotation_applies_before_z_rotation() {
        // Rx(90) takes +Y to +Z, Rz(90) leaves +Z alone.
        let transform =
            ModelTransform::from_parts([1.0, 1.0, 1.0], [90.0, 0.0, 90.0], [0.0, 0.0, 0.0]);
        let world = transform.transform_point(Point3::new(0.0, 1.0, 0.0));
        assert_relative_eq!(world, Point3::new(0.0, 0.0, 1.0), epsilon = EPSILON);

        // The other order would have produced -X.
        let reversed =
            Mat4::rotation_x(utils::deg_to_rad(90.0)) * Mat4::rotation_z(utils::deg_to_rad(90.0));
        let wrong = reversed.transform_point(&Point3::new(0.0, 1.0, 0.0));
        assert_relative_eq!(wrong, Point3::new(-1.0, 0.0, 0.0), epsilon = EPSILON);
    }

    #[test]
    fn test_degree_conversion_round_trip() {
        assert_relative_eq!(utils::rad_to_deg(utils::deg_to_rad(37.5)), 37.5, epsilon = EPSILON);
    }
}
