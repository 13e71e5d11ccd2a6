//! Draw commands
//!
//! A [`DrawCommand`] is everything needed to place one primitive: which mesh,
//! where, and the optional color, texture, UV scale and material applied
//! before the draw call.

use crate::foundation::math::{ModelTransform, Vec2, Vec3, Vec4};
use crate::render::mesh::MeshKind;

/// One primitive placed in the scene
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCommand {
    /// Name used in log output
    pub label: String,
    /// Mesh to draw
    pub mesh: MeshKind,
    /// Model transform
    pub transform: ModelTransform,
    /// Flat RGBA color
    pub color: Option<Vec4>,
    /// Texture tag
    pub texture: Option<String>,
    /// Texture coordinate scale
    pub uv_scale: Option<Vec2>,
    /// Material tag
    pub material: Option<String>,
}

impl DrawCommand {
    /// Start a command for `mesh` with an identity transform
    pub fn new(label: impl Into<String>, mesh: MeshKind) -> Self {
        Self {
            label: label.into(),
            mesh,
            transform: ModelTransform::default(),
            color: None,
            texture: None,
            uv_scale: None,
            material: None,
        }
    }

    /// Set the scale factors
    pub fn scale(mut self, x: f32, y: f32, z: f32) -> Self {
        self.transform.scale = Vec3::new(x, y, z);
        self
    }

    /// Set a uniform scale factor
    pub fn uniform_scale(self, s: f32) -> Self {
        self.scale(s, s, s)
    }

    /// Set the rotation about X, Y, Z in degrees
    pub fn rotation(mut self, x: f32, y: f32, z: f32) -> Self {
        self.transform.rotation_degrees = Vec3::new(x, y, z);
        self
    }

    /// Set the world position
    pub fn position(mut self, x: f32, y: f32, z: f32) -> Self {
        self.transform.position = Vec3::new(x, y, z);
        self
    }

    /// Replace the whole transform
    pub fn transform(mut self, transform: ModelTransform) -> Self {
        self.transform = transform;
        self
    }

    /// Set the flat color
    pub fn color(mut self, r: f32, g: f32, b: f32, a: f32) -> Self {
        self.color = Some(Vec4::new(r, g, b, a));
        self
    }

    /// Sample the texture registered under `tag`
    pub fn texture(mut self, tag: impl Into<String>) -> Self {
        self.texture = Some(tag.into());
        self
    }

    /// Set the texture coordinate scale
    pub fn uv_scale(mut self, u: f32, v: f32) -> Self {
        self.uv_scale = Some(Vec2::new(u, v));
        self
    }

    /// Apply the material defined under `tag`
    pub fn material(mut self, tag: impl Into<String>) -> Self {
        self.material = Some(tag.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_builder_defaults() {
        let cmd = DrawCommand::new("ground", MeshKind::Plane);
        assert_eq!(cmd.transform, ModelTransform::default());
        assert!(cmd.color.is_none());
        assert!(cmd.texture.is_none());
        assert!(cmd.uv_scale.is_none());
        assert!(cmd.material.is_none());
    }

    #[test]
    fn test_builder_sets_every_field() {
        let cmd = DrawCommand::new("nose", MeshKind::Cone)
            .scale(0.3, 1.7, 0.5)
            .rotation(0.0, 180.0, 90.0)
            .position(5.0, 7.5, 6.0)
            .color(0.91, 0.4345, 0.0455, 1.0)
            .texture("nose")
            .uv_scale(1.0, 1.0)
            .material("carrot");

        assert_relative_eq!(cmd.transform.scale, Vec3::new(0.3, 1.7, 0.5));
        assert_relative_eq!(cmd.transform.rotation_degrees, Vec3::new(0.0, 180.0, 90.0));
        assert_relative_eq!(cmd.transform.position, Vec3::new(5.0, 7.5, 6.0));
        assert_eq!(cmd.texture.as_deref(), Some("nose"));
        assert_eq!(cmd.material.as_deref(), Some("carrot"));
        assert_eq!(cmd.uv_scale, Some(Vec2::new(1.0, 1.0)));
    }

    #[test]
    fn test_uniform_scale() {
        let cmd = DrawCommand::new("ornament", MeshKind::Sphere).uniform_scale(0.3);
        assert_relative_eq!(cmd.transform.scale, Vec3::repeat(0.3));
    }
}
