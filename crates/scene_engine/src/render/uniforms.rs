//! Typed shader uniforms
//!
//! Every value the scene pipeline writes into the shader is identified by a
//! [`UniformId`] instead of a free-form string. A [`UniformSink`] receives the
//! writes in call order. [`UniformSink::before_draw`] marks the point where
//! the accumulated state must be applied, right before a draw call.

use std::borrow::Cow;
use std::fmt;

use crate::foundation::math::{Mat4, Vec2, Vec3, Vec4};

/// Field of a light structure in the shader
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LightField {
    /// Direction the directional light travels
    Direction,
    /// World position of a point light
    Position,
    /// Ambient intensity
    Ambient,
    /// Optional tint multiplied into the ambient term
    AmbientColor,
    /// Diffuse intensity
    Diffuse,
    /// Specular intensity
    Specular,
    /// Whether the light contributes at all
    Active,
}

impl LightField {
    /// Member name inside the GLSL light struct
    pub const fn glsl_name(self) -> &'static str {
        match self {
            Self::Direction => "direction",
            Self::Position => "position",
            Self::Ambient => "ambient",
            Self::AmbientColor => "ambientColor",
            Self::Diffuse => "diffuse",
            Self::Specular => "specular",
            Self::Active => "bActive",
        }
    }
}

/// Identifier of a single shader uniform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UniformId {
    /// Model matrix of the next draw
    Model,
    /// Flat RGBA color
    ObjectColor,
    /// Texture unit sampled by the fragment shader
    ObjectTexture,
    /// Sample `ObjectTexture` instead of `ObjectColor`
    UseTexture,
    /// Global lighting switch
    UseLighting,
    /// Texture coordinate scale
    UvScale,
    /// Material diffuse color
    MaterialDiffuse,
    /// Material specular color
    MaterialSpecular,
    /// Material specular exponent
    MaterialShininess,
    /// Member of the single directional light
    DirectionalLight(LightField),
    /// Member of the point light at the given index
    PointLight(usize, LightField),
}

impl UniformId {
    /// Name of the uniform as declared in the shader
    pub fn name(&self) -> Cow<'static, str> {
        match self {
            Self::Model => Cow::Borrowed("model"),
            Self::ObjectColor => Cow::Borrowed("objectColor"),
            Self::ObjectTexture => Cow::Borrowed("objectTexture"),
            Self::UseTexture => Cow::Borrowed("bUseTexture"),
            Self::UseLighting => Cow::Borrowed("bUseLighting"),
            Self::UvScale => Cow::Borrowed("UVscale"),
            Self::MaterialDiffuse => Cow::Borrowed("material.diffuseColor"),
            Self::MaterialSpecular => Cow::Borrowed("material.specularColor"),
            Self::MaterialShininess => Cow::Borrowed("material.shininess"),
            Self::DirectionalLight(field) => {
                Cow::Owned(format!("directionalLight.{}", field.glsl_name()))
            }
            Self::PointLight(index, field) => {
                Cow::Owned(format!("pointLights[{}].{}", index, field.glsl_name()))
            }
        }
    }
}

impl fmt::Display for UniformId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

/// Value written to a uniform
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    /// Boolean flag
    Bool(bool),
    /// Integer (also used for sampler units)
    Int(i32),
    /// Scalar float
    Float(f32),
    /// 2-component vector
    Vec2(Vec2),
    /// 3-component vector
    Vec3(Vec3),
    /// 4-component vector
    Vec4(Vec4),
    /// 4x4 matrix
    Mat4(Mat4),
}

/// Consumer of uniform writes (a shader program, a uniform buffer, a recorder)
pub trait UniformSink {
    /// Apply one uniform write
    fn set_uniform(&mut self, id: UniformId, value: UniformValue);

    /// Called right before a draw call consumes the current state
    fn before_draw(&mut self) {}

    /// Write a boolean uniform
    fn set_bool(&mut self, id: UniformId, value: bool) {
        self.set_uniform(id, UniformValue::Bool(value));
    }

    /// Write an integer uniform
    fn set_int(&mut self, id: UniformId, value: i32) {
        self.set_uniform(id, UniformValue::Int(value));
    }

    /// Write a float uniform
    fn set_float(&mut self, id: UniformId, value: f32) {
        self.set_uniform(id, UniformValue::Float(value));
    }

    /// Write a vec2 uniform
    fn set_vec2(&mut self, id: UniformId, value: Vec2) {
        self.set_uniform(id, UniformValue::Vec2(value));
    }

    /// Write a vec3 uniform
    fn set_vec3(&mut self, id: UniformId, value: Vec3) {
        self.set_uniform(id, UniformValue::Vec3(value));
    }

    /// Write a vec4 uniform
    fn set_vec4(&mut self, id: UniformId, value: Vec4) {
        self.set_uniform(id, UniformValue::Vec4(value));
    }

    /// Write a mat4 uniform
    fn set_mat4(&mut self, id: UniformId, value: Mat4) {
        self.set_uniform(id, UniformValue::Mat4(value));
    }
}

impl<S: UniformSink + ?Sized> UniformSink for &mut S {
    fn set_uniform(&mut self, id: UniformId, value: UniformValue) {
        (**self).set_uniform(id, value);
    }

    fn before_draw(&mut self) {
        (**self).before_draw();
    }
}

/// Sink that keeps every write in order
///
/// Used by headless runs and tests to inspect exactly what a frame pushed.
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    writes: Vec<(UniformId, UniformValue)>,
    draw_marks: Vec<usize>,
}

impl RecordingSink {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// All writes in the order they were made
    pub fn writes(&self) -> &[(UniformId, UniformValue)] {
        &self.writes
    }

    /// Ids only, in write order
    pub fn ids(&self) -> Vec<UniformId> {
        self.writes.iter().map(|(id, _)| *id).collect()
    }

    /// Most recent value written to `id`
    pub fn last(&self, id: UniformId) -> Option<UniformValue> {
        self.writes
            .iter()
            .rev()
            .find(|(written, _)| *written == id)
            .map(|(_, value)| *value)
    }

    /// Number of writes recorded before each draw boundary, in draw order
    pub fn draw_marks(&self) -> &[usize] {
        &self.draw_marks
    }

    /// Writes made between the previous draw boundary and draw `index`
    pub fn writes_for_draw(&self, index: usize) -> Option<&[(UniformId, UniformValue)]> {
        let end = *self.draw_marks.get(index)?;
        let start = index.checked_sub(1).map_or(0, |prev| self.draw_marks[prev]);
        Some(&self.writes[start..end])
    }

    /// Number of writes recorded
    pub fn len(&self) -> usize {
        self.writes.len()
    }

    /// True when nothing was written
    pub fn is_empty(&self) -> bool {
        self.writes.is_empty()
    }

    /// Forget all recorded writes and draw boundaries
    pub fn clear(&mut self) {
        self.writes.clear();
        self.draw_marks.clear();
    }
}

impl UniformSink for RecordingSink {
    fn set_uniform(&mut self, id: UniformId, value: UniformValue) {
        log::trace!("uniform {} = {:?}", id, value);
        self.writes.push((id, value));
    }

    fn before_draw(&mut self) {
        self.draw_marks.push(self.writes.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_names() {
        assert_eq!(UniformId::Model.name(), "model");
        assert_eq!(UniformId::UseTexture.name(), "bUseTexture");
        assert_eq!(UniformId::UvScale.name(), "UVscale");
        assert_eq!(UniformId::MaterialShininess.name(), "material.shininess");
        assert_eq!(
            UniformId::DirectionalLight(LightField::AmbientColor).name(),
            "directionalLight.ambientColor"
        );
        assert_eq!(
            UniformId::PointLight(2, LightField::Active).to_string(),
            "pointLights[2].bActive"
        );
    }

    #[test]
    fn test_recording_sink_keeps_order_and_last_value() {
        let mut sink = RecordingSink::new();
        sink.set_bool(UniformId::UseTexture, false);
        sink.set_int(UniformId::ObjectTexture, 3);
        sink.set_bool(UniformId::UseTexture, true);

        assert_eq!(sink.len(), 3);
        assert_eq!(
            sink.ids(),
            vec![UniformId::UseTexture, UniformId::ObjectTexture, UniformId::UseTexture]
        );
        assert_eq!(sink.last(UniformId::UseTexture), Some(UniformValue::Bool(true)));
        assert_eq!(sink.last(UniformId::Model), None);

        sink.clear();
        assert!(sink.is_empty());
    }

    #[test]
    fn test_recording_sink_splits_writes_per_draw() {
        let mut sink = RecordingSink::new();
        sink.set_int(UniformId::ObjectTexture, 0);
        sink.before_draw();
        sink.set_int(UniformId::ObjectTexture, 1);
        sink.set_float(UniformId::MaterialShininess, 2.0);
        sink.before_draw();

        assert_eq!(sink.draw_marks(), &[1, 3]);
        assert_eq!(sink.writes_for_draw(0).unwrap().len(), 1);
        assert_eq!(
            sink.writes_for_draw(1).unwrap()[0],
            (UniformId::ObjectTexture, UniformValue::Int(1))
        );
        assert!(sink.writes_for_draw(2).is_none());

        sink.clear();
        assert!(sink.draw_marks().is_empty());
    }

    #[test]
    fn test_sink_through_mutable_reference() {
        fn push(mut sink: impl UniformSink) {
            sink.set_float(UniformId::MaterialShininess, 4.0);
            sink.before_draw();
        }

        let mut sink = RecordingSink::new();
        push(&mut sink);
        assert_eq!(sink.last(UniformId::MaterialShininess), Some(UniformValue::Float(4.0)));
        assert_eq!(sink.draw_marks(), &[1]);
    }
}
