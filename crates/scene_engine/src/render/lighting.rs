//! Lighting system
//!
//! The scene shader declares one directional light and a fixed array of
//! point lights. A [`LightingSetup`] is configured once during scene
//! preparation and pushed to the shader with [`LightingSetup::apply`].

use thiserror::Error;

use crate::foundation::math::{Vec3, Vec4};
use crate::render::uniforms::{LightField, UniformId, UniformSink};

/// Number of point light slots in the shader
pub const MAX_POINT_LIGHTS: usize = 3;

/// Lighting configuration errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LightingError {
    /// Every point light slot is taken
    #[error("At most {max} point lights are supported")]
    TooManyPointLights {
        /// Slot count
        max: usize,
    },
}

/// Light arriving from a single direction (like sunlight)
#[derive(Debug, Clone, PartialEq)]
pub struct DirectionalLight {
    /// Light direction, not required to be normalized
    pub direction: Vec3,
    /// Ambient intensity
    pub ambient: Vec3,
    /// Optional RGBA tint for the ambient term
    pub ambient_color: Option<Vec4>,
    /// Diffuse intensity
    pub diffuse: Vec3,
    /// Specular intensity
    pub specular: Vec3,
    /// Whether the light contributes
    pub active: bool,
}

impl DirectionalLight {
    /// Create an active directional light without ambient tint
    pub fn new(direction: Vec3, ambient: Vec3, diffuse: Vec3, specular: Vec3) -> Self {
        Self {
            direction,
            ambient,
            ambient_color: None,
            diffuse,
            specular,
            active: true,
        }
    }

    /// Set the ambient tint
    pub fn with_ambient_color(mut self, color: Vec4) -> Self {
        self.ambient_color = Some(color);
        self
    }

    /// Set the active flag
    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    fn apply<S: UniformSink + ?Sized>(&self, sink: &mut S) {
        let id = UniformId::DirectionalLight;
        sink.set_vec3(id(LightField::Direction), self.direction);
        sink.set_vec3(id(LightField::Ambient), self.ambient);
        if let Some(color) = self.ambient_color {
            sink.set_vec4(id(LightField::AmbientColor), color);
        }
        sink.set_vec3(id(LightField::Diffuse), self.diffuse);
        sink.set_vec3(id(LightField::Specular), self.specular);
        sink.set_bool(id(LightField::Active), self.active);
    }
}

/// Omnidirectional light at a position (like a lightbulb)
#[derive(Debug, Clone, PartialEq)]
pub struct PointLight {
    /// World position
    pub position: Vec3,
    /// Ambient intensity
    pub ambient: Vec3,
    /// Optional RGB tint for the ambient term
    pub ambient_color: Option<Vec3>,
    /// Diffuse intensity
    pub diffuse: Vec3,
    /// Specular intensity
    pub specular: Vec3,
    /// Whether the light contributes
    pub active: bool,
}

impl PointLight {
    /// Create an active point light without ambient tint
    pub fn new(position: Vec3, ambient: Vec3, diffuse: Vec3, specular: Vec3) -> Self {
        Self {
            position,
            ambient,
            ambient_color: None,
            diffuse,
            specular,
            active: true,
        }
    }

    /// Set the ambient tint
    pub fn with_ambient_color(mut self, color: Vec3) -> Self {
        self.ambient_color = Some(color);
        self
    }

    /// Set the active flag
    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    fn apply<S: UniformSink + ?Sized>(&self, index: usize, sink: &mut S) {
        let id = |field| UniformId::PointLight(index, field);
        sink.set_vec3(id(LightField::Position), self.position);
        sink.set_vec3(id(LightField::Ambient), self.ambient);
        if let Some(color) = self.ambient_color {
            sink.set_vec3(id(LightField::AmbientColor), color);
        }
        sink.set_vec3(id(LightField::Diffuse), self.diffuse);
        sink.set_vec3(id(LightField::Specular), self.specular);
        sink.set_bool(id(LightField::Active), self.active);
    }
}

/// Complete light configuration for the scene shader
#[derive(Debug, Clone, PartialEq)]
pub struct LightingSetup {
    /// Global lighting switch; when off the shader uses flat color only
    pub enabled: bool,
    directional: Option<DirectionalLight>,
    point_lights: Vec<PointLight>,
}

impl Default for LightingSetup {
    fn default() -> Self {
        Self::new()
    }
}

impl LightingSetup {
    /// Create an enabled setup with no lights
    pub fn new() -> Self {
        Self {
            enabled: true,
            directional: None,
            point_lights: Vec::with_capacity(MAX_POINT_LIGHTS),
        }
    }

    /// Set the global lighting switch
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Replace the directional light
    pub fn set_directional(&mut self, light: DirectionalLight) {
        self.directional = Some(light);
    }

    /// Add a point light and return its slot
    pub fn add_point_light(&mut self, light: PointLight) -> Result<usize, LightingError> {
        if self.point_lights.len() >= MAX_POINT_LIGHTS {
            return Err(LightingError::TooManyPointLights { max: MAX_POINT_LIGHTS });
        }
        self.point_lights.push(light);
        Ok(self.point_lights.len() - 1)
    }

    /// The directional light, if any
    pub fn directional(&self) -> Option<&DirectionalLight> {
        self.directional.as_ref()
    }

    /// Configured point lights in slot order
    pub fn point_lights(&self) -> &[PointLight] {
        &self.point_lights
    }

    /// Number of lights that will contribute
    pub fn active_light_count(&self) -> usize {
        let directional = self.directional.iter().filter(|l| l.active).count();
        directional + self.point_lights.iter().filter(|l| l.active).count()
    }

    /// Push the whole configuration to the shader
    ///
    /// Every shader light slot is written, so a missing directional light or
    /// an unused point slot is explicitly switched off.
    pub fn apply<S: UniformSink + ?Sized>(&self, sink: &mut S) {
        sink.set_bool(UniformId::UseLighting, self.enabled);

        match &self.directional {
            Some(light) => light.apply(sink),
            None => sink.set_bool(UniformId::DirectionalLight(LightField::Active), false),
        }

        for index in 0..MAX_POINT_LIGHTS {
            match self.point_lights.get(index) {
                Some(light) => light.apply(index, sink),
                None => sink.set_bool(UniformId::PointLight(index, LightField::Active), false),
            }
        }

        log::debug!(
            "Applied lighting: enabled={}, {} active light(s)",
            self.enabled,
            self.active_light_count()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::uniforms::{RecordingSink, UniformValue};

    fn point(x: f32) -> PointLight {
        PointLight::new(
            Vec3::new(x, 0.0, 0.0),
            Vec3::repeat(0.05),
            Vec3::repeat(0.3),
            Vec3::repeat(0.1),
        )
    }

    #[test]
    fn test_point_light_limit() {
        let mut setup = LightingSetup::new();
        for i in 0..MAX_POINT_LIGHTS {
            assert_eq!(setup.add_point_light(point(i as f32)).unwrap(), i);
        }

        assert_eq!(
            setup.add_point_light(point(9.0)),
            Err(LightingError::TooManyPointLights { max: MAX_POINT_LIGHTS })
        );
        assert_eq!(setup.point_lights().len(), MAX_POINT_LIGHTS);
    }

    #[test]
    fn test_apply_pushes_directional_then_points() {
        let mut setup = LightingSetup::new();
        setup.set_directional(
            DirectionalLight::new(
                Vec3::new(-13.0, 17.0, -7.0),
                Vec3::repeat(1.0),
                Vec3::repeat(0.6),
                Vec3::repeat(0.2),
            )
            .with_ambient_color(Vec4::new(0.373, 0.5431, 0.91, 1.0)),
        );
        setup.add_point_light(point(7.0)).unwrap();

        let mut sink = RecordingSink::new();
        setup.apply(&mut sink);

        let ids = sink.ids();
        assert_eq!(ids[0], UniformId::UseLighting);
        assert_eq!(ids[1], UniformId::DirectionalLight(LightField::Direction));
        assert_eq!(ids[3], UniformId::DirectionalLight(LightField::AmbientColor));
        assert_eq!(ids[6], UniformId::DirectionalLight(LightField::Active));
        assert_eq!(ids[7], UniformId::PointLight(0, LightField::Position));
        assert_eq!(
            sink.last(UniformId::PointLight(0, LightField::Position)),
            Some(UniformValue::Vec3(Vec3::new(7.0, 0.0, 0.0)))
        );
        // Point light 0 has no ambient tint, so only five fields plus the trailing slots.
        assert_eq!(sink.last(UniformId::PointLight(0, LightField::AmbientColor)), None);
        assert_eq!(sink.len(), 1 + 6 + 5 + 2);
    }

    #[test]
    fn test_unused_slots_are_switched_off() {
        let setup = LightingSetup::new().with_enabled(false);
        let mut sink = RecordingSink::new();
        setup.apply(&mut sink);

        assert_eq!(sink.last(UniformId::UseLighting), Some(UniformValue::Bool(false)));
        assert_eq!(
            sink.last(UniformId::DirectionalLight(LightField::Active)),
            Some(UniformValue::Bool(false))
        );
        for index in 0..MAX_POINT_LIGHTS {
            assert_eq!(
                sink.last(UniformId::PointLight(index, LightField::Active)),
                Some(UniformValue::Bool(false))
            );
        }
        assert_eq!(sink.len(), 1 + 1 + MAX_POINT_LIGHTS);
    }

    #[test]
    fn test_active_light_count() {
        let mut setup = LightingSetup::new();
        setup.set_directional(
            DirectionalLight::new(Vec3::y(), Vec3::zeros(), Vec3::zeros(), Vec3::zeros())
                .with_active(false),
        );
        setup.add_point_light(point(1.0)).unwrap();
        setup
            .add_point_light(point(2.0).with_ambient_color(Vec3::new(0.7134, 0.348, 0.87)))
            .unwrap();
        setup.add_point_light(point(3.0).with_active(false)).unwrap();

        assert_eq!(setup.active_light_count(), 2);
    }
}
