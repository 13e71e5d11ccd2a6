//! Uniform block packing for GPU upload
//!
//! [`UniformBlockSink`] collects typed uniform writes into a single
//! `#[repr(C)]` block whose bytes can be copied straight into a uniform
//! buffer. Layout follows std140 rules: every member is padded to 16 bytes.

use bytemuck::{Pod, Zeroable};

use crate::foundation::math::{Vec3, Vec4};
use crate::render::lighting::MAX_POINT_LIGHTS;
use crate::render::uniforms::{LightField, UniformId, UniformSink, UniformValue};

/// One light as laid out in the uniform block
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct GpuLight {
    /// Direction (directional light) or position (point light); w unused
    pub vector: [f32; 4],
    /// Ambient intensity
    pub ambient: [f32; 4],
    /// Ambient tint; w is the alpha for directional lights
    pub ambient_color: [f32; 4],
    /// Diffuse intensity
    pub diffuse: [f32; 4],
    /// Specular intensity
    pub specular: [f32; 4],
    /// x = active, yzw reserved
    pub flags: [u32; 4],
}

/// Complete per-draw shader state
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct ShaderUniforms {
    /// Model matrix, column major
    pub model: [[f32; 4]; 4],
    /// Flat RGBA color
    pub object_color: [f32; 4],
    /// Material diffuse color; w unused
    pub material_diffuse: [f32; 4],
    /// Material specular color; w = shininess
    pub material_specular: [f32; 4],
    /// UV scale in xy
    pub uv_scale: [f32; 4],
    /// x = use texture, y = use lighting, z = texture unit, w reserved
    pub flags: [i32; 4],
    /// The directional light
    pub directional_light: GpuLight,
    /// Point lights
    pub point_lights: [GpuLight; MAX_POINT_LIGHTS],
}

impl Default for ShaderUniforms {
    fn default() -> Self {
        let mut uniforms = Self::zeroed();
        uniforms.model = [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ];
        uniforms.object_color = [1.0, 1.0, 1.0, 1.0];
        uniforms.uv_scale = [1.0, 1.0, 0.0, 0.0];
        uniforms
    }
}

impl ShaderUniforms {
    /// Get the raw bytes for GPU upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }

    /// Get the size in bytes
    pub const fn size() -> usize {
        std::mem::size_of::<Self>()
    }
}

/// Sink that packs writes into a [`ShaderUniforms`] block
///
/// The block carries over from draw to draw, so state a draw does not touch
/// (lights, a previous material) stays in effect. At every draw boundary the
/// current block is copied into the upload queue, one block per draw.
#[derive(Debug, Default, Clone)]
pub struct UniformBlockSink {
    uniforms: ShaderUniforms,
    draw_blocks: Vec<ShaderUniforms>,
    writes_since_draw: usize,
    rejected: usize,
}

impl UniformBlockSink {
    /// Create a sink holding default uniform values
    pub fn new() -> Self {
        Self::default()
    }

    /// Current packed state
    pub fn uniforms(&self) -> &ShaderUniforms {
        &self.uniforms
    }

    /// Blocks queued for upload, one per draw since the last take
    pub fn draw_blocks(&self) -> &[ShaderUniforms] {
        &self.draw_blocks
    }

    /// Return and forget the queued per-draw blocks
    pub fn take_draw_blocks(&mut self) -> Vec<ShaderUniforms> {
        std::mem::take(&mut self.draw_blocks)
    }

    /// Queued blocks as one contiguous byte buffer
    pub fn upload_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.draw_blocks.as_slice())
    }

    /// Writes applied since the last draw boundary
    pub const fn pending_writes(&self) -> usize {
        self.writes_since_draw
    }

    /// Writes dropped because of a type or index mismatch
    pub const fn rejected_writes(&self) -> usize {
        self.rejected
    }

    fn reject(&mut self, id: UniformId, value: UniformValue) {
        log::warn!("Uniform {} cannot hold {:?}; write ignored", id, value);
        self.rejected += 1;
    }

    fn write_light(light: &mut GpuLight, field: LightField, value: UniformValue) -> bool {
        match (field, value) {
            (LightField::Direction | LightField::Position, UniformValue::Vec3(v)) => {
                light.vector = vec3_padded(v);
            }
            (LightField::Ambient, UniformValue::Vec3(v)) => light.ambient = vec3_padded(v),
            (LightField::AmbientColor, UniformValue::Vec3(v)) => {
                light.ambient_color = vec3_padded(v);
            }
            (LightField::AmbientColor, UniformValue::Vec4(v)) => {
                light.ambient_color = vec4_array(v);
            }
            (LightField::Diffuse, UniformValue::Vec3(v)) => light.diffuse = vec3_padded(v),
            (LightField::Specular, UniformValue::Vec3(v)) => light.specular = vec3_padded(v),
            (LightField::Active, UniformValue::Bool(active)) => light.flags[0] = u32::from(active),
            _ => return false,
        }
        true
    }
}

impl UniformSink for UniformBlockSink {
    fn set_uniform(&mut self, id: UniformId, value: UniformValue) {
        let u = &mut self.uniforms;
        let accepted = match (id, value) {
            (UniformId::Model, UniformValue::Mat4(m)) => {
                u.model = m.into();
                true
            }
            (UniformId::ObjectColor, UniformValue::Vec4(c)) => {
                u.object_color = vec4_array(c);
                true
            }
            (UniformId::ObjectTexture, UniformValue::Int(unit)) => {
                u.flags[2] = unit;
                true
            }
            (UniformId::UseTexture, UniformValue::Bool(on)) => {
                u.flags[0] = i32::from(on);
                true
            }
            (UniformId::UseLighting, UniformValue::Bool(on)) => {
                u.flags[1] = i32::from(on);
                true
            }
            (UniformId::UvScale, UniformValue::Vec2(uv)) => {
                u.uv_scale = [uv.x, uv.y, 0.0, 0.0];
                true
            }
            (UniformId::MaterialDiffuse, UniformValue::Vec3(c)) => {
                u.material_diffuse = vec3_padded(c);
                true
            }
            (UniformId::MaterialSpecular, UniformValue::Vec3(c)) => {
                let shininess = u.material_specular[3];
                u.material_specular = [c.x, c.y, c.z, shininess];
                true
            }
            (UniformId::MaterialShininess, UniformValue::Float(s)) => {
                u.material_specular[3] = s;
                true
            }
            (UniformId::DirectionalLight(field), value) => {
                Self::write_light(&mut u.directional_light, field, value)
            }
            (UniformId::PointLight(index, field), value) => match u.point_lights.get_mut(index) {
                Some(light) => Self::write_light(light, field, value),
                None => false,
            },
            _ => false,
        };

        if accepted {
            self.writes_since_draw += 1;
        } else {
            self.reject(id, value);
        }
    }

    fn before_draw(&mut self) {
        self.draw_blocks.push(self.uniforms);
        self.writes_since_draw = 0;
    }
}

fn vec3_padded(v: Vec3) -> [f32; 4] {
    [v.x, v.y, v.z, 0.0]
}

fn vec4_array(v: Vec4) -> [f32; 4] {
    [v.x, v.y, v.z, v.w]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::{Mat4, Vec2};

    #[test]
    fn test_block_size_is_std140_aligned() {
        assert_eq!(ShaderUniforms::size() % 16, 0);
        assert_eq!(std::mem::size_of::<GpuLight>(), 96);
        assert_eq!(ShaderUniforms::size(), 64 + 16 * 5 + 96 * (1 + MAX_POINT_LIGHTS));
    }

    #[test]
    fn test_defaults() {
        let uniforms = ShaderUniforms::default();
        assert_eq!(uniforms.object_color, [1.0; 4]);
        assert_eq!(uniforms.uv_scale, [1.0, 1.0, 0.0, 0.0]);
        assert_eq!(uniforms.model[3], [0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_packs_draw_state() {
        let mut sink = UniformBlockSink::new();
        sink.set_mat4(UniformId::Model, Mat4::new_translation(&Vec3::new(1.0, 2.0, 3.0)));
        sink.set_bool(UniformId::UseTexture, true);
        sink.set_int(UniformId::ObjectTexture, 5);
        sink.set_vec2(UniformId::UvScale, Vec2::new(2.0, 3.0));
        sink.set_float(UniformId::MaterialShininess, 25.0);
        sink.set_vec3(UniformId::MaterialSpecular, Vec3::new(0.1, 0.2, 0.3));

        let u = sink.uniforms();
        assert_eq!(u.model[3], [1.0, 2.0, 3.0, 1.0]);
        assert_eq!(u.flags, [1, 0, 5, 0]);
        assert_eq!(u.uv_scale, [2.0, 3.0, 0.0, 0.0]);
        assert_eq!(u.material_specular, [0.1, 0.2, 0.3, 25.0]);
        assert_eq!(sink.pending_writes(), 6);

        sink.before_draw();
        assert_eq!(sink.pending_writes(), 0);
        assert_eq!(sink.upload_bytes().len(), ShaderUniforms::size());
    }

    #[test]
    fn test_each_draw_gets_its_own_block() {
        let mut sink = UniformBlockSink::new();
        sink.set_bool(UniformId::PointLight(0, LightField::Active), true);

        sink.set_mat4(UniformId::Model, Mat4::new_translation(&Vec3::new(1.0, 0.0, 0.0)));
        sink.set_vec4(UniformId::ObjectColor, Vec4::new(1.0, 0.0, 0.0, 1.0));
        sink.before_draw();
        sink.set_mat4(UniformId::Model, Mat4::new_translation(&Vec3::new(9.0, 0.0, 0.0)));
        sink.set_vec4(UniformId::ObjectColor, Vec4::new(0.0, 0.0, 1.0, 1.0));
        sink.before_draw();

        let blocks = sink.take_draw_blocks();
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].model[3], [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(blocks[0].object_color, [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(blocks[1].model[3], [9.0, 0.0, 0.0, 1.0]);
        assert_eq!(blocks[1].object_color, [0.0, 0.0, 1.0, 1.0]);
        // State set before the first draw carries into the second.
        assert_eq!(blocks[1].point_lights[0].flags[0], 1);
        assert!(sink.draw_blocks().is_empty());
    }

    #[test]
    fn test_packs_lights() {
        let mut sink = UniformBlockSink::new();
        sink.set_vec3(
            UniformId::DirectionalLight(LightField::Direction),
            Vec3::new(-13.0, 17.0, -7.0),
        );
        sink.set_vec4(
            UniformId::DirectionalLight(LightField::AmbientColor),
            Vec4::new(0.1, 0.2, 0.3, 1.0),
        );
        sink.set_bool(UniformId::PointLight(2, LightField::Active), true);

        let u = sink.uniforms();
        assert_eq!(u.directional_light.vector, [-13.0, 17.0, -7.0, 0.0]);
        assert_eq!(u.directional_light.ambient_color, [0.1, 0.2, 0.3, 1.0]);
        assert_eq!(u.point_lights[2].flags[0], 1);
        assert_eq!(u.point_lights[0].flags[0], 0);
    }

    #[test]
    fn test_mismatched_writes_are_rejected() {
        let mut sink = UniformBlockSink::new();
        sink.set_vec3(UniformId::Model, Vec3::zeros());
        sink.set_bool(UniformId::PointLight(MAX_POINT_LIGHTS, LightField::Active), true);

        assert_eq!(sink.rejected_writes(), 2);
        assert_eq!(sink.pending_writes(), 0);
        assert_eq!(*sink.uniforms(), ShaderUniforms::default());
    }
}
