//! Named surface materials
//!
//! Materials are defined once during scene preparation and looked up by tag
//! on every draw. Lookup is linear; the scene defines a handful at most.

use crate::foundation::math::Vec3;

/// Phong surface parameters pushed to the shader's `material` struct
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    /// Name draws refer to the material by
    pub tag: String,
    /// Diffuse reflectance
    pub diffuse_color: Vec3,
    /// Specular reflectance
    pub specular_color: Vec3,
    /// Specular exponent
    pub shininess: f32,
}

impl Material {
    /// Create a material
    pub fn new(
        tag: impl Into<String>,
        diffuse_color: Vec3,
        specular_color: Vec3,
        shininess: f32,
    ) -> Self {
        Self {
            tag: tag.into(),
            diffuse_color,
            specular_color,
            shininess,
        }
    }
}

/// Ordered collection of materials
#[derive(Debug, Default, Clone)]
pub struct MaterialRegistry {
    materials: Vec<Material>,
}

impl MaterialRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a material and return its index
    ///
    /// Tags are not checked for uniqueness. A repeated tag is stored but
    /// [`find`](Self::find) keeps returning the earlier definition.
    pub fn define(&mut self, material: Material) -> usize {
        if self.find(&material.tag).is_some() {
            log::warn!(
                "Material '{}' is already defined; the new definition is shadowed",
                material.tag
            );
        } else {
            log::debug!("Defined material '{}' (shininess {})", material.tag, material.shininess);
        }

        self.materials.push(material);
        self.materials.len() - 1
    }

    /// First material whose tag equals `tag`
    pub fn find(&self, tag: &str) -> Option<&Material> {
        self.materials.iter().find(|m| m.tag == tag)
    }

    /// Materials in definition order
    pub fn iter(&self) -> impl Iterator<Item = &Material> {
        self.materials.iter()
    }

    /// Number of stored materials, shadowed ones included
    pub fn len(&self) -> usize {
        self.materials.len()
    }

    /// True when no material is defined
    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_define_and_find() {
        let mut registry = MaterialRegistry::new();
        registry.define(Material::new(
            "carrot",
            Vec3::new(0.7038, 0.27048, 0.0828),
            Vec3::new(0.256777, 0.137622, 0.086014),
            10.0,
        ));
        registry.define(Material::new("hat", Vec3::repeat(0.01), Vec3::repeat(0.5), 25.0));

        let hat = registry.find("hat").unwrap();
        assert_relative_eq!(hat.specular_color, Vec3::repeat(0.5));
        assert_relative_eq!(hat.shininess, 25.0);
        assert_eq!(registry.len(), 2);
        assert!(registry.find("velvet").is_none());
    }

    #[test]
    fn test_first_definition_wins() {
        let mut registry = MaterialRegistry::new();
        let red = Material::new("gift", Vec3::new(0.5, 0.0, 0.0), Vec3::zeros(), 0.25);
        let green = Material::new("gift", Vec3::new(0.0, 0.5, 0.0), Vec3::zeros(), 8.0);
        let first = registry.define(red);
        let second = registry.define(green);

        assert_eq!((first, second), (0, 1));
        assert_eq!(registry.len(), 2);
        assert_relative_eq!(registry.find("gift").unwrap().shininess, 0.25);
    }

    #[test]
    fn test_iteration_order() {
        let mut registry = MaterialRegistry::new();
        assert!(registry.is_empty());
        for tag in ["sand", "silver", "pearl"] {
            registry.define(Material::new(tag, Vec3::zeros(), Vec3::zeros(), 1.0));
        }

        let tags: Vec<&str> = registry.iter().map(|m| m.tag.as_str()).collect();
        assert_eq!(tags, vec!["sand", "silver", "pearl"]);
    }
}
