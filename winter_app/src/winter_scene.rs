//! Winter tableau content
//!
//! Snowman with a carrot nose and top hat, a lit tree with ornaments, a gift
//! box, a moon and a snowy backdrop. Everything here is plain data fed to
//! the scene manager.

use scene_engine::prelude::*;
use scene_engine::render::LightingError;

/// Texture files and the tags draws use for them
pub fn texture_manifest() -> Vec<TextureSource> {
    [
        ("sand.png", "ground"),
        ("snowbackground.png", "snow"),
        ("snowman2.png", "snowman"),
        ("carrotnose.png", "nose"),
        ("tophat.png", "tophat"),
        ("wrappingpaper.png", "giftbox"),
        ("tree.png", "tree"),
        ("moon.png", "moon"),
        ("turret.png", "turret"),
        ("purplelights.png", "purplelight"),
        ("ornament.png", "ornaments"),
    ]
    .into_iter()
    .map(|(file, tag)| TextureSource::new(file, tag))
    .collect()
}

/// Define every surface material used by the draw list
pub fn define_materials(materials: &mut MaterialRegistry) {
    let definitions = [
        ("sand", [0.714, 0.4284, 0.1814], [0.393_548, 0.271_906, 0.166_721], 20.0),
        ("silver", [0.0, 0.0, 0.0], [0.0, 0.0, 0.0], 52.0),
        ("pearl", [1.0, 0.829, 0.829], [0.296_648, 0.296_648, 0.296_648], 25.0),
        ("carrot", [0.7038, 0.27048, 0.0828], [0.256_777, 0.137_622, 0.086_014], 10.0),
        ("hat", [0.01, 0.01, 0.01], [0.5, 0.5, 0.5], 25.0),
        ("tree", [0.2, 0.2, 0.2], [0.0, 0.0, 0.0], 0.1),
        ("gift", [0.5, 0.0, 0.0], [0.7, 0.6, 0.6], 0.25),
        ("ornament", [0.396, 0.741_51, 0.691_02], [0.297_254, 0.308_29, 0.306_678], 25.0),
        ("lights", [0.751_64, 0.606_48, 0.226_48], [0.628_281, 0.555_802, 0.366_065], 50.0),
    ];

    for (tag, diffuse, specular, shininess) in definitions {
        materials.define(Material::new(tag, Vec3::from(diffuse), Vec3::from(specular), shininess));
    }
}

/// Moonlight from the upper left plus three warm point lights
pub fn configure_lighting(lighting: &mut LightingSetup) -> Result<(), LightingError> {
    lighting.set_directional(
        DirectionalLight::new(
            Vec3::new(-13.0, 17.0, -7.0),
            Vec3::repeat(1.0),
            Vec3::repeat(0.6),
            Vec3::repeat(0.2),
        )
        .with_ambient_color(Vec4::new(0.373, 0.5431, 0.91, 1.0)),
    );

    lighting.add_point_light(PointLight::new(
        Vec3::new(7.0, 5.0, 0.0),
        Vec3::repeat(0.05),
        Vec3::repeat(0.3),
        Vec3::repeat(0.1),
    ))?;
    lighting.add_point_light(PointLight::new(
        Vec3::new(6.0, 4.5, -8.0),
        Vec3::repeat(0.05),
        Vec3::repeat(0.06),
        Vec3::repeat(0.1),
    ))?;
    lighting.add_point_light(
        PointLight::new(
            Vec3::new(-1.0, 4.5, 0.75),
            Vec3::repeat(0.05),
            Vec3::repeat(0.06),
            Vec3::repeat(0.1),
        )
        .with_ambient_color(Vec3::new(0.7134, 0.348, 0.87)),
    )?;

    Ok(())
}

const STRING_LIGHTS: [[f32; 3]; 14] = [
    [-3.0, 1.5, 2.0],
    [-1.0, 1.5, 1.6],
    [0.75, 1.5, 0.0],
    [-5.0, 1.5, 1.6],
    [-3.0, 4.5, 1.3],
    [-1.0, 4.5, 0.75],
    [-0.25, 4.5, -0.25],
    [-5.0, 4.5, 0.75],
    [-3.0, 7.5, 0.5],
    [-1.0, 7.5, -0.5],
    [-5.0, 7.5, -0.4],
    [-3.0, 11.5, -0.6],
    [-2.0, 11.5, -1.0],
    [-4.0, 11.5, -1.0],
];

const ORNAMENTS: [[f32; 3]; 5] = [
    [-2.0, 3.0, 1.75],
    [-4.0, 4.0, 1.55],
    [-1.25, 6.0, 0.5],
    [-3.0, 9.0, 0.25],
    [-2.75, 12.75, -0.8],
];

/// Every object of the tableau in draw order
pub fn draw_list() -> Vec<DrawCommand> {
    let mut commands = vec![
        DrawCommand::new("ground", MeshKind::Plane)
            .scale(20.0, 1.0, 10.0)
            .color(0.84, 0.8019, 0.7056, 1.0)
            .texture("ground")
            .material("sand"),
        DrawCommand::new("backdrop", MeshKind::Plane)
            .scale(20.0, 1.0, 10.0)
            .rotation(90.0, 0.0, 0.0)
            .position(0.0, 9.0, -10.0)
            .color(0.1187, 0.0986, 0.34, 1.0)
            .texture("snow"),
    ];

    // Snowman, bottom to top
    for (scale, height) in [(2.5, 2.0), (2.0, 5.0), (1.5, 7.5)] {
        commands.push(
            DrawCommand::new("snowman", MeshKind::Sphere)
                .uniform_scale(scale)
                .rotation(180.0, 0.0, 0.0)
                .position(6.0, height, 5.0)
                .texture("snowman")
                .material("pearl"),
        );
    }

    commands.extend([
        DrawCommand::new("nose", MeshKind::Cone)
            .scale(0.3, 1.7, 0.5)
            .rotation(0.0, 180.0, 90.0)
            .position(5.0, 7.5, 6.0)
            .color(0.91, 0.4345, 0.0455, 1.0)
            .texture("nose")
            .uv_scale(1.0, 1.0)
            .material("carrot"),
        DrawCommand::new("hat crown", MeshKind::Cylinder)
            .scale(1.0, 2.5, 1.0)
            .rotation(180.0, 0.0, 0.0)
            .position(6.0, 11.0, 5.0)
            .texture("tophat")
            .material("hat"),
        DrawCommand::new("hat brim", MeshKind::Cylinder)
            .scale(1.5, 0.25, 1.5)
            .rotation(180.0, 0.0, -10.0)
            .position(6.0, 9.0, 5.0)
            .texture("tophat")
            .material("hat"),
        DrawCommand::new("tree", MeshKind::Cone)
            .scale(4.5, 16.0, 4.5)
            .position(-3.0, 0.1, -2.0)
            .texture("tree")
            .material("tree"),
        DrawCommand::new("gift", MeshKind::Box)
            .scale(2.5, 1.5, 1.5)
            .rotation(0.0, -40.0, 0.0)
            .position(7.0, 1.0, 8.0)
            .texture("giftbox")
            .material("gift"),
        DrawCommand::new("moon", MeshKind::Sphere)
            .uniform_scale(2.0)
            .rotation(90.0, 0.0, 0.0)
            .position(-13.0, 17.0, -7.0)
            .texture("moon")
            .material("silver"),
        DrawCommand::new("wreath", MeshKind::Torus)
            .scale(0.8, 0.8, 3.0)
            .rotation(90.0, 90.0, 0.0)
            .position(0.0, 0.75, 7.0)
            .texture("turret")
            .material("sand"),
    ]);

    commands.extend(STRING_LIGHTS.iter().map(|&[x, y, z]| {
        DrawCommand::new("string light", MeshKind::Sphere)
            .uniform_scale(0.15)
            .rotation(0.0, 0.0, 90.0)
            .position(x, y, z)
            .texture("purplelight")
            .material("lights")
    }));

    commands.extend(ORNAMENTS.iter().map(|&[x, y, z]| {
        DrawCommand::new("ornament", MeshKind::Sphere)
            .uniform_scale(0.3)
            .position(x, y, z)
            .texture("ornaments")
            .material("ornament")
    }));

    commands
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_fits_texture_table() {
        let manifest = texture_manifest();
        assert_eq!(manifest.len(), 11);
        assert!(manifest.len() <= scene_engine::render::MAX_TEXTURE_SLOTS);
    }

    #[test]
    fn test_manifest_files_ship_with_the_app() {
        let dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("textures");
        for source in texture_manifest() {
            assert!(dir.join(&source.file).is_file(), "missing {}", source.file.display());
        }
    }

    #[test]
    fn test_draws_reference_known_tags() {
        let manifest = texture_manifest();
        let mut materials = MaterialRegistry::new();
        define_materials(&mut materials);

        for command in draw_list() {
            if let Some(tag) = &command.texture {
                assert!(manifest.iter().any(|s| &s.tag == tag), "unknown texture {}", tag);
            }
            if let Some(tag) = &command.material {
                assert!(materials.find(tag).is_some(), "unknown material {}", tag);
            }
        }
    }

    #[test]
    fn test_lighting_uses_every_point_slot() {
        let mut lighting = LightingSetup::new();
        configure_lighting(&mut lighting).unwrap();

        assert_eq!(lighting.point_lights().len(), scene_engine::render::MAX_POINT_LIGHTS);
        assert_eq!(lighting.active_light_count(), 4);
        assert!(lighting.directional().unwrap().ambient_color.is_some());
    }

    #[test]
    fn test_draw_list_shape() {
        let commands = draw_list();
        assert_eq!(commands.len(), 2 + 3 + 7 + STRING_LIGHTS.len() + ORNAMENTS.len());
        assert_eq!(commands[0].mesh, MeshKind::Plane);
        assert_eq!(commands.iter().filter(|c| c.label == "snowman").count(), 3);
    }
}
