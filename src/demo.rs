//! The demo scene: one of every primitive plus a small nested "solar system"
//! that shows parent transforms carrying their children along.

use std::f32::consts::FRAC_PI_2;

use glam::{Quat, Vec3, Vec4};
use glsandbox_core::{SceneNode, Transform, geometry};

use crate::render::Shape;

pub const CUBE: &str = "cube";
const PLANET_ORBIT: &str = "planet_orbit";
const PLANET: &str = "planet";
const MOON_ORBIT: &str = "moon_orbit";

const PLANET_DISTANCE: f32 = 3.0;
const MOON_DISTANCE: f32 = 1.0;

pub fn build_scene() -> SceneNode<Shape> {
    let floor = SceneNode::mesh(
        "floor",
        Shape::new(
            geometry::create_plane(20.0, 20.0, 10),
            Vec4::new(0.8, 0.8, 0.8, 1.0),
        ),
    )
    .with_transform(Transform::default().with_rotation(Quat::from_rotation_x(-FRAC_PI_2)));

    let cube = SceneNode::mesh(CUBE, Shape::new(geometry::create_cube(1.5), Vec4::ONE))
        .with_transform(Transform::from_translation(Vec3::new(-4.0, 1.0, 0.0)));

    let column = SceneNode::mesh(
        "column",
        Shape::new(
            geometry::create_cylinder(0.5, 3.0, 32),
            Vec4::new(0.9, 0.85, 0.7, 1.0),
        ),
    )
    .with_transform(Transform::from_translation(Vec3::new(4.0, 1.5, -3.0)));

    let moon = SceneNode::mesh(
        "moon",
        Shape::new(
            geometry::create_sphere(0.2, 12, 16),
            Vec4::new(0.7, 0.7, 0.75, 1.0),
        ),
    )
    .with_transform(Transform::from_translation(Vec3::X * MOON_DISTANCE));

    let planet = SceneNode::group(PLANET)
        .with_transform(Transform::from_translation(Vec3::X * PLANET_DISTANCE))
        .with_child(SceneNode::mesh(
            "planet_body",
            Shape::new(
                geometry::create_sphere(0.4, 16, 24),
                Vec4::new(0.3, 0.5, 1.0, 1.0),
            ),
        ))
        .with_child(SceneNode::group(MOON_ORBIT).with_child(moon));

    let solar = SceneNode::group("solar")
        .with_transform(Transform::from_translation(Vec3::new(0.0, 2.0, -6.0)))
        .with_child(SceneNode::mesh(
            "sun",
            Shape::new(
                geometry::create_sphere(1.0, 24, 32),
                Vec4::new(1.0, 0.85, 0.3, 1.0),
            ),
        ))
        .with_child(SceneNode::group(PLANET_ORBIT).with_child(planet));

    SceneNode::group("root")
        .with_child(floor)
        .with_child(cube)
        .with_child(column)
        .with_child(solar)
}

/// Poses the animated nodes for `time` seconds since start.
pub fn animate<M>(scene: &mut SceneNode<M>, time: f32) {
    if let Some(cube) = scene.find_mut(CUBE) {
        cube.transform.rotation = Quat::from_euler(glam::EulerRot::XYZ, time * 0.7, time, 0.0);
    }
    if let Some(orbit) = scene.find_mut(PLANET_ORBIT) {
        orbit.transform.rotation = Quat::from_rotation_y(time * 0.5);
    }
    if let Some(planet) = scene.find_mut(PLANET) {
        planet.transform.rotation = Quat::from_rotation_y(time * 1.5);
    }
    if let Some(orbit) = scene.find_mut(MOON_ORBIT) {
        orbit.transform.rotation = Quat::from_rotation_y(time * 2.0);
    }
}

#[cfg(test)]
mod tests {
    use glam::Mat4;

    use super::*;

    fn world_positions(scene: &SceneNode<Shape>) -> Vec<Vec3> {
        let mut out = Vec::new();
        scene.draw(Mat4::IDENTITY, &mut |_, world| {
            out.push(world.transform_point3(Vec3::ZERO))
        });
        out
    }

    #[test]
    fn test_scene_contents() {
        let scene = build_scene();
        assert_eq!(scene.mesh_count(), 6);
        for name in ["floor", CUBE, "column", "sun", "planet_body", "moon"] {
            assert!(scene.find(name).is_some(), "missing {name}");
        }
    }

    #[test]
    fn test_floor_faces_up() {
        let scene = build_scene();
        let floor = scene.find("floor").unwrap();
        let up = floor.transform.matrix().transform_vector3(Vec3::Z);
        assert!((up - Vec3::Y).length() < 1e-5);
    }

    #[test]
    fn test_moon_follows_planet() {
        let mut scene = build_scene();
        for t in [0.0, 0.7, 2.5, 10.0] {
            animate(&mut scene, t);
            // draw order: floor, cube, column, sun, planet_body, moon
            let p = world_positions(&scene);
            let (sun, planet, moon) = (p[3], p[4], p[5]);
            assert!((planet.distance(sun) - PLANET_DISTANCE).abs() < 1e-4);
            assert!((moon.distance(planet) - MOON_DISTANCE).abs() < 1e-4);
        }
    }

    #[test]
    fn test_animation_moves_the_planet() {
        let mut scene = build_scene();
        animate(&mut scene, 0.0);
        let before = world_positions(&scene)[4];
        animate(&mut scene, 1.0);
        let after = world_positions(&scene)[4];
        assert!(before.distance(after) > 0.1);
        assert!((before.y - after.y).abs() < 1e-5);
    }
}
