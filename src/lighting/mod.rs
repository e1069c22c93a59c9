//! Point lights and the swept spotlight.
//!
//! The lighting data here is plain state for a rendering backend to read;
//! the only behaviour the core owns is the spotlight pose derivation from
//! a scene-graph world transform.

use cgmath::{Matrix4, Vector3};

/// A positional light with phong-style intensity components.
#[derive(Debug, Clone)]
pub struct Light {
    position: Vector3<f32>,
    ambient: Vector3<f32>,
    diffuse: Vector3<f32>,
    specular: Vector3<f32>,
}

impl Light {
    pub fn new() -> Self {
        Self {
            position: Vector3::new(3.0, 2.0, 1.0),
            ambient: Vector3::new(0.4, 0.4, 0.4),
            diffuse: Vector3::new(0.7, 0.7, 0.7),
            specular: Vector3::new(0.7, 0.7, 0.7),
        }
    }

    pub fn set_position(&mut self, position: Vector3<f32>) {
        self.position = position;
    }

    pub fn position(&self) -> Vector3<f32> {
        self.position
    }

    /// Greyscale dimmer: sets ambient and diffuse to the given level,
    /// clamped to `[0, 1]`.
    pub fn set_brightness(&mut self, brightness: f32) {
        let b = brightness.clamp(0.0, 1.0);
        self.ambient = Vector3::new(b, b, b);
        self.diffuse = Vector3::new(b, b, b);
    }

    pub fn ambient(&self) -> Vector3<f32> {
        self.ambient
    }

    pub fn diffuse(&self) -> Vector3<f32> {
        self.diffuse
    }

    pub fn specular(&self) -> Vector3<f32> {
        self.specular
    }
}

impl Default for Light {
    fn default() -> Self {
        Self::new()
    }
}

/// A spotlight whose pose is driven by a scene-graph leaf.
///
/// Cutoff angles are in degrees and fixed; position and direction are
/// rewritten every update pass by
/// [`set_pose_from_world`](Self::set_pose_from_world).
#[derive(Debug, Clone)]
pub struct Spotlight {
    light: Light,
    cutoff_degrees: f32,
    outer_cutoff_degrees: f32,
    direction: Vector3<f32>,
}

impl Spotlight {
    pub fn new() -> Self {
        let mut light = Light::new();
        light.ambient = Vector3::new(0.0, 0.0, 0.0);
        light.diffuse = Vector3::new(0.5, 0.5, 0.5);
        light.specular = Vector3::new(0.5, 0.5, 0.5);
        Self {
            light,
            cutoff_degrees: 12.5,
            outer_cutoff_degrees: 17.5,
            direction: Vector3::new(0.0, 0.0, -1.0),
        }
    }

    /// Derives the beam pose from a world transform: position from the
    /// translation column, direction from the yaw of the rotated z axis,
    /// flattened to the horizontal plane.
    pub fn set_pose_from_world(&mut self, world: &Matrix4<f32>) {
        self.light.position = world.w.truncate();
        let yaw = world.z.x.atan2(world.z.z);
        self.direction = Vector3::new(yaw.sin(), 0.0, yaw.cos());
    }

    /// Dimmer for the beam: diffuse and specular follow the level, the
    /// ambient term stays dark.
    pub fn set_brightness(&mut self, brightness: f32) {
        let b = brightness.clamp(0.0, 1.0);
        self.light.diffuse = Vector3::new(b, b, b);
        self.light.specular = Vector3::new(b, b, b);
    }

    pub fn position(&self) -> Vector3<f32> {
        self.light.position
    }

    pub fn set_position(&mut self, position: Vector3<f32>) {
        self.light.position = position;
    }

    pub fn direction(&self) -> Vector3<f32> {
        self.direction
    }

    pub fn cutoff_degrees(&self) -> f32 {
        self.cutoff_degrees
    }

    pub fn outer_cutoff_degrees(&self) -> f32 {
        self.outer_cutoff_degrees
    }

    pub fn light(&self) -> &Light {
        &self.light
    }
}

impl Default for Spotlight {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::transforms;
    use cgmath::InnerSpace;

    #[test]
    fn brightness_is_clamped() {
        let mut light = Light::new();
        light.set_brightness(2.0);
        assert_eq!(light.ambient().x, 1.0);
        light.set_brightness(-1.0);
        assert_eq!(light.diffuse().x, 0.0);
    }

    #[test]
    fn spotlight_pose_follows_translation_and_yaw() {
        let mut beam = Spotlight::new();
        let world = transforms::translate(2.0, 3.0, -4.0) * transforms::rotate_y(45.0);
        beam.set_pose_from_world(&world);

        let pos = beam.position();
        assert!((pos.x - 2.0).abs() < 1e-5);
        assert!((pos.y - 3.0).abs() < 1e-5);
        assert!((pos.z + 4.0).abs() < 1e-5);

        let dir = beam.direction();
        let expected = 45f32.to_radians();
        assert!((dir.x - expected.sin()).abs() < 1e-5);
        assert!(dir.y.abs() < 1e-5);
        assert!((dir.z - expected.cos()).abs() < 1e-5);
        assert!((dir.magnitude() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn spotlight_direction_ignores_pitch_and_roll() {
        let mut beam = Spotlight::new();
        let world = transforms::rotate_y(30.0) * transforms::rotate_x(25.0);
        beam.set_pose_from_world(&world);
        assert_eq!(beam.direction().y, 0.0);
    }

    #[test]
    fn spotlight_brightness_leaves_ambient_dark() {
        let mut beam = Spotlight::new();
        beam.set_brightness(0.9);
        assert_eq!(beam.light().ambient().x, 0.0);
        assert_eq!(beam.light().diffuse().x, 0.9);
        assert_eq!(beam.light().specular().x, 0.9);
    }
}
