//! Free-flying yaw/pitch camera.
//!
//! Angles are in degrees. The basis vectors are rebuilt after every
//! orientation change so `front`, `right` and `up` stay orthonormal.

use cgmath::{EuclideanSpace, InnerSpace, Matrix4, Point3, SquareMatrix, Vector3};

/// Discrete movement commands, one fixed-size step each.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Movement {
    NoMovement,
    Left,
    Right,
    Up,
    Down,
    Forward,
    Back,
}

/// Canned viewpoints looking at the origin from an axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraPreset {
    /// On the +x axis, looking down -x.
    X,
    /// On the +z axis, looking down -z.
    Z,
}

/// World-space distance covered by one [`Movement`] step.
pub const KEYBOARD_SPEED: f32 = 0.2;

const PITCH_LIMIT_DEGREES: f32 = 89.0;

const DEFAULT_TARGET: Vector3<f32> = Vector3::new(0.0, 0.0, 0.0);
const DEFAULT_UP: Vector3<f32> = Vector3::new(0.0, 1.0, 0.0);
const PRESET_X_POSITION: Vector3<f32> = Vector3::new(25.0, 0.0, 0.0);
const PRESET_Z_POSITION: Vector3<f32> = Vector3::new(0.0, 0.0, 25.0);

/// A camera addressed either by position/target or by yaw/pitch deltas.
///
/// Setting a position or target re-derives yaw and pitch so that later
/// relative rotations continue smoothly from the new orientation.
pub struct Camera {
    position: Vector3<f32>,
    front: Vector3<f32>,
    up: Vector3<f32>,
    right: Vector3<f32>,
    world_up: Vector3<f32>,
    yaw_degrees: f32,
    pitch_degrees: f32,
    perspective: Matrix4<f32>,
}

impl Camera {
    pub fn new(position: Vector3<f32>, target: Vector3<f32>, up: Vector3<f32>) -> Self {
        let mut camera = Self {
            position,
            front: Vector3::new(0.0, 0.0, -1.0),
            up,
            right: Vector3::new(1.0, 0.0, 0.0),
            world_up: up.normalize(),
            yaw_degrees: -90.0,
            pitch_degrees: 0.0,
            perspective: Matrix4::identity(),
        };
        camera.look_from(position, target);
        camera
    }

    /// Camera at the default viewpoint on the +z axis.
    pub fn default_view() -> Self {
        Self::new(PRESET_Z_POSITION, DEFAULT_TARGET, DEFAULT_UP)
    }

    /// Moves the camera and aims it at a target, re-deriving yaw/pitch.
    pub fn look_from(&mut self, position: Vector3<f32>, target: Vector3<f32>) {
        self.position = position;
        self.front = (target - position).normalize();
        self.yaw_degrees = self.front.z.atan2(self.front.x).to_degrees();
        self.pitch_degrees = self.front.y.asin().to_degrees();
        self.update_basis();
    }

    /// Moves the camera while keeping its current facing.
    pub fn set_position(&mut self, position: Vector3<f32>) {
        let front = self.front;
        self.look_from(position, position + front);
    }

    pub fn set_target(&mut self, target: Vector3<f32>) {
        self.look_from(self.position, target);
    }

    pub fn apply_preset(&mut self, preset: CameraPreset) {
        let position = match preset {
            CameraPreset::X => PRESET_X_POSITION,
            CameraPreset::Z => PRESET_Z_POSITION,
        };
        log::debug!("camera preset {:?}", preset);
        self.look_from(position, DEFAULT_TARGET);
    }

    /// One step of translation along the camera basis.
    pub fn keyboard_input(&mut self, movement: Movement) {
        match movement {
            Movement::NoMovement => {}
            Movement::Left => self.position -= self.right * KEYBOARD_SPEED,
            Movement::Right => self.position += self.right * KEYBOARD_SPEED,
            Movement::Up => self.position += self.up * KEYBOARD_SPEED,
            Movement::Down => self.position -= self.up * KEYBOARD_SPEED,
            Movement::Forward => self.position += self.front * KEYBOARD_SPEED,
            Movement::Back => self.position -= self.front * KEYBOARD_SPEED,
        }
    }

    /// Relative rotation in degrees. Pitch converges to and is held at
    /// the +/-89 degree limit; yaw is unbounded.
    pub fn update_yaw_pitch(&mut self, delta_yaw: f32, delta_pitch: f32) {
        self.yaw_degrees += delta_yaw;
        self.pitch_degrees =
            (self.pitch_degrees + delta_pitch).clamp(-PITCH_LIMIT_DEGREES, PITCH_LIMIT_DEGREES);

        let yaw = self.yaw_degrees.to_radians();
        let pitch = self.pitch_degrees.to_radians();
        self.front = Vector3::new(
            yaw.cos() * pitch.cos(),
            pitch.sin(),
            yaw.sin() * pitch.cos(),
        )
        .normalize();
        self.update_basis();
    }

    fn update_basis(&mut self) {
        self.right = self.front.cross(self.world_up).normalize();
        self.up = self.right.cross(self.front).normalize();
    }

    /// Right-handed view matrix looking along `front`.
    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(
            Point3::from_vec(self.position),
            Point3::from_vec(self.position + self.front),
            self.up,
        )
    }

    pub fn set_perspective(&mut self, perspective: Matrix4<f32>) {
        self.perspective = perspective;
    }

    pub fn perspective(&self) -> Matrix4<f32> {
        self.perspective
    }

    pub fn position(&self) -> Vector3<f32> {
        self.position
    }

    pub fn front(&self) -> Vector3<f32> {
        self.front
    }

    pub fn right(&self) -> Vector3<f32> {
        self.right
    }

    pub fn up(&self) -> Vector3<f32> {
        self.up
    }

    pub fn yaw_degrees(&self) -> f32 {
        self.yaw_degrees
    }

    pub fn pitch_degrees(&self) -> f32 {
        self.pitch_degrees
    }
}
