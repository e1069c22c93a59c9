//! The world: owns the camera, the lights and every entity, and drives
//! one frame of the scene at a time.

use std::cell::RefCell;
use std::rc::Rc;

use cgmath::Vector3;

use crate::camera::Camera;
use crate::entities::dancer::{DanceMode, DancerModels, DancingRobot};
use crate::entities::globe::{Globe, GlobeModels};
use crate::entities::patrol::{PatrolModels, PatrolRobot};
use crate::entities::room::{Room, RoomModels};
use crate::entities::skybox::Skybox;
use crate::error::MarionetteError;
use crate::lighting::{Light, Spotlight};
use crate::model::Drawable;
use crate::time::TimeSource;

const CAMERA_START_POSITION: Vector3<f32> = Vector3::new(0.0, 6.0, 35.0);
const CAMERA_START_TARGET: Vector3<f32> = Vector3::new(0.0, 5.0, 0.0);

const CEILING_LIGHT_POSITIONS: [Vector3<f32>; 2] =
    [Vector3::new(0.0, 8.0, -5.0), Vector3::new(0.0, 8.0, 5.0)];
const SPOTLIGHT_START_POSITION: Vector3<f32> = Vector3::new(6.25, 2.0, 2.0);

/// Every drawable the scene needs, provided by the rendering backend.
pub struct WorldModels {
    pub dancer: DancerModels,
    pub patrol: PatrolModels,
    pub globe: GlobeModels,
    pub room: RoomModels,
    pub skybox: Rc<dyn Drawable>,
}

/// The assembled scene and its per-frame driver.
///
/// `advance_frame` runs the animation updates in a fixed order, then the
/// draw pass in a fixed entity order, so a frame is fully determined by
/// the time source and the control-surface state.
pub struct World {
    camera: Camera,
    time: Rc<dyn TimeSource>,
    ceiling_lights: [Light; 2],
    spotlight: Rc<RefCell<Spotlight>>,
    room: Room,
    globe: Globe,
    patrol: PatrolRobot,
    dancer: DancingRobot,
    skybox: Skybox,
    patrolling: bool,
}

impl World {
    pub fn new(models: WorldModels, time: Rc<dyn TimeSource>) -> Result<Self, MarionetteError> {
        let camera = Camera::new(
            CAMERA_START_POSITION,
            CAMERA_START_TARGET,
            Vector3::new(0.0, 1.0, 0.0),
        );

        let mut first = Light::new();
        first.set_position(CEILING_LIGHT_POSITIONS[0]);
        let mut second = Light::new();
        second.set_position(CEILING_LIGHT_POSITIONS[1]);

        let spotlight = Rc::new(RefCell::new(Spotlight::new()));
        spotlight
            .borrow_mut()
            .set_position(SPOTLIGHT_START_POSITION);

        let room = Room::new(models.room);
        let globe = Globe::new(models.globe);
        let patrol = PatrolRobot::new(models.patrol, spotlight.clone());
        let dancer = DancingRobot::new(models.dancer, time.clone())?;
        let skybox = Skybox::new(models.skybox);

        log::info!("world assembled, camera at {CAMERA_START_POSITION:?}");

        Ok(Self {
            camera,
            time,
            ceiling_lights: [first, second],
            spotlight,
            room,
            globe,
            patrol,
            dancer,
            skybox,
            patrolling: true,
        })
    }

    /// One frame: animation updates first (globe spin, housing spin,
    /// patrol step, dance step gated on the patrol position), then the
    /// draw pass over every entity.
    pub fn advance_frame(&mut self) {
        let now = self.time.now();

        self.globe.advance(now);

        // the housing sweep runs even while the patrol is parked
        self.patrol.spin_housing(now);
        if self.patrolling {
            self.patrol.advance();
        }

        self.dancer.animate(self.patrol.position());

        self.skybox.follow(self.camera.position());

        self.room.draw();
        self.globe.draw();
        self.patrol.draw();
        self.dancer.draw();
        self.skybox.draw();
    }

    pub fn set_dance_mode(&mut self, mode: DanceMode) {
        self.dancer.set_mode(mode);
    }

    pub fn set_patrolling(&mut self, patrolling: bool) {
        if patrolling != self.patrolling {
            log::debug!("patrol traversal {}", if patrolling { "on" } else { "off" });
        }
        self.patrolling = patrolling;
    }

    pub fn is_patrolling(&self) -> bool {
        self.patrolling
    }

    /// Dims both ceiling lights together. `brightness` is 0 to 1.
    pub fn set_ceiling_brightness(&mut self, brightness: f32) {
        for light in &mut self.ceiling_lights {
            light.set_brightness(brightness);
        }
    }

    /// Dims the patrol robot's spotlight. `brightness` is 0 to 1.
    pub fn set_spotlight_brightness(&mut self, brightness: f32) {
        self.spotlight.borrow_mut().set_brightness(brightness);
    }

    pub fn ceiling_lights(&self) -> &[Light; 2] {
        &self.ceiling_lights
    }

    /// The spotlight, shared with the patrol robot's tracking leaf.
    pub fn spotlight(&self) -> Rc<RefCell<Spotlight>> {
        self.spotlight.clone()
    }

    pub fn patrol_position(&self) -> Vector3<f32> {
        self.patrol.position()
    }

    pub fn dance_progress(&self) -> f64 {
        self.dancer.progress()
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn dispose(&self) {
        self.room.dispose();
        self.globe.dispose();
        self.patrol.dispose();
        self.dancer.dispose();
        self.skybox.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RecordingDrawable;
    use crate::time::ManualClock;

    struct TestWorld {
        world: World,
        time: Rc<ManualClock>,
        sky: Rc<RecordingDrawable>,
        dancer_body: Rc<RecordingDrawable>,
    }

    fn build_world() -> TestWorld {
        let sky = RecordingDrawable::new();
        let dancer_body = RecordingDrawable::new();
        let models = WorldModels {
            dancer: DancerModels {
                base: RecordingDrawable::new(),
                leg: RecordingDrawable::new(),
                body: dancer_body.clone(),
                arm: RecordingDrawable::new(),
                head: RecordingDrawable::new(),
                eye: RecordingDrawable::new(),
                antenna: RecordingDrawable::new(),
            },
            patrol: PatrolModels {
                body: RecordingDrawable::new(),
                eye: RecordingDrawable::new(),
                housing: RecordingDrawable::new(),
                bulb: RecordingDrawable::new(),
            },
            globe: GlobeModels {
                base: RecordingDrawable::new(),
                axis: RecordingDrawable::new(),
                globe: RecordingDrawable::new(),
            },
            room: RoomModels {
                floor: RecordingDrawable::new(),
                back_wall: RecordingDrawable::new(),
                window_wall: RecordingDrawable::new(),
                right_wall: RecordingDrawable::new(),
                ceiling: RecordingDrawable::new(),
            },
            skybox: sky.clone(),
        };
        let time = Rc::new(ManualClock::new());
        let world = World::new(models, time.clone()).unwrap();
        TestWorld {
            world,
            time,
            sky,
            dancer_body,
        }
    }

    #[test]
    fn every_entity_is_drawn_each_frame() {
        let mut t = build_world();
        t.world.advance_frame();
        assert_eq!(t.sky.call_count(), 1);
        assert_eq!(t.dancer_body.call_count(), 1);
        t.world.advance_frame();
        assert_eq!(t.sky.call_count(), 2);
    }

    #[test]
    fn patrol_moves_only_while_traversing() {
        let mut t = build_world();
        let start = t.world.patrol_position();
        t.world.set_patrolling(false);
        t.world.advance_frame();
        assert_eq!(t.world.patrol_position(), start);

        t.world.set_patrolling(true);
        t.world.advance_frame();
        assert!(t.world.patrol_position() != start);
    }

    #[test]
    fn housing_sweeps_while_patrol_is_parked() {
        let mut t = build_world();
        t.world.set_patrolling(false);
        t.world.advance_frame();
        let before = t.world.spotlight().borrow().direction();
        t.time.advance(1.5);
        t.world.advance_frame();
        let after = t.world.spotlight().borrow().direction();
        assert!(before != after);
    }

    #[test]
    fn dance_is_gated_by_the_patrol_position() {
        let mut t = build_world();
        // patrol starts far from the dance zone: the cycle stays frozen
        for _ in 0..10 {
            t.time.advance(1.0 / 60.0);
            t.world.advance_frame();
        }
        assert_eq!(t.world.dance_progress(), 0.0);

        // in Dance mode the same frames move the cycle
        t.world.set_dance_mode(DanceMode::Dance);
        for _ in 0..10 {
            t.time.advance(1.0 / 60.0);
            t.world.advance_frame();
        }
        assert!(t.world.dance_progress() > 0.0);
    }

    #[test]
    fn skybox_follows_camera_moves() {
        let mut t = build_world();
        t.world
            .camera_mut()
            .set_position(Vector3::new(5.0, 6.0, 7.0));
        t.world.advance_frame();
        let world = t.sky.last_world().unwrap();
        assert_eq!(world.w.x, 5.0);
        assert_eq!(world.w.y, 6.0);
        assert_eq!(world.w.z, 7.0);
    }

    #[test]
    fn brightness_controls_reach_the_lights() {
        let mut t = build_world();
        t.world.set_ceiling_brightness(0.3);
        for light in t.world.ceiling_lights() {
            assert_eq!(light.ambient().x, 0.3);
            assert_eq!(light.diffuse().x, 0.3);
        }
        t.world.set_spotlight_brightness(0.8);
        let spotlight = t.world.spotlight();
        assert_eq!(spotlight.borrow().light().diffuse().x, 0.8);
        assert_eq!(spotlight.borrow().light().ambient().x, 0.0);
    }

    #[test]
    fn spotlight_pose_comes_from_the_patrol_after_a_frame() {
        let mut t = build_world();
        t.world.advance_frame();
        // the tracking leaf overwrote the hand-set start position
        let pos = t.world.spotlight().borrow().position();
        assert!(pos.y > 1.0);
        assert!((pos.x - 6.25).abs() < 0.5);
    }
}
