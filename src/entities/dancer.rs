//! The dancing robot: an articulated figure on a base, driven by a looping
//! ten second clock through a five phase dance cycle.

use std::rc::Rc;

use cgmath::Vector3;

use crate::animation::clock::{AnimationClock, LoopMode};
use crate::error::MarionetteError;
use crate::model::Drawable;
use crate::scene::graph::{NodeId, SceneGraph};
use crate::scene::transforms;
use crate::time::TimeSource;

const ANTENNA_HEIGHT: f32 = 1.0;
const ANTENNA_WIDTH: f32 = 0.2;
const EYE_SCALE: f32 = 0.4;
const HEAD_HEIGHT: f32 = 1.0;
const HEAD_WIDTH: f32 = 2.0;
const HEAD_DEPTH: f32 = 1.0;
const BODY_HEIGHT: f32 = 2.0;
const BODY_WIDTH: f32 = 1.0;
const ARM_HEIGHT: f32 = 2.0;
const ARM_WIDTH: f32 = 0.5;
const LEG_HEIGHT: f32 = 1.0;
const LEG_WIDTH: f32 = 0.5;
const BASE_HEIGHT: f32 = 0.25;
const BASE_WIDTH: f32 = 2.0;

const DANCE_DURATION_SECS: f64 = 10.0;

// The dance floor: the robot only keeps dancing in DistanceGated mode
// while the patrolling robot is inside this corner of the room.
const DANCE_ZONE_MAX_X: f32 = 0.0;
const DANCE_ZONE_MAX_Z: f32 = -2.0;

/// How the dance is gated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DanceMode {
    /// Always dancing.
    Dance,
    /// Dance only while the patrol robot is near; pause otherwise.
    DistanceGated,
    /// Frozen mid-pose.
    Stopped,
}

/// Drawables for the dancer's body parts, one per material.
///
/// The same drawable backs both legs, both arms and all three antennas.
pub struct DancerModels {
    pub base: Rc<dyn Drawable>,
    pub leg: Rc<dyn Drawable>,
    pub body: Rc<dyn Drawable>,
    pub arm: Rc<dyn Drawable>,
    pub head: Rc<dyn Drawable>,
    pub eye: Rc<dyn Drawable>,
    pub antenna: Rc<dyn Drawable>,
}

/// An articulated dancing robot.
///
/// The animated joints (legs, body stack, arms, antennas) are transform
/// nodes the dance rewrites each frame; everything else in the hierarchy
/// is fixed at construction.
pub struct DancingRobot {
    graph: SceneGraph,
    bottom_leg_joint: NodeId,
    top_leg_joint: NodeId,
    body_parts_joint: NodeId,
    arms_joint: NodeId,
    antenna_joint: NodeId,
    clock: AnimationClock,
    mode: DanceMode,
}

impl DancingRobot {
    pub fn new(models: DancerModels, time: Rc<dyn TimeSource>) -> Result<Self, MarionetteError> {
        let mut graph = SceneGraph::new("dancing robot");

        let m = transforms::translate(-4.0, BASE_HEIGHT / 2.0, -9.0) * transforms::rotate_y(-150.0);
        let placement = graph.add_transform(graph.root(), "full robot translate and rotate", m);

        let base = Self::make_base(&mut graph, placement, &models);

        let bottom_leg_joint =
            graph.add_transform(base, "bottom leg joint", transforms::rotate_z(0.0));
        let bottom_leg = Self::make_leg(&mut graph, bottom_leg_joint, &models, false);

        let top_leg_joint =
            graph.add_transform(bottom_leg, "top leg joint", transforms::rotate_z(0.0));
        let top_leg = Self::make_leg(&mut graph, top_leg_joint, &models, true);

        let body_parts_up = graph.add_transform(
            top_leg,
            "move body parts up",
            transforms::translate(0.0, BASE_HEIGHT / 2.0 + 3.0 * LEG_HEIGHT, 0.0),
        );
        let body_parts_joint =
            graph.add_transform(body_parts_up, "body parts joint", transforms::rotate_y(0.0));
        let body = Self::make_body(&mut graph, body_parts_joint, &models);

        let arms_joint = graph.add_transform(body, "arms joint", transforms::rotate_z(0.0));
        Self::make_arm(&mut graph, arms_joint, &models, true);
        Self::make_arm(&mut graph, arms_joint, &models, false);

        let head = Self::make_head(&mut graph, body, &models);
        Self::make_eye(&mut graph, head, &models);
        let antenna_joint = graph.add_transform(head, "antenna joint", transforms::rotate_y(0.0));
        Self::make_antenna(&mut graph, antenna_joint, &models, 1.0);
        Self::make_antenna(&mut graph, antenna_joint, &models, 0.0);
        Self::make_antenna(&mut graph, antenna_joint, &models, -1.0);

        graph.update_all();

        Ok(Self {
            graph,
            bottom_leg_joint,
            top_leg_joint,
            body_parts_joint,
            arms_joint,
            antenna_joint,
            clock: AnimationClock::new(DANCE_DURATION_SECS, LoopMode::Loop, time)?,
            mode: DanceMode::DistanceGated,
        })
    }

    fn make_base(graph: &mut SceneGraph, parent: NodeId, models: &DancerModels) -> NodeId {
        let base = graph.add_group(parent, "base");
        let scale = graph.add_transform(
            base,
            "base scale",
            transforms::scale(BASE_WIDTH, BASE_HEIGHT, BASE_WIDTH),
        );
        graph.add_model(scale, "base model", models.base.clone());
        base
    }

    fn make_leg(graph: &mut SceneGraph, parent: NodeId, models: &DancerModels, top: bool) -> NodeId {
        let (label, lift) = if top {
            ("top leg", BASE_HEIGHT / 2.0 + LEG_HEIGHT * 1.5)
        } else {
            ("bottom leg", BASE_HEIGHT / 2.0 + LEG_HEIGHT / 2.0)
        };
        let leg = graph.add_group(parent, label);
        let translate =
            graph.add_transform(leg, "leg translate", transforms::translate(0.0, lift, 0.0));
        let scale = graph.add_transform(
            translate,
            "leg scale",
            transforms::scale(LEG_WIDTH, LEG_HEIGHT, LEG_WIDTH),
        );
        graph.add_model(scale, "leg model", models.leg.clone());
        leg
    }

    fn make_body(graph: &mut SceneGraph, parent: NodeId, models: &DancerModels) -> NodeId {
        let body = graph.add_group(parent, "body");
        let scale = graph.add_transform(
            body,
            "body scale",
            transforms::scale(BODY_WIDTH, BODY_HEIGHT, BODY_WIDTH),
        );
        graph.add_model(scale, "body model", models.body.clone());
        body
    }

    fn make_arm(graph: &mut SceneGraph, parent: NodeId, models: &DancerModels, left: bool) {
        let (label, offset, out_degrees) = if left {
            ("left arm", BODY_WIDTH * 1.3, 90.0)
        } else {
            ("right arm", -BODY_WIDTH * 1.3, -90.0)
        };
        let arm = graph.add_group(parent, label);
        let translate = graph.add_transform(
            arm,
            "arm translate",
            transforms::translate(offset, BODY_HEIGHT / 4.0, 0.0),
        );
        let scale = graph.add_transform(
            translate,
            "arm scale",
            transforms::rotate_z(out_degrees) * transforms::scale(ARM_WIDTH, ARM_HEIGHT, ARM_WIDTH),
        );
        graph.add_model(scale, "arm model", models.arm.clone());
    }

    fn make_head(graph: &mut SceneGraph, parent: NodeId, models: &DancerModels) -> NodeId {
        let head = graph.add_group(parent, "head");
        let translate = graph.add_transform(
            head,
            "head translate",
            transforms::translate(0.0, BODY_HEIGHT / 2.0 + HEAD_HEIGHT / 2.0, 0.0),
        );
        let scale = graph.add_transform(
            translate,
            "head scale",
            transforms::scale(HEAD_WIDTH, HEAD_HEIGHT, HEAD_DEPTH),
        );
        graph.add_model(scale, "head model", models.head.clone());
        head
    }

    fn make_eye(graph: &mut SceneGraph, parent: NodeId, models: &DancerModels) {
        let eye = graph.add_group(parent, "eye");
        let translate = graph.add_transform(
            eye,
            "eye translate",
            transforms::translate(
                0.0,
                HEAD_HEIGHT / 2.0 + BODY_HEIGHT / 2.0,
                -HEAD_DEPTH * 0.4,
            ),
        );
        let scale = graph.add_transform(
            translate,
            "eye scale",
            transforms::scale(EYE_SCALE, EYE_SCALE * 0.7, EYE_SCALE),
        );
        graph.add_model(scale, "eye model", models.eye.clone());
    }

    fn make_antenna(graph: &mut SceneGraph, parent: NodeId, models: &DancerModels, modifier: f32) {
        let antenna = graph.add_group(parent, "antenna");
        let translate = graph.add_transform(
            antenna,
            "antenna translate",
            transforms::translate(0.0, HEAD_HEIGHT / 2.0 + BODY_HEIGHT, 0.0),
        );
        let scale = graph.add_transform(
            translate,
            "antenna scale",
            transforms::rotate_z(modifier * 45.0)
                * transforms::scale(ANTENNA_WIDTH, ANTENNA_HEIGHT, ANTENNA_WIDTH),
        );
        graph.add_model(scale, "antenna model", models.antenna.clone());
    }

    pub fn set_mode(&mut self, mode: DanceMode) {
        if mode != self.mode {
            log::debug!("dance mode {:?} -> {:?}", self.mode, mode);
        }
        self.mode = mode;
    }

    pub fn mode(&self) -> DanceMode {
        self.mode
    }

    /// Progress of the current dance cycle in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        self.clock.progress()
    }

    /// Per-frame step. `patrol_position` is where the patrolling robot
    /// currently is; in [`DanceMode::DistanceGated`] the dance pauses
    /// whenever that robot has left the dancer's corner of the room.
    pub fn animate(&mut self, patrol_position: Vector3<f32>) {
        match self.mode {
            DanceMode::Stopped => self.clock.pause(),
            DanceMode::Dance => {
                self.clock.resume();
                self.perform();
            }
            DanceMode::DistanceGated => {
                if patrol_position.x > DANCE_ZONE_MAX_X || patrol_position.z > DANCE_ZONE_MAX_Z {
                    self.clock.pause();
                } else {
                    self.clock.resume();
                    self.perform();
                }
            }
        }
    }

    fn perform(&mut self) {
        self.clock.update();
        let progress = self.clock.progress();
        self.apply_pose(progress);
    }

    /// Writes the joint transforms for a given cycle progress.
    ///
    /// Boundaries belong to the lower phase (`<=`), and each phase remaps
    /// progress to its own 0..1 ramp, so the pose is continuous within a
    /// phase and the cycle meets itself at 1.0 == 0.0.
    fn apply_pose(&mut self, progress: f64) {
        if progress <= 0.2 {
            // Phase 1: descend while spinning one full turn
            let local = (progress / 0.2) as f32;
            self.spring_pose(-local, 360.0 * local);
        } else if progress <= 0.4 {
            // Phase 2: spring up fast with a double spin
            let local = ((progress - 0.2) / 0.2) as f32;
            self.spring_pose(1.7 * local, 720.0 * local);
        } else if progress <= 0.6 {
            // Phase 3: sink back to rest, spinning up again from zero
            let local = ((progress - 0.4) / 0.2) as f32;
            self.spring_pose(1.7 * (1.0 - local), 720.0 * local);
        } else if progress <= 0.8 {
            // Phase 4: lean, wave and whirl the antennas
            let local = ((progress - 0.6) / 0.2) as f32;
            self.dance_pose(local);
        } else {
            // Phase 5: phase 4 in reverse, back to the rest pose
            let local = 1.0 - ((progress - 0.8) / 0.2) as f32;
            self.dance_pose(local);
        }
    }

    /// Bob the whole body stack up or down while spinning it.
    fn spring_pose(&mut self, lift: f32, spin_degrees: f32) {
        let m = transforms::translate(0.0, lift, 0.0) * transforms::rotate_y(spin_degrees);
        self.graph.set_local_transform(self.body_parts_joint, m);
        self.graph.update(self.body_parts_joint);
    }

    /// Lean the legs, swing the arms out and around, whirl the antennas.
    /// `local` is the phase-local ramp in 0..1.
    fn dance_pose(&mut self, local: f32) {
        self.graph
            .set_local_transform(self.bottom_leg_joint, transforms::rotate_z(30.0 * local));
        self.graph.update(self.bottom_leg_joint);

        self.graph
            .set_local_transform(self.top_leg_joint, transforms::rotate_z(10.0 * local));
        self.graph.update(self.top_leg_joint);

        let arms = transforms::rotate_z(45.0 * local) * transforms::rotate_x(360.0 * local);
        self.graph.set_local_transform(self.arms_joint, arms);
        self.graph.update(self.arms_joint);

        self.graph
            .set_local_transform(self.antenna_joint, transforms::rotate_y(1080.0 * local));
        self.graph.update(self.antenna_joint);
    }

    pub fn draw(&self) {
        self.graph.draw_all();
    }

    pub fn dispose(&self) {
        self.graph.dispose();
    }
}
