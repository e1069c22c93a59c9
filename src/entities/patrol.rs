//! The patrolling robot: drives a rectangular circuit around the room,
//! banking into its turns, with a spotlight swept from a spinning housing
//! on its back.

use std::cell::RefCell;
use std::rc::Rc;

use cgmath::Vector3;

use crate::lighting::Spotlight;
use crate::model::Drawable;
use crate::scene::graph::{NodeId, SceneGraph};
use crate::scene::transforms;

const BODY_HEIGHT: f32 = 1.0;
const BODY_WIDTH: f32 = 1.0;
const BODY_DEPTH: f32 = 2.0;
const EYE_RADIUS: f32 = 0.2;
const STEM_HEIGHT: f32 = 0.9;
const STEM_WIDTH: f32 = 0.1;
const HOUSING_RADIUS: f32 = 1.0;
const HOUSING_DEPTH: f32 = 0.3;
const BULB_RADIUS: f32 = 0.4;

const START_POSITION: Vector3<f32> = Vector3::new(6.25, 0.05, 5.5);

/// World units moved per frame along the current leg.
const SPEED: f32 = 0.05;
/// Degrees of heading change per turning frame.
const TURN_STEP: f32 = 2.0;
/// Degrees of bank gained per turning frame.
const BANK_STEP: f32 = 0.5;
/// Degrees of bank shed per straight-line frame.
const BANK_SETTLE: f32 = 1.0;

/// Degrees per second of housing spin, against wall-clock time.
const HOUSING_SPIN_RATE: f64 = 60.0;
/// Fixed forward tilt of the spotlight housing.
const HOUSING_TILT_DEGREES: f32 = 25.0;

/// Drawables for the patrol robot's parts.
pub struct PatrolModels {
    pub body: Rc<dyn Drawable>,
    pub eye: Rc<dyn Drawable>,
    pub housing: Rc<dyn Drawable>,
    pub bulb: Rc<dyn Drawable>,
}

/// A robot that patrols a rectangular circuit.
///
/// The heading accumulates from 0 down to -360 degrees over one circuit
/// (a quarter turn per corner) and wraps back to 0. Four hard-coded corner
/// triggers start each turn; while turning the robot banks into the corner
/// and the bank settles back to zero on the following straight.
pub struct PatrolRobot {
    graph: SceneGraph,
    translate_node: NodeId,
    rotate_node: NodeId,
    housing_spin_node: NodeId,
    position: Vector3<f32>,
    heading_degrees: f32,
    bank_degrees: f32,
}

impl PatrolRobot {
    pub fn new(models: PatrolModels, spotlight: Rc<RefCell<Spotlight>>) -> Self {
        let mut graph = SceneGraph::new("patrol robot");

        let translate_node = graph.add_transform(
            graph.root(),
            "full robot translate",
            transforms::translate_vec(START_POSITION),
        );
        let rotate_node =
            graph.add_transform(translate_node, "full robot rotate", transforms::rotate_y(0.0));

        let body = Self::make_body(&mut graph, rotate_node, &models);
        Self::make_eye(&mut graph, body, &models, true);
        Self::make_eye(&mut graph, body, &models, false);
        let stem = Self::make_stem(&mut graph, body, &models);

        let lift = graph.add_transform(
            stem,
            "lift to housing",
            transforms::translate(0.0, STEM_HEIGHT + BODY_HEIGHT, 0.0),
        );
        let housing_spin_node =
            graph.add_transform(lift, "housing spin", transforms::rotate_y(0.0));
        let housing = Self::make_housing(&mut graph, housing_spin_node, &models);
        let bulb = Self::make_bulb(&mut graph, housing, &models);
        graph.add_spotlight(bulb, "spotlight", spotlight);

        graph.update_all();

        Self {
            graph,
            translate_node,
            rotate_node,
            housing_spin_node,
            position: START_POSITION,
            heading_degrees: 0.0,
            bank_degrees: 0.0,
        }
    }

    fn make_body(graph: &mut SceneGraph, parent: NodeId, models: &PatrolModels) -> NodeId {
        let body = graph.add_group(parent, "body");
        let transform = graph.add_transform(
            body,
            "body transform",
            transforms::box_on_floor(BODY_WIDTH, BODY_HEIGHT, BODY_DEPTH),
        );
        graph.add_model(transform, "body model", models.body.clone());
        body
    }

    fn make_eye(graph: &mut SceneGraph, parent: NodeId, models: &PatrolModels, left: bool) {
        let (label, offset) = if left {
            ("left eye", 0.3)
        } else {
            ("right eye", -0.3)
        };
        let eye = graph.add_group(parent, label);
        let translate = graph.add_transform(
            eye,
            "eye translate",
            transforms::translate(offset, BODY_HEIGHT / 2.0, BODY_DEPTH / 2.0),
        );
        let scale = graph.add_transform(
            translate,
            "eye scale",
            transforms::rotate_x(180.0) * transforms::scale(EYE_RADIUS, EYE_RADIUS, EYE_RADIUS),
        );
        graph.add_model(scale, "eye model", models.eye.clone());
    }

    fn make_stem(graph: &mut SceneGraph, parent: NodeId, models: &PatrolModels) -> NodeId {
        let stem = graph.add_group(parent, "spotlight stem");
        let translate = graph.add_transform(
            stem,
            "stem translate",
            transforms::translate(0.0, BODY_HEIGHT, 0.0),
        );
        let scale = graph.add_transform(
            translate,
            "stem scale",
            transforms::box_on_floor(STEM_WIDTH, STEM_HEIGHT, STEM_WIDTH),
        );
        graph.add_model(scale, "stem model", models.housing.clone());
        stem
    }

    fn make_housing(graph: &mut SceneGraph, parent: NodeId, models: &PatrolModels) -> NodeId {
        let housing = graph.add_group(parent, "spotlight housing");
        let scale = graph.add_transform(
            housing,
            "housing scale",
            transforms::box_on_floor(HOUSING_RADIUS, HOUSING_RADIUS, HOUSING_DEPTH),
        );
        graph.add_model(scale, "housing model", models.housing.clone());
        housing
    }

    fn make_bulb(graph: &mut SceneGraph, parent: NodeId, models: &PatrolModels) -> NodeId {
        let bulb = graph.add_group(parent, "spotlight bulb");
        let translate = graph.add_transform(
            bulb,
            "bulb translate",
            transforms::translate(0.0, HOUSING_RADIUS * 0.4, HOUSING_DEPTH / 2.0),
        );
        let scale = graph.add_transform(
            translate,
            "bulb scale",
            transforms::box_on_floor(BULB_RADIUS, BULB_RADIUS, BULB_RADIUS / 2.0),
        );
        graph.add_model(scale, "bulb model", models.bulb.clone());
        bulb
    }

    /// One frame of patrol motion: corner handling first, then a forward
    /// step along the leg the (possibly updated) heading selects.
    pub fn advance(&mut self) {
        let h = self.heading_degrees;
        if h > -90.0 && self.position.z > 10.25 {
            self.turn();
        } else if h <= -90.0 && h > -180.0 && self.position.x < -3.9 {
            self.turn();
        } else if h <= -180.0 && h > -270.0 && self.position.z < -12.0 {
            self.turn();
        } else if h <= -270.0 && self.position.x > 4.1 {
            self.turn();
        } else if self.bank_degrees > 0.0 {
            self.settle();
        }
        self.step_forward();
    }

    fn turn(&mut self) {
        if self.heading_degrees <= -360.0 {
            self.heading_degrees = 0.0;
            log::debug!("patrol circuit complete at {:?}", self.position);
        } else {
            self.heading_degrees -= TURN_STEP;
        }
        self.bank_degrees += BANK_STEP;
        self.apply_rotation();
    }

    fn settle(&mut self) {
        self.bank_degrees = (self.bank_degrees - BANK_SETTLE).max(0.0);
        self.apply_rotation();
    }

    fn apply_rotation(&mut self) {
        let m = transforms::rotate_y(self.heading_degrees) * transforms::rotate_z(self.bank_degrees);
        self.graph.set_local_transform(self.rotate_node, m);
        self.graph.update(self.rotate_node);
    }

    /// The four 90 degree heading bands map to +z, -x, -z, +x travel.
    fn step_forward(&mut self) {
        let h = self.heading_degrees;
        if h > -90.0 {
            self.position.z += SPEED;
        } else if h > -180.0 {
            self.position.x -= SPEED;
        } else if h > -270.0 {
            self.position.z -= SPEED;
        } else {
            self.position.x += SPEED;
        }
        self.graph
            .set_local_transform(self.translate_node, transforms::translate_vec(self.position));
        self.graph.update(self.translate_node);
    }

    /// Spins the spotlight housing to match wall-clock time. Runs whether
    /// or not the patrol itself is moving.
    pub fn spin_housing(&mut self, now_seconds: f64) {
        let spin = (HOUSING_SPIN_RATE * now_seconds) as f32;
        let m = transforms::rotate_y(spin) * transforms::rotate_x(HOUSING_TILT_DEGREES);
        self.graph.set_local_transform(self.housing_spin_node, m);
        self.graph.update(self.housing_spin_node);
    }

    pub fn position(&self) -> Vector3<f32> {
        self.position
    }

    pub fn heading_degrees(&self) -> f32 {
        self.heading_degrees
    }

    pub fn bank_degrees(&self) -> f32 {
        self.bank_degrees
    }

    pub fn draw(&self) {
        self.graph.draw_all();
    }

    pub fn dispose(&self) {
        self.graph.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RecordingDrawable;
    use cgmath::InnerSpace;

    fn robot() -> (PatrolRobot, Rc<RefCell<Spotlight>>) {
        let models = PatrolModels {
            body: RecordingDrawable::new(),
            eye: RecordingDrawable::new(),
            housing: RecordingDrawable::new(),
            bulb: RecordingDrawable::new(),
        };
        let spotlight = Rc::new(RefCell::new(Spotlight::new()));
        (PatrolRobot::new(models, spotlight.clone()), spotlight)
    }

    /// Runs frames until the heading wraps back to zero, returning the
    /// number of frames taken.
    fn run_one_circuit(robot: &mut PatrolRobot, frame_limit: usize) -> usize {
        let mut turned = false;
        for frame in 1..=frame_limit {
            let before = robot.heading_degrees();
            robot.advance();
            if robot.heading_degrees() < before {
                turned = true;
            }
            if turned && robot.heading_degrees() == 0.0 {
                return frame;
            }
        }
        panic!("no circuit completed within {frame_limit} frames");
    }

    #[test]
    fn starts_at_the_documented_pose() {
        let (robot, _) = robot();
        assert_eq!(robot.position(), START_POSITION);
        assert_eq!(robot.heading_degrees(), 0.0);
        assert_eq!(robot.bank_degrees(), 0.0);
    }

    #[test]
    fn first_leg_travels_along_positive_z() {
        let (mut robot, _) = robot();
        robot.advance();
        assert_eq!(robot.position().x, START_POSITION.x);
        assert!((robot.position().z - (START_POSITION.z + SPEED)).abs() < 1e-6);
    }

    #[test]
    fn heading_completes_one_full_decrement_cycle_per_circuit() {
        let (mut robot, _) = robot();
        let mut min_heading = 0.0f32;
        let mut turned = false;
        for _ in 0..20_000 {
            let before = robot.heading_degrees();
            robot.advance();
            let h = robot.heading_degrees();
            if h < before {
                turned = true;
            }
            min_heading = min_heading.min(h);
            if turned && h == 0.0 {
                break;
            }
        }
        assert_eq!(robot.heading_degrees(), 0.0);
        assert_eq!(min_heading, -360.0);
    }

    #[test]
    fn turning_changes_travel_direction_in_the_same_frame() {
        let (mut robot, _) = robot();
        // run up the first leg until the corner trigger fires
        while robot.heading_degrees() > -90.0 {
            robot.advance();
        }
        // the frame that took the heading to -90 already moved along -x
        assert_eq!(robot.heading_degrees(), -90.0);
        assert!((robot.position().x - (START_POSITION.x - SPEED)).abs() < 1e-5);
        let x = robot.position().x;
        robot.advance();
        assert!(robot.position().x < x);
    }

    #[test]
    fn bank_rises_while_turning_and_settles_to_zero() {
        let (mut robot, _) = robot();
        while robot.heading_degrees() > -90.0 {
            robot.advance();
        }
        let peak = robot.bank_degrees();
        assert!(peak > 0.0);

        // straight-line frames shed bank until it floors at zero
        let mut previous = peak;
        for _ in 0..100 {
            robot.advance();
            let bank = robot.bank_degrees();
            assert!(bank <= previous);
            assert!(bank >= 0.0);
            previous = bank;
        }
        assert_eq!(robot.bank_degrees(), 0.0);
    }

    #[test]
    fn circuit_is_periodic() {
        let (mut robot, _) = robot();
        run_one_circuit(&mut robot, 20_000);
        let lap_start = robot.position();

        let frames = run_one_circuit(&mut robot, 20_000);
        let lap_end = robot.position();

        // steady-state laps retrace themselves to within a step or two
        assert!((lap_end - lap_start).magnitude() < 2.0 * SPEED + 1e-3);

        let frames_again = run_one_circuit(&mut robot, 20_000);
        assert!((frames as i64 - frames_again as i64).abs() <= 2);
    }

    #[test]
    fn circuit_visits_all_four_legs() {
        let (mut robot, _) = robot();
        let mut min_x = f32::MAX;
        let mut max_x = f32::MIN;
        let mut min_z = f32::MAX;
        let mut max_z = f32::MIN;
        // skip the first, transient lap, then record a steady-state one
        run_one_circuit(&mut robot, 20_000);
        let mut turned = false;
        for _ in 0..20_000 {
            let before = robot.heading_degrees();
            robot.advance();
            if robot.heading_degrees() < before {
                turned = true;
            }
            let p = robot.position();
            min_x = min_x.min(p.x);
            max_x = max_x.max(p.x);
            min_z = min_z.min(p.z);
            max_z = max_z.max(p.z);
            if turned && robot.heading_degrees() == 0.0 {
                break;
            }
        }
        assert!(max_z > 10.25);
        assert!(min_x < -3.9);
        assert!(min_z < -12.0);
        assert!(max_x > 4.1);
    }

    #[test]
    fn housing_spin_tracks_wall_time_and_keeps_the_tilt() {
        let (mut robot, spotlight) = robot();
        robot.spin_housing(0.0);
        let at_rest = spotlight.borrow().direction();

        // 6 seconds of spin is one full turn: the beam returns
        robot.spin_housing(6.0);
        let after_turn = spotlight.borrow().direction();
        assert!((at_rest - after_turn).magnitude() < 1e-4);

        // a quarter turn swings the beam by 90 degrees
        robot.spin_housing(1.5);
        let quarter = spotlight.borrow().direction();
        assert!(at_rest.dot(quarter).abs() < 1e-4);
    }

    #[test]
    fn spotlight_position_rides_the_robot() {
        let (mut robot, spotlight) = robot();
        let before = spotlight.borrow().position();
        for _ in 0..10 {
            robot.advance();
        }
        let after = spotlight.borrow().position();
        // first leg moves along +z; the lamp comes along
        assert!((after.z - before.z - 10.0 * SPEED).abs() < 1e-4);
        assert!((after.x - before.x).abs() < 1e-4);
        assert!(after.y > 1.0);
    }
}
