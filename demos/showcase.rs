//! Headless showcase: drives the world for a minute of simulated time at
//! 60 frames per second and logs what the animators are doing.
//!
//! Run with `RUST_LOG=info cargo run --example showcase`.

use std::rc::Rc;

use cgmath::Matrix4;

use marionette::entities::dancer::DancerModels;
use marionette::entities::globe::GlobeModels;
use marionette::entities::patrol::PatrolModels;
use marionette::entities::room::RoomModels;
use marionette::world::WorldModels;
use marionette::{DanceMode, Drawable, ManualClock, TimeSource, World};

/// Stand-in for a GPU mesh: draw calls just count.
struct StubModel {
    name: &'static str,
}

impl StubModel {
    fn new(name: &'static str) -> Rc<Self> {
        Rc::new(Self { name })
    }
}

impl Drawable for StubModel {
    fn render(&self, world: &Matrix4<f32>) {
        log::trace!("draw {} at ({:.2}, {:.2}, {:.2})", self.name, world.w.x, world.w.y, world.w.z);
    }

    fn dispose(&self) {
        log::trace!("dispose {}", self.name);
    }
}

fn stub_models() -> WorldModels {
    WorldModels {
        dancer: DancerModels {
            base: StubModel::new("dancer base"),
            leg: StubModel::new("dancer leg"),
            body: StubModel::new("dancer body"),
            arm: StubModel::new("dancer arm"),
            head: StubModel::new("dancer head"),
            eye: StubModel::new("dancer eye"),
            antenna: StubModel::new("dancer antenna"),
        },
        patrol: PatrolModels {
            body: StubModel::new("patrol body"),
            eye: StubModel::new("patrol eye"),
            housing: StubModel::new("patrol housing"),
            bulb: StubModel::new("patrol bulb"),
        },
        globe: GlobeModels {
            base: StubModel::new("globe base"),
            axis: StubModel::new("globe axis"),
            globe: StubModel::new("globe sphere"),
        },
        room: RoomModels {
            floor: StubModel::new("floor"),
            back_wall: StubModel::new("back wall"),
            window_wall: StubModel::new("window wall"),
            right_wall: StubModel::new("right wall"),
            ceiling: StubModel::new("ceiling"),
        },
        skybox: StubModel::new("skybox"),
    }
}

fn main() {
    env_logger::init();

    let time = Rc::new(ManualClock::new());
    let mut world = match World::new(stub_models(), time.clone()) {
        Ok(world) => world,
        Err(err) => {
            eprintln!("failed to assemble the world: {err}");
            std::process::exit(1);
        }
    };

    world.set_dance_mode(DanceMode::DistanceGated);
    world.set_ceiling_brightness(0.7);
    world.set_spotlight_brightness(0.5);

    let frames_per_second = 60u32;
    let seconds = 60u32;
    for frame in 0..frames_per_second * seconds {
        time.advance(1.0 / frames_per_second as f64);
        world.advance_frame();

        if frame % frames_per_second == 0 {
            let position = world.patrol_position();
            let spotlight = world.spotlight();
            let beam = spotlight.borrow().direction();
            log::info!(
                "t={:>5.1}s patrol at ({:+.2}, {:+.2}) dance {:>4.1}% beam ({:+.2}, {:+.2})",
                time.now(),
                position.x,
                position.z,
                world.dance_progress() * 100.0,
                beam.x,
                beam.z,
            );
        }
    }

    world.dispose();
}
