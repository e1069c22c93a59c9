// src/lib.rs
//! Marionette
//!
//! A hierarchical transform scene graph with a time-driven procedural
//! animation layer on top: animation clocks, per-entity motion state
//! machines (a dancing robot, a patrolling robot, a spinning globe, a
//! sweeping spotlight) and a yaw/pitch camera.
//!
//! Rendering, windowing and asset loading are external collaborators: the
//! core hands accumulated world transforms to [`model::Drawable`]
//! implementations and samples time through [`time::TimeSource`].

pub mod animation;
pub mod camera;
pub mod entities;
pub mod error;
pub mod lighting;
pub mod model;
pub mod scene;
pub mod time;
pub mod world;

// Re-export main types for convenience
pub use animation::clock::{AnimationClock, ClockState, LoopMode};
pub use camera::{Camera, CameraPreset, Movement};
pub use entities::dancer::DanceMode;
pub use error::MarionetteError;
pub use model::Drawable;
pub use scene::graph::{NodeId, SceneGraph};
pub use time::{ManualClock, MonotonicClock, TimeSource};
pub use world::World;
