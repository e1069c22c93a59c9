//! The animated and static occupants of the scene.

pub mod dancer;
pub mod globe;
pub mod patrol;
pub mod room;
pub mod skybox;
