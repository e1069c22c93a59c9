//! Scene graph: node arena, transform propagation and matrix builders.

pub mod graph;
pub mod transforms;
