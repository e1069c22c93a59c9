//! The skybox: a cube leaf pinned to the camera so it never gets closer.

use std::rc::Rc;

use cgmath::Vector3;

use crate::model::Drawable;
use crate::scene::graph::{NodeId, SceneGraph};
use crate::scene::transforms;

/// Scroll rate of the animated overlay, radians per second of phase.
const SCROLL_RATE: f64 = 0.1;
/// Amplitude of the overlay scroll in texture units.
const SCROLL_AMPLITUDE: f64 = 0.1;

pub struct Skybox {
    graph: SceneGraph,
    follow_node: NodeId,
}

impl Skybox {
    pub fn new(model: Rc<dyn Drawable>) -> Self {
        let mut graph = SceneGraph::new("skybox");
        let follow_node = graph.add_transform(
            graph.root(),
            "follow camera",
            transforms::translate(0.0, 0.0, 0.0),
        );
        graph.add_model(follow_node, "sky model", model);
        graph.update_all();
        Self { graph, follow_node }
    }

    /// Pins the sky to the camera position so translation never reveals
    /// the cube's faces.
    pub fn follow(&mut self, camera_position: Vector3<f32>) {
        self.graph
            .set_local_transform(self.follow_node, transforms::translate_vec(camera_position));
        self.graph.update(self.follow_node);
    }

    /// Texture-space offset of the drifting overlay at the given time.
    pub fn animated_offset(now_seconds: f64) -> (f32, f32) {
        let drift = ((now_seconds * SCROLL_RATE).sin() * SCROLL_AMPLITUDE) as f32;
        (drift, drift)
    }

    pub fn draw(&self) {
        self.graph.draw_all();
    }

    pub fn dispose(&self) {
        self.graph.dispose();
    }
}
