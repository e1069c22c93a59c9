//! The desk globe: a sphere on an axis on a base, spinning continuously.

use std::rc::Rc;

use crate::model::Drawable;
use crate::scene::graph::{NodeId, SceneGraph};
use crate::scene::transforms;

const BASE_HEIGHT: f32 = 0.5;
const BASE_WIDTH: f32 = 1.0;
const AXIS_HEIGHT: f32 = 2.0;
const AXIS_WIDTH: f32 = 0.1;
const GLOBE_RADIUS: f32 = 1.5;

/// Degrees per second of globe spin, against wall-clock time.
const SPIN_RATE: f64 = 30.0;

pub struct GlobeModels {
    pub base: Rc<dyn Drawable>,
    pub axis: Rc<dyn Drawable>,
    pub globe: Rc<dyn Drawable>,
}

/// A globe that spins at a fixed rate, placed in a corner of the room.
pub struct Globe {
    graph: SceneGraph,
    spin_node: NodeId,
}

impl Globe {
    pub fn new(models: GlobeModels) -> Self {
        let mut graph = SceneGraph::new("globe");

        let placement = graph.add_transform(
            graph.root(),
            "full globe translate",
            transforms::translate(4.0, BASE_HEIGHT / 2.0, 9.5),
        );

        let base = graph.add_group(placement, "base");
        let base_transform = graph.add_transform(
            base,
            "base transform",
            transforms::box_on_floor(BASE_WIDTH, BASE_HEIGHT, BASE_WIDTH),
        );
        graph.add_model(base_transform, "base model", models.base.clone());

        let axis = graph.add_group(base, "axis");
        let axis_transform = graph.add_transform(
            axis,
            "axis transform",
            transforms::translate(0.0, BASE_HEIGHT, 0.0)
                * transforms::box_on_floor(AXIS_WIDTH, AXIS_HEIGHT, AXIS_WIDTH),
        );
        graph.add_model(axis_transform, "axis model", models.axis.clone());

        let globe = graph.add_group(axis, "globe");
        let lift = graph.add_transform(
            globe,
            "globe translate",
            transforms::translate(0.0, AXIS_HEIGHT * 0.4, 0.0),
        );
        let spin_node = graph.add_transform(lift, "globe spin", transforms::rotate_y(0.0));
        let scale = graph.add_transform(
            spin_node,
            "globe scale",
            transforms::box_on_floor(GLOBE_RADIUS, GLOBE_RADIUS, GLOBE_RADIUS),
        );
        graph.add_model(scale, "globe model", models.globe.clone());

        graph.update_all();

        Self { graph, spin_node }
    }

    /// Aligns the spin with wall-clock time.
    pub fn advance(&mut self, now_seconds: f64) {
        let spin = (SPIN_RATE * now_seconds) as f32;
        self.graph
            .set_local_transform(self.spin_node, transforms::rotate_y(spin));
        self.graph.update(self.spin_node);
    }

    pub fn draw(&self) {
        self.graph.draw_all();
    }

    pub fn dispose(&self) {
        self.graph.dispose();
    }
}
