//! The room: five static walls around the scene.

use std::rc::Rc;

use cgmath::Vector3;

use crate::model::Drawable;
use crate::scene::graph::SceneGraph;
use crate::scene::transforms;

/// Half the room's long dimension; all wall placements derive from it.
const ROOM_SCALE: f32 = 16.0;

pub struct RoomModels {
    pub floor: Rc<dyn Drawable>,
    pub back_wall: Rc<dyn Drawable>,
    pub window_wall: Rc<dyn Drawable>,
    pub right_wall: Rc<dyn Drawable>,
    pub ceiling: Rc<dyn Drawable>,
}

/// Five flat walls, each a single plane placed by translate/rotate/scale.
pub struct Room {
    graph: SceneGraph,
}

impl Room {
    pub fn new(models: RoomModels) -> Self {
        let mut graph = SceneGraph::new("room");

        Self::make_wall(
            &mut graph,
            "floor",
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(ROOM_SCALE, 1.0, ROOM_SCALE * 2.0),
            models.floor,
        );
        Self::make_wall(
            &mut graph,
            "back wall",
            Vector3::new(0.0, ROOM_SCALE / 4.0, -ROOM_SCALE),
            Vector3::new(90.0, 0.0, 0.0),
            Vector3::new(ROOM_SCALE, 1.0, ROOM_SCALE / 2.0),
            models.back_wall,
        );
        Self::make_wall(
            &mut graph,
            "window wall",
            Vector3::new(-ROOM_SCALE / 2.0, ROOM_SCALE / 4.0, 0.0),
            Vector3::new(90.0, 90.0, 0.0),
            Vector3::new(ROOM_SCALE * 2.0, 1.0, ROOM_SCALE / 2.0),
            models.window_wall,
        );
        Self::make_wall(
            &mut graph,
            "right wall",
            Vector3::new(ROOM_SCALE / 2.0, ROOM_SCALE / 4.0, 0.0),
            Vector3::new(90.0, 90.0, 0.0),
            Vector3::new(ROOM_SCALE * 2.0, 1.0, ROOM_SCALE / 2.0),
            models.right_wall,
        );
        Self::make_wall(
            &mut graph,
            "ceiling",
            Vector3::new(0.0, ROOM_SCALE / 2.0, 0.0),
            Vector3::new(180.0, 0.0, 0.0),
            Vector3::new(ROOM_SCALE, 1.0, ROOM_SCALE * 2.0),
            models.ceiling,
        );

        graph.update_all();

        Self { graph }
    }

    fn make_wall(
        graph: &mut SceneGraph,
        label: &str,
        position: Vector3<f32>,
        rotation_degrees: Vector3<f32>,
        scale: Vector3<f32>,
        model: Rc<dyn Drawable>,
    ) {
        let m = transforms::translate_vec(position)
            * transforms::rotate_z(rotation_degrees.z)
            * transforms::rotate_y(rotation_degrees.y)
            * transforms::rotate_x(rotation_degrees.x)
            * transforms::scale(scale.x, scale.y, scale.z);
        let root = graph.root();
        let placement = graph.add_transform(root, label, m);
        graph.add_model(placement, "wall model", model);
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
    use cgmath::Vector4;

    #[test]
    fn every_wall_is_drawn_once() {
        let walls: Vec<Rc<RecordingDrawable>> = (0..5).map(|_| RecordingDrawable::new()).collect();
        let room = Room::new(RoomModels {
            floor: walls[0].clone(),
            back_wall: walls[1].clone(),
            window_wall: walls[2].clone(),
            right_wall: walls[3].clone(),
            ceiling: walls[4].clone(),
        });
        room.draw();
        for wall in &walls {
            assert_eq!(wall.call_count(), 1);
        }
    }

    #[test]
    fn walls_enclose_the_room() {
        let walls: Vec<Rc<RecordingDrawable>> = (0..5).map(|_| RecordingDrawable::new()).collect();
        let room = Room::new(RoomModels {
            floor: walls[0].clone(),
            back_wall: walls[1].clone(),
            window_wall: walls[2].clone(),
            right_wall: walls[3].clone(),
            ceiling: walls[4].clone(),
        });
        room.draw();
        let centre = |m: cgmath::Matrix4<f32>| m * Vector4::new(0.0, 0.0, 0.0, 1.0);

        let floor = centre(walls[0].last_world().unwrap());
        assert!(floor.y.abs() < 1e-5);
        let back = centre(walls[1].last_world().unwrap());
        assert!((back.z + ROOM_SCALE).abs() < 1e-4);
        assert!((back.y - ROOM_SCALE / 4.0).abs() < 1e-4);
        let window = centre(walls[2].last_world().unwrap());
        assert!((window.x + ROOM_SCALE / 2.0).abs() < 1e-4);
        let right = centre(walls[3].last_world().unwrap());
        assert!((right.x - ROOM_SCALE / 2.0).abs() < 1e-4);
        let ceiling = centre(walls[4].last_world().unwrap());
        assert!((ceiling.y - ROOM_SCALE / 2.0).abs() < 1e-4);
    }
}
