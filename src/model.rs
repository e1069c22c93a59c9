//! The drawable seam between the scene graph and the rendering backend.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use cgmath::Matrix4;

/// A renderable model owned by the excluded resource layer.
///
/// The core never inspects geometry or materials; it hands each leaf's
/// accumulated world transform to the backend once per draw pass. One
/// drawable may back several leaves (e.g. one sphere mesh reused for both
/// robot legs), so implementations must tolerate `dispose` being called
/// more than once.
pub trait Drawable {
    /// Issue a draw call with the given world transform.
    fn render(&self, world: &Matrix4<f32>);

    /// Release backend resources. Must be safe to call repeatedly.
    fn dispose(&self) {}
}

/// Drawable that records every world transform it is rendered with.
///
/// Used as the backend in tests and headless demos.
#[derive(Default)]
pub struct RecordingDrawable {
    calls: RefCell<Vec<Matrix4<f32>>>,
    dispose_count: Cell<u32>,
}

impl RecordingDrawable {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// All world transforms seen so far, in draw order.
    pub fn calls(&self) -> Vec<Matrix4<f32>> {
        self.calls.borrow().clone()
    }

    /// The world transform of the most recent draw call, if any.
    pub fn last_world(&self) -> Option<Matrix4<f32>> {
        self.calls.borrow().last().copied()
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }

    pub fn dispose_count(&self) -> u32 {
        self.dispose_count.get()
    }
}

impl Drawable for RecordingDrawable {
    fn render(&self, world: &Matrix4<f32>) {
        self.calls.borrow_mut().push(*world);
    }

    fn dispose(&self) {
        self.dispose_count.set(self.dispose_count.get() + 1);
    }
}
