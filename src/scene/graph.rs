//! Arena-backed scene graph with top-down transform propagation.
//!
//! Nodes live in a flat arena and are addressed by [`NodeId`] handles, so
//! animators can hold on to the joints they drive without borrowing the
//! tree. Every node caches a world transform that already includes its own
//! local contribution; a parent's cached world transform is therefore the
//! exact incoming matrix for a subtree refresh.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use cgmath::{Matrix4, SquareMatrix};

use crate::lighting::Spotlight;
use crate::model::Drawable;

/// Handle to a node inside a [`SceneGraph`].
///
/// Ids are only meaningful for the graph that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeId(usize);

/// What a node contributes during the update and draw passes.
pub enum NodeKind {
    /// Structural label; propagates the incoming transform unchanged.
    Group,
    /// Composes a local transform into the propagated matrix.
    Transform { local: Matrix4<f32> },
    /// Leaf wrapping a drawable, rendered with its world transform.
    Model { model: Rc<dyn Drawable> },
    /// Leaf that feeds its world transform into a spotlight whenever the
    /// update pass reaches it.
    Spotlight { light: Rc<RefCell<Spotlight>> },
}

struct Node {
    label: String,
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    world: Matrix4<f32>,
}

/// A tree of transform, group and leaf nodes.
///
/// The tree shape is fixed by construction: `add_*` always creates a fresh
/// node under an existing parent, so every node has exactly one parent and
/// cycles cannot be formed.
pub struct SceneGraph {
    nodes: Vec<Node>,
    root: NodeId,
}

impl SceneGraph {
    /// Creates a graph containing a single root group node.
    pub fn new(root_label: &str) -> Self {
        let root = Node {
            label: root_label.to_owned(),
            kind: NodeKind::Group,
            parent: None,
            children: Vec::new(),
            world: Matrix4::identity(),
        };
        Self {
            nodes: vec![root],
            root: NodeId(0),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn add_group(&mut self, parent: NodeId, label: &str) -> NodeId {
        self.insert(parent, label, NodeKind::Group)
    }

    pub fn add_transform(&mut self, parent: NodeId, label: &str, local: Matrix4<f32>) -> NodeId {
        self.insert(parent, label, NodeKind::Transform { local })
    }

    pub fn add_model(&mut self, parent: NodeId, label: &str, model: Rc<dyn Drawable>) -> NodeId {
        self.insert(parent, label, NodeKind::Model { model })
    }

    pub fn add_spotlight(
        &mut self,
        parent: NodeId,
        label: &str,
        light: Rc<RefCell<Spotlight>>,
    ) -> NodeId {
        self.insert(parent, label, NodeKind::Spotlight { light })
    }

    fn insert(&mut self, parent: NodeId, label: &str, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            label: label.to_owned(),
            kind,
            parent: Some(parent),
            children: Vec::new(),
            world: Matrix4::identity(),
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Replaces the local transform of a transform node.
    ///
    /// Cached world transforms are not touched; call [`update`](Self::update)
    /// on the node (or [`update_all`](Self::update_all)) to re-propagate.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not refer to a transform node.
    pub fn set_local_transform(&mut self, id: NodeId, m: Matrix4<f32>) {
        match &mut self.nodes[id.0].kind {
            NodeKind::Transform { local } => *local = m,
            _ => panic!(
                "set_local_transform on non-transform node `{}`",
                self.nodes[id.0].label
            ),
        }
    }

    /// The local transform of a transform node, `None` for other kinds.
    pub fn local_transform(&self, id: NodeId) -> Option<Matrix4<f32>> {
        match &self.nodes[id.0].kind {
            NodeKind::Transform { local } => Some(*local),
            _ => None,
        }
    }

    /// The world transform cached by the last update pass that reached `id`.
    pub fn world_transform(&self, id: NodeId) -> Matrix4<f32> {
        self.nodes[id.0].world
    }

    pub fn label(&self, id: NodeId) -> &str {
        &self.nodes[id.0].label
    }

    /// Total number of nodes, the root included; never zero.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Recomputes world transforms for the whole tree from the root.
    pub fn update_all(&mut self) {
        let root = self.root;
        self.propagate(root, Matrix4::identity());
    }

    /// Recomputes world transforms for the subtree rooted at `id`, using
    /// the parent's cached world transform as the incoming matrix.
    ///
    /// Ancestors must be up to date for the refresh to be meaningful; the
    /// usual pattern is one `update_all` after construction, then targeted
    /// `update` calls on the joints an animator rewrites.
    pub fn update(&mut self, id: NodeId) {
        let incoming = match self.nodes[id.0].parent {
            Some(parent) => self.nodes[parent.0].world,
            None => Matrix4::identity(),
        };
        self.propagate(id, incoming);
    }

    fn propagate(&mut self, id: NodeId, incoming: Matrix4<f32>) {
        let world = match &self.nodes[id.0].kind {
            NodeKind::Transform { local } => incoming * *local,
            _ => incoming,
        };
        self.nodes[id.0].world = world;
        // The spotlight pose is derived after the world transform is
        // assigned, so the light always matches what this pass computed.
        if let NodeKind::Spotlight { light } = &self.nodes[id.0].kind {
            light.borrow_mut().set_pose_from_world(&world);
        }
        let mut i = 0;
        while let Some(&child) = self.nodes[id.0].children.get(i) {
            self.propagate(child, world);
            i += 1;
        }
    }

    /// Depth-first draw pass: renders every model leaf with its cached
    /// world transform, in tree order.
    pub fn draw_all(&self) {
        self.draw(self.root);
    }

    fn draw(&self, id: NodeId) {
        let node = &self.nodes[id.0];
        if let NodeKind::Model { model } = &node.kind {
            model.render(&node.world);
        }
        for &child in &node.children {
            self.draw(child);
        }
    }

    /// Calls [`Drawable::dispose`] on every model leaf.
    ///
    /// A drawable shared by several leaves sees one call per leaf.
    pub fn dispose(&self) {
        for node in &self.nodes {
            if let NodeKind::Model { model } = &node.kind {
                model.dispose();
            }
        }
    }

    fn fmt_node(&self, f: &mut fmt::Formatter<'_>, id: NodeId, depth: usize) -> fmt::Result {
        let node = &self.nodes[id.0];
        let kind = match &node.kind {
            NodeKind::Group => "group",
            NodeKind::Transform { .. } => "transform",
            NodeKind::Model { .. } => "model",
            NodeKind::Spotlight { .. } => "spotlight",
        };
        writeln!(f, "{}{} [{}]", "  ".repeat(depth), node.label, kind)?;
        for &child in &node.children {
            self.fmt_node(f, child, depth + 1)?;
        }
        Ok(())
    }
}

impl fmt::Display for SceneGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_node(f, self.root, 0)
    }
}
