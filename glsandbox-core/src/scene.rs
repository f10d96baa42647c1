//! A minimal scene graph.
//!
//! Nodes are either a mesh leaf or a group of child nodes. Each node carries a
//! [`Transform`] relative to its parent, so drawing walks the tree composing
//! matrices on the way down. The mesh payload is generic: the CPU side builds
//! the tree out of [`MeshData`](crate::MeshData) and the renderer converts it
//! with [`SceneNode::try_map`] into a tree of uploaded GPU meshes.

use glam::Mat4;

use crate::Transform;

/// What a node holds.
#[derive(Clone, Debug, PartialEq)]
pub enum NodeContent<M> {
    Mesh(M),
    Group(Vec<SceneNode<M>>),
}

/// A node in the scene graph.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneNode<M> {
    pub name: String,
    pub transform: Transform,
    /// Invisible nodes are skipped together with their whole subtree.
    pub visible: bool,
    pub content: NodeContent<M>,
}

impl<M> SceneNode<M> {
    /// Creates a leaf node drawing `mesh`.
    pub fn mesh(name: impl Into<String>, mesh: M) -> Self {
        Self {
            name: name.into(),
            transform: Transform::IDENTITY,
            visible: true,
            content: NodeContent::Mesh(mesh),
        }
    }

    /// Creates an empty group.
    pub fn group(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transform: Transform::IDENTITY,
            visible: true,
            content: NodeContent::Group(Vec::new()),
        }
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    /// Builder form of [`SceneNode::push`]. A child given to a mesh node is
    /// dropped and logged.
    pub fn with_child(mut self, child: SceneNode<M>) -> Self {
        if let Err(e) = self.push(child) {
            log::error!("{e}");
        }
        self
    }

    /// Adds a child to a group node.
    pub fn push(&mut self, child: SceneNode<M>) -> Result<(), String> {
        match &mut self.content {
            NodeContent::Group(children) => {
                children.push(child);
                Ok(())
            }
            NodeContent::Mesh(_) => Err(format!(
                "Cannot add child '{}' to mesh node '{}'",
                child.name, self.name
            )),
        }
    }

    /// Children of a group, empty for a mesh.
    pub fn children(&self) -> &[SceneNode<M>] {
        match &self.content {
            NodeContent::Group(children) => children,
            NodeContent::Mesh(_) => &[],
        }
    }

    pub fn children_mut(&mut self) -> &mut [SceneNode<M>] {
        match &mut self.content {
            NodeContent::Group(children) => children,
            NodeContent::Mesh(_) => &mut [],
        }
    }

    /// The node's world matrix given its parent's.
    pub fn world_matrix(&self, parent: Mat4) -> Mat4 {
        parent * self.transform.matrix()
    }

    /// Walks the visible part of the tree depth first, calling `visit` once for
    /// every mesh with its world matrix. Siblings are visited in insertion order.
    pub fn draw<F>(&self, parent: Mat4, visit: &mut F)
    where
        F: FnMut(&M, Mat4),
    {
        if !self.visible {
            return;
        }

        let world = self.world_matrix(parent);
        match &self.content {
            NodeContent::Mesh(mesh) => visit(mesh, world),
            NodeContent::Group(children) => {
                for child in children {
                    child.draw(world, visit);
                }
            }
        }
    }

    /// Finds the first node called `name`, depth first, including `self`.
    pub fn find(&self, name: &str) -> Option<&SceneNode<M>> {
        if self.name == name {
            return Some(self);
        }
        self.children().iter().find_map(|child| child.find(name))
    }

    pub fn find_mut(&mut self, name: &str) -> Option<&mut SceneNode<M>> {
        if self.name == name {
            return Some(self);
        }
        self.children_mut()
            .iter_mut()
            .find_map(|child| child.find_mut(name))
    }

    /// Converts every mesh payload with `f`, keeping names, transforms,
    /// visibility and structure. Stops at the first error.
    pub fn try_map<N, E, F>(&self, f: &mut F) -> Result<SceneNode<N>, E>
    where
        F: FnMut(&M) -> Result<N, E>,
    {
        let content = match &self.content {
            NodeContent::Mesh(mesh) => NodeContent::Mesh(f(mesh)?),
            NodeContent::Group(children) => NodeContent::Group(
                children
                    .iter()
                    .map(|child| child.try_map(f))
                    .collect::<Result<Vec<_>, E>>()?,
            ),
        };

        Ok(SceneNode {
            name: self.name.clone(),
            transform: self.transform,
            visible: self.visible,
            content,
        })
    }

    /// Number of mesh leaves in the tree, visible or not.
    pub fn mesh_count(&self) -> usize {
        match &self.content {
            NodeContent::Mesh(_) => 1,
            NodeContent::Group(children) => children.iter().map(SceneNode::mesh_count).sum(),
        }
    }
}
