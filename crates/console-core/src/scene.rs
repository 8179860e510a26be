//! Arena scene graph.
//!
//! Nodes are addressed by [`NodeId`] and own their children; every node except
//! the root has exactly one parent. Detached nodes stay in the arena but are no
//! longer reachable from the root, which is how a replaced model disappears
//! from rendering and picking.

use crate::control::ControlKind;
use crate::material::Material;
use crate::mesh::{Aabb, Mesh};
use glam::{EulerRot, Mat4, Quat, Vec3};
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MeshId(u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MaterialId(u32);

impl NodeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl MeshId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl MaterialId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Local translation/rotation/scale of a node relative to its parent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Self::IDENTITY
        }
    }

    /// Rotation given as XYZ Euler angles in radians.
    pub fn from_euler_xyz(translation: Vec3, euler: Vec3, scale: Vec3) -> Self {
        Self {
            translation,
            rotation: Quat::from_euler(EulerRot::XYZ, euler.x, euler.y, euler.z),
            scale,
        }
    }

    #[inline]
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }
}

#[derive(Clone, Debug)]
pub struct Node {
    pub name: String,
    pub transform: Transform,
    pub mesh: Option<MeshId>,
    /// Interactive role, resolved from the name when the node is created.
    pub control: Option<ControlKind>,
    parent: Option<NodeId>,
    children: SmallVec<[NodeId; 4]>,
}

impl Node {
    #[inline]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    #[inline]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

#[derive(Clone, Debug)]
pub struct Scene {
    nodes: Vec<Node>,
    meshes: Vec<Mesh>,
    materials: Vec<Material>,
    root: NodeId,
    generation: u64,
}

impl Scene {
    pub fn new(root_name: &str) -> Self {
        let root = Node {
            name: root_name.to_string(),
            transform: Transform::IDENTITY,
            mesh: None,
            control: None,
            parent: None,
            children: SmallVec::new(),
        };
        Self {
            nodes: vec![root],
            meshes: Vec::new(),
            materials: Vec::new(),
            root: NodeId(0),
            generation: 0,
        }
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Bumped on every structural change; renderers use it to resync buffers.
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn add_node(&mut self, parent: NodeId, name: &str, transform: Transform) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node {
            name: name.to_string(),
            transform,
            mesh: None,
            control: ControlKind::from_name(name),
            parent: Some(parent),
            children: SmallVec::new(),
        });
        self.nodes[parent.index()].children.push(id);
        self.generation += 1;
        id
    }

    pub fn add_mesh(&mut self, mesh: Mesh) -> MeshId {
        let id = MeshId(self.meshes.len() as u32);
        self.meshes.push(mesh);
        id
    }

    pub fn add_material(&mut self, material: Material) -> MaterialId {
        let id = MaterialId(self.materials.len() as u32);
        self.materials.push(material);
        id
    }

    pub fn set_mesh(&mut self, node: NodeId, mesh: MeshId) {
        self.nodes[node.index()].mesh = Some(mesh);
        self.generation += 1;
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    #[inline]
    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    #[inline]
    pub fn mesh(&self, id: MeshId) -> &Mesh {
        &self.meshes[id.index()]
    }

    #[inline]
    pub fn material(&self, id: MaterialId) -> &Material {
        &self.materials[id.index()]
    }

    #[inline]
    pub fn material_mut(&mut self, id: MaterialId) -> &mut Material {
        &mut self.materials[id.index()]
    }

    pub fn materials(&self) -> &[Material] {
        &self.materials
    }

    pub fn meshes(&self) -> &[Mesh] {
        &self.meshes
    }

    pub fn find_by_name(&self, name: &str) -> Option<NodeId> {
        self.descendants(self.root)
            .into_iter()
            .find(|id| self.node(*id).name == name)
    }

    fn is_ancestor(&self, ancestor: NodeId, mut node: NodeId) -> bool {
        while let Some(p) = self.nodes[node.index()].parent {
            if p == ancestor {
                return true;
            }
            node = p;
        }
        false
    }

    /// Unlink `id` from its parent. The subtree stays intact in the arena.
    pub fn detach(&mut self, id: NodeId) {
        if let Some(parent) = self.nodes[id.index()].parent.take() {
            self.nodes[parent.index()].children.retain(|c| *c != id);
            self.generation += 1;
        }
    }

    /// Move `id` (with its subtree) under `parent`.
    pub fn attach(&mut self, id: NodeId, parent: NodeId) {
        debug_assert!(id != parent && !self.is_ancestor(id, parent), "attach would create a cycle");
        self.detach(id);
        self.nodes[id.index()].parent = Some(parent);
        self.nodes[parent.index()].children.push(id);
        self.generation += 1;
    }

    /// True when `id` is the root or hangs below it.
    pub fn is_attached(&self, id: NodeId) -> bool {
        id == self.root || self.is_ancestor(self.root, id)
    }

    /// Move every node, mesh and material of `other` into this scene, placing
    /// `other`'s root under `parent`. Returns the new id of that root.
    pub fn graft(&mut self, other: Scene, parent: NodeId) -> NodeId {
        let node_base = self.nodes.len() as u32;
        let mesh_base = self.meshes.len() as u32;
        let material_base = self.materials.len() as u32;
        let other_root = other.root;

        self.materials.extend(other.materials);
        self.meshes.extend(other.meshes.into_iter().map(|mut m| {
            m.material = MaterialId(m.material.0 + material_base);
            m
        }));
        self.nodes.extend(other.nodes.into_iter().map(|mut n| {
            n.parent = n.parent.map(|p| NodeId(p.0 + node_base));
            for c in n.children.iter_mut() {
                *c = NodeId(c.0 + node_base);
            }
            n.mesh = n.mesh.map(|m| MeshId(m.0 + mesh_base));
            n
        }));

        let new_root = NodeId(other_root.0 + node_base);
        self.nodes[new_root.index()].parent = Some(parent);
        self.nodes[parent.index()].children.push(new_root);
        self.generation += 1;
        new_root
    }

    /// Depth-first pre-order list of every node below `id` (excluding `id`).
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.nodes[id.index()].children.iter().rev().copied().collect();
        while let Some(n) = stack.pop() {
            out.push(n);
            stack.extend(self.nodes[n.index()].children.iter().rev().copied());
        }
        out
    }

    /// Nodes below `id` that carry a mesh, with their world matrices.
    pub fn mesh_nodes(&self, id: NodeId) -> Vec<(NodeId, MeshId, Mat4)> {
        let mut out = Vec::new();
        let base = self.world_matrix(id);
        for &child in self.nodes[id.index()].children.iter() {
            self.collect_mesh_nodes(child, base, &mut out);
        }
        out
    }

    fn collect_mesh_nodes(&self, id: NodeId, parent: Mat4, out: &mut Vec<(NodeId, MeshId, Mat4)>) {
        let node = &self.nodes[id.index()];
        let world = parent * node.transform.matrix();
        if let Some(mesh) = node.mesh {
            out.push((id, mesh, world));
        }
        for &child in node.children.iter() {
            self.collect_mesh_nodes(child, world, out);
        }
    }

    pub fn world_matrix(&self, id: NodeId) -> Mat4 {
        let node = &self.nodes[id.index()];
        let local = node.transform.matrix();
        match node.parent {
            Some(p) => self.world_matrix(p) * local,
            None => local,
        }
    }

    /// World-space point expressed in the local frame of `id`.
    pub fn world_to_local(&self, id: NodeId, point: Vec3) -> Vec3 {
        self.world_matrix(id).inverse().transform_point3(point)
    }

    /// Merged bounds of the subtree rooted at `id`, in the frame of `id`'s
    /// parent (so `id`'s own transform is included). Each mesh contributes
    /// its local box transformed by its matrix, not its individual vertices.
    pub fn subtree_bounds(&self, id: NodeId) -> Option<Aabb> {
        let mut bounds = Aabb::EMPTY;
        self.accumulate_bounds(id, Mat4::IDENTITY, &mut bounds);
        (!bounds.is_empty()).then_some(bounds)
    }

    fn accumulate_bounds(&self, id: NodeId, parent: Mat4, bounds: &mut Aabb) {
        let node = &self.nodes[id.index()];
        let m = parent * node.transform.matrix();
        if let Some(mesh) = node.mesh {
            bounds.union(&self.meshes[mesh.index()].bounds().transformed(&m));
        }
        for &child in node.children.iter() {
            self.accumulate_bounds(child, m, bounds);
        }
    }
}
