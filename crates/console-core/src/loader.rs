//! Console model loading: GLB bytes to a prepared, recentred scene fragment.

use crate::constants::MODEL_SCALE;
use crate::error::LoadError;
use crate::material::{Material, SurfaceClass};
use crate::mesh::{Aabb, Mesh};
use crate::scene::{MaterialId, NodeId, Scene, Transform};
use fnv::FnvHashMap;
use glam::{Quat, Vec3, Vec4};
use std::cell::Cell;
use std::rc::Rc;

pub const MODEL_ROOT_NAME: &str = "ConsoleModel";

/// Whitespace becomes `_` and the characters `[ ] . : /` are dropped, so
/// "Button A.001" reads as "Button_A001".
pub fn sanitize_node_name(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, '[' | ']' | '.' | ':' | '/'))
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect()
}

/// A loaded model living in its own scene; graft it into the stage to show it.
#[derive(Clone, Debug)]
pub struct ModelAsset {
    pub scene: Scene,
    pub stats: ModelStats,
}

#[derive(Clone, Debug, Default)]
pub struct ModelStats {
    pub meshes: usize,
    pub triangles: usize,
    pub emissive_surfaces: usize,
    pub matte_surfaces: usize,
    pub controls: usize,
    /// Bounds before recentring, in the model's parent frame.
    pub bounds: Option<Aabb>,
}

/// Cancellation flag for an in-flight load. Clones share the flag.
#[derive(Clone, Debug, Default)]
pub struct LoadToken(Rc<Cell<bool>>);

impl LoadToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }

    /// `pagehide` handling: a page kept in the back/forward cache
    /// (`persisted`) may come back, so only a real unload cancels. Returns
    /// true when this call cancelled the load.
    pub fn page_hidden(&self, persisted: bool) -> bool {
        if persisted || self.is_cancelled() {
            return false;
        }
        self.cancel();
        true
    }
}

struct Builder<'a> {
    scene: Scene,
    buffers: &'a [gltf::buffer::Data],
    materials: FnvHashMap<Option<usize>, MaterialId>,
    names_used: FnvHashMap<String, u32>,
    stats: ModelStats,
}

/// Parse a binary glTF, normalize its surfaces, scale it and move its bounding
/// box center to the origin of the parent frame.
pub fn load_glb(bytes: &[u8]) -> Result<ModelAsset, LoadError> {
    let gltf::Gltf { document, blob } = gltf::Gltf::from_slice(bytes)?;
    let buffers = gltf::import_buffers(&document, None, blob)?;
    let gscene = document
        .default_scene()
        .or_else(|| document.scenes().next())
        .ok_or(LoadError::NoScene)?;

    let mut b = Builder {
        scene: Scene::new(MODEL_ROOT_NAME),
        buffers: &buffers,
        materials: FnvHashMap::default(),
        names_used: FnvHashMap::default(),
        stats: ModelStats::default(),
    };
    let root = b.scene.root();
    b.scene.node_mut(root).transform.scale = Vec3::splat(MODEL_SCALE);
    for node in gscene.nodes() {
        b.add_node(&node, root)?;
    }

    let Builder {
        mut scene,
        mut stats,
        ..
    } = b;
    let bounds = scene.subtree_bounds(root).ok_or(LoadError::EmptyGeometry)?;
    scene.node_mut(root).transform.translation -= bounds.center();
    stats.bounds = Some(bounds);

    log::debug!(
        "[model] meshes={} triangles={} emissive={} matte={} controls={} size={:?}",
        stats.meshes,
        stats.triangles,
        stats.emissive_surfaces,
        stats.matte_surfaces,
        stats.controls,
        bounds.size()
    );
    Ok(ModelAsset { scene, stats })
}

impl<'a> Builder<'a> {
    fn add_node(&mut self, node: &gltf::Node, parent: NodeId) -> Result<(), LoadError> {
        // Node names are claimed before their mesh names, so a mesh sharing
        // its node's name is the one that gets the suffix.
        let node_name = node.name().map(|n| self.unique_name(n));
        let prims: Vec<(String, gltf::Primitive)> = match node.mesh() {
            Some(mesh) => {
                let base = mesh
                    .name()
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("mesh_{}", mesh.index()));
                mesh.primitives()
                    .filter(|p| p.mode() == gltf::mesh::Mode::Triangles)
                    .map(|p| (self.unique_name(&base), p))
                    .collect()
            }
            None => Vec::new(),
        };
        let name = match (node_name, prims.as_slice()) {
            (Some(n), _) => n,
            (None, [(only, _)]) => only.clone(),
            (None, _) => String::new(),
        };

        let (t, r, s) = node.transform().decomposed();
        let transform = Transform {
            translation: Vec3::from_array(t),
            rotation: Quat::from_array(r),
            scale: Vec3::from_array(s),
        };
        let id = self.scene.add_node(parent, &name, transform);
        self.note_control(id);

        if let [(_, prim)] = prims.as_slice() {
            let m = self.build_mesh(prim, &name)?;
            self.scene.set_mesh(id, m);
        } else {
            // One child per primitive, each named after the mesh.
            for (child_name, prim) in &prims {
                let child = self.scene.add_node(id, child_name, Transform::IDENTITY);
                self.note_control(child);
                let m = self.build_mesh(prim, child_name)?;
                self.scene.set_mesh(child, m);
            }
        }

        for child in node.children() {
            self.add_node(&child, id)?;
        }
        Ok(())
    }

    /// Sanitized `raw`, suffixed `_1`, `_2`, ... when already taken.
    fn unique_name(&mut self, raw: &str) -> String {
        let name = sanitize_node_name(raw);
        match self.names_used.get_mut(&name) {
            Some(count) => {
                *count += 1;
                format!("{name}_{count}")
            }
            None => {
                self.names_used.insert(name.clone(), 0);
                name
            }
        }
    }

    fn note_control(&mut self, id: NodeId) {
        if self.scene.node(id).control.is_some() {
            self.stats.controls += 1;
        }
    }

    fn build_mesh(
        &mut self,
        prim: &gltf::Primitive,
        owner: &str,
    ) -> Result<crate::scene::MeshId, LoadError> {
        let buffers = self.buffers;
        let reader = prim.reader(|b| buffers.get(b.index()).map(|d| d.0.as_slice()));
        let positions: Vec<Vec3> = reader
            .read_positions()
            .ok_or_else(|| LoadError::MissingPositions {
                mesh: owner.to_string(),
            })?
            .map(Vec3::from_array)
            .collect();
        let normals = reader
            .read_normals()
            .map(|n| n.map(Vec3::from_array).collect::<Vec<_>>());
        let indices: Vec<u32> = match reader.read_indices() {
            Some(i) => i.into_u32().collect(),
            None => (0..positions.len() as u32).collect(),
        };

        let material = self.material_for(prim.material());
        let mesh = Mesh::new(positions, normals, indices, material);
        self.stats.meshes += 1;
        self.stats.triangles += mesh.triangle_count();
        Ok(self.scene.add_mesh(mesh))
    }

    fn material_for(&mut self, source: gltf::Material) -> MaterialId {
        let key = source.index();
        if let Some(id) = self.materials.get(&key) {
            return *id;
        }
        let mut material = Material {
            name: source.name().unwrap_or_default().to_string(),
            base_color: Vec4::from_array(source.pbr_metallic_roughness().base_color_factor()),
            ..Material::default()
        };
        match material.prepare() {
            SurfaceClass::Emissive => self.stats.emissive_surfaces += 1,
            SurfaceClass::Matte => self.stats.matte_surfaces += 1,
        }
        let id = self.scene.add_material(material);
        self.materials.insert(key, id);
        id
    }
}
