// Shared fixtures for host-side tests: a tiny GLB writer and quad scenes.

#![allow(dead_code)]

use console_core::material::{Material, Side};
use console_core::mesh::Mesh;
use console_core::scene::{NodeId, Scene, Transform};
use glam::Vec3;

/// Axis-aligned square in the XY plane facing +Z (counter-clockwise from +Z).
pub fn quad_positions(half: f32) -> [[f32; 3]; 4] {
    [
        [-half, -half, 0.0],
        [half, -half, 0.0],
        [half, half, 0.0],
        [-half, half, 0.0],
    ]
}

pub const QUAD_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

/// Add a quad mesh node named `name` under `parent`.
pub fn add_quad(
    scene: &mut Scene,
    parent: NodeId,
    name: &str,
    translation: Vec3,
    half: f32,
    side: Side,
) -> NodeId {
    let material = scene.add_material(Material {
        name: format!("{name}_mat"),
        side,
        ..Material::default()
    });
    let positions = quad_positions(half).iter().map(|p| Vec3::from_array(*p)).collect();
    let indices = QUAD_INDICES.iter().map(|i| *i as u32).collect();
    let mesh = scene.add_mesh(Mesh::new(positions, None, indices, material));
    let node = scene.add_node(parent, name, Transform::from_translation(translation));
    scene.set_mesh(node, mesh);
    node
}

struct Prim {
    positions: usize,
    indices: usize,
    material: usize,
}

/// Minimal binary glTF writer: quads only, one buffer, one scene.
#[derive(Default)]
pub struct GlbBuilder {
    bin: Vec<u8>,
    buffer_views: Vec<String>,
    accessors: Vec<String>,
    materials: Vec<String>,
    meshes: Vec<String>,
    nodes: Vec<String>,
}

impl GlbBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn material(&mut self, name: &str, rgba: [f32; 4]) -> usize {
        self.materials.push(format!(
            r#"{{"name":"{}","pbrMetallicRoughness":{{"baseColorFactor":[{:?},{:?},{:?},{:?}]}}}}"#,
            name, rgba[0], rgba[1], rgba[2], rgba[3]
        ));
        self.materials.len() - 1
    }

    fn push_view(&mut self, bytes: &[u8], target: u32) -> usize {
        while self.bin.len() % 4 != 0 {
            self.bin.push(0);
        }
        let offset = self.bin.len();
        self.bin.extend_from_slice(bytes);
        self.buffer_views.push(format!(
            r#"{{"buffer":0,"byteOffset":{},"byteLength":{},"target":{}}}"#,
            offset,
            bytes.len(),
            target
        ));
        self.buffer_views.len() - 1
    }

    fn prim(&mut self, positions: &[[f32; 3]], indices: &[u16], material: usize) -> Prim {
        let mut pos_bytes = Vec::new();
        let (mut min, mut max) = ([f32::INFINITY; 3], [f32::NEG_INFINITY; 3]);
        for p in positions {
            for (axis, c) in p.iter().enumerate() {
                pos_bytes.extend_from_slice(&c.to_le_bytes());
                min[axis] = min[axis].min(*c);
                max[axis] = max[axis].max(*c);
            }
        }
        let view = self.push_view(&pos_bytes, 34962);
        self.accessors.push(format!(
            r#"{{"bufferView":{},"componentType":5126,"count":{},"type":"VEC3","min":[{:?},{:?},{:?}],"max":[{:?},{:?},{:?}]}}"#,
            view,
            positions.len(),
            min[0],
            min[1],
            min[2],
            max[0],
            max[1],
            max[2]
        ));
        let positions = self.accessors.len() - 1;

        let mut idx_bytes = Vec::new();
        for i in indices {
            idx_bytes.extend_from_slice(&i.to_le_bytes());
        }
        let view = self.push_view(&idx_bytes, 34963);
        self.accessors.push(format!(
            r#"{{"bufferView":{},"componentType":5123,"count":{},"type":"SCALAR"}}"#,
            view,
            indices.len()
        ));
        let indices = self.accessors.len() - 1;
        Prim {
            positions,
            indices,
            material,
        }
    }

    fn push_mesh(&mut self, name: &str, prims: Vec<Prim>) -> usize {
        let prims: Vec<String> = prims
            .iter()
            .map(|p| {
                format!(
                    r#"{{"attributes":{{"POSITION":{}}},"indices":{},"material":{}}}"#,
                    p.positions, p.indices, p.material
                )
            })
            .collect();
        self.meshes.push(format!(
            r#"{{"name":"{}","primitives":[{}]}}"#,
            name,
            prims.join(",")
        ));
        self.meshes.len() - 1
    }

    /// Mesh with one quad primitive per `(half_size, material)` entry.
    pub fn mesh(&mut self, name: &str, prims: &[(f32, usize)]) -> usize {
        let prims: Vec<Prim> = prims
            .iter()
            .map(|(half, material)| self.prim(&quad_positions(*half), &QUAD_INDICES, *material))
            .collect();
        self.push_mesh(name, prims)
    }

    /// Single-primitive mesh from raw triangles.
    pub fn triangles(
        &mut self,
        name: &str,
        positions: &[[f32; 3]],
        indices: &[u16],
        material: usize,
    ) -> usize {
        let prim = self.prim(positions, indices, material);
        self.push_mesh(name, vec![prim])
    }

    pub fn node(
        &mut self,
        name: Option<&str>,
        mesh: Option<usize>,
        translation: [f32; 3],
        children: &[usize],
    ) -> usize {
        self.node_rotated(name, mesh, translation, [0.0, 0.0, 0.0, 1.0], children)
    }

    /// Like [`GlbBuilder::node`] with an `[x, y, z, w]` rotation quaternion.
    pub fn node_rotated(
        &mut self,
        name: Option<&str>,
        mesh: Option<usize>,
        translation: [f32; 3],
        rotation: [f32; 4],
        children: &[usize],
    ) -> usize {
        let mut fields = vec![
            format!(
                "\"translation\":[{:?},{:?},{:?}]",
                translation[0], translation[1], translation[2]
            ),
            format!(
                "\"rotation\":[{:?},{:?},{:?},{:?}]",
                rotation[0], rotation[1], rotation[2], rotation[3]
            ),
        ];
        if let Some(name) = name {
            fields.push(format!("\"name\":\"{}\"", name));
        }
        if let Some(mesh) = mesh {
            fields.push(format!("\"mesh\":{}", mesh));
        }
        if !children.is_empty() {
            let list: Vec<String> = children.iter().map(|c| c.to_string()).collect();
            fields.push(format!("\"children\":[{}]", list.join(",")));
        }
        self.nodes.push(format!("{{{}}}", fields.join(",")));
        self.nodes.len() - 1
    }

    fn json(&self, scene_nodes: Option<&[usize]>) -> String {
        let mut parts = vec![r#""asset":{"version":"2.0"}"#.to_string()];
        if let Some(roots) = scene_nodes {
            let list: Vec<String> = roots.iter().map(|n| n.to_string()).collect();
            parts.push(r#""scene":0"#.to_string());
            parts.push(format!(r#""scenes":[{{"nodes":[{}]}}]"#, list.join(",")));
        }
        let arrays = [
            ("nodes", &self.nodes),
            ("meshes", &self.meshes),
            ("materials", &self.materials),
            ("accessors", &self.accessors),
            ("bufferViews", &self.buffer_views),
        ];
        for (key, items) in arrays {
            if !items.is_empty() {
                parts.push(format!("\"{}\":[{}]", key, items.join(",")));
            }
        }
        if !self.bin.is_empty() {
            parts.push(format!(r#""buffers":[{{"byteLength":{}}}]"#, self.bin.len()));
        }
        format!("{{{}}}", parts.join(","))
    }

    /// Serialize with one scene listing `roots`.
    pub fn build(&self, roots: &[usize]) -> Vec<u8> {
        glb(&self.json(Some(roots)), &self.bin)
    }

    /// Serialize without any scene.
    pub fn build_without_scene(&self) -> Vec<u8> {
        glb(&self.json(None), &self.bin)
    }
}

fn glb(json: &str, bin: &[u8]) -> Vec<u8> {
    let mut json_bytes = json.as_bytes().to_vec();
    while json_bytes.len() % 4 != 0 {
        json_bytes.push(b' ');
    }
    let mut bin_bytes = bin.to_vec();
    while bin_bytes.len() % 4 != 0 {
        bin_bytes.push(0);
    }
    let has_bin = !bin_bytes.is_empty();
    let mut total = 12 + 8 + json_bytes.len();
    if has_bin {
        total += 8 + bin_bytes.len();
    }

    let mut out = Vec::with_capacity(total);
    out.extend_from_slice(b"glTF");
    out.extend_from_slice(&2u32.to_le_bytes());
    out.extend_from_slice(&(total as u32).to_le_bytes());
    out.extend_from_slice(&(json_bytes.len() as u32).to_le_bytes());
    out.extend_from_slice(&0x4E4F_534Au32.to_le_bytes());
    out.extend_from_slice(&json_bytes);
    if has_bin {
        out.extend_from_slice(&(bin_bytes.len() as u32).to_le_bytes());
        out.extend_from_slice(&0x004E_4942u32.to_le_bytes());
        out.extend_from_slice(&bin_bytes);
    }
    out
}

/// The console fixture used across tests:
/// - `Screen`: 2x2 white quad at the origin (emissive),
/// - `D_Pad_Up_Button`: 0.5x0.5 grey quad at (2, 0, 0),
/// - `Button_A`: 0.5x0.5 grey quad at (2, -1, 0), sharing the grey material.
pub fn console_glb() -> Vec<u8> {
    let mut b = GlbBuilder::new();
    let white = b.material("ScreenGlow", [1.0, 1.0, 1.0, 1.0]);
    let grey = b.material("Plastic", [0.2, 0.2, 0.2, 1.0]);
    let screen_mesh = b.mesh("ScreenMesh", &[(1.0, white)]);
    let dpad_mesh = b.mesh("DPadMesh", &[(0.25, grey)]);
    let button_mesh = b.mesh("ButtonMesh", &[(0.25, grey)]);
    let screen = b.node(Some("Screen"), Some(screen_mesh), [0.0, 0.0, 0.0], &[]);
    let dpad = b.node(Some("D_Pad_Up_Button"), Some(dpad_mesh), [2.0, 0.0, 0.0], &[]);
    let button = b.node(Some("Button_A"), Some(button_mesh), [2.0, -1.0, 0.0], &[]);
    b.build(&[screen, dpad, button])
}
