use super::helpers::{uniform_buffer, uniform_entry, DEPTH_FORMAT, HDR_FORMAT};
use crate::constants::SCENE_MSAA_SAMPLES;
use console_core::constants::{
    rgb_hex, AMBIENT_COLOR, AMBIENT_INTENSITY, KEY_LIGHT_COLOR, KEY_LIGHT_INTENSITY,
    KEY_LIGHT_POSITION, RIM_LIGHT_ATTENUATION, RIM_LIGHT_COLOR, RIM_LIGHT_INTENSITY,
    RIM_LIGHT_POSITION, SCREEN_LIGHT_COLOR, SCREEN_LIGHT_INTENSITY, SCREEN_LIGHT_RANGE,
};
use console_core::material::Material;
use console_core::mesh::Mesh;
use console_core::scene::{MeshId, NodeId, Scene};
use console_core::Stage;
use fnv::FnvHashMap;
use glam::{Mat4, Vec3};
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct Vertex {
    position: [f32; 3],
    normal: [f32; 3],
}

impl Vertex {
    const ATTRIBS: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBS,
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct FrameUniforms {
    view_proj: [[f32; 4]; 4],
    camera_pos: [f32; 4],
    ambient: [f32; 4],
    key_dir: [f32; 4],
    key_color: [f32; 4],
    rim_dir: [f32; 4],
    rim_color: [f32; 4],
    point_pos: [f32; 4], // w = range
    point_color: [f32; 4],
}

impl FrameUniforms {
    pub(crate) fn from_stage(stage: &Stage) -> Self {
        let cam = &stage.camera;
        let key_dir = Vec3::from(KEY_LIGHT_POSITION).normalize();
        let rim_dir = Vec3::from(RIM_LIGHT_POSITION).normalize();
        let point = stage.screen_light_world_position();
        Self {
            view_proj: cam.view_projection().to_cols_array_2d(),
            camera_pos: cam.position.extend(1.0).to_array(),
            ambient: (rgb_hex(AMBIENT_COLOR) * AMBIENT_INTENSITY).extend(0.0).to_array(),
            key_dir: key_dir.extend(0.0).to_array(),
            key_color: (rgb_hex(KEY_LIGHT_COLOR) * KEY_LIGHT_INTENSITY)
                .extend(0.0)
                .to_array(),
            rim_dir: rim_dir.extend(0.0).to_array(),
            rim_color: (rgb_hex(RIM_LIGHT_COLOR) * RIM_LIGHT_INTENSITY * RIM_LIGHT_ATTENUATION)
                .extend(0.0)
                .to_array(),
            point_pos: point.extend(SCREEN_LIGHT_RANGE).to_array(),
            point_color: (rgb_hex(SCREEN_LIGHT_COLOR) * SCREEN_LIGHT_INTENSITY)
                .extend(0.0)
                .to_array(),
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct DrawUniforms {
    model: [[f32; 4]; 4],
    normal: [[f32; 4]; 4],
    base_color: [f32; 4],
    emissive: [f32; 4], // w = 1 when tone mapped
    surface: [f32; 4],  // roughness, metalness, opacity
}

impl DrawUniforms {
    pub(crate) fn new(world: Mat4, material: &Material) -> Self {
        Self {
            model: world.to_cols_array_2d(),
            normal: world.inverse().transpose().to_cols_array_2d(),
            base_color: material.base_color.to_array(),
            emissive: (material.emissive * material.emissive_intensity)
                .extend(if material.tone_mapped { 1.0 } else { 0.0 })
                .to_array(),
            surface: [material.roughness, material.metalness, material.opacity, 0.0],
        }
    }
}

pub(crate) struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

impl GpuMesh {
    fn upload(device: &wgpu::Device, mesh: &Mesh) -> Self {
        let vertices: Vec<Vertex> = mesh
            .positions
            .iter()
            .zip(&mesh.normals)
            .map(|(p, n)| Vertex {
                position: p.to_array(),
                normal: n.to_array(),
            })
            .collect();
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("mesh_vb"),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("mesh_ib"),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        Self {
            vertex_buffer,
            index_buffer,
            index_count: mesh.indices.len() as u32,
        }
    }
}

pub(crate) struct GpuDraw {
    mesh: MeshId,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

/// Lit mesh pass into the HDR target, plus the GPU copies of scene meshes.
pub(crate) struct SceneResources {
    pipeline: wgpu::RenderPipeline,
    frame_uniforms: wgpu::Buffer,
    frame_bind_group: wgpu::BindGroup,
    draw_bgl: wgpu::BindGroupLayout,
    meshes: FnvHashMap<MeshId, GpuMesh>,
    draws: FnvHashMap<NodeId, GpuDraw>,
    order: Vec<NodeId>,
    synced_generation: Option<u64>,
}

pub(crate) fn create_scene_resources(
    device: &wgpu::Device,
    shader: &wgpu::ShaderModule,
) -> SceneResources {
    let frame_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("scene_frame_bgl"),
        entries: &[uniform_entry(0, wgpu::ShaderStages::VERTEX_FRAGMENT)],
    });
    let draw_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("scene_draw_bgl"),
        entries: &[uniform_entry(0, wgpu::ShaderStages::VERTEX_FRAGMENT)],
    });
    let frame_uniforms = uniform_buffer::<FrameUniforms>(device, "scene_frame_uniforms");
    let frame_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("scene_frame_bg"),
        layout: &frame_bgl,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: frame_uniforms.as_entire_binding(),
        }],
    });
    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("scene_pl"),
        bind_group_layouts: &[&frame_bgl, &draw_bgl],
        push_constant_ranges: &[],
    });
    let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("scene_pipeline"),
        layout: Some(&layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_main"),
            buffers: &[Vertex::layout()],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: Some(wgpu::Face::Back),
            ..Default::default()
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState {
            count: SCENE_MSAA_SAMPLES,
            ..Default::default()
        },
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format: HDR_FORMAT,
                blend: None,
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        cache: None,
        multiview: None,
    });

    SceneResources {
        pipeline,
        frame_uniforms,
        frame_bind_group,
        draw_bgl,
        meshes: FnvHashMap::default(),
        draws: FnvHashMap::default(),
        order: Vec::new(),
        synced_generation: None,
    }
}

impl SceneResources {
    /// Upload meshes and allocate per-node uniforms for anything new in the
    /// scene; drop draws for nodes no longer attached.
    pub(crate) fn sync(&mut self, device: &wgpu::Device, scene: &Scene) {
        if self.synced_generation == Some(scene.generation()) {
            return;
        }
        let mesh_nodes = scene.mesh_nodes(scene.root());
        self.order.clear();
        for (node, mesh_id, _) in &mesh_nodes {
            self.meshes
                .entry(*mesh_id)
                .or_insert_with(|| GpuMesh::upload(device, scene.mesh(*mesh_id)));
            if !self.draws.contains_key(node) {
                let uniform_buffer = uniform_buffer::<DrawUniforms>(device, "scene_draw_uniforms");
                let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
                    label: Some("scene_draw_bg"),
                    layout: &self.draw_bgl,
                    entries: &[wgpu::BindGroupEntry {
                        binding: 0,
                        resource: uniform_buffer.as_entire_binding(),
                    }],
                });
                self.draws.insert(
                    *node,
                    GpuDraw {
                        mesh: *mesh_id,
                        uniform_buffer,
                        bind_group,
                    },
                );
            }
            self.order.push(*node);
        }
        let live: fnv::FnvHashSet<NodeId> = self.order.iter().copied().collect();
        self.draws.retain(|node, _| live.contains(node));
        let used: fnv::FnvHashSet<MeshId> = self.draws.values().map(|d| d.mesh).collect();
        self.meshes.retain(|id, _| used.contains(id));
        log::debug!(
            "[render] synced {} draws, {} meshes (generation {})",
            self.draws.len(),
            self.meshes.len(),
            scene.generation()
        );
        self.synced_generation = Some(scene.generation());
    }

    pub(crate) fn write_uniforms(&self, queue: &wgpu::Queue, stage: &Stage) {
        let frame = FrameUniforms::from_stage(stage);
        queue.write_buffer(&self.frame_uniforms, 0, bytemuck::bytes_of(&frame));
        let scene = &stage.scene;
        for (node, mesh_id, world) in scene.mesh_nodes(scene.root()) {
            let Some(draw) = self.draws.get(&node) else {
                continue;
            };
            let material = scene.material(scene.mesh(mesh_id).material);
            let u = DrawUniforms::new(world, material);
            queue.write_buffer(&draw.uniform_buffer, 0, bytemuck::bytes_of(&u));
        }
    }

    /// Draw into the multisampled `color`, resolving into `resolve`.
    pub(crate) fn draw(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        color: &wgpu::TextureView,
        resolve: &wgpu::TextureView,
        depth: &wgpu::TextureView,
    ) {
        let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("scene_pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: color,
                resolve_target: Some(resolve),
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
                    store: wgpu::StoreOp::Discard,
                },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: depth,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Discard,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
        });
        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, &self.frame_bind_group, &[]);
        for node in &self.order {
            let Some(draw) = self.draws.get(node) else {
                continue;
            };
            let Some(mesh) = self.meshes.get(&draw.mesh) else {
                continue;
            };
            rpass.set_bind_group(1, &draw.bind_group, &[]);
            rpass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
            rpass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
            rpass.draw_indexed(0..mesh.index_count, 0, 0..1);
        }
    }
}
