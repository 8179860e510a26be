use super::helpers::{
    make_post_pipeline, sampler_entry, texture_entry, uniform_buffer, uniform_entry, HDR_FORMAT,
};
use super::targets::RenderTargets;
use console_core::constants::{BLOOM_RADIUS, BLOOM_STRENGTH, BLOOM_THRESHOLD};

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct PostUniforms {
    pub(crate) resolution: [f32; 2],
    pub(crate) blur_dir: [f32; 2],
    pub(crate) bloom_strength: f32,
    pub(crate) threshold: f32,
    pub(crate) radius: f32,
    pub(crate) encode_srgb: f32,
}

impl PostUniforms {
    pub(crate) fn new(resolution: [f32; 2], blur_dir: [f32; 2], encode_srgb: bool) -> Self {
        Self {
            resolution,
            blur_dir,
            bloom_strength: BLOOM_STRENGTH,
            threshold: BLOOM_THRESHOLD,
            radius: BLOOM_RADIUS,
            encode_srgb: if encode_srgb { 1.0 } else { 0.0 },
        }
    }
}

/// Pipelines and uniform buffers of the bloom chain. Every pass owns its own
/// uniform buffer since queued writes all land before the encoder runs.
pub(crate) struct PostResources {
    pub(crate) bgl0: wgpu::BindGroupLayout, // tex+sampler+uniform
    pub(crate) bgl1: wgpu::BindGroupLayout, // tex+sampler
    pub(crate) main_uniforms: wgpu::Buffer,
    pub(crate) blur_h_uniforms: wgpu::Buffer,
    pub(crate) blur_v_uniforms: wgpu::Buffer,
    pub(crate) bright_pipeline: wgpu::RenderPipeline,
    pub(crate) blur_pipeline: wgpu::RenderPipeline,
    pub(crate) composite_pipeline: wgpu::RenderPipeline,
}

pub(crate) fn create_post_resources(
    device: &wgpu::Device,
    post_shader: &wgpu::ShaderModule,
    swap_format: wgpu::TextureFormat,
) -> PostResources {
    let bgl0 = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("post_bgl0"),
        entries: &[
            texture_entry(0),
            sampler_entry(1),
            uniform_entry(2, wgpu::ShaderStages::FRAGMENT),
        ],
    });
    let bgl1 = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("post_bgl1"),
        entries: &[texture_entry(0), sampler_entry(1)],
    });
    let pl_bright_blur = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("pl_post_0"),
        bind_group_layouts: &[&bgl0],
        push_constant_ranges: &[],
    });
    let pl_composite = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("pl_post_comp"),
        bind_group_layouts: &[&bgl0, &bgl1],
        push_constant_ranges: &[],
    });
    let bright_pipeline = make_post_pipeline(
        device,
        "bright_pipeline",
        &pl_bright_blur,
        post_shader,
        "fs_bright",
        HDR_FORMAT,
        None,
    );
    let blur_pipeline = make_post_pipeline(
        device,
        "blur_pipeline",
        &pl_bright_blur,
        post_shader,
        "fs_blur",
        HDR_FORMAT,
        None,
    );
    let composite_pipeline = make_post_pipeline(
        device,
        "composite_pipeline",
        &pl_composite,
        post_shader,
        "fs_composite",
        swap_format,
        Some(wgpu::BlendState::REPLACE),
    );

    PostResources {
        bgl0,
        bgl1,
        main_uniforms: uniform_buffer::<PostUniforms>(device, "post_main_uniforms"),
        blur_h_uniforms: uniform_buffer::<PostUniforms>(device, "post_blur_h_uniforms"),
        blur_v_uniforms: uniform_buffer::<PostUniforms>(device, "post_blur_v_uniforms"),
        bright_pipeline,
        blur_pipeline,
        composite_pipeline,
    }
}

/// Bind groups that reference the render targets; rebuilt on resize.
pub(crate) struct PostBindGroups {
    pub(crate) hdr: wgpu::BindGroup,
    pub(crate) from_bloom_a: wgpu::BindGroup,
    pub(crate) from_bloom_b: wgpu::BindGroup,
    pub(crate) bloom_a_only: wgpu::BindGroup,
}

impl PostBindGroups {
    pub(crate) fn new(
        device: &wgpu::Device,
        post: &PostResources,
        targets: &RenderTargets,
        sampler: &wgpu::Sampler,
    ) -> Self {
        let with_uniforms = |label: &str, view: &wgpu::TextureView, buf: &wgpu::Buffer| {
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some(label),
                layout: &post.bgl0,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: wgpu::BindingResource::TextureView(view),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: wgpu::BindingResource::Sampler(sampler),
                    },
                    wgpu::BindGroupEntry {
                        binding: 2,
                        resource: buf.as_entire_binding(),
                    },
                ],
            })
        };
        let bloom_a_only = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("bg_bloom_a_only"),
            layout: &post.bgl1,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&targets.bloom_a_view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        });
        Self {
            hdr: with_uniforms("bg_hdr", &targets.hdr_view, &post.main_uniforms),
            from_bloom_a: with_uniforms(
                "bg_from_bloom_a",
                &targets.bloom_a_view,
                &post.blur_h_uniforms,
            ),
            from_bloom_b: with_uniforms(
                "bg_from_bloom_b",
                &targets.bloom_b_view,
                &post.blur_v_uniforms,
            ),
            bloom_a_only,
        }
    }
}

pub(crate) fn write_post_uniforms(
    queue: &wgpu::Queue,
    post: &PostResources,
    targets: &RenderTargets,
    encode_srgb: bool,
) {
    let res = targets.bloom_resolution();
    let main = PostUniforms::new(res, [0.0, 0.0], encode_srgb);
    let blur_h = PostUniforms::new(res, [1.0, 0.0], encode_srgb);
    let blur_v = PostUniforms::new(res, [0.0, 1.0], encode_srgb);
    queue.write_buffer(&post.main_uniforms, 0, bytemuck::bytes_of(&main));
    queue.write_buffer(&post.blur_h_uniforms, 0, bytemuck::bytes_of(&blur_h));
    queue.write_buffer(&post.blur_v_uniforms, 0, bytemuck::bytes_of(&blur_v));
}

/// Bright pass, separable blur, then composite of scene plus bloom into `output`.
pub(crate) fn run_bloom(
    encoder: &mut wgpu::CommandEncoder,
    post: &PostResources,
    groups: &PostBindGroups,
    targets: &RenderTargets,
    output: &wgpu::TextureView,
) {
    blit(
        encoder,
        "bright_pass",
        &targets.bloom_a_view,
        wgpu::Color::BLACK,
        &post.bright_pipeline,
        &groups.hdr,
        None,
    );
    blit(
        encoder,
        "blur_h",
        &targets.bloom_b_view,
        wgpu::Color::BLACK,
        &post.blur_pipeline,
        &groups.from_bloom_a,
        None,
    );
    blit(
        encoder,
        "blur_v",
        &targets.bloom_a_view,
        wgpu::Color::BLACK,
        &post.blur_pipeline,
        &groups.from_bloom_b,
        None,
    );
    blit(
        encoder,
        "composite",
        output,
        wgpu::Color::TRANSPARENT,
        &post.composite_pipeline,
        &groups.hdr,
        Some(&groups.bloom_a_only),
    );
}

pub(crate) fn blit(
    encoder: &mut wgpu::CommandEncoder,
    label: &str,
    target: &wgpu::TextureView,
    clear: wgpu::Color,
    pipeline: &wgpu::RenderPipeline,
    bg0: &wgpu::BindGroup,
    bg1: Option<&wgpu::BindGroup>,
) {
    let mut r = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some(label),
        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
            view: target,
            resolve_target: None,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Clear(clear),
                store: wgpu::StoreOp::Store,
            },
        })],
        depth_stencil_attachment: None,
        timestamp_writes: None,
        occlusion_query_set: None,
    });
    r.set_pipeline(pipeline);
    r.set_bind_group(0, bg0, &[]);
    if let Some(g1) = bg1 {
        r.set_bind_group(1, g1, &[]);
    }
    r.draw(0..3, 0..1);
}
