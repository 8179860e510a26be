use super::helpers::{create_color_texture, create_depth_texture, HDR_FORMAT};
use crate::constants::SCENE_MSAA_SAMPLES;

/// Offscreen attachments: multisampled scene colour and depth, the resolved
/// full-resolution HDR colour, and two half-resolution bloom buffers for the
/// ping-pong blur.
pub struct RenderTargets {
    pub msaa_view: wgpu::TextureView,
    pub hdr_view: wgpu::TextureView,
    pub depth_view: wgpu::TextureView,
    pub bloom_a_view: wgpu::TextureView,
    pub bloom_b_view: wgpu::TextureView,
    pub bloom_size: (u32, u32),
}

impl RenderTargets {
    pub fn new(device: &wgpu::Device, width: u32, height: u32) -> Self {
        let sampled = wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING;
        let (_, msaa_view) = create_color_texture(
            device,
            "hdr_msaa_tex",
            width,
            height,
            HDR_FORMAT,
            wgpu::TextureUsages::RENDER_ATTACHMENT,
            SCENE_MSAA_SAMPLES,
        );
        let (_, hdr_view) =
            create_color_texture(device, "hdr_tex", width, height, HDR_FORMAT, sampled, 1);
        let (_, depth_view) = create_depth_texture(device, width, height, SCENE_MSAA_SAMPLES);
        let (bw, bh) = bloom_size(width, height);
        let (_, bloom_a_view) =
            create_color_texture(device, "bloom_a", bw, bh, HDR_FORMAT, sampled, 1);
        let (_, bloom_b_view) =
            create_color_texture(device, "bloom_b", bw, bh, HDR_FORMAT, sampled, 1);
        Self {
            msaa_view,
            hdr_view,
            depth_view,
            bloom_a_view,
            bloom_b_view,
            bloom_size: (bw, bh),
        }
    }

    pub fn bloom_resolution(&self) -> [f32; 2] {
        [self.bloom_size.0 as f32, self.bloom_size.1 as f32]
    }
}

#[inline]
pub fn bloom_size(width: u32, height: u32) -> (u32, u32) {
    ((width.max(1) / 2).max(1), (height.max(1) / 2).max(1))
}
