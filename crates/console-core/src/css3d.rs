//! CSS `matrix3d` projection of DOM planes into the WebGPU camera's space.
//!
//! CSS has Y pointing down, so the camera's view matrix gets its Y row
//! negated and object world matrices get their Y column negated. The
//! viewport carries `perspective: <focal>px` and the camera element is pushed
//! back by the same focal length.

use crate::camera::PerspectiveCamera;
use glam::Mat4;

#[inline]
pub fn epsilon(v: f32) -> f32 {
    if v.abs() < 1e-10 {
        0.0
    } else {
        v
    }
}

fn matrix3d(e: [f32; 16]) -> String {
    let parts: Vec<String> = e.iter().map(|v| epsilon(*v).to_string()).collect();
    format!("matrix3d({})", parts.join(","))
}

/// Distance in CSS pixels from the eye to the projection plane.
#[inline]
pub fn focal_length_px(camera: &PerspectiveCamera, height: f32) -> f32 {
    camera.projection_matrix().y_axis.y * height * 0.5
}

pub fn camera_matrix_css(view: &Mat4) -> String {
    let mut e = view.to_cols_array();
    for i in [1, 5, 9, 13] {
        e[i] = -e[i];
    }
    matrix3d(e)
}

pub fn object_matrix_css(world: &Mat4) -> String {
    let mut e = world.to_cols_array();
    for v in &mut e[4..8] {
        *v = -*v;
    }
    format!("translate(-50%,-50%){}", matrix3d(e))
}

/// Styles for the viewport and camera elements of one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct CssCamera {
    pub perspective_px: f32,
    pub transform: String,
}

pub fn camera_frame(camera: &PerspectiveCamera, width: f32, height: f32) -> CssCamera {
    let fov = focal_length_px(camera, height);
    CssCamera {
        perspective_px: fov,
        transform: format!(
            "translateZ({}px){}translate({}px,{}px)",
            fov,
            camera_matrix_css(&camera.view_matrix()),
            width * 0.5,
            height * 0.5
        ),
    }
}
