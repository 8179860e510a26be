//! Ray casting against scene meshes.

use crate::material::Side;
use crate::mesh::Aabb;
use crate::scene::{NodeId, Scene};
use glam::Vec3;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Always unit length.
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// A ray/mesh intersection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hit {
    pub node: NodeId,
    pub distance: f32,
    /// World-space intersection point.
    pub point: Vec3,
}

/// Ray/triangle test returning the ray parameter of the hit.
///
/// With `cull_back` set, triangles whose counter-clockwise face points away
/// from the ray origin are ignored. `dir` need not be normalized; `t` is in
/// units of `dir`.
pub fn ray_triangle(origin: Vec3, dir: Vec3, a: Vec3, b: Vec3, c: Vec3, cull_back: bool) -> Option<f32> {
    let edge1 = b - a;
    let edge2 = c - a;
    let normal = edge1.cross(edge2);

    let mut d_dot_n = dir.dot(normal);
    let sign;
    if d_dot_n > 0.0 {
        if cull_back {
            return None;
        }
        sign = 1.0;
    } else if d_dot_n < 0.0 {
        sign = -1.0;
        d_dot_n = -d_dot_n;
    } else {
        return None;
    }

    let diff = origin - a;
    let b1 = sign * dir.dot(diff.cross(edge2));
    if b1 < 0.0 {
        return None;
    }
    let b2 = sign * dir.dot(edge1.cross(diff));
    if b2 < 0.0 || b1 + b2 > d_dot_n {
        return None;
    }
    let q_dot_n = -sign * diff.dot(normal);
    if q_dot_n < 0.0 {
        return None;
    }
    Some(q_dot_n / d_dot_n)
}

/// Slab test; returns the entry parameter (0 when starting inside).
pub fn ray_aabb(origin: Vec3, dir: Vec3, bounds: &Aabb) -> Option<f32> {
    let inv = dir.recip();
    let t0 = (bounds.min - origin) * inv;
    let t1 = (bounds.max - origin) * inv;
    let tmin = t0.min(t1).max_element();
    let tmax = t0.max(t1).min_element();
    if tmax < 0.0 || tmin > tmax {
        return None;
    }
    Some(tmin.max(0.0))
}

/// Every intersection of `ray` with mesh nodes below `root`, nearest first.
///
/// Faces are filtered by each material's [`Side`], so front-side surfaces are
/// only hit from the front.
pub fn intersect_descendants(scene: &Scene, root: NodeId, ray: &Ray) -> Vec<Hit> {
    let mut hits = Vec::new();
    for (node, mesh_id, world) in scene.mesh_nodes(root) {
        let mesh = scene.mesh(mesh_id);
        let inv = world.inverse();
        let o = inv.transform_point3(ray.origin);
        let d = inv.transform_vector3(ray.direction);
        if d == Vec3::ZERO || ray_aabb(o, d, &mesh.bounds()).is_none() {
            continue;
        }
        let side = scene.material(mesh.material).side;
        for [a, b, c] in mesh.triangles() {
            let t = match side {
                Side::Front => ray_triangle(o, d, a, b, c, true),
                Side::Back => ray_triangle(o, d, c, b, a, true),
                Side::Double => ray_triangle(o, d, a, b, c, false),
            };
            if let Some(t) = t {
                let point = world.transform_point3(o + d * t);
                hits.push(Hit {
                    node,
                    distance: point.distance(ray.origin),
                    point,
                });
            }
        }
    }
    hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    hits
}
