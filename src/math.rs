//! Math utilities for ray/plane intersection and snapping.

use bevy::math::Ray3d;
use bevy::prelude::*;

use crate::error::SampleError;
use crate::types::AxisSnap;

/// Threshold for considering vectors as zero-length.
pub(crate) const EPSILON: f32 = 1e-6;

/// Intersect a ray with a plane. Returns the intersection point.
///
/// Only an exactly zero denominator counts as parallel; grazing angles still
/// produce a (distant) hit.
pub fn ray_plane_intersection(
    ray: &Ray3d,
    plane_origin: Vec3,
    plane_normal: Vec3,
) -> Result<Vec3, SampleError> {
    let denom = plane_normal.dot(*ray.direction);
    if denom == 0.0 {
        return Err(SampleError::ParallelPlane);
    }
    let t = (plane_origin - ray.origin).dot(plane_normal) / denom;
    if t < 0.0 {
        Err(SampleError::BehindRay)
    } else {
        Ok(ray.origin + *ray.direction * t)
    }
}

/// Round `value` to the nearest multiple of `step`. Non-positive steps disable snapping.
pub fn snap_value(value: f32, step: f32) -> f32 {
    if step > 0.0 {
        (value / step).round() * step
    } else {
        value
    }
}

/// Snap each component of `point` to its axis increment.
pub fn snap_point(point: Vec3, snap: &AxisSnap) -> Vec3 {
    let mut out = point;
    for i in 0..3 {
        if let Some(step) = snap.get(i) {
            out[i] = snap_value(out[i], step);
        }
    }
    out
}

/// Re-express a world-space per-axis scale factor in the axes of `rotation`.
///
/// Each local axis takes a weighted average of the world factors, weighted by
/// the squared components of that axis, so a uniform factor stays uniform.
pub fn world_factor_to_local(factor: Vec3, rotation: Quat) -> Vec3 {
    let basis = Mat3::from_quat(rotation);
    Vec3::new(
        (basis.x_axis * basis.x_axis).dot(factor),
        (basis.y_axis * basis.y_axis).dot(factor),
        (basis.z_axis * basis.z_axis).dot(factor),
    )
}

/// Angle of `point` around `center` in screen space.
pub fn screen_angle(point: Vec2, center: Vec2) -> f32 {
    let v = point - center;
    v.y.atan2(v.x)
}
