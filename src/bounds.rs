//! Selection pivot and bounding box.

use bevy::prelude::*;

use crate::gizmo_frame::GizmoFrame;
use crate::snapshot::TransformableEntity;

/// Half size of the box reported for an empty selection (a unit cube).
const EMPTY_HALF_SIZE: f32 = 0.5;

/// Center of the axis-aligned box around every entity's origin.
///
/// An empty selection pivots at the world origin.
pub fn selection_origin<'a>(entities: impl IntoIterator<Item = &'a TransformableEntity>) -> Vec3 {
    let mut min = Vec3::splat(f32::MAX);
    let mut max = Vec3::splat(f32::MIN);
    let mut any = false;
    for entity in entities {
        min = min.min(entity.transform.origin);
        max = max.max(entity.transform.origin);
        any = true;
    }
    if any {
        (min + max) * 0.5
    } else {
        Vec3::ZERO
    }
}

/// Bounding box of the selection, relative to the gizmo origin and in gizmo axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionBounds {
    /// Box center relative to the frame origin.
    pub center: Vec3,
    /// Half size along each frame axis.
    pub extent: Vec3,
}

impl Default for SelectionBounds {
    fn default() -> Self {
        Self {
            center: Vec3::ZERO,
            extent: Vec3::splat(EMPTY_HALF_SIZE),
        }
    }
}

impl SelectionBounds {
    /// Box around the world-space corners of every entity's local bounds.
    pub fn compute<'a>(
        entities: impl IntoIterator<Item = &'a TransformableEntity>,
        frame: &GizmoFrame,
    ) -> Self {
        let mut min = Vec3::splat(f32::MAX);
        let mut max = Vec3::splat(f32::MIN);
        let mut any = false;
        for entity in entities {
            let t = &entity.transform;
            for corner in entity.local_bounds.corners() {
                let world = t.position + t.rotation * (corner * t.scale);
                let local = frame.to_local(world, frame.origin);
                min = min.min(local);
                max = max.max(local);
                any = true;
            }
        }
        if !any {
            return Self {
                center: frame.to_local(Vec3::ZERO, frame.origin),
                extent: Vec3::splat(EMPTY_HALF_SIZE),
            };
        }
        Self {
            center: (min + max) * 0.5,
            extent: (max - min) * 0.5,
        }
    }

    /// World-space centers of the six faces, ordered +X, +Y, +Z, -X, -Y, -Z.
    pub fn face_origins(&self, frame: &GizmoFrame) -> [Vec3; 6] {
        let mut faces = [Vec3::ZERO; 6];
        for i in 0..3 {
            let mut offset = Vec3::ZERO;
            offset[i] = self.extent[i];
            faces[i] = frame.to_world(self.center + offset, frame.origin);
            faces[i + 3] = frame.to_world(self.center - offset, frame.origin);
        }
        faces
    }
}
