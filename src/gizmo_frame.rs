//! Gizmo coordinate frame handling.
//!
//! This module resolves the origin and axis directions used by the actions,
//! based on the settings' pivot, orientation and coordinate space, and maps
//! an [`AxisSelection`] to the geometric constraint it describes.

use bevy::prelude::*;

use crate::math::EPSILON;
use crate::settings::TransformSettings;
use crate::types::{AxisSelection, TransformSpace};

/// The geometric constraint an axis selection describes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AxisConstraint {
    /// Movement restricted to a line through the origin.
    Axis(Vec3),
    /// Movement restricted to the plane spanned by two axes.
    Plane(Vec3, Vec3),
    /// No restriction.
    Free,
}

/// Origin and basis of the gizmo, respecting world/local space.
#[derive(Debug, Clone, Copy)]
pub struct GizmoFrame {
    pub origin: Vec3,
    pub rotation: Quat,
}

impl GizmoFrame {
    pub fn new(origin: Vec3, orientation: Quat, space: TransformSpace) -> Self {
        let rotation = match space {
            TransformSpace::World => Quat::IDENTITY,
            TransformSpace::Local => orientation,
        };
        Self { origin, rotation }
    }

    pub fn from_settings(settings: &TransformSettings) -> Self {
        Self::new(settings.origin, settings.rotation, settings.space)
    }

    /// Unit axis for a component index in this frame.
    pub fn axis_dir(&self, index: usize) -> Vec3 {
        let axis = match index {
            0 => Vec3::X,
            1 => Vec3::Y,
            _ => Vec3::Z,
        };
        self.rotation * axis
    }

    pub fn constraint(&self, selection: AxisSelection) -> AxisConstraint {
        match selection.axis_indices().as_slice() {
            [a] => AxisConstraint::Axis(self.axis_dir(*a)),
            [a, b] => AxisConstraint::Plane(self.axis_dir(*a), self.axis_dir(*b)),
            _ => AxisConstraint::Free,
        }
    }

    /// Normal of the plane the pointer ray is intersected with.
    ///
    /// A single axis uses the plane containing the axis that faces the
    /// camera; a plane constraint uses the coordinate plane itself; free
    /// movement uses the view plane.
    pub fn movement_plane_normal(
        &self,
        constraint: AxisConstraint,
        camera_position: Vec3,
        camera_forward: Vec3,
    ) -> Vec3 {
        match constraint {
            AxisConstraint::Axis(axis) => {
                let to_camera = camera_position - self.origin;
                let n = axis.cross(to_camera).cross(axis);
                if n.length_squared() < EPSILON {
                    Vec3::ZERO
                } else {
                    n.normalize()
                }
            }
            AxisConstraint::Plane(a, b) => a.cross(b).normalize_or_zero(),
            AxisConstraint::Free => camera_forward.normalize_or_zero(),
        }
    }

    /// Project `point` onto the constraint through the frame origin.
    pub fn constrain(&self, constraint: AxisConstraint, point: Vec3) -> Vec3 {
        let local = point - self.origin;
        match constraint {
            AxisConstraint::Axis(axis) => self.origin + axis * local.dot(axis),
            AxisConstraint::Plane(a, b) => self.origin + a * local.dot(a) + b * local.dot(b),
            AxisConstraint::Free => point,
        }
    }

    /// Express a world point relative to the frame origin, in frame axes.
    pub fn to_local(&self, point: Vec3, pivot: Vec3) -> Vec3 {
        self.rotation.inverse() * (point - pivot)
    }

    /// Inverse of [`GizmoFrame::to_local`].
    pub fn to_world(&self, local: Vec3, pivot: Vec3) -> Vec3 {
        self.rotation * local + pivot
    }
}
