//! Box-face scaling: drag one face of the selection box, the opposite face stays put.

use bevy::prelude::*;

use crate::error::SampleError;
use crate::gizmo_frame::GizmoFrame;
use crate::settings::TransformSettings;
use crate::snapshot::{EntityTransform, TransformSnapshot};
use crate::types::AxisSelection;

use super::{distance_ratio, moved, override_factor, scaled, snap_factor, DragView};

/// Face dragged when the selection names no single face.
const FALLBACK_FACE: (usize, bool) = (2, false);

#[derive(Debug, Clone)]
pub struct RectangleAction {
    frame_rotation: Quat,
    /// Face centers ordered +X, +Y, +Z, -X, -Y, -Z.
    faces: [Vec3; 6],
    /// Dragged face as (axis index, negative side).
    face: (usize, bool),
    screen_pivot: Option<Vec2>,
    start_distance: f32,
    factor: Vec3,
}

impl Default for RectangleAction {
    fn default() -> Self {
        Self {
            frame_rotation: Quat::IDENTITY,
            faces: [Vec3::ZERO; 6],
            face: FALLBACK_FACE,
            screen_pivot: None,
            start_distance: 0.0,
            factor: Vec3::ONE,
        }
    }
}

impl RectangleAction {
    /// Face centers cached at drag start, ordered +X, +Y, +Z, -X, -Y, -Z.
    pub fn face_origins(&self) -> &[Vec3; 6] {
        &self.faces
    }

    /// The face that stays fixed: opposite the dragged one.
    pub fn pivot(&self) -> Vec3 {
        let (axis, negative) = self.face;
        if negative {
            self.faces[axis]
        } else {
            self.faces[axis + 3]
        }
    }

    pub fn factor(&self) -> Vec3 {
        self.factor
    }

    pub(super) fn reset(&mut self, view: &DragView) {
        let frame = GizmoFrame::from_settings(view.settings);
        self.frame_rotation = frame.rotation;
        self.faces = view.bounds.face_origins(&frame);
        self.face = dragged_face(view.settings.active_axis);
        self.screen_pivot = view.raycaster.world_to_screen(self.pivot());
        self.start_distance = self
            .screen_pivot
            .map_or(0.0, |center| view.pointer.distance(center));
        self.factor = Vec3::ONE;
    }

    pub(super) fn update(&mut self, view: &DragView) -> Result<bool, SampleError> {
        let ratio = distance_ratio(self.screen_pivot, self.start_distance, view.pointer)?;
        let axis = self.face.0;
        let mut factor = Vec3::ONE;
        factor[axis] = ratio;
        let factor = snap_factor(view.settings, factor, &[axis]);

        let changed = factor != self.factor;
        self.factor = factor;
        Ok(changed)
    }

    pub(super) fn propose(
        &self,
        settings: &TransformSettings,
        before: &TransformSnapshot,
        local_scale_forced: bool,
    ) -> EntityTransform {
        let factor = override_factor(settings, self.factor, &[self.face.0]);
        let pivot = self.pivot();
        let frame = GizmoFrame {
            origin: pivot,
            rotation: self.frame_rotation,
        };

        let position = if local_scale_forced {
            before.position
        } else {
            frame.to_world(frame.to_local(before.position, pivot) * factor, pivot)
        };

        moved(before, position, before.rotation, scaled(settings, before, factor))
    }
}

/// The face a selection drags; anything but exactly one face flag drags +Z.
fn dragged_face(selection: AxisSelection) -> (usize, bool) {
    selection.face().unwrap_or(FALLBACK_FACE)
}
