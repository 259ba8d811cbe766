//! Scaling by the ratio of pointer distances from the projected pivot.

use bevy::prelude::*;

use crate::error::SampleError;
use crate::gizmo_frame::GizmoFrame;
use crate::settings::TransformSettings;
use crate::snapshot::{EntityTransform, TransformSnapshot};
use crate::types::PivotMode;

use super::{distance_ratio, moved, override_factor, scale_axes, scaled, snap_factor, DragView};

#[derive(Debug, Clone)]
pub struct ScaleAction {
    frame: GizmoFrame,
    screen_origin: Option<Vec2>,
    start_distance: f32,
    factor: Vec3,
}

impl Default for ScaleAction {
    fn default() -> Self {
        Self {
            frame: GizmoFrame {
                origin: Vec3::ZERO,
                rotation: Quat::IDENTITY,
            },
            screen_origin: None,
            start_distance: 0.0,
            factor: Vec3::ONE,
        }
    }
}

impl ScaleAction {
    /// Per-axis factor of the current sample, in gizmo axes.
    pub fn factor(&self) -> Vec3 {
        self.factor
    }

    pub(super) fn reset(&mut self, view: &DragView) {
        self.frame = GizmoFrame::from_settings(view.settings);
        self.screen_origin = view.raycaster.world_to_screen(self.frame.origin);
        self.start_distance = self
            .screen_origin
            .map_or(0.0, |center| view.pointer.distance(center));
        self.factor = Vec3::ONE;
    }

    pub(super) fn update(&mut self, view: &DragView) -> Result<bool, SampleError> {
        let ratio = distance_ratio(self.screen_origin, self.start_distance, view.pointer)?;

        let axes = scale_axes(view.settings.active_axis);
        let mut factor = Vec3::ONE;
        for &i in &axes {
            factor[i] = ratio;
        }
        let factor = snap_factor(view.settings, factor, &axes);

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
        let factor = override_factor(settings, self.factor, &scale_axes(settings.active_axis));
        let pivot = self.frame.origin;

        let position = if settings.pivot_mode != PivotMode::Individual && !local_scale_forced {
            let offset = self.frame.to_local(before.position, pivot) * factor;
            self.frame.to_world(offset, pivot)
        } else {
            before.position
        };

        moved(before, position, before.rotation, scaled(settings, before, factor))
    }
}
