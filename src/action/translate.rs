//! Constrained translation along an axis, a plane or the view plane.

use bevy::prelude::*;

use crate::error::SampleError;
use crate::gizmo_frame::{AxisConstraint, GizmoFrame};
use crate::math::{ray_plane_intersection, snap_point};
use crate::settings::TransformSettings;
use crate::snapshot::{EntityTransform, TransformSnapshot};

use super::{moved, DragView};

#[derive(Debug, Clone, Default)]
pub struct TranslateAction {
    /// Frame captured at drag start; the movement planes pass through its origin.
    frame: Option<GizmoFrame>,
    /// Constrained hit of the last valid sample.
    previous: Option<Vec3>,
    offset: Vec3,
}

impl TranslateAction {
    /// Accumulated world-space translation of this drag.
    pub fn offset(&self) -> Vec3 {
        self.offset
    }

    pub(super) fn reset(&mut self, view: &DragView) {
        self.frame = Some(GizmoFrame::from_settings(view.settings));
        self.previous = None;
        self.offset = Vec3::ZERO;
    }

    pub(super) fn update(&mut self, view: &DragView) -> Result<bool, SampleError> {
        let settings = view.settings;
        let frame = *self
            .frame
            .get_or_insert_with(|| GizmoFrame::from_settings(settings));
        let constraint = frame.constraint(settings.active_axis);

        let ray = view.raycaster.cast_ray(view.pointer).ok_or(SampleError::NoRay)?;
        let normal = frame.movement_plane_normal(
            constraint,
            view.raycaster.camera_position(),
            view.raycaster.camera_forward(),
        );
        let mut hit = ray_plane_intersection(&ray, frame.origin, normal)?;
        if settings.snap_enabled {
            hit = snap_point(hit, &settings.snap.translate);
        }
        let target = frame.constrain(constraint, hit);

        // The first valid sample only anchors the drag.
        let Some(previous) = self.previous.replace(target) else {
            return Ok(false);
        };
        let delta = target - previous;
        self.offset += delta;
        Ok(delta != Vec3::ZERO)
    }

    pub(super) fn propose(&self, settings: &TransformSettings, before: &TransformSnapshot) -> EntityTransform {
        let mut position = before.position + self.offset;
        if let Some(value) = settings.numeric_override() {
            let frame = self
                .frame
                .unwrap_or_else(|| GizmoFrame::from_settings(settings));
            position += override_direction(frame.constraint(settings.active_axis)) * value;
        }
        moved(before, position, before.rotation, before.scale)
    }
}

/// Direction a typed distance moves along; free drags have none.
fn override_direction(constraint: AxisConstraint) -> Vec3 {
    match constraint {
        AxisConstraint::Axis(axis) => axis,
        AxisConstraint::Plane(a, b) => a + b,
        AxisConstraint::Free => Vec3::ZERO,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bounds::SelectionBounds;
    use crate::test_support::OrthoView;
    use crate::types::AxisSelection;

    fn sample(action: &mut TranslateAction, settings: &TransformSettings, view: &OrthoView, pointer: Vec2) -> Result<bool, SampleError> {
        let bounds = SelectionBounds::default();
        action.update(&DragView {
            settings,
            raycaster: view,
            bounds: &bounds,
            pointer,
        })
    }

    fn start(action: &mut TranslateAction, settings: &TransformSettings, view: &OrthoView) {
        let bounds = SelectionBounds::default();
        action.reset(&DragView {
            settings,
            raycaster: view,
            bounds: &bounds,
            pointer: Vec2::ZERO,
        });
    }

    #[test]
    fn first_sample_anchors_without_delta() {
        let view = OrthoView::default();
        let mut settings = TransformSettings::default();
        settings.active_axis = AxisSelection::X;
        let mut action = TranslateAction::default();
        start(&mut action, &settings, &view);

        assert_eq!(sample(&mut action, &settings, &view, Vec2::new(50.0, 0.0)), Ok(false));
        assert_eq!(action.offset(), Vec3::ZERO);
        assert_eq!(sample(&mut action, &settings, &view, Vec2::new(150.0, 80.0)), Ok(true));
        assert!(action.offset().abs_diff_eq(Vec3::new(1.0, 0.0, 0.0), 1e-5));
    }

    #[test]
    fn plane_constraint_keeps_both_axes() {
        let view = OrthoView::default();
        let mut settings = TransformSettings::default();
        settings.active_axis = AxisSelection::XY;
        let mut action = TranslateAction::default();
        start(&mut action, &settings, &view);

        sample(&mut action, &settings, &view, Vec2::ZERO).unwrap();
        sample(&mut action, &settings, &view, Vec2::new(100.0, -200.0)).unwrap();
        assert!(action.offset().abs_diff_eq(Vec3::new(1.0, -2.0, 0.0), 1e-5));
    }

    #[test]
    fn axis_facing_camera_skips_samples() {
        let view = OrthoView::default();
        let mut settings = TransformSettings::default();
        settings.active_axis = AxisSelection::Z;
        let mut action = TranslateAction::default();
        start(&mut action, &settings, &view);

        assert_eq!(
            sample(&mut action, &settings, &view, Vec2::new(10.0, 10.0)),
            Err(SampleError::ParallelPlane)
        );
    }

    #[test]
    fn snapping_moves_in_grid_steps() {
        let view = OrthoView::default();
        let mut settings = TransformSettings::default();
        settings.active_axis = AxisSelection::X;
        settings.snap_enabled = true;
        let mut action = TranslateAction::default();
        start(&mut action, &settings, &view);

        sample(&mut action, &settings, &view, Vec2::new(10.0, 0.0)).unwrap();
        assert_eq!(sample(&mut action, &settings, &view, Vec2::new(30.0, 0.0)), Ok(false));
        sample(&mut action, &settings, &view, Vec2::new(240.0, 0.0)).unwrap();
        assert!(action.offset().abs_diff_eq(Vec3::new(2.0, 0.0, 0.0), 1e-5));
    }

    #[test]
    fn numeric_override_adds_along_axis() {
        let view = OrthoView::default();
        let mut settings = TransformSettings::default();
        settings.active_axis = AxisSelection::Y;
        let mut action = TranslateAction::default();
        start(&mut action, &settings, &view);
        settings.text_input.push('3');

        let before = TransformSnapshot::capture(
            bevy::ecs::world::World::new().spawn_empty().id(),
            &EntityTransform::from_position(Vec3::new(1.0, 1.0, 1.0)),
        );
        let proposed = action.propose(&settings, &before);
        assert!(proposed.position.abs_diff_eq(Vec3::new(1.0, 4.0, 1.0), 1e-6));
        assert!(proposed.origin.abs_diff_eq(Vec3::new(1.0, 4.0, 1.0), 1e-6));
    }
}
