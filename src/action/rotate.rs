//! Rotation from the pointer's angular change around the projected pivot.

use bevy::prelude::*;

use crate::error::SampleError;
use crate::math::{screen_angle, snap_value, EPSILON};
use crate::scene::Raycaster;
use crate::settings::TransformSettings;
use crate::snapshot::{EntityTransform, TransformSnapshot};
use crate::types::PivotMode;

use super::{moved, DragView};

#[derive(Debug, Clone)]
pub struct RotateAction {
    pivot: Vec3,
    screen_origin: Option<Vec2>,
    start_pointer: Vec2,
    axis: Vec3,
    angle: f32,
}

impl Default for RotateAction {
    fn default() -> Self {
        Self {
            pivot: Vec3::ZERO,
            screen_origin: None,
            start_pointer: Vec2::ZERO,
            axis: Vec3::Z,
            angle: 0.0,
        }
    }
}

impl RotateAction {
    /// Current rotation angle in radians, after snapping.
    pub fn angle(&self) -> f32 {
        self.angle
    }

    /// Axis the delta rotates around.
    pub fn axis(&self) -> Vec3 {
        self.axis
    }

    /// The delta rotation for the current sample.
    pub fn delta(&self) -> Quat {
        Quat::from_axis_angle(self.axis, self.angle)
    }

    pub(super) fn reset(&mut self, view: &DragView) {
        self.pivot = view.settings.origin;
        self.screen_origin = view.raycaster.world_to_screen(self.pivot);
        self.start_pointer = view.pointer;
        self.axis = rotation_axis(view.settings, view.raycaster);
        self.angle = 0.0;
    }

    pub(super) fn update(&mut self, view: &DragView) -> Result<bool, SampleError> {
        let center = self.screen_origin.ok_or(SampleError::OffScreen)?;
        if view.pointer.distance_squared(center) < EPSILON
            || self.start_pointer.distance_squared(center) < EPSILON
        {
            return Err(SampleError::DegenerateDistance);
        }

        let mut angle = screen_angle(view.pointer, center) - screen_angle(self.start_pointer, center);
        if view.settings.snap_enabled {
            angle = snap_value(angle, view.settings.snap.rotate);
        }
        let axis = rotation_axis(view.settings, view.raycaster);

        let changed = angle != self.angle || axis != self.axis;
        self.angle = angle;
        self.axis = axis;
        Ok(changed)
    }

    pub(super) fn propose(&self, settings: &TransformSettings, before: &TransformSnapshot) -> EntityTransform {
        // A typed angle (in degrees) replaces the pointer angle outright.
        let typed = settings.numeric_override().map(f32::to_radians);
        let delta = Quat::from_axis_angle(self.axis, typed.unwrap_or(self.angle));

        let rotation = if settings.is_local() {
            before.rotation * delta
        } else {
            delta * before.rotation
        }
        .normalize();

        let orbit = settings.rotate_from_origin && settings.pivot_mode == PivotMode::Selected;
        let position = if orbit {
            // With a typed angle the orbit follows the absolute change applied
            // to the entity; otherwise it follows the pointer delta.
            let around = if typed.is_some() {
                rotation * before.rotation.inverse()
            } else {
                delta
            };
            around * (before.position - self.pivot) + self.pivot
        } else {
            before.position
        };

        moved(before, position, rotation, before.scale)
    }
}

/// The world axis for a single-axis selection, otherwise the view axis.
fn rotation_axis(settings: &TransformSettings, raycaster: &dyn Raycaster) -> Vec3 {
    match settings.active_axis.single_axis() {
        Some(0) => Vec3::X,
        Some(1) => Vec3::Y,
        Some(_) => Vec3::Z,
        None => {
            let forward = raycaster.camera_forward().normalize_or_zero();
            if forward == Vec3::ZERO {
                Vec3::Z
            } else {
                forward
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bounds::SelectionBounds;
    use crate::test_support::OrthoView;
    use crate::types::{AxisSelection, TransformSpace};
    use std::f32::consts::PI;

    fn run(settings: &TransformSettings, start: Vec2, end: Vec2) -> RotateAction {
        let view = OrthoView::default();
        let bounds = SelectionBounds::default();
        let mut action = RotateAction::default();
        action.reset(&DragView {
            settings,
            raycaster: &view,
            bounds: &bounds,
            pointer: start,
        });
        action
            .update(&DragView {
                settings,
                raycaster: &view,
                bounds: &bounds,
                pointer: end,
            })
            .unwrap();
        action
    }

    fn on_circle(angle: f32) -> Vec2 {
        Vec2::new(angle.cos(), angle.sin()) * 100.0
    }

    fn snapshot(transform: EntityTransform) -> TransformSnapshot {
        TransformSnapshot::capture(World::new().spawn_empty().id(), &transform)
    }

    #[test]
    fn snapping_rounds_to_eighth_turns() {
        let mut settings = TransformSettings::default();
        settings.active_axis = AxisSelection::Z;
        settings.snap_enabled = true;
        let action = run(&settings, on_circle(0.0), on_circle(0.39 * PI));
        assert!((action.angle() - 0.375 * PI).abs() < 1e-5);

        let proposed = action.propose(&settings, &snapshot(EntityTransform::default()));
        let expected = Quat::from_rotation_z(0.375 * PI);
        assert!(proposed.rotation.abs_diff_eq(expected, 1e-5));
    }

    #[test]
    fn free_rotation_uses_view_axis() {
        let mut settings = TransformSettings::default();
        settings.active_axis = AxisSelection::ALL;
        let action = run(&settings, on_circle(0.0), on_circle(0.5));
        assert!(action.axis().abs_diff_eq(Vec3::NEG_Z, 1e-6));
        assert!((action.angle() - 0.5).abs() < 1e-5);
    }

    #[test]
    fn entities_orbit_the_pivot() {
        let mut settings = TransformSettings::default();
        settings.active_axis = AxisSelection::Z;
        let action = run(&settings, on_circle(0.0), on_circle(PI / 2.0));

        let before = snapshot(EntityTransform::from_position(Vec3::new(2.0, 0.0, 0.0)));
        let proposed = action.propose(&settings, &before);
        assert!(proposed.position.abs_diff_eq(Vec3::new(0.0, 2.0, 0.0), 1e-5));
        assert!(proposed.origin.abs_diff_eq(Vec3::new(0.0, 2.0, 0.0), 1e-5));

        settings.rotate_from_origin = false;
        let proposed = action.propose(&settings, &before);
        assert!(proposed.position.abs_diff_eq(before.position, 1e-6));
    }

    #[test]
    fn local_and_world_compose_in_opposite_order() {
        let mut settings = TransformSettings::default();
        settings.active_axis = AxisSelection::X;
        let action = run(&settings, on_circle(0.0), on_circle(0.3));
        let tilt = Quat::from_rotation_y(0.8);
        let before = snapshot(EntityTransform::default().with_rotation(tilt));

        let world = action.propose(&settings, &before);
        assert!(world.rotation.abs_diff_eq(action.delta() * tilt, 1e-5));

        settings.space = TransformSpace::Local;
        let local = action.propose(&settings, &before);
        assert!(local.rotation.abs_diff_eq(tilt * action.delta(), 1e-5));
    }

    #[test]
    fn typed_degrees_replace_pointer_angle() {
        let mut settings = TransformSettings::default();
        settings.active_axis = AxisSelection::Z;
        let action = run(&settings, on_circle(0.0), on_circle(1.0));
        settings.text_input.push('9');
        settings.text_input.push('0');

        let before = snapshot(EntityTransform::from_position(Vec3::X));
        let proposed = action.propose(&settings, &before);
        assert!(proposed.rotation.abs_diff_eq(Quat::from_rotation_z(PI / 2.0), 1e-5));
        assert!(proposed.position.abs_diff_eq(Vec3::Y, 1e-5));
    }

    #[test]
    fn pointer_on_pivot_is_skipped() {
        let settings = TransformSettings::default();
        let view = OrthoView::default();
        let bounds = SelectionBounds::default();
        let mut action = RotateAction::default();
        action.reset(&DragView {
            settings: &settings,
            raycaster: &view,
            bounds: &bounds,
            pointer: Vec2::new(10.0, 0.0),
        });
        let on_pivot = DragView {
            settings: &settings,
            raycaster: &view,
            bounds: &bounds,
            pointer: Vec2::ZERO,
        };
        assert_eq!(action.update(&on_pivot), Err(SampleError::DegenerateDistance));
    }
}
