//! Manipulation strategies, one per [`TransformMode`].
//!
//! An action turns pointer samples into a delta (`update`) and turns that
//! delta plus an entity's drag-start snapshot into a proposed transform
//! (`propose`). Proposals are always computed from the snapshot, never from
//! the live transform, so repeated samples never accumulate error.

mod rectangle;
mod rotate;
mod scale;
mod translate;

pub use rectangle::RectangleAction;
pub use rotate::RotateAction;
pub use scale::ScaleAction;
pub use translate::TranslateAction;

use bevy::prelude::*;

use crate::bounds::SelectionBounds;
use crate::error::SampleError;
use crate::math::{snap_value, world_factor_to_local};
use crate::scene::Raycaster;
use crate::settings::TransformSettings;
use crate::snapshot::{EntityTransform, TransformSnapshot};
use crate::types::{AxisSelection, TransformMode};

/// Smallest screen distance (in pixels) usable as a scale ratio denominator.
const MIN_SCREEN_DISTANCE: f32 = 1e-3;

/// Everything an action may look at while processing one pointer sample.
pub struct DragView<'a> {
    pub settings: &'a TransformSettings,
    pub raycaster: &'a dyn Raycaster,
    pub bounds: &'a SelectionBounds,
    pub pointer: Vec2,
}

/// The active manipulation strategy.
#[derive(Debug, Clone)]
pub enum TransformAction {
    Translate(TranslateAction),
    Rotate(RotateAction),
    Scale(ScaleAction),
    Rectangle(RectangleAction),
}

impl Default for TransformAction {
    fn default() -> Self {
        Self::new(TransformMode::default())
    }
}

impl TransformAction {
    pub fn new(mode: TransformMode) -> Self {
        match mode {
            TransformMode::Translate => Self::Translate(TranslateAction::default()),
            TransformMode::Rotate => Self::Rotate(RotateAction::default()),
            TransformMode::Scale => Self::Scale(ScaleAction::default()),
            TransformMode::Rectangle => Self::Rectangle(RectangleAction::default()),
        }
    }

    pub fn mode(&self) -> TransformMode {
        match self {
            Self::Translate(_) => TransformMode::Translate,
            Self::Rotate(_) => TransformMode::Rotate,
            Self::Scale(_) => TransformMode::Scale,
            Self::Rectangle(_) => TransformMode::Rectangle,
        }
    }

    /// Start a new drag at `view.pointer`.
    pub fn reset(&mut self, view: &DragView) {
        match self {
            Self::Translate(action) => action.reset(view),
            Self::Rotate(action) => action.reset(view),
            Self::Scale(action) => action.reset(view),
            Self::Rectangle(action) => action.reset(view),
        }
    }

    /// Process a pointer sample. Returns whether the delta changed.
    pub fn update(&mut self, view: &DragView) -> Result<bool, SampleError> {
        match self {
            Self::Translate(action) => action.update(view),
            Self::Rotate(action) => action.update(view),
            Self::Scale(action) => action.update(view),
            Self::Rectangle(action) => action.update(view),
        }
    }

    /// The transform `before` should have under the current delta.
    pub fn propose(
        &self,
        settings: &TransformSettings,
        before: &TransformSnapshot,
        local_scale_forced: bool,
    ) -> EntityTransform {
        match self {
            Self::Translate(action) => action.propose(settings, before),
            Self::Rotate(action) => action.propose(settings, before),
            Self::Scale(action) => action.propose(settings, before, local_scale_forced),
            Self::Rectangle(action) => action.propose(settings, before, local_scale_forced),
        }
    }
}

/// Build a transform from the snapshot, carrying the origin along with the position.
fn moved(before: &TransformSnapshot, position: Vec3, rotation: Quat, scale: Vec3) -> EntityTransform {
    EntityTransform {
        origin: before.origin + (position - before.position),
        position,
        rotation,
        scale,
    }
}

/// Apply a frame-space scale factor to an entity's scale.
///
/// Local space multiplies component-wise; world space first re-expresses the
/// factor in the entity's own axes.
fn scaled(settings: &TransformSettings, before: &TransformSnapshot, factor: Vec3) -> Vec3 {
    if settings.is_world() {
        before.scale * world_factor_to_local(factor, before.rotation)
    } else {
        before.scale * factor
    }
}

/// Snap the constrained components of a scale factor.
fn snap_factor(settings: &TransformSettings, factor: Vec3, axes: &[usize]) -> Vec3 {
    if !settings.snap_enabled {
        return factor;
    }
    let mut out = factor;
    for &i in axes {
        if let Some(step) = settings.snap.scale.get(i) {
            out[i] = snap_value(out[i], step);
        }
    }
    out
}

/// Multiply the constrained components of a factor by the numeric override.
fn override_factor(settings: &TransformSettings, factor: Vec3, axes: &[usize]) -> Vec3 {
    let Some(value) = settings.numeric_override() else {
        return factor;
    };
    let mut out = factor;
    for &i in axes {
        out[i] *= value;
    }
    out
}

/// Component indices a scale selection affects; a free selection affects all three.
fn scale_axes(selection: AxisSelection) -> Vec<usize> {
    let axes = selection.axis_indices();
    if axes.is_empty() {
        vec![0, 1, 2]
    } else {
        axes
    }
}

/// Ratio of the pointer's current to starting screen distance from `center`.
fn distance_ratio(
    center: Option<Vec2>,
    start_distance: f32,
    pointer: Vec2,
) -> Result<f32, SampleError> {
    let center = center.ok_or(SampleError::OffScreen)?;
    if start_distance < MIN_SCREEN_DISTANCE {
        return Err(SampleError::DegenerateDistance);
    }
    Ok(pointer.distance(center) / start_distance)
}
