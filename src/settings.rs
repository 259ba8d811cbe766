//! Session configuration shared by the engine and every action.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::types::{AxisSelection, PivotMode, TransformSnap, TransformSpace};

/// Numeric override typed while a drag is active.
///
/// The raw text is kept even when it does not parse, so the user can keep
/// correcting it; [`NumericInput::value`] is `None` in that case.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NumericInput {
    text: String,
    value: Option<f32>,
}

impl NumericInput {
    /// The text typed so far.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The parsed override, if the text is a valid number.
    pub fn value(&self) -> Option<f32> {
        self.value
    }

    /// Whether an override is in effect.
    pub fn has_value(&self) -> bool {
        self.value.is_some()
    }

    /// Append a character (digit, `.` or `-`) and re-parse.
    pub fn push(&mut self, c: char) {
        self.text.push(c);
        self.reparse();
    }

    /// Remove the last character and re-parse.
    pub fn backspace(&mut self) {
        self.text.pop();
        self.reparse();
    }

    /// Forget the typed text.
    pub fn clear(&mut self) {
        self.text.clear();
        self.value = None;
    }

    fn reparse(&mut self) {
        self.value = self.text.parse::<f32>().ok().filter(|v| v.is_finite());
    }
}

/// Mutable configuration of the manipulation session.
///
/// The engine owns one instance and passes it by reference to the active
/// action on every sample.
#[derive(Resource, Debug, Clone)]
pub struct TransformSettings {
    /// Current pivot: center of the bounding box of every target's origin.
    pub origin: Vec3,
    /// Axis, plane or face constraining the current drag.
    pub active_axis: AxisSelection,
    /// Orientation of the "local" axes, taken from the most recently selected entity.
    pub rotation: Quat,
    /// Whether axes are interpreted in world or local space.
    pub space: TransformSpace,
    /// Shared or per-entity pivot.
    pub pivot_mode: PivotMode,
    /// Whether snapping is applied.
    pub snap_enabled: bool,
    /// Snap increments per operation.
    pub snap: TransformSnap,
    /// Numeric override typed during a drag.
    pub text_input: NumericInput,
    /// Drop translated objects onto surfaces; only honored for free (`ALL`) drags.
    pub collision_detect: bool,
    /// Rotation orbits entities around the pivot instead of spinning them in place.
    pub rotate_from_origin: bool,
}

impl Default for TransformSettings {
    fn default() -> Self {
        Self {
            origin: Vec3::ZERO,
            active_axis: AxisSelection::NONE,
            rotation: Quat::IDENTITY,
            space: TransformSpace::World,
            pivot_mode: PivotMode::Selected,
            snap_enabled: false,
            snap: TransformSnap::default(),
            text_input: NumericInput::default(),
            collision_detect: false,
            rotate_from_origin: true,
        }
    }
}

impl TransformSettings {
    /// Settings initialized from persisted preferences.
    pub fn from_preferences(prefs: &TransformPreferences) -> Self {
        Self {
            space: prefs.space,
            pivot_mode: prefs.pivot_mode,
            snap_enabled: prefs.snap_enabled,
            snap: prefs.snap,
            collision_detect: prefs.collision_detect,
            rotate_from_origin: prefs.rotate_from_origin,
            ..Self::default()
        }
    }

    /// The persistable subset of these settings.
    pub fn preferences(&self) -> TransformPreferences {
        TransformPreferences {
            space: self.space,
            pivot_mode: self.pivot_mode,
            snap_enabled: self.snap_enabled,
            snap: self.snap,
            collision_detect: self.collision_detect,
            rotate_from_origin: self.rotate_from_origin,
        }
    }

    pub fn is_local(&self) -> bool {
        self.space == TransformSpace::Local
    }

    pub fn is_world(&self) -> bool {
        self.space == TransformSpace::World
    }

    /// The numeric override, if one is typed and valid.
    pub fn numeric_override(&self) -> Option<f32> {
        self.text_input.value()
    }
}

/// User preferences that outlive a session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformPreferences {
    /// See [`TransformSettings::space`].
    pub space: TransformSpace,
    /// See [`TransformSettings::pivot_mode`].
    pub pivot_mode: PivotMode,
    /// See [`TransformSettings::snap_enabled`].
    pub snap_enabled: bool,
    /// See [`TransformSettings::snap`].
    pub snap: TransformSnap,
    /// See [`TransformSettings::collision_detect`].
    pub collision_detect: bool,
    /// See [`TransformSettings::rotate_from_origin`].
    pub rotate_from_origin: bool,
}

impl Default for TransformPreferences {
    fn default() -> Self {
        TransformSettings::default().preferences()
    }
}
