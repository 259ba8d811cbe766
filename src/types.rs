//! Core value types for the transform engine.
//!
//! This module contains the small `Copy` types shared by the engine, the
//! actions and the settings: axis selection flags, coordinate space, pivot
//! mode, snap increments and the input events the engine consumes.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which manipulation the engine performs while dragging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TransformMode {
    /// Move the selection along axes or planes.
    #[default]
    Translate,
    /// Rotate the selection around an axis through the pivot.
    Rotate,
    /// Scale the selection around the shared pivot.
    Scale,
    /// Scale the selection by dragging one face of its bounding box.
    Rectangle,
}

impl fmt::Display for TransformMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransformMode::Translate => f.write_str("Translate"),
            TransformMode::Rotate => f.write_str("Rotate"),
            TransformMode::Scale => f.write_str("Scale"),
            TransformMode::Rectangle => f.write_str("Rectangle"),
        }
    }
}

/// Coordinate space used to interpret the constrained axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TransformSpace {
    /// Axes aligned to world coordinates (global X/Y/Z).
    #[default]
    World,
    /// Axes aligned to the most recently selected entity's rotation.
    Local,
}

impl TransformSpace {
    /// The other space.
    pub fn toggled(self) -> Self {
        match self {
            TransformSpace::World => TransformSpace::Local,
            TransformSpace::Local => TransformSpace::World,
        }
    }
}

impl fmt::Display for TransformSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransformSpace::World => f.write_str("World"),
            TransformSpace::Local => f.write_str("Local"),
        }
    }
}

/// Where rotation and scaling pivot for a multi-object selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PivotMode {
    /// Every entity pivots around the shared selection origin.
    #[default]
    Selected,
    /// Every entity pivots around itself; positions are left alone when scaling.
    Individual,
}

bitflags::bitflags! {
    /// Which axes, planes or box faces constrain the current manipulation.
    ///
    /// When [`AxisSelection::ALL`] is set the per-axis flags are ignored by
    /// every action. `XN`, `YN` and `ZN` name the faces opposite X/Y/Z and
    /// only mean something to the rectangle action.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct AxisSelection: u8 {
        /// The X axis.
        const X = 1 << 0;
        /// The Y axis.
        const Y = 1 << 1;
        /// The Z axis.
        const Z = 1 << 2;
        /// Unconstrained (free) manipulation.
        const ALL = 1 << 3;
        /// The face opposite +X.
        const XN = 1 << 4;
        /// The face opposite +Y.
        const YN = 1 << 5;
        /// The face opposite +Z.
        const ZN = 1 << 6;
        /// The XY plane.
        const XY = Self::X.bits() | Self::Y.bits();
        /// The YZ plane.
        const YZ = Self::Y.bits() | Self::Z.bits();
        /// The XZ plane.
        const XZ = Self::X.bits() | Self::Z.bits();
    }
}

impl Default for AxisSelection {
    fn default() -> Self {
        Self::NONE
    }
}

impl AxisSelection {
    /// No axis selected.
    pub const NONE: Self = Self::empty();

    const POSITIVE: [Self; 3] = [Self::X, Self::Y, Self::Z];
    const NEGATIVE: [Self; 3] = [Self::XN, Self::YN, Self::ZN];

    /// Whether free (unconstrained) manipulation is selected.
    pub fn is_free(self) -> bool {
        self.contains(Self::ALL)
    }

    /// Component indices of the positive axes that are set.
    ///
    /// Returns an empty list when `ALL` is set, since per-axis flags are
    /// meaningless then.
    pub fn axis_indices(self) -> Vec<usize> {
        if self.is_free() {
            return Vec::new();
        }
        (0..3)
            .filter(|&i| self.contains(Self::POSITIVE[i]))
            .collect()
    }

    /// The single constrained axis, if exactly one positive axis is set.
    pub fn single_axis(self) -> Option<usize> {
        match self.axis_indices().as_slice() {
            [index] => Some(*index),
            _ => None,
        }
    }

    /// The bounding-box face this selection drags, as `(axis index, negative)`.
    ///
    /// Only a selection naming exactly one of X/Y/Z/XN/YN/ZN has a face.
    pub fn face(self) -> Option<(usize, bool)> {
        if self.is_free() {
            return None;
        }
        let mut found = None;
        for i in 0..3 {
            for (flag, negative) in [(Self::POSITIVE[i], false), (Self::NEGATIVE[i], true)] {
                if self.contains(flag) {
                    if found.is_some() {
                        return None;
                    }
                    found = Some((i, negative));
                }
            }
        }
        found
    }

    /// Apply an axis shortcut to the current selection.
    ///
    /// With `additive` the axis joins the existing positive axes (building
    /// XY/YZ/XZ); otherwise it replaces the selection.
    pub fn with_shortcut(self, axis: AxisSelection, additive: bool) -> Self {
        if !additive || self.is_free() || self.is_empty() {
            return axis;
        }
        let positive = self & (Self::X | Self::Y | Self::Z);
        positive | axis
    }
}

/// Optional per-axis snapping increments.
///
/// When set, transform operations will snap to multiples of the specified
/// values. Use `None` for an axis to disable snapping on that axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AxisSnap {
    /// Snap increment for the X axis, or `None` to disable.
    pub x: Option<f32>,
    /// Snap increment for the Y axis, or `None` to disable.
    pub y: Option<f32>,
    /// Snap increment for the Z axis, or `None` to disable.
    pub z: Option<f32>,
}

impl AxisSnap {
    /// Creates a snap configuration with the same increment on all axes.
    pub fn uniform(increment: f32) -> Self {
        Self {
            x: Some(increment),
            y: Some(increment),
            z: Some(increment),
        }
    }

    /// Returns the snap increment for a component index (0 = X, 1 = Y, 2 = Z).
    pub fn get(&self, index: usize) -> Option<f32> {
        match index {
            0 => self.x,
            1 => self.y,
            _ => self.z,
        }
    }
}

/// Snapping increments for all transform operations.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransformSnap {
    /// Grid increments for translation (in world units).
    pub translate: AxisSnap,
    /// Angle increment for rotation (in radians).
    pub rotate: f32,
    /// Increments for scale factors (as multipliers).
    pub scale: AxisSnap,
}

impl Default for TransformSnap {
    fn default() -> Self {
        Self {
            translate: AxisSnap::uniform(1.0),
            rotate: std::f32::consts::FRAC_PI_8,
            scale: AxisSnap::uniform(0.25),
        }
    }
}

/// Pointer buttons the engine distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    /// Primary button: grabs gizmo handles or selected objects.
    Left,
    /// Middle button: temporary scale drag.
    Middle,
    /// Secondary button; ignored by the engine.
    Right,
}

/// Modifier keys held during an input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    /// Adds axis shortcuts to the current selection instead of replacing it.
    pub multi_axis: bool,
    /// Suppresses drop-to-collision for this sample.
    pub ignore_collision: bool,
}

/// A pointer press, move or release in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    /// Cursor position in screen space.
    pub position: Vec2,
    /// Button that changed (press/release) or is held (move).
    pub button: PointerButton,
    /// Modifier keys held.
    pub modifiers: Modifiers,
}

impl PointerEvent {
    /// A left-button event at `position` with no modifiers.
    pub fn left(position: Vec2) -> Self {
        Self {
            position,
            button: PointerButton::Left,
            modifiers: Modifiers::default(),
        }
    }

    /// Returns the event with different modifiers.
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

/// Keyboard input the engine reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorKey {
    /// Constrain to X (or add X with the multi-axis modifier).
    AxisX,
    /// Constrain to Y.
    AxisY,
    /// Constrain to Z.
    AxisZ,
    /// Switch to a manipulation mode.
    Mode(TransformMode),
    /// Switch between world and local space.
    ToggleSpace,
    /// A digit `0..=9` for numeric entry.
    Digit(u8),
    /// Decimal point for numeric entry.
    Period,
    /// Sign for numeric entry.
    Minus,
    /// Delete the last numeric entry character.
    Backspace,
    /// Abort the drag and restore the snapshots.
    Escape,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_hides_per_axis_flags() {
        let sel = AxisSelection::ALL | AxisSelection::X;
        assert!(sel.axis_indices().is_empty());
        assert_eq!(sel.single_axis(), None);
        assert_eq!(sel.face(), None);
    }

    #[test]
    fn free_flag_alone_marks_free_drag() {
        assert!(AxisSelection::ALL.is_free());
        assert!((AxisSelection::ALL | AxisSelection::Z).is_free());
        assert!(!AxisSelection::XY.is_free());
        assert!(!AxisSelection::NONE.is_free());
    }

    #[test]
    fn plane_combinations() {
        assert_eq!(AxisSelection::XY.axis_indices(), vec![0, 1]);
        assert_eq!(AxisSelection::XZ.single_axis(), None);
        assert_eq!(AxisSelection::Z.single_axis(), Some(2));
    }

    #[test]
    fn faces_need_exactly_one_flag() {
        assert_eq!(AxisSelection::X.face(), Some((0, false)));
        assert_eq!(AxisSelection::YN.face(), Some((1, true)));
        assert_eq!(AxisSelection::XY.face(), None);
        assert_eq!((AxisSelection::X | AxisSelection::XN).face(), None);
        assert_eq!(AxisSelection::NONE.face(), None);
    }

    #[test]
    fn shortcut_adds_or_replaces() {
        let sel = AxisSelection::X.with_shortcut(AxisSelection::Y, true);
        assert_eq!(sel, AxisSelection::XY);
        let sel = sel.with_shortcut(AxisSelection::Z, false);
        assert_eq!(sel, AxisSelection::Z);
        let sel = AxisSelection::ALL.with_shortcut(AxisSelection::Y, true);
        assert_eq!(sel, AxisSelection::Y);
    }
}
