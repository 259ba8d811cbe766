//! Multi-object transform manipulation for Bevy editors.
//!
//! This crate turns pointer drags and keyboard shortcuts into translate,
//! rotate, scale and box-face scale edits of a selection. It owns the drag
//! state machine and the math; the scene graph, camera, gizmo hit-testing
//! and collision are supplied by the host through the traits in [`scene`].
//!
//! # Quick Start
//!
//! ```ignore
//! use bevy::prelude::*;
//! use bevy_transform_engine::{EditorContext, PointerEvent, TransformEngine, TransformEnginePlugin};
//!
//! App::new().add_plugins(TransformEnginePlugin);
//!
//! fn on_press(engine: &mut TransformEngine, ctx: &mut EditorContext, cursor: Vec2) {
//!     engine.pointer_down(ctx, PointerEvent::left(cursor));
//! }
//! ```
//!
//! # Modes
//!
//! - **Translate**: move along an axis, a plane or the view plane
//! - **Rotate**: rotate around an axis through the selection pivot
//! - **Scale**: scale per axis or uniformly around the pivot
//! - **Rectangle**: drag one face of the selection box, the opposite face stays fixed
//!
//! Every committed drag pushes one [`TransformUndoRecord`] to the scene.

use bevy::prelude::*;

pub mod action;
mod bounds;
mod engine;
mod error;
mod gizmo_frame;
mod math;
pub mod scene;
mod settings;
mod snapshot;
mod types;
mod undo;

#[cfg(test)]
mod test_support;

pub use action::{DragView, TransformAction};
pub use bounds::{selection_origin, SelectionBounds};
pub use engine::{DragPhase, TransformEngine};
pub use error::SampleError;
pub use gizmo_frame::{AxisConstraint, GizmoFrame};
pub use scene::{CollisionResolver, EditorContext, GizmoPose, GizmoRenderer, Raycaster, Scene};
pub use settings::{NumericInput, TransformPreferences, TransformSettings};
pub use snapshot::{EntityTransform, LocalBounds, TransformHook, TransformSnapshot, TransformableEntity};
pub use types::{
    AxisSelection, AxisSnap, EditorKey, Modifiers, PivotMode, PointerButton, PointerEvent,
    TransformMode, TransformSnap, TransformSpace,
};
pub use undo::TransformUndoRecord;

/// Registers a default [`TransformEngine`] resource.
///
/// Input is not read automatically; host systems forward pointer and key
/// events to the engine together with an [`EditorContext`].
pub struct TransformEnginePlugin;

impl Plugin for TransformEnginePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<TransformEngine>();
    }
}
