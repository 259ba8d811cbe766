//! The drag state machine that drives the active action.
//!
//! Pointer events move the engine through `Idle → Armed → Dragging → Idle`.
//! Pressing arms a drag (axis resolved, action reset); the first sample that
//! produces a delta snapshots every target and opens the drag; releasing
//! commits an undo record to the scene.

use bevy::log::{debug, info, trace};
use bevy::prelude::*;

use crate::action::{DragView, TransformAction};
use crate::bounds::{selection_origin, SelectionBounds};
use crate::gizmo_frame::GizmoFrame;
use crate::scene::{EditorContext, GizmoPose, Raycaster, Scene};
use crate::settings::{NumericInput, TransformSettings};
use crate::snapshot::TransformSnapshot;
use crate::types::{
    AxisSelection, EditorKey, Modifiers, PointerButton, PointerEvent, TransformMode,
    TransformSpace,
};
use crate::undo::TransformUndoRecord;

/// Where the engine is in a drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragPhase {
    /// No active axis.
    #[default]
    Idle,
    /// Pointer pressed and axis resolved; nothing has moved yet.
    Armed,
    /// Deltas are being applied against the snapshots.
    Dragging,
}

/// Turns pointer and keyboard input into transforms of the selected entities.
#[derive(Resource, Debug, Clone, Default)]
pub struct TransformEngine {
    settings: TransformSettings,
    action: TransformAction,
    targets: Vec<Entity>,
    phase: DragPhase,
    snapshots: Vec<TransformSnapshot>,
    bounds: SelectionBounds,
    /// Mode to return to after a shortcut drag.
    restore_mode: Option<TransformMode>,
    collision_active: bool,
    ignore_collision: bool,
    last_pointer: Vec2,
}

impl TransformEngine {
    pub fn new(settings: TransformSettings) -> Self {
        Self {
            settings,
            ..Default::default()
        }
    }

    pub fn settings(&self) -> &TransformSettings {
        &self.settings
    }

    /// Mutable access for UI toggles (snapping, pivot mode, collision).
    pub fn settings_mut(&mut self) -> &mut TransformSettings {
        &mut self.settings
    }

    pub fn mode(&self) -> TransformMode {
        self.action.mode()
    }

    pub fn action(&self) -> &TransformAction {
        &self.action
    }

    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    pub fn targets(&self) -> &[Entity] {
        &self.targets
    }

    pub fn bounds(&self) -> &SelectionBounds {
        &self.bounds
    }

    /// Snapshots of the current drag; empty unless dragging.
    pub fn snapshots(&self) -> &[TransformSnapshot] {
        &self.snapshots
    }

    /// Pose handed to the gizmo renderer for drawing and hit-testing.
    pub fn gizmo_pose(&self) -> GizmoPose {
        let frame = GizmoFrame::from_settings(&self.settings);
        GizmoPose {
            origin: frame.origin,
            orientation: frame.rotation,
            scale: 1.0,
        }
    }

    /// Replace the selection. Ignored while a drag is in progress.
    pub fn set_targets(&mut self, scene: &dyn Scene, targets: Vec<Entity>) -> bool {
        if self.phase != DragPhase::Idle {
            debug!("Transform: selection change ignored during drag");
            return false;
        }
        self.targets = targets
            .into_iter()
            .filter(|&id| scene.entity(id).is_some())
            .collect();
        self.refresh_frame(scene);
        true
    }

    /// Switch the active action. Only allowed while idle.
    pub fn set_mode(&mut self, mode: TransformMode) -> bool {
        if self.phase != DragPhase::Idle {
            return false;
        }
        if self.action.mode() != mode {
            self.action = TransformAction::new(mode);
            info!("Transform: {} mode", mode);
        }
        true
    }

    /// Switch world/local space. Only allowed while idle.
    pub fn set_space(&mut self, scene: &dyn Scene, space: TransformSpace) -> bool {
        if self.phase != DragPhase::Idle {
            return false;
        }
        self.settings.space = space;
        self.refresh_bounds(scene);
        info!("Transform: {} space", space);
        true
    }

    /// Handle a pointer press. Returns whether a drag was armed.
    pub fn pointer_down(&mut self, ctx: &mut EditorContext<'_>, event: PointerEvent) -> bool {
        if ctx.scene.is_updating() || self.phase != DragPhase::Idle || self.targets.is_empty() {
            return false;
        }

        let axis = match event.button {
            PointerButton::Left => self.resolve_grab(ctx, event.position),
            PointerButton::Middle => {
                let axis = self.resolve_grab(ctx, event.position);
                self.restore_mode = Some(self.action.mode());
                self.action = TransformAction::new(TransformMode::Scale);
                if axis.is_empty() {
                    AxisSelection::ALL
                } else {
                    axis
                }
            }
            PointerButton::Right => return false,
        };
        if axis.is_empty() {
            return false;
        }

        self.settings.active_axis = axis;
        self.last_pointer = event.position;
        self.ignore_collision = event.modifiers.ignore_collision;
        self.reset_action(ctx.raycaster);
        self.phase = DragPhase::Armed;
        debug!("Transform: armed {} on {:?}", self.action.mode(), axis);
        true
    }

    /// Handle a pointer move sample.
    pub fn pointer_move(&mut self, ctx: &mut EditorContext<'_>, event: PointerEvent) {
        if ctx.scene.is_updating() || self.phase == DragPhase::Idle {
            return;
        }
        self.last_pointer = event.position;
        self.ignore_collision = event.modifiers.ignore_collision;

        let view = DragView {
            settings: &self.settings,
            raycaster: ctx.raycaster,
            bounds: &self.bounds,
            pointer: event.position,
        };
        let changed = match self.action.update(&view) {
            Ok(changed) => changed,
            Err(err) => {
                trace!("Transform: sample skipped: {err}");
                return;
            }
        };
        if !changed {
            return;
        }

        if self.phase == DragPhase::Armed {
            self.begin_drag(ctx);
        }
        self.apply(ctx);
    }

    /// Handle a pointer release. Returns whether an undo record was committed.
    pub fn pointer_up(&mut self, ctx: &mut EditorContext<'_>, _event: PointerEvent) -> bool {
        if ctx.scene.is_updating() || self.phase == DragPhase::Idle {
            return false;
        }

        let committed = self.phase == DragPhase::Dragging;
        if committed {
            let record = TransformUndoRecord::from_snapshots(&self.snapshots);
            info!(
                "Transform: committed {} of {} entities",
                self.action.mode(),
                record.len()
            );
            ctx.scene.push_undo(record);
        }
        self.finish(ctx.scene);
        committed
    }

    /// Abort the drag, restoring every snapshot. Nothing is pushed to the undo stack.
    pub fn cancel(&mut self, ctx: &mut EditorContext<'_>) -> bool {
        if ctx.scene.is_updating() || self.phase == DragPhase::Idle {
            return false;
        }
        if self.phase == DragPhase::Dragging {
            self.rollback(ctx.scene);
        }
        debug!("Transform: drag cancelled");
        self.finish(ctx.scene);
        true
    }

    /// Constrain the current drag to a new axis selection.
    ///
    /// Live transforms are rolled back to the snapshots first so the old
    /// axis's partial drag does not compound with the new one.
    pub fn set_axis(&mut self, ctx: &mut EditorContext<'_>, axis: AxisSelection) -> bool {
        if ctx.scene.is_updating() || self.phase == DragPhase::Idle || axis.is_empty() {
            return false;
        }
        if self.phase == DragPhase::Dragging {
            self.rollback(ctx.scene);
        }
        self.refresh_bounds(ctx.scene);
        self.settings.active_axis = axis;
        if self.phase == DragPhase::Dragging {
            self.collision_active = self.drops_to_surface(ctx);
        }
        self.reset_action(ctx.raycaster);
        debug!("Transform: axis changed to {:?}", axis);
        true
    }

    /// Handle a key press. Returns whether the key was consumed.
    pub fn key_press(&mut self, ctx: &mut EditorContext<'_>, key: EditorKey, modifiers: Modifiers) -> bool {
        if ctx.scene.is_updating() {
            return false;
        }
        match key {
            EditorKey::AxisX => self.axis_shortcut(ctx, AxisSelection::X, modifiers),
            EditorKey::AxisY => self.axis_shortcut(ctx, AxisSelection::Y, modifiers),
            EditorKey::AxisZ => self.axis_shortcut(ctx, AxisSelection::Z, modifiers),
            EditorKey::Mode(mode) => self.set_mode(mode),
            EditorKey::ToggleSpace => {
                let space = self.settings.space.toggled();
                self.set_space(ctx.scene, space)
            }
            EditorKey::Digit(digit) => match char::from_digit(u32::from(digit), 10) {
                Some(c) => self.edit_numeric(ctx, |input| input.push(c)),
                None => false,
            },
            EditorKey::Period => self.edit_numeric(ctx, |input| input.push('.')),
            EditorKey::Minus => self.edit_numeric(ctx, |input| input.push('-')),
            EditorKey::Backspace => self.edit_numeric(ctx, |input| input.backspace()),
            EditorKey::Escape => self.cancel(ctx),
        }
    }

    fn axis_shortcut(&mut self, ctx: &mut EditorContext<'_>, axis: AxisSelection, modifiers: Modifiers) -> bool {
        let selection = self
            .settings
            .active_axis
            .with_shortcut(axis, modifiers.multi_axis);
        self.set_axis(ctx, selection)
    }

    fn edit_numeric(
        &mut self,
        ctx: &mut EditorContext<'_>,
        edit: impl FnOnce(&mut NumericInput),
    ) -> bool {
        if self.phase == DragPhase::Idle {
            return false;
        }
        edit(&mut self.settings.text_input);
        trace!("Transform: numeric input {:?}", self.settings.text_input.text());
        if self.phase == DragPhase::Armed {
            self.begin_drag(ctx);
        }
        self.apply(ctx);
        true
    }

    /// Gizmo handle under the pointer, or `ALL` when grabbing an already selected object.
    fn resolve_grab(&self, ctx: &EditorContext<'_>, pointer: Vec2) -> AxisSelection {
        let axis = ctx.gizmo.resolve_axis(&self.gizmo_pose(), pointer);
        if !axis.is_empty() {
            return axis;
        }
        match ctx.raycaster.pick(pointer) {
            Some(hit) if self.targets.contains(&hit) => AxisSelection::ALL,
            _ => AxisSelection::NONE,
        }
    }

    fn reset_action(&mut self, raycaster: &dyn Raycaster) {
        let view = DragView {
            settings: &self.settings,
            raycaster,
            bounds: &self.bounds,
            pointer: self.last_pointer,
        };
        self.action.reset(&view);
    }

    fn begin_drag(&mut self, ctx: &mut EditorContext<'_>) {
        ctx.scene.begin_undo_batch();
        for &id in &self.targets {
            ctx.scene.transform_started(id);
        }
        let scene = &*ctx.scene;
        self.snapshots = self
            .targets
            .iter()
            .filter_map(|&id| {
                scene
                    .entity(id)
                    .map(|entity| TransformSnapshot::capture(id, &entity.transform))
            })
            .collect();
        self.collision_active = self.drops_to_surface(ctx);
        ctx.scene.end_undo_batch();

        self.phase = DragPhase::Dragging;
        debug!(
            "Transform: drag started on {} entities (collision {})",
            self.snapshots.len(),
            self.collision_active
        );
    }

    /// Drop-to-collision only applies to free translation with a resolver and the scene toggle on.
    fn drops_to_surface(&self, ctx: &EditorContext<'_>) -> bool {
        self.action.mode() == TransformMode::Translate
            && self.settings.collision_detect
            && self.settings.active_axis.is_free()
            && ctx.scene.collision_enabled()
            && ctx.collision.is_some()
    }

    /// Write the action's proposal for every snapshot into the scene.
    fn apply(&mut self, ctx: &mut EditorContext<'_>) {
        let mode = self.action.mode();
        let drop_to_surface = self.collision_active && !self.ignore_collision;

        for before in &self.snapshots {
            let Some(entity) = ctx.scene.entity_mut(before.entity) else {
                continue;
            };
            let mut proposed = self
                .action
                .propose(&self.settings, before, entity.local_scale_forced);

            if drop_to_surface {
                if let Some(resolver) = ctx.collision {
                    let mut position = proposed.position;
                    resolver.snap_to_surface(&mut position, &mut proposed.rotation);
                    proposed.origin += position - proposed.position;
                    proposed.position = position;
                }
            }

            match entity.hook.as_mut() {
                Some(hook) => match mode {
                    TransformMode::Translate => hook.translate(&mut entity.transform, before, &proposed),
                    TransformMode::Rotate => hook.rotate(&mut entity.transform, before, &proposed),
                    TransformMode::Scale | TransformMode::Rectangle => {
                        hook.scale(&mut entity.transform, before, &proposed)
                    }
                },
                None => entity.transform = proposed,
            }
        }

        self.refresh_bounds(ctx.scene);
    }

    fn rollback(&mut self, scene: &mut dyn Scene) {
        for snapshot in &self.snapshots {
            if let Some(entity) = scene.entity_mut(snapshot.entity) {
                snapshot.restore(&mut entity.transform);
            }
        }
    }

    fn finish(&mut self, scene: &dyn Scene) {
        self.settings.active_axis = AxisSelection::NONE;
        self.settings.text_input.clear();
        self.snapshots.clear();
        self.collision_active = false;
        self.phase = DragPhase::Idle;
        if let Some(mode) = self.restore_mode.take() {
            self.action = TransformAction::new(mode);
        }
        self.refresh_frame(scene);
    }

    /// Recompute pivot, local orientation and bounds from the targets.
    fn refresh_frame(&mut self, scene: &dyn Scene) {
        self.settings.rotation = self
            .targets
            .last()
            .and_then(|&id| scene.entity(id))
            .map_or(Quat::IDENTITY, |entity| entity.transform.rotation);
        self.settings.origin = selection_origin(self.targets.iter().filter_map(|&id| scene.entity(id)));
        self.refresh_bounds(scene);
    }

    fn refresh_bounds(&mut self, scene: &dyn Scene) {
        let frame = GizmoFrame::from_settings(&self.settings);
        self.bounds = SelectionBounds::compute(
            self.targets.iter().filter_map(|&id| scene.entity(id)),
            &frame,
        );
    }
}
