//! Interfaces to the collaborators the engine drives but does not own.
//!
//! The scene graph, the camera, gizmo hit-testing and collision snapping all
//! live outside this crate. The engine reaches them through these traits,
//! bundled per call in an [`EditorContext`].

use bevy::math::Ray3d;
use bevy::prelude::*;

use crate::snapshot::TransformableEntity;
use crate::types::AxisSelection;
use crate::undo::TransformUndoRecord;

/// Casts pointer rays and projects points for the active camera.
pub trait Raycaster {
    /// Ray from the camera through a screen position. `None` when the view is degenerate.
    fn cast_ray(&self, pointer: Vec2) -> Option<Ray3d>;

    /// Screen position of a world point. `None` when it does not project.
    fn world_to_screen(&self, point: Vec3) -> Option<Vec2>;

    fn camera_position(&self) -> Vec3;

    /// Direction the camera looks along.
    fn camera_forward(&self) -> Vec3;

    /// Entity under the pointer, if any.
    fn pick(&self, _pointer: Vec2) -> Option<Entity> {
        None
    }
}

/// Where and how the gizmo is drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GizmoPose {
    pub origin: Vec3,
    pub orientation: Quat,
    pub scale: f32,
}

/// Hit-tests the rendered gizmo handles.
pub trait GizmoRenderer {
    /// The handle under the pointer, or [`AxisSelection::NONE`].
    fn resolve_axis(&self, pose: &GizmoPose, pointer: Vec2) -> AxisSelection;
}

/// Rests a translated object on the surface beneath it.
pub trait CollisionResolver {
    fn snap_to_surface(&self, position: &mut Vec3, rotation: &mut Quat);
}

/// The scene graph and its undo stack.
pub trait Scene {
    fn entity(&self, id: Entity) -> Option<&TransformableEntity>;

    fn entity_mut(&mut self, id: Entity) -> Option<&mut TransformableEntity>;

    /// Open a batch; undo entries pushed until [`Scene::end_undo_batch`] group together.
    fn begin_undo_batch(&mut self);

    fn end_undo_batch(&mut self);

    fn push_undo(&mut self, record: TransformUndoRecord);

    /// The scene-wide drop-to-collision toggle.
    fn collision_enabled(&self) -> bool {
        false
    }

    /// Called once per entity when a drag starts moving it.
    fn transform_started(&mut self, _id: Entity) {}

    /// True while the scene's own update pass is running; input is ignored then.
    fn is_updating(&self) -> bool {
        false
    }
}

/// Collaborators for one engine call.
pub struct EditorContext<'a> {
    pub scene: &'a mut dyn Scene,
    pub raycaster: &'a dyn Raycaster,
    pub gizmo: &'a dyn GizmoRenderer,
    pub collision: Option<&'a dyn CollisionResolver>,
}

impl<'a> EditorContext<'a> {
    pub fn new(
        scene: &'a mut dyn Scene,
        raycaster: &'a dyn Raycaster,
        gizmo: &'a dyn GizmoRenderer,
    ) -> Self {
        Self {
            scene,
            raycaster,
            gizmo,
            collision: None,
        }
    }

    pub fn with_collision(mut self, collision: &'a dyn CollisionResolver) -> Self {
        self.collision = Some(collision);
        self
    }
}
