//! In-memory collaborators for unit tests.

use std::collections::HashMap;

use bevy::math::Ray3d;
use bevy::prelude::*;

use crate::scene::{CollisionResolver, EditorContext, GizmoPose, GizmoRenderer, Raycaster, Scene};
use crate::snapshot::{EntityTransform, TransformableEntity};
use crate::types::AxisSelection;
use crate::undo::TransformUndoRecord;

/// Orthographic camera at +Z looking down -Z; screen = world XY * `pixels_per_unit`.
#[derive(Debug, Clone)]
pub struct OrthoView {
    pub pixels_per_unit: f32,
    pub height: f32,
    pub picked: Option<Entity>,
    pub degenerate: bool,
}

impl Default for OrthoView {
    fn default() -> Self {
        Self {
            pixels_per_unit: 100.0,
            height: 10.0,
            picked: None,
            degenerate: false,
        }
    }
}

impl Raycaster for OrthoView {
    fn cast_ray(&self, pointer: Vec2) -> Option<Ray3d> {
        if self.degenerate {
            return None;
        }
        let xy = pointer / self.pixels_per_unit;
        Some(Ray3d::new(Vec3::new(xy.x, xy.y, self.height), Dir3::NEG_Z))
    }

    fn world_to_screen(&self, point: Vec3) -> Option<Vec2> {
        Some(point.truncate() * self.pixels_per_unit)
    }

    fn camera_position(&self) -> Vec3 {
        Vec3::new(0.0, 0.0, self.height)
    }

    fn camera_forward(&self) -> Vec3 {
        Vec3::NEG_Z
    }

    fn pick(&self, _pointer: Vec2) -> Option<Entity> {
        self.picked
    }
}

/// Reports the same handle wherever the pointer is.
#[derive(Debug, Clone, Default)]
pub struct FixedGizmo {
    pub axis: AxisSelection,
}

impl GizmoRenderer for FixedGizmo {
    fn resolve_axis(&self, _pose: &GizmoPose, _pointer: Vec2) -> AxisSelection {
        self.axis
    }
}

/// Drops everything onto a horizontal floor.
#[derive(Debug, Clone)]
pub struct Floor {
    pub height: f32,
}

impl CollisionResolver for Floor {
    fn snap_to_surface(&self, position: &mut Vec3, _rotation: &mut Quat) {
        position.y = self.height;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchEvent {
    Begin,
    End,
}

#[derive(Default)]
pub struct TestScene {
    world: World,
    entities: HashMap<Entity, TransformableEntity>,
    pub undo_stack: Vec<TransformUndoRecord>,
    pub batches: Vec<BatchEvent>,
    pub started: Vec<Entity>,
    pub collision: bool,
    pub updating: bool,
}

impl TestScene {
    pub fn spawn(&mut self, transform: EntityTransform) -> Entity {
        self.insert(TransformableEntity::new(transform))
    }

    pub fn insert(&mut self, entity: TransformableEntity) -> Entity {
        let id = self.world.spawn_empty().id();
        self.entities.insert(id, entity);
        id
    }

    pub fn despawn(&mut self, id: Entity) {
        self.entities.remove(&id);
    }

    pub fn transform(&self, id: Entity) -> EntityTransform {
        self.entities[&id].transform
    }

    pub fn set_transform(&mut self, id: Entity, transform: EntityTransform) {
        if let Some(entity) = self.entities.get_mut(&id) {
            entity.transform = transform;
        }
    }
}

impl Scene for TestScene {
    fn entity(&self, id: Entity) -> Option<&TransformableEntity> {
        self.entities.get(&id)
    }

    fn entity_mut(&mut self, id: Entity) -> Option<&mut TransformableEntity> {
        self.entities.get_mut(&id)
    }

    fn begin_undo_batch(&mut self) {
        self.batches.push(BatchEvent::Begin);
    }

    fn end_undo_batch(&mut self) {
        self.batches.push(BatchEvent::End);
    }

    fn push_undo(&mut self, record: TransformUndoRecord) {
        self.undo_stack.push(record);
    }

    fn collision_enabled(&self) -> bool {
        self.collision
    }

    fn transform_started(&mut self, id: Entity) {
        self.started.push(id);
    }

    fn is_updating(&self) -> bool {
        self.updating
    }
}

/// A scene plus the collaborators an engine call needs.
#[derive(Default)]
pub struct Harness {
    pub scene: TestScene,
    pub view: OrthoView,
    pub gizmo: FixedGizmo,
    pub floor: Option<Floor>,
}

impl Harness {
    pub fn ctx(&mut self) -> EditorContext<'_> {
        let ctx = EditorContext::new(&mut self.scene, &self.view, &self.gizmo);
        match &self.floor {
            Some(floor) => ctx.with_collision(floor),
            None => ctx,
        }
    }
}
