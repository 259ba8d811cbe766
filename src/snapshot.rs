//! Entity transform state, drag-start snapshots and placement hooks.

use bevy::prelude::*;

/// The mutable transform fields of a manipulable entity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntityTransform {
    /// Pivot anchor for rotation and scale; follows `position` when the entity moves.
    pub origin: Vec3,
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for EntityTransform {
    fn default() -> Self {
        Self::from_position(Vec3::ZERO)
    }
}

impl EntityTransform {
    /// Identity rotation and unit scale at `position`, with the origin on the position.
    pub fn from_position(position: Vec3) -> Self {
        Self {
            origin: position,
            position,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }

    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_origin(mut self, origin: Vec3) -> Self {
        self.origin = origin;
        self
    }
}

/// Axis-aligned bounds of an entity's geometry in its own local space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalBounds {
    pub min: Vec3,
    pub max: Vec3,
}

impl Default for LocalBounds {
    fn default() -> Self {
        Self::from_half_size(Vec3::splat(0.5))
    }
}

impl LocalBounds {
    pub fn from_half_size(half: Vec3) -> Self {
        Self {
            min: -half,
            max: half,
        }
    }

    /// The eight corners of the box.
    pub fn corners(&self) -> [Vec3; 8] {
        let (a, b) = (self.min, self.max);
        [
            Vec3::new(a.x, a.y, a.z),
            Vec3::new(b.x, a.y, a.z),
            Vec3::new(a.x, b.y, a.z),
            Vec3::new(b.x, b.y, a.z),
            Vec3::new(a.x, a.y, b.z),
            Vec3::new(b.x, a.y, b.z),
            Vec3::new(a.x, b.y, b.z),
            Vec3::new(b.x, b.y, b.z),
        ]
    }
}

/// Immutable capture of one entity's transform at drag start.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformSnapshot {
    pub entity: Entity,
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
    pub origin: Vec3,
}

impl TransformSnapshot {
    pub fn capture(entity: Entity, transform: &EntityTransform) -> Self {
        Self {
            entity,
            position: transform.position,
            rotation: transform.rotation,
            scale: transform.scale,
            origin: transform.origin,
        }
    }

    /// The captured state as a transform value.
    pub fn transform(&self) -> EntityTransform {
        EntityTransform {
            origin: self.origin,
            position: self.position,
            rotation: self.rotation,
            scale: self.scale,
        }
    }

    /// Write all four captured fields back.
    pub fn restore(&self, transform: &mut EntityTransform) {
        *transform = self.transform();
    }
}

/// Custom placement for entities whose transform is not written directly.
///
/// When an entity carries a hook, the engine hands it the state before the
/// drag and the transform the action proposes, and the hook decides what to
/// write. The defaults accept the proposal unchanged.
pub trait TransformHook: Send + Sync {
    fn translate(
        &mut self,
        current: &mut EntityTransform,
        _before: &TransformSnapshot,
        proposed: &EntityTransform,
    ) {
        *current = *proposed;
    }

    fn rotate(
        &mut self,
        current: &mut EntityTransform,
        _before: &TransformSnapshot,
        proposed: &EntityTransform,
    ) {
        *current = *proposed;
    }

    /// Also used by rectangle (box face) scaling.
    fn scale(
        &mut self,
        current: &mut EntityTransform,
        _before: &TransformSnapshot,
        proposed: &EntityTransform,
    ) {
        *current = *proposed;
    }
}

/// A scene object the engine can manipulate.
pub struct TransformableEntity {
    pub transform: EntityTransform,
    pub local_bounds: LocalBounds,
    /// Opts out of origin-relative repositioning while scaling from a shared pivot.
    pub local_scale_forced: bool,
    pub hook: Option<Box<dyn TransformHook>>,
}

impl TransformableEntity {
    pub fn new(transform: EntityTransform) -> Self {
        Self {
            transform,
            local_bounds: LocalBounds::default(),
            local_scale_forced: false,
            hook: None,
        }
    }

    pub fn with_bounds(mut self, bounds: LocalBounds) -> Self {
        self.local_bounds = bounds;
        self
    }

    pub fn with_hook(mut self, hook: impl TransformHook + 'static) -> Self {
        self.hook = Some(Box::new(hook));
        self
    }

    pub fn with_local_scale_forced(mut self, forced: bool) -> Self {
        self.local_scale_forced = forced;
        self
    }
}

impl std::fmt::Debug for TransformableEntity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransformableEntity")
            .field("transform", &self.transform)
            .field("local_bounds", &self.local_bounds)
            .field("local_scale_forced", &self.local_scale_forced)
            .field("hook", &self.hook.is_some())
            .finish()
    }
}
