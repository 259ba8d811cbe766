//! Undo records for committed drags.

use bevy::log::{debug, warn};

use crate::scene::Scene;
use crate::snapshot::TransformSnapshot;

/// The previous transforms of every entity touched by one drag.
///
/// Reverting restores all four fields of every entry and yields the record
/// that redoes the change.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformUndoRecord {
    entries: Vec<TransformSnapshot>,
}

impl TransformUndoRecord {
    /// A record restoring the given drag-start snapshots.
    pub fn from_snapshots(snapshots: &[TransformSnapshot]) -> Self {
        Self {
            entries: snapshots.to_vec(),
        }
    }

    pub fn entries(&self) -> &[TransformSnapshot] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Restore every entry and return the inverse record.
    ///
    /// The current state of every entry is captured before anything is
    /// written, so the returned record re-applies exactly what was undone.
    pub fn revert(&self, scene: &mut dyn Scene) -> TransformUndoRecord {
        let inverse: Vec<TransformSnapshot> = self
            .entries
            .iter()
            .filter_map(|entry| match scene.entity(entry.entity) {
                Some(current) => Some(TransformSnapshot::capture(entry.entity, &current.transform)),
                None => {
                    warn!("Undo: entity {:?} no longer exists", entry.entity);
                    None
                }
            })
            .collect();

        for entry in &self.entries {
            if let Some(target) = scene.entity_mut(entry.entity) {
                entry.restore(&mut target.transform);
            }
        }

        debug!("Reverted transform of {} entities", inverse.len());
        TransformUndoRecord { entries: inverse }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::EntityTransform;
    use crate::test_support::TestScene;
    use bevy::prelude::*;

    #[test]
    fn revert_and_redo_are_symmetric() {
        let mut scene = TestScene::default();
        let a = scene.spawn(EntityTransform::from_position(Vec3::ZERO));
        let b = scene.spawn(EntityTransform::from_position(Vec3::X));

        let snapshots: Vec<_> = [a, b]
            .iter()
            .map(|&e| TransformSnapshot::capture(e, &scene.transform(e)))
            .collect();
        let record = TransformUndoRecord::from_snapshots(&snapshots);

        let moved_a = EntityTransform::from_position(Vec3::new(5.0, 0.0, 0.0))
            .with_rotation(Quat::from_rotation_x(1.0));
        let moved_b = EntityTransform::from_position(Vec3::new(6.0, 1.0, 0.0)).with_scale(Vec3::splat(3.0));
        scene.set_transform(a, moved_a);
        scene.set_transform(b, moved_b);

        let redo = record.revert(&mut scene);
        assert_eq!(scene.transform(a), EntityTransform::from_position(Vec3::ZERO));
        assert_eq!(scene.transform(b), EntityTransform::from_position(Vec3::X));

        let undo_again = redo.revert(&mut scene);
        assert_eq!(scene.transform(a), moved_a);
        assert_eq!(scene.transform(b), moved_b);
        assert_eq!(undo_again, record);
    }

    #[test]
    fn missing_entities_are_skipped() {
        let mut scene = TestScene::default();
        let a = scene.spawn(EntityTransform::from_position(Vec3::ZERO));
        let record = TransformUndoRecord::from_snapshots(&[TransformSnapshot::capture(
            a,
            &EntityTransform::from_position(Vec3::Y),
        )]);
        scene.despawn(a);

        let redo = record.revert(&mut scene);
        assert!(redo.is_empty());
    }
}
