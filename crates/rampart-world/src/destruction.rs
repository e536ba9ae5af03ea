//! Destruction geometry: which voxels a destroy action removes.
//!
//! Shared by the packet-confirmed destroy path and by client-simulated
//! grenade explosions, so both produce identical removed-block sets.

use glam::IVec3;
use rampart_protocol::BlockActionKind;

use crate::store::{MapStore, RemovedBlock};

/// Shape of a destroy operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DestroyKind {
    /// The target voxel only.
    Single,
    /// The target plus the voxels directly above and below it.
    Spade,
    /// The full 3×3×3 neighborhood centered on the target.
    Grenade,
}

impl DestroyKind {
    /// Map a wire-level destroy action onto its geometry. `Build` has no
    /// destroy geometry and is not accepted here.
    pub fn from_action(action: BlockActionKind) -> Option<Self> {
        match action {
            BlockActionKind::Build => None,
            BlockActionKind::Destroy => Some(Self::Single),
            BlockActionKind::Spade => Some(Self::Spade),
            BlockActionKind::Grenade => Some(Self::Grenade),
        }
    }
}

/// Remove the voxels covered by `kind` at `pos`, collecting every voxel
/// actually removed. Cells that were already air contribute nothing.
pub fn destroy_voxels(map: &mut dyn MapStore, pos: IVec3, kind: DestroyKind) -> Vec<RemovedBlock> {
    let mut removed = Vec::new();
    let mut take = |map: &mut dyn MapStore, p: IVec3| {
        if let Some(block) = map.destroy(p) {
            removed.push(block);
        }
    };

    match kind {
        DestroyKind::Single => take(map, pos),
        DestroyKind::Spade => {
            take(map, pos);
            take(map, pos + IVec3::Z);
            take(map, pos - IVec3::Z);
        }
        DestroyKind::Grenade => {
            for x in pos.x - 1..=pos.x + 1 {
                for y in pos.y - 1..=pos.y + 1 {
                    for z in pos.z - 1..=pos.z + 1 {
                        take(map, IVec3::new(x, y, z));
                    }
                }
            }
        }
    }
    removed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryMap;
    use rampart_protocol::Rgb;

    const DIRT: Rgb = Rgb::new(103, 64, 40);

    fn filled_map() -> MemoryMap {
        let mut map = MemoryMap::new();
        map.fill_box(IVec3::new(5, 5, 5), IVec3::new(15, 15, 15), DIRT);
        map
    }

    #[test]
    fn test_single_removes_one() {
        let mut map = filled_map();
        let removed = destroy_voxels(&mut map, IVec3::new(10, 10, 10), DestroyKind::Single);
        assert_eq!(removed.len(), 1);
        assert_eq!(removed[0].position, IVec3::new(10, 10, 10));
    }

    #[test]
    fn test_spade_removes_column_of_three() {
        let mut map = filled_map();
        let removed = destroy_voxels(&mut map, IVec3::new(10, 10, 10), DestroyKind::Spade);
        let mut positions: Vec<_> = removed.iter().map(|b| b.position).collect();
        positions.sort_by_key(|p| p.z);
        assert_eq!(
            positions,
            vec![
                IVec3::new(10, 10, 9),
                IVec3::new(10, 10, 10),
                IVec3::new(10, 10, 11),
            ]
        );
    }

    #[test]
    fn test_grenade_removes_full_neighborhood() {
        let mut map = filled_map();
        let removed = destroy_voxels(&mut map, IVec3::new(10, 10, 10), DestroyKind::Grenade);
        assert_eq!(removed.len(), 27);
    }

    #[test]
    fn test_air_cells_contribute_nothing() {
        let mut map = MemoryMap::new();
        map.build(IVec3::new(10, 10, 10), DIRT);
        // Only the center of the 3×3×3 neighborhood is solid.
        let removed = destroy_voxels(&mut map, IVec3::new(10, 10, 10), DestroyKind::Grenade);
        assert_eq!(removed.len(), 1);

        let removed = destroy_voxels(&mut map, IVec3::new(10, 10, 10), DestroyKind::Grenade);
        assert!(removed.is_empty());
    }

    #[test]
    fn test_action_mapping() {
        assert_eq!(
            DestroyKind::from_action(BlockActionKind::Destroy),
            Some(DestroyKind::Single)
        );
        assert_eq!(
            DestroyKind::from_action(BlockActionKind::Spade),
            Some(DestroyKind::Spade)
        );
        assert_eq!(
            DestroyKind::from_action(BlockActionKind::Grenade),
            Some(DestroyKind::Grenade)
        );
        assert_eq!(DestroyKind::from_action(BlockActionKind::Build), None);
    }
}
