//! The voxel map mutation contract.
//!
//! The session core holds no voxel data itself; it drives an external store
//! through [`MapStore`]. [`MemoryMap`] is a minimal in-memory implementation
//! for tests and headless use.

use glam::{IVec3, Vec3};
use rampart_protocol::Rgb;

use crate::raster;

/// Integrity a freshly placed block starts with.
pub const BLOCK_HEALTH: u8 = 100;

// ---------------------------------------------------------------------------
// RemovedBlock / Face
// ---------------------------------------------------------------------------

/// Record of a voxel removed from the map, carried into falling-debris
/// objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemovedBlock {
    /// Where the voxel was.
    pub position: IVec3,
    /// Its color at removal time.
    pub color: Rgb,
}

/// One face of a voxel cube.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Face {
    /// -x.
    Left,
    /// +x.
    Right,
    /// -y.
    Front,
    /// +y.
    Back,
    /// -z (up, since z grows downward).
    Top,
    /// +z (down).
    Bottom,
}

impl Face {
    /// Center point of this face of the unit voxel at `pos`.
    pub fn center(self, pos: IVec3) -> Vec3 {
        let base = pos.as_vec3() + Vec3::splat(0.5);
        match self {
            Face::Left => base + Vec3::new(-0.5, 0.0, 0.0),
            Face::Right => base + Vec3::new(0.5, 0.0, 0.0),
            Face::Front => base + Vec3::new(0.0, -0.5, 0.0),
            Face::Back => base + Vec3::new(0.0, 0.5, 0.0),
            Face::Top => base + Vec3::new(0.0, 0.0, -0.5),
            Face::Bottom => base + Vec3::new(0.0, 0.0, 0.5),
        }
    }
}

// ---------------------------------------------------------------------------
// MapStore
// ---------------------------------------------------------------------------

/// Mutation contract of the external voxel store.
///
/// Implementations decide bounds, persistence, and meshing; the session core
/// only sequences calls. All operations are infallible by design: editing a
/// cell that cannot be edited reports `false`/`None` rather than erroring,
/// because the packet stream may legitimately reference stale positions.
pub trait MapStore {
    /// Returns `true` if a solid voxel occupies `pos`.
    fn is_solid(&self, pos: IVec3) -> bool;

    /// Color of the voxel at `pos`, if solid.
    fn color_at(&self, pos: IVec3) -> Option<Rgb>;

    /// Place a voxel. Returns `false` if the cell was already solid or is
    /// not placeable.
    fn build(&mut self, pos: IVec3, color: Rgb) -> bool;

    /// Remove the voxel at `pos`, returning its record if one was there.
    fn destroy(&mut self, pos: IVec3) -> Option<RemovedBlock>;

    /// Apply `amount` damage to the voxel at `pos`. Returns `true` when the
    /// voxel's integrity has reached zero (the caller decides whether to
    /// destroy it).
    fn damage(&mut self, pos: IVec3, amount: u8) -> bool;

    /// Rasterize the voxel line from `start` to `end` inclusive.
    fn block_line(&self, start: IVec3, end: IVec3) -> Vec<IVec3> {
        raster::block_line(start, end)
    }
}

// ---------------------------------------------------------------------------
// MemoryMap
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
struct Voxel {
    color: Rgb,
    health: u8,
}

/// Sparse in-memory [`MapStore`] tracking only explicitly placed voxels.
///
/// Every cell not touched by [`fill_box`](MemoryMap::fill_box) or
/// [`build`](MapStore::build) is air.
#[derive(Debug, Default)]
pub struct MemoryMap {
    voxels: std::collections::HashMap<IVec3, Voxel>,
}

impl MemoryMap {
    /// Create an empty (all-air) map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fill the inclusive box `[min, max]` with solid voxels of `color`.
    pub fn fill_box(&mut self, min: IVec3, max: IVec3, color: Rgb) {
        for x in min.x..=max.x {
            for y in min.y..=max.y {
                for z in min.z..=max.z {
                    self.voxels.insert(
                        IVec3::new(x, y, z),
                        Voxel {
                            color,
                            health: BLOCK_HEALTH,
                        },
                    );
                }
            }
        }
    }

    /// Number of solid voxels.
    pub fn solid_count(&self) -> usize {
        self.voxels.len()
    }
}

impl MapStore for MemoryMap {
    fn is_solid(&self, pos: IVec3) -> bool {
        self.voxels.contains_key(&pos)
    }

    fn color_at(&self, pos: IVec3) -> Option<Rgb> {
        self.voxels.get(&pos).map(|v| v.color)
    }

    fn build(&mut self, pos: IVec3, color: Rgb) -> bool {
        if self.voxels.contains_key(&pos) {
            return false;
        }
        self.voxels.insert(
            pos,
            Voxel {
                color,
                health: BLOCK_HEALTH,
            },
        );
        true
    }

    fn destroy(&mut self, pos: IVec3) -> Option<RemovedBlock> {
        self.voxels.remove(&pos).map(|v| RemovedBlock {
            position: pos,
            color: v.color,
        })
    }

    fn damage(&mut self, pos: IVec3, amount: u8) -> bool {
        match self.voxels.get_mut(&pos) {
            Some(v) => {
                v.health = v.health.saturating_sub(amount);
                v.health == 0
            }
            None => false,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
