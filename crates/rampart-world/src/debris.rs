//! Falling-block clusters and debris particle bursts.

use glam::Vec3;
use rampart_protocol::Rgb;

use crate::objects::{GRAVITY, ObjectStatus, ObjectTag, TransientObject, WorldCtx};
use crate::store::RemovedBlock;

/// Safety cap on how long a falling cluster may simulate before it is
/// dropped even without landing (e.g. blocks removed over a bottomless pit).
const MAX_FALL_SECS: f32 = 5.0;

/// Lifetime of the particle burst a landing cluster breaks into.
const LANDING_BURST_SECS: f32 = 0.8;

/// Golden angle, used to fan deterministic particle directions.
const SPREAD_ANGLE: f32 = 2.399_963;

// ---------------------------------------------------------------------------
// FallingBlocks
// ---------------------------------------------------------------------------

/// A cluster of voxels knocked loose by a destroy action, falling as one
/// rigid group until it lands.
pub struct FallingBlocks {
    blocks: Vec<RemovedBlock>,
    origin: Vec3,
    position: Vec3,
    fall_speed: f32,
    age: f32,
}

impl FallingBlocks {
    /// Create a cluster from the removed-voxel records. `blocks` must be
    /// non-empty; callers skip staging for empty removals.
    pub fn new(blocks: Vec<RemovedBlock>) -> Self {
        debug_assert!(!blocks.is_empty());
        let sum: Vec3 = blocks
            .iter()
            .map(|b| b.position.as_vec3() + Vec3::splat(0.5))
            .sum();
        let origin = sum / blocks.len().max(1) as f32;
        Self {
            blocks,
            origin,
            position: origin,
            fall_speed: 0.0,
            age: 0.0,
        }
    }

    /// The removed voxels making up the cluster.
    pub fn blocks(&self) -> &[RemovedBlock] {
        &self.blocks
    }

    /// Current translation relative to where the voxels were removed.
    pub fn offset(&self) -> Vec3 {
        self.position - self.origin
    }

    fn average_color(&self) -> Rgb {
        let n = self.blocks.len().max(1) as u32;
        let (r, g, b) = self.blocks.iter().fold((0u32, 0u32, 0u32), |acc, blk| {
            (
                acc.0 + blk.color.r as u32,
                acc.1 + blk.color.g as u32,
                acc.2 + blk.color.b as u32,
            )
        });
        Rgb::new((r / n) as u8, (g / n) as u8, (b / n) as u8)
    }
}

impl TransientObject for FallingBlocks {
    fn update(&mut self, dt: f32, ctx: &mut WorldCtx<'_>) -> ObjectStatus {
        self.age += dt;
        if self.age > MAX_FALL_SECS {
            tracing::trace!("falling cluster of {} blocks never landed", self.blocks.len());
            return ObjectStatus::Finished;
        }

        self.fall_speed += GRAVITY * dt;
        let next = self.position + Vec3::new(0.0, 0.0, self.fall_speed * dt);

        let below = (next + Vec3::new(0.0, 0.0, 0.5)).floor().as_ivec3();
        if ctx.map.is_solid(below) {
            ctx.spawned.push(Box::new(DebrisGroup::new(
                self.position,
                self.average_color(),
                LANDING_BURST_SECS,
                self.blocks.len().min(12),
            )));
            return ObjectStatus::Finished;
        }

        self.position = next;
        ObjectStatus::Alive
    }

    fn tag(&self) -> ObjectTag {
        ObjectTag::FallingBlocks
    }
}

// ---------------------------------------------------------------------------
// DebrisGroup
// ---------------------------------------------------------------------------

/// One particle of a [`DebrisGroup`].
#[derive(Debug, Clone, Copy)]
pub struct Particle {
    /// Current position.
    pub position: Vec3,
    velocity: Vec3,
}

/// A short-lived burst of small particles, spawned at damaged block faces
/// and where falling clusters land.
pub struct DebrisGroup {
    particles: Vec<Particle>,
    color: Rgb,
    remaining: f32,
}

impl DebrisGroup {
    /// Spawn `count` particles at `origin` with a deterministic angular
    /// spread.
    pub fn new(origin: Vec3, color: Rgb, lifetime: f32, count: usize) -> Self {
        let particles = (0..count)
            .map(|i| {
                let angle = i as f32 * SPREAD_ANGLE;
                let speed = 1.5 + (i % 3) as f32;
                Particle {
                    position: origin,
                    velocity: Vec3::new(
                        angle.cos() * speed,
                        angle.sin() * speed,
                        -3.0 - (i % 2) as f32,
                    ),
                }
            })
            .collect();
        Self {
            particles,
            color,
            remaining: lifetime,
        }
    }

    /// Particle positions, for rendering.
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Tint of the burst.
    pub fn color(&self) -> Rgb {
        self.color
    }
}

impl TransientObject for DebrisGroup {
    fn update(&mut self, dt: f32, _ctx: &mut WorldCtx<'_>) -> ObjectStatus {
        self.remaining -= dt;
        if self.remaining <= 0.0 {
            return ObjectStatus::Finished;
        }
        for p in &mut self.particles {
            p.velocity.z += GRAVITY * dt;
            p.position += p.velocity * dt;
        }
        ObjectStatus::Alive
    }

    fn tag(&self) -> ObjectTag {
        ObjectTag::Debris
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::EffectQueue;
    use crate::objects::ObjectSet;
    use crate::store::MemoryMap;
    use glam::IVec3;

    fn removed(positions: &[(i32, i32, i32)]) -> Vec<RemovedBlock> {
        positions
            .iter()
            .map(|&(x, y, z)| RemovedBlock {
                position: IVec3::new(x, y, z),
                color: Rgb::new(100, 80, 60),
            })
            .collect()
    }

    #[test]
    fn test_cluster_lands_and_bursts_into_debris() {
        let mut map = MemoryMap::new();
        // Floor at z = 12 under the cluster.
        map.fill_box(IVec3::new(0, 0, 12), IVec3::new(20, 20, 12), Rgb::new(50, 50, 50));

        let mut set = ObjectSet::new();
        set.stage(Box::new(FallingBlocks::new(removed(&[
            (10, 10, 8),
            (10, 10, 9),
            (10, 10, 10),
        ]))));

        let mut effects = EffectQueue::new();
        for _ in 0..200 {
            set.update(0.05, &mut map, &mut effects);
            if set.count(ObjectTag::Debris) > 0 {
                break;
            }
        }
        assert_eq!(set.count(ObjectTag::FallingBlocks), 0);
        assert_eq!(set.count(ObjectTag::Debris), 1);
    }

    #[test]
    fn test_cluster_over_void_times_out() {
        let mut map = MemoryMap::new();
        let mut set = ObjectSet::new();
        set.stage(Box::new(FallingBlocks::new(removed(&[(0, 0, 0)]))));

        let mut effects = EffectQueue::new();
        for _ in 0..120 {
            set.update(0.05, &mut map, &mut effects);
        }
        // 6 simulated seconds > MAX_FALL_SECS; gone without a burst.
        assert!(set.is_empty());
        assert_eq!(set.pending_len(), 0);
    }

    #[test]
    fn test_debris_expires_after_lifetime() {
        let mut map = MemoryMap::new();
        let mut set = ObjectSet::new();
        set.stage(Box::new(DebrisGroup::new(
            Vec3::new(1.0, 1.0, 1.0),
            Rgb::new(200, 10, 10),
            0.25,
            4,
        )));

        let mut effects = EffectQueue::new();
        set.update(0.1, &mut map, &mut effects);
        assert_eq!(set.len(), 1);
        set.update(0.1, &mut map, &mut effects);
        assert_eq!(set.len(), 1);
        set.update(0.1, &mut map, &mut effects);
        assert!(set.is_empty());
    }

    #[test]
    fn test_average_color() {
        let blocks = vec![
            RemovedBlock {
                position: IVec3::ZERO,
                color: Rgb::new(100, 0, 50),
            },
            RemovedBlock {
                position: IVec3::new(0, 0, 1),
                color: Rgb::new(200, 100, 50),
            },
        ];
        let cluster = FallingBlocks::new(blocks);
        assert_eq!(cluster.average_color(), Rgb::new(150, 50, 50));
    }
}
