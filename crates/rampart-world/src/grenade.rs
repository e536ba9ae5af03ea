//! Client-simulated grenade.
//!
//! Grenades are announced by the server but their flight and detonation are
//! simulated locally; the explosion performs a confirmed grenade destroy so
//! every client converges on the same crater.

use glam::Vec3;

use crate::debris::FallingBlocks;
use crate::destruction::{DestroyKind, destroy_voxels};
use crate::effects::{SideEffect, SoundCue};
use crate::objects::{GRAVITY, ObjectStatus, ObjectTag, TransientObject, WorldCtx};

/// Velocity retained (and inverted) on each bounce axis.
const BOUNCE_DAMPING: f32 = 0.36;

/// Minimum speed for a bounce to make a sound.
const BOUNCE_SOUND_SPEED: f32 = 0.5;

/// A thrown grenade in flight.
pub struct Grenade {
    position: Vec3,
    velocity: Vec3,
    fuse: f32,
}

impl Grenade {
    /// Create a grenade at `position` with the given initial `velocity` and
    /// `fuse` seconds until detonation.
    pub fn new(position: Vec3, velocity: Vec3, fuse: f32) -> Self {
        Self {
            position,
            velocity,
            fuse,
        }
    }

    /// Current position.
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Seconds left on the fuse.
    pub fn fuse(&self) -> f32 {
        self.fuse
    }

    fn explode(&self, ctx: &mut WorldCtx<'_>) {
        let cell = self.position.floor().as_ivec3();
        let removed = destroy_voxels(ctx.map, cell, DestroyKind::Grenade);
        tracing::trace!("grenade detonated at {cell}, {} voxels removed", removed.len());
        if !removed.is_empty() {
            ctx.spawned.push(Box::new(FallingBlocks::new(removed)));
        }
        ctx.effects.push(SideEffect::Sound {
            cue: SoundCue::Explosion,
            position: Some(self.position),
        });
    }
}

impl TransientObject for Grenade {
    fn update(&mut self, dt: f32, ctx: &mut WorldCtx<'_>) -> ObjectStatus {
        self.fuse -= dt;
        if self.fuse <= 0.0 {
            self.explode(ctx);
            return ObjectStatus::Finished;
        }

        self.velocity.z += GRAVITY * dt;

        // Axis-wise movement: a blocked axis bounces, the others keep
        // sliding along the surface.
        let mut bounced = false;
        for axis in 0..3 {
            let mut next = self.position;
            next[axis] += self.velocity[axis] * dt;
            if ctx.map.is_solid(next.floor().as_ivec3()) {
                self.velocity[axis] = -self.velocity[axis] * BOUNCE_DAMPING;
                bounced = true;
            } else {
                self.position = next;
            }
        }

        if bounced && self.velocity.length() > BOUNCE_SOUND_SPEED {
            ctx.effects.push(SideEffect::Sound {
                cue: SoundCue::GrenadeBounce,
                position: Some(self.position),
            });
        }

        ObjectStatus::Alive
    }

    fn tag(&self) -> ObjectTag {
        ObjectTag::Grenade
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::EffectQueue;
    use crate::objects::ObjectSet;
    use crate::store::{MapStore, MemoryMap};
    use glam::IVec3;
    use rampart_protocol::Rgb;

    #[test]
    fn test_grenade_falls_under_gravity() {
        let mut set = ObjectSet::new();
        set.stage(Box::new(Grenade::new(Vec3::new(10.0, 10.0, 0.0), Vec3::ZERO, 10.0)));

        let mut map = MemoryMap::new();
        let mut effects = EffectQueue::new();
        for _ in 0..10 {
            set.update(0.1, &mut map, &mut effects);
        }
        // Long fuse: still alive after a second of free fall.
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_explosion_removes_neighborhood_and_stages_debris() {
        let mut map = MemoryMap::new();
        map.fill_box(IVec3::new(8, 8, 8), IVec3::new(12, 12, 12), Rgb::new(90, 90, 90));

        let mut set = ObjectSet::new();
        // Fuse shorter than one step: detonates on first update, in place.
        set.stage(Box::new(Grenade::new(
            Vec3::new(10.5, 10.5, 10.5),
            Vec3::ZERO,
            0.01,
        )));

        let mut effects = EffectQueue::new();
        set.update(0.1, &mut map, &mut effects);

        // 3×3×3 crater around (10, 10, 10).
        assert!(!map.is_solid(IVec3::new(10, 10, 10)));
        assert!(!map.is_solid(IVec3::new(9, 11, 10)));
        assert!(map.is_solid(IVec3::new(8, 8, 8)));

        // Exactly one falling-blocks object staged, plus the explosion cue.
        assert_eq!(set.pending_len(), 1);
        assert!(effects.iter().any(|e| matches!(
            e,
            SideEffect::Sound {
                cue: SoundCue::Explosion,
                ..
            }
        )));
    }

    #[test]
    fn test_explosion_in_air_stages_nothing() {
        let mut map = MemoryMap::new();
        let mut set = ObjectSet::new();
        set.stage(Box::new(Grenade::new(Vec3::new(5.0, 5.0, 5.0), Vec3::ZERO, 0.01)));

        let mut effects = EffectQueue::new();
        set.update(0.1, &mut map, &mut effects);

        assert_eq!(set.pending_len(), 0);
        assert_eq!(set.len(), 0);
    }

    #[test]
    fn test_bounce_inverts_velocity_axis() {
        let mut map = MemoryMap::new();
        // Floor directly below the grenade.
        map.fill_box(IVec3::new(0, 0, 10), IVec3::new(20, 20, 10), Rgb::new(50, 50, 50));

        let mut grenade = Grenade::new(Vec3::new(10.0, 10.0, 9.5), Vec3::new(0.0, 0.0, 8.0), 10.0);
        let mut effects = EffectQueue::new();
        let mut spawned = Vec::new();
        let mut ctx = WorldCtx {
            map: &mut map,
            effects: &mut effects,
            spawned: &mut spawned,
        };

        grenade.update(0.1, &mut ctx);
        assert!(grenade.velocity.z < 0.0, "bounce should invert the fall");
    }
}
