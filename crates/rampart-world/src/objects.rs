//! Short-lived simulated world objects and their owning set.
//!
//! Objects created from inside packet handlers or map mutations are staged
//! in a pending queue and moved into the live set once per frame, before
//! that frame's update pass, so the live list is never structurally mutated
//! while objects may be mid-update.

use crate::effects::EffectQueue;
use crate::store::MapStore;

/// Downward acceleration applied to simulated objects, in voxels per
/// second squared (`z` grows downward).
pub const GRAVITY: f32 = 32.0;

// ---------------------------------------------------------------------------
// TransientObject
// ---------------------------------------------------------------------------

/// Outcome of one object update step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectStatus {
    /// Keep simulating.
    Alive,
    /// Done; the set destroys the object after this pass.
    Finished,
}

/// Coarse object category, for diagnostics and shell-side rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectTag {
    /// A live grenade.
    Grenade,
    /// A falling cluster of removed voxels.
    FallingBlocks,
    /// A burst of debris particles.
    Debris,
}

/// World access handed to each object during its update step.
pub struct WorldCtx<'a> {
    /// The voxel store.
    pub map: &'a mut dyn MapStore,
    /// Side-effect requests (sounds etc.).
    pub effects: &'a mut EffectQueue,
    /// Objects spawned during this pass; staged for the next frame.
    pub spawned: &'a mut Vec<Box<dyn TransientObject>>,
}

/// A simulated object owned exclusively by the [`ObjectSet`] from creation
/// until the frame its update reports [`ObjectStatus::Finished`].
pub trait TransientObject {
    /// Advance the simulation by `dt` seconds.
    fn update(&mut self, dt: f32, ctx: &mut WorldCtx<'_>) -> ObjectStatus;

    /// The object's category.
    fn tag(&self) -> ObjectTag;
}

// ---------------------------------------------------------------------------
// ObjectSet
// ---------------------------------------------------------------------------

/// Owns all live transient objects plus the staging queue for newly created
/// ones.
#[derive(Default)]
pub struct ObjectSet {
    live: Vec<Box<dyn TransientObject>>,
    pending: Vec<Box<dyn TransientObject>>,
}

impl ObjectSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage a newly created object; it joins the live set at the next
    /// [`update`](Self::update).
    pub fn stage(&mut self, object: Box<dyn TransientObject>) {
        self.pending.push(object);
    }

    /// Number of live objects.
    pub fn len(&self) -> usize {
        self.live.len()
    }

    /// Returns `true` if no objects are live.
    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// Number of staged-but-not-yet-live objects.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Count live objects with the given tag.
    pub fn count(&self, tag: ObjectTag) -> usize {
        self.live.iter().filter(|o| o.tag() == tag).count()
    }

    /// Drain the pending queue into the live set, then advance every live
    /// object, removing those that report finished without skipping or
    /// double-visiting the rest.
    pub fn update(&mut self, dt: f32, map: &mut dyn MapStore, effects: &mut EffectQueue) {
        while let Some(object) = self.pending.pop() {
            self.live.push(object);
        }

        let mut spawned: Vec<Box<dyn TransientObject>> = Vec::new();
        self.live.retain_mut(|object| {
            let mut ctx = WorldCtx {
                map: &mut *map,
                effects: &mut *effects,
                spawned: &mut spawned,
            };
            object.update(dt, &mut ctx) == ObjectStatus::Alive
        });

        // Objects spawned mid-pass wait in the staging queue until the next
        // frame, like any other creation.
        self.pending.append(&mut spawned);
    }
}
