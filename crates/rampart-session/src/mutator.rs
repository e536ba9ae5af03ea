//! The voxel map mutation façade: build/destroy/damage with the
//! predict/confirm split.
//!
//! Predicted edits only send the outbound request — the server is the
//! authority and its echoed packet is what mutates the local map
//! (confirmed). Grenade craters are the exception: they are simulated
//! locally by the grenade object, which calls the confirmed path directly.

use glam::{IVec3, Vec3};
use rampart_protocol::{BlockActionKind, Rgb};
use rampart_world::{
    DebrisGroup, DestroyKind, Face, FallingBlocks, SideEffect, SoundCue, destroy_voxels,
};

use crate::session::GameSession;

/// Lifetime of the debris burst spawned at a damaged block face.
const FACE_DEBRIS_SECS: f32 = 0.25;

/// Particles in a face-damage debris burst.
const FACE_DEBRIS_COUNT: usize = 4;

/// Whether an edit is a client-side request or a server-confirmed mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditMode {
    /// Send the outbound request; no local mutation.
    Predicted,
    /// Apply the mutation locally.
    Confirmed,
}

impl GameSession {
    /// Place a block at `pos`.
    ///
    /// Predicted mode sends a BlockAction and returns `false`; confirmed
    /// mode mutates the map (with a build sound cue) and reports whether a
    /// block was actually placed.
    pub fn build_point(&mut self, pos: IVec3, color: Rgb, mode: EditMode) -> bool {
        match mode {
            EditMode::Predicted => {
                self.send_block_action(pos, BlockActionKind::Build);
                false
            }
            EditMode::Confirmed => {
                self.effects.push(SideEffect::Sound {
                    cue: SoundCue::Build,
                    position: Some(pos.as_vec3() + Vec3::splat(0.5)),
                });
                self.map.build(pos, color)
            }
        }
    }

    /// Destroy blocks at `pos` with the geometry of `action`.
    ///
    /// Predicted mode sends the request and returns `false`. Confirmed mode
    /// removes the covered voxels and, if any were removed, stages a
    /// falling-blocks object; returns whether anything was removed.
    pub fn destroy_point(&mut self, pos: IVec3, action: BlockActionKind, mode: EditMode) -> bool {
        if mode == EditMode::Predicted {
            self.send_block_action(pos, action);
            return false;
        }

        let Some(kind) = DestroyKind::from_action(action) else {
            return false;
        };
        let removed = destroy_voxels(&mut *self.map, pos, kind);
        if removed.is_empty() {
            return false;
        }
        self.objects.stage(Box::new(FallingBlocks::new(removed)));
        true
    }

    /// Chip `amount` integrity off the block at `pos`.
    ///
    /// A known `face` stages a debris burst regardless of the damage
    /// outcome. When the map reports zero integrity and `allow_destroy` is
    /// set, the block is destroyed (confirmed) and `true` is returned.
    pub fn damage_point(
        &mut self,
        pos: IVec3,
        amount: u8,
        face: Option<Face>,
        allow_destroy: bool,
    ) -> bool {
        if let Some(face) = face {
            let color = self.map.color_at(pos).unwrap_or(Rgb::DEFAULT_BLOCK);
            self.objects.stage(Box::new(DebrisGroup::new(
                face.center(pos),
                color,
                FACE_DEBRIS_SECS,
                FACE_DEBRIS_COUNT,
            )));
        }

        if amount > 0 && self.map.damage(pos, amount) && allow_destroy {
            self.destroy_point(pos, BlockActionKind::Destroy, EditMode::Confirmed);
            return true;
        }
        false
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
