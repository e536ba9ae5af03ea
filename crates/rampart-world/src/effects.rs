//! Side-effect requests emitted by the session core.
//!
//! The core never talks to the sound device, HUD, or environment directly;
//! it pushes [`SideEffect`] values into an [`EffectQueue`] that the
//! embedding shell drains once per frame. This is the narrow interface
//! between the protocol state machine and its presentation collaborators.

use glam::Vec3;
use rampart_protocol::{KillKind, Rgb};

// ---------------------------------------------------------------------------
// SoundCue
// ---------------------------------------------------------------------------

/// Semantic sound cues; the shell maps them onto actual assets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    /// Session-start sting.
    Intro,
    /// A block was placed.
    Build,
    /// The local player was hit.
    HitConfirm,
    /// Intel picked up / captured.
    IntelPickup,
    /// Game-winning capture.
    Victory,
    /// Grenade detonation.
    Explosion,
    /// Grenade bouncing off the map.
    GrenadeBounce,
}

// ---------------------------------------------------------------------------
// SideEffect
// ---------------------------------------------------------------------------

/// A single request to an external collaborator.
#[derive(Debug, Clone, PartialEq)]
pub enum SideEffect {
    /// Play a sound; `position` is `None` for local-only (non-positional)
    /// playback.
    Sound {
        /// Which cue.
        cue: SoundCue,
        /// World position, if positional.
        position: Option<Vec3>,
    },
    /// Append a chat line.
    Chat {
        /// Rendered text.
        text: String,
        /// Normalized RGB tint.
        color: [f32; 3],
    },
    /// Append a killfeed entry.
    Killfeed {
        /// Killer display name.
        killer: String,
        /// Victim display name.
        victim: String,
        /// Cause of death.
        kind: KillKind,
    },
    /// Show a large centered banner.
    Banner {
        /// Banner text.
        text: String,
    },
    /// Flash the directional hit indicator.
    HitIndicator {
        /// World position the damage came from.
        source: Vec3,
    },
    /// Start the respawn countdown display.
    RespawnCountdown {
        /// Seconds until respawn.
        seconds: u8,
    },
    /// Update the environment fog color.
    FogColor {
        /// New color.
        color: Rgb,
    },
}

// ---------------------------------------------------------------------------
// EffectQueue
// ---------------------------------------------------------------------------

/// Accumulates side-effect requests until the shell drains them.
#[derive(Debug, Default)]
pub struct EffectQueue {
    items: Vec<SideEffect>,
}

impl EffectQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue a request.
    pub fn push(&mut self, effect: SideEffect) {
        self.items.push(effect);
    }

    /// Remove and return all pending requests in emission order.
    pub fn drain(&mut self) -> Vec<SideEffect> {
        std::mem::take(&mut self.items)
    }

    /// Peek at pending requests without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &SideEffect> {
        self.items.iter()
    }

    /// Number of pending requests.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_preserves_order_and_empties() {
        let mut q = EffectQueue::new();
        q.push(SideEffect::Banner {
            text: "first".to_string(),
        });
        q.push(SideEffect::Sound {
            cue: SoundCue::Victory,
            position: None,
        });
        assert_eq!(q.len(), 2);

        let drained = q.drain();
        assert!(matches!(&drained[0], SideEffect::Banner { text } if text == "first"));
        assert!(matches!(
            drained[1],
            SideEffect::Sound {
                cue: SoundCue::Victory,
                position: None
            }
        ));
        assert!(q.is_empty());
    }
}
