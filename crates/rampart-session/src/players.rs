//! The player registry: every known player keyed by pid, plus the
//! pending-color side table for colors announced before their player is
//! first seen.

use std::collections::BTreeMap;

use rampart_protocol::{PlayerId, Rgb};

use crate::player::Player;

/// Owns all known players. Keys are unique by construction; iteration is in
/// ascending pid order so derived lists (rosters, scoreboards) are
/// deterministic.
#[derive(Debug, Default)]
pub struct PlayerRegistry {
    players: BTreeMap<u8, Player>,
    /// Colors announced for pids not seen yet (spectators, ordering races).
    /// Merged into the entry when the pid is first created.
    pending_colors: BTreeMap<u8, Rgb>,
}

impl PlayerRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a player. Out-of-range pids resolve to `None`.
    pub fn get(&self, pid: PlayerId) -> Option<&Player> {
        self.players.get(&pid.0)
    }

    /// Mutable lookup.
    pub fn get_mut(&mut self, pid: PlayerId) -> Option<&mut Player> {
        self.players.get_mut(&pid.0)
    }

    /// Look up a player, creating the entry on first reference. Returns
    /// `None` for out-of-range pids, which are never registry keys.
    ///
    /// A pending color recorded for this pid is consumed and applied to the
    /// new entry.
    pub fn get_or_create(&mut self, pid: PlayerId) -> Option<&mut Player> {
        if !pid.is_valid() {
            return None;
        }
        let pending = self.pending_colors.remove(&pid.0);
        Some(self.players.entry(pid.0).or_insert_with(|| {
            let mut ply = Player::new(pid);
            if let Some(color) = pending {
                ply.color = color;
            }
            ply
        }))
    }

    /// Remove a player, returning its final state.
    pub fn remove(&mut self, pid: PlayerId) -> Option<Player> {
        self.players.remove(&pid.0)
    }

    /// Record a color for a pid that has no entry yet.
    pub fn remember_color(&mut self, pid: PlayerId, color: Rgb) {
        self.pending_colors.insert(pid.0, color);
    }

    /// Block color to use for a builder with no registry entry: the
    /// remembered color if one was announced, the default otherwise.
    pub fn color_for_unknown(&self, pid: PlayerId) -> Rgb {
        self.pending_colors
            .get(&pid.0)
            .copied()
            .unwrap_or(Rgb::DEFAULT_BLOCK)
    }

    /// Returns `true` if a pending color is recorded for `pid`.
    pub fn has_pending_color(&self, pid: PlayerId) -> bool {
        self.pending_colors.contains_key(&pid.0)
    }

    /// Players in ascending pid order.
    pub fn iter(&self) -> impl Iterator<Item = &Player> {
        self.players.values()
    }

    /// Mutable iteration in ascending pid order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Player> {
        self.players.values_mut()
    }

    /// Number of known players.
    pub fn len(&self) -> usize {
        self.players.len()
    }

    /// Returns `true` if no players are known.
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_once_per_pid() {
        let mut reg = PlayerRegistry::new();
        reg.get_or_create(PlayerId(3)).unwrap().kills = 5;
        // Second reference resolves the same entry.
        assert_eq!(reg.get_or_create(PlayerId(3)).unwrap().kills, 5);
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn test_out_of_range_pid_never_creates() {
        let mut reg = PlayerRegistry::new();
        assert!(reg.get_or_create(PlayerId(32)).is_none());
        assert!(reg.get_or_create(PlayerId(255)).is_none());
        assert!(reg.is_empty());
    }

    #[test]
    fn test_pending_color_merged_on_first_sighting() {
        let mut reg = PlayerRegistry::new();
        let teal = Rgb::new(0, 160, 160);
        reg.remember_color(PlayerId(9), teal);
        assert_eq!(reg.color_for_unknown(PlayerId(9)), teal);

        let ply = reg.get_or_create(PlayerId(9)).unwrap();
        assert_eq!(ply.color, teal);
        // Consumed by the merge.
        assert!(!reg.has_pending_color(PlayerId(9)));
        assert_eq!(reg.color_for_unknown(PlayerId(9)), Rgb::DEFAULT_BLOCK);
    }

    #[test]
    fn test_unknown_color_falls_back_to_default() {
        let reg = PlayerRegistry::new();
        assert_eq!(reg.color_for_unknown(PlayerId(40)), Rgb::DEFAULT_BLOCK);
    }

    #[test]
    fn test_remove_invalidates_lookup() {
        let mut reg = PlayerRegistry::new();
        reg.get_or_create(PlayerId(1));
        assert!(reg.remove(PlayerId(1)).is_some());
        assert!(reg.get(PlayerId(1)).is_none());
        assert!(reg.remove(PlayerId(1)).is_none());
    }

    #[test]
    fn test_iteration_is_pid_ordered() {
        let mut reg = PlayerRegistry::new();
        for pid in [7u8, 2, 30, 0] {
            reg.get_or_create(PlayerId(pid));
        }
        let pids: Vec<u8> = reg.iter().map(|p| p.pid.0).collect();
        assert_eq!(pids, vec![0, 2, 7, 30]);
    }
}
