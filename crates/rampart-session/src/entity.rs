//! Game-mode entities: the CTF bases and flags.
//!
//! Entities are created as a set when the mode state arrives (or resets)
//! and mutated by capture/pickup/drop packets. Individual entities are never
//! destroyed; the whole set is replaced on a respawn.

use std::collections::BTreeMap;

use glam::Vec3;
use rampart_protocol::{EntityId, GameMode, PlayerId, TeamId};

use crate::players::PlayerRegistry;

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// A mode object: a base or a flag.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    /// Raw object id, as carried by MoveObject.
    pub id: u8,
    /// World position.
    pub position: Vec3,
    /// Owning-team state (`None` = neutral).
    pub team: Option<TeamId>,
    /// Player carrying this entity, if any (flags only).
    pub carrier: Option<PlayerId>,
}

// ---------------------------------------------------------------------------
// EntityRegistry
// ---------------------------------------------------------------------------

/// All mode entities, keyed by object id.
#[derive(Debug, Default)]
pub struct EntityRegistry {
    entities: BTreeMap<u8, Entity>,
}

impl EntityRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole set from the mode state. Modes this client does
    /// not track leave the set empty.
    pub fn respawn(&mut self, mode: &GameMode) {
        self.entities.clear();
        let GameMode::Ctf(ctf) = mode else {
            return;
        };

        let mut insert = |id: EntityId, position: Vec3, team: TeamId, carrier: Option<PlayerId>| {
            self.entities.insert(
                id.into(),
                Entity {
                    id: id.into(),
                    position,
                    team: Some(team),
                    carrier,
                },
            );
        };
        insert(EntityId::Team1Base, ctf.team1_base, TeamId::Team1, None);
        insert(EntityId::Team2Base, ctf.team2_base, TeamId::Team2, None);
        insert(
            EntityId::Team1Flag,
            ctf.team1_flag,
            TeamId::Team1,
            ctf.team1_carrier,
        );
        insert(
            EntityId::Team2Flag,
            ctf.team2_flag,
            TeamId::Team2,
            ctf.team2_carrier,
        );
    }

    /// Look up an entity by raw object id.
    pub fn get(&self, id: u8) -> Option<&Entity> {
        self.entities.get(&id)
    }

    /// Mutable lookup by raw object id.
    pub fn get_mut(&mut self, id: u8) -> Option<&mut Entity> {
        self.entities.get_mut(&id)
    }

    /// Mutable lookup of a well-known CTF entity.
    pub fn get_known_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(&id.into())
    }

    /// All entities in object-id order.
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }

    /// Number of entities in the active mode.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Returns `true` if the active mode has no tracked entities.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Per-frame advance: carried entities follow their carrier.
    pub fn update(&mut self, _dt: f32, players: &PlayerRegistry) {
        for ent in self.entities.values_mut() {
            if let Some(carrier) = ent.carrier
                && let Some(ply) = players.get(carrier)
                && ply.alive
            {
                ent.position = ply.position;
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rampart_protocol::CtfState;

    fn ctf_mode() -> GameMode {
        GameMode::Ctf(CtfState {
            team1_base: Vec3::new(10.0, 10.0, 32.0),
            team2_base: Vec3::new(500.0, 500.0, 32.0),
            team1_flag: Vec3::new(20.0, 20.0, 32.0),
            team2_flag: Vec3::new(490.0, 490.0, 32.0),
            team1_carrier: None,
            team2_carrier: Some(PlayerId(4)),
            team1_score: 0,
            team2_score: 0,
            cap_limit: 10,
        })
    }

    #[test]
    fn test_ctf_respawn_builds_four_entities() {
        let mut reg = EntityRegistry::new();
        reg.respawn(&ctf_mode());
        assert_eq!(reg.len(), 4);

        let flag = reg.get(EntityId::Team2Flag.into()).unwrap();
        assert_eq!(flag.team, Some(TeamId::Team2));
        assert_eq!(flag.carrier, Some(PlayerId(4)));
        assert_eq!(flag.position, Vec3::new(490.0, 490.0, 32.0));
    }

    #[test]
    fn test_untracked_mode_leaves_set_empty() {
        let mut reg = EntityRegistry::new();
        reg.respawn(&ctf_mode());
        reg.respawn(&GameMode::Other);
        assert!(reg.is_empty());
        assert!(reg.get(0).is_none());
    }

    #[test]
    fn test_carried_flag_follows_carrier() {
        let mut players = PlayerRegistry::new();
        let ply = players.get_or_create(PlayerId(4)).unwrap();
        ply.set_alive(true);
        ply.set_position(Vec3::new(77.0, 88.0, 30.0));

        let mut reg = EntityRegistry::new();
        reg.respawn(&ctf_mode());
        reg.update(0.016, &players);

        let flag = reg.get(EntityId::Team2Flag.into()).unwrap();
        assert_eq!(flag.position, Vec3::new(77.0, 88.0, 30.0));
        // Uncarried entities stay put.
        let base = reg.get(EntityId::Team1Base.into()).unwrap();
        assert_eq!(base.position, Vec3::new(10.0, 10.0, 32.0));
    }
}
