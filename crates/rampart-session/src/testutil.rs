//! Shared fixtures for the session tests.

use glam::{IVec3, Vec3};
use rampart_protocol::packets::{CreatePlayer, Packet};
use rampart_protocol::{CtfState, GameMode, PlayerId, Rgb, StateData, TeamId, TeamInfo, WeaponKind};
use rampart_world::{MemoryMap, SideEffect};

use crate::outbox::OutboundPacket;
use crate::session::{GameSession, SessionOptions};

/// The pid assigned to the test client.
pub(crate) const SESSION_PID: PlayerId = PlayerId(7);

pub(crate) fn test_state() -> StateData {
    StateData {
        pid: SESSION_PID,
        fog_color: Rgb::new(128, 200, 255),
        team1: TeamInfo {
            name: "Blue".to_string(),
            color: Rgb::new(0, 0, 255),
        },
        team2: TeamInfo {
            name: "Green".to_string(),
            color: Rgb::new(0, 255, 0),
        },
        mode: GameMode::Ctf(CtfState {
            team1_base: Vec3::new(64.0, 256.0, 50.0),
            team2_base: Vec3::new(448.0, 256.0, 50.0),
            team1_flag: Vec3::new(80.0, 256.0, 50.0),
            team2_flag: Vec3::new(432.0, 256.0, 50.0),
            team1_carrier: None,
            team2_carrier: None,
            team1_score: 0,
            team2_score: 0,
            cap_limit: 10,
        }),
    }
}

pub(crate) fn session_with_map(map: MemoryMap) -> GameSession {
    GameSession::new(test_state(), SessionOptions::default(), Box::new(map))
}

/// A session over an empty (all-air) map.
pub(crate) fn connected_session() -> GameSession {
    session_with_map(MemoryMap::new())
}

/// A session over a solid 11³ box spanning (5,5,5)..(15,15,15).
pub(crate) fn session_with_box() -> GameSession {
    let mut map = MemoryMap::new();
    map.fill_box(IVec3::new(5, 5, 5), IVec3::new(15, 15, 15), Rgb::new(90, 90, 90));
    session_with_map(map)
}

/// Spawn a player via the normal CreatePlayer path.
pub(crate) fn spawn_player(session: &mut GameSession, pid: u8, team: TeamId, name: &str) {
    session.handle_packet(Packet::CreatePlayer(CreatePlayer {
        pid: PlayerId(pid),
        weapon: WeaponKind::Rifle,
        team,
        position: Vec3::new(100.0, 100.0, 30.0),
        name: name.to_string(),
    }));
}

/// Spawn the session's own player, binding the local alias.
pub(crate) fn spawn_local(session: &mut GameSession) {
    spawn_player(session, SESSION_PID.0, TeamId::Team1, "Deuce");
}

pub(crate) fn drain_packets(session: &mut GameSession) -> Vec<OutboundPacket> {
    session.outbox_mut().drain()
}

pub(crate) fn drain_effects(session: &mut GameSession) -> Vec<SideEffect> {
    session.effects_mut().drain()
}
