//! The game session: owns all registries and world state, drives the
//! per-frame update in a fixed order, and tracks the local-player alias.

use glam::Vec3;
use rampart_protocol::{ConnectionState, GameMode, PlayerId, StateData, TeamId, WeaponKind};
use rampart_world::{EffectQueue, MapStore, ObjectSet, SideEffect, SoundCue};

use crate::entity::EntityRegistry;
use crate::outbox::Outbox;
use crate::player::Player;
use crate::players::PlayerRegistry;
use crate::scheduler::{
    Delay, HANDSHAKE_DELAY, Interval, ORIENTATION_REPORT_INTERVAL, POSITION_REPORT_INTERVAL,
};
use crate::team::TeamRegistry;

// ---------------------------------------------------------------------------
// CameraRig
// ---------------------------------------------------------------------------

/// Narrow interface to the external camera: advanced between the scheduler
/// pass and the player pass, with the view matrix refreshed once players
/// have moved.
pub trait CameraRig {
    /// Advance camera motion by `dt` seconds.
    fn update(&mut self, dt: f32);

    /// Recompute the view from the updated camera state.
    fn update_view(&mut self);
}

/// Camera stub for headless shells and tests.
pub struct NoCamera;

impl CameraRig for NoCamera {
    fn update(&mut self, _dt: f32) {}

    fn update_view(&mut self) {}
}

// ---------------------------------------------------------------------------
// SessionOptions
// ---------------------------------------------------------------------------

/// Local join preferences, taken from configuration.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Display name sent in the handshake.
    pub player_name: String,
    /// Requested team.
    pub team: TeamId,
    /// Requested weapon.
    pub weapon: WeaponKind,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            player_name: "Deuce".to_string(),
            team: TeamId::Team1,
            weapon: WeaponKind::Rifle,
        }
    }
}

// ---------------------------------------------------------------------------
// GameSession
// ---------------------------------------------------------------------------

/// Client-side session state: players, teams, entities, transient objects,
/// the map mutation façade, and the outbound/effect queues.
pub struct GameSession {
    pub(crate) session_pid: PlayerId,
    pub(crate) options: SessionOptions,
    pub(crate) players: PlayerRegistry,
    pub(crate) teams: TeamRegistry,
    pub(crate) entities: EntityRegistry,
    pub(crate) objects: ObjectSet,
    pub(crate) map: Box<dyn MapStore>,
    pub(crate) outbox: Outbox,
    pub(crate) effects: EffectQueue,
    /// Non-owning alias of the locally controlled player. Always refers to
    /// a live registry entry or is `None`.
    pub(crate) local_pid: Option<PlayerId>,
    mode: GameMode,
    position_report: Interval,
    orientation_report: Interval,
    handshake: Option<Delay>,
    connection: ConnectionState,
    map_transfer_requested: bool,
}

impl GameSession {
    /// Build a session from the post-load state and the external map store.
    ///
    /// Emits the initial fog-color effect and populates the mode entity
    /// set.
    pub fn new(state: StateData, options: SessionOptions, map: Box<dyn MapStore>) -> Self {
        let mut session = Self {
            session_pid: state.pid,
            options,
            players: PlayerRegistry::new(),
            teams: TeamRegistry::new(state.team1, state.team2),
            entities: EntityRegistry::new(),
            objects: ObjectSet::new(),
            map,
            outbox: Outbox::new(),
            effects: EffectQueue::new(),
            local_pid: None,
            mode: state.mode,
            position_report: Interval::new(POSITION_REPORT_INTERVAL),
            orientation_report: Interval::new(ORIENTATION_REPORT_INTERVAL),
            handshake: None,
            connection: ConnectionState::Connected,
            map_transfer_requested: false,
        };
        session.effects.push(SideEffect::FogColor {
            color: state.fog_color,
        });
        session.respawn_entities();
        session
    }

    /// Session start: intro sting, then the join handshake after a short
    /// delay.
    pub fn start(&mut self) {
        self.effects.push(SideEffect::Sound {
            cue: SoundCue::Intro,
            position: None,
        });
        self.handshake = Some(Delay::new(HANDSHAKE_DELAY));
    }

    /// Rebuild the mode entity set and team scores from the stored mode
    /// state.
    pub fn respawn_entities(&mut self) {
        self.entities.respawn(&self.mode);
        if let GameMode::Ctf(ctf) = self.mode {
            let t1 = self.teams.get_mut(TeamId::Team1);
            t1.score = ctf.team1_score;
            t1.score_cap = ctf.cap_limit;
            let t2 = self.teams.get_mut(TeamId::Team2);
            t2.score = ctf.team2_score;
            t2.score_cap = ctf.cap_limit;
        }
    }

    /// Per-frame driver. Order is fixed: rosters, scheduled senders,
    /// camera, players, camera view, entities, then the transient-object
    /// pass (which drains the staging queue first).
    pub fn update(&mut self, dt: f32, camera: &mut dyn CameraRig) {
        self.teams.refresh(&self.players);

        let handshake_due = self.handshake.as_mut().is_some_and(|d| d.tick(dt));
        if handshake_due {
            self.send_handshake();
        }
        for _ in 0..self.position_report.tick(dt) {
            self.send_position_update();
        }
        for _ in 0..self.orientation_report.tick(dt) {
            self.send_orientation_update();
        }

        camera.update(dt);
        for ply in self.players.iter_mut() {
            ply.update(dt);
        }
        camera.update_view();

        self.entities.update(dt, &self.players);
        self.objects.update(dt, &mut *self.map, &mut self.effects);
    }

    /// Connection-state transition callback from the transport. A
    /// `MapTransfer` transition raises the hand-off flag for the embedding
    /// shell.
    pub fn on_connection_state(&mut self, state: ConnectionState) {
        tracing::info!(?state, "connection state changed");
        self.connection = state;
        if state == ConnectionState::MapTransfer {
            self.map_transfer_requested = true;
        }
    }

    // -- accessors ----------------------------------------------------------

    /// The pid assigned to this client at session start.
    pub fn session_pid(&self) -> PlayerId {
        self.session_pid
    }

    /// The local player's pid, once CreatePlayer has bound it.
    pub fn local_pid(&self) -> Option<PlayerId> {
        self.local_pid
    }

    /// Returns `true` if `pid` names the locally controlled player.
    pub fn is_local(&self, pid: PlayerId) -> bool {
        self.local_pid == Some(pid)
    }

    /// The locally controlled player, resolved through the registry.
    pub fn local_player(&self) -> Option<&Player> {
        self.players.get(self.local_pid?)
    }

    /// All known players.
    pub fn players(&self) -> &PlayerRegistry {
        &self.players
    }

    /// Both teams.
    pub fn teams(&self) -> &TeamRegistry {
        &self.teams
    }

    /// Mode entities.
    pub fn entities(&self) -> &EntityRegistry {
        &self.entities
    }

    /// Live transient objects.
    pub fn objects(&self) -> &ObjectSet {
        &self.objects
    }

    /// The map store.
    pub fn map(&self) -> &dyn MapStore {
        &*self.map
    }

    /// Pending side effects; the shell drains these each frame.
    pub fn effects_mut(&mut self) -> &mut EffectQueue {
        &mut self.effects
    }

    /// Queued outbound packets; the transport drains these each frame.
    pub fn outbox_mut(&mut self) -> &mut Outbox {
        &mut self.outbox
    }

    /// Last reported connection state.
    pub fn connection_state(&self) -> ConnectionState {
        self.connection
    }

    /// Returns `true` once a map transfer has been requested by the server.
    pub fn map_transfer_requested(&self) -> bool {
        self.map_transfer_requested
    }

    /// Forward vector + velocity of the local player, used for grenade
    /// throws.
    pub(crate) fn local_throw_velocity(&self) -> Option<(Vec3, Vec3)> {
        let ply = self.local_player()?;
        Some((ply.position, ply.orientation + ply.velocity))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
