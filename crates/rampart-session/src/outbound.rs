//! The outbound message builder: turns local intent into packets.
//!
//! Periodic position/orientation reports are driven by the frame
//! orchestrator's cadence timers and go out unsequenced — staleness is
//! acceptable, latency is not. Everything else is on-demand and sequenced.

use glam::IVec3;
use rampart_protocol::packets::{
    BlockAction, BlockLine, ChangeTeam, ChangeWeapon, ExistingPlayer, GrenadePacket, InputData,
    OrientationData, Packet, PositionData, WeaponInput,
};
use rampart_protocol::{BlockActionKind, Rgb, TeamId, Tool, WeaponKind};

use crate::session::GameSession;

impl GameSession {
    /// Request a block edit at `pos`. Grenade-typed actions are never sent:
    /// the server learns about grenades from the grenade packet and every
    /// client simulates the crater.
    pub fn send_block_action(&mut self, pos: IVec3, action: BlockActionKind) {
        if action == BlockActionKind::Grenade {
            return;
        }
        let pid = self.local_pid.unwrap_or(self.session_pid);
        self.outbox.send(Packet::BlockAction(BlockAction {
            pid,
            action,
            position: pos,
        }));
    }

    /// Request a block line from `start` to `end`.
    pub fn send_block_line(&mut self, start: IVec3, end: IVec3) {
        let pid = self.local_pid.unwrap_or(self.session_pid);
        self.outbox
            .send(Packet::BlockLine(BlockLine { pid, start, end }));
    }

    /// Periodic position report. No-op unless the local player exists and
    /// is alive.
    pub fn send_position_update(&mut self) {
        let Some(ply) = self.local_player() else {
            return;
        };
        if !ply.alive {
            return;
        }
        let position = ply.position;
        self.outbox
            .send_unsequenced(Packet::PositionData(PositionData { position }));
    }

    /// Periodic orientation report. Same liveness rule as positions.
    pub fn send_orientation_update(&mut self) {
        let Some(ply) = self.local_player() else {
            return;
        };
        if !ply.alive {
            return;
        }
        let orientation = ply.orientation;
        self.outbox
            .send_unsequenced(Packet::OrientationData(OrientationData { orientation }));
    }

    /// On-demand movement + fire intent report (two packets, as the
    /// protocol splits them).
    pub fn send_input_update(&mut self) {
        let Some(ply) = self.local_player() else {
            return;
        };
        if !ply.alive {
            return;
        }
        let pid = ply.pid;
        let input = ply.input;
        let crouch = ply.crouching();
        let (primary, secondary) = (ply.primary_fire, ply.secondary_fire);

        self.outbox.send(Packet::InputData(InputData {
            pid,
            forward: input.forward,
            back: input.back,
            left: input.left,
            right: input.right,
            jump: input.jump,
            crouch,
            sneak: input.sneak,
            sprint: input.sprint,
        }));
        self.outbox.send(Packet::WeaponInput(WeaponInput {
            pid,
            primary,
            secondary,
        }));
    }

    /// Throw a grenade with the given fuse: current position, forward plus
    /// current velocity.
    pub fn send_grenade(&mut self, fuse: f32) {
        let Some(ply) = self.local_player() else {
            return;
        };
        if !ply.alive {
            return;
        }
        let pid = ply.pid;
        let Some((position, velocity)) = self.local_throw_velocity() else {
            return;
        };
        self.outbox.send(Packet::GrenadePacket(GrenadePacket {
            pid,
            position,
            velocity,
            fuse,
        }));
    }

    /// Request a team change.
    pub fn send_team_change(&mut self, team: TeamId) {
        self.outbox.send(Packet::ChangeTeam(ChangeTeam { team }));
    }

    /// Request a weapon change.
    pub fn send_weapon_change(&mut self, weapon: WeaponKind) {
        self.outbox
            .send(Packet::ChangeWeapon(ChangeWeapon { weapon }));
    }

    /// The join handshake: name plus requested team and weapon. Sent once
    /// per session start by the orchestrator.
    pub fn send_handshake(&mut self) {
        self.outbox.send(Packet::ExistingPlayer(ExistingPlayer {
            pid: self.session_pid,
            team: self.options.team,
            weapon: self.options.weapon,
            tool: Tool::Weapon,
            kills: 0,
            color: Rgb::DEFAULT_BLOCK,
            name: self.options.player_name.clone(),
        }));
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
