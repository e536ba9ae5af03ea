//! The packet router: one handler per packet kind, mutating the registries
//! and the map and emitting side-effect requests.
//!
//! No handler is permitted to abort processing of subsequent packets:
//! malformed *content* (missing pids, out-of-range values, ids from other
//! game modes) degrades to a no-op or a diagnostic, never an error. Only
//! structurally invalid payloads are rejected upstream, in the codec.

use rampart_protocol::packets::{
    BlockAction, BlockLine, ChatMessage, CreatePlayer, ExistingPlayer, FogColor, GrenadePacket,
    InputData, IntelCapture, IntelDrop, IntelPickup, KillAction, MoveObject, Packet, PlayerLeft,
    PositionData, Restock, SetColor, SetHP, SetTool, WeaponInput, WeaponReload, WorldUpdate,
};
use rampart_protocol::{
    BlockActionKind, ChatKind, DamageKind, EntityId, MAX_PLAYERS, PlayerId, Tool,
};
use rampart_world::{Grenade, SideEffect, SoundCue};

use crate::mutator::EditMode;
use crate::session::GameSession;

/// Kills awarded for capturing the intel.
const INTEL_CAPTURE_BONUS: u32 = 10;

/// Tint of system and intel chat lines.
const ALERT_COLOR: [f32; 3] = [1.0, 0.0, 0.0];

/// Tint of all-chat lines.
const ALL_CHAT_COLOR: [f32; 3] = [1.0, 1.0, 1.0];

impl GameSession {
    /// Dispatch one decoded packet. Unknown or currently-ignored kinds are
    /// a no-op for forward/mode compatibility.
    pub fn handle_packet(&mut self, packet: Packet) {
        match packet {
            Packet::CreatePlayer(p) => self.on_create_player(p),
            Packet::ExistingPlayer(p) => self.on_existing_player(p),
            Packet::WorldUpdate(p) => self.on_world_update(p),
            Packet::BlockAction(p) => self.on_block_action(p),
            Packet::BlockLine(p) => self.on_block_line(p),
            Packet::InputData(p) => self.on_input_data(p),
            Packet::KillAction(p) => self.on_kill_action(p),
            Packet::PositionData(p) => self.on_position_data(p),
            Packet::WeaponInput(p) => self.on_weapon_input(p),
            Packet::SetHP(p) => self.on_set_hp(p),
            Packet::GrenadePacket(p) => self.on_grenade(p),
            Packet::SetTool(p) => self.on_set_tool(p),
            Packet::SetColor(p) => self.on_set_color(p),
            Packet::ChatMessage(p) => self.on_chat_message(p),
            Packet::MoveObject(p) => self.on_move_object(p),
            Packet::PlayerLeft(p) => self.on_player_left(p),
            Packet::IntelCapture(p) => self.on_intel_capture(p),
            Packet::IntelPickup(p) => self.on_intel_pickup(p),
            Packet::IntelDrop(p) => self.on_intel_drop(p),
            Packet::Restock(p) => self.on_restock(p),
            Packet::FogColor(p) => self.on_fog_color(p),
            Packet::WeaponReload(p) => self.on_weapon_reload(p),
            // Territory-mode packets and client-to-server shapes arriving
            // inbound are no-ops.
            _ => {}
        }
    }

    fn on_create_player(&mut self, pkt: CreatePlayer) {
        let is_session_pid = pkt.pid == self.session_pid;
        let Some(ply) = self.players.get_or_create(pkt.pid) else {
            return;
        };
        ply.team = pkt.team;
        ply.name = pkt.name;
        ply.set_weapon(pkt.weapon);
        ply.tool = Tool::Weapon;
        ply.set_position(pkt.position);
        ply.set_alive(true);

        if is_session_pid {
            self.local_pid = Some(pkt.pid);
        }
    }

    fn on_existing_player(&mut self, pkt: ExistingPlayer) {
        // Late-join sync: everything verbatim, but neither alive nor
        // position — those arrive with CreatePlayer / WorldUpdate.
        let Some(ply) = self.players.get_or_create(pkt.pid) else {
            return;
        };
        ply.team = pkt.team;
        ply.name = pkt.name;
        ply.set_weapon(pkt.weapon);
        ply.tool = pkt.tool;
        ply.set_color(pkt.color);
        ply.kills = pkt.kills;
    }

    fn on_world_update(&mut self, pkt: WorldUpdate) {
        for (i, entry) in pkt.entries.iter().enumerate().take(MAX_PLAYERS) {
            let pid = PlayerId(i as u8);
            // The local player never consumes its own snapshot entry.
            if pid == self.session_pid || Some(pid) == self.local_pid {
                continue;
            }
            let Some(ply) = self.players.get_mut(pid) else {
                continue;
            };
            if !ply.alive {
                continue;
            }
            ply.set_position(entry.position);
            ply.set_orientation(entry.orientation);
        }
    }

    fn on_block_action(&mut self, pkt: BlockAction) {
        let known = self.players.get_or_create(pkt.pid).map(|p| p.color);
        let color = known.unwrap_or_else(|| self.players.color_for_unknown(pkt.pid));

        match pkt.action {
            BlockActionKind::Build => {
                self.build_point(pkt.position, color, EditMode::Confirmed);
                if let Some(ply) = self.players.get_mut(pkt.pid) {
                    ply.consume_blocks(1);
                }
            }
            action => {
                self.destroy_point(pkt.position, action, EditMode::Confirmed);
                if action == BlockActionKind::Destroy
                    && let Some(ply) = self.players.get_mut(pkt.pid)
                {
                    ply.refund_block();
                }
            }
        }
    }

    fn on_block_line(&mut self, pkt: BlockLine) {
        let blocks = self.map.block_line(pkt.start, pkt.end);

        let known = self.players.get_or_create(pkt.pid).map(|p| p.color);
        let color = known.unwrap_or_else(|| self.players.color_for_unknown(pkt.pid));
        if let Some(ply) = self.players.get_mut(pkt.pid) {
            ply.consume_blocks(blocks.len() as i32);
        }
        for pos in blocks {
            self.build_point(pos, color, EditMode::Confirmed);
        }
    }

    fn on_input_data(&mut self, pkt: InputData) {
        let Some(ply) = self.players.get_mut(pkt.pid) else {
            return;
        };
        ply.input.forward = pkt.forward;
        ply.input.back = pkt.back;
        ply.input.left = pkt.left;
        ply.input.right = pkt.right;
        ply.input.jump = pkt.jump;
        ply.input.sneak = pkt.sneak;
        ply.input.sprint = pkt.sprint;
        ply.set_crouch(pkt.crouch);
    }

    fn on_kill_action(&mut self, pkt: KillAction) {
        let Some(victim) = self.players.get(pkt.pid) else {
            return;
        };
        let Some(killer) = self.players.get(pkt.killer) else {
            return;
        };
        let victim_name = victim.name.clone();
        let killer_name = killer.name.clone();
        tracing::debug!(
            "{} killed {}, respawning in {}s",
            killer_name,
            victim_name,
            pkt.respawn_time
        );

        if let Some(ply) = self.players.get_mut(pkt.pid) {
            ply.set_alive(false);
        }
        self.effects.push(SideEffect::Killfeed {
            killer: killer_name,
            victim: victim_name,
            kind: pkt.kind,
        });

        if Some(pkt.pid) == self.local_pid {
            self.effects.push(SideEffect::RespawnCountdown {
                seconds: pkt.respawn_time,
            });
        }

        // Suicides do not count.
        if pkt.killer != pkt.pid
            && let Some(killer) = self.players.get_mut(pkt.killer)
        {
            killer.kills += 1;
        }
    }

    fn on_position_data(&mut self, pkt: PositionData) {
        // Authoritative correction of the local prediction.
        let Some(pid) = self.local_pid else {
            return;
        };
        if let Some(ply) = self.players.get_mut(pid) {
            ply.set_position(pkt.position);
        }
    }

    fn on_weapon_input(&mut self, pkt: WeaponInput) {
        let Some(ply) = self.players.get_mut(pkt.pid) else {
            return;
        };
        ply.primary_fire = pkt.primary;
        ply.secondary_fire = pkt.secondary;
    }

    fn on_set_hp(&mut self, pkt: SetHP) {
        let Some(pid) = self.local_pid else {
            return;
        };
        if let Some(ply) = self.players.get_mut(pid) {
            ply.health = pkt.health;
        }
        if pkt.kind != DamageKind::Fall {
            self.effects.push(SideEffect::Sound {
                cue: SoundCue::HitConfirm,
                position: None,
            });
            self.effects.push(SideEffect::HitIndicator {
                source: pkt.source,
            });
        }
    }

    fn on_grenade(&mut self, pkt: GrenadePacket) {
        self.objects
            .stage(Box::new(Grenade::new(pkt.position, pkt.velocity, pkt.fuse)));
    }

    fn on_set_tool(&mut self, pkt: SetTool) {
        if let Some(ply) = self.players.get_mut(pkt.pid) {
            ply.tool = pkt.tool;
        }
    }

    fn on_set_color(&mut self, pkt: SetColor) {
        match self.players.get_mut(pkt.pid) {
            Some(ply) => ply.set_color(pkt.color),
            // Color announced before the player exists (spectators,
            // ordering races): buffer it for the first sighting.
            None => self.players.remember_color(pkt.pid, pkt.color),
        }
    }

    fn on_chat_message(&mut self, pkt: ChatMessage) {
        if !pkt.pid.is_valid() || pkt.kind == ChatKind::System {
            self.effects.push(SideEffect::Chat {
                text: format!("[*]: {}", pkt.message),
                color: ALERT_COLOR,
            });
            return;
        }

        let Some(ply) = self.players.get(pkt.pid) else {
            tracing::debug!("chat missed from {}: {}", pkt.pid, pkt.message);
            return;
        };
        let team = self.teams.get(ply.team);
        let (text, color) = match pkt.kind {
            ChatKind::All => (
                format!("{} ({}): {}", ply.name, team.name, pkt.message),
                ALL_CHAT_COLOR,
            ),
            _ => (
                format!("{}: {}", ply.name, pkt.message),
                team.color.as_f32(),
            ),
        };
        self.effects.push(SideEffect::Chat { text, color });
    }

    fn on_move_object(&mut self, pkt: MoveObject) {
        let Some(ent) = self.entities.get_mut(pkt.object_id) else {
            // Probably an object of a game mode this client isn't running.
            tracing::trace!("MoveObject for untracked id {}", pkt.object_id);
            return;
        };
        ent.team = pkt.state;
        ent.position = pkt.position;
    }

    fn on_player_left(&mut self, pkt: PlayerLeft) {
        self.players.remove(pkt.pid);
        if self.local_pid == Some(pkt.pid) {
            self.local_pid = None;
        }
    }

    fn on_intel_capture(&mut self, pkt: IntelCapture) {
        let resolved = self
            .players
            .get(pkt.pid)
            .map(|p| (p.name.clone(), p.team));

        if let Some((name, team)) = resolved {
            if pkt.winning {
                let team_name = self.teams.get(team).name.clone();
                self.effects.push(SideEffect::Banner {
                    text: format!("{team_name} Team Wins!"),
                });
            } else {
                let enemy_name = self.teams.other(team).name.clone();
                self.effects.push(SideEffect::Chat {
                    text: format!("{name} captured the {enemy_name} team Intel!"),
                    color: ALERT_COLOR,
                });
            }

            if let Some(ply) = self.players.get_mut(pkt.pid) {
                ply.kills += INTEL_CAPTURE_BONUS;
            }
            self.teams.get_mut(team).score += 1;
        }

        self.effects.push(SideEffect::Sound {
            cue: if pkt.winning {
                SoundCue::Victory
            } else {
                SoundCue::IntelPickup
            },
            position: None,
        });
    }

    fn on_intel_pickup(&mut self, pkt: IntelPickup) {
        let resolved = self
            .players
            .get(pkt.pid)
            .map(|p| (p.name.clone(), p.team));

        if let Some((name, team)) = &resolved {
            let enemy_name = self.teams.other(*team).name.clone();
            self.effects.push(SideEffect::Chat {
                text: format!("{name} has the {enemy_name} Intel"),
                color: ALERT_COLOR,
            });
        }
        self.effects.push(SideEffect::Sound {
            cue: SoundCue::IntelPickup,
            position: None,
        });

        // You carry the enemy team's flag.
        if let Some((_, team)) = resolved
            && let Some(ent) = self.entities.get_known_mut(EntityId::flag_of(team.other()))
        {
            ent.carrier = Some(pkt.pid);
        }
    }

    fn on_intel_drop(&mut self, pkt: IntelDrop) {
        let resolved = self
            .players
            .get(pkt.pid)
            .map(|p| (p.name.clone(), p.team));

        let Some((name, team)) = resolved else {
            return;
        };
        let enemy_name = self.teams.other(team).name.clone();
        self.effects.push(SideEffect::Chat {
            text: format!("{name} has dropped the {enemy_name} Intel"),
            color: ALERT_COLOR,
        });

        if let Some(ent) = self.entities.get_known_mut(EntityId::flag_of(team.other())) {
            ent.carrier = None;
            ent.position = pkt.position;
        }
    }

    fn on_restock(&mut self, pkt: Restock) {
        // The packet's pid is unused on purpose: Restock always applies to
        // the local player.
        let _ = pkt.pid;
        if let Some(pid) = self.local_pid
            && let Some(ply) = self.players.get_mut(pid)
        {
            ply.restock();
        }
    }

    fn on_fog_color(&mut self, pkt: FogColor) {
        self.effects.push(SideEffect::FogColor { color: pkt.color });
    }

    fn on_weapon_reload(&mut self, pkt: WeaponReload) {
        let Some(ply) = self.players.get_mut(pkt.pid) else {
            return;
        };
        ply.weapon_mut().on_reload(pkt.clip, pkt.reserve);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
