//! Packet payload shapes and the top-level tagged [`Packet`] enum.
//!
//! Packets are decoded once at the network boundary and dispatched by tag;
//! the session router matches exhaustively with a default arm so unknown or
//! currently-ignored kinds stay forward-compatible no-ops.

use glam::{IVec3, Vec3};
use serde::{Deserialize, Serialize};

use crate::types::{
    BlockActionKind, ChatKind, DamageKind, KillKind, PlayerId, Rgb, TeamId, Tool, WeaponKind,
};

// ---------------------------------------------------------------------------
// Delivery / connection state
// ---------------------------------------------------------------------------

/// Delivery mode requested for an outbound packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Delivery {
    /// Reliable, ordered delivery.
    Sequenced,
    /// Out-of-order or superseded delivery is acceptable; used for
    /// high-frequency position/orientation reports where staleness beats
    /// latency.
    Unsequenced,
}

/// Transport connection state, surfaced to the session via an event
/// callback rather than polled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConnectionState {
    /// No connection attempt yet.
    Unconnected,
    /// Handshake in progress.
    Connecting,
    /// Fully connected and in-game.
    Connected,
    /// Server is streaming a new map; the session should hand off to the
    /// loading flow.
    MapTransfer,
    /// Connection closed.
    Disconnected,
}

// ---------------------------------------------------------------------------
// Top-level enum
// ---------------------------------------------------------------------------

/// Top-level decoded packet. The enum discriminant is the type tag.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Packet {
    // --- Player state ---
    /// Server: a player (re)spawned.
    CreatePlayer(CreatePlayer),
    /// Server: late-join sync of an already-present player. Also the
    /// client's join handshake (name + requested team/weapon).
    ExistingPlayer(ExistingPlayer),
    /// Server: bulk position/orientation snapshot for all players.
    WorldUpdate(WorldUpdate),
    /// Server: a player left the session.
    PlayerLeft(PlayerLeft),
    /// Both: authoritative position (server→client corrects the local
    /// player; client→server reports it).
    PositionData(PositionData),
    /// Client: aim direction report.
    OrientationData(OrientationData),
    /// Both: movement-intent flags.
    InputData(InputData),
    /// Both: fire-intent flags.
    WeaponInput(WeaponInput),
    /// Server: local player's health changed.
    SetHP(SetHP),
    /// Server: a player died.
    KillAction(KillAction),
    /// Server: a player's active tool changed.
    SetTool(SetTool),
    /// Server: a player's block color changed.
    SetColor(SetColor),
    /// Server: refill the local player's ammo and health.
    Restock(Restock),
    /// Server: a weapon finished reloading.
    WeaponReload(WeaponReload),
    /// Client: request to switch teams.
    ChangeTeam(ChangeTeam),
    /// Client: request to switch weapons.
    ChangeWeapon(ChangeWeapon),

    // --- Map edits ---
    /// Both: a single block build/destroy.
    BlockAction(BlockAction),
    /// Both: a line of blocks built in one action.
    BlockLine(BlockLine),

    // --- World objects ---
    /// Both: a grenade was thrown.
    GrenadePacket(GrenadePacket),
    /// Server: a game-mode entity moved or changed hands.
    MoveObject(MoveObject),
    /// Server: the intel was captured (possibly winning the game).
    IntelCapture(IntelCapture),
    /// Server: a player picked up the intel.
    IntelPickup(IntelPickup),
    /// Server: the intel was dropped.
    IntelDrop(IntelDrop),

    // --- Environment / misc ---
    /// Server: fog color changed.
    FogColor(FogColor),
    /// Both: a chat line.
    ChatMessage(ChatMessage),
    /// Server: territory-mode capture event. Ignored by this client.
    TerritoryCapture(TerritoryCapture),
    /// Server: territory-mode progress bar. Ignored by this client.
    ProgressBar(ProgressBar),
}

// ---------------------------------------------------------------------------
// Payload structs
// ---------------------------------------------------------------------------

/// A player (re)spawned.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreatePlayer {
    /// Player id.
    pub pid: PlayerId,
    /// Spawn weapon.
    pub weapon: WeaponKind,
    /// Team affiliation.
    pub team: TeamId,
    /// Spawn position.
    pub position: Vec3,
    /// Display name.
    pub name: String,
}

/// Late-join sync of an already-present player, or the join handshake.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExistingPlayer {
    /// Player id.
    pub pid: PlayerId,
    /// Team affiliation.
    pub team: TeamId,
    /// Equipped weapon.
    pub weapon: WeaponKind,
    /// Active tool.
    pub tool: Tool,
    /// Current kill count.
    pub kills: u32,
    /// Block color.
    pub color: Rgb,
    /// Display name.
    pub name: String,
}

/// One player's entry in a [`WorldUpdate`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct WorldEntry {
    /// Position.
    pub position: Vec3,
    /// Forward vector.
    pub orientation: Vec3,
}

/// Bulk position/orientation snapshot, indexed by pid.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorldUpdate {
    /// Up to `MAX_PLAYERS` entries; entry `i` belongs to pid `i`.
    pub entries: Vec<WorldEntry>,
}

/// A player left the session.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PlayerLeft {
    /// Player id.
    pub pid: PlayerId,
}

/// Authoritative position report/correction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PositionData {
    /// Position.
    pub position: Vec3,
}

/// Aim direction report.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct OrientationData {
    /// Forward vector.
    pub orientation: Vec3,
}

/// Movement-intent flags.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct InputData {
    /// Player id.
    pub pid: PlayerId,
    /// Moving forward.
    pub forward: bool,
    /// Moving backward.
    pub back: bool,
    /// Strafing left.
    pub left: bool,
    /// Strafing right.
    pub right: bool,
    /// Jumping.
    pub jump: bool,
    /// Crouching (changes the hitbox height).
    pub crouch: bool,
    /// Sneaking.
    pub sneak: bool,
    /// Sprinting.
    pub sprint: bool,
}

/// Fire-intent flags.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct WeaponInput {
    /// Player id.
    pub pid: PlayerId,
    /// Primary fire held.
    pub primary: bool,
    /// Secondary fire held.
    pub secondary: bool,
}

/// Local player's health changed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SetHP {
    /// New health value.
    pub health: u8,
    /// Damage source category.
    pub kind: DamageKind,
    /// World position of the damage source, for the hit indicator.
    pub source: Vec3,
}

/// A player died.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct KillAction {
    /// The victim.
    pub pid: PlayerId,
    /// The killer. Equal to `pid` for suicides.
    pub killer: PlayerId,
    /// Cause of death.
    pub kind: KillKind,
    /// Seconds until the victim respawns.
    pub respawn_time: u8,
}

/// A player's active tool changed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SetTool {
    /// Player id.
    pub pid: PlayerId,
    /// New active tool.
    pub tool: Tool,
}

/// A player's block color changed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SetColor {
    /// Player id.
    pub pid: PlayerId,
    /// New block color.
    pub color: Rgb,
}

/// Refill the local player's ammo and health.
///
/// The pid field is carried on the wire but deliberately unused: Restock
/// always applies to the local player. Downstream protocol compatibility
/// depends on preserving this.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Restock {
    /// Unused; see the struct docs.
    pub pid: PlayerId,
}

/// A weapon finished reloading.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct WeaponReload {
    /// Player id.
    pub pid: PlayerId,
    /// Rounds now in the magazine.
    pub clip: u8,
    /// Rounds remaining in reserve.
    pub reserve: u8,
}

/// Request to switch teams.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ChangeTeam {
    /// Requested team.
    pub team: TeamId,
}

/// Request to switch weapons.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ChangeWeapon {
    /// Requested weapon.
    pub weapon: WeaponKind,
}

/// A single block build/destroy.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct BlockAction {
    /// Acting player.
    pub pid: PlayerId,
    /// Edit kind.
    pub action: BlockActionKind,
    /// Target voxel.
    pub position: IVec3,
}

/// A line of blocks built in one action.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct BlockLine {
    /// Acting player.
    pub pid: PlayerId,
    /// First voxel of the line (inclusive).
    pub start: IVec3,
    /// Last voxel of the line (inclusive).
    pub end: IVec3,
}

/// A grenade was thrown.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GrenadePacket {
    /// Throwing player.
    pub pid: PlayerId,
    /// Release position.
    pub position: Vec3,
    /// Initial velocity.
    pub velocity: Vec3,
    /// Seconds until detonation.
    pub fuse: f32,
}

/// A game-mode entity moved or changed hands.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct MoveObject {
    /// Raw object id; may belong to a mode this client is not tracking.
    pub object_id: u8,
    /// Owning-team state (`None` = neutral).
    pub state: Option<TeamId>,
    /// New position.
    pub position: Vec3,
}

/// The intel was captured.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct IntelCapture {
    /// Capturing player.
    pub pid: PlayerId,
    /// `true` if this capture wins the game.
    pub winning: bool,
}

/// A player picked up the intel.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct IntelPickup {
    /// Carrying player.
    pub pid: PlayerId,
}

/// The intel was dropped.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct IntelDrop {
    /// Dropping player.
    pub pid: PlayerId,
    /// Where the intel landed.
    pub position: Vec3,
}

/// Fog color changed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct FogColor {
    /// New fog color.
    pub color: Rgb,
}

/// A chat line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    /// Sending player; out-of-range pids are rendered as system lines.
    pub pid: PlayerId,
    /// Chat channel.
    pub kind: ChatKind,
    /// Message text.
    pub message: String,
}

/// Territory-mode capture event. Carried for wire compatibility only.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct TerritoryCapture {
    /// Captured territory id.
    pub object_id: u8,
    /// `true` if this capture wins the game.
    pub winning: bool,
    /// New owning-team state.
    pub state: Option<TeamId>,
}

/// Territory-mode progress bar. Carried for wire compatibility only.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ProgressBar {
    /// Territory id.
    pub object_id: u8,
    /// Team currently capturing.
    pub capturing: Option<TeamId>,
    /// Capture rate.
    pub rate: i8,
    /// Progress in `[0, 1]`.
    pub progress: f32,
}

// ---------------------------------------------------------------------------
// Tag extraction
// ---------------------------------------------------------------------------

/// Unique tag identifying a packet kind, used for dispatch and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PacketTag {
    /// See [`CreatePlayer`].
    CreatePlayer,
    /// See [`ExistingPlayer`].
    ExistingPlayer,
    /// See [`WorldUpdate`].
    WorldUpdate,
    /// See [`PlayerLeft`].
    PlayerLeft,
    /// See [`PositionData`].
    PositionData,
    /// See [`OrientationData`].
    OrientationData,
    /// See [`InputData`].
    InputData,
    /// See [`WeaponInput`].
    WeaponInput,
    /// See [`SetHP`].
    SetHP,
    /// See [`KillAction`].
    KillAction,
    /// See [`SetTool`].
    SetTool,
    /// See [`SetColor`].
    SetColor,
    /// See [`Restock`].
    Restock,
    /// See [`WeaponReload`].
    WeaponReload,
    /// See [`ChangeTeam`].
    ChangeTeam,
    /// See [`ChangeWeapon`].
    ChangeWeapon,
    /// See [`BlockAction`].
    BlockAction,
    /// See [`BlockLine`].
    BlockLine,
    /// See [`GrenadePacket`].
    GrenadePacket,
    /// See [`MoveObject`].
    MoveObject,
    /// See [`IntelCapture`].
    IntelCapture,
    /// See [`IntelPickup`].
    IntelPickup,
    /// See [`IntelDrop`].
    IntelDrop,
    /// See [`FogColor`].
    FogColor,
    /// See [`ChatMessage`].
    ChatMessage,
    /// See [`TerritoryCapture`].
    TerritoryCapture,
    /// See [`ProgressBar`].
    ProgressBar,
}

impl Packet {
    /// Extract the routing tag without consuming the packet.
    pub fn tag(&self) -> PacketTag {
        match self {
            Packet::CreatePlayer(_) => PacketTag::CreatePlayer,
            Packet::ExistingPlayer(_) => PacketTag::ExistingPlayer,
            Packet::WorldUpdate(_) => PacketTag::WorldUpdate,
            Packet::PlayerLeft(_) => PacketTag::PlayerLeft,
            Packet::PositionData(_) => PacketTag::PositionData,
            Packet::OrientationData(_) => PacketTag::OrientationData,
            Packet::InputData(_) => PacketTag::InputData,
            Packet::WeaponInput(_) => PacketTag::WeaponInput,
            Packet::SetHP(_) => PacketTag::SetHP,
            Packet::KillAction(_) => PacketTag::KillAction,
            Packet::SetTool(_) => PacketTag::SetTool,
            Packet::SetColor(_) => PacketTag::SetColor,
            Packet::Restock(_) => PacketTag::Restock,
            Packet::WeaponReload(_) => PacketTag::WeaponReload,
            Packet::ChangeTeam(_) => PacketTag::ChangeTeam,
            Packet::ChangeWeapon(_) => PacketTag::ChangeWeapon,
            Packet::BlockAction(_) => PacketTag::BlockAction,
            Packet::BlockLine(_) => PacketTag::BlockLine,
            Packet::GrenadePacket(_) => PacketTag::GrenadePacket,
            Packet::MoveObject(_) => PacketTag::MoveObject,
            Packet::IntelCapture(_) => PacketTag::IntelCapture,
            Packet::IntelPickup(_) => PacketTag::IntelPickup,
            Packet::IntelDrop(_) => PacketTag::IntelDrop,
            Packet::FogColor(_) => PacketTag::FogColor,
            Packet::ChatMessage(_) => PacketTag::ChatMessage,
            Packet::TerritoryCapture(_) => PacketTag::TerritoryCapture,
            Packet::ProgressBar(_) => PacketTag::ProgressBar,
        }
    }
}

// ---------------------------------------------------------------------------
// Session-start state
// ---------------------------------------------------------------------------

/// Per-team info carried in [`StateData`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TeamInfo {
    /// Team display name.
    pub name: String,
    /// Team display color.
    pub color: Rgb,
}

/// Capture-the-flag mode state carried in [`StateData`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CtfState {
    /// Team 1 base position.
    pub team1_base: Vec3,
    /// Team 2 base position.
    pub team2_base: Vec3,
    /// Team 1 flag position.
    pub team1_flag: Vec3,
    /// Team 2 flag position.
    pub team2_flag: Vec3,
    /// Player currently carrying team 1's flag.
    pub team1_carrier: Option<PlayerId>,
    /// Player currently carrying team 2's flag.
    pub team2_carrier: Option<PlayerId>,
    /// Team 1 score.
    pub team1_score: u32,
    /// Team 2 score.
    pub team2_score: u32,
    /// Captures needed to win.
    pub cap_limit: u32,
}

/// Game-mode payload of [`StateData`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub enum GameMode {
    /// Capture the flag.
    Ctf(CtfState),
    /// A mode this client does not track; the entity set stays empty.
    Other,
}

/// Session-start state delivered after the map transfer completes.
///
/// Consumed by the loading flow and handed to the session on construction;
/// not part of the in-game packet stream.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StateData {
    /// The pid assigned to this client.
    pub pid: PlayerId,
    /// Initial fog color.
    pub fog_color: Rgb,
    /// Team 1 name/color.
    pub team1: TeamInfo,
    /// Team 2 name/color.
    pub team2: TeamInfo,
    /// Active game mode.
    pub mode: GameMode,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_extraction() {
        let p = Packet::Restock(Restock { pid: PlayerId(7) });
        assert_eq!(p.tag(), PacketTag::Restock);

        let p = Packet::ChatMessage(ChatMessage {
            pid: PlayerId(1),
            kind: ChatKind::All,
            message: "hi".to_string(),
        });
        assert_eq!(p.tag(), PacketTag::ChatMessage);

        let p = Packet::MoveObject(MoveObject {
            object_id: 9,
            state: None,
            position: Vec3::ZERO,
        });
        assert_eq!(p.tag(), PacketTag::MoveObject);
    }
}
