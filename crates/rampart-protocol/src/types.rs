//! Scalar ids, enums, and constants shared by packets and session state.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Maximum number of players in a session. Valid pids are `0..MAX_PLAYERS`.
pub const MAX_PLAYERS: usize = 32;

/// Full player health.
pub const MAX_HEALTH: u8 = 100;

/// Block-tool ammo granted on spawn/restock.
pub const MAX_BLOCKS: i32 = 50;

/// Grenades granted on spawn/restock.
pub const MAX_GRENADES: i32 = 3;

// ---------------------------------------------------------------------------
// PlayerId
// ---------------------------------------------------------------------------

/// Small integer identifying a player within a session.
///
/// Only values in `0..MAX_PLAYERS` name real players; larger values are
/// representable on the wire (servers use them for system senders) and are
/// handled by the router, never rejected at decode time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Returns `true` if this pid is within the valid player range.
    pub fn is_valid(self) -> bool {
        (self.0 as usize) < MAX_PLAYERS
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// TeamId
// ---------------------------------------------------------------------------

/// One of the two fixed teams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TeamId {
    /// First team.
    Team1,
    /// Second team.
    Team2,
}

impl TeamId {
    /// The opposing team.
    pub fn other(self) -> Self {
        match self {
            Self::Team1 => Self::Team2,
            Self::Team2 => Self::Team1,
        }
    }
}

// ---------------------------------------------------------------------------
// WeaponKind / Tool
// ---------------------------------------------------------------------------

/// Primary weapon categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeaponKind {
    /// Semi-automatic rifle.
    Rifle,
    /// Submachine gun.
    Smg,
    /// Pump shotgun.
    Shotgun,
}

impl WeaponKind {
    /// Magazine capacity for this weapon.
    pub fn magazine(self) -> i32 {
        match self {
            Self::Rifle => 10,
            Self::Smg => 30,
            Self::Shotgun => 6,
        }
    }

    /// Reserve ammo carried alongside a full magazine.
    pub fn reserve(self) -> i32 {
        match self {
            Self::Rifle => 50,
            Self::Smg => 120,
            Self::Shotgun => 48,
        }
    }
}

/// The active equipped item category, governing which ammo counter and
/// action semantics apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tool {
    /// Melee/digging tool.
    Spade,
    /// Block placer.
    Block,
    /// The equipped primary weapon.
    Weapon,
    /// Grenade.
    Grenade,
}

// ---------------------------------------------------------------------------
// Action / chat / damage / kill kinds
// ---------------------------------------------------------------------------

/// Block-edit action carried by `BlockAction` packets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlockActionKind {
    /// Place a block.
    Build,
    /// Remove a single block.
    Destroy,
    /// Spade destroy: target plus the voxels directly above and below.
    Spade,
    /// Grenade destroy: the 3×3×3 neighborhood around the target.
    Grenade,
}

/// Chat channel of a `ChatMessage`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChatKind {
    /// Visible to everyone.
    All,
    /// Visible to the sender's team.
    Team,
    /// Server-originated system line.
    System,
}

/// Damage source category carried by `SetHP`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DamageKind {
    /// Fall damage — no hit indicator.
    Fall,
    /// Weapon damage.
    Weapon,
}

/// Cause of death carried by `KillAction`, used for killfeed icons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KillKind {
    /// Body shot.
    Weapon,
    /// Headshot.
    Headshot,
    /// Spade melee.
    Melee,
    /// Grenade explosion.
    Grenade,
    /// Fall damage.
    Fall,
    /// Killed by switching teams.
    TeamChange,
    /// Killed by switching weapons.
    WeaponChange,
}

// ---------------------------------------------------------------------------
// EntityId
// ---------------------------------------------------------------------------

/// Well-known object ids for the CTF entity set.
///
/// `MoveObject` carries a raw `u8` so that ids belonging to game modes this
/// client is not tracking stay representable; these constants are the ids
/// the CTF mode populates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum EntityId {
    /// Team 1's intel flag.
    Team1Flag = 0,
    /// Team 2's intel flag.
    Team2Flag = 1,
    /// Team 1's base.
    Team1Base = 2,
    /// Team 2's base.
    Team2Base = 3,
}

impl EntityId {
    /// The flag belonging to `team`.
    pub fn flag_of(team: TeamId) -> Self {
        match team {
            TeamId::Team1 => Self::Team1Flag,
            TeamId::Team2 => Self::Team2Flag,
        }
    }

    /// The base belonging to `team`.
    pub fn base_of(team: TeamId) -> Self {
        match team {
            TeamId::Team1 => Self::Team1Base,
            TeamId::Team2 => Self::Team2Base,
        }
    }
}

impl From<EntityId> for u8 {
    fn from(id: EntityId) -> u8 {
        id as u8
    }
}

// ---------------------------------------------------------------------------
// Rgb
// ---------------------------------------------------------------------------

/// 8-bit RGB color used for block colors, team colors, and fog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
}

impl Rgb {
    /// Construct from components.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Fallback block color for builders whose color was never announced.
    pub const DEFAULT_BLOCK: Self = Self::new(103, 64, 40);

    /// Normalized float components in `[0, 1]`, for HUD tinting.
    pub fn as_f32(self) -> [f32; 3] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        ]
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pid_validity_bounds() {
        assert!(PlayerId(0).is_valid());
        assert!(PlayerId(31).is_valid());
        assert!(!PlayerId(32).is_valid());
        assert!(!PlayerId(255).is_valid());
    }

    #[test]
    fn test_weapon_ammo_tables() {
        assert_eq!(WeaponKind::Rifle.magazine(), 10);
        assert_eq!(WeaponKind::Rifle.reserve(), 50);
        assert_eq!(WeaponKind::Smg.magazine(), 30);
        assert_eq!(WeaponKind::Smg.reserve(), 120);
        assert_eq!(WeaponKind::Shotgun.magazine(), 6);
        assert_eq!(WeaponKind::Shotgun.reserve(), 48);
    }

    #[test]
    fn test_flag_and_base_lookup() {
        assert_eq!(EntityId::flag_of(TeamId::Team1), EntityId::Team1Flag);
        assert_eq!(EntityId::flag_of(TeamId::Team2), EntityId::Team2Flag);
        assert_eq!(EntityId::base_of(TeamId::Team1), EntityId::Team1Base);
        assert_eq!(u8::from(EntityId::Team1Flag), 0);
        assert_eq!(u8::from(EntityId::Team2Base), 3);
    }

    #[test]
    fn test_rgb_normalization() {
        let c = Rgb::new(255, 0, 51);
        let f = c.as_f32();
        assert_eq!(f[0], 1.0);
        assert_eq!(f[1], 0.0);
        assert!((f[2] - 0.2).abs() < 1e-3);
    }
}
