//! Per-player state: identity, tools and ammo, movement/fire intent, and
//! per-frame dead reckoning between server snapshots.

use glam::Vec3;
use rampart_protocol::{
    MAX_BLOCKS, MAX_GRENADES, MAX_HEALTH, PlayerId, Rgb, TeamId, Tool, WeaponKind,
};

/// Standing hitbox/eye height in voxels.
pub const STANDING_HEIGHT: f32 = 2.5;

/// Crouching hitbox/eye height in voxels.
pub const CROUCH_HEIGHT: f32 = 1.5;

// ---------------------------------------------------------------------------
// Weapon
// ---------------------------------------------------------------------------

/// Magazine and reserve state of a player's primary weapon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Weapon {
    kind: WeaponKind,
    clip: i32,
    reserve: i32,
}

impl Weapon {
    /// A fully loaded weapon of the given kind.
    pub fn new(kind: WeaponKind) -> Self {
        Self {
            kind,
            clip: kind.magazine(),
            reserve: kind.reserve(),
        }
    }

    /// Weapon category.
    pub fn kind(&self) -> WeaponKind {
        self.kind
    }

    /// Rounds in the magazine.
    pub fn clip(&self) -> i32 {
        self.clip
    }

    /// Rounds in reserve.
    pub fn reserve(&self) -> i32 {
        self.reserve
    }

    /// Apply a server-confirmed reload: both counters come from the wire.
    pub fn on_reload(&mut self, clip: u8, reserve: u8) {
        self.clip = clip as i32;
        self.reserve = reserve as i32;
    }

    /// Refill magazine and reserve to the weapon's maximums.
    pub fn restock(&mut self) {
        self.clip = self.kind.magazine();
        self.reserve = self.kind.reserve();
    }
}

// ---------------------------------------------------------------------------
// InputState
// ---------------------------------------------------------------------------

/// Movement-intent flags. Crouch lives on [`Player`] because toggling it
/// changes the hitbox height.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
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
    /// Sneaking.
    pub sneak: bool,
    /// Sprinting.
    pub sprint: bool,
}

// ---------------------------------------------------------------------------
// Player
// ---------------------------------------------------------------------------

/// One session participant.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    /// Player id; unique within the registry.
    pub pid: PlayerId,
    /// Display name.
    pub name: String,
    /// Team affiliation.
    pub team: TeamId,
    /// Active tool.
    pub tool: Tool,
    /// Block-tool ammo. Never negative.
    pub blocks: i32,
    /// Grenades carried.
    pub grenades: i32,
    /// Current (rendered) position.
    pub position: Vec3,
    /// Forward vector.
    pub orientation: Vec3,
    /// Velocity, fed into grenade throws.
    pub velocity: Vec3,
    /// Health points.
    pub health: u8,
    /// Alive flag; dead players are skipped by world updates.
    pub alive: bool,
    /// Kill count.
    pub kills: u32,
    /// Block color.
    pub color: Rgb,
    /// Movement intent.
    pub input: InputState,
    /// Fire intent, primary.
    pub primary_fire: bool,
    /// Fire intent, secondary.
    pub secondary_fire: bool,
    weapon: Weapon,
    crouching: bool,
    height: f32,
}

impl Player {
    /// A freshly referenced player with default loadout. Real fields arrive
    /// with CreatePlayer/ExistingPlayer.
    pub fn new(pid: PlayerId) -> Self {
        Self {
            pid,
            name: String::new(),
            team: TeamId::Team1,
            tool: Tool::Weapon,
            blocks: MAX_BLOCKS,
            grenades: MAX_GRENADES,
            position: Vec3::ZERO,
            orientation: Vec3::X,
            velocity: Vec3::ZERO,
            health: MAX_HEALTH,
            alive: false,
            kills: 0,
            color: Rgb::DEFAULT_BLOCK,
            input: InputState::default(),
            primary_fire: false,
            secondary_fire: false,
            weapon: Weapon::new(WeaponKind::Rifle),
            crouching: false,
            height: STANDING_HEIGHT,
        }
    }

    /// The equipped weapon.
    pub fn weapon(&self) -> &Weapon {
        &self.weapon
    }

    /// Mutable access to the equipped weapon.
    pub fn weapon_mut(&mut self) -> &mut Weapon {
        &mut self.weapon
    }

    /// Swap to a (fully loaded) weapon of the given kind.
    pub fn set_weapon(&mut self, kind: WeaponKind) {
        self.weapon = Weapon::new(kind);
    }

    /// Set the alive flag. Coming back alive restores full health.
    pub fn set_alive(&mut self, alive: bool) {
        if alive && !self.alive {
            self.health = MAX_HEALTH;
        }
        self.alive = alive;
    }

    /// Snap to `position` (spawns, world-update snapshots, and
    /// authoritative corrections).
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    /// Set the forward vector.
    pub fn set_orientation(&mut self, orientation: Vec3) {
        self.orientation = orientation;
    }

    /// Set the block color.
    pub fn set_color(&mut self, color: Rgb) {
        self.color = color;
    }

    /// Toggle crouch; changes the hitbox height.
    pub fn set_crouch(&mut self, crouch: bool) {
        if crouch == self.crouching {
            return;
        }
        self.crouching = crouch;
        self.height = if crouch { CROUCH_HEIGHT } else { STANDING_HEIGHT };
    }

    /// Returns `true` if crouching.
    pub fn crouching(&self) -> bool {
        self.crouching
    }

    /// Current hitbox/eye height.
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Spend up to `count` block ammo, clamped at zero.
    pub fn consume_blocks(&mut self, count: i32) {
        self.blocks = (self.blocks - count).max(0);
    }

    /// Return one block of ammo (plain destroys refund the spent block).
    pub fn refund_block(&mut self) {
        self.blocks += 1;
    }

    /// Refill health, blocks, grenades, and the weapon.
    pub fn restock(&mut self) {
        self.health = MAX_HEALTH;
        self.blocks = MAX_BLOCKS;
        self.grenades = MAX_GRENADES;
        self.weapon.restock();
    }

    /// Per-frame advance: dead-reckon from the current velocity between
    /// snapshots. Remote players carry zero velocity and hold position; the
    /// local player's velocity is written by the movement prediction.
    pub fn update(&mut self, dt: f32) {
        self.position += self.velocity * dt;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
