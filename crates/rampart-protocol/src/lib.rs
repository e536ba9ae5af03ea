//! Wire-facing data model for the Rampart session core: scalar ids, the
//! tagged packet enum, session-start state, and the versioned binary codec.

pub mod codec;
pub mod packets;
pub mod types;

pub use codec::{PROTOCOL_VERSION, PacketError, deserialize_packet, serialize_packet};
pub use packets::{
    ConnectionState, CtfState, Delivery, GameMode, Packet, PacketTag, StateData, TeamInfo,
    WorldEntry,
};
pub use types::{
    BlockActionKind, ChatKind, DamageKind, EntityId, KillKind, MAX_BLOCKS, MAX_GRENADES,
    MAX_HEALTH, MAX_PLAYERS, PlayerId, Rgb, TeamId, Tool, WeaponKind,
};
