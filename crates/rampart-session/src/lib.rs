//! The client-side session core: registries for players, teams, and mode
//! entities, the packet router, the voxel map mutation façade, the outbound
//! message builder, and the per-frame orchestrator.
//!
//! Everything here is single-threaded and cooperative: packets are handled
//! one at a time, and the only structural mutation of object lists outside
//! packet handling happens at a fixed point in [`GameSession::update`].

pub mod entity;
pub mod mutator;
pub mod outbound;
pub mod outbox;
pub mod player;
pub mod players;
pub mod router;
pub mod scheduler;
pub mod session;
pub mod team;

#[cfg(test)]
pub(crate) mod testutil;

pub use entity::{Entity, EntityRegistry};
pub use mutator::EditMode;
pub use outbox::{Outbox, OutboundPacket};
pub use player::{CROUCH_HEIGHT, InputState, Player, STANDING_HEIGHT, Weapon};
pub use players::PlayerRegistry;
pub use scheduler::{
    Delay, HANDSHAKE_DELAY, Interval, ORIENTATION_REPORT_INTERVAL, POSITION_REPORT_INTERVAL,
};
pub use session::{CameraRig, GameSession, NoCamera, SessionOptions};
pub use team::{Team, TeamRegistry};
