//! World-side pieces of the session core: the voxel map mutation contract,
//! line rasterization, destruction geometry, transient simulated objects,
//! and the side-effect request channel.
//!
//! Coordinates follow the map convention: `x`/`y` span the horizontal plane
//! and `z` grows downward, so gravity is positive `z`.

pub mod debris;
pub mod destruction;
pub mod effects;
pub mod grenade;
pub mod objects;
pub mod raster;
pub mod store;

pub use debris::{DebrisGroup, FallingBlocks};
pub use destruction::{DestroyKind, destroy_voxels};
pub use effects::{EffectQueue, SideEffect, SoundCue};
pub use grenade::Grenade;
pub use objects::{GRAVITY, ObjectSet, ObjectStatus, ObjectTag, TransientObject, WorldCtx};
pub use raster::{MAX_LINE_BLOCKS, block_line};
pub use store::{Face, MapStore, MemoryMap, RemovedBlock};
