//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per rendered frame, no wall-clock time
//! - Seeded RNG only (and only for cosmetic particles)
//! - Stable iteration order (level authoring order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod input;
pub mod items;
pub mod level;
pub mod particles;
pub mod rect;
pub mod state;
pub mod tick;

pub use collision::BlockHit;
pub use input::{KeySet, TickInput};
pub use items::{spawn_item, update_items};
pub use level::{Level, generate_level};
pub use particles::MAX_PARTICLES;
pub use rect::Rect;
pub use state::{
    Block, BlockKind, Coin, Enemy, EnemyKind, GamePhase, GameState, Item, ItemKind, Particle,
    Player,
};
pub use tick::tick;
