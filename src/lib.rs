//! Brick Hop - A side-scrolling platformer
//!
//! Core modules:
//! - `sim`: Tick-driven simulation (physics, collisions, items, level data)
//! - `settings`: Host configuration (key bindings, canvas, particle quality)
//! - `wasm`: Browser bindings for a JavaScript host shell

pub mod settings;
pub mod sim;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use settings::{KeyBindings, QualityPreset, Settings};

/// Game configuration constants
///
/// All units are pixels and pixels-per-tick; one tick is one rendered frame.
pub mod consts {
    /// Level grid size
    pub const TILE: f32 = 40.0;
    /// Top of the ground plane
    pub const GROUND_Y: f32 = 440.0;

    /// Player physics
    pub const GRAVITY: f32 = 0.5;
    pub const JUMP_FORCE: f32 = -14.0;
    pub const MOVE_SPEED: f32 = 4.0;
    pub const MAX_FALL_SPEED: f32 = 12.0;
    /// Horizontal damping applied when no direction is held
    pub const FRICTION: f32 = 0.8;
    /// Below this horizontal speed the player stops dead
    pub const STOP_THRESHOLD: f32 = 0.3;

    /// Stomp bounce is a fraction of a full jump
    pub const STOMP_BOUNCE_FACTOR: f32 = 0.6;
    /// Player bottom may sit this far below the enemy midline and still stomp
    pub const STOMP_TOLERANCE: f32 = 10.0;
    /// Player/enemy contact hitboxes are shrunk by this on every side
    pub const ENEMY_HITBOX_INSET: f32 = 4.0;
    /// Unsupported enemies drop this far per tick
    pub const ENEMY_FALL_STEP: f32 = 3.0;

    /// Invincibility window granted by a mushroom (ticks)
    pub const INVINCIBLE_TICKS: u32 = 300;

    /// Camera blend factor per tick
    pub const CAMERA_LERP: f32 = 0.1;
    /// Downward drift added to particle velocity each tick
    pub const PARTICLE_DRIFT: f32 = 0.15;

    /// Flag pole hit width
    pub const FLAG_WIDTH: f32 = 20.0;
    /// Distance below the death line where falling things are gone for good
    pub const FALL_OUT_MARGIN: f32 = 40.0;

    /// Progression
    pub const FINAL_LEVEL: u32 = 3;
    pub const STARTING_LIVES: u32 = 3;

    /// Scoring
    pub const STOMP_SCORE: u64 = 200;
    pub const COIN_SCORE: u64 = 50;
    pub const ITEM_COIN_SCORE: u64 = 100;
    pub const MUSHROOM_SCORE: u64 = 500;
    pub const FLAG_SCORE: u64 = 1000;
}

/// Particle colors (packed 0xRRGGBB)
pub mod colors {
    pub const GOLD: u32 = 0xFFD700;
    pub const ENEMY_RED: u32 = 0xFF4444;
    pub const MUSHROOM_PINK: u32 = 0xFF69B4;
}

/// Move `current` toward `target` by `factor` of the remaining distance
#[inline]
pub fn approach(current: f32, target: f32, factor: f32) -> f32 {
    current + (target - current) * factor
}
