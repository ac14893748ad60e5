//! Game state and core simulation types
//!
//! Everything the renderer and host shell read lives here. Only the tick and
//! the lifecycle methods on [`GameState`] mutate it.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::input::KeySet;
use super::level::{Level, generate_level};
use super::particles::MAX_PARTICLES;
use super::rect::Rect;
use crate::consts::*;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for start
    Title,
    /// Active gameplay
    Playing,
    /// Out of lives
    GameOver,
    /// Cleared the final level
    Win,
    /// Cleared a level, waiting for continue
    LevelComplete,
}

impl GamePhase {
    /// Identifier the host overlay switches on
    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Title => "title",
            GamePhase::Playing => "playing",
            GamePhase::GameOver => "gameover",
            GamePhase::Win => "win",
            GamePhase::LevelComplete => "levelComplete",
        }
    }
}

/// The player character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
    pub is_jumping: bool,
    pub is_on_ground: bool,
    pub lives: u32,
    pub score: u64,
    pub coins: u32,
    /// Reserved for a grown form; nothing reads it yet
    pub is_big: bool,
    pub is_invincible: bool,
    /// Ticks of invincibility remaining
    pub invincible_timer: u32,
    pub facing_right: bool,
    pub is_dead: bool,
}

impl Player {
    pub fn new(start: Vec2) -> Self {
        Self {
            pos: start,
            size: Vec2::splat(TILE),
            vel: Vec2::ZERO,
            is_jumping: false,
            is_on_ground: false,
            lives: STARTING_LIVES,
            score: 0,
            coins: 0,
            is_big: false,
            is_invincible: false,
            invincible_timer: 0,
            facing_right: true,
            is_dead: false,
        }
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    /// Put the player back at `start`, keeping lives, score and coins
    pub fn respawn(&mut self, start: Vec2) {
        self.pos = start;
        self.vel = Vec2::ZERO;
        self.is_dead = false;
        self.is_invincible = false;
        self.invincible_timer = 0;
        self.is_jumping = false;
        self.is_on_ground = false;
    }

    /// Start the death animation: pop upward, then fall out of the level
    pub fn kill(&mut self) {
        self.is_dead = true;
        self.vel.y = JUMP_FORCE;
    }

    /// Grant the mushroom invincibility window
    pub fn make_invincible(&mut self) {
        self.is_invincible = true;
        self.invincible_timer = INVINCIBLE_TICKS;
    }
}

/// Collectible kinds that can come out of a question block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemKind {
    Coin,
    Mushroom,
}

/// Block types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockKind {
    Ground,
    Brick,
    /// Yields its item the first time it is struck from below
    Question { item: Option<ItemKind> },
    Pipe,
    /// Placeholder with no collision
    Invisible,
}

/// A static level block
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    pub pos: Vec2,
    pub size: Vec2,
    pub kind: BlockKind,
    /// Only question blocks ever become hit
    pub is_hit: bool,
}

impl Block {
    pub fn new(x: f32, y: f32, width: f32, height: f32, kind: BlockKind) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(width, height),
            kind,
            is_hit: false,
        }
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    /// Whether anything collides with this block
    #[inline]
    pub fn is_solid(&self) -> bool {
        self.kind != BlockKind::Invisible
    }

    /// Item carried by this block, if any
    pub fn item(&self) -> Option<ItemKind> {
        match self.kind {
            BlockKind::Question { item } => item,
            _ => None,
        }
    }

    pub fn has_item(&self) -> bool {
        self.item().is_some()
    }

    /// Strike the block from below.
    ///
    /// Returns true only on the first strike of a question block; the block
    /// is marked hit at that point and never triggers again.
    pub fn strike(&mut self) -> bool {
        if matches!(self.kind, BlockKind::Question { .. }) && !self.is_hit {
            self.is_hit = true;
            true
        } else {
            false
        }
    }
}

/// Enemy types (only goombas have behavior)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EnemyKind {
    #[default]
    Goomba,
}

/// A patrolling enemy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub pos: Vec2,
    pub size: Vec2,
    /// `vel.x` is the patrol speed; the sign of travel comes from `direction`
    pub vel: Vec2,
    pub kind: EnemyKind,
    pub is_alive: bool,
    /// -1.0 (left) or 1.0 (right)
    pub direction: f32,
}

impl Enemy {
    pub fn goomba(x: f32, y: f32, speed: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::splat(TILE),
            vel: Vec2::new(speed, 0.0),
            kind: EnemyKind::Goomba,
            is_alive: true,
            direction: 1.0,
        }
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    /// Horizontal displacement for one tick
    #[inline]
    pub fn step(&self) -> f32 {
        self.vel.x * self.direction
    }
}

/// A coin placed in the level
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coin {
    pub pos: Vec2,
    pub size: Vec2,
    pub collected: bool,
    /// Renderer bobs floating coins
    pub is_floating: bool,
}

impl Coin {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(20.0, 24.0),
            collected: false,
            is_floating: true,
        }
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }
}

/// An item dropped by a question block
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
    pub kind: ItemKind,
    pub collected: bool,
    /// Ticks left of the pop-out animation (cosmetic)
    pub bounce_timer: u32,
}

impl Item {
    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }
}

/// A particle for visual effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Ticks remaining
    pub life: f32,
    /// Packed 0xRRGGBB
    pub color: u32,
    pub size: f32,
}

fn default_rng() -> Pcg32 {
    Pcg32::seed_from_u64(0)
}

fn default_particle_cap() -> usize {
    MAX_PARTICLES
}

/// Complete simulation state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Seed for particle spread
    pub seed: u64,
    pub phase: GamePhase,
    pub player: Player,
    pub level: Level,
    /// Requested level number (1-based)
    pub current_level: u32,
    /// Smoothed horizontal scroll offset
    pub camera_x: f32,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    /// Dropped items still in play
    pub items: Vec<Item>,
    /// Keys currently held; written by the host, read by the tick.
    /// Not part of snapshots.
    #[serde(skip)]
    pub keys: KeySet,
    /// Live particle limit, set by the host from its settings
    #[serde(default = "default_particle_cap")]
    pub particle_cap: usize,
    #[serde(skip, default = "default_rng")]
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Create a fresh game sitting on the title screen
    pub fn new(seed: u64) -> Self {
        let level = generate_level(1);
        Self {
            seed,
            phase: GamePhase::Title,
            player: Player::new(level.player_start),
            level,
            current_level: 1,
            camera_x: 0.0,
            particles: Vec::new(),
            items: Vec::new(),
            keys: KeySet::default(),
            particle_cap: MAX_PARTICLES,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// (Re)start level `level_num`.
    ///
    /// Lives, score and coins carry over; position, velocity, death and
    /// invincibility are reset and transient particles and items cleared.
    pub fn start_level(&mut self, level_num: u32) {
        self.current_level = level_num;
        self.level = generate_level(level_num);
        self.player.respawn(self.level.player_start);
        self.camera_x = 0.0;
        self.particles.clear();
        self.items.clear();
        self.phase = GamePhase::Playing;
        log::info!(
            "Level {} started (lives {}, score {})",
            level_num,
            self.player.lives,
            self.player.score
        );
    }

    /// Title screen -> level 1
    pub fn start(&mut self) -> bool {
        if self.phase != GamePhase::Title {
            log::debug!("Ignoring start in {:?}", self.phase);
            return false;
        }
        self.start_level(1);
        true
    }

    /// Level complete -> next level
    pub fn continue_game(&mut self) -> bool {
        if self.phase != GamePhase::LevelComplete {
            log::debug!("Ignoring continue in {:?}", self.phase);
            return false;
        }
        self.start_level(self.current_level + 1);
        true
    }

    /// Game over or win -> a wholly fresh run at level 1.
    ///
    /// Held keys are dropped with the rest of the run; the particle limit
    /// comes from host settings and survives.
    pub fn restart(&mut self) -> bool {
        if !matches!(self.phase, GamePhase::GameOver | GamePhase::Win) {
            log::debug!("Ignoring restart in {:?}", self.phase);
            return false;
        }
        let particle_cap = self.particle_cap;
        *self = Self::new(self.seed);
        self.particle_cap = particle_cap;
        self.start_level(1);
        true
    }

    pub fn is_final_level(&self) -> bool {
        self.current_level >= FINAL_LEVEL
    }

    /// Serialize the whole world to JSON
    pub fn to_snapshot(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Restore a world from [`GameState::to_snapshot`] output.
    ///
    /// The RNG is not part of the snapshot; it is re-seeded from `seed`.
    pub fn from_snapshot(json: &str) -> Result<Self, serde_json::Error> {
        let mut state: Self = serde_json::from_str(json)?;
        state.rng = Pcg32::seed_from_u64(state.seed);
        Ok(state)
    }
}
