//! Level data and the level generator
//!
//! Levels are plain data built by [`generate_level`]. Each call returns a new,
//! fully owned [`Level`], so restarting a level restores every block, coin and
//! enemy to its authored state.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{Block, BlockKind, Coin, Enemy, ItemKind};
use crate::consts::*;

/// One level's geometry and entity placements
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Level {
    pub width: f32,
    /// Lower bound of the playable area
    pub height: f32,
    pub blocks: Vec<Block>,
    pub enemies: Vec<Enemy>,
    pub coins: Vec<Coin>,
    pub player_start: Vec2,
    /// Goal line x-coordinate
    pub flag_x: f32,
}

impl Level {
    /// Player or enemy below this line is dead
    #[inline]
    pub fn death_line(&self) -> f32 {
        self.height
    }

    /// A dying player below this line loses a life; items below it vanish
    #[inline]
    pub fn despawn_line(&self) -> f32 {
        self.height + FALL_OUT_MARGIN
    }
}

/// Playable height shared by every authored level
const LEVEL_HEIGHT: f32 = 560.0;
/// Horizontal spacing of coin runs
const COIN_SPACING: f32 = 30.0;

/// Build level `level_num`. Unknown numbers get level 1.
pub fn generate_level(level_num: u32) -> Level {
    match level_num {
        1 => level_1(),
        2 => level_2(),
        3 => level_3(),
        _ => {
            log::debug!("No level {}, falling back to level 1", level_num);
            level_1()
        }
    }
}

/// Accumulates blocks, enemies and coins for one level
struct LevelBuilder {
    blocks: Vec<Block>,
    enemies: Vec<Enemy>,
    coins: Vec<Coin>,
}

impl LevelBuilder {
    fn new() -> Self {
        Self {
            blocks: Vec::new(),
            enemies: Vec::new(),
            coins: Vec::new(),
        }
    }

    /// Ground tiles covering `[start_x, end_x)`
    fn ground(&mut self, start_x: f32, end_x: f32) -> &mut Self {
        let mut x = start_x;
        while x < end_x {
            self.blocks
                .push(Block::new(x, GROUND_Y, TILE, TILE * 3.0, BlockKind::Ground));
            x += TILE;
        }
        self
    }

    /// A lone question block
    fn question(&mut self, x: f32, y: f32, item: ItemKind) -> &mut Self {
        self.blocks.push(Block::new(
            x,
            y,
            TILE,
            TILE,
            BlockKind::Question { item: Some(item) },
        ));
        self
    }

    /// A row of bricks
    fn bricks(&mut self, x: f32, y: f32, count: usize) -> &mut Self {
        for i in 0..count {
            self.blocks.push(Block::new(
                x + i as f32 * TILE,
                y,
                TILE,
                TILE,
                BlockKind::Brick,
            ));
        }
        self
    }

    /// A row of bricks whose centre block is a question block holding `item`
    fn question_row(&mut self, x: f32, y: f32, count: usize, item: ItemKind) -> &mut Self {
        let centre = count / 2;
        for i in 0..count {
            let kind = if i == centre {
                BlockKind::Question { item: Some(item) }
            } else {
                BlockKind::Brick
            };
            self.blocks
                .push(Block::new(x + i as f32 * TILE, y, TILE, TILE, kind));
        }
        self
    }

    /// A two-tile-wide pipe `segments` tiles tall, standing on the ground
    fn pipe(&mut self, x: f32, segments: usize) -> &mut Self {
        for h in 0..segments {
            self.blocks.push(Block::new(
                x,
                GROUND_Y - (h + 1) as f32 * TILE,
                TILE * 2.0,
                TILE,
                BlockKind::Pipe,
            ));
        }
        self
    }

    /// Rising brick staircase, one column per step
    fn staircase(&mut self, x: f32, steps: usize) -> &mut Self {
        for i in 0..steps {
            let rise = (i + 1) as f32 * TILE;
            self.blocks.push(Block::new(
                x + i as f32 * TILE,
                GROUND_Y - rise,
                TILE,
                rise,
                BlockKind::Brick,
            ));
        }
        self
    }

    /// Goombas standing on the ground plane, as `(x, speed)` pairs
    fn goombas(&mut self, placements: &[(f32, f32)]) -> &mut Self {
        for &(x, speed) in placements {
            self.enemies.push(Enemy::goomba(x, GROUND_Y - TILE, speed));
        }
        self
    }

    /// A horizontal run of coins
    fn coins(&mut self, x: f32, y: f32, count: usize) -> &mut Self {
        for i in 0..count {
            self.coins.push(Coin::new(x + i as f32 * COIN_SPACING, y));
        }
        self
    }

    fn finish(&mut self, width: f32, flag_x: f32) -> Level {
        Level {
            width,
            height: LEVEL_HEIGHT,
            blocks: std::mem::take(&mut self.blocks),
            enemies: std::mem::take(&mut self.enemies),
            coins: std::mem::take(&mut self.coins),
            player_start: Vec2::new(80.0, GROUND_Y - TILE * 2.0),
            flag_x,
        }
    }
}

fn level_1() -> Level {
    LevelBuilder::new()
        .ground(0.0, 600.0)
        .ground(680.0, 1400.0)
        .ground(1480.0, 3200.0)
        .question(320.0, 280.0, ItemKind::Coin)
        .question_row(400.0, 280.0, 5, ItemKind::Mushroom)
        .pipe(560.0, 2)
        .pipe(900.0, 3)
        .question(1000.0, 280.0, ItemKind::Coin)
        .question(1040.0, 280.0, ItemKind::Coin)
        .bricks(1200.0, 200.0, 4)
        .question_row(1500.0, 280.0, 3, ItemKind::Coin)
        .pipe(1700.0, 2)
        .pipe(2000.0, 4)
        .question_row(2200.0, 280.0, 6, ItemKind::Coin)
        .bricks(2400.0, 160.0, 3)
        .staircase(2700.0, 5)
        .goombas(&[
            (400.0, 1.0),
            (800.0, 1.0),
            (1300.0, 1.0),
            (1600.0, 1.0),
            (2100.0, 1.0),
            (2300.0, 1.0),
        ])
        .coins(700.0, 350.0, 5)
        .coins(1500.0, 350.0, 3)
        .finish(3200.0, 2900.0)
}

fn level_2() -> Level {
    LevelBuilder::new()
        .ground(0.0, 400.0)
        .ground(500.0, 800.0)
        .ground(900.0, 1200.0)
        .ground(1300.0, 1600.0)
        .ground(1700.0, 2100.0)
        .ground(2200.0, 3400.0)
        .question_row(300.0, 320.0, 3, ItemKind::Coin)
        .question_row(600.0, 240.0, 4, ItemKind::Mushroom)
        .bricks(1000.0, 300.0, 2)
        .question_row(1100.0, 200.0, 3, ItemKind::Coin)
        .pipe(1450.0, 3)
        .question_row(1800.0, 280.0, 5, ItemKind::Coin)
        .bricks(2000.0, 180.0, 3)
        .pipe(2500.0, 2)
        .question_row(2700.0, 260.0, 4, ItemKind::Mushroom)
        .staircase(3000.0, 6)
        .goombas(&[
            (350.0, 1.2),
            (650.0, 1.2),
            (700.0, 1.2),
            (1100.0, 1.5),
            (1500.0, 1.2),
            (1900.0, 1.5),
            (2400.0, 1.2),
            (2800.0, 1.5),
        ])
        .coins(550.0, 380.0, 4)
        .coins(1700.0, 350.0, 6)
        .finish(3400.0, 3200.0)
}

fn level_3() -> Level {
    LevelBuilder::new()
        .ground(0.0, 300.0)
        .ground(400.0, 600.0)
        .ground(700.0, 900.0)
        .ground(1000.0, 1300.0)
        .ground(1400.0, 1600.0)
        .ground(1700.0, 2000.0)
        .ground(2100.0, 2500.0)
        .ground(2600.0, 3600.0)
        .question_row(200.0, 340.0, 3, ItemKind::Mushroom)
        .bricks(500.0, 260.0, 2)
        .question_row(750.0, 300.0, 4, ItemKind::Coin)
        .pipe(1050.0, 2)
        .question_row(1200.0, 220.0, 3, ItemKind::Mushroom)
        .pipe(1500.0, 4)
        .question_row(1800.0, 260.0, 5, ItemKind::Coin)
        .bricks(2000.0, 160.0, 2)
        .bricks(2200.0, 300.0, 3)
        .pipe(2700.0, 3)
        .question_row(2900.0, 240.0, 4, ItemKind::Mushroom)
        .bricks(3100.0, 180.0, 3)
        .staircase(3300.0, 7)
        .goombas(&[
            (250.0, 1.5),
            (500.0, 1.5),
            (550.0, 2.0),
            (850.0, 1.5),
            (1150.0, 2.0),
            (1450.0, 1.5),
            (1800.0, 2.0),
            (2300.0, 2.0),
            (2800.0, 1.5),
            (3000.0, 2.0),
        ])
        .coins(420.0, 380.0, 3)
        .coins(1700.0, 340.0, 5)
        .coins(2600.0, 360.0, 4)
        .finish(3600.0, 3500.0)
}
