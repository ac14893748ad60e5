//! Collision resolution against level blocks
//!
//! Every pass checks every solid block independently and applies a correction
//! for each overlap it finds, so when several blocks overlap at once the last
//! one in level order decides the final position.

use super::rect::Rect;
use super::state::{Block, Enemy, Item, ItemKind, Player};

/// A question block struck from below during vertical resolution
#[derive(Debug, Clone, Copy)]
pub struct BlockHit {
    /// Bounds of the struck block
    pub block: Rect,
    pub item: Option<ItemKind>,
}

/// Push the player out of blocks along x after horizontal movement
pub fn resolve_player_x(player: &mut Player, blocks: &[Block]) {
    for block in blocks.iter().filter(|b| b.is_solid()) {
        let b = block.rect();
        if player.rect().overlaps(&b) {
            if player.vel.x > 0.0 {
                player.pos.x = b.left() - player.size.x;
            } else if player.vel.x < 0.0 {
                player.pos.x = b.right();
            }
            player.vel.x = 0.0;
        }
    }
}

/// Push the player out of blocks along y after vertical movement.
///
/// Landing sets `is_on_ground`. Bumping the underside of an unhit question
/// block marks it hit and reports it so the caller can spawn its item.
pub fn resolve_player_y(player: &mut Player, blocks: &mut [Block]) -> Vec<BlockHit> {
    let mut hits = Vec::new();
    for block in blocks.iter_mut().filter(|b| b.is_solid()) {
        let b = block.rect();
        if !player.rect().overlaps(&b) {
            continue;
        }
        if player.vel.y > 0.0 {
            player.pos.y = b.top() - player.size.y;
            player.vel.y = 0.0;
            player.is_on_ground = true;
            player.is_jumping = false;
        } else if player.vel.y < 0.0 {
            player.pos.y = b.bottom();
            player.vel.y = 0.0;
            if block.strike() {
                hits.push(BlockHit {
                    block: b,
                    item: block.item(),
                });
            }
        }
    }
    hits
}

/// Walk an enemy one tick along its patrol.
///
/// Overlapping a block snaps the enemy on top of it; a forward probe that
/// clips a block turns it around. The probe is trimmed 2px at the top and
/// 4px overall so the ground the enemy stands on never counts as a wall.
/// Returns whether the enemy found support this tick.
pub fn patrol_enemy(enemy: &mut Enemy, blocks: &[Block]) -> bool {
    enemy.pos.x += enemy.step();

    let mut supported = false;
    for block in blocks.iter().filter(|b| b.is_solid()) {
        let b = block.rect();
        if enemy.rect().overlaps(&b) && enemy.vel.y >= 0.0 {
            enemy.pos.y = b.top() - enemy.size.y;
            supported = true;
        }
        let probe = Rect::new(
            enemy.pos.x + enemy.step(),
            enemy.pos.y - 2.0,
            enemy.size.x,
            enemy.size.y - 4.0,
        );
        if probe.overlaps(&b) {
            enemy.direction = -enemy.direction;
        }
    }
    supported
}

/// Rest a falling item on blocks; mushrooms turn around at walls
pub fn settle_item(item: &mut Item, blocks: &[Block]) {
    for block in blocks.iter().filter(|b| b.is_solid()) {
        let b = block.rect();
        if !item.rect().overlaps(&b) {
            continue;
        }
        if item.vel.y > 0.0 {
            item.pos.y = b.top() - item.size.y;
            item.vel.y = 0.0;
        }
        // Re-test after landing: the block just stood on is not a wall
        if item.kind == ItemKind::Mushroom && item.rect().overlaps(&b) {
            let r = item.rect();
            let into_left_edge = item.vel.x > 0.0 && r.right() > b.left() && r.left() < b.left();
            let into_right_edge =
                item.vel.x < 0.0 && r.left() < b.right() && r.right() > b.right();
            if into_left_edge || into_right_edge {
                item.vel.x = -item.vel.x;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::state::BlockKind;
    use glam::Vec2;

    fn ground_row(start: f32, tiles: usize) -> Vec<Block> {
        (0..tiles)
            .map(|i| {
                Block::new(
                    start + i as f32 * TILE,
                    GROUND_Y,
                    TILE,
                    TILE * 3.0,
                    BlockKind::Ground,
                )
            })
            .collect()
    }

    #[test]
    fn test_player_pushed_out_left_of_wall() {
        let blocks = vec![Block::new(200.0, 360.0, TILE, TILE, BlockKind::Pipe)];
        let mut player = Player::new(Vec2::new(165.0, 360.0));
        player.vel.x = MOVE_SPEED;

        resolve_player_x(&mut player, &blocks);
        assert_eq!(player.pos.x, 160.0);
        assert_eq!(player.vel.x, 0.0);
    }

    #[test]
    fn test_player_pushed_out_right_of_wall() {
        let blocks = vec![Block::new(200.0, 360.0, TILE, TILE, BlockKind::Brick)];
        let mut player = Player::new(Vec2::new(236.0, 360.0));
        player.vel.x = -MOVE_SPEED;

        resolve_player_x(&mut player, &blocks);
        assert_eq!(player.pos.x, 240.0);
        assert_eq!(player.vel.x, 0.0);
    }

    #[test]
    fn test_invisible_blocks_ignored() {
        let mut blocks = vec![Block::new(0.0, 0.0, 400.0, 400.0, BlockKind::Invisible)];
        let mut player = Player::new(Vec2::new(100.0, 100.0));
        player.vel = Vec2::new(MOVE_SPEED, 5.0);

        resolve_player_x(&mut player, &blocks);
        let hits = resolve_player_y(&mut player, &mut blocks);
        assert!(hits.is_empty());
        assert_eq!(player.pos, Vec2::new(100.0, 100.0));
        assert_eq!(player.vel, Vec2::new(MOVE_SPEED, 5.0));
    }

    #[test]
    fn test_player_lands_on_ground() {
        let mut blocks = ground_row(0.0, 4);
        let mut player = Player::new(Vec2::new(40.0, 405.0));
        player.vel.y = 5.0;
        player.is_jumping = true;

        let hits = resolve_player_y(&mut player, &mut blocks);
        assert!(hits.is_empty());
        assert_eq!(player.pos.y, GROUND_Y - TILE);
        assert_eq!(player.vel.y, 0.0);
        assert!(player.is_on_ground);
        assert!(!player.is_jumping);
    }

    #[test]
    fn test_head_bump_strikes_question_block_once() {
        let mut blocks = vec![Block::new(
            100.0,
            280.0,
            TILE,
            TILE,
            BlockKind::Question {
                item: Some(ItemKind::Coin),
            },
        )];
        let mut player = Player::new(Vec2::new(100.0, 315.0));
        player.vel.y = -10.0;

        let hits = resolve_player_y(&mut player, &mut blocks);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].item, Some(ItemKind::Coin));
        assert_eq!(hits[0].block.pos, Vec2::new(100.0, 280.0));
        assert_eq!(player.pos.y, 320.0);
        assert_eq!(player.vel.y, 0.0);
        assert!(blocks[0].is_hit);

        // Second bump: block stays hit, nothing reported
        player.pos.y = 315.0;
        player.vel.y = -10.0;
        assert!(resolve_player_y(&mut player, &mut blocks).is_empty());
    }

    #[test]
    fn test_head_bump_on_brick_does_not_mark_hit() {
        let mut blocks = vec![Block::new(100.0, 280.0, TILE, TILE, BlockKind::Brick)];
        let mut player = Player::new(Vec2::new(100.0, 315.0));
        player.vel.y = -10.0;

        assert!(resolve_player_y(&mut player, &mut blocks).is_empty());
        assert!(!blocks[0].is_hit);
        assert_eq!(player.pos.y, 320.0);
    }

    #[test]
    fn test_enemy_turns_at_wall() {
        let mut blocks = ground_row(0.0, 10);
        blocks.push(Block::new(200.0, GROUND_Y - TILE, TILE * 2.0, TILE, BlockKind::Pipe));
        let mut enemy = Enemy::goomba(158.0, GROUND_Y - TILE, 1.0);

        patrol_enemy(&mut enemy, &blocks);
        assert_eq!(enemy.pos.x, 159.0);
        // Probe at 160 touches but does not overlap the pipe
        assert_eq!(enemy.direction, 1.0);

        patrol_enemy(&mut enemy, &blocks);
        assert_eq!(enemy.pos.x, 160.0);
        assert_eq!(enemy.direction, -1.0);

        patrol_enemy(&mut enemy, &blocks);
        assert_eq!(enemy.pos.x, 159.0);
    }

    #[test]
    fn test_enemy_falls_without_support() {
        let blocks = ground_row(0.0, 2);
        let mut enemy = Enemy::goomba(300.0, GROUND_Y - TILE, 1.0);
        let y = enemy.pos.y;

        let supported = patrol_enemy(&mut enemy, &blocks);
        assert!(!supported);
        // Caller applies the fall step
        assert_eq!(enemy.pos.y, y);
    }

    #[test]
    fn test_enemy_snaps_onto_ground_when_sunk() {
        let blocks = ground_row(0.0, 10);
        let mut enemy = Enemy::goomba(100.0, GROUND_Y - TILE + ENEMY_FALL_STEP, 1.0);

        assert!(patrol_enemy(&mut enemy, &blocks));
        assert_eq!(enemy.pos.y, GROUND_Y - TILE);
        assert_eq!(enemy.direction, 1.0);
    }

    fn mushroom(x: f32, y: f32, vx: f32) -> Item {
        Item {
            pos: Vec2::new(x, y),
            size: Vec2::splat(30.0),
            vel: Vec2::new(vx, 0.5),
            kind: ItemKind::Mushroom,
            collected: false,
            bounce_timer: 0,
        }
    }

    #[test]
    fn test_mushroom_crosses_ground_seams() {
        let blocks = ground_row(0.0, 4);
        for vx in [1.5, -1.5] {
            // Straddling the seam at x=80, sunk half a pixel into the ground
            let mut item = mushroom(65.0, GROUND_Y - 30.0 + 0.5, vx);
            settle_item(&mut item, &blocks);
            assert_eq!(item.pos.y, GROUND_Y - 30.0);
            assert_eq!(item.vel.y, 0.0);
            assert_eq!(item.vel.x, vx);
        }
    }

    #[test]
    fn test_mushroom_bounces_off_pipe() {
        let mut blocks = ground_row(0.0, 10);
        blocks.push(Block::new(200.0, GROUND_Y - TILE, TILE * 2.0, TILE, BlockKind::Pipe));

        let mut item = mushroom(171.0, GROUND_Y - 30.0 + 0.5, 1.5);
        settle_item(&mut item, &blocks);
        assert_eq!(item.pos.y, GROUND_Y - 30.0);
        assert_eq!(item.vel.x, -1.5);

        let mut item = mushroom(279.0, GROUND_Y - 30.0 + 0.5, -1.5);
        settle_item(&mut item, &blocks);
        assert_eq!(item.vel.x, 1.5);
    }

    #[test]
    fn test_coin_item_never_bounces() {
        let mut blocks = ground_row(0.0, 10);
        blocks.push(Block::new(200.0, GROUND_Y - TILE, TILE * 2.0, TILE, BlockKind::Pipe));
        let mut item = mushroom(171.0, GROUND_Y - 30.0 + 0.5, 1.5);
        item.kind = ItemKind::Coin;

        settle_item(&mut item, &blocks);
        assert_eq!(item.vel.x, 1.5);
    }
}
