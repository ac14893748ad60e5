//! Question-block items: spawn, physics and pickup

use glam::Vec2;

use super::collision::settle_item;
use super::particles::burst;
use super::rect::Rect;
use super::state::{GameState, Item, ItemKind};
use crate::colors::{GOLD, MUSHROOM_PINK};
use crate::consts::*;

/// Item edge length
pub const ITEM_SIZE: f32 = 30.0;
/// Upward pop when an item leaves its block
pub const ITEM_POP_VELOCITY: f32 = -6.0;
/// Mushrooms drift right as they emerge
pub const MUSHROOM_DRIFT: f32 = 1.5;
/// Length of the pop-out animation (ticks)
pub const ITEM_BOUNCE_TICKS: u32 = 20;

fn item_color(kind: ItemKind) -> u32 {
    match kind {
        ItemKind::Coin => GOLD,
        ItemKind::Mushroom => MUSHROOM_PINK,
    }
}

/// Pop an item out of the top of a struck block
pub fn spawn_item(state: &mut GameState, block: Rect, kind: ItemKind) {
    let drift = match kind {
        ItemKind::Coin => 0.0,
        ItemKind::Mushroom => MUSHROOM_DRIFT,
    };
    state.items.push(Item {
        pos: Vec2::new(block.left() + 5.0, block.top() - 36.0),
        size: Vec2::splat(ITEM_SIZE),
        vel: Vec2::new(drift, ITEM_POP_VELOCITY),
        kind,
        collected: false,
        bounce_timer: ITEM_BOUNCE_TICKS,
    });
    burst(
        &mut state.particles,
        state.particle_cap,
        &mut state.rng,
        Vec2::new(block.left() + block.size.x / 2.0, block.top() - 10.0),
        item_color(kind),
        6,
    );
    log::debug!("{:?} popped out at ({}, {})", kind, block.left(), block.top());
}

/// Advance every live item one tick and resolve pickups.
///
/// Collected items and items that fall out of the level are removed in place;
/// survivors keep their relative order.
pub fn update_items(state: &mut GameState) {
    let GameState {
        player,
        level,
        items,
        particles,
        particle_cap,
        rng,
        ..
    } = state;
    let despawn_line = level.despawn_line();

    items.retain_mut(|item| {
        if item.collected {
            return false;
        }
        item.bounce_timer = item.bounce_timer.saturating_sub(1);

        item.vel.y = (item.vel.y + GRAVITY).min(MAX_FALL_SPEED);
        item.pos += item.vel;
        settle_item(item, &level.blocks);

        if item.pos.y > despawn_line {
            return false;
        }

        if player.rect().overlaps(&item.rect()) {
            item.collected = true;
            let count = match item.kind {
                ItemKind::Coin => {
                    player.coins += 1;
                    player.score += ITEM_COIN_SCORE;
                    8
                }
                ItemKind::Mushroom => {
                    player.score += MUSHROOM_SCORE;
                    player.make_invincible();
                    12
                }
            };
            let origin = Vec2::new(item.pos.x + item.size.x / 2.0, item.pos.y);
            burst(particles, *particle_cap, rng, origin, item_color(item.kind), count);
            log::debug!("Picked up {:?}", item.kind);
            return false;
        }

        true
    });
}
