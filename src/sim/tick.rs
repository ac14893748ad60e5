//! Per-frame simulation tick
//!
//! Core game loop step. The order of the stages matters: later stages read
//! positions already corrected by earlier ones.

use super::collision::{patrol_enemy, resolve_player_x, resolve_player_y};
use super::input::TickInput;
use super::items::{spawn_item, update_items};
use super::particles::{burst, update_particles};
use super::state::{GamePhase, GameState, Player};
use crate::approach;
use crate::colors::{ENEMY_RED, GOLD};
use crate::consts::*;

/// Advance the game state by one frame.
///
/// `canvas_width` is the host's viewport width, used only by the camera.
/// Does nothing outside [`GamePhase::Playing`].
pub fn tick(state: &mut GameState, input: &TickInput, canvas_width: f32) {
    if state.phase != GamePhase::Playing {
        return;
    }

    if state.player.is_dead {
        tick_death_fall(state);
        return;
    }

    steer(&mut state.player, input);

    // Horizontal move + resolve
    let player = &mut state.player;
    player.pos.x = (player.pos.x + player.vel.x).max(0.0);
    player.is_on_ground = false;
    resolve_player_x(player, &state.level.blocks);

    // Vertical move + resolve
    player.pos.y += player.vel.y;
    let hits = resolve_player_y(player, &mut state.level.blocks);
    for hit in hits {
        log::debug!("Question block hit at ({}, {})", hit.block.left(), hit.block.top());
        if let Some(kind) = hit.item {
            spawn_item(state, hit.block, kind);
        }
    }

    // Fell into a pit
    if state.player.pos.y > state.level.death_line() {
        log::debug!("Player fell out of the level");
        state.player.kill();
        return;
    }

    if state.player.is_invincible {
        state.player.invincible_timer = state.player.invincible_timer.saturating_sub(1);
        if state.player.invincible_timer == 0 {
            state.player.is_invincible = false;
        }
    }

    update_items(state);
    update_enemies(state);
    collect_coins(state);
    check_flag(state);
    update_camera(state, canvas_width);
    update_particles(&mut state.particles);
}

/// Dead player: gravity only, then lose a life once off screen
fn tick_death_fall(state: &mut GameState) {
    let player = &mut state.player;
    player.vel.y = (player.vel.y + GRAVITY).min(MAX_FALL_SPEED);
    player.pos.y += player.vel.y;

    if player.pos.y > state.level.despawn_line() {
        player.lives = player.lives.saturating_sub(1);
        if player.lives == 0 {
            log::info!("Game over (score {})", player.score);
            state.phase = GamePhase::GameOver;
        } else {
            log::info!("Life lost, {} remaining", player.lives);
            state.start_level(state.current_level);
        }
    }
}

/// Horizontal input, jump and gravity
fn steer(player: &mut Player, input: &TickInput) {
    if input.left {
        player.vel.x = -MOVE_SPEED;
        player.facing_right = false;
    } else if input.right {
        player.vel.x = MOVE_SPEED;
        player.facing_right = true;
    } else {
        player.vel.x *= FRICTION;
        if player.vel.x.abs() < STOP_THRESHOLD {
            player.vel.x = 0.0;
        }
    }

    if input.jump && player.is_on_ground {
        player.vel.y = JUMP_FORCE;
        player.is_jumping = true;
        player.is_on_ground = false;
    }

    player.vel.y = (player.vel.y + GRAVITY).min(MAX_FALL_SPEED);
}

/// Patrol every living enemy and resolve contact with the player
fn update_enemies(state: &mut GameState) {
    let GameState {
        player,
        level,
        particles,
        particle_cap,
        rng,
        ..
    } = state;
    let death_line = level.death_line();

    for enemy in level.enemies.iter_mut() {
        if !enemy.is_alive {
            continue;
        }

        if !patrol_enemy(enemy, &level.blocks) {
            enemy.pos.y += ENEMY_FALL_STEP;
        }
        // Falling off the level kills silently
        if enemy.pos.y > death_line {
            enemy.is_alive = false;
            continue;
        }

        let player_box = player.rect().inset(ENEMY_HITBOX_INSET);
        let enemy_box = enemy.rect().inset(ENEMY_HITBOX_INSET);
        if !player_box.overlaps(&enemy_box) {
            continue;
        }

        let falling = player.vel.y > 0.0;
        let above_midline = player.rect().bottom() - STOMP_TOLERANCE < enemy.rect().mid_y();
        if falling && above_midline {
            enemy.is_alive = false;
            player.vel.y = JUMP_FORCE * STOMP_BOUNCE_FACTOR;
            player.score += STOMP_SCORE;
            let origin = glam::Vec2::new(enemy.pos.x + enemy.size.x / 2.0, enemy.pos.y);
            burst(particles, *particle_cap, rng, origin, ENEMY_RED, 6);
            log::debug!("Stomped enemy at x={}", enemy.pos.x);
        } else if !player.is_invincible {
            log::debug!("Player hit by enemy at x={}", enemy.pos.x);
            player.kill();
        }
    }
}

/// Pick up level coins the player touches
fn collect_coins(state: &mut GameState) {
    let GameState {
        player,
        level,
        particles,
        particle_cap,
        rng,
        ..
    } = state;

    for coin in level.coins.iter_mut().filter(|c| !c.collected) {
        if player.rect().overlaps(&coin.rect()) {
            coin.collected = true;
            player.coins += 1;
            player.score += COIN_SCORE;
            let origin = glam::Vec2::new(coin.pos.x + coin.size.x / 2.0, coin.pos.y);
            burst(particles, *particle_cap, rng, origin, GOLD, 4);
        }
    }
}

/// Reaching the flag ends the level
fn check_flag(state: &mut GameState) {
    let flag_x = state.level.flag_x;
    let body = state.player.rect();
    if body.right() > flag_x && body.left() < flag_x + FLAG_WIDTH {
        state.player.score += FLAG_SCORE;
        if state.is_final_level() {
            log::info!("Final level cleared (score {})", state.player.score);
            state.phase = GamePhase::Win;
        } else {
            log::info!("Level {} complete", state.current_level);
            state.phase = GamePhase::LevelComplete;
        }
    }
}

/// Ease the camera toward a third of the screen behind the player
fn update_camera(state: &mut GameState, canvas_width: f32) {
    let target = state.player.pos.x - canvas_width / 3.0;
    let mut camera_x = approach(state.camera_x, target, CAMERA_LERP);
    if camera_x < 0.0 {
        camera_x = 0.0;
    }
    // Upper bound wins when the level is narrower than the canvas
    let max_x = state.level.width - canvas_width;
    if camera_x > max_x {
        camera_x = max_x;
    }
    state.camera_x = camera_x;
}
