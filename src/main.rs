//! Brick Hop headless runner
//!
//! Plays the game with a scripted autopilot and prints a JSON summary.
//! The browser build drives the library through `brick_hop::wasm` instead.
//!
//! Usage: `brick-hop [settings.json] [seed]`

#[cfg(not(target_arch = "wasm32"))]
mod autopilot {
    use brick_hop::consts::*;
    use brick_hop::settings::Settings;
    use brick_hop::sim::{GamePhase, GameState, Rect, TickInput, tick};

    /// Hard stop so a stuck autopilot cannot spin forever
    pub const MAX_TICKS: u64 = 60 * 60 * 10;

    /// How far ahead the autopilot looks for trouble
    const LOOKAHEAD: f32 = TILE * 1.5;

    /// Something ahead of the player that needs a jump
    fn needs_jump(state: &GameState) -> bool {
        let body = state.player.rect();
        let ahead = Rect::new(body.right(), body.top(), LOOKAHEAD, body.size.y);

        let wall = state
            .level
            .blocks
            .iter()
            .any(|b| b.is_solid() && ahead.overlaps(&b.rect()));

        let enemy = state
            .level
            .enemies
            .iter()
            .any(|e| e.is_alive && ahead.offset(glam::Vec2::new(TILE, 0.0)).overlaps(&e.rect()));

        // Probe one pixel below the feet, a tile ahead
        let footing = Rect::new(body.right() + TILE, body.bottom(), TILE, 1.0);
        let gap = !state
            .level
            .blocks
            .iter()
            .any(|b| b.is_solid() && footing.overlaps(&b.rect()));

        wall || enemy || gap
    }

    fn hold(state: &mut GameState, key: &str, held: bool) {
        if held {
            state.keys.press(key);
        } else {
            state.keys.release(key);
        }
    }

    pub fn run(settings: &Settings, seed: u64) -> serde_json::Value {
        let mut state = GameState::new(seed);
        state.particle_cap = settings.max_particles();
        state.start();

        let right_key = settings.bindings.right.first().cloned().unwrap_or_default();
        let jump_key = settings.bindings.jump.first().cloned().unwrap_or_default();
        if right_key.is_empty() || jump_key.is_empty() {
            log::warn!("Right or jump has no key bound, autopilot will stall");
        }

        let mut ticks = 0u64;
        let mut levels_cleared = 0u32;
        while ticks < MAX_TICKS {
            match state.phase {
                GamePhase::LevelComplete => {
                    levels_cleared += 1;
                    state.continue_game();
                }
                GamePhase::GameOver | GamePhase::Win => break,
                GamePhase::Title | GamePhase::Playing => {}
            }

            let jump = state.player.is_on_ground && needs_jump(&state);
            hold(&mut state, &right_key, true);
            hold(&mut state, &jump_key, jump);

            let input = TickInput::from_keys(&state.keys, &settings.bindings);
            tick(&mut state, &input, settings.canvas_width);
            ticks += 1;
        }

        if ticks >= MAX_TICKS {
            log::warn!("Autopilot stopped after {} ticks", ticks);
        }

        serde_json::json!({
            "seed": seed,
            "ticks": ticks,
            "phase": format!("{:?}", state.phase),
            "level": state.current_level,
            "levels_cleared": levels_cleared,
            "score": state.player.score,
            "coins": state.player.coins,
            "lives": state.player.lives,
        })
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::path::Path;

    use brick_hop::settings::Settings;

    env_logger::init();
    log::info!("Brick Hop (native) starting...");

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => Settings::load(Path::new(&path)),
        None => Settings::default(),
    };
    let seed = match args.next().map(|s| s.parse::<u64>()) {
        Some(Ok(seed)) => seed,
        Some(Err(e)) => {
            log::warn!("Bad seed ({}), using 0", e);
            0
        }
        None => 0,
    };

    let summary = autopilot::run(&settings, seed);
    println!("{}", summary);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is `brick_hop::wasm::wasm_start`
}
