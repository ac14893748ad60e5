//! Browser bindings
//!
//! A JavaScript host owns the canvas, the animation frame loop and drawing.
//! It forwards key events here, calls `tick()` once per frame and reads the
//! world back through the getters or a JSON snapshot.

use wasm_bindgen::prelude::*;

use crate::settings::Settings;
use crate::sim::{GameState, TickInput, tick};

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        // Logger already installed by an earlier module instance
        return;
    }
    log::info!("Brick Hop starting...");
}

/// Space arrives as `"Space"`/`"Spacebar"` from some hosts; bindings use `" "`
fn normalize_key(key: &str) -> &str {
    match key {
        "Space" | "Spacebar" => " ",
        other => other,
    }
}

fn js_error(e: serde_json::Error) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Game instance holding all state
#[wasm_bindgen]
pub struct WasmGame {
    state: GameState,
    settings: Settings,
}

#[wasm_bindgen]
impl WasmGame {
    /// `settings_json` may be empty for defaults
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u64, settings_json: &str) -> Result<WasmGame, JsValue> {
        let settings = if settings_json.trim().is_empty() {
            Settings::default()
        } else {
            Settings::from_json(settings_json).map_err(js_error)?
        };
        let mut state = GameState::new(seed);
        state.particle_cap = settings.max_particles();
        log::info!(
            "Game initialized with seed: {} (quality {})",
            seed,
            settings.quality.as_str()
        );
        Ok(Self { state, settings })
    }

    pub fn key_down(&mut self, key: &str) {
        self.state.keys.press(normalize_key(key));
    }

    pub fn key_up(&mut self, key: &str) {
        self.state.keys.release(normalize_key(key));
    }

    /// Window lost focus: nothing stays held
    pub fn blur(&mut self) {
        self.state.keys.clear();
    }

    /// Advance one frame
    pub fn tick(&mut self) {
        let input = TickInput::from_keys(&self.state.keys, &self.settings.bindings);
        tick(&mut self.state, &input, self.settings.canvas_width);
    }

    pub fn start(&mut self) -> bool {
        self.state.start()
    }

    pub fn continue_game(&mut self) -> bool {
        self.state.continue_game()
    }

    pub fn restart(&mut self) -> bool {
        self.state.restart()
    }

    /// One of `title`, `playing`, `gameover`, `win`, `levelComplete`
    pub fn phase(&self) -> String {
        self.state.phase.as_str().to_string()
    }

    pub fn score(&self) -> f64 {
        self.state.player.score as f64
    }

    pub fn coins(&self) -> u32 {
        self.state.player.coins
    }

    pub fn lives(&self) -> u32 {
        self.state.player.lives
    }

    pub fn level(&self) -> u32 {
        self.state.current_level
    }

    pub fn camera_x(&self) -> f32 {
        self.state.camera_x
    }

    pub fn canvas_width(&self) -> f32 {
        self.settings.canvas_width
    }

    pub fn canvas_height(&self) -> f32 {
        self.settings.canvas_height
    }

    /// Full world as JSON for the renderer
    pub fn snapshot_json(&self) -> Result<String, JsValue> {
        self.state.to_snapshot().map_err(js_error)
    }

    /// Replace the world with a snapshot taken by `snapshot_json`
    pub fn load_snapshot(&mut self, json: &str) -> Result<(), JsValue> {
        let mut state = GameState::from_snapshot(json).map_err(js_error)?;
        state.particle_cap = self.settings.max_particles();
        self.state = state;
        Ok(())
    }
}

