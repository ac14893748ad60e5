//! Host settings and preferences
//!
//! Plain JSON, owned by the host shell. The simulation never reads these
//! directly; the host applies them (particle cap, canvas width, key bindings).

use serde::{Deserialize, Serialize};

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    Medium,
    #[default]
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Maximum live particles for this preset
    pub fn max_particles(&self) -> usize {
        match self {
            QualityPreset::Low => 64,
            QualityPreset::Medium => 256,
            QualityPreset::High => 512,
        }
    }
}

/// Key identifiers bound to each action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub left: Vec<String>,
    pub right: Vec<String>,
    pub jump: Vec<String>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        fn keys(names: &[&str]) -> Vec<String> {
            names.iter().map(|k| k.to_string()).collect()
        }
        Self {
            left: keys(&["ArrowLeft", "a"]),
            right: keys(&["ArrowRight", "d"]),
            jump: keys(&["ArrowUp", "w", " "]),
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,

    // === Visual Effects ===
    /// Particle effects (bursts on stomps, coins, items)
    pub particles: bool,

    // === Viewport ===
    /// Canvas width in pixels; drives the camera
    pub canvas_width: f32,
    /// Canvas height in pixels (renderer only)
    pub canvas_height: f32,

    // === Input ===
    pub bindings: KeyBindings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::High,
            particles: true,
            canvas_width: 800.0,
            canvas_height: 560.0,
            bindings: KeyBindings::default(),
        }
    }
}

impl Settings {
    /// Create settings from a quality preset (applies preset defaults)
    pub fn from_preset(preset: QualityPreset) -> Self {
        Self {
            quality: preset,
            ..Self::default()
        }
    }

    /// Effective particle count cap
    pub fn max_particles(&self) -> usize {
        if !self.particles {
            0
        } else {
            self.quality.max_particles()
        }
    }

    /// Parse settings from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load settings from a JSON file, falling back to defaults (native only)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: &std::path::Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Could not read {}: {}, using defaults", path.display(), e);
                return Self::default();
            }
        };

        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Invalid settings in {}: {}, using defaults", path.display(), e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_particle_caps() {
        assert_eq!(QualityPreset::Low.max_particles(), 64);
        assert_eq!(QualityPreset::Medium.max_particles(), 256);
        assert_eq!(QualityPreset::High.max_particles(), 512);
        assert_eq!(QualityPreset::from_str("MED"), Some(QualityPreset::Medium));
        assert_eq!(QualityPreset::from_str("ultra"), None);
        assert_eq!(QualityPreset::Low.as_str(), "Low");
    }

    #[test]
    fn test_particles_off_means_zero_cap() {
        let mut settings = Settings::from_preset(QualityPreset::Low);
        assert_eq!(settings.max_particles(), 64);
        settings.particles = false;
        assert_eq!(settings.max_particles(), 0);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings = Settings::from_json(r#"{"quality": "Low", "canvas_width": 1024}"#)
            .expect("valid settings");
        assert_eq!(settings.quality, QualityPreset::Low);
        assert_eq!(settings.canvas_width, 1024.0);
        assert_eq!(settings.canvas_height, 560.0);
        assert!(settings.particles);
        assert_eq!(settings.bindings, KeyBindings::default());
    }

    #[test]
    fn test_custom_bindings() {
        let settings =
            Settings::from_json(r#"{"bindings": {"jump": ["k"]}}"#).expect("valid settings");
        assert_eq!(settings.bindings.jump, vec!["k".to_string()]);
        // Unspecified actions keep their defaults
        assert_eq!(settings.bindings.left, KeyBindings::default().left);
    }

    #[test]
    fn test_json_roundtrip_and_errors() {
        let settings = Settings::from_preset(QualityPreset::Medium);
        let json = settings.to_json().expect("serialize");
        assert_eq!(Settings::from_json(&json).expect("parse"), settings);

        assert!(Settings::from_json("not json").is_err());
        assert!(Settings::from_json(r#"{"quality": "Ultra"}"#).is_err());
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let settings = Settings::load(std::path::Path::new("/nonexistent/brick-hop.json"));
        assert_eq!(settings, Settings::default());
    }
}
