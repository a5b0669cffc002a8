//! Player preferences
//!
//! Persisted as JSON in LocalStorage. Missing fields fall back to their
//! defaults so older saved settings keep loading.

use serde::{Deserialize, Serialize};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Silence everything
    pub muted: bool,
    /// Laser sample location, relative to the page (trunk copies
    /// `assets/laser.wav` next to `index.html`)
    pub sound_url: String,
    /// How long startup waits for the sample before falling back to a
    /// synthesized laser
    pub sound_timeout_ms: u32,

    // === Simulation ===
    /// Fixed RNG seed (random per page load when unset)
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            sound_url: "laser.wav".to_string(),
            sound_timeout_ms: 3000,
            seed: None,
        }
    }
}

impl Settings {
    /// Volume actually applied to sound effects
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            (self.master_volume * self.sfx_volume).clamp(0.0, 1.0)
        }
    }

    /// Parse settings JSON, falling back to defaults on malformed input
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Ignoring malformed settings: {e}");
                Self::default()
            }
        }
    }

    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "invaders_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                log::info!("Loaded settings from LocalStorage");
                return Self::from_json(&json);
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            match serde_json::to_string(self) {
                Ok(json) => {
                    let _ = storage.set_item(Self::STORAGE_KEY, &json);
                    log::info!("Settings saved");
                }
                Err(e) => log::warn!("Could not serialize settings: {e}"),
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.sound_url, "laser.wav");
        assert_eq!(settings.sound_timeout_ms, 3000);
        assert_eq!(settings.seed, None);
        assert!((settings.effective_volume() - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_default_sound_is_shipped() {
        let settings = Settings::default();
        let asset = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("assets")
            .join(&settings.sound_url);
        assert!(asset.is_file(), "missing {}", asset.display());

        let page = include_str!("../index.html");
        assert!(page.contains(&format!(
            r#"rel="copy-file" href="assets/{}""#,
            settings.sound_url
        )));
    }

    #[test]
    fn test_muted_is_silent() {
        let settings = Settings {
            muted: true,
            ..Default::default()
        };
        assert_eq!(settings.effective_volume(), 0.0);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{"muted": true, "seed": 42}"#);
        assert!(settings.muted);
        assert_eq!(settings.seed, Some(42));
        assert_eq!(settings.sound_url, "laser.wav");
        assert_eq!(settings.master_volume, 0.8);
    }

    #[test]
    fn test_malformed_json_falls_back() {
        assert_eq!(Settings::from_json("not json"), Settings::default());
    }
}
