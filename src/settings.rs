//! Player preferences
//!
//! Persisted in LocalStorage on the web. Balance is never stored here.

use serde::{Deserialize, Serialize};

use crate::consts::SPIN_DURATION_MS;

/// How long the reels turn before the result is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SpinSpeed {
    #[default]
    Normal,
    Fast,
    Turbo,
}

impl SpinSpeed {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpinSpeed::Normal => "Normal",
            SpinSpeed::Fast => "Fast",
            SpinSpeed::Turbo => "Turbo",
        }
    }

    /// Next speed in the Normal -> Fast -> Turbo cycle
    pub fn next(self) -> Self {
        match self {
            SpinSpeed::Normal => SpinSpeed::Fast,
            SpinSpeed::Fast => SpinSpeed::Turbo,
            SpinSpeed::Turbo => SpinSpeed::Normal,
        }
    }

    /// Reel animation length in milliseconds
    pub fn duration_ms(&self) -> u32 {
        match self {
            SpinSpeed::Normal => SPIN_DURATION_MS,
            SpinSpeed::Fast => SPIN_DURATION_MS / 2,
            SpinSpeed::Turbo => SPIN_DURATION_MS / 8,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub spin_speed: SpinSpeed,

    // === Audio ===
    /// Beeps on spin/win/lose/bet
    pub sound: bool,
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            spin_speed: SpinSpeed::Normal,
            sound: true,
            master_volume: 0.8,
        }
    }
}

impl Settings {
    /// Effective volume (0 when sound is off)
    pub fn volume(&self) -> f32 {
        if self.sound {
            self.master_volume.clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    pub fn spin_duration_ms(&self) -> u32 {
        self.spin_speed.duration_ms()
    }

    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "pastel_slots_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(settings) = serde_json::from_str(&json) {
                    log::info!("Loaded settings from LocalStorage");
                    return settings;
                }
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
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
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
    fn test_spin_speed_durations() {
        assert_eq!(SpinSpeed::Normal.duration_ms(), 2000);
        assert!(SpinSpeed::Fast.duration_ms() < SpinSpeed::Normal.duration_ms());
        assert!(SpinSpeed::Turbo.duration_ms() < SpinSpeed::Fast.duration_ms());
    }

    #[test]
    fn test_spin_speed_cycles() {
        let mut speed = SpinSpeed::default();
        let mut seen = Vec::new();
        for _ in 0..3 {
            seen.push(speed.as_str());
            speed = speed.next();
        }
        assert_eq!(seen, vec!["Normal", "Fast", "Turbo"]);
        assert_eq!(speed, SpinSpeed::Normal);
    }

    #[test]
    fn test_muted_volume() {
        let mut settings = Settings::default();
        assert!(settings.volume() > 0.0);
        settings.sound = false;
        assert_eq!(settings.volume(), 0.0);
    }

    #[test]
    fn test_json_round_trip_keeps_speed() {
        let settings = Settings {
            spin_speed: SpinSpeed::Turbo,
            ..Settings::default()
        };
        let json = serde_json::to_string(&settings).unwrap();
        let back: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(back.spin_speed, SpinSpeed::Turbo);
    }
}
