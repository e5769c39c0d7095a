//! Player preferences
//!
//! Persisted separately from the best time in LocalStorage.

use serde::{Deserialize, Serialize};

use crate::tuning::{ControlScheme, SlowActivation, SpawnTrajectory, Tuning};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Sound cues on/off
    pub sound_enabled: bool,
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,

    // === Gameplay ===
    pub control: ControlScheme,
    pub slow_activation: SlowActivation,
    pub trajectory: SpawnTrajectory,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sound_enabled: true,
            master_volume: 0.8,
            control: ControlScheme::default(),
            slow_activation: SlowActivation::default(),
            trajectory: SpawnTrajectory::default(),
        }
    }
}

impl Settings {
    /// Balance for the next round with the chosen variants applied
    pub fn tuning(&self) -> Tuning {
        Tuning {
            control: self.control,
            slow_activation: self.slow_activation,
            trajectory: self.trajectory,
            ..Tuning::default()
        }
    }

    /// Volume to hand to the audio backend
    pub fn effective_volume(&self) -> f32 {
        if self.sound_enabled {
            self.master_volume.clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    pub fn toggle_sound(&mut self) -> bool {
        self.sound_enabled = !self.sound_enabled;
        self.sound_enabled
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "bounce_dodge_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage
            && let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY)
        {
            match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from LocalStorage");
                    return settings;
                }
                Err(e) => log::warn!("Discarding unreadable settings: {}", e),
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

        if let Some(storage) = storage
            && let Ok(json) = serde_json::to_string(self)
        {
            if storage.set_item(Self::STORAGE_KEY, &json).is_err() {
                log::warn!("Failed to save settings");
            } else {
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
    fn test_tuning_carries_variants() {
        let settings = Settings {
            control: ControlScheme::Keys,
            slow_activation: SlowActivation::Immediate,
            trajectory: SpawnTrajectory::Aimed,
            ..Default::default()
        };
        let tuning = settings.tuning();
        assert_eq!(tuning.control, ControlScheme::Keys);
        assert_eq!(tuning.slow_activation, SlowActivation::Immediate);
        assert_eq!(tuning.trajectory, SpawnTrajectory::Aimed);
        assert_eq!(tuning.width, 800.0);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{"sound_enabled":false}"#).expect("valid json");
        assert!(!settings.sound_enabled);
        assert_eq!(settings.master_volume, 0.8);
        assert_eq!(settings.control, ControlScheme::Pointer);
    }

    #[test]
    fn test_muted_volume_is_zero() {
        let mut settings = Settings::default();
        assert!(settings.effective_volume() > 0.0);
        assert!(!settings.toggle_sound());
        assert_eq!(settings.effective_volume(), 0.0);
    }
}
