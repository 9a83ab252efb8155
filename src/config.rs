use serde::Deserialize;

#[cfg(target_arch = "wasm32")]
use dioxus::logger::tracing::warn;
#[cfg(target_arch = "wasm32")]
use gloo_storage::{errors::StorageError, LocalStorage, Storage};

#[cfg(target_arch = "wasm32")]
const CONFIG_KEY: &str = "music.controller_config";

const MIN_AUTOSAVE_INTERVAL_MS: u32 = 250;

/// Controller settings. Every field falls back to its default when missing
/// from the stored record.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ControllerConfig {
    #[serde(default = "default_button_id")]
    pub button_id: String,
    #[serde(default = "default_audio_id")]
    pub audio_id: String,
    #[serde(default = "default_audio_src")]
    pub audio_src: String,
    #[serde(default = "default_playing_key")]
    pub playing_key: String,
    #[serde(default = "default_offset_key")]
    pub offset_key: String,
    #[serde(default = "default_volume")]
    pub volume: f64,
    #[serde(default = "default_autosave_interval_ms")]
    pub autosave_interval_ms: u32,
    #[serde(default)]
    pub keyboard_shortcut: bool,
}

fn default_button_id() -> String {
    "musicBtn".to_string()
}

fn default_audio_id() -> String {
    "backgroundMusic".to_string()
}

fn default_audio_src() -> String {
    "/assets/background-music.mp3".to_string()
}

fn default_playing_key() -> String {
    "musicPlaying".to_string()
}

fn default_offset_key() -> String {
    "musicTime".to_string()
}

fn default_volume() -> f64 {
    0.5
}

fn default_autosave_interval_ms() -> u32 {
    3000
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            button_id: default_button_id(),
            audio_id: default_audio_id(),
            audio_src: default_audio_src(),
            playing_key: default_playing_key(),
            offset_key: default_offset_key(),
            volume: default_volume(),
            autosave_interval_ms: default_autosave_interval_ms(),
            keyboard_shortcut: false,
        }
    }
}

impl ControllerConfig {
    pub fn sanitized(mut self) -> Self {
        self.volume = normalize_volume(self.volume);
        self.autosave_interval_ms = self.autosave_interval_ms.max(MIN_AUTOSAVE_INTERVAL_MS);
        self
    }
}

fn normalize_volume(value: f64) -> f64 {
    if !value.is_finite() {
        return default_volume();
    }
    value.clamp(0.0, 1.0)
}

/// Load the stored configuration, falling back to defaults.
#[cfg(target_arch = "wasm32")]
pub fn load_config() -> ControllerConfig {
    match LocalStorage::get::<ControllerConfig>(CONFIG_KEY) {
        Ok(config) => config.sanitized(),
        Err(StorageError::KeyNotFound(_)) => ControllerConfig::default(),
        Err(err) => {
            warn!("Ignoring stored controller config: {err}");
            ControllerConfig::default()
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn load_config() -> ControllerConfig {
    ControllerConfig::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(json: &str) -> ControllerConfig {
        serde_json::from_str::<ControllerConfig>(json)
            .unwrap()
            .sanitized()
    }

    #[test]
    fn empty_record_uses_defaults() {
        let config = decode("{}");
        assert_eq!(config, ControllerConfig::default());
        assert_eq!(config.playing_key, "musicPlaying");
        assert_eq!(config.offset_key, "musicTime");
        assert_eq!(config.autosave_interval_ms, 3000);
        assert!(!config.keyboard_shortcut);
    }

    #[test]
    fn partial_record_keeps_other_defaults() {
        let config = decode(r#"{"volume":0.25,"keyboard_shortcut":true}"#);
        assert_eq!(config.volume, 0.25);
        assert!(config.keyboard_shortcut);
        assert_eq!(config.button_id, "musicBtn");
        assert_eq!(config.audio_id, "backgroundMusic");
    }

    #[test]
    fn out_of_range_values_are_sanitized() {
        let config = decode(r#"{"volume":3.0,"autosave_interval_ms":10}"#);
        assert_eq!(config.volume, 1.0);
        assert_eq!(config.autosave_interval_ms, 250);

        let quiet = decode(r#"{"volume":-2.0}"#);
        assert_eq!(quiet.volume, 0.0);
    }

    #[test]
    fn non_finite_volume_falls_back() {
        let config = ControllerConfig {
            volume: f64::NAN,
            ..ControllerConfig::default()
        }
        .sanitized();
        assert_eq!(config.volume, 0.5);
    }

    #[test]
    fn malformed_record_is_an_error() {
        assert!(serde_json::from_str::<ControllerConfig>("not json").is_err());
    }
}
