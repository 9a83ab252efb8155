//! Persisted playback flag and offset.
//!
//! Both values are stored as plain strings so pages that already wrote
//! `"true"`/`"false"` and a bare float keep resuming where they left off.
#![cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]

use crate::error::MusicError;

#[cfg(target_arch = "wasm32")]
use gloo_storage::{LocalStorage, Storage};

/// Best-effort key-value persistence for the two playback scalars.
pub trait PlaybackStore {
    fn load_playing(&self) -> bool;
    fn load_offset(&self) -> f64;
    fn save_playing(&self, playing: bool) -> Result<(), MusicError>;
    fn save_offset(&self, offset: f64) -> Result<(), MusicError>;
}

pub fn encode_flag(playing: bool) -> &'static str {
    if playing {
        "true"
    } else {
        "false"
    }
}

/// Only the exact string `"true"` means playing.
pub fn decode_flag(raw: Option<&str>) -> bool {
    raw == Some("true")
}

pub fn encode_offset(offset: f64) -> String {
    offset.to_string()
}

/// Parse the leading number of `raw`, ignoring trailing garbage.
/// Missing, unparseable, non-finite and negative values all read as 0.
pub fn decode_offset(raw: Option<&str>) -> f64 {
    let Some(raw) = raw else {
        return 0.0;
    };
    let text = raw.trim();
    let end = numeric_prefix_len(text);
    match text[..end].parse::<f64>() {
        Ok(value) if value.is_finite() && value > 0.0 => value,
        _ => 0.0,
    }
}

fn numeric_prefix_len(text: &str) -> usize {
    let bytes = text.as_bytes();
    let mut i = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        i += 1;
    }
    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let mut digits = i - int_start;
    if i < bytes.len() && bytes[i] == b'.' {
        let frac_start = i + 1;
        let mut j = frac_start;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        digits += j - frac_start;
        if digits > 0 {
            i = j;
        }
    }
    if digits == 0 {
        return 0;
    }
    if i < bytes.len() && matches!(bytes[i], b'e' | b'E') {
        let mut j = i + 1;
        if matches!(bytes.get(j), Some(b'+') | Some(b'-')) {
            j += 1;
        }
        let exp_start = j;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > exp_start {
            i = j;
        }
    }
    i
}

/// `localStorage`-backed store.
#[cfg(target_arch = "wasm32")]
#[derive(Clone)]
pub struct LocalPlaybackStore {
    playing_key: String,
    offset_key: String,
}

#[cfg(target_arch = "wasm32")]
impl LocalPlaybackStore {
    pub fn new(playing_key: impl Into<String>, offset_key: impl Into<String>) -> Self {
        Self {
            playing_key: playing_key.into(),
            offset_key: offset_key.into(),
        }
    }

    fn read(&self, key: &str) -> Option<String> {
        LocalStorage::raw().get_item(key).ok().flatten()
    }

    fn write(&self, key: &str, value: &str) -> Result<(), MusicError> {
        LocalStorage::raw().set_item(key, value).map_err(|e| {
            MusicError::Storage(
                e.as_string()
                    .unwrap_or_else(|| format!("could not write '{key}'")),
            )
        })
    }
}

#[cfg(target_arch = "wasm32")]
impl PlaybackStore for LocalPlaybackStore {
    fn load_playing(&self) -> bool {
        decode_flag(self.read(&self.playing_key).as_deref())
    }

    fn load_offset(&self) -> f64 {
        decode_offset(self.read(&self.offset_key).as_deref())
    }

    fn save_playing(&self, playing: bool) -> Result<(), MusicError> {
        self.write(&self.playing_key, encode_flag(playing))
    }

    fn save_offset(&self, offset: f64) -> Result<(), MusicError> {
        self.write(&self.offset_key, &encode_offset(offset))
    }
}

/// In-memory store holding the raw strings, for host tests.
#[cfg(test)]
#[derive(Clone, Default)]
pub struct MemoryPlaybackStore {
    pub playing: std::rc::Rc<std::cell::RefCell<Option<String>>>,
    pub offset: std::rc::Rc<std::cell::RefCell<Option<String>>>,
    pub fail_writes: std::rc::Rc<std::cell::Cell<bool>>,
}

#[cfg(test)]
impl MemoryPlaybackStore {
    pub fn with(playing: Option<&str>, offset: Option<&str>) -> Self {
        let store = Self::default();
        *store.playing.borrow_mut() = playing.map(str::to_string);
        *store.offset.borrow_mut() = offset.map(str::to_string);
        store
    }

    pub fn raw_playing(&self) -> Option<String> {
        self.playing.borrow().clone()
    }

    pub fn raw_offset(&self) -> Option<String> {
        self.offset.borrow().clone()
    }
}

#[cfg(test)]
impl PlaybackStore for MemoryPlaybackStore {
    fn load_playing(&self) -> bool {
        decode_flag(self.playing.borrow().as_deref())
    }

    fn load_offset(&self) -> f64 {
        decode_offset(self.offset.borrow().as_deref())
    }

    fn save_playing(&self, playing: bool) -> Result<(), MusicError> {
        if self.fail_writes.get() {
            return Err(MusicError::Storage("quota exceeded".to_string()));
        }
        *self.playing.borrow_mut() = Some(encode_flag(playing).to_string());
        Ok(())
    }

    fn save_offset(&self, offset: f64) -> Result<(), MusicError> {
        if self.fail_writes.get() {
            return Err(MusicError::Storage("quota exceeded".to_string()));
        }
        *self.offset.borrow_mut() = Some(encode_offset(offset));
        Ok(())
    }
}
