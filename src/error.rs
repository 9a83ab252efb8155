//! Errors raised by the page adapters. The controller logs and swallows them.
#![cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MusicError {
    #[error("Playback was rejected: {0}")]
    PlaybackRejected(String),

    #[error("Media element call failed: {0}")]
    Media(String),

    #[error("Local storage failed: {0}")]
    Storage(String),

    #[error("Page element '{0}' is missing or has the wrong type")]
    ElementMissing(String),
}
