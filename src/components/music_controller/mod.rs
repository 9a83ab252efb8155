//! Background music toggle: a play/pause button whose state and playback
//! offset survive page reloads.
#![cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]

mod media;
mod playback_controller;

#[cfg(target_arch = "wasm32")]
mod controller_web;
#[cfg(target_arch = "wasm32")]
mod web_helpers;

#[cfg(not(target_arch = "wasm32"))]
mod controller_native;

#[cfg(not(target_arch = "wasm32"))]
pub use controller_native::MusicToggle;
#[cfg(target_arch = "wasm32")]
pub use controller_web::MusicToggle;
