//! The components module contains all shared components for our app.

mod app;
mod music_controller;

pub use app::*;
pub use music_controller::MusicToggle;
