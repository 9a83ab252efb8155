use futures_util::future::LocalBoxFuture;

use crate::error::MusicError;

/// The subset of a media element the controller drives.
pub trait MediaElement {
    /// Start playback. Resolves once the platform accepts or rejects it.
    fn play(&self) -> LocalBoxFuture<'static, Result<(), MusicError>>;
    fn pause(&self) -> Result<(), MusicError>;
    fn paused(&self) -> bool;
    fn current_time(&self) -> f64;
    fn set_current_time(&self, seconds: f64);
    /// NaN while metadata is still loading.
    fn duration(&self) -> f64;
    fn set_volume(&self, volume: f64);
    fn looping(&self) -> bool;
}

/// Something that shows whether music is playing, normally the toggle button.
pub trait PlaybackIndicator {
    fn show(&self, playing: bool);
}

/// Glyph and accessible label of the toggle button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonFace {
    pub glyph: &'static str,
    pub aria_label: &'static str,
}

pub const PLAYING_FACE: ButtonFace = ButtonFace {
    glyph: "🔊",
    aria_label: "Pause background music",
};

pub const PAUSED_FACE: ButtonFace = ButtonFace {
    glyph: "🎵",
    aria_label: "Play background music",
};

pub fn button_face(playing: bool) -> ButtonFace {
    if playing {
        PLAYING_FACE
    } else {
        PAUSED_FACE
    }
}

/// True for the Space key unless the event came from an editable target.
pub fn is_toggle_shortcut(code: &str, target_tag: Option<&str>, editable: bool) -> bool {
    if code != "Space" || editable {
        return false;
    }
    !matches!(
        target_tag.map(|tag| tag.to_ascii_lowercase()).as_deref(),
        Some("input") | Some("textarea") | Some("select")
    )
}
