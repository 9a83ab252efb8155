use dioxus::logger::tracing::info;
use dioxus::prelude::*;

use super::media::button_face;
use crate::config::load_config;

/// Without a browser there is no media element or local storage to drive,
/// so the button renders in its paused face and stays inert.
#[component]
pub fn MusicToggle() -> Element {
    let config = use_hook(load_config);
    use_hook(|| info!("background music needs a browser; toggle is inert"));
    let face = button_face(false);

    rsx! {
        button {
            id: "{config.button_id}",
            r#type: "button",
            class: "music-toggle",
            aria_label: face.aria_label,
            disabled: true,
            "{face.glyph}"
        }
    }
}
