use dioxus::logger::tracing::{info, warn};
use dioxus::prelude::*;

use super::media::button_face;
use super::playback_controller::PlaybackController;
use super::web_helpers::{
    attach_page_listeners, find_audio_element, SignalIndicator, WebAudio, WebController,
};
use crate::config::load_config;
use crate::db::LocalPlaybackStore;

/// Toggle button plus the looping background track it controls.
#[component]
pub fn MusicToggle() -> Element {
    let config = use_hook(load_config);
    let is_playing = use_signal(|| false);
    let mut controller = use_signal(|| None::<WebController>);

    // One-time setup once the audio element is in the DOM.
    {
        let config = config.clone();
        use_effect(move || {
            if controller.peek().is_some() {
                return;
            }
            let audio = match find_audio_element(&config.audio_id) {
                Ok(audio) => audio,
                Err(err) => {
                    warn!("Background music disabled: {err}");
                    return;
                }
            };

            let store = LocalPlaybackStore::new(&config.playing_key, &config.offset_key);
            let ctrl = PlaybackController::new(
                WebAudio(audio.clone()),
                store,
                SignalIndicator(is_playing),
                config.volume,
            );
            attach_page_listeners(&ctrl, &audio, config.keyboard_shortcut);
            controller.set(Some(ctrl.clone()));

            let init = ctrl.clone();
            spawn(async move {
                init.initialize().await;
                info!(playing = init.is_playing(), "background music ready");
            });

            let interval_ms = config.autosave_interval_ms;
            spawn(async move {
                loop {
                    gloo_timers::future::TimeoutFuture::new(interval_ms).await;
                    ctrl.autosave_tick();
                }
            });
        });
    }

    let on_toggle = move |_| {
        if let Some(ctrl) = controller.peek().clone() {
            spawn(async move {
                ctrl.toggle().await;
            });
        }
    };

    let face = button_face(is_playing());

    rsx! {
        button {
            id: "{config.button_id}",
            r#type: "button",
            class: "music-toggle",
            aria_label: face.aria_label,
            onclick: on_toggle,
            "{face.glyph}"
        }
        audio {
            id: "{config.audio_id}",
            src: "{config.audio_src}",
            preload: "auto",
            r#loop: true,
        }
    }
}
