// Browser adapters: the audio element, the button signal, and page listeners.
use dioxus::logger::tracing::debug;
use dioxus::prelude::*;
use futures_util::future::LocalBoxFuture;
use futures_util::FutureExt;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{window, HtmlAudioElement, KeyboardEvent};

use super::media::{is_toggle_shortcut, MediaElement, PlaybackIndicator};
use super::playback_controller::PlaybackController;
use crate::db::LocalPlaybackStore;
use crate::error::MusicError;

pub type WebController = PlaybackController<WebAudio, LocalPlaybackStore, SignalIndicator>;

#[derive(Clone)]
pub struct WebAudio(pub HtmlAudioElement);

impl MediaElement for WebAudio {
    fn play(&self) -> LocalBoxFuture<'static, Result<(), MusicError>> {
        let started = self.0.play();
        async move {
            let promise =
                started.map_err(|err| MusicError::PlaybackRejected(js_error_text(&err)))?;
            wasm_bindgen_futures::JsFuture::from(promise)
                .await
                .map(|_| ())
                .map_err(|err| MusicError::PlaybackRejected(js_error_text(&err)))
        }
        .boxed_local()
    }

    fn pause(&self) -> Result<(), MusicError> {
        self.0
            .pause()
            .map_err(|err| MusicError::Media(js_error_text(&err)))
    }

    fn paused(&self) -> bool {
        self.0.paused()
    }

    fn current_time(&self) -> f64 {
        self.0.current_time()
    }

    fn set_current_time(&self, seconds: f64) {
        self.0.set_current_time(seconds);
    }

    fn duration(&self) -> f64 {
        self.0.duration()
    }

    fn set_volume(&self, volume: f64) {
        self.0.set_volume(volume.clamp(0.0, 1.0));
    }

    fn looping(&self) -> bool {
        self.0.loop_()
    }
}

/// Drives the button face through the component's `is_playing` signal.
#[derive(Clone, Copy)]
pub struct SignalIndicator(pub Signal<bool>);

impl PlaybackIndicator for SignalIndicator {
    fn show(&self, playing: bool) {
        let mut signal = self.0;
        signal.set(playing);
    }
}

/// `DOMException`s carry `name`/`message`; anything else is stringified.
fn js_error_text(err: &JsValue) -> String {
    let field = |key: &str| {
        js_sys::Reflect::get(err, &key.into())
            .ok()
            .and_then(|value| value.as_string())
            .filter(|value| !value.trim().is_empty())
    };
    match (field("name"), field("message")) {
        (Some(name), Some(message)) => format!("{name}: {message}"),
        (Some(name), None) => name,
        (None, Some(message)) => message,
        (None, None) => err
            .as_string()
            .unwrap_or_else(|| "unknown playback error".to_string()),
    }
}

pub fn find_audio_element(id: &str) -> Result<HtmlAudioElement, MusicError> {
    window()
        .and_then(|w| w.document())
        .and_then(|doc| doc.get_element_by_id(id))
        .and_then(|element| element.dyn_into::<HtmlAudioElement>().ok())
        .ok_or_else(|| MusicError::ElementMissing(id.to_string()))
}

/// Tag of the event target, and whether it sits inside a content-editable.
fn shortcut_target(event: &KeyboardEvent) -> (Option<String>, bool) {
    let Some(target) = event.target() else {
        return (None, false);
    };
    let Ok(element) = target.dyn_into::<web_sys::Element>() else {
        return (None, false);
    };
    let tag = element.tag_name();

    let mut current = Some(element);
    while let Some(element) = current {
        if element.has_attribute("contenteditable")
            && element
                .get_attribute("contenteditable")
                .map(|v| v.to_ascii_lowercase() != "false")
                .unwrap_or(true)
        {
            return (Some(tag), true);
        }
        current = element.parent_element();
    }

    (Some(tag), false)
}

/// Wire unload, visibility, media and (optionally) keyboard listeners.
/// The closures live for the rest of the page.
pub fn attach_page_listeners(controller: &WebController, audio: &HtmlAudioElement, shortcut: bool) {
    let Some(win) = window() else {
        return;
    };
    let Some(doc) = win.document() else {
        return;
    };

    let unload_cb = {
        let controller = controller.clone();
        Closure::wrap(Box::new(move || controller.save_current_time()) as Box<dyn FnMut()>)
    };
    let visibility_cb = {
        let controller = controller.clone();
        let doc = doc.clone();
        Closure::wrap(Box::new(move || {
            if doc.hidden() {
                controller.save_current_time();
            }
        }) as Box<dyn FnMut()>)
    };
    let ended_cb = {
        let controller = controller.clone();
        Closure::wrap(Box::new(move || controller.on_ended()) as Box<dyn FnMut()>)
    };
    let metadata_cb = {
        let controller = controller.clone();
        Closure::wrap(Box::new(move || {
            if controller.apply_saved_offset() {
                debug!("restored offset after metadata loaded");
            }
        }) as Box<dyn FnMut()>)
    };

    let _ =
        win.add_event_listener_with_callback("beforeunload", unload_cb.as_ref().unchecked_ref());
    let _ = win.add_event_listener_with_callback("pagehide", unload_cb.as_ref().unchecked_ref());
    let _ = doc.add_event_listener_with_callback(
        "visibilitychange",
        visibility_cb.as_ref().unchecked_ref(),
    );
    let _ = audio.add_event_listener_with_callback("ended", ended_cb.as_ref().unchecked_ref());
    let _ = audio
        .add_event_listener_with_callback("loadedmetadata", metadata_cb.as_ref().unchecked_ref());

    unload_cb.forget();
    visibility_cb.forget();
    ended_cb.forget();
    metadata_cb.forget();

    if shortcut {
        let controller = controller.clone();
        let key_cb = Closure::wrap(Box::new(move |event: KeyboardEvent| {
            let (tag, editable) = shortcut_target(&event);
            if !is_toggle_shortcut(&event.code(), tag.as_deref(), editable) {
                return;
            }
            event.prevent_default();
            let controller = controller.clone();
            wasm_bindgen_futures::spawn_local(async move {
                controller.toggle().await;
            });
        }) as Box<dyn FnMut(KeyboardEvent)>);
        let _ = doc.add_event_listener_with_callback("keydown", key_cb.as_ref().unchecked_ref());
        key_cb.forget();
    }
}
