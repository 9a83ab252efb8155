use std::cell::Cell;
use std::rc::Rc;

use dioxus::logger::tracing::{debug, error, info, warn};

use super::media::{MediaElement, PlaybackIndicator};
use crate::db::PlaybackStore;
use crate::error::MusicError;

/// Toggles background music and keeps its flag/offset in the store.
///
/// Cloning yields another handle to the same controller, so DOM callbacks
/// and the autosave loop can each hold one. No borrow is held across the
/// awaited play call.
#[derive(Clone)]
pub struct PlaybackController<M, S, I> {
    media: M,
    store: S,
    indicator: I,
    volume: f64,
    playing: Rc<Cell<bool>>,
    saved_offset: f64,
    offset_applied: Rc<Cell<bool>>,
}

impl<M, S, I> PlaybackController<M, S, I>
where
    M: MediaElement,
    S: PlaybackStore,
    I: PlaybackIndicator,
{
    /// Read the persisted flag and offset. Nothing touches the media yet.
    pub fn new(media: M, store: S, indicator: I, volume: f64) -> Self {
        let playing = store.load_playing();
        let saved_offset = store.load_offset();
        debug!(playing, saved_offset, "loaded persisted playback state");
        Self {
            media,
            store,
            indicator,
            volume: volume.clamp(0.0, 1.0),
            playing: Rc::new(Cell::new(playing)),
            saved_offset,
            offset_applied: Rc::new(Cell::new(false)),
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playing.get()
    }

    pub async fn initialize(&self) {
        self.media.set_volume(self.volume);
        self.apply_saved_offset();
        if self.playing.get() {
            self.resume().await;
        }
    }

    /// Seek to the saved offset once it is known to lie inside the media.
    /// Returns true only on the call that applied it.
    pub fn apply_saved_offset(&self) -> bool {
        if self.offset_applied.get() {
            return false;
        }
        let duration = self.media.duration();
        if self.saved_offset > 0.0 && self.saved_offset < duration {
            self.media.set_current_time(self.saved_offset);
            self.offset_applied.set(true);
            debug!(offset = self.saved_offset, duration, "applied saved offset");
            return true;
        }
        false
    }

    async fn resume(&self) {
        match self.media.play().await {
            Ok(()) => self.indicator.show(true),
            Err(err) => {
                info!("Autoplay prevented, waiting for user interaction: {err}");
                self.playing.set(false);
                self.persist_flag(false);
                self.indicator.show(false);
            }
        }
    }

    pub async fn toggle(&self) {
        if self.playing.get() {
            self.pause();
        } else {
            self.play().await;
        }
    }

    pub async fn play(&self) {
        match self.media.play().await {
            Ok(()) => {
                self.playing.set(true);
                self.persist_flag(true);
                self.indicator.show(true);
            }
            Err(err) => error!("Playback failed: {err}"),
        }
    }

    pub fn pause(&self) {
        if let Err(err) = self.media.pause() {
            warn!("Could not pause background music: {err}");
        }
        self.playing.set(false);
        self.persist_flag(false);
        self.save_current_time();
        self.indicator.show(false);
    }

    /// Periodic persist: only writes while the media is actually playing.
    pub fn autosave_tick(&self) {
        if !self.media.paused() {
            self.save_current_time();
        }
    }

    /// Page hide/unload persist.
    pub fn save_current_time(&self) {
        self.persist_offset(self.current_offset());
    }

    /// While the saved offset still waits for metadata, the media sits at 0
    /// and the saved offset is the real position.
    fn current_offset(&self) -> f64 {
        let pending = self.saved_offset > 0.0
            && !self.offset_applied.get()
            && self.media.duration().is_nan();
        if pending {
            self.saved_offset
        } else {
            self.media.current_time()
        }
    }

    /// A looping track restarts from zero.
    pub fn on_ended(&self) {
        if self.media.looping() {
            self.persist_offset(0.0);
        }
    }

    fn persist_flag(&self, playing: bool) {
        if let Err(err) = self.store.save_playing(playing) {
            log_store_error(&err);
        }
    }

    fn persist_offset(&self, offset: f64) {
        if let Err(err) = self.store.save_offset(offset) {
            log_store_error(&err);
        }
    }
}

fn log_store_error(err: &MusicError) {
    warn!("Could not persist playback state: {err}");
}
