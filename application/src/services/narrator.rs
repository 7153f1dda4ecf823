//! Background narration of answer fragments.
//!
//! The relay must never wait for speech, so every fragment is handed to a
//! background unit and `narrate` returns immediately:
//!
//! - [`NarrationMode::PerFragment`]: one detached thread per fragment. There
//!   is no ordering between threads, so consecutive fragments may overlap.
//! - [`NarrationMode::Sequential`]: one worker thread drains a queue, so
//!   fragments are spoken in arrival order.
//! - [`NarrationMode::Off`]: fragments are dropped.
//!
//! The voice is resolved once, when the narrator is built. Engine failures
//! are logged and otherwise ignored.

use crate::config::NarrationMode;
use crate::ports::speech::SpeechEngine;
use nico_domain::{VoicePreference, VoiceSettings};
use std::sync::mpsc::{self, Sender};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, warn};

enum Job {
    Speak(String),
    Flush(Sender<()>),
}

/// Speaks answer fragments without blocking the caller.
pub struct Narrator {
    engine: Arc<dyn SpeechEngine>,
    settings: VoiceSettings,
    mode: NarrationMode,
    in_flight: Mutex<Vec<JoinHandle<()>>>,
    queue: Option<Sender<Job>>,
}

impl Narrator {
    /// Build a narrator, resolving the voice against the engine.
    ///
    /// Blocks while the engine lists its voices; call it during startup.
    pub fn new(
        engine: Arc<dyn SpeechEngine>,
        preference: &VoicePreference,
        mode: NarrationMode,
    ) -> Self {
        let settings = if mode == NarrationMode::Off {
            preference.select(&[])
        } else {
            match engine.voices() {
                Ok(voices) => preference.select(&voices),
                Err(e) => {
                    warn!("Could not list speech voices, using fallback: {}", e);
                    preference.select(&[])
                }
            }
        };
        debug!("Narration voice: {} ({:?})", settings.voice, mode);

        let queue = if mode == NarrationMode::Sequential {
            Self::spawn_worker(Arc::clone(&engine), settings.clone())
        } else {
            None
        };

        Self {
            engine,
            settings,
            mode,
            in_flight: Mutex::new(Vec::new()),
            queue,
        }
    }

    pub fn mode(&self) -> NarrationMode {
        self.mode
    }

    pub fn voice_settings(&self) -> &VoiceSettings {
        &self.settings
    }

    /// Speak `fragment` in the background. Blank fragments are skipped.
    pub fn narrate(&self, fragment: &str) {
        let text = fragment.trim();
        if text.is_empty() {
            return;
        }

        match self.mode {
            NarrationMode::Off => {}
            NarrationMode::Sequential => {
                if let Some(queue) = &self.queue
                    && queue.send(Job::Speak(text.to_string())).is_err()
                {
                    warn!("Narration worker is gone, dropping fragment");
                }
            }
            NarrationMode::PerFragment => {
                let engine = Arc::clone(&self.engine);
                let settings = self.settings.clone();
                let text = text.to_string();
                let spawned = thread::Builder::new()
                    .name("nico-narration".to_string())
                    .spawn(move || speak_one(engine.as_ref(), &text, &settings));
                match spawned {
                    Ok(handle) => {
                        if let Ok(mut in_flight) = self.in_flight.lock() {
                            in_flight.retain(|h| !h.is_finished());
                            in_flight.push(handle);
                        }
                    }
                    Err(e) => warn!("Could not start narration thread: {}", e),
                }
            }
        }
    }

    /// Block until everything handed to `narrate` so far has been spoken.
    ///
    /// Used before a one-shot process exits so the last words are not cut.
    pub fn wait_idle(&self) {
        match self.mode {
            NarrationMode::Off => {}
            NarrationMode::Sequential => {
                let Some(queue) = &self.queue else {
                    return;
                };
                let (ack_tx, ack_rx) = mpsc::channel();
                if queue.send(Job::Flush(ack_tx)).is_ok() {
                    let _ = ack_rx.recv();
                }
            }
            NarrationMode::PerFragment => {
                let handles = match self.in_flight.lock() {
                    Ok(mut in_flight) => std::mem::take(&mut *in_flight),
                    Err(_) => return,
                };
                for handle in handles {
                    let _ = handle.join();
                }
            }
        }
    }

    fn spawn_worker(engine: Arc<dyn SpeechEngine>, settings: VoiceSettings) -> Option<Sender<Job>> {
        let (tx, rx) = mpsc::channel::<Job>();
        let spawned = thread::Builder::new()
            .name("nico-narration-queue".to_string())
            .spawn(move || {
                for job in rx {
                    match job {
                        Job::Speak(text) => speak_one(engine.as_ref(), &text, &settings),
                        Job::Flush(ack) => {
                            let _ = ack.send(());
                        }
                    }
                }
            });
        match spawned {
            Ok(_) => Some(tx),
            Err(e) => {
                warn!("Could not start narration worker: {}", e);
                None
            }
        }
    }
}

fn speak_one(engine: &dyn SpeechEngine, text: &str, settings: &VoiceSettings) {
    if let Err(e) = engine.speak(text, settings) {
        warn!("Speech error: {}", e);
    }
    if settings.pause_after_ms > 0 {
        thread::sleep(Duration::from_millis(settings.pause_after_ms));
    }
}
