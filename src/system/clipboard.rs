// src/system/clipboard.rs
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use thiserror::Error;
use zeroize::Zeroizing;

#[derive(Error, Debug)]
pub enum ClipboardError {
    #[error("Failed to access clipboard: {0}")]
    Unavailable(String),

    #[error("Failed to copy to clipboard: {0}")]
    WriteFailed(String),
}

/// Anything a password can be copied to.
pub trait ClipboardWriter {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// Raw read/write access to a clipboard.
pub trait ClipboardAccess: Send + 'static {
    fn open() -> Result<Self, ClipboardError>
    where
        Self: Sized;

    fn get_text(&mut self) -> Option<String>;
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError>;
    fn clear(&mut self) -> Result<(), ClipboardError>;
}

impl ClipboardAccess for arboard::Clipboard {
    fn open() -> Result<Self, ClipboardError> {
        arboard::Clipboard::new().map_err(|e| ClipboardError::Unavailable(e.to_string()))
    }

    fn get_text(&mut self) -> Option<String> {
        arboard::Clipboard::get_text(self).ok()
    }

    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        arboard::Clipboard::set_text(self, text.to_owned())
            .map_err(|e| ClipboardError::WriteFailed(e.to_string()))
    }

    fn clear(&mut self) -> Result<(), ClipboardError> {
        arboard::Clipboard::clear(self).map_err(|e| ClipboardError::WriteFailed(e.to_string()))
    }
}

// Bookkeeping shared with the clear timers
#[derive(Default)]
struct ClearState {
    generation: u64,
    pending: Option<PendingClear>,
}

struct PendingClear {
    copied: Zeroizing<String>,
    // Contents from before the first of a run of overlapping copies
    previous: Option<Zeroizing<String>>,
}

type SharedBackend<B> = Arc<Mutex<Option<B>>>;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Restore the pre-copy contents, but only while the clipboard still holds
/// what we copied. Anything the user copied since is left alone.
fn restore<B: ClipboardAccess>(state: &mut ClearState, backend: &mut Option<B>) {
    let Some(pending) = state.pending.take() else {
        return;
    };
    let Some(clipboard) = backend.as_mut() else {
        return;
    };

    match clipboard.get_text().map(Zeroizing::new) {
        Some(current) if *current == *pending.copied => {}
        _ => {
            log::debug!("Clipboard changed since copy, leaving it alone");
            return;
        }
    }

    let result = match &pending.previous {
        Some(previous) => clipboard.set_text(previous),
        None => clipboard.clear(),
    };
    if let Err(e) = result {
        log::warn!("Failed to clear clipboard: {}", e);
    }
}

/// A clipboard that takes the password back off after `clear_after`.
///
/// Only the newest copy's timer acts; older timers stand down.
pub struct AutoClearClipboard<B: ClipboardAccess> {
    backend: SharedBackend<B>,
    state: Arc<Mutex<ClearState>>,
    clear_after: Option<Duration>,
    timers: Vec<JoinHandle<()>>,
}

pub type SystemClipboard = AutoClearClipboard<arboard::Clipboard>;

impl<B: ClipboardAccess> AutoClearClipboard<B> {
    /// The backend is opened on first use.
    pub fn new(clear_after: Option<Duration>) -> Self {
        Self {
            backend: Arc::new(Mutex::new(None)),
            state: Arc::new(Mutex::new(ClearState::default())),
            clear_after,
            timers: Vec::new(),
        }
    }

    pub fn clear_after(&self) -> Option<Duration> {
        self.clear_after
    }

    /// Block until every scheduled clear has run.
    pub fn wait(&mut self) {
        for timer in self.timers.drain(..) {
            if timer.join().is_err() {
                log::warn!("Clipboard clear timer panicked");
            }
        }
    }

    /// Run the pending clear now and cancel outstanding timers.
    pub fn flush(&mut self) {
        let mut state = lock(&self.state);
        state.generation += 1;
        restore(&mut state, &mut lock(&self.backend));
    }

    fn schedule(&mut self, duration: Duration, generation: u64) {
        let backend = Arc::clone(&self.backend);
        let state = Arc::clone(&self.state);

        self.timers.retain(|t| !t.is_finished());
        self.timers.push(thread::spawn(move || {
            thread::sleep(duration);
            let mut state = lock(&state);
            if state.generation != generation {
                return;
            }
            restore(&mut state, &mut lock(&backend));
        }));
    }
}

impl<B: ClipboardAccess> ClipboardWriter for AutoClearClipboard<B> {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let generation = {
            let mut state = lock(&self.state);
            let mut backend = lock(&self.backend);

            if backend.is_none() {
                *backend = Some(B::open()?);
            }
            let clipboard = backend.as_mut().ok_or_else(|| ClipboardError::Unavailable("not opened".into()))?;

            // Overlapping copies keep the contents from before the first one
            let previous = match state.pending.take() {
                Some(pending) => pending.previous,
                None => clipboard.get_text().map(Zeroizing::new),
            };

            clipboard.set_text(text)?;

            state.generation += 1;
            if self.clear_after.is_some() {
                state.pending = Some(PendingClear {
                    copied: Zeroizing::new(text.to_owned()),
                    previous,
                });
            }
            state.generation
        };

        if let Some(duration) = self.clear_after {
            log::debug!("Clipboard will be cleared in {}s", duration.as_secs());
            self.schedule(duration, generation);
        }

        Ok(())
    }
}
