//! Thread-safe controller handle.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use posekit_api_core::{DocumentSource, FileSource};

use crate::controller::PlaybackController;
use crate::inputs::{PlaybackCommand, Trigger};
use crate::outputs::StepOutputs;

/// Cloneable handle to one controller. Trigger handlers and `step` are
/// serialized behind a mutex, so triggers from other threads are never lost
/// or half-applied.
#[derive(Debug)]
pub struct SharedController<S = FileSource> {
    inner: Arc<Mutex<PlaybackController<S>>>,
}

impl<S> Clone for SharedController<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: DocumentSource> SharedController<S> {
    pub fn new(controller: PlaybackController<S>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(controller)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, PlaybackController<S>> {
        // A panic while holding the lock leaves flags, not torn data.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run `f` with exclusive access to the controller.
    pub fn with<R>(&self, f: impl FnOnce(&mut PlaybackController<S>) -> R) -> R {
        f(&mut self.lock())
    }

    pub fn trigger(&self, trigger: Trigger) {
        self.lock().trigger(trigger);
    }

    pub fn apply_command(&self, cmd: PlaybackCommand) {
        self.lock().apply_command(cmd);
    }

    /// Step once and return a copy of the outputs.
    pub fn step(&self) -> StepOutputs {
        self.lock().step().clone()
    }
}
