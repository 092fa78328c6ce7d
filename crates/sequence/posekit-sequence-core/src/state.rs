//! Playback state owned by the controller.

use serde::Serialize;

/// Index and pending-request flags of one controller. Read-only outside this
/// crate; only [`crate::PlaybackController`] mutates it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PlaybackState {
    pub(crate) current_index: usize,
    /// Index of the last published row; `None` until the first publish.
    pub(crate) previous_index: Option<usize>,
    pub(crate) pending_next: bool,
    pub(crate) pending_prev: bool,
    pub(crate) pending_reload: bool,
    pub(crate) pending_publish: bool,
}

impl PlaybackState {
    pub(crate) fn new(read_on_init: bool) -> Self {
        Self {
            current_index: 0,
            previous_index: None,
            pending_next: false,
            pending_prev: false,
            pending_reload: read_on_init,
            pending_publish: false,
        }
    }

    #[inline]
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    #[inline]
    pub fn previous_index(&self) -> Option<usize> {
        self.previous_index
    }

    #[inline]
    pub fn has_published(&self) -> bool {
        self.previous_index.is_some()
    }

    #[inline]
    pub fn pending_next(&self) -> bool {
        self.pending_next
    }

    #[inline]
    pub fn pending_prev(&self) -> bool {
        self.pending_prev
    }

    #[inline]
    pub fn pending_reload(&self) -> bool {
        self.pending_reload
    }

    #[inline]
    pub fn pending_publish(&self) -> bool {
        self.pending_publish
    }
}
