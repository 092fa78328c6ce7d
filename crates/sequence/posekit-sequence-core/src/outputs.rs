//! Output contracts of one controller step.

use posekit_transform_core::Transform;
use serde::{Deserialize, Serialize};

/// Discrete signals emitted during a step.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum SequenceEvent {
    /// The index crossed either end of the sequence, whatever the loop policy.
    EndOfSequence,
    SequenceReloaded { rows: usize },
    ReloadFailed { reason: String },
}

/// Why a step produced no transform.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkipReason {
    /// Hit an end of the sequence with looping off.
    Boundary,
    EmptySequence,
    /// Auto-publish is off and no publish trigger was pending.
    PublishGated,
    DecodeFailed,
}

/// Everything one step produced. Reset at the start of every step.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StepOutputs {
    /// Published transform, if any.
    pub transform: Option<Transform>,
    /// Row index of `transform`.
    pub index: Option<usize>,
    #[serde(default)]
    pub events: Vec<SequenceEvent>,
    pub skipped: Option<SkipReason>,
}

impl StepOutputs {
    #[inline]
    pub fn clear(&mut self) {
        self.transform = None;
        self.index = None;
        self.events.clear();
        self.skipped = None;
    }

    #[inline]
    pub fn push_event(&mut self, event: SequenceEvent) {
        self.events.push(event);
    }

    #[inline]
    pub fn published(&self) -> bool {
        self.transform.is_some()
    }

    pub fn end_of_sequence(&self) -> bool {
        self.events.contains(&SequenceEvent::EndOfSequence)
    }
}
