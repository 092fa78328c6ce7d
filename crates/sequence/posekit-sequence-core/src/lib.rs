//! posekit-sequence-core
//!
//! Plays back a recorded sequence of poses one step at a time.
//!
//! - [`SequenceStore`]: rows of `(x, y, z, roll, pitch, yaw)` loaded from a
//!   matrix document (`XYZRPY` entry).
//! - [`PlaybackController`]: the step-driven state machine. Hosts deliver
//!   triggers (next/prev/publish/reload), optionally reconfigure it with
//!   [`PlaybackCommand`]s, and call [`PlaybackController::step`] once per tick.
//! - [`PoseOffsetProvider`]: a fixed pose source configured by an offset.
//! - [`SharedController`]: mutex-guarded handle for hosts that call in from
//!   several threads.

pub mod config;
pub mod controller;
pub mod error;
pub mod inputs;
pub mod outputs;
pub mod provider;
pub mod shared;
pub mod state;
pub mod store;

pub use config::PlaybackConfig;
pub use controller::PlaybackController;
pub use error::DecodeError;
pub use inputs::{PlaybackCommand, Trigger, TriggerPort, TriggerPorts};
pub use outputs::{SequenceEvent, SkipReason, StepOutputs};
pub use provider::PoseOffsetProvider;
pub use shared::SharedController;
pub use state::PlaybackState;
pub use store::{SequenceStore, SEQUENCE_KEY};

pub use posekit_api_core::{DocumentSource, FileSource, LoadError, MemorySource};
pub use posekit_transform_core::{Transform, XyzRpy};
