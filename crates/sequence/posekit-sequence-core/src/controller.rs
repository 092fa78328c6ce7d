//! Step-driven playback state machine.
//!
//! Each [`PlaybackController::step`] runs, in order:
//! 1. reload, if requested (no movement this step);
//! 2. otherwise, before the first publish, start at row 0;
//! 3. otherwise move by `+1` (auto-next or next trigger) and/or `-1`
//!    (auto-prev or prev trigger), then handle the ends of the sequence;
//! 4. skip when the sequence is empty;
//! 5. skip unless auto-publish is on or a publish trigger is pending;
//! 6. decode the current row and publish it.

use log::{debug, error, info, trace, warn};
use posekit_api_core::{DocumentSource, FileSource};

use crate::config::PlaybackConfig;
use crate::inputs::{PlaybackCommand, Trigger, TriggerPorts};
use crate::outputs::{SequenceEvent, SkipReason, StepOutputs};
use crate::state::PlaybackState;
use crate::store::{SequenceStore, SEQUENCE_KEY};

/// Plays a [`SequenceStore`] loaded through the document source `S`.
#[derive(Debug)]
pub struct PlaybackController<S = FileSource> {
    config: PlaybackConfig,
    source: S,
    store: SequenceStore,
    state: PlaybackState,
    ports: TriggerPorts,

    // Per-step outputs
    outputs: StepOutputs,
}

impl<S: DocumentSource> PlaybackController<S> {
    pub fn new(config: PlaybackConfig, source: S) -> Self {
        trace!("constructed playback controller for '{}'", config.source_path);
        Self {
            state: PlaybackState::new(config.read_on_init),
            config,
            source,
            store: SequenceStore::new(),
            ports: TriggerPorts::default(),
            outputs: StepOutputs::default(),
        }
    }

    /// Start from an already populated store. No reload is pending unless
    /// `read_on_init` is set.
    pub fn with_store(config: PlaybackConfig, source: S, store: SequenceStore) -> Self {
        let mut ctrl = Self::new(config, source);
        ctrl.store = store;
        ctrl
    }

    #[inline]
    pub fn config(&self) -> &PlaybackConfig {
        &self.config
    }

    #[inline]
    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    #[inline]
    pub fn store(&self) -> &SequenceStore {
        &self.store
    }

    /// Outputs of the most recent step.
    #[inline]
    pub fn last_outputs(&self) -> &StepOutputs {
        &self.outputs
    }

    /// Trigger ports, for hosts that write payloads before invoking handlers.
    #[inline]
    pub fn ports_mut(&mut self) -> &mut TriggerPorts {
        &mut self.ports
    }

    pub fn on_next(&mut self) {
        if self.ports.next.drain().is_some() {
            trace!("drained next payload");
        }
        trace!("next row requested");
        self.state.pending_next = true;
    }

    pub fn on_prev(&mut self) {
        if self.ports.prev.drain().is_some() {
            trace!("drained prev payload");
        }
        trace!("previous row requested");
        self.state.pending_prev = true;
    }

    pub fn on_publish(&mut self) {
        if self.ports.publish.drain().is_some() {
            trace!("drained publish payload");
        }
        trace!("publish requested");
        self.state.pending_publish = true;
    }

    pub fn on_reload(&mut self) {
        if self.ports.reload.drain().is_some() {
            trace!("drained reload payload");
        }
        trace!("sequence reload requested");
        self.state.pending_reload = true;
    }

    /// Dispatch a trigger to its handler.
    pub fn trigger(&mut self, trigger: Trigger) {
        match trigger {
            Trigger::Next => self.on_next(),
            Trigger::Prev => self.on_prev(),
            Trigger::Publish => self.on_publish(),
            Trigger::Reload => self.on_reload(),
        }
    }

    /// Write `payload` to the trigger's port, then handle the trigger.
    pub fn deliver(&mut self, trigger: Trigger, payload: impl Into<serde_json::Value>) {
        self.ports.port_mut(trigger).push(payload);
        self.trigger(trigger);
    }

    pub fn apply_command(&mut self, cmd: PlaybackCommand) {
        debug!("apply {cmd:?}");
        match cmd {
            PlaybackCommand::SetLoop { enabled } => self.config.r#loop = enabled,
            PlaybackCommand::SetAutoPublish { enabled } => self.config.auto_publish = enabled,
            PlaybackCommand::SetAutoNext { enabled } => self.config.auto_next = enabled,
            PlaybackCommand::SetAutoPrev { enabled } => self.config.auto_prev = enabled,
            PlaybackCommand::SetSourcePath { path } => self.config.source_path = path,
        }
    }

    pub fn apply_commands(&mut self, cmds: impl IntoIterator<Item = PlaybackCommand>) {
        for cmd in cmds {
            self.apply_command(cmd);
        }
    }

    /// Run one step and return what it produced.
    pub fn step(&mut self) -> &StepOutputs {
        self.outputs.clear();
        debug!(
            "before: index={} previous_index={:?}",
            self.state.current_index, self.state.previous_index
        );

        if self.state.pending_reload {
            self.reload();
        } else if self.state.previous_index.is_none() {
            self.state.current_index = 0;
        } else if let Some(reason) = self.advance() {
            self.outputs.skipped = Some(reason);
            return &self.outputs;
        }

        if self.store.is_empty() {
            info!("empty sequence");
            self.outputs.skipped = Some(SkipReason::EmptySequence);
            return &self.outputs;
        }

        if !self.config.auto_publish && !self.state.pending_publish {
            self.outputs.skipped = Some(SkipReason::PublishGated);
            return &self.outputs;
        }
        self.state.pending_publish = false;

        let index = self.state.current_index;
        debug!(
            "after: index={index} previous_index={:?}",
            self.state.previous_index
        );
        match self.store.decode(index) {
            Ok(transform) => {
                debug!("publishing row {index}:\n{transform}");
                self.state.previous_index = Some(index);
                self.outputs.transform = Some(transform);
                self.outputs.index = Some(index);
            }
            Err(e) => {
                warn!("publish failed on index {index}: {e}");
                self.outputs.skipped = Some(SkipReason::DecodeFailed);
            }
        }
        &self.outputs
    }

    /// Consume the reload request. On failure the store and index stay as
    /// they were; the host re-arms the request with another reload trigger.
    fn reload(&mut self) {
        match self.store.load(&self.source, &self.config.source_path) {
            Ok(rows) => {
                debug!("loaded {rows} {SEQUENCE_KEY} rows from '{}'", self.config.source_path);
                self.state.current_index = 0;
                self.outputs.push_event(SequenceEvent::SequenceReloaded { rows });
            }
            Err(e) => {
                error!(
                    "could not load {SEQUENCE_KEY} sequence from '{}': {e}",
                    self.config.source_path
                );
                self.outputs.push_event(SequenceEvent::ReloadFailed {
                    reason: e.to_string(),
                });
            }
        }
        self.state.pending_reload = false;
    }

    /// Apply movement and boundary policy. Returns a skip reason when the
    /// step must end without publishing.
    fn advance(&mut self) -> Option<SkipReason> {
        let mut delta: i64 = 0;
        if self.config.auto_next || self.state.pending_next {
            delta += 1;
        }
        if self.config.auto_prev || self.state.pending_prev {
            delta -= 1;
        }
        self.state.pending_next = false;
        self.state.pending_prev = false;

        let rows = self.store.row_count();
        let last = rows.saturating_sub(1);
        let target = self.state.current_index as i64 + delta;

        if target < 0 {
            self.outputs.push_event(SequenceEvent::EndOfSequence);
            if self.config.r#loop {
                debug!("loop to row {last}");
                self.state.current_index = last;
            } else {
                info!("start of sequence reached");
                self.state.current_index = 0;
                return Some(SkipReason::Boundary);
            }
        } else if target as usize >= rows {
            self.outputs.push_event(SequenceEvent::EndOfSequence);
            if self.config.r#loop {
                debug!("loop to row 0");
                self.state.current_index = 0;
            } else {
                info!("end of sequence reached");
                self.state.current_index = last;
                return Some(SkipReason::Boundary);
            }
        } else {
            self.state.current_index = target as usize;
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use posekit_api_core::MemorySource;

    fn rows(n: usize) -> SequenceStore {
        SequenceStore::from_rows((0..n).map(|i| [i as f64, 0.0, 0.0, 0.0, 0.0, 0.0]).collect())
    }

    fn preloaded(cfg: PlaybackConfig, n: usize) -> PlaybackController<MemorySource> {
        let cfg = PlaybackConfig {
            read_on_init: false,
            ..cfg
        };
        PlaybackController::with_store(cfg, MemorySource::new(), rows(n))
    }

    #[test]
    fn first_step_publishes_row_zero() {
        let mut ctrl = preloaded(PlaybackConfig::default(), 3);
        let out = ctrl.step();
        assert_eq!(out.index, Some(0));
        assert_eq!(ctrl.state().previous_index(), Some(0));
    }

    #[test]
    fn both_directions_net_to_zero() {
        let cfg = PlaybackConfig {
            auto_prev: true,
            ..PlaybackConfig::default()
        };
        let mut ctrl = preloaded(cfg, 3);
        for _ in 0..5 {
            assert_eq!(ctrl.step().index, Some(0));
        }
    }

    #[test]
    fn pending_flags_are_cleared_after_movement() {
        let mut ctrl = preloaded(PlaybackConfig::triggered(), 3);
        ctrl.on_publish();
        ctrl.step();
        ctrl.on_next();
        ctrl.step();
        assert!(!ctrl.state().pending_next());
        assert!(!ctrl.state().pending_prev());
        assert_eq!(ctrl.state().current_index(), 1);
    }

    #[test]
    fn deliver_drains_the_payload() {
        let mut ctrl = preloaded(PlaybackConfig::triggered(), 3);
        ctrl.deliver(Trigger::Next, serde_json::json!({ "stale": true }));
        assert!(ctrl.ports_mut().next.is_empty());
        assert!(ctrl.state().pending_next());
    }
}
