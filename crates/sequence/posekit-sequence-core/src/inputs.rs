//! Input contracts: trigger signals and mid-flight reconfiguration.
//!
//! Triggers arrive on newest-value ports. A trigger may carry a payload, which
//! is drained and discarded when the controller handles it; repeated triggers
//! before the next step collapse into one pending flag.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trigger {
    Next,
    Prev,
    Publish,
    Reload,
}

/// Single-slot port that keeps only the newest payload.
#[derive(Clone, Debug, Default)]
pub struct TriggerPort {
    latest: Option<JsonValue>,
    received: u64,
}

impl TriggerPort {
    /// Store a payload, replacing any unread one.
    pub fn push(&mut self, payload: impl Into<JsonValue>) {
        self.latest = Some(payload.into());
        self.received = self.received.wrapping_add(1);
    }

    /// Take the unread payload, if any.
    pub fn drain(&mut self) -> Option<JsonValue> {
        self.latest.take()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.latest.is_none()
    }

    /// Payloads pushed over the port's lifetime.
    #[inline]
    pub fn received(&self) -> u64 {
        self.received
    }
}

/// One port per trigger kind.
#[derive(Clone, Debug, Default)]
pub struct TriggerPorts {
    pub next: TriggerPort,
    pub prev: TriggerPort,
    pub publish: TriggerPort,
    pub reload: TriggerPort,
}

impl TriggerPorts {
    pub fn port_mut(&mut self, trigger: Trigger) -> &mut TriggerPort {
        match trigger {
            Trigger::Next => &mut self.next,
            Trigger::Prev => &mut self.prev,
            Trigger::Publish => &mut self.publish,
            Trigger::Reload => &mut self.reload,
        }
    }
}

/// Reconfiguration applied between steps; takes effect on the next step.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackCommand {
    SetLoop { enabled: bool },
    SetAutoPublish { enabled: bool },
    SetAutoNext { enabled: bool },
    SetAutoPrev { enabled: bool },
    /// Changes where the next reload reads from. Does not reload by itself.
    SetSourcePath { path: String },
}
