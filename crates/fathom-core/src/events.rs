//! Events emitted by the simulation for the HUD event feed.

use serde::{Deserialize, Serialize};

use crate::enums::EventLevel;

/// One tagged line in the event feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionEvent {
    pub level: EventLevel,
    pub message: String,
    /// Simulated time at which the event occurred (seconds).
    pub time_secs: f64,
}

impl SessionEvent {
    pub fn new(level: EventLevel, message: impl Into<String>, time_secs: f64) -> Self {
        Self {
            level,
            message: message.into(),
            time_secs,
        }
    }
}
