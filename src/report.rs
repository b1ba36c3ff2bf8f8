//! state.tick.v1 output reports
//!
//! Wraps a domain tick result in a versioned payload with producer identity
//! and a computation timestamp, so downstream consumers can attribute and
//! order reports without trusting their transport.

use crate::blink::engine::BlinkTick;
use crate::error::EngineError;
use crate::gesture::engine::GestureTick;
use crate::posture::engine::PostureTick;
use crate::{ENGINE_VERSION, PRODUCER_NAME};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Current output schema version
pub const REPORT_VERSION: &str = "state.tick.v1";

/// Identity of the producing engine instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Producer {
    pub name: String,
    pub version: String,
    pub instance_id: String,
}

/// Domain-tagged tick result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "domain", rename_all = "snake_case")]
pub enum DomainState {
    Hand(GestureTick),
    Pose(PostureTick),
    Face(BlinkTick),
}

/// One tick's output record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickReport {
    /// Always [`REPORT_VERSION`]
    pub report_version: String,
    pub producer: Producer,
    /// Tick counter: the input record's if it carried one, otherwise the
    /// processor's own
    pub tick: u64,
    /// When this report was computed (RFC3339)
    pub computed_at_utc: String,
    pub state: DomainState,
}

/// Builds tick reports under a stable per-session instance id
#[derive(Debug, Clone)]
pub struct ReportEncoder {
    instance_id: String,
}

impl Default for ReportEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportEncoder {
    /// Create an encoder with a fresh unique instance ID
    pub fn new() -> Self {
        Self {
            instance_id: Uuid::new_v4().to_string(),
        }
    }

    /// Create an encoder with a specific instance ID
    pub fn with_instance_id(instance_id: String) -> Self {
        Self { instance_id }
    }

    /// Wrap one domain result in a report
    pub fn encode(&self, tick: u64, state: DomainState) -> TickReport {
        TickReport {
            report_version: REPORT_VERSION.to_string(),
            producer: Producer {
                name: PRODUCER_NAME.to_string(),
                version: ENGINE_VERSION.to_string(),
                instance_id: self.instance_id.clone(),
            },
            tick,
            computed_at_utc: Utc::now().to_rfc3339(),
            state,
        }
    }

    /// Encode straight to a JSON string
    pub fn encode_to_json(&self, tick: u64, state: DomainState) -> Result<String, EngineError> {
        let report = self.encode(tick, state);
        serde_json::to_string(&report).map_err(|e| EngineError::EncodingError(e.to_string()))
    }
}
