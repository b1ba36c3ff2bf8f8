//! Kinesense - on-device classification and debounce engine for landmark
//! streams
//!
//! Kinesense turns noisy per-tick landmark observations into stable motion
//! states through a deterministic pipeline: typed observation → geometric
//! features → rule-based label → temporal debounce → tick report.
//!
//! ## Domains
//!
//! - **Gesture**: 21-point hand frames classified into a closed gesture set,
//!   confirmed by run length
//! - **Posture**: upper-body landmarks scored for droop/uneven/hunch, with a
//!   sustained alert
//! - **Blink**: 6-point eye contours reduced to an aspect ratio, blinks
//!   counted edge-triggered
//!
//! The engines are synchronous and single-threaded; an external capture
//! loop drives them once per tick. The only concurrency surface is the
//! [`utterance`] hand-off channel for a background listener thread.

pub mod blink;
pub mod debounce;
pub mod error;
pub mod geometry;
pub mod gesture;
pub mod pipeline;
pub mod posture;
pub mod report;
pub mod schema;
pub mod types;
pub mod utterance;

pub use blink::{BlinkConfig, BlinkCounter, BlinkTick, EyeState};
pub use error::EngineError;
pub use gesture::{Gesture, GestureConfig, GestureEngine, GestureTick};
pub use pipeline::{process_ndjson, EngineConfig, TickProcessor};
pub use posture::{PostureConfig, PostureMonitor, PostureTick};
pub use report::{ReportEncoder, TickReport, REPORT_VERSION};
pub use schema::{Observation, TickRecord, SCHEMA_VERSION};
pub use types::Landmark;

/// Engine version embedded in every tick report
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Producer name for tick reports
pub const PRODUCER_NAME: &str = "kinesense";
