//! Pipeline orchestration
//!
//! This module provides the public API for kinesense: a stateful
//! [`TickProcessor`] that owns one engine per observation domain and routes
//! validated input records to them, plus a stateless one-shot helper for
//! batch input. Per-tick flow: record → validate → typed frame → features →
//! raw label → debounce → report.

use crate::blink::engine::BlinkCounter;
use crate::blink::types::BlinkConfig;
use crate::error::EngineError;
use crate::gesture::engine::GestureEngine;
use crate::gesture::types::GestureConfig;
use crate::posture::engine::PostureMonitor;
use crate::posture::types::PostureConfig;
use crate::report::{DomainState, ReportEncoder, TickReport};
use crate::schema::{Observation, TickRecord};
use serde::{Deserialize, Serialize};

/// Combined configuration for all three domains.
///
/// Deserializable so a CLI or host application can load it from JSON; every
/// field defaults independently, so a partial file overrides only what it
/// names.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub gesture: GestureConfig,
    pub posture: PostureConfig,
    pub blink: BlinkConfig,
}

impl EngineConfig {
    /// Validate all three domain configs
    pub fn validate(&self) -> Result<(), EngineError> {
        self.gesture.validate()?;
        self.posture.validate()?;
        self.blink.validate()?;
        Ok(())
    }
}

/// Process a batch of NDJSON tick records with fresh engines and return one
/// JSON report per record.
///
/// # Example
/// ```ignore
/// let reports = process_ndjson(&ndjson_input)?;
/// ```
pub fn process_ndjson(input: &str) -> Result<Vec<String>, EngineError> {
    let records = TickRecord::parse_ndjson(input)?;
    let mut processor = TickProcessor::new();

    let mut reports = Vec::with_capacity(records.len());
    for record in &records {
        let report = processor.process_record(record)?;
        reports.push(serde_json::to_string(&report)?);
    }
    Ok(reports)
}

/// Stateful processor for a whole session.
///
/// All debounce state lives in the owned engines; the processor itself adds
/// only a tick counter used when input records do not number themselves.
pub struct TickProcessor {
    gesture: GestureEngine,
    posture: PostureMonitor,
    blink: BlinkCounter,
    encoder: ReportEncoder,
    ticks_processed: u64,
}

impl Default for TickProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl TickProcessor {
    /// Create a processor with default thresholds for every domain
    pub fn new() -> Self {
        Self {
            gesture: GestureEngine::with_defaults(),
            posture: PostureMonitor::with_defaults(),
            blink: BlinkCounter::with_defaults(),
            encoder: ReportEncoder::new(),
            ticks_processed: 0,
        }
    }

    /// Create a processor from explicit configuration, rejecting invalid
    /// settings before any tick is processed
    pub fn with_config(config: EngineConfig) -> Result<Self, EngineError> {
        Ok(Self {
            gesture: GestureEngine::new(config.gesture)?,
            posture: PostureMonitor::new(config.posture)?,
            blink: BlinkCounter::new(config.blink)?,
            encoder: ReportEncoder::new(),
            ticks_processed: 0,
        })
    }

    /// Process one validated record into a report
    pub fn process_record(&mut self, record: &TickRecord) -> Result<TickReport, EngineError> {
        record.validate().map_err(EngineError::InvalidRecord)?;

        let state = match &record.observation {
            Observation::Hand { .. } => {
                let frame = record.observation.hand_frame()?;
                DomainState::Hand(self.gesture.process(frame.as_ref()))
            }
            Observation::Pose { .. } => {
                let frame = record.observation.pose_frame();
                DomainState::Pose(self.posture.process(frame))
            }
            Observation::Face { .. } => {
                let eyes = record.observation.eye_pair()?;
                DomainState::Face(self.blink.process(eyes.as_ref()))
            }
        };

        self.ticks_processed += 1;
        let tick = record.tick.unwrap_or(self.ticks_processed);
        Ok(self.encoder.encode(tick, state))
    }

    /// Parse, process and re-encode one NDJSON line
    pub fn process_line(&mut self, line: &str) -> Result<String, EngineError> {
        let record = TickRecord::parse(line)?;
        let report = self.process_record(&record)?;
        serde_json::to_string(&report).map_err(EngineError::JsonError)
    }

    /// Records processed so far
    pub fn ticks_processed(&self) -> u64 {
        self.ticks_processed
    }

    /// The hand-domain engine
    pub fn gesture(&self) -> &GestureEngine {
        &self.gesture
    }

    /// The posture-domain monitor
    pub fn posture(&self) -> &PostureMonitor {
        &self.posture
    }

    /// The blink-domain counter
    pub fn blink(&self) -> &BlinkCounter {
        &self.blink
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::types::Gesture;

    fn hand_line(extended: bool) -> String {
        // 21 points; fingertip rows pulled above their PIPs when extended
        let mut points = Vec::new();
        for i in 0..21 {
            let (x, y) = match i {
                // Thumb chain: CMC, MCP, IP, TIP
                1 => (0.40, 0.60),
                2 => (0.40, 0.50),
                3 => (0.40, 0.45),
                4 => (0.40, if extended { 0.40 } else { 0.50 }),
                // Finger chains: MCP, PIP, DIP, TIP at x per finger
                5 | 6 | 7 | 8 => (0.45, finger_y(i - 5, extended)),
                9 | 10 | 11 | 12 => (0.50, finger_y(i - 9, extended)),
                13 | 14 | 15 | 16 => (0.55, finger_y(i - 13, extended)),
                17 | 18 | 19 | 20 => (0.60, finger_y(i - 17, extended)),
                _ => (0.50, 0.80), // wrist
            };
            points.push(format!("{{\"x\": {x}, \"y\": {y}}}"));
        }
        format!(
            r#"{{"schema_version": "landmark.tick.v1", "observation": {{"domain": "hand", "landmarks": [{}]}}}}"#,
            points.join(",")
        )
    }

    fn finger_y(joint: u64, extended: bool) -> f64 {
        match joint {
            0 => 0.50, // MCP
            1 => 0.45, // PIP
            2 => 0.40, // DIP
            _ => {
                if extended {
                    0.35
                } else {
                    0.55
                }
            }
        }
    }

    fn face_line(closed: bool) -> String {
        let eye = |center: f64| {
            let half = if closed { 0.0025 } else { 0.015 };
            format!(
                r#"[{{"x": {a}, "y": 0.5}}, {{"x": {b}, "y": {top}}}, {{"x": {c}, "y": {top}}}, {{"x": {d}, "y": 0.5}}, {{"x": {c}, "y": {bot}}}, {{"x": {b}, "y": {bot}}}]"#,
                a = center - 0.05,
                b = center - 0.02,
                c = center + 0.02,
                d = center + 0.05,
                top = 0.5 - half,
                bot = 0.5 + half,
            )
        };
        format!(
            r#"{{"schema_version": "landmark.tick.v1", "observation": {{"domain": "face", "eyes": {{"left": {}, "right": {}}}}}}}"#,
            eye(0.35),
            eye(0.65)
        )
    }

    #[test]
    fn test_open_hand_confirms_over_a_batch() {
        let input: Vec<String> = (0..5).map(|_| hand_line(true)).collect();
        let reports = process_ndjson(&input.join("\n")).unwrap();
        assert_eq!(reports.len(), 5);

        let last: serde_json::Value = serde_json::from_str(&reports[4]).unwrap();
        assert_eq!(last["state"]["raw"], "open_hand");
        assert_eq!(last["state"]["confirmed"], "open_hand");

        let fourth: serde_json::Value = serde_json::from_str(&reports[3]).unwrap();
        assert_eq!(fourth["state"]["confirmed"], "none");
    }

    #[test]
    fn test_blink_counts_across_records() {
        let mut processor = TickProcessor::new();

        processor.process_line(&face_line(true)).unwrap();
        processor.process_line(&face_line(true)).unwrap();
        let report = processor.process_line(&face_line(false)).unwrap();

        let value: serde_json::Value = serde_json::from_str(&report).unwrap();
        assert_eq!(value["state"]["domain"], "face");
        assert_eq!(value["state"]["blink_completed"], true);
        assert_eq!(value["state"]["total_blinks"], 1);
        assert_eq!(processor.blink().total_blinks(), 1);
    }

    #[test]
    fn test_domains_interleave_without_crosstalk() {
        let mut processor = TickProcessor::new();

        // Gesture confirmation must survive interleaved face records
        for _ in 0..3 {
            processor.process_line(&hand_line(true)).unwrap();
            processor.process_line(&face_line(false)).unwrap();
        }
        for _ in 0..2 {
            processor.process_line(&hand_line(true)).unwrap();
        }

        assert_eq!(processor.gesture().confirmed(), Gesture::OpenHand);
        assert_eq!(processor.ticks_processed(), 8);
    }

    #[test]
    fn test_record_tick_number_is_preserved() {
        let mut processor = TickProcessor::new();
        let line = hand_line(true).replace("\"observation\"", "\"tick\": 42, \"observation\"");

        let report = processor.process_line(&line).unwrap();
        let value: serde_json::Value = serde_json::from_str(&report).unwrap();
        assert_eq!(value["tick"], 42);
    }

    #[test]
    fn test_invalid_record_is_rejected() {
        let mut processor = TickProcessor::new();
        let line = r#"{"schema_version": "landmark.tick.v9", "observation": {"domain": "hand"}}"#;
        assert!(processor.process_line(line).is_err());
    }

    #[test]
    fn test_with_config_rejects_bad_settings() {
        let config = EngineConfig {
            gesture: GestureConfig {
                confirm_ticks: 0,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(TickProcessor::with_config(config).is_err());
    }

    #[test]
    fn test_partial_config_file_overrides_one_field() {
        let json = r#"{"blink": {"min_closed_ticks": 3}}"#;
        let config: EngineConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.blink.min_closed_ticks, 3);
        assert_eq!(config.blink.closed_ear_threshold, 0.15);
        assert_eq!(config.gesture.confirm_ticks, 5);
        assert!(config.validate().is_ok());
    }
}
