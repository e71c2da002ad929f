//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the ESP-IDF logger (which goes to UART / USB-CDC in production).

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Reading(r) => {
                info!(
                    "READ  | distance={:.1}cm | color={} | sound={}",
                    r.distance_cm, r.color, r.sound
                );
            }
            AppEvent::StateChanged { from, to } => {
                info!("STATE | {:?} -> {:?}", from, to);
            }
            AppEvent::SensorFault(e) => {
                warn!("READ  | {}, cycle skipped", e);
            }
            AppEvent::TelemetrySent(r) => match serde_json::to_string(r) {
                Ok(json) => info!("TELEM | sent {}", json),
                Err(_) => info!("TELEM | sent"),
            },
            AppEvent::TelemetryFailed(e) => {
                warn!("TELEM | failed: {}", e);
            }
            AppEvent::Started(state) => {
                info!("START | initial_state={:?}", state);
            }
        }
    }
}
