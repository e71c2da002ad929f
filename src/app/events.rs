//! Outbound application events and the telemetry record.
//!
//! The [`AlarmService`](super::service::AlarmService) emits these through
//! the [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them.

use serde::Serialize;

use crate::error::{CommsError, SensorError};

use super::classifier::{ColorState, SoundState};
use super::service::CycleState;

/// Distilled per-cycle status handed to the telemetry collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TelemetryRecord {
    /// Measured distance, 0 on idle cycles.
    #[serde(rename = "distance")]
    pub distance_cm: f32,
    /// 1 when the cycle was motion-gated active, otherwise 0.
    pub motion: u8,
    pub color: ColorState,
    pub sound: SoundState,
}

/// Structured events emitted by the application core.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// The service has started (carries initial state).
    Started(CycleState),

    /// Motion gating flipped between cycles.
    StateChanged { from: CycleState, to: CycleState },

    /// A distance was measured and classified.
    Reading(TelemetryRecord),

    /// A sensor reading could not be used and the cycle was skipped.
    SensorFault(SensorError),

    /// The collector accepted a record.
    TelemetrySent(TelemetryRecord),

    /// The collector request failed.  Not retried.
    TelemetryFailed(CommsError),
}
