//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AlarmService (domain)
//! ```
//!
//! Driven adapters (sensors, actuators, telemetry, event sinks, clocks)
//! implement these traits.  The [`AlarmService`](super::service::AlarmService)
//! consumes them via generics, so the domain core never touches hardware
//! directly.

use crate::error::CommsError;

use super::events::TelemetryRecord;

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the domain calls this to obtain sensor data.
pub trait SensorPort {
    /// Raw motion magnitude (16-bit scale).
    fn read_motion(&mut self) -> u16;

    /// Block until the ranger produces a distance in centimetres.
    ///
    /// May never return if the sensor stays silent.
    fn measure_distance(&mut self) -> f32;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the domain calls this to command actuators.
pub trait ActuatorPort {
    /// Paint the indicator chain.
    fn set_led(&mut self, r: u8, g: u8, b: u8);

    /// Sound the buzzer at `freq_hz` with duty `duty_percent` (0–100).
    fn sound_buzzer(&mut self, freq_hz: u32, duty_percent: u8);

    /// Drop the buzzer duty to zero.
    fn silence_buzzer(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Telemetry port (driven adapter: domain → remote collector)
// ───────────────────────────────────────────────────────────────

/// One synchronous request per record.  No retry, no queueing.
pub trait TelemetryPort {
    fn publish(&mut self, record: &TelemetryRecord) -> Result<(), CommsError>;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Clock port
// ───────────────────────────────────────────────────────────────

/// Monotonic microsecond time source used for echo timing.
pub trait MonotonicClock {
    /// Microseconds since an arbitrary fixed origin.  Never goes backwards.
    fn now_us(&mut self) -> u64;
}
