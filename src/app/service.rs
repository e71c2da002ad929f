//! Alarm service: the hexagonal core.
//!
//! [`AlarmService`] runs one control cycle per call: read motion, gate the
//! distance measurement on it, classify, drive the indicator and buzzer,
//! and report a [`TelemetryRecord`].  All I/O flows through port traits
//! injected at call sites, making the whole cycle testable with mock
//! adapters.
//!
//! ```text
//!  SensorPort ──▶ ┌────────────────────────┐ ──▶ TelemetryPort
//!                 │      AlarmService      │
//! ActuatorPort ◀──│  gate · classify       │ ──▶ EventSink
//!                 └────────────────────────┘
//! ```
//!
//! Every cycle is evaluated on its own: no hysteresis, no debounce.  The
//! only thing remembered between cycles is the previous [`CycleState`],
//! and only so that transitions can be reported.

use log::{debug, info, warn};

use crate::config::SystemConfig;
use crate::error::SensorError;

use super::classifier::{ColorState, SoundState, classify, gate_motion_at};
use super::events::{AppEvent, TelemetryRecord};
use super::ports::{ActuatorPort, EventSink, SensorPort, TelemetryPort};

/// Per-cycle gating state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CycleState {
    /// No motion: actuators off, no measurement.
    Idle,
    /// Motion above threshold: measure and classify.
    Active,
}

/// What a single call to [`AlarmService::cycle`] did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CycleOutcome {
    /// No motion; actuators off and an idle record reported.
    Idle(TelemetryRecord),
    /// Motion and a valid distance; actuators driven and record reported.
    Alarm(TelemetryRecord),
    /// Motion, but the distance came back non-positive.  Nothing was
    /// actuated or reported.
    MeasurementUnavailable,
}

/// The application service orchestrates one device cycle.
pub struct AlarmService {
    config: SystemConfig,
    state: CycleState,
    cycle_count: u64,
}

impl AlarmService {
    /// Construct the service from configuration.
    pub fn new(config: SystemConfig) -> Self {
        Self {
            config,
            state: CycleState::Idle,
            cycle_count: 0,
        }
    }

    /// Silence the buzzer and announce the initial state.
    pub fn start(&mut self, hw: &mut impl ActuatorPort, sink: &mut impl EventSink) {
        hw.silence_buzzer();
        sink.emit(&AppEvent::Started(self.state));
        info!("AlarmService started in {:?}", self.state);
    }

    // ── Per-cycle orchestration ───────────────────────────────

    /// Run one full cycle: motion → (gated) distance → classify →
    /// actuators → telemetry.  The caller sleeps
    /// [`cycle_interval_ms`](SystemConfig::cycle_interval_ms) afterwards.
    ///
    /// The `hw` parameter satisfies **both** [`SensorPort`] and
    /// [`ActuatorPort`], which avoids a double mutable borrow while
    /// keeping the port boundary explicit.
    pub fn cycle(
        &mut self,
        hw: &mut (impl SensorPort + ActuatorPort),
        telemetry: &mut impl TelemetryPort,
        sink: &mut impl EventSink,
    ) -> CycleOutcome {
        self.cycle_count += 1;

        // Labels start at Off every cycle; only an alarm overwrites them.
        let mut color = ColorState::Off;
        let mut sound = SoundState::Off;

        let motion = hw.read_motion();
        let next = if gate_motion_at(motion, self.config.motion_threshold) {
            CycleState::Active
        } else {
            CycleState::Idle
        };
        self.transition(next, sink);

        match next {
            CycleState::Idle => {
                debug!("No motion (raw={})", motion);
                let (r, g, b) = ColorState::Off.rgb(self.config.led_level);
                hw.set_led(r, g, b);
                hw.silence_buzzer();

                let record = TelemetryRecord {
                    distance_cm: 0.0,
                    motion: 0,
                    color,
                    sound,
                };
                Self::report(&record, telemetry, sink);
                CycleOutcome::Idle(record)
            }
            CycleState::Active => {
                info!("Motion detected (raw={})", motion);
                let distance_cm = hw.measure_distance();
                if distance_cm <= 0.0 {
                    let fault = SensorError::MeasurementUnavailable;
                    warn!("{} ({} cm), skipping cycle", fault, distance_cm);
                    sink.emit(&AppEvent::SensorFault(fault));
                    return CycleOutcome::MeasurementUnavailable;
                }

                (color, sound) = classify(distance_cm);
                self.apply_actuators(hw, color, sound);

                let record = TelemetryRecord {
                    distance_cm,
                    motion: 1,
                    color,
                    sound,
                };
                sink.emit(&AppEvent::Reading(record));
                Self::report(&record, telemetry, sink);
                CycleOutcome::Alarm(record)
            }
        }
    }

    // ── Queries ───────────────────────────────────────────────

    /// Gating state of the most recent cycle.
    pub fn state(&self) -> CycleState {
        self.state
    }

    /// Total cycles executed since startup.
    pub fn cycle_count(&self) -> u64 {
        self.cycle_count
    }

    pub fn config(&self) -> &SystemConfig {
        &self.config
    }

    // ── Internal ──────────────────────────────────────────────

    fn transition(&mut self, next: CycleState, sink: &mut impl EventSink) {
        if next != self.state {
            sink.emit(&AppEvent::StateChanged {
                from: self.state,
                to: next,
            });
            self.state = next;
        }
    }

    /// Translate a classification into port calls.
    fn apply_actuators(&self, hw: &mut impl ActuatorPort, color: ColorState, sound: SoundState) {
        let (r, g, b) = color.rgb(self.config.led_level);
        hw.set_led(r, g, b);
        match sound {
            SoundState::On => {
                hw.sound_buzzer(self.config.buzzer_freq_hz, self.config.buzzer_duty_percent);
            }
            SoundState::Off => hw.silence_buzzer(),
        }
    }

    fn report(record: &TelemetryRecord, telemetry: &mut impl TelemetryPort, sink: &mut impl EventSink) {
        match telemetry.publish(record) {
            Ok(()) => sink.emit(&AppEvent::TelemetrySent(*record)),
            Err(e) => {
                warn!("Telemetry publish failed: {}", e);
                sink.emit(&AppEvent::TelemetryFailed(e));
            }
        }
    }
}
