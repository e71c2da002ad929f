//! Single-wire ultrasonic echo ranger (Grove-style, trigger and echo on one pin).
//!
//! One measurement:
//!
//! ```text
//!  line  ──┐ 2µs ┌── 10µs ──┐ (switch to input)  ┌────── echo ──────┐
//!          └─────┘          └────────────────────┘                  └──
//!                           t_trigger           t_rise            t_fall
//! ```
//!
//! Both waits are bounded by wall-clock deadlines read from a
//! [`MonotonicClock`], so the windows mean the same thing on any core
//! clock.  A rise that arrives later than the sanity bound after the
//! trigger is treated as noise.
//!
//! `distance_cm = (t_fall - t_rise) · 34300 / 2`

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use log::{debug, trace};

use crate::app::ports::MonotonicClock;
use crate::config::SystemConfig;
use crate::error::SensorError;

/// Speed of sound at room temperature.
pub const SPEED_OF_SOUND_CM_PER_S: f32 = 34_300.0;

const TRIGGER_SETTLE_US: u32 = 2;
const TRIGGER_PULSE_US: u32 = 10;

/// A GPIO line that can be flipped between push-pull output and input.
pub trait EchoLine: InputPin + OutputPin {
    fn set_as_output(&mut self) -> Result<(), Self::Error>;
    fn set_as_input(&mut self) -> Result<(), Self::Error>;
}

/// Deadlines for one measurement, all in microseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EchoTiming {
    pub rise_timeout_us: u64,
    pub fall_timeout_us: u64,
    pub max_trigger_to_rise_us: u64,
}

impl Default for EchoTiming {
    fn default() -> Self {
        Self::from_config(&SystemConfig::default())
    }
}

impl EchoTiming {
    pub fn from_config(config: &SystemConfig) -> Self {
        Self {
            rise_timeout_us: u64::from(config.echo_rise_timeout_us),
            fall_timeout_us: u64::from(config.echo_fall_timeout_us),
            max_trigger_to_rise_us: u64::from(config.echo_max_trigger_to_rise_us),
        }
    }
}

/// Round-trip echo duration → one-way distance.
pub fn echo_to_cm(echo_us: u64) -> f32 {
    (echo_us as f32 / 1_000_000.0) * SPEED_OF_SOUND_CM_PER_S / 2.0
}

pub struct EchoRanger<L, C, D> {
    line: L,
    clock: C,
    delay: D,
    timing: EchoTiming,
}

impl<L, C, D> EchoRanger<L, C, D>
where
    L: EchoLine,
    C: MonotonicClock,
    D: DelayNs,
{
    pub fn new(line: L, clock: C, delay: D, timing: EchoTiming) -> Self {
        Self {
            line,
            clock,
            delay,
            timing,
        }
    }

    /// One trigger/listen attempt.
    pub fn measure_once(&mut self) -> Result<f32, SensorError> {
        self.fire_trigger().map_err(|_| SensorError::GpioFault)?;
        let t_trigger = self.clock.now_us();

        let t_rise = self
            .wait_for_level(true, t_trigger, self.timing.rise_timeout_us)?
            .ok_or(SensorError::NoEchoStart)?;

        let trigger_to_rise_us = t_rise - t_trigger;
        if trigger_to_rise_us > self.timing.max_trigger_to_rise_us {
            return Err(SensorError::SpuriousTiming);
        }

        let t_fall = self
            .wait_for_level(false, t_rise, self.timing.fall_timeout_us)?
            .ok_or(SensorError::EchoNeverFalls)?;

        let echo_us = t_fall - t_rise;
        let distance_cm = echo_to_cm(echo_us);
        trace!(
            "echo: t0={} t1={} t2={} echo={}us distance={:.2}cm",
            t_trigger, t_rise, t_fall, echo_us, distance_cm
        );
        Ok(distance_cm)
    }

    /// Retry [`measure_once`](Self::measure_once) until it succeeds.
    ///
    /// There is no attempt limit: a permanently silent sensor stalls the
    /// caller here.
    pub fn measure_blocking(&mut self) -> f32 {
        let mut attempts: u32 = 0;
        loop {
            attempts = attempts.wrapping_add(1);
            match self.measure_once() {
                Ok(distance_cm) => {
                    if attempts > 1 {
                        debug!("echo: valid reading after {} attempts", attempts);
                    }
                    return distance_cm;
                }
                Err(e) => debug!("echo: attempt {} failed ({}), retrying", attempts, e),
            }
        }
    }

    fn fire_trigger(&mut self) -> Result<(), L::Error> {
        self.line.set_as_output()?;
        self.line.set_low()?;
        self.delay.delay_us(TRIGGER_SETTLE_US);
        self.line.set_high()?;
        self.delay.delay_us(TRIGGER_PULSE_US);
        self.line.set_low()?;
        self.line.set_as_input()
    }

    /// Busy-poll until the line reads `high`, returning the timestamp at
    /// which it did, or `None` once `window_us` has elapsed since `since`.
    fn wait_for_level(
        &mut self,
        high: bool,
        since: u64,
        window_us: u64,
    ) -> Result<Option<u64>, SensorError> {
        loop {
            let level = self.line.is_high().map_err(|_| SensorError::GpioFault)?;
            let now = self.clock.now_us();
            if level == high {
                return Ok(Some(now));
            }
            if now.saturating_sub(since) >= window_us {
                return Ok(None);
            }
        }
    }
}
