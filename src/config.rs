//! System configuration parameters
//!
//! All tunable parameters for the RangeAlert device.  Defaults reproduce
//! the behaviour of the original deployment; there is no persisted store,
//! the firmware boots with [`SystemConfig::default()`].

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Errors from [`SystemConfig::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// A config field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        match e {
            ConfigError::ValidationFailed(msg) => Self::Config(msg),
        }
    }
}

/// Core system configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- Motion gating ---
    /// Raw 16-bit motion magnitude above which a cycle is "active"
    pub motion_threshold: u16,

    // --- Ultrasonic ranger ---
    /// Window for the echo line to go high after the trigger (µs)
    pub echo_rise_timeout_us: u32,
    /// Window for the echo line to return low after the rise (µs)
    pub echo_fall_timeout_us: u32,
    /// Trigger-to-rise delays above this are rejected as noise (µs)
    pub echo_max_trigger_to_rise_us: u32,

    // --- Chainable LED ---
    /// Number of indicator elements wired in series
    pub led_count: u8,
    /// Channel level used for every lit color (0-255)
    pub led_level: u8,
    /// Hold time for each clock phase on the LED bus (µs)
    pub led_clock_half_period_us: u32,

    // --- Buzzer ---
    /// Alarm tone frequency (Hz)
    pub buzzer_freq_hz: u32,
    /// Alarm PWM duty cycle (0-100%)
    pub buzzer_duty_percent: u8,

    // --- Timing ---
    /// Sleep between control cycles (milliseconds)
    pub cycle_interval_ms: u32,

    // --- Telemetry ---
    /// Collector update endpoint
    pub telemetry_url: heapless::String<96>,
}

impl Default for SystemConfig {
    fn default() -> Self {
        let mut telemetry_url = heapless::String::new();
        // Fits: the literal is well under the 96-byte capacity.
        let _ = telemetry_url.push_str("https://api.thingspeak.com/update");

        Self {
            // Motion
            motion_threshold: 20_000,

            // Ranger
            echo_rise_timeout_us: 3_000,
            echo_fall_timeout_us: 30_000,
            echo_max_trigger_to_rise_us: 530,

            // LED
            led_count: 1,
            led_level: 105,
            led_clock_half_period_us: 20,

            // Buzzer
            buzzer_freq_hz: 2_200,
            buzzer_duty_percent: 20,

            // Timing
            cycle_interval_ms: 500,

            telemetry_url,
        }
    }
}

impl SystemConfig {
    /// Reject values that would make the device misbehave rather than
    /// silently clamping them.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cycle_interval_ms == 0 {
            return Err(ConfigError::ValidationFailed("cycle_interval_ms must be > 0"));
        }
        if self.buzzer_duty_percent > 100 {
            return Err(ConfigError::ValidationFailed("buzzer_duty_percent must be <= 100"));
        }
        if self.buzzer_freq_hz == 0 {
            return Err(ConfigError::ValidationFailed("buzzer_freq_hz must be > 0"));
        }
        if self.led_count == 0 {
            return Err(ConfigError::ValidationFailed("led_count must be > 0"));
        }
        if self.echo_rise_timeout_us <= self.echo_max_trigger_to_rise_us {
            return Err(ConfigError::ValidationFailed(
                "echo_rise_timeout_us must exceed echo_max_trigger_to_rise_us",
            ));
        }
        if self.echo_fall_timeout_us <= self.echo_rise_timeout_us {
            return Err(ConfigError::ValidationFailed(
                "echo_fall_timeout_us must exceed echo_rise_timeout_us",
            ));
        }
        if self.telemetry_url.is_empty() {
            return Err(ConfigError::ValidationFailed("telemetry_url must not be empty"));
        }
        Ok(())
    }
}
