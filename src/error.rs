//! Unified error types for the RangeAlert firmware.
//!
//! A single `Error` enum that every subsystem can convert into, keeping the
//! control loop's error handling uniform.  All variants are `Copy` so they
//! can be passed through events and logs without allocation.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A sensor could not be read or returned implausible data.
    Sensor(SensorError),
    /// An actuator command failed.
    Actuator(ActuatorError),
    /// A communication subsystem failed.
    Comms(CommsError),
    /// Peripheral initialisation failed.
    Init(HwInitError),
    /// Configuration is invalid.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sensor(e) => write!(f, "sensor: {e}"),
            Self::Actuator(e) => write!(f, "actuator: {e}"),
            Self::Comms(e) => write!(f, "comms: {e}"),
            Self::Init(e) => write!(f, "init: {e}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl core::error::Error for Error {}

// ---------------------------------------------------------------------------
// Sensor errors
// ---------------------------------------------------------------------------

/// Echo-ranging failures.  The first four are transient: the blocking
/// measurement retries them silently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// The echo line never went high inside the rise window.
    NoEchoStart,
    /// The echo line went high but never returned low inside the fall window.
    EchoNeverFalls,
    /// The rising edge arrived later than the sanity bound after the trigger.
    SpuriousTiming,
    /// The GPIO driver reported an error while switching or sampling the line.
    GpioFault,
    /// A blocking measurement returned a non-positive distance.
    MeasurementUnavailable,
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoEchoStart => write!(f, "no echo start"),
            Self::EchoNeverFalls => write!(f, "echo never falls"),
            Self::SpuriousTiming => write!(f, "spurious echo timing"),
            Self::GpioFault => write!(f, "GPIO fault on echo line"),
            Self::MeasurementUnavailable => write!(f, "distance measurement unavailable"),
        }
    }
}

impl From<SensorError> for Error {
    fn from(e: SensorError) -> Self {
        Self::Sensor(e)
    }
}

// ---------------------------------------------------------------------------
// Actuator errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorError {
    /// A clock/data line write on the LED bus failed.
    GpioWriteFailed,
    /// Buzzer PWM frequency or duty update failed.
    PwmWriteFailed,
}

impl fmt::Display for ActuatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GpioWriteFailed => write!(f, "GPIO write failed"),
            Self::PwmWriteFailed => write!(f, "PWM write failed"),
        }
    }
}

impl From<ActuatorError> for Error {
    fn from(e: ActuatorError) -> Self {
        Self::Actuator(e)
    }
}

// ---------------------------------------------------------------------------
// Communications errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommsError {
    WifiConnectFailed,
    /// The HTTP request could not be initiated or its response not read.
    RequestFailed,
    /// The collector answered with a non-200 status.
    HttpStatus(u16),
    /// The telemetry URL did not fit the fixed-capacity buffer.
    UrlTooLong,
}

impl fmt::Display for CommsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WifiConnectFailed => write!(f, "WiFi connect failed"),
            Self::RequestFailed => write!(f, "HTTP request failed"),
            Self::HttpStatus(code) => write!(f, "HTTP status {code}"),
            Self::UrlTooLong => write!(f, "telemetry URL too long"),
        }
    }
}

impl From<CommsError> for Error {
    fn from(e: CommsError) -> Self {
        Self::Comms(e)
    }
}

// ---------------------------------------------------------------------------
// Peripheral bring-up errors
// ---------------------------------------------------------------------------

/// Errors during one-shot peripheral initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    AdcInitFailed(i32),
    GpioConfigFailed(i32),
    LedcInitFailed(i32),
}

impl fmt::Display for HwInitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AdcInitFailed(rc) => write!(f, "ADC1 init failed (rc={})", rc),
            Self::GpioConfigFailed(rc) => write!(f, "GPIO config failed (rc={})", rc),
            Self::LedcInitFailed(rc) => write!(f, "LEDC timer/channel config failed (rc={})", rc),
        }
    }
}

impl From<HwInitError> for Error {
    fn from(e: HwInitError) -> Self {
        Self::Init(e)
    }
}
