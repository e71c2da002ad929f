//! GPIO / peripheral pin assignments for the RangeAlert board.
//!
//! Single source of truth: every driver references this module rather than
//! hard-coding pin numbers.  Five distinct lines, none shared.

// ---------------------------------------------------------------------------
// Motion sensor (analog)
// ---------------------------------------------------------------------------

/// Analog motion sensor output: ADC1 channel 4, which is GPIO 5 on the
/// ESP32-S3.
pub const MOTION_ADC_CHANNEL: u32 = 4;

// ---------------------------------------------------------------------------
// Ultrasonic ranger (single-wire trigger + echo)
// ---------------------------------------------------------------------------

/// Shared trigger/echo line.  Driven as output for the trigger pulse, then
/// switched to input to listen for the echo.
pub const ECHO_GPIO: i32 = 6;

// ---------------------------------------------------------------------------
// Chainable RGB indicator (clock + data)
// ---------------------------------------------------------------------------

pub const LED_CLK_GPIO: i32 = 7;
pub const LED_DATA_GPIO: i32 = 8;

// ---------------------------------------------------------------------------
// Buzzer (LEDC PWM, variable frequency)
// ---------------------------------------------------------------------------

pub const BUZZER_GPIO: i32 = 4;

/// LEDC timer resolution (bits).  8-bit gives 0 – 255 duty levels.
pub const PWM_RESOLUTION_BITS: u32 = 8;
/// Frequency the buzzer timer is configured with at boot.
pub const BUZZER_BASE_FREQ_HZ: u32 = 2_200;
