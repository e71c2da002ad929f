//! ESP32 time adapter.
//!
//! - **`target_os = "espidf"`**: wraps `esp_timer_get_time()` from the
//!   ESP-IDF high-resolution timer (microsecond precision, monotonic), and
//!   uses the ROM `ets_delay_us` busy-wait for sub-millisecond holds.
//! - **`not(target_os = "espidf")`**: uses `std::time::Instant` and
//!   `std::thread::sleep` for host-side simulation.

use crate::app::ports::MonotonicClock;

/// Monotonic clock for the ESP32-S3 platform.
pub struct Esp32Clock {
    #[cfg(not(target_os = "espidf"))]
    start: std::time::Instant,
}

impl Default for Esp32Clock {
    fn default() -> Self {
        Self::new()
    }
}

impl Esp32Clock {
    pub fn new() -> Self {
        Self {
            #[cfg(not(target_os = "espidf"))]
            start: std::time::Instant::now(),
        }
    }

    /// Microseconds since boot (monotonic, wraps at `u64::MAX`).
    #[cfg(target_os = "espidf")]
    pub fn uptime_us(&self) -> u64 {
        // SAFETY: esp_timer_get_time reads a free-running counter.
        (unsafe { esp_idf_svc::sys::esp_timer_get_time() }) as u64
    }

    /// Microseconds since construction (monotonic).
    #[cfg(not(target_os = "espidf"))]
    pub fn uptime_us(&self) -> u64 {
        self.start.elapsed().as_micros() as u64
    }
}

impl MonotonicClock for Esp32Clock {
    fn now_us(&mut self) -> u64 {
        self.uptime_us()
    }
}

/// Busy-wait delay used for trigger pulses and LED clock phases.
#[cfg(target_os = "espidf")]
pub type PlatformDelay = esp_idf_hal::delay::Ets;

/// Busy-wait delay used for trigger pulses and LED clock phases.
#[cfg(not(target_os = "espidf"))]
pub type PlatformDelay = HostDelay;

#[cfg(not(target_os = "espidf"))]
#[derive(Debug, Default, Clone, Copy)]
pub struct HostDelay;

#[cfg(not(target_os = "espidf"))]
impl embedded_hal::delay::DelayNs for HostDelay {
    fn delay_ns(&mut self, ns: u32) {
        std::thread::sleep(std::time::Duration::from_nanos(u64::from(ns)));
    }
}

/// Construct the platform delay.
pub fn platform_delay() -> PlatformDelay {
    #[cfg(target_os = "espidf")]
    {
        esp_idf_hal::delay::Ets
    }
    #[cfg(not(target_os = "espidf"))]
    {
        HostDelay
    }
}
