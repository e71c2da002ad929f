//! Analog motion sensor.
//!
//! Reads the sensor's analog output through an ESP32-S3 ADC channel and
//! widens the 12-bit sample onto a 16-bit scale, so motion thresholds are
//! expressed the same way regardless of ADC resolution.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: reads ADC1 via the oneshot API (initialised by hw_init).
//! On host/test: reads from a static `AtomicU16` for injection, already on
//! the 16-bit scale.

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicU16, Ordering};

#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;

#[cfg(not(target_os = "espidf"))]
static SIM_MOTION: AtomicU16 = AtomicU16::new(0);

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_motion(magnitude: u16) {
    SIM_MOTION.store(magnitude, Ordering::Relaxed);
}

/// Stretch a 12-bit ADC sample across the full `u16` range.
pub const fn widen_12bit(raw: u16) -> u16 {
    let raw = raw & 0x0FFF;
    (raw << 4) | (raw >> 8)
}

pub struct MotionSensor {
    _adc_channel: u32,
}

impl MotionSensor {
    pub fn new(adc_channel: u32) -> Self {
        Self {
            _adc_channel: adc_channel,
        }
    }

    /// Sample the sensor once.
    pub fn read(&mut self) -> u16 {
        self.read_adc()
    }

    #[cfg(target_os = "espidf")]
    fn read_adc(&self) -> u16 {
        widen_12bit(hw_init::adc1_read(self._adc_channel))
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_adc(&self) -> u16 {
        SIM_MOTION.load(Ordering::Relaxed)
    }
}
