//! Piezo buzzer driver.
//!
//! Variable-frequency tone via a dedicated LEDC timer (so retuning it does
//! not disturb any other PWM user) and an 8-bit duty channel.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives real LEDC timer/channel via hw_init helpers.
//! On host/test: tracks state in-memory only.

use log::warn;

use crate::drivers::hw_init;
use crate::error::ActuatorError;
use crate::pins;

const DUTY_MAX: u16 = (1 << pins::PWM_RESOLUTION_BITS) - 1;

/// Percentage → raw LEDC duty at the configured timer resolution.
pub fn duty_to_raw(percent: u8) -> u8 {
    (u16::from(percent.min(100)) * DUTY_MAX / 100) as u8
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuzzerState {
    Silent,
    Sounding { freq_hz: u32, duty: u8 },
}

pub struct Buzzer {
    state: BuzzerState,
}

impl Buzzer {
    pub fn new() -> Self {
        Self {
            state: BuzzerState::Silent,
        }
    }

    /// Start (or retune) the tone.  `duty` is a percentage, 0 silences.
    pub fn sound(&mut self, freq_hz: u32, duty: u8) -> Result<(), ActuatorError> {
        let duty = duty.min(100);
        if duty == 0 || freq_hz == 0 {
            self.silence();
            return Ok(());
        }

        if !matches!(self.state, BuzzerState::Sounding { freq_hz: f, .. } if f == freq_hz) {
            hw_init::ledc_set_freq(hw_init::LEDC_TIMER_BUZZER, freq_hz)
                .map_err(|_| ActuatorError::PwmWriteFailed)?;
        }
        self.set_duty_hw(duty);

        self.state = BuzzerState::Sounding { freq_hz, duty };
        Ok(())
    }

    pub fn silence(&mut self) {
        self.set_duty_hw(0);
        self.state = BuzzerState::Silent;
    }

    fn set_duty_hw(&self, duty: u8) {
        if hw_init::ledc_set(hw_init::LEDC_CH_BUZZER, duty_to_raw(duty)).is_err() {
            warn!("buzzer: duty update rejected (duty={}%)", duty);
        }
    }

    pub fn state(&self) -> BuzzerState {
        self.state
    }

    pub fn is_sounding(&self) -> bool {
        matches!(self.state, BuzzerState::Sounding { .. })
    }
}

impl Default for Buzzer {
    fn default() -> Self {
        Self::new()
    }
}
