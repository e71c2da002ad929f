//! Hardware adapter: bridges real peripherals to domain port traits.
//!
//! Owns the motion sensor, the echo ranger, the LED chain and the buzzer,
//! exposing them through [`SensorPort`] and [`ActuatorPort`].  The ranger
//! and LED chain are generic over their pins, clock and delay so the same
//! adapter runs on the board (with [`GpioLine`](crate::drivers::gpio::GpioLine))
//! and in host tests (with recording mocks).

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use log::warn;

use crate::app::ports::{ActuatorPort, MonotonicClock, SensorPort};
use crate::drivers::buzzer::Buzzer;
use crate::drivers::chain_led::ChainableLed;
use crate::error::ActuatorError;
use crate::sensors::motion::MotionSensor;
use crate::sensors::ultrasonic::{EchoLine, EchoRanger};

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter<L, C, P, D> {
    motion: MotionSensor,
    ranger: EchoRanger<L, C, D>,
    led: ChainableLed<P, D>,
    buzzer: Buzzer,
}

impl<L, C, P, D> HardwareAdapter<L, C, P, D>
where
    L: EchoLine,
    C: MonotonicClock,
    P: OutputPin,
    D: DelayNs,
{
    pub fn new(
        motion: MotionSensor,
        ranger: EchoRanger<L, C, D>,
        led: ChainableLed<P, D>,
        buzzer: Buzzer,
    ) -> Self {
        Self {
            motion,
            ranger,
            led,
            buzzer,
        }
    }

    /// Blank the LED chain and silence the buzzer.  Called once at boot.
    pub fn initialize(&mut self) {
        if self.led.initialize().is_err() {
            warn!("LED chain init: {}", ActuatorError::GpioWriteFailed);
        }
        self.buzzer.silence();
    }

    pub fn buzzer(&self) -> &Buzzer {
        &self.buzzer
    }

    pub fn led(&self) -> &ChainableLed<P, D> {
        &self.led
    }
}

// ── SensorPort implementation ─────────────────────────────────

impl<L, C, P, D> SensorPort for HardwareAdapter<L, C, P, D>
where
    L: EchoLine,
    C: MonotonicClock,
    P: OutputPin,
    D: DelayNs,
{
    fn read_motion(&mut self) -> u16 {
        self.motion.read()
    }

    fn measure_distance(&mut self) -> f32 {
        self.ranger.measure_blocking()
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl<L, C, P, D> ActuatorPort for HardwareAdapter<L, C, P, D>
where
    L: EchoLine,
    C: MonotonicClock,
    P: OutputPin,
    D: DelayNs,
{
    fn set_led(&mut self, r: u8, g: u8, b: u8) {
        if self.led.set_color(0, r, g, b).is_err() {
            warn!("LED chain: {} while sending ({}, {}, {})", ActuatorError::GpioWriteFailed, r, g, b);
        }
    }

    fn sound_buzzer(&mut self, freq_hz: u32, duty_percent: u8) {
        if let Err(e) = self.buzzer.sound(freq_hz, duty_percent) {
            warn!("Buzzer: {} at {} Hz", e, freq_hz);
        }
    }

    fn silence_buzzer(&mut self) {
        self.buzzer.silence();
    }
}
