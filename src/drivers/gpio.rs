//! `embedded-hal` view of a raw GPIO number.
//!
//! [`GpioLine`] wraps the hw_init register helpers so the generic drivers
//! (ranger, LED bus) can own a board pin like any other HAL pin.  Each line
//! is constructed once in `main()` and moved into exactly one driver.

use core::fmt;

use embedded_hal::digital::{self, ErrorKind, ErrorType, InputPin, OutputPin};

use crate::drivers::hw_init;
use crate::sensors::ultrasonic::EchoLine;

/// ESP-IDF return code from a failed GPIO call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GpioError(pub i32);

impl fmt::Display for GpioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GPIO call failed (rc={})", self.0)
    }
}

impl digital::Error for GpioError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

#[derive(Debug)]
pub struct GpioLine {
    pin: i32,
}

impl GpioLine {
    pub fn new(pin: i32) -> Self {
        Self { pin }
    }
}

impl ErrorType for GpioLine {
    type Error = GpioError;
}

impl OutputPin for GpioLine {
    fn set_low(&mut self) -> Result<(), GpioError> {
        hw_init::gpio_write(self.pin, false).map_err(GpioError)
    }

    fn set_high(&mut self) -> Result<(), GpioError> {
        hw_init::gpio_write(self.pin, true).map_err(GpioError)
    }
}

impl InputPin for GpioLine {
    fn is_high(&mut self) -> Result<bool, GpioError> {
        Ok(hw_init::gpio_read(self.pin))
    }

    fn is_low(&mut self) -> Result<bool, GpioError> {
        Ok(!hw_init::gpio_read(self.pin))
    }
}

impl EchoLine for GpioLine {
    fn set_as_output(&mut self) -> Result<(), GpioError> {
        hw_init::gpio_set_output(self.pin, true).map_err(GpioError)
    }

    fn set_as_input(&mut self) -> Result<(), GpioError> {
        hw_init::gpio_set_output(self.pin, false).map_err(GpioError)
    }
}
