//! Actuator drivers, GPIO wrappers, and hardware initialisation.

pub mod buzzer;
pub mod chain_led;
pub mod gpio;
pub mod hw_init;
