//! Sensor subsystem: the motion-gating ADC and the ultrasonic echo ranger.

pub mod motion;
pub mod ultrasonic;
