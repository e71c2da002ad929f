//! Application core: pure domain logic, zero I/O.
//!
//! This module contains the business rules for the RangeAlert device:
//! distance classification, motion gating, and the per-cycle controller.
//! All interaction with hardware happens through **port traits** defined
//! in [`ports`], keeping this layer fully testable without real peripherals.

pub mod classifier;
pub mod events;
pub mod ports;
pub mod service;
