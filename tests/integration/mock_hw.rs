//! Mock hardware for integration tests.
//!
//! Two flavours:
//! - [`MockHardware`] implements the ports directly and records every call.
//! - [`SimEcho`] / [`LedBus`] stand in for the physical lines so the real
//!   drivers and [`HardwareAdapter`](rangealert::adapters::hardware::HardwareAdapter)
//!   can be exercised end to end.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorKind, ErrorType, InputPin, OutputPin};
use rangealert::app::events::{AppEvent, TelemetryRecord};
use rangealert::app::ports::{ActuatorPort, EventSink, MonotonicClock, SensorPort, TelemetryPort};
use rangealert::error::CommsError;
use rangealert::sensors::ultrasonic::EchoLine;

// ── Actuator call record ──────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum ActuatorCall {
    SetLed { r: u8, g: u8, b: u8 },
    Buzzer { freq_hz: u32, duty: u8 },
    Silence,
}

// ── MockHardware ──────────────────────────────────────────────

/// Scripted motion samples and distances, recorded actuator calls.
pub struct MockHardware {
    pub motion: VecDeque<u16>,
    pub distances: VecDeque<f32>,
    pub calls: Vec<ActuatorCall>,
    pub measurements: u32,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new() -> Self {
        Self {
            motion: VecDeque::new(),
            distances: VecDeque::new(),
            calls: Vec::new(),
            measurements: 0,
        }
    }

    pub fn script(motion: &[u16], distances: &[f32]) -> Self {
        let mut hw = Self::new();
        hw.motion.extend(motion);
        hw.distances.extend(distances);
        hw
    }

    pub fn last_led(&self) -> Option<(u8, u8, u8)> {
        self.calls.iter().rev().find_map(|c| match c {
            ActuatorCall::SetLed { r, g, b } => Some((*r, *g, *b)),
            _ => None,
        })
    }

    pub fn buzzer_on(&self) -> bool {
        self.calls
            .iter()
            .rev()
            .find_map(|c| match c {
                ActuatorCall::Buzzer { duty, .. } => Some(*duty > 0),
                ActuatorCall::Silence => Some(false),
                ActuatorCall::SetLed { .. } => None,
            })
            .unwrap_or(false)
    }
}

impl Default for MockHardware {
    fn default() -> Self {
        Self::new()
    }
}

impl SensorPort for MockHardware {
    fn read_motion(&mut self) -> u16 {
        self.motion.pop_front().unwrap_or(0)
    }

    fn measure_distance(&mut self) -> f32 {
        self.measurements += 1;
        self.distances.pop_front().expect("distance requested but none scripted")
    }
}

impl ActuatorPort for MockHardware {
    fn set_led(&mut self, r: u8, g: u8, b: u8) {
        self.calls.push(ActuatorCall::SetLed { r, g, b });
    }

    fn sound_buzzer(&mut self, freq_hz: u32, duty_percent: u8) {
        self.calls.push(ActuatorCall::Buzzer { freq_hz, duty: duty_percent });
    }

    fn silence_buzzer(&mut self) {
        self.calls.push(ActuatorCall::Silence);
    }
}

// ── Telemetry ────────────────────────────────────────────────

pub struct MockTelemetry {
    pub records: Vec<TelemetryRecord>,
    pub fail_with: Option<CommsError>,
}

#[allow(dead_code)]
impl MockTelemetry {
    pub fn new() -> Self {
        Self { records: Vec::new(), fail_with: None }
    }

    pub fn failing(e: CommsError) -> Self {
        Self { records: Vec::new(), fail_with: Some(e) }
    }
}

impl TelemetryPort for MockTelemetry {
    fn publish(&mut self, record: &TelemetryRecord) -> Result<(), CommsError> {
        self.records.push(*record);
        match self.fail_with {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

// ── Event sink ───────────────────────────────────────────────

pub struct LogSink {
    pub events: Vec<AppEvent>,
}

impl LogSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }
}

impl EventSink for LogSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}

// ── Simulated echo timeline ───────────────────────────────────

/// Shared simulated time.  The clock advances 1 µs per read; delays
/// advance it by their length.  Echo edges are offsets from the moment
/// the line is switched to input.  While `read_faults` is non-zero each
/// sample of the line fails and decrements it.
pub struct EchoScript {
    pub now: Cell<u64>,
    listen_at: Cell<Option<u64>>,
    pub rise_after_us: Cell<Option<u64>>,
    pub fall_after_us: Cell<Option<u64>>,
    pub triggers: Cell<u32>,
    pub read_faults: Cell<u32>,
}

impl EchoScript {
    pub fn new(rise_after_us: Option<u64>, fall_after_us: Option<u64>) -> Rc<Self> {
        Rc::new(Self {
            now: Cell::new(0),
            listen_at: Cell::new(None),
            rise_after_us: Cell::new(rise_after_us),
            fall_after_us: Cell::new(fall_after_us),
            triggers: Cell::new(0),
            read_faults: Cell::new(0),
        })
    }

    fn advance(&self, us: u64) {
        self.now.set(self.now.get() + us);
    }
}

pub struct SimEcho(pub Rc<EchoScript>);
pub struct SimClock(pub Rc<EchoScript>);
pub struct SimDelay(pub Rc<EchoScript>);

impl ErrorType for SimEcho {
    type Error = ErrorKind;
}

impl OutputPin for SimEcho {
    fn set_low(&mut self) -> Result<(), ErrorKind> {
        Ok(())
    }
    fn set_high(&mut self) -> Result<(), ErrorKind> {
        Ok(())
    }
}

impl InputPin for SimEcho {
    fn is_high(&mut self) -> Result<bool, ErrorKind> {
        let s = &self.0;
        if s.read_faults.get() > 0 {
            s.read_faults.set(s.read_faults.get() - 1);
            return Err(ErrorKind::Other);
        }
        let Some(t0) = s.listen_at.get() else { return Ok(false) };
        let dt = s.now.get() - t0;
        let risen = s.rise_after_us.get().is_some_and(|r| dt >= r);
        let fallen = s.fall_after_us.get().is_some_and(|f| dt >= f);
        Ok(risen && !fallen)
    }
    fn is_low(&mut self) -> Result<bool, ErrorKind> {
        self.is_high().map(|h| !h)
    }
}

impl EchoLine for SimEcho {
    fn set_as_output(&mut self) -> Result<(), ErrorKind> {
        self.0.listen_at.set(None);
        self.0.triggers.set(self.0.triggers.get() + 1);
        Ok(())
    }
    fn set_as_input(&mut self) -> Result<(), ErrorKind> {
        self.0.listen_at.set(Some(self.0.now.get()));
        Ok(())
    }
}

impl MonotonicClock for SimClock {
    fn now_us(&mut self) -> u64 {
        let t = self.0.now.get();
        self.0.advance(1);
        t
    }
}

impl DelayNs for SimDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.0.advance(u64::from(ns / 1_000));
    }
}

// ── LED bus recorder ─────────────────────────────────────────

/// Samples the data line on each clock rising edge.  With `fail_writes`
/// set, every line write is rejected and nothing is clocked.
#[derive(Default)]
pub struct LedBus {
    data: bool,
    clk: bool,
    bits: Vec<bool>,
    pub fail_writes: bool,
}

impl LedBus {
    pub fn new() -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self { clk: true, ..Self::default() }))
    }

    /// Drain everything clocked so far as bytes.
    pub fn take_bytes(&mut self) -> Vec<u8> {
        let bytes = self
            .bits
            .chunks(8)
            .map(|c| c.iter().fold(0u8, |acc, &b| (acc << 1) | u8::from(b)))
            .collect();
        self.bits.clear();
        bytes
    }
}

pub enum BusLine {
    Clk(Rc<RefCell<LedBus>>),
    Data(Rc<RefCell<LedBus>>),
}

impl BusLine {
    fn bus(&self) -> &Rc<RefCell<LedBus>> {
        match self {
            Self::Clk(bus) | Self::Data(bus) => bus,
        }
    }
}

impl ErrorType for BusLine {
    type Error = ErrorKind;
}

impl OutputPin for BusLine {
    fn set_low(&mut self) -> Result<(), ErrorKind> {
        if self.bus().borrow().fail_writes {
            return Err(ErrorKind::Other);
        }
        match self {
            Self::Clk(bus) => bus.borrow_mut().clk = false,
            Self::Data(bus) => bus.borrow_mut().data = false,
        }
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), ErrorKind> {
        if self.bus().borrow().fail_writes {
            return Err(ErrorKind::Other);
        }
        match self {
            Self::Clk(bus) => {
                let mut bus = bus.borrow_mut();
                if !bus.clk {
                    let bit = bus.data;
                    bus.bits.push(bit);
                }
                bus.clk = true;
            }
            Self::Data(bus) => bus.borrow_mut().data = true,
        }
        Ok(())
    }
}
