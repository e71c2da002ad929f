//! Full cycle through the real drivers: simulated motion ADC, scripted
//! echo line, LED bus capture and the ThingSpeak client in simulation.
//!
//! The motion and HTTP-status injection points are process-wide, so the
//! whole scenario lives in one test.

use rangealert::adapters::hardware::HardwareAdapter;
use rangealert::adapters::thingspeak::{ThingSpeakClient, sim_set_http_status};
use rangealert::app::classifier::{ColorState, SoundState};
use rangealert::app::events::AppEvent;
use rangealert::app::service::{AlarmService, CycleOutcome};
use rangealert::config::SystemConfig;
use rangealert::drivers::buzzer::{Buzzer, BuzzerState};
use rangealert::drivers::chain_led::ChainableLed;
use rangealert::error::{CommsError, SensorError};
use rangealert::sensors::motion::{MotionSensor, sim_set_motion};
use rangealert::sensors::ultrasonic::{EchoRanger, EchoTiming};

use crate::mock_hw::{BusLine, EchoScript, LedBus, LogSink, SimClock, SimDelay, SimEcho};

const OFF_FRAME: [u8; 12] = [0, 0, 0, 0, 0xFF, 0, 0, 0, 0, 0, 0, 0];
const RED_FRAME: [u8; 12] = [0, 0, 0, 0, 0xFE, 0, 0, 105, 0, 0, 0, 0];

#[test]
fn motion_near_object_raises_alarm_and_reports() {
    let config = SystemConfig::default();
    let script = EchoScript::new(Some(100), Some(2_140));
    let bus = LedBus::new();

    let ranger = EchoRanger::new(
        SimEcho(script.clone()),
        SimClock(script.clone()),
        SimDelay(script.clone()),
        EchoTiming::from_config(&config),
    );
    let led = ChainableLed::new(
        BusLine::Clk(bus.clone()),
        BusLine::Data(bus.clone()),
        SimDelay(script.clone()),
        usize::from(config.led_count),
        config.led_clock_half_period_us,
    );
    let mut hw = HardwareAdapter::new(MotionSensor::new(0), ranger, led, Buzzer::new());
    let mut telemetry = ThingSpeakClient::new(&config.telemetry_url, "TESTKEY").unwrap();
    let mut sink = LogSink::new();
    let mut svc = AlarmService::new(config);

    hw.initialize();
    assert_eq!(bus.borrow_mut().take_bytes(), OFF_FRAME);
    svc.start(&mut hw, &mut sink);

    // ── Motion, object at ~35 cm ──────────────────────────────
    sim_set_motion(25_000);
    sim_set_http_status(200);
    let record = match svc.cycle(&mut hw, &mut telemetry, &mut sink) {
        CycleOutcome::Alarm(record) => record,
        other => panic!("expected alarm, got {other:?}"),
    };

    assert!((record.distance_cm - 34.986).abs() < 0.01, "got {}", record.distance_cm);
    assert_eq!((record.motion, record.color, record.sound), (1, ColorState::Red, SoundState::On));
    assert_eq!(script.triggers.get(), 1);
    assert_eq!(bus.borrow_mut().take_bytes(), RED_FRAME);
    assert_eq!(hw.led().current_colour(), (105, 0, 0));
    assert_eq!(hw.buzzer().state(), BuzzerState::Sounding { freq_hz: 2200, duty: 20 });
    assert_eq!(telemetry.sent(), 1);

    // ── Collector rejects, actuators stay ─────────────────────
    sim_set_http_status(429);
    svc.cycle(&mut hw, &mut telemetry, &mut sink);
    assert!(matches!(
        sink.events.last(),
        Some(AppEvent::TelemetryFailed(CommsError::HttpStatus(429)))
    ));
    assert!(hw.buzzer().is_sounding());
    assert_eq!(telemetry.sent(), 1);

    // ── Motion stops ──────────────────────────────────────────
    sim_set_motion(0);
    sim_set_http_status(200);
    let outcome = svc.cycle(&mut hw, &mut telemetry, &mut sink);

    assert!(matches!(outcome, CycleOutcome::Idle(r) if r.color == ColorState::Off && r.motion == 0));
    assert_eq!(script.triggers.get(), 2);
    assert_eq!(bus.borrow_mut().take_bytes(), [RED_FRAME, OFF_FRAME].concat());
    assert_eq!(hw.buzzer().state(), BuzzerState::Silent);
    assert_eq!(telemetry.sent(), 2);

    // ── LED bus rejects writes, cycle carries on ──────────────
    bus.borrow_mut().fail_writes = true;
    sim_set_motion(25_000);
    let record = match svc.cycle(&mut hw, &mut telemetry, &mut sink) {
        CycleOutcome::Alarm(record) => record,
        other => panic!("expected alarm, got {other:?}"),
    };

    assert_eq!((record.color, record.sound), (ColorState::Red, SoundState::On));
    assert!(bus.borrow_mut().take_bytes().is_empty());
    assert_eq!(hw.led().current_colour(), (0, 0, 0));
    assert!(hw.buzzer().is_sounding());
    assert!(matches!(sink.events.last(), Some(AppEvent::TelemetrySent(r)) if *r == record));
    assert_eq!(telemetry.sent(), 3);
}

#[test]
fn echo_read_fault_is_retried_until_a_valid_reading() {
    let script = EchoScript::new(Some(200), Some(1_200));
    let mut ranger = EchoRanger::new(
        SimEcho(script.clone()),
        SimClock(script.clone()),
        SimDelay(script.clone()),
        EchoTiming::default(),
    );

    script.read_faults.set(1);
    assert_eq!(ranger.measure_once(), Err(SensorError::GpioFault));

    script.read_faults.set(2);
    let distance = ranger.measure_blocking();
    assert!((distance - 17.15).abs() < 0.01, "got {distance}");
    assert_eq!(script.triggers.get(), 4);
    assert_eq!(script.read_faults.get(), 0);
}

#[test]
fn late_echo_is_retried_until_a_valid_reading() {
    let script = EchoScript::new(Some(900), Some(1_900));
    let mut ranger = EchoRanger::new(
        SimEcho(script.clone()),
        SimClock(script.clone()),
        SimDelay(script.clone()),
        EchoTiming::default(),
    );

    assert!(ranger.measure_once().is_err());
    script.rise_after_us.set(Some(200));
    script.fall_after_us.set(Some(1_200));

    let distance = ranger.measure_blocking();
    assert!((distance - 17.15).abs() < 0.01, "got {distance}");
    assert_eq!(script.triggers.get(), 2);
}
