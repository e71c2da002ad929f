//! RangeAlert Firmware: Main Entry Point
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                     Adapters (outer ring)                    │
//! │                                                              │
//! │  HardwareAdapter       LogEventSink   ThingSpeakClient       │
//! │  (Sensor+Actuator)     (EventSink)    (TelemetryPort)        │
//! │  WifiAdapter           Esp32Clock                            │
//! │                                                              │
//! │  ──────────────── Port Trait Boundary ─────────────────      │
//! │                                                              │
//! │  ┌────────────────────────────────────────────────────┐      │
//! │  │          AlarmService (pure logic)                 │      │
//! │  │  motion gate · classify · report                   │      │
//! │  └────────────────────────────────────────────────────┘      │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Single-threaded: one cycle, then a fixed sleep, forever.
#![deny(unused_must_use)]

use std::time::Duration;

use anyhow::Result;
use esp_idf_svc::eventloop::EspSystemEventLoop;
use esp_idf_svc::hal::peripherals::Peripherals;
use esp_idf_svc::nvs::EspDefaultNvsPartition;
use esp_idf_svc::wifi::{BlockingWifi, EspWifi};
use log::{error, info, warn};

use rangealert::adapters::hardware::HardwareAdapter;
use rangealert::adapters::log_sink::LogEventSink;
use rangealert::adapters::thingspeak::{BUILD_API_KEY, ThingSpeakClient};
use rangealert::adapters::time::{Esp32Clock, platform_delay};
use rangealert::adapters::wifi::{BUILD_PASSWORD, BUILD_SSID, ConnectivityPort, WifiAdapter};
use rangealert::app::service::AlarmService;
use rangealert::config::SystemConfig;
use rangealert::drivers::buzzer::Buzzer;
use rangealert::drivers::chain_led::ChainableLed;
use rangealert::drivers::gpio::GpioLine;
use rangealert::drivers::hw_init;
use rangealert::error::{CommsError, Error};
use rangealert::pins;
use rangealert::sensors::motion::MotionSensor;
use rangealert::sensors::ultrasonic::{EchoRanger, EchoTiming};

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("RangeAlert v{}", env!("CARGO_PKG_VERSION"));

    let config = SystemConfig::default();
    config.validate().map_err(Error::from)?;

    // ── 2. Peripherals ────────────────────────────────────────
    if let Err(e) = hw_init::init_peripherals() {
        error!("HAL init failed: {}, halting", e);
        #[allow(clippy::empty_loop)]
        loop {}
    }

    let motion = MotionSensor::new(pins::MOTION_ADC_CHANNEL);
    let ranger = EchoRanger::new(
        GpioLine::new(pins::ECHO_GPIO),
        Esp32Clock::new(),
        platform_delay(),
        EchoTiming::from_config(&config),
    );
    let led = ChainableLed::new(
        GpioLine::new(pins::LED_CLK_GPIO),
        GpioLine::new(pins::LED_DATA_GPIO),
        platform_delay(),
        usize::from(config.led_count),
        config.led_clock_half_period_us,
    );
    let mut hw = HardwareAdapter::new(motion, ranger, led, Buzzer::new());
    hw.initialize();

    // ── 3. Network ────────────────────────────────────────────
    let peripherals = Peripherals::take()?;
    let sysloop = EspSystemEventLoop::take()?;
    let nvs = EspDefaultNvsPartition::take()?;
    let driver = BlockingWifi::wrap(
        EspWifi::new(peripherals.modem, sysloop.clone(), Some(nvs))?,
        sysloop,
    )?;
    let mut wifi = WifiAdapter::new(driver);

    info!("Connecting to WiFi...");
    match wifi
        .set_credentials(BUILD_SSID, BUILD_PASSWORD)
        .and_then(|()| wifi.connect())
    {
        Ok(()) => info!("Connected to WiFi!"),
        Err(e) => warn!(
            "{} ({}), telemetry will fail until reboot",
            CommsError::from(e.clone()),
            e
        ),
    }

    let mut telemetry = ThingSpeakClient::new(&config.telemetry_url, BUILD_API_KEY)
        .map_err(Error::from)?;
    let mut sink = LogEventSink::new();

    // ── 4. Control loop ───────────────────────────────────────
    let interval = Duration::from_millis(u64::from(config.cycle_interval_ms));
    let mut service = AlarmService::new(config);
    service.start(&mut hw, &mut sink);

    info!("Detecting distance...");
    loop {
        service.cycle(&mut hw, &mut telemetry, &mut sink);
        std::thread::sleep(interval);
    }
}
