//! One-shot hardware peripheral initialization and raw register helpers.
//!
//! Configures the motion ADC channel, the GPIO lines for the ranger and the
//! LED bus, and the LEDC timer/channel for the buzzer using raw ESP-IDF sys
//! calls.  `init_peripherals()` is called once from `main()` before the
//! control loop starts.
//!
//! On host targets the GPIO helpers loop written levels back through a
//! static bitmask so drivers can be exercised without hardware.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
use log::info;

pub use crate::error::HwInitError;

#[cfg(target_os = "espidf")]
use crate::pins;

pub const LEDC_TIMER_BUZZER: u32 = 0;
pub const LEDC_CH_BUZZER: u32 = 0;

#[cfg(target_os = "espidf")]
pub fn init_peripherals() -> Result<(), HwInitError> {
    // SAFETY: Called once from main() before the control loop; single-threaded.
    unsafe {
        init_adc()?;
        init_gpio_outputs()?;
        init_ledc()?;
    }
    info!("hw_init: all peripherals configured");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_peripherals() -> Result<(), HwInitError> {
    log::info!("hw_init(sim): peripheral init skipped");
    Ok(())
}

// ── ADC (oneshot) ─────────────────────────────────────────────

#[cfg(target_os = "espidf")]
static mut ADC1_HANDLE: adc_oneshot_unit_handle_t = core::ptr::null_mut();

/// SAFETY: Must be called only from the single-threaded init path or the
/// main-loop ADC read path.  `init_adc()` completes before the loop starts.
#[cfg(target_os = "espidf")]
unsafe fn adc1_handle() -> adc_oneshot_unit_handle_t {
    unsafe { ADC1_HANDLE }
}

#[cfg(target_os = "espidf")]
unsafe fn init_adc() -> Result<(), HwInitError> {
    let init_cfg = adc_oneshot_unit_init_cfg_t {
        unit_id: adc_unit_t_ADC_UNIT_1,
        ulp_mode: adc_ulp_mode_t_ADC_ULP_MODE_DISABLE,
        ..Default::default()
    };
    // SAFETY: ADC1_HANDLE is only written here, once at boot.
    let ret = unsafe { adc_oneshot_new_unit(&init_cfg, &raw mut ADC1_HANDLE) };
    if ret != ESP_OK as i32 { return Err(HwInitError::AdcInitFailed(ret)); }

    let chan_cfg = adc_oneshot_chan_cfg_t {
        atten: adc_atten_t_ADC_ATTEN_DB_12,
        bitwidth: adc_bitwidth_t_ADC_BITWIDTH_12,
    };
    let ret = unsafe { adc_oneshot_config_channel(adc1_handle(), pins::MOTION_ADC_CHANNEL, &chan_cfg) };
    if ret != ESP_OK as i32 { return Err(HwInitError::AdcInitFailed(ret)); }

    info!("hw_init: ADC1 configured (CH{}=motion)", pins::MOTION_ADC_CHANNEL);
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn adc1_read(channel: u32) -> u16 {
    let mut raw: i32 = 0;
    // SAFETY: adc1_handle() contract, single-threaded main-loop access only.
    let ret = unsafe { adc_oneshot_read(adc1_handle(), channel, &mut raw) };
    if ret != ESP_OK as i32 {
        return 0;
    }
    raw.max(0) as u16
}

#[cfg(not(target_os = "espidf"))]
pub fn adc1_read(_channel: u32) -> u16 {
    0
}

// ── GPIO ──────────────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_gpio_outputs() -> Result<(), HwInitError> {
    let output_pins = [pins::ECHO_GPIO, pins::LED_CLK_GPIO, pins::LED_DATA_GPIO];

    for &pin in &output_pins {
        let cfg = gpio_config_t {
            pin_bit_mask: 1u64 << pin,
            mode: gpio_mode_t_GPIO_MODE_OUTPUT,
            pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
            pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
            intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
        };
        let ret = unsafe { gpio_config(&cfg) };
        if ret != ESP_OK as i32 { return Err(HwInitError::GpioConfigFailed(ret)); }
        unsafe { gpio_set_level(pin, 0) };
    }

    info!("hw_init: GPIO outputs configured (echo, led clk, led data)");
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn gpio_read(pin: i32) -> bool {
    // SAFETY: gpio_get_level is a read-only register access on a
    // configured pin; main context only.
    (unsafe { gpio_get_level(pin) }) != 0
}

#[cfg(target_os = "espidf")]
pub fn gpio_write(pin: i32, high: bool) -> Result<(), i32> {
    // SAFETY: pin was configured in init_gpio_outputs(); main loop only.
    let ret = unsafe { gpio_set_level(pin, u32::from(high)) };
    if ret == ESP_OK as i32 { Ok(()) } else { Err(ret) }
}

/// Switch a configured line between push-pull output and floating input.
#[cfg(target_os = "espidf")]
pub fn gpio_set_output(pin: i32, output: bool) -> Result<(), i32> {
    let mode = if output { gpio_mode_t_GPIO_MODE_OUTPUT } else { gpio_mode_t_GPIO_MODE_INPUT };
    // SAFETY: direction change on a pin owned by a single driver.
    let ret = unsafe { gpio_set_direction(pin, mode) };
    if ret == ESP_OK as i32 { Ok(()) } else { Err(ret) }
}

#[cfg(not(target_os = "espidf"))]
static SIM_LEVELS: core::sync::atomic::AtomicU64 = core::sync::atomic::AtomicU64::new(0);

#[cfg(not(target_os = "espidf"))]
pub fn gpio_read(pin: i32) -> bool {
    SIM_LEVELS.load(core::sync::atomic::Ordering::Relaxed) & (1u64 << pin) != 0
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_write(pin: i32, high: bool) -> Result<(), i32> {
    use core::sync::atomic::Ordering;
    if high {
        SIM_LEVELS.fetch_or(1u64 << pin, Ordering::Relaxed);
    } else {
        SIM_LEVELS.fetch_and(!(1u64 << pin), Ordering::Relaxed);
    }
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_set_output(_pin: i32, _output: bool) -> Result<(), i32> {
    Ok(())
}

// ── LEDC PWM ─────────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_ledc() -> Result<(), HwInitError> {
    // Timer 0: buzzer only, so its frequency can be retuned freely.
    let timer = ledc_timer_config_t {
        speed_mode: ledc_mode_t_LEDC_LOW_SPEED_MODE,
        timer_num: LEDC_TIMER_BUZZER,
        duty_resolution: pins::PWM_RESOLUTION_BITS,
        freq_hz: pins::BUZZER_BASE_FREQ_HZ,
        clk_cfg: soc_periph_ledc_clk_src_legacy_t_LEDC_AUTO_CLK,
        ..Default::default()
    };
    let ret = unsafe { ledc_timer_config(&timer) };
    if ret != ESP_OK as i32 { return Err(HwInitError::LedcInitFailed(ret)); }

    // Channel 0: buzzer, starts silent.
    let ret = unsafe { ledc_channel_config(&ledc_channel_config_t {
        speed_mode: ledc_mode_t_LEDC_LOW_SPEED_MODE,
        channel: LEDC_CH_BUZZER,
        timer_sel: LEDC_TIMER_BUZZER,
        gpio_num: pins::BUZZER_GPIO,
        duty: 0,
        hpoint: 0,
        ..Default::default()
    }) };
    if ret != ESP_OK as i32 { return Err(HwInitError::LedcInitFailed(ret)); }

    info!("hw_init: LEDC configured (buzzer=T0/CH0, {} Hz base)", pins::BUZZER_BASE_FREQ_HZ);
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn ledc_set(channel: u32, duty: u8) -> Result<(), i32> {
    // SAFETY: channel configured in init_ledc(); only the main loop writes duty.
    unsafe {
        let ret = ledc_set_duty(ledc_mode_t_LEDC_LOW_SPEED_MODE, channel, duty as u32);
        if ret != ESP_OK as i32 { return Err(ret); }
        let ret = ledc_update_duty(ledc_mode_t_LEDC_LOW_SPEED_MODE, channel);
        if ret != ESP_OK as i32 { return Err(ret); }
    }
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn ledc_set_freq(timer: u32, freq_hz: u32) -> Result<(), i32> {
    // SAFETY: timer configured in init_ledc(); only the buzzer uses it.
    let ret = unsafe { esp_idf_svc::sys::ledc_set_freq(ledc_mode_t_LEDC_LOW_SPEED_MODE, timer, freq_hz) };
    if ret == ESP_OK as i32 { Ok(()) } else { Err(ret) }
}

#[cfg(not(target_os = "espidf"))]
pub fn ledc_set(_channel: u32, _duty: u8) -> Result<(), i32> {
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn ledc_set_freq(_timer: u32, _freq_hz: u32) -> Result<(), i32> {
    Ok(())
}
