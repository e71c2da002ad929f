//! WiFi station-mode adapter.
//!
//! Implements [`ConnectivityPort`], the boundary for network association.
//! The device joins the network once at boot; a failed join is logged and
//! the control loop runs anyway, with each telemetry attempt failing on its
//! own.
//!
//! ## cfg gating
//!
//! - **`target_os = "espidf"`**: `BlockingWifi<EspWifi>` from `esp_idf_svc::wifi`.
//! - **all other targets**: simulation stubs for host-side tests.

use core::fmt;
use log::{error, info};

use crate::error::CommsError;

#[cfg(target_os = "espidf")]
use esp_idf_svc::wifi::{AuthMethod, BlockingWifi, ClientConfiguration, Configuration, EspWifi};

// ───────────────────────────────────────────────────────────────
// Port trait
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectivityError {
    NoCredentials,
    InvalidSsid,
    InvalidPassword,
    ConnectionFailed,
    AlreadyConnected,
}

impl fmt::Display for ConnectivityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoCredentials => write!(f, "no WiFi credentials configured"),
            Self::InvalidSsid => write!(f, "SSID invalid (must be 1-32 printable ASCII bytes)"),
            Self::InvalidPassword => write!(f, "password invalid (must be 8-64 bytes for WPA2, or empty for open)"),
            Self::ConnectionFailed => write!(f, "WiFi connection failed"),
            Self::AlreadyConnected => write!(f, "already connected to AP"),
        }
    }
}

/// Any failure to join collapses into the telemetry-side error.
impl From<ConnectivityError> for CommsError {
    fn from(_: ConnectivityError) -> Self {
        CommsError::WifiConnectFailed
    }
}

pub trait ConnectivityPort {
    fn connect(&mut self) -> Result<(), ConnectivityError>;
    fn disconnect(&mut self);
    fn is_connected(&self) -> bool;
    fn set_credentials(&mut self, ssid: &str, password: &str) -> Result<(), ConnectivityError>;
}

/// Credentials baked in at build time (`WIFI_SSID`, `WIFI_PASS`).
pub const BUILD_SSID: &str = match option_env!("WIFI_SSID") {
    Some(s) => s,
    None => "",
};
pub const BUILD_PASSWORD: &str = match option_env!("WIFI_PASS") {
    Some(s) => s,
    None => "",
};

// ───────────────────────────────────────────────────────────────
// Validation
// ───────────────────────────────────────────────────────────────

fn is_printable_ascii(s: &str) -> bool {
    s.bytes().all(|b| (0x20..=0x7E).contains(&b))
}

fn validate_ssid(ssid: &str) -> Result<(), ConnectivityError> {
    if ssid.is_empty() || ssid.len() > 32 || !is_printable_ascii(ssid) {
        return Err(ConnectivityError::InvalidSsid);
    }
    Ok(())
}

fn validate_password(password: &str) -> Result<(), ConnectivityError> {
    if password.is_empty() {
        return Ok(());
    }
    if password.len() < 8 || password.len() > 64 {
        return Err(ConnectivityError::InvalidPassword);
    }
    Ok(())
}

// ───────────────────────────────────────────────────────────────
// WiFi adapter
// ───────────────────────────────────────────────────────────────

pub struct WifiAdapter {
    connected: bool,
    ssid: heapless::String<32>,
    password: heapless::String<64>,
    #[cfg(target_os = "espidf")]
    driver: BlockingWifi<EspWifi<'static>>,
}

impl WifiAdapter {
    #[cfg(target_os = "espidf")]
    pub fn new(driver: BlockingWifi<EspWifi<'static>>) -> Self {
        Self {
            connected: false,
            ssid: heapless::String::new(),
            password: heapless::String::new(),
            driver,
        }
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn new() -> Self {
        Self {
            connected: false,
            ssid: heapless::String::new(),
            password: heapless::String::new(),
        }
    }

    // ── Platform-specific ─────────────────────────────────────

    #[cfg(target_os = "espidf")]
    fn platform_connect(&mut self) -> Result<(), ConnectivityError> {
        let auth_method = if self.password.is_empty() {
            AuthMethod::None
        } else {
            AuthMethod::WPA2Personal
        };
        let config = Configuration::Client(ClientConfiguration {
            ssid: self.ssid.as_str().try_into().map_err(|_| ConnectivityError::InvalidSsid)?,
            password: self
                .password
                .as_str()
                .try_into()
                .map_err(|_| ConnectivityError::InvalidPassword)?,
            auth_method,
            ..Default::default()
        });
        let fail = |e: esp_idf_svc::sys::EspError| {
            error!("WiFi(espidf): {}", e);
            ConnectivityError::ConnectionFailed
        };
        self.driver.set_configuration(&config).map_err(fail)?;
        self.driver.start().map_err(fail)?;
        self.driver.connect().map_err(fail)?;
        self.driver.wait_netif_up().map_err(fail)?;
        Ok(())
    }

    #[cfg(not(target_os = "espidf"))]
    fn platform_connect(&mut self) -> Result<(), ConnectivityError> {
        info!("WiFi(sim): associated with '{}'", self.ssid);
        Ok(())
    }

    #[cfg(target_os = "espidf")]
    fn platform_disconnect(&mut self) {
        if let Err(e) = self.driver.disconnect() {
            log::warn!("WiFi(espidf): disconnect failed: {}", e);
        }
        if let Err(e) = self.driver.stop() {
            log::warn!("WiFi(espidf): stop failed: {}", e);
        }
    }

    #[cfg(not(target_os = "espidf"))]
    fn platform_disconnect(&mut self) {}

    #[cfg(target_os = "espidf")]
    fn platform_is_connected(&self) -> bool {
        self.connected && self.driver.is_connected().unwrap_or(false)
    }

    #[cfg(not(target_os = "espidf"))]
    fn platform_is_connected(&self) -> bool {
        self.connected
    }
}

#[cfg(not(target_os = "espidf"))]
impl Default for WifiAdapter {
    fn default() -> Self {
        Self::new()
    }
}

// ───────────────────────────────────────────────────────────────
// ConnectivityPort
// ───────────────────────────────────────────────────────────────

impl ConnectivityPort for WifiAdapter {
    fn connect(&mut self) -> Result<(), ConnectivityError> {
        if self.ssid.is_empty() {
            return Err(ConnectivityError::NoCredentials);
        }
        if self.connected {
            return Err(ConnectivityError::AlreadyConnected);
        }

        info!("WiFi: connecting to '{}'", self.ssid);
        match self.platform_connect() {
            Ok(()) => {
                self.connected = true;
                info!("WiFi: connected");
                Ok(())
            }
            Err(e) => {
                error!("WiFi: connection failed: {}", e);
                Err(e)
            }
        }
    }

    fn disconnect(&mut self) {
        self.platform_disconnect();
        self.connected = false;
        info!("WiFi: disconnected");
    }

    fn is_connected(&self) -> bool {
        self.platform_is_connected()
    }

    fn set_credentials(&mut self, ssid: &str, password: &str) -> Result<(), ConnectivityError> {
        validate_ssid(ssid)?;
        validate_password(password)?;
        self.ssid.clear();
        self.ssid.push_str(ssid).map_err(|_| ConnectivityError::InvalidSsid)?;
        self.password.clear();
        self.password.push_str(password).map_err(|_| ConnectivityError::InvalidPassword)?;
        Ok(())
    }
}

// ───────────────────────────────────────────────────────────────
// Tests
// ───────────────────────────────────────────────────────────────
