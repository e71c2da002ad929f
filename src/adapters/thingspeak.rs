//! ThingSpeak telemetry adapter.
//!
//! Implements [`TelemetryPort`] with one HTTPS `GET` per record against the
//! channel `update` endpoint:
//!
//! ```text
//! <url>?api_key=KEY&field1=<motion>&field2=<distance>&field3=<color>&field4=<sound>
//! ```
//!
//! ## cfg gating
//!
//! - **`target_os = "espidf"`**: `EspHttpConnection` with the IDF
//!   certificate bundle.
//! - **all other targets**: logs the URL and answers with a status that
//!   tests can inject.

use core::fmt::Write;

use log::{debug, info};

use crate::app::events::TelemetryRecord;
use crate::app::ports::TelemetryPort;
use crate::error::CommsError;

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicU16, Ordering};

/// Write API key baked in at build time.
pub const BUILD_API_KEY: &str = match option_env!("THINGSPEAK_API_KEY") {
    Some(key) => key,
    None => "",
};

pub type UpdateUrl = heapless::String<256>;

#[cfg(not(target_os = "espidf"))]
static SIM_HTTP_STATUS: AtomicU16 = AtomicU16::new(200);

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_http_status(status: u16) {
    SIM_HTTP_STATUS.store(status, Ordering::Relaxed);
}

/// Render the update URL for one record.  The distance goes out with the
/// shortest decimal form that round-trips, not a fixed precision.
pub fn build_update_url(
    base_url: &str,
    api_key: &str,
    record: &TelemetryRecord,
) -> Result<UpdateUrl, CommsError> {
    let mut url = UpdateUrl::new();
    write!(
        url,
        "{}?api_key={}&field1={}&field2={}&field3={}&field4={}",
        base_url, api_key, record.motion, record.distance_cm, record.color, record.sound
    )
    .map_err(|_| CommsError::UrlTooLong)?;
    Ok(url)
}

pub struct ThingSpeakClient {
    base_url: heapless::String<96>,
    api_key: heapless::String<32>,
    sent: u32,
}

impl ThingSpeakClient {
    pub fn new(base_url: &str, api_key: &str) -> Result<Self, CommsError> {
        let mut client = Self {
            base_url: heapless::String::new(),
            api_key: heapless::String::new(),
            sent: 0,
        };
        client.base_url.push_str(base_url).map_err(|_| CommsError::UrlTooLong)?;
        client.api_key.push_str(api_key).map_err(|_| CommsError::UrlTooLong)?;
        Ok(client)
    }

    /// Records the collector accepted since boot.
    pub fn sent(&self) -> u32 {
        self.sent
    }

    #[cfg(target_os = "espidf")]
    fn platform_get(&mut self, url: &str) -> Result<u16, CommsError> {
        use esp_idf_svc::http::Method;
        use esp_idf_svc::http::client::{Configuration, EspHttpConnection};

        let mut conn = EspHttpConnection::new(&Configuration {
            crt_bundle_attach: Some(esp_idf_svc::sys::esp_crt_bundle_attach),
            ..Default::default()
        })
        .map_err(|_| CommsError::RequestFailed)?;
        conn.initiate_request(Method::Get, url, &[])
            .map_err(|_| CommsError::RequestFailed)?;
        conn.initiate_response().map_err(|_| CommsError::RequestFailed)?;
        Ok(conn.status())
    }

    #[cfg(not(target_os = "espidf"))]
    fn platform_get(&mut self, url: &str) -> Result<u16, CommsError> {
        debug!("ThingSpeak(sim): GET {}", url);
        Ok(SIM_HTTP_STATUS.load(Ordering::Relaxed))
    }
}

impl TelemetryPort for ThingSpeakClient {
    fn publish(&mut self, record: &TelemetryRecord) -> Result<(), CommsError> {
        let url = build_update_url(&self.base_url, &self.api_key, record)?;
        match self.platform_get(&url)? {
            200 => {
                self.sent = self.sent.wrapping_add(1);
                info!("Data sent to ThingSpeak");
                Ok(())
            }
            status => Err(CommsError::HttpStatus(status)),
        }
    }
}
