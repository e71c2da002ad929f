//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter      | Implements                  | Connects to              |
//! |--------------|-----------------------------|--------------------------|
//! | `hardware`   | SensorPort, ActuatorPort    | ADC, GPIO, LEDC          |
//! | `log_sink`   | EventSink                   | Serial log output        |
//! | `thingspeak` | TelemetryPort               | ThingSpeak HTTPS API     |
//! | `time`       | MonotonicClock, DelayNs     | ESP32 system timer / ROM |
//! | `wifi`       | ConnectivityPort            | ESP-IDF WiFi STA         |

pub mod hardware;
pub mod log_sink;
pub mod thingspeak;
pub mod time;
pub mod wifi;
