fn main() {
    println!("cargo:rerun-if-env-changed=WIFI_SSID");
    println!("cargo:rerun-if-env-changed=WIFI_PASS");
    println!("cargo:rerun-if-env-changed=THINGSPEAK_API_KEY");

    // Only the device build links against ESP-IDF.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
