fn main() {
    println!("cargo:rerun-if-env-changed=PLANTCARE_CONFIG");

    // ESP-IDF link arguments are only needed for device builds.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
