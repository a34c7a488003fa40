//! Fuzz target: `dht11::decode_frame`
//!
//! Any 5-byte frame either fails cleanly or yields a sample inside the
//! part's measurement range.
//!
//! cargo fuzz run fuzz_dht11_frame

#![no_main]

use libfuzzer_sys::fuzz_target;
use plantcare::drivers::dht11::decode_frame;

fuzz_target!(|frame: [u8; 5]| {
    if let Ok(sample) = decode_frame(frame) {
        assert!((0.0..=100.0).contains(&sample.humidity_pct));
        assert!((-20.0..=60.0).contains(&sample.temperature_c));
        let sum = frame[..4].iter().fold(0u8, |acc, b| acc.wrapping_add(*b));
        assert_eq!(sum, frame[4], "accepted frame with bad checksum");
    }
});
