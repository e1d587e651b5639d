//! Random sample values for the demo page.
//!
//! Ranges come from `MockConfig`; every generator takes the RNG so tests
//! can seed one.

use rand::Rng;

use crate::types::MockConfig;

/// "192.168.4.17"
pub fn random_ip<R: Rng>(rng: &mut R, config: &MockConfig) -> String {
    let range = config.ip_range();
    let octets: Vec<String> = (0..4)
        .map(|_| rng.gen_range(range.clone()).to_string())
        .collect();
    octets.join(".")
}

/// "0a:1b:2c:3d:4e:5f"
pub fn random_mac<R: Rng>(rng: &mut R, config: &MockConfig) -> String {
    let range = config.mac_range();
    let bytes: Vec<String> = (0..6)
        .map(|_| format!("{:02x}", rng.gen_range(range.clone())))
        .collect();
    bytes.join(":")
}

pub fn random_port<R: Rng>(rng: &mut R, config: &MockConfig) -> u16 {
    rng.gen_range(config.port_range())
}

/// Integer in `[min, max]`, bounds in either order.
pub fn random_number<R: Rng>(rng: &mut R, min: i64, max: i64) -> i64 {
    let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
    rng.gen_range(lo..=hi)
}

/// Float in `[min, max)`; `min` itself when the range is empty.
pub fn random_float<R: Rng>(rng: &mut R, min: f64, max: f64) -> f64 {
    let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
    if lo == hi {
        return lo;
    }
    rng.gen_range(lo..hi)
}
