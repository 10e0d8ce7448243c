// Shared helpers for integration tests

#![allow(dead_code)]

use corrosion_severity::mask::Mask;
use tracing_subscriber::EnvFilter;

/// Route library logs to the test harness; RUST_LOG selects the level
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// 10×10 grayscale mask with the first `corroded` pixels set to 255
///
/// The corroded-area percentage is exactly `corroded`.
pub fn grayscale_mask(corroded: usize) -> Mask<u8> {
    let pixels = (0..100)
        .map(|i| if i < corroded { 255 } else { 0 })
        .collect();
    Mask::from_flat(10, 10, pixels).expect("10x10 mask")
}

/// Named masks covering the given corroded percentages
pub fn entries(percentages: &[usize]) -> Vec<(String, Mask<u8>)> {
    percentages
        .iter()
        .enumerate()
        .map(|(i, &p)| (format!("img_{:03}.png", i), grayscale_mask(p)))
        .collect()
}
