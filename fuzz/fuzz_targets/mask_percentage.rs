#![no_main]

use corrosion_severity::mask::{compute_percentage, Cutoff, Mask};
use corrosion_severity::severity::classify;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // First byte picks the row width, the rest are pixels
    let Some((&width, pixels)) = data.split_first() else {
        return;
    };
    let width = usize::from(width).max(1);
    let rows: Vec<Vec<u8>> = pixels.chunks(width).map(<[u8]>::to_vec).collect();

    // A short trailing chunk makes the mask ragged, which must be an error
    if let Ok(percentage) = compute_percentage(&Mask::from_rows(rows), &Cutoff::grayscale()) {
        assert!((0.0..=100.0).contains(&percentage));
        assert!(classify(percentage, &[10.0, 30.0]).is_ok());
    }
});
