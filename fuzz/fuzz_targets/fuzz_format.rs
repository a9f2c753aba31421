#![no_main]

use libfuzzer_sys::fuzz_target;

use growthcalc_core::constants::labels::FINAL_RESULT_PREFIX;
use growthcalc_core::format::{
    exponential_result_label, format_general, linear_result_label, needs_scientific,
};

fuzz_target!(|data: &[u8]| {
    if data.len() < 8 {
        return;
    }
    let value = f64::from_le_bytes([
        data[0], data[1], data[2], data[3], data[4], data[5], data[6], data[7],
    ]);

    let linear = linear_result_label(value);
    let exponential = exponential_result_label(value);
    assert!(linear.starts_with(FINAL_RESULT_PREFIX));
    assert!(exponential.starts_with(FINAL_RESULT_PREFIX));

    if value.is_finite() && needs_scientific(value) {
        let text = &exponential[FINAL_RESULT_PREFIX.len()..];
        assert!(text.contains("e+") || text.contains("e-"), "{value}: {text}");
    }

    // Should not panic for any precision.
    let digits = usize::from(data.get(8).copied().unwrap_or(6) % 20);
    let _ = format_general(value, digits);
});
