#![no_main]

use libfuzzer_sys::fuzz_target;

use growthcalc_core::{run_to_completion, RunPhase};

fuzz_target!(|data: &[u8]| {
    if data.len() < 9 {
        return;
    }
    let base = f64::from_le_bytes([
        data[0], data[1], data[2], data[3], data[4], data[5], data[6], data[7],
    ]);
    // Signed and small, so both rejection and completion are reached quickly.
    let exponent = i32::from(i8::from_le_bytes([data[8]]));

    let snap = run_to_completion(base, exponent);
    assert!(!snap.is_running);
    if exponent < 1 {
        assert_eq!(snap.phase, RunPhase::Rejected);
        assert!(snap.linear_points.is_empty() && snap.exponential_points.is_empty());
    } else {
        let n = usize::try_from(exponent).unwrap_or(0);
        assert_eq!(snap.phase, RunPhase::Completed);
        assert_eq!(snap.linear_points.len(), n);
        assert_eq!(snap.exponential_points.len(), n);
        assert!(snap.linear_result_label.is_some());
        assert!(snap.exponential_result_label.is_some());
    }
});
