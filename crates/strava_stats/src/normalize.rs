/// Rescale an elapsed time from the distance actually covered to `target_m`,
/// assuming an even pace throughout.
///
/// Returns `None` instead of failing when there is nothing to scale: no
/// elapsed time, a zero (or otherwise unusable) distance, or non-finite input.
pub fn normalize(elapsed_s: Option<f64>, actual_m: f64, target_m: f64) -> Option<f64> {
    let elapsed = elapsed_s?;
    if !elapsed.is_finite() || elapsed < 0.0 {
        return None;
    }
    if !actual_m.is_finite() || actual_m <= 0.0 || !target_m.is_finite() || target_m < 0.0 {
        return None;
    }
    Some(elapsed * target_m / actual_m)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_when_distances_match() {
        assert_eq!(normalize(Some(3600.0), 10_000.0, 10_000.0), Some(3600.0));
    }

    #[test]
    fn scales_linearly() {
        // 10.5 km in 45 minutes is 42:51.43 over 10 km.
        let t = normalize(Some(2700.0), 10_500.0, 10_000.0).unwrap();
        assert!((t - 2571.428_571).abs() < 1e-3);
    }

    #[test]
    fn zero_distance_is_absent() {
        for t in [0.0, 1.0, 3600.0] {
            assert_eq!(normalize(Some(t), 0.0, 5000.0), None);
        }
    }

    #[test]
    fn missing_elapsed_is_absent() {
        assert_eq!(normalize(None, 5000.0, 5000.0), None);
        assert_eq!(normalize(None, 0.0, 1000.0), None);
    }

    #[test]
    fn garbage_input_is_absent() {
        assert_eq!(normalize(Some(f64::NAN), 5000.0, 5000.0), None);
        assert_eq!(normalize(Some(100.0), f64::INFINITY, 5000.0), None);
        assert_eq!(normalize(Some(-1.0), 5000.0, 5000.0), None);
    }
}
