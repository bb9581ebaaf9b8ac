//! Easing curves for animated value transitions.

/// Cubic ease-in-out.
///
/// Accelerates through the first half of the transition and decelerates
/// through the second. Input is clamped to `[0, 1]`; the output is
/// monotonic with `ease(0) == 0` and `ease(1) == 1`.
pub fn ease_in_out_cubic(progress: f64) -> f64 {
    let p = progress.clamp(0.0, 1.0);
    if p < 0.5 {
        4.0 * p * p * p
    } else {
        1.0 - (-2.0 * p + 2.0).powi(3) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints() {
        assert_eq!(ease_in_out_cubic(0.0), 0.0);
        assert_eq!(ease_in_out_cubic(1.0), 1.0);
    }

    #[test]
    fn test_midpoint_is_half() {
        assert!((ease_in_out_cubic(0.5) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_monotonic() {
        let mut previous = ease_in_out_cubic(0.0);
        for step in 1..=1000 {
            let current = ease_in_out_cubic(step as f64 / 1000.0);
            assert!(current >= previous, "not monotonic at step {}", step);
            assert!((0.0..=1.0).contains(&current));
            previous = current;
        }
    }

    #[test]
    fn test_out_of_range_is_clamped() {
        assert_eq!(ease_in_out_cubic(-0.5), 0.0);
        assert_eq!(ease_in_out_cubic(3.0), 1.0);
    }

    #[test]
    fn test_slow_start() {
        // 4 * 0.1^3
        assert!((ease_in_out_cubic(0.1) - 0.004).abs() < 1e-12);
        // 1 - 0.2^3 / 2
        assert!((ease_in_out_cubic(0.9) - 0.996).abs() < 1e-12);
    }
}
