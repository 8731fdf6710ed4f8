//! Y-axis tick selection.

/// Pick round tick values covering `[lo, hi]`.
///
/// The step is 1, 2, 2.5 or 5 times a power of ten, chosen so that roughly
/// `target` ticks fit in the range. Ticks are exact multiples of the step,
/// so `0.0` is always a tick when it lies inside the range.
pub fn nice_ticks(lo: f64, hi: f64, target: usize) -> Vec<f64> {
    if !(lo.is_finite() && hi.is_finite()) || hi <= lo || target == 0 {
        return Vec::new();
    }

    let raw = (hi - lo) / target as f64;
    let magnitude = 10f64.powf(raw.log10().floor());
    let normalized = raw / magnitude;
    let factor = [1.0, 2.0, 2.5, 5.0, 10.0]
        .into_iter()
        .find(|f| *f >= normalized - 1e-12)
        .unwrap_or(10.0);
    let step = factor * magnitude;

    // Strip float noise such as 0.30000000000000004.
    let scale = 10f64.powi((2 - step.log10().floor() as i32).max(0));
    let first = (lo / step - 1e-9).ceil() as i64;
    let last = (hi / step + 1e-9).floor() as i64;
    (first..=last)
        .map(|k| {
            let tick = (k as f64 * step * scale).round() / scale;
            if tick == 0.0 {
                0.0
            } else {
                tick
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_range() {
        assert_eq!(
            nice_ticks(0.0, 10.0, 5),
            vec![0.0, 2.0, 4.0, 6.0, 8.0, 10.0]
        );
    }

    #[test]
    fn test_fractional_steps_are_clean() {
        let ticks = nice_ticks(0.0, 0.35, 8);
        assert_eq!(ticks, vec![0.0, 0.05, 0.1, 0.15, 0.2, 0.25, 0.3, 0.35]);
    }

    #[test]
    fn test_negative_range_contains_zero() {
        let ticks = nice_ticks(-2.15, 1.15, 8);
        assert!(ticks.contains(&0.0));
        assert!(ticks.iter().all(|t| *t >= -2.15 && *t <= 1.15));
        assert!(ticks.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_degenerate_input() {
        assert!(nice_ticks(1.0, 1.0, 8).is_empty());
        assert!(nice_ticks(0.0, f64::NAN, 8).is_empty());
        assert!(nice_ticks(0.0, 1.0, 0).is_empty());
    }
}
