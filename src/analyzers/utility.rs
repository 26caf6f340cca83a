/// Computes the arithmetic mean of a slice of values. Returns 0.0 for empty input.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Computes the sample variance (N-1 denominator) given a pre-computed mean.
/// Returns `None` when fewer than two values are supplied.
pub fn sample_variance(values: &[f64], mean: f64) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let sum_sq = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>();

    Some(sum_sq / (values.len() - 1) as f64)
}

/// Linear-interpolation quantile over an ascending slice. `q` is clamped to [0, 1].
pub fn quantile(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let pos = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    let frac = pos - lower as f64;

    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * frac)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(mean(&[10.0, 12.0, 14.0]), 12.0);
    }

    #[test]
    fn test_sample_variance() {
        let values = [10.0, 12.0, 14.0];
        let var = sample_variance(&values, mean(&values)).unwrap();
        assert!((var - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_sample_variance_needs_two_values() {
        assert_eq!(sample_variance(&[], 0.0), None);
        assert_eq!(sample_variance(&[7.0], 7.0), None);
        assert_eq!(sample_variance(&[7.0, 7.0], 7.0), Some(0.0));
    }

    #[test]
    fn test_quantile_interpolates() {
        let sorted = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(quantile(&sorted, 0.0), Some(1.0));
        assert_eq!(quantile(&sorted, 0.5), Some(2.5));
        assert_eq!(quantile(&sorted, 1.0), Some(4.0));
        assert_eq!(quantile(&sorted, 0.25), Some(1.75));
        assert_eq!(quantile(&[], 0.5), None);
    }
}
