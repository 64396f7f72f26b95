/// Trailing rolling mean.
/// Returns a vector aligned with `values`:
/// - `None` until `window` values exist
/// - `Some(avg)` over the `window` values ending at (and including) each index
///
/// A window containing a NaN yields `None`, so gaps in an input series never
/// surface as a number.
pub fn rolling_mean(values: &[f64], window: usize) -> Vec<Option<f64>> {
    rolling(values, window, mean)
}

/// Trailing rolling sample standard deviation (n - 1 denominator).
/// Same alignment and gap rules as [`rolling_mean`].
pub fn rolling_std(values: &[f64], window: usize) -> Vec<Option<f64>> {
    rolling(values, window, |w| sample_std(w).unwrap_or(f64::NAN))
}

fn rolling<F>(values: &[f64], window: usize, stat: F) -> Vec<Option<f64>>
where
    F: Fn(&[f64]) -> f64,
{
    if window == 0 {
        return vec![None; values.len()];
    }

    (0..values.len())
        .map(|i| {
            if i + 1 < window {
                return None;
            }
            let slice = &values[i + 1 - window..=i];
            if slice.iter().any(|v| v.is_nan()) {
                None
            } else {
                Some(stat(slice))
            }
        })
        .collect()
}

/// Arithmetic mean. NaN for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Median of the values; `None` for an empty slice.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Sample standard deviation; `None` with fewer than two values.
pub fn sample_std(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }

    let m = mean(values);
    let variance = values
        .iter()
        .map(|&x| {
            let diff = x - m;
            diff * diff
        })
        .sum::<f64>()
        / (values.len() as f64 - 1.0);

    Some(variance.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rolling_mean_alignment() {
        let values = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let out = rolling_mean(&values, 3);

        assert_eq!(out.len(), values.len());
        assert!(out[0].is_none());
        assert!(out[1].is_none());
        assert_eq!(out[2], Some(2.0));
        assert_eq!(out[3], Some(3.0));
        assert_eq!(out[4], Some(4.0));
    }

    #[test]
    fn test_rolling_mean_zero_window() {
        let out = rolling_mean(&[1.0, 2.0], 0);
        assert_eq!(out, vec![None, None]);
    }

    #[test]
    fn test_rolling_std_uses_sample_denominator() {
        // Sample std of [2, 4, 4, 4, 5, 5, 7, 9] is sqrt(32 / 7)
        let values = vec![2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let out = rolling_std(&values, 8);

        let expected = (32.0_f64 / 7.0).sqrt();
        assert!((out[7].unwrap() - expected).abs() < 1e-12);
    }

    #[test]
    fn test_rolling_skips_windows_with_gaps() {
        let values = vec![f64::NAN, 1.0, 2.0, 3.0];
        let out = rolling_std(&values, 2);

        assert!(out[1].is_none());
        assert!(out[2].is_some());
        assert!(out[3].is_some());
    }

    #[test]
    fn test_flat_series_has_zero_std() {
        let out = rolling_std(&[100.0; 10], 5);
        assert_eq!(out[9], Some(0.0));
    }

    #[test]
    fn test_median_odd_and_even() {
        assert_eq!(median(&[30.0, 10.0, 20.0]), Some(20.0));
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), Some(2.5));
        assert_eq!(median(&[]), None);
    }

    #[test]
    fn test_sample_std_requires_two_values() {
        assert_eq!(sample_std(&[5.0]), None);
        assert_eq!(sample_std(&[10.0, 20.0, 30.0]), Some(10.0));
    }
}
