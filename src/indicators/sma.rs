// =============================================================================
// Simple Moving Average (SMA)
// =============================================================================
//
// Arithmetic mean over a sliding window of `period` samples.  Output element
// `i` corresponds to input index `i + period - 1`.
// =============================================================================

/// Compute the SMA series for `data` with look-back `period`.
///
/// Returns an empty `Vec` when the period is zero or the input is shorter than
/// `period`.  Output length is `data.len() - period + 1`.
pub fn calculate_sma(data: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || data.len() < period {
        return Vec::new();
    }

    let period_f = period as f64;
    data.windows(period)
        .map(|window| window.iter().sum::<f64>() / period_f)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sma_empty_input() {
        assert!(calculate_sma(&[], 3).is_empty());
    }

    #[test]
    fn sma_period_zero() {
        assert!(calculate_sma(&[1.0, 2.0], 0).is_empty());
    }

    #[test]
    fn sma_insufficient_data() {
        assert!(calculate_sma(&[1.0, 2.0], 3).is_empty());
    }

    #[test]
    fn sma_length_and_naive_window_mean() {
        let data = vec![
            44.34, 44.09, 44.15, 43.61, 44.33, 44.83, 45.10, 45.42, 45.84, 46.08,
        ];
        for period in 1..=data.len() {
            let sma = calculate_sma(&data, period);
            assert_eq!(sma.len(), data.len() - period + 1);
            for (i, &v) in sma.iter().enumerate() {
                let mut sum = 0.0;
                for x in &data[i..i + period] {
                    sum += x;
                }
                assert_eq!(v, sum / period as f64, "period {period}, index {i}");
            }
        }
    }

    #[test]
    fn sma_period_one_is_identity() {
        let data = vec![3.0, 1.0, 4.0];
        assert_eq!(calculate_sma(&data, 1), data);
    }
}
