// =============================================================================
// Exponential Moving Average (EMA)
// =============================================================================
//
// EMA gives more weight to recent prices, making it more responsive to new
// information than the Simple Moving Average (SMA).
//
// Formula:
//   multiplier = 2 / (period + 1)
//   EMA_t      = (close_t - EMA_{t-1}) * multiplier + EMA_{t-1}
//
// The very first EMA value is seeded with the SMA of the first `period` values
// and is emitted at input index `period - 1`, so an EMA series has the same
// length as the SMA series for the same period.
// =============================================================================

/// Smoothing multiplier for a given look-back.
pub fn multiplier(period: usize) -> f64 {
    2.0 / (period as f64 + 1.0)
}

/// Compute the EMA series for `data` and look-back `period`.
///
/// Returns an empty `Vec` when the input is too short or the period is zero.
/// Each output element corresponds to an input starting at index `period - 1`.
pub fn calculate_ema(data: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || data.len() < period {
        return Vec::new();
    }

    let k = multiplier(period);

    // Seed: SMA of the first `period` values.
    let seed = data[..period].iter().sum::<f64>() / period as f64;

    let mut result = Vec::with_capacity(data.len() - period + 1);
    result.push(seed);

    let mut prev = seed;
    for &value in &data[period..] {
        let ema = (value - prev) * k + prev;
        result.push(ema);
        prev = ema;
    }

    result
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ema_empty_input() {
        assert!(calculate_ema(&[], 5).is_empty());
    }

    #[test]
    fn ema_period_zero() {
        assert!(calculate_ema(&[1.0, 2.0, 3.0], 0).is_empty());
    }

    #[test]
    fn ema_insufficient_data() {
        assert!(calculate_ema(&[1.0, 2.0], 5).is_empty());
    }

    #[test]
    fn ema_period_equals_length() {
        let data = vec![2.0, 4.0, 6.0];
        let ema = calculate_ema(&data, 3);
        assert_eq!(ema.len(), 1);
        // Should be the SMA = (2+4+6)/3 = 4.0
        assert!((ema[0] - 4.0).abs() < 1e-10);
    }

    #[test]
    fn ema_seed_is_mean_and_recurrence_is_exact() {
        let data: Vec<f64> = vec![
            22.27, 22.19, 22.08, 22.17, 22.18, 22.13, 22.23, 22.43, 22.24, 22.29,
            22.15, 22.39, 22.38, 22.61, 23.36, 24.05, 23.75, 23.83, 23.95, 23.63,
        ];
        let period = 10;
        let ema = calculate_ema(&data, period);
        assert_eq!(ema.len(), data.len() - period + 1);

        let seed = data[..period].iter().sum::<f64>() / period as f64;
        assert_eq!(ema[0], seed);

        let k = 2.0 / (period as f64 + 1.0);
        for j in 1..ema.len() {
            let x = data[period - 1 + j];
            assert_eq!(ema[j], (x - ema[j - 1]) * k + ema[j - 1]);
        }
    }

    #[test]
    fn ema_constant_series_stays_constant() {
        let ema = calculate_ema(&[5.0; 12], 4);
        assert_eq!(ema.len(), 9);
        assert!(ema.iter().all(|&v| (v - 5.0).abs() < 1e-12));
    }

    #[test]
    fn ema_lags_a_rising_series() {
        let data: Vec<f64> = (1..=30).map(|x| x as f64).collect();
        let ema = calculate_ema(&data, 5);
        let last = *ema.last().unwrap();
        assert!(last < 30.0 && last > 25.0, "got {last}");
    }
}
