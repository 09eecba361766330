// =============================================================================
// Stochastic Oscillator (%K)
// =============================================================================
//
// %K = (close - lowest low) / (highest high - lowest low) * 100
//
// over a window of `period` bars.  A window whose high-low range is zero emits
// the neutral midpoint 50.
// =============================================================================

pub const DEFAULT_PERIOD: usize = 14;

/// Compute the %K series.
///
/// Element `i` covers the window ending at index `i + period - 1`.  The three
/// slices are expected to share one alignment; the shortest one bounds the
/// output.  Empty when there are fewer than `period` bars.
pub fn calculate_stochastic(
    highs: &[f64],
    lows: &[f64],
    closes: &[f64],
    period: usize,
) -> Vec<f64> {
    let len = highs.len().min(lows.len()).min(closes.len());
    if period == 0 || len < period {
        return Vec::new();
    }

    (period - 1..len)
        .map(|i| {
            let start = i + 1 - period;
            let highest_high = highs[start..=i]
                .iter()
                .copied()
                .fold(f64::NEG_INFINITY, f64::max);
            let lowest_low = lows[start..=i]
                .iter()
                .copied()
                .fold(f64::INFINITY, f64::min);

            if highest_high == lowest_low {
                50.0
            } else {
                (closes[i] - lowest_low) / (highest_high - lowest_low) * 100.0
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stochastic_insufficient_data() {
        assert!(calculate_stochastic(&[1.0; 5], &[1.0; 5], &[1.0; 5], 14).is_empty());
    }

    #[test]
    fn stochastic_flat_range_is_fifty() {
        let flat = vec![42.0; 20];
        let k = calculate_stochastic(&flat, &flat, &flat, 14);
        assert_eq!(k.len(), 7);
        assert!(k.iter().all(|&v| v == 50.0));
    }

    #[test]
    fn stochastic_close_at_window_high_is_hundred() {
        let closes: Vec<f64> = (0..30).map(|i| 100.0 + i as f64).collect();
        let lows: Vec<f64> = closes.iter().map(|c| c - 1.0).collect();
        let k = calculate_stochastic(&closes, &lows, &closes, 14);
        assert_eq!(k.len(), 30 - 14 + 1);
        assert!(k.iter().all(|&v| v == 100.0));
    }

    #[test]
    fn stochastic_close_at_window_low_is_zero() {
        let closes: Vec<f64> = (0..30).map(|i| 200.0 - i as f64).collect();
        let highs: Vec<f64> = closes.iter().map(|c| c + 1.0).collect();
        let k = calculate_stochastic(&highs, &closes, &closes, 14);
        assert!(k.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn stochastic_bounded() {
        let closes: Vec<f64> = (0..50).map(|i| 100.0 + (i as f64 * 0.8).sin() * 4.0).collect();
        let highs: Vec<f64> = closes.iter().map(|c| c + 0.5).collect();
        let lows: Vec<f64> = closes.iter().map(|c| c - 0.5).collect();
        for v in calculate_stochastic(&highs, &lows, &closes, 14) {
            assert!((0.0..=100.0).contains(&v), "%K {v} out of range");
        }
    }
}
