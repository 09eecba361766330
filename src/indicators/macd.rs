// =============================================================================
// Moving Average Convergence Divergence (MACD)
// =============================================================================
//
// macd_line   = EMA(fast) - EMA(slow), aligned on the slow EMA's indices
// signal_line = EMA(macd_line, signal)
// histogram   = macd_line - signal_line
//
// The fast EMA leads the slow one by `slow - fast` elements, and the signal
// line trails the MACD line by `signal - 1`.  The reported MACD line is cut to
// the signal line's length so that all three series share one alignment.
// =============================================================================

use crate::indicators::ema::calculate_ema;
use crate::types::MacdResult;

pub const DEFAULT_FAST: usize = 12;
pub const DEFAULT_SLOW: usize = 26;
pub const DEFAULT_SIGNAL: usize = 9;

/// Compute the MACD, signal and histogram series.
///
/// Too little data for the slow EMA or the signal line yields empty series,
/// never a panic.  A `fast` period that is not shorter than `slow` also yields
/// empty series.
pub fn calculate_macd(prices: &[f64], fast: usize, slow: usize, signal: usize) -> MacdResult {
    if fast == 0 || signal == 0 || fast >= slow {
        return MacdResult::default();
    }

    let fast_ema = calculate_ema(prices, fast);
    let slow_ema = calculate_ema(prices, slow);
    if slow_ema.is_empty() {
        return MacdResult::default();
    }

    let offset = slow - fast;
    let macd_line: Vec<f64> = slow_ema
        .iter()
        .enumerate()
        .filter_map(|(i, &slow_v)| fast_ema.get(i + offset).map(|&fast_v| fast_v - slow_v))
        .collect();

    let signal_line = calculate_ema(&macd_line, signal);
    if signal_line.is_empty() {
        return MacdResult::default();
    }

    let signal_offset = signal - 1;
    let macd_line = macd_line[signal_offset..].to_vec();
    let histogram = macd_line
        .iter()
        .zip(&signal_line)
        .map(|(m, s)| m - s)
        .collect();

    MacdResult {
        macd_line,
        signal_line,
        histogram,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn calculate_macd_default(prices: &[f64]) -> MacdResult {
        calculate_macd(prices, DEFAULT_FAST, DEFAULT_SLOW, DEFAULT_SIGNAL)
    }

    fn wave(n: usize) -> Vec<f64> {
        (0..n)
            .map(|i| 100.0 + (i as f64 * 0.3).sin() * 5.0 + i as f64 * 0.1)
            .collect()
    }

    #[test]
    fn macd_insufficient_data_is_empty() {
        let out = calculate_macd_default(&wave(20));
        assert!(out.macd_line.is_empty());
        assert!(out.signal_line.is_empty());
        assert!(out.histogram.is_empty());
    }

    #[test]
    fn macd_not_enough_for_signal_is_empty() {
        // 30 prices => slow EMA has 5 values, fewer than the 9 the signal needs.
        let out = calculate_macd_default(&wave(30));
        assert!(out.histogram.is_empty());
    }

    #[test]
    fn macd_lengths_align() {
        let prices = wave(100);
        let out = calculate_macd_default(&prices);
        // slow EMA: 100 - 26 + 1 = 75; signal: 75 - 9 + 1 = 67
        assert_eq!(out.signal_line.len(), 67);
        assert_eq!(out.histogram.len(), out.signal_line.len());
        assert_eq!(out.macd_line.len(), out.signal_line.len());
    }

    #[test]
    fn macd_histogram_is_exact_difference() {
        let out = calculate_macd_default(&wave(120));
        for i in 0..out.histogram.len() {
            assert_eq!(out.histogram[i], out.macd_line[i] - out.signal_line[i]);
        }
    }

    #[test]
    fn macd_line_matches_ema_difference() {
        let prices = wave(80);
        let out = calculate_macd_default(&prices);
        let fast = calculate_ema(&prices, 12);
        let slow = calculate_ema(&prices, 26);
        // The last reported MACD value pairs the last fast and slow EMAs.
        let expected = fast.last().unwrap() - slow.last().unwrap();
        assert_eq!(*out.macd_line.last().unwrap(), expected);
    }

    #[test]
    fn macd_rising_series_is_positive() {
        let prices: Vec<f64> = (0..60).map(|i| 100.0 + i as f64).collect();
        let out = calculate_macd_default(&prices);
        assert!(out.macd_line.iter().all(|&v| v > 0.0));
    }

    #[test]
    fn macd_rejects_inverted_periods() {
        let out = calculate_macd(&wave(100), 26, 12, 9);
        assert!(out.macd_line.is_empty());
    }
}
