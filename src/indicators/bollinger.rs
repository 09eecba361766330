// =============================================================================
// Bollinger Bands
// =============================================================================
//
// Bollinger Bands consist of a middle band (SMA), an upper band (SMA + k*σ),
// and a lower band (SMA - k*σ).  σ is the population standard deviation of
// the window (squared deviations divided by `period`, not `period - 1`).
// =============================================================================

use crate::indicators::sma::calculate_sma;
use crate::types::BandPoint;

pub const DEFAULT_PERIOD: usize = 20;
pub const DEFAULT_MULTIPLIER: f64 = 2.0;

/// Compute the Bollinger series for `prices`.
///
/// Output element `i` covers the window ending at input index `i + period - 1`,
/// so the series has the SMA's length.  Empty when `prices` is shorter than
/// `period`.
pub fn calculate_bollinger(prices: &[f64], period: usize, num_std: f64) -> Vec<BandPoint> {
    let sma = calculate_sma(prices, period);
    if sma.is_empty() {
        return Vec::new();
    }

    let period_f = period as f64;
    prices
        .windows(period)
        .zip(sma)
        .map(|(window, middle)| {
            let variance = window.iter().map(|x| (x - middle).powi(2)).sum::<f64>() / period_f;
            let std_dev = variance.sqrt();
            BandPoint {
                upper: middle + num_std * std_dev,
                middle,
                lower: middle - num_std * std_dev,
            }
        })
        .collect()
}

/// Position of `price` inside the band, 0.0 at the lower and 1.0 at the upper
/// band.  `None` when the band has collapsed to a single value.
pub fn band_position(price: f64, band: &BandPoint) -> Option<f64> {
    let width = band.upper - band.lower;
    if width == 0.0 {
        return None;
    }
    Some((price - band.lower) / width)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bollinger_insufficient_data() {
        assert!(calculate_bollinger(&[1.0, 2.0, 3.0], 20, 2.0).is_empty());
    }

    #[test]
    fn bollinger_known_window() {
        // Values 2,4,4,4,5,5,7,9: mean 5, population σ 2.
        let prices = vec![2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let bands = calculate_bollinger(&prices, 8, 2.0);
        assert_eq!(bands.len(), 1);
        assert!((bands[0].middle - 5.0).abs() < 1e-12);
        assert!((bands[0].upper - 9.0).abs() < 1e-12);
        assert!((bands[0].lower - 1.0).abs() < 1e-12);
    }

    #[test]
    fn bollinger_symmetric_and_middle_is_sma() {
        let prices: Vec<f64> = (0..60)
            .map(|i| 50.0 + (i as f64 * 0.45).cos() * 3.0 + i as f64 * 0.2)
            .collect();
        let bands = calculate_bollinger(&prices, 20, 2.0);
        let sma = calculate_sma(&prices, 20);
        assert_eq!(bands.len(), sma.len());
        for (b, m) in bands.iter().zip(&sma) {
            assert_eq!(b.middle, *m);
            assert!(((b.upper - b.middle) - (b.middle - b.lower)).abs() < 1e-9);
            assert!(b.upper >= b.middle && b.lower <= b.middle);
        }
    }

    #[test]
    fn bollinger_flat_collapses() {
        let bands = calculate_bollinger(&[100.0; 20], 20, 2.0);
        assert_eq!(bands.len(), 1);
        assert_eq!(bands[0].upper, bands[0].lower);
        assert!(band_position(100.0, &bands[0]).is_none());
    }

    #[test]
    fn band_position_scales_between_bands() {
        let band = BandPoint {
            upper: 110.0,
            middle: 100.0,
            lower: 90.0,
        };
        assert_eq!(band_position(90.0, &band), Some(0.0));
        assert_eq!(band_position(100.0, &band), Some(0.5));
        assert_eq!(band_position(110.0, &band), Some(1.0));
    }
}
