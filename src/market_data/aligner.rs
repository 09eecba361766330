// =============================================================================
// Series Aligner — drops incomplete observations from raw provider arrays
// =============================================================================
//
// Providers leave holes (nulls) in any of the close / high / low arrays on
// days with partial data.  The aligner keeps an index only when all three
// prices are present and finite and a timestamp exists for it.  Nothing is
// interpolated.
// =============================================================================

use crate::error::{EngineError, Result};
use crate::types::{PricePoint, RawHistory};

const STAGE: &str = "aligner";

/// Align raw parallel arrays into complete [`PricePoint`]s, oldest-first.
///
/// Fails with [`EngineError::LengthMismatch`] when `high` or `low` is not as
/// long as `close`, and with [`EngineError::InsufficientData`] when fewer than
/// `minimum` points survive.
pub fn align_series(
    close: &[Option<f64>],
    high: &[Option<f64>],
    low: &[Option<f64>],
    timestamps: &[i64],
    minimum: usize,
) -> Result<Vec<PricePoint>> {
    for column in [high, low] {
        if column.len() != close.len() {
            return Err(EngineError::LengthMismatch {
                stage: STAGE,
                expected: close.len(),
                found: column.len(),
            });
        }
    }

    let points: Vec<PricePoint> = close
        .iter()
        .enumerate()
        .filter_map(|(i, &c)| {
            Some(PricePoint {
                close: finite(c)?,
                high: finite(*high.get(i)?)?,
                low: finite(*low.get(i)?)?,
                timestamp: *timestamps.get(i)?,
            })
        })
        .collect();

    if points.len() < minimum {
        return Err(EngineError::InsufficientData {
            stage: STAGE,
            available: points.len(),
            required: minimum,
        });
    }

    Ok(points)
}

/// Convenience wrapper over [`align_series`] for a whole [`RawHistory`].
pub fn align_history(history: &RawHistory, minimum: usize) -> Result<Vec<PricePoint>> {
    align_series(
        &history.close,
        &history.high,
        &history.low,
        &history.timestamps,
        minimum,
    )
}

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

/// Column views over aligned points.
pub struct PriceColumns {
    pub closes: Vec<f64>,
    pub highs: Vec<f64>,
    pub lows: Vec<f64>,
    pub timestamps: Vec<i64>,
}

impl From<&[PricePoint]> for PriceColumns {
    fn from(points: &[PricePoint]) -> Self {
        Self {
            closes: points.iter().map(|p| p.close).collect(),
            highs: points.iter().map(|p| p.high).collect(),
            lows: points.iter().map(|p| p.low).collect(),
            timestamps: points.iter().map(|p| p.timestamp).collect(),
        }
    }
}
