// =============================================================================
// Engine errors
// =============================================================================
//
// Validation failures abort a whole computation.  Arithmetic edge cases inside
// a single indicator (flat Stochastic range, zero RSI loss) are not errors and
// never show up here.

use thiserror::Error;

/// Typed failure of an indicator computation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// Fewer aligned points than the active history policy requires.
    #[error(
        "insufficient data in {stage}: found {available} valid points, need at least {required}"
    )]
    InsufficientData {
        stage: &'static str,
        available: usize,
        required: usize,
    },

    /// A required indicator's lookback exceeds the available samples.
    #[error(
        "invalid period for {indicator}: period {period} with only {available} points available"
    )]
    InvalidPeriod {
        indicator: &'static str,
        period: usize,
        available: usize,
    },

    /// A configured lookback or multiplier cannot produce a series at all.
    #[error("invalid parameter {name}: {reason}")]
    InvalidParameter {
        name: &'static str,
        reason: &'static str,
    },

    /// Parallel input arrays disagree in length.
    #[error("length mismatch in {stage}: expected {expected} entries, found {found}")]
    LengthMismatch {
        stage: &'static str,
        expected: usize,
        found: usize,
    },

    /// The chart payload carried no result for the requested symbol.
    #[error("no chart data found for symbol {symbol}")]
    MissingChartResult { symbol: String },
}

impl EngineError {
    /// Stable machine-readable identifier for the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InsufficientData { .. } => "insufficient-data",
            Self::InvalidPeriod { .. } => "invalid-period",
            Self::InvalidParameter { .. } => "invalid-parameter",
            Self::LengthMismatch { .. } => "length-mismatch",
            Self::MissingChartResult { .. } => "missing-chart-result",
        }
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
