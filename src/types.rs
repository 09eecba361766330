// =============================================================================
// Shared types used across the indicator engine
// =============================================================================

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One aligned daily observation.  Produced by the aligner, never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub close: f64,
    pub high: f64,
    pub low: f64,
    pub timestamp: i64,
}

/// Raw provider history, oldest-first.  Any price entry may be absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawHistory {
    pub symbol: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub timestamps: Vec<i64>,
    #[serde(default)]
    pub close: Vec<Option<f64>>,
    #[serde(default)]
    pub high: Vec<Option<f64>>,
    #[serde(default)]
    pub low: Vec<Option<f64>>,
}

/// A single Bollinger observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandPoint {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
}

/// MACD output.  All three series share one timestamp alignment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MacdResult {
    pub macd_line: Vec<f64>,
    pub signal_line: Vec<f64>,
    pub histogram: Vec<f64>,
}

/// Categorical trading signal.  Always recomputed, never stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Signal {
    Buy,
    Sell,
    #[default]
    Neutral,
}

impl std::fmt::Display for Signal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Buy => write!(f, "buy"),
            Self::Sell => write!(f, "sell"),
            Self::Neutral => write!(f, "neutral"),
        }
    }
}

/// The closed set of reported indicators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IndicatorKind {
    LongMovingAverage,
    ExponentialMovingAverage,
    Rsi,
    Macd,
    Bollinger,
    Stochastic,
}

impl IndicatorKind {
    #[cfg(test)]
    pub const ALL: [IndicatorKind; 6] = [
        Self::LongMovingAverage,
        Self::ExponentialMovingAverage,
        Self::Rsi,
        Self::Macd,
        Self::Bollinger,
        Self::Stochastic,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Self::LongMovingAverage => "long-moving-average",
            Self::ExponentialMovingAverage => "exponential-moving-average",
            Self::Rsi => "rsi",
            Self::Macd => "macd",
            Self::Bollinger => "bollinger",
            Self::Stochastic => "stochastic",
        }
    }
}

impl std::fmt::Display for IndicatorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

/// Display value of a report: a scalar, or the three bands for Bollinger.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReportValue {
    Scalar(f64),
    Bands(BandPoint),
}

/// Externally visible unit per indicator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorReport {
    pub value: ReportValue,
    pub signal: Signal,
    pub label: String,
    pub historical: Vec<f64>,
    pub timestamps: Vec<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<usize>,
    /// Closes aligned 1:1 with `historical`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prices: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub macd: Option<MacdResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bands: Option<BandSeries>,
}

/// Column-wise Bollinger history, convenient for plotting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BandSeries {
    pub upper: Vec<f64>,
    pub middle: Vec<f64>,
    pub lower: Vec<f64>,
}

impl From<&[BandPoint]> for BandSeries {
    fn from(points: &[BandPoint]) -> Self {
        Self {
            upper: points.iter().map(|b| b.upper).collect(),
            middle: points.iter().map(|b| b.middle).collect(),
            lower: points.iter().map(|b| b.lower).collect(),
        }
    }
}

/// Tally of signals across all reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalSummary {
    pub buy: usize,
    pub sell: usize,
    pub neutral: usize,
}

impl SignalSummary {
    pub fn tally<'a>(signals: impl IntoIterator<Item = &'a Signal>) -> Self {
        signals.into_iter().fold(Self::default(), |mut acc, s| {
            match s {
                Signal::Buy => acc.buy += 1,
                Signal::Sell => acc.sell += 1,
                Signal::Neutral => acc.neutral += 1,
            }
            acc
        })
    }
}

/// Final result of one top-level computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub symbol: String,
    pub display_name: String,
    pub current_price: f64,
    pub currency: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub as_of: Option<String>,
    pub indicators: BTreeMap<IndicatorKind, IndicatorReport>,
    pub summary: SignalSummary,
}
