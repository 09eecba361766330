// =============================================================================
// Indicator Engine — runs every indicator over one validated history
// =============================================================================
//
// Data flow:
//   aligner -> SMA / EMA -> RSI, Stochastic, MACD (EMA), Bollinger (SMA)
//           -> classifier -> report assembly
//
// Every call is a pure function of its input.  No state survives between
// calls and nothing here logs; callers decide what to report.
// =============================================================================

pub mod params;
pub mod policy;

use std::collections::BTreeMap;

pub use params::IndicatorParams;
pub use policy::{MinimumHistoryPolicy, MovingAveragePeriods};

use crate::error::{EngineError, Result};
use crate::indicators::{
    calculate_bollinger, calculate_ema, calculate_macd, calculate_rsi, calculate_sma,
    calculate_stochastic,
};
use crate::market_data::{align_history, PriceColumns};
use crate::signals::{classify, ClassifierInput};
use crate::types::{
    AnalysisResult, BandPoint, BandSeries, IndicatorKind, IndicatorReport, MacdResult,
    PricePoint, RawHistory, ReportValue, SignalSummary,
};

const DEFAULT_CURRENCY: &str = "USD";

/// Raw indicator series computed from one aligned history.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorSet {
    pub periods: MovingAveragePeriods,
    pub ma_medium: Vec<f64>,
    pub ma_long: Vec<f64>,
    pub ema: Vec<f64>,
    pub rsi: Vec<f64>,
    pub macd: MacdResult,
    pub bollinger: Vec<BandPoint>,
    pub stochastic: Vec<f64>,
}

/// Parametrised engine.  Cheap to clone and safe to share across threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct IndicatorEngine {
    params: IndicatorParams,
    policy: MinimumHistoryPolicy,
}

impl IndicatorEngine {
    pub fn new(params: IndicatorParams, policy: MinimumHistoryPolicy) -> Self {
        Self { params, policy }
    }

    pub fn policy(&self) -> MinimumHistoryPolicy {
        self.policy
    }

    /// Align `history`, compute every indicator and assemble the result.
    pub fn analyze(&self, history: &RawHistory) -> Result<AnalysisResult> {
        let points = align_history(history, self.policy.required_points())?;
        let set = self.compute(&points)?;
        Ok(self.assemble(history, &points, &set))
    }

    /// Compute the raw indicator series for already aligned `points`.
    ///
    /// Unusable parameters fail with [`EngineError::InvalidParameter`].  Any
    /// indicator that cannot produce a current value is a hard
    /// [`EngineError::InvalidPeriod`]; the medium MA only feeds a
    /// classification and may come out empty.
    pub fn compute(&self, points: &[PricePoint]) -> Result<IndicatorSet> {
        self.params.validate()?;

        let available = points.len();
        let cols = PriceColumns::from(points);
        let periods = self.policy.periods(available);
        let p = &self.params;

        let set = IndicatorSet {
            periods,
            ma_medium: calculate_sma(&cols.closes, periods.medium),
            ma_long: calculate_sma(&cols.closes, periods.long),
            ema: calculate_ema(&cols.closes, periods.ema),
            rsi: calculate_rsi(&cols.closes, p.rsi_period),
            macd: calculate_macd(&cols.closes, p.macd_fast, p.macd_slow, p.macd_signal),
            bollinger: calculate_bollinger(
                &cols.closes,
                p.bollinger_period,
                p.bollinger_multiplier,
            ),
            stochastic: calculate_stochastic(
                &cols.highs,
                &cols.lows,
                &cols.closes,
                p.stochastic_period,
            ),
        };

        let required = [
            (IndicatorKind::LongMovingAverage, periods.long, set.ma_long.is_empty()),
            (IndicatorKind::ExponentialMovingAverage, periods.ema, set.ema.is_empty()),
            (IndicatorKind::Rsi, p.rsi_period.saturating_add(1), set.rsi.is_empty()),
            (IndicatorKind::Macd, p.macd_warmup(), set.macd.histogram.is_empty()),
            (IndicatorKind::Bollinger, p.bollinger_period, set.bollinger.is_empty()),
            (IndicatorKind::Stochastic, p.stochastic_period, set.stochastic.is_empty()),
        ];
        if let Some((kind, period, _)) = required.into_iter().find(|(_, _, empty)| *empty) {
            return Err(EngineError::InvalidPeriod {
                indicator: kind.id(),
                period,
                available,
            });
        }

        Ok(set)
    }

    fn assemble(
        &self,
        history: &RawHistory,
        points: &[PricePoint],
        set: &IndicatorSet,
    ) -> AnalysisResult {
        let cols = PriceColumns::from(points);
        let price = cols.closes.last().copied().unwrap_or_default();
        let periods = set.periods;
        let p = &self.params;

        let base = ClassifierInput {
            ma50: set.ma_medium.last().copied(),
            ma200: set.ma_long.last().copied(),
            ..ClassifierInput::at_price(price)
        };

        let mut indicators = BTreeMap::new();

        let ma_long = last(&set.ma_long);
        indicators.insert(
            IndicatorKind::LongMovingAverage,
            IndicatorReport {
                value: ReportValue::Scalar(round_half_up(ma_long, 2)),
                signal: classify(IndicatorKind::LongMovingAverage, &base),
                label: format!("{}-day MA", periods.long),
                historical: set.ma_long.clone(),
                timestamps: tail(&cols.timestamps, set.ma_long.len()),
                period: Some(periods.long),
                prices: Some(tail(&cols.closes, set.ma_long.len())),
                macd: None,
                bands: None,
            },
        );

        let ema = last(&set.ema);
        indicators.insert(
            IndicatorKind::ExponentialMovingAverage,
            IndicatorReport {
                value: ReportValue::Scalar(round_half_up(ema, 2)),
                signal: classify(IndicatorKind::ExponentialMovingAverage, &base),
                label: format!("{}-day EMA", periods.ema),
                historical: set.ema.clone(),
                timestamps: tail(&cols.timestamps, set.ema.len()),
                period: Some(periods.ema),
                prices: Some(tail(&cols.closes, set.ema.len())),
                macd: None,
                bands: None,
            },
        );

        let rsi = last(&set.rsi);
        indicators.insert(
            IndicatorKind::Rsi,
            IndicatorReport {
                value: ReportValue::Scalar(round_half_up(rsi, 1)),
                signal: classify(IndicatorKind::Rsi, &base.with_value(rsi)),
                label: format!("RSI ({})", p.rsi_period),
                historical: set.rsi.clone(),
                timestamps: tail(&cols.timestamps, set.rsi.len()),
                period: Some(p.rsi_period),
                prices: None,
                macd: None,
                bands: None,
            },
        );

        let histogram = last(&set.macd.histogram);
        indicators.insert(
            IndicatorKind::Macd,
            IndicatorReport {
                value: ReportValue::Scalar(round_half_up(histogram, 2)),
                signal: classify(IndicatorKind::Macd, &base.with_value(histogram)),
                label: "MACD".to_string(),
                historical: set.macd.histogram.clone(),
                timestamps: tail(&cols.timestamps, set.macd.macd_line.len()),
                period: None,
                prices: None,
                macd: Some(set.macd.clone()),
                bands: None,
            },
        );

        let band = set.bollinger.last().copied();
        let band_series = BandSeries::from(set.bollinger.as_slice());
        indicators.insert(
            IndicatorKind::Bollinger,
            IndicatorReport {
                value: ReportValue::Bands(band.map(round_band).unwrap_or(BandPoint {
                    upper: 0.0,
                    middle: 0.0,
                    lower: 0.0,
                })),
                signal: classify(
                    IndicatorKind::Bollinger,
                    &ClassifierInput {
                        bands: band,
                        ..base
                    },
                ),
                label: "Bollinger Bands".to_string(),
                historical: band_series.middle.clone(),
                timestamps: tail(&cols.timestamps, set.bollinger.len()),
                period: None,
                prices: Some(tail(&cols.closes, set.bollinger.len())),
                macd: None,
                bands: Some(band_series),
            },
        );

        let stochastic = last(&set.stochastic);
        indicators.insert(
            IndicatorKind::Stochastic,
            IndicatorReport {
                value: ReportValue::Scalar(round_half_up(stochastic, 1)),
                signal: classify(IndicatorKind::Stochastic, &base.with_value(stochastic)),
                label: format!("Stochastic ({})", p.stochastic_period),
                historical: set.stochastic.clone(),
                timestamps: tail(&cols.timestamps, set.stochastic.len()),
                period: Some(p.stochastic_period),
                prices: None,
                macd: None,
                bands: None,
            },
        );

        let summary = SignalSummary::tally(indicators.values().map(|r| &r.signal));

        AnalysisResult {
            symbol: history.symbol.clone(),
            display_name: history
                .display_name
                .clone()
                .unwrap_or_else(|| history.symbol.clone()),
            current_price: price,
            currency: history
                .currency
                .clone()
                .unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
            as_of: cols.timestamps.last().and_then(|&ts| format_day(ts)),
            indicators,
            summary,
        }
    }
}

/// Round half up to `decimals` places, matching the display convention of
/// the quote front-ends (`floor(x * 10^d + 0.5) / 10^d`).
pub fn round_half_up(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor + 0.5).floor() / factor
}

fn round_band(band: BandPoint) -> BandPoint {
    BandPoint {
        upper: round_half_up(band.upper, 2),
        middle: round_half_up(band.middle, 2),
        lower: round_half_up(band.lower, 2),
    }
}

/// Last `len` entries of `all`.
fn tail<T: Clone>(all: &[T], len: usize) -> Vec<T> {
    all[all.len().saturating_sub(len)..].to_vec()
}

fn last(series: &[f64]) -> f64 {
    series.last().copied().unwrap_or_default()
}

fn format_day(timestamp: i64) -> Option<String> {
    chrono::DateTime::<chrono::Utc>::from_timestamp(timestamp, 0)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
}
