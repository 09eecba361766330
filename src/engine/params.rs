// =============================================================================
// Indicator lookback parameters
// =============================================================================

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::indicators::{bollinger, macd, stochastic};

fn default_rsi_period() -> usize {
    14
}

fn default_macd_fast() -> usize {
    macd::DEFAULT_FAST
}

fn default_macd_slow() -> usize {
    macd::DEFAULT_SLOW
}

fn default_macd_signal() -> usize {
    macd::DEFAULT_SIGNAL
}

fn default_bollinger_period() -> usize {
    bollinger::DEFAULT_PERIOD
}

fn default_bollinger_multiplier() -> f64 {
    bollinger::DEFAULT_MULTIPLIER
}

fn default_stochastic_period() -> usize {
    stochastic::DEFAULT_PERIOD
}

/// Tunable lookbacks.  Signal thresholds live in the classifier as fixed
/// constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorParams {
    #[serde(default = "default_rsi_period")]
    pub rsi_period: usize,
    #[serde(default = "default_macd_fast")]
    pub macd_fast: usize,
    #[serde(default = "default_macd_slow")]
    pub macd_slow: usize,
    #[serde(default = "default_macd_signal")]
    pub macd_signal: usize,
    #[serde(default = "default_bollinger_period")]
    pub bollinger_period: usize,
    /// Standard-deviation multiplier for the outer bands.
    #[serde(default = "default_bollinger_multiplier")]
    pub bollinger_multiplier: f64,
    #[serde(default = "default_stochastic_period")]
    pub stochastic_period: usize,
}

impl Default for IndicatorParams {
    fn default() -> Self {
        Self {
            rsi_period: default_rsi_period(),
            macd_fast: default_macd_fast(),
            macd_slow: default_macd_slow(),
            macd_signal: default_macd_signal(),
            bollinger_period: default_bollinger_period(),
            bollinger_multiplier: default_bollinger_multiplier(),
            stochastic_period: default_stochastic_period(),
        }
    }
}

impl IndicatorParams {
    /// Points needed before the MACD histogram has a first value.
    pub fn macd_warmup(&self) -> usize {
        self.macd_slow
            .saturating_add(self.macd_signal)
            .saturating_sub(1)
    }

    /// Reject lookbacks that can never yield a series, whatever the history.
    pub fn validate(&self) -> Result<()> {
        let lookbacks = [
            ("rsi_period", self.rsi_period),
            ("macd_fast", self.macd_fast),
            ("macd_slow", self.macd_slow),
            ("macd_signal", self.macd_signal),
            ("bollinger_period", self.bollinger_period),
            ("stochastic_period", self.stochastic_period),
        ];
        if let Some((name, _)) = lookbacks.into_iter().find(|(_, period)| *period == 0) {
            return Err(EngineError::InvalidParameter {
                name,
                reason: "must be at least 1",
            });
        }
        if self.macd_fast >= self.macd_slow {
            return Err(EngineError::InvalidParameter {
                name: "macd_fast",
                reason: "must be shorter than macd_slow",
            });
        }
        if !self.bollinger_multiplier.is_finite() || self.bollinger_multiplier < 0.0 {
            return Err(EngineError::InvalidParameter {
                name: "bollinger_multiplier",
                reason: "must be a finite, non-negative number",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_classic_settings() {
        let p = IndicatorParams::default();
        assert_eq!(p.rsi_period, 14);
        assert_eq!((p.macd_fast, p.macd_slow, p.macd_signal), (12, 26, 9));
        assert_eq!(p.bollinger_period, 20);
        assert!((p.bollinger_multiplier - 2.0).abs() < f64::EPSILON);
        assert_eq!(p.stochastic_period, 14);
        assert_eq!(p.macd_warmup(), 34);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let p: IndicatorParams = serde_json::from_str(r#"{"rsi_period": 7}"#).unwrap();
        assert_eq!(p.rsi_period, 7);
        assert_eq!(p.macd_slow, 26);
    }

    #[test]
    fn defaults_are_valid() {
        assert!(IndicatorParams::default().validate().is_ok());
    }

    #[test]
    fn zero_lookback_is_rejected() {
        let p = IndicatorParams {
            macd_fast: 0,
            macd_slow: 0,
            macd_signal: 0,
            ..IndicatorParams::default()
        };
        assert_eq!(p.macd_warmup(), 0);
        assert_eq!(
            p.validate(),
            Err(EngineError::InvalidParameter {
                name: "macd_fast",
                reason: "must be at least 1",
            })
        );
    }

    #[test]
    fn inverted_macd_periods_are_rejected() {
        let p = IndicatorParams {
            macd_fast: 26,
            macd_slow: 12,
            ..IndicatorParams::default()
        };
        let err = p.validate().unwrap_err();
        assert_eq!(err.kind(), "invalid-parameter");
        assert!(err.to_string().contains("macd_slow"));
    }

    #[test]
    fn non_finite_multiplier_is_rejected() {
        let p = IndicatorParams {
            bollinger_multiplier: f64::NAN,
            ..IndicatorParams::default()
        };
        assert!(p.validate().is_err());
    }

    #[test]
    fn warmup_saturates_on_huge_periods() {
        let p = IndicatorParams {
            macd_slow: usize::MAX,
            macd_signal: usize::MAX,
            ..IndicatorParams::default()
        };
        assert_eq!(p.macd_warmup(), usize::MAX - 1);
    }
}
