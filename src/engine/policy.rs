// =============================================================================
// Minimum-history policy
// =============================================================================
//
// Decides how many aligned points a computation needs and which moving-average
// lookbacks it uses.
//
//   Fixed     — hard minimum (200 by default), MA lookbacks 50 / 200, EMA 50.
//   Adaptive  — minimum never below 50; lookbacks shrink with short history:
//                 medium = n >= 50  ? 50  : floor(n * 0.5)
//                 long   = n >= 200 ? 200 : n >= 100 ? 100 : floor(n * 0.8)
//                 ema    = medium
// =============================================================================

use serde::{Deserialize, Serialize};

/// Floor under any adaptive minimum.
pub const ADAPTIVE_FLOOR: usize = 50;
pub const FIXED_MINIMUM: usize = 200;

pub const MEDIUM_PERIOD: usize = 50;
pub const LONG_PERIOD: usize = 200;
const LONG_FALLBACK_PERIOD: usize = 100;

/// Moving-average lookbacks chosen for one computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovingAveragePeriods {
    pub medium: usize,
    pub long: usize,
    pub ema: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum MinimumHistoryPolicy {
    Fixed { minimum: usize },
    Adaptive { minimum: usize },
}

impl Default for MinimumHistoryPolicy {
    fn default() -> Self {
        Self::adaptive()
    }
}

impl std::fmt::Display for MinimumHistoryPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fixed { minimum } => write!(f, "fixed(min={minimum})"),
            Self::Adaptive { .. } => write!(f, "adaptive(min={})", self.required_points()),
        }
    }
}

impl MinimumHistoryPolicy {
    pub fn fixed() -> Self {
        Self::Fixed {
            minimum: FIXED_MINIMUM,
        }
    }

    pub fn adaptive() -> Self {
        Self::Adaptive {
            minimum: ADAPTIVE_FLOOR,
        }
    }

    /// Parse the short mode names used by env overrides.
    pub fn from_mode(mode: &str) -> Option<Self> {
        match mode.trim().to_lowercase().as_str() {
            "fixed" => Some(Self::fixed()),
            "adaptive" => Some(Self::adaptive()),
            _ => None,
        }
    }

    /// Fewest aligned points a computation accepts.
    pub fn required_points(&self) -> usize {
        match *self {
            Self::Fixed { minimum } => minimum,
            Self::Adaptive { minimum } => minimum.max(ADAPTIVE_FLOOR),
        }
    }

    /// Lookbacks to use for `available` aligned points.
    pub fn periods(&self, available: usize) -> MovingAveragePeriods {
        match self {
            Self::Fixed { .. } => MovingAveragePeriods {
                medium: MEDIUM_PERIOD,
                long: LONG_PERIOD,
                ema: MEDIUM_PERIOD,
            },
            Self::Adaptive { .. } => {
                let medium = if available >= MEDIUM_PERIOD {
                    MEDIUM_PERIOD
                } else {
                    available / 2
                };
                let long = if available >= LONG_PERIOD {
                    LONG_PERIOD
                } else if available >= LONG_FALLBACK_PERIOD {
                    LONG_FALLBACK_PERIOD
                } else {
                    (available as f64 * 0.8).floor() as usize
                };
                MovingAveragePeriods {
                    medium,
                    long,
                    ema: medium,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_periods_ignore_history_length() {
        let p = MinimumHistoryPolicy::fixed();
        assert_eq!(p.required_points(), 200);
        let periods = p.periods(37);
        assert_eq!((periods.medium, periods.long, periods.ema), (50, 200, 50));
    }

    #[test]
    fn adaptive_minimum_never_below_fifty() {
        let p = MinimumHistoryPolicy::Adaptive { minimum: 10 };
        assert_eq!(p.required_points(), 50);
        let p = MinimumHistoryPolicy::Adaptive { minimum: 120 };
        assert_eq!(p.required_points(), 120);
    }

    #[test]
    fn adaptive_long_period_steps() {
        let p = MinimumHistoryPolicy::adaptive();
        assert_eq!(p.periods(250).long, 200);
        assert_eq!(p.periods(200).long, 200);
        assert_eq!(p.periods(150).long, 100);
        assert_eq!(p.periods(100).long, 100);
        assert_eq!(p.periods(60).long, 48);
        assert_eq!(p.periods(60).medium, 50);
        assert_eq!(p.periods(40).medium, 20);
        assert_eq!(p.periods(40).ema, 20);
    }

    #[test]
    fn serde_uses_mode_tag() {
        let p: MinimumHistoryPolicy =
            serde_json::from_str(r#"{"mode":"fixed","minimum":250}"#).unwrap();
        assert_eq!(p, MinimumHistoryPolicy::Fixed { minimum: 250 });
        let json = serde_json::to_value(MinimumHistoryPolicy::adaptive()).unwrap();
        assert_eq!(json["mode"], "adaptive");
    }

    #[test]
    fn from_mode_parses_names() {
        assert_eq!(MinimumHistoryPolicy::from_mode(" Fixed "), Some(MinimumHistoryPolicy::fixed()));
        assert_eq!(
            MinimumHistoryPolicy::from_mode("adaptive"),
            Some(MinimumHistoryPolicy::adaptive())
        );
        assert_eq!(MinimumHistoryPolicy::from_mode("sometimes"), None);
    }
}
