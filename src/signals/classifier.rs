// =============================================================================
// Signal Classifier — fixed-threshold buy / sell / neutral rules
// =============================================================================
//
//   long MA cross     price > MA(long)  => buy,  price < MA(long)  => sell
//   medium MA cross   price > MA(50)    => buy,  price < MA(50)    => sell
//   RSI               < 30 => buy,  > 70 => sell
//   MACD histogram    > 0  => buy,  < 0  => sell
//   Bollinger         band position < 0.2 => buy, > 0.8 => sell
//   Stochastic %K     < 20 => buy,  > 80 => sell
//
// Boundaries are neutral.  Missing inputs are neutral.  Classification never
// fails.
// =============================================================================

use crate::indicators::band_position;
use crate::types::{BandPoint, IndicatorKind, Signal};

pub const RSI_OVERSOLD: f64 = 30.0;
pub const RSI_OVERBOUGHT: f64 = 70.0;
pub const STOCHASTIC_OVERSOLD: f64 = 20.0;
pub const STOCHASTIC_OVERBOUGHT: f64 = 80.0;
pub const BAND_LOWER_ZONE: f64 = 0.2;
pub const BAND_UPPER_ZONE: f64 = 0.8;

/// Everything the classifier may look at for one indicator.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClassifierInput {
    /// Current indicator value (RSI, MACD histogram, %K).
    pub value: Option<f64>,
    pub price: f64,
    pub ma50: Option<f64>,
    pub ma200: Option<f64>,
    pub bands: Option<BandPoint>,
}

impl ClassifierInput {
    pub fn at_price(price: f64) -> Self {
        Self {
            price,
            ..Self::default()
        }
    }

    pub fn with_value(mut self, value: f64) -> Self {
        self.value = Some(value);
        self
    }
}

/// Map an indicator's current state to a [`Signal`].
pub fn classify(kind: IndicatorKind, input: &ClassifierInput) -> Signal {
    match kind {
        IndicatorKind::LongMovingAverage => price_cross(input.price, input.ma200),
        IndicatorKind::ExponentialMovingAverage => price_cross(input.price, input.ma50),
        IndicatorKind::Rsi => oscillator(input.value, RSI_OVERSOLD, RSI_OVERBOUGHT),
        IndicatorKind::Macd => match input.value {
            Some(v) if v > 0.0 => Signal::Buy,
            Some(v) if v < 0.0 => Signal::Sell,
            _ => Signal::Neutral,
        },
        IndicatorKind::Bollinger => input
            .bands
            .and_then(|b| band_position(input.price, &b))
            .map_or(Signal::Neutral, |pos| {
                oscillator(Some(pos), BAND_LOWER_ZONE, BAND_UPPER_ZONE)
            }),
        IndicatorKind::Stochastic => {
            oscillator(input.value, STOCHASTIC_OVERSOLD, STOCHASTIC_OVERBOUGHT)
        }
    }
}

fn price_cross(price: f64, average: Option<f64>) -> Signal {
    match average {
        Some(ma) if price > ma => Signal::Buy,
        Some(ma) if price < ma => Signal::Sell,
        _ => Signal::Neutral,
    }
}

fn oscillator(value: Option<f64>, low: f64, high: f64) -> Signal {
    match value {
        Some(v) if v < low => Signal::Buy,
        Some(v) if v > high => Signal::Sell,
        _ => Signal::Neutral,
    }
}
