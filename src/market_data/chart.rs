// =============================================================================
// Chart payload decoding
// =============================================================================
//
// Decodes the daily-chart JSON document served by the quote provider
// (`chart.result[0]` with `meta`, `timestamp` and `indicators.quote[0]`) into
// a [`RawHistory`].  Only decoding happens here; fetching the document is the
// caller's business.
// =============================================================================

use serde::Deserialize;

use crate::error::{EngineError, Result};
use crate::types::RawHistory;

const DEFAULT_CURRENCY: &str = "USD";

#[derive(Debug, Clone, Deserialize)]
pub struct ChartResponse {
    pub chart: ChartBody,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChartBody {
    #[serde(default)]
    pub result: Option<Vec<ChartResult>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChartResult {
    #[serde(default)]
    pub meta: ChartMeta,
    #[serde(default)]
    pub timestamp: Vec<i64>,
    #[serde(default)]
    pub indicators: ChartIndicators,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartMeta {
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub long_name: Option<String>,
    #[serde(default)]
    pub short_name: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChartIndicators {
    #[serde(default)]
    pub quote: Vec<QuoteBlock>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuoteBlock {
    #[serde(default)]
    pub close: Vec<Option<f64>>,
    #[serde(default)]
    pub high: Vec<Option<f64>>,
    #[serde(default)]
    pub low: Vec<Option<f64>>,
}

impl ChartResponse {
    /// Convert the first chart result into a [`RawHistory`] for `symbol`.
    pub fn into_history(self, symbol: &str) -> Result<RawHistory> {
        let result = self
            .chart
            .result
            .and_then(|results| results.into_iter().next())
            .ok_or_else(|| EngineError::MissingChartResult {
                symbol: symbol.to_string(),
            })?;

        let meta = result.meta;
        let display_name = meta
            .long_name
            .or(meta.short_name)
            .or(meta.symbol)
            .unwrap_or_else(|| symbol.to_string());
        let currency = meta
            .currency
            .unwrap_or_else(|| DEFAULT_CURRENCY.to_string());
        let quote = result.indicators.quote.into_iter().next().unwrap_or_default();

        Ok(RawHistory {
            symbol: symbol.to_string(),
            display_name: Some(display_name),
            currency: Some(currency),
            timestamps: result.timestamp,
            close: quote.close,
            high: quote.high,
            low: quote.low,
        })
    }
}

/// Parse a chart document from JSON text.
pub fn parse_chart(json: &str, symbol: &str) -> anyhow::Result<RawHistory> {
    let response: ChartResponse = serde_json::from_str(json)?;
    Ok(response.into_history(symbol)?)
}
