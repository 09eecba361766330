// =============================================================================
// Market Data Module
// =============================================================================
//
// Input side of the engine: decoding provider chart payloads and aligning raw
// arrays into complete price points.

pub mod aligner;
pub mod chart;

pub use aligner::{align_history, PriceColumns};
pub use chart::{parse_chart, ChartResponse};
