// =============================================================================
// Signals Module
// =============================================================================
//
// Maps each indicator's current state to a categorical buy / sell / neutral
// signal.

pub mod classifier;

pub use classifier::{classify, ClassifierInput};
