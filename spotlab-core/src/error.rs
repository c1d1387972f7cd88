//! Structured error types for analysis and backtesting.
//!
//! Data-shape problems never cross the boundary as panics: a short series is
//! `InsufficientData` (the caller skips that symbol/timeframe), an unknown
//! pattern name is `InvalidPattern`. Degenerate arithmetic (zero denominators
//! during warm-up or in flat markets) is handled inside the indicator layer as
//! "value unavailable" (NaN), not as an error.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("insufficient data: need at least {required} candles, got {got}")]
    InsufficientData { required: usize, got: usize },

    #[error("unknown market pattern '{0}'")]
    InvalidPattern(String),

    #[error("malformed pattern overrides: {0}")]
    PatternConfig(#[from] toml::de::Error),
}

impl AnalysisError {
    /// Shorthand used by every component that enforces a minimum window.
    pub fn insufficient(required: usize, got: usize) -> Self {
        Self::InsufficientData { required, got }
    }
}
