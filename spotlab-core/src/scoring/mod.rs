//! Signal scoring, trend aggregation, probability and target computation.

pub mod probability;
pub mod scorer;
pub mod targets;
pub mod trend;
pub mod weights;

pub use probability::{estimate, ProbabilityInputs, MAX_PROBABILITY};
pub use scorer::{ScoreBreakdown, SignalScorer};
pub use targets::{compute_targets, PriceTargets, MIN_RISK_REWARD};
pub use trend::{
    aggregate, classify_timeframe, timeframe_weight, TimeframeReading, TimeframeTrend,
    TrendAssessment, VolumeLevel,
};
pub use weights::ScoreWeights;
