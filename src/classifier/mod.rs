pub mod classifier;
pub mod label;
pub mod recommendation;
pub mod thresholds;

pub use classifier::{Analysis, Classifier};
pub use label::DeficiencyLabel;
pub use recommendation::{RecommendationTable, DEFAULT_RECOMMENDATION};
pub use thresholds::Thresholds;
