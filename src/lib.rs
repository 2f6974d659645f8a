pub mod classifier;
pub mod color;
pub mod error;
pub mod preprocess;

// Convenience re-exports
pub use classifier::{Analysis, Classifier, DeficiencyLabel, RecommendationTable, Thresholds};
pub use color::ChannelStatistics;
pub use error::ClassifierError;
pub use preprocess::{decode, DecodedImage};
