use serde::Serialize;

use crate::classifier::label::DeficiencyLabel;
use crate::classifier::recommendation::RecommendationTable;
use crate::classifier::thresholds::Thresholds;
use crate::color::ChannelStatistics;
use crate::error::ClassifierError;
use crate::preprocess::{self, DecodedImage};

/// Result of analysing one image, serialized as the API response body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    pub deficiency: DeficiencyLabel,
    pub recommendation: String,
}

/// Stateless soil-image classifier.
///
/// Holds only read-only data, so one instance can be shared across request
/// threads behind an `Arc` without locking.
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    thresholds: Thresholds,
    table: RecommendationTable,
}

impl Classifier {
    pub fn new(thresholds: Thresholds, table: RecommendationTable) -> Self {
        Classifier { thresholds, table }
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    pub fn table(&self) -> &RecommendationTable {
        &self.table
    }

    pub fn decode(&self, bytes: &[u8]) -> Result<DecodedImage, ClassifierError> {
        preprocess::decode(bytes)
    }

    pub fn statistics(&self, image: &DecodedImage) -> ChannelStatistics {
        ChannelStatistics::from_image(image)
    }

    /// Total: every decoded image maps to exactly one label.
    pub fn classify(&self, image: &DecodedImage) -> DeficiencyLabel {
        self.thresholds.label_for(&self.statistics(image))
    }

    pub fn recommend(&self, label: DeficiencyLabel) -> &str {
        self.table.recommend(label)
    }

    /// Decode, classify and recommend in one step.
    pub fn analyze(&self, bytes: &[u8]) -> Result<Analysis, ClassifierError> {
        let image = self.decode(bytes)?;
        let deficiency = self.classify(&image);
        Ok(Analysis {
            deficiency,
            recommendation: self.recommend(deficiency).to_owned(),
        })
    }
}
