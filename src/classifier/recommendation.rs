use std::collections::HashMap;

use crate::classifier::label::DeficiencyLabel;

/// Returned for any label the table has no entry for.
pub const DEFAULT_RECOMMENDATION: &str = "NPK Blend";

/// Immutable label → fertilizer mapping, built once and shared read-only.
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationTable {
    entries: HashMap<String, String>,
}

impl RecommendationTable {
    /// Builds a table from `(label, fertilizer)` pairs. Later duplicates win.
    pub fn from_pairs<I, L, F>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (L, F)>,
        L: Into<String>,
        F: Into<String>,
    {
        let entries = pairs.into_iter()
            .map(|(label, fertilizer)| (label.into(), fertilizer.into()))
            .collect();
        RecommendationTable { entries }
    }

    /// Looks up a label by its API string, falling back to `DEFAULT_RECOMMENDATION`.
    pub fn lookup(&self, label: &str) -> &str {
        self.entries.get(label).map(String::as_str).unwrap_or(DEFAULT_RECOMMENDATION)
    }

    pub fn recommend(&self, label: DeficiencyLabel) -> &str {
        self.lookup(label.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for RecommendationTable {
    fn default() -> Self {
        RecommendationTable::from_pairs([
            (DeficiencyLabel::Nitrogen.as_str(),   "Urea"),
            (DeficiencyLabel::Phosphorus.as_str(), "Superphosphate"),
            (DeficiencyLabel::Potassium.as_str(),  "Potassium Chloride"),
            (DeficiencyLabel::Balanced.as_str(),   "NPK Blend"),
        ])
    }
}
