use serde::{Serialize, Serializer};
use std::fmt;

/// The closed set of nutrient-deficiency labels a soil image can receive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeficiencyLabel {
    Nitrogen,
    Phosphorus,
    Potassium,
    Balanced,
}

impl DeficiencyLabel {
    pub const ALL: [DeficiencyLabel; 4] = [
        DeficiencyLabel::Nitrogen,
        DeficiencyLabel::Phosphorus,
        DeficiencyLabel::Potassium,
        DeficiencyLabel::Balanced,
    ];

    /// The label exactly as reported to API clients.
    pub fn as_str(self) -> &'static str {
        match self {
            DeficiencyLabel::Nitrogen   => "Nitrogen Deficient",
            DeficiencyLabel::Phosphorus => "Phosphorus Deficient",
            DeficiencyLabel::Potassium  => "Potassium Deficient",
            DeficiencyLabel::Balanced   => "Balanced",
        }
    }
}

impl fmt::Display for DeficiencyLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for DeficiencyLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
