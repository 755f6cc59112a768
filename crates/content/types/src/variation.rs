use serde::{Deserialize, Serialize};

/// How the values of a content type or property type vary.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentVariation {
    /// Invariant: one value regardless of culture or segment
    #[default]
    Nothing,
    /// Values vary by culture
    Culture,
    /// Values vary by segment
    Segment,
    /// Values vary by culture and by segment
    CultureAndSegment,
}

impl ContentVariation {
    pub fn from_flags(by_culture: bool, by_segment: bool) -> Self {
        match (by_culture, by_segment) {
            (false, false) => Self::Nothing,
            (true, false) => Self::Culture,
            (false, true) => Self::Segment,
            (true, true) => Self::CultureAndSegment,
        }
    }

    pub fn varies_by_culture(self) -> bool {
        matches!(self, Self::Culture | Self::CultureAndSegment)
    }

    pub fn varies_by_segment(self) -> bool {
        matches!(self, Self::Segment | Self::CultureAndSegment)
    }

    pub fn varies_by_nothing(self) -> bool {
        self == Self::Nothing
    }
}
