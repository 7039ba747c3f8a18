use serde::{Deserialize, Serialize};

/// The seven ordered classification categories. Each carries the fixed
/// answer/comment pair published in the station result; the match arms are
/// the single source of that text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ClassificationBin {
    #[serde(rename = "bc")]
    BloodyCold,
    #[serde(rename = "rc")]
    ReallyCold,
    #[serde(rename = "c")]
    Cold,
    #[serde(rename = "a")]
    Average,
    #[serde(rename = "h")]
    Hot,
    #[serde(rename = "rh")]
    ReallyHot,
    #[serde(rename = "bh")]
    BloodyHot,
}

impl ClassificationBin {
    pub const ALL: [ClassificationBin; 7] = [
        ClassificationBin::BloodyCold,
        ClassificationBin::ReallyCold,
        ClassificationBin::Cold,
        ClassificationBin::Average,
        ClassificationBin::Hot,
        ClassificationBin::ReallyHot,
        ClassificationBin::BloodyHot,
    ];

    /// Bin index 0..=6 as produced by the classifier's breakpoint count.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|b| b == self).unwrap_or(0)
    }

    pub fn code(&self) -> &'static str {
        match self {
            ClassificationBin::BloodyCold => "bc",
            ClassificationBin::ReallyCold => "rc",
            ClassificationBin::Cold => "c",
            ClassificationBin::Average => "a",
            ClassificationBin::Hot => "h",
            ClassificationBin::ReallyHot => "rh",
            ClassificationBin::BloodyHot => "bh",
        }
    }

    pub fn answer(&self) -> &'static str {
        match self {
            ClassificationBin::BloodyCold => "Hell no!",
            ClassificationBin::ReallyCold => "No!",
            ClassificationBin::Cold => "No",
            ClassificationBin::Average => "Not really",
            ClassificationBin::Hot => "Yup",
            ClassificationBin::ReallyHot => "Yup!",
            ClassificationBin::BloodyHot => "Hell yes!",
        }
    }

    pub fn comment(&self) -> &'static str {
        match self {
            ClassificationBin::BloodyCold => "It is bloody cold for this time of year.",
            ClassificationBin::ReallyCold => "It is really cold for this time of year.",
            ClassificationBin::Cold => "It is colder than average for this time of year.",
            ClassificationBin::Average => "It is about average for this time of year.",
            ClassificationBin::Hot => "It is warmer than average for this time of year.",
            ClassificationBin::ReallyHot => "It is really hot for this time of year.",
            ClassificationBin::BloodyHot => "It is bloody hot for this time of year.",
        }
    }
}
