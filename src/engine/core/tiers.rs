//! User-selectable VP9 quality and deadline tiers.
//!
//! Both enums round-trip through the names the settings layer persists:
//! quality tiers as `SCREAMING_SNAKE_CASE` (`"BETTER"`), deadlines as the
//! lowercase libvpx keywords (`"good"`).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Lowest CRF libvpx-vp9 accepts.
pub const MIN_CRF: i32 = 0;
/// Highest CRF libvpx-vp9 accepts.
pub const MAX_CRF: i32 = 63;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseTierError {
    #[error("unknown quality tier '{0}'")]
    UnknownQuality(String),

    #[error("unknown deadline '{0}'")]
    UnknownDeadline(String),
}

/// Quality tier, ordered from most compressed to highest quality.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QualityTier {
    Unwatchable,
    Trash,
    EvenLower,
    Lower,
    Low,
    #[default]
    Default,
    Better,
    TooGood,
}

impl QualityTier {
    pub const ALL: [QualityTier; 8] = [
        QualityTier::Unwatchable,
        QualityTier::Trash,
        QualityTier::EvenLower,
        QualityTier::Lower,
        QualityTier::Low,
        QualityTier::Default,
        QualityTier::Better,
        QualityTier::TooGood,
    ];

    /// Offset added to a resolution's base CRF.
    pub const fn crf_offset(self) -> i32 {
        match self {
            QualityTier::Unwatchable => 40,
            QualityTier::Trash => 30,
            QualityTier::EvenLower => 20,
            QualityTier::Lower => 10,
            QualityTier::Low => 5,
            QualityTier::Default => 0,
            QualityTier::Better => -10,
            QualityTier::TooGood => -20,
        }
    }

    /// Shift `base_crf` by this tier's offset, saturating into `[MIN_CRF, MAX_CRF]`.
    pub fn apply_crf_offset(self, base_crf: u8) -> u8 {
        (i32::from(base_crf) + self.crf_offset()).clamp(MIN_CRF, MAX_CRF) as u8
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            QualityTier::Unwatchable => "UNWATCHABLE",
            QualityTier::Trash => "TRASH",
            QualityTier::EvenLower => "EVEN_LOWER",
            QualityTier::Lower => "LOWER",
            QualityTier::Low => "LOW",
            QualityTier::Default => "DEFAULT",
            QualityTier::Better => "BETTER",
            QualityTier::TooGood => "TOO_GOOD",
        }
    }
}

impl fmt::Display for QualityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QualityTier {
    type Err = ParseTierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        QualityTier::ALL
            .into_iter()
            .find(|tier| tier.as_str() == s)
            .ok_or_else(|| ParseTierError::UnknownQuality(s.to_string()))
    }
}

/// libvpx `-deadline` value. Passed through to the encoder verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeadlineTier {
    Realtime,
    #[default]
    Good,
    Best,
}

impl DeadlineTier {
    pub const ALL: [DeadlineTier; 3] = [
        DeadlineTier::Realtime,
        DeadlineTier::Good,
        DeadlineTier::Best,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            DeadlineTier::Realtime => "realtime",
            DeadlineTier::Good => "good",
            DeadlineTier::Best => "best",
        }
    }
}

impl fmt::Display for DeadlineTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeadlineTier {
    type Err = ParseTierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DeadlineTier::ALL
            .into_iter()
            .find(|deadline| deadline.as_str() == s)
            .ok_or_else(|| ParseTierError::UnknownDeadline(s.to_string()))
    }
}
