//! Resolution-indexed VP9 VOD tuning table.
//!
//! Values follow Google's recommended VP9 VOD settings. 144p and 240p share a
//! single entry; there is no separate 240p tuning.

use serde::Serialize;
use std::fmt;

/// Target/min/max bitrate in kbps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BitrateLadder {
    pub target_kbps: u32,
    pub min_kbps: u32,
    pub max_kbps: u32,
}

/// Tile columns (log2) and encoder thread count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Tiling {
    pub tile_columns: u8,
    pub threads: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResolutionProfile {
    pub bitrate: BitrateLadder,
    pub base_crf: u8,
    pub tiling: Tiling,
}

/// Supported resolution classes, keyed by pixel height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Resolution {
    P144,
    P240,
    P360,
    P480,
    P720,
    P1080,
    P1440,
    P2160,
}

const fn ladder(target_kbps: u32, min_kbps: u32, max_kbps: u32) -> BitrateLadder {
    BitrateLadder {
        target_kbps,
        min_kbps,
        max_kbps,
    }
}

const fn tiling(tile_columns: u8, threads: u8) -> Tiling {
    Tiling {
        tile_columns,
        threads,
    }
}

impl Resolution {
    pub const ALL: [Resolution; 8] = [
        Resolution::P144,
        Resolution::P240,
        Resolution::P360,
        Resolution::P480,
        Resolution::P720,
        Resolution::P1080,
        Resolution::P1440,
        Resolution::P2160,
    ];

    /// Entry used for bitrate and CRF when the resolution class is unknown.
    pub const LOW_FALLBACK: Resolution = Resolution::P144;

    /// Entry used for tiling when the resolution class is unknown.
    pub const TILING_FALLBACK: Resolution = Resolution::P2160;

    pub const fn from_height(height: u32) -> Option<Resolution> {
        match height {
            144 => Some(Resolution::P144),
            240 => Some(Resolution::P240),
            360 => Some(Resolution::P360),
            480 => Some(Resolution::P480),
            720 => Some(Resolution::P720),
            1080 => Some(Resolution::P1080),
            1440 => Some(Resolution::P1440),
            2160 => Some(Resolution::P2160),
            _ => None,
        }
    }

    pub const fn height(self) -> u32 {
        match self {
            Resolution::P144 => 144,
            Resolution::P240 => 240,
            Resolution::P360 => 360,
            Resolution::P480 => 480,
            Resolution::P720 => 720,
            Resolution::P1080 => 1080,
            Resolution::P1440 => 1440,
            Resolution::P2160 => 2160,
        }
    }

    pub const fn profile(self) -> ResolutionProfile {
        match self {
            Resolution::P144 | Resolution::P240 => ResolutionProfile {
                bitrate: ladder(150, 75, 218),
                base_crf: 37,
                tiling: tiling(0, 2),
            },
            Resolution::P360 => ResolutionProfile {
                bitrate: ladder(276, 138, 400),
                base_crf: 36,
                tiling: tiling(1, 4),
            },
            // 750/375/1088 and CRF 33 are the medium-quality alternatives
            Resolution::P480 => ResolutionProfile {
                bitrate: ladder(512, 256, 742),
                base_crf: 34,
                tiling: tiling(1, 4),
            },
            Resolution::P720 => ResolutionProfile {
                bitrate: ladder(1024, 512, 1485),
                base_crf: 32,
                tiling: tiling(2, 4),
            },
            Resolution::P1080 => ResolutionProfile {
                bitrate: ladder(1800, 900, 2610),
                base_crf: 31,
                tiling: tiling(2, 4),
            },
            Resolution::P1440 => ResolutionProfile {
                bitrate: ladder(6000, 3000, 8700),
                base_crf: 24,
                tiling: tiling(4, 16),
            },
            Resolution::P2160 => ResolutionProfile {
                bitrate: ladder(12000, 6000, 17400),
                base_crf: 15,
                tiling: tiling(4, 16),
            },
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}p", self.height())
    }
}
