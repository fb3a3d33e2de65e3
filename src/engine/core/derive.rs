//! Stateless derivation of VP9 VOD encoder options from a resolution class.
//!
//! Unknown resolution classes never fail: the lookup logs one error through the
//! diagnostics sink and substitutes a fixed table entry. Bitrate and CRF fall
//! back to 144p, tiling falls back to 2160p.

use super::log::Diagnostics;
use super::resolution::{Resolution, ResolutionProfile};
use super::tiers::QualityTier;
use super::types::EncoderOption;

fn lookup(
    operation: &str,
    height: u32,
    fallback: Resolution,
    diagnostics: &dyn Diagnostics,
) -> ResolutionProfile {
    match Resolution::from_height(height) {
        Some(resolution) => resolution.profile(),
        None => {
            diagnostics.error(&format!(
                "{}: unknown video resolution {}; using {} as fallback",
                operation, height, fallback
            ));
            fallback.profile()
        }
    }
}

/// `-b:v`, `-minrate`, `-maxrate` for the resolution class.
pub fn bitrate_fragments(resolution: u32, diagnostics: &dyn Diagnostics) -> [EncoderOption; 3] {
    let ladder = lookup(
        "bitrate_fragments",
        resolution,
        Resolution::LOW_FALLBACK,
        diagnostics,
    )
    .bitrate;

    [
        EncoderOption::Bitrate(ladder.target_kbps),
        EncoderOption::MinRate(ladder.min_kbps),
        EncoderOption::MaxRate(ladder.max_kbps),
    ]
}

/// `-crf` for the resolution class, shifted by the quality tier and clamped to 0..=63.
pub fn quality_fragments(
    resolution: u32,
    tier: QualityTier,
    diagnostics: &dyn Diagnostics,
) -> [EncoderOption; 1] {
    let base_crf = lookup(
        "quality_fragments",
        resolution,
        Resolution::LOW_FALLBACK,
        diagnostics,
    )
    .base_crf;

    [EncoderOption::Crf(tier.apply_crf_offset(base_crf))]
}

/// `-tile-columns` and `-threads` for the resolution class.
pub fn tiling_fragments(resolution: u32, diagnostics: &dyn Diagnostics) -> [EncoderOption; 2] {
    let tiling = lookup(
        "tiling_fragments",
        resolution,
        Resolution::TILING_FALLBACK,
        diagnostics,
    )
    .tiling;

    [
        EncoderOption::TileColumns(tiling.tile_columns),
        EncoderOption::Threads(tiling.threads),
    ]
}
