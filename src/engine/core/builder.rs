//! Composes derived options and the current settings into a VOD profile.

use super::derive::{bitrate_fragments, quality_fragments, tiling_fragments};
use super::log::Diagnostics;
use super::state::SettingsStore;
use super::types::{BuiltProfile, EncoderOption, VideoJobOptions};

/// Output frame rate: the source rate, capped when the store says so.
pub fn target_fps(source_fps: f64, store: &SettingsStore) -> f64 {
    if store.is_framerate_capped {
        source_fps.min(f64::from(store.framerate_cap))
    } else {
        source_fps
    }
}

/// Build the ordered option list for one job.
///
/// Groups are always emitted as: frame rate, deadline, key-frame spacing,
/// bitrate triple, CRF, tiling.
pub fn build_vod_profile(
    job: &VideoJobOptions,
    store: &SettingsStore,
    diagnostics: &dyn Diagnostics,
) -> BuiltProfile {
    let mut output_options = Vec::with_capacity(9);

    output_options.push(EncoderOption::FrameRate(target_fps(job.fps, store)));
    output_options.push(EncoderOption::Deadline(store.deadline));
    output_options.push(EncoderOption::KeyFrameSpacing(store.key_frame_spacing));
    output_options.extend(bitrate_fragments(job.resolution, diagnostics));
    output_options.extend(quality_fragments(
        job.resolution,
        store.crf_quality,
        diagnostics,
    ));
    output_options.extend(tiling_fragments(job.resolution, diagnostics));

    BuiltProfile { output_options }
}
