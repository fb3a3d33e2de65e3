mod builder;
mod derive;
mod log;
mod resolution;
mod settings;
mod state;
mod tiers;
mod types;

pub use builder::{build_vod_profile, target_fps};
pub use derive::{bitrate_fragments, quality_fragments, tiling_fragments};
pub use log::{Diagnostics, Level, MemoryDiagnostics, TracingDiagnostics};
pub use resolution::{BitrateLadder, Resolution, ResolutionProfile, Tiling};
pub use settings::{
    MemorySettings, SettingName, SettingParseError, SettingValue, SettingsBackend,
    SettingsSnapshot, parse_setting_uint,
};
pub use state::{
    DEFAULT_FRAMERATE_CAP, DEFAULT_IS_FRAMERATE_CAPPED, DEFAULT_KEY_FRAME_SPACING, SettingsStore,
};
pub use tiers::{DeadlineTier, MAX_CRF, MIN_CRF, ParseTierError, QualityTier};
pub use types::{BuiltProfile, EncoderOption, VideoJobOptions};
