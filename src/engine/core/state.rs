use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

use super::log::Diagnostics;
use super::settings::{
    SettingName, SettingValue, SettingsBackend, SettingsSnapshot, parse_setting_uint,
};
use super::tiers::{DeadlineTier, ParseTierError, QualityTier};

pub const DEFAULT_KEY_FRAME_SPACING: u32 = 240;
pub const DEFAULT_FRAMERATE_CAP: u32 = 30;
pub const DEFAULT_IS_FRAMERATE_CAPPED: bool = true;

/// Latest known values of the user-configurable knobs.
///
/// One instance lives for the duration of a plugin activation. It is built
/// from persisted values and then only mutated by settings-change
/// notifications.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsStore {
    pub key_frame_spacing: u32,
    pub framerate_cap: u32,
    pub is_framerate_capped: bool,
    pub crf_quality: QualityTier,
    pub deadline: DeadlineTier,
}

impl Default for SettingsStore {
    fn default() -> Self {
        Self {
            key_frame_spacing: DEFAULT_KEY_FRAME_SPACING,
            framerate_cap: DEFAULT_FRAMERATE_CAP,
            is_framerate_capped: DEFAULT_IS_FRAMERATE_CAPPED,
            crf_quality: QualityTier::default(),
            deadline: DeadlineTier::default(),
        }
    }
}

impl SettingsStore {
    /// Build the store from persisted values.
    ///
    /// A field takes its persisted value when one is present and truthy,
    /// otherwise its default. Persisted values that cannot be read as the
    /// field's type also fall back to the default, with an error diagnostic.
    pub fn initialize(backend: &dyn SettingsBackend, diagnostics: &dyn Diagnostics) -> Self {
        let defaults = Self::default();
        let persisted = |name: SettingName| {
            backend
                .get_setting(name.key())
                .filter(SettingValue::is_truthy)
        };

        Self {
            key_frame_spacing: persisted(SettingName::KeyFrameSpacing)
                .map(|v| {
                    decode_uint(
                        SettingName::KeyFrameSpacing,
                        &v,
                        defaults.key_frame_spacing,
                        diagnostics,
                    )
                })
                .unwrap_or(defaults.key_frame_spacing),
            framerate_cap: persisted(SettingName::FramerateCap)
                .map(|v| {
                    decode_uint(
                        SettingName::FramerateCap,
                        &v,
                        defaults.framerate_cap,
                        diagnostics,
                    )
                })
                .unwrap_or(defaults.framerate_cap),
            is_framerate_capped: persisted(SettingName::IsFramerateCapped)
                .map(|v| decode_flag(&v))
                .unwrap_or(defaults.is_framerate_capped),
            crf_quality: persisted(SettingName::CrfQuality)
                .map(|v| {
                    decode_named(
                        SettingName::CrfQuality,
                        &v,
                        defaults.crf_quality,
                        diagnostics,
                    )
                })
                .unwrap_or(defaults.crf_quality),
            deadline: persisted(SettingName::Deadline)
                .map(|v| decode_named(SettingName::Deadline, &v, defaults.deadline, diagnostics))
                .unwrap_or(defaults.deadline),
        }
    }

    /// Overwrite every field from a settings-change snapshot.
    ///
    /// Integer fields are validated: a value that is not a non-negative
    /// integer is replaced by the field's default. Either way the resulting
    /// integer is written back through `backend` as a decimal string.
    pub fn apply_change(
        &mut self,
        snapshot: &SettingsSnapshot,
        backend: &mut dyn SettingsBackend,
        diagnostics: &dyn Diagnostics,
    ) {
        self.key_frame_spacing = apply_uint(
            SettingName::KeyFrameSpacing,
            DEFAULT_KEY_FRAME_SPACING,
            snapshot,
            backend,
            diagnostics,
        );
        self.framerate_cap = apply_uint(
            SettingName::FramerateCap,
            DEFAULT_FRAMERATE_CAP,
            snapshot,
            backend,
            diagnostics,
        );

        self.is_framerate_capped = snapshot
            .get(SettingName::IsFramerateCapped)
            .map(decode_flag)
            .unwrap_or(DEFAULT_IS_FRAMERATE_CAPPED);
        self.crf_quality = snapshot
            .get(SettingName::CrfQuality)
            .map(|v| decode_named(SettingName::CrfQuality, v, QualityTier::default(), diagnostics))
            .unwrap_or_default();
        self.deadline = snapshot
            .get(SettingName::Deadline)
            .map(|v| decode_named(SettingName::Deadline, v, DeadlineTier::default(), diagnostics))
            .unwrap_or_default();
    }

    /// Current values in the shape the host delivers them.
    pub fn snapshot(&self) -> SettingsSnapshot {
        SettingsSnapshot::new()
            .with(SettingName::KeyFrameSpacing, self.key_frame_spacing)
            .with(SettingName::FramerateCap, self.framerate_cap)
            .with(SettingName::IsFramerateCapped, self.is_framerate_capped)
            .with(SettingName::CrfQuality, self.crf_quality.as_str())
            .with(SettingName::Deadline, self.deadline.as_str())
    }
}

fn apply_uint(
    name: SettingName,
    default: u32,
    snapshot: &SettingsSnapshot,
    backend: &mut dyn SettingsBackend,
    diagnostics: &dyn Diagnostics,
) -> u32 {
    let raw = snapshot
        .get(name)
        .map(|v| v.to_string())
        .unwrap_or_default();

    let value = match parse_setting_uint(&raw) {
        Ok(value) => value,
        Err(_) => {
            diagnostics.error(&format!(
                "{} is not a positive integer({})! Setting it to {}",
                name,
                raw.trim(),
                default
            ));
            default
        }
    };

    if let Err(e) = backend.set_setting(name.key(), SettingValue::Text(value.to_string())) {
        diagnostics.error(&format!("Failed to persist {}: {:#}", name, e));
    }

    value
}

fn decode_uint(
    name: SettingName,
    value: &SettingValue,
    default: u32,
    diagnostics: &dyn Diagnostics,
) -> u32 {
    let raw = value.to_string();
    parse_setting_uint(&raw).unwrap_or_else(|_| {
        diagnostics.error(&format!(
            "{} is not a positive integer({})! Setting it to {}",
            name,
            raw.trim(),
            default
        ));
        default
    })
}

// "true"/"false" strings come from text-backed stores
fn decode_flag(value: &SettingValue) -> bool {
    match value {
        SettingValue::Text(s) => s.trim().parse::<bool>().unwrap_or_else(|_| value.is_truthy()),
        other => other.is_truthy(),
    }
}

fn decode_named<T>(
    name: SettingName,
    value: &SettingValue,
    default: T,
    diagnostics: &dyn Diagnostics,
) -> T
where
    T: FromStr<Err = ParseTierError> + Display + Copy,
{
    let parsed = match value {
        SettingValue::Text(s) => s.trim().parse::<T>(),
        other => other.to_string().parse::<T>(),
    };

    parsed.unwrap_or_else(|e| {
        diagnostics.error(&format!("{}: {}! Setting it to {}", name, e, default));
        default
    })
}
