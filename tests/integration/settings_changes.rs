// Settings-change notifications: integer validation and write-back

use vp9vod::engine::{
    DeadlineTier, MemorySettings, QualityTier, SettingName, SettingValue, SettingsSnapshot,
    SettingsStore,
};

use crate::common::helpers::*;

fn change_key_frame_spacing(raw: &str) -> Harness<MemorySettings> {
    let mut harness = activate_defaults();
    let snapshot = harness
        .plugin
        .settings()
        .snapshot()
        .with(SettingName::KeyFrameSpacing, raw);
    harness.plugin.on_settings_change(&snapshot);
    harness
}

fn persisted(harness: &Harness<MemorySettings>, name: SettingName) -> Vec<SettingValue> {
    harness
        .plugin
        .backend()
        .writes()
        .iter()
        .filter(|(key, _)| key == name.key())
        .map(|(_, value)| value.clone())
        .collect()
}

#[test]
fn test_non_numeric_key_frame_spacing_resets_to_default() {
    let harness = change_key_frame_spacing("abc");

    assert_eq!(harness.plugin.settings().key_frame_spacing, 240);
    assert_eq!(
        persisted(&harness, SettingName::KeyFrameSpacing),
        vec![SettingValue::from("240")]
    );
    assert_eq!(
        harness.diagnostics.errors(),
        vec!["keyFrameSpacing is not a positive integer(abc)! Setting it to 240"]
    );
}

#[test]
fn test_negative_key_frame_spacing_resets_to_default() {
    let harness = change_key_frame_spacing("-5");

    assert_eq!(harness.plugin.settings().key_frame_spacing, 240);
    assert_eq!(
        persisted(&harness, SettingName::KeyFrameSpacing),
        vec![SettingValue::from("240")]
    );
    assert_eq!(harness.diagnostics.errors().len(), 1);
}

#[test]
fn test_valid_key_frame_spacing_is_stored_and_persisted() {
    let harness = change_key_frame_spacing("120");

    assert_eq!(harness.plugin.settings().key_frame_spacing, 120);
    assert_eq!(
        persisted(&harness, SettingName::KeyFrameSpacing),
        vec![SettingValue::from("120")]
    );
    assert!(harness.diagnostics.errors().is_empty());
    assert_eq!(harness.build(720, 30.0).to_strings()[2], "-g 120");
}

#[test]
fn test_padded_value_is_trimmed() {
    let harness = change_key_frame_spacing("  96\t");
    assert_eq!(harness.plugin.settings().key_frame_spacing, 96);
    assert_eq!(
        persisted(&harness, SettingName::KeyFrameSpacing),
        vec![SettingValue::from("96")]
    );
}

#[test]
fn test_invalid_framerate_cap_resets_to_30() {
    let mut harness = Harness::activate(
        MemorySettings::new().with(SettingName::FramerateCap, 60u32),
    );
    assert_eq!(harness.build(1080, 60.0).frame_rate(), Some(60.0));

    let snapshot = harness
        .plugin
        .settings()
        .snapshot()
        .with(SettingName::FramerateCap, "sixty");
    harness.plugin.on_settings_change(&snapshot);

    assert_eq!(harness.plugin.settings().framerate_cap, 30);
    assert_eq!(harness.build(1080, 60.0).frame_rate(), Some(30.0));
    assert_eq!(
        harness.diagnostics.errors(),
        vec!["framerateCap is not a positive integer(sixty)! Setting it to 30"]
    );
}

#[test]
fn test_change_overwrites_non_integer_fields_without_validation_errors() {
    let mut harness = activate_defaults();
    let snapshot = SettingsSnapshot::new()
        .with(SettingName::KeyFrameSpacing, 48u32)
        .with(SettingName::FramerateCap, 24u32)
        .with(SettingName::IsFramerateCapped, false)
        .with(SettingName::CrfQuality, "EVEN_LOWER")
        .with(SettingName::Deadline, "best");
    harness.plugin.on_settings_change(&snapshot);

    assert_eq!(
        harness.plugin.settings(),
        SettingsStore {
            key_frame_spacing: 48,
            framerate_cap: 24,
            is_framerate_capped: false,
            crf_quality: QualityTier::EvenLower,
            deadline: DeadlineTier::Best,
        }
    );
    assert!(harness.diagnostics.errors().is_empty());

    // Only the two integer fields are written back
    let written: Vec<&str> = harness
        .plugin
        .backend()
        .writes()
        .iter()
        .map(|(key, _)| key.as_str())
        .collect();
    assert_eq!(written, vec!["keyFrameSpacing", "framerateCap"]);
}

#[test]
fn test_snapshot_from_host_json() {
    let mut harness = activate_defaults();
    let snapshot: SettingsSnapshot = serde_json::from_str(
        r#"{
            "keyFrameSpacing": "300",
            "framerateCap": "25",
            "isFramerateCapped": true,
            "crfQuality": "TOO_GOOD",
            "deadline": "good"
        }"#,
    )
    .unwrap();
    harness.plugin.on_settings_change(&snapshot);

    let profile = harness.build(1080, 50.0);
    assert_eq!(
        options_line(&profile),
        "-r 25 -deadline good -g 300 -b:v 1800k -minrate 900k -maxrate 2610k -crf 11 -tile-columns 2 -threads 4"
    );
}
