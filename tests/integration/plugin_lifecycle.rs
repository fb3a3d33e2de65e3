// Activation against persisted config, event ordering, deactivation

use std::rc::Rc;
use std::sync::mpsc;
use vp9vod::config::{Config, ConfigFile};
use vp9vod::engine::{
    MemoryDiagnostics, PluginEvent, ProfileRegistry, QualityTier, SettingName, SettingValue,
    SettingsBackend, StreamKind, VideoJobOptions, Vp9VodPlugin, event_channel, run_event_loop,
};

use crate::common::helpers::*;

#[test]
fn test_activation_registers_profile_and_priorities() {
    let harness = activate_defaults();

    assert_eq!(
        harness.registry.profiles(),
        vec![(
            "libvpx-vp9".to_string(),
            "U2Be like VP9 transcoding".to_string()
        )]
    );
    assert_eq!(
        harness.registry.priority_of(StreamKind::Video, "libvpx-vp9"),
        Some(1000)
    );
    assert_eq!(
        harness.registry.priority_of(StreamKind::Audio, "libopus"),
        Some(1000)
    );
}

#[test]
fn test_deactivation_removes_everything() {
    let Harness {
        mut registry,
        plugin,
        diagnostics,
    } = activate_defaults();

    plugin.unregister(&mut registry);

    assert!(registry.is_empty());
    assert!(
        registry
            .build("libvpx-vp9", "U2Be like VP9 transcoding", &VideoJobOptions::new(720, 30.0))
            .is_none()
    );
    assert_eq!(diagnostics.infos().len(), 2);
}

#[test]
fn test_config_file_settings_survive_reactivation() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    let diagnostics = Rc::new(MemoryDiagnostics::new());

    let mut registry = ProfileRegistry::new();
    let mut plugin = Vp9VodPlugin::register(
        ConfigFile::open(&path).unwrap(),
        &mut registry,
        diagnostics.clone(),
    );

    plugin
        .backend_mut()
        .set_setting(SettingName::CrfQuality.key(), SettingValue::from("LOW"))
        .unwrap();
    let snapshot = plugin
        .settings()
        .snapshot()
        .with(SettingName::CrfQuality, "LOW")
        .with(SettingName::KeyFrameSpacing, "150");
    plugin.on_settings_change(&snapshot);
    plugin.unregister(&mut registry);

    let persisted = Config::load_from(&path).unwrap();
    assert_eq!(
        persisted.settings.get("keyFrameSpacing"),
        Some(&SettingValue::from("150"))
    );
    assert_eq!(
        persisted.settings.get("framerateCap"),
        Some(&SettingValue::from("30"))
    );

    let reactivated = Harness::activate(ConfigFile::open(&path).unwrap());
    let settings = reactivated.plugin.settings();
    assert_eq!(settings.key_frame_spacing, 150);
    assert_eq!(settings.crf_quality, QualityTier::Low);
    assert_eq!(reactivated.build(720, 30.0).crf(), Some(37));
    assert!(diagnostics.errors().is_empty());
}

#[test]
fn test_uncapped_frame_rate_survives_reactivation() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");

    let mut harness = Harness::activate(ConfigFile::open(&path).unwrap());
    harness
        .plugin
        .save_setting(SettingName::IsFramerateCapped, "false")
        .unwrap();
    assert_eq!(harness.build(720, 60.0).frame_rate(), Some(60.0));
    harness.plugin.unregister(&mut harness.registry);

    let reactivated = Harness::activate(ConfigFile::open(&path).unwrap());
    assert!(!reactivated.plugin.settings().is_framerate_capped);
    assert_eq!(reactivated.build(720, 60.0).frame_rate(), Some(60.0));
    assert!(reactivated.diagnostics.errors().is_empty());
}

#[test]
fn test_event_loop_applies_changes_before_later_builds() {
    let mut harness = activate_defaults();
    let (tx, rx) = event_channel();
    let (reply_tx, reply_rx) = mpsc::channel();
    let job = VideoJobOptions::new(2160, 30.0);

    let better = harness
        .plugin
        .settings()
        .snapshot()
        .with(SettingName::CrfQuality, "BETTER");
    let too_good = better.clone().with(SettingName::CrfQuality, "TOO_GOOD");

    for event in [
        PluginEvent::SettingsChanged(better),
        PluginEvent::Build {
            job,
            reply: reply_tx.clone(),
        },
        PluginEvent::SettingsChanged(too_good),
        PluginEvent::Build {
            job,
            reply: reply_tx.clone(),
        },
        PluginEvent::Shutdown,
    ] {
        tx.send(event).unwrap();
    }

    assert_eq!(run_event_loop(&mut harness.plugin, &rx), 2);
    assert_eq!(reply_rx.recv().unwrap().crf(), Some(5));
    assert_eq!(reply_rx.recv().unwrap().crf(), Some(0));
}
