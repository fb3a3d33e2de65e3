#![allow(dead_code)]

use std::rc::Rc;
use vp9vod::engine::{
    BuiltProfile, MemoryDiagnostics, MemorySettings, PROFILE_NAME, ProfileRegistry,
    SettingsBackend, VIDEO_ENCODER, VideoJobOptions, Vp9VodPlugin,
};

/// A registered plugin plus the host-side pieces tests inspect.
pub struct Harness<B: SettingsBackend> {
    pub registry: ProfileRegistry,
    pub plugin: Vp9VodPlugin<B>,
    pub diagnostics: Rc<MemoryDiagnostics>,
}

impl<B: SettingsBackend> Harness<B> {
    pub fn activate(backend: B) -> Self {
        let mut registry = ProfileRegistry::new();
        let diagnostics = Rc::new(MemoryDiagnostics::new());
        let plugin = Vp9VodPlugin::register(backend, &mut registry, diagnostics.clone());
        Self {
            registry,
            plugin,
            diagnostics,
        }
    }

    /// Build through the builder registered with the host.
    pub fn build(&self, resolution: u32, fps: f64) -> BuiltProfile {
        self.registry
            .build(VIDEO_ENCODER, PROFILE_NAME, &VideoJobOptions::new(resolution, fps))
            .expect("VOD profile should be registered")
    }
}

pub fn activate_defaults() -> Harness<MemorySettings> {
    Harness::activate(MemorySettings::new())
}

/// Render a profile the way it would appear on an ffmpeg command line.
pub fn options_line(profile: &BuiltProfile) -> String {
    profile.to_strings().join(" ")
}
