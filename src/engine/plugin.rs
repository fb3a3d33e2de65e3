//! VP9 VOD plugin lifecycle: activation, settings changes, deactivation.

use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::Rc;

use super::core::{
    BuiltProfile, Diagnostics, SettingName, SettingValue, SettingsBackend, SettingsSnapshot,
    SettingsStore, VideoJobOptions, build_vod_profile,
};
use super::registry::{StreamKind, TranscodingRegistry};

pub const VIDEO_ENCODER: &str = "libvpx-vp9";
pub const AUDIO_ENCODER: &str = "libopus";
pub const PROFILE_NAME: &str = "U2Be like VP9 transcoding";
pub const ENCODER_PRIORITY: i32 = 1000;

fn default_encoder() -> String {
    VIDEO_ENCODER.to_string()
}
fn default_audio_encoder() -> String {
    AUDIO_ENCODER.to_string()
}
fn default_profile_name() -> String {
    PROFILE_NAME.to_string()
}
fn default_priority() -> i32 {
    ENCODER_PRIORITY
}

/// Names and priority under which the profile is registered with the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileIdentity {
    #[serde(default = "default_encoder")]
    pub encoder: String,

    #[serde(default = "default_audio_encoder")]
    pub audio_encoder: String,

    #[serde(default = "default_profile_name")]
    pub name: String,

    #[serde(default = "default_priority")]
    pub priority: i32,
}

impl Default for ProfileIdentity {
    fn default() -> Self {
        Self {
            encoder: default_encoder(),
            audio_encoder: default_audio_encoder(),
            name: default_profile_name(),
            priority: default_priority(),
        }
    }
}

/// An active plugin registration.
///
/// Owns the settings store for the lifetime of the activation. The builder
/// handed to the host shares the same store, so a build always sees every
/// settings change applied before it.
pub struct Vp9VodPlugin<B: SettingsBackend> {
    store: Rc<RefCell<SettingsStore>>,
    backend: B,
    diagnostics: Rc<dyn Diagnostics>,
    identity: ProfileIdentity,
}

impl<B: SettingsBackend> Vp9VodPlugin<B> {
    /// Activate with the default encoder names and priority.
    pub fn register(
        backend: B,
        registry: &mut dyn TranscodingRegistry,
        diagnostics: Rc<dyn Diagnostics>,
    ) -> Self {
        Self::register_with(ProfileIdentity::default(), backend, registry, diagnostics)
    }

    pub fn register_with(
        identity: ProfileIdentity,
        backend: B,
        registry: &mut dyn TranscodingRegistry,
        diagnostics: Rc<dyn Diagnostics>,
    ) -> Self {
        diagnostics.info(&format!("Registering {} profile '{}'", identity.encoder, identity.name));

        let store = Rc::new(RefCell::new(SettingsStore::initialize(
            &backend,
            diagnostics.as_ref(),
        )));

        let builder_store = Rc::clone(&store);
        let builder_diagnostics = Rc::clone(&diagnostics);
        registry.add_vod_profile(
            &identity.encoder,
            &identity.name,
            Box::new(move |job: &VideoJobOptions| {
                build_vod_profile(job, &builder_store.borrow(), builder_diagnostics.as_ref())
            }),
        );
        registry.add_vod_encoder_priority(StreamKind::Video, &identity.encoder, identity.priority);
        registry.add_vod_encoder_priority(
            StreamKind::Audio,
            &identity.audio_encoder,
            identity.priority,
        );

        Self {
            store,
            backend,
            diagnostics,
            identity,
        }
    }

    /// Host settings-change notification.
    pub fn on_settings_change(&mut self, snapshot: &SettingsSnapshot) {
        self.store.borrow_mut().apply_change(
            snapshot,
            &mut self.backend,
            self.diagnostics.as_ref(),
        );
    }

    /// Persist a raw user-entered value, then apply the resulting snapshot.
    ///
    /// The value is stored as text: a stored boolean `false` is falsy and would
    /// be ignored on the next activation.
    pub fn save_setting(&mut self, name: SettingName, raw: &str) -> anyhow::Result<()> {
        let value = SettingValue::from(raw);
        self.backend.set_setting(name.key(), value.clone())?;

        let snapshot = self.settings().snapshot().with(name, value);
        self.on_settings_change(&snapshot);
        Ok(())
    }

    /// Same result the registered builder produces.
    pub fn build(&self, job: &VideoJobOptions) -> BuiltProfile {
        build_vod_profile(job, &self.store.borrow(), self.diagnostics.as_ref())
    }

    pub fn settings(&self) -> SettingsStore {
        self.store.borrow().clone()
    }

    pub fn identity(&self) -> &ProfileIdentity {
        &self.identity
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Deactivate, removing everything registered with the host.
    pub fn unregister(self, registry: &mut dyn TranscodingRegistry) -> B {
        self.diagnostics.info(&format!(
            "Unregistering {} profile '{}'",
            self.identity.encoder, self.identity.name
        ));
        registry.remove_all_profiles_and_encoder_priorities();
        self.backend
    }
}
