//! Host profile registry.
//!
//! `TranscodingRegistry` is the surface a transcoding host exposes for
//! registering VOD profiles and encoder priorities. `ProfileRegistry` is the
//! in-process implementation used by the CLI.

use std::fmt;

use super::core::{BuiltProfile, VideoJobOptions};

/// Builder the host calls once per transcoding job.
pub type VodBuilder = Box<dyn Fn(&VideoJobOptions) -> BuiltProfile>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StreamKind {
    Video,
    Audio,
}

impl fmt::Display for StreamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamKind::Video => write!(f, "video"),
            StreamKind::Audio => write!(f, "audio"),
        }
    }
}

pub trait TranscodingRegistry {
    fn add_vod_profile(&mut self, encoder: &str, profile_name: &str, builder: VodBuilder);
    fn add_vod_encoder_priority(&mut self, stream: StreamKind, encoder: &str, priority: i32);
    fn remove_all_profiles_and_encoder_priorities(&mut self);
}

struct RegisteredProfile {
    encoder: String,
    name: String,
    builder: VodBuilder,
}

impl fmt::Debug for RegisteredProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisteredProfile")
            .field("encoder", &self.encoder)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncoderPriority {
    pub stream: StreamKind,
    pub encoder: String,
    pub priority: i32,
}

#[derive(Debug, Default)]
pub struct ProfileRegistry {
    profiles: Vec<RegisteredProfile>,
    priorities: Vec<EncoderPriority>,
}

impl ProfileRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// `(encoder, profile name)` pairs in registration order.
    pub fn profiles(&self) -> Vec<(String, String)> {
        self.profiles
            .iter()
            .map(|p| (p.encoder.clone(), p.name.clone()))
            .collect()
    }

    pub fn priorities(&self) -> &[EncoderPriority] {
        &self.priorities
    }

    pub fn priority_of(&self, stream: StreamKind, encoder: &str) -> Option<i32> {
        self.priorities
            .iter()
            .find(|p| p.stream == stream && p.encoder == encoder)
            .map(|p| p.priority)
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty() && self.priorities.is_empty()
    }

    /// Run the builder registered under `encoder` / `profile_name`.
    pub fn build(
        &self,
        encoder: &str,
        profile_name: &str,
        job: &VideoJobOptions,
    ) -> Option<BuiltProfile> {
        self.profiles
            .iter()
            .find(|p| p.encoder == encoder && p.name == profile_name)
            .map(|p| (p.builder)(job))
    }
}

impl TranscodingRegistry for ProfileRegistry {
    fn add_vod_profile(&mut self, encoder: &str, profile_name: &str, builder: VodBuilder) {
        // Same encoder + name replaces the earlier builder
        self.profiles
            .retain(|p| !(p.encoder == encoder && p.name == profile_name));
        self.profiles.push(RegisteredProfile {
            encoder: encoder.to_string(),
            name: profile_name.to_string(),
            builder,
        });
    }

    fn add_vod_encoder_priority(&mut self, stream: StreamKind, encoder: &str, priority: i32) {
        self.priorities
            .retain(|p| !(p.stream == stream && p.encoder == encoder));
        self.priorities.push(EncoderPriority {
            stream,
            encoder: encoder.to_string(),
            priority,
        });
    }

    fn remove_all_profiles_and_encoder_priorities(&mut self) {
        self.profiles.clear();
        self.priorities.clear();
    }
}
