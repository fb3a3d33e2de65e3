// VP9 VOD parameter engine - independent of the CLI

pub mod core;
pub mod events;
pub mod plugin;
pub mod registry;

pub use self::core::*;
pub use events::{PluginEvent, event_channel, run_event_loop};
pub use plugin::{
    AUDIO_ENCODER, ENCODER_PRIORITY, PROFILE_NAME, ProfileIdentity, VIDEO_ENCODER, Vp9VodPlugin,
};
pub use registry::{EncoderPriority, ProfileRegistry, StreamKind, TranscodingRegistry, VodBuilder};
