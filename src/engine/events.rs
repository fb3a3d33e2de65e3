// Sequential host event loop for an active plugin

use std::sync::mpsc::{self, Receiver, Sender};

use super::core::{BuiltProfile, SettingsBackend, SettingsSnapshot, VideoJobOptions};
use super::plugin::Vp9VodPlugin;

/// Message from the host to the plugin
#[derive(Debug)]
pub enum PluginEvent {
    /// Full settings snapshot after any setting changed
    SettingsChanged(SettingsSnapshot),

    /// Build the VOD profile for one job and send it back on `reply`
    Build {
        job: VideoJobOptions,
        reply: Sender<BuiltProfile>,
    },

    /// Stop processing events
    Shutdown,
}

pub fn event_channel() -> (Sender<PluginEvent>, Receiver<PluginEvent>) {
    mpsc::channel()
}

/// Process events in arrival order until `Shutdown` or every sender is dropped.
///
/// Returns the number of builds served.
pub fn run_event_loop<B: SettingsBackend>(
    plugin: &mut Vp9VodPlugin<B>,
    events: &Receiver<PluginEvent>,
) -> usize {
    let mut served = 0;

    while let Ok(event) = events.recv() {
        match event {
            PluginEvent::SettingsChanged(snapshot) => {
                tracing::debug!("Applying settings change");
                plugin.on_settings_change(&snapshot);
            }
            PluginEvent::Build { job, reply } => {
                let profile = plugin.build(&job);
                served += 1;
                // Requester may have gone away; nothing to do then
                let _ = reply.send(profile);
            }
            PluginEvent::Shutdown => break,
        }
    }

    served
}
