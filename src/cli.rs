use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::engine::{QualityTier, SettingName};

#[derive(Parser)]
#[command(name = "vp9vod")]
#[command(about = "VP9 video-on-demand encoder option derivation", long_about = None)]
pub struct Cli {
    /// Config file holding persisted settings (defaults to the user config dir)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Derive the VOD encoder options for one video
    Build {
        /// Pixel height class (144, 240, 360, 480, 720, 1080, 1440, 2160)
        #[arg(long, short)]
        resolution: u32,

        /// Source frame rate
        #[arg(long, short)]
        fps: f64,

        /// Print the profile as JSON instead of one option per line
        #[arg(long)]
        json: bool,
    },

    /// Show the effective settings
    Settings,

    /// Change one setting, as the host's settings page would
    Set {
        /// Setting name (keyFrameSpacing, framerateCap, isFramerateCapped, crfQuality, deadline)
        name: SettingName,

        /// New raw value
        value: String,
    },

    /// Print the resolution tuning table
    Table {
        /// Quality tier applied to the base CRF column
        #[arg(long, default_value = "DEFAULT")]
        quality: QualityTier,
    },

    /// Create a default config file if missing
    InitConfig,
}

pub fn parse() -> Cli {
    Cli::parse()
}
