use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

use super::tiers::DeadlineTier;

/// Per-job video metadata handed over by the host.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VideoJobOptions {
    /// Pixel height class (144, 240, ..., 2160)
    pub resolution: u32,
    pub fps: f64,
}

impl VideoJobOptions {
    pub fn new(resolution: u32, fps: f64) -> Self {
        Self { resolution, fps }
    }
}

/// A single encoder output option (flag plus value).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EncoderOption {
    FrameRate(f64),
    Deadline(DeadlineTier),
    KeyFrameSpacing(u32),
    Bitrate(u32),
    MinRate(u32),
    MaxRate(u32),
    Crf(u8),
    TileColumns(u8),
    Threads(u8),
}

impl EncoderOption {
    pub const fn flag(&self) -> &'static str {
        match self {
            EncoderOption::FrameRate(_) => "-r",
            EncoderOption::Deadline(_) => "-deadline",
            EncoderOption::KeyFrameSpacing(_) => "-g",
            EncoderOption::Bitrate(_) => "-b:v",
            EncoderOption::MinRate(_) => "-minrate",
            EncoderOption::MaxRate(_) => "-maxrate",
            EncoderOption::Crf(_) => "-crf",
            EncoderOption::TileColumns(_) => "-tile-columns",
            EncoderOption::Threads(_) => "-threads",
        }
    }

    pub fn value(&self) -> String {
        match self {
            EncoderOption::FrameRate(fps) => fps.to_string(),
            EncoderOption::Deadline(deadline) => deadline.to_string(),
            EncoderOption::KeyFrameSpacing(frames) => frames.to_string(),
            EncoderOption::Bitrate(kbps)
            | EncoderOption::MinRate(kbps)
            | EncoderOption::MaxRate(kbps) => format!("{}k", kbps),
            EncoderOption::Crf(v) | EncoderOption::TileColumns(v) | EncoderOption::Threads(v) => {
                v.to_string()
            }
        }
    }

    /// Flag and value as separate argv entries.
    pub fn args(&self) -> [String; 2] {
        [self.flag().to_string(), self.value()]
    }
}

impl fmt::Display for EncoderOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.flag(), self.value())
    }
}

impl Serialize for EncoderOption {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// The VOD encoding profile handed back to the host for one job.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuiltProfile {
    pub output_options: Vec<EncoderOption>,
}

impl BuiltProfile {
    /// One `"-flag value"` string per option, in order.
    pub fn to_strings(&self) -> Vec<String> {
        self.output_options.iter().map(|o| o.to_string()).collect()
    }

    /// Flattened argv suitable for `Command::args`.
    pub fn args(&self) -> Vec<String> {
        self.output_options.iter().flat_map(|o| o.args()).collect()
    }

    /// Frame rate the profile targets, if present.
    pub fn frame_rate(&self) -> Option<f64> {
        self.output_options.iter().find_map(|o| match o {
            EncoderOption::FrameRate(fps) => Some(*fps),
            _ => None,
        })
    }

    pub fn crf(&self) -> Option<u8> {
        self.output_options.iter().find_map(|o| match o {
            EncoderOption::Crf(crf) => Some(*crf),
            _ => None,
        })
    }
}
