//! Persisted setting values and the host persistence interface.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A raw setting value as the persistence layer returns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl SettingValue {
    /// Loose truthiness: `false`, zero, NaN and the empty string are falsy.
    pub fn is_truthy(&self) -> bool {
        match self {
            SettingValue::Bool(b) => *b,
            SettingValue::Int(i) => *i != 0,
            SettingValue::Float(f) => *f != 0.0 && !f.is_nan(),
            SettingValue::Text(s) => !s.is_empty(),
        }
    }
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingValue::Bool(b) => write!(f, "{}", b),
            SettingValue::Int(i) => write!(f, "{}", i),
            SettingValue::Float(v) => write!(f, "{}", v),
            SettingValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<bool> for SettingValue {
    fn from(value: bool) -> Self {
        SettingValue::Bool(value)
    }
}

impl From<i64> for SettingValue {
    fn from(value: i64) -> Self {
        SettingValue::Int(value)
    }
}

impl From<u32> for SettingValue {
    fn from(value: u32) -> Self {
        SettingValue::Int(i64::from(value))
    }
}

impl From<f64> for SettingValue {
    fn from(value: f64) -> Self {
        SettingValue::Float(value)
    }
}

impl From<&str> for SettingValue {
    fn from(value: &str) -> Self {
        SettingValue::Text(value.to_string())
    }
}

impl From<String> for SettingValue {
    fn from(value: String) -> Self {
        SettingValue::Text(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingParseError {
    #[error("unknown setting '{0}'")]
    UnknownSetting(String),

    #[error("'{0}' is not an integer")]
    NotAnInteger(String),

    #[error("'{0}' is negative")]
    Negative(String),

    #[error("'{0}' is too large")]
    OutOfRange(String),
}

/// The five user-configurable knobs, keyed by their persisted names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingName {
    KeyFrameSpacing,
    FramerateCap,
    IsFramerateCapped,
    CrfQuality,
    Deadline,
}

impl SettingName {
    pub const ALL: [SettingName; 5] = [
        SettingName::KeyFrameSpacing,
        SettingName::FramerateCap,
        SettingName::IsFramerateCapped,
        SettingName::CrfQuality,
        SettingName::Deadline,
    ];

    pub const fn key(self) -> &'static str {
        match self {
            SettingName::KeyFrameSpacing => "keyFrameSpacing",
            SettingName::FramerateCap => "framerateCap",
            SettingName::IsFramerateCapped => "isFramerateCapped",
            SettingName::CrfQuality => "crfQuality",
            SettingName::Deadline => "deadline",
        }
    }
}

impl fmt::Display for SettingName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for SettingName {
    type Err = SettingParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SettingName::ALL
            .into_iter()
            .find(|name| name.key() == s)
            .ok_or_else(|| SettingParseError::UnknownSetting(s.to_string()))
    }
}

/// Parse a non-negative integer setting.
///
/// Only leading decimal digits are read: whitespace is trimmed and trailing
/// non-digit characters are ignored, so `" 120 "` and `"24fps"` both parse and
/// `"0x10"` reads as zero. `"-0"` is accepted as zero.
pub fn parse_setting_uint(raw: &str) -> Result<u32, SettingParseError> {
    let trimmed = raw.trim();
    let (negative, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    let end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    let digits = &unsigned[..end];

    if digits.is_empty() {
        return Err(SettingParseError::NotAnInteger(trimmed.to_string()));
    }
    if negative && digits.bytes().any(|b| b != b'0') {
        return Err(SettingParseError::Negative(trimmed.to_string()));
    }

    digits
        .parse::<u32>()
        .map_err(|_| SettingParseError::OutOfRange(trimmed.to_string()))
}

/// Host settings persistence.
pub trait SettingsBackend {
    fn get_setting(&self, name: &str) -> Option<SettingValue>;
    fn set_setting(&mut self, name: &str, value: SettingValue) -> Result<()>;
}

/// HashMap-backed persistence that also records every write.
#[derive(Debug, Clone, Default)]
pub struct MemorySettings {
    values: HashMap<String, SettingValue>,
    writes: Vec<(String, SettingValue)>,
}

impl MemorySettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: SettingName, value: impl Into<SettingValue>) -> Self {
        self.values.insert(name.key().to_string(), value.into());
        self
    }

    /// Writes made through `set_setting`, oldest first.
    pub fn writes(&self) -> &[(String, SettingValue)] {
        &self.writes
    }
}

impl SettingsBackend for MemorySettings {
    fn get_setting(&self, name: &str) -> Option<SettingValue> {
        self.values.get(name).cloned()
    }

    fn set_setting(&mut self, name: &str, value: SettingValue) -> Result<()> {
        self.writes.push((name.to_string(), value.clone()));
        self.values.insert(name.to_string(), value);
        Ok(())
    }
}

/// Full settings object delivered with a change notification.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SettingsSnapshot {
    values: BTreeMap<String, Option<SettingValue>>,
}

impl SettingsSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: SettingName, value: impl Into<SettingValue>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: SettingName, value: impl Into<SettingValue>) {
        self.values
            .insert(name.key().to_string(), Some(value.into()));
    }

    pub fn remove(&mut self, name: SettingName) {
        self.values.remove(name.key());
    }

    pub fn get(&self, name: SettingName) -> Option<&SettingValue> {
        self.values.get(name.key()).and_then(Option::as_ref)
    }
}
