//! VP9 video-on-demand encoder parameter derivation.
//!
//! [`engine`] holds the resolution tables, quality tiers, settings store and
//! profile builder, plus the host-facing registry and plugin lifecycle.
//! [`config`] persists settings to a TOML file for the `vp9vod` binary.

pub mod cli;
pub mod config;
pub mod engine;
