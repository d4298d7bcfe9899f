//! Media delivery core models and types
//!
//! Shared vocabulary for the media-optimizer engine: codecs, containers,
//! quality presets, the bitrate ladder, and network-condition types.

pub mod constants;
pub mod models;

pub use models::*;
