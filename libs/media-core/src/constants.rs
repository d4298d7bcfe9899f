//! Delivery optimization constants

use crate::models::{BitrateRung, Codec, Container};

/// Candidate codecs ordered by compression efficiency, most efficient first
pub const CODEC_PRIORITY: &[Codec] = &[Codec::Av1, Codec::Hevc, Codec::Vp9, Codec::H264];

/// Candidate containers probed at startup
pub const CONTAINER_PRIORITY: &[Container] = &[Container::Mp4, Container::Webm];

/// Codec every client is assumed to decode
pub const FALLBACK_CODEC: Codec = Codec::H264;

/// Static rendition ladder, highest resolution first
pub const BITRATE_LADDER: &[BitrateRung] = &[
    BitrateRung {
        label: "1080p",
        width: 1920,
        height: 1080,
        bitrate_kbps: 5000,
    },
    BitrateRung {
        label: "720p",
        width: 1280,
        height: 720,
        bitrate_kbps: 2800,
    },
    BitrateRung {
        label: "480p",
        width: 854,
        height: 480,
        bitrate_kbps: 1400,
    },
    BitrateRung {
        label: "360p",
        width: 640,
        height: 360,
        bitrate_kbps: 800,
    },
    BitrateRung {
        label: "240p",
        width: 426,
        height: 240,
        bitrate_kbps: 400,
    },
];

/// Canonical mid-tier rung used as the manifest's default variant
pub const DEFAULT_VARIANT_LABEL: &str = "720p";

/// Target dimensions assumed when the caller does not constrain them
pub const DEFAULT_WIDTH: u32 = 1280;
pub const DEFAULT_HEIGHT: u32 = 720;

/// Frame rate assumed when the caller does not constrain it
pub const DEFAULT_FRAMERATE: f32 = 30.0;

/// Upper bound on scrubbing thumbnails per asset
pub const MAX_THUMBNAILS: u32 = 20;
