//! Core delivery-optimization data models

use serde::{Deserialize, Serialize};

/// Video codec supported by the delivery pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Codec {
    Av1,
    Hevc,
    Vp9,
    H264,
}

impl Codec {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Av1 => "av1",
            Self::Hevc => "hevc",
            Self::Vp9 => "vp9",
            Self::H264 => "h264",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "av1" => Some(Self::Av1),
            "hevc" | "h265" => Some(Self::Hevc),
            "vp9" => Some(Self::Vp9),
            "h264" | "avc" => Some(Self::H264),
            _ => None,
        }
    }

    /// Relative output-size multiplier against the H.264 baseline (1.0).
    /// A lower factor means the codec packs the same quality into fewer bytes.
    pub fn efficiency_factor(&self) -> f64 {
        match self {
            Self::Av1 => 0.55,
            Self::Hevc => 0.65,
            Self::Vp9 => 0.75,
            Self::H264 => 1.0,
        }
    }

    /// RFC 6381 codec string for manifest declarations
    pub fn rfc6381(&self) -> &'static str {
        match self {
            Self::Av1 => "av01.0.08M.08",
            Self::Hevc => "hvc1.1.6.L120.90",
            Self::Vp9 => "vp09.00.40.08",
            Self::H264 => "avc1.42001E",
        }
    }

    /// Container conventionally paired with this codec
    pub fn default_container(&self) -> Container {
        match self {
            Self::Vp9 => Container::Webm,
            Self::Av1 | Self::Hevc | Self::H264 => Container::Mp4,
        }
    }
}

/// Media container format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Container {
    Mp4,
    Webm,
}

impl Container {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mp4 => "mp4",
            Self::Webm => "webm",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "mp4" => Some(Self::Mp4),
            "webm" => Some(Self::Webm),
            _ => None,
        }
    }
}

/// Effective connection class reported by the runtime environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectiveConnectionType {
    #[serde(rename = "slow-2g")]
    Slow2g,
    #[serde(rename = "2g")]
    G2,
    #[serde(rename = "3g")]
    G3,
    #[serde(rename = "4g")]
    G4,
}

impl EffectiveConnectionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Slow2g => "slow-2g",
            Self::G2 => "2g",
            Self::G3 => "3g",
            Self::G4 => "4g",
        }
    }
}

/// Snapshot of the network signals used for quality selection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NetworkConditions {
    pub effective_type: EffectiveConnectionType,
    /// Estimated downlink bandwidth in Mbps
    pub downlink_mbps: f64,
    /// Estimated round-trip time in milliseconds
    pub rtt_ms: u32,
}

impl Default for NetworkConditions {
    /// Conservative mid-range assumption used until real signals arrive
    fn default() -> Self {
        Self {
            effective_type: EffectiveConnectionType::G4,
            downlink_mbps: 3.0,
            rtt_ms: 150,
        }
    }
}

/// Named quality preset mapping to a fixed bitrate / compression-target pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityLevel {
    Ultra,
    High,
    Medium,
    Low,
    Mobile,
}

impl QualityLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ultra => "ultra",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
            Self::Mobile => "mobile",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "ultra" => Some(Self::Ultra),
            "high" => Some(Self::High),
            "medium" => Some(Self::Medium),
            "low" => Some(Self::Low),
            "mobile" => Some(Self::Mobile),
            _ => None,
        }
    }

    /// Target video bitrate for this preset in kbps
    pub fn bitrate_kbps(&self) -> u32 {
        match self {
            Self::Ultra => 8000,
            Self::High => 5000,
            Self::Medium => 2500,
            Self::Low => 1200,
            Self::Mobile => 600,
        }
    }

    /// Fraction of the source size the encoder should aim to retain
    pub fn compression_target(&self) -> f64 {
        match self {
            Self::Ultra => 0.9,
            Self::High => 0.75,
            Self::Medium => 0.6,
            Self::Low => 0.45,
            Self::Mobile => 0.3,
        }
    }

    /// Map network conditions to a preset.
    ///
    /// Thresholds are checked most-restrictive-first; the first match wins.
    /// Pure function of its input so it can be tested against synthetic
    /// condition vectors.
    pub fn for_conditions(conditions: &NetworkConditions) -> Self {
        let NetworkConditions {
            effective_type,
            downlink_mbps,
            rtt_ms,
        } = *conditions;

        if matches!(
            effective_type,
            EffectiveConnectionType::Slow2g | EffectiveConnectionType::G2
        ) || downlink_mbps < 0.5
        {
            Self::Mobile
        } else if effective_type == EffectiveConnectionType::G3
            || downlink_mbps < 1.5
            || rtt_ms > 600
        {
            Self::Low
        } else if downlink_mbps < 4.0 || rtt_ms > 300 {
            Self::Medium
        } else if downlink_mbps < 8.0 {
            Self::High
        } else {
            Self::Ultra
        }
    }
}

/// One rung of the static bitrate ladder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BitrateRung {
    pub label: &'static str,
    pub width: u32,
    pub height: u32,
    pub bitrate_kbps: u32,
}
