/// Data models for the media optimizer
///
/// This module defines structures for:
/// - OptimizationOptions: caller-supplied delivery constraints
/// - ProcessedResult: the engine's output for one logical asset
/// - AdaptiveManifest: bitrate-ladder manifest over the static rendition ladder
/// - EngineStats: read-only observability snapshot
use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};
use media_core::constants::MAX_THUMBNAILS;
use media_core::{Codec, Container, NetworkConditions, QualityLevel};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::services::delivery::DeliveryProvider;

// ========================================
// Request Models
// ========================================

/// Requested quality: a named preset or an explicit bitrate in kbps
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Quality {
    Preset(QualityLevel),
    BitrateKbps(u32),
}

impl Quality {
    pub fn bitrate_kbps(&self) -> u32 {
        match self {
            Self::Preset(level) => level.bitrate_kbps(),
            Self::BitrateKbps(kbps) => *kbps,
        }
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Preset(level) => write!(f, "{}", level.as_str()),
            Self::BitrateKbps(kbps) => write!(f, "{kbps}kbps"),
        }
    }
}

/// Delivery constraints for one optimization request.
///
/// Every field defaults independently when absent; resolution order lives in
/// the orchestrator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizationOptions {
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub quality: Option<Quality>,
    /// Target codec; absent means capability-ranked auto selection
    pub codec: Option<Codec>,
    pub container: Option<Container>,
    pub framerate: Option<f32>,
    /// Trim window start, in seconds from the beginning of the asset
    pub start_seconds: Option<f64>,
    /// Trim window end, in seconds from the beginning of the asset
    pub end_seconds: Option<f64>,
    pub muted: bool,
    pub autoplay: bool,
    /// Delivery provider; absent means inferred from the asset reference
    pub provider: Option<DeliveryProvider>,
    /// Generate an adaptive-bitrate manifest
    pub adaptive: bool,
    /// Generate scrubbing thumbnails
    pub thumbnails: bool,
    /// How many thumbnails; absent falls back to the configured default
    pub thumbnail_count: Option<u32>,
}

impl OptimizationOptions {
    /// Reject invalid options before any work begins
    pub fn validate(&self) -> Result<()> {
        if let Some(width) = self.width {
            if width <= 0 {
                return Err(AppError::Validation(format!(
                    "width must be positive, got {width}"
                )));
            }
        }

        if let Some(height) = self.height {
            if height <= 0 {
                return Err(AppError::Validation(format!(
                    "height must be positive, got {height}"
                )));
            }
        }

        if let Some(Quality::BitrateKbps(0)) = self.quality {
            return Err(AppError::Validation(
                "explicit bitrate must be positive".to_string(),
            ));
        }

        if let Some(framerate) = self.framerate {
            if framerate <= 0.0 {
                return Err(AppError::Validation(format!(
                    "framerate must be positive, got {framerate}"
                )));
            }
        }

        if let Some(start) = self.start_seconds {
            if start < 0.0 {
                return Err(AppError::Validation(format!(
                    "trim start must not be negative, got {start}"
                )));
            }
        }

        if let Some(end) = self.end_seconds {
            if end <= 0.0 {
                return Err(AppError::Validation(format!(
                    "trim end must be positive, got {end}"
                )));
            }
            if let Some(start) = self.start_seconds {
                if end <= start {
                    return Err(AppError::Validation(format!(
                        "trim window is empty: start {start} >= end {end}"
                    )));
                }
            }
        }

        if let Some(count) = self.thumbnail_count {
            if count == 0 || count > MAX_THUMBNAILS {
                return Err(AppError::Validation(format!(
                    "thumbnail count must be between 1 and {MAX_THUMBNAILS}, got {count}"
                )));
            }
        }

        Ok(())
    }

    /// Canonical cache key over the source and every option value.
    ///
    /// Two logically identical requests produce identical keys regardless of
    /// how the options were constructed; any differing option changes the
    /// key. Unset fields render as `auto` so that "absent" and "explicitly
    /// the default" are still distinguishable from each other.
    pub fn cache_key(&self, source: &str) -> String {
        fn opt<T: fmt::Display>(value: &Option<T>) -> String {
            value
                .as_ref()
                .map_or_else(|| "auto".to_string(), |v| v.to_string())
        }

        format!(
            "{source}|w={}|h={}|q={}|codec={}|container={}|fps={}|trim={}..{}|muted={}|autoplay={}|provider={}|adaptive={}|thumbs={}|count={}",
            opt(&self.width),
            opt(&self.height),
            opt(&self.quality),
            self.codec.map_or("auto", |c| c.as_str()),
            self.container.map_or("auto", |c| c.as_str()),
            opt(&self.framerate),
            opt(&self.start_seconds),
            opt(&self.end_seconds),
            self.muted,
            self.autoplay,
            self.provider.map_or("auto", |p| p.as_str()),
            self.adaptive,
            self.thumbnails,
            opt(&self.thumbnail_count),
        )
    }
}

// ========================================
// Delivery Specs
// ========================================

/// Fully resolved parameters for one delivery rendition
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenditionSpec {
    pub width: u32,
    pub height: u32,
    pub codec: Codec,
    pub container: Container,
    pub bitrate_kbps: u32,
    pub framerate: f32,
    pub start_seconds: Option<f64>,
    pub end_seconds: Option<f64>,
}

/// Parameters for a poster frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PosterSpec {
    pub width: u32,
    pub height: u32,
    pub time_offset_seconds: f64,
}

// ========================================
// Result Models
// ========================================

/// Wire format of an adaptive manifest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ManifestFormat {
    Hls,
    Dash,
}

impl ManifestFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hls => "hls",
            Self::Dash => "dash",
        }
    }
}

/// One variant stream in an adaptive manifest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestVariant {
    pub label: String,
    pub width: u32,
    pub height: u32,
    pub bitrate_kbps: u32,
    pub url: String,
}

/// Bitrate-ladder manifest for adaptive delivery
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdaptiveManifest {
    pub format: ManifestFormat,
    pub codec: Codec,
    /// Label of the variant players should start from
    pub default_variant: String,
    /// Ladder variants, highest resolution first
    pub variants: Vec<ManifestVariant>,
}

/// The engine's output for one optimization request.
///
/// Immutable once produced; identified by `cache_key`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedResult {
    pub source: String,
    pub provider: DeliveryProvider,
    pub cache_key: String,
    pub delivery_url: String,
    pub poster_url: String,
    pub thumbnail_urls: Vec<String>,
    pub manifest: Option<AdaptiveManifest>,
    pub codec: Codec,
    pub container: Container,
    pub bitrate_kbps: u32,
    pub framerate: f32,
    pub duration_seconds: f64,
    pub estimated_size_mb: f64,
    /// Fraction saved versus the unoptimized baseline
    pub compression_ratio: f64,
    pub muted: bool,
    pub autoplay: bool,
    pub processed_at: DateTime<Utc>,
}

// ========================================
// Observability
// ========================================

/// Read-only engine snapshot
#[derive(Debug, Clone, Serialize)]
pub struct EngineStats {
    pub cache_size: usize,
    pub in_flight: usize,
    /// Computations started since engine construction
    pub computations: u64,
    /// Codec name -> number of cached results using it
    pub codec_distribution: HashMap<String, usize>,
    pub average_compression_ratio: f64,
    /// Capability table snapshot (codec/container name -> playable)
    pub capabilities: HashMap<String, bool>,
    pub network: NetworkConditions,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_options_share_a_key() {
        let a = OptimizationOptions {
            width: Some(1280),
            height: Some(720),
            quality: Some(Quality::Preset(QualityLevel::Medium)),
            ..Default::default()
        };
        let b = OptimizationOptions {
            width: Some(1280),
            height: Some(720),
            quality: Some(Quality::Preset(QualityLevel::Medium)),
            ..Default::default()
        };

        assert_eq!(
            a.cache_key("https://videodelivery.net/abc123"),
            b.cache_key("https://videodelivery.net/abc123")
        );
    }

    #[test]
    fn test_any_option_difference_changes_the_key() {
        let base = OptimizationOptions {
            width: Some(1280),
            ..Default::default()
        };
        let source = "https://videodelivery.net/abc123";

        let wider = OptimizationOptions {
            width: Some(1920),
            ..base.clone()
        };
        assert_ne!(base.cache_key(source), wider.cache_key(source));

        let muted = OptimizationOptions {
            muted: true,
            ..base.clone()
        };
        assert_ne!(base.cache_key(source), muted.cache_key(source));

        let adaptive = OptimizationOptions {
            adaptive: true,
            ..base.clone()
        };
        assert_ne!(base.cache_key(source), adaptive.cache_key(source));

        // Same options, different source
        assert_ne!(
            base.cache_key(source),
            base.cache_key("https://videodelivery.net/def456")
        );
    }

    #[test]
    fn test_validate_rejects_bad_dimensions() {
        let negative = OptimizationOptions {
            width: Some(-1280),
            ..Default::default()
        };
        assert!(matches!(
            negative.validate(),
            Err(AppError::Validation(_))
        ));

        let zero = OptimizationOptions {
            height: Some(0),
            ..Default::default()
        };
        assert!(zero.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_trim_window() {
        let inverted = OptimizationOptions {
            start_seconds: Some(20.0),
            end_seconds: Some(10.0),
            ..Default::default()
        };
        assert!(inverted.validate().is_err());

        let valid = OptimizationOptions {
            start_seconds: Some(5.0),
            end_seconds: Some(25.0),
            ..Default::default()
        };
        assert!(valid.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_thumbnail_count_out_of_range() {
        let zero = OptimizationOptions {
            thumbnails: true,
            thumbnail_count: Some(0),
            ..Default::default()
        };
        assert!(zero.validate().is_err());

        let huge = OptimizationOptions {
            thumbnails: true,
            thumbnail_count: Some(MAX_THUMBNAILS + 1),
            ..Default::default()
        };
        assert!(huge.validate().is_err());
    }

    #[test]
    fn test_quality_deserializes_from_preset_or_number() {
        let preset: Quality = serde_json::from_str("\"medium\"").unwrap();
        assert_eq!(preset, Quality::Preset(QualityLevel::Medium));
        assert_eq!(preset.bitrate_kbps(), 2500);

        let explicit: Quality = serde_json::from_str("3200").unwrap();
        assert_eq!(explicit, Quality::BitrateKbps(3200));
        assert_eq!(explicit.bitrate_kbps(), 3200);
    }

    #[test]
    fn test_options_deserialize_with_defaults() {
        let options: OptimizationOptions =
            serde_json::from_str(r#"{"width":1280,"quality":"high"}"#).unwrap();

        assert_eq!(options.width, Some(1280));
        assert_eq!(options.quality, Some(Quality::Preset(QualityLevel::High)));
        assert_eq!(options.height, None);
        assert!(!options.adaptive);
        assert!(!options.muted);
    }
}
