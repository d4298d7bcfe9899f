/// Adaptive-bitrate manifest construction
///
/// Builds one variant per rung of the static bitrate ladder, top to bottom,
/// through the same provider dispatch as single-rendition delivery. Players
/// start from the canonical mid-tier rung when the ladder carries it.
use media_core::constants::{BITRATE_LADDER, DEFAULT_FRAMERATE, DEFAULT_VARIANT_LABEL};
use media_core::Codec;
use tracing::debug;

use crate::models::{AdaptiveManifest, ManifestFormat, ManifestVariant, RenditionSpec};
use crate::services::delivery::{build_delivery_url, DeliveryProvider};

/// Build the adaptive manifest for an asset.
///
/// The wire format follows the codec family: HLS for H.264, DASH for every
/// other codec.
pub fn build_adaptive_manifest(
    source: &str,
    codec: Codec,
    provider: DeliveryProvider,
) -> AdaptiveManifest {
    let variants: Vec<ManifestVariant> = BITRATE_LADDER
        .iter()
        .map(|rung| {
            let rendition = RenditionSpec {
                width: rung.width,
                height: rung.height,
                codec,
                container: codec.default_container(),
                bitrate_kbps: rung.bitrate_kbps,
                framerate: DEFAULT_FRAMERATE,
                start_seconds: None,
                end_seconds: None,
            };

            ManifestVariant {
                label: rung.label.to_string(),
                width: rung.width,
                height: rung.height,
                bitrate_kbps: rung.bitrate_kbps,
                url: build_delivery_url(source, &rendition, provider),
            }
        })
        .collect();

    let default_variant = variants
        .iter()
        .find(|variant| variant.label == DEFAULT_VARIANT_LABEL)
        .or_else(|| variants.first())
        .map(|variant| variant.label.clone())
        .unwrap_or_default();

    let format = if codec == Codec::H264 {
        ManifestFormat::Hls
    } else {
        ManifestFormat::Dash
    };

    debug!(
        provider = provider.as_str(),
        codec = codec.as_str(),
        format = format.as_str(),
        variants = variants.len(),
        "built adaptive manifest"
    );

    AdaptiveManifest {
        format,
        codec,
        default_variant,
        variants,
    }
}

impl AdaptiveManifest {
    /// Render an HLS master playlist over the ladder variants
    pub fn render_hls_master(&self) -> String {
        let mut playlist = String::from("#EXTM3U\n");
        playlist.push_str("#EXT-X-VERSION:3\n");

        for variant in &self.variants {
            let bandwidth = variant.bitrate_kbps * 1000;
            playlist.push_str(&format!(
                "#EXT-X-STREAM-INF:BANDWIDTH={},RESOLUTION={}x{},CODECS=\"{},mp4a.40.2\"\n",
                bandwidth,
                variant.width,
                variant.height,
                self.codec.rfc6381(),
            ));
            playlist.push_str(&format!("{}\n", variant.url));
        }

        playlist
    }
}
