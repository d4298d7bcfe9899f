/// Delivery URL construction
///
/// Translates an (asset, rendition, provider) triple into provider-specific
/// delivery URLs. Each supported provider has its own query/path dialect; a
/// source that matches no known provider passes through unchanged, because
/// graceful degradation to the original URL is part of the contract. URL
/// building is pure string assembly; no network calls are made here.
pub mod manifest;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::models::{PosterSpec, RenditionSpec};

pub use manifest::build_adaptive_manifest;

/// Delivery provider, inferred from the asset reference or set explicitly
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeliveryProvider {
    CloudflareStream,
    BunnyStream,
    Unknown,
}

impl DeliveryProvider {
    /// Parse provider from string
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "cloudflare-stream" | "cloudflare" | "cf" => Self::CloudflareStream,
            "bunny-stream" | "bunny" => Self::BunnyStream,
            _ => Self::Unknown,
        }
    }

    /// Get provider name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CloudflareStream => "cloudflare-stream",
            Self::BunnyStream => "bunny-stream",
            Self::Unknown => "unknown",
        }
    }

    /// Infer the provider from the asset reference's host.
    ///
    /// References that are not URLs, or whose host matches no known provider,
    /// are `Unknown` and handled by pass-through.
    pub fn from_source(source: &str) -> Self {
        let Ok(parsed) = Url::parse(source) else {
            return Self::Unknown;
        };

        match parsed.host_str() {
            Some(host)
                if host.ends_with("videodelivery.net")
                    || host.ends_with("cloudflarestream.com") =>
            {
                Self::CloudflareStream
            }
            Some(host)
                if host.ends_with("mediadelivery.net") || host.ends_with("b-cdn.net") =>
            {
                Self::BunnyStream
            }
            _ => Self::Unknown,
        }
    }
}

/// Build the delivery URL for one rendition.
///
/// Unknown providers return the source unchanged.
pub fn build_delivery_url(
    source: &str,
    rendition: &RenditionSpec,
    provider: DeliveryProvider,
) -> String {
    let base = source.trim_end_matches('/');

    match provider {
        DeliveryProvider::CloudflareStream => {
            let mut url = format!(
                "{base}/{}x{}/video.{}?br={}&fps={}",
                rendition.width,
                rendition.height,
                rendition.container.as_str(),
                rendition.bitrate_kbps,
                rendition.framerate,
            );
            if let Some(start) = rendition.start_seconds {
                url.push_str(&format!("&start={start}"));
            }
            if let Some(end) = rendition.end_seconds {
                url.push_str(&format!("&end={end}"));
            }
            url
        }
        DeliveryProvider::BunnyStream => {
            let mut url = format!(
                "{base}/play?width={}&height={}&bitrate={}&fps={}",
                rendition.width, rendition.height, rendition.bitrate_kbps, rendition.framerate,
            );
            if let Some(start) = rendition.start_seconds {
                url.push_str(&format!("&start={start}"));
            }
            if let Some(end) = rendition.end_seconds {
                url.push_str(&format!("&end={end}"));
            }
            url
        }
        DeliveryProvider::Unknown => source.to_string(),
    }
}

/// Build the poster-frame URL for an asset.
///
/// Unknown providers return the source unchanged.
pub fn build_poster(source: &str, poster: &PosterSpec, provider: DeliveryProvider) -> String {
    let base = source.trim_end_matches('/');

    match provider {
        DeliveryProvider::CloudflareStream => format!(
            "{base}/poster/{}x{}.jpg?time={}s",
            poster.width, poster.height, poster.time_offset_seconds,
        ),
        DeliveryProvider::BunnyStream => format!(
            "{base}/thumbnail.jpg?width={}&height={}&time={}",
            poster.width, poster.height, poster.time_offset_seconds,
        ),
        DeliveryProvider::Unknown => source.to_string(),
    }
}

/// Build `count` scrubbing thumbnails, evenly spaced across the asset.
///
/// Offsets are percentages (`i / count`), not absolute timestamps, so they
/// stay valid without knowing the true duration. Unknown providers yield the
/// unmodified source for every slot.
pub fn build_thumbnails(source: &str, count: u32, provider: DeliveryProvider) -> Vec<String> {
    let base = source.trim_end_matches('/');

    (0..count)
        .map(|i| {
            let percent = i as f64 / count as f64 * 100.0;
            match provider {
                DeliveryProvider::CloudflareStream => {
                    format!("{base}/thumbnails/thumbnail.jpg?time={percent:.0}%")
                }
                DeliveryProvider::BunnyStream => {
                    format!("{base}/thumbnail.jpg?time={percent:.0}%")
                }
                DeliveryProvider::Unknown => source.to_string(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use media_core::{Codec, Container};

    fn test_rendition() -> RenditionSpec {
        RenditionSpec {
            width: 1280,
            height: 720,
            codec: Codec::H264,
            container: Container::Mp4,
            bitrate_kbps: 2500,
            framerate: 30.0,
            start_seconds: None,
            end_seconds: None,
        }
    }

    #[test]
    fn test_provider_detection() {
        assert_eq!(
            DeliveryProvider::from_source("https://videodelivery.net/abc123"),
            DeliveryProvider::CloudflareStream
        );
        assert_eq!(
            DeliveryProvider::from_source("https://customer-x.cloudflarestream.com/abc123"),
            DeliveryProvider::CloudflareStream
        );
        assert_eq!(
            DeliveryProvider::from_source("https://vz-1234.b-cdn.net/clip"),
            DeliveryProvider::BunnyStream
        );
        assert_eq!(
            DeliveryProvider::from_source("https://example.com/video.mp4"),
            DeliveryProvider::Unknown
        );
        assert_eq!(
            DeliveryProvider::from_source("not a url at all"),
            DeliveryProvider::Unknown
        );
    }

    #[test]
    fn test_provider_parsing() {
        assert_eq!(
            DeliveryProvider::from_str("cloudflare"),
            DeliveryProvider::CloudflareStream
        );
        assert_eq!(
            DeliveryProvider::from_str("bunny"),
            DeliveryProvider::BunnyStream
        );
        assert_eq!(
            DeliveryProvider::from_str("akamai"),
            DeliveryProvider::Unknown
        );
    }

    #[test]
    fn test_cloudflare_dialect() {
        let url = build_delivery_url(
            "https://videodelivery.net/abc123",
            &test_rendition(),
            DeliveryProvider::CloudflareStream,
        );

        assert_eq!(
            url,
            "https://videodelivery.net/abc123/1280x720/video.mp4?br=2500&fps=30"
        );
    }

    #[test]
    fn test_cloudflare_dialect_with_trim_window() {
        let rendition = RenditionSpec {
            start_seconds: Some(5.0),
            end_seconds: Some(25.5),
            ..test_rendition()
        };
        let url = build_delivery_url(
            "https://videodelivery.net/abc123",
            &rendition,
            DeliveryProvider::CloudflareStream,
        );

        assert!(url.contains("&start=5"));
        assert!(url.contains("&end=25.5"));
    }

    #[test]
    fn test_bunny_dialect() {
        let url = build_delivery_url(
            "https://vz-1234.b-cdn.net/clip",
            &test_rendition(),
            DeliveryProvider::BunnyStream,
        );

        assert_eq!(
            url,
            "https://vz-1234.b-cdn.net/clip/play?width=1280&height=720&bitrate=2500&fps=30"
        );
    }

    #[test]
    fn test_unknown_source_passes_through_unchanged() {
        let source = "https://example.com/raw/video.mp4";
        let url = build_delivery_url(source, &test_rendition(), DeliveryProvider::Unknown);
        assert_eq!(url, source);

        let poster = build_poster(
            source,
            &PosterSpec {
                width: 1280,
                height: 720,
                time_offset_seconds: 0.0,
            },
            DeliveryProvider::Unknown,
        );
        assert_eq!(poster, source);
    }

    #[test]
    fn test_poster_url() {
        let poster = build_poster(
            "https://videodelivery.net/abc123",
            &PosterSpec {
                width: 1280,
                height: 720,
                time_offset_seconds: 2.5,
            },
            DeliveryProvider::CloudflareStream,
        );

        assert_eq!(
            poster,
            "https://videodelivery.net/abc123/poster/1280x720.jpg?time=2.5s"
        );
    }

    #[test]
    fn test_thumbnails_evenly_spaced_percentages() {
        let thumbs = build_thumbnails(
            "https://videodelivery.net/abc123",
            4,
            DeliveryProvider::CloudflareStream,
        );

        assert_eq!(thumbs.len(), 4);
        assert!(thumbs[0].contains("time=0%"));
        assert!(thumbs[1].contains("time=25%"));
        assert!(thumbs[2].contains("time=50%"));
        assert!(thumbs[3].contains("time=75%"));
    }

    #[test]
    fn test_thumbnails_for_unknown_provider_keep_count() {
        let source = "https://example.com/video.mp4";
        let thumbs = build_thumbnails(source, 3, DeliveryProvider::Unknown);

        assert_eq!(thumbs.len(), 3);
        assert!(thumbs.iter().all(|t| t == source));
    }
}
