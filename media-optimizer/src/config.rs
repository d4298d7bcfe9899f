/// Configuration for the media optimizer
///
/// Loads configuration from environment variables with sensible defaults.
use media_core::constants::DEFAULT_FRAMERATE;

#[derive(Clone, Debug)]
pub struct OptimizerConfig {
    /// Frame rate assumed when the caller does not constrain it
    pub default_framerate: f32,
    /// Duration assumed for size estimation when the source's true duration
    /// is unknown and no trim window narrows it
    pub default_duration_seconds: f64,
    /// Scrubbing thumbnails generated when the caller asks for thumbnails
    /// without giving a count
    pub default_thumbnail_count: u32,
    /// Bitrate assumed for the unoptimized source when reporting savings
    pub baseline_bitrate_kbps: u32,
    /// Result-cache bound. `None` leaves the cache unbounded and
    /// caller-managed via `clear_cache`; `Some(n)` evicts the oldest result
    /// before inserting beyond `n` entries.
    pub cache_capacity: Option<usize>,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            default_framerate: DEFAULT_FRAMERATE,
            default_duration_seconds: 60.0,
            default_thumbnail_count: 4,
            baseline_bitrate_kbps: 8000,
            cache_capacity: None,
        }
    }
}

impl OptimizerConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            default_framerate: std::env::var("MEDIA_OPT_DEFAULT_FRAMERATE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.default_framerate),
            default_duration_seconds: std::env::var("MEDIA_OPT_DEFAULT_DURATION_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.default_duration_seconds),
            default_thumbnail_count: std::env::var("MEDIA_OPT_DEFAULT_THUMBNAIL_COUNT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.default_thumbnail_count),
            baseline_bitrate_kbps: std::env::var("MEDIA_OPT_BASELINE_BITRATE_KBPS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.baseline_bitrate_kbps),
            cache_capacity: std::env::var("MEDIA_OPT_CACHE_CAPACITY")
                .ok()
                .and_then(|v| v.parse().ok()),
        }
    }
}
