/// Size and compression estimation
///
/// Purely arithmetic model predicting output size from duration, bitrate and
/// codec efficiency. No I/O, fully deterministic; used both for savings
/// reporting and for size comparisons that must not hit the network.
use media_core::Codec;
use tracing::debug;

/// Predicted output size in megabytes.
///
/// `bitrate_kbps * duration / 8000` gives the raw stream size; the codec's
/// efficiency factor scales it against the H.264 baseline. Monotonically
/// non-decreasing in bitrate and duration for a fixed codec.
pub fn estimate_size_mb(
    width: u32,
    height: u32,
    duration_seconds: f64,
    codec: Codec,
    bitrate_kbps: u32,
) -> f64 {
    let raw_mb = bitrate_kbps as f64 * duration_seconds / 8000.0;
    let estimated = raw_mb * codec.efficiency_factor();

    debug!(
        width,
        height,
        codec = codec.as_str(),
        bitrate_kbps,
        "estimated size {estimated:.2} MB"
    );

    estimated
}

/// Fraction saved versus the original size, 0 when the original is empty
pub fn compression_ratio(original_mb: f64, optimized_mb: f64) -> f64 {
    if original_mb <= 0.0 {
        return 0.0;
    }

    (original_mb - optimized_mb) / original_mb
}
