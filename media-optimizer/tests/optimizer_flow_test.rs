//! End-to-end engine flows
//!
//! Exercises the public surface the way calling code uses it: optimize,
//! re-optimize, coalesce concurrent requests, batch, clear, inspect stats.

use std::sync::Arc;

use media_core::{Codec, QualityLevel};
use media_optimizer::{DeliveryProvider, MediaOptimizer, OptimizationOptions, Quality};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("media_optimizer=debug")
        .with_test_writer()
        .try_init();
}

fn medium_720p() -> OptimizationOptions {
    OptimizationOptions {
        width: Some(1280),
        height: Some(720),
        quality: Some(Quality::Preset(QualityLevel::Medium)),
        ..Default::default()
    }
}

#[tokio::test]
async fn concurrent_requests_share_one_computation() {
    init_tracing();
    let engine = MediaOptimizer::default();
    let source = "https://videodelivery.net/abc123";

    let (a, b) = tokio::join!(
        engine.process(source, medium_720p()),
        engine.process(source, medium_720p()),
    );
    let (a, b) = (a.unwrap(), b.unwrap());

    assert_eq!(a, b);
    assert_eq!(a.provider, DeliveryProvider::CloudflareStream);

    // The chosen codec is one the capability table carries (or the safe
    // fallback, which the baseline probe reports as playable)
    let stats = engine.stats().await;
    assert_eq!(stats.capabilities.get(a.codec.as_str()), Some(&true));
    assert_eq!(stats.cache_size, 1);
    assert_eq!(stats.computations, 1);
}

#[tokio::test]
async fn repeated_requests_reuse_the_cached_result() {
    init_tracing();
    let engine = MediaOptimizer::default();
    let source = "https://videodelivery.net/abc123";

    let first = engine.process(source, medium_720p()).await.unwrap();
    for _ in 0..5 {
        let again = engine.process(source, medium_720p()).await.unwrap();
        assert!(Arc::ptr_eq(&first, &again));
    }

    let stats = engine.stats().await;
    assert_eq!(stats.computations, 1);
    assert_eq!(stats.cache_size, 1);
}

#[tokio::test]
async fn clear_cache_recomputes_without_touching_capabilities() {
    init_tracing();
    let engine = MediaOptimizer::default();
    let source = "https://videodelivery.net/abc123";

    engine.process(source, medium_720p()).await.unwrap();
    let capabilities_before = engine.stats().await.capabilities;

    engine.clear_cache();
    engine.process(source, medium_720p()).await.unwrap();

    let stats = engine.stats().await;
    assert_eq!(stats.computations, 2);
    assert_eq!(stats.capabilities, capabilities_before);
}

#[tokio::test]
async fn unrecognized_sources_degrade_to_pass_through() {
    init_tracing();
    let engine = MediaOptimizer::default();
    let source = "https://static.example.org/uploads/raw-capture.mp4";

    let result = engine.process(source, medium_720p()).await.unwrap();

    assert_eq!(result.provider, DeliveryProvider::Unknown);
    assert_eq!(result.delivery_url, source);
    assert_eq!(result.poster_url, source);
}

#[tokio::test]
async fn full_feature_request_builds_every_artifact() {
    init_tracing();
    let engine = MediaOptimizer::default();
    let source = "https://videodelivery.net/abc123";

    let result = engine
        .process(
            source,
            OptimizationOptions {
                adaptive: true,
                thumbnails: true,
                thumbnail_count: Some(4),
                muted: true,
                autoplay: true,
                ..medium_720p()
            },
        )
        .await
        .unwrap();

    assert!(result.delivery_url.starts_with(source));
    assert!(result.poster_url.contains("poster"));
    assert!(result.muted);
    assert!(result.autoplay);

    let thumbs = &result.thumbnail_urls;
    assert_eq!(thumbs.len(), 4);
    assert!(thumbs[0].contains("time=0%"));
    assert!(thumbs[1].contains("time=25%"));
    assert!(thumbs[2].contains("time=50%"));
    assert!(thumbs[3].contains("time=75%"));

    let manifest = result.manifest.as_ref().expect("manifest requested");
    assert_eq!(manifest.default_variant, "720p");
    assert!(manifest.variants.len() >= 3);
    assert!(manifest
        .render_hls_master()
        .contains("#EXT-X-STREAM-INF"));
}

#[tokio::test]
async fn batch_runs_concurrently_and_preserves_order() {
    init_tracing();
    let engine = MediaOptimizer::default();

    let sources: Vec<String> = (0..8)
        .map(|i| format!("https://videodelivery.net/asset-{i}"))
        .collect();

    let results = engine
        .process_batch(
            sources
                .iter()
                .map(|s| (s.clone(), medium_720p()))
                .collect(),
        )
        .await
        .unwrap();

    assert_eq!(results.len(), sources.len());
    for (result, source) in results.iter().zip(&sources) {
        assert_eq!(&result.source, source);
    }

    let stats = engine.stats().await;
    assert_eq!(stats.cache_size, sources.len());
}

#[tokio::test]
async fn options_parse_from_caller_json() {
    init_tracing();
    let engine = MediaOptimizer::default();

    let options: OptimizationOptions = serde_json::from_str(
        r#"{
            "width": 1280,
            "height": 720,
            "quality": "medium",
            "codec": "h264",
            "adaptive": true
        }"#,
    )
    .unwrap();

    let result = engine
        .process("https://videodelivery.net/abc123", options)
        .await
        .unwrap();

    assert_eq!(result.codec, Codec::H264);
    assert_eq!(result.bitrate_kbps, 2500);
    assert!(result.manifest.is_some());
}
