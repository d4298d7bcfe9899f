/// Optimization orchestrator
///
/// The stateful coordinator of the engine. Owns the result cache and the
/// in-flight computation map, and funnels every mutation for a given cache
/// key through `process` so that check-then-act (cached? in flight? else
/// compute) is atomic per key. Identical concurrent requests share one
/// underlying computation; a finished computation serves every later request
/// from the cache without recomputing.
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use dashmap::DashMap;
use futures::future::{self, BoxFuture, FutureExt, Shared};
use media_core::constants::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::config::OptimizerConfig;
use crate::error::{AppError, Result};
use crate::metrics;
use crate::models::{
    EngineStats, OptimizationOptions, PosterSpec, ProcessedResult, Quality, RenditionSpec,
};
use crate::services::capability::{BaselineProbe, CapabilityRegistry, PlaybackProbe};
use crate::services::delivery::{self, DeliveryProvider};
use crate::services::estimator;
use crate::services::network::NetworkMonitor;

/// Handle shared between every caller coalesced onto one computation
type SharedComputation = Shared<BoxFuture<'static, Result<Arc<ProcessedResult>>>>;

/// Adaptive media-delivery optimization engine
pub struct MediaOptimizer {
    config: OptimizerConfig,
    capabilities: Arc<CapabilityRegistry>,
    network: Arc<NetworkMonitor>,
    cache: Arc<DashMap<String, Arc<ProcessedResult>>>,
    in_flight: Arc<Mutex<HashMap<String, SharedComputation>>>,
    computations: Arc<AtomicU64>,
}

impl MediaOptimizer {
    /// Create an engine with the baseline playback probe
    pub fn new(config: OptimizerConfig) -> Self {
        Self::with_probe(config, Arc::new(BaselineProbe))
    }

    /// Create an engine with an injected playback probe.
    ///
    /// Capability detection runs once here; every engine instance owns its
    /// own capability table and network state, so tests can construct
    /// independent engines.
    pub fn with_probe(config: OptimizerConfig, probe: Arc<dyn PlaybackProbe>) -> Self {
        info!(
            cache_capacity = ?config.cache_capacity,
            baseline_bitrate_kbps = config.baseline_bitrate_kbps,
            "Initializing media optimizer"
        );

        Self {
            config,
            capabilities: Arc::new(CapabilityRegistry::new(probe)),
            network: Arc::new(NetworkMonitor::new()),
            cache: Arc::new(DashMap::new()),
            in_flight: Arc::new(Mutex::new(HashMap::new())),
            computations: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Network monitor, for feeding environment change notifications
    pub fn network(&self) -> &NetworkMonitor {
        &self.network
    }

    /// Capability registry populated at construction
    pub fn capabilities(&self) -> &CapabilityRegistry {
        &self.capabilities
    }

    /// Optimize one asset.
    ///
    /// At most one computation runs per cache key: a cached result is
    /// returned immediately, an in-flight computation is joined, and only an
    /// unseen key starts new work. The computation runs on the runtime and
    /// completes even if every caller drops its handle, so late waiters and
    /// future requests still find the cached result.
    pub async fn process(
        &self,
        source: &str,
        options: OptimizationOptions,
    ) -> Result<Arc<ProcessedResult>> {
        options.validate()?;

        let key = options.cache_key(source);

        if let Some(hit) = self.cache.get(&key) {
            metrics::CACHE_HIT.inc();
            debug!(key = %key, "result cache hit");
            return Ok(hit.value().clone());
        }
        metrics::CACHE_MISS.inc();

        let computation = {
            let mut in_flight = self.in_flight.lock().await;

            // The computation may have finished while we waited for the lock
            if let Some(hit) = self.cache.get(&key) {
                return Ok(hit.value().clone());
            }

            if let Some(pending) = in_flight.get(&key) {
                metrics::COALESCED.inc();
                debug!(key = %key, "joining in-flight computation");
                pending.clone()
            } else {
                debug!(key = %key, "starting computation");
                let computation =
                    self.spawn_computation(source.to_string(), options, key.clone());
                in_flight.insert(key, computation.clone());
                computation
            }
        };

        computation.await
    }

    /// Optimize a batch concurrently.
    ///
    /// Output order matches input order; the first failure is surfaced and
    /// failed entries leave nothing behind in the cache.
    pub async fn process_batch(
        &self,
        requests: Vec<(String, OptimizationOptions)>,
    ) -> Result<Vec<Arc<ProcessedResult>>> {
        future::try_join_all(
            requests
                .into_iter()
                .map(|(source, options)| async move { self.process(&source, options).await }),
        )
        .await
    }

    /// Empty the result cache.
    ///
    /// Capability and network state are untouched; previously cached keys
    /// recompute on their next request.
    pub fn clear_cache(&self) {
        let count = self.cache.len();
        self.cache.clear();
        info!(cleared = count, "result cache cleared");
    }

    /// Read-only engine snapshot
    pub async fn stats(&self) -> EngineStats {
        let mut codec_distribution: HashMap<String, usize> = HashMap::new();
        let mut ratio_sum = 0.0;

        for entry in self.cache.iter() {
            *codec_distribution
                .entry(entry.codec.as_str().to_string())
                .or_insert(0) += 1;
            ratio_sum += entry.compression_ratio;
        }

        let cache_size = self.cache.len();
        let average_compression_ratio = if cache_size == 0 {
            0.0
        } else {
            ratio_sum / cache_size as f64
        };

        EngineStats {
            cache_size,
            in_flight: self.in_flight.lock().await.len(),
            computations: self.computations.load(Ordering::Relaxed),
            codec_distribution,
            average_compression_ratio,
            capabilities: self.capabilities.snapshot(),
            network: self.network.conditions(),
        }
    }

    /// Spawn one computation and wrap it for sharing.
    ///
    /// The in-flight entry is removed inside the task after the result lands,
    /// success or failure, so a retried key always starts clean and a failed
    /// computation never poisons the cache.
    fn spawn_computation(
        &self,
        source: String,
        options: OptimizationOptions,
        key: String,
    ) -> SharedComputation {
        let config = self.config.clone();
        let capabilities = self.capabilities.clone();
        let network = self.network.clone();
        let cache = self.cache.clone();
        let in_flight = self.in_flight.clone();
        let computations = self.computations.clone();

        let handle = tokio::spawn(async move {
            computations.fetch_add(1, Ordering::Relaxed);

            let result = compute_result(&config, &capabilities, &network, &source, &options, &key);

            let outcome = match result {
                Ok(processed) => {
                    let processed = Arc::new(processed);
                    if let Some(capacity) = config.cache_capacity {
                        enforce_capacity(&cache, capacity);
                    }
                    cache.insert(key.clone(), processed.clone());
                    debug!(key = %key, "optimization cached");
                    Ok(processed)
                }
                Err(err) => {
                    metrics::COMPUTE_FAILURE.inc();
                    warn!(key = %key, error = %err, "optimization failed");
                    Err(err)
                }
            };

            // Cleared after the cache insert so no concurrent request can
            // slip between the two and start a duplicate computation
            in_flight.lock().await.remove(&key);

            outcome
        });

        async move {
            match handle.await {
                Ok(outcome) => outcome,
                Err(err) => Err(AppError::Internal(format!(
                    "optimization task failed: {err}"
                ))),
            }
        }
        .boxed()
        .shared()
    }
}

impl Default for MediaOptimizer {
    fn default() -> Self {
        Self::new(OptimizerConfig::default())
    }
}

/// Resolve options and assemble the result for one request
fn compute_result(
    config: &OptimizerConfig,
    capabilities: &CapabilityRegistry,
    network: &NetworkMonitor,
    source: &str,
    options: &OptimizationOptions,
    key: &str,
) -> Result<ProcessedResult> {
    let provider = options
        .provider
        .unwrap_or_else(|| DeliveryProvider::from_source(source));

    let codec = match options.codec {
        Some(explicit) => explicit,
        None => capabilities.preferred_codec(),
    };
    let container = options
        .container
        .unwrap_or_else(|| codec.default_container());

    let quality = match options.quality {
        Some(explicit) => explicit,
        None => Quality::Preset(network.recommended_quality()),
    };
    let bitrate_kbps = quality.bitrate_kbps();

    let width = options.width.map_or(DEFAULT_WIDTH, |w| w as u32);
    let height = options.height.map_or(DEFAULT_HEIGHT, |h| h as u32);
    let framerate = options.framerate.unwrap_or(config.default_framerate);

    let duration_seconds = match (options.start_seconds, options.end_seconds) {
        (Some(start), Some(end)) => end - start,
        _ => config.default_duration_seconds,
    };

    let rendition = RenditionSpec {
        width,
        height,
        codec,
        container,
        bitrate_kbps,
        framerate,
        start_seconds: options.start_seconds,
        end_seconds: options.end_seconds,
    };

    let delivery_url = delivery::build_delivery_url(source, &rendition, provider);
    let poster_url = delivery::build_poster(
        source,
        &PosterSpec {
            width,
            height,
            time_offset_seconds: options.start_seconds.unwrap_or(0.0),
        },
        provider,
    );

    let thumbnail_urls = if options.thumbnails {
        let count = options
            .thumbnail_count
            .unwrap_or(config.default_thumbnail_count);
        delivery::build_thumbnails(source, count, provider)
    } else {
        Vec::new()
    };

    let manifest = options
        .adaptive
        .then(|| delivery::build_adaptive_manifest(source, codec, provider));

    let estimated_size_mb =
        estimator::estimate_size_mb(width, height, duration_seconds, codec, bitrate_kbps);
    let baseline_size_mb = estimator::estimate_size_mb(
        width,
        height,
        duration_seconds,
        media_core::constants::FALLBACK_CODEC,
        config.baseline_bitrate_kbps,
    );
    let compression_ratio = estimator::compression_ratio(baseline_size_mb, estimated_size_mb);

    Ok(ProcessedResult {
        source: source.to_string(),
        provider,
        cache_key: key.to_string(),
        delivery_url,
        poster_url,
        thumbnail_urls,
        manifest,
        codec,
        container,
        bitrate_kbps,
        framerate,
        duration_seconds,
        estimated_size_mb,
        compression_ratio,
        muted: options.muted,
        autoplay: options.autoplay,
        processed_at: Utc::now(),
    })
}

/// Evict oldest results until one slot is free
fn enforce_capacity(cache: &DashMap<String, Arc<ProcessedResult>>, capacity: usize) {
    while cache.len() >= capacity.max(1) {
        let oldest = cache
            .iter()
            .min_by_key(|entry| entry.value().processed_at)
            .map(|entry| entry.key().clone());

        match oldest {
            Some(key) => {
                cache.remove(&key);
                warn!(key = %key, "result cache at capacity, evicted oldest entry");
            }
            None => break,
        }
    }
}
