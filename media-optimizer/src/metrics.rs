//! Prometheus metrics for the optimization engine

use lazy_static::lazy_static;
use prometheus::{register_int_counter, IntCounter};

lazy_static! {
    /// Result-cache hit counter
    pub static ref CACHE_HIT: IntCounter = register_int_counter!(
        "media_optimizer_cache_hit_total",
        "Total number of result cache hits"
    )
    .expect("Failed to register media_optimizer_cache_hit_total");

    /// Result-cache miss counter
    pub static ref CACHE_MISS: IntCounter = register_int_counter!(
        "media_optimizer_cache_miss_total",
        "Total number of result cache misses"
    )
    .expect("Failed to register media_optimizer_cache_miss_total");

    /// Requests that joined an already-running computation
    pub static ref COALESCED: IntCounter = register_int_counter!(
        "media_optimizer_coalesced_total",
        "Total number of requests coalesced onto an in-flight computation"
    )
    .expect("Failed to register media_optimizer_coalesced_total");

    /// Failed optimization computations
    pub static ref COMPUTE_FAILURE: IntCounter = register_int_counter!(
        "media_optimizer_compute_failure_total",
        "Total number of failed optimization computations"
    )
    .expect("Failed to register media_optimizer_compute_failure_total");
}
