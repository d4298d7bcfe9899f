//! Media Optimizer
//!
//! Adaptive media-delivery optimization engine. Given a source asset
//! reference and delivery constraints, resolves the most efficient encoding
//! the requesting client can play, builds provider-specific delivery URLs and
//! an adaptive-bitrate manifest, estimates compression savings, and coalesces
//! concurrent requests for the same logical asset so identical optimization
//! work never runs twice.
//!
//! Extracted from media-service as part of P2.1 service splitting.

pub mod config;
pub mod error;
pub mod metrics;
pub mod models;
pub mod services;

// Public re-exports
pub use config::OptimizerConfig;
pub use error::{AppError, Result};
pub use models::{
    AdaptiveManifest, EngineStats, ManifestFormat, ManifestVariant, OptimizationOptions,
    ProcessedResult, Quality,
};
pub use services::capability::{BaselineProbe, CapabilityRegistry, PlaybackProbe};
pub use services::delivery::DeliveryProvider;
pub use services::network::{NetworkMonitor, NetworkSignal};
pub use services::optimizer::MediaOptimizer;
