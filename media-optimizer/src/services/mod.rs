/// Engine services
///
/// This module provides the optimization engine's components:
/// - Capability detection (codec/container playability probing)
/// - Network quality monitoring (signal merging, preset recommendation)
/// - Delivery URL and manifest building (provider-dispatched)
/// - Size and compression estimation
/// - The optimization orchestrator (caching, request coalescing)
pub mod capability;
pub mod delivery;
pub mod estimator;
pub mod network;
pub mod optimizer;

// Re-export commonly used types
pub use capability::{BaselineProbe, CapabilityRegistry, PlaybackProbe};
pub use delivery::DeliveryProvider;
pub use network::{NetworkMonitor, NetworkSignal};
pub use optimizer::MediaOptimizer;
