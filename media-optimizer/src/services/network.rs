/// Network quality monitoring
///
/// Holds the engine's view of current network conditions and maps them to a
/// quality preset. Updates arrive asynchronously from environment change
/// notifications and merge field-by-field, so partial signals never clobber
/// values they did not carry. Updates only influence quality resolution for
/// computations that have not yet read the conditions.
use std::sync::RwLock;

use media_core::{EffectiveConnectionType, NetworkConditions, QualityLevel};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Partial network-condition update; absent fields are retained
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkSignal {
    pub effective_type: Option<EffectiveConnectionType>,
    pub downlink_mbps: Option<f64>,
    pub rtt_ms: Option<u32>,
}

/// Tracks network conditions for quality selection
pub struct NetworkMonitor {
    conditions: RwLock<NetworkConditions>,
}

impl NetworkMonitor {
    pub fn new() -> Self {
        Self {
            conditions: RwLock::new(NetworkConditions::default()),
        }
    }

    /// Merge a signal update, last write wins per field
    pub fn update(&self, signal: NetworkSignal) {
        let mut conditions = self.conditions.write().expect("network state poisoned");

        if let Some(effective_type) = signal.effective_type {
            conditions.effective_type = effective_type;
        }
        if let Some(downlink_mbps) = signal.downlink_mbps {
            conditions.downlink_mbps = downlink_mbps;
        }
        if let Some(rtt_ms) = signal.rtt_ms {
            conditions.rtt_ms = rtt_ms;
        }

        debug!(
            effective_type = conditions.effective_type.as_str(),
            downlink_mbps = conditions.downlink_mbps,
            rtt_ms = conditions.rtt_ms,
            "network conditions updated"
        );
    }

    /// Snapshot of current conditions
    pub fn conditions(&self) -> NetworkConditions {
        *self.conditions.read().expect("network state poisoned")
    }

    /// Preset recommended for the current conditions
    pub fn recommended_quality(&self) -> QualityLevel {
        QualityLevel::for_conditions(&self.conditions())
    }
}

impl Default for NetworkMonitor {
    fn default() -> Self {
        Self::new()
    }
}
