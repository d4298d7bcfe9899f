/// Playback capability detection
///
/// Probes the hosting runtime once per engine lifetime for each candidate
/// codec and container, and exposes the resulting table to format
/// negotiation. The probe is an injected collaborator so the engine degrades
/// to conservative defaults when the runtime offers no detection facility.
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use media_core::constants::{CODEC_PRIORITY, CONTAINER_PRIORITY, FALLBACK_CODEC};
use media_core::{Codec, Container};
use tracing::{debug, info};

/// Runtime playability signals.
///
/// `None` means the runtime offers no way to answer; the registry records
/// such entries as not playable and callers fall back to the universally
/// supported codec.
pub trait PlaybackProbe: Send + Sync {
    fn supports_codec(&self, codec: Codec) -> Option<bool>;
    fn supports_container(&self, container: Container) -> Option<bool>;
}

/// Probe claiming only the pairing every client decodes
#[derive(Debug, Default)]
pub struct BaselineProbe;

impl PlaybackProbe for BaselineProbe {
    fn supports_codec(&self, codec: Codec) -> Option<bool> {
        Some(codec == Codec::H264)
    }

    fn supports_container(&self, container: Container) -> Option<bool> {
        Some(container == Container::Mp4)
    }
}

/// Capability table populated at engine construction.
///
/// Entries are only added or overwritten, never removed; re-detection is
/// idempotent.
pub struct CapabilityRegistry {
    probe: Arc<dyn PlaybackProbe>,
    table: RwLock<HashMap<String, bool>>,
}

impl CapabilityRegistry {
    /// Create a registry and run detection once
    pub fn new(probe: Arc<dyn PlaybackProbe>) -> Self {
        let registry = Self {
            probe,
            table: RwLock::new(HashMap::new()),
        };
        registry.detect();
        registry
    }

    /// Probe every candidate codec and container.
    ///
    /// Idempotent: re-invocation overwrites entries with fresh values and
    /// never leaves a probed name unset.
    pub fn detect(&self) {
        let mut table = self.table.write().expect("capability table poisoned");

        for codec in CODEC_PRIORITY {
            let playable = self.probe.supports_codec(*codec).unwrap_or(false);
            table.insert(codec.as_str().to_string(), playable);
        }

        for container in CONTAINER_PRIORITY {
            let playable = self.probe.supports_container(*container).unwrap_or(false);
            table.insert(container.as_str().to_string(), playable);
        }

        let supported = table.values().filter(|playable| **playable).count();
        info!(
            probed = table.len(),
            supported, "capability detection complete"
        );
    }

    /// Whether the runtime reported the codec or container as playable.
    ///
    /// Names never probed return `false`, not an error.
    pub fn is_supported(&self, name: &str) -> bool {
        self.table
            .read()
            .expect("capability table poisoned")
            .get(name)
            .copied()
            .unwrap_or(false)
    }

    /// Most compression-efficient playable codec, falling back to H.264
    pub fn preferred_codec(&self) -> Codec {
        let preferred = CODEC_PRIORITY
            .iter()
            .find(|codec| self.is_supported(codec.as_str()))
            .copied()
            .unwrap_or(FALLBACK_CODEC);

        debug!(codec = preferred.as_str(), "resolved preferred codec");
        preferred
    }

    /// Copy of the capability table for stats reporting
    pub fn snapshot(&self) -> HashMap<String, bool> {
        self.table
            .read()
            .expect("capability table poisoned")
            .clone()
    }
}
