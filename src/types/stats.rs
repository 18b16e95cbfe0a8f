//! `/v2/stats/*` responses.

use super::{Dynamic, ResponseMeta};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// `/v2/stats/get_action_usage`.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ActionUsage {
    #[serde(flatten)]
    pub meta: ResponseMeta,
    pub action_count: u64,
    pub tps: f64,
    pub period: String,
    pub from: String,
    pub to: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unique_actors: Option<u64>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct MissedBlockStats {
    pub by_producer: BTreeMap<String, u64>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct MissedBlockEvent {
    #[serde(rename = "@timestamp")]
    pub timestamp: String,
    pub last_block: u64,
    pub schedule_version: u32,
    pub size: u32,
    pub producer: String,
}

/// `/v2/stats/get_missed_blocks`.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct MissedBlocks {
    #[serde(flatten)]
    pub meta: ResponseMeta,
    pub stats: MissedBlockStats,
    pub events: Vec<MissedBlockEvent>,
}

impl MissedBlocks {
    pub fn total_missed(&self) -> u64 {
        self.stats.by_producer.values().sum()
    }

    /// Producer with the most missed blocks in the window.
    pub fn worst_producer(&self) -> Option<(&str, u64)> {
        self.stats
            .by_producer
            .iter()
            .max_by_key(|(_, count)| **count)
            .map(|(name, count)| (name.as_str(), *count))
    }
}

/// `/v2/stats/get_resource_usage`.
///
/// The percentile payloads vary by Hyperion version and are kept as raw JSON.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ResourceUsage {
    #[serde(flatten)]
    pub meta: ResponseMeta,
    #[serde(skip_serializing_if = "Dynamic::is_absent")]
    pub cpu: Dynamic,
    #[serde(skip_serializing_if = "Dynamic::is_absent")]
    pub net: Dynamic,
}

impl ResourceUsage {
    /// CPU percentile such as `"95.0"` when the payload carries a
    /// `percentiles` map.
    pub fn cpu_percentile(&self, percentile: &str) -> Option<f64> {
        self.cpu.get("percentiles")?.get(percentile)?.as_f64()
    }

    pub fn net_percentile(&self, percentile: &str) -> Option<f64> {
        self.net.get("percentiles")?.get(percentile)?.as_f64()
    }
}
