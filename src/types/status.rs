//! `/v2/health`.

use super::Dynamic;
use serde::{Deserialize, Serialize};

/// Status of one backing service (nodeos, RabbitMQ, Elasticsearch).
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ServiceHealth {
    pub service: String,
    pub status: String,
    pub time: u64,
    #[serde(skip_serializing_if = "Dynamic::is_absent")]
    pub service_data: Dynamic,
}

impl ServiceHealth {
    pub fn is_ok(&self) -> bool {
        self.status.eq_ignore_ascii_case("ok")
    }
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct StreamingFeatures {
    pub enable: bool,
    pub traces: bool,
    pub deltas: bool,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct TableFeatures {
    pub proposals: bool,
    pub accounts: bool,
    pub voters: bool,
    pub permissions: bool,
    pub user_resources: bool,
}

/// Indexer features enabled on the instance.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct HealthFeatures {
    pub streaming: StreamingFeatures,
    pub tables: TableFeatures,
    pub index_deltas: bool,
    pub index_transfer_memo: bool,
    pub index_all_deltas: bool,
    pub deferred_trx: bool,
    pub failed_trx: bool,
    pub resource_limits: bool,
    pub resource_usage: bool,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Health {
    pub version: String,
    pub version_hash: String,
    pub host: String,
    pub health: Vec<ServiceHealth>,
    pub features: HealthFeatures,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query_time_ms: Option<f64>,
}

impl Health {
    pub fn service(&self, name: &str) -> Option<&ServiceHealth> {
        self.health.iter().find(|s| s.service == name)
    }

    /// `true` when every reported service is OK.
    pub fn is_healthy(&self) -> bool {
        self.health.iter().all(ServiceHealth::is_ok)
    }

    /// Last block the indexer has written, from the Elasticsearch service data.
    pub fn last_indexed_block(&self) -> Option<u64> {
        self.service("Elasticsearch")?
            .service_data
            .get("last_indexed_block")?
            .as_u64()
    }
}
