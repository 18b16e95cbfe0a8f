//! Governance state: voters, multisig proposals and producer schedules.

use super::de::number_or_string;
use super::{Dynamic, ResponseMeta};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Voter {
    pub account: String,
    pub weight: f64,
    /// Block number of the last vote.
    #[serde(with = "number_or_string")]
    pub last_vote: u64,
    #[serde(skip_serializing_if = "Dynamic::is_absent")]
    pub data: Dynamic,
}

/// `/v2/state/get_voters`.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct GetVotersResponse {
    #[serde(flatten)]
    pub meta: ResponseMeta,
    pub voters: Vec<Voter>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct Approval {
    pub actor: String,
    pub permission: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
}

/// `eosio.msig` proposal.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Proposal {
    pub proposal_name: String,
    pub proposer: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration: Option<String>,
    pub executed: bool,
    pub primary_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_num: Option<u64>,
    pub requested_approvals: Vec<Approval>,
    pub provided_approvals: Vec<Approval>,
    #[serde(skip_serializing_if = "Dynamic::is_absent")]
    pub trx: Dynamic,
}

impl Proposal {
    /// Requested approvals that have not been provided yet.
    pub fn pending_approvals(&self) -> impl Iterator<Item = &Approval> {
        self.requested_approvals.iter().filter(|requested| {
            !self.provided_approvals.iter().any(|provided| {
                provided.actor == requested.actor && provided.permission == requested.permission
            })
        })
    }
}

/// `/v2/state/get_proposals`.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct GetProposalsResponse {
    #[serde(flatten)]
    pub meta: ResponseMeta,
    pub proposals: Vec<Proposal>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ScheduledProducer {
    #[serde(alias = "name")]
    pub producer_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_signing_key: Option<String>,
    #[serde(skip_serializing_if = "Dynamic::is_absent")]
    pub authority: Dynamic,
}

/// `/v2/history/get_schedule`.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Schedule {
    #[serde(flatten)]
    pub meta: ResponseMeta,
    pub timestamp: String,
    pub block_num: u64,
    pub version: u32,
    pub producers: Vec<ScheduledProducer>,
}

impl Schedule {
    pub fn contains(&self, producer: &str) -> bool {
        self.producers.iter().any(|p| p.producer_name == producer)
    }
}
