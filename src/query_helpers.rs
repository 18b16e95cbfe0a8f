//! Typed parameters for the Hyperion endpoints that take more than one or two
//! arguments.
//!
//! Every builder starts empty; unset fields are left out of the request so the
//! server applies its own defaults.

use chrono::NaiveDateTime;
use serde::Serialize;
use std::fmt;

/// Query pairs for the `key=value` parameters that are set.
#[derive(Debug, Default)]
pub(crate) struct Query(Vec<(String, String)>);

impl Query {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with(mut self, key: &str, value: impl ToString) -> Self {
        self.0.push((key.to_string(), value.to_string()));
        self
    }

    pub(crate) fn with_opt<T: ToString>(self, key: &str, value: Option<T>) -> Self {
        match value {
            Some(value) => self.with(key, value),
            None => self,
        }
    }

    pub(crate) fn into_pairs(self) -> Vec<(String, String)> {
        self.0
    }
}

/// A block referenced by number or by id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BlockNumOrId {
    Num(u64),
    Id(String),
}

impl From<u64> for BlockNumOrId {
    fn from(value: u64) -> Self {
        Self::Num(value)
    }
}

impl From<&str> for BlockNumOrId {
    fn from(value: &str) -> Self {
        Self::Id(value.to_string())
    }
}

impl From<String> for BlockNumOrId {
    fn from(value: String) -> Self {
        Self::Id(value)
    }
}

impl fmt::Display for BlockNumOrId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Num(num) => write!(f, "{num}"),
            Self::Id(id) => f.write_str(id),
        }
    }
}

/// Nodeos accepts either form in the same field.
impl Serialize for BlockNumOrId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Num(num) => serializer.serialize_u64(*num),
            Self::Id(id) => serializer.serialize_str(id),
        }
    }
}

/// Lower or upper bound of a history window.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TimeBound {
    Block(u64),
    Time(NaiveDateTime),
}

impl From<u64> for TimeBound {
    fn from(value: u64) -> Self {
        Self::Block(value)
    }
}

impl From<NaiveDateTime> for TimeBound {
    fn from(value: NaiveDateTime) -> Self {
        Self::Time(value)
    }
}

impl fmt::Display for TimeBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Block(num) => write!(f, "{num}"),
            Self::Time(time) => write!(f, "{}", time.format("%Y-%m-%dT%H:%M:%S%.3f")),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        })
    }
}

/// `skip`/`limit` pagination.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Page {
    pub skip: Option<u32>,
    pub limit: Option<u32>,
}

impl Page {
    pub fn new(skip: u32, limit: u32) -> Self {
        Self {
            skip: Some(skip),
            limit: Some(limit),
        }
    }

    pub fn limit(limit: u32) -> Self {
        Self {
            skip: None,
            limit: Some(limit),
        }
    }

    pub(crate) fn apply(&self, query: Query) -> Query {
        query
            .with_opt("skip", self.skip)
            .with_opt("limit", self.limit)
    }
}

/// Parameters of `/v2/history/get_actions`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ActionsQuery {
    pub account: Option<String>,
    /// `contract:action` filters, comma separated on the wire.
    pub filter: Vec<String>,
    pub track: Option<u32>,
    pub page: Page,
    pub sort: Option<SortOrder>,
    pub after: Option<TimeBound>,
    pub before: Option<TimeBound>,
    pub simple: Option<bool>,
    pub no_binary: Option<bool>,
    pub check_lib: Option<bool>,
}

impl ActionsQuery {
    pub fn for_account(account: impl Into<String>) -> Self {
        Self {
            account: Some(account.into()),
            ..Default::default()
        }
    }

    pub fn filter(mut self, filter: impl Into<String>) -> Self {
        self.filter.push(filter.into());
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.page.limit = Some(limit);
        self
    }

    pub fn skip(mut self, skip: u32) -> Self {
        self.page.skip = Some(skip);
        self
    }

    pub fn sort(mut self, sort: SortOrder) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn after(mut self, bound: impl Into<TimeBound>) -> Self {
        self.after = Some(bound.into());
        self
    }

    pub fn before(mut self, bound: impl Into<TimeBound>) -> Self {
        self.before = Some(bound.into());
        self
    }

    pub(crate) fn to_query(&self) -> Vec<(String, String)> {
        let filter = (!self.filter.is_empty()).then(|| self.filter.join(","));
        let query = Query::new()
            .with_opt("account", self.account.as_deref())
            .with_opt("filter", filter)
            .with_opt("track", self.track);
        self.page
            .apply(query)
            .with_opt("sort", self.sort)
            .with_opt("after", self.after.as_ref())
            .with_opt("before", self.before.as_ref())
            .with_opt("simple", self.simple)
            .with_opt("noBinary", self.no_binary)
            .with_opt("checkLib", self.check_lib)
            .into_pairs()
    }
}

/// Parameters of `/v2/history/get_deltas`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DeltasQuery {
    pub code: Option<String>,
    pub scope: Option<String>,
    pub table: Option<String>,
    pub payer: Option<String>,
    pub page: Page,
    pub after: Option<TimeBound>,
    pub before: Option<TimeBound>,
}

impl DeltasQuery {
    pub fn table(code: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            table: Some(table.into()),
            ..Default::default()
        }
    }

    pub fn scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    pub(crate) fn to_query(&self) -> Vec<(String, String)> {
        let query = Query::new()
            .with_opt("code", self.code.as_deref())
            .with_opt("scope", self.scope.as_deref())
            .with_opt("table", self.table.as_deref())
            .with_opt("payer", self.payer.as_deref());
        self.page
            .apply(query)
            .with_opt("after", self.after.as_ref())
            .with_opt("before", self.before.as_ref())
            .into_pairs()
    }
}

/// Parameters of `/v2/state/get_links`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LinksQuery {
    pub account: Option<String>,
    pub code: Option<String>,
    pub action: Option<String>,
    pub permission: Option<String>,
}

impl LinksQuery {
    pub fn for_account(account: impl Into<String>) -> Self {
        Self {
            account: Some(account.into()),
            ..Default::default()
        }
    }

    pub(crate) fn to_query(&self) -> Vec<(String, String)> {
        Query::new()
            .with_opt("account", self.account.as_deref())
            .with_opt("code", self.code.as_deref())
            .with_opt("action", self.action.as_deref())
            .with_opt("permission", self.permission.as_deref())
            .into_pairs()
    }
}

/// Parameters of `/v2/state/get_voters`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VotersQuery {
    pub producer: Option<String>,
    pub proxy: Option<bool>,
    pub page: Page,
}

impl VotersQuery {
    pub fn for_producer(producer: impl Into<String>) -> Self {
        Self {
            producer: Some(producer.into()),
            ..Default::default()
        }
    }

    pub(crate) fn to_query(&self) -> Vec<(String, String)> {
        let query = Query::new()
            .with_opt("producer", self.producer.as_deref())
            .with_opt("proxy", self.proxy);
        self.page.apply(query).into_pairs()
    }
}

/// Parameters of `/v2/state/get_proposals`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProposalsQuery {
    pub proposer: Option<String>,
    pub proposal: Option<String>,
    /// Either requested or provided approver.
    pub account: Option<String>,
    pub requested: Option<String>,
    pub provided: Option<String>,
    pub executed: Option<bool>,
    pub track: Option<u32>,
    pub page: Page,
}

impl ProposalsQuery {
    pub fn by_proposer(proposer: impl Into<String>) -> Self {
        Self {
            proposer: Some(proposer.into()),
            ..Default::default()
        }
    }

    pub(crate) fn to_query(&self) -> Vec<(String, String)> {
        let query = Query::new()
            .with_opt("proposer", self.proposer.as_deref())
            .with_opt("proposal", self.proposal.as_deref())
            .with_opt("account", self.account.as_deref())
            .with_opt("requested", self.requested.as_deref())
            .with_opt("provided", self.provided.as_deref())
            .with_opt("executed", self.executed)
            .with_opt("track", self.track);
        self.page.apply(query).into_pairs()
    }
}

/// Parameters of `/v2/stats/get_missed_blocks`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MissedBlocksQuery {
    pub producer: Option<String>,
    pub after: Option<TimeBound>,
    pub before: Option<TimeBound>,
    pub min_blocks: Option<u32>,
}

impl MissedBlocksQuery {
    pub(crate) fn to_query(&self) -> Vec<(String, String)> {
        Query::new()
            .with_opt("producer", self.producer.as_deref())
            .with_opt("after", self.after.as_ref())
            .with_opt("before", self.before.as_ref())
            .with_opt("min_blocks", self.min_blocks)
            .into_pairs()
    }
}

/// Parameters of `/v2/history/get_schedule`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScheduleQuery {
    pub producer: Option<String>,
    pub key: Option<String>,
    pub after: Option<TimeBound>,
    pub before: Option<TimeBound>,
    pub version: Option<u32>,
}

impl ScheduleQuery {
    pub(crate) fn to_query(&self) -> Vec<(String, String)> {
        Query::new()
            .with_opt("producer", self.producer.as_deref())
            .with_opt("key", self.key.as_deref())
            .with_opt("after", self.after.as_ref())
            .with_opt("before", self.before.as_ref())
            .with_opt("version", self.version)
            .into_pairs()
    }
}

/// Body of `/v1/chain/get_producers`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ProducersQuery {
    pub json: bool,
    pub lower_bound: String,
    pub limit: u32,
}

impl Default for ProducersQuery {
    fn default() -> Self {
        Self {
            json: true,
            lower_bound: String::new(),
            limit: 50,
        }
    }
}

impl ProducersQuery {
    /// The page after a previous response's `more` marker.
    pub fn after(lower_bound: impl Into<String>) -> Self {
        Self {
            lower_bound: lower_bound.into(),
            ..Default::default()
        }
    }
}

/// Body of `/v1/chain/get_table_rows`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TableRowsQuery {
    pub json: bool,
    pub code: String,
    pub scope: String,
    pub table: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lower_bound: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upper_bound: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index_position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reverse: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_payer: Option<bool>,
}

impl TableRowsQuery {
    pub fn new(
        code: impl Into<String>,
        scope: impl Into<String>,
        table: impl Into<String>,
    ) -> Self {
        Self {
            json: true,
            code: code.into(),
            scope: scope.into(),
            table: table.into(),
            lower_bound: None,
            upper_bound: None,
            limit: None,
            index_position: None,
            key_type: None,
            reverse: None,
            show_payer: None,
        }
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn lower_bound(mut self, bound: impl Into<String>) -> Self {
        self.lower_bound = Some(bound.into());
        self
    }
}
