//! Typed models and async client for the [Hyperion](https://github.com/eosrio/hyperion-history-api)
//! history and state API of EOSIO/Antelope chains.
//!
//! # Features
//!
//! - **`types` module**: serde models for every response, tolerant of missing
//!   fields and strict about type mismatches. Available with no additional features.
//! - **`client` module**: [`HyperionClient`] with one borrowed view per API area,
//!   over any [`Transport`].
//! - **`client` feature** (enabled by default): the `reqwest` transport and the
//!   preset constructors for public instances.
//!
//! # Quick start
//!
//! ```no_run
//! use hyperion_client::{ActionsQuery, HyperionClient};
//!
//! #[tokio::main]
//! async fn main() -> hyperion_client::Result<()> {
//!     let client = HyperionClient::eos_mainnet();
//!     let info = client.chain().get_info().await?;
//!     println!("{} at block {}", info.chain_id, info.head_block_num);
//!
//!     let query = ActionsQuery::for_account("eosio.token")
//!         .filter("eosio.token:transfer")
//!         .limit(5);
//!     let transfers = client.accounts().get_actions(&query).await?;
//!     for action in &transfers.actions {
//!         println!("{} {}", action.block_num, action.qualified_name());
//!     }
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod error;
pub mod panel;
mod query_helpers;
mod token_helpers;
pub mod transport;
pub mod types;

pub use client::HyperionClient;
pub use error::{ApiError, Error, Result};
pub use query_helpers::{
    ActionsQuery, BlockNumOrId, DeltasQuery, LinksQuery, MissedBlocksQuery, Page,
    ProducersQuery, ProposalsQuery, ScheduleQuery, SortOrder, TableRowsQuery, TimeBound,
    VotersQuery,
};
pub use token_helpers::AssetParseError;
pub use transport::{BaseUrl, HttpRequest, HttpResponse, Method, Transport, TransportError};

#[cfg(feature = "client")]
pub use transport::ReqwestTransport;

pub use types::*;
