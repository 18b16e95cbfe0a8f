//! Request and response types for the Hyperion API.
//!
//! Every type mirrors one JSON shape. Field names are the wire names (serde
//! `rename` where the wire uses something Rust can't). All fields default when
//! absent; a field with the wrong JSON type fails deserialization.

mod accounts;
mod chain;
mod common;
pub(crate) mod de;
mod dynamic;
mod history;
mod stats;
mod status;
mod system;

pub use accounts::*;
pub use chain::*;
pub use common::*;
pub use dynamic::Dynamic;
pub use history::*;
pub use stats::*;
pub use status::*;
pub use system::*;
