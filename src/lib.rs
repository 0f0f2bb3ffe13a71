//! Suix - Sui Transaction Inspector
//!
//! Fetches a transaction block by digest over JSON-RPC, enriches it with
//! checkpoint metadata, referenced-object details, and live balances, and
//! derives a sectioned human-readable breakdown for the terminal.
//!
//! ## Pipeline
//!
//! digest -> [`fetch`] (progressive field-set fallback) -> [`enrich`]
//! (concurrent auxiliary lookups, each one degradable) -> [`present`]
//! (sections + callouts) -> [`render`] (terminal sink).

pub mod config;
pub mod describe;
pub mod enrich;
pub mod fetch;
pub mod lookup;
pub mod present;
pub mod render;
pub mod rpc;
pub mod types;
pub mod util_text;

// Re-export the types most callers touch
pub use lookup::{lookup_transaction, LookupError, LookupOutcome};
pub use rpc::{HttpTransport, RpcFailure, RpcTransport};
pub use types::EnrichedTransaction;
