use crate::enrich::enrich_transaction;
use crate::fetch::fetch_transaction_with_fallback;
use crate::rpc::{RpcFailure, RpcTransport};
use crate::types::EnrichedTransaction;

#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    /// Digest validation failed; no network call was made.
    #[error("Please enter a transaction digest.")]
    EmptyDigest,
    #[error(transparent)]
    Rpc(#[from] RpcFailure),
}

#[derive(Debug)]
pub struct LookupOutcome {
    pub transaction: EnrichedTransaction,
    /// Set when the endpoint only served a degraded field set.
    pub warning: Option<&'static str>,
}

/// Full pipeline for one submitted digest: validate, fetch with fallback,
/// then enrich. Enrichment never fails the lookup; fetch errors propagate
/// once the fallback sequence is done with them.
pub async fn lookup_transaction(
    rpc: &dyn RpcTransport,
    digest: &str,
) -> Result<LookupOutcome, LookupError> {
    let digest = digest.trim();
    if digest.is_empty() {
        return Err(LookupError::EmptyDigest);
    }

    let fetched = fetch_transaction_with_fallback(rpc, digest).await?;
    let transaction = enrich_transaction(rpc, fetched.result).await;

    Ok(LookupOutcome {
        transaction,
        warning: fetched.warning,
    })
}
