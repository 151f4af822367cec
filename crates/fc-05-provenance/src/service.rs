//! # Provenance Service
//!
//! Read-only queries for consumers, plus the traceability link a producer
//! hands out with each batch.

use crate::domain::{decode_report, ProvenanceReport};
use crate::ports::ProvenanceApi;
use async_trait::async_trait;
use shared_types::{BatchId, LedgerError, SupplyChainLedger, UserStatus};
use std::sync::Arc;
use tracing::{debug, warn};

/// Customer query link for batch `id`.
pub fn traceability_link(base_url: &str, id: BatchId) -> String {
    format!(
        "{}/customer?batchId={}",
        base_url.trim_end_matches('/'),
        id.get()
    )
}

/// Provenance queries against a ledger.
pub struct ProvenanceService<L: SupplyChainLedger> {
    ledger: Arc<L>,
}

impl<L: SupplyChainLedger> ProvenanceService<L> {
    /// Create a query service.
    pub fn new(ledger: Arc<L>) -> Self {
        Self { ledger }
    }
}

#[async_trait]
impl<L: SupplyChainLedger> ProvenanceApi for ProvenanceService<L> {
    async fn query(&self, id: BatchId) -> Result<ProvenanceReport, LedgerError> {
        debug!(batch = %id, "Querying batch history");
        let raw = self.ledger.get_batch_history(id).await?;
        decode_report(id, &raw)
    }

    async fn query_status(&self, id: BatchId) -> Result<ProvenanceReport, UserStatus> {
        self.query(id).await.map_err(|err| {
            warn!(batch = %id, error = %err, "Provenance query failed");
            UserStatus::from_query_error(&err)
        })
    }
}
