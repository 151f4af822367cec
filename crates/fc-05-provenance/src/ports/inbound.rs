//! # Inbound Ports
//!
//! What anyone can ask about a batch.

use crate::domain::ProvenanceReport;
use async_trait::async_trait;
use shared_types::{BatchId, LedgerError, UserStatus};

/// Provenance API - inbound port.
#[async_trait]
pub trait ProvenanceApi: Send + Sync {
    /// Fetch and decode the full history of batch `id`.
    async fn query(&self, id: BatchId) -> Result<ProvenanceReport, LedgerError>;

    /// Like [`ProvenanceApi::query`], with failures mapped to a status line.
    async fn query_status(&self, id: BatchId) -> Result<ProvenanceReport, UserStatus>;
}
