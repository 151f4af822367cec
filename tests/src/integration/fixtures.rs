//! Shared fixtures: a ledger with the four custody roles registered.

use fc_04_batch_store::{InMemoryLedger, LedgerConfig, ManualClock};
use shared_types::{
    decode_batch_history, BatchId, BatchRecord, Identity, SupplyChainLedger,
};
use std::sync::Arc;

pub const ADMIN: u64 = 1;
pub const PRODUCER: u64 = 0x0200;
pub const TRANSPORTER: u64 = 0x0300;
pub const DISTRIBUTOR: u64 = 0x0400;
pub const RETAILER: u64 = 0x0500;

pub fn who(n: u64) -> Identity {
    Identity::from_low_u64(n)
}

pub fn batch(n: u64) -> BatchId {
    BatchId::new(n).expect("non-zero batch id")
}

/// Ledger with a manual clock and every custody role registered.
pub async fn registered_ledger(config: LedgerConfig) -> (Arc<InMemoryLedger>, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::default());
    let ledger = Arc::new(InMemoryLedger::with_clock(config, clock.clone()));
    let admin = who(ADMIN);
    ledger.register_producer(admin, who(PRODUCER)).await.unwrap();
    ledger.register_transporter(admin, who(TRANSPORTER)).await.unwrap();
    ledger.register_distributor(admin, who(DISTRIBUTOR)).await.unwrap();
    ledger.register_retailer(admin, who(RETAILER)).await.unwrap();
    (ledger, clock)
}

/// Decoded record of batch `id`.
pub async fn record(ledger: &InMemoryLedger, id: BatchId) -> BatchRecord {
    decode_batch_history(&ledger.get_batch_history(id).await.unwrap()).unwrap()
}
