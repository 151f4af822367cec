//! # Pending Transactions
//!
//! Every state-changing ledger call answers with a `PendingTx`. The handle
//! resolves to a committed [`TxReceipt`], to the ledger's rejection, or to
//! `Unconfirmed` when no confirmation arrives in time. An unconfirmed
//! submission is never reported as a failure: the caller re-reads state
//! before deciding to retry.

use crate::entities::{BatchId, Identity, Role, Timestamp};
use crate::errors::LedgerError;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::time::Duration;
use tokio::sync::oneshot;
use tracing::{debug, warn};

/// Sequential transaction number assigned at submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TxId(pub u64);

impl fmt::Display for TxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tx-{}", self.0)
    }
}

/// SHA-256 digest identifying a committed transaction.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TxHash(pub [u8; 32]);

impl fmt::Display for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TxHash({self})")
    }
}

/// The ledger operation a transaction carried.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedgerCall {
    Register { role: Role, identity: Identity },
    CreateBatch { id: BatchId },
    AddSensorData { id: BatchId },
    TransferOwnership { id: BatchId, next_owner: Identity },
    MarkAsArrived { id: BatchId, passed: bool },
}

impl LedgerCall {
    /// Batch touched by the call, if any.
    pub fn batch_id(&self) -> Option<BatchId> {
        match self {
            LedgerCall::Register { .. } => None,
            LedgerCall::CreateBatch { id }
            | LedgerCall::AddSensorData { id }
            | LedgerCall::TransferOwnership { id, .. }
            | LedgerCall::MarkAsArrived { id, .. } => Some(*id),
        }
    }

    /// Ledger entry-point name.
    pub fn name(&self) -> &'static str {
        match self {
            LedgerCall::Register { role, .. } => match role {
                Role::Producer => "registerProducer",
                Role::Transporter => "registerTransporter",
                Role::Distributor => "registerDistributor",
                Role::Retailer => "registerRetailer",
                Role::Admin => "register",
            },
            LedgerCall::CreateBatch { .. } => "createBatch",
            LedgerCall::AddSensorData { .. } => "addSensorData",
            LedgerCall::TransferOwnership { .. } => "transferOwnership",
            LedgerCall::MarkAsArrived { .. } => "markAsArrived",
        }
    }
}

/// Proof that a transaction committed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxReceipt {
    pub tx_id: TxId,
    pub tx_hash: TxHash,
    pub signer: Identity,
    pub call: LedgerCall,
    pub committed_at: Timestamp,
}

impl TxReceipt {
    /// Build a receipt, deriving the hash from its contents.
    pub fn new(tx_id: TxId, signer: Identity, call: LedgerCall, committed_at: Timestamp) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(tx_id.0.to_be_bytes());
        hasher.update(signer.as_bytes());
        hasher.update(call.name().as_bytes());
        hasher.update(call.batch_id().map(|id| id.get()).unwrap_or(0).to_be_bytes());
        hasher.update(committed_at.secs().to_be_bytes());
        let tx_hash = TxHash(hasher.finalize().into());

        Self {
            tx_id,
            tx_hash,
            signer,
            call,
            committed_at,
        }
    }
}

/// Outcome of waiting on a pending transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Confirmation {
    /// The ledger committed the transaction.
    Committed(TxReceipt),
    /// No confirmation arrived; ledger state is unknown to the caller.
    Unconfirmed { tx_id: TxId },
}

impl Confirmation {
    pub fn is_committed(&self) -> bool {
        matches!(self, Confirmation::Committed(_))
    }

    pub fn receipt(&self) -> Option<&TxReceipt> {
        match self {
            Confirmation::Committed(receipt) => Some(receipt),
            Confirmation::Unconfirmed { .. } => None,
        }
    }
}

/// Outcome of a resubmission made after re-reading ledger state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetryOutcome {
    /// The mutation was not visible yet and was submitted again.
    Submitted(Confirmation),
    /// The earlier submission already committed; nothing was sent.
    AlreadyApplied,
}

/// How long a caller waits for confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfirmationPolicy {
    pub timeout: Duration,
}

impl Default for ConfirmationPolicy {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(5),
        }
    }
}

/// Handle on a submitted transaction.
#[derive(Debug)]
pub struct PendingTx {
    tx_id: TxId,
    receiver: oneshot::Receiver<Result<TxReceipt, LedgerError>>,
}

impl PendingTx {
    /// Pair a handle with the sender the ledger resolves it through.
    pub fn channel(tx_id: TxId) -> (oneshot::Sender<Result<TxReceipt, LedgerError>>, Self) {
        let (sender, receiver) = oneshot::channel();
        (sender, Self { tx_id, receiver })
    }

    /// A handle that reports `receipt` after `delay`.
    ///
    /// With a zero delay the receipt is available immediately; otherwise a
    /// task delivers it, so this must run inside a tokio runtime.
    pub fn committed(receipt: TxReceipt, delay: Duration) -> Self {
        let (sender, pending) = Self::channel(receipt.tx_id);
        if delay.is_zero() {
            let _ = sender.send(Ok(receipt));
        } else {
            tokio::spawn(async move {
                tokio::time::sleep(delay).await;
                // Receiver may be gone; the commit stands regardless.
                let _ = sender.send(Ok(receipt));
            });
        }
        pending
    }

    pub fn tx_id(&self) -> TxId {
        self.tx_id
    }

    /// Wait without a deadline.
    pub async fn wait(self) -> Result<Confirmation, LedgerError> {
        match self.receiver.await {
            Ok(Ok(receipt)) => Ok(Confirmation::Committed(receipt)),
            Ok(Err(error)) => Err(error),
            Err(_) => {
                debug!(tx_id = %self.tx_id, "Confirmation channel closed");
                Ok(Confirmation::Unconfirmed { tx_id: self.tx_id })
            }
        }
    }

    /// Wait up to `policy.timeout`; expiry yields `Unconfirmed`.
    pub async fn wait_for(self, policy: &ConfirmationPolicy) -> Result<Confirmation, LedgerError> {
        let tx_id = self.tx_id;
        match tokio::time::timeout(policy.timeout, self.wait()).await {
            Ok(outcome) => outcome,
            Err(_) => {
                warn!(
                    tx_id = %tx_id,
                    timeout_ms = policy.timeout.as_millis() as u64,
                    "Transaction unconfirmed within timeout"
                );
                Ok(Confirmation::Unconfirmed { tx_id })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn receipt(tx: u64) -> TxReceipt {
        TxReceipt::new(
            TxId(tx),
            Identity::from_low_u64(2),
            LedgerCall::CreateBatch {
                id: BatchId::new(1).unwrap(),
            },
            Timestamp(1_700_000_000),
        )
    }

    #[test]
    fn test_receipt_hash_depends_on_contents() {
        assert_eq!(receipt(1).tx_hash, receipt(1).tx_hash);
        assert_ne!(receipt(1).tx_hash, receipt(2).tx_hash);
        assert!(receipt(1).tx_hash.to_string().starts_with("0x"));
    }

    #[test]
    fn test_call_names() {
        let id = BatchId::new(4).unwrap();
        assert_eq!(
            LedgerCall::Register {
                role: Role::Retailer,
                identity: Identity::from_low_u64(1)
            }
            .name(),
            "registerRetailer"
        );
        assert_eq!(
            LedgerCall::MarkAsArrived { id, passed: true }.batch_id(),
            Some(id)
        );
    }

    #[tokio::test]
    async fn test_immediate_commit() {
        let pending = PendingTx::committed(receipt(1), Duration::ZERO);
        let confirmation = pending.wait().await.unwrap();
        assert_eq!(confirmation.receipt().unwrap().tx_id, TxId(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_delayed_commit_within_timeout() {
        let pending = PendingTx::committed(receipt(3), Duration::from_millis(250));
        let policy = ConfirmationPolicy::default();
        assert!(pending.wait_for(&policy).await.unwrap().is_committed());
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_is_unconfirmed_not_failure() {
        let pending = PendingTx::committed(receipt(5), Duration::from_secs(60));
        let policy = ConfirmationPolicy {
            timeout: Duration::from_secs(1),
        };
        let confirmation = pending.wait_for(&policy).await.unwrap();
        assert_eq!(confirmation, Confirmation::Unconfirmed { tx_id: TxId(5) });
    }

    #[tokio::test]
    async fn test_dropped_sender_is_unconfirmed() {
        let (sender, pending) = PendingTx::channel(TxId(9));
        drop(sender);
        assert!(!pending.wait().await.unwrap().is_committed());
    }
}
