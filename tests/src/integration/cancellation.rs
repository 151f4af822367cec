//! # Cancellation
//!
//! A client that stops waiting has not cancelled anything: the mutation
//! commits regardless, and a retry must notice that instead of resubmitting.

#[cfg(test)]
mod tests {
    use crate::integration::fixtures::*;
    use fc_02_sensor_validation::{SensorLoggingApi, SensorReading, SensorService};
    use fc_03_custody_transfer::{CustodyService, CustodyTransferApi};
    use fc_04_batch_store::{BatchLifecycleApi, BatchService, LedgerConfig};
    use shared_types::{
        Confirmation, ConfirmationPolicy, ErrorKind, RetryOutcome, SupplyChainLedger,
    };
    use std::time::Duration;

    fn slow_ledger() -> LedgerConfig {
        LedgerConfig {
            confirmation_delay: Duration::from_secs(30),
            ..LedgerConfig::default()
        }
    }

    fn impatient() -> ConfirmationPolicy {
        ConfirmationPolicy {
            timeout: Duration::from_secs(1),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_timed_out_create_is_still_visible() {
        let (ledger, _) = registered_ledger(slow_ledger()).await;
        let producer = BatchService::new(ledger.clone(), who(PRODUCER), impatient());

        let outcome = producer.create_batch(batch(1), "Tomatoes", 100).await.unwrap();
        assert!(matches!(outcome, Confirmation::Unconfirmed { .. }));

        let rec = record(&ledger, batch(1)).await;
        assert_eq!(rec.name, "Tomatoes");

        // Blind resubmission would be a duplicate
        let err = producer
            .create_batch(batch(1), "Tomatoes", 100)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DuplicateId);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_wait_still_commits() {
        let (ledger, _) = registered_ledger(slow_ledger()).await;
        let pending = ledger
            .create_batch(who(PRODUCER), batch(2), "Plums", 5)
            .await
            .unwrap();
        drop(pending);

        tokio::time::advance(Duration::from_secs(60)).await;
        assert_eq!(ledger.batch_count(), 1);
        assert_eq!(record(&ledger, batch(2)).await.quantity, 5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_transfer_retry_sees_applied_change() {
        let (ledger, _) = registered_ledger(slow_ledger()).await;
        ledger
            .create_batch(who(PRODUCER), batch(3), "Kale", 8)
            .await
            .unwrap();
        let producer = CustodyService::new(ledger.clone(), who(PRODUCER), impatient());

        let outcome = producer.transfer(batch(3), who(TRANSPORTER)).await.unwrap();
        assert!(!outcome.is_committed());

        let retried = producer
            .retry_transfer(batch(3), who(TRANSPORTER))
            .await
            .unwrap();
        assert!(matches!(retried, RetryOutcome::AlreadyApplied));
        assert_eq!(record(&ledger, batch(3)).await.ownership_history.len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_sensor_retry_does_not_duplicate() {
        let (ledger, _) = registered_ledger(slow_ledger()).await;
        let id = batch(4);
        ledger
            .create_batch(who(PRODUCER), id, "Berries", 3)
            .await
            .unwrap();
        ledger
            .transfer_ownership(who(PRODUCER), id, who(TRANSPORTER))
            .await
            .unwrap();

        let sensors = SensorService::new(ledger.clone(), who(TRANSPORTER), impatient());
        let baseline = sensors.log_count(id).await.unwrap();
        let reading = SensorReading::new(2, 15, "Cold room");

        let outcome = sensors.record(id, reading.clone()).await.unwrap();
        assert!(!outcome.is_committed());

        let retried = sensors.retry(id, reading, baseline).await.unwrap();
        assert!(matches!(retried, RetryOutcome::AlreadyApplied));
        assert_eq!(record(&ledger, id).await.sensor_logs.len(), 1);
    }
}
