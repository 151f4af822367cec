//! # Decoder
//!
//! The positional tuple returned by `getBatchHistory`, decoded into the
//! customer report.

#[cfg(test)]
mod tests {
    use crate::integration::fixtures::*;
    use fc_04_batch_store::LedgerConfig;
    use fc_05_provenance::{
        decode_report, DisplayTimestamp, LatestReading, ProvenanceApi, ProvenanceService,
    };
    use shared_types::testing::ScriptedLedger;
    use shared_types::{
        encode_batch_history, BatchRecord, CustodyEntry, ErrorKind, LedgerValue, SensorLog,
        SupplyChainLedger, Timestamp, UserStatus,
    };
    use std::sync::Arc;

    fn unstamped_record() -> BatchRecord {
        BatchRecord {
            name: "Pears".to_string(),
            quantity: 12,
            producer: who(PRODUCER),
            current_owner: who(PRODUCER),
            is_finalized: false,
            passed_inspection: false,
            is_violated: false,
            ownership_history: vec![CustodyEntry {
                identity: who(PRODUCER),
                timestamp: Timestamp::UNSET,
            }],
            sensor_logs: vec![SensorLog {
                timestamp: Timestamp::UNSET,
                temperature: 6,
                humidity: 25,
                location: "Orchard".to_string(),
                recorded_by: who(TRANSPORTER),
            }],
        }
    }

    #[tokio::test]
    async fn test_zero_timestamp_renders_not_available() {
        let ledger = Arc::new(ScriptedLedger::new());
        ledger.set_record(batch(4), unstamped_record());

        let report = ProvenanceService::new(ledger).query(batch(4)).await.unwrap();
        match &report.latest_reading {
            LatestReading::Reading { recorded_at, .. } => {
                assert_eq!(*recorded_at, DisplayTimestamp::NoTimestamp);
            }
            LatestReading::NoData => panic!("expected a reading"),
        }
        assert_eq!(report.custody_chain[0].at, DisplayTimestamp::NoTimestamp);
        assert!(report.to_string().contains("Time: N/A"));
    }

    #[tokio::test]
    async fn test_repeated_reads_are_identical() {
        let (ledger, clock) = registered_ledger(LedgerConfig::default()).await;
        let id = batch(1);
        ledger
            .create_batch(who(PRODUCER), id, "Tomatoes", 100)
            .await
            .unwrap();
        clock.advance_time(3600);

        let first = ledger.get_batch_history(id).await.unwrap();
        let second = ledger.get_batch_history(id).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(
            decode_report(id, &first).unwrap(),
            decode_report(id, &second).unwrap()
        );
    }

    #[tokio::test]
    async fn test_stamped_times_use_display_format() {
        let (ledger, clock) = registered_ledger(LedgerConfig::default()).await;
        // 2024-03-01 08:30 UTC
        clock.set_time(1_709_281_800);
        let id = batch(1);
        ledger
            .create_batch(who(PRODUCER), id, "Tomatoes", 100)
            .await
            .unwrap();

        let report = decode_report(id, &ledger.get_batch_history(id).await.unwrap()).unwrap();
        assert_eq!(report.custody_chain[0].at.to_string(), "01.03.2024 08:30");
    }

    #[test]
    fn test_truncated_tuple_is_malformed() {
        let mut raw = encode_batch_history(&unstamped_record());
        raw.pop();
        let err = decode_report(batch(1), &raw).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedRecord);
    }

    #[test]
    fn test_mistyped_field_is_malformed() {
        let mut raw = encode_batch_history(&unstamped_record());
        raw[0] = LedgerValue::Uint(42);
        assert_eq!(
            decode_report(batch(1), &raw).unwrap_err().kind(),
            ErrorKind::MalformedRecord
        );
    }

    #[tokio::test]
    async fn test_missing_batch_shows_not_found() {
        let (ledger, _) = registered_ledger(LedgerConfig::default()).await;
        let status = ProvenanceService::new(ledger)
            .query_status(batch(99))
            .await
            .unwrap_err();
        assert_eq!(status.message, "Data not found.");
        assert!(status.is_failure());
    }
}
