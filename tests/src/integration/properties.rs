//! # Properties
//!
//! Randomized checks over custody and sensor submission.

#[cfg(test)]
mod tests {
    use crate::integration::fixtures::*;
    use fc_02_sensor_validation::{SensorLoggingApi, SensorReading, SensorService};
    use fc_03_custody_transfer::validate_custody_chain;
    use fc_04_batch_store::LedgerConfig;
    use proptest::prelude::*;
    use shared_types::testing::ScriptedLedger;
    use shared_types::{ConfirmationPolicy, ErrorKind, SensorField, SupplyChainLedger};
    use std::sync::Arc;

    const PARTICIPANTS: [u64; 4] = [PRODUCER, TRANSPORTER, DISTRIBUTOR, RETAILER];

    fn runtime() -> tokio::runtime::Runtime {
        tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap()
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        /// Whatever transfers are attempted, the recorded history is a
        /// prefix of Producer → Transporter → Distributor → Retailer.
        #[test]
        fn prop_history_is_a_valid_chain(
            attempts in prop::collection::vec((0usize..4, 0usize..4), 0..24)
        ) {
            runtime().block_on(async {
                let (ledger, _) = registered_ledger(LedgerConfig::default()).await;
                let id = batch(1);
                ledger.create_batch(who(PRODUCER), id, "Tomatoes", 100).await.unwrap();

                for (from, to) in attempts {
                    let _ = ledger
                        .transfer_ownership(who(PARTICIPANTS[from]), id, who(PARTICIPANTS[to]))
                        .await;
                }

                let rec = record(&ledger, id).await;
                let mut roles = Vec::new();
                for entry in &rec.ownership_history {
                    roles.push(ledger.role_of(entry.identity).await.unwrap().unwrap());
                }
                prop_assert!(validate_custody_chain(&roles));
                prop_assert_eq!(
                    rec.ownership_history.last().map(|e| e.identity),
                    Some(rec.current_owner)
                );
                Ok(())
            })?;
        }

        /// Out-of-range readings never reach the ledger.
        #[test]
        fn prop_out_of_range_rejected_locally(
            temperature in -200i64..200,
            humidity in -200i64..200,
        ) {
            let in_range = SensorField::Temperature.admissible_range().contains(&temperature)
                && SensorField::Humidity.admissible_range().contains(&humidity);
            prop_assume!(!in_range);

            runtime().block_on(async {
                let ledger = Arc::new(ScriptedLedger::new());
                let service = SensorService::new(
                    ledger.clone(),
                    who(TRANSPORTER),
                    ConfirmationPolicy::default(),
                );

                let err = service
                    .record(batch(1), SensorReading::new(temperature, humidity, "Dock"))
                    .await
                    .unwrap_err();
                prop_assert_eq!(err.kind(), ErrorKind::OutOfRange);
                prop_assert_eq!(ledger.submission_count(), 0);
                Ok(())
            })?;
        }
    }
}
