//! # Batch Lifecycle
//!
//! One batch from creation to the retailer's shelf, driven through the
//! subsystem services rather than raw ledger calls:
//!
//! 1. **Batch Store (4)**: producer creates the batch
//! 2. **Custody Transfer (3)**: Producer → Transporter → Distributor → Retailer
//! 3. **Sensor Validation (2)**: transporter logs readings while in transit
//! 4. **Batch Store (4)**: retailer finalizes
//! 5. **Provenance (5)**: customer reads the report

#[cfg(test)]
mod tests {
    use crate::integration::fixtures::*;
    use fc_02_sensor_validation::{SensorLoggingApi, SensorReading, SensorService};
    use fc_03_custody_transfer::{
        validate_custody_chain, CustodyService, CustodyState, CustodyTransferApi,
    };
    use fc_04_batch_store::{BatchLifecycleApi, BatchService, LedgerConfig};
    use fc_05_provenance::{
        InspectionSummary, LatestReading, ProvenanceApi, ProvenanceService, ShipmentStatus,
        ViolationSummary,
    };
    use shared_types::{ConfirmationPolicy, Role};

    #[tokio::test]
    async fn test_producer_to_shelf() {
        let (ledger, clock) = registered_ledger(LedgerConfig::default()).await;
        let policy = ConfirmationPolicy::default();
        let id = batch(1);

        let batches = BatchService::new(ledger.clone(), who(PRODUCER), policy);
        let producer = CustodyService::new(ledger.clone(), who(PRODUCER), policy);
        let transporter = CustodyService::new(ledger.clone(), who(TRANSPORTER), policy);
        let sensors = SensorService::new(ledger.clone(), who(TRANSPORTER), policy);
        let distributor = CustodyService::new(ledger.clone(), who(DISTRIBUTOR), policy);
        let retailer = BatchService::new(ledger.clone(), who(RETAILER), policy);
        let customer = ProvenanceService::new(ledger.clone());

        assert!(batches.create_batch(id, "Tomatoes", 100).await.unwrap().is_committed());
        assert_eq!(producer.custody_state(id).await.unwrap(), CustodyState::WithProducer);

        // In transit: nothing recorded yet
        let report = customer.query(id).await.unwrap();
        assert_eq!(report.status, ShipmentStatus::InTransit);
        assert_eq!(report.inspection, InspectionSummary::AwaitingApproval);
        assert_eq!(report.latest_reading, LatestReading::NoData);

        producer.transfer(id, who(TRANSPORTER)).await.unwrap();
        assert_eq!(transporter.custody_state(id).await.unwrap(), CustodyState::WithTransporter);

        clock.advance_time(300);
        sensors
            .record(id, SensorReading::new(3, 12, "Dock-7"))
            .await
            .unwrap();
        clock.advance_time(300);
        sensors
            .record(id, SensorReading::new(4, 10, "Warehouse-1"))
            .await
            .unwrap();

        transporter.transfer(id, who(DISTRIBUTOR)).await.unwrap();
        distributor.transfer(id, who(RETAILER)).await.unwrap();
        assert_eq!(distributor.custody_state(id).await.unwrap(), CustodyState::WithRetailer);

        retailer.finalize(id, true).await.unwrap();

        let report = customer.query(id).await.unwrap();
        assert_eq!(report.status, ShipmentStatus::Finalized);
        assert_eq!(report.inspection, InspectionSummary::Approved);
        assert_eq!(report.violation, ViolationSummary::Ok);
        assert_eq!(report.current_owner, who(RETAILER));
        assert_eq!(report.producer, who(PRODUCER));
        assert_eq!(report.custody_chain.len(), 4);
        match report.latest_reading {
            LatestReading::Reading {
                temperature,
                humidity,
                ref location,
                recorded_by,
                ..
            } => {
                assert_eq!((temperature, humidity), (4, 10));
                assert_eq!(location, "Warehouse-1");
                assert_eq!(recorded_by, who(TRANSPORTER));
            }
            LatestReading::NoData => panic!("expected a reading"),
        }

        let rec = record(&ledger, id).await;
        assert_eq!(rec.sensor_logs.len(), 2);
        assert!(rec.sensor_logs[0].timestamp < rec.sensor_logs[1].timestamp);
    }

    #[tokio::test]
    async fn test_rejected_inspection_is_terminal() {
        let (ledger, _) = registered_ledger(LedgerConfig::default()).await;
        let policy = ConfirmationPolicy::default();
        let id = batch(2);

        BatchService::new(ledger.clone(), who(PRODUCER), policy)
            .create_batch(id, "Lettuce", 20)
            .await
            .unwrap();
        for (from, to) in [
            (PRODUCER, TRANSPORTER),
            (TRANSPORTER, DISTRIBUTOR),
            (DISTRIBUTOR, RETAILER),
        ] {
            CustodyService::new(ledger.clone(), who(from), policy)
                .transfer(id, who(to))
                .await
                .unwrap();
        }

        let retailer = BatchService::new(ledger.clone(), who(RETAILER), policy);
        retailer.finalize(id, false).await.unwrap();

        let report = ProvenanceService::new(ledger.clone()).query(id).await.unwrap();
        assert_eq!(report.inspection, InspectionSummary::Rejected);
        assert_eq!(
            report.to_string().lines().find(|l| l.starts_with("Retailer Check")),
            Some("Retailer Check: Rejected at inspection")
        );

        // A second finalization never lands
        assert!(retailer.finalize(id, true).await.is_err());
        assert!(!record(&ledger, id).await.passed_inspection);
    }

    #[tokio::test]
    async fn test_excursion_flags_batch_for_customer() {
        let config = LedgerConfig {
            cold_chain: fc_02_sensor_validation::ColdChainPolicy::with_max_temperature(8).unwrap(),
            ..LedgerConfig::default()
        };
        let (ledger, _) = registered_ledger(config).await;
        let policy = ConfirmationPolicy::default();
        let id = batch(3);

        BatchService::new(ledger.clone(), who(PRODUCER), policy)
            .create_batch(id, "Salmon", 15)
            .await
            .unwrap();
        CustodyService::new(ledger.clone(), who(PRODUCER), policy)
            .transfer(id, who(TRANSPORTER))
            .await
            .unwrap();

        // Passes the client gate, breaches the stricter ledger policy
        SensorService::new(ledger.clone(), who(TRANSPORTER), policy)
            .record(id, SensorReading::new(12, 30, "Highway"))
            .await
            .unwrap();

        let report = ProvenanceService::new(ledger.clone()).query(id).await.unwrap();
        assert_eq!(report.violation, ViolationSummary::QualityAlert);
        assert!(report.to_string().contains("QUALITY ALERT: Violated Limits"));
    }

    #[test]
    fn test_roles_follow_custody_order() {
        assert!(validate_custody_chain(&[
            Role::Producer,
            Role::Transporter,
            Role::Distributor,
            Role::Retailer
        ]));
    }
}
