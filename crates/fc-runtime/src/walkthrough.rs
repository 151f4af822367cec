//! # Custody Walkthrough
//!
//! Runs one batch through the whole chain against an in-memory ledger:
//!
//! 1. Admin registers producer, transporter, distributor, retailer
//! 2. Producer creates "Tomatoes" (100 kg) and hands out the customer link
//! 3. Custody moves Producer → Transporter; an out-of-range reading is
//!    rejected locally, a valid one is recorded
//! 4. Custody moves on to Distributor and Retailer
//! 5. Retailer approves the batch; the customer queries the report

use crate::config::RuntimeConfig;
use crate::participants::ParticipantClient;
use anyhow::{bail, Context, Result};
use fc_02_sensor_validation::SensorReading;
use fc_04_batch_store::InMemoryLedger;
use fc_05_provenance::ProvenanceReport;
use shared_types::{BatchId, Identity, Role, UserStatus};
use std::sync::Arc;
use tracing::info;

/// One status line, attributed to the acting role.
#[derive(Debug, Clone)]
pub struct Step {
    /// Who acted.
    pub actor: Role,
    /// What they saw.
    pub status: UserStatus,
}

/// Everything the walkthrough produced.
#[derive(Debug, Clone)]
pub struct WalkthroughOutcome {
    /// Status lines in order.
    pub steps: Vec<Step>,
    /// Customer link for the batch.
    pub traceability_link: String,
    /// Final provenance report.
    pub report: ProvenanceReport,
}

/// Run the walkthrough with the given configuration.
pub async fn run(config: &RuntimeConfig) -> Result<WalkthroughOutcome> {
    let ledger = Arc::new(InMemoryLedger::new(
        config
            .ledger_config()
            .context("Failed to build ledger configuration")?,
    ));
    let policy = config.confirmation_policy();
    let client = |identity: Identity| ParticipantClient::new(ledger.clone(), identity, policy);

    let admin = client(config.admin);
    let producer = client(Identity::from_low_u64(0x0200));
    let transporter = client(Identity::from_low_u64(0x0300));
    let distributor = client(Identity::from_low_u64(0x0400));
    let retailer = client(Identity::from_low_u64(0x0500));

    let mut steps = Vec::new();
    let mut record = |actor: Role, status: UserStatus| {
        info!(actor = %actor, status = %status, "Walkthrough step");
        steps.push(Step { actor, status });
    };

    for (role, who) in [
        (Role::Producer, &producer),
        (Role::Transporter, &transporter),
        (Role::Distributor, &distributor),
        (Role::Retailer, &retailer),
    ] {
        record(Role::Admin, admin.register(role, who.identity()).await);
    }

    let id = BatchId::new(1).context("Invalid batch id")?;
    record(Role::Producer, producer.create_batch(id, "Tomatoes", 100).await);
    let link = producer.traceability_link(&config.customer_base_url, id);

    record(
        Role::Producer,
        producer
            .transfer(id, transporter.identity(), Role::Transporter)
            .await,
    );
    record(
        Role::Transporter,
        transporter
            .add_sensor_data(id, SensorReading::new(50, 10, "Warehouse-1"))
            .await,
    );
    record(
        Role::Transporter,
        transporter
            .add_sensor_data(id, SensorReading::new(4, 10, "Warehouse-1"))
            .await,
    );
    record(
        Role::Transporter,
        transporter
            .transfer(id, distributor.identity(), Role::Distributor)
            .await,
    );
    record(
        Role::Distributor,
        distributor
            .transfer(id, retailer.identity(), Role::Retailer)
            .await,
    );
    record(Role::Retailer, retailer.finalize(id, true).await);

    let report = match retailer.query(id).await {
        Ok(report) => report,
        Err(status) => bail!("Provenance query failed: {status}"),
    };

    Ok(WalkthroughOutcome {
        steps,
        traceability_link: link,
        report,
    })
}
