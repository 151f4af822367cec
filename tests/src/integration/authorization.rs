//! # Authorization Scenarios
//!
//! Callers acting outside their role or out of turn. Every rejected call
//! must leave the ledger exactly as it was.

#[cfg(test)]
mod tests {
    use crate::integration::fixtures::*;
    use fc_01_role_registry::{RegistrationService, RoleRegistryApi};
    use fc_04_batch_store::{InMemoryLedger, LedgerConfig};
    use shared_types::{
        ConfirmationPolicy, ErrorKind, LedgerError, Role, SupplyChainLedger,
    };

    const STRANGER: u64 = 0x0999;

    #[tokio::test]
    async fn test_unregistered_create_leaves_store_unchanged() {
        let (ledger, _) = registered_ledger(LedgerConfig::default()).await;

        let err = ledger
            .create_batch(who(STRANGER), batch(1), "Tomatoes", 100)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotAuthorized);
        assert_eq!(ledger.batch_count(), 0);
        assert_eq!(
            ledger.get_batch_history(batch(1)).await.unwrap_err().kind(),
            ErrorKind::NotFound
        );
    }

    #[tokio::test]
    async fn test_only_admin_registers() {
        let ledger = std::sync::Arc::new(InMemoryLedger::new(LedgerConfig::default()));
        let impostor = RegistrationService::new(
            ledger.clone(),
            who(STRANGER),
            ConfirmationPolicy::default(),
        );

        let err = impostor
            .register(Role::Producer, who(STRANGER))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotAuthorized);
        assert_eq!(ledger.role_of(who(STRANGER)).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_one_role_per_identity() {
        let (ledger, _) = registered_ledger(LedgerConfig::default()).await;

        let err = ledger
            .register_retailer(who(ADMIN), who(PRODUCER))
            .await
            .unwrap_err();
        assert!(matches!(err, LedgerError::AlreadyRegistered { .. }));
        assert_eq!(ledger.role_of(who(PRODUCER)).await.unwrap(), Some(Role::Producer));
    }

    #[tokio::test]
    async fn test_previous_owner_cannot_act_after_handoff() {
        let (ledger, _) = registered_ledger(LedgerConfig::default()).await;
        let id = batch(1);
        ledger
            .create_batch(who(PRODUCER), id, "Tomatoes", 100)
            .await
            .unwrap();
        ledger
            .transfer_ownership(who(PRODUCER), id, who(TRANSPORTER))
            .await
            .unwrap();
        let before = record(&ledger, id).await;

        // Producer no longer holds custody
        let err = ledger
            .transfer_ownership(who(PRODUCER), id, who(TRANSPORTER))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotAuthorized);

        assert_eq!(record(&ledger, id).await, before);
    }

    #[tokio::test]
    async fn test_non_owner_transporter_cannot_log() {
        let (ledger, _) = registered_ledger(LedgerConfig::default()).await;
        let second_transporter = who(0x0301);
        ledger
            .register_transporter(who(ADMIN), second_transporter)
            .await
            .unwrap();

        let id = batch(1);
        ledger
            .create_batch(who(PRODUCER), id, "Tomatoes", 100)
            .await
            .unwrap();
        ledger
            .transfer_ownership(who(PRODUCER), id, who(TRANSPORTER))
            .await
            .unwrap();

        let err = ledger
            .add_sensor_data(second_transporter, id, 4, 10, "Elsewhere")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotAuthorized);
        assert!(record(&ledger, id).await.sensor_logs.is_empty());
    }

    #[tokio::test]
    async fn test_skipping_a_custody_step_is_rejected() {
        let (ledger, _) = registered_ledger(LedgerConfig::default()).await;
        let id = batch(1);
        ledger
            .create_batch(who(PRODUCER), id, "Tomatoes", 100)
            .await
            .unwrap();

        let err = ledger
            .transfer_ownership(who(PRODUCER), id, who(RETAILER))
            .await
            .unwrap_err();
        match err {
            LedgerError::InvalidRoleTransition {
                expected, actual, ..
            } => {
                assert_eq!(expected, Role::Transporter);
                assert_eq!(actual, Some(Role::Retailer));
            }
            other => panic!("expected InvalidRoleTransition, got {other:?}"),
        }
        assert_eq!(record(&ledger, id).await.current_owner, who(PRODUCER));
    }

    #[tokio::test]
    async fn test_only_retailer_finalizes() {
        let (ledger, _) = registered_ledger(LedgerConfig::default()).await;
        let id = batch(1);
        ledger
            .create_batch(who(PRODUCER), id, "Tomatoes", 100)
            .await
            .unwrap();

        // Producer owns the batch but holds the wrong role
        let err = ledger
            .mark_as_arrived(who(PRODUCER), id, true)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotAuthorized);
        assert!(!record(&ledger, id).await.is_finalized);
    }
}
