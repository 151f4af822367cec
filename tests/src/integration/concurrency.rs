//! # Concurrency
//!
//! Racing submissions against one shared ledger. Mutations are serialized,
//! so exactly one of a set of conflicting calls wins.

#[cfg(test)]
mod tests {
    use crate::integration::fixtures::*;
    use fc_04_batch_store::LedgerConfig;
    use rand::seq::SliceRandom;
    use shared_types::{ErrorKind, SupplyChainLedger};
    use std::collections::HashSet;

    const RACERS: usize = 16;

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_racing_creates_of_one_id() {
        let (ledger, _) = registered_ledger(LedgerConfig::default()).await;
        let id = batch(7);

        let handles: Vec<_> = (0..RACERS)
            .map(|i| {
                let ledger = ledger.clone();
                tokio::spawn(async move {
                    ledger
                        .create_batch(who(PRODUCER), id, &format!("Crate-{i}"), 10)
                        .await
                })
            })
            .collect();

        let mut committed = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(pending) => {
                    assert!(pending.wait().await.unwrap().is_committed());
                    committed += 1;
                }
                Err(err) => assert_eq!(err.kind(), ErrorKind::DuplicateId),
            }
        }
        assert_eq!(committed, 1);
        assert_eq!(ledger.batch_count(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_racing_transfers_from_one_owner() {
        let (ledger, _) = registered_ledger(LedgerConfig::default()).await;
        let transporters: Vec<_> = (0..RACERS as u64).map(|n| who(0x3000 + n)).collect();
        for t in &transporters {
            ledger.register_transporter(who(ADMIN), *t).await.unwrap();
        }

        let id = batch(1);
        ledger
            .create_batch(who(PRODUCER), id, "Tomatoes", 100)
            .await
            .unwrap();

        let mut order = transporters.clone();
        order.shuffle(&mut rand::thread_rng());

        let handles: Vec<_> = order
            .into_iter()
            .map(|recipient| {
                let ledger = ledger.clone();
                tokio::spawn(async move {
                    ledger
                        .transfer_ownership(who(PRODUCER), id, recipient)
                        .await
                        .map(|_| recipient)
                })
            })
            .collect();

        let mut winners = Vec::new();
        for handle in handles {
            match handle.await.unwrap() {
                Ok(recipient) => winners.push(recipient),
                Err(err) => assert_eq!(err.kind(), ErrorKind::NotAuthorized),
            }
        }
        assert_eq!(winners.len(), 1);

        let rec = record(&ledger, id).await;
        assert_eq!(rec.current_owner, winners[0]);
        assert_eq!(rec.ownership_history.len(), 2);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_independent_batches_do_not_interfere() {
        let (ledger, _) = registered_ledger(LedgerConfig::default()).await;

        let handles: Vec<_> = (1..=RACERS as u64)
            .map(|n| {
                let ledger = ledger.clone();
                tokio::spawn(async move {
                    let id = batch(n);
                    ledger.create_batch(who(PRODUCER), id, "Apples", n).await?;
                    ledger
                        .transfer_ownership(who(PRODUCER), id, who(TRANSPORTER))
                        .await?;
                    ledger
                        .add_sensor_data(who(TRANSPORTER), id, 5, 20, "Yard")
                        .await?;
                    ledger.get_batch_history(id).await.map(|_| id)
                })
            })
            .collect();

        let mut seen = HashSet::new();
        for handle in handles {
            assert!(seen.insert(handle.await.unwrap().unwrap()));
        }
        assert_eq!(ledger.batch_count(), RACERS);

        for n in 1..=RACERS as u64 {
            let rec = record(&ledger, batch(n)).await;
            assert_eq!(rec.quantity, n);
            assert_eq!(rec.current_owner, who(TRANSPORTER));
            assert_eq!(rec.sensor_logs.len(), 1);
        }
    }
}
