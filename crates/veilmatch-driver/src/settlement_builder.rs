//! Assembles a [`Settlement`] from a [`MatchOutcome`] (C3 + C7 output).
//!
//! Grounded on the teacher's `batch_sealer.rs`: both take raw matching
//! output, attach a deterministic proof, and hand back an immutable,
//! submission-ready record. Here the proof is a content-bound hash
//! placeholder (C3) instead of a signed digest, and each fill amount is
//! individually re-encrypted under its trader's public key before
//! leaving the solver (§3).

use rand::rngs::OsRng;
use veilmatch_matchcore::MatchOutcome;
use veilmatch_types::{Error, PairId, Result, Settlement};
use veilmatch_zk::{Ciphertext, Scalar};

use crate::client::DexClient;

/// Build a settlement for one pair from its match outcome, encrypting
/// every fill under the owning trader's registered public key.
///
/// # Errors
/// Propagates whatever the client's `trader_public_key` lookup returns if a
/// trader has no registered key, and [`Error::ProofOversize`] if the
/// generated proof exceeds `MAX_PARAM_SIZE` (§7).
pub async fn build_settlement<C: DexClient>(
    client: &C,
    pair_id: PairId,
    outcome: &MatchOutcome,
) -> Result<Settlement> {
    let mut matched_order_ids = Vec::with_capacity(outcome.fills.len());
    let mut encrypted_fill_amounts = Vec::with_capacity(outcome.fills.len());

    let mut rng = OsRng;
    for fill in &outcome.fills {
        let public_key = client.trader_public_key(fill.trader).await?;
        #[allow(clippy::cast_possible_truncation)]
        let amount_scalar = Scalar::from_u64(fill.amount.min(u128::from(u64::MAX)) as u64);
        let (ciphertext, _r) = Ciphertext::encrypt_fresh(public_key, amount_scalar, &mut rng);
        matched_order_ids.push(fill.order_id);
        encrypted_fill_amounts.push(ciphertext);
    }

    let clearing_price = outcome.clearing.clearing_price;
    let settlement_proof = veilmatch_zk::proof::generate_settlement_proof(
        &matched_order_ids.iter().map(|id| *id.as_bytes()).collect::<Vec<_>>(),
        &encrypted_fill_amounts,
        clearing_price.as_bytes(),
    );

    if settlement_proof.len() > veilmatch_types::constants::MAX_PARAM_SIZE {
        return Err(Error::ProofOversize {
            actual: settlement_proof.len(),
            max: veilmatch_types::constants::MAX_PARAM_SIZE,
        });
    }

    Ok(Settlement {
        pair_id,
        clearing_price,
        matched_order_ids,
        encrypted_fill_amounts,
        settlement_proof,
    })
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use veilmatch_estimator::ReferenceThresholdCache;
    use veilmatch_types::{Order, OrderSide};
    use veilmatch_zk::{KeyPair, Scalar as ZkScalar};

    use super::*;
    use crate::mock::MockDexClient;
    use veilmatch_types::BatchId;

    #[tokio::test]
    async fn builds_settlement_with_encrypted_fills() {
        let pair_id = PairId::from_bytes([9; 32]);
        let client = MockDexClient::new(BatchId(1), Utc::now());
        client.set_pair_info(veilmatch_types::PairInfo {
            pair_id,
            token_a: [1; 20],
            token_b: [2; 20],
            is_eerc20_a: false,
            is_eerc20_b: false,
        });

        let buy = Order::dummy(OrderSide::Buy, 105, pair_id);
        let sell = Order::dummy(OrderSide::Sell, 95, pair_id);
        client.register_key(buy.trader, KeyPair::derive(ZkScalar::from_u64(11)).unwrap().public);
        client.register_key(sell.trader, KeyPair::derive(ZkScalar::from_u64(13)).unwrap().public);
        client.insert_order(buy.clone());
        client.insert_order(sell.clone());

        let cache = ReferenceThresholdCache::new();
        let orders = vec![&buy, &sell];
        let outcome = veilmatch_matchcore::match_pair(pair_id, &orders, &cache, Utc::now())
            .expect("crossing orders should clear");

        let settlement = build_settlement(&client, pair_id, &outcome).await.unwrap();
        assert!(settlement.is_well_formed());
        assert_eq!(
            settlement.matched_order_ids.len(),
            settlement.encrypted_fill_amounts.len()
        );
    }

    #[tokio::test]
    async fn missing_public_key_is_an_error() {
        let pair_id = PairId::from_bytes([10; 32]);
        let client = MockDexClient::new(BatchId(1), Utc::now());
        let buy = Order::dummy(OrderSide::Buy, 105, pair_id);
        let sell = Order::dummy(OrderSide::Sell, 95, pair_id);
        // Only register the buyer's key.
        client.register_key(buy.trader, KeyPair::derive(ZkScalar::from_u64(11)).unwrap().public);
        client.insert_order(buy.clone());
        client.insert_order(sell.clone());

        let cache = ReferenceThresholdCache::new();
        let orders = vec![&buy, &sell];
        let outcome = veilmatch_matchcore::match_pair(pair_id, &orders, &cache, Utc::now())
            .expect("crossing orders should clear");

        assert!(build_settlement(&client, pair_id, &outcome).await.is_err());
    }
}
