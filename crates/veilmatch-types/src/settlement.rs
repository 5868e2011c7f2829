//! Settlement model (§3 `Settlement`).

use serde::{Deserialize, Serialize};
use veilmatch_zk::Ciphertext;

use crate::amount::Amount;
use crate::ids::{OrderId, PairId};

/// The result of matching one pair for one batch: a uniform clearing price
/// plus the matched order fills, ready for submission via `settle_batch`
/// (§6). Produced once per pair per batch; consumed by the submission step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settlement {
    pub pair_id: PairId,
    pub clearing_price: Amount,
    pub matched_order_ids: Vec<OrderId>,
    pub encrypted_fill_amounts: Vec<Ciphertext>,
    pub settlement_proof: Vec<u8>,
}

impl Settlement {
    /// Invariant check: `|matched_order_ids| == |encrypted_fill_amounts|` (§3).
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        self.matched_order_ids.len() == self.encrypted_fill_amounts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn well_formed_requires_equal_lengths() {
        let settlement = Settlement {
            pair_id: PairId::from_bytes([1; 32]),
            clearing_price: Amount::from_u128(1000),
            matched_order_ids: vec![OrderId::from_bytes([1; 32])],
            encrypted_fill_amounts: vec![],
            settlement_proof: vec![],
        };
        assert!(!settlement.is_well_formed());
    }
}
