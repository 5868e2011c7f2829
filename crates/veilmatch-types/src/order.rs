//! Order model (§3).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use veilmatch_zk::Ciphertext;

use crate::amount::Amount;
use crate::ids::{OrderId, PairId, TraderAddress};

/// Which side of the book an order rests on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderSide {
    Buy,
    Sell,
}

/// Lifecycle status of an order within its enclosing batch (§3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    Pending,
    Filled,
    PartiallyFilled,
    Cancelled,
}

/// An order as ingested from the DEX contract.
///
/// Amounts travel encrypted (`encrypted_amount`); only `public_price` is
/// cleartext. The solver never recovers the exact traded amount — only a
/// bounded estimate via `veilmatch_estimator`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub trader: TraderAddress,
    pub pair_id: PairId,
    pub side: OrderSide,
    pub public_price: Amount,
    pub encrypted_amount: Ciphertext,
    pub status: OrderStatus,
    pub timestamp: DateTime<Utc>,
}

impl Order {
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.status == OrderStatus::Pending
    }

    pub fn mark_cancelled(&mut self) {
        self.status = OrderStatus::Cancelled;
    }

    pub fn mark_filled(&mut self) {
        self.status = OrderStatus::Filled;
    }

    pub fn mark_partially_filled(&mut self) {
        self.status = OrderStatus::PartiallyFilled;
    }

    /// Age of this order relative to `now`, in whole minutes — used by the
    /// volume estimator's `recency_factor` (§4.5 step 5).
    #[must_use]
    pub fn age_minutes(&self, now: DateTime<Utc>) -> i64 {
        (now - self.timestamp).num_minutes().max(0)
    }
}

#[cfg(any(test, feature = "test-helpers"))]
impl Order {
    /// Build a dummy pending order for tests. `encrypted_amount` is a
    /// well-formed but meaningless ciphertext.
    #[must_use]
    pub fn dummy(side: OrderSide, price: u128, pair_id: PairId) -> Self {
        use veilmatch_zk::{derive_public, Scalar};
        let public = derive_public(Scalar::from_u64(1)).expect("nonzero key");
        let ct = Ciphertext::encrypt(public, Scalar::from_u64(0), Scalar::from_u64(1));
        Self {
            id: OrderId::from_bytes(rand::random()),
            trader: TraderAddress::from_bytes(rand::random()),
            pair_id,
            side,
            public_price: Amount::from_u128(price),
            encrypted_amount: ct,
            status: OrderStatus::Pending,
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_order_is_pending() {
        let order = Order::dummy(OrderSide::Buy, 1000, PairId::from_bytes([1; 32]));
        assert!(order.is_pending());
    }

    #[test]
    fn mark_cancelled_transitions_status() {
        let mut order = Order::dummy(OrderSide::Sell, 900, PairId::from_bytes([1; 32]));
        order.mark_cancelled();
        assert_eq!(order.status, OrderStatus::Cancelled);
        assert!(!order.is_pending());
    }

    #[test]
    fn age_minutes_nonnegative() {
        let order = Order::dummy(OrderSide::Buy, 1000, PairId::from_bytes([1; 32]));
        assert!(order.age_minutes(Utc::now()) >= 0);
    }
}
