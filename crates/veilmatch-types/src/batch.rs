//! Batch state (§3 `BatchState`).
//!
//! Single-writer, owned exclusively by the driver — mirrors the teacher's
//! `PendingBuffer` in spirit (push/seal/reset) but keeps a richer,
//! insertion-ordered map instead of a flat `Vec`, since cancellation and
//! per-pair grouping both need O(1) lookup by [`OrderId`].

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::ids::{BatchId, OrderId, PairId};
use crate::order::Order;

/// Static metadata about a trading pair, cached for the lifetime of the node
/// (retained across batch resets per §4.8 "Reset").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PairInfo {
    pub pair_id: PairId,
    pub token_a: [u8; 20],
    pub token_b: [u8; 20],
    pub is_eerc20_a: bool,
    pub is_eerc20_b: bool,
}

/// The driver's single mutable view of in-flight orders for the current
/// batch. Insertion order is preserved (used as an allocation tie-break by
/// C6/C7); `token_pairs` survives batch resets, `orders` does not.
#[derive(Debug, Clone, Default)]
pub struct BatchState {
    pub batch_id: BatchId,
    pub deadline: chrono::DateTime<chrono::Utc>,
    order_sequence: Vec<OrderId>,
    orders: HashMap<OrderId, Order>,
    pub token_pairs: HashMap<PairId, PairInfo>,
}

impl BatchState {
    #[must_use]
    pub fn new(batch_id: BatchId, deadline: chrono::DateTime<chrono::Utc>) -> Self {
        Self {
            batch_id,
            deadline,
            order_sequence: Vec::new(),
            orders: HashMap::new(),
            token_pairs: HashMap::new(),
        }
    }

    /// Append a newly ingested order, preserving arrival order.
    pub fn insert_order(&mut self, order: Order) {
        if !self.orders.contains_key(&order.id) {
            self.order_sequence.push(order.id);
        }
        self.orders.insert(order.id, order);
    }

    /// Mark an order cancelled. Silently ignored if unknown (§4.8 "Cancel").
    pub fn cancel_order(&mut self, id: OrderId) {
        if let Some(order) = self.orders.get_mut(&id) {
            order.mark_cancelled();
        }
    }

    #[must_use]
    pub fn get(&self, id: OrderId) -> Option<&Order> {
        self.orders.get(&id)
    }

    pub fn get_mut(&mut self, id: OrderId) -> Option<&mut Order> {
        self.orders.get_mut(&id)
    }

    #[must_use]
    pub fn order_count(&self) -> usize {
        self.order_sequence.len()
    }

    /// Pending orders for a single pair, in ingest order — the snapshot C6
    /// builds an order book from.
    #[must_use]
    pub fn pending_orders_for_pair(&self, pair_id: PairId) -> Vec<&Order> {
        self.order_sequence
            .iter()
            .filter_map(|id| self.orders.get(id))
            .filter(|o| o.pair_id == pair_id && o.is_pending())
            .collect()
    }

    /// Distinct pair IDs with at least one order present in this batch.
    #[must_use]
    pub fn active_pairs(&self) -> Vec<PairId> {
        let mut seen = Vec::new();
        for id in &self.order_sequence {
            if let Some(order) = self.orders.get(id) {
                if !seen.contains(&order.pair_id) {
                    seen.push(order.pair_id);
                }
            }
        }
        seen
    }

    /// Truncate to the first `max` orders by ingest order — the documented
    /// deterministic policy when `maxOrdersPerBatch` is exceeded (§8).
    pub fn truncate_deterministic(&mut self, max: usize) {
        if self.order_sequence.len() <= max {
            return;
        }
        let dropped: Vec<OrderId> = self.order_sequence.split_off(max);
        for id in dropped {
            self.orders.remove(&id);
        }
    }

    /// Reset for a new batch (§4.8 "Reset"): clear orders, update
    /// `batch_id`/`deadline`, retain `token_pairs`.
    pub fn reset(&mut self, new_batch_id: BatchId, new_deadline: chrono::DateTime<chrono::Utc>) {
        self.batch_id = new_batch_id;
        self.deadline = new_deadline;
        self.order_sequence.clear();
        self.orders.clear();
    }
}
