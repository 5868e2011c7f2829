//! An in-memory [`DexClient`] for tests, grounded on the teacher's
//! in-process epoch-pipeline test harness: a small synchronous store the
//! test drives directly, wrapped in async methods so it satisfies the
//! trait without a real chain connection.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use veilmatch_types::{
    BatchId, Error, Order, OrderId, PairId, PairInfo, Result, Settlement, TraderAddress,
};
use veilmatch_zk::Point;

use crate::client::DexClient;

#[derive(Default)]
struct MockState {
    batch_id: BatchId,
    deadline: DateTime<Utc>,
    orders: HashMap<PairId, Vec<Order>>,
    pair_infos: HashMap<PairId, PairInfo>,
    public_keys: HashMap<TraderAddress, Point>,
    settlements: Vec<Settlement>,
}

/// An in-memory stand-in for the DEX contract, used by integration tests
/// (§8 scenarios S1-S6).
pub struct MockDexClient {
    state: Mutex<MockState>,
}

impl MockDexClient {
    #[must_use]
    pub fn new(batch_id: BatchId, deadline: DateTime<Utc>) -> Self {
        Self {
            state: Mutex::new(MockState {
                batch_id,
                deadline,
                ..Default::default()
            }),
        }
    }

    pub fn insert_order(&self, order: Order) {
        let mut state = self.state.lock().expect("lock poisoned");
        state.orders.entry(order.pair_id).or_default().push(order);
    }

    pub fn cancel_order(&self, pair_id: PairId, order_id: OrderId) {
        let mut state = self.state.lock().expect("lock poisoned");
        if let Some(orders) = state.orders.get_mut(&pair_id) {
            for order in orders.iter_mut() {
                if order.id == order_id {
                    order.mark_cancelled();
                }
            }
        }
    }

    pub fn set_pair_info(&self, info: PairInfo) {
        let mut state = self.state.lock().expect("lock poisoned");
        state.pair_infos.insert(info.pair_id, info);
    }

    pub fn register_key(&self, trader: TraderAddress, public_key: Point) {
        let mut state = self.state.lock().expect("lock poisoned");
        state.public_keys.insert(trader, public_key);
    }

    pub fn advance_batch(&self, batch_id: BatchId, deadline: DateTime<Utc>) {
        let mut state = self.state.lock().expect("lock poisoned");
        state.batch_id = batch_id;
        state.deadline = deadline;
        state.orders.clear();
    }

    #[must_use]
    pub fn settlements(&self) -> Vec<Settlement> {
        self.state.lock().expect("lock poisoned").settlements.clone()
    }
}

impl DexClient for MockDexClient {
    async fn batch_info(&self) -> Result<(BatchId, DateTime<Utc>)> {
        let state = self.state.lock().expect("lock poisoned");
        Ok((state.batch_id, state.deadline))
    }

    async fn orders(&self, pair_id: PairId) -> Result<Vec<Order>> {
        let state = self.state.lock().expect("lock poisoned");
        Ok(state.orders.get(&pair_id).cloned().unwrap_or_default())
    }

    async fn token_pairs(&self, pair_id: PairId) -> Result<PairInfo> {
        let state = self.state.lock().expect("lock poisoned");
        state
            .pair_infos
            .get(&pair_id)
            .cloned()
            .ok_or(Error::UnknownPair(pair_id))
    }

    async fn active_order_ids(&self, pair_id: PairId) -> Result<Vec<OrderId>> {
        let state = self.state.lock().expect("lock poisoned");
        Ok(state
            .orders
            .get(&pair_id)
            .map(|orders| orders.iter().filter(|o| o.is_pending()).map(|o| o.id).collect())
            .unwrap_or_default())
    }

    async fn trader_public_key(&self, trader: TraderAddress) -> Result<Point> {
        let state = self.state.lock().expect("lock poisoned");
        state.public_keys.get(&trader).copied().ok_or(Error::InvalidInput {
            reason: format!("no registered public key for {trader}"),
        })
    }

    async fn settle_batch(&self, settlement: &Settlement) -> Result<String> {
        let mut state = self.state.lock().expect("lock poisoned");
        for order_id in &settlement.matched_order_ids {
            for orders in state.orders.values_mut() {
                for order in orders.iter_mut() {
                    if order.id == *order_id {
                        order.mark_filled();
                    }
                }
            }
        }
        state.settlements.push(settlement.clone());
        Ok(format!("0x{}", hex::encode(settlement.settlement_proof.get(..8).unwrap_or(&[]))))
    }
}
