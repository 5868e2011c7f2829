//! The order book snapshot for a single pair, for a single batch (C6).
//!
//! Built fresh from a batch's pending orders every cycle -- there is no
//! persistent book across batches, since each `BatchState` resets on
//! settlement (§4.8 "Reset"). Uses `BTreeMap` for price-level ordering, the
//! same shape the teacher used for its continuous book:
//! - **Bids** (buys): `BTreeMap<Reverse<Amount>, PriceLevel>` -- highest price first
//! - **Asks** (sells): `BTreeMap<Amount, PriceLevel>` -- lowest price first
//!
//! Each level's volume comes from the privacy-preserving estimator (C5),
//! never from a decrypted amount.

use std::cmp::Reverse;
use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use veilmatch_estimator::{EstimateInput, ReferenceThresholdCache, estimate_volume};
use veilmatch_types::{Amount, Order, OrderSide, PairId};

use crate::price_level::{BookEntry, PriceLevel};

/// A point-in-time order book for one pair, built from the pending orders
/// in a `BatchState` at the moment the batch is sealed for processing.
#[derive(Debug)]
pub struct OrderBook {
    pub pair_id: PairId,
    bids: BTreeMap<Reverse<Amount>, PriceLevel>,
    asks: BTreeMap<Amount, PriceLevel>,
}

impl OrderBook {
    /// Create a new empty book for `pair_id`.
    #[must_use]
    pub fn empty(pair_id: PairId) -> Self {
        Self {
            pair_id,
            bids: BTreeMap::new(),
            asks: BTreeMap::new(),
        }
    }

    /// Build a book from a batch's orders, estimating each order's volume
    /// with `cache` (C5). Orders that are not pending, or belong to a
    /// different pair, are skipped.
    #[must_use]
    pub fn build(
        pair_id: PairId,
        orders: &[&Order],
        cache: &ReferenceThresholdCache,
        now: DateTime<Utc>,
    ) -> Self {
        let mut book = Self::empty(pair_id);
        for order in orders {
            if !order.is_pending() || order.pair_id != pair_id {
                continue;
            }
            let encrypted = veilmatch_zk::codec::serialize(&order.encrypted_amount);
            let volume = estimate_volume(
                cache,
                EstimateInput {
                    encrypted_amount: &encrypted,
                    pair_id,
                    side: order.side,
                    price: order.public_price.to_u128_saturating(),
                    age_minutes: order.age_minutes(now),
                },
            );
            book.insert(order, volume);
        }
        book
    }

    fn insert(&mut self, order: &Order, volume: u128) {
        let entry = BookEntry {
            order_id: order.id,
            trader: order.trader,
            volume,
        };
        match order.side {
            OrderSide::Buy => self
                .bids
                .entry(Reverse(order.public_price))
                .or_insert_with(|| PriceLevel::new(order.public_price))
                .push(entry),
            OrderSide::Sell => self
                .asks
                .entry(order.public_price)
                .or_insert_with(|| PriceLevel::new(order.public_price))
                .push(entry),
        }
    }

    /// Insert an entry directly at a given price with an explicit volume,
    /// bypassing the estimator entirely. Used by tests that need to pin
    /// exact book depth to check clearing-price arithmetic against known
    /// numbers (§8).
    #[cfg(any(test, feature = "test-helpers"))]
    pub fn insert_raw(&mut self, side: OrderSide, price: Amount, volume: u128) {
        let order_id = veilmatch_types::OrderId::from_bytes(rand::random());
        let trader = veilmatch_types::TraderAddress::from_bytes(rand::random());
        let entry = BookEntry {
            order_id,
            trader,
            volume,
        };
        match side {
            OrderSide::Buy => self
                .bids
                .entry(Reverse(price))
                .or_insert_with(|| PriceLevel::new(price))
                .push(entry),
            OrderSide::Sell => self
                .asks
                .entry(price)
                .or_insert_with(|| PriceLevel::new(price))
                .push(entry),
        }
    }

    /// Best (highest) bid price, or `None` if no bids.
    #[must_use]
    pub fn best_bid(&self) -> Option<Amount> {
        self.bids.keys().next().map(|r| r.0)
    }

    /// Best (lowest) ask price, or `None` if no asks.
    #[must_use]
    pub fn best_ask(&self) -> Option<Amount> {
        self.asks.keys().next().copied()
    }

    /// Iterate bid levels from highest price to lowest.
    pub fn bid_levels(&self) -> impl Iterator<Item = &PriceLevel> {
        self.bids.values()
    }

    /// Iterate ask levels from lowest price to highest.
    pub fn ask_levels(&self) -> impl Iterator<Item = &PriceLevel> {
        self.asks.values()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bids.is_empty() && self.asks.is_empty()
    }

    #[must_use]
    pub fn bid_depth(&self) -> usize {
        self.bids.len()
    }

    #[must_use]
    pub fn ask_depth(&self) -> usize {
        self.asks.len()
    }
}
