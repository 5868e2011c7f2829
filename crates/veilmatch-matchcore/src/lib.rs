//! # veilmatch-matchcore
//!
//! **Deterministic uniform-price batch auction engine.**
//!
//! MatchCore is the compute plane -- it takes a pair's pending orders for
//! the current batch and produces a uniform clearing price plus pro-rata
//! fills. It has:
//!
//! - **Zero side effects**: no chain I/O, no balance checks, no proof generation
//! - **Deterministic output**: same orders, same estimator state -> same output
//! - **No time priority**: fills are pro-rata at the clearing price, not FIFO
//! - **Pair sharding**: each pair's book is built and cleared independently

use chrono::{DateTime, Utc};
use veilmatch_estimator::ReferenceThresholdCache;
use veilmatch_types::{Order, PairId};

pub mod allocation;
pub mod clearing;
pub mod determinism;
pub mod orderbook;
pub mod price_level;

pub use allocation::{Fill, allocate_fills};
pub use clearing::{ClearingResult, compute_clearing_price};
pub use determinism::{compute_match_root, verify_match_root};
pub use orderbook::OrderBook;
pub use price_level::PriceLevel;

/// The outcome of matching one pair for one batch: `None` when no
/// clearing price was found (§4.7 edge cases), `Some` otherwise.
#[derive(Debug, Clone)]
pub struct MatchOutcome {
    pub clearing: ClearingResult,
    pub fills: Vec<Fill>,
}

/// Run the full C6+C7 pipeline for one pair: build the book, find the
/// clearing price, and allocate fills. Convenience entry point for the
/// driver (C8), which still needs the pair's `Settlement` wrapped with an
/// encrypted fill vector and a proof (C3) once this returns.
#[must_use]
pub fn match_pair(
    pair_id: PairId,
    orders: &[&Order],
    cache: &ReferenceThresholdCache,
    now: DateTime<Utc>,
) -> Option<MatchOutcome> {
    let book = OrderBook::build(pair_id, orders, cache, now);
    let clearing = compute_clearing_price(&book)?;
    let fills = allocate_fills(&book, &clearing);
    Some(MatchOutcome { clearing, fills })
}

#[cfg(test)]
mod tests {
    use veilmatch_types::{Amount, OrderSide};

    use super::*;

    fn pair() -> PairId {
        PairId::from_bytes([6; 32])
    }

    #[test]
    fn match_pair_returns_none_when_no_crossing() {
        let cache = ReferenceThresholdCache::new();
        let buy = Order::dummy(OrderSide::Buy, 99, pair());
        let sell = Order::dummy(OrderSide::Sell, 101, pair());
        let orders = vec![&buy, &sell];
        assert!(match_pair(pair(), &orders, &cache, Utc::now()).is_none());
    }

    #[test]
    fn match_pair_produces_fills_when_crossing() {
        let cache = ReferenceThresholdCache::new();
        let buy = Order::dummy(OrderSide::Buy, 105, pair());
        let sell = Order::dummy(OrderSide::Sell, 95, pair());
        let orders = vec![&buy, &sell];
        let outcome = match_pair(pair(), &orders, &cache, Utc::now());
        assert!(outcome.is_some());
        let outcome = outcome.unwrap();
        assert!(outcome.clearing.clearing_price >= Amount::from_u128(95));
        assert!(outcome.clearing.clearing_price <= Amount::from_u128(105));
    }
}
