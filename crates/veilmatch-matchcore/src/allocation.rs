//! Pro-rata fill allocation (C7, §4.7).
//!
//! Once the clearing price is known, every order that crosses it receives
//! a fill proportional to its own estimated volume, not a time-priority
//! walk -- there is no FIFO here, unlike the teacher's continuous matcher.
//! `fill = min(v * r, v)` where `r` is the side's fill ratio
//! `min(qB, qS) / side_volume`, computed in `Decimal` the way the teacher
//! keeps all fractional quantity arithmetic off bare floats.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use veilmatch_types::{OrderId, OrderSide, TraderAddress};

use crate::clearing::ClearingResult;
use crate::orderbook::OrderBook;

/// A single order's allocated fill at the batch's uniform clearing price.
#[derive(Debug, Clone, Copy)]
pub struct Fill {
    pub order_id: OrderId,
    pub trader: TraderAddress,
    pub side: OrderSide,
    pub amount: u128,
}

/// Allocate pro-rata fills to every order crossing `clearing.clearing_price`.
///
/// Orders resting strictly on the non-crossing side of the price (bids
/// below it, asks above it) receive no fill and are omitted from the
/// result.
#[must_use]
pub fn allocate_fills(book: &OrderBook, clearing: &ClearingResult) -> Vec<Fill> {
    let price = clearing.clearing_price;

    let buy_volume: u128 = book
        .bid_levels()
        .filter(|level| level.price >= price)
        .map(|level| level.total_volume())
        .sum();
    let sell_volume: u128 = book
        .ask_levels()
        .filter(|level| level.price <= price)
        .map(|level| level.total_volume())
        .sum();
    let matched = buy_volume.min(sell_volume);

    let buy_ratio = ratio(matched, buy_volume);
    let sell_ratio = ratio(matched, sell_volume);

    let mut fills = Vec::new();
    for level in book.bid_levels().filter(|level| level.price >= price) {
        for entry in level.entries() {
            fills.push(Fill {
                order_id: entry.order_id,
                trader: entry.trader,
                side: OrderSide::Buy,
                amount: prorated(entry.volume, buy_ratio),
            });
        }
    }
    for level in book.ask_levels().filter(|level| level.price <= price) {
        for entry in level.entries() {
            fills.push(Fill {
                order_id: entry.order_id,
                trader: entry.trader,
                side: OrderSide::Sell,
                amount: prorated(entry.volume, sell_ratio),
            });
        }
    }
    fills
}

/// `q / side_volume`, or `Decimal::ZERO` when the side has no volume at all
/// (can only happen if `matched` is also `0`, in which case the ratio is
/// never applied to a nonzero ratio numerator anyway).
fn ratio(q: u128, side_volume: u128) -> Decimal {
    if side_volume == 0 {
        return Decimal::ZERO;
    }
    let q = Decimal::try_from(q).unwrap_or(Decimal::MAX);
    let side_volume = Decimal::try_from(side_volume).unwrap_or(Decimal::MAX);
    q / side_volume
}

/// `min(v * r, v)`. The final integerisation rounds half-to-even (§9),
/// matching the estimator's own rounding policy, then caps at `v` since
/// half-to-even can round a ratio fractionally above 1.0 upward.
fn prorated(v: u128, r: Decimal) -> u128 {
    let v_decimal = Decimal::try_from(v).unwrap_or(Decimal::MAX);
    let scaled = (v_decimal * r)
        .max(Decimal::ZERO)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven);
    scaled.to_u128().unwrap_or(0).min(v)
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use veilmatch_estimator::ReferenceThresholdCache;
    use veilmatch_types::{Order, PairId};

    use super::*;
    use crate::clearing::compute_clearing_price;

    fn pair() -> PairId {
        PairId::from_bytes([5; 32])
    }

    fn book(orders: &[Order]) -> OrderBook {
        let cache = ReferenceThresholdCache::new();
        let refs: Vec<&Order> = orders.iter().collect();
        OrderBook::build(pair(), &refs, &cache, Utc::now())
    }

    #[test]
    fn fills_never_exceed_own_volume() {
        let orders = vec![
            Order::dummy(OrderSide::Buy, 105, pair()),
            Order::dummy(OrderSide::Buy, 100, pair()),
            Order::dummy(OrderSide::Sell, 95, pair()),
            Order::dummy(OrderSide::Sell, 90, pair()),
        ];
        let book = book(&orders);
        let Some(clearing) = compute_clearing_price(&book) else {
            return;
        };
        let fills = allocate_fills(&book, &clearing);
        for level in book.bid_levels().chain(book.ask_levels()) {
            for entry in level.entries() {
                if let Some(fill) = fills.iter().find(|f| f.order_id == entry.order_id) {
                    assert!(fill.amount <= entry.volume);
                }
            }
        }
    }

    #[test]
    fn non_crossing_orders_receive_no_fill() {
        let orders = vec![
            Order::dummy(OrderSide::Buy, 100, pair()),
            Order::dummy(OrderSide::Buy, 50, pair()),
            Order::dummy(OrderSide::Sell, 100, pair()),
        ];
        let book = book(&orders);
        if let Some(clearing) = compute_clearing_price(&book) {
            let fills = allocate_fills(&book, &clearing);
            let low_bid = orders[1].id;
            assert!(fills.iter().all(|f| f.order_id != low_bid));
        }
    }

    #[test]
    fn empty_book_allocates_nothing() {
        let book = OrderBook::empty(pair());
        let clearing = ClearingResult {
            clearing_price: veilmatch_types::Amount::from_u128(100),
            matched_volume: 0,
        };
        assert!(allocate_fills(&book, &clearing).is_empty());
    }
}
