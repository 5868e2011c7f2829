//! Uniform clearing-price discovery (C7, §4.7).
//!
//! Ported from the legacy `openmatch-core` matching kernel's
//! maximize-matched-volume search, which already computed
//! `matchable(p) = min(demand(p), supply(p))` over every distinct order
//! price and picked the best. The one behavioural change from that legacy
//! routine is the tie-break: ties there favoured the smallest imbalance
//! then the highest price; here the tie-break is fixed to the lowest
//! price among volume-maximizing candidates, per this system's pricing
//! rule.

use std::collections::BTreeSet;

use veilmatch_types::Amount;

use crate::orderbook::OrderBook;

/// The discovered clearing price and the volume that trades at it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClearingResult {
    pub clearing_price: Amount,
    pub matched_volume: u128,
}

/// Cumulative buy volume at prices `>= p` (§4.7 `B(p)`).
fn cumulative_buy_volume(book: &OrderBook, p: Amount) -> u128 {
    book.bid_levels()
        .filter(|level| level.price >= p)
        .map(|level| level.total_volume())
        .sum()
}

/// Cumulative sell volume at prices `<= p` (§4.7 `S(p)`).
fn cumulative_sell_volume(book: &OrderBook, p: Amount) -> u128 {
    book.ask_levels()
        .filter(|level| level.price <= p)
        .map(|level| level.total_volume())
        .sum()
}

/// Find the uniform clearing price that maximizes matched volume (§4.7).
///
/// Returns `None` when either side of the book is empty, when the best
/// bid is below the best ask (no crossing), or when the maximal matched
/// volume across all candidate prices is zero.
#[must_use]
pub fn compute_clearing_price(book: &OrderBook) -> Option<ClearingResult> {
    let best_bid = book.best_bid()?;
    let best_ask = book.best_ask()?;
    if best_bid < best_ask {
        return None;
    }

    // Candidate prices are the union of every distinct order price on
    // either side -- the matched-volume function is piecewise constant
    // between them, so the optimum always falls on one of them.
    let mut candidates: BTreeSet<Amount> = BTreeSet::new();
    for level in book.bid_levels() {
        candidates.insert(level.price);
    }
    for level in book.ask_levels() {
        candidates.insert(level.price);
    }

    let mut best: Option<ClearingResult> = None;
    for price in candidates {
        let demand = cumulative_buy_volume(book, price);
        let supply = cumulative_sell_volume(book, price);
        let matched = demand.min(supply);

        let replace = match best {
            None => true,
            // `candidates` iterates in ascending order, so keeping the
            // first strictly-greater match already yields the lowest
            // price among ties.
            Some(current) => matched > current.matched_volume,
        };
        if replace {
            best = Some(ClearingResult {
                clearing_price: price,
                matched_volume: matched,
            });
        }
    }

    best.filter(|result| result.matched_volume > 0)
}
