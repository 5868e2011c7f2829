//! Determinism verification utilities for cross-run consistency (§8
//! invariant: "processing the same batch twice yields an identical
//! settlement").
//!
//! Adapted from the teacher's trade-root hashing: a domain-separated
//! digest over the allocation output lets a caller cheaply confirm two
//! matching runs agree without re-running the match.

use sha2::{Digest, Sha256};
use veilmatch_types::Amount;

use crate::allocation::Fill;

/// Compute a deterministic digest over a clearing price and its fills.
///
/// The same clearing price and fill set, in the same order, always
/// produces the same digest.
#[must_use]
pub fn compute_match_root(clearing_price: Amount, fills: &[Fill]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(b"veilmatch:match_root:v1:");
    hasher.update(clearing_price.as_bytes());
    hasher.update((fills.len() as u64).to_le_bytes());

    for fill in fills {
        hasher.update(fill.order_id.as_bytes());
        hasher.update(fill.trader.as_bytes());
        hasher.update([matches!(fill.side, veilmatch_types::OrderSide::Buy) as u8]);
        hasher.update(fill.amount.to_le_bytes());
    }

    let result = hasher.finalize();
    let mut root = [0u8; 32];
    root.copy_from_slice(&result);
    root
}

/// Verify that a given match root matches the expected hash.
#[must_use]
pub fn verify_match_root(clearing_price: Amount, fills: &[Fill], expected_root: &[u8; 32]) -> bool {
    compute_match_root(clearing_price, fills) == *expected_root
}
