//! Fixed-size opaque identifiers used throughout the solver.
//!
//! On-chain identifiers (order IDs, trader addresses, pair IDs) are raw
//! byte arrays, matching how the teacher represents `NodeId` as a raw
//! ed25519 public key rather than a UUID — here generalised from one such
//! type to the handful the wire protocol defines (§3, §6). `BatchId` stays
//! a plain counter, and [`SettlementId`] is the one UUIDv7 identifier left,
//! reserved for the solver's own internal bookkeeping where the spec is
//! silent on representation.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// OrderId
// ---------------------------------------------------------------------------

/// Opaque 32-byte order identifier assigned by the DEX contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct OrderId(pub [u8; 32]);

impl OrderId {
    #[must_use]
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "order:{}", hex::encode(&self.0[..8]))
    }
}

// ---------------------------------------------------------------------------
// TraderAddress
// ---------------------------------------------------------------------------

/// A 20-byte on-chain address identifying the order's submitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct TraderAddress(pub [u8; 20]);

impl TraderAddress {
    #[must_use]
    pub fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }
}

impl fmt::Display for TraderAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

// ---------------------------------------------------------------------------
// PairId
// ---------------------------------------------------------------------------

/// A 32-byte digest identifying a trading pair: `keccak256(tokenA ‖ tokenB)`
/// in the declared ordering (§6). We do not compute the digest here — it
/// arrives pre-computed from the DEX contract — only wrap it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct PairId(pub [u8; 32]);

impl PairId {
    #[must_use]
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for PairId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pair:{}", hex::encode(&self.0[..8]))
    }
}

// ---------------------------------------------------------------------------
// BatchId
// ---------------------------------------------------------------------------

/// Monotonically increasing identifier for a batch cycle, supplied by the
/// DEX contract's `BatchStarted` event.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct BatchId(pub u64);

impl BatchId {
    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for BatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "batch:{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// SettlementId (solver-internal bookkeeping only)
// ---------------------------------------------------------------------------

/// Internal identifier for a prepared settlement, used to dedupe
/// submission retries. The spec is silent on its representation; we use
/// UUIDv7 the way the teacher identifies internal-only entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct SettlementId(pub Uuid);

impl SettlementId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for SettlementId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SettlementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "settlement:{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_id_display_is_hex_prefixed() {
        let id = OrderId::from_bytes([1u8; 32]);
        assert!(format!("{id}").starts_with("order:"));
    }

    #[test]
    fn trader_address_roundtrips_bytes() {
        let addr = TraderAddress::from_bytes([0xAB; 20]);
        assert_eq!(addr.as_bytes(), &[0xABu8; 20]);
    }

    #[test]
    fn batch_id_next_increments() {
        assert_eq!(BatchId(5).next(), BatchId(6));
    }

    #[test]
    fn settlement_id_uniqueness() {
        assert_ne!(SettlementId::new(), SettlementId::new());
    }

    #[test]
    fn serde_roundtrip() {
        let id = OrderId::from_bytes([9u8; 32]);
        let json = serde_json::to_string(&id).unwrap();
        let back: OrderId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
    }
}
