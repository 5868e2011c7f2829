//! Unsigned 256-bit amount representation (§3, §9 "Numeric semantics").
//!
//! Prices and raw on-chain amounts are specified as unsigned 256-bit
//! integers. We represent them as a 32-byte big-endian newtype rather than
//! pulling in a dedicated U256 crate: the only operations this system
//! performs on on-chain amounts are checked addition, comparison, and
//! min — all of which a big-endian byte array supports directly via
//! lexicographic ordering, the same way the teacher's `NodeId([u8; 32])`
//! needs no numeric crate to support `Ord`.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// An unsigned 256-bit integer stored big-endian.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Amount(pub [u8; 32]);

impl Amount {
    pub const ZERO: Self = Self([0u8; 32]);

    #[must_use]
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Construct from a `u128`, zero-extended into the high bytes.
    #[must_use]
    pub fn from_u128(value: u128) -> Self {
        let mut bytes = [0u8; 32];
        bytes[16..].copy_from_slice(&value.to_be_bytes());
        Self(bytes)
    }

    /// Narrow to `u128`, saturating at `u128::MAX` if the value doesn't fit.
    #[must_use]
    pub fn to_u128_saturating(self) -> u128 {
        if self.0[..16].iter().any(|&b| b != 0) {
            return u128::MAX;
        }
        u128::from_be_bytes(self.0[16..].try_into().expect("16 bytes"))
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&b| b == 0)
    }

    /// Checked addition; `None` on overflow past 2^256-1.
    #[must_use]
    pub fn checked_add(self, other: Self) -> Option<Self> {
        let mut out = [0u8; 32];
        let mut carry: u16 = 0;
        for i in (0..32).rev() {
            let sum = u16::from(self.0[i]) + u16::from(other.0[i]) + carry;
            out[i] = (sum & 0xFF) as u8;
            carry = sum >> 8;
        }
        if carry != 0 {
            None
        } else {
            Some(Self(out))
        }
    }

    #[must_use]
    pub fn min(self, other: Self) -> Self {
        if self <= other {
            self
        } else {
            other
        }
    }
}

impl PartialOrd for Amount {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Amount {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}
