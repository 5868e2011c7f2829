//! Fixed-layout ciphertext serialization (C4).
//!
//! Canonical layout: `c1.x ‖ c1.y ‖ c2.x ‖ c2.y`, 32 bytes each, 128 bytes
//! total. A trailing 4-byte `{version, flags}` tag extends this to 132
//! bytes for the wire format (§4.4, §6).

use crate::curve::Point;
use crate::elgamal::Ciphertext;
use crate::error::CurveError;

/// Canonical layout with no trailing metadata tag.
pub const CANONICAL_LEN: usize = 128;
/// Wire layout including the 4-byte `{version, flags}` tag.
pub const WIRE_LEN: usize = 132;

/// Encode a ciphertext as the 128-byte canonical layout.
#[must_use]
pub fn serialize(ct: &Ciphertext) -> [u8; CANONICAL_LEN] {
    let mut out = [0u8; CANONICAL_LEN];
    let (c1x, c1y) = ct.c1.to_xy_bytes();
    let (c2x, c2y) = ct.c2.to_xy_bytes();
    out[0..32].copy_from_slice(&c1x);
    out[32..64].copy_from_slice(&c1y);
    out[64..96].copy_from_slice(&c2x);
    out[96..128].copy_from_slice(&c2y);
    out
}

/// Encode a ciphertext as the 132-byte wire layout with an explicit
/// version/flags tag.
#[must_use]
pub fn serialize_wire(ct: &Ciphertext, version: u8, flags: u8) -> [u8; WIRE_LEN] {
    let mut out = [0u8; WIRE_LEN];
    out[..CANONICAL_LEN].copy_from_slice(&serialize(ct));
    out[CANONICAL_LEN] = version;
    out[CANONICAL_LEN + 1] = flags;
    // out[130..132] reserved, left zero.
    out
}

/// Decode a ciphertext from either the 128-byte canonical layout or the
/// 132-byte wire layout. Any other length is rejected.
pub fn deserialize(bytes: &[u8]) -> Result<Ciphertext, CurveError> {
    match bytes.len() {
        CANONICAL_LEN | WIRE_LEN => {
            let c1 = Point::from_xy_bytes(&bytes[0..32], &bytes[32..64])?;
            let c2 = Point::from_xy_bytes(&bytes[64..96], &bytes[96..128])?;
            Ok(Ciphertext { c1, c2 })
        }
        other => Err(CurveError::InvalidEncoding {
            expected: CANONICAL_LEN,
            actual: other,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::Scalar;
    use crate::elgamal::{derive_public, Ciphertext};

    fn sample_ciphertext() -> Ciphertext {
        let public = derive_public(Scalar::from_u64(7)).unwrap();
        Ciphertext::encrypt(public, Scalar::from_u64(99), Scalar::from_u64(11))
    }

    #[test]
    fn canonical_roundtrip() {
        let ct = sample_ciphertext();
        let bytes = serialize(&ct);
        assert_eq!(bytes.len(), CANONICAL_LEN);
        let back = deserialize(&bytes).unwrap();
        assert_eq!(ct, back);
    }

    #[test]
    fn wire_roundtrip_ignores_tag() {
        let ct = sample_ciphertext();
        let bytes = serialize_wire(&ct, 1, 0);
        assert_eq!(bytes.len(), WIRE_LEN);
        let back = deserialize(&bytes).unwrap();
        assert_eq!(ct, back);
    }

    #[test]
    fn rejects_unknown_length() {
        let err = deserialize(&[0u8; 77]).unwrap_err();
        assert!(matches!(err, CurveError::InvalidEncoding { .. }));
    }
}
