//! Baby Jubjub curve and scalar field primitives (C1).
//!
//! Wraps `ark-ed-on-bn254`'s twisted-Edwards instantiation of Baby Jubjub so
//! the rest of the workspace never names `ark_*` types directly — the same
//! boundary the teacher's crates keep around `rust_decimal::Decimal` or
//! `uuid::Uuid`.

use ark_ec::{AffineRepr, CurveGroup, Group};
use ark_ed_on_bn254::{EdwardsAffine, EdwardsProjective, Fr};
use ark_ff::{BigInteger, Field, PrimeField, UniformRand, Zero};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::CurveError;

/// An element of the Baby Jubjub scalar field (order `q ≈ 2^253`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scalar(#[serde(with = "scalar_serde")] pub(crate) Fr);

impl Scalar {
    /// The additive identity.
    #[must_use]
    pub fn zero() -> Self {
        Self(Fr::zero())
    }

    /// Reduce an arbitrary big-endian byte string modulo `q`.
    #[must_use]
    pub fn field_reduce(bytes: &[u8]) -> Self {
        Self(Fr::from_be_bytes_mod_order(bytes))
    }

    /// Parse a canonical 32-byte big-endian encoding, reducing mod `q`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CurveError> {
        if bytes.len() != 32 {
            return Err(CurveError::InvalidEncoding {
                expected: 32,
                actual: bytes.len(),
            });
        }
        Ok(Self::field_reduce(bytes))
    }

    /// Canonical 32-byte big-endian encoding.
    #[must_use]
    pub fn to_bytes(self) -> [u8; 32] {
        be_bytes_32(self.0.into_bigint().to_bytes_be())
    }

    /// Draw a uniformly random nonzero scalar.
    pub fn random_nonzero<R: Rng + ?Sized>(rng: &mut R) -> Self {
        loop {
            let candidate = Fr::rand(rng);
            if !candidate.is_zero() {
                return Self(candidate);
            }
        }
    }

    #[must_use]
    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    #[must_use]
    pub fn field_add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }

    #[must_use]
    pub fn field_mul(self, other: Self) -> Self {
        Self(self.0 * other.0)
    }

    #[must_use]
    pub fn field_neg(self) -> Self {
        Self(-self.0)
    }

    /// Multiplicative inverse. `None` for zero, which has no inverse.
    #[must_use]
    pub fn field_inv(self) -> Option<Self> {
        self.0.inverse().map(Self)
    }

    /// Convert a small non-negative integer into a scalar (used by the
    /// decryption search and by plaintext amounts).
    #[must_use]
    pub fn from_u64(value: u64) -> Self {
        Self(Fr::from(value))
    }
}

/// A point on the Baby Jubjub twisted Edwards curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point(#[serde(with = "point_serde")] pub(crate) EdwardsProjective);

impl Point {
    /// The canonical generator `G`.
    #[must_use]
    pub fn base_point() -> Self {
        Self(EdwardsProjective::generator())
    }

    #[must_use]
    pub fn identity() -> Self {
        Self(EdwardsProjective::zero())
    }

    #[must_use]
    pub fn point_add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }

    #[must_use]
    pub fn point_neg(self) -> Self {
        Self(-self.0)
    }

    #[must_use]
    pub fn scalar_mul(self, k: Scalar) -> Self {
        Self(self.0 * k.0)
    }

    /// Affine `(x, y)` coordinates, each a canonical 32-byte big-endian field element.
    #[must_use]
    pub fn to_xy_bytes(self) -> ([u8; 32], [u8; 32]) {
        let affine = self.0.into_affine();
        let (x, y) = affine.xy().unwrap_or((Default::default(), Default::default()));
        (
            be_bytes_32(x.into_bigint().to_bytes_be()),
            be_bytes_32(y.into_bigint().to_bytes_be()),
        )
    }

    /// Reconstruct a point from affine `(x, y)` byte encodings.
    ///
    /// Callers that received these bytes over the wire are trusted to have
    /// encoded a point produced by this module; out-of-band or adversarial
    /// byte strings are not guaranteed to land on the curve, matching C1's
    /// contract that only malformed (non-finite) encodings are rejected.
    pub fn from_xy_bytes(x: &[u8], y: &[u8]) -> Result<Self, CurveError> {
        if x.len() != 32 || y.len() != 32 {
            return Err(CurveError::InvalidEncoding {
                expected: 32,
                actual: x.len().max(y.len()),
            });
        }
        let fx = ark_ed_on_bn254::Fq::from_be_bytes_mod_order(x);
        let fy = ark_ed_on_bn254::Fq::from_be_bytes_mod_order(y);
        let affine = EdwardsAffine::new_unchecked(fx, fy);
        Ok(Self(affine.into_group()))
    }
}

fn be_bytes_32(mut bytes: Vec<u8>) -> [u8; 32] {
    if bytes.len() < 32 {
        let mut padded = vec![0u8; 32 - bytes.len()];
        padded.append(&mut bytes);
        bytes = padded;
    }
    let mut out = [0u8; 32];
    let start = bytes.len().saturating_sub(32);
    out.copy_from_slice(&bytes[start..]);
    out
}

mod scalar_serde {
    use ark_ed_on_bn254::Fr;
    use ark_ff::{BigInteger, PrimeField};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(value: &Fr, ser: S) -> Result<S::Ok, S::Error> {
        hex::encode(value.into_bigint().to_bytes_be()).serialize(ser)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<Fr, D::Error> {
        let s = String::deserialize(de)?;
        let bytes = hex::decode(s).map_err(serde::de::Error::custom)?;
        Ok(Fr::from_be_bytes_mod_order(&bytes))
    }
}

mod point_serde {
    use ark_ec::CurveGroup;
    use ark_ed_on_bn254::EdwardsProjective;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::Point;

    pub fn serialize<S: Serializer>(value: &EdwardsProjective, ser: S) -> Result<S::Ok, S::Error> {
        let (x, y) = Point(*value).to_xy_bytes();
        (hex::encode(x), hex::encode(y)).serialize(ser)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<EdwardsProjective, D::Error> {
        let (xs, ys): (String, String) = Deserialize::deserialize(de)?;
        let x = hex::decode(xs).map_err(serde::de::Error::custom)?;
        let y = hex::decode(ys).map_err(serde::de::Error::custom)?;
        Point::from_xy_bytes(&x, &y)
            .map(|p| p.0)
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_point_is_deterministic() {
        assert_eq!(Point::base_point(), Point::base_point());
    }

    #[test]
    fn scalar_mul_distributes_over_add() {
        let g = Point::base_point();
        let a = Scalar::from_u64(3);
        let b = Scalar::from_u64(4);
        let lhs = g.scalar_mul(a.field_add(b));
        let rhs = g.scalar_mul(a).point_add(g.scalar_mul(b));
        assert_eq!(lhs, rhs);
    }

    #[test]
    fn field_inv_of_zero_is_none() {
        assert!(Scalar::zero().field_inv().is_none());
    }

    #[test]
    fn field_reduce_is_deterministic() {
        let bytes = [7u8; 40];
        assert_eq!(Scalar::field_reduce(&bytes), Scalar::field_reduce(&bytes));
    }

    #[test]
    fn xy_bytes_roundtrip() {
        let p = Point::base_point().scalar_mul(Scalar::from_u64(9));
        let (x, y) = p.to_xy_bytes();
        let back = Point::from_xy_bytes(&x, &y).unwrap();
        assert_eq!(p, back);
    }

    #[test]
    fn invalid_length_rejected() {
        let err = Point::from_xy_bytes(&[0u8; 10], &[0u8; 32]).unwrap_err();
        assert!(matches!(err, CurveError::InvalidEncoding { .. }));
    }
}
