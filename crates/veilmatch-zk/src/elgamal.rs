//! Exponential ElGamal encryption over Baby Jubjub (C2).
//!
//! The message is encoded in the exponent (`c2 = G*m + Y*r`) rather than as
//! a point directly, the way `zk-shuffle`'s `ElGamalCiphertext` encodes a
//! card as a curve point — generalised here to a scalar amount, which is
//! what lets [`Ciphertext::decrypt`] recover `m` via a bounded discrete-log
//! search instead of returning the point itself.

use rand::Rng;

use crate::curve::{Point, Scalar};
use crate::error::DecryptError;

/// Default search bound for discrete-log recovery during decryption.
pub const DEFAULT_SEARCH_BOUND: u64 = 1 << 32;

/// A key pair under the ElGamal scheme: `public = G * private`.
#[derive(Debug, Clone, Copy)]
pub struct KeyPair {
    pub private: Scalar,
    pub public: Point,
}

impl KeyPair {
    /// Derive a key pair from a private scalar. The scalar is reduced mod
    /// `q` and rejected only if that reduction is zero.
    pub fn derive(private: Scalar) -> Result<Self, crate::error::CurveError> {
        if private.is_zero() {
            return Err(crate::error::CurveError::ZeroPrivateKey);
        }
        Ok(Self {
            private,
            public: derive_public(private)?,
        })
    }
}

/// `derive_public(private) → Point`. Requires `0 < private < q` after
/// reduction.
pub fn derive_public(private: Scalar) -> Result<Point, crate::error::CurveError> {
    if private.is_zero() {
        return Err(crate::error::CurveError::ZeroPrivateKey);
    }
    Ok(Point::base_point().scalar_mul(private))
}

/// A two-point ElGamal ciphertext `(c1, c2)` encoding one scalar message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ciphertext {
    pub c1: Point,
    pub c2: Point,
}

impl Ciphertext {
    /// `encrypt(public_key, m, r) -> Ct`. `r` must be nonzero; callers that
    /// don't supply one should draw it via [`Scalar::random_nonzero`] first.
    #[must_use]
    pub fn encrypt(public_key: Point, m: Scalar, r: Scalar) -> Self {
        let g = Point::base_point();
        let c1 = g.scalar_mul(r);
        let c2 = g.scalar_mul(m).point_add(public_key.scalar_mul(r));
        Self { c1, c2 }
    }

    /// Encrypt with a freshly drawn nonzero blinding factor, returning the
    /// ciphertext and the randomness used (callers that need it for proofs
    /// retain `r`; most do not and can discard it).
    pub fn encrypt_fresh<R: Rng + ?Sized>(public_key: Point, m: Scalar, rng: &mut R) -> (Self, Scalar) {
        let r = Scalar::random_nonzero(rng);
        (Self::encrypt(public_key, m, r), r)
    }

    /// `decrypt(private, Ct) -> scalar`. Recovers `M = c2 - c1*private` and
    /// solves `M = G*m` for `m` over `[0, bound)` by brute force.
    pub fn decrypt(&self, private: Scalar, bound: u64) -> Result<u64, DecryptError> {
        let m_point = self.c2.point_add(self.c1.scalar_mul(private).point_neg());
        let g = Point::base_point();
        let mut acc = Point::identity();
        for m in 0..bound {
            if acc == m_point {
                return Ok(m);
            }
            acc = acc.point_add(g);
        }
        Err(DecryptError::OutOfRange { bound })
    }

    /// Additive homomorphism: `Enc(a) + Enc(b) = Enc(a+b)` under the same key.
    #[must_use]
    pub fn homomorphic_add(self, other: Self) -> Self {
        Self {
            c1: self.c1.point_add(other.c1),
            c2: self.c2.point_add(other.c2),
        }
    }
}
