//! Crypto-layer errors for curve, ElGamal, and codec operations.
//!
//! These fold into `veilmatch_types::Error::Curve`/`Error::Decrypt` at crate
//! boundaries; kept separate here the way the teacher keeps subsystem
//! errors local to the crate that raises them before folding into the
//! shared taxonomy.

use thiserror::Error;

/// Errors from curve / field operations (C1).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CurveError {
    /// A field element encoding did not round-trip (non-canonical or out of range).
    #[error("malformed field element encoding")]
    MalformedFieldElement,

    /// A byte slice was not the expected fixed width for a point or scalar.
    #[error("invalid encoding length: expected {expected}, got {actual}")]
    InvalidEncoding { expected: usize, actual: usize },

    /// The private scalar reduced to zero, which has no valid public key.
    #[error("private scalar is zero after reduction")]
    ZeroPrivateKey,
}

/// Errors from ElGamal decryption (C2).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecryptError {
    /// No candidate `m` within the configured search bound satisfied `G * m == M`.
    #[error("plaintext not found within search bound {bound}")]
    OutOfRange { bound: u64 },

    /// The underlying ciphertext points were malformed.
    #[error(transparent)]
    Curve(#[from] CurveError),
}
