//! Error taxonomy for the veilmatch solver (§7).
//!
//! All errors use the `VM_ERR_` prefix convention for easy grepping in
//! logs, following the teacher's `OM_ERR_` scheme. Codes are grouped by the
//! five kinds §7 names, not by subsystem — the propagation policy differs
//! per kind, not per component:
//! - 1xx: `InvalidInput` — return the documented neutral value, log warn
//! - 2xx: `CryptoError` — return `Err`, caller chooses a fallback
//! - 3xx: `ChainIO` — retry bounded times, degrade to next batch
//! - 4xx: `ProofOversize` — substitute the empty proof, proceed
//! - 9xx: `Fatal` — abort with diagnostic, operator intervention

use thiserror::Error;

use crate::ids::{OrderId, PairId};

/// Central error enum for all veilmatch operations.
#[derive(Debug, Error)]
pub enum Error {
    // =================================================================
    // InvalidInput (1xx)
    // =================================================================
    /// A field failed basic shape validation (bad length, NaN, null address).
    #[error("VM_ERR_100: invalid input: {reason}")]
    InvalidInput { reason: String },

    /// The referenced order does not exist in the current batch state.
    #[error("VM_ERR_101: order not found: {0}")]
    OrderNotFound(OrderId),

    /// The referenced pair is unknown to the current batch state.
    #[error("VM_ERR_102: unknown pair: {0}")]
    UnknownPair(PairId),

    /// The configured or requested batch duration falls outside `[60, 86400]`.
    #[error("VM_ERR_103: batch duration {seconds}s outside [60, 86400]")]
    BatchDurationOutOfRange { seconds: u64 },

    // =================================================================
    // CryptoError (2xx)
    // =================================================================
    /// A curve or field operation rejected malformed input.
    #[error("VM_ERR_200: curve error: {0}")]
    Curve(#[from] veilmatch_zk::CurveError),

    /// ElGamal decryption failed to recover a plaintext within the search bound.
    #[error("VM_ERR_201: decrypt error: {0}")]
    Decrypt(#[from] veilmatch_zk::DecryptError),

    // =================================================================
    // ChainIO (3xx)
    // =================================================================
    /// An RPC read against the DEX contract failed or timed out.
    #[error("VM_ERR_300: chain read failed: {reason}")]
    ChainRead { reason: String },

    /// `settle_batch` submission failed or the transaction reverted.
    #[error("VM_ERR_301: settlement submission failed: {reason}")]
    ChainSubmit { reason: String },

    /// An external call exceeded its bounded deadline.
    #[error("VM_ERR_302: external call timed out after {millis}ms")]
    ChainTimeout { millis: u64 },

    // =================================================================
    // ProofOversize (4xx)
    // =================================================================
    /// A serialized proof exceeded the configured ceiling (`MAX_PARAM_SIZE`).
    #[error("VM_ERR_400: proof of {actual} bytes exceeds ceiling {max}")]
    ProofOversize { actual: usize, max: usize },

    // =================================================================
    // Fatal (9xx)
    // =================================================================
    /// An internal invariant was violated; the driver must abort.
    #[error("VM_ERR_900: invariant violated: {0}")]
    Invariant(String),

    /// Unrecoverable internal error.
    #[error("VM_ERR_901: internal error: {0}")]
    Internal(String),

    /// Configuration error (invalid config file, missing fields, etc.).
    #[error("VM_ERR_902: configuration error: {0}")]
    Configuration(String),

    /// I/O error (disk, network).
    #[error("VM_ERR_903: I/O error: {0}")]
    Io(String),
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl Error {
    /// `true` for the kinds §7 classifies as recoverable at the per-item
    /// level (the driver logs and continues rather than aborting).
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        !matches!(
            self,
            Self::Invariant(_) | Self::Internal(_) | Self::Configuration(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_contains_prefix() {
        let err = Error::OrderNotFound(OrderId::from_bytes([1; 32]));
        let msg = format!("{err}");
        assert!(msg.starts_with("VM_ERR_101"), "Got: {msg}");
    }

    #[test]
    fn curve_error_converts() {
        let err: Error = veilmatch_zk::CurveError::ZeroPrivateKey.into();
        assert!(matches!(err, Error::Curve(_)));
    }

    #[test]
    fn fatal_errors_are_not_recoverable() {
        assert!(!Error::Invariant("x".into()).is_recoverable());
        assert!(Error::ChainTimeout { millis: 100 }.is_recoverable());
    }

    #[test]
    fn all_errors_have_vm_err_prefix() {
        let errors: Vec<Box<dyn std::error::Error>> = vec![
            Box::new(Error::ProofOversize {
                actual: 100,
                max: 50,
            }),
            Box::new(Error::ChainTimeout { millis: 10 }),
            Box::new(Error::Internal("test".into())),
        ];
        for err in errors {
            let msg = format!("{err}");
            assert!(msg.starts_with("VM_ERR_"), "Missing VM_ERR_ prefix: {msg}");
        }
    }
}
