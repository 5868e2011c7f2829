//! # veilmatch-zk
//!
//! Baby Jubjub curve arithmetic, exponential ElGamal encryption, ciphertext
//! serialization, and deterministic placeholder proof generation.
//!
//! This is the cryptographic leaf crate of the workspace — every other
//! veilmatch crate that needs to speak about encrypted amounts depends on
//! it, the way `openmatch-types` sits under the teacher's matching and
//! settlement crates.
//!
//! - **Curve & field**: [`Scalar`], [`Point`], [`curve::base_point`]-style free functions
//! - **ElGamal**: [`KeyPair`], [`Ciphertext`]
//! - **Codec**: [`codec::serialize`] / [`codec::deserialize`]
//! - **Proofs**: [`proof::generate_order_proof`] and friends
//! - **Errors**: [`CurveError`], [`DecryptError`]

pub mod codec;
pub mod curve;
pub mod elgamal;
pub mod error;
pub mod proof;

pub use curve::{Point, Scalar};
pub use elgamal::{derive_public, Ciphertext, KeyPair, DEFAULT_SEARCH_BOUND};
pub use error::{CurveError, DecryptError};
