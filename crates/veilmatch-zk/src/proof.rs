//! Deterministic placeholder proof generation (C3).
//!
//! These are not zk-SNARKs. They are domain-separated SHA-256 digests bound
//! to the public inputs of a statement, following the same "hash all the
//! fields in a fixed order, domain-separate with a version-tagged prefix"
//! pattern the teacher uses for `compute_trade_root` / `compute_batch_hash`.
//! A production deployment substitutes a real proving backend behind the
//! same function signatures.

use sha2::{Digest, Sha256};

use crate::codec;
use crate::curve::Scalar;
use crate::elgamal::Ciphertext;

/// A 32-byte binding proof.
pub type Bytes32 = [u8; 32];

/// `generate_order_proof(private, encrypted_amount, amount, price, side, trader) -> Bytes32`.
#[must_use]
pub fn generate_order_proof(
    private: Scalar,
    encrypted_amount: &Ciphertext,
    amount: u64,
    price: &[u8],
    side: u8,
    trader: &[u8],
) -> Bytes32 {
    let mut hasher = Sha256::new();
    hasher.update(b"veilmatch:order_proof:v1:");
    hasher.update(private.to_bytes());
    hasher.update(codec::serialize(encrypted_amount));
    hasher.update(amount.to_le_bytes());
    hasher.update(price);
    hasher.update([side]);
    hasher.update(trader);
    finalize32(hasher)
}

/// `generate_balance_proof(private, encrypted_amount, amount, user) -> Bytes32`.
#[must_use]
pub fn generate_balance_proof(
    private: Scalar,
    encrypted_amount: &Ciphertext,
    amount: u64,
    user: &[u8],
) -> Bytes32 {
    let mut hasher = Sha256::new();
    hasher.update(b"veilmatch:balance_proof:v1:");
    hasher.update(private.to_bytes());
    hasher.update(codec::serialize(encrypted_amount));
    hasher.update(amount.to_le_bytes());
    hasher.update(user);
    finalize32(hasher)
}

/// `generate_transfer_proof(private, encrypted_amount, amount, sender, recipient) -> Bytes32`.
#[must_use]
pub fn generate_transfer_proof(
    private: Scalar,
    encrypted_amount: &Ciphertext,
    amount: u64,
    sender: &[u8],
    recipient: &[u8],
) -> Bytes32 {
    let mut hasher = Sha256::new();
    hasher.update(b"veilmatch:transfer_proof:v1:");
    hasher.update(private.to_bytes());
    hasher.update(codec::serialize(encrypted_amount));
    hasher.update(amount.to_le_bytes());
    hasher.update(sender);
    hasher.update(recipient);
    finalize32(hasher)
}

/// `generate_settlement_proof(orders, fill_amounts, clearing_price) -> Bytes`.
///
/// `orders` and `fill_amounts` are the matched order IDs and their encrypted
/// fills, zipped in settlement order; `clearing_price` is the canonical
/// big-endian encoding of the uniform clearing price for the pair.
#[must_use]
pub fn generate_settlement_proof(
    order_ids: &[[u8; 32]],
    fill_amounts: &[Ciphertext],
    clearing_price: &[u8],
) -> Vec<u8> {
    let mut hasher = Sha256::new();
    hasher.update(b"veilmatch:settlement_proof:v1:");
    hasher.update((order_ids.len() as u64).to_le_bytes());
    for id in order_ids {
        hasher.update(id);
    }
    for fill in fill_amounts {
        hasher.update(codec::serialize(fill));
    }
    hasher.update(clearing_price);
    finalize32(hasher).to_vec()
}

/// `verify_order_proof(proof, encrypted_amount, trader) -> bool`.
///
/// Checks shape only (length and non-zero content) — full cryptographic
/// soundness is delegated to the on-chain zk-SNARK verifier (§4.3).
#[must_use]
pub fn verify_order_proof(proof: &[u8], _encrypted_amount: &Ciphertext, _trader: &[u8]) -> bool {
    proof.len() == 32 && proof.iter().any(|&b| b != 0)
}

fn finalize32(hasher: Sha256) -> Bytes32 {
    let digest = hasher.finalize();
    let mut out = [0u8; 32];
    out.copy_from_slice(&digest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elgamal::{derive_public, Ciphertext};

    fn sample_ciphertext() -> Ciphertext {
        let public = derive_public(Scalar::from_u64(3)).unwrap();
        Ciphertext::encrypt(public, Scalar::from_u64(10), Scalar::from_u64(2))
    }

    #[test]
    fn order_proof_is_deterministic() {
        let ct = sample_ciphertext();
        let a = generate_order_proof(Scalar::from_u64(3), &ct, 10, b"1000", 0, b"trader");
        let b = generate_order_proof(Scalar::from_u64(3), &ct, 10, b"1000", 0, b"trader");
        assert_eq!(a, b);
    }

    #[test]
    fn order_proof_changes_with_inputs() {
        let ct = sample_ciphertext();
        let a = generate_order_proof(Scalar::from_u64(3), &ct, 10, b"1000", 0, b"trader");
        let b = generate_order_proof(Scalar::from_u64(3), &ct, 11, b"1000", 0, b"trader");
        assert_ne!(a, b);
    }

    #[test]
    fn verify_order_proof_accepts_well_formed() {
        let ct = sample_ciphertext();
        let proof = generate_order_proof(Scalar::from_u64(3), &ct, 10, b"1000", 0, b"trader");
        assert!(verify_order_proof(&proof, &ct, b"trader"));
    }

    #[test]
    fn verify_order_proof_rejects_wrong_length() {
        let ct = sample_ciphertext();
        assert!(!verify_order_proof(&[0u8; 31], &ct, b"trader"));
    }

    #[test]
    fn verify_order_proof_rejects_all_zero() {
        let ct = sample_ciphertext();
        assert!(!verify_order_proof(&[0u8; 32], &ct, b"trader"));
    }

    #[test]
    fn settlement_proof_order_matters() {
        let ct = sample_ciphertext();
        let ids_a = vec![[1u8; 32], [2u8; 32]];
        let ids_b = vec![[2u8; 32], [1u8; 32]];
        let fills = vec![ct, ct];
        let a = generate_settlement_proof(&ids_a, &fills, b"1000");
        let b = generate_settlement_proof(&ids_b, &fills, b"1000");
        assert_ne!(a, b);
    }
}
