//! # veilmatch-estimator
//!
//! Privacy-preserving volume estimator (C5): derives a bounded magnitude
//! estimate from an encrypted order amount without ever decrypting it,
//! following the six-step algorithm of §4.5. Grounded on the teacher's
//! `determinism.rs` for domain-separated hashing and on
//! `openmatch-settlement::idempotency::IdempotencyGuard`'s bounded-cache
//! shape for the per-pair reference-threshold cache (write-once instead of
//! LRU-evicted, since thresholds never change once derived for a pair).

use std::collections::HashMap;
use std::sync::RwLock;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, MathematicalOps, RoundingStrategy};
use sha2::{Digest, Sha256};
use veilmatch_types::ids::PairId;
use veilmatch_types::order::OrderSide;

/// Bytes parsed from the leading portion of `encrypted_amount` as three
/// 33-byte group elements `(r, C1, C2)` (§4.5 step 1).
const PARSE_LEN: usize = veilmatch_types::constants::ESTIMATOR_PARSE_LEN;
const GROUP_ELEMENT_LEN: usize = 33;
const BUCKET_COUNT: usize = veilmatch_types::constants::ESTIMATOR_BUCKET_COUNT;
const MAX_PARAM_SIZE: usize = veilmatch_types::constants::MAX_PARAM_SIZE;

/// Per-pair reference thresholds used by the bucketing step (§4.5 step 4).
///
/// Write-once per pair, read-many thereafter (§5 "Shared-resource policy").
#[derive(Debug, Default)]
pub struct ReferenceThresholdCache {
    thresholds: RwLock<HashMap<PairId, [u32; BUCKET_COUNT]>>,
}

impl ReferenceThresholdCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn thresholds_for(&self, pair_id: PairId) -> [u32; BUCKET_COUNT] {
        if let Some(existing) = self.thresholds.read().expect("lock poisoned").get(&pair_id) {
            return *existing;
        }
        let derived = derive_reference_thresholds(pair_id);
        self.thresholds
            .write()
            .expect("lock poisoned")
            .entry(pair_id)
            .or_insert(derived);
        derived
    }
}

/// Deterministically derive `k = 6` reference digests from `pair_id`
/// (§4.5 step 4), each reduced to its top 32 bits for fast comparison.
fn derive_reference_thresholds(pair_id: PairId) -> [u32; BUCKET_COUNT] {
    let mut out = [0u32; BUCKET_COUNT];
    for (i, slot) in out.iter_mut().enumerate() {
        let mut hasher = Sha256::new();
        hasher.update(b"veilmatch:estimator_reference:v1:");
        hasher.update(pair_id.as_bytes());
        hasher.update((i as u32).to_le_bytes());
        let digest = hasher.finalize();
        *slot = top_bits(&digest);
    }
    out
}

fn top_bits(digest: &[u8]) -> u32 {
    u32::from_be_bytes(digest[0..4].try_into().expect("digest has >= 4 bytes"))
}

/// Inputs to a single volume estimate, bundled so the public function
/// signature stays manageable (§4.5, §8 invariant 6: determinism over the
/// full input tuple).
#[derive(Debug, Clone, Copy)]
pub struct EstimateInput<'a> {
    pub encrypted_amount: &'a [u8],
    pub pair_id: PairId,
    pub side: OrderSide,
    /// Public limit price, as a plain integer (already below any scaling).
    pub price: u128,
    pub age_minutes: i64,
}

/// Estimate the magnitude of an encrypted order amount (§4.5).
///
/// Never panics and never fails: malformed or oversize input degrades to a
/// zero estimate rather than propagating an error, matching §7's
/// `InvalidInput` policy ("return neutral value... log warn").
#[must_use]
pub fn estimate_volume(cache: &ReferenceThresholdCache, input: EstimateInput<'_>) -> u128 {
    // Step 2: bound check happens first since it also gates step 1's parse.
    if input.encrypted_amount.len() > MAX_PARAM_SIZE {
        tracing::warn!(pair_id = %input.pair_id, "encrypted amount exceeds MAX_PARAM_SIZE");
        return 0;
    }

    // Step 1: parse (r, C1, C2) as three 33-byte group elements.
    let Some((r, c1, c2)) = parse_group_elements(input.encrypted_amount) else {
        tracing::warn!(pair_id = %input.pair_id, "encrypted amount too short to parse");
        return 0;
    };

    // Step 3: fingerprint.
    let mut hasher = Sha256::new();
    hasher.update(b"veilmatch:estimator_fingerprint:v1:");
    hasher.update(r);
    hasher.update(c1);
    hasher.update(c2);
    let fingerprint = top_bits(&hasher.finalize());

    // Step 4: bucket against the pair's reference thresholds.
    let thresholds = cache.thresholds_for(input.pair_id);
    let magnitude = bucket_magnitude(fingerprint, &thresholds);

    // Step 5: market adjustment, kept in `Decimal` the way the teacher
    // expresses every fractional quantity rather than on bare floats.
    let side_factor = match input.side {
        OrderSide::Buy => Decimal::new(85, 2),
        OrderSide::Sell => Decimal::new(115, 2),
    };
    let price_units = u64::try_from(input.price).unwrap_or(u64::MAX);
    let price_factor = (Decimal::from(price_units) * Decimal::TEN).min(Decimal::new(1000, 0));
    let recency_factor =
        (Decimal::new(100, 0) - Decimal::from(input.age_minutes)).max(Decimal::new(80, 0));
    let adjusted = Decimal::from(magnitude) * side_factor * price_factor * recency_factor
        / Decimal::new(1_000_000, 0);

    // Step 6: privacy-preserving rounding.
    round_with_noise(adjusted)
}

/// Parse the first `PARSE_LEN` bytes into three 33-byte group elements.
fn parse_group_elements(bytes: &[u8]) -> Option<(&[u8], &[u8], &[u8])> {
    if bytes.len() < PARSE_LEN {
        return None;
    }
    let r = &bytes[0..GROUP_ELEMENT_LEN];
    let c1 = &bytes[GROUP_ELEMENT_LEN..2 * GROUP_ELEMENT_LEN];
    let c2 = &bytes[2 * GROUP_ELEMENT_LEN..3 * GROUP_ELEMENT_LEN];
    Some((r, c1, c2))
}

/// Return the largest power-of-ten threshold `10^i` such that
/// `fingerprint >= reference[i]` (§4.5 step 4). Thresholds are assumed
/// monotonically structured by construction index, not by value, so every
/// bucket is checked and the largest qualifying `i` wins.
fn bucket_magnitude(fingerprint: u32, thresholds: &[u32; BUCKET_COUNT]) -> u64 {
    let mut best: u64 = 0;
    for (i, &reference) in thresholds.iter().enumerate() {
        if fingerprint >= reference {
            best = best.max(10u64.pow(u32::try_from(i).unwrap_or(0)));
        }
    }
    best
}

/// Snap to the nearest multiple of `max(1, magnitude/10)` and add bounded
/// pseudorandom noise in `[-m/10, +m/10]`, deterministic in `value` (§4.5
/// step 6). Final integerisation is round-half-to-even (§9), via
/// `Decimal`'s native `MidpointNearestEven` strategy.
fn round_with_noise(value: Decimal) -> u128 {
    if value <= Decimal::ZERO {
        return 0;
    }
    let exponent = value.log10().floor().to_i64().unwrap_or(0);
    let magnitude = Decimal::TEN.powi(exponent);
    let step = (magnitude / Decimal::TEN).max(Decimal::ONE);
    let snapped = (value / step).round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven) * step;

    let noise_bound = (snapped / Decimal::TEN).max(Decimal::ZERO);
    let noise = deterministic_noise(snapped) * noise_bound;
    let noisy = (snapped + noise).max(Decimal::ZERO);
    noisy
        .round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven)
        .to_u128()
        .unwrap_or(0)
}

/// Deterministic pseudorandom value in `[-1, 1]`, derived from `value`
/// itself so repeated calls with the same input are byte-for-byte
/// reproducible (§8 invariant 6).
fn deterministic_noise(value: Decimal) -> Decimal {
    let mut hasher = Sha256::new();
    hasher.update(b"veilmatch:estimator_noise:v1:");
    hasher.update(value.to_string().as_bytes());
    let digest = hasher.finalize();
    let raw = top_bits(&digest);
    (Decimal::from(raw) / Decimal::from(u32::MAX)) * Decimal::TWO - Decimal::ONE
}
