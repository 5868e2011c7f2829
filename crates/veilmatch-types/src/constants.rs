//! System-wide constants for the veilmatch solver.

/// Maximum size of an encrypted-amount or proof parameter, in bytes (§4.5, §6).
pub const MAX_PARAM_SIZE: usize = 32 * 1024;

/// Maximum notional order size the matcher will accept before clamping,
/// guarding against numeric overflow during allocation (§4.7).
pub const MAX_ORDER_SIZE: u128 = u128::MAX / 2;

/// Default maximum orders accepted into a single batch before matching (§6).
pub const DEFAULT_MAX_ORDERS_PER_BATCH: usize = 1000;

/// Avalanche preset for `maxOrdersPerBatch` (§6).
pub const AVALANCHE_MAX_ORDERS_PER_BATCH: usize = 500;

/// Default ceiling on price levels searched during matching (§6).
pub const DEFAULT_MAX_PRICE_LEVELS: usize = 100;

/// Minimum allowed `batchDuration`, in seconds (§6).
pub const MIN_BATCH_DURATION_SECS: u64 = 60;

/// Maximum allowed `batchDuration`, in seconds (§6).
pub const MAX_BATCH_DURATION_SECS: u64 = 86_400;

/// Default `batchDuration`, in seconds.
pub const DEFAULT_BATCH_DURATION_SECS: u64 = 300;

/// Default periodic-monitoring poll interval, in seconds (§4.8).
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 15;

/// Default discrete-log search bound used by `decrypt` (§4.2).
pub const DEFAULT_DECRYPT_SEARCH_BOUND: u64 = 1 << 32;

/// Number of reference-digest buckets used by the volume estimator (§4.5).
pub const ESTIMATOR_BUCKET_COUNT: usize = 6;

/// Number of leading bytes of `encrypted_amount` parsed by the estimator as
/// `(r, C1, C2)`, 33 bytes each (§4.5 step 1).
pub const ESTIMATOR_PARSE_LEN: usize = 99;

/// Version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Engine name.
pub const ENGINE_NAME: &str = "veilmatch";
