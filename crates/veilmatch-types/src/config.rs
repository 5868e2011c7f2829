//! Solver configuration (§6 "Configuration (recognised options)").

use serde::{Deserialize, Serialize};

use crate::constants;
use crate::limits::clamp_batch_duration;

/// Recognised configuration options for the solver driver.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Caps batch size before matching. Default 1000 (500 on Avalanche presets).
    pub max_orders_per_batch: usize,
    /// Caps the price-level search in matching. Default 100.
    pub max_price_levels: usize,
    /// Minimum estimated volume below which a price level is ignored.
    pub min_liquidity: u128,
    /// Reserved for future non-uniform-price variants; unused by the
    /// clearing algorithm as specified.
    pub max_slippage: u128,
    /// Seconds per batch, clamped to `[60, 86400]`.
    pub batch_duration_secs: u64,
    /// Enable per-pair parallel matching.
    pub use_parallel_processing: bool,
    /// Enable lower-latency submission paths.
    pub use_fast_settlement: bool,
    /// Discrete-log search bound used by ElGamal decryption.
    pub decrypt_search_bound: u64,
    /// Periodic poll interval for the driver's deadline watchdog.
    pub poll_interval_secs: u64,
}

impl SolverConfig {
    /// Returns a copy with `batch_duration_secs` clamped into bounds.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        self.batch_duration_secs = clamp_batch_duration(self.batch_duration_secs);
        self
    }

    /// The Avalanche-preset configuration (§6: 500 orders/batch).
    #[must_use]
    pub fn avalanche_preset() -> Self {
        Self {
            max_orders_per_batch: constants::AVALANCHE_MAX_ORDERS_PER_BATCH,
            ..Self::default()
        }
    }
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_orders_per_batch: constants::DEFAULT_MAX_ORDERS_PER_BATCH,
            max_price_levels: constants::DEFAULT_MAX_PRICE_LEVELS,
            min_liquidity: 0,
            max_slippage: 0,
            batch_duration_secs: constants::DEFAULT_BATCH_DURATION_SECS,
            use_parallel_processing: false,
            use_fast_settlement: false,
            decrypt_search_bound: constants::DEFAULT_DECRYPT_SEARCH_BOUND,
            poll_interval_secs: constants::DEFAULT_POLL_INTERVAL_SECS,
        }
    }
}
