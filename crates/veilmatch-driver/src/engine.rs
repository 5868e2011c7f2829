//! The solver's main loop (C8, §4.8, §5).
//!
//! Polls the DEX contract every `poll_interval_secs` (default 15, §6) and
//! advances [`DriverState`] accordingly. One [`SolverDriver`] instance
//! drives every configured pair; each pair's book is built, cleared, and
//! settled independently (§5 "pair sharding"), mirroring the teacher's
//! per-market independence in its continuous engine.

use std::collections::HashMap;

use chrono::Utc;
use veilmatch_estimator::ReferenceThresholdCache;
use veilmatch_types::{BatchId, BatchState, Error, PairId, SolverConfig};

use crate::client::DexClient;
use crate::settlement_builder::build_settlement;
use crate::state::DriverState;

/// Drives the full batch-auction lifecycle against a [`DexClient`].
///
/// Owns the single [`BatchState`] mirror for the active batch (§3
/// "single-writer, the driver") — every cycle refreshes it from the
/// client's `orders` reads before matching reads from it.
pub struct SolverDriver<C: DexClient> {
    client: C,
    config: SolverConfig,
    state: DriverState,
    cache: ReferenceThresholdCache,
    last_batch_id: Option<BatchId>,
    batch_state: BatchState,
}

impl<C: DexClient> SolverDriver<C> {
    #[must_use]
    pub fn new(client: C, config: SolverConfig) -> Self {
        Self {
            client,
            config: config.normalized(),
            state: DriverState::Init,
            cache: ReferenceThresholdCache::new(),
            last_batch_id: None,
            batch_state: BatchState::new(BatchId::default(), Utc::now()),
        }
    }

    #[must_use]
    pub fn state(&self) -> DriverState {
        self.state
    }

    /// Access the underlying client, e.g. to drive a [`crate::mock::MockDexClient`]
    /// directly from a test.
    #[must_use]
    pub fn client(&self) -> &C {
        &self.client
    }

    /// Run a single poll cycle against `pair_ids`. Returns the transaction
    /// hashes of every settlement submitted this cycle (empty outside the
    /// submission window).
    ///
    /// # Errors
    /// Returns an error only for failures that should abort the cycle
    /// entirely (chain reads failing); a single pair's proof-oversize or
    /// missing-key failure is logged and skipped so other pairs still
    /// settle (§7 degraded mode).
    pub async fn run_cycle(&mut self, pair_ids: &[PairId]) -> veilmatch_types::Result<Vec<String>> {
        let (batch_id, deadline) = self.client.batch_info().await?;

        if self.last_batch_id != Some(batch_id) {
            self.last_batch_id = Some(batch_id);
            self.batch_state.reset(batch_id, deadline);
            self.state = self.state.on_batch_started();
        }

        if self.state == DriverState::Init {
            self.state = self.state.on_order_event();
        }

        // The driver is the single writer over `batch_state` (§3): every
        // cycle refreshes it from the contract's own bookkeeping before
        // anything reads from it.
        for &pair_id in pair_ids {
            for order in self.client.orders(pair_id).await? {
                self.batch_state.insert_order(order);
            }
        }
        self.batch_state.truncate_deterministic(self.config.max_orders_per_batch);

        if self.state != DriverState::AwaitingOrders || Utc::now() < deadline {
            return Ok(Vec::new());
        }

        self.state = self.state.on_deadline_reached();
        tracing::info!(%batch_id, "batch deadline reached, processing pairs");

        let mut outcomes = HashMap::new();
        for &pair_id in pair_ids {
            let orders = self.batch_state.pending_orders_for_pair(pair_id);
            if let Some(outcome) =
                veilmatch_matchcore::match_pair(pair_id, &orders, &self.cache, Utc::now())
            {
                outcomes.insert(pair_id, outcome);
            }
        }

        self.state = self.state.on_processing_complete();

        let mut tx_hashes = Vec::new();
        for (pair_id, outcome) in outcomes {
            match build_settlement(&self.client, pair_id, &outcome).await {
                Ok(settlement) => match self.client.settle_batch(&settlement).await {
                    Ok(tx_hash) => tx_hashes.push(tx_hash),
                    Err(err) => tracing::warn!(%pair_id, %err, "settle_batch failed"),
                },
                Err(Error::ProofOversize { actual, max }) => {
                    tracing::warn!(%pair_id, actual, max, "settlement proof oversize, skipping pair this cycle");
                }
                Err(err) => tracing::warn!(%pair_id, %err, "failed to build settlement"),
            }
        }

        self.state = self.state.on_submission_complete();
        Ok(tx_hashes)
    }

    /// Run forever, polling every `poll_interval_secs` (§6).
    pub async fn run(&mut self, pair_ids: Vec<PairId>) -> ! {
        let interval = std::time::Duration::from_secs(self.config.poll_interval_secs);
        loop {
            if let Err(err) = self.run_cycle(&pair_ids).await {
                tracing::error!(%err, "poll cycle failed");
            }
            tokio::time::sleep(interval).await;
        }
    }
}
