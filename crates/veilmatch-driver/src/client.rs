//! The DEX contract's external interface (§6), abstracted behind a trait
//! so the driver can be exercised against [`crate::mock::MockDexClient`]
//! in tests without a live chain connection.

use veilmatch_types::{BatchId, Order, OrderId, PairId, PairInfo, Result, Settlement};
use veilmatch_zk::Point;

use chrono::{DateTime, Utc};

/// Read/write access to the DEX contract's batch-auction state (§6).
///
/// Implementors perform the actual chain I/O; failures surface as
/// `Error::ChainRead`/`Error::ChainSubmit` per the §7 error taxonomy.
#[allow(async_fn_in_trait)]
pub trait DexClient {
    /// Current batch identifier and its settlement deadline.
    async fn batch_info(&self) -> Result<(BatchId, DateTime<Utc>)>;

    /// All orders currently known for `pair_id` in the active batch.
    async fn orders(&self, pair_id: PairId) -> Result<Vec<Order>>;

    /// Token-pair metadata for `pair_id`.
    async fn token_pairs(&self, pair_id: PairId) -> Result<PairInfo>;

    /// Order IDs still active (pending) for `pair_id`.
    async fn active_order_ids(&self, pair_id: PairId) -> Result<Vec<OrderId>>;

    /// The public encryption key a trader registered with the contract,
    /// needed to encrypt fill amounts back into a [`Settlement`] (§3, §4.3).
    async fn trader_public_key(&self, trader: veilmatch_types::TraderAddress) -> Result<Point>;

    /// Submit a computed settlement. Returns the chain transaction hash.
    async fn settle_batch(&self, settlement: &Settlement) -> Result<String>;
}
