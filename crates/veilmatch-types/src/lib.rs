//! # veilmatch-types
//!
//! Shared data model, error taxonomy, and configuration for the veilmatch
//! batch-auction solver. This crate is the second-lowest dependency of the
//! workspace — it sits on top of `veilmatch-zk` and under every other
//! veilmatch crate, the way `openmatch-types` sat under the teacher's
//! matching and settlement crates.
//!
//! - **Identifiers**: [`OrderId`], [`TraderAddress`], [`PairId`], [`BatchId`], [`SettlementId`]
//! - **Order model**: [`Order`], [`OrderSide`], [`OrderStatus`]
//! - **Batch model**: [`BatchState`], [`PairInfo`]
//! - **Settlement model**: [`Settlement`]
//! - **Numeric semantics**: [`Amount`] (unsigned 256-bit, §9)
//! - **Configuration**: [`SolverConfig`]
//! - **Errors**: [`Error`] with `VM_ERR_` prefix codes
//! - **Safe-parameter utilities (C9)**: [`limits`]

pub mod amount;
pub mod batch;
pub mod config;
pub mod constants;
pub mod error;
pub mod ids;
pub mod limits;
pub mod order;
pub mod settlement;

pub use amount::Amount;
pub use batch::{BatchState, PairInfo};
pub use config::SolverConfig;
pub use error::{Error, Result};
pub use ids::{BatchId, OrderId, PairId, SettlementId, TraderAddress};
pub use order::{Order, OrderSide, OrderStatus};
pub use settlement::Settlement;

// Constants are accessed via `veilmatch_types::constants::FOO`
// (not re-exported to avoid name collisions).
