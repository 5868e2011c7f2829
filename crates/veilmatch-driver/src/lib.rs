//! # veilmatch-driver
//!
//! The solver driver: polls the DEX contract (C8), builds each pair's
//! order book and clearing price via `veilmatch-matchcore`, encrypts and
//! proves fills via `veilmatch-zk` (C3), and submits settlements (§6).
//! This is the top of the workspace's dependency graph -- it depends on
//! every other veilmatch crate, the way the teacher's ingress/settlement
//! crates sat above its matching core.
//!
//! - [`DriverState`] -- the five-state lifecycle (§4.8)
//! - [`DexClient`] -- the external interface abstraction (§6)
//! - [`mock::MockDexClient`] -- an in-memory double for tests
//! - [`SolverDriver`] -- the poll loop tying it together (§5)

pub mod client;
pub mod engine;
pub mod mock;
pub mod settlement_builder;
pub mod state;

pub use client::DexClient;
pub use engine::SolverDriver;
pub use mock::MockDexClient;
pub use settlement_builder::build_settlement;
pub use state::DriverState;
