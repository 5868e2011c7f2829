//! Driver state machine (C8, §4.8).
//!
//! ```text
//! INIT -> AWAITING_ORDERS -> PROCESSING -> SUBMITTING -> WAITING_NEW_BATCH -> AWAITING_ORDERS
//!              ^                                                  |
//!              +--------------------------------------------------+
//!              (also re-enters AWAITING_ORDERS on OrderPlaced/OrderCancelled)
//! ```
//!
//! Grounded on the teacher's epoch-phase shape (`COLLECT -> SEAL -> MATCH`)
//! generalized to this system's five states and its 15s poll-driven
//! transitions instead of a signed phase-change gossip message.

use std::fmt;

/// The driver's current position in the per-batch lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    /// Starting up; no batch context loaded yet.
    Init,
    /// Watching for new orders and the batch deadline.
    AwaitingOrders,
    /// Deadline reached: building books and computing clearing prices.
    Processing,
    /// Settlements computed: submitting `settle_batch` calls.
    Submitting,
    /// Submission complete: waiting for the chain's `BatchStarted` event.
    WaitingNewBatch,
}

impl DriverState {
    /// Advance past the deadline into processing. No-op from any state
    /// other than `AwaitingOrders` (§4.8: only a deadline can trigger it).
    #[must_use]
    pub fn on_deadline_reached(self) -> Self {
        match self {
            Self::AwaitingOrders => Self::Processing,
            other => other,
        }
    }

    /// A new or cancelled order was observed while not mid-settlement:
    /// stays in / returns to `AwaitingOrders`.
    #[must_use]
    pub fn on_order_event(self) -> Self {
        match self {
            Self::Init | Self::AwaitingOrders => Self::AwaitingOrders,
            other => other,
        }
    }

    #[must_use]
    pub fn on_processing_complete(self) -> Self {
        match self {
            Self::Processing => Self::Submitting,
            other => other,
        }
    }

    #[must_use]
    pub fn on_submission_complete(self) -> Self {
        match self {
            Self::Submitting => Self::WaitingNewBatch,
            other => other,
        }
    }

    /// The chain's `BatchStarted` event arrived: a fresh batch begins.
    #[must_use]
    pub fn on_batch_started(self) -> Self {
        Self::AwaitingOrders
    }
}

impl fmt::Display for DriverState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Init => "INIT",
            Self::AwaitingOrders => "AWAITING_ORDERS",
            Self::Processing => "PROCESSING",
            Self::Submitting => "SUBMITTING",
            Self::WaitingNewBatch => "WAITING_NEW_BATCH",
        };
        write!(f, "{label}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deadline_advances_awaiting_to_processing() {
        assert_eq!(
            DriverState::AwaitingOrders.on_deadline_reached(),
            DriverState::Processing
        );
    }

    #[test]
    fn deadline_is_noop_elsewhere() {
        assert_eq!(
            DriverState::Submitting.on_deadline_reached(),
            DriverState::Submitting
        );
    }

    #[test]
    fn order_event_returns_to_awaiting_orders() {
        assert_eq!(
            DriverState::Init.on_order_event(),
            DriverState::AwaitingOrders
        );
    }

    #[test]
    fn full_lifecycle() {
        let mut state = DriverState::Init;
        state = state.on_order_event();
        assert_eq!(state, DriverState::AwaitingOrders);
        state = state.on_deadline_reached();
        assert_eq!(state, DriverState::Processing);
        state = state.on_processing_complete();
        assert_eq!(state, DriverState::Submitting);
        state = state.on_submission_complete();
        assert_eq!(state, DriverState::WaitingNewBatch);
        state = state.on_batch_started();
        assert_eq!(state, DriverState::AwaitingOrders);
    }

    #[test]
    fn display_labels() {
        assert_eq!(DriverState::Init.to_string(), "INIT");
        assert_eq!(DriverState::WaitingNewBatch.to_string(), "WAITING_NEW_BATCH");
    }
}
