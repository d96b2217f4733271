// ── Fetch staleness gate ──
//
// Concurrent fetches of the same snapshot field race by completion
// order, not dispatch order. The gate tags every dispatch with a
// monotonically increasing ticket; only the latest ticket may apply its
// result. A completion holding a stale ticket is discarded, so the field
// always ends up reflecting the most recently dispatched request.

use std::sync::atomic::{AtomicU64, Ordering};

/// Per-field dispatch sequence for discarding stale fetch completions.
#[derive(Debug, Default)]
pub struct FetchGate {
    dispatched: AtomicU64,
}

impl FetchGate {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Register a new dispatch, returning its ticket.
    pub(crate) fn begin(&self) -> u64 {
        self.dispatched.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Whether a completion holding `ticket` may still apply its result.
    ///
    /// Only the most recently issued ticket is admitted.
    pub(crate) fn admits(&self, ticket: u64) -> bool {
        self.dispatched.load(Ordering::SeqCst) == ticket
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latest_ticket_is_admitted() {
        let gate = FetchGate::new();
        let t1 = gate.begin();
        assert!(gate.admits(t1));
    }

    #[test]
    fn stale_ticket_is_discarded() {
        let gate = FetchGate::new();
        let t1 = gate.begin();
        let t2 = gate.begin();

        // The earlier dispatch lost, regardless of completion order.
        assert!(!gate.admits(t1));
        assert!(gate.admits(t2));
    }

    #[test]
    fn tickets_increase_monotonically() {
        let gate = FetchGate::new();
        let t1 = gate.begin();
        let t2 = gate.begin();
        let t3 = gate.begin();
        assert!(t1 < t2 && t2 < t3);
    }
}
