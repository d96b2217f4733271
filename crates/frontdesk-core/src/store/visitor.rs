// ── Visitor slice ──
//
// Owns visitors and the visits of the most recently inspected visitor.
// Check-in/check-out are point-patches: the matched visit gets its
// timestamp stamped; a missing visit id is a silent no-op.

use chrono::{DateTime, Utc};
use tracing::debug;

use super::collection::Collection;
use super::flag::LoadingFlag;
use super::gate::FetchGate;
use crate::model::{Visit, Visitor};

pub struct VisitorSlice {
    pub visitors: Collection<Visitor>,
    /// Visits of the visitor most recently fetched via `FetchVisits`,
    /// replaced wholesale on each fetch.
    pub visits: Collection<Visit>,
    pub fetching_visitors: LoadingFlag,
    pub creating_visitor: LoadingFlag,
    pub fetching_visits: LoadingFlag,
    pub checking_in: LoadingFlag,
    pub checking_out: LoadingFlag,
    pub(crate) visitors_gate: FetchGate,
    pub(crate) visits_gate: FetchGate,
}

impl VisitorSlice {
    pub(crate) fn new() -> Self {
        Self {
            visitors: Collection::new(),
            visits: Collection::new(),
            fetching_visitors: LoadingFlag::new(),
            creating_visitor: LoadingFlag::new(),
            fetching_visits: LoadingFlag::new(),
            checking_in: LoadingFlag::new(),
            checking_out: LoadingFlag::new(),
            visitors_gate: FetchGate::new(),
            visits_gate: FetchGate::new(),
        }
    }

    /// Stamp the check-in time of the matched visit.
    pub(crate) fn mark_checked_in(&self, visit_id: &str, at: DateTime<Utc>) {
        if !self.visits.patch(visit_id, |v| v.check_in = Some(at)) {
            debug!(visit_id, "check-in patch found no matching visit");
        }
    }

    /// Stamp the check-out time of the matched visit.
    pub(crate) fn mark_checked_out(&self, visit_id: &str, at: DateTime<Utc>) {
        if !self.visits.patch(visit_id, |v| v.check_out = Some(at)) {
            debug!(visit_id, "check-out patch found no matching visit");
        }
    }

    pub(crate) fn clear(&self) {
        self.visitors.clear();
        self.visits.clear();
    }
}
