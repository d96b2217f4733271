// ── Employee slice ──

use super::collection::Collection;
use super::flag::LoadingFlag;
use super::gate::FetchGate;
use crate::model::Employee;

pub struct EmployeeSlice {
    pub employees: Collection<Employee>,
    pub fetching: LoadingFlag,
    pub creating: LoadingFlag,
    pub(crate) fetch_gate: FetchGate,
}

impl EmployeeSlice {
    pub(crate) fn new() -> Self {
        Self {
            employees: Collection::new(),
            fetching: LoadingFlag::new(),
            creating: LoadingFlag::new(),
            fetch_gate: FetchGate::new(),
        }
    }

    pub(crate) fn clear(&self) {
        self.employees.clear();
    }
}
