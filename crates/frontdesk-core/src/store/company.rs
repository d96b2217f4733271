// ── Company slice ──

use tokio::sync::watch;

use super::flag::LoadingFlag;
use super::gate::FetchGate;
use crate::model::Company;

pub struct CompanySlice {
    company: watch::Sender<Option<Company>>,
    pub fetching: LoadingFlag,
    pub saving: LoadingFlag,
    pub(crate) fetch_gate: FetchGate,
}

impl CompanySlice {
    pub(crate) fn new() -> Self {
        let (company, _) = watch::channel(None);
        Self {
            company,
            fetching: LoadingFlag::new(),
            saving: LoadingFlag::new(),
            fetch_gate: FetchGate::new(),
        }
    }

    pub fn company(&self) -> Option<Company> {
        self.company.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<Company>> {
        self.company.subscribe()
    }

    pub(crate) fn set_company(&self, company: Company) {
        self.company.send_modify(|c| *c = Some(company));
    }

    pub(crate) fn clear(&self) {
        self.company.send_modify(|c| *c = None);
    }
}
