// ── Settings slice ──

use tokio::sync::watch;

use super::flag::LoadingFlag;
use super::gate::FetchGate;
use crate::model::UserSettings;

pub struct SettingsSlice {
    settings: watch::Sender<Option<UserSettings>>,
    pub fetching: LoadingFlag,
    pub saving: LoadingFlag,
    pub(crate) fetch_gate: FetchGate,
}

impl SettingsSlice {
    pub(crate) fn new() -> Self {
        let (settings, _) = watch::channel(None);
        Self {
            settings,
            fetching: LoadingFlag::new(),
            saving: LoadingFlag::new(),
            fetch_gate: FetchGate::new(),
        }
    }

    pub fn settings(&self) -> Option<UserSettings> {
        self.settings.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<UserSettings>> {
        self.settings.subscribe()
    }

    pub(crate) fn set_settings(&self, settings: UserSettings) {
        self.settings.send_modify(|s| *s = Some(settings));
    }

    pub(crate) fn clear(&self) {
        self.settings.send_modify(|s| *s = None);
    }
}
