// ── Observable loading flag ──
//
// One per tracked operation: true from the moment the operation is
// dispatched until it settles, on success and failure alike.

use tokio::sync::watch;

/// An observable boolean loading flag.
#[derive(Debug)]
pub struct LoadingFlag {
    state: watch::Sender<bool>,
}

impl LoadingFlag {
    pub(crate) fn new() -> Self {
        let (state, _) = watch::channel(false);
        Self { state }
    }

    pub(crate) fn set(&self, loading: bool) {
        self.state.send_modify(|s| *s = loading);
    }

    /// The current value.
    pub fn get(&self) -> bool {
        *self.state.borrow()
    }

    /// Subscribe to flag transitions.
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.state.subscribe()
    }
}

impl Default for LoadingFlag {
    fn default() -> Self {
        Self::new()
    }
}
