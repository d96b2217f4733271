// ── Auth slice ──
//
// Owns the session snapshot and the loading flags of every credential
// operation. The session is replaced wholesale on sign-in/sign-up and
// cleared on sign-out; rejected operations never touch it.

use tokio::sync::watch;

use super::flag::LoadingFlag;
use crate::model::Session;

pub struct AuthSlice {
    session: watch::Sender<Option<Session>>,
    pub signing_in: LoadingFlag,
    pub signing_up: LoadingFlag,
    pub changing_password: LoadingFlag,
    pub requesting_reset: LoadingFlag,
    pub verifying_token: LoadingFlag,
    pub setting_password: LoadingFlag,
}

impl AuthSlice {
    pub(crate) fn new() -> Self {
        let (session, _) = watch::channel(None);
        Self {
            session,
            signing_in: LoadingFlag::new(),
            signing_up: LoadingFlag::new(),
            changing_password: LoadingFlag::new(),
            requesting_reset: LoadingFlag::new(),
            verifying_token: LoadingFlag::new(),
            setting_password: LoadingFlag::new(),
        }
    }

    /// The current session, if signed in.
    pub fn session(&self) -> Option<Session> {
        self.session.borrow().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.borrow().is_some()
    }

    /// Subscribe to session changes.
    pub fn subscribe_session(&self) -> watch::Receiver<Option<Session>> {
        self.session.subscribe()
    }

    pub(crate) fn set_session(&self, session: Session) {
        self.session.send_modify(|s| *s = Some(session));
    }

    pub(crate) fn clear_session(&self) {
        self.session.send_modify(|s| *s = None);
    }
}
