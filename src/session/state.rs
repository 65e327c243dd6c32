use crate::model::User;

/// Identity of the client. Exactly one is active at a time.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SessionState {
    #[default]
    Anonymous,
    Authenticated(User),
}

impl SessionState {
    pub fn user(&self) -> Option<&User> {
        match self {
            SessionState::Authenticated(user) => Some(user),
            SessionState::Anonymous => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated(_))
    }

    fn user_id(&self) -> Option<u64> {
        self.user().map(|u| u.id)
    }

    /// True if moving to `next` changes who is signed in.
    pub fn is_transition_to(&self, next: &SessionState) -> bool {
        self.user_id() != next.user_id()
    }
}

/// Observable state of the session store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionSnapshot {
    pub state: SessionState,
    /// True while a session request is awaiting the server.
    pub loading: bool,
    /// User-facing message of the last failure, cleared by the next success.
    pub error: Option<String>,
    /// Incremented on every change of identity.
    pub revision: u64,
}
