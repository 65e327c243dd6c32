use crate::model::{LoginRequest, RegisterRequest, User};
use crate::session::SessionSnapshot;
use store_framework::Response;
use tokio::sync::oneshot;

/// Internal message type sent to the session task.
#[derive(Debug)]
pub enum SessionRequest {
    CheckIdentity {
        respond_to: Response<Option<User>>,
    },
    Login {
        credentials: LoginRequest,
        respond_to: Response<User>,
    },
    Register {
        registration: RegisterRequest,
        respond_to: Response<User>,
    },
    Logout {
        respond_to: Response<()>,
    },
    /// Reads the state after everything queued before it, signals included, was handled.
    Snapshot {
        respond_to: oneshot::Sender<SessionSnapshot>,
    },
}
