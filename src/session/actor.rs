//! The session task.
//!
//! Works like a [`ResourceStore`](store_framework::ResourceStore): requests are handled one at
//! a time, state is published through a `watch` channel, and nothing is committed before the
//! server confirms it. In addition the task listens for [`UnauthorizedSignal`]s; a queued
//! signal is always handled before the next queued request.
//!
//! A signal only ever applies to the session it was raised against. Signals still queued when
//! a new identity is committed came from requests sent before that identity existed, so they
//! are discarded instead of signing the new user out.

use crate::clients::SessionClient;
use crate::model::{LoginRequest, RegisterRequest, User};
use crate::session::message::SessionRequest;
use crate::session::{
    SessionSnapshot, SessionState, LOGIN_PATH, LOGOUT_PATH, ME_PATH, REGISTER_PATH,
};
use crate::validation::{validate_login, validate_registration};
use serde::Serialize;
use serde_json::Value;
use store_framework::remote::{envelope, UnauthorizedSignal};
use store_framework::{ApiError, ApiErrorKind, RemoteClient, StoreError};
use tokio::sync::broadcast::error::{RecvError, TryRecvError};
use tokio::sync::{broadcast, mpsc, watch};
use tracing::{debug, info, warn};

enum Event {
    Request(SessionRequest),
    Unauthorized(String),
    SignalsLagged(u64),
    SignalsClosed,
}

/// Owns the session state. Create with [`SessionStore::new`] and spawn [`SessionStore::run`].
pub struct SessionStore {
    receiver: mpsc::Receiver<SessionRequest>,
    signals: Option<broadcast::Receiver<UnauthorizedSignal>>,
    state: SessionSnapshot,
    publisher: watch::Sender<SessionSnapshot>,
    remote: RemoteClient,
}

impl SessionStore {
    /// Creates the store and its client. The unauthorized subscription starts here, so a
    /// `401` seen before [`run`](Self::run) is polled is not lost.
    pub fn new(buffer_size: usize, remote: RemoteClient) -> (Self, SessionClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let (publisher, state_rx) = watch::channel(SessionSnapshot::default());
        let store = Self {
            receiver,
            signals: Some(remote.subscribe_unauthorized()),
            state: SessionSnapshot::default(),
            publisher,
            remote,
        };
        (store, SessionClient::new(sender, state_rx))
    }

    /// Runs the event loop until every client is dropped.
    pub async fn run(mut self) {
        info!("Session store started");

        loop {
            let event = tokio::select! {
                biased;
                event = next_signal(&mut self.signals) => event,
                msg = self.receiver.recv() => match msg {
                    Some(msg) => Event::Request(msg),
                    None => break,
                },
            };

            match event {
                Event::Unauthorized(path) => self.force_sign_out(&path),
                Event::SignalsLagged(missed) => {
                    warn!(missed, "Unauthorized signals lagged");
                    self.force_sign_out("<lagged>");
                }
                Event::SignalsClosed => {
                    debug!("Unauthorized channel closed");
                    self.signals = None;
                }
                Event::Request(request) => self.handle(request).await,
            }
        }

        info!(
            authenticated = self.state.state.is_authenticated(),
            "Shutdown"
        );
    }

    async fn handle(&mut self, request: SessionRequest) {
        match request {
            SessionRequest::CheckIdentity { respond_to } => {
                debug!("CheckIdentity");
                let result = self.check_identity().await;
                let _ = respond_to.send(result);
            }
            SessionRequest::Login {
                credentials,
                respond_to,
            } => {
                debug!(?credentials, "Login");
                let result = self.login(credentials).await;
                let _ = respond_to.send(result);
            }
            SessionRequest::Register {
                registration,
                respond_to,
            } => {
                debug!(?registration, "Register");
                let result = self.register(registration).await;
                let _ = respond_to.send(result);
            }
            SessionRequest::Logout { respond_to } => {
                debug!("Logout");
                let result = self.logout().await;
                let _ = respond_to.send(result);
            }
            SessionRequest::Snapshot { respond_to } => {
                let _ = respond_to.send(self.state.clone());
            }
        }
    }

    /// Failures are not surfaced: an unknown identity just means nobody is signed in.
    async fn check_identity(&mut self) -> Result<Option<User>, StoreError> {
        self.begin();
        let outcome = match self.remote.get(ME_PATH).await {
            Ok(body) => decode_user(body),
            Err(e) => Err(e),
        };

        match outcome {
            Ok(user) => {
                info!(user_id = user.id, "Identity confirmed");
                self.commit_identity(user.clone());
                self.finish();
                Ok(Some(user))
            }
            Err(e) => {
                debug!(kind = %e.kind, "No identity");
                self.set_identity(SessionState::Anonymous);
                self.finish();
                Ok(None)
            }
        }
    }

    async fn login(&mut self, credentials: LoginRequest) -> Result<User, StoreError> {
        validate_login(&credentials).map_err(|e| {
            warn!(error = %e, "Login rejected");
            StoreError::Validation(e)
        })?;
        self.authenticate(LOGIN_PATH, &credentials, "Login failed")
            .await
    }

    async fn register(&mut self, registration: RegisterRequest) -> Result<User, StoreError> {
        validate_registration(&registration).map_err(|e| {
            warn!(error = %e, "Registration rejected");
            StoreError::Validation(e)
        })?;
        self.authenticate(REGISTER_PATH, &registration, "Registration failed")
            .await
    }

    /// Posts `body` and, on success, signs in the user the server returns.
    async fn authenticate<B: Serialize>(
        &mut self,
        path: &str,
        body: &B,
        what: &'static str,
    ) -> Result<User, StoreError> {
        self.begin();
        let outcome = match serde_json::to_value(body) {
            Ok(body) => match self.remote.post(path, Some(body)).await {
                Ok(body) => decode_user(body),
                Err(e) => Err(e),
            },
            Err(e) => Err(ApiError::malformed(format!("failed to encode request: {e}"))),
        };

        match outcome {
            Ok(user) => {
                info!(user_id = user.id, username = %user.username, "Signed in");
                self.commit_identity(user.clone());
                self.finish();
                Ok(user)
            }
            Err(e) => Err(self.fail(what, e)),
        }
    }

    /// Identity is cleared whether or not the server acknowledges.
    async fn logout(&mut self) -> Result<(), StoreError> {
        self.begin();
        let outcome = self.remote.post(LOGOUT_PATH, None).await;
        self.set_identity(SessionState::Anonymous);

        match outcome {
            Ok(_) => {
                info!("Signed out");
                self.state.error = None;
                self.finish();
                Ok(())
            }
            Err(e) => Err(self.fail("Logout failed on server", e)),
        }
    }

    fn force_sign_out(&mut self, path: &str) {
        if !self.state.state.is_authenticated() {
            debug!(path, "Unauthorized while anonymous");
            return;
        }
        warn!(path, "Session rejected by server, signing out");
        self.set_identity(SessionState::Anonymous);
        self.state.error =
            Some(ApiError::new(ApiErrorKind::Unauthorized, Some(401), "").user_message());
        self.publish();
    }

    /// Signs `user` in, dropping signals raised against whatever session came before.
    fn commit_identity(&mut self, user: User) {
        self.discard_stale_signals();
        self.set_identity(SessionState::Authenticated(user));
        self.state.error = None;
    }

    fn discard_stale_signals(&mut self) {
        let Some(rx) = self.signals.as_mut() else {
            return;
        };
        let closed = loop {
            match rx.try_recv() {
                Ok(signal) => debug!(path = %signal.path, "Discarding stale unauthorized signal"),
                Err(TryRecvError::Lagged(missed)) => {
                    debug!(missed, "Discarding lagged unauthorized signals")
                }
                Err(TryRecvError::Empty) => break false,
                Err(TryRecvError::Closed) => break true,
            }
        };
        if closed {
            self.signals = None;
        }
    }

    fn set_identity(&mut self, next: SessionState) {
        if self.state.state.is_transition_to(&next) {
            self.state.revision += 1;
        }
        self.state.state = next;
    }

    fn begin(&mut self) {
        self.state.loading = true;
        self.publish();
    }

    fn finish(&mut self) {
        self.state.loading = false;
        self.publish();
    }

    fn fail(&mut self, what: &'static str, e: ApiError) -> StoreError {
        warn!(kind = %e.kind, error = %e.message, "{}", what);
        self.state.error = Some(e.user_message());
        self.finish();
        StoreError::Api(e)
    }

    fn publish(&self) {
        self.publisher.send_replace(self.state.clone());
    }
}

async fn next_signal(signals: &mut Option<broadcast::Receiver<UnauthorizedSignal>>) -> Event {
    match signals {
        Some(rx) => match rx.recv().await {
            Ok(signal) => Event::Unauthorized(signal.path),
            Err(RecvError::Lagged(missed)) => Event::SignalsLagged(missed),
            Err(RecvError::Closed) => Event::SignalsClosed,
        },
        None => std::future::pending().await,
    }
}

fn decode_user(body: Value) -> Result<User, ApiError> {
    envelope::unwrap_one::<User>(body, "user")
}
