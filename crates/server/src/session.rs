// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Open form sessions and the extractor that resolves them from the path.
//!
//! Each session sits behind one async mutex. User edits and autofill
//! completions are both applied while holding it, so a lookup result can
//! never interleave with an edit.

use axum::{
    extract::{FromRequestParts, Path},
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use intake_api::{IntakeDesk, IntakeSession, Transcriber};
use intake_autofill::{ClientLookup, LookupEvent};
use intake_persistence::CaseRepository;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use tokio::sync::Mutex;
use tokio::sync::mpsc::{UnboundedReceiver, unbounded_channel};
use tracing::{debug, info, warn};

use crate::AppState;

/// A session shared between request handlers and its event pump.
pub type SharedSession<L> = Arc<Mutex<IntakeSession<L>>>;

/// Every open session, keyed by id.
#[derive(Debug)]
pub struct SessionRegistry<L: ClientLookup> {
    next_id: AtomicU64,
    sessions: Mutex<HashMap<u64, SharedSession<L>>>,
}

impl<L: ClientLookup> Default for SessionRegistry<L> {
    fn default() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            sessions: Mutex::new(HashMap::new()),
        }
    }
}

impl<L: ClientLookup> SessionRegistry<L> {
    /// Opens a session on a default case and starts feeding its lookup
    /// results back into it.
    pub async fn open<R: CaseRepository>(&self, desk: &IntakeDesk<R, L>) -> u64 {
        let (events_tx, events_rx) = unbounded_channel();
        let session: SharedSession<L> = Arc::new(Mutex::new(desk.open_session(&events_tx)));
        tokio::spawn(pump_lookup_events(Arc::downgrade(&session), events_rx));

        let id: u64 = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.sessions.lock().await.insert(id, session);
        info!(session_id = id, "Opened form session");
        id
    }

    /// The session with `id`, if open.
    pub async fn get(&self, id: u64) -> Option<SharedSession<L>> {
        self.sessions.lock().await.get(&id).cloned()
    }

    /// Closes a session, cancelling its pending lookups.
    ///
    /// Returns whether the session was open.
    pub async fn close(&self, id: u64) -> bool {
        let removed: Option<SharedSession<L>> = self.sessions.lock().await.remove(&id);
        let Some(session) = removed else {
            return false;
        };
        session.lock().await.shutdown();
        info!(session_id = id, "Closed form session");
        true
    }
}

/// Applies lookup events to the session until it is gone.
///
/// Holds only a weak reference so a closed session is freed even while a
/// lookup is still winding down.
async fn pump_lookup_events<L: ClientLookup>(
    session: Weak<Mutex<IntakeSession<L>>>,
    mut events: UnboundedReceiver<LookupEvent>,
) {
    while let Some(event) = events.recv().await {
        let Some(session) = session.upgrade() else {
            break;
        };
        let applied = session.lock().await.handle_lookup_event(event);
        if let Err(err) = applied {
            warn!(error = %err, "Failed to apply autofill result");
        }
    }
    debug!("Lookup event pump stopped");
}

/// Extractor for the session named by the `{id}` path segment.
///
/// # Errors
///
/// Rejects with HTTP 400 if the id is not a number, or HTTP 404 if no such
/// session is open.
pub struct SessionHandle<L: ClientLookup>(pub u64, pub SharedSession<L>);

impl<L: ClientLookup, T: Transcriber> FromRequestParts<AppState<L, T>> for SessionHandle<L> {
    type Rejection = SessionError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState<L, T>,
    ) -> Result<Self, Self::Rejection> {
        let Path(params): Path<HashMap<String, String>> =
            Path::from_request_parts(parts, state)
                .await
                .map_err(|_| SessionError::InvalidSessionId)?;
        let id: u64 = params
            .get("id")
            .and_then(|raw| raw.parse().ok())
            .ok_or(SessionError::InvalidSessionId)?;

        let session: SharedSession<L> = state.sessions.get(id).await.ok_or_else(|| {
            debug!(session_id = id, "Unknown session");
            SessionError::UnknownSession(id)
        })?;
        Ok(Self(id, session))
    }
}

/// Session extraction errors.
#[derive(Debug)]
pub enum SessionError {
    /// The path does not carry a numeric session id.
    InvalidSessionId,
    /// No session with this id is open.
    UnknownSession(u64),
}

impl IntoResponse for SessionError {
    fn into_response(self) -> Response {
        match self {
            Self::InvalidSessionId => {
                (StatusCode::BAD_REQUEST, "Session id must be a number").into_response()
            }
            Self::UnknownSession(id) => {
                (StatusCode::NOT_FOUND, format!("Session {id} is not open")).into_response()
            }
        }
    }
}
