//! In-memory `SessionStore`.

use rustc_hash::FxHashMap;
use tracing::warn;

use crate::core::{ActionRecord, Session, SessionId};

use super::{decode_session, encode_session, SessionStore, StoreError};

/// Keeps encoded session snapshots and audit records in hash maps.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    sessions: FxHashMap<SessionId, Vec<u8>>,
    records: FxHashMap<SessionId, Vec<ActionRecord>>,
    next_id: u64,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored sessions, terminal ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Is the store empty?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

impl SessionStore for MemoryStore {
    fn allocate_id(&mut self) -> Result<SessionId, StoreError> {
        self.next_id += 1;
        Ok(SessionId::new(self.next_id))
    }

    fn load(&self, id: SessionId) -> Result<Session, StoreError> {
        let bytes = self.sessions.get(&id).ok_or(StoreError::NotFound(id))?;
        decode_session(bytes)
    }

    fn save(&mut self, session: &Session) -> Result<(), StoreError> {
        self.sessions.insert(session.id(), encode_session(session)?);
        Ok(())
    }

    fn list_active(&self) -> Result<Vec<Session>, StoreError> {
        let mut active = Vec::new();
        for (id, bytes) in &self.sessions {
            match decode_session(bytes) {
                Ok(session) if !session.is_terminal() => active.push(session),
                Ok(_) => {}
                Err(e) => warn!(session = %id, error = %e, "skipping undecodable snapshot"),
            }
        }
        active.sort_by_key(Session::id);
        Ok(active)
    }

    fn append_records(&mut self, records: &[ActionRecord]) -> Result<(), StoreError> {
        for record in records {
            self.records
                .entry(record.session)
                .or_default()
                .push(record.clone());
        }
        Ok(())
    }

    fn records(&self, id: SessionId) -> Result<Vec<ActionRecord>, StoreError> {
        Ok(self.records.get(&id).cloned().unwrap_or_default())
    }
}
