//! Persistence seam for sessions and their action records.
//!
//! The engine never persists anything itself. `SessionStore` is the
//! contract the `Arena` drives; `MemoryStore` is a complete in-process
//! implementation that keeps encoded snapshots, the way a database row
//! would hold them.

mod memory;

pub use memory::MemoryStore;

use thiserror::Error;

use crate::core::{ActionRecord, Session, SessionId};

/// Persistence failures.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No session with this id.
    #[error("{0} not found")]
    NotFound(SessionId),
    /// A snapshot could not be encoded or decoded.
    #[error("session snapshot codec error: {0}")]
    Codec(#[from] bincode::Error),
}

/// Storage for sessions and the facts applied actions produce.
pub trait SessionStore {
    /// Reserve a fresh session id.
    fn allocate_id(&mut self) -> Result<SessionId, StoreError>;

    /// Load a session by id.
    fn load(&self, id: SessionId) -> Result<Session, StoreError>;

    /// Insert or replace a session.
    fn save(&mut self, session: &Session) -> Result<(), StoreError>;

    /// Every session whose phase is not terminal.
    ///
    /// A snapshot that cannot be decoded is skipped, not reported, so one bad
    /// row cannot stall a timeout sweep.
    fn list_active(&self) -> Result<Vec<Session>, StoreError>;

    /// Append audit records.
    fn append_records(&mut self, records: &[ActionRecord]) -> Result<(), StoreError>;

    /// Audit records for a session, in the order they were appended.
    fn records(&self, id: SessionId) -> Result<Vec<ActionRecord>, StoreError>;
}

/// Encode a session snapshot.
pub fn encode_session(session: &Session) -> Result<Vec<u8>, StoreError> {
    Ok(bincode::serialize(session)?)
}

/// Decode a session snapshot.
pub fn decode_session(bytes: &[u8]) -> Result<Session, StoreError> {
    Ok(bincode::deserialize(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{DuelConfig, ParticipantId, Phase, Seat, Timestamp};

    #[test]
    fn test_snapshot_codec() {
        let session = Session::new(
            SessionId::new(3),
            ParticipantId::new(1),
            Some(ParticipantId::new(2)),
            &DuelConfig::default(),
            Timestamp::from_secs(50),
        );

        let bytes = encode_session(&session).unwrap();
        let decoded = decode_session(&bytes).unwrap();

        assert_eq!(decoded, session);
        assert_eq!(decoded.phase(), Phase::Committing(Seat::A));
    }

    #[test]
    fn test_decode_garbage() {
        assert!(matches!(
            decode_session(&[0xff, 0x01]),
            Err(StoreError::Codec(_))
        ));
    }
}
