//! Session records and the in-memory store that owns them.

use std::sync::{Arc, PoisonError, RwLock};

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::room::RoomId;

/// One created room.
///
/// Records are immutable once created; the store only ever hands out copies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Public code participants use to join.
    pub room_id: RoomId,
    /// Creation time in milliseconds since the Unix epoch.
    pub created_at: i64,
}

/// Thread-safe, process-wide registry of sessions.
///
/// Cloning the store clones a handle; all clones see the same records.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    inner: Arc<SessionStoreInner>,
}

#[derive(Debug, Default)]
struct SessionStoreInner {
    /// Records in creation order.
    sessions: RwLock<Vec<Session>>,
}

impl SessionStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every session, oldest first.
    #[must_use]
    pub fn list_sessions(&self) -> Vec<Session> {
        self.inner
            .sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Mint a new room code, record the session and return a copy of it.
    ///
    /// `created_at` never goes below the previous record's timestamp, even if
    /// the wall clock is stepped backwards between calls.
    pub fn create_session(&self) -> Session {
        let room_id = RoomId::generate();
        let mut guard = self
            .inner
            .sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        let now = Utc::now().timestamp_millis();
        let created_at = guard.last().map_or(now, |last| now.max(last.created_at));

        let session = Session {
            room_id,
            created_at,
        };
        guard.push(session.clone());
        session
    }

    /// Most recently created session with the given code, if any.
    #[must_use]
    pub fn find(&self, room_id: &RoomId) -> Option<Session> {
        self.inner
            .sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .rev()
            .find(|s| &s.room_id == room_id)
            .cloned()
    }

    /// Number of sessions created so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner
            .sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::room::{ROOM_ID_ALPHABET, ROOM_ID_LENGTH};
    use std::thread;

    #[test]
    fn test_fresh_store_lists_nothing() {
        let store = SessionStore::new();
        assert!(store.list_sessions().is_empty());
        assert!(store.is_empty());
    }

    #[test]
    fn test_three_creates_then_list() {
        let store = SessionStore::new();
        let created: Vec<Session> = (0..3).map(|_| store.create_session()).collect();

        let listed = store.list_sessions();
        assert_eq!(listed.len(), 3);
        assert_eq!(listed, created);

        for session in &listed {
            let code = session.room_id.as_str();
            assert_eq!(code.len(), ROOM_ID_LENGTH);
            assert!(code.bytes().all(|b| ROOM_ID_ALPHABET.contains(&b)));
            assert!(session.created_at > 0);
        }
    }

    #[test]
    fn test_created_at_is_non_decreasing() {
        let store = SessionStore::new();
        for _ in 0..200 {
            store.create_session();
        }
        let stamps: Vec<i64> = store.list_sessions().iter().map(|s| s.created_at).collect();
        assert!(stamps.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_list_returns_a_copy() {
        let store = SessionStore::new();
        store.create_session();

        let mut snapshot = store.list_sessions();
        snapshot.clear();
        snapshot.push(Session {
            room_id: RoomId::parse("ZZZZZZ").unwrap(),
            created_at: 0,
        });

        let again = store.list_sessions();
        assert_eq!(again.len(), 1);
        assert_ne!(again[0].room_id.as_str(), "ZZZZZZ");
    }

    #[test]
    fn test_clones_share_state() {
        let store = SessionStore::new();
        let handle = store.clone();
        handle.create_session();
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_find_by_room_id() {
        let store = SessionStore::new();
        let session = store.create_session();

        assert_eq!(store.find(&session.room_id), Some(session));
        // 'O' is outside the generation alphabet, so this can never match.
        assert!(store.find(&RoomId::parse("OOOOOO").unwrap()).is_none());
    }

    #[test]
    fn test_concurrent_creates_are_not_lost() {
        let store = SessionStore::new();
        let workers: Vec<_> = (0..8)
            .map(|_| {
                let store = store.clone();
                thread::spawn(move || {
                    for _ in 0..250 {
                        store.create_session();
                    }
                })
            })
            .collect();

        for worker in workers {
            worker.join().unwrap();
        }

        let listed = store.list_sessions();
        assert_eq!(listed.len(), 2_000);
        assert!(listed.windows(2).all(|w| w[0].created_at <= w[1].created_at));
    }

    #[test]
    fn test_serialized_shape() {
        let session = Session {
            room_id: RoomId::parse("ABC234").unwrap(),
            created_at: 1_700_000_000_000,
        };
        let value = serde_json::to_value(&session).unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "roomId": "ABC234", "createdAt": 1_700_000_000_000_i64 })
        );
    }
}
