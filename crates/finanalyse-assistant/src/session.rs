//! Chat session storage with TTL and capacity eviction

use crate::messages::ChatTurn;
use chrono::{DateTime, Utc};
use std::collections::{HashMap, VecDeque};
use std::sync::RwLock;

/// Maximum turns kept per session. Older turns are discarded so the
/// upstream request body stays bounded.
const MAX_HISTORY_TURNS: usize = 50;

/// Default inactivity TTL: 30 minutes.
pub const DEFAULT_TTL_SECS: i64 = 1800;

/// Default capacity cap on concurrently tracked sessions.
pub const DEFAULT_CAPACITY: usize = 1000;

/// One user's conversation state.
#[derive(Debug, Clone)]
pub struct ChatSession {
    pub id: String,
    pub turns: VecDeque<ChatTurn>,
    pub created_at: DateTime<Utc>,
    pub last_active: DateTime<Utc>,
}

impl ChatSession {
    pub fn new(id: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            turns: VecDeque::with_capacity(MAX_HISTORY_TURNS),
            created_at: now,
            last_active: now,
        }
    }

    /// Append a user/model exchange, trimming the oldest turns beyond
    /// the history cap.
    pub fn record(&mut self, user_text: &str, model_text: &str) {
        self.turns.push_back(ChatTurn::user(user_text));
        self.turns.push_back(ChatTurn::model(model_text));
        while self.turns.len() > MAX_HISTORY_TURNS {
            self.turns.pop_front();
        }
        self.last_active = Utc::now();
    }

    pub fn is_expired(&self, max_age_seconds: i64) -> bool {
        let max_age = chrono::Duration::seconds(max_age_seconds);
        Utc::now() - self.last_active > max_age
    }
}

/// Storage abstraction for chat sessions.
///
/// Injected into the assistant so the eviction policy is an explicit
/// dependency rather than a module-level global. All methods take
/// `&self`; implementations handle their own interior locking so a store
/// can be shared behind `Arc` from concurrent handlers.
pub trait SessionStore: Send + Sync {
    /// Conversation history for a session, touching its activity
    /// timestamp. `None` for unknown or expired sessions (an expired
    /// session is removed on access).
    fn history(&self, id: &str) -> Option<Vec<ChatTurn>>;

    /// Record a completed user/model exchange, creating the session if
    /// needed.
    fn record_exchange(&self, id: &str, user_text: &str, model_text: &str);

    /// Drop a session. Returns whether it existed.
    fn remove(&self, id: &str) -> bool;

    /// Sweep expired sessions, returning how many were dropped.
    fn evict_expired(&self) -> usize;

    /// Number of tracked sessions.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// In-memory store with an inactivity TTL and a hard capacity cap.
///
/// At capacity, the least-recently-active session is evicted to make
/// room. Process-lifetime only; nothing is persisted.
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<String, ChatSession>>,
    ttl_seconds: i64,
    capacity: usize,
}

impl InMemorySessionStore {
    pub fn new(ttl_seconds: i64, capacity: usize) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            ttl_seconds,
            capacity: capacity.max(1),
        }
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new(DEFAULT_TTL_SECS, DEFAULT_CAPACITY)
    }
}

impl SessionStore for InMemorySessionStore {
    fn history(&self, id: &str) -> Option<Vec<ChatTurn>> {
        let mut sessions = self.sessions.write().ok()?;

        let expired = sessions.get(id)?.is_expired(self.ttl_seconds);
        if expired {
            sessions.remove(id);
            return None;
        }

        let session = sessions.get_mut(id)?;
        session.last_active = Utc::now();
        Some(session.turns.iter().cloned().collect())
    }

    fn record_exchange(&self, id: &str, user_text: &str, model_text: &str) {
        let Ok(mut sessions) = self.sessions.write() else {
            return;
        };

        if !sessions.contains_key(id) && sessions.len() >= self.capacity {
            let oldest = sessions
                .values()
                .min_by_key(|s| s.last_active)
                .map(|s| s.id.clone());
            if let Some(oldest) = oldest {
                tracing::debug!(session = %oldest, "session store at capacity, evicting");
                sessions.remove(&oldest);
            }
        }

        sessions
            .entry(id.to_string())
            .or_insert_with(|| ChatSession::new(id))
            .record(user_text, model_text);
    }

    fn remove(&self, id: &str) -> bool {
        self.sessions
            .write()
            .ok()
            .and_then(|mut sessions| sessions.remove(id))
            .is_some()
    }

    fn evict_expired(&self) -> usize {
        let Ok(mut sessions) = self.sessions.write() else {
            return 0;
        };
        let ttl = self.ttl_seconds;
        let before = sessions.len();
        sessions.retain(|_, session| !session.is_expired(ttl));
        before - sessions.len()
    }

    fn len(&self) -> usize {
        self.sessions.read().map(|s| s.len()).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn age_session(store: &InMemorySessionStore, id: &str, seconds: i64) {
        let mut sessions = store.sessions.write().unwrap();
        let session = sessions.get_mut(id).unwrap();
        session.last_active = Utc::now() - chrono::Duration::seconds(seconds);
    }

    #[test]
    fn test_history_roundtrip() {
        let store = InMemorySessionStore::default();
        assert!(store.history("s1").is_none());

        store.record_exchange("s1", "hello", "hi there");
        let history = store.history("s1").unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].text, "hello");
        assert_eq!(history[1].text, "hi there");
    }

    #[test]
    fn test_expired_session_is_dropped_on_access() {
        let store = InMemorySessionStore::new(60, 10);
        store.record_exchange("s1", "hello", "hi");
        age_session(&store, "s1", 120);

        assert!(store.history("s1").is_none());
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn test_evict_expired_sweeps_only_stale_sessions() {
        let store = InMemorySessionStore::new(60, 10);
        store.record_exchange("old", "a", "b");
        store.record_exchange("fresh", "c", "d");
        age_session(&store, "old", 120);

        assert_eq!(store.evict_expired(), 1);
        assert!(store.history("old").is_none());
        assert!(store.history("fresh").is_some());
    }

    #[test]
    fn test_capacity_evicts_least_recently_active() {
        let store = InMemorySessionStore::new(3600, 2);
        store.record_exchange("a", "1", "1");
        store.record_exchange("b", "2", "2");
        age_session(&store, "a", 300);
        age_session(&store, "b", 60);

        store.record_exchange("c", "3", "3");

        assert_eq!(store.len(), 2);
        assert!(store.history("a").is_none());
        assert!(store.history("b").is_some());
        assert!(store.history("c").is_some());
    }

    #[test]
    fn test_existing_session_updates_do_not_evict() {
        let store = InMemorySessionStore::new(3600, 1);
        store.record_exchange("a", "1", "1");
        store.record_exchange("a", "2", "2");

        assert_eq!(store.len(), 1);
        assert_eq!(store.history("a").unwrap().len(), 4);
    }

    #[test]
    fn test_history_is_bounded() {
        let store = InMemorySessionStore::default();
        for i in 0..100 {
            store.record_exchange("s1", &format!("q{i}"), &format!("a{i}"));
        }
        let history = store.history("s1").unwrap();
        assert_eq!(history.len(), MAX_HISTORY_TURNS);
        // Oldest turns were discarded, the latest exchange survives.
        assert_eq!(history.last().unwrap().text, "a99");
    }

    #[test]
    fn test_remove() {
        let store = InMemorySessionStore::default();
        store.record_exchange("s1", "q", "a");
        assert!(store.remove("s1"));
        assert!(!store.remove("s1"));
        assert!(store.is_empty());
    }
}
