//! In-memory conversation storage.
//!
//! Process-local, lost on restart. Each session keeps a bounded list of
//! recent exchanges; stale sessions are swept lazily on every history read,
//! so no background task is needed.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, SystemTime};

use amora_core::types::Exchange;

/// Sessions idle longer than this are evicted.
pub const SESSION_TTL: Duration = Duration::from_secs(3600);

/// Exchanges kept per session; older ones are dropped first.
pub const MAX_EXCHANGES: usize = 10;

/// Store abstraction so engines and tests can substitute implementations.
pub trait SessionStore: Send + Sync {
    /// Recent exchanges for a session, oldest first. Sweeps expired
    /// sessions store-wide before answering; unknown ids yield empty.
    fn history(&self, session_id: &str) -> Vec<Exchange>;

    /// Record an exchange, creating the session on first use and keeping
    /// only the newest [`MAX_EXCHANGES`].
    fn append(&self, session_id: &str, user_text: &str, bot_text: &str);

    /// Drop every session.
    fn clear_all(&self);
}

struct Session {
    history: Vec<Exchange>,
    last_activity: SystemTime,
}

type Clock = Box<dyn Fn() -> SystemTime + Send + Sync>;

/// Mutex-guarded map keyed by session id, with an injectable clock so tests
/// can drive expiry deterministically.
pub struct InMemoryStore {
    sessions: Mutex<HashMap<String, Session>>,
    clock: Clock,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::with_clock(Box::new(SystemTime::now))
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_clock(clock: Clock) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            clock,
        }
    }

    pub fn session_count(&self) -> usize {
        self.sessions.lock().unwrap().len()
    }
}

impl SessionStore for InMemoryStore {
    fn history(&self, session_id: &str) -> Vec<Exchange> {
        let now = (self.clock)();
        let mut sessions = self.sessions.lock().unwrap();

        // Full-store sweep, not just the queried id. O(sessions), fine at
        // the session counts this serves.
        sessions.retain(|_, s| {
            now.duration_since(s.last_activity)
                .map_or(true, |idle| idle <= SESSION_TTL)
        });

        sessions
            .get(session_id)
            .map(|s| s.history.clone())
            .unwrap_or_default()
    }

    fn append(&self, session_id: &str, user_text: &str, bot_text: &str) {
        let now = (self.clock)();
        let mut sessions = self.sessions.lock().unwrap();

        let session = sessions.entry(session_id.to_string()).or_insert(Session {
            history: Vec::new(),
            last_activity: now,
        });

        session.history.push(Exchange {
            user_text: user_text.to_string(),
            bot_text: bot_text.to_string(),
            timestamp: now,
        });
        if session.history.len() > MAX_EXCHANGES {
            let overflow = session.history.len() - MAX_EXCHANGES;
            session.history.drain(..overflow);
        }
        session.last_activity = now;
    }

    fn clear_all(&self) {
        self.sessions.lock().unwrap().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    /// Clock that tests can advance by hand.
    fn stepped_clock() -> (Arc<Mutex<SystemTime>>, Clock) {
        let now = Arc::new(Mutex::new(SystemTime::UNIX_EPOCH));
        let handle = Arc::clone(&now);
        (now, Box::new(move || *handle.lock().unwrap()))
    }

    fn advance(clock: &Arc<Mutex<SystemTime>>, secs: u64) {
        let mut t = clock.lock().unwrap();
        *t += Duration::from_secs(secs);
    }

    #[test]
    fn unknown_session_is_empty() {
        let store = InMemoryStore::new();
        assert!(store.history("nobody").is_empty());
    }

    #[test]
    fn append_then_read_back() {
        let store = InMemoryStore::new();
        store.append("s1", "hello", "greetings, mortal");

        let history = store.history("s1");
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].user_text, "hello");
        assert_eq!(history[0].bot_text, "greetings, mortal");
    }

    #[test]
    fn history_is_bounded_to_last_ten() {
        let store = InMemoryStore::new();
        for i in 0..11 {
            store.append("s1", &format!("user {i}"), &format!("bot {i}"));
        }

        let history = store.history("s1");
        assert_eq!(history.len(), MAX_EXCHANGES);
        // Oldest dropped first: exchange 0 is gone, 1..=10 remain in order.
        assert_eq!(history[0].user_text, "user 1");
        assert_eq!(history[9].user_text, "user 10");
    }

    #[test]
    fn sessions_are_isolated() {
        let store = InMemoryStore::new();
        store.append("a", "hi", "hello a");
        store.append("b", "hi", "hello b");

        assert_eq!(store.history("a")[0].bot_text, "hello a");
        assert_eq!(store.history("b")[0].bot_text, "hello b");
    }

    #[test]
    fn stale_session_evicted_on_any_read() {
        let (clock, boxed) = stepped_clock();
        let store = InMemoryStore::with_clock(boxed);

        store.append("old", "hi", "hello");
        advance(&clock, 3601);
        store.append("fresh", "hi", "hello");

        // Reading an unrelated id still sweeps the whole store.
        let _ = store.history("fresh");
        assert_eq!(store.session_count(), 1);
        assert!(store.history("old").is_empty());
    }

    #[test]
    fn session_at_ttl_boundary_survives() {
        let (clock, boxed) = stepped_clock();
        let store = InMemoryStore::with_clock(boxed);

        store.append("s1", "hi", "hello");
        advance(&clock, 3600);
        assert_eq!(store.history("s1").len(), 1);
    }

    #[test]
    fn append_refreshes_last_activity() {
        let (clock, boxed) = stepped_clock();
        let store = InMemoryStore::with_clock(boxed);

        store.append("s1", "one", "reply");
        advance(&clock, 3000);
        store.append("s1", "two", "reply");
        advance(&clock, 3000);

        // 6000s since creation but only 3000s since last append.
        assert_eq!(store.history("s1").len(), 2);
    }

    #[test]
    fn clear_all_empties_store() {
        let store = InMemoryStore::new();
        store.append("a", "hi", "hello");
        store.append("b", "hi", "hello");

        store.clear_all();
        assert_eq!(store.session_count(), 0);
        assert!(store.history("a").is_empty());
    }
}
