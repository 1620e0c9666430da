//! Per-session state: the login flag is implied by presence in the store, and
//! each session owns its own generation history.
//!
//! A session is created on successful login and dropped on logout, or once it
//! has been idle longer than the store's TTL. Nothing is persisted; a restart
//! loses every session.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Local};
use serde::Serialize;
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::info;
use uuid::Uuid;

use crate::models::cep::CepRecord;
use crate::models::strategy::StrategyRequest;

pub mod auth;
pub mod handlers;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Sessions untouched for this long are dropped.
pub const DEFAULT_IDLE_TTL: Duration = Duration::from_secs(2 * 60 * 60);

/// One successful generation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryEntry {
    pub timestamp: String,
    pub product: String,
    pub target: String,
    /// Platform label as shown on the form.
    pub platform: String,
    pub records: Vec<CepRecord>,
}

impl HistoryEntry {
    pub fn new(request: &StrategyRequest, records: Vec<CepRecord>, at: DateTime<Local>) -> Self {
        Self {
            timestamp: at.format(TIMESTAMP_FORMAT).to_string(),
            product: request.product_name.clone(),
            target: request.target_audience.clone(),
            platform: request.platform.label().to_string(),
            records,
        }
    }
}

/// Append-only history, most recent first.
#[derive(Debug, Clone, Default)]
pub struct SessionHistory {
    entries: VecDeque<HistoryEntry>,
}

impl SessionHistory {
    /// Inserts at position 0.
    pub fn record(&mut self, entry: HistoryEntry) {
        self.entries.push_front(entry);
    }

    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.front()
    }

    pub fn get(&self, index: usize) -> Option<&HistoryEntry> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

#[derive(Debug, Clone)]
pub struct SessionContext {
    /// Last authenticated request. Drives idle eviction.
    pub last_seen: Instant,
    pub history: SessionHistory,
}

impl SessionContext {
    pub fn new() -> Self {
        Self {
            last_seen: Instant::now(),
            history: SessionHistory::default(),
        }
    }

    fn is_idle(&self, now: Instant, ttl: Duration) -> bool {
        now.saturating_duration_since(self.last_seen) >= ttl
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}

/// All live sessions, keyed by the token handed out at login.
/// The lock is only held for map access, never across network calls.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<Uuid, SessionContext>>>,
    idle_ttl: Duration,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore {
    pub fn new() -> Self {
        Self::with_idle_ttl(DEFAULT_IDLE_TTL)
    }

    pub fn with_idle_ttl(idle_ttl: Duration) -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
            idle_ttl,
        }
    }

    /// Starts a session and returns its token. Idle sessions are swept first.
    pub async fn open(&self) -> Uuid {
        let mut sessions = self.inner.write().await;
        let now = Instant::now();
        let before = sessions.len();
        sessions.retain(|_, session| !session.is_idle(now, self.idle_ttl));
        let evicted = before - sessions.len();
        if evicted > 0 {
            info!("Evicted {evicted} idle session(s)");
        }

        let id = Uuid::new_v4();
        sessions.insert(id, SessionContext::new());
        id
    }

    /// Ends a session. Returns false if it did not exist.
    pub async fn close(&self, id: Uuid) -> bool {
        self.inner.write().await.remove(&id).is_some()
    }

    /// Marks a session as active. Returns false if it is unknown or has gone
    /// idle, in which case it is dropped.
    pub async fn touch(&self, id: Uuid) -> bool {
        let mut sessions = self.inner.write().await;
        let now = Instant::now();
        match sessions.get_mut(&id) {
            Some(session) if !session.is_idle(now, self.idle_ttl) => {
                session.last_seen = now;
                true
            }
            Some(_) => {
                sessions.remove(&id);
                info!("Session {id} expired");
                false
            }
            None => false,
        }
    }

    #[cfg(test)]
    async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    /// Runs `f` against a session, if it exists.
    pub async fn with_session<R>(&self, id: Uuid, f: impl FnOnce(&SessionContext) -> R) -> Option<R> {
        self.inner.read().await.get(&id).map(f)
    }

    /// Runs `f` against a session mutably, if it exists.
    pub async fn with_session_mut<R>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut SessionContext) -> R,
    ) -> Option<R> {
        self.inner.write().await.get_mut(&id).map(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::strategy::{Platform, Tone};
    use chrono::TimeZone;

    fn request(name: &str) -> StrategyRequest {
        StrategyRequest {
            product_name: name.to_string(),
            target_audience: "4050 여성".to_string(),
            product_details: "관절 무리 없음".to_string(),
            platform: Platform::Feed,
            tone: Tone::Soft,
            web_search: false,
        }
    }

    #[test]
    fn test_entry_formats_timestamp_and_platform_label() {
        let at = Local.with_ymd_and_hms(2026, 10, 19, 9, 5, 3).unwrap();
        let entry = HistoryEntry::new(&request("스텝퍼"), vec![], at);
        assert_eq!(entry.timestamp, "2026-10-19 09:05:03");
        assert_eq!(entry.platform, "SNS 피드 (인스타/페북)");
        assert_eq!(entry.target, "4050 여성");
    }

    #[test]
    fn test_history_is_most_recent_first() {
        let mut history = SessionHistory::default();
        history.record(HistoryEntry::new(&request("첫번째"), vec![], Local::now()));
        history.record(HistoryEntry::new(&request("두번째"), vec![], Local::now()));
        assert_eq!(history.len(), 2);
        assert_eq!(history.latest().unwrap().product, "두번째");
        assert_eq!(history.get(1).unwrap().product, "첫번째");
        assert!(history.get(2).is_none());
    }

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let store = SessionStore::new();
        let a = store.open().await;
        let b = store.open().await;

        store
            .with_session_mut(a, |s| {
                s.history
                    .record(HistoryEntry::new(&request("A 제품"), vec![], Local::now()))
            })
            .await
            .unwrap();

        assert_eq!(store.with_session(a, |s| s.history.len()).await, Some(1));
        assert_eq!(store.with_session(b, |s| s.history.len()).await, Some(0));
    }

    #[tokio::test]
    async fn test_close_drops_history() {
        let store = SessionStore::new();
        let id = store.open().await;
        assert!(store.touch(id).await);
        assert!(store.close(id).await);
        assert!(!store.touch(id).await);
        assert!(!store.close(id).await);
        assert!(store.with_session(id, |s| s.history.len()).await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_idle_session_expires_after_ttl() {
        let store = SessionStore::with_idle_ttl(Duration::from_secs(60));
        let id = store.open().await;

        tokio::time::advance(Duration::from_secs(59)).await;
        assert!(store.touch(id).await);

        // activity resets the clock
        tokio::time::advance(Duration::from_secs(59)).await;
        assert!(store.touch(id).await);

        tokio::time::advance(Duration::from_secs(60)).await;
        assert!(!store.touch(id).await);
        assert!(store.with_session(id, |s| s.history.len()).await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_open_sweeps_abandoned_sessions() {
        let store = SessionStore::with_idle_ttl(Duration::from_secs(60));
        for _ in 0..100 {
            store.open().await;
        }
        assert_eq!(store.len().await, 100);

        tokio::time::advance(Duration::from_secs(61)).await;
        let fresh = store.open().await;
        assert_eq!(store.len().await, 1);
        assert!(store.touch(fresh).await);
    }
}
