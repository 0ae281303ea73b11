//! Session store.
//!
//! Holds the bearer credential, user name, login instant and expiry instant
//! as one unit. The store is injected (`Arc<dyn SessionStore>`) into the
//! transport and the pages instead of living in global state.
//!
//! The four values are always written and removed together: the file store
//! writes a temp file and renames it over the target, so a reader never sees
//! a credential without its expiry.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Authenticated session. Wire names match the persisted keys
/// (`token`, `userName`, `loginTime`, `expirationTime`), times in epoch ms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub token: String,
    pub user_name: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub login_time: DateTime<Utc>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub expiration_time: DateTime<Utc>,
}

/// Validity of a session at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Active,
    Expired,
}

impl Session {
    /// Build a session whose expiry is `login_time + ttl`.
    ///
    /// Fails when the expiry falls outside the representable time range.
    pub fn new(
        token: &str,
        user_name: &str,
        login_time: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<Self> {
        let expiration_time = login_time.checked_add_signed(ttl).ok_or_else(|| {
            Error::Session(format!(
                "Session lifetime of {}s is out of range",
                ttl.num_seconds()
            ))
        })?;
        Ok(Self {
            token: token.to_string(),
            user_name: user_name.to_string(),
            login_time,
            expiration_time,
        })
    }

    /// Expired strictly after the expiry instant.
    pub fn status_at(&self, now: DateTime<Utc>) -> SessionStatus {
        if now > self.expiration_time {
            SessionStatus::Expired
        } else {
            SessionStatus::Active
        }
    }

    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        self.status_at(now) == SessionStatus::Active
    }

    /// Time left before expiry, zero once expired.
    pub fn remaining_at(&self, now: DateTime<Utc>) -> Duration {
        (self.expiration_time - now).max(Duration::zero())
    }
}

/// Persisted session state with `get`/`set`/`clear`.
pub trait SessionStore: Send + Sync + std::fmt::Debug {
    /// Current session, expired or not. `None` when nothing is stored.
    fn get(&self) -> Result<Option<Session>>;

    /// Store a new session; expiry is computed from the store's ttl.
    fn set(&self, token: &str, user_name: &str, login_time: DateTime<Utc>) -> Result<Session>;

    /// Remove every stored key.
    fn clear(&self) -> Result<()>;

    /// Session only if still valid at `now`. Expired sessions read as absent.
    fn active_at(&self, now: DateTime<Utc>) -> Result<Option<Session>> {
        Ok(self.get()?.filter(|s| s.is_active_at(now)))
    }

    /// Stored credential, if any. Read errors count as "no credential".
    fn token(&self) -> Option<String> {
        match self.get() {
            Ok(session) => session.map(|s| s.token),
            Err(e) => {
                warn!(error = %e, "Failed to read session; sending request unauthenticated");
                None
            }
        }
    }
}

// =============================================================================
// In-memory store
// =============================================================================

/// Session held in process memory.
#[derive(Debug)]
pub struct MemorySessionStore {
    ttl: Duration,
    inner: Mutex<Option<Session>>,
}

impl MemorySessionStore {
    pub const fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            inner: Mutex::new(None),
        }
    }

    /// Store pre-populated with `session` (used to simulate restored state).
    pub const fn with_session(ttl: Duration, session: Session) -> Self {
        Self {
            ttl,
            inner: Mutex::new(Some(session)),
        }
    }
}

impl Default for MemorySessionStore {
    fn default() -> Self {
        Self::new(Duration::hours(1))
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self) -> Result<Option<Session>> {
        Ok(self
            .inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn set(&self, token: &str, user_name: &str, login_time: DateTime<Utc>) -> Result<Session> {
        let session = Session::new(token, user_name, login_time, self.ttl)?;
        *self.inner.lock().unwrap_or_else(PoisonError::into_inner) = Some(session.clone());
        Ok(session)
    }

    fn clear(&self) -> Result<()> {
        *self.inner.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}

// =============================================================================
// File store
// =============================================================================

/// Session persisted as a single JSON document.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
    ttl: Duration,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>, ttl: Duration) -> Self {
        Self {
            path: path.into(),
            ttl,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_atomic(&self, session: &Session) -> Result<()> {
        let dir = self
            .path
            .parent()
            .filter(|d| !d.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        std::fs::create_dir_all(dir)?;

        let json = serde_json::to_vec_pretty(session)?;
        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        tmp.write_all(&json)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path)
            .map_err(|e| Error::Session(format!("Failed to persist session: {}", e.error)))?;
        Ok(())
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self) -> Result<Option<Session>> {
        let data = match std::fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        match serde_json::from_str(&data) {
            Ok(session) => Ok(Some(session)),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Discarding unreadable session file");
                self.clear()?;
                Ok(None)
            }
        }
    }

    fn set(&self, token: &str, user_name: &str, login_time: DateTime<Utc>) -> Result<Session> {
        let session = Session::new(token, user_name, login_time, self.ttl)?;
        self.write_atomic(&session)?;
        debug!(path = %self.path.display(), user = %user_name, "Session stored");
        Ok(session)
    }

    fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.timestamp_millis_opt(1_760_000_000_000).unwrap()
    }

    #[test]
    fn expiry_is_login_plus_one_hour() {
        let store = MemorySessionStore::default();
        let s = store.set("tok", "kasun", t0()).unwrap();
        assert_eq!(s.expiration_time - s.login_time, Duration::hours(1));
    }

    #[test]
    fn active_just_before_expiry_and_expired_just_after() {
        let store = MemorySessionStore::default();
        store.set("tok", "kasun", t0()).unwrap();
        let s = store.get().unwrap().unwrap();

        let before = t0() + Duration::milliseconds(3_599_000);
        let after = t0() + Duration::milliseconds(3_600_001);
        assert_eq!(s.status_at(before), SessionStatus::Active);
        assert_eq!(s.status_at(after), SessionStatus::Expired);
        assert!(store.active_at(before).unwrap().is_some());
        assert!(store.active_at(after).unwrap().is_none());
    }

    #[test]
    fn exactly_at_expiry_is_still_active() {
        let s = Session::new("t", "u", t0(), Duration::hours(1)).unwrap();
        assert!(s.is_active_at(t0() + Duration::hours(1)));
    }

    #[test]
    fn remaining_never_negative() {
        let s = Session::new("t", "u", t0(), Duration::hours(1)).unwrap();
        assert_eq!(s.remaining_at(t0() + Duration::hours(2)), Duration::zero());
        assert_eq!(
            s.remaining_at(t0() + Duration::minutes(45)),
            Duration::minutes(15)
        );
    }

    #[test]
    fn out_of_range_lifetime_is_an_error_not_a_panic() {
        let store = MemorySessionStore::new(Duration::seconds(i64::MAX / 1000));
        let err = store.set("tok", "kasun", t0()).unwrap_err();
        assert!(matches!(err, Error::Session(_)));
        assert!(store.get().unwrap().is_none());
    }

    #[test]
    fn memory_clear_removes_everything() {
        let store = MemorySessionStore::default();
        store.set("tok", "kasun", t0()).unwrap();
        store.clear().unwrap();
        assert!(store.get().unwrap().is_none());
        assert!(store.token().is_none());
    }

    #[test]
    fn persisted_keys_use_wire_names() {
        let s = Session::new("tok", "kasun", t0(), Duration::hours(1)).unwrap();
        let json = serde_json::to_value(&s).unwrap();
        let obj = json.as_object().unwrap();
        let mut keys: Vec<_> = obj.keys().cloned().collect();
        keys.sort();
        assert_eq!(keys, ["expirationTime", "loginTime", "token", "userName"]);
        assert_eq!(json["loginTime"], 1_760_000_000_000_i64);
        assert_eq!(json["expirationTime"], 1_760_003_600_000_i64);
    }

    #[test]
    fn file_store_roundtrip_and_clear() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("nested/session.json"), Duration::hours(1));
        assert!(store.get().unwrap().is_none());

        store.set("tok", "kasun", t0()).unwrap();
        let loaded = store.get().unwrap().expect("session stored");
        assert_eq!(loaded.token, "tok");
        assert_eq!(loaded.user_name, "kasun");
        assert_eq!(loaded.expiration_time, t0() + Duration::hours(1));

        store.clear().unwrap();
        assert!(!store.path().exists());
        assert!(store.get().unwrap().is_none());
    }

    #[test]
    fn file_store_clear_when_absent_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("session.json"), Duration::hours(1));
        store.clear().unwrap();
    }

    #[test]
    fn file_store_set_replaces_previous_session() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("session.json"), Duration::hours(1));
        store.set("old", "a", t0()).unwrap();
        store.set("new", "b", t0() + Duration::minutes(5)).unwrap();
        let s = store.get().unwrap().unwrap();
        assert_eq!(s.token, "new");
        assert_eq!(s.user_name, "b");
    }

    #[test]
    fn corrupt_session_file_reads_as_absent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, r#"{"token":"tok"}"#).unwrap();
        let store = FileSessionStore::new(&path, Duration::hours(1));
        assert!(store.get().unwrap().is_none());
        assert!(!path.exists());
    }
}
