use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, OnceLock, PoisonError};
use std::time::{Duration, Instant};

use crate::domain::Credentials;

/// Cache identity of a key pair. Equal key pairs share one cache entry.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    key_id: String,
    key_secret: String,
}

impl CacheKey {
    pub fn from_credentials(credentials: &Credentials) -> Self {
        Self {
            key_id: credentials.key_id().as_str().to_owned(),
            key_secret: credentials.key_secret().expose().to_owned(),
        }
    }
}

impl fmt::Debug for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CacheKey(<redacted>)")
    }
}

#[derive(Clone)]
pub struct CachedToken {
    token: String,
    expires_at: Instant,
}

impl CachedToken {
    pub fn new(token: impl Into<String>, expires_at: Instant) -> Self {
        Self {
            token: token.into(),
            expires_at,
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn expires_at(&self) -> Instant {
        self.expires_at
    }

    /// `true` while the token outlives `now + margin`.
    pub fn is_fresh_at(&self, now: Instant, margin: Duration) -> bool {
        now.checked_add(margin)
            .is_some_and(|deadline| self.expires_at > deadline)
    }
}

impl fmt::Debug for CachedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CachedToken")
            .field("token", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// In-memory access token store shared by every client built on it.
///
/// Reads and writes are individually atomic; a miss followed by a fetch is
/// not, so concurrent callers may each fetch a token and the last write wins.
#[derive(Debug, Default)]
pub struct TokenCache {
    entries: Mutex<HashMap<CacheKey, CachedToken>>,
}

impl TokenCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide cache used by clients that are not given one.
    pub fn shared() -> Arc<Self> {
        static SHARED: OnceLock<Arc<TokenCache>> = OnceLock::new();
        Arc::clone(SHARED.get_or_init(|| Arc::new(TokenCache::new())))
    }

    pub fn get(&self, key: &CacheKey) -> Option<CachedToken> {
        self.lock().get(key).cloned()
    }

    pub fn set(&self, key: CacheKey, token: impl Into<String>, expires_at: Instant) {
        self.lock().insert(key, CachedToken::new(token, expires_at));
    }

    /// Drop every entry.
    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<CacheKey, CachedToken>> {
        // A poisoned map is still whole: no insert spans a panic point.
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
