use std::time::{Duration, Instant};

/// A bearer token and the window in which it may be presented.
#[derive(Clone)]
pub struct Credential {
    token: String,
    client_id: String,
    acquired_at: Instant,
    ttl: Duration,
}

impl Credential {
    pub fn new(
        token: impl Into<String>,
        client_id: impl Into<String>,
        acquired_at: Instant,
        ttl: Duration,
    ) -> Self {
        Self {
            token: token.into(),
            client_id: client_id.into(),
            acquired_at,
            ttl,
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn is_fresh_at(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.acquired_at) < self.ttl
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("token", &"<redacted>")
            .field("client_id", &self.client_id)
            .field("acquired_at", &self.acquired_at)
            .field("ttl", &self.ttl)
            .finish()
    }
}

/// An expired credential reads as `Absent`.
#[derive(Debug, Clone, Default)]
pub enum CredentialState {
    #[default]
    Absent,
    Valid(Credential),
}

/// Single-credential cache with a fixed time-to-live.
#[derive(Debug)]
pub struct TokenCache {
    state: CredentialState,
    ttl: Duration,
}

impl TokenCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            state: CredentialState::Absent,
            ttl,
        }
    }

    pub fn state(&self) -> &CredentialState {
        &self.state
    }

    /// Returns the cached token if it was minted for `client_id` and is still
    /// fresh at `now`. A stale entry is evicted.
    pub fn lookup(&mut self, client_id: &str, now: Instant) -> Option<String> {
        let hit = match &self.state {
            CredentialState::Valid(credential)
                if credential.client_id == client_id && credential.is_fresh_at(now) =>
            {
                Some(credential.token.clone())
            }
            CredentialState::Valid(_) => None,
            CredentialState::Absent => return None,
        };
        if hit.is_none() {
            self.state = CredentialState::Absent;
        }
        hit
    }

    /// Stores a freshly exchanged token. `lifetime` caps the cache TTL when the
    /// token endpoint reports a shorter `expires_in`.
    pub fn store(
        &mut self,
        client_id: &str,
        token: impl Into<String>,
        now: Instant,
        lifetime: Option<Duration>,
    ) {
        let ttl = lifetime.map_or(self.ttl, |l| l.min(self.ttl));
        self.state = CredentialState::Valid(Credential::new(token, client_id, now, ttl));
    }

    pub fn invalidate(&mut self) {
        self.state = CredentialState::Absent;
    }

    pub fn is_valid_at(&self, now: Instant) -> bool {
        matches!(&self.state, CredentialState::Valid(c) if c.is_fresh_at(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOUR: Duration = Duration::from_secs(3600);

    #[test]
    fn empty_cache_misses() {
        let mut cache = TokenCache::new(HOUR);
        assert!(cache.lookup("id", Instant::now()).is_none());
        assert!(matches!(cache.state(), CredentialState::Absent));
    }

    #[test]
    fn hit_within_ttl() {
        let mut cache = TokenCache::new(HOUR);
        let now = Instant::now();
        cache.store("id", "abc", now, None);

        let later = now + Duration::from_secs(3599);
        assert_eq!(cache.lookup("id", later).as_deref(), Some("abc"));
        assert!(cache.is_valid_at(later));
    }

    #[test]
    fn expiry_evicts() {
        let mut cache = TokenCache::new(HOUR);
        let now = Instant::now();
        cache.store("id", "abc", now, None);

        assert!(cache.lookup("id", now + HOUR).is_none());
        assert!(matches!(cache.state(), CredentialState::Absent));
    }

    #[test]
    fn different_client_id_misses() {
        let mut cache = TokenCache::new(HOUR);
        let now = Instant::now();
        cache.store("first", "abc", now, None);

        assert!(cache.lookup("second", now).is_none());
        assert!(cache.lookup("first", now).is_none());
    }

    #[test]
    fn invalidate_forces_miss_regardless_of_ttl() {
        let mut cache = TokenCache::new(HOUR);
        let now = Instant::now();
        cache.store("id", "abc", now, None);
        cache.invalidate();

        assert!(cache.lookup("id", now).is_none());
    }

    #[test]
    fn shorter_server_lifetime_caps_ttl() {
        let mut cache = TokenCache::new(HOUR);
        let now = Instant::now();
        cache.store("id", "abc", now, Some(Duration::from_secs(60)));

        assert!(cache.is_valid_at(now + Duration::from_secs(59)));
        assert!(cache.lookup("id", now + Duration::from_secs(61)).is_none());
        assert!(matches!(cache.state(), CredentialState::Absent));
    }

    #[test]
    fn huge_ttl_does_not_overflow() {
        let mut cache = TokenCache::new(Duration::from_secs(u64::MAX));
        let now = Instant::now();
        cache.store("id", "abc", now, None);
        assert_eq!(cache.lookup("id", now + HOUR).as_deref(), Some("abc"));
    }

    #[test]
    fn debug_output_redacts_token() {
        let credential = Credential::new("secret-token", "id", Instant::now(), HOUR);
        assert!(!format!("{credential:?}").contains("secret-token"));
    }
}
