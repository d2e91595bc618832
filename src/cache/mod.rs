//! File-backed token cache shared across processes.
//!
//! Router tokens are short-lived (around five minutes) but far outlive a
//! single gateway request, so the token is persisted per router identity and
//! reused by every process talking to that router. Reads that fail for any
//! reason are cache misses; a miss just triggers a fresh login.

use std::io;
use std::path::PathBuf;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use url::Url;

/// Safety margin subtracted from the stored expiry so a token is never used
/// right as it lapses mid-request.
pub const TOKEN_SAFETY_MARGIN: Duration = Duration::from_secs(10);

/// Cache key for one router endpoint, derived from its base URL.
///
/// Scheme is dropped and anything non-alphanumeric maps to `_`, so the value
/// is safe as a file-name component and distinct routers never share a record.
pub fn router_identity(base_url: &Url) -> String {
    let mut identity = base_url.authority().to_owned();
    if let Some(path) = Some(base_url.path()).filter(|p| *p != "/") {
        identity.push_str(path);
    }
    identity
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// A bearer token with its absolute expiry (unix seconds).
pub struct CachedToken {
    pub token: String,
    pub expires_at: u64,
}

impl CachedToken {
    /// Build a record for a token issued now with the given validity.
    pub fn issued_now(token: String, valid_for: Duration) -> Self {
        Self {
            token,
            expires_at: unix_now() + valid_for.as_secs(),
        }
    }

    /// Whether the token is still usable, leaving [`TOKEN_SAFETY_MARGIN`] of
    /// headroom before the stored expiry.
    pub fn is_fresh(&self) -> bool {
        unix_now() + TOKEN_SAFETY_MARGIN.as_secs() < self.expires_at
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Persistence seam for cached tokens.
///
/// The client only needs load and store; tests swap in an in-memory
/// implementation to count logins without touching the filesystem.
pub trait TokenStore: Send + Sync {
    /// Load the record for `identity`. Read or parse failures are misses.
    fn load(&self, identity: &str) -> Option<CachedToken>;

    /// Persist `record` for `identity`, replacing any previous record.
    fn store(&self, identity: &str, record: &CachedToken) -> io::Result<()>;
}

#[derive(Debug, Clone)]
/// [`TokenStore`] backed by one JSON file per router identity under the
/// user's cache directory.
///
/// Writes go to a sibling `.tmp` file first and are renamed into place, so a
/// crash mid-write leaves the previous record intact. Two processes
/// refreshing concurrently simply overwrite each other's token; both tokens
/// are valid, so the race only costs one extra login.
pub struct FileTokenStore {
    dir: PathBuf,
}

impl FileTokenStore {
    /// Store under the platform cache directory (e.g. `~/.cache/trbsms`).
    pub fn new() -> Self {
        let dir = dirs::cache_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join("trbsms");
        Self { dir }
    }

    /// Store under an explicit directory.
    pub fn with_dir(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn record_path(&self, identity: &str) -> PathBuf {
        self.dir.join(format!("token_{identity}.json"))
    }
}

impl Default for FileTokenStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self, identity: &str) -> Option<CachedToken> {
        let contents = std::fs::read_to_string(self.record_path(identity)).ok()?;
        match serde_json::from_str(&contents) {
            Ok(record) => Some(record),
            Err(err) => {
                log::warn!("discarding unreadable token record for {identity}: {err}");
                None
            }
        }
    }

    fn store(&self, identity: &str, record: &CachedToken) -> io::Result<()> {
        std::fs::create_dir_all(&self.dir)?;

        let path = self.record_path(identity);
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, serde_json::to_vec(record)?)?;

        // The token grants full router access; keep the file owner-only.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&tmp, std::fs::Permissions::from_mode(0o600))?;
        }

        std::fs::rename(&tmp, &path)
    }
}
