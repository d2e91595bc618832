//! Client layer: authentication lifecycle, modem resolution, and the
//! multi-part send orchestration.

use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use url::Url;

use crate::cache::{CachedToken, FileTokenStore, TokenStore, router_identity};
use crate::domain::{
    DialNumber, DialPolicy, MessagePart, MessageText, Modem, ModemId, Password, SendReport,
    Username, ValidationError, select_modem, split_message,
};
use crate::transport;

const LOGIN_PATH: &str = "api/login";
const MODEMS_PATH: &str = "api/modems/status";
const SEND_PATH: &str = "api/messages/actions/send";

/// Default per-part character limit of a single GSM message.
pub const DEFAULT_PART_LIMIT: usize = 160;

/// Default timeout applied to every outbound call to the router.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

type BoxError = Box<dyn StdError + Send + Sync>;
type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, Clone)]
struct HttpResponse {
    status: u16,
    body: String,
}

trait HttpTransport: Send + Sync {
    fn post_json<'a>(
        &'a self,
        url: &'a str,
        body: serde_json::Value,
        bearer: Option<&'a str>,
    ) -> BoxFuture<'a, Result<HttpResponse, BoxError>>;

    fn get<'a>(
        &'a self,
        url: &'a str,
        bearer: &'a str,
    ) -> BoxFuture<'a, Result<HttpResponse, BoxError>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
}

impl HttpTransport for ReqwestTransport {
    fn post_json<'a>(
        &'a self,
        url: &'a str,
        body: serde_json::Value,
        bearer: Option<&'a str>,
    ) -> BoxFuture<'a, Result<HttpResponse, BoxError>> {
        Box::pin(async move {
            let mut request = self.client.post(url).json(&body);
            if let Some(token) = bearer {
                request = request.bearer_auth(token);
            }
            let response = request.send().await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok(HttpResponse { status, body })
        })
    }

    fn get<'a>(
        &'a self,
        url: &'a str,
        bearer: &'a str,
    ) -> BoxFuture<'a, Result<HttpResponse, BoxError>> {
        Box::pin(async move {
            let response = self.client.get(url).bearer_auth(bearer).send().await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok(HttpResponse { status, body })
        })
    }
}

#[derive(Debug, Clone)]
/// One router endpoint with its login credentials.
///
/// The base URL is forced to `https`: the router class only serves TLS, with
/// a self-signed certificate (see [`RouterClientBuilder::build`]).
pub struct RouterCredentials {
    base_url: Url,
    username: Username,
    password: Password,
}

impl RouterCredentials {
    /// Validate credentials and canonicalize the base URL.
    ///
    /// A bare host is accepted (`rt-sms-01.local`), `http` is upgraded to
    /// `https`, and the path is made directory-like so endpoint paths join
    /// cleanly.
    pub fn new(
        base_url: impl AsRef<str>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let raw = base_url.as_ref().trim();
        if raw.is_empty() {
            return Err(ValidationError::Empty { field: "base_url" });
        }

        let with_scheme = if raw.contains("://") {
            raw.to_owned()
        } else {
            format!("https://{raw}")
        };

        let mut parsed = Url::parse(&with_scheme).map_err(|_| ValidationError::InvalidBaseUrl {
            input: raw.to_owned(),
        })?;

        match parsed.scheme() {
            "https" => {}
            "http" => {
                // The router redirects plain HTTP anyway; skip the round trip.
                let _ = parsed.set_scheme("https");
            }
            other => {
                return Err(ValidationError::UnsupportedScheme {
                    scheme: other.to_owned(),
                });
            }
        }

        if !parsed.path().ends_with('/') {
            let path = format!("{}/", parsed.path());
            parsed.set_path(&path);
        }

        Ok(Self {
            base_url: parsed,
            username: Username::new(username)?,
            password: Password::new(password)?,
        })
    }

    /// Canonical router base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Login username.
    pub fn username(&self) -> &Username {
        &self.username
    }
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`RouterClient`].
///
/// Each variant maps to one stage of a send, so a caller can translate them
/// into distinct statuses: input rejected, login failed, inventory fetch
/// failed, or the router refused a specific message part.
pub enum RouterError {
    /// A required field was missing or malformed; no network call was made.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Login was rejected or the login call itself failed.
    #[error("authentication failed: {detail}")]
    Auth { detail: String },

    /// The modem inventory could not be fetched.
    #[error("modem inventory fetch failed: {detail}")]
    Modem { detail: String },

    /// The router refused message part `part` of `total`. Parts before it
    /// were already delivered; `parts_sent` tells the caller how many.
    #[error("sending part {part}/{total} failed after {parts_sent} delivered: {detail}")]
    Send {
        part: usize,
        total: usize,
        parts_sent: usize,
        detail: String,
    },

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client setup failed: {0}")]
    Setup(#[source] BoxError),
}

#[derive(Clone)]
/// Builder for [`RouterClient`].
pub struct RouterClientBuilder {
    credentials: RouterCredentials,
    timeout: Duration,
    part_limit: usize,
    policy: DialPolicy,
    store: Option<Arc<dyn TokenStore>>,
}

impl RouterClientBuilder {
    /// Create a builder with the default timeout, part limit, dial policy,
    /// and file-backed token store.
    pub fn new(credentials: RouterCredentials) -> Self {
        Self {
            credentials,
            timeout: DEFAULT_TIMEOUT,
            part_limit: DEFAULT_PART_LIMIT,
            policy: DialPolicy::default(),
            store: None,
        }
    }

    /// Timeout applied to every outbound call (login, inventory, send).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Per-part character limit used by the message splitter.
    pub fn part_limit(mut self, limit: usize) -> Self {
        self.part_limit = limit;
        self
    }

    /// Phone-number normalization policy.
    pub fn dial_policy(mut self, policy: DialPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Replace the file-backed token store.
    pub fn token_store(mut self, store: Arc<dyn TokenStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Build a [`RouterClient`].
    ///
    /// Certificate verification is disabled on purpose: TRB-series routers
    /// ship a self-signed certificate, and the trade-off of trusting the
    /// local network link is accepted for this device class.
    pub fn build(self) -> Result<RouterClient, RouterError> {
        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .danger_accept_invalid_certs(true)
            .build()
            .map_err(|err| RouterError::Setup(Box::new(err)))?;

        let store = self
            .store
            .unwrap_or_else(|| Arc::new(FileTokenStore::new()));

        Ok(RouterClient::from_parts(
            self.credentials,
            self.part_limit,
            self.policy,
            Arc::new(ReqwestTransport { client }),
            store,
        ))
    }
}

#[derive(Clone)]
/// High-level client for one TRB-series router.
///
/// Cheap to clone; clones share the HTTP connection pool, the token store,
/// and the per-session modem choice. Concurrent calls are safe: the worst a
/// token-refresh race costs is one redundant login, and the cache file itself
/// is replaced atomically.
pub struct RouterClient {
    credentials: RouterCredentials,
    identity: String,
    login_url: String,
    modems_url: String,
    send_url: String,
    part_limit: usize,
    policy: DialPolicy,
    http: Arc<dyn HttpTransport>,
    store: Arc<dyn TokenStore>,
    modem: Arc<Mutex<Option<ModemId>>>,
}

impl RouterClient {
    /// Create a client with default settings.
    pub fn new(credentials: RouterCredentials) -> Result<Self, RouterError> {
        Self::builder(credentials).build()
    }

    /// Start building a client with custom settings.
    pub fn builder(credentials: RouterCredentials) -> RouterClientBuilder {
        RouterClientBuilder::new(credentials)
    }

    fn from_parts(
        credentials: RouterCredentials,
        part_limit: usize,
        policy: DialPolicy,
        http: Arc<dyn HttpTransport>,
        store: Arc<dyn TokenStore>,
    ) -> Self {
        let base = credentials.base_url();
        let join = |path: &str| {
            base.join(path)
                .map(String::from)
                .unwrap_or_else(|_| format!("{base}{path}"))
        };

        Self {
            identity: router_identity(base),
            login_url: join(LOGIN_PATH),
            modems_url: join(MODEMS_PATH),
            send_url: join(SEND_PATH),
            credentials,
            part_limit,
            policy,
            http,
            store,
            modem: Arc::new(Mutex::new(None)),
        }
    }

    /// Send a message, splitting it into numbered parts when it exceeds the
    /// configured limit.
    ///
    /// Parts go out strictly in order and the first rejected part aborts the
    /// rest; the `parts_sent` field of [`RouterError::Send`] then reports how
    /// much of the message the recipient already has, so the caller can decide
    /// whether to resend. No automatic retry is performed at any stage.
    pub async fn send_message(&self, number: &str, text: &str) -> Result<SendReport, RouterError> {
        let number = DialNumber::normalize(number, &self.policy)?;
        let text = MessageText::new(text)?;

        let token = self.ensure_token().await?;
        let modem = self.resolve_modem(&token).await?;

        let parts = split_message(text.as_str(), self.part_limit);
        let total = parts.len();
        if total > 1 {
            log::info!(
                "message is {} chars, splitting into {total} parts",
                text.char_len()
            );
        }

        let mut sms_used = 0u32;
        for part in &parts {
            log::debug!(
                "sending part {}/{total} to {number} via modem {modem} ({} chars)",
                part.index,
                part.text.chars().count()
            );
            sms_used += self
                .send_part(&token, &modem, &number, part)
                .await
                .map_err(|detail| RouterError::Send {
                    part: part.index,
                    total,
                    parts_sent: part.index - 1,
                    detail,
                })?;
        }

        log::info!("delivered {total} part(s) to {number}, {sms_used} SMS used");
        Ok(SendReport {
            parts_used: total,
            normalized_number: number,
            message_length: text.char_len(),
            sms_used,
        })
    }

    /// Fetch the router's modem inventory.
    ///
    /// Diagnostic companion to [`RouterClient::send_message`]; always hits the
    /// router instead of the per-session modem cache.
    pub async fn list_modems(&self) -> Result<Vec<Modem>, RouterError> {
        let token = self.ensure_token().await?;
        self.fetch_modems(&token).await
    }

    /// Return a token that is valid for at least the safety margin, logging
    /// in only when the cached one is missing or about to lapse.
    async fn ensure_token(&self) -> Result<String, RouterError> {
        if let Some(record) = self.store.load(&self.identity) {
            if record.is_fresh() {
                log::debug!("reusing cached token for {}", self.identity);
                return Ok(record.token);
            }
            log::debug!("cached token for {} is stale", self.identity);
        }
        self.login().await
    }

    async fn login(&self) -> Result<String, RouterError> {
        let body = transport::encode_login_body(
            &self.credentials.username,
            &self.credentials.password,
        );

        let response = self
            .http
            .post_json(&self.login_url, body, None)
            .await
            .map_err(|err| RouterError::Auth {
                detail: err.to_string(),
            })?;

        if !(200..=299).contains(&response.status) {
            return Err(RouterError::Auth {
                detail: http_detail(response.status, &response.body),
            });
        }

        let outcome =
            transport::decode_login_response(&response.body).map_err(|err| RouterError::Auth {
                detail: err.to_string(),
            })?;

        log::info!(
            "authenticated against {} (token valid for {}s)",
            self.identity,
            outcome.valid_for.as_secs()
        );

        let record = CachedToken::issued_now(outcome.token, outcome.valid_for);
        if let Err(err) = self.store.store(&self.identity, &record) {
            // A dead cache only costs extra logins; the send must go on.
            log::warn!("failed to persist token for {}: {err}", self.identity);
        }
        Ok(record.token)
    }

    /// Resolve the modem to send through, once per client lifetime.
    async fn resolve_modem(&self, token: &str) -> Result<ModemId, RouterError> {
        if let Ok(cached) = self.modem.lock() {
            if let Some(id) = cached.clone() {
                return Ok(id);
            }
        }

        let modems = self.fetch_modems(token).await?;
        if modems.is_empty() {
            log::warn!("router reported no modems, falling back to the default slot");
        }
        let id = select_modem(&modems);
        log::info!("selected modem {id}");

        if let Ok(mut cached) = self.modem.lock() {
            *cached = Some(id.clone());
        }
        Ok(id)
    }

    async fn fetch_modems(&self, token: &str) -> Result<Vec<Modem>, RouterError> {
        let response = self
            .http
            .get(&self.modems_url, token)
            .await
            .map_err(|err| RouterError::Modem {
                detail: err.to_string(),
            })?;

        if !(200..=299).contains(&response.status) {
            return Err(RouterError::Modem {
                detail: http_detail(response.status, &response.body),
            });
        }

        transport::decode_modem_list(&response.body).map_err(|err| RouterError::Modem {
            detail: err.to_string(),
        })
    }

    /// Send one part; returns the router's SMS counter, or the failure detail
    /// for the caller to wrap with part context.
    async fn send_part(
        &self,
        token: &str,
        modem: &ModemId,
        number: &DialNumber,
        part: &MessagePart,
    ) -> Result<u32, String> {
        let body = transport::encode_send_body(number, &part.text, modem);

        let response = self
            .http
            .post_json(&self.send_url, body, Some(token))
            .await
            .map_err(|err| err.to_string())?;

        if !(200..=299).contains(&response.status) {
            return Err(http_detail(response.status, &response.body));
        }

        let outcome = transport::decode_send_response(&response.body)
            .map_err(|err| err.to_string())?;
        if !outcome.success {
            return Err(outcome.fault_detail());
        }
        Ok(outcome.sms_used)
    }
}

fn http_detail(status: u16, body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        format!("HTTP {status}")
    } else {
        format!("HTTP {status}: {body}")
    }
}
