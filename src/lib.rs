//! Typed Rust client for the SMS REST API of Teltonika TRB-series cellular
//! routers.
//!
//! The crate owns the router's full send pipeline: login with a file-cached
//! bearer token that survives process restarts, modem discovery with a
//! primary-first selection policy, normalization of destination numbers into
//! the `00`-prefixed dial format the router expects, and word-boundary
//! splitting of long texts into numbered parts sent strictly in order, where
//! the first rejected part aborts the rest.
//!
//! ```rust,no_run
//! use trbsms::{RouterClient, RouterCredentials};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), trbsms::RouterError> {
//!     let credentials = RouterCredentials::new("https://192.168.1.1", "admin", "...")?;
//!     let client = RouterClient::new(credentials)?;
//!     let report = client.send_message("+49 151 2345678", "Pump station offline").await?;
//!     println!("sent {} part(s)", report.parts_used);
//!     Ok(())
//! }
//! ```
//!
//! TLS certificate verification is deliberately disabled when talking to the
//! router: this device class presents a self-signed certificate on the local
//! network. See [`RouterClientBuilder::build`].
#![forbid(unsafe_code)]

pub mod cache;
pub mod client;
pub mod domain;
mod transport;

pub use cache::{CachedToken, FileTokenStore, TOKEN_SAFETY_MARGIN, TokenStore};
pub use client::{
    DEFAULT_PART_LIMIT, DEFAULT_TIMEOUT, RouterClient, RouterClientBuilder, RouterCredentials,
    RouterError,
};
pub use domain::{
    DialNumber, DialPolicy, MessagePart, MessageText, Modem, ModemId, Password, SendReport,
    Username, ValidationError, normalize, select_modem, split_message,
};
