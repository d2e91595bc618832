//! Transport layer: wire-format details of the router's REST endpoints.

mod login;
mod modems;
mod send;

pub use login::{LoginOutcome, decode_login_response, encode_login_body};
pub use modems::decode_modem_list;
pub use send::{SendFault, SendOutcome, decode_send_response, encode_send_body};

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("login response carries no token")]
    MissingToken,
}
