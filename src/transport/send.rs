use serde::Deserialize;

use crate::domain::{DialNumber, MessageText, ModemId};
use crate::transport::TransportError;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Router verdict on one submitted message part.
pub struct SendOutcome {
    pub success: bool,
    /// SMS segments the router consumed for this part.
    pub sms_used: u32,
    pub faults: Vec<SendFault>,
}

impl SendOutcome {
    /// Join the router's error strings the way its UI presents them.
    pub fn fault_detail(&self) -> String {
        if self.faults.is_empty() {
            return "unknown error".to_owned();
        }
        self.faults
            .iter()
            .map(|fault| fault.error.as_str())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// One entry of the router's `errors` array.
pub struct SendFault {
    pub error: String,
    /// Subsystem the router blames, e.g. `modem`.
    pub source: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct SendJsonResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    data: Option<SendJsonData>,
    #[serde(default)]
    errors: Vec<SendJsonError>,
}

#[derive(Debug, Clone, Deserialize)]
struct SendJsonData {
    #[serde(default)]
    sms_used: u32,
}

#[derive(Debug, Clone, Deserialize)]
struct SendJsonError {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    source: Option<String>,
}

/// Body of `POST /api/messages/actions/send`: the router wraps the message in
/// a `data` envelope.
pub fn encode_send_body(
    number: &DialNumber,
    part_text: &str,
    modem: &ModemId,
) -> serde_json::Value {
    serde_json::json!({
        "data": {
            (DialNumber::FIELD): number.as_str(),
            (MessageText::FIELD): part_text,
            (ModemId::FIELD): modem.as_str(),
        }
    })
}

pub fn decode_send_response(json: &str) -> Result<SendOutcome, TransportError> {
    let parsed: SendJsonResponse = serde_json::from_str(json)?;
    Ok(SendOutcome {
        success: parsed.success,
        sms_used: parsed.data.map_or(0, |data| data.sms_used),
        faults: parsed
            .errors
            .into_iter()
            .map(|entry| SendFault {
                error: entry.error.unwrap_or_else(|| "unknown error".to_owned()),
                source: entry.source,
            })
            .collect(),
    })
}
