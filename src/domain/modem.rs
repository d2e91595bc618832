use crate::domain::value::ModemId;

#[derive(Debug, Clone, PartialEq, Eq)]
/// One cellular modem as reported by the router's inventory endpoint.
///
/// Everything except the id is informational and may be absent; the router's
/// inventory payload is loosely typed across firmware versions.
pub struct Modem {
    pub id: ModemId,
    pub name: Option<String>,
    pub primary: bool,
    pub state: Option<String>,
    pub operator: Option<String>,
    pub model: Option<String>,
}

/// Pick the modem to send through.
///
/// Order of preference: the first modem flagged primary, then the first modem
/// listed, then the fixed fallback slot. An empty inventory is tolerated
/// rather than treated as an error; TRB routers occasionally report an empty
/// list while a modem is physically present.
pub fn select_modem(modems: &[Modem]) -> ModemId {
    if let Some(primary) = modems.iter().find(|m| m.primary) {
        return primary.id.clone();
    }
    if let Some(first) = modems.first() {
        return first.id.clone();
    }
    ModemId::fallback()
}
