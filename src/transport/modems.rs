use serde::Deserialize;

use crate::domain::{Modem, ModemId};
use crate::transport::TransportError;

#[derive(Debug, Clone, Deserialize)]
struct ModemListJsonResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    data: Vec<ModemJsonEntry>,
}

#[derive(Debug, Clone, Deserialize)]
struct ModemJsonEntry {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    primary: bool,
    #[serde(default)]
    state: Option<String>,
    #[serde(default)]
    operator: Option<String>,
    #[serde(default)]
    model: Option<String>,
}

/// Decode the modem inventory.
///
/// The payload varies across firmware versions, so unknown fields are ignored
/// and missing optionals default. A `success: false` body or an entry without
/// an id yields no modems rather than an error; the selection fallback covers
/// an empty inventory.
pub fn decode_modem_list(json: &str) -> Result<Vec<Modem>, TransportError> {
    let parsed: ModemListJsonResponse = serde_json::from_str(json)?;
    if !parsed.success {
        return Ok(Vec::new());
    }

    Ok(parsed
        .data
        .into_iter()
        .filter_map(|entry| {
            let id = ModemId::new(entry.id?).ok()?;
            Some(Modem {
                id,
                name: entry.name,
                primary: entry.primary,
                state: entry.state,
                operator: entry.operator,
                model: entry.model,
            })
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_full_inventory() {
        let json = r#"
        {
          "success": true,
          "data": [
            {"id": "1-1.4", "name": "Internal modem", "primary": true,
             "state": "registered", "operator": "Vodafone", "model": "EG06"},
            {"id": "2-1", "primary": false}
          ]
        }
        "#;

        let modems = decode_modem_list(json).unwrap();
        assert_eq!(modems.len(), 2);
        assert_eq!(modems[0].id.as_str(), "1-1.4");
        assert!(modems[0].primary);
        assert_eq!(modems[0].operator.as_deref(), Some("Vodafone"));
        assert_eq!(modems[1].id.as_str(), "2-1");
        assert!(!modems[1].primary);
        assert_eq!(modems[1].name, None);
    }

    #[test]
    fn unsuccessful_body_yields_empty_inventory() {
        let modems = decode_modem_list(r#"{"success": false}"#).unwrap();
        assert!(modems.is_empty());
    }

    #[test]
    fn entries_without_an_id_are_skipped() {
        let json = r#"{"success": true, "data": [{"name": "ghost"}, {"id": "2-1"}]}"#;
        let modems = decode_modem_list(json).unwrap();
        assert_eq!(modems.len(), 1);
        assert_eq!(modems[0].id.as_str(), "2-1");
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let json = r#"
        {"success": true, "data": [{"id": "1-1.4", "firmware": "x", "rssi": -71}]}
        "#;
        assert_eq!(decode_modem_list(json).unwrap().len(), 1);
    }

    #[test]
    fn invalid_json_is_rejected() {
        assert!(matches!(
            decode_modem_list("[oops"),
            Err(TransportError::Json(_))
        ));
    }
}
