//! On-slot format of the ticket set.
//!
//! Current shape: `{"version": 1, "tickets": [...]}`. A bare JSON array is the
//! older unversioned shape and is still accepted on read.

use serde::Serialize;
use serde_json::Value;

use crate::error::{DeskError, Result};
use crate::ticket::{Ticket, validate_records};

pub const FORMAT_VERSION: u64 = 1;

#[derive(Serialize)]
struct Envelope<'a> {
    version: u64,
    tickets: &'a [Ticket],
}

/// Serialize the full ticket set
pub fn encode(tickets: &[Ticket]) -> Result<String> {
    serde_json::to_string_pretty(&Envelope {
        version: FORMAT_VERSION,
        tickets,
    })
    .map_err(|e| DeskError::PersistenceWrite(format!("failed to serialize tickets: {e}")))
}

/// Parse and check a persisted ticket set
pub fn decode(text: &str) -> Result<Vec<Ticket>> {
    let value: Value = serde_json::from_str(text)
        .map_err(|e| DeskError::PersistenceRead(format!("invalid JSON: {e}")))?;

    let tickets = match value {
        Value::Array(_) => value,
        Value::Object(mut map) => {
            match map.get("version").and_then(Value::as_u64) {
                Some(FORMAT_VERSION) => {}
                Some(other) => {
                    return Err(DeskError::PersistenceRead(format!(
                        "unsupported format version {other}"
                    )));
                }
                None => {
                    return Err(DeskError::PersistenceRead(
                        "missing format version".to_string(),
                    ));
                }
            }
            map.remove("tickets").ok_or_else(|| {
                DeskError::PersistenceRead("missing 'tickets' field".to_string())
            })?
        }
        _ => {
            return Err(DeskError::PersistenceRead(
                "expected an object or an array".to_string(),
            ));
        }
    };

    let tickets: Vec<Ticket> = serde_json::from_value(tickets)
        .map_err(|e| DeskError::PersistenceRead(format!("invalid ticket record: {e}")))?;
    validate_records(&tickets)?;
    Ok(tickets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::seed::seed_tickets;

    #[test]
    fn test_encode_writes_version() {
        let text = encode(&seed_tickets()).unwrap();
        let value: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["version"], 1);
        assert_eq!(value["tickets"][0]["id"], "T-1001");
    }

    #[test]
    fn test_decode_round_trip() {
        let tickets = seed_tickets();
        assert_eq!(decode(&encode(&tickets).unwrap()).unwrap(), tickets);
    }

    #[test]
    fn test_decode_accepts_legacy_array() {
        let tickets = seed_tickets();
        let legacy = serde_json::to_string(&tickets).unwrap();
        assert_eq!(decode(&legacy).unwrap(), tickets);
    }

    #[test]
    fn test_decode_rejects_unknown_version() {
        let err = decode(r#"{"version": 7, "tickets": []}"#).unwrap_err();
        assert!(err.to_string().contains("unsupported format version 7"));
    }

    #[test]
    fn test_decode_rejects_garbage() {
        for text in ["", "{", "42", r#"{"tickets": []}"#, r#"{"version": 1}"#] {
            assert!(decode(text).is_err(), "'{text}' should not decode");
        }
    }

    #[test]
    fn test_decode_rejects_out_of_enum_values() {
        let mut value: Value = serde_json::from_str(&encode(&seed_tickets()).unwrap()).unwrap();
        value["tickets"][0]["priority"] = Value::from("Critical");
        let err = decode(&value.to_string()).unwrap_err();
        assert!(matches!(err, DeskError::PersistenceRead(_)));
    }

    #[test]
    fn test_decode_rejects_duplicate_ids() {
        let mut tickets = seed_tickets();
        tickets.push(tickets[0].clone());
        assert!(decode(&encode(&tickets).unwrap()).is_err());
    }
}
