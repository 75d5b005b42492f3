//! Bulk import/export wire format
//!
//! A flat JSON array of `{ "name": ..., "prompt": ... }` objects, where
//! `prompt` carries the command content.

use serde::{Deserialize, Serialize};
use serde_json::error::Category as JsonErrorCategory;

use super::error::ImportError;
use super::model::Command;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferEntry {
    pub name: String,
    pub prompt: String,
}

impl From<&Command> for TransferEntry {
    fn from(command: &Command) -> Self {
        Self {
            name: command.name.clone(),
            prompt: command.content.clone(),
        }
    }
}

/// Decode an import payload
///
/// Nothing is returned unless every entry decoded and carries a non-blank
/// `name` and `prompt`; callers write only after this succeeds.
pub fn parse_entries(bytes: &[u8]) -> Result<Vec<TransferEntry>, ImportError> {
    let text = std::str::from_utf8(bytes).map_err(|e| ImportError::InvalidData(e.to_string()))?;
    let entries: Vec<TransferEntry> = serde_json::from_str(text).map_err(classify)?;

    for (index, entry) in entries.iter().enumerate() {
        if entry.name.trim().is_empty() {
            return Err(ImportError::InvalidFormat(format!(
                "entry {index} has an empty name"
            )));
        }
        if entry.prompt.trim().is_empty() {
            return Err(ImportError::InvalidFormat(format!(
                "entry {index} has an empty prompt"
            )));
        }
    }

    Ok(entries)
}

fn classify(err: serde_json::Error) -> ImportError {
    match err.classify() {
        JsonErrorCategory::Data => ImportError::InvalidFormat(err.to_string()),
        JsonErrorCategory::Syntax | JsonErrorCategory::Eof | JsonErrorCategory::Io => {
            ImportError::InvalidData(err.to_string())
        }
    }
}

/// Encode commands, already in `order` sequence, as a pretty JSON array
pub fn to_json(commands: &[Command]) -> serde_json::Result<String> {
    let entries: Vec<TransferEntry> = commands.iter().map(TransferEntry::from).collect();
    serde_json::to_string_pretty(&entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    #[test]
    fn test_parse_valid_array() {
        let entries =
            parse_entries(br#"[{"name":"a","prompt":"echo a"},{"name":"b","prompt":"echo b"}]"#)
                .unwrap();
        assert_eq!(
            entries,
            vec![
                TransferEntry {
                    name: "a".into(),
                    prompt: "echo a".into()
                },
                TransferEntry {
                    name: "b".into(),
                    prompt: "echo b".into()
                },
            ]
        );
    }

    #[test]
    fn test_parse_ignores_unknown_fields() {
        let entries = parse_entries(br#"[{"name":"a","prompt":"ls","tags":["x"]}]"#).unwrap();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_malformed_bytes_are_invalid_data() {
        assert!(matches!(
            parse_entries(b"not json"),
            Err(ImportError::InvalidData(_))
        ));
        assert!(matches!(
            parse_entries(br#"[{"name":"a","#),
            Err(ImportError::InvalidData(_))
        ));
        assert!(matches!(
            parse_entries(&[0xff, 0xfe, b'[', b']']),
            Err(ImportError::InvalidData(_))
        ));
    }

    #[test]
    fn test_shape_mismatch_is_invalid_format() {
        assert!(matches!(
            parse_entries(br#""not json""#),
            Err(ImportError::InvalidFormat(_))
        ));
        assert!(matches!(
            parse_entries(br#"{"name":"a","prompt":"b"}"#),
            Err(ImportError::InvalidFormat(_))
        ));
        assert!(matches!(
            parse_entries(br#"[{"name":"a","command":"b"}]"#),
            Err(ImportError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_blank_fields_are_invalid_format() {
        assert_eq!(
            parse_entries(br#"[{"name":"ok","prompt":"ls"},{"name":"  ","prompt":"ls"}]"#),
            Err(ImportError::InvalidFormat(
                "entry 1 has an empty name".into()
            ))
        );
        assert_eq!(
            parse_entries(br#"[{"name":"a","prompt":""}]"#),
            Err(ImportError::InvalidFormat(
                "entry 0 has an empty prompt".into()
            ))
        );
    }

    #[test]
    fn test_export_shape() {
        let now = Utc::now();
        let commands = vec![
            Command::new(Uuid::new_v4(), "a".into(), "echo a".into(), 0, now),
            Command::new(Uuid::new_v4(), "b".into(), "echo b".into(), 1, now),
        ];
        let json = to_json(&commands).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(
            value,
            serde_json::json!([
                {"name": "a", "prompt": "echo a"},
                {"name": "b", "prompt": "echo b"}
            ])
        );
    }
}
