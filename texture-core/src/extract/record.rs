//! Typed records produced by parser collaborators

use crate::error::ParseError;
use serde::{Deserialize, Serialize};

/// One structural element of a play
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Record {
    /// An entry in the list of persons
    Character {
        name: String,
        gender: String,
        short: String,
    },
    /// Where a scene takes place
    Location { act: u32, scene: u32, text: String },
    /// A stage direction
    Stagedir { act: u32, scene: u32, text: String },
    /// A speech and its speaker
    Speech {
        act: u32,
        scene: u32,
        speaker: String,
        text: String,
    },
}

impl Record {
    /// Act number, if the record belongs to one
    pub fn act(&self) -> Option<u32> {
        match self {
            Record::Character { .. } => None,
            Record::Location { act, .. }
            | Record::Stagedir { act, .. }
            | Record::Speech { act, .. } => Some(*act),
        }
    }

    /// Scene number, if the record belongs to one
    pub fn scene(&self) -> Option<u32> {
        match self {
            Record::Character { .. } => None,
            Record::Location { scene, .. }
            | Record::Stagedir { scene, .. }
            | Record::Speech { scene, .. } => Some(*scene),
        }
    }

    pub fn speaker(&self) -> Option<&str> {
        match self {
            Record::Speech { speaker, .. } => Some(speaker),
            _ => None,
        }
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            Record::Character { .. } => None,
            Record::Location { text, .. }
            | Record::Stagedir { text, .. }
            | Record::Speech { text, .. } => Some(text),
        }
    }

    /// The `type` discriminator
    pub fn kind(&self) -> &'static str {
        match self {
            Record::Character { .. } => "character",
            Record::Location { .. } => "location",
            Record::Stagedir { .. } => "stagedir",
            Record::Speech { .. } => "speech",
        }
    }
}

/// Turns an item's raw content into an ordered record sequence
pub trait RecordParser: Send + Sync {
    /// Parse the raw content of the item labeled `label`
    fn parse(&self, label: &str, raw: &str) -> Result<Vec<Record>, ParseError>;
}

impl<F> RecordParser for F
where
    F: Fn(&str, &str) -> Result<Vec<Record>, ParseError> + Send + Sync,
{
    fn parse(&self, label: &str, raw: &str) -> Result<Vec<Record>, ParseError> {
        self(label, raw)
    }
}

/// Reads a JSON array of records tagged by `"type"`
///
/// ```json
/// [{"type": "speech", "act": 1, "scene": 2, "speaker": "Hamlet", "text": "..."}]
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRecordParser;

impl RecordParser for JsonRecordParser {
    fn parse(&self, label: &str, raw: &str) -> Result<Vec<Record>, ParseError> {
        if raw.trim().is_empty() {
            return Err(ParseError::Malformed {
                label: label.to_string(),
                reason: "empty document".to_string(),
            });
        }
        serde_json::from_str(raw).map_err(|source| ParseError::Json {
            label: label.to_string(),
            source,
        })
    }
}
