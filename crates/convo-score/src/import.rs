//! Loading conversation datasets from JSON or CSV exports.

use serde::{Deserialize, Deserializer};
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use crate::conversations::domain::untitled;
use crate::conversations::{MessageInput, NewConversation};
use crate::scoring::Sender;

#[derive(Debug)]
pub enum ImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for ImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImportError::Io(err) => write!(f, "failed to read transcript export: {}", err),
            ImportError::Csv(err) => write!(f, "invalid transcript CSV data: {}", err),
            ImportError::Json(err) => write!(f, "invalid transcript JSON data: {}", err),
        }
    }
}

impl std::error::Error for ImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ImportError::Io(err) => Some(err),
            ImportError::Csv(err) => Some(err),
            ImportError::Json(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

impl From<serde_json::Error> for ImportError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

/// On-disk layout of a transcript export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImportFormat {
    #[default]
    Json,
    Csv,
}

impl FromStr for ImportFormat {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            other => Err(format!("unsupported import format '{other}' (expected json or csv)")),
        }
    }
}

impl ImportFormat {
    /// Guess from a file extension, defaulting to JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => Self::Csv,
            _ => Self::Json,
        }
    }
}

pub struct TranscriptImporter;

impl TranscriptImporter {
    pub fn from_path<P: AsRef<Path>>(
        path: P,
        format: ImportFormat,
    ) -> Result<Vec<NewConversation>, ImportError> {
        let file = std::fs::File::open(path)?;
        match format {
            ImportFormat::Json => Self::from_json_reader(file),
            ImportFormat::Csv => Self::from_csv_reader(file),
        }
    }

    /// A JSON array of `{ "title": ..., "messages": [{ "sender", "text" }] }` objects.
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Vec<NewConversation>, ImportError> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// One row per message with `conversation,title,sender,text` headers.
    ///
    /// Rows are grouped by `conversation` in order of first appearance and keep their
    /// relative order inside each conversation.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Vec<NewConversation>, ImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut positions: HashMap<String, usize> = HashMap::new();
        let mut conversations: Vec<NewConversation> = Vec::new();

        for record in csv_reader.deserialize::<TranscriptRow>() {
            let row = record?;
            let index = *positions.entry(row.conversation).or_insert_with(|| {
                conversations.push(NewConversation {
                    title: row.title.unwrap_or_else(untitled),
                    messages: Vec::new(),
                });
                conversations.len() - 1
            });

            conversations[index].messages.push(MessageInput {
                sender: row.sender,
                text: row.text,
            });
        }

        Ok(conversations)
    }
}

#[derive(Debug, Deserialize)]
struct TranscriptRow {
    conversation: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    title: Option<String>,
    sender: Sender,
    #[serde(default)]
    text: String,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
