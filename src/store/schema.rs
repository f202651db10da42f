use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Learner-assigned mastery of one word in one group.
///
/// Serialized with the colour names the progress blob has always used.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MasteryStatus {
    #[default]
    #[serde(rename = "white")]
    New,
    #[serde(rename = "red")]
    Learning,
    #[serde(rename = "green")]
    Known,
}

impl MasteryStatus {
    pub fn label(self) -> &'static str {
        match self {
            MasteryStatus::New => "new",
            MasteryStatus::Learning => "learning",
            MasteryStatus::Known => "known",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusRecord {
    pub status: MasteryStatus,
}

/// group -> word -> {"status": ...}
pub type ProgressData = BTreeMap<String, BTreeMap<String, StatusRecord>>;

/// group -> word -> note text
pub type NotesData = BTreeMap<String, BTreeMap<String, String>>;

pub const EXPORT_VERSION: u32 = 1;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExportData {
    pub wordmem_export_version: u32,
    pub exported_at: DateTime<Utc>,
    pub progress: ProgressData,
    pub notes: NotesData,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_uses_colour_names_on_the_wire() {
        let record = StatusRecord {
            status: MasteryStatus::Known,
        };
        assert_eq!(serde_json::to_string(&record).unwrap(), r#"{"status":"green"}"#);
        let parsed: StatusRecord = serde_json::from_str(r#"{"status":"red"}"#).unwrap();
        assert_eq!(parsed.status, MasteryStatus::Learning);
    }

    #[test]
    fn unknown_status_fails_to_parse() {
        assert!(serde_json::from_str::<StatusRecord>(r#"{"status":"blue"}"#).is_err());
    }
}
