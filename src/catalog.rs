use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

const BUNDLED_CATALOG: &str = include_str!("../assets/catalog.json");

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("malformed catalog: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("catalog contains no groups")]
    Empty,
    #[error("word '{word}' appears more than once in group '{group}'")]
    DuplicateWord { group: String, word: String },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordEntry {
    pub word: String,
    #[serde(default)]
    pub definition: String,
    #[serde(default)]
    pub example: String,
    #[serde(default, deserialize_with = "synonyms_from_text_or_list")]
    pub synonyms: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Synonyms {
    Text(String),
    List(Vec<String>),
}

fn synonyms_from_text_or_list<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Synonyms::deserialize(deserializer)? {
        Synonyms::Text(text) => text,
        Synonyms::List(items) => items.join(", "),
    })
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Group {
    pub name: String,
    pub entries: Vec<WordEntry>,
}

/// Stable identity of a word inside the catalog: group position plus entry
/// position. Sessions hold these instead of copies of the entries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WordRef {
    pub group: usize,
    pub index: usize,
}

/// Read-only study material, fixed for the lifetime of the process.
#[derive(Clone, Debug)]
pub struct WordCatalog {
    groups: Vec<Group>,
}

impl WordCatalog {
    pub fn bundled() -> Result<Self, CatalogError> {
        Self::from_json(BUNDLED_CATALOG)
    }

    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let content = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    /// Parse `{ "group name": [ {word, definition, example, synonyms}, ... ], ... }`.
    /// Object key order is catalog order.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let raw: serde_json::Map<String, serde_json::Value> = serde_json::from_str(json)?;
        let mut groups = Vec::with_capacity(raw.len());
        for (name, value) in raw {
            let entries: Vec<WordEntry> = serde_json::from_value(value)?;
            groups.push(Group { name, entries });
        }
        Self::new(groups)
    }

    pub fn new(groups: Vec<Group>) -> Result<Self, CatalogError> {
        if groups.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut first_home: HashMap<&str, &str> = HashMap::new();
        for group in &groups {
            let mut seen = HashSet::new();
            for entry in &group.entries {
                if !seen.insert(entry.word.as_str()) {
                    return Err(CatalogError::DuplicateWord {
                        group: group.name.clone(),
                        word: entry.word.clone(),
                    });
                }
                if let Some(home) = first_home.get(entry.word.as_str()) {
                    log::warn!(
                        "'{}' appears in both '{}' and '{}'; lookups by word resolve to '{}'",
                        entry.word,
                        home,
                        group.name,
                        home
                    );
                } else {
                    first_home.insert(&entry.word, &group.name);
                }
            }
        }

        Ok(Self { groups })
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn group(&self, name: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.name == name)
    }

    pub fn group_index(&self, name: &str) -> Option<usize> {
        self.groups.iter().position(|g| g.name == name)
    }

    pub fn group_name(&self, index: usize) -> &str {
        &self.groups[index].name
    }

    pub fn entry(&self, word: WordRef) -> &WordEntry {
        &self.groups[word.group].entries[word.index]
    }

    /// All refs of one group, in catalog order.
    pub fn refs_of(&self, group: usize) -> impl Iterator<Item = WordRef> + '_ {
        (0..self.groups[group].entries.len()).map(move |index| WordRef { group, index })
    }

    /// Refs of groups `0..=last`, concatenated in catalog order.
    pub fn refs_through(&self, last: usize) -> Vec<WordRef> {
        (0..=last.min(self.groups.len().saturating_sub(1)))
            .flat_map(|g| self.refs_of(g))
            .collect()
    }

    /// First occurrence of `word`, in catalog order.
    pub fn find(&self, word: &str) -> Option<WordRef> {
        self.groups.iter().enumerate().find_map(|(group, g)| {
            g.entries
                .iter()
                .position(|e| e.word == word)
                .map(|index| WordRef { group, index })
        })
    }

    pub fn word_count(&self) -> usize {
        self.groups.iter().map(|g| g.entries.len()).sum()
    }
}

#[cfg(test)]
pub(crate) fn test_catalog() -> WordCatalog {
    fn entry(word: &str) -> WordEntry {
        WordEntry {
            word: word.to_string(),
            definition: format!("definition of {word}"),
            example: format!("an example using {word}"),
            synonyms: format!("{word}-ish"),
        }
    }
    WordCatalog::new(vec![
        Group {
            name: "A".to_string(),
            entries: vec![entry("abate"), entry("aberrant"), entry("abscond")],
        },
        Group {
            name: "B".to_string(),
            entries: vec![entry("bolster"), entry("banal")],
        },
        Group {
            name: "C".to_string(),
            entries: vec![entry("cacophony"), entry("capricious"), entry("castigate"), entry("catalyst")],
        },
    ])
    .unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_catalog_loads_in_order() {
        let catalog = WordCatalog::bundled().unwrap();
        assert!(catalog.len() >= 2);
        assert_eq!(catalog.group_name(0), "Group 1");
        assert_eq!(catalog.entry(WordRef { group: 0, index: 0 }).word, "abate");
    }

    #[test]
    fn key_order_is_catalog_order() {
        let json = r#"{
            "Zeta": [{"word": "zeal"}],
            "Alpha": [{"word": "apt"}]
        }"#;
        let catalog = WordCatalog::from_json(json).unwrap();
        assert_eq!(catalog.group_name(0), "Zeta");
        assert_eq!(catalog.group_name(1), "Alpha");
    }

    #[test]
    fn synonyms_accept_list() {
        let json = r#"{"G": [{"word": "wane", "synonyms": ["ebb", "fade"]}]}"#;
        let catalog = WordCatalog::from_json(json).unwrap();
        assert_eq!(catalog.groups()[0].entries[0].synonyms, "ebb, fade");
        assert_eq!(catalog.groups()[0].entries[0].definition, "");
    }

    #[test]
    fn empty_catalog_is_rejected() {
        assert!(matches!(WordCatalog::from_json("{}"), Err(CatalogError::Empty)));
    }

    #[test]
    fn duplicate_inside_group_is_rejected() {
        let json = r#"{"G": [{"word": "wane"}, {"word": "wane"}]}"#;
        let err = WordCatalog::from_json(json).unwrap_err();
        assert!(err.to_string().contains("wane"));
    }

    #[test]
    fn duplicate_across_groups_resolves_to_first() {
        let json = r#"{"G1": [{"word": "wane"}], "G2": [{"word": "wax"}, {"word": "wane"}]}"#;
        let catalog = WordCatalog::from_json(json).unwrap();
        assert_eq!(catalog.find("wane"), Some(WordRef { group: 0, index: 0 }));
        assert_eq!(catalog.find("wax"), Some(WordRef { group: 1, index: 0 }));
        assert_eq!(catalog.find("missing"), None);
    }

    #[test]
    fn malformed_json_is_parse_error() {
        assert!(matches!(
            WordCatalog::from_json("[1, 2"),
            Err(CatalogError::Parse(_))
        ));
    }

    #[test]
    fn refs_through_concatenates_groups() {
        let catalog = test_catalog();
        let refs = catalog.refs_through(1);
        assert_eq!(refs.len(), 5);
        assert_eq!(refs[3], WordRef { group: 1, index: 0 });
    }
}
