use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Parsed YAML front matter of a note, keyed by top-level field name.
pub type FrontMatter = BTreeMap<String, serde_yaml::Value>;

/// A single flashcard as found in the note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Marker line with the marker cut out, trimmed.
    pub term: String,
    /// Body lines joined with `\n`, media links already rewritten.
    pub content: String,
}

impl Card {
    pub fn new(term: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            content: content.into(),
        }
    }
}

/// One embed occurrence that needs its attachment shipped in the archive.
///
/// Two embeds of the same file produce two entries with different uids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaRef {
    /// Normalized attachment name, used to find the file in the vault.
    pub file_name: String,
    /// Entry name inside the archive (`<token>.<ext>`).
    pub uid: String,
}

/// Output of a scan: the cards in order of appearance plus every media reference.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScannedDocument {
    pub cards: Vec<Card>,
    pub media: Vec<MediaRef>,
}

impl ScannedDocument {
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    pub name: String,
    pub cards: Vec<Card>,
}

impl Deck {
    pub fn new(name: impl Into<String>, cards: Vec<Card>) -> Self {
        Self {
            name: name.into(),
            cards,
        }
    }
}

/// How the deck name is chosen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeckNaming {
    #[default]
    #[serde(rename = "active-file-name", alias = "Use Active File Name")]
    ActiveFileName,
    #[serde(rename = "front-matter", alias = "Get From Front Matter")]
    FrontMatter,
}

impl DeckNaming {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeckNaming::ActiveFileName => "active-file-name",
            DeckNaming::FrontMatter => "front-matter",
        }
    }
}

impl std::fmt::Display for DeckNaming {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DeckNaming {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "active-file-name" | "Use Active File Name" => Ok(DeckNaming::ActiveFileName),
            "front-matter" | "Get From Front Matter" => Ok(DeckNaming::FrontMatter),
            other => Err(format!(
                "Invalid deck naming option '{}'. Use active-file-name or front-matter",
                other
            )),
        }
    }
}
