//! Deck naming.
//!
//! Either the note's file stem, or the `deck` field of its front matter with the file
//! stem as fallback when the field is missing or blank.

use crate::model::{DeckNaming, FrontMatter};
use serde_yaml::Value;

pub const DECK_KEY: &str = "deck";

pub fn resolve_name(base_name: &str, front_matter: &FrontMatter, naming: DeckNaming) -> String {
    match naming {
        DeckNaming::ActiveFileName => base_name.to_string(),
        DeckNaming::FrontMatter => front_matter
            .get(DECK_KEY)
            .and_then(scalar_text)
            .unwrap_or_else(|| base_name.to_string()),
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => return None,
    };
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}
