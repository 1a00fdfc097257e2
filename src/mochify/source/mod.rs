//! # Document Sources
//!
//! The exporter never reaches into a vault directly. Everything it needs from the host
//! comes through the [`DocumentSource`] trait: the note text, its front matter, and the
//! attachments that embeds may point at.
//!
//! ## Implementations
//!
//! - [`fs::FileSource`]: a note file on disk plus the vault directory around it.
//!   Attachments are every regular file under the vault, looked up by file name.
//! - [`memory::InMemorySource`]: in-memory note and attachments for testing.
//!
//! ## Attachment Lookup
//!
//! Embeds are normalized (`My File.png` → `My_File.png`) before lookup, so attachment
//! names are normalized the same way before comparing. [`find_attachment`] does this
//! for any source.

use crate::error::Result;
use crate::media::normalize_file_name;
use crate::model::FrontMatter;

pub mod fs;
pub mod memory;

/// Upper bound on the front matter block we are willing to parse.
pub const MAX_FRONT_MATTER_SIZE: usize = 64 * 1024;

/// Read-only access to one note and the collection it lives in.
pub trait DocumentSource {
    /// File stem of the note, e.g. `Biology` for `Biology.md`.
    fn base_name(&self) -> String;

    fn read_text(&self) -> Result<String>;

    fn read_front_matter(&self) -> Result<FrontMatter>;

    /// File names of every attachment candidate in the collection.
    fn list_attachments(&self) -> Result<Vec<String>>;

    fn read_attachment(&self, name: &str) -> Result<Vec<u8>>;
}

/// Finds the attachment whose normalized name equals `normalized`. First match wins.
pub fn find_attachment<'a>(attachments: &'a [String], normalized: &str) -> Option<&'a str> {
    attachments
        .iter()
        .find(|name| normalize_file_name(name) == normalized)
        .map(String::as_str)
}

/// Extracts the YAML block between a leading `---` line and the next `---` line.
pub fn front_matter_block(text: &str) -> Option<&str> {
    let rest = text
        .strip_prefix("---\r\n")
        .or_else(|| text.strip_prefix("---\n"))?;

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == "---" {
            return Some(&rest[..offset]);
        }
        offset += line.len();
    }
    None
}

/// Parses the note's front matter. A note without front matter has an empty map.
pub fn parse_front_matter(text: &str) -> Result<FrontMatter> {
    let Some(block) = front_matter_block(text) else {
        return Ok(FrontMatter::new());
    };
    if block.len() > MAX_FRONT_MATTER_SIZE || block.trim().is_empty() {
        return Ok(FrontMatter::new());
    }
    match serde_yaml::from_str::<serde_yaml::Value>(block)? {
        serde_yaml::Value::Mapping(map) => Ok(map
            .into_iter()
            .filter_map(|(k, v)| k.as_str().map(|k| (k.to_string(), v)))
            .collect()),
        _ => Ok(FrontMatter::new()),
    }
}
