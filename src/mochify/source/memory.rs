use super::{parse_front_matter, DocumentSource};
use crate::error::{MochifyError, Result};
use crate::model::FrontMatter;
use std::collections::BTreeMap;

/// In-memory note for testing and development.
#[derive(Debug, Default, Clone)]
pub struct InMemorySource {
    base_name: String,
    text: String,
    front_matter: Option<FrontMatter>,
    attachments: BTreeMap<String, Vec<u8>>,
}

impl InMemorySource {
    pub fn new(base_name: impl Into<String>) -> Self {
        Self {
            base_name: base_name.into(),
            ..Self::default()
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Overrides the front matter that would otherwise be parsed from the text.
    pub fn with_front_matter(mut self, front_matter: FrontMatter) -> Self {
        self.front_matter = Some(front_matter);
        self
    }

    pub fn with_attachment(mut self, name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        self.attachments.insert(name.into(), bytes.into());
        self
    }
}

impl DocumentSource for InMemorySource {
    fn base_name(&self) -> String {
        self.base_name.clone()
    }

    fn read_text(&self) -> Result<String> {
        Ok(self.text.clone())
    }

    fn read_front_matter(&self) -> Result<FrontMatter> {
        match &self.front_matter {
            Some(front) => Ok(front.clone()),
            None => parse_front_matter(&self.text),
        }
    }

    fn list_attachments(&self) -> Result<Vec<String>> {
        Ok(self.attachments.keys().cloned().collect())
    }

    fn read_attachment(&self, name: &str) -> Result<Vec<u8>> {
        self.attachments
            .get(name)
            .cloned()
            .ok_or_else(|| MochifyError::Source(format!("Attachment not found: {}", name)))
    }
}
