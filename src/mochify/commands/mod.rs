use crate::config::ExportConfig;
use crate::model::{Card, MediaRef};
use std::path::PathBuf;

pub mod config;
pub mod export;
pub mod preview;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// How an export run ended, as far as the user is concerned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    NoCards,
    Canceled,
    Exported { count: usize, path: PathBuf },
    Failed,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub outcome: Option<ExportOutcome>,
    pub cards: Vec<Card>,
    pub media: Vec<MediaRef>,
    pub deck_name: Option<String>,
    pub config: Option<ExportConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_outcome(mut self, outcome: ExportOutcome) -> Self {
        self.outcome = Some(outcome);
        self
    }

    pub fn with_cards(mut self, cards: Vec<Card>) -> Self {
        self.cards = cards;
        self
    }

    pub fn with_media(mut self, media: Vec<MediaRef>) -> Self {
        self.media = media;
        self
    }

    pub fn with_deck_name(mut self, name: impl Into<String>) -> Self {
        self.deck_name = Some(name.into());
        self
    }

    pub fn with_config(mut self, config: ExportConfig) -> Self {
        self.config = Some(config);
        self
    }
}
