//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. It is the single entry
//! point for mochify operations, whichever client drives them.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Dispatches** to the appropriate command function
//! - **Holds the context** a command needs: the note source, the resolved settings and
//!   the directory the settings live in
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! ## What the API Does NOT Do
//!
//! - **Business logic**: That belongs in `commands/*.rs`
//! - **I/O operations**: No stdout, stderr, or prompts of its own
//! - **Presentation concerns**: Returns data structures, not strings
//!
//! ## Generic Over DocumentSource
//!
//! `MochifyApi<S: DocumentSource>` is generic over where the note comes from:
//! - Production: `MochifyApi<FileSource>`
//! - Testing: `MochifyApi<InMemorySource>`

use crate::commands;
use crate::commands::config::ConfigAction;
use crate::commands::export::{Destination, FolderPrompt};
use crate::config::ResolvedConfig;
use crate::error::Result;
use crate::source::DocumentSource;
use std::path::{Path, PathBuf};

/// The main API facade for mochify operations.
pub struct MochifyApi<S: DocumentSource> {
    source: S,
    config: ResolvedConfig,
    config_dir: PathBuf,
}

impl<S: DocumentSource> MochifyApi<S> {
    pub fn new(source: S, config: ResolvedConfig, config_dir: impl Into<PathBuf>) -> Self {
        Self {
            source,
            config,
            config_dir: config_dir.into(),
        }
    }

    /// Exports the note's cards as `<deck>.mochi`.
    pub fn export<P: FolderPrompt>(
        &self,
        destination: Destination,
        prompt: &mut P,
    ) -> Result<commands::CmdResult> {
        commands::export::run(&self.source, &self.config, destination, prompt)
    }

    pub fn preview(&self) -> Result<commands::CmdResult> {
        commands::preview::run(&self.source, &self.config)
    }

    pub fn config(&self, action: ConfigAction) -> Result<commands::CmdResult> {
        configure(&self.config_dir, action)
    }
}

/// Runs a settings command against `config_dir`. No note is involved.
pub fn configure(config_dir: &Path, action: ConfigAction) -> Result<commands::CmdResult> {
    commands::config::run(config_dir, action)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::ExportOutcome;
    use crate::config::ExportConfig;
    use crate::source::memory::InMemorySource;

    struct Decline;

    impl FolderPrompt for Decline {
        fn choose_folder(&mut self, _default: &Path) -> Option<PathBuf> {
            None
        }
    }

    fn api(text: &str, out: &Path) -> MochifyApi<InMemorySource> {
        let config = ResolvedConfig::resolve(&ExportConfig::default(), out).unwrap();
        MochifyApi::new(InMemorySource::new("Deck").with_text(text), config, out)
    }

    #[test]
    fn test_export_dispatches() {
        let dir = tempfile::tempdir().unwrap();
        let api = api("#card Q\nA", dir.path());

        let result = api.export(Destination::Configured, &mut Decline).unwrap();
        assert_eq!(result.outcome, Some(ExportOutcome::Canceled));

        let result = api
            .export(Destination::Dir(dir.path().to_path_buf()), &mut Decline)
            .unwrap();
        assert!(matches!(result.outcome, Some(ExportOutcome::Exported { count: 1, .. })));
    }

    #[test]
    fn test_preview_dispatches() {
        let dir = tempfile::tempdir().unwrap();
        let result = api("#card Q\nA", dir.path()).preview().unwrap();
        assert_eq!(result.cards.len(), 1);
    }

    #[test]
    fn test_config_uses_config_dir() {
        let dir = tempfile::tempdir().unwrap();
        let api = api("", dir.path());
        api.config(ConfigAction::Set("card-tag".into(), "q".into()))
            .unwrap();
        assert_eq!(ExportConfig::load(dir.path()).unwrap().card_tag, "q");
    }
}
