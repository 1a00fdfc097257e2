//! The export pipeline: note → cards → `data.edn` → `<deck>.mochi`.
//!
//! Outcomes map to user signals rather than errors:
//! - no cards: reported, nothing written
//! - folder prompt declined: reported, nothing written
//! - packaging or write failure: one generic message, details only in the log
//!
//! Errors reading the note itself are returned to the caller.

use crate::commands::{CmdMessage, CmdResult, ExportOutcome};
use crate::config::ResolvedConfig;
use crate::deck::resolve_name;
use crate::edn;
use crate::error::Result;
use crate::ids::IdGenerator;
use crate::model::{Deck, MediaRef};
use crate::package::{self, archive_path};
use crate::scanner::scan;
use crate::source::DocumentSource;
use std::path::{Path, PathBuf};

pub const MSG_STARTED: &str = "Exporting your cards, please wait...";
pub const MSG_NO_CARDS: &str = "No Cards Found!";
pub const MSG_CANCELED: &str = "Export Canceled";
pub const MSG_FAILED: &str = "Error Occurred Exporting Your Cards!";

/// Asks the user for a destination folder. `None` cancels the export.
pub trait FolderPrompt {
    fn choose_folder(&mut self, default: &Path) -> Option<PathBuf>;
}

/// Where the archive goes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Destination {
    /// Saved default location if the config says so, otherwise ask.
    #[default]
    Configured,
    /// This directory, no questions asked.
    Dir(PathBuf),
}

pub fn success_message(count: usize) -> String {
    format!(
        "{} Card{} Exported Successfully",
        count,
        if count > 1 { "s" } else { "" }
    )
}

pub fn run<S: DocumentSource, P: FolderPrompt>(
    source: &S,
    config: &ResolvedConfig,
    destination: Destination,
    prompt: &mut P,
) -> Result<CmdResult> {
    run_with_ids(source, config, destination, prompt, &mut IdGenerator::new())
}

pub fn run_with_ids<S: DocumentSource, P: FolderPrompt>(
    source: &S,
    config: &ResolvedConfig,
    destination: Destination,
    prompt: &mut P,
    ids: &mut IdGenerator,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::info(MSG_STARTED));

    // 1. Scan
    let text = source.read_text()?;
    let scanned = scan(&text, &config.card_tag, ids);
    if scanned.is_empty() {
        result.add_message(CmdMessage::warning(MSG_NO_CARDS));
        return Ok(result.with_outcome(ExportOutcome::NoCards));
    }
    let count = scanned.cards.len();

    // 2. Name the deck
    let front_matter = source.read_front_matter()?;
    let deck_name = resolve_name(&source.base_name(), &front_matter, config.deck_naming);
    tracing::debug!(deck = %deck_name, cards = count, media = scanned.media.len(), "scanned note");

    // 3. Pick the folder
    let dir = match destination {
        Destination::Dir(dir) => dir,
        Destination::Configured if config.use_default_save_location => {
            config.default_save_location.clone()
        }
        Destination::Configured => match prompt.choose_folder(&config.default_save_location) {
            Some(dir) => dir,
            None => {
                result.add_message(CmdMessage::warning(MSG_CANCELED));
                return Ok(result
                    .with_deck_name(deck_name)
                    .with_outcome(ExportOutcome::Canceled));
            }
        },
    };
    let path = archive_path(&dir, &deck_name);

    // 4. Package and write
    let deck = Deck::new(deck_name.clone(), scanned.cards);
    let outcome = match package_and_write(source, &deck, &scanned.media, &path) {
        Ok(()) => {
            result.add_message(CmdMessage::success(success_message(count)));
            ExportOutcome::Exported { count, path }
        }
        Err(e) => {
            tracing::error!(path = %path.display(), error = %e, "export failed");
            result.add_message(CmdMessage::error(MSG_FAILED));
            ExportOutcome::Failed
        }
    };

    Ok(result
        .with_deck_name(deck_name)
        .with_cards(deck.cards)
        .with_media(scanned.media)
        .with_outcome(outcome))
}

fn package_and_write<S: DocumentSource>(
    source: &S,
    deck: &Deck,
    media: &[MediaRef],
    path: &Path,
) -> Result<()> {
    let description = edn::render(deck)?;
    let archive = package::build(&description, media, source)?;
    package::write(path, &archive.bytes)?;
    tracing::debug!(
        path = %path.display(),
        included = archive.included.len(),
        missing = archive.missing.len(),
        "wrote archive"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::model::DeckNaming;
    use crate::source::fs::FileSource;
    use crate::source::memory::InMemorySource;
    use std::fs;
    use std::io::{Cursor, Read};
    use zip::ZipArchive;

    /// Records whether it was asked and answers with a fixed choice.
    struct ScriptedPrompt {
        answer: Option<PathBuf>,
        asked_with: Option<PathBuf>,
    }

    impl ScriptedPrompt {
        fn answering(answer: Option<PathBuf>) -> Self {
            Self {
                answer,
                asked_with: None,
            }
        }
    }

    impl FolderPrompt for ScriptedPrompt {
        fn choose_folder(&mut self, default: &Path) -> Option<PathBuf> {
            self.asked_with = Some(default.to_path_buf());
            self.answer.clone()
        }
    }

    fn config(dir: &Path, use_default: bool) -> ResolvedConfig {
        ResolvedConfig {
            use_default_save_location: use_default,
            card_tag: "card".to_string(),
            deck_naming: DeckNaming::ActiveFileName,
            default_save_location: dir.to_path_buf(),
        }
    }

    fn read_entry(path: &Path, name: &str) -> Option<Vec<u8>> {
        let bytes = fs::read(path).unwrap();
        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut file = archive.by_name(name).ok()?;
        let mut buf = Vec::new();
        file.read_to_end(&mut buf).unwrap();
        Some(buf)
    }

    fn entry_names(path: &Path) -> Vec<String> {
        let bytes = fs::read(path).unwrap();
        let archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        archive.file_names().map(String::from).collect()
    }

    #[test]
    fn test_no_cards_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let source = InMemorySource::new("Empty").with_text("# Nothing\njust text");
        let mut prompt = ScriptedPrompt::answering(Some(dir.path().to_path_buf()));

        let result = run(&source, &config(dir.path(), true), Destination::Configured, &mut prompt)
            .unwrap();

        assert_eq!(result.outcome, Some(ExportOutcome::NoCards));
        assert_eq!(result.messages.last().unwrap().content, MSG_NO_CARDS);
        assert!(prompt.asked_with.is_none());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_export_to_default_location() {
        let dir = tempfile::tempdir().unwrap();
        let source = InMemorySource::new("Rust")
            .with_text("#card Ownership\nOne owner.\n---\n#card Borrowing\nMany readers.\n***");
        let mut prompt = ScriptedPrompt::answering(None);

        let result = run(&source, &config(dir.path(), true), Destination::Configured, &mut prompt)
            .unwrap();

        let path = dir.path().join("Rust.mochi");
        assert_eq!(
            result.outcome,
            Some(ExportOutcome::Exported {
                count: 2,
                path: path.clone()
            })
        );
        assert!(prompt.asked_with.is_none());
        assert_eq!(result.messages[0].level, MessageLevel::Info);
        assert_eq!(
            result.messages.last().unwrap().content,
            "2 Cards Exported Successfully"
        );

        let edn = String::from_utf8(read_entry(&path, "data.edn").unwrap()).unwrap();
        assert_eq!(
            edn,
            r#"{:decks [{:name "Rust",:cards ({:name "Ownership",:content "Ownership\n---\nOne owner."}{:name "Borrowing",:content "Borrowing\n---\nMany readers."})}], :version 2}"#
        );
    }

    #[test]
    fn test_prompt_chooses_folder() {
        let default = tempfile::tempdir().unwrap();
        let chosen = tempfile::tempdir().unwrap();
        let source = InMemorySource::new("Deck").with_text("#card Q\nA");
        let mut prompt = ScriptedPrompt::answering(Some(chosen.path().to_path_buf()));

        let result = run(
            &source,
            &config(default.path(), false),
            Destination::Configured,
            &mut prompt,
        )
        .unwrap();

        assert_eq!(prompt.asked_with.as_deref(), Some(default.path()));
        assert!(chosen.path().join("Deck.mochi").exists());
        assert_eq!(
            result.messages.last().unwrap().content,
            "1 Card Exported Successfully"
        );
    }

    #[test]
    fn test_prompt_cancel_aborts() {
        let dir = tempfile::tempdir().unwrap();
        let source = InMemorySource::new("Deck").with_text("#card Q\nA");
        let mut prompt = ScriptedPrompt::answering(None);

        let result = run(&source, &config(dir.path(), false), Destination::Configured, &mut prompt)
            .unwrap();

        assert_eq!(result.outcome, Some(ExportOutcome::Canceled));
        assert_eq!(result.messages.last().unwrap().content, MSG_CANCELED);
        assert!(!dir.path().join("Deck.mochi").exists());
    }

    #[test]
    fn test_explicit_dir_skips_prompt() {
        let dir = tempfile::tempdir().unwrap();
        let source = InMemorySource::new("Deck").with_text("#card Q\nA");
        let mut prompt = ScriptedPrompt::answering(None);

        let result = run(
            &source,
            &config(Path::new("/unused"), false),
            Destination::Dir(dir.path().to_path_buf()),
            &mut prompt,
        )
        .unwrap();

        assert!(prompt.asked_with.is_none());
        assert!(matches!(result.outcome, Some(ExportOutcome::Exported { count: 1, .. })));
    }

    #[test]
    fn test_write_failure_is_generic() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("does/not/exist");
        let source = InMemorySource::new("Deck").with_text("#card Q\nA");
        let mut prompt = ScriptedPrompt::answering(None);

        let result = run(&source, &config(&missing, true), Destination::Configured, &mut prompt)
            .unwrap();

        assert_eq!(result.outcome, Some(ExportOutcome::Failed));
        let last = result.messages.last().unwrap();
        assert_eq!(last.level, MessageLevel::Error);
        assert_eq!(last.content, MSG_FAILED);
    }

    #[test]
    fn test_front_matter_deck_name() {
        let dir = tempfile::tempdir().unwrap();
        let source = InMemorySource::new("notes")
            .with_text("---\ndeck: Biology\n---\n#card Cell\nUnit of life");
        let mut cfg = config(dir.path(), true);
        cfg.deck_naming = DeckNaming::FrontMatter;

        let result = run(&source, &cfg, Destination::Configured, &mut ScriptedPrompt::answering(None))
            .unwrap();

        assert_eq!(result.deck_name.as_deref(), Some("Biology"));
        assert!(dir.path().join("Biology.mochi").exists());
    }

    #[test]
    fn test_front_matter_without_deck_uses_base_name() {
        let dir = tempfile::tempdir().unwrap();
        let source = InMemorySource::new("notes").with_text("---\ntags: [x]\n---\n#card Q\nA");
        let mut cfg = config(dir.path(), true);
        cfg.deck_naming = DeckNaming::FrontMatter;

        let result = run(&source, &cfg, Destination::Configured, &mut ScriptedPrompt::answering(None))
            .unwrap();

        assert_eq!(result.deck_name.as_deref(), Some("notes"));
        assert!(dir.path().join("notes.mochi").exists());
    }

    #[test]
    fn test_media_is_packed_and_missing_media_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let source = InMemorySource::new("Pics")
            .with_text("#card Diagram\n![[cell diagram.png|a cell]]\n[[lost.png]]\n---")
            .with_attachment("cell diagram.png", vec![7, 7, 7]);

        let result = run_with_ids(
            &source,
            &config(dir.path(), true),
            Destination::Configured,
            &mut ScriptedPrompt::answering(None),
            &mut IdGenerator::seeded(9),
        )
        .unwrap();

        assert_eq!(result.media.len(), 2);
        let found = &result.media[0];
        let lost = &result.media[1];
        assert_eq!(found.file_name, "cell_diagram.png");
        assert_eq!(lost.file_name, "lost.png");

        let path = dir.path().join("Pics.mochi");
        let names = entry_names(&path);
        assert!(names.contains(&"data.edn".to_string()));
        assert!(names.contains(&found.uid));
        assert!(!names.contains(&lost.uid));
        assert_eq!(read_entry(&path, &found.uid).unwrap(), vec![7, 7, 7]);

        // The dangling link stays in the card text.
        let edn = String::from_utf8(read_entry(&path, "data.edn").unwrap()).unwrap();
        assert!(edn.contains(&format!("[cell_diagram_png](@media/{})", found.uid)));
        assert!(edn.contains(&format!("[lost_png](@media/{})", lost.uid)));
    }

    #[test]
    fn test_missing_vault_still_exports_cards() {
        let dir = tempfile::tempdir().unwrap();
        let note = dir.path().join("Deck.md");
        fs::write(&note, "#card Q\n[[pic.png]]\n---\n").unwrap();
        let source = FileSource::with_vault(&note, dir.path().join("no_such_vault"));

        let result = run(
            &source,
            &config(dir.path(), true),
            Destination::Configured,
            &mut ScriptedPrompt::answering(None),
        )
        .unwrap();

        let path = dir.path().join("Deck.mochi");
        assert_eq!(
            result.outcome,
            Some(ExportOutcome::Exported {
                count: 1,
                path: path.clone()
            })
        );
        assert_eq!(entry_names(&path), vec!["data.edn".to_string()]);
    }

    #[test]
    fn test_existing_archive_is_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Deck.mochi");
        fs::write(&path, b"stale").unwrap();
        let source = InMemorySource::new("Deck").with_text("#card Q\nA");

        run(
            &source,
            &config(dir.path(), true),
            Destination::Configured,
            &mut ScriptedPrompt::answering(None),
        )
        .unwrap();

        assert!(read_entry(&path, "data.edn").is_some());
    }

    #[test]
    fn test_success_message_plural() {
        assert_eq!(success_message(1), "1 Card Exported Successfully");
        assert_eq!(success_message(3), "3 Cards Exported Successfully");
    }
}
