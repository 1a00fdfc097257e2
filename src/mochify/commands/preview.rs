//! Dry run of an export: what would go into the deck, nothing written.

use crate::commands::{CmdMessage, CmdResult};
use crate::config::ResolvedConfig;
use crate::deck::resolve_name;
use crate::error::Result;
use crate::ids::IdGenerator;
use crate::scanner::scan;
use crate::source::{find_attachment, DocumentSource};

pub fn run<S: DocumentSource>(source: &S, config: &ResolvedConfig) -> Result<CmdResult> {
    let text = source.read_text()?;
    let scanned = scan(&text, &config.card_tag, &mut IdGenerator::new());

    let front_matter = source.read_front_matter()?;
    let deck_name = resolve_name(&source.base_name(), &front_matter, config.deck_naming);

    let mut result = CmdResult::default();
    if scanned.is_empty() {
        result.add_message(CmdMessage::warning(super::export::MSG_NO_CARDS));
        return Ok(result.with_deck_name(deck_name));
    }

    if !scanned.media.is_empty() {
        let attachments = source.list_attachments()?;
        for media in &scanned.media {
            if find_attachment(&attachments, &media.file_name).is_none() {
                result.add_message(CmdMessage::warning(format!(
                    "Attachment not found: {}",
                    media.file_name
                )));
            }
        }
    }

    Ok(result
        .with_deck_name(deck_name)
        .with_cards(scanned.cards)
        .with_media(scanned.media))
}
