//! `data.edn` rendering.
//!
//! Mochi reads an EDN map, not JSON. Only the string literals are JSON-escaped, which
//! is a valid EDN string for any note text:
//!
//! ```text
//! {:decks [{:name "Deck",:cards ({:name "A",:content "A\n---\nB"}{:name ...})}], :version 2}
//! ```
//!
//! Card bodies repeat the term as a heading above a `---` line, whatever boundary
//! ended the card in the note.

use crate::error::Result;
use crate::model::{Card, Deck};

pub const DATA_ENTRY: &str = "data.edn";
pub const FORMAT_VERSION: u32 = 2;

pub fn render(deck: &Deck) -> Result<String> {
    let mut out = String::from("{:decks [{");
    out.push_str(":name ");
    out.push_str(&quote(&deck.name)?);
    out.push(',');
    out.push_str(":cards (");
    for card in &deck.cards {
        render_card(&mut out, card)?;
    }
    out.push(')');
    out.push_str("}]");
    out.push_str(&format!(", :version {}}}", FORMAT_VERSION));
    Ok(out)
}

/// The card body as Mochi shows it.
pub fn card_content(card: &Card) -> String {
    format!("{}\n---\n{}", card.term, card.content)
}

fn render_card(out: &mut String, card: &Card) -> Result<()> {
    out.push_str("{:name ");
    out.push_str(&quote(&card.term)?);
    out.push(',');
    out.push_str(":content ");
    out.push_str(&quote(&card_content(card))?);
    out.push('}');
    Ok(())
}

fn quote(s: &str) -> Result<String> {
    Ok(serde_json::to_string(s)?)
}
