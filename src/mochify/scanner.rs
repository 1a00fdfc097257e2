//! Card extraction.
//!
//! A card starts on any line containing the marker (`#` + tag, case-insensitive,
//! anywhere in the line). Its term is that line with the first marker occurrence cut
//! out, trimmed. The body is every following line up to a boundary line (trimmed
//! value exactly `---` or `***`) or the end of the note. The boundary line is consumed,
//! and the search for the next marker resumes after it.
//!
//! ```text
//! #card What is ownership?        <- term "What is ownership?"
//! Each value has a single owner.  <- body
//! ![[borrow.png]]                 <- body, rewritten to @media link
//! ---                             <- boundary
//! ```

use crate::ids::IdGenerator;
use crate::media::rewrite_line;
use crate::model::{Card, ScannedDocument};
use regex::{Regex, RegexBuilder};

pub const BOUNDARY_TOKENS: [&str; 2] = ["---", "***"];

/// The marker string searched for in each line.
pub fn card_marker(tag: &str) -> String {
    format!("#{}", tag.to_lowercase())
}

pub fn is_boundary(line: &str) -> bool {
    let trimmed = line.trim();
    BOUNDARY_TOKENS.contains(&trimmed)
}

struct MarkerMatcher {
    re: Regex,
}

impl MarkerMatcher {
    fn new(marker: &str) -> Self {
        let re = RegexBuilder::new(&regex::escape(marker))
            .case_insensitive(true)
            .build()
            .expect("escaped literal is a valid pattern");
        Self { re }
    }

    /// Term for a marker line, or `None` if the line carries no marker.
    fn term(&self, line: &str) -> Option<String> {
        let m = self.re.find(line)?;
        let mut term = String::with_capacity(line.len());
        term.push_str(&line[..m.start()]);
        term.push_str(&line[m.end()..]);
        Some(term.trim().to_string())
    }
}

/// Scans `text` for cards tagged with `tag`, rewriting embeds in card bodies.
///
/// Lines are split on `\n` only, so a trailing newline leaves an empty last line
/// that belongs to an unterminated final card. A `\r` before the `\n` is dropped.
pub fn scan(text: &str, tag: &str, ids: &mut IdGenerator) -> ScannedDocument {
    let lines: Vec<&str> = text
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect();
    scan_lines(&lines, tag, ids)
}

pub fn scan_lines(lines: &[&str], tag: &str, ids: &mut IdGenerator) -> ScannedDocument {
    let matcher = MarkerMatcher::new(&card_marker(tag));
    let mut doc = ScannedDocument::default();

    let mut i = 0;
    while i < lines.len() {
        let Some(term) = matcher.term(lines[i]) else {
            i += 1;
            continue;
        };
        i += 1;

        let mut body: Vec<String> = Vec::new();
        while i < lines.len() && !is_boundary(lines[i]) {
            let (line, refs) = rewrite_line(lines[i], ids);
            body.push(line);
            doc.media.extend(refs);
            i += 1;
        }
        // Skip the boundary line itself.
        i += 1;

        tracing::debug!(term = %term, lines = body.len(), "scanned card");
        doc.cards.push(Card::new(term, body.join("\n")));
    }

    doc
}
