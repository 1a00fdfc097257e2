//! Rewrites `[[file]]` embeds into archive-relative Mochi links.
//!
//! `[[My File.png|alt]]` becomes `[My_File_png](@media/a1B2c3.png)` and yields a
//! [`MediaRef`] `{ file_name: "My_File.png", uid: "a1B2c3.png" }`. The alias is dropped.
//! Every occurrence gets its own uid, even when the same file is embedded twice.

use crate::ids::IdGenerator;
use crate::model::MediaRef;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

pub const MEDIA_PREFIX: &str = "@media/";

// Both groups are lazy so two embeds on one line stay two matches.
static EMBED_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\[\[(.+?)(?:\|(.+?))?\]\]").expect("embed pattern is valid")
});
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid"));
static LABEL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^A-Za-z0-9+]+").expect("valid"));

/// Whitespace runs become a single `_`. This is the key used to find the attachment.
pub fn normalize_file_name(raw: &str) -> String {
    WHITESPACE_RE.replace_all(raw, "_").into_owned()
}

/// Link text safe for Mochi: anything but letters, digits and `+` collapses to `_`.
pub fn display_label(raw: &str) -> String {
    LABEL_RE.replace_all(raw, "_").into_owned()
}

/// Text after the last dot, if any.
pub fn extension(file_name: &str) -> Option<&str> {
    file_name.rsplit_once('.').map(|(_, ext)| ext)
}

pub fn archive_id(file_name: &str, token: &str) -> String {
    match extension(file_name) {
        Some(ext) => format!("{}.{}", token, ext),
        None => token.to_string(),
    }
}

/// Replaces every embed in `line`, returning the new line and one entry per embed.
pub fn rewrite_line(line: &str, ids: &mut IdGenerator) -> (String, Vec<MediaRef>) {
    let mut refs = Vec::new();
    let rewritten = EMBED_RE.replace_all(line, |caps: &Captures| {
        let target = &caps[1];
        let file_name = normalize_file_name(target);
        let uid = archive_id(&file_name, &ids.next_token());
        let link = format!("[{}]({}{})", display_label(target), MEDIA_PREFIX, uid);
        refs.push(MediaRef { file_name, uid });
        link
    });
    (rewritten.into_owned(), refs)
}
