//! Archive assembly.
//!
//! A `.mochi` file is a zip archive with `data.edn` plus one entry per media reference,
//! named by its uid. References whose attachment cannot be found or read are left out;
//! the card still links to the missing uid.

use crate::edn::DATA_ENTRY;
use crate::error::{MochifyError, Result};
use crate::model::MediaRef;
use crate::source::{find_attachment, DocumentSource};
use std::fs;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

pub const ARCHIVE_EXT: &str = "mochi";

/// A packed archive, ready to be written.
#[derive(Debug, Default)]
pub struct PackagedArchive {
    pub bytes: Vec<u8>,
    /// Uids of media entries that made it into the archive.
    pub included: Vec<String>,
    /// Normalized names of references that had no readable attachment.
    pub missing: Vec<String>,
}

/// `<dir>/<deck-name>.mochi`
pub fn archive_path(dir: &Path, deck_name: &str) -> PathBuf {
    dir.join(format!("{}.{}", deck_name, ARCHIVE_EXT))
}

/// Zips the description and every attachment the source can provide.
pub fn build<S: DocumentSource>(
    description: &str,
    media: &[MediaRef],
    source: &S,
) -> Result<PackagedArchive> {
    let mut archive = PackagedArchive::default();
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    zip.start_file(DATA_ENTRY, options)?;
    zip.write_all(description.as_bytes())
        .map_err(MochifyError::Io)?;

    let attachments = if media.is_empty() {
        Vec::new()
    } else {
        source.list_attachments().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "cannot list attachments, leaving all media out");
            Vec::new()
        })
    };

    for media_ref in media {
        let Some(bytes) = load_attachment(source, &attachments, media_ref) else {
            archive.missing.push(media_ref.file_name.clone());
            continue;
        };
        zip.start_file(media_ref.uid.as_str(), options)?;
        zip.write_all(&bytes).map_err(MochifyError::Io)?;
        archive.included.push(media_ref.uid.clone());
    }

    archive.bytes = zip.finish()?.into_inner();
    tracing::debug!(
        bytes = archive.bytes.len(),
        included = archive.included.len(),
        missing = archive.missing.len(),
        "packaged archive"
    );
    Ok(archive)
}

fn load_attachment<S: DocumentSource>(
    source: &S,
    attachments: &[String],
    media_ref: &MediaRef,
) -> Option<Vec<u8>> {
    let Some(name) = find_attachment(attachments, &media_ref.file_name) else {
        tracing::warn!(file = %media_ref.file_name, "attachment not found, leaving it out");
        return None;
    };
    match source.read_attachment(name) {
        Ok(bytes) => Some(bytes),
        Err(e) => {
            tracing::warn!(file = %name, error = %e, "attachment unreadable, leaving it out");
            None
        }
    }
}

/// Writes the archive, replacing any existing file. Not atomic.
pub fn write(path: &Path, bytes: &[u8]) -> Result<()> {
    fs::write(path, bytes).map_err(MochifyError::Io)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::memory::InMemorySource;
    use std::io::Read;
    use zip::ZipArchive;

    fn entries(bytes: &[u8]) -> Vec<(String, Vec<u8>)> {
        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        (0..archive.len())
            .map(|i| {
                let mut file = archive.by_index(i).unwrap();
                let mut buf = Vec::new();
                file.read_to_end(&mut buf).unwrap();
                (file.name().to_string(), buf)
            })
            .collect()
    }

    fn media(file_name: &str, uid: &str) -> MediaRef {
        MediaRef {
            file_name: file_name.to_string(),
            uid: uid.to_string(),
        }
    }

    #[test]
    fn test_description_only() {
        let source = InMemorySource::new("n");
        let archive = build("{:decks []}", &[], &source).unwrap();
        let entries = entries(&archive.bytes);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].0, "data.edn");
        assert_eq!(entries[0].1, b"{:decks []}");
    }

    #[test]
    fn test_media_entries_use_uids_and_raw_bytes() {
        let source = InMemorySource::new("n")
            .with_attachment("cell diagram.png", vec![0x89, 0x50, 0x4e, 0x47])
            .with_attachment("unused.png", vec![0]);
        let refs = vec![
            media("cell_diagram.png", "aaaaaa.png"),
            media("cell_diagram.png", "bbbbbb.png"),
        ];
        let archive = build("edn", &refs, &source).unwrap();

        let entries = entries(&archive.bytes);
        let names: Vec<&str> = entries.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["data.edn", "aaaaaa.png", "bbbbbb.png"]);
        assert_eq!(entries[1].1, vec![0x89, 0x50, 0x4e, 0x47]);
        assert_eq!(archive.included, vec!["aaaaaa.png", "bbbbbb.png"]);
        assert!(archive.missing.is_empty());
    }

    #[test]
    fn test_missing_attachment_is_omitted() {
        let source = InMemorySource::new("n").with_attachment("here.png", vec![1]);
        let refs = vec![media("gone.png", "xxxxxx.png"), media("here.png", "yyyyyy.png")];
        let archive = build("edn", &refs, &source).unwrap();

        let names: Vec<String> = entries(&archive.bytes).into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["data.edn", "yyyyyy.png"]);
        assert_eq!(archive.missing, vec!["gone.png"]);
    }

    #[test]
    fn test_unlistable_vault_omits_all_media() {
        let dir = tempfile::tempdir().unwrap();
        let note = dir.path().join("Deck.md");
        fs::write(&note, "#card Q\n[[pic.png]]").unwrap();
        let source = crate::source::fs::FileSource::with_vault(&note, dir.path().join("gone"));

        let archive = build("edn", &[media("pic.png", "zzzzzz.png")], &source).unwrap();
        let names: Vec<String> = entries(&archive.bytes).into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["data.edn"]);
        assert_eq!(archive.missing, vec!["pic.png"]);
    }

    #[test]
    fn test_archive_path() {
        assert_eq!(
            archive_path(Path::new("/tmp/out"), "Biology"),
            PathBuf::from("/tmp/out/Biology.mochi")
        );
    }

    #[test]
    fn test_write_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Deck.mochi");
        fs::write(&path, b"old contents that are longer").unwrap();
        write(&path, b"new").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"new");
    }

    #[test]
    fn test_write_into_missing_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope/Deck.mochi");
        assert!(matches!(write(&path, b"x"), Err(MochifyError::Io(_))));
    }
}
