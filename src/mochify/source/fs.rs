use super::{parse_front_matter, DocumentSource};
use crate::error::{MochifyError, Result};
use crate::model::FrontMatter;
use once_cell::unsync::OnceCell;
use std::fs;
use std::path::{Path, PathBuf};

/// A note on disk and the vault directory its attachments live in.
pub struct FileSource {
    note: PathBuf,
    vault: PathBuf,
    attachments: OnceCell<Vec<(String, PathBuf)>>,
}

impl FileSource {
    /// Uses the note's parent directory as the vault.
    pub fn new(note: impl Into<PathBuf>) -> Self {
        let note = note.into();
        let vault = note
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        Self::with_vault(note, vault)
    }

    pub fn with_vault(note: impl Into<PathBuf>, vault: impl Into<PathBuf>) -> Self {
        Self {
            note: note.into(),
            vault: vault.into(),
            attachments: OnceCell::new(),
        }
    }

    pub fn vault(&self) -> &Path {
        &self.vault
    }

    fn index(&self) -> Result<&Vec<(String, PathBuf)>> {
        self.attachments.get_or_try_init(|| {
            let mut found = Vec::new();
            collect_files(&self.vault, &mut found)?;
            found.sort_by(|a, b| a.1.cmp(&b.1));
            tracing::debug!(vault = %self.vault.display(), files = found.len(), "indexed vault");
            Ok(found)
        })
    }
}

fn collect_files(dir: &Path, found: &mut Vec<(String, PathBuf)>) -> Result<()> {
    for entry in fs::read_dir(dir).map_err(MochifyError::Io)? {
        let entry = entry.map_err(MochifyError::Io)?;
        let name = entry.file_name().to_string_lossy().to_string();
        if name.starts_with('.') {
            continue;
        }
        let path = entry.path();
        if path.is_dir() {
            if let Err(e) = collect_files(&path, found) {
                tracing::debug!(dir = %path.display(), error = %e, "skipping unreadable directory");
            }
        } else if path.is_file() {
            found.push((name, path));
        }
    }
    Ok(())
}

impl DocumentSource for FileSource {
    fn base_name(&self) -> String {
        self.note
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "Untitled".to_string())
    }

    fn read_text(&self) -> Result<String> {
        fs::read_to_string(&self.note).map_err(MochifyError::Io)
    }

    fn read_front_matter(&self) -> Result<FrontMatter> {
        let text = self.read_text()?;
        match parse_front_matter(&text) {
            Ok(front) => Ok(front),
            Err(e) => {
                tracing::debug!(note = %self.note.display(), error = %e, "ignoring malformed front matter");
                Ok(FrontMatter::new())
            }
        }
    }

    fn list_attachments(&self) -> Result<Vec<String>> {
        Ok(self.index()?.iter().map(|(name, _)| name.clone()).collect())
    }

    fn read_attachment(&self, name: &str) -> Result<Vec<u8>> {
        let path = self
            .index()?
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, p)| p)
            .ok_or_else(|| MochifyError::Source(format!("Attachment not found: {}", name)))?;
        fs::read(path).map_err(MochifyError::Io)
    }
}
