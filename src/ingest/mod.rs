pub mod docx;
pub mod text;

use std::path::{Path, PathBuf};
use thiserror::Error;

pub const TEXT_PLAIN_MIME: &str = "text/plain";
pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// File types the importer accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    PlainText,
    WordDocument,
}

impl FileKind {
    /// Match a declared MIME type against the accepted set
    pub fn from_mime(mime: &str) -> Option<Self> {
        match mime {
            TEXT_PLAIN_MIME => Some(FileKind::PlainText),
            DOCX_MIME => Some(FileKind::WordDocument),
            _ => None,
        }
    }

    /// Accepted kind for a path, based on its declared MIME type
    pub fn from_path(path: &Path) -> Option<Self> {
        declared_mime(path).and_then(Self::from_mime)
    }

    pub fn mime(&self) -> &'static str {
        match self {
            FileKind::PlainText => TEXT_PLAIN_MIME,
            FileKind::WordDocument => DOCX_MIME,
        }
    }
}

/// MIME type a file picker would declare for this path.
///
/// Only the accepted types are known; anything else has no declared type and
/// is never opened.
pub fn declared_mime(path: &Path) -> Option<&'static str> {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_lowercase())
        .as_deref()
    {
        Some("txt") => Some(TEXT_PLAIN_MIME),
        Some("docx") => Some(DOCX_MIME),
        _ => None,
    }
}

/// Pick the file to import from a drop/browse selection: unsupported
/// files are filtered out, then the first remaining one wins.
pub fn select_file(paths: &[PathBuf]) -> Option<(&Path, FileKind)> {
    paths.iter().find_map(|path| {
        let kind = FileKind::from_path(path);
        if kind.is_none() {
            tracing::debug!("Skipping unsupported file: {}", path.display());
        }
        kind.map(|k| (path.as_path(), k))
    })
}

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not extract text from .docx: {0}")]
    Docx(String),
    #[error("no text found in {0:?}")]
    Empty(PathBuf),
}

/// Text extracted from an imported file
#[derive(Debug, Clone)]
pub struct ImportedText {
    pub source: String,
    pub kind: FileKind,
    pub text: String,
}

/// Read `path` and extract its text, trimmed. The file is read without
/// blocking the runtime.
pub async fn import_file(path: &Path, kind: FileKind) -> Result<ImportedText, ImportError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| ImportError::Read {
            path: path.to_path_buf(),
            source,
        })?;

    let text = match kind {
        FileKind::PlainText => text::decode(&bytes),
        FileKind::WordDocument => docx::extract_raw_text(&bytes)?,
    };
    let text = text.trim().to_string();

    if kind == FileKind::WordDocument && text.is_empty() {
        return Err(ImportError::Empty(path.to_path_buf()));
    }

    tracing::info!(
        "Imported {} ({}, {} chars)",
        path.display(),
        kind.mime(),
        text.len()
    );

    Ok(ImportedText {
        source: path.display().to_string(),
        kind,
        text,
    })
}

/// Import the first acceptable file out of `paths`.
///
/// `Ok(None)` means nothing in the selection was an accepted type.
pub async fn import_selection(paths: &[PathBuf]) -> Result<Option<ImportedText>, ImportError> {
    match select_file(paths) {
        Some((path, kind)) => import_file(path, kind).await.map(Some),
        None => Ok(None),
    }
}
