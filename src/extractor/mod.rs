
use quick_xml::Reader;
use quick_xml::events::Event;
use std::fs;
use std::io::{Cursor, Read};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, warn};
use zip::ZipArchive;

/// Supported document formats, detected from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Docx,
}

impl DocumentFormat {
    /// Detect the format from a path's extension, case-insensitively.
    /// Returns `None` for anything other than `.pdf` or `.docx`.
    #[inline]
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Self> {
        let extension = path.as_ref().extension()?.to_str()?.to_lowercase();
        match extension.as_str() {
            "pdf" => Some(Self::Pdf),
            "docx" => Some(Self::Docx),
            _ => None,
        }
    }
}

/// An uploaded document: raw bytes, a display name, and the declared
/// format. Immutable once constructed.
#[derive(Debug, Clone)]
pub struct Document {
    pub name: String,
    pub format: Option<DocumentFormat>,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("failed to read '{name}': {source}")]
    Read {
        name: String,
        source: std::io::Error,
    },
    #[error("failed to extract text from '{name}' as PDF: {reason}")]
    Pdf { name: String, reason: String },
    #[error("failed to extract text from '{name}' as DOCX: {reason}")]
    Docx { name: String, reason: String },
}

impl Document {
    #[inline]
    pub fn from_bytes(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let name = name.into();
        let format = DocumentFormat::from_path(&name);
        Self {
            name,
            format,
            bytes,
        }
    }

    /// Read a document from disk, detecting the format from the extension.
    #[inline]
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ExtractionError> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());

        let bytes = fs::read(path).map_err(|source| ExtractionError::Read {
            name: name.clone(),
            source,
        })?;

        Ok(Self::from_bytes(name, bytes))
    }
}

/// Extract plain text from a document according to its declared format.
///
/// Documents with an unrecognized format yield an empty string rather than
/// an error, so they still flow through scoring and stay visible in the
/// output. A corrupt payload for a recognized format is an error scoped to
/// this one document.
#[inline]
pub fn extract_text(document: &Document) -> Result<String, ExtractionError> {
    match document.format {
        Some(DocumentFormat::Pdf) => extract_pdf(document),
        Some(DocumentFormat::Docx) => extract_docx(document),
        None => {
            warn!(
                "Unsupported format for '{}', treating as empty text",
                document.name
            );
            Ok(String::new())
        }
    }
}

fn extract_pdf(document: &Document) -> Result<String, ExtractionError> {
    let text =
        pdf_extract::extract_text_from_mem(&document.bytes).map_err(|e| ExtractionError::Pdf {
            name: document.name.clone(),
            reason: e.to_string(),
        })?;

    debug!(
        "Extracted {} characters from PDF '{}'",
        text.len(),
        document.name
    );
    Ok(text)
}

/// A DOCX file is a ZIP archive; the body lives in `word/document.xml`.
/// Paragraph (`w:p`) texts are concatenated in document order, joined by
/// newlines.
fn extract_docx(document: &Document) -> Result<String, ExtractionError> {
    let docx_error = |reason: String| ExtractionError::Docx {
        name: document.name.clone(),
        reason,
    };

    let cursor = Cursor::new(document.bytes.as_slice());
    let mut archive = ZipArchive::new(cursor).map_err(|e| docx_error(e.to_string()))?;

    let mut xml = String::new();
    archive
        .by_name("word/document.xml")
        .map_err(|e| docx_error(e.to_string()))?
        .read_to_string(&mut xml)
        .map_err(|e| docx_error(e.to_string()))?;

    let mut reader = Reader::from_str(&xml);
    let mut paragraphs: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut in_text_run = false;

    loop {
        match reader.read_event() {
            Err(e) => return Err(docx_error(e.to_string())),
            Ok(Event::Eof) => break,
            Ok(Event::Start(ref e)) if e.local_name().as_ref() == b"t" => {
                in_text_run = true;
            }
            Ok(Event::End(ref e)) => match e.local_name().as_ref() {
                b"t" => in_text_run = false,
                b"p" => paragraphs.push(std::mem::take(&mut current)),
                _ => {}
            },
            Ok(Event::Empty(ref e)) if e.local_name().as_ref() == b"tab" => {
                current.push(' ');
            }
            Ok(Event::Text(e)) if in_text_run => {
                let text = e.unescape().map_err(|e| docx_error(e.to_string()))?;
                current.push_str(&text);
            }
            Ok(_) => {}
        }
    }

    debug!(
        "Extracted {} paragraphs from DOCX '{}'",
        paragraphs.len(),
        document.name
    );
    Ok(paragraphs.join("\n"))
}
