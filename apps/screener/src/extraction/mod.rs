//! Text Extractor — best-effort plain text from `.txt` and `.pdf` resumes.

use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};

use pdf_extract::{Document, PlainTextOutput};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Corrupt PDF {path}: {message}")]
    CorruptPdf { path: PathBuf, message: String },

    #[error("Unsupported resume format: {path}")]
    UnsupportedFormat { path: PathBuf },
}

/// The input encodings a resume may arrive in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    PlainText,
    Pdf,
}

impl DocumentKind {
    /// Classifies by extension, ignoring case. `None` means the file is not a resume.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        if ext.eq_ignore_ascii_case("pdf") {
            Some(DocumentKind::Pdf)
        } else if ext.eq_ignore_ascii_case("txt") {
            Some(DocumentKind::PlainText)
        } else {
            None
        }
    }
}

/// Returns the textual content of a resume file.
///
/// A readable file without extractable text yields an empty string, not an error.
pub fn extract_text(path: &Path) -> Result<String, ExtractionError> {
    let kind = DocumentKind::from_path(path).ok_or_else(|| ExtractionError::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;

    let read_error = |source| ExtractionError::Read {
        path: path.to_path_buf(),
        source,
    };

    match kind {
        DocumentKind::PlainText => std::fs::read_to_string(path).map_err(read_error),
        DocumentKind::Pdf => {
            let bytes = std::fs::read(path).map_err(read_error)?;
            let text = extract_pdf_text(&bytes).map_err(|message| ExtractionError::CorruptPdf {
                path: path.to_path_buf(),
                message,
            })?;
            debug!("Extracted {} chars from {}", text.len(), path.display());
            Ok(text)
        }
    }
}

/// Page text in document order.
///
/// Only an unloadable document is an error. A page that fails to render, or
/// panics inside pdf-extract, contributes nothing and the other pages are kept.
fn extract_pdf_text(bytes: &[u8]) -> Result<String, String> {
    let mut doc = match panic::catch_unwind(|| Document::load_mem(bytes)) {
        Ok(Ok(doc)) => doc,
        Ok(Err(e)) => return Err(e.to_string()),
        Err(_) => return Err("PDF parser panicked".to_string()),
    };
    if doc.is_encrypted() {
        doc.decrypt("").map_err(|e| e.to_string())?;
    }

    let mut text = String::new();
    for page_num in doc.get_pages().into_keys() {
        match page_text(&doc, page_num) {
            Some(page) if page.trim().is_empty() => {}
            Some(page) => {
                if !text.is_empty() {
                    text.push('\n');
                }
                text.push_str(&page);
            }
            None => warn!("Skipping unreadable PDF page {page_num}"),
        }
    }
    Ok(text)
}

fn page_text(doc: &Document, page_num: u32) -> Option<String> {
    let mut page = String::new();
    let rendered = panic::catch_unwind(AssertUnwindSafe(|| {
        let mut output = PlainTextOutput::new(&mut page);
        pdf_extract::output_doc_page(doc, &mut output, page_num)
    }));
    match rendered {
        Ok(Ok(())) => Some(page),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_kind_from_extension() {
        assert_eq!(
            DocumentKind::from_path(Path::new("resumes/alice.txt")),
            Some(DocumentKind::PlainText)
        );
        assert_eq!(
            DocumentKind::from_path(Path::new("bob.PDF")),
            Some(DocumentKind::Pdf)
        );
        assert_eq!(DocumentKind::from_path(Path::new("carol.docx")), None);
        assert_eq!(DocumentKind::from_path(Path::new("README")), None);
    }

    #[test]
    fn test_plain_text_returned_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("alice.txt");
        let content = "Alice\n\n5 years Java experience, Chennai\n  indented line\n";
        std::fs::write(&path, content).unwrap();
        assert_eq!(extract_text(&path).unwrap(), content);
    }

    #[test]
    fn test_empty_text_file_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.txt");
        std::fs::write(&path, "").unwrap();
        assert_eq!(extract_text(&path).unwrap(), "");
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = extract_text(&dir.path().join("ghost.txt")).unwrap_err();
        assert!(matches!(err, ExtractionError::Read { .. }));
    }

    #[test]
    fn test_garbage_pdf_is_corrupt_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.pdf");
        std::fs::write(&path, b"this is not a pdf at all").unwrap();
        let err = extract_text(&path).unwrap_err();
        assert!(matches!(err, ExtractionError::CorruptPdf { .. }));
    }

    /// Builds a PDF with one page per content stream, all pages sharing
    /// Helvetica as `/F1`. Object offsets in the xref table are exact.
    fn build_pdf(page_streams: &[&str]) -> Vec<u8> {
        let page_count = page_streams.len();
        let kids: Vec<String> = (0..page_count).map(|i| format!("{} 0 R", 4 + 2 * i)).collect();

        let mut objects = vec![
            "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
            format!("<< /Type /Pages /Kids [{}] /Count {} >>", kids.join(" "), page_count),
            "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>".to_string(),
        ];
        for (i, stream) in page_streams.iter().enumerate() {
            objects.push(format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
                 /Resources << /Font << /F1 3 0 R >> >> /Contents {} 0 R >>",
                5 + 2 * i
            ));
            objects.push(format!(
                "<< /Length {} >>\nstream\n{}\nendstream",
                stream.len(),
                stream
            ));
        }

        let mut pdf = b"%PDF-1.4\n".to_vec();
        let mut offsets = Vec::new();
        for (i, body) in objects.iter().enumerate() {
            offsets.push(pdf.len());
            pdf.extend_from_slice(format!("{} 0 obj\n{}\nendobj\n", i + 1, body).as_bytes());
        }
        let xref_at = pdf.len();
        let mut xref = format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1);
        for offset in offsets {
            xref.push_str(&format!("{offset:010} 00000 n \n"));
        }
        xref.push_str(&format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
            objects.len() + 1,
            xref_at
        ));
        pdf.extend_from_slice(xref.as_bytes());
        pdf
    }

    fn text_page(word: &str) -> String {
        format!("BT /F1 12 Tf 72 700 Td ({word}) Tj ET")
    }

    #[test]
    fn test_pdf_pages_concatenated_in_order() {
        let pdf = build_pdf(&[&text_page("FIRSTPAGE"), &text_page("SECONDPAGE")]);
        let text = extract_pdf_text(&pdf).unwrap();
        let first = text.find("FIRSTPAGE").expect("page one text");
        let second = text.find("SECONDPAGE").expect("page two text");
        assert!(first < second);
    }

    #[test]
    fn test_blank_page_contributes_nothing() {
        let pdf = build_pdf(&[&text_page("HELLOPAGEONE"), ""]);
        let text = extract_pdf_text(&pdf).unwrap();
        assert!(text.contains("HELLOPAGEONE"));
        assert!(!text.ends_with('\n'));
    }

    #[test]
    fn test_pdf_without_text_yields_empty_string() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan.pdf");
        std::fs::write(&path, build_pdf(&["", ""])).unwrap();
        assert_eq!(extract_text(&path).unwrap(), "");
    }

    #[test]
    fn test_unrenderable_page_keeps_other_pages() {
        // /F9 is not defined in the page resources
        let bad_page = "BT /F9 12 Tf 72 700 Td (LOST) Tj ET";
        let pdf = build_pdf(&[&text_page("HELLOPAGEONE"), bad_page]);
        let text = extract_pdf_text(&pdf).unwrap();
        assert!(text.contains("HELLOPAGEONE"));
        assert!(!text.contains("LOST"));
    }

    #[test]
    fn test_unsupported_extension_is_rejected() {
        let err = extract_text(Path::new("resume.docx")).unwrap_err();
        assert!(matches!(err, ExtractionError::UnsupportedFormat { .. }));
    }
}
