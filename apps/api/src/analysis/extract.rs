//! Text extraction from stored resume documents.
//!
//! Binary parsing is delegated to `pdf-extract` and `docx-rs`; this module
//! only locates the file for an identifier and flattens the parser output
//! into plain text.

use std::path::{Path, PathBuf};

use crate::errors::AppError;

/// Document formats accepted by the upload endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumeFormat {
    Pdf,
    Docx,
}

/// Probes for `<resume_id>.pdf` then `<resume_id>.docx`; the first existing
/// file wins.
pub async fn find_resume_file(
    upload_dir: &Path,
    resume_id: &str,
) -> Option<(PathBuf, ResumeFormat)> {
    for (ext, format) in [("pdf", ResumeFormat::Pdf), ("docx", ResumeFormat::Docx)] {
        let path = upload_dir.join(format!("{resume_id}.{ext}"));
        if tokio::fs::try_exists(&path).await.unwrap_or(false) {
            return Some((path, format));
        }
    }
    None
}

pub async fn extract_text(path: &Path, format: ResumeFormat) -> Result<String, AppError> {
    match format {
        ResumeFormat::Pdf => pdf_extract::extract_text(path)
            .map_err(|e| AppError::Extraction(format!("{}: {e}", path.display()))),
        ResumeFormat::Docx => {
            let bytes = tokio::fs::read(path)
                .await
                .map_err(|e| AppError::Extraction(format!("{}: {e}", path.display())))?;
            extract_docx_text(&bytes)
        }
    }
}

/// Flattens a DOCX body into plain text, one line per paragraph.
fn extract_docx_text(bytes: &[u8]) -> Result<String, AppError> {
    let docx = docx_rs::read_docx(bytes)
        .map_err(|e| AppError::Extraction(format!("failed to read docx: {e:?}")))?;

    let mut text = String::new();
    for child in docx.document.children {
        if let docx_rs::DocumentChild::Paragraph(paragraph) = child {
            for paragraph_child in paragraph.children {
                if let docx_rs::ParagraphChild::Run(run) = paragraph_child {
                    for run_child in run.children {
                        if let docx_rs::RunChild::Text(t) = run_child {
                            text.push_str(&t.text);
                        }
                    }
                }
            }
            text.push('\n');
        }
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_probe_prefers_pdf_over_docx() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("abc.pdf"), b"%PDF").unwrap();
        std::fs::write(dir.path().join("abc.docx"), b"PK").unwrap();

        let (path, format) = find_resume_file(dir.path(), "abc").await.unwrap();
        assert_eq!(format, ResumeFormat::Pdf);
        assert!(path.ends_with("abc.pdf"));
    }

    #[tokio::test]
    async fn test_probe_falls_back_to_docx() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("abc.docx"), b"PK").unwrap();

        let (_, format) = find_resume_file(dir.path(), "abc").await.unwrap();
        assert_eq!(format, ResumeFormat::Docx);
    }

    #[tokio::test]
    async fn test_probe_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(find_resume_file(dir.path(), "nope").await.is_none());
    }

    #[test]
    fn test_docx_garbage_is_extraction_error() {
        let err = extract_docx_text(b"definitely not a zip archive").unwrap_err();
        assert!(matches!(err, AppError::Extraction(_)));
    }
}
