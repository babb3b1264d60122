//! Multipart request parsing for candidate create/update.
//!
//! The candidate endpoints accept text fields plus an optional `resume`
//! file part. File constraints mirror the upload filter the client was
//! built against: `.pdf`, `.doc`, or `.docx`, at most 5 MB, and a rejected
//! file fails the request before any candidate field is persisted.

use std::collections::HashMap;

use axum::extract::Multipart;
use bytes::Bytes;

use crate::error::{Error, Result};

/// File extensions accepted for resume uploads.
const ALLOWED_EXTENSIONS: &[&str] = &["pdf", "doc", "docx"];

/// An uploaded resume file, held in memory until it is pushed to storage.
#[derive(Debug, Clone)]
pub struct ResumeUpload {
    pub filename: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

/// Parsed multipart body: candidate text fields plus the optional resume.
#[derive(Debug, Default)]
pub struct CandidateMultipart {
    pub fields: HashMap<String, String>,
    pub resume: Option<ResumeUpload>,
}

impl CandidateMultipart {
    /// Reads the whole multipart stream, enforcing the resume file
    /// constraints as soon as the file part is seen.
    pub async fn read(mut multipart: Multipart, max_file_size: usize) -> Result<Self> {
        let mut parsed = Self::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|_| Error::validation("body", "Malformed multipart request"))?
        {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            let filename = field.file_name().map(str::to_string);
            match (name.as_str(), filename) {
                ("resume", Some(filename)) if !filename.is_empty() => {
                    validate_resume_filename(&filename)?;

                    let content_type = field.content_type().map(str::to_string);
                    let bytes = field
                        .bytes()
                        .await
                        .map_err(|_| Error::validation("resume", "Failed to read uploaded file"))?;
                    validate_resume_size(bytes.len(), max_file_size)?;

                    parsed.resume = Some(ResumeUpload {
                        filename,
                        content_type,
                        bytes,
                    });
                }
                // An empty filename means the form had no file selected.
                ("resume", _) => {}
                _ => {
                    let value = field
                        .text()
                        .await
                        .map_err(|_| Error::validation(&name, "Invalid field value"))?;
                    parsed.fields.insert(name, value);
                }
            }
        }

        Ok(parsed)
    }

    /// Takes a text field out of the parsed body, if present.
    pub fn take(&mut self, name: &str) -> Option<String> {
        self.fields.remove(name)
    }
}

/// Rejects filenames that are not .pdf, .doc, or .docx (case-insensitive).
pub fn validate_resume_filename(filename: &str) -> Result<()> {
    let extension = std::path::Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase);

    match extension {
        Some(ext) if ALLOWED_EXTENSIONS.contains(&ext.as_str()) => Ok(()),
        _ => Err(Error::validation(
            "resume",
            "Only .pdf, .doc, and .docx files are allowed",
        )),
    }
}

/// Rejects files over the configured size limit.
pub fn validate_resume_size(size: usize, max_size: usize) -> Result<()> {
    if size > max_size {
        return Err(Error::validation(
            "resume",
            format!("File exceeds the maximum size of {} bytes", max_size),
        ));
    }
    Ok(())
}
