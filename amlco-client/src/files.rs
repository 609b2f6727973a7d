//! Upload payloads and file naming helpers

use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::io;
use std::path::Path;

static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

const DEFAULT_DOWNLOAD_STEM: &str = "AMLCO_Annual_Report";

/// A file to be sent as the `file` field of a multipart upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes: bytes.into(),
        }
    }

    pub fn from_path(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("'{}' has no usable file name", path.display()),
                )
            })?
            .to_string();
        let bytes = fs::read(path)?;
        Ok(Self { file_name, bytes })
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn kind(&self) -> UploadKind {
        UploadKind::for_file_name(&self.file_name)
    }
}

/// Which upload endpoint a data file goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    /// `.xlsx` workbooks → `/api/upload-excel`
    Spreadsheet,
    /// everything else → `/api/upload-document`
    Document,
}

impl UploadKind {
    pub fn for_file_name(name: &str) -> Self {
        if name.to_lowercase().ends_with(".xlsx") {
            UploadKind::Spreadsheet
        } else {
            UploadKind::Document
        }
    }
}

/// File name for a downloaded report: whitespace runs become `_`, `.docx` is appended.
pub fn download_filename(title: &str) -> String {
    let stem = WHITESPACE_RUN.replace_all(title, "_");
    if stem.is_empty() {
        format!("{DEFAULT_DOWNLOAD_STEM}.docx")
    } else {
        format!("{stem}.docx")
    }
}

/// Human readable size: `0 B`, `512 B`, `1.5 KB`, `2 MB`.
pub fn format_bytes(bytes: u64) -> String {
    if bytes == 0 {
        return "0 B".to_string();
    }
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    let value = if unit == 0 {
        size.round()
    } else {
        (size * 10.0).round() / 10.0
    };
    if value.fract() == 0.0 {
        format!("{} {}", value as u64, UNITS[unit])
    } else {
        format!("{value} {}", UNITS[unit])
    }
}
