//! Wire types for the backend API
//!
//! Identifiers are kept as strings. Some backend builds send them as numbers, so every id field
//! accepts both.

use crate::status::StatusInfo;
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(serde_json::Number),
}

impl From<RawId> for String {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(text) => text,
            RawId::Number(number) => number.to_string(),
        }
    }
}

fn id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    RawId::deserialize(deserializer).map(String::from)
}

/// Absent, `null` and `""` all mean "no id".
fn optional_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let raw = Option::<RawId>::deserialize(deserializer)?;
    Ok(raw.map(String::from).filter(|id| !id.is_empty()))
}

/// `POST /api/upload-source`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SourceUpload {
    #[serde(default, deserialize_with = "optional_id")]
    pub source_id: Option<String>,
    #[serde(default, deserialize_with = "optional_id")]
    pub excel_id: Option<String>,
    #[serde(default)]
    pub sections: Vec<ParsedSection>,
    #[serde(default)]
    pub parse_mode: Option<String>,
}

impl SourceUpload {
    /// Identifier of the stored source, whichever field the backend filled in.
    pub fn id(&self) -> Option<&str> {
        self.source_id.as_deref().or(self.excel_id.as_deref())
    }
}

/// One section extracted from an uploaded source file.
///
/// The backend owns this shape; unknown fields are carried through untouched so the section can
/// be sent back verbatim when the report is created.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub source_texts: Vec<SourceText>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ParsedSection {
    /// Title to show for the section at `index` (0-based).
    pub fn display_title(&self, index: usize) -> String {
        [&self.title, &self.section_title, &self.name]
            .into_iter()
            .flatten()
            .find(|t| !t.is_empty())
            .cloned()
            .unwrap_or_else(|| format!("Section {}", index + 1))
    }

    /// Text of the first source excerpt, if any.
    pub fn preview(&self) -> &str {
        self.source_texts
            .first()
            .map(|s| s.text.as_str())
            .unwrap_or("")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceText {
    #[serde(default)]
    pub text: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// `POST /api/upload-annual-report`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AnnualReportUpload {
    #[serde(default, deserialize_with = "optional_id")]
    pub annual_report_id: Option<String>,
}

/// `POST /api/upload-excel`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ExcelUpload {
    #[serde(alias = "id", deserialize_with = "id")]
    pub excel_id: String,
}

/// `POST /api/upload-document`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DocumentUpload {
    #[serde(alias = "id", deserialize_with = "id")]
    pub document_id: String,
}

/// `GET /api/template-sections`
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct TemplateSections {
    #[serde(default)]
    pub section_names: Option<Vec<String>>,
    /// Earlier backend builds used this key
    #[serde(default)]
    pub sections: Option<Vec<String>>,
}

impl TemplateSections {
    pub fn into_names(self) -> Vec<String> {
        self.section_names.or(self.sections).unwrap_or_default()
    }
}

/// A template slot filled in by the user: uploaded documents, reference URLs and a comment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SectionSlot {
    pub name: String,
    pub document_ids: Vec<String>,
    pub urls: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl SectionSlot {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.document_ids.is_empty() && self.urls.is_empty() && self.comment.is_none()
    }
}

/// Entry of the `sections` array sent when creating a report.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ReportSection {
    Parsed(ParsedSection),
    Slot(SectionSlot),
}

/// `POST /api/reports` body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateReport {
    pub report_type: String,
    pub sections: Vec<ReportSection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annual_report_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excel_id: Option<String>,
    pub generate_now: bool,
}

impl CreateReport {
    pub fn new(report_type: impl Into<String>) -> Self {
        Self {
            report_type: report_type.into(),
            sections: Vec::new(),
            annual_report_id: None,
            source_id: None,
            excel_id: None,
            generate_now: false,
        }
    }
}

/// `POST /api/reports` response
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CreatedReport {
    #[serde(default, deserialize_with = "optional_id")]
    pub report_id: Option<String>,
}

/// Entry of `GET /api/reports`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSummary {
    #[serde(deserialize_with = "id")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub status: Option<StatusInfo>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub completeness: Option<f64>,
}

impl ReportSummary {
    pub fn status_label(&self) -> &'static str {
        self.status
            .as_ref()
            .map(StatusInfo::label)
            .unwrap_or(crate::status::ReportStatus::Draft.label())
    }

    pub fn is_complete(&self) -> bool {
        self.status
            .as_ref()
            .is_some_and(|s| s.report_status() == crate::status::ReportStatus::Done)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ReportList {
    #[serde(default)]
    pub reports: Option<Vec<ReportSummary>>,
}

/// `GET /api/reports/{id}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Report {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content_html: Option<String>,
    #[serde(default)]
    pub base_html: Option<String>,
    #[serde(default)]
    pub status: Option<StatusInfo>,
}
