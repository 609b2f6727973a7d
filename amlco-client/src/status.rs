//! Report status labels
//!
//! Status transitions happen on the backend. The client only maps whatever code it last
//! fetched to a label; anything it does not recognise is shown as a draft.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportStatus {
    Done,
    Running,
    Error,
    Draft,
}

impl ReportStatus {
    pub fn from_code(code: Option<&str>) -> Self {
        match code {
            Some("done") => ReportStatus::Done,
            Some("running") => ReportStatus::Running,
            Some("error") => ReportStatus::Error,
            _ => ReportStatus::Draft,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ReportStatus::Done => "Complete",
            ReportStatus::Running => "Generating",
            ReportStatus::Error => "Error",
            ReportStatus::Draft => "Draft",
        }
    }
}

impl fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Status object attached to a report.
///
/// Older backend builds send the bare code string instead of the object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "StatusField")]
pub struct StatusInfo {
    pub status: Option<String>,
    pub progress: Option<f64>,
    pub error: Option<String>,
}

impl StatusInfo {
    pub fn with_code(code: impl Into<String>) -> Self {
        Self {
            status: Some(code.into()),
            ..Self::default()
        }
    }

    pub fn report_status(&self) -> ReportStatus {
        ReportStatus::from_code(self.status.as_deref())
    }

    pub fn label(&self) -> &'static str {
        self.report_status().label()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StatusField {
    Code(String),
    Detail {
        #[serde(default)]
        status: Option<String>,
        #[serde(default)]
        progress: Option<f64>,
        #[serde(default)]
        error: Option<String>,
    },
}

impl From<StatusField> for StatusInfo {
    fn from(field: StatusField) -> Self {
        match field {
            StatusField::Code(code) => StatusInfo::with_code(code),
            StatusField::Detail {
                status,
                progress,
                error,
            } => StatusInfo {
                status,
                progress,
                error,
            },
        }
    }
}
