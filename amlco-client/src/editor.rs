//! Viewing, editing and downloading a single report
//!
//! Editing happens on plain text. Entering edit mode extracts the text of the current HTML;
//! saving converts the text back with the outline rules of `amlco_content` and stores the result
//! as the report's `content_html`. Heading markers typed by hand survive, headings that came
//! from the backend come back as plain lines.

use crate::api::ApiClient;
use crate::error::ApiError;
use crate::files::download_filename;
use crate::status::StatusInfo;
use crate::transport::Transport;
use amlco_content::HtmlOptions;

pub const DEFAULT_TITLE: &str = "AMLCO Annual Report";
pub const NO_CONTENT: &str = "<p>No content yet.</p>";

#[derive(Debug, Clone)]
pub struct ReportEditor {
    report_id: String,
    default_title: String,
    title: String,
    content_html: String,
    base_html: String,
    status: StatusInfo,
    editing: bool,
    text: String,
    html_options: HtmlOptions,
}

impl ReportEditor {
    /// Editor for `report_id` with nothing fetched yet; call [`refresh`](Self::refresh) next.
    pub fn new(report_id: impl Into<String>) -> Self {
        Self {
            report_id: report_id.into(),
            default_title: DEFAULT_TITLE.to_string(),
            title: DEFAULT_TITLE.to_string(),
            content_html: String::new(),
            base_html: String::new(),
            status: StatusInfo::default(),
            editing: false,
            text: String::new(),
            html_options: HtmlOptions::default(),
        }
    }

    /// Fetch a report. A missing or empty title becomes [`DEFAULT_TITLE`].
    pub fn load<T: Transport>(client: &ApiClient<T>, report_id: &str) -> Result<Self, ApiError> {
        let mut editor = Self::new(report_id);
        editor.refresh(client)?;
        Ok(editor)
    }

    /// Title used when the backend has none.
    pub fn with_default_title(mut self, title: impl Into<String>) -> Self {
        self.default_title = title.into();
        self.title = self.default_title.clone();
        self
    }

    pub fn with_html_options(mut self, options: HtmlOptions) -> Self {
        self.html_options = options;
        self
    }

    /// Fetch the report again, e.g. to see whether generation finished.
    ///
    /// The edit buffer is only replaced when not editing.
    pub fn refresh<T: Transport>(&mut self, client: &ApiClient<T>) -> Result<(), ApiError> {
        let report = client.get_report(&self.report_id)?;
        self.title = report
            .title
            .filter(|title| !title.is_empty())
            .unwrap_or_else(|| self.default_title.clone());
        self.content_html = report.content_html.unwrap_or_default();
        self.base_html = report.base_html.unwrap_or_default();
        self.status = report.status.unwrap_or_default();
        if !self.editing {
            self.text = amlco_content::html_to_text(self.source_html());
        }
        Ok(())
    }

    pub fn report_id(&self) -> &str {
        &self.report_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn status(&self) -> &StatusInfo {
        &self.status
    }

    pub fn status_label(&self) -> &'static str {
        self.status.label()
    }

    /// Edited content if any, else the generated content.
    fn source_html(&self) -> &str {
        if self.content_html.is_empty() {
            &self.base_html
        } else {
            &self.content_html
        }
    }

    /// HTML to show, with a placeholder when there is nothing yet.
    pub fn display_html(&self) -> &str {
        match self.source_html() {
            "" => NO_CONTENT,
            html => html,
        }
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    /// Switch edit mode. Entering it discards unsaved text and starts over from the current HTML.
    pub fn toggle_edit(&mut self) {
        if !self.editing {
            self.text = amlco_content::html_to_text(self.source_html());
        }
        self.editing = !self.editing;
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Convert the edit buffer to HTML and store it. Edit mode is left only on success.
    pub fn save<T: Transport>(&mut self, client: &ApiClient<T>) -> Result<(), ApiError> {
        let html = amlco_content::text_to_html_with_options(&self.text, &self.html_options);
        client.update_report(&self.report_id, &html)?;
        self.content_html = html;
        self.editing = false;
        Ok(())
    }

    /// The rendered document and the file name to save it under.
    pub fn download<T: Transport>(
        &self,
        client: &ApiClient<T>,
    ) -> Result<(String, Vec<u8>), ApiError> {
        let bytes = client.download_docx(&self.report_id)?;
        Ok((download_filename(&self.title), bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::{ApiRequest, ApiResponse, Method, RequestBody};
    use serde_json::json;
    use std::cell::RefCell;

    struct OneReport {
        report: serde_json::Value,
        save_status: u16,
        saved: RefCell<Vec<serde_json::Value>>,
    }

    impl OneReport {
        fn new(report: serde_json::Value) -> Self {
            Self {
                report,
                save_status: 200,
                saved: RefCell::new(Vec::new()),
            }
        }
    }

    impl Transport for OneReport {
        fn execute(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
            Ok(match (request.method, request.body) {
                (Method::Put, RequestBody::Json(body)) => {
                    self.saved.borrow_mut().push(body);
                    ApiResponse::new(self.save_status, "")
                }
                (Method::Get, _) if request.path.ends_with("/download-docx") => {
                    ApiResponse::new(200, b"PK".to_vec())
                }
                (Method::Get, _) => ApiResponse::json(200, &self.report),
                _ => ApiResponse::new(405, ""),
            })
        }
    }

    #[test]
    fn defaults_for_empty_report() {
        let backend = OneReport::new(json!({}));
        let client = ApiClient::new(&backend);
        let editor = ReportEditor::load(&client, "r1").unwrap();
        assert_eq!(editor.title(), DEFAULT_TITLE);
        assert_eq!(editor.display_html(), NO_CONTENT);
        assert_eq!(editor.status_label(), "Draft");
        assert_eq!(editor.text(), "");
    }

    #[test]
    fn configured_default_title() {
        let backend = OneReport::new(json!({"title": ""}));
        let client = ApiClient::new(&backend);
        let mut editor = ReportEditor::new("r1").with_default_title("AML Compliance Report");
        editor.refresh(&client).unwrap();
        assert_eq!(editor.title(), "AML Compliance Report");
    }

    #[test]
    fn content_wins_over_base() {
        let backend = OneReport::new(json!({
            "title": "Report 2025",
            "content_html": "<div><p>Edited</p></div>",
            "base_html": "<div><p>Generated</p></div>",
            "status": {"status": "done"}
        }));
        let client = ApiClient::new(&backend);
        let editor = ReportEditor::load(&client, "r1").unwrap();
        assert_eq!(editor.display_html(), "<div><p>Edited</p></div>");
        assert_eq!(editor.text(), "Edited");
        assert_eq!(editor.status_label(), "Complete");
    }

    #[test]
    fn base_is_used_when_content_is_empty() {
        let backend = OneReport::new(json!({
            "content_html": "",
            "base_html": "<div><h2>SCOPE</h2><p>Generated</p></div>"
        }));
        let client = ApiClient::new(&backend);
        let editor = ReportEditor::load(&client, "r1").unwrap();
        assert_eq!(editor.display_html(), "<div><h2>SCOPE</h2><p>Generated</p></div>");
        assert_eq!(editor.text(), "SCOPE\nGenerated");
    }

    #[test]
    fn toggle_repopulates_text() {
        let backend = OneReport::new(json!({"content_html": "<p>Original</p>"}));
        let client = ApiClient::new(&backend);
        let mut editor = ReportEditor::load(&client, "r1").unwrap();

        editor.toggle_edit();
        editor.set_text("scratch");
        editor.toggle_edit();
        assert!(!editor.is_editing());
        editor.toggle_edit();
        assert_eq!(editor.text(), "Original");
    }

    #[test]
    fn save_converts_text_and_leaves_edit_mode() {
        let backend = OneReport::new(json!({"content_html": "<p>Original</p>"}));
        let client = ApiClient::new(&backend);
        let mut editor = ReportEditor::load(&client, "r1").unwrap();

        editor.toggle_edit();
        editor.set_text("# Summary\nAll good");
        editor.save(&client).unwrap();

        assert!(!editor.is_editing());
        let expected = "<div><h1>Summary</h1><p>All good</p></div>";
        assert_eq!(editor.display_html(), expected);
        assert_eq!(
            backend.saved.borrow()[0],
            json!({"content_html": expected})
        );
    }

    #[test]
    fn failed_save_stays_in_edit_mode() {
        let mut backend = OneReport::new(json!({"content_html": "<p>Original</p>"}));
        backend.save_status = 500;
        let client = ApiClient::new(&backend);
        let mut editor = ReportEditor::load(&client, "r1").unwrap();

        editor.toggle_edit();
        editor.set_text("Changed");
        let err = editor.save(&client).unwrap_err();
        assert_eq!(err.to_string(), "Save failed");
        assert!(editor.is_editing());
        assert_eq!(editor.text(), "Changed");
        assert_eq!(editor.display_html(), "<p>Original</p>");
    }

    #[test]
    fn download_names_file_after_title() {
        let backend = OneReport::new(json!({"title": "AMLCO Annual Report 2025"}));
        let client = ApiClient::new(&backend);
        let editor = ReportEditor::load(&client, "r1").unwrap();
        let (name, bytes) = editor.download(&client).unwrap();
        assert_eq!(name, "AMLCO_Annual_Report_2025.docx");
        assert_eq!(bytes, b"PK");
    }
}
