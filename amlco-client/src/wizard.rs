//! Report creation workflows
//!
//! Two ways to get from files to a report:
//!
//! - [`UploadQueue`] + [`generate_report`]: upload a batch of data files, remember the most
//!   recent spreadsheet id in the [`StateStore`], then ask the backend to generate an annual
//!   report from that spreadsheet.
//! - [`SourceSession`]: upload source files one at a time, collect the sections the backend
//!   parsed out of them, review them and create the report from the collected sections.
//!
//! [`SectionPlan`] is the manual variant of the second flow: the template's sections are filled
//! in by hand with documents, reference URLs and comments.

use crate::api::ApiClient;
use crate::error::{ApiError, StoreError};
use crate::files::{UploadFile, UploadKind};
use crate::store::{StateStore, EXCEL_ID_KEY};
use crate::transport::Transport;
use crate::types::{CreateReport, ParsedSection, ReportSection, SectionSlot};

pub const MISSING_SPREADSHEET: &str = "Please upload the Excel file before generating.";
pub const MISSING_REPORT_ID: &str = "Report created, but no report ID returned.";

#[derive(Debug, Clone, PartialEq)]
pub enum UploadState {
    Uploading,
    Uploaded,
    Error(String),
}

/// One file in the upload list.
#[derive(Debug, Clone, PartialEq)]
pub struct QueuedUpload {
    pub file_name: String,
    pub size: u64,
    pub kind: UploadKind,
    pub state: UploadState,
    /// Backend id, set once the upload succeeded
    pub server_id: Option<String>,
}

/// Data files uploaded for the spreadsheet-driven report.
#[derive(Debug, Clone, Default)]
pub struct UploadQueue {
    items: Vec<QueuedUpload>,
}

impl UploadQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[QueuedUpload] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Append `files` to the list and upload them one after another.
    ///
    /// `.xlsx` files go to the spreadsheet endpoint, the rest to the document endpoint. A failed
    /// upload only marks its own entry. Every successful spreadsheet upload overwrites the stored
    /// `excel_id`, so the last spreadsheet in `files` that succeeds is the one remembered.
    ///
    /// A failed store write does not stop the batch; the first such error is returned once every
    /// file has been sent.
    pub fn upload_all<T, S>(
        &mut self,
        client: &ApiClient<T>,
        store: &mut S,
        files: Vec<UploadFile>,
    ) -> Result<(), StoreError>
    where
        T: Transport,
        S: StateStore + ?Sized,
    {
        let start = self.items.len();
        self.items.extend(files.iter().map(|file| QueuedUpload {
            file_name: file.file_name.clone(),
            size: file.size(),
            kind: file.kind(),
            state: UploadState::Uploading,
            server_id: None,
        }));

        let mut store_error = None;
        for (offset, file) in files.into_iter().enumerate() {
            let kind = file.kind();
            let result = match kind {
                UploadKind::Spreadsheet => client.upload_excel(file).map(|r| r.excel_id),
                UploadKind::Document => client.upload_document(file).map(|r| r.document_id),
            };
            let item = &mut self.items[start + offset];
            match result {
                Ok(id) => {
                    log::debug!("uploaded {} as {id}", item.file_name);
                    item.state = UploadState::Uploaded;
                    item.server_id = Some(id.clone());
                    if kind == UploadKind::Spreadsheet && !id.is_empty() {
                        if let Err(e) = store.set(EXCEL_ID_KEY, &id) {
                            log::warn!("could not remember spreadsheet {id}: {e}");
                            store_error.get_or_insert(e);
                        }
                    }
                }
                Err(e) => {
                    log::warn!("upload of {} failed: {e}", item.file_name);
                    item.state = UploadState::Error(e.to_string());
                }
            }
        }
        store_error.map_or(Ok(()), Err)
    }

    /// Drop the entry at `index`.
    ///
    /// The backend copy is deleted on a best-effort basis: a failed delete is logged and the
    /// entry is removed anyway. Removing any spreadsheet clears the stored `excel_id`.
    pub fn remove<T, S>(
        &mut self,
        index: usize,
        client: &ApiClient<T>,
        store: &mut S,
    ) -> Result<Option<QueuedUpload>, StoreError>
    where
        T: Transport,
        S: StateStore + ?Sized,
    {
        if index >= self.items.len() {
            return Ok(None);
        }
        let item = self.items.remove(index);
        if let Some(id) = &item.server_id {
            let deleted = match item.kind {
                UploadKind::Spreadsheet => client.delete_excel(id),
                UploadKind::Document => client.delete_document(id),
            };
            if let Err(e) = deleted {
                log::warn!("could not delete {} on the server: {e}", item.file_name);
            }
        }
        if item.kind == UploadKind::Spreadsheet {
            store.remove(EXCEL_ID_KEY)?;
        }
        Ok(Some(item))
    }
}

/// Create and generate a report from the spreadsheet remembered in `store`.
///
/// Returns the new report id.
pub fn generate_report<T, S>(
    client: &ApiClient<T>,
    store: &S,
    report_type: &str,
) -> Result<String, ApiError>
where
    T: Transport,
    S: StateStore + ?Sized,
{
    let excel_id = store
        .get(EXCEL_ID_KEY)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ApiError::precondition(MISSING_SPREADSHEET))?;

    let mut request = CreateReport::new(report_type);
    request.excel_id = Some(excel_id);
    request.generate_now = true;

    client
        .create_report(&request)?
        .report_id
        .ok_or_else(|| ApiError::Incomplete(MISSING_REPORT_ID.to_string()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    Upload,
    Review,
}

/// Source files uploaded one at a time, with the sections parsed out of them.
#[derive(Debug, Clone)]
pub struct SourceSession {
    report_type: String,
    sections: Vec<ParsedSection>,
    source_ids: Vec<String>,
    annual_report_id: Option<String>,
    step: WizardStep,
    status: String,
}

impl SourceSession {
    pub fn new(report_type: impl Into<String>) -> Self {
        Self {
            report_type: report_type.into(),
            sections: Vec::new(),
            source_ids: Vec::new(),
            annual_report_id: None,
            step: WizardStep::Upload,
            status: String::new(),
        }
    }

    pub fn report_type(&self) -> &str {
        &self.report_type
    }

    pub fn set_report_type(&mut self, report_type: impl Into<String>) {
        self.report_type = report_type.into();
    }

    pub fn sections(&self) -> &[ParsedSection] {
        &self.sections
    }

    pub fn source_ids(&self) -> &[String] {
        &self.source_ids
    }

    pub fn annual_report_id(&self) -> Option<&str> {
        self.annual_report_id.as_deref()
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    /// Progress message of the last action; empty after a failure.
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Upload a source file and append the sections parsed from it.
    ///
    /// Returns how many sections the file contributed.
    pub fn upload_source<T: Transport>(
        &mut self,
        client: &ApiClient<T>,
        file: UploadFile,
    ) -> Result<usize, ApiError> {
        self.status = "Uploading & parsing source file...".to_string();
        let upload = client.upload_source(file).inspect_err(|_| self.status.clear())?;

        if let Some(id) = upload.id() {
            if !self.source_ids.iter().any(|known| known == id) {
                self.source_ids.push(id.to_string());
            }
        }
        let count = upload.sections.len();
        let mode = upload
            .parse_mode
            .as_deref()
            .filter(|mode| !mode.is_empty())
            .map(|mode| format!(" ({mode})"))
            .unwrap_or_default();
        self.sections.extend(upload.sections);
        self.status = format!("Parsed sections: {count}{mode}");
        Ok(count)
    }

    pub fn upload_annual_report<T: Transport>(
        &mut self,
        client: &ApiClient<T>,
        file: UploadFile,
    ) -> Result<(), ApiError> {
        self.status = "Uploading annual report...".to_string();
        let upload = client
            .upload_annual_report(file)
            .inspect_err(|_| self.status.clear())?;
        self.annual_report_id = upload.annual_report_id;
        self.status = "Annual report uploaded.".to_string();
        Ok(())
    }

    /// Move on to reviewing the parsed sections. Needs at least one section.
    pub fn go_review(&mut self) -> Result<(), ApiError> {
        if self.sections.is_empty() {
            return Err(ApiError::precondition(
                "Upload a source file before reviewing parsed content.",
            ));
        }
        self.step = WizardStep::Review;
        Ok(())
    }

    pub fn go_upload(&mut self) {
        self.step = WizardStep::Upload;
    }

    pub fn latest_source_id(&self) -> Option<&str> {
        self.source_ids.last().map(String::as_str)
    }

    /// The create request for the collected sections, generated immediately.
    pub fn request(&self) -> CreateReport {
        let mut request = CreateReport::new(self.report_type.clone());
        request.sections = self
            .sections
            .iter()
            .cloned()
            .map(ReportSection::Parsed)
            .collect();
        request.annual_report_id = self.annual_report_id.clone();
        request.source_id = self.latest_source_id().map(str::to_string);
        request.generate_now = true;
        request
    }

    /// Create the report from the latest source and all collected sections.
    pub fn create<T: Transport>(&mut self, client: &ApiClient<T>) -> Result<String, ApiError> {
        self.status = "Generating report...".to_string();
        let created = client
            .create_report(&self.request())
            .inspect_err(|_| self.status.clear())?;
        let report_id = created.report_id.ok_or_else(|| {
            self.status.clear();
            ApiError::Incomplete(MISSING_REPORT_ID.to_string())
        })?;
        self.status = "Done. Opening editor...".to_string();
        Ok(report_id)
    }
}

/// Template sections filled in by hand.
#[derive(Debug, Clone, Default)]
pub struct SectionPlan {
    slots: Vec<SectionSlot>,
}

impl SectionPlan {
    pub fn new(names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            slots: names.into_iter().map(SectionSlot::new).collect(),
        }
    }

    /// Start from the backend's template section list.
    pub fn load<T: Transport>(client: &ApiClient<T>) -> Result<Self, ApiError> {
        Ok(Self::new(client.template_sections()?))
    }

    pub fn slots(&self) -> &[SectionSlot] {
        &self.slots
    }

    pub fn slot(&self, name: &str) -> Option<&SectionSlot> {
        self.slots.iter().find(|slot| slot.name == name)
    }

    fn slot_mut(&mut self, name: &str) -> Result<&mut SectionSlot, ApiError> {
        self.slots
            .iter_mut()
            .find(|slot| slot.name == name)
            .ok_or_else(|| ApiError::precondition(format!("Unknown section: {name}")))
    }

    /// Upload `file` and attach it to `section`. Returns the document id.
    pub fn attach_document<T: Transport>(
        &mut self,
        client: &ApiClient<T>,
        section: &str,
        file: UploadFile,
    ) -> Result<String, ApiError> {
        self.slot_mut(section)?;
        let document_id = client.upload_document(file)?.document_id;
        self.slot_mut(section)?.document_ids.push(document_id.clone());
        Ok(document_id)
    }

    /// Attach an already uploaded document.
    pub fn add_document_id(&mut self, section: &str, document_id: &str) -> Result<(), ApiError> {
        let slot = self.slot_mut(section)?;
        if !slot.document_ids.iter().any(|id| id == document_id) {
            slot.document_ids.push(document_id.to_string());
        }
        Ok(())
    }

    /// Add a reference URL. Only absolute http(s) URLs are accepted; duplicates are ignored.
    pub fn add_url(&mut self, section: &str, url: &str) -> Result<(), ApiError> {
        let url = url.trim();
        let valid = url::Url::parse(url)
            .map(|parsed| matches!(parsed.scheme(), "http" | "https") && parsed.has_host())
            .unwrap_or(false);
        if !valid {
            return Err(ApiError::precondition(format!("Invalid URL: {url}")));
        }
        let slot = self.slot_mut(section)?;
        if !slot.urls.iter().any(|known| known == url) {
            slot.urls.push(url.to_string());
        }
        Ok(())
    }

    pub fn remove_url(&mut self, section: &str, url: &str) -> Result<(), ApiError> {
        self.slot_mut(section)?.urls.retain(|known| known != url.trim());
        Ok(())
    }

    /// Set or clear (blank text) the comment of `section`.
    pub fn set_comment(&mut self, section: &str, comment: &str) -> Result<(), ApiError> {
        let comment = comment.trim();
        self.slot_mut(section)?.comment = (!comment.is_empty()).then(|| comment.to_string());
        Ok(())
    }

    pub fn into_request(self, report_type: &str, generate_now: bool) -> CreateReport {
        let mut request = CreateReport::new(report_type);
        request.sections = self.slots.into_iter().map(ReportSection::Slot).collect();
        request.generate_now = generate_now;
        request
    }
}
