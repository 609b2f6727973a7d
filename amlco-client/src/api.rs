//! One method per backend endpoint

use crate::error::ApiError;
use crate::files::UploadFile;
use crate::transport::{ApiRequest, ApiResponse, HttpTransport, Method, RequestBody, Transport};
use crate::types::{
    AnnualReportUpload, CreateReport, CreatedReport, DocumentUpload, ExcelUpload, Report,
    ReportList, ReportSummary, SourceUpload, TemplateSections,
};
use amlco_config::ApiConfig;
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde_json::json;
use url::Url;

const UPLOAD_FAILED: &str = "Upload failed";
const CREATE_FAILED: &str = "Create report failed";
const LIST_FAILED: &str = "Failed to load reports";
const LOAD_FAILED: &str = "Failed to load report";
const SAVE_FAILED: &str = "Save failed";
const DELETE_FAILED: &str = "Delete failed";
const DOWNLOAD_FAILED: &str = "Download failed";
const SECTIONS_FAILED: &str = "Failed to load template sections";

static PATH_BASE: Lazy<Url> =
    Lazy::new(|| Url::parse("http://backend/").expect("path base is a valid URL"));

/// Absolute request path from literal segments followed by an id, percent-encoding the id so
/// `/`, `?` and `#` stay inside its segment.
fn resource_path(segments: &[&str], id: &str, suffix: Option<&str>) -> String {
    let mut url = PATH_BASE.clone();
    if let Ok(mut path) = url.path_segments_mut() {
        path.clear().extend(segments).push(id).extend(suffix);
    }
    url.path().to_string()
}

/// Typed access to the backend.
#[derive(Debug, Clone)]
pub struct ApiClient<T> {
    transport: T,
}

impl ApiClient<HttpTransport> {
    pub fn from_config(config: &ApiConfig) -> Result<Self, ApiError> {
        Ok(Self::new(HttpTransport::new(&config.base_url)?))
    }
}

impl<T: Transport> ApiClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Upload a source file (spreadsheet or document) to be parsed into sections.
    pub fn upload_source(&self, file: UploadFile) -> Result<SourceUpload, ApiError> {
        self.upload("/api/upload-source", file)
    }

    pub fn upload_annual_report(&self, file: UploadFile) -> Result<AnnualReportUpload, ApiError> {
        self.upload("/api/upload-annual-report", file)
    }

    pub fn upload_excel(&self, file: UploadFile) -> Result<ExcelUpload, ApiError> {
        self.upload("/api/upload-excel", file)
    }

    pub fn upload_document(&self, file: UploadFile) -> Result<DocumentUpload, ApiError> {
        self.upload("/api/upload-document", file)
    }

    pub fn delete_excel(&self, excel_id: &str) -> Result<(), ApiError> {
        self.call(
            ApiRequest::delete(resource_path(&["api", "upload-excel"], excel_id, None)),
            DELETE_FAILED,
        )
        .map(drop)
    }

    pub fn delete_document(&self, document_id: &str) -> Result<(), ApiError> {
        self.call(
            ApiRequest::delete(resource_path(&["api", "upload-document"], document_id, None)),
            DELETE_FAILED,
        )
        .map(drop)
    }

    /// Section names of the report template.
    pub fn template_sections(&self) -> Result<Vec<String>, ApiError> {
        let sections: TemplateSections =
            self.call_json(ApiRequest::get("/api/template-sections"), SECTIONS_FAILED)?;
        Ok(sections.into_names())
    }

    pub fn create_report(&self, request: &CreateReport) -> Result<CreatedReport, ApiError> {
        let body = serde_json::to_value(request)
            .map_err(|e| ApiError::Decode(format!("could not encode request: {e}")))?;
        self.call_json(
            ApiRequest::new(Method::Post, "/api/reports", RequestBody::Json(body)),
            CREATE_FAILED,
        )
    }

    pub fn list_reports(&self) -> Result<Vec<ReportSummary>, ApiError> {
        let list: ReportList = self.call_json(ApiRequest::get("/api/reports"), LIST_FAILED)?;
        Ok(list.reports.unwrap_or_default())
    }

    pub fn get_report(&self, report_id: &str) -> Result<Report, ApiError> {
        self.call_json(
            ApiRequest::get(resource_path(&["api", "reports"], report_id, None)),
            LOAD_FAILED,
        )
    }

    pub fn update_report(&self, report_id: &str, content_html: &str) -> Result<(), ApiError> {
        let body = json!({ "content_html": content_html });
        self.call(
            ApiRequest::new(
                Method::Put,
                resource_path(&["api", "reports"], report_id, None),
                RequestBody::Json(body),
            ),
            SAVE_FAILED,
        )
        .map(drop)
    }

    pub fn delete_report(&self, report_id: &str) -> Result<(), ApiError> {
        self.call(
            ApiRequest::delete(resource_path(&["api", "reports"], report_id, None)),
            DELETE_FAILED,
        )
        .map(drop)
    }

    /// Rendered `.docx` bytes of a report.
    pub fn download_docx(&self, report_id: &str) -> Result<Vec<u8>, ApiError> {
        self.call(
            ApiRequest::get(resource_path(&["api", "reports"], report_id, Some("download-docx"))),
            DOWNLOAD_FAILED,
        )
        .map(|response| response.body)
    }

    fn upload<R: DeserializeOwned>(&self, path: &str, file: UploadFile) -> Result<R, ApiError> {
        self.call_json(
            ApiRequest::new(Method::Post, path, RequestBody::File(file)),
            UPLOAD_FAILED,
        )
    }

    fn call(&self, request: ApiRequest, fallback: &str) -> Result<ApiResponse, ApiError> {
        log::debug!("{} {}", request.method, request.path);
        let response = self.transport.execute(request)?;
        if !response.is_success() {
            log::debug!("backend answered {}", response.status);
            return Err(ApiError::from_response(
                response.status,
                &response.body,
                fallback,
            ));
        }
        Ok(response)
    }

    fn call_json<R: DeserializeOwned>(
        &self,
        request: ApiRequest,
        fallback: &str,
    ) -> Result<R, ApiError> {
        let response = self.call(request, fallback)?;
        serde_json::from_slice(&response.body).map_err(|e| ApiError::Decode(e.to_string()))
    }
}
