//! In-memory stand-in for the report generator backend

use amlco_client::{ApiError, ApiRequest, ApiResponse, Method, RequestBody, Transport};
use serde_json::{json, Value};
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;

#[derive(Default)]
pub struct FakeBackend {
    next_id: Cell<u32>,
    reports: RefCell<BTreeMap<String, Value>>,
    pub fail_deletes: Cell<bool>,
    pub requests: RefCell<Vec<(Method, String)>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&self, prefix: &str) -> String {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        format!("{prefix}-{id}")
    }

    pub fn insert_report(&self, title: &str, status: &str) -> String {
        let id = self.next_id("rep");
        self.reports.borrow_mut().insert(
            id.clone(),
            json!({"id": id, "title": title, "status": {"status": status}}),
        );
        id
    }

    pub fn report(&self, id: &str) -> Option<Value> {
        self.reports.borrow().get(id).cloned()
    }

    fn create(&self, body: &Value) -> ApiResponse {
        if body.get("report_type").and_then(Value::as_str).is_none() {
            return ApiResponse::json(422, &json!({"detail": "report_type is required"}));
        }
        let id = self.next_id("rep");
        let generated = body["generate_now"].as_bool().unwrap_or(false);
        let mut report = json!({
            "id": id,
            "title": "AMLCO Annual Report 2025",
            "status": {"status": if generated { "done" } else { "draft" }},
            "request": body,
        });
        if generated {
            report["base_html"] = json!("<div><h1>Executive Summary</h1><p>No findings.</p></div>");
        }
        self.reports.borrow_mut().insert(id.clone(), report);
        ApiResponse::json(200, &json!({"report_id": id}))
    }

    fn report_route(&self, method: Method, id: &str, body: RequestBody) -> ApiResponse {
        if let Some(id) = id.strip_suffix("/download-docx") {
            return match self.reports.borrow().get(id) {
                Some(_) => ApiResponse::new(200, b"PK\x03\x04".to_vec()),
                None => ApiResponse::json(404, &json!({"detail": "Report not found"})),
            };
        }
        let mut reports = self.reports.borrow_mut();
        let Some(report) = reports.get_mut(id) else {
            return ApiResponse::json(404, &json!({"detail": "Report not found"}));
        };
        match (method, body) {
            (Method::Get, _) => ApiResponse::json(200, report),
            (Method::Put, RequestBody::Json(update)) => {
                report["content_html"] = update["content_html"].clone();
                ApiResponse::json(200, &json!({"ok": true}))
            }
            (Method::Delete, _) if self.fail_deletes.get() => {
                ApiResponse::new(500, "Internal Server Error")
            }
            (Method::Delete, _) => {
                reports.remove(id);
                ApiResponse::json(200, &json!({"ok": true}))
            }
            _ => ApiResponse::new(405, ""),
        }
    }
}

impl Transport for FakeBackend {
    fn execute(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        self.requests
            .borrow_mut()
            .push((request.method, request.path.clone()));

        let ApiRequest { method, path, body } = request;
        let response = match (method, path.as_str(), &body) {
            (Method::Post, "/api/upload-excel", RequestBody::File(_)) => {
                ApiResponse::json(200, &json!({"excel_id": self.next_id("xl")}))
            }
            (Method::Post, "/api/upload-document", RequestBody::File(_)) => {
                ApiResponse::json(200, &json!({"document_id": self.next_id("doc")}))
            }
            (Method::Post, "/api/upload-source", RequestBody::File(file)) => ApiResponse::json(
                200,
                &json!({
                    "source_id": self.next_id("src"),
                    "sections": [
                        {"title": "Client Onboarding", "source_texts": [{"text": file.file_name}]},
                        {"section_title": "Training"}
                    ],
                    "parse_mode": "table"
                }),
            ),
            (Method::Post, "/api/upload-annual-report", RequestBody::File(_)) => {
                ApiResponse::json(200, &json!({"annual_report_id": self.next_id("ar")}))
            }
            (Method::Get, "/api/template-sections", _) => ApiResponse::json(
                200,
                &json!({"section_names": ["Risk Assessment", "Training", "Internal Audit"]}),
            ),
            (Method::Post, "/api/reports", RequestBody::Json(value)) => self.create(value),
            (Method::Get, "/api/reports", _) => {
                let reports: Vec<Value> = self.reports.borrow().values().cloned().collect();
                ApiResponse::json(200, &json!({ "reports": reports }))
            }
            (Method::Delete, p, _)
                if p.starts_with("/api/upload-excel/") || p.starts_with("/api/upload-document/") =>
            {
                ApiResponse::json(200, &json!({"ok": true}))
            }
            (_, p, _) if p.starts_with("/api/reports/") => {
                let id = p.trim_start_matches("/api/reports/").to_string();
                self.report_route(method, &id, body.clone())
            }
            _ => ApiResponse::json(404, &json!({"detail": "Not Found"})),
        };
        Ok(response)
    }
}
