use super::backend::FakeBackend;
use amlco_client::types::ReportSection;
use amlco_client::{
    generate_report, ApiClient, MemoryStore, Method, ReportEditor, ReportStatus, SectionPlan,
    SourceSession, StateStore, UploadFile, UploadQueue, UploadState, EXCEL_ID_KEY,
};

fn file(name: &str) -> UploadFile {
    UploadFile::new(name, b"content".to_vec())
}

#[test]
fn upload_generate_and_open_completed_report() {
    let backend = FakeBackend::new();
    let client = ApiClient::new(&backend);
    let mut store = MemoryStore::new();
    let mut queue = UploadQueue::new();

    queue
        .upload_all(&client, &mut store, vec![file("clients.xlsx")])
        .unwrap();
    let excel_id = store.get(EXCEL_ID_KEY).unwrap();
    assert_eq!(queue.items()[0].server_id.as_deref(), Some(excel_id.as_str()));

    let report_id = generate_report(&client, &store, "annual").unwrap();
    let stored = backend.report(&report_id).unwrap();
    assert_eq!(stored["request"]["excel_id"], excel_id.as_str());
    assert_eq!(stored["request"]["generate_now"], true);

    let editor = ReportEditor::load(&client, &report_id).unwrap();
    assert_eq!(editor.status().report_status(), ReportStatus::Done);
    assert_eq!(editor.status_label(), "Complete");
    assert_eq!(editor.text(), "Executive Summary\nNo findings.");
}

#[test]
fn mixed_batch_keeps_documents_and_spreadsheet_apart() {
    let backend = FakeBackend::new();
    let client = ApiClient::new(&backend);
    let mut store = MemoryStore::new();
    let mut queue = UploadQueue::new();

    queue
        .upload_all(
            &client,
            &mut store,
            vec![file("policy.pdf"), file("clients.xlsx"), file("minutes.docx")],
        )
        .unwrap();
    assert!(queue
        .items()
        .iter()
        .all(|item| item.state == UploadState::Uploaded));
    assert_eq!(store.get(EXCEL_ID_KEY).as_deref(), Some("xl-2"));

    // removing a document leaves the spreadsheet id alone
    queue.remove(0, &client, &mut store).unwrap();
    assert_eq!(
        backend.requests.borrow().last().unwrap(),
        &(Method::Delete, "/api/upload-document/doc-1".to_string())
    );
    assert_eq!(store.get(EXCEL_ID_KEY).as_deref(), Some("xl-2"));

    queue.remove(0, &client, &mut store).unwrap();
    assert_eq!(store.get(EXCEL_ID_KEY), None);
    assert_eq!(queue.len(), 1);

    let err = generate_report(&client, &store, "annual").unwrap_err();
    assert_eq!(err.to_string(), "Please upload the Excel file before generating.");
}

#[test]
fn source_session_creates_report_from_parsed_sections() {
    let backend = FakeBackend::new();
    let client = ApiClient::new(&backend);
    let mut session = SourceSession::new("annual");

    session.upload_source(&client, file("q1.xlsx")).unwrap();
    assert_eq!(session.status(), "Parsed sections: 2 (table)");
    session.upload_source(&client, file("q2.xlsx")).unwrap();
    session
        .upload_annual_report(&client, file("annual.pdf"))
        .unwrap();
    assert_eq!(session.status(), "Annual report uploaded.");
    session.go_review().unwrap();

    let titles: Vec<String> = session
        .sections()
        .iter()
        .enumerate()
        .map(|(i, s)| s.display_title(i))
        .collect();
    assert_eq!(
        titles,
        vec!["Client Onboarding", "Training", "Client Onboarding", "Training"]
    );
    assert_eq!(session.sections()[2].preview(), "q2.xlsx");

    let report_id = session.create(&client).unwrap();
    let request = &backend.report(&report_id).unwrap()["request"];
    assert_eq!(request["source_id"], "src-2");
    assert_eq!(request["annual_report_id"], "ar-3");
    assert_eq!(request["sections"].as_array().unwrap().len(), 4);
    assert_eq!(request["sections"][0]["source_texts"][0]["text"], "q1.xlsx");
}

#[test]
fn section_plan_round_trip_through_backend() {
    let backend = FakeBackend::new();
    let client = ApiClient::new(&backend);

    let mut plan = SectionPlan::load(&client).unwrap();
    assert_eq!(plan.slots().len(), 3);
    let doc = plan
        .attach_document(&client, "Training", file("attendance.pdf"))
        .unwrap();
    plan.add_url("Risk Assessment", "https://www.cysec.gov.cy/en-GB/entities/")
        .unwrap();
    plan.set_comment("Internal Audit", "Performed in Q3").unwrap();

    let request = plan.into_request("annual", false);
    assert!(matches!(&request.sections[1], ReportSection::Slot(slot) if slot.document_ids == vec![doc.clone()]));

    let created = client.create_report(&request).unwrap();
    let report_id = created.report_id.unwrap();
    let stored = backend.report(&report_id).unwrap();
    assert_eq!(stored["status"]["status"], "draft");
    assert_eq!(stored["request"]["sections"][2]["comment"], "Performed in Q3");

    let editor = ReportEditor::load(&client, &report_id).unwrap();
    assert_eq!(editor.status_label(), "Draft");
    assert_eq!(editor.display_html(), "<p>No content yet.</p>");
}

#[test]
fn editor_save_is_visible_on_reload() {
    let backend = FakeBackend::new();
    let client = ApiClient::new(&backend);
    let id = backend.insert_report("Annual 2025", "done");

    let mut editor = ReportEditor::load(&client, &id).unwrap();
    editor.toggle_edit();
    editor.set_text("1.1 Scope\nAll branches were reviewed.\n\nRISK ASSESSMENT\nLow");
    editor.save(&client).unwrap();

    let reloaded = ReportEditor::load(&client, &id).unwrap();
    assert_eq!(
        reloaded.display_html(),
        "<div><h2>1.1 Scope</h2><p>All branches were reviewed.</p><h2>RISK ASSESSMENT</h2><p>Low</p></div>"
    );
    assert_eq!(
        reloaded.text(),
        "1.1 Scope\nAll branches were reviewed.\nRISK ASSESSMENT\nLow"
    );

    let (name, bytes) = reloaded.download(&client).unwrap();
    assert_eq!(name, "Annual_2025.docx");
    assert!(bytes.starts_with(b"PK"));
}

#[test]
fn missing_report_surfaces_detail() {
    let backend = FakeBackend::new();
    let client = ApiClient::new(&backend);
    let err = ReportEditor::load(&client, "nope").unwrap_err();
    assert_eq!(err.to_string(), "Report not found");
    assert_eq!(err.status(), Some(404));
}
