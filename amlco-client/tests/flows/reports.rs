use super::backend::FakeBackend;
use amlco_client::{ApiClient, ReportBoard};

fn board_with_three(backend: &FakeBackend) -> (Vec<String>, ReportBoard) {
    let ids = vec![
        backend.insert_report("AMLCO Annual Report 2024", "done"),
        backend.insert_report("AMLCO Annual Report 2025", "running"),
        backend.insert_report("Board summary", "error"),
    ];
    let client = ApiClient::new(backend);
    let mut board = ReportBoard::new();
    board.load(&client).unwrap();
    (ids, board)
}

#[test]
fn deleted_report_is_gone_from_next_listing() {
    let backend = FakeBackend::new();
    let (ids, mut board) = board_with_three(&backend);
    let client = ApiClient::new(&backend);

    board.delete(&client, &ids[1]).unwrap();
    assert!(board.reports().iter().all(|r| r.id != ids[1]));

    let listing = client.list_reports().unwrap();
    assert_eq!(listing.len(), 2);
    assert!(listing.iter().all(|r| r.id != ids[1]));
}

#[test]
fn failed_delete_puts_report_back() {
    let backend = FakeBackend::new();
    let (ids, mut board) = board_with_three(&backend);
    let client = ApiClient::new(&backend);
    backend.fail_deletes.set(true);

    let err = board.delete(&client, &ids[0]).unwrap_err();
    assert_eq!(err.to_string(), "Delete failed. Please try again.");
    let visible: Vec<&str> = board.reports().iter().map(|r| r.id.as_str()).collect();
    assert_eq!(visible, ids.iter().map(String::as_str).collect::<Vec<_>>());
    assert_eq!(client.list_reports().unwrap().len(), 3);
}

#[test]
fn labels_and_counts_from_listing() {
    let backend = FakeBackend::new();
    let (_, mut board) = board_with_three(&backend);

    let labels: Vec<&str> = board.reports().iter().map(|r| r.status_label()).collect();
    assert_eq!(labels, vec!["Complete", "Generating", "Error"]);
    assert_eq!(board.completed_count(), 1);

    board.set_query("annual report");
    assert_eq!(board.filtered().len(), 2);
}
