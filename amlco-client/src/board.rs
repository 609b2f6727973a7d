//! Report list with search and delete

use crate::api::ApiClient;
use crate::error::ApiError;
use crate::transport::Transport;
use crate::types::ReportSummary;

pub const DELETE_RETRY: &str = "Delete failed. Please try again.";

#[derive(Debug, Clone, Default)]
pub struct ReportBoard {
    reports: Vec<ReportSummary>,
    query: String,
}

impl ReportBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the list with the backend's. On failure the current list is kept.
    pub fn load<T: Transport>(&mut self, client: &ApiClient<T>) -> Result<(), ApiError> {
        self.reports = client.list_reports()?;
        log::debug!("loaded {} reports", self.reports.len());
        Ok(())
    }

    pub fn reports(&self) -> &[ReportSummary] {
        &self.reports
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Reports whose title contains the query, ignoring case. A blank query matches everything.
    pub fn filtered(&self) -> Vec<&ReportSummary> {
        let query = self.query.trim().to_lowercase();
        self.reports
            .iter()
            .filter(|report| query.is_empty() || report.title.to_lowercase().contains(&query))
            .collect()
    }

    pub fn completed_count(&self) -> usize {
        self.reports.iter().filter(|r| r.is_complete()).count()
    }

    /// Delete a report, dropping it from the list before the backend confirms.
    ///
    /// If the backend rejects the delete the previous list is restored and the error carries
    /// [`DELETE_RETRY`]. After a successful delete the list is reloaded; a failed reload is
    /// logged and leaves the locally updated list in place.
    pub fn delete<T: Transport>(
        &mut self,
        client: &ApiClient<T>,
        report_id: &str,
    ) -> Result<(), ApiError> {
        let snapshot = self.reports.clone();
        self.reports.retain(|report| report.id != report_id);

        if let Err(e) = client.delete_report(report_id) {
            log::warn!("delete of report {report_id} failed: {e}");
            self.reports = snapshot;
            return Err(e.with_message(DELETE_RETRY));
        }

        if let Err(e) = self.load(client) {
            log::warn!("reload after delete failed: {e}");
        }
        Ok(())
    }
}
