use std::sync::Arc;

use crate::domain::page::PageContext;
use crate::domain::ticket::TicketData;
use crate::error::AppResult;
use crate::matcher;
use crate::services::IssueTrackerService;

/// Scans pages for a focused Jira issue and returns it in the canonical
/// ticket shape.
///
/// One adapter serves any number of concurrent scans; it holds no per-scan
/// state beyond the shared API client.
pub struct JiraAdapter {
    api: Arc<dyn IssueTrackerService>,
}

impl JiraAdapter {
    pub fn new(api: Arc<dyn IssueTrackerService>) -> Self {
        Self { api }
    }

    /// Scan one page.
    ///
    /// Returns an empty list when the page is not a Jira screen or no
    /// issue is selected on it, without touching the network. Fetch and
    /// record-shape failures propagate as errors; a returned ticket is
    /// always fully mapped.
    pub async fn scan(&self, page: &PageContext) -> AppResult<Vec<TicketData>> {
        if !matcher::is_tracker_page(page) {
            return Ok(Vec::new());
        }

        let prefix = matcher::path_prefix(&page.url);
        let Some(id) = matcher::selected_issue_id(&page.url, &prefix) else {
            log::debug!("no issue selected on {}", page.url);
            return Ok(Vec::new());
        };

        let Some(host) = page.url.host_str() else {
            log::debug!("page URL has no host, skipping {}", page.url);
            return Ok(Vec::new());
        };
        let host = match page.url.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_string(),
        };

        let endpoint = format!(
            "{}://{host}{prefix}/rest/api/3/issue/{id}",
            page.url.scheme()
        );
        let record = self.api.fetch_issue(&endpoint).await?;
        Ok(vec![TicketData::from_record(record, &host)])
    }
}
