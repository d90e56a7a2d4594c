use async_trait::async_trait;

use crate::domain::issue::IssueRecord;
use crate::error::AppResult;

/// Fetches one issue from a fully formed endpoint URL. The caller builds
/// the URL because it depends on the page being scanned (scheme, host and
/// hosting prefix).
#[async_trait]
pub trait IssueTrackerService: Send + Sync {
    async fn fetch_issue(&self, endpoint: &str) -> AppResult<IssueRecord>;
}
