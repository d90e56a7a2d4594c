use serde::Serialize;

use crate::convert;
use crate::domain::issue::IssueRecord;

/// Canonical ticket shape handed back to the embedding application.
#[derive(Debug, Clone, Serialize)]
pub struct TicketData {
    #[serde(rename = "type")]
    pub ticket_type: String,
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub url: String,
}

impl TicketData {
    /// Map a fetched issue record onto the canonical shape.
    ///
    /// The ticket URL is always the `/browse/` form on the given host over
    /// `https`, independent of the route the issue was viewed on and of
    /// any hosting prefix used for the fetch.
    pub fn from_record(record: IssueRecord, host: &str) -> Self {
        let description = convert::document_to_markdown(record.fields.description.as_ref());
        let url = format!("https://{host}/browse/{}", record.key);
        Self {
            ticket_type: record.fields.issuetype.name.to_lowercase(),
            id: record.key,
            title: record.fields.summary,
            description,
            url,
        }
    }
}
