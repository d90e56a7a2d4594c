//! Scan web pages for Jira issues: decide whether a page is a tracker
//! screen, resolve the selected issue and fetch it as Markdown-ready
//! ticket data.

pub mod adapter;
pub mod convert;
pub mod domain;
pub mod error;
pub mod infra;
pub mod matcher;
pub mod services;

pub use adapter::JiraAdapter;
pub use convert::{MarkdownExtensions, document_to_markdown};
pub use domain::page::{PageContext, PageDocument};
pub use domain::ticket::TicketData;
pub use error::{AppError, AppResult};
pub use infra::jira::{Credentials, JiraApiClient};
pub use services::IssueTrackerService;
