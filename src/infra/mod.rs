pub mod jira;

pub use jira::{Credentials, JiraApiClient};
