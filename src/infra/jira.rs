use async_trait::async_trait;
use base64::prelude::{BASE64_STANDARD, Engine as _};
use reqwest::{
    Client,
    header::{ACCEPT, AUTHORIZATION, USER_AGENT},
};

use crate::domain::issue::IssueRecord;
use crate::error::{AppError, AppResult};
use crate::services::IssueTrackerService;

/// How requests against the issue API authenticate.
#[derive(Debug, Clone)]
pub enum Credentials {
    /// No Authorization header; enough for anonymously readable projects.
    Anonymous,
    /// Jira Cloud basic auth: account email plus API token.
    Basic { email: String, api_token: String },
    /// Personal access token, as issued by self-hosted instances.
    Bearer { token: String },
}

impl Credentials {
    /// Load credentials from the conventional environment variables:
    /// `JIRA_EMAIL` and `JIRA_API_TOKEN` select basic auth, `JIRA_TOKEN`
    /// alone selects a bearer token, otherwise requests are anonymous.
    pub fn from_env() -> Self {
        let email = env_var("JIRA_EMAIL");
        let api_token = env_var("JIRA_API_TOKEN");
        if let (Some(email), Some(api_token)) = (email, api_token) {
            return Self::Basic { email, api_token };
        }
        if let Some(token) = env_var("JIRA_TOKEN") {
            return Self::Bearer { token };
        }
        Self::Anonymous
    }

    fn auth_header(&self) -> Option<String> {
        match self {
            Credentials::Anonymous => None,
            Credentials::Basic { email, api_token } => {
                let credentials = format!("{email}:{api_token}");
                let encoded = BASE64_STANDARD.encode(credentials);
                Some(format!("Basic {encoded}"))
            }
            Credentials::Bearer { token } => Some(format!("Bearer {token}")),
        }
    }
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}

/// Issue tracker client over the Jira REST v3 API.
pub struct JiraApiClient {
    http: Client,
    credentials: Credentials,
}

impl JiraApiClient {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            http: Client::new(),
            credentials,
        }
    }

    pub fn from_env() -> Self {
        Self::new(Credentials::from_env())
    }
}

#[async_trait]
impl IssueTrackerService for JiraApiClient {
    async fn fetch_issue(&self, endpoint: &str) -> AppResult<IssueRecord> {
        log::debug!("fetching issue from {endpoint}");
        let mut request = self
            .http
            .get(endpoint)
            .header(ACCEPT, "application/json")
            .header(
                USER_AGENT,
                concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")),
            );
        if let Some(authorization) = self.credentials.auth_header() {
            request = request.header(AUTHORIZATION, authorization);
        }

        let response = request
            .send()
            .await
            .map_err(|err| AppError::Fetch(format!("failed to call Jira: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unable to read response>".to_string());
            return Err(AppError::Fetch(format!(
                "Jira responded with {status}: {body}"
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|err| AppError::Fetch(format!("failed to read Jira response: {err}")))?;
        let record: IssueRecord = serde_json::from_str(&body).map_err(|err| {
            AppError::MalformedRecord(format!("failed to parse Jira response: {err}"))
        })?;

        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_credentials_encode_email_and_token() {
        let credentials = Credentials::Basic {
            email: "dev@example.com".to_string(),
            api_token: "secret".to_string(),
        };
        assert_eq!(
            credentials.auth_header().as_deref(),
            Some("Basic ZGV2QGV4YW1wbGUuY29tOnNlY3JldA==")
        );
    }

    #[test]
    fn bearer_credentials_pass_the_token_through() {
        let credentials = Credentials::Bearer {
            token: "pat-123".to_string(),
        };
        assert_eq!(credentials.auth_header().as_deref(), Some("Bearer pat-123"));
    }

    #[test]
    fn anonymous_credentials_send_no_header() {
        assert_eq!(Credentials::Anonymous.auth_header(), None);
    }
}
