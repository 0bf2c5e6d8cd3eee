//! HTTP client for the Jira REST API.

use crate::config::JiraConfig;
use crate::error::{Error, Result};
use crate::models::{Issue, SearchResult, Transition, TransitionRequest, TransitionsResponse, User};
use async_trait::async_trait;
use base64::Engine;
use reqwest::{header, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::{json, Map, Value};
use tracing::debug;

/// Fields requested by default for JQL searches.
pub const DEFAULT_SEARCH_FIELDS: &[&str] =
    &["summary", "status", "assignee", "reporter", "description"];

/// Fields requested by default for single-issue lookups.
pub const DEFAULT_ISSUE_FIELDS: &[&str] = &[
    "summary",
    "status",
    "assignee",
    "reporter",
    "description",
    "priority",
    "issuetype",
    "project",
    "created",
    "updated",
];

/// Default page size for searches.
pub const DEFAULT_MAX_RESULTS: u32 = 50;

/// The seven remote operations the MCP dispatcher routes to.
///
/// [`JiraClient`] is the live implementation; tests substitute a recording
/// fake. Defaults (field sets, page sizes) are applied inside the
/// implementation so callers only supply what their tool contract carries.
#[async_trait]
pub trait IssueTracker: Send + Sync {
    /// Search issues with a JQL query, returning the first page.
    async fn search(&self, jql: &str) -> Result<SearchResult>;

    /// Fetch one issue by key or id.
    async fn issue(&self, issue_id_or_key: &str) -> Result<Issue>;

    /// Apply a partial-field update to an issue.
    async fn update(&self, issue_id_or_key: &str, fields: Map<String, Value>) -> Result<()>;

    /// List the transitions allowed from the issue's current status.
    async fn transitions(&self, issue_id_or_key: &str) -> Result<Vec<Transition>>;

    /// Perform a transition, optionally attaching a comment in the same call.
    async fn transition(
        &self,
        issue_id_or_key: &str,
        transition_id: &str,
        comment: Option<&str>,
    ) -> Result<()>;

    /// Search users. An empty query returns an unfiltered page.
    async fn users(&self, query: &str, max_results: u32) -> Result<Vec<User>>;

    /// Assign an issue. `None` unassigns; the literal `"-1"` selects the
    /// project default assignee. Both are forwarded exactly as given.
    async fn assign(&self, issue_id_or_key: &str, account_id: Option<&str>) -> Result<()>;
}

/// Client for the Jira Cloud REST API (v3).
///
/// Holds the connection pool and the pre-computed basic-auth header; safe
/// to share across concurrent tool invocations.
pub struct JiraClient {
    http: reqwest::Client,
    config: JiraConfig,
    auth: String,
}

impl JiraClient {
    /// Create a client from a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] if the underlying connection pool cannot be
    /// constructed.
    pub fn new(config: JiraConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        let auth = basic_auth_header(&config.email, &config.api_token);
        Ok(Self { http, config, auth })
    }

    /// Search issues with a JQL query.
    ///
    /// Zero matches is not an error; the returned page simply has an empty
    /// issue list.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Api`] on a non-success status and [`Error::Http`]
    /// on network failure.
    pub async fn search_issues(
        &self,
        jql: &str,
        start_at: u32,
        max_results: u32,
        fields: &[&str],
    ) -> Result<SearchResult> {
        debug!(jql, "searching issues");
        let response = self
            .post(&format!("{}/search", self.config.api_root()))
            .json(&search_body(jql, start_at, max_results, fields))
            .send()
            .await?;
        decode(response, None).await
    }

    /// Fetch the details of one issue by key or id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] when the identifier does not resolve,
    /// [`Error::Api`] on any other non-success status.
    pub async fn get_issue_details(&self, issue_id_or_key: &str, fields: &[&str]) -> Result<Issue> {
        debug!(issue = issue_id_or_key, "fetching issue details");
        let response = self
            .get(&format!(
                "{}/issue/{issue_id_or_key}",
                self.config.api_root()
            ))
            .query(&[("fields", fields.join(","))])
            .send()
            .await?;
        decode(response, Some(issue_id_or_key)).await
    }

    /// Update an issue. Only the supplied keys are modified server-side.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Api`] if Jira rejects the payload.
    pub async fn update_issue(
        &self,
        issue_id_or_key: &str,
        fields: &Map<String, Value>,
    ) -> Result<()> {
        debug!(issue = issue_id_or_key, "updating issue");
        let response = self
            .put(&format!(
                "{}/issue/{issue_id_or_key}",
                self.config.api_root()
            ))
            .json(&json!({ "fields": fields }))
            .send()
            .await?;
        expect_success(response, None).await?;
        Ok(())
    }

    /// List the transitions allowed from the issue's current status.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Api`] on a non-success status.
    pub async fn get_transitions(&self, issue_id_or_key: &str) -> Result<Vec<Transition>> {
        debug!(issue = issue_id_or_key, "fetching transitions");
        let response = self
            .get(&format!(
                "{}/issue/{issue_id_or_key}/transitions",
                self.config.api_root()
            ))
            .send()
            .await?;
        let envelope: TransitionsResponse = decode(response, Some(issue_id_or_key)).await?;
        Ok(envelope.transitions)
    }

    /// Perform a transition, attaching `comment` in the same request when
    /// supplied.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Api`] if the transition id is not valid for the
    /// issue's current state.
    pub async fn transition_issue(
        &self,
        issue_id_or_key: &str,
        transition_id: &str,
        comment: Option<&str>,
    ) -> Result<()> {
        debug!(
            issue = issue_id_or_key,
            transition = transition_id,
            "performing transition"
        );
        let response = self
            .post(&format!(
                "{}/issue/{issue_id_or_key}/transitions",
                self.config.api_root()
            ))
            .json(&TransitionRequest::new(transition_id, comment))
            .send()
            .await?;
        expect_success(response, None).await?;
        Ok(())
    }

    /// Search users. An empty query returns a tracker-default-ordered page.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Api`] on a non-success status.
    pub async fn search_users(&self, query: &str, max_results: u32) -> Result<Vec<User>> {
        debug!(query, "searching users");
        let max_results = max_results.to_string();
        let response = self
            .get(&format!("{}/user/search", self.config.api_root()))
            .query(&[("query", query), ("maxResults", max_results.as_str())])
            .send()
            .await?;
        decode(response, None).await
    }

    /// Set or clear the assignee of an issue.
    ///
    /// `None` serializes as JSON null (unassign); `"-1"` is forwarded
    /// literally and selects the project default assignee.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Api`] on a non-success status.
    pub async fn assign_issue(
        &self,
        issue_id_or_key: &str,
        account_id: Option<&str>,
    ) -> Result<()> {
        debug!(issue = issue_id_or_key, "assigning issue");
        let response = self
            .put(&format!(
                "{}/issue/{issue_id_or_key}/assignee",
                self.config.api_root()
            ))
            .json(&json!({ "accountId": account_id }))
            .send()
            .await?;
        expect_success(response, Some(issue_id_or_key)).await?;
        Ok(())
    }

    fn get(&self, url: &str) -> reqwest::RequestBuilder {
        self.decorate(self.http.get(url))
    }

    fn post(&self, url: &str) -> reqwest::RequestBuilder {
        self.decorate(self.http.post(url))
    }

    fn put(&self, url: &str) -> reqwest::RequestBuilder {
        self.decorate(self.http.put(url))
    }

    // Auth is attached to every request up front, not in answer to a 401.
    fn decorate(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder
            .header(header::AUTHORIZATION, &self.auth)
            .header(header::ACCEPT, "application/json")
    }
}

#[async_trait]
impl IssueTracker for JiraClient {
    async fn search(&self, jql: &str) -> Result<SearchResult> {
        self.search_issues(jql, 0, DEFAULT_MAX_RESULTS, DEFAULT_SEARCH_FIELDS)
            .await
    }

    async fn issue(&self, issue_id_or_key: &str) -> Result<Issue> {
        self.get_issue_details(issue_id_or_key, DEFAULT_ISSUE_FIELDS)
            .await
    }

    async fn update(&self, issue_id_or_key: &str, fields: Map<String, Value>) -> Result<()> {
        self.update_issue(issue_id_or_key, &fields).await
    }

    async fn transitions(&self, issue_id_or_key: &str) -> Result<Vec<Transition>> {
        self.get_transitions(issue_id_or_key).await
    }

    async fn transition(
        &self,
        issue_id_or_key: &str,
        transition_id: &str,
        comment: Option<&str>,
    ) -> Result<()> {
        self.transition_issue(issue_id_or_key, transition_id, comment)
            .await
    }

    async fn users(&self, query: &str, max_results: u32) -> Result<Vec<User>> {
        self.search_users(query, max_results).await
    }

    async fn assign(&self, issue_id_or_key: &str, account_id: Option<&str>) -> Result<()> {
        self.assign_issue(issue_id_or_key, account_id).await
    }
}

fn basic_auth_header(email: &str, api_token: &str) -> String {
    let credentials = format!("{email}:{api_token}");
    format!(
        "Basic {}",
        base64::engine::general_purpose::STANDARD.encode(credentials)
    )
}

fn search_body(jql: &str, start_at: u32, max_results: u32, fields: &[&str]) -> Value {
    json!({
        "jql": jql,
        "startAt": start_at,
        "maxResults": max_results,
        "fields": fields,
    })
}

/// Map a non-success response to the error taxonomy.
///
/// A 404 becomes [`Error::NotFound`] when the caller was addressing a
/// specific resource; everything else non-2xx becomes [`Error::Api`] with
/// the response body attached for the logs.
async fn expect_success(response: Response, not_found: Option<&str>) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if status == StatusCode::NOT_FOUND
        && let Some(target) = not_found
    {
        return Err(Error::NotFound(target.to_string()));
    }
    let body = response.text().await.unwrap_or_default();
    Err(Error::Api { status, body })
}

async fn decode<T: DeserializeOwned>(response: Response, not_found: Option<&str>) -> Result<T> {
    let response = expect_success(response, not_found).await?;
    Ok(response.json().await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_auth_header_encodes_email_and_token() {
        // base64("me@example.com:secret")
        assert_eq!(
            basic_auth_header("me@example.com", "secret"),
            "Basic bWVAZXhhbXBsZS5jb206c2VjcmV0"
        );
    }

    #[test]
    fn search_body_carries_paging_and_fields() {
        let body = search_body("project = DEMO", 10, 25, &["summary", "status"]);
        assert_eq!(
            body,
            json!({
                "jql": "project = DEMO",
                "startAt": 10,
                "maxResults": 25,
                "fields": ["summary", "status"],
            })
        );
    }

    #[test]
    fn default_field_sets_match_the_tool_contract() {
        assert_eq!(DEFAULT_SEARCH_FIELDS.len(), 5);
        assert!(DEFAULT_ISSUE_FIELDS.contains(&"issuetype"));
        assert!(DEFAULT_ISSUE_FIELDS.contains(&"project"));
    }

    #[test]
    fn client_construction_does_not_touch_the_network() {
        let config = JiraConfig::new("https://demo.atlassian.net", "me@example.com", "token");
        let client = JiraClient::new(config).unwrap();
        assert!(client.auth.starts_with("Basic "));
    }
}
