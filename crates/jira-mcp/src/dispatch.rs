//! Tool dispatch.
//!
//! Routes a (tool name, argument bag) pair to the matching
//! [`IssueTracker`] operation and normalizes the outcome into a content
//! envelope. Per invocation the flow is: resolve the tool, extract and
//! coerce its declared arguments, call the tracker, shape the result.
//!
//! Nothing escapes this boundary as an error except an unroutable tool
//! name. Validation failures and remote failures both come back as
//! successful envelopes whose text describes the problem, so the calling
//! model always receives something it can read and react to.

use crate::args::{
    flatten_fields, optional_str, optional_u32, required_object, required_str, ArgError, ArgMap,
};
use jira_api::client::DEFAULT_MAX_RESULTS;
use jira_api::IssueTracker;
use rmcp::model::{CallToolResult, Content};
use rmcp::ErrorData as McpError;
use serde::Serialize;
use std::sync::Arc;
use tracing::error;

/// Fixed reply for a JQL query matching nothing.
pub const NO_ISSUES_FOUND: &str = "No issues found";

/// Routes tool calls to the issue tracker.
///
/// Stateless apart from the shared read-only tracker handle; every
/// invocation is independent.
#[derive(Clone)]
pub struct Dispatcher {
    tracker: Arc<dyn IssueTracker>,
}

impl Dispatcher {
    /// Create a dispatcher over the given tracker.
    #[must_use]
    pub fn new(tracker: Arc<dyn IssueTracker>) -> Self {
        Self { tracker }
    }

    /// Dispatch one tool call.
    ///
    /// # Errors
    ///
    /// Only an unknown tool name surfaces as a protocol error; every
    /// other failure is reported inside the returned envelope.
    pub async fn dispatch(&self, name: &str, args: &ArgMap) -> Result<CallToolResult, McpError> {
        match name {
            "search_issues" => Ok(self.search_issues(args).await),
            "get_issue" => Ok(self.get_issue(args).await),
            "update_issue" => Ok(self.update_issue(args).await),
            "get_transitions" => Ok(self.get_transitions(args).await),
            "transition_issue" => Ok(self.transition_issue(args).await),
            "get_users" => Ok(self.get_users(args).await),
            "assign_issue" => Ok(self.assign_issue(args).await),
            _ => Err(McpError::invalid_params(
                format!("unknown tool: {name}"),
                None,
            )),
        }
    }

    async fn search_issues(&self, args: &ArgMap) -> CallToolResult {
        let jql = match required_str(args, "searchString") {
            Ok(jql) => jql,
            Err(e) => return validation_failure(&e),
        };

        match self.tracker.search(jql).await {
            Ok(result) if result.issues.is_empty() => text(NO_ISSUES_FOUND),
            Ok(result) => {
                let mut content = Vec::with_capacity(result.issues.len());
                for issue in &result.issues {
                    match json_text(issue) {
                        Ok(rendered) => content.push(Content::text(rendered)),
                        Err(response) => return response,
                    }
                }
                CallToolResult::success(content)
            }
            Err(e) => {
                error!(error = %e, jql, "issue search failed");
                text("Failed to search issues.")
            }
        }
    }

    async fn get_issue(&self, args: &ArgMap) -> CallToolResult {
        let issue_id = match required_str(args, "issueId") {
            Ok(id) => id,
            Err(e) => return validation_failure(&e),
        };

        match self.tracker.issue(issue_id).await {
            Ok(issue) => match json_text(&issue) {
                Ok(rendered) => text(rendered),
                Err(response) => response,
            },
            Err(e) => {
                error!(error = %e, issue = issue_id, "failed to get issue details");
                text("Cannot get issue details")
            }
        }
    }

    async fn update_issue(&self, args: &ArgMap) -> CallToolResult {
        let issue_key = match required_str(args, "issueKey") {
            Ok(key) => key,
            Err(e) => return validation_failure(&e),
        };
        let fields = match required_object(args, "fields") {
            Ok(fields) => fields,
            Err(e) => return validation_failure(&e),
        };

        match self.tracker.update(issue_key, flatten_fields(fields)).await {
            Ok(()) => text(format!("Issue {issue_key} updated successfully.")),
            Err(e) => {
                error!(error = %e, issue = issue_key, "failed to update issue");
                text(format!("Failed to update issue {issue_key}."))
            }
        }
    }

    async fn get_transitions(&self, args: &ArgMap) -> CallToolResult {
        let issue_key = match required_str(args, "issueKey") {
            Ok(key) => key,
            Err(e) => return validation_failure(&e),
        };

        match self.tracker.transitions(issue_key).await {
            Ok(transitions) => match json_text(&transitions) {
                Ok(rendered) => text(rendered),
                Err(response) => response,
            },
            Err(e) => {
                error!(error = %e, issue = issue_key, "failed to get transitions");
                text(format!("Failed to get transitions for issue {issue_key}."))
            }
        }
    }

    async fn transition_issue(&self, args: &ArgMap) -> CallToolResult {
        let issue_key = match required_str(args, "issueKey") {
            Ok(key) => key,
            Err(e) => return validation_failure(&e),
        };
        let transition_id = match required_str(args, "transitionId") {
            Ok(id) => id,
            Err(e) => return validation_failure(&e),
        };
        let comment = match optional_str(args, "comment") {
            Ok(comment) => comment,
            Err(e) => return validation_failure(&e),
        };

        match self
            .tracker
            .transition(issue_key, transition_id, comment)
            .await
        {
            Ok(()) => text(format!("Issue {issue_key} transitioned successfully.")),
            Err(e) => {
                error!(error = %e, issue = issue_key, transition = transition_id, "failed to transition issue");
                text(format!("Failed to transition issue {issue_key}."))
            }
        }
    }

    async fn get_users(&self, args: &ArgMap) -> CallToolResult {
        let query = match optional_str(args, "query") {
            Ok(query) => query.unwrap_or(""),
            Err(e) => return validation_failure(&e),
        };
        let max_results = match optional_u32(args, "maxResults") {
            Ok(max) => max.unwrap_or(DEFAULT_MAX_RESULTS),
            Err(e) => return validation_failure(&e),
        };

        match self.tracker.users(query, max_results).await {
            Ok(users) => match json_text(&users) {
                Ok(rendered) => text(rendered),
                Err(response) => response,
            },
            Err(e) => {
                error!(error = %e, query, "failed to search users");
                text("Failed to search users.")
            }
        }
    }

    async fn assign_issue(&self, args: &ArgMap) -> CallToolResult {
        let issue_key = match required_str(args, "issueKey") {
            Ok(key) => key,
            Err(e) => return validation_failure(&e),
        };
        let account_id = match optional_str(args, "accountId") {
            Ok(account_id) => account_id,
            Err(e) => return validation_failure(&e),
        };

        match self.tracker.assign(issue_key, account_id).await {
            Ok(()) => match account_id {
                Some(_) => text(format!("Issue {issue_key} assigned successfully.")),
                None => text(format!("Issue {issue_key} unassigned successfully.")),
            },
            Err(e) => {
                error!(error = %e, issue = issue_key, "failed to assign issue");
                text(format!("Failed to assign issue {issue_key}."))
            }
        }
    }
}

fn text(message: impl Into<String>) -> CallToolResult {
    CallToolResult::success(vec![Content::text(message.into())])
}

fn validation_failure(error: &ArgError) -> CallToolResult {
    text(error.to_string())
}

// Serialization of our own wire models cannot realistically fail, but the
// failure still has to stay inside the envelope if it ever does.
fn json_text<T: Serialize>(value: &T) -> Result<String, CallToolResult> {
    serde_json::to_string(value).map_err(|e| {
        error!(error = %e, "failed to serialize tool response");
        text("Failed to serialize response.")
    })
}
