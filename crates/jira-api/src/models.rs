//! Wire models for the Jira REST API.
//!
//! These mirror the JSON shapes Jira returns. Everything is a plain value
//! record; fields Jira may omit are `Option`s, and unknown response fields
//! are ignored on decode.

use serde::{Deserialize, Serialize};

/// One page of a JQL search.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    /// Index of the first returned issue.
    #[serde(default)]
    pub start_at: u32,

    /// Page size the server applied.
    #[serde(default)]
    pub max_results: u32,

    /// Total number of matches for the query.
    #[serde(default)]
    pub total: u32,

    /// Matching issues; may be empty.
    #[serde(default)]
    pub issues: Vec<Issue>,
}

/// A Jira issue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    /// Opaque internal identifier.
    pub id: String,

    /// Human-facing key (e.g. `DEMO-123`).
    pub key: String,

    /// Canonical REST link to this issue.
    #[serde(rename = "self")]
    pub self_url: String,

    /// Requested field values.
    pub fields: Fields,
}

/// Field values of an issue. Only `summary` is always present.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fields {
    /// One-line summary.
    #[serde(default)]
    pub summary: String,

    /// Rich-text description in Atlassian Document Format.
    pub description: Option<Description>,

    /// Current workflow status.
    pub status: Option<Status>,

    /// Current assignee.
    pub assignee: Option<User>,

    /// Reporter of the issue.
    pub reporter: Option<User>,

    /// Priority.
    pub priority: Option<Priority>,

    /// Issue type (bug, task, ...).
    #[serde(rename = "issuetype")]
    pub issue_type: Option<IssueType>,

    /// Project the issue belongs to.
    pub project: Option<Project>,

    /// Creation timestamp as reported by Jira.
    pub created: Option<String>,

    /// Last-update timestamp as reported by Jira.
    pub updated: Option<String>,
}

/// Atlassian Document Format description tree.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Description {
    /// Top-level document nodes.
    #[serde(default)]
    pub content: Vec<DocNode>,

    /// Node type, `doc` at the top level.
    #[serde(rename = "type", default)]
    pub doc_type: String,
}

/// A block node inside an ADF document (paragraph, heading, ...).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocNode {
    /// Inline children.
    #[serde(default)]
    pub content: Vec<DocText>,

    /// Node type.
    #[serde(rename = "type", default)]
    pub node_type: String,
}

/// An inline text node inside an ADF block.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocText {
    /// Text content.
    #[serde(default)]
    pub text: String,

    /// Node type, usually `text`.
    #[serde(rename = "type", default)]
    pub text_type: String,
}

/// An issue workflow status.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Status {
    /// Status identifier.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Status category, when expanded.
    pub status_category: Option<StatusCategory>,
}

/// Category a status belongs to (to-do, in-progress, done).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusCategory {
    /// Category identifier.
    pub id: i64,

    /// Category key.
    pub key: String,

    /// Display name.
    pub name: String,
}

/// A Jira user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Stable account identifier used for assignment.
    pub account_id: String,

    /// Display name.
    pub display_name: String,

    /// Email, when visible to the caller.
    pub email_address: Option<String>,

    /// Canonical REST link to this user.
    #[serde(rename = "self")]
    pub self_url: String,
}

/// An issue priority.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Priority {
    /// Priority identifier.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Canonical REST link.
    #[serde(rename = "self")]
    pub self_url: String,
}

/// An issue type.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueType {
    /// Type identifier.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Canonical REST link.
    #[serde(rename = "self")]
    pub self_url: String,

    /// Type description.
    pub description: Option<String>,

    /// Icon URL.
    pub icon_url: Option<String>,
}

/// A Jira project reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    /// Project identifier.
    pub id: String,

    /// Project key.
    pub key: String,

    /// Display name.
    pub name: String,

    /// Canonical REST link.
    #[serde(rename = "self")]
    pub self_url: String,
}

/// Response envelope of `GET /issue/{id}/transitions`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransitionsResponse {
    /// Transitions allowed from the issue's current status.
    #[serde(default)]
    pub transitions: Vec<Transition>,
}

/// One allowed workflow move for an issue.
///
/// Transition ids are scoped to the issue they were fetched for; they are
/// not stable across issue types.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transition {
    /// Transition identifier.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Status the issue moves to.
    pub to: TransitionTarget,
}

/// Target status of a transition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitionTarget {
    /// Status identifier.
    pub id: String,

    /// Status display name.
    pub name: String,
}

/// Body of `POST /issue/{id}/transitions`.
///
/// When a comment is supplied it rides in the same request, so the
/// transition and the comment are applied in one transactional call.
#[derive(Debug, Clone, Serialize)]
pub struct TransitionRequest {
    /// The transition to perform.
    pub transition: TransitionRef,

    /// Optional update block carrying a comment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update: Option<TransitionUpdate>,
}

impl TransitionRequest {
    /// Build a request for `transition_id`, attaching `comment` if given.
    #[must_use]
    pub fn new(transition_id: &str, comment: Option<&str>) -> Self {
        Self {
            transition: TransitionRef {
                id: transition_id.to_string(),
            },
            update: comment.map(|body| TransitionUpdate {
                comment: vec![CommentAdd {
                    add: CommentBody {
                        body: body.to_string(),
                    },
                }],
            }),
        }
    }
}

/// Reference to a transition by id.
#[derive(Debug, Clone, Serialize)]
pub struct TransitionRef {
    /// Transition identifier.
    pub id: String,
}

/// Update block of a transition request.
#[derive(Debug, Clone, Serialize)]
pub struct TransitionUpdate {
    /// Comment operations applied with the transition.
    pub comment: Vec<CommentAdd>,
}

/// A single comment-add operation.
#[derive(Debug, Clone, Serialize)]
pub struct CommentAdd {
    /// The comment to add.
    pub add: CommentBody,
}

/// Body of a comment.
#[derive(Debug, Clone, Serialize)]
pub struct CommentBody {
    /// Comment text.
    pub body: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn search_result_decodes_with_empty_issue_list() {
        let result: SearchResult =
            serde_json::from_value(json!({"startAt": 0, "maxResults": 50, "total": 0, "issues": []}))
                .unwrap();
        assert_eq!(result.total, 0);
        assert!(result.issues.is_empty());
    }

    #[test]
    fn issue_decodes_adf_description_and_ignores_unknown_fields() {
        let issue: Issue = serde_json::from_value(json!({
            "id": "10001",
            "key": "DEMO-123",
            "self": "https://demo.atlassian.net/rest/api/3/issue/10001",
            "expand": "renderedFields",
            "fields": {
                "summary": "Fix login page",
                "description": {
                    "type": "doc",
                    "version": 1,
                    "content": [
                        {"type": "paragraph", "content": [{"type": "text", "text": "Broken on Safari"}]}
                    ]
                },
                "issuetype": {
                    "id": "10005",
                    "name": "Bug",
                    "self": "https://demo.atlassian.net/rest/api/3/issuetype/10005"
                },
                "customfield_10042": {"whatever": true}
            }
        }))
        .unwrap();

        assert_eq!(issue.key, "DEMO-123");
        let description = issue.fields.description.unwrap();
        assert_eq!(description.doc_type, "doc");
        assert_eq!(description.content[0].content[0].text, "Broken on Safari");
        assert_eq!(issue.fields.issue_type.unwrap().name, "Bug");
        assert!(issue.fields.status.is_none());
    }

    #[test]
    fn user_decodes_without_email() {
        let user: User = serde_json::from_value(json!({
            "accountId": "5b10a2844c20165700ede21g",
            "displayName": "Mia Krystof",
            "self": "https://demo.atlassian.net/rest/api/3/user?accountId=5b10a2844c20165700ede21g"
        }))
        .unwrap();
        assert_eq!(user.account_id, "5b10a2844c20165700ede21g");
        assert!(user.email_address.is_none());
    }

    #[test]
    fn transition_request_with_comment_is_one_payload() {
        let body = serde_json::to_value(TransitionRequest::new("31", Some("Moving to QA"))).unwrap();
        assert_eq!(
            body,
            json!({
                "transition": {"id": "31"},
                "update": {"comment": [{"add": {"body": "Moving to QA"}}]}
            })
        );
    }

    #[test]
    fn transition_request_without_comment_omits_update() {
        let body = serde_json::to_value(TransitionRequest::new("31", None)).unwrap();
        assert_eq!(body, json!({"transition": {"id": "31"}}));
    }
}
