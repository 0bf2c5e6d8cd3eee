//! Static tool catalog.
//!
//! The catalog is the single source of truth for the externally visible
//! tool contract: names, descriptions and the input-shape schema rmcp
//! advertises to clients. It is fixed for the process lifetime.

use serde_json::{json, Map, Value};

/// Primitive type a tool argument must coerce to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// A JSON string.
    String,
    /// A JSON integer.
    Integer,
    /// A JSON object.
    Object,
}

impl ParamKind {
    fn schema_type(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Object => "object",
        }
    }
}

/// One declared argument of a tool.
#[derive(Debug, Clone, Copy)]
pub struct ParamSpec {
    /// Argument name in the incoming argument bag.
    pub name: &'static str,
    /// Primitive type the value must coerce to.
    pub kind: ParamKind,
    /// Whether omitting the argument is a validation failure.
    pub required: bool,
    /// Human-readable description shown to the calling model.
    pub description: &'static str,
}

/// A named tool with its declared input contract.
#[derive(Debug, Clone, Copy)]
pub struct ToolDef {
    /// Exact tool name clients invoke.
    pub name: &'static str,
    /// Human-readable description shown to the calling model.
    pub description: &'static str,
    /// Declared arguments.
    pub params: &'static [ParamSpec],
}

impl ToolDef {
    /// Render the JSON-schema object advertised for this tool.
    #[must_use]
    pub fn input_schema(&self) -> Map<String, Value> {
        let mut properties = Map::new();
        for param in self.params {
            properties.insert(
                param.name.to_string(),
                json!({
                    "type": param.kind.schema_type(),
                    "description": param.description,
                }),
            );
        }

        let required: Vec<&str> = self
            .params
            .iter()
            .filter(|p| p.required)
            .map(|p| p.name)
            .collect();

        let mut schema = Map::new();
        schema.insert("type".to_string(), Value::String("object".to_string()));
        schema.insert("properties".to_string(), Value::Object(properties));
        schema.insert("required".to_string(), json!(required));
        schema
    }
}

/// The seven tools exposed by the server.
pub const CATALOG: &[ToolDef] = &[
    ToolDef {
        name: "search_issues",
        description: "Search JIRA issues using JQL",
        params: &[ParamSpec {
            name: "searchString",
            kind: ParamKind::String,
            required: true,
            description: "JQL search string",
        }],
    },
    ToolDef {
        name: "get_issue",
        description: "Get detailed information about a specific JIRA issue",
        params: &[ParamSpec {
            name: "issueId",
            kind: ParamKind::String,
            required: true,
            description: "The ID or key of the JIRA issue",
        }],
    },
    ToolDef {
        name: "update_issue",
        description: "Update an existing JIRA issue",
        params: &[
            ParamSpec {
                name: "issueKey",
                kind: ParamKind::String,
                required: true,
                description: "The key of the issue to update",
            },
            ParamSpec {
                name: "fields",
                kind: ParamKind::Object,
                required: true,
                description: "Fields to update on the issue",
            },
        ],
    },
    ToolDef {
        name: "get_transitions",
        description: "Get available status transitions for a JIRA issue",
        params: &[ParamSpec {
            name: "issueKey",
            kind: ParamKind::String,
            required: true,
            description: "The key of the issue",
        }],
    },
    ToolDef {
        name: "transition_issue",
        description: "Transition a JIRA issue to a new status",
        params: &[
            ParamSpec {
                name: "issueKey",
                kind: ParamKind::String,
                required: true,
                description: "The key of the issue to transition",
            },
            ParamSpec {
                name: "transitionId",
                kind: ParamKind::String,
                required: true,
                description: "The ID of the transition to perform",
            },
            ParamSpec {
                name: "comment",
                kind: ParamKind::String,
                required: false,
                description: "Comment to attach with the transition",
            },
        ],
    },
    ToolDef {
        name: "get_users",
        description: "Search JIRA users",
        params: &[
            ParamSpec {
                name: "query",
                kind: ParamKind::String,
                required: false,
                description: "Match against display name and email; empty returns all",
            },
            ParamSpec {
                name: "maxResults",
                kind: ParamKind::Integer,
                required: false,
                description: "Maximum number of users to return (default 50)",
            },
        ],
    },
    ToolDef {
        name: "assign_issue",
        description: "Assign a JIRA issue to a user",
        params: &[
            ParamSpec {
                name: "issueKey",
                kind: ParamKind::String,
                required: true,
                description: "The key of the issue to assign",
            },
            ParamSpec {
                name: "accountId",
                kind: ParamKind::String,
                required: false,
                description: "Account ID of the assignee; omit to unassign, \"-1\" for the project default",
            },
        ],
    },
];

/// Look up a tool definition by exact name.
#[must_use]
pub fn find(name: &str) -> Option<&'static ToolDef> {
    CATALOG.iter().find(|def| def.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_has_all_seven_tools() {
        let names: Vec<&str> = CATALOG.iter().map(|def| def.name).collect();
        assert_eq!(
            names,
            vec![
                "search_issues",
                "get_issue",
                "update_issue",
                "get_transitions",
                "transition_issue",
                "get_users",
                "assign_issue",
            ]
        );
    }

    #[test]
    fn find_matches_exact_names_only() {
        assert!(find("get_issue").is_some());
        assert!(find("GET_ISSUE").is_none());
        assert!(find("get_issues").is_none());
    }

    #[test]
    fn update_issue_requires_key_and_fields() {
        let def = find("update_issue").unwrap();
        let schema = def.input_schema();
        assert_eq!(schema["type"], "object");
        assert_eq!(schema["required"], serde_json::json!(["issueKey", "fields"]));
        assert_eq!(schema["properties"]["fields"]["type"], "object");
    }

    #[test]
    fn get_users_has_no_required_arguments() {
        let schema = find("get_users").unwrap().input_schema();
        assert_eq!(schema["required"], serde_json::json!([]));
        assert_eq!(schema["properties"]["maxResults"]["type"], "integer");
    }
}
