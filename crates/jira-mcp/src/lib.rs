//! MCP server exposing Jira issue tracking as tools.
//!
//! This crate maps structured tool calls (tool name + JSON arguments)
//! onto typed [`jira_api`] operations and normalizes every outcome into a
//! textual content envelope for a model-facing consumer.
//!
//! # Architecture
//!
//! - [`catalog`] — static table of the seven tools and their input
//!   contracts
//! - [`args`] — shared coerce-or-fail argument extraction
//! - [`dispatch`] — routing, response shaping, error-to-text conversion
//! - [`server`] — rmcp handler plus the stdio and streamable-HTTP entry
//!   points
//!
//! # Tools
//!
//! - `search_issues` — JQL search
//! - `get_issue` — issue details by key or id
//! - `update_issue` — partial-field update
//! - `get_transitions` — allowed workflow moves
//! - `transition_issue` — perform a transition, optionally with a comment
//! - `get_users` — user search (for account IDs)
//! - `assign_issue` — set, clear or default the assignee

pub mod args;
pub mod catalog;
pub mod dispatch;
pub mod server;

pub use dispatch::Dispatcher;
pub use server::JiraMcpServer;
