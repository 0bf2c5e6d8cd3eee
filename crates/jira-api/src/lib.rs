//! Typed client for the Jira Cloud REST API.
//!
//! This crate covers the small slice of the Jira REST API (v3) that the
//! MCP server exposes as tools:
//!
//! - JQL search (single page)
//! - Issue detail lookup
//! - Partial-field issue updates
//! - Workflow transitions (with optional comment)
//! - User search
//! - Assignee changes
//!
//! The [`JiraClient`] owns a [`JiraConfig`] and a connection pool; every
//! request carries the same basic-auth credential pair. Consumers that
//! want to substitute a fake (the MCP dispatcher does, for tests) go
//! through the [`IssueTracker`] trait instead of the concrete client.

pub mod client;
pub mod config;
pub mod error;
pub mod models;

pub use client::{IssueTracker, JiraClient};
pub use config::JiraConfig;
pub use error::{Error, Result};
