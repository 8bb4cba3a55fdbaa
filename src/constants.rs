// src/constants.rs
//! Domain constants that define the operational boundaries of the gateway.
//!
//! Each constant is named for the domain concept it constrains, not its
//! technical role. Reading these constants should tell you the story of
//! what the gateway serves: which columns each export carries and how
//! much it retrieves per upstream call.

/// Banner returned by the root route.
pub const SERVER_BANNER: &str = "raptor server v0.1";

// ---------------------------------------------------------------------------
// Upstream API boundaries
// ---------------------------------------------------------------------------

/// How many rows a Notion database query returns per page of results.
///
/// The Notion API maximum is 100. We request the maximum because only a
/// single page is ever retrieved; anything beyond it is reported as
/// truncation, never fetched.
pub const NOTION_API_PAGE_SIZE: usize = 100;

/// How many items a GitHub list endpoint returns per page of results.
///
/// The GitHub API maximum is 100. Like the Notion side, exactly one page
/// is retrieved per repository.
pub const GITHUB_API_PAGE_SIZE: usize = 100;

// ---------------------------------------------------------------------------
// Export column sets
// ---------------------------------------------------------------------------

/// Column order for the issue export.
///
/// This list is authoritative: fields present on a record but not listed
/// here are dropped, and listed fields missing from a record render as
/// empty cells.
pub const ISSUE_EXPORT_COLUMNS: [&str; 18] = [
    "url",
    "id",
    "number",
    "state",
    "locked",
    "title",
    "body",
    "created_at",
    "updated_at",
    "closed_at",
    "assignee",
    "assignees",
    "labels",
    "milestone",
    "repo",
    "user",
    "is_pr",
    "pr_number",
];

/// Column order for the pull-request export.
///
/// Same shape as the issue export minus the issue-only discriminators,
/// plus `merged_at`.
pub const PULL_EXPORT_COLUMNS: [&str; 17] = [
    "url",
    "id",
    "number",
    "state",
    "locked",
    "title",
    "body",
    "created_at",
    "updated_at",
    "closed_at",
    "merged_at",
    "assignee",
    "assignees",
    "labels",
    "milestone",
    "repo",
    "user",
];

/// Column order for the daily-activity query report.
pub const ACTIVITY_REPORT_COLUMNS: [&str; 2] = ["day", "results"];
