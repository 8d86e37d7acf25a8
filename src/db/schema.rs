//! SQL DDL for the favorites table.

/// One row per favorite; `owner` is stored as a JSON document.
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS github_repository (
    id INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL,
    name TEXT NULL,
    owner TEXT NULL, -- JSON: {"avatar_url": .., "html_url": ..}
    language TEXT NULL,
    stargazers_count INTEGER NULL,
    watchers_count INTEGER NULL,
    forks_count INTEGER NULL,
    open_issues_count INTEGER NULL
);
"#;
