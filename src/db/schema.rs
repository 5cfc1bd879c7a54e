//! SQL DDL for the visitor table, one flavour per supported backend.

/// PostgreSQL schema:
/// - `id` BIGSERIAL PRIMARY KEY, so it decodes as `i64` like SQLite's rowid
/// - `created_at` TIMESTAMPTZ filled in by the server
pub const POSTGRES_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS visitor (
    id BIGSERIAL PRIMARY KEY,
    name VARCHAR(50) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
"#;

/// SQLite schema. `created_at` is stored as UTC text.
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS visitor (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
);
"#;
