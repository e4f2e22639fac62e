//! `SQLite` schema definitions for travelform.
//!
//! The store mirrors browser local storage: a flat table of string keys
//! mapping to string values, plus a metadata table for the schema version.

/// SQL statement to create the key/value table.
pub const CREATE_LOCAL_STORAGE_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS local_storage (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL,
    updated_at TEXT NOT NULL
)
";

/// SQL statement to create the metadata table for storing key-value pairs.
pub const CREATE_METADATA_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS metadata (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
)
";

/// Statements applied by each schema version, indexed by `version - 1`.
pub const VERSIONED_STATEMENTS: &[&[&str]] = &[&[CREATE_LOCAL_STORAGE_TABLE]];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_versioned_statements_not_empty() {
        assert!(!VERSIONED_STATEMENTS.is_empty());
        for version in VERSIONED_STATEMENTS {
            assert!(!version.is_empty());
            for stmt in *version {
                assert!(!stmt.trim().is_empty());
            }
        }
    }

    #[test]
    fn test_create_local_storage_table_columns() {
        assert!(CREATE_LOCAL_STORAGE_TABLE.contains("key TEXT PRIMARY KEY"));
        assert!(CREATE_LOCAL_STORAGE_TABLE.contains("value TEXT NOT NULL"));
        assert!(CREATE_LOCAL_STORAGE_TABLE.contains("updated_at TEXT NOT NULL"));
    }

    #[test]
    fn test_create_metadata_table_structure() {
        assert!(CREATE_METADATA_TABLE.contains("key TEXT PRIMARY KEY"));
        assert!(CREATE_METADATA_TABLE.contains("value TEXT NOT NULL"));
    }
}
