//! Single-table key conventions.
//!
//! Every record lives in one table under a `(PK, SK)` pair:
//!
//! - `PK = "<NAMESPACE>#<id>"`, e.g. `USER#<sub>` or `INDUSTRY#<name>`
//! - `SK` is a fixed literal for singleton sub-records (`METADATA`, `RESUME`) or
//!   `"<KIND>#<uuid>"` for append-only collections (`LETTER#..`, `ASSESS#..`).
//!
//! All records owned by a user share the user's partition; the sort-key prefix tells
//! the kinds apart during a partition query.

use thiserror::Error;

/// Separator between a namespace/kind and its identifier.
pub const SEPARATOR: char = '#';

pub const USER_NAMESPACE: &str = "USER";
pub const INDUSTRY_NAMESPACE: &str = "INDUSTRY";

pub const METADATA_SK: &str = "METADATA";
pub const RESUME_SK: &str = "RESUME";

pub const LETTER_KIND: &str = "LETTER";
pub const ASSESSMENT_KIND: &str = "ASSESS";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeyError {
    #[error("{namespace} id cannot be empty")]
    EmptyId { namespace: String },
}

/// `"<namespace>#<id>"`. Rejects an empty id.
pub fn partition_key_for(namespace: &str, id: &str) -> Result<String, KeyError> {
    if id.is_empty() {
        return Err(KeyError::EmptyId {
            namespace: namespace.to_string(),
        });
    }
    Ok(format!("{namespace}{SEPARATOR}{id}"))
}

/// Fixed sort key for a singleton sub-record.
pub fn fixed_sort_key(name: &'static str) -> String {
    name.to_string()
}

/// `"<kind>#<id>"`. Rejects an empty id.
pub fn prefixed_sort_key(kind: &str, id: &str) -> Result<String, KeyError> {
    if id.is_empty() {
        return Err(KeyError::EmptyId {
            namespace: kind.to_string(),
        });
    }
    Ok(format!("{kind}{SEPARATOR}{id}"))
}

/// True when `sort_key` is `"<kind>#..."`. A bare `kind` with no separator does not match.
pub fn has_prefix(sort_key: &str, kind: &str) -> bool {
    sort_key
        .strip_prefix(kind)
        .is_some_and(|rest| rest.starts_with(SEPARATOR))
}

/// Partition key for everything owned by a user.
pub fn user_partition(user_id: &str) -> Result<String, KeyError> {
    partition_key_for(USER_NAMESPACE, user_id)
}

/// Partition key for a cached industry insight.
pub fn industry_partition(industry: &str) -> Result<String, KeyError> {
    partition_key_for(INDUSTRY_NAMESPACE, industry)
}
