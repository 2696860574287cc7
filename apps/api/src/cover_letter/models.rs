use serde::{Deserialize, Serialize};

pub const STATUS_COMPLETED: &str = "completed";

/// One generated letter. `PK=USER#<sub>`, `SK=LETTER#<uuid>`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverLetter {
    pub pk: String,
    pub sk: String,
    /// Markdown written by the generator.
    pub content: Option<String>,
    pub job_description: Option<String>,
    pub company_name: Option<String>,
    pub job_title: Option<String>,
    /// `draft` or `completed`.
    pub status: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverLetterRequest {
    pub job_title: Option<String>,
    pub company_name: Option<String>,
    pub job_description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Deleted {
    pub status: &'static str,
    pub id: String,
}
