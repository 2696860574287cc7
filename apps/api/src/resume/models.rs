use serde::{Deserialize, Serialize};

/// The user's single resume. `PK=USER#<sub>`, `SK=RESUME`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resume {
    pub pk: String,
    pub sk: String,
    /// Markdown.
    pub content: Option<String>,
    pub ats_score: Option<f64>,
    pub feedback: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SaveResumeRequest {
    pub content: Option<String>,
}

/// `POST /resume/improve` body: one section of the resume and what kind of section it is.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImproveRequest {
    pub current: Option<String>,
    #[serde(rename = "type")]
    pub section_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImprovedContent {
    pub improved_content: String,
}
