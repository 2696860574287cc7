use serde::{Deserialize, Serialize};

/// Stand-in for prompts when the profile has no industry yet.
pub const FALLBACK_INDUSTRY: &str = "General Professional";

/// Profile record. `PK=USER#<sub>`, `SK=METADATA`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub pk: String,
    pub sk: String,
    pub email: Option<String>,
    pub name: Option<String>,
    pub image_url: Option<String>,
    /// Free-text industry name; doubles as the key of the cached industry insight.
    pub industry: Option<String>,
    pub bio: Option<String>,
    /// Years of experience.
    pub experience: Option<i32>,
    pub skills: Option<Vec<String>>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl User {
    pub fn industry_name(&self) -> Option<&str> {
        self.industry
            .as_deref()
            .map(str::trim)
            .filter(|industry| !industry.is_empty())
    }

    pub fn skills_list(&self) -> Option<String> {
        self.skills
            .as_ref()
            .filter(|skills| !skills.is_empty())
            .map(|skills| skills.join(", "))
    }
}

/// `POST /profile` body. Blank strings and empty lists leave the stored value alone.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub industry: Option<String>,
    pub bio: Option<String>,
    pub experience: Option<i32>,
    pub skills: Option<Vec<String>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingStatus {
    pub is_onboarded: bool,
}
