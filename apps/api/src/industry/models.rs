use serde::{Deserialize, Serialize};

/// Generated market overview, shared by every user in the industry.
/// `PK=INDUSTRY#<name>`, `SK=METADATA`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IndustryInsight {
    pub pk: String,
    pub sk: String,
    /// Percent, e.g. `5.5`.
    pub growth_rate: Option<f64>,
    /// `High`, `Medium` or `Low`.
    pub demand_level: Option<String>,
    pub market_outlook: Option<String>,
    pub top_skills: Option<Vec<String>>,
    pub key_trends: Option<Vec<String>>,
    pub recommended_skills: Option<Vec<String>>,
    pub salary_ranges: Option<Vec<SalaryRange>>,
    pub last_updated: Option<String>,
    /// Stamped a week after `last_updated`; nothing reads it back yet.
    pub next_update: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SalaryRange {
    pub role: Option<String>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub median: Option<f64>,
    pub location: Option<String>,
}
