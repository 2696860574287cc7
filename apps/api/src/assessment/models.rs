use serde::{Deserialize, Serialize};

pub const CATEGORY_TECHNICAL: &str = "Technical";

/// One saved quiz attempt. `PK=USER#<sub>`, `SK=ASSESS#<uuid>`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assessment {
    pub pk: String,
    pub sk: String,
    pub quiz_score: Option<f64>,
    /// `Technical` or `Behavioral`.
    pub category: Option<String>,
    pub improvement_tip: Option<String>,
    pub questions: Option<Vec<QuestionResult>>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// A graded question as stored with the attempt.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionResult {
    pub question: Option<String>,
    /// The correct answer.
    pub answer: Option<String>,
    pub user_answer: Option<String>,
    pub is_correct: Option<bool>,
    pub explanation: Option<String>,
}

/// A multiple-choice question, as generated and as echoed back on save.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: String,
    pub explanation: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Quiz {
    pub questions: Vec<QuizQuestion>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveResultRequest {
    pub questions: Option<Vec<QuizQuestion>>,
    pub user_answers: Option<Vec<String>>,
    pub score: Option<f64>,
}
