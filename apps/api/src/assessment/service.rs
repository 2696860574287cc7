use std::cmp::Reverse;

use tracing::{info, warn};
use uuid::Uuid;

use crate::assessment::models::{
    Assessment, QuestionResult, Quiz, QuizQuestion, SaveResultRequest, CATEGORY_TECHNICAL,
};
use crate::assessment::prompts;
use crate::clock;
use crate::errors::AppError;
use crate::keys::{self, ASSESSMENT_KIND};
use crate::llm_client::{generate_json, TextGenerator};
use crate::store::Store;
use crate::user::models::{User, FALLBACK_INDUSTRY};
use crate::user::service::require_user;

/// Asks the generator for a multiple-choice quiz tuned to the caller's industry and skills.
pub async fn generate_quiz(
    users: &Store<User>,
    llm: &dyn TextGenerator,
    user_id: &str,
) -> Result<Quiz, AppError> {
    let user = require_user(users, user_id).await?;
    let industry = user.industry_name().unwrap_or(FALLBACK_INDUSTRY);
    let skills = user.skills_list().unwrap_or_default();
    info!("Generating quiz for {industry} with skills [{skills}]");

    let quiz: Quiz = generate_json(llm, &prompts::quiz(industry, &skills)).await?;
    info!("Generated {} questions", quiz.questions.len());
    Ok(quiz)
}

/// Grades the answers, asks for an improvement tip when any are wrong, and stores the
/// attempt under a fresh `ASSESS#<uuid>`.
pub async fn save_result(
    assessments: &Store<Assessment>,
    users: &Store<User>,
    llm: &dyn TextGenerator,
    user_id: &str,
    request: SaveResultRequest,
) -> Result<Assessment, AppError> {
    let questions = request
        .questions
        .filter(|questions| !questions.is_empty())
        .ok_or_else(|| AppError::Validation("Questions list cannot be empty".to_string()))?;
    let answers = request.user_answers.unwrap_or_default();
    if answers.len() != questions.len() {
        return Err(AppError::Validation(format!(
            "Expected {} answers in 'userAnswers', got {}",
            questions.len(),
            answers.len()
        )));
    }

    let user = require_user(users, user_id).await?;

    let results = grade(&questions, answers);
    let mistakes: Vec<String> = results
        .iter()
        .filter(|r| r.is_correct == Some(false))
        .map(|r| {
            prompts::mistake(
                r.question.as_deref().unwrap_or_default(),
                r.answer.as_deref().unwrap_or_default(),
                r.user_answer.as_deref().unwrap_or_default(),
            )
        })
        .collect();

    let improvement_tip = if mistakes.is_empty() {
        None
    } else {
        let industry = user.industry_name().unwrap_or(FALLBACK_INDUSTRY);
        Some(
            llm.generate(&prompts::improvement_tip(industry, &mistakes))
                .await?,
        )
    };

    let correct = results.len() - mistakes.len();
    let quiz_score = request.score.unwrap_or_else(|| {
        warn!("No score supplied; scoring {correct}/{} server-side", results.len());
        correct as f64 * 100.0 / results.len() as f64
    });

    let now = clock::now();
    let assessment = Assessment {
        pk: keys::user_partition(user_id)?,
        sk: keys::prefixed_sort_key(ASSESSMENT_KIND, &Uuid::new_v4().to_string())?,
        quiz_score: Some(quiz_score),
        category: Some(CATEGORY_TECHNICAL.to_string()),
        improvement_tip,
        questions: Some(results),
        created_at: Some(now.clone()),
        updated_at: Some(now),
    };

    assessments.put(&assessment).await?;
    info!("Saved assessment {} for user {user_id}", assessment.sk);
    Ok(assessment)
}

/// Past attempts, newest first.
pub async fn history(
    assessments: &Store<Assessment>,
    user_id: &str,
) -> Result<Vec<Assessment>, AppError> {
    let pk = keys::user_partition(user_id)?;
    let mut found = assessments.query_kind(&pk, ASSESSMENT_KIND).await?;
    found.sort_by_key(|a| Reverse(a.created_at.clone()));
    info!("Found {} past assessments for user {user_id}", found.len());
    Ok(found)
}

/// Exact string match against the correct answer.
fn grade(questions: &[QuizQuestion], answers: Vec<String>) -> Vec<QuestionResult> {
    questions
        .iter()
        .zip(answers)
        .map(|(q, given)| QuestionResult {
            question: Some(q.question.clone()),
            answer: Some(q.correct_answer.clone()),
            is_correct: Some(q.correct_answer == given),
            user_answer: Some(given),
            explanation: Some(q.explanation.clone()),
        })
        .collect()
}
