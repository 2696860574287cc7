use tracing::info;
use uuid::Uuid;

use crate::clock;
use crate::cover_letter::models::{CoverLetter, CoverLetterRequest, Deleted, STATUS_COMPLETED};
use crate::cover_letter::prompts;
use crate::errors::AppError;
use crate::keys::{self, LETTER_KIND};
use crate::llm_client::TextGenerator;
use crate::store::Store;
use crate::user::models::User;
use crate::user::service::require_user;

const MISSING_FIELDS: &str = "Missing required fields (jobTitle, companyName, jobDescription)";

/// Drafts a letter from the caller's profile and the job posting, then stores it
/// under a fresh `LETTER#<uuid>`.
pub async fn generate(
    letters: &Store<CoverLetter>,
    users: &Store<User>,
    llm: &dyn TextGenerator,
    user_id: &str,
    request: CoverLetterRequest,
) -> Result<CoverLetter, AppError> {
    let (Some(job_title), Some(company_name), Some(job_description)) =
        (request.job_title, request.company_name, request.job_description)
    else {
        return Err(AppError::Validation(MISSING_FIELDS.to_string()));
    };

    let user = require_user(users, user_id).await?;
    let prompt = prompts::cover_letter(&user, &job_title, &company_name, &job_description);
    let content = llm.generate(&prompt).await?;

    let letter_id = Uuid::new_v4().to_string();
    let now = clock::now();
    let letter = CoverLetter {
        pk: keys::user_partition(user_id)?,
        sk: keys::prefixed_sort_key(LETTER_KIND, &letter_id)?,
        content: Some(content),
        job_description: Some(job_description),
        company_name: Some(company_name),
        job_title: Some(job_title),
        status: Some(STATUS_COMPLETED.to_string()),
        created_at: Some(now.clone()),
        updated_at: Some(now),
    };

    letters.put(&letter).await?;
    info!("Generated cover letter {letter_id} for user {user_id}");
    Ok(letter)
}

pub async fn list(letters: &Store<CoverLetter>, user_id: &str) -> Result<Vec<CoverLetter>, AppError> {
    let pk = keys::user_partition(user_id)?;
    let found = letters.query_kind(&pk, LETTER_KIND).await?;
    info!("Found {} cover letters for user {user_id}", found.len());
    Ok(found)
}

pub async fn get_one(
    letters: &Store<CoverLetter>,
    user_id: &str,
    letter_id: &str,
) -> Result<CoverLetter, AppError> {
    let pk = keys::user_partition(user_id)?;
    let sk = keys::prefixed_sort_key(LETTER_KIND, letter_id)?;
    letters
        .get(&pk, &sk)
        .await?
        .ok_or_else(|| AppError::NotFound("Cover letter not found".to_string()))
}

/// Deleting an absent letter is still a success.
pub async fn delete(
    letters: &Store<CoverLetter>,
    user_id: &str,
    letter_id: &str,
) -> Result<Deleted, AppError> {
    let pk = keys::user_partition(user_id)?;
    let sk = keys::prefixed_sort_key(LETTER_KIND, letter_id)?;
    let previous = letters.delete(&pk, &sk).await?;
    info!(
        "Deleted cover letter {letter_id} for user {user_id} (existed: {})",
        previous.is_some()
    );
    Ok(Deleted {
        status: "deleted",
        id: letter_id.to_string(),
    })
}
