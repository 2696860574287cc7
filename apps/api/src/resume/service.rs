use tracing::{debug, info};

use crate::clock;
use crate::errors::AppError;
use crate::keys::{self, RESUME_SK};
use crate::llm_client::TextGenerator;
use crate::resume::models::{ImprovedContent, Resume};
use crate::resume::prompts;
use crate::store::Store;
use crate::user::models::{User, FALLBACK_INDUSTRY};
use crate::user::service::require_user;

pub async fn get_resume(resumes: &Store<Resume>, user_id: &str) -> Result<Option<Resume>, AppError> {
    debug!("Fetching resume for user: {user_id}");
    let pk = keys::user_partition(user_id)?;
    Ok(resumes.get(&pk, &keys::fixed_sort_key(RESUME_SK)).await?)
}

/// Upsert on the fixed `RESUME` sort key. `createdAt` survives every later save.
pub async fn save_resume(
    resumes: &Store<Resume>,
    user_id: &str,
    content: String,
) -> Result<Resume, AppError> {
    if content.trim().is_empty() {
        return Err(AppError::Validation(
            "Resume content cannot be empty".to_string(),
        ));
    }

    let mut resume = match get_resume(resumes, user_id).await? {
        Some(existing) => {
            info!("Updating existing resume for user: {user_id}");
            existing
        }
        None => {
            info!("Creating new resume for user: {user_id}");
            Resume {
                pk: keys::user_partition(user_id)?,
                sk: keys::fixed_sort_key(RESUME_SK),
                ..Resume::default()
            }
        }
    };

    let now = clock::now();
    resume.created_at.get_or_insert_with(|| now.clone());
    resume.content = Some(content);
    resume.updated_at = Some(now);

    resumes.put(&resume).await?;
    Ok(resume)
}

/// Rewrites one resume section for the caller's industry.
pub async fn improve_section(
    users: &Store<User>,
    llm: &dyn TextGenerator,
    user_id: &str,
    current: &str,
    section_type: &str,
) -> Result<ImprovedContent, AppError> {
    if current.is_empty() {
        return Err(AppError::Validation("Current content is required".to_string()));
    }
    if section_type.is_empty() {
        return Err(AppError::Validation("Type is required".to_string()));
    }

    let user = require_user(users, user_id).await?;
    let industry = user.industry_name().unwrap_or(FALLBACK_INDUSTRY);
    info!("Improving resume section '{section_type}' for industry '{industry}'");

    let prompt = prompts::improve_section(section_type, industry, current);
    let improved_content = llm.generate(&prompt).await?;
    Ok(ImprovedContent { improved_content })
}
