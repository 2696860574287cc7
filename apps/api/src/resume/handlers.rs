use crate::dispatch::envelope::ResponseEnvelope;
use crate::dispatch::RequestContext;
use crate::errors::AppError;
use crate::resume::models::{ImproveRequest, SaveResumeRequest};
use crate::resume::service;
use crate::state::AppState;

/// GET /resume. A user without a resume gets `null`, not a 404.
pub async fn handle_get_resume(
    state: &AppState,
    ctx: &RequestContext<'_>,
) -> Result<ResponseEnvelope, AppError> {
    let resume = service::get_resume(&state.resumes, ctx.user_id()).await?;
    Ok(ResponseEnvelope::ok(&resume))
}

/// POST /resume
pub async fn handle_save_resume(
    state: &AppState,
    ctx: &RequestContext<'_>,
) -> Result<ResponseEnvelope, AppError> {
    let request: SaveResumeRequest = ctx.json_body_or_default()?;
    let content = request
        .content
        .ok_or_else(|| AppError::Validation("Field 'content' is required".to_string()))?;
    let resume = service::save_resume(&state.resumes, ctx.user_id(), content).await?;
    Ok(ResponseEnvelope::ok(&resume))
}

/// POST /resume/improve
pub async fn handle_improve_resume(
    state: &AppState,
    ctx: &RequestContext<'_>,
) -> Result<ResponseEnvelope, AppError> {
    let request: ImproveRequest = ctx.json_body_or_default()?;
    let (Some(current), Some(section_type)) = (request.current, request.section_type) else {
        return Err(AppError::Validation(
            "Fields 'current' and 'type' are required".to_string(),
        ));
    };
    let improved = service::improve_section(
        &state.users,
        state.llm.as_ref(),
        ctx.user_id(),
        &current,
        &section_type,
    )
    .await?;
    Ok(ResponseEnvelope::ok(&improved))
}
