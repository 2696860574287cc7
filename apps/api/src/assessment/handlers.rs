use crate::assessment::models::SaveResultRequest;
use crate::assessment::service;
use crate::dispatch::envelope::ResponseEnvelope;
use crate::dispatch::RequestContext;
use crate::errors::AppError;
use crate::state::AppState;

/// POST /interview/generate
pub async fn handle_generate(
    state: &AppState,
    ctx: &RequestContext<'_>,
) -> Result<ResponseEnvelope, AppError> {
    let quiz = service::generate_quiz(&state.users, state.llm.as_ref(), ctx.user_id()).await?;
    Ok(ResponseEnvelope::ok(&quiz))
}

/// POST /interview/save
pub async fn handle_save(
    state: &AppState,
    ctx: &RequestContext<'_>,
) -> Result<ResponseEnvelope, AppError> {
    let request: SaveResultRequest = ctx.json_body("Request body is required for saving result")?;
    let saved = service::save_result(
        &state.assessments,
        &state.users,
        state.llm.as_ref(),
        ctx.user_id(),
        request,
    )
    .await?;
    Ok(ResponseEnvelope::ok(&saved))
}

/// GET /interview/history
pub async fn handle_history(
    state: &AppState,
    ctx: &RequestContext<'_>,
) -> Result<ResponseEnvelope, AppError> {
    let attempts = service::history(&state.assessments, ctx.user_id()).await?;
    Ok(ResponseEnvelope::ok(&attempts))
}
