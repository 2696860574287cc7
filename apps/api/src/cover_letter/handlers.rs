use crate::cover_letter::models::CoverLetterRequest;
use crate::cover_letter::service;
use crate::dispatch::envelope::ResponseEnvelope;
use crate::dispatch::RequestContext;
use crate::errors::AppError;
use crate::state::AppState;

/// GET /cover-letters
pub async fn handle_list(
    state: &AppState,
    ctx: &RequestContext<'_>,
) -> Result<ResponseEnvelope, AppError> {
    let letters = service::list(&state.cover_letters, ctx.user_id()).await?;
    Ok(ResponseEnvelope::ok(&letters))
}

/// POST /cover-letters
pub async fn handle_create(
    state: &AppState,
    ctx: &RequestContext<'_>,
) -> Result<ResponseEnvelope, AppError> {
    let request: CoverLetterRequest = ctx.json_body("Request body is required")?;
    let letter = service::generate(
        &state.cover_letters,
        &state.users,
        state.llm.as_ref(),
        ctx.user_id(),
        request,
    )
    .await?;
    Ok(ResponseEnvelope::ok(&letter))
}

/// GET /cover-letters/{id}
pub async fn handle_get_one(
    state: &AppState,
    ctx: &RequestContext<'_>,
) -> Result<ResponseEnvelope, AppError> {
    let id = ctx.path_id()?;
    let letter = service::get_one(&state.cover_letters, ctx.user_id(), &id).await?;
    Ok(ResponseEnvelope::ok(&letter))
}

/// DELETE /cover-letters/{id}
pub async fn handle_delete(
    state: &AppState,
    ctx: &RequestContext<'_>,
) -> Result<ResponseEnvelope, AppError> {
    let id = ctx.path_id()?;
    let deleted = service::delete(&state.cover_letters, ctx.user_id(), &id).await?;
    Ok(ResponseEnvelope::ok(&deleted))
}
