use crate::dispatch::envelope::ResponseEnvelope;
use crate::dispatch::RequestContext;
use crate::errors::AppError;
use crate::state::AppState;
use crate::user::models::UpdateProfileRequest;
use crate::user::service;

/// GET /onboarding
pub async fn handle_check_onboarding(
    state: &AppState,
    ctx: &RequestContext<'_>,
) -> Result<ResponseEnvelope, AppError> {
    let status = service::check_onboarding(&state.users, ctx.user_id()).await?;
    Ok(ResponseEnvelope::ok(&status))
}

/// GET /profile
pub async fn handle_get_profile(
    state: &AppState,
    ctx: &RequestContext<'_>,
) -> Result<ResponseEnvelope, AppError> {
    let user = service::get_profile(&state.users, ctx.user_id()).await?;
    Ok(ResponseEnvelope::ok(&user))
}

/// POST /profile
pub async fn handle_update_profile(
    state: &AppState,
    ctx: &RequestContext<'_>,
) -> Result<ResponseEnvelope, AppError> {
    let request: UpdateProfileRequest = ctx.json_body("Request body is empty")?;
    let user = service::update_profile(&state.users, &ctx.identity, request).await?;
    Ok(ResponseEnvelope::ok(&user))
}
