use crate::dispatch::envelope::ResponseEnvelope;
use crate::dispatch::RequestContext;
use crate::errors::AppError;
use crate::industry::service;
use crate::state::AppState;

/// GET /industry-insights
pub async fn handle_get_insights(
    state: &AppState,
    ctx: &RequestContext<'_>,
) -> Result<ResponseEnvelope, AppError> {
    let insight = service::insight_for_user(
        &state.insights,
        &state.users,
        state.llm.as_ref(),
        ctx.user_id(),
    )
    .await?;
    Ok(ResponseEnvelope::ok(&insight))
}
