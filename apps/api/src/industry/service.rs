use chrono::{Duration, Utc};
use tracing::{info, warn};

use crate::clock;
use crate::errors::AppError;
use crate::industry::models::IndustryInsight;
use crate::industry::prompts;
use crate::keys::{self, METADATA_SK};
use crate::llm_client::{generate_json, TextGenerator};
use crate::store::Store;
use crate::user::models::User;
use crate::user::service::require_user;

const REFRESH_INTERVAL_DAYS: i64 = 7;

/// Insight for the caller's industry. Generated and cached on first request; the
/// cached copy is returned from then on.
pub async fn insight_for_user(
    insights: &Store<IndustryInsight>,
    users: &Store<User>,
    llm: &dyn TextGenerator,
    user_id: &str,
) -> Result<IndustryInsight, AppError> {
    let user = require_user(users, user_id).await?;
    let Some(industry) = user.industry_name() else {
        warn!("User {user_id} has not selected an industry yet");
        return Err(AppError::Validation(
            "User has not selected an industry".to_string(),
        ));
    };

    let pk = keys::industry_partition(industry)?;
    let sk = keys::fixed_sort_key(METADATA_SK);
    info!("Fetching insights for industry: {industry}");

    if let Some(cached) = insights.get(&pk, &sk).await? {
        info!("Found existing insights for '{industry}'");
        return Ok(cached);
    }

    info!("No insights for '{industry}', generating");
    let mut insight: IndustryInsight = generate_json(llm, &prompts::insight(industry)).await?;

    let now = Utc::now();
    insight.pk = pk;
    insight.sk = sk;
    insight.last_updated = Some(clock::timestamp(now));
    insight.next_update = Some(clock::timestamp(now + Duration::days(REFRESH_INTERVAL_DAYS)));

    insights.put(&insight).await?;
    info!("Saved new insights for '{industry}'");
    Ok(insight)
}
