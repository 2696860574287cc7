use tracing::{debug, info, warn};

use crate::auth::Identity;
use crate::clock;
use crate::errors::AppError;
use crate::keys::{self, METADATA_SK};
use crate::store::Store;
use crate::user::models::{OnboardingStatus, UpdateProfileRequest, User};

pub async fn find_user(users: &Store<User>, user_id: &str) -> Result<Option<User>, AppError> {
    let pk = keys::user_partition(user_id)?;
    debug!("Fetching profile for user: {user_id}");
    Ok(users.get(&pk, &keys::fixed_sort_key(METADATA_SK)).await?)
}

/// The caller's profile, or 404 `User not found`. Used by modules that need the
/// profile as generation context.
pub async fn require_user(users: &Store<User>, user_id: &str) -> Result<User, AppError> {
    find_user(users, user_id).await?.ok_or_else(|| {
        warn!("User not found in DB: {user_id}");
        AppError::NotFound("User not found".to_string())
    })
}

/// Onboarded means an industry has been chosen.
pub async fn check_onboarding(
    users: &Store<User>,
    user_id: &str,
) -> Result<OnboardingStatus, AppError> {
    let user = require_user(users, user_id).await?;
    let status = OnboardingStatus {
        is_onboarded: user.industry_name().is_some(),
    };
    info!("User {user_id} onboarding status: {}", status.is_onboarded);
    Ok(status)
}

pub async fn get_profile(users: &Store<User>, user_id: &str) -> Result<User, AppError> {
    find_user(users, user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Profile not found".to_string()))
}

/// Read-modify-write upsert. Creates the profile (stamping `createdAt` and the token's
/// email) on first call; afterwards only the supplied fields change.
pub async fn update_profile(
    users: &Store<User>,
    identity: &Identity,
    request: UpdateProfileRequest,
) -> Result<User, AppError> {
    let user_id = identity.user_id.as_str();
    info!("Processing profile update for user: {user_id}");

    let mut user = match find_user(users, user_id).await? {
        Some(user) => user,
        None => {
            info!("No profile for {user_id}, creating one");
            if identity.email.is_none() {
                warn!("Creating new user but email is missing");
            }
            User {
                pk: keys::user_partition(user_id)?,
                sk: keys::fixed_sort_key(METADATA_SK),
                email: identity.email.clone(),
                created_at: Some(clock::now()),
                ..User::default()
            }
        }
    };

    apply_update(&mut user, request);
    user.updated_at = Some(clock::now());

    users.put(&user).await?;
    info!("Profile updated successfully for user: {user_id}");
    Ok(user)
}

fn apply_update(user: &mut User, request: UpdateProfileRequest) {
    if let Some(industry) = non_blank(request.industry) {
        user.industry = Some(industry);
    }
    if let Some(bio) = non_blank(request.bio) {
        user.bio = Some(bio);
    }
    if request.experience.is_some() {
        user.experience = request.experience;
    }
    if let Some(skills) = request.skills.filter(|skills| !skills.is_empty()) {
        user.skills = Some(skills);
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
