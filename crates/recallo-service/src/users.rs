use recallo_db::{models::User, repositories::user as user_repo};
use uuid::Uuid;

use crate::{ServiceState, error::ServiceError, validation};

/// Create a user with empty stats.
///
/// `daily_goal_target` falls back to the configured default.
#[tracing::instrument(skip(state))]
pub async fn register_user(
    state: &ServiceState,
    username: &str,
    daily_goal_target: Option<i32>,
) -> Result<User, ServiceError> {
    validation::validate_username(username)?;
    let target = daily_goal_target.unwrap_or(state.default_daily_goal_target);
    validation::validate_daily_goal_target(target)?;

    let user_id = match user_repo::create_user(&state.pool, username, target).await {
        Ok(id) => id,
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
            return Err(ServiceError::Conflict(format!(
                "username {username} is already taken"
            )));
        }
        Err(e) => return Err(e.into()),
    };

    get_user(state, user_id).await
}

pub async fn get_user(state: &ServiceState, user_id: Uuid) -> Result<User, ServiceError> {
    user_repo::find_by_id(&state.pool, user_id)
        .await?
        .ok_or(ServiceError::NotFound("user", user_id))
}

/// Change the user's daily goal target; applies from the next goal created.
pub async fn set_daily_goal_target(
    state: &ServiceState,
    user_id: Uuid,
    target: i32,
) -> Result<(), ServiceError> {
    validation::validate_daily_goal_target(target)?;

    if !user_repo::update_daily_goal_target(&state.pool, user_id, target).await? {
        return Err(ServiceError::NotFound("user", user_id));
    }
    Ok(())
}

/// Delete a user with their schedules, goals and items. Cards they own stay,
/// without an owner.
#[tracing::instrument(skip(state))]
pub async fn delete_user(state: &ServiceState, user_id: Uuid) -> Result<(), ServiceError> {
    if user_repo::delete_user(&state.pool, user_id).await? == 0 {
        return Err(ServiceError::NotFound("user", user_id));
    }
    tracing::info!("User deleted");
    Ok(())
}
