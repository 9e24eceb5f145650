//! Login, self-registration and profile lookup

use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use tracing::{info, warn};
use validator::Validate;

use crate::auth::{jwt, password, CurrentUser};
use crate::config::AuthConfig;
use crate::dto::auth::{AuthResponse, LoginRequest, ProfileResponse, RegisterRequest};
use crate::entity::{now, user, Role};
use crate::error::{AppError, AppResult, OptionExt};
use crate::repository::user as users;

/// Unknown users, wrong passwords and deactivated accounts get the same 401
pub async fn login(
    db: &DatabaseConnection,
    req: LoginRequest,
    config: &AuthConfig,
) -> AppResult<AuthResponse> {
    req.validate()?;

    let Some(member) = users::find_by_username(db, &req.username).await? else {
        warn!("Login failed: unknown user {}", req.username);
        return Err(AppError::InvalidCredentials);
    };
    if !password::verify_password(&req.password, &member.password) {
        warn!("Login failed: wrong password for {}", member.username);
        return Err(AppError::InvalidCredentials);
    }
    if !member.is_active {
        warn!("Login failed: {} is deactivated", member.username);
        return Err(AppError::InvalidCredentials);
    }

    let token = jwt::issue_token(&member, config)?;
    info!("{} logged in", member.username);
    Ok(AuthResponse::new(token, &member))
}

/// New accounts always start as USER
pub async fn register(
    db: &DatabaseConnection,
    req: RegisterRequest,
    config: &AuthConfig,
) -> AppResult<AuthResponse> {
    req.validate()?;

    if users::exists_by_username(db, &req.username).await? {
        return Err(AppError::BadRequest("Username is already taken!".into()));
    }
    if users::exists_by_email(db, &req.email).await? {
        return Err(AppError::BadRequest("Email is already in use!".into()));
    }

    let hash = password::hash_password(&req.password, config.bcrypt_cost)
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;

    let ts = now();
    let member = user::ActiveModel {
        username: Set(req.username),
        email: Set(req.email),
        password: Set(hash),
        code_name: Set(req.code_name),
        role: Set(Role::User),
        phone_number: Set(req.phone_number),
        territory: Set(req.territory),
        is_active: Set(true),
        created_at: Set(ts),
        updated_at: Set(ts),
        ..Default::default()
    }
    .insert(db)
    .await?;

    let token = jwt::issue_token(&member, config)?;
    info!("Registered {}", member.username);
    Ok(AuthResponse::new(token, &member))
}

pub async fn me(db: &DatabaseConnection, current: &CurrentUser) -> AppResult<ProfileResponse> {
    let member = users::find_by_id(db, current.id)
        .await?
        .ok_or_not_found(format!("User not found with id: {}", current.id))?;
    Ok(member.into())
}
