//! Authentication middleware
//!
//! Bearer-token authentication for API routes

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use sea_orm::{DatabaseConnection, EntityTrait};
use std::ops::Deref;

use crate::auth::jwt;
use crate::entity::{user, Role};
use crate::error::{AppError, AppResult};
use crate::permission::role_allowed;
use crate::state::AppState;

/// Database connection wrapper for use in handlers via Extension
#[derive(Clone)]
pub struct DbConn(pub DatabaseConnection);

impl Deref for DbConn {
    type Target = DatabaseConnection;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Extension to store current user in request
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: i32,
    pub username: String,
    pub role: Role,
}

impl CurrentUser {
    /// Reject with 403 unless the user's role is in `allowed`
    pub fn require_any(&self, allowed: &[Role]) -> AppResult<()> {
        if role_allowed(self.role, allowed) {
            Ok(())
        } else {
            tracing::warn!(
                "Access denied for {} ({}): requires one of {:?}",
                self.username,
                self.role,
                allowed
            );
            Err(AppError::Forbidden("Access denied".to_string()))
        }
    }
}

impl From<&user::Model> for CurrentUser {
    fn from(model: &user::Model) -> Self {
        Self {
            id: model.id,
            username: model.username.clone(),
            role: model.role,
        }
    }
}

/// Paths that don't require authentication
fn is_public_path(path: &str) -> bool {
    // Only API routes are authenticated
    if !path.starts_with("/api") {
        return true;
    }

    matches!(
        path,
        "/api/health" | "/api/auth/login" | "/api/auth/register"
    )
}

/// Authentication middleware
pub async fn auth_layer(
    State(state): State<AppState>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();

    // All handlers reach the database via Extension<DbConn>
    request.extensions_mut().insert(DbConn(state.db.clone()));

    if is_public_path(&path) {
        return next.run(request).await;
    }

    let Some(TypedHeader(Authorization(bearer))) = bearer else {
        return AppError::Unauthorized.into_response();
    };

    let claims = match jwt::verify_token(bearer.token(), &state.config.auth) {
        Ok(claims) => claims,
        Err(e) => {
            tracing::warn!("Rejected bearer token on {}: {}", path, e);
            return AppError::Unauthorized.into_response();
        }
    };

    // Roles and the active flag may have changed since the token was issued
    match user::Entity::find_by_id(claims.sub).one(&state.db).await {
        Ok(Some(user_model)) if user_model.is_active => {
            request
                .extensions_mut()
                .insert(CurrentUser::from(&user_model));
            next.run(request).await
        }
        Ok(Some(_)) => {
            tracing::warn!("Deactivated user presented a token: {}", claims.username);
            AppError::Unauthorized.into_response()
        }
        Ok(None) => {
            tracing::warn!("User not found in database: {}", claims.username);
            AppError::Unauthorized.into_response()
        }
        Err(e) => AppError::Database(e).into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_paths() {
        assert!(is_public_path("/api/health"));
        assert!(is_public_path("/api/auth/login"));
        assert!(is_public_path("/api/auth/register"));
        assert!(is_public_path("/favicon.ico"));
        assert!(!is_public_path("/api/auth/me"));
        assert!(!is_public_path("/api/users"));
    }

    #[test]
    fn test_require_any() {
        let lieutenant = CurrentUser {
            id: 3,
            username: "rico".into(),
            role: Role::Lieutenant,
        };
        assert!(lieutenant.require_any(&[Role::Admin, Role::Lieutenant]).is_ok());
        let err = lieutenant.require_any(&[Role::Admin, Role::Boss]).unwrap_err();
        assert!(matches!(err, AppError::Forbidden(ref m) if m == "Access denied"));
    }
}
