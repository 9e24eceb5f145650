//! Bearer token issue/verify
//!
//! Tokens are HS256-signed and carry the member's id, username and role.
//! The role is informational; the middleware reloads the user on each request.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::AuthConfig;
use crate::entity::user;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// users.id
    pub sub: i32,
    pub username: String,
    pub role: String,
    pub iat: i64,
    pub exp: i64,
    pub jti: String,
}

/// Sign a token for `user`, valid for `token_ttl_secs`
pub fn issue_token(
    user: &user::Model,
    config: &AuthConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: user.id,
        username: user.username.clone(),
        role: user.role.to_string(),
        iat: now,
        exp: now + config.token_ttl_secs as i64,
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )
}

/// Check signature and expiry, returning the embedded claims
pub fn verify_token(token: &str, config: &AuthConfig) -> Result<Claims, jsonwebtoken::errors::Error> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{now, Role};

    fn member(id: i32, role: Role) -> user::Model {
        user::Model {
            id,
            username: "ghost".into(),
            email: "ghost@x.io".into(),
            password: String::new(),
            code_name: "Ghost".into(),
            role,
            phone_number: None,
            territory: None,
            is_active: true,
            created_at: now(),
            updated_at: now(),
        }
    }

    fn config(secret: &str) -> AuthConfig {
        AuthConfig {
            jwt_secret: secret.into(),
            token_ttl_secs: 3600,
            bcrypt_cost: 4,
        }
    }

    #[test]
    fn test_issue_and_verify() {
        let cfg = config("alpha-secret");
        let token = issue_token(&member(42, Role::Boss), &cfg).unwrap();
        let claims = verify_token(&token, &cfg).unwrap();
        assert_eq!(claims.sub, 42);
        assert_eq!(claims.username, "ghost");
        assert_eq!(claims.role, "BOSS");
        assert_eq!(claims.exp - claims.iat, 3600);
        assert!(!claims.jti.is_empty());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = issue_token(&member(1, Role::User), &config("alpha-secret")).unwrap();
        assert!(verify_token(&token, &config("bravo-secret")).is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        let cfg = config("alpha-secret");
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: 1,
            username: "ghost".into(),
            role: "USER".into(),
            iat: now - 7200,
            exp: now - 3600,
            jti: Uuid::new_v4().to_string(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(cfg.jwt_secret.as_bytes()),
        )
        .unwrap();
        assert!(verify_token(&token, &cfg).is_err());
    }
}
