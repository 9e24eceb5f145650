//! Startup seeding of the default administrator

use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use tracing::info;

use crate::auth::password;
use crate::config::BootstrapConfig;
use crate::entity::{now, user, Role};
use crate::error::{AppError, AppResult};
use crate::repository::user as users;

/// Create the configured admin, or restore its password, role and active flag.
/// The row is updated in place since other records may reference it.
pub async fn ensure_admin(
    db: &DatabaseConnection,
    config: &BootstrapConfig,
    bcrypt_cost: u32,
) -> AppResult<user::Model> {
    let hash = password::hash_password(&config.admin_password, bcrypt_cost)
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
    let ts = now();

    let admin = match users::find_by_username(db, &config.admin_username).await? {
        Some(existing) => {
            let mut active: user::ActiveModel = existing.into();
            active.password = Set(hash);
            active.role = Set(Role::Admin);
            active.is_active = Set(true);
            active.updated_at = Set(ts);
            let admin = active.update(db).await?;
            info!("Refreshed default admin {}", admin.username);
            admin
        }
        None => {
            let admin = user::ActiveModel {
                username: Set(config.admin_username.clone()),
                email: Set(config.admin_email.clone()),
                password: Set(hash),
                code_name: Set(config.admin_code_name.clone()),
                role: Set(Role::Admin),
                phone_number: Set(config.admin_phone.clone()),
                territory: Set(Some(config.admin_territory.clone())),
                is_active: Set(true),
                created_at: Set(ts),
                updated_at: Set(ts),
                ..Default::default()
            }
            .insert(db)
            .await?;
            info!("Created default admin {}", admin.username);
            admin
        }
    };

    Ok(admin)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_db;
    use crate::service::testutil::seed_user;

    fn config() -> BootstrapConfig {
        BootstrapConfig {
            admin_username: "boss".into(),
            admin_password: "admin123".into(),
            ..BootstrapConfig::default()
        }
    }

    #[tokio::test]
    async fn test_creates_admin_once() {
        let db = test_db().await;
        let first = ensure_admin(&db, &config(), 4).await.unwrap();
        assert_eq!(first.role, Role::Admin);
        assert_eq!(first.code_name, "El Jefe");
        assert_eq!(first.territory.as_deref(), Some("Headquarters"));
        assert!(password::verify_password("admin123", &first.password));

        let second = ensure_admin(&db, &config(), 4).await.unwrap();
        assert_eq!(second.id, first.id);
    }

    #[tokio::test]
    async fn test_refreshes_existing_account() {
        let db = test_db().await;
        let existing = seed_user(&db, "boss", Role::User).await;
        crate::service::user::deactivate(&db, existing.id).await.unwrap();

        let admin = ensure_admin(&db, &config(), 4).await.unwrap();
        assert_eq!(admin.id, existing.id);
        assert_eq!(admin.role, Role::Admin);
        assert!(admin.is_active);
        assert_eq!(admin.email, existing.email);
        assert!(password::verify_password("admin123", &admin.password));
    }
}
