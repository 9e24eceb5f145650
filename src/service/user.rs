//! Member management

use sea_orm::{ActiveModelTrait, DatabaseConnection, Order, Set};
use tracing::info;
use validator::Validate;

use crate::auth::password;
use crate::dto::user::{UserCreateRequest, UserResponse, UserUpdateRequest};
use crate::dto::Page;
use crate::entity::{now, user, Role};
use crate::error::{AppError, AppResult, OptionExt};
use crate::repository::{self, user as users, PageParams};

pub async fn create(
    db: &DatabaseConnection,
    req: UserCreateRequest,
    bcrypt_cost: u32,
) -> AppResult<UserResponse> {
    req.validate()?;

    if users::exists_by_username(db, &req.username).await? {
        return Err(AppError::BadRequest("Username already exists".into()));
    }
    if users::exists_by_email(db, &req.email).await? {
        return Err(AppError::BadRequest("Email already exists".into()));
    }

    let hash = password::hash_password(&req.password, bcrypt_cost)
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;

    let ts = now();
    let model = user::ActiveModel {
        username: Set(req.username),
        email: Set(req.email),
        password: Set(hash),
        code_name: Set(req.code_name),
        role: Set(req.role.unwrap_or(Role::User)),
        phone_number: Set(req.phone_number),
        territory: Set(req.territory),
        is_active: Set(true),
        created_at: Set(ts),
        updated_at: Set(ts),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!("Created user {} with role {}", model.username, model.role);
    Ok(model.into())
}

/// Load the row or fail with the standard not-found message
pub async fn find_model(db: &DatabaseConnection, id: i32) -> AppResult<user::Model> {
    users::find_by_id(db, id)
        .await?
        .ok_or_not_found(format!("User not found with id: {}", id))
}

pub async fn get(db: &DatabaseConnection, id: i32) -> AppResult<UserResponse> {
    Ok(find_model(db, id).await?.into())
}

pub async fn list_active(db: &DatabaseConnection, params: &PageParams) -> AppResult<Page<UserResponse>> {
    let page =
        repository::paginate(db, users::active(), params, user::Column::Username, Order::Asc).await?;
    Ok(page.map(UserResponse::from))
}

pub async fn list_by_role(
    db: &DatabaseConnection,
    role: Role,
    params: &PageParams,
) -> AppResult<Page<UserResponse>> {
    let page = repository::paginate(
        db,
        users::active_with_role(role),
        params,
        user::Column::Id,
        Order::Asc,
    )
    .await?;
    Ok(page.map(UserResponse::from))
}

pub async fn list_by_territory(
    db: &DatabaseConnection,
    territory: &str,
) -> AppResult<Vec<UserResponse>> {
    let found = users::find_active_by_territory(db, territory).await?;
    Ok(found.into_iter().map(UserResponse::from).collect())
}

pub async fn search_by_code_name(
    db: &DatabaseConnection,
    code_name: &str,
    params: &PageParams,
) -> AppResult<Page<UserResponse>> {
    let page = repository::paginate(
        db,
        users::active_code_name_containing(code_name),
        params,
        user::Column::Id,
        Order::Asc,
    )
    .await?;
    Ok(page.map(UserResponse::from))
}

/// Only fields present in `req` are written
pub async fn update(
    db: &DatabaseConnection,
    id: i32,
    req: UserUpdateRequest,
) -> AppResult<UserResponse> {
    req.validate()?;
    let existing = find_model(db, id).await?;

    if let Some(email) = &req.email {
        if *email != existing.email && users::exists_by_email(db, email).await? {
            return Err(AppError::BadRequest("Email already exists".into()));
        }
    }

    let mut active: user::ActiveModel = existing.into();
    if let Some(email) = req.email {
        active.email = Set(email);
    }
    if let Some(code_name) = req.code_name {
        active.code_name = Set(code_name);
    }
    if let Some(role) = req.role {
        active.role = Set(role);
    }
    if let Some(phone) = req.phone_number {
        active.phone_number = Set(Some(phone));
    }
    if let Some(territory) = req.territory {
        active.territory = Set(Some(territory));
    }
    if let Some(is_active) = req.is_active {
        active.is_active = Set(is_active);
    }
    active.updated_at = Set(now());

    let model = active.update(db).await?;
    info!("Updated user {}", model.username);
    Ok(model.into())
}

/// Soft delete
pub async fn deactivate(db: &DatabaseConnection, id: i32) -> AppResult<()> {
    let existing = find_model(db, id).await?;
    let username = existing.username.clone();

    let mut active: user::ActiveModel = existing.into();
    active.is_active = Set(false);
    active.updated_at = Set(now());
    active.update(db).await?;

    info!("Deactivated user {}", username);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_db;
    use crate::service::testutil::{seed_user, user_request};

    #[tokio::test]
    async fn test_create_hashes_password_and_defaults_role() {
        let db = test_db().await;
        let created = create(&db, user_request("ghost", "ghost@x.com"), 4).await.unwrap();
        assert_eq!(created.role, Role::User);
        assert!(created.is_active);

        let stored = find_model(&db, created.id).await.unwrap();
        assert_ne!(stored.password, "secret1");
        assert!(password::verify_password("secret1", &stored.password));
    }

    #[tokio::test]
    async fn test_duplicate_username_and_email_rejected() {
        let db = test_db().await;
        create(&db, user_request("ghost", "ghost@x.com"), 4).await.unwrap();

        let err = create(&db, user_request("ghost", "other@x.com"), 4).await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(ref m) if m == "Username already exists"));

        let err = create(&db, user_request("phantom", "ghost@x.com"), 4).await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(ref m) if m == "Email already exists"));

        let page = list_active(&db, &PageParams::default()).await.unwrap();
        assert_eq!(page.total_elements, 1);
    }

    #[tokio::test]
    async fn test_get_missing_user() {
        let db = test_db().await;
        let err = get(&db, 99).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(ref m) if m == "User not found with id: 99"));
    }

    #[tokio::test]
    async fn test_partial_update_keeps_other_fields() {
        let db = test_db().await;
        let original = seed_user(&db, "rico", Role::Lieutenant).await;

        let updated = update(
            &db,
            original.id,
            UserUpdateRequest {
                territory: Some("Miami".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        assert_eq!(updated.territory.as_deref(), Some("Miami"));
        assert_eq!(updated.email, original.email);
        assert_eq!(updated.code_name, original.code_name);
        assert_eq!(updated.role, Role::Lieutenant);
        assert!(updated.is_active);
    }

    #[tokio::test]
    async fn test_update_email_uniqueness() {
        let db = test_db().await;
        let rico = seed_user(&db, "rico", Role::User).await;
        let vera = seed_user(&db, "vera", Role::User).await;

        // Re-sending the current email is not a conflict
        update(
            &db,
            rico.id,
            UserUpdateRequest {
                email: Some(rico.email.clone()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let err = update(
            &db,
            rico.id,
            UserUpdateRequest {
                email: Some(vera.email.clone()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(ref m) if m == "Email already exists"));
    }

    #[tokio::test]
    async fn test_deactivate_keeps_row() {
        let db = test_db().await;
        let rico = seed_user(&db, "rico", Role::User).await;

        deactivate(&db, rico.id).await.unwrap();

        let fetched = get(&db, rico.id).await.unwrap();
        assert!(!fetched.is_active);
        let page = list_active(&db, &PageParams::default()).await.unwrap();
        assert!(page.empty);
    }

    #[tokio::test]
    async fn test_role_territory_and_code_name_filters() {
        let db = test_db().await;
        seed_user(&db, "rico", Role::Lieutenant).await;
        let vera = seed_user(&db, "vera", Role::Lieutenant).await;
        seed_user(&db, "tony", Role::Boss).await;
        deactivate(&db, vera.id).await.unwrap();

        let lieutenants = list_by_role(&db, Role::Lieutenant, &PageParams::default()).await.unwrap();
        assert_eq!(lieutenants.total_elements, 1);
        assert_eq!(lieutenants.content[0].username, "rico");

        let in_territory = list_by_territory(&db, "Downtown").await.unwrap();
        assert_eq!(in_territory.len(), 2);

        let found = search_by_code_name(&db, "ton", &PageParams::default()).await.unwrap();
        assert_eq!(found.content.len(), 1);
        assert_eq!(found.content[0].username, "tony");
    }

    #[tokio::test]
    async fn test_list_sorting() {
        let db = test_db().await;
        seed_user(&db, "alpha", Role::User).await;
        seed_user(&db, "charlie", Role::User).await;
        seed_user(&db, "bravo", Role::User).await;

        let params = PageParams {
            sort_by: Some("username".into()),
            sort_dir: Some("desc".into()),
            size: Some(2),
            ..Default::default()
        };
        let page = list_active(&db, &params).await.unwrap();
        let names: Vec<_> = page.content.iter().map(|u| u.username.as_str()).collect();
        assert_eq!(names, vec!["charlie", "bravo"]);
        assert_eq!(page.total_pages, 2);
        assert!(!page.last);
    }
}
