//! Storage sites

use sea_orm::{ActiveModelTrait, DatabaseConnection, Order, Set};
use tracing::info;
use validator::Validate;

use crate::dto::user::UserResponse;
use crate::dto::warehouse::{WarehouseCreateRequest, WarehouseResponse, WarehouseUpdateRequest};
use crate::dto::Page;
use crate::entity::{now, warehouse};
use crate::error::{AppError, AppResult, OptionExt};
use crate::repository::{self, user as users, warehouse as warehouses, PageParams};

async fn require_manager(db: &DatabaseConnection, manager_id: i32) -> AppResult<()> {
    users::find_by_id(db, manager_id)
        .await?
        .ok_or_not_found("Manager not found")?;
    Ok(())
}

/// Attach manager projections to a batch of warehouses
pub async fn project_many(
    db: &DatabaseConnection,
    models: Vec<warehouse::Model>,
) -> AppResult<Vec<WarehouseResponse>> {
    let manager_ids: Vec<i32> = models.iter().filter_map(|w| w.manager_id).collect();
    let managers = users::find_by_ids(db, &manager_ids).await?;
    Ok(models
        .into_iter()
        .map(|w| {
            let manager = w
                .manager_id
                .and_then(|id| managers.get(&id).cloned())
                .map(UserResponse::from);
            WarehouseResponse::new(w, manager)
        })
        .collect())
}

pub async fn project(db: &DatabaseConnection, model: warehouse::Model) -> AppResult<WarehouseResponse> {
    let manager = match model.manager_id {
        Some(id) => users::find_by_id(db, id).await?.map(UserResponse::from),
        None => None,
    };
    Ok(WarehouseResponse::new(model, manager))
}

pub async fn create(
    db: &DatabaseConnection,
    req: WarehouseCreateRequest,
) -> AppResult<WarehouseResponse> {
    req.validate()?;

    if warehouses::exists_by_code_name(db, &req.code_name).await? {
        return Err(AppError::BadRequest("Warehouse code name already exists".into()));
    }
    if let Some(manager_id) = req.manager_id {
        require_manager(db, manager_id).await?;
    }

    let ts = now();
    let model = warehouse::ActiveModel {
        name: Set(req.name),
        code_name: Set(req.code_name),
        address: Set(req.address),
        city: Set(req.city),
        country: Set(req.country),
        coordinates: Set(req.coordinates),
        capacity: Set(req.capacity),
        security_level: Set(req.security_level),
        is_active: Set(true),
        manager_id: Set(req.manager_id),
        created_at: Set(ts),
        updated_at: Set(ts),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!("Created warehouse {}", model.code_name);
    project(db, model).await
}

pub async fn find_model(db: &DatabaseConnection, id: i32) -> AppResult<warehouse::Model> {
    warehouses::find_by_id(db, id)
        .await?
        .ok_or_not_found("Warehouse not found")
}

pub async fn get(db: &DatabaseConnection, id: i32) -> AppResult<WarehouseResponse> {
    let model = find_model(db, id).await?;
    project(db, model).await
}

pub async fn list_active(
    db: &DatabaseConnection,
    params: &PageParams,
) -> AppResult<Page<WarehouseResponse>> {
    let page = repository::paginate(
        db,
        warehouses::active(),
        params,
        warehouse::Column::Name,
        Order::Asc,
    )
    .await?;
    let (page, rows) = page.take_content();
    Ok(page.with_content(project_many(db, rows).await?))
}

pub async fn list_by_city(db: &DatabaseConnection, city: &str) -> AppResult<Vec<WarehouseResponse>> {
    let found = warehouses::find_active_by_city(db, city).await?;
    project_many(db, found).await
}

pub async fn update(
    db: &DatabaseConnection,
    id: i32,
    req: WarehouseUpdateRequest,
) -> AppResult<WarehouseResponse> {
    req.validate()?;
    let existing = find_model(db, id).await?;
    if let Some(manager_id) = req.manager_id {
        require_manager(db, manager_id).await?;
    }

    let mut active: warehouse::ActiveModel = existing.into();
    if let Some(name) = req.name {
        active.name = Set(name);
    }
    if let Some(address) = req.address {
        active.address = Set(Some(address));
    }
    if let Some(city) = req.city {
        active.city = Set(Some(city));
    }
    if let Some(country) = req.country {
        active.country = Set(Some(country));
    }
    if let Some(coordinates) = req.coordinates {
        active.coordinates = Set(Some(coordinates));
    }
    if let Some(capacity) = req.capacity {
        active.capacity = Set(Some(capacity));
    }
    if let Some(level) = req.security_level {
        active.security_level = Set(Some(level));
    }
    if let Some(manager_id) = req.manager_id {
        active.manager_id = Set(Some(manager_id));
    }
    if let Some(is_active) = req.is_active {
        active.is_active = Set(is_active);
    }
    active.updated_at = Set(now());

    let model = active.update(db).await?;
    info!("Updated warehouse {}", model.code_name);
    project(db, model).await
}

/// Soft delete
pub async fn deactivate(db: &DatabaseConnection, id: i32) -> AppResult<()> {
    let mut active: warehouse::ActiveModel = find_model(db, id).await?.into();
    active.is_active = Set(false);
    active.updated_at = Set(now());
    let model = active.update(db).await?;
    info!("Deactivated warehouse {}", model.code_name);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_db;
    use crate::entity::Role;
    use crate::service::testutil::{seed_user, seed_warehouse};

    fn request(code_name: &str, manager_id: Option<i32>) -> WarehouseCreateRequest {
        WarehouseCreateRequest {
            name: "La Bodega".into(),
            code_name: code_name.into(),
            address: None,
            city: Some("Tijuana".into()),
            country: Some("Mexico".into()),
            coordinates: None,
            capacity: Some(500),
            security_level: Some(7),
            manager_id,
        }
    }

    #[tokio::test]
    async fn test_create_with_manager() {
        let db = test_db().await;
        let manager = seed_user(&db, "rico", Role::Lieutenant).await;
        let created = create(&db, request("BODEGA", Some(manager.id))).await.unwrap();
        assert_eq!(created.manager.as_ref().map(|m| m.id), Some(manager.id));
        assert!(created.is_active);
    }

    #[tokio::test]
    async fn test_unknown_manager() {
        let db = test_db().await;
        let err = create(&db, request("BODEGA", Some(404))).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(ref m) if m == "Manager not found"));
    }

    #[tokio::test]
    async fn test_duplicate_code_name() {
        let db = test_db().await;
        seed_warehouse(&db, "BODEGA").await;
        let err = create(&db, request("BODEGA", None)).await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(ref m) if m == "Warehouse code name already exists"));
    }

    #[tokio::test]
    async fn test_deactivate_and_city_filter() {
        let db = test_db().await;
        let north = seed_warehouse(&db, "NORTH").await;
        seed_warehouse(&db, "SOUTH").await;

        assert_eq!(list_by_city(&db, "Juarez").await.unwrap().len(), 2);
        deactivate(&db, north.id).await.unwrap();

        let fetched = get(&db, north.id).await.unwrap();
        assert!(!fetched.is_active);
        assert_eq!(list_by_city(&db, "Juarez").await.unwrap().len(), 1);
        assert_eq!(list_active(&db, &PageParams::default()).await.unwrap().total_elements, 1);
    }

    #[tokio::test]
    async fn test_update_keeps_unspecified_fields() {
        let db = test_db().await;
        let site = seed_warehouse(&db, "NORTH").await;
        let updated = update(
            &db,
            site.id,
            WarehouseUpdateRequest {
                security_level: Some(9),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.security_level, Some(9));
        assert_eq!(updated.capacity, Some(1000));
        assert_eq!(updated.city.as_deref(), Some("Juarez"));
        assert!(updated.manager.is_none());
    }
}
