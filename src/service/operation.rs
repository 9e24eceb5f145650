//! Operations and their participant sets

use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Order, Set, TransactionTrait};
use tracing::info;
use validator::Validate;

use crate::auth::CurrentUser;
use crate::dto::operation::{OperationCreateRequest, OperationResponse, OperationUpdateRequest};
use crate::dto::user::UserResponse;
use crate::dto::{required, Page};
use crate::entity::{now, operation, OperationStatus};
use crate::error::{AppError, AppResult, OptionExt};
use crate::permission;
use crate::repository::{self, operation as operations, user as users, PageParams};

/// Attach leader and participant projections to a batch of operations
pub async fn project_many(
    db: &DatabaseConnection,
    models: Vec<operation::Model>,
) -> AppResult<Vec<OperationResponse>> {
    let operation_ids: Vec<i32> = models.iter().map(|o| o.id).collect();
    let participants = operations::participant_ids_for(db, &operation_ids).await?;

    let mut user_ids: Vec<i32> = models.iter().map(|o| o.leader_id).collect();
    user_ids.extend(participants.values().flatten().copied());
    let people = users::find_by_ids(db, &user_ids).await?;

    models
        .into_iter()
        .map(|op| {
            let leader = people
                .get(&op.leader_id)
                .cloned()
                .map(UserResponse::from)
                .ok_or_not_found(format!("Leader not found with id: {}", op.leader_id))?;
            let crew = participants
                .get(&op.id)
                .map(|ids| {
                    ids.iter()
                        .filter_map(|id| people.get(id).cloned().map(UserResponse::from))
                        .collect()
                })
                .unwrap_or_default();
            Ok(OperationResponse::new(op, leader, crew))
        })
        .collect()
}

pub async fn project(db: &DatabaseConnection, model: operation::Model) -> AppResult<OperationResponse> {
    let mut projected = project_many(db, vec![model]).await?;
    projected
        .pop()
        .ok_or_else(|| AppError::Internal("operation projection came back empty".into()))
}

async fn require_leader(db: &DatabaseConnection, leader_id: i32) -> AppResult<()> {
    users::find_by_id(db, leader_id)
        .await?
        .ok_or_not_found(format!("Leader not found with id: {}", leader_id))?;
    Ok(())
}

pub async fn create(
    db: &DatabaseConnection,
    req: OperationCreateRequest,
) -> AppResult<OperationResponse> {
    req.validate()?;
    let leader_id = required(req.leader_id, "Leader ID is required")?;
    require_leader(db, leader_id).await?;

    let ts = now();
    let txn = db.begin().await?;
    let model = operation::ActiveModel {
        name: Set(req.name),
        code_name: Set(req.code_name),
        description: Set(req.description),
        leader_id: Set(leader_id),
        status: Set(OperationStatus::Planned),
        start_date: Set(req.start_date),
        end_date: Set(req.end_date),
        location: Set(req.location),
        risk_level: Set(req.risk_level),
        estimated_profit: Set(req.estimated_profit),
        actual_profit: Set(None),
        created_at: Set(ts),
        updated_at: Set(ts),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    let crew = match &req.participant_ids {
        Some(ids) => operations::replace_participants(&txn, model.id, ids).await?,
        None => Vec::new(),
    };
    txn.commit().await?;

    info!(
        "Created operation {} led by {} with {} participant(s)",
        model.code_name,
        leader_id,
        crew.len()
    );
    project(db, model).await
}

pub async fn find_model(db: &DatabaseConnection, id: i32) -> AppResult<operation::Model> {
    operations::find_by_id(db, id)
        .await?
        .ok_or_not_found(format!("Operation not found with id: {}", id))
}

pub async fn get(db: &DatabaseConnection, id: i32) -> AppResult<OperationResponse> {
    let model = find_model(db, id).await?;
    project(db, model).await
}

async fn project_page(
    db: &DatabaseConnection,
    page: Page<operation::Model>,
) -> AppResult<Page<OperationResponse>> {
    let (page, rows) = page.take_content();
    Ok(page.with_content(project_many(db, rows).await?))
}

pub async fn list(db: &DatabaseConnection, params: &PageParams) -> AppResult<Page<OperationResponse>> {
    let page = repository::paginate(
        db,
        operation::Entity::find(),
        params,
        operation::Column::CreatedAt,
        Order::Desc,
    )
    .await?;
    project_page(db, page).await
}

pub async fn list_by_leader(
    db: &DatabaseConnection,
    leader_id: i32,
    params: &PageParams,
) -> AppResult<Page<OperationResponse>> {
    require_leader(db, leader_id).await?;
    let page = repository::paginate(
        db,
        operations::led_by(leader_id),
        params,
        operation::Column::Id,
        Order::Asc,
    )
    .await?;
    project_page(db, page).await
}

pub async fn list_by_status(
    db: &DatabaseConnection,
    status: OperationStatus,
    params: &PageParams,
) -> AppResult<Page<OperationResponse>> {
    let page = repository::paginate(
        db,
        operations::with_status(status),
        params,
        operation::Column::Id,
        Order::Asc,
    )
    .await?;
    project_page(db, page).await
}

pub async fn list_by_participant(
    db: &DatabaseConnection,
    user_id: i32,
) -> AppResult<Vec<OperationResponse>> {
    let found = operations::find_by_participant(db, user_id).await?;
    project_many(db, found).await
}

pub async fn list_by_date_range(
    db: &DatabaseConnection,
    start: chrono::NaiveDateTime,
    end: chrono::NaiveDateTime,
) -> AppResult<Vec<OperationResponse>> {
    let found = operations::find_by_start_date_range(db, start, end).await?;
    project_many(db, found).await
}

pub async fn list_active_by_location(
    db: &DatabaseConnection,
    location: &str,
) -> AppResult<Vec<OperationResponse>> {
    let found = operations::find_active_by_location(db, location).await?;
    project_many(db, found).await
}

pub async fn list_high_risk(
    db: &DatabaseConnection,
    min_risk: i32,
) -> AppResult<Vec<OperationResponse>> {
    let found = operations::find_high_risk(db, min_risk).await?;
    project_many(db, found).await
}

pub async fn search(
    db: &DatabaseConnection,
    term: &str,
    params: &PageParams,
) -> AppResult<Page<OperationResponse>> {
    let page = repository::paginate(
        db,
        operations::search(term),
        params,
        operation::Column::Id,
        Order::Asc,
    )
    .await?;
    project_page(db, page).await
}

/// Below BOSS rank, only the leader may edit
pub async fn update(
    db: &DatabaseConnection,
    id: i32,
    req: OperationUpdateRequest,
    actor: &CurrentUser,
) -> AppResult<OperationResponse> {
    req.validate()?;
    let existing = find_model(db, id).await?;

    if !permission::is_command(actor.role) && existing.leader_id != actor.id {
        tracing::warn!(
            "{} tried to edit operation {} led by {}",
            actor.username,
            existing.code_name,
            existing.leader_id
        );
        return Err(AppError::Forbidden("Access denied".into()));
    }

    let mut active: operation::ActiveModel = existing.into();
    if let Some(name) = req.name {
        active.name = Set(name);
    }
    if let Some(description) = req.description {
        active.description = Set(Some(description));
    }
    if let Some(status) = req.status {
        active.status = Set(status);
    }
    if let Some(start) = req.start_date {
        active.start_date = Set(Some(start));
    }
    if let Some(end) = req.end_date {
        active.end_date = Set(Some(end));
    }
    if let Some(location) = req.location {
        active.location = Set(Some(location));
    }
    if let Some(risk) = req.risk_level {
        active.risk_level = Set(Some(risk));
    }
    if let Some(estimated) = req.estimated_profit {
        active.estimated_profit = Set(Some(estimated));
    }
    if let Some(actual) = req.actual_profit {
        active.actual_profit = Set(Some(actual));
    }
    active.updated_at = Set(now());

    let txn = db.begin().await?;
    let model = active.update(&txn).await?;
    if let Some(ids) = &req.participant_ids {
        operations::replace_participants(&txn, model.id, ids).await?;
    }
    txn.commit().await?;

    info!("Updated operation {} ({})", model.code_name, model.status);
    project(db, model).await
}

/// Soft delete
pub async fn cancel(db: &DatabaseConnection, id: i32) -> AppResult<()> {
    let mut active: operation::ActiveModel = find_model(db, id).await?.into();
    active.status = Set(OperationStatus::Cancelled);
    active.updated_at = Set(now());
    let model = active.update(db).await?;
    info!("Cancelled operation {}", model.code_name);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_db;
    use crate::entity::Role;
    use crate::service::testutil::{seed_operation, seed_user};

    fn request(code_name: &str, leader_id: i32, participant_ids: Option<Vec<i32>>) -> OperationCreateRequest {
        OperationCreateRequest {
            name: "Night Run".into(),
            code_name: code_name.into(),
            description: None,
            leader_id: Some(leader_id),
            start_date: Some(now()),
            end_date: None,
            location: Some("Harbor".into()),
            risk_level: Some(7),
            estimated_profit: Some(120_000.0),
            participant_ids,
        }
    }

    fn actor(user: &crate::entity::user::Model) -> CurrentUser {
        CurrentUser::from(user)
    }

    #[tokio::test]
    async fn test_create_resolves_known_participants() {
        let db = test_db().await;
        let boss = seed_user(&db, "tony", Role::Boss).await;
        let rico = seed_user(&db, "rico", Role::Lieutenant).await;
        let vera = seed_user(&db, "vera", Role::User).await;

        let created = create(&db, request("NR-1", boss.id, Some(vec![vera.id, rico.id, 999])))
            .await
            .unwrap();

        assert_eq!(created.status, OperationStatus::Planned);
        assert_eq!(created.leader.id, boss.id);
        let crew: Vec<i32> = created.participants.iter().map(|p| p.id).collect();
        assert_eq!(crew, vec![rico.id, vera.id]);
    }

    #[tokio::test]
    async fn test_unknown_leader() {
        let db = test_db().await;
        let err = create(&db, request("NR-1", 42, None)).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(ref m) if m == "Leader not found with id: 42"));

        let err = list_by_leader(&db, 42, &PageParams::default()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(ref m) if m == "Leader not found with id: 42"));
    }

    #[tokio::test]
    async fn test_get_missing_operation() {
        let db = test_db().await;
        let err = get(&db, 7).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(ref m) if m == "Operation not found with id: 7"));
    }

    #[tokio::test]
    async fn test_lieutenant_edits_only_own_operation() {
        let db = test_db().await;
        let rico = seed_user(&db, "rico", Role::Lieutenant).await;
        let vera = seed_user(&db, "vera", Role::Lieutenant).await;
        let boss = seed_user(&db, "tony", Role::Boss).await;
        let op = seed_operation(&db, "NR-1", rico.id).await;

        let change = || OperationUpdateRequest {
            status: Some(OperationStatus::InProgress),
            ..Default::default()
        };

        let err = update(&db, op.id, change(), &actor(&vera)).await.unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));

        let updated = update(&db, op.id, change(), &actor(&rico)).await.unwrap();
        assert_eq!(updated.status, OperationStatus::InProgress);

        let updated = update(
            &db,
            op.id,
            OperationUpdateRequest {
                actual_profit: Some(90_000.0),
                ..Default::default()
            },
            &actor(&boss),
        )
        .await
        .unwrap();
        assert_eq!(updated.actual_profit, Some(90_000.0));
        assert_eq!(updated.status, OperationStatus::InProgress);
        assert_eq!(updated.location.as_deref(), Some("Port"));
    }

    #[tokio::test]
    async fn test_update_replaces_participants() {
        let db = test_db().await;
        let boss = seed_user(&db, "tony", Role::Boss).await;
        let rico = seed_user(&db, "rico", Role::Lieutenant).await;
        let vera = seed_user(&db, "vera", Role::User).await;
        let created = create(&db, request("NR-1", boss.id, Some(vec![rico.id]))).await.unwrap();

        let untouched = update(&db, created.id, OperationUpdateRequest::default(), &actor(&boss))
            .await
            .unwrap();
        assert_eq!(untouched.participants.len(), 1);

        let replaced = update(
            &db,
            created.id,
            OperationUpdateRequest {
                participant_ids: Some(vec![vera.id]),
                ..Default::default()
            },
            &actor(&boss),
        )
        .await
        .unwrap();
        let crew: Vec<i32> = replaced.participants.iter().map(|p| p.id).collect();
        assert_eq!(crew, vec![vera.id]);

        assert!(list_by_participant(&db, rico.id).await.unwrap().is_empty());
        assert_eq!(list_by_participant(&db, vera.id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_cancel_keeps_row_and_hides_from_location() {
        let db = test_db().await;
        let boss = seed_user(&db, "tony", Role::Boss).await;
        let op = seed_operation(&db, "NR-1", boss.id).await;
        seed_operation(&db, "NR-2", boss.id).await;

        assert_eq!(list_active_by_location(&db, "Port").await.unwrap().len(), 2);
        cancel(&db, op.id).await.unwrap();

        assert_eq!(get(&db, op.id).await.unwrap().status, OperationStatus::Cancelled);
        assert_eq!(list_active_by_location(&db, "Port").await.unwrap().len(), 1);
        assert_eq!(list(&db, &PageParams::default()).await.unwrap().total_elements, 2);

        let cancelled = list_by_status(&db, OperationStatus::Cancelled, &PageParams::default())
            .await
            .unwrap();
        assert_eq!(cancelled.total_elements, 1);
    }

    #[tokio::test]
    async fn test_search_and_risk_filters() {
        let db = test_db().await;
        let boss = seed_user(&db, "tony", Role::Boss).await;
        create(&db, request("HARBOR-9", boss.id, None)).await.unwrap();
        seed_operation(&db, "INLAND", boss.id).await;

        let found = search(&db, "HARBOR", &PageParams::default()).await.unwrap();
        assert_eq!(found.total_elements, 1);
        assert_eq!(found.content[0].code_name, "HARBOR-9");

        let risky = list_high_risk(&db, 6).await.unwrap();
        assert_eq!(risky.len(), 1);
        assert_eq!(risky[0].risk_level, Some(7));

        let led = list_by_leader(&db, boss.id, &PageParams::default()).await.unwrap();
        assert_eq!(led.total_elements, 2);

        let start = now() - chrono::Duration::days(1);
        let end = now() + chrono::Duration::days(1);
        assert_eq!(list_by_date_range(&db, start, end).await.unwrap().len(), 2);
    }
}
