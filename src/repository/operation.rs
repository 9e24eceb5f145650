use sea_orm::{
    ColumnTrait, Condition, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select, Set,
};
use std::collections::HashMap;

use crate::entity::operation::{self, OperationStatus};
use crate::entity::{operation_participant, user};

pub async fn find_by_id(
    db: &DatabaseConnection,
    id: i32,
) -> Result<Option<operation::Model>, DbErr> {
    operation::Entity::find_by_id(id).one(db).await
}

pub async fn find_by_ids(
    db: &DatabaseConnection,
    ids: &[i32],
) -> Result<HashMap<i32, operation::Model>, DbErr> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }
    let found = operation::Entity::find()
        .filter(operation::Column::Id.is_in(ids.iter().copied()))
        .all(db)
        .await?;
    Ok(found.into_iter().map(|o| (o.id, o)).collect())
}

pub fn led_by(leader_id: i32) -> Select<operation::Entity> {
    operation::Entity::find().filter(operation::Column::LeaderId.eq(leader_id))
}

pub fn with_status(status: OperationStatus) -> Select<operation::Entity> {
    operation::Entity::find().filter(operation::Column::Status.eq(status))
}

/// Name or code name contains `term`
pub fn search(term: &str) -> Select<operation::Entity> {
    operation::Entity::find().filter(
        Condition::any()
            .add(operation::Column::Name.contains(term))
            .add(operation::Column::CodeName.contains(term)),
    )
}

pub async fn find_by_participant(
    db: &DatabaseConnection,
    user_id: i32,
) -> Result<Vec<operation::Model>, DbErr> {
    let operation_ids: Vec<i32> = operation_participant::Entity::find()
        .select_only()
        .column(operation_participant::Column::OperationId)
        .filter(operation_participant::Column::UserId.eq(user_id))
        .into_tuple()
        .all(db)
        .await?;
    if operation_ids.is_empty() {
        return Ok(Vec::new());
    }
    operation::Entity::find()
        .filter(operation::Column::Id.is_in(operation_ids))
        .order_by_asc(operation::Column::Id)
        .all(db)
        .await
}

/// Start date within `[start, end]`
pub async fn find_by_start_date_range(
    db: &DatabaseConnection,
    start: chrono::NaiveDateTime,
    end: chrono::NaiveDateTime,
) -> Result<Vec<operation::Model>, DbErr> {
    operation::Entity::find()
        .filter(operation::Column::StartDate.between(start, end))
        .order_by_asc(operation::Column::StartDate)
        .all(db)
        .await
}

/// Operations at `location` that have not been cancelled
pub async fn find_active_by_location(
    db: &DatabaseConnection,
    location: &str,
) -> Result<Vec<operation::Model>, DbErr> {
    operation::Entity::find()
        .filter(operation::Column::Location.eq(location))
        .filter(operation::Column::Status.ne(OperationStatus::Cancelled))
        .order_by_asc(operation::Column::Id)
        .all(db)
        .await
}

/// Risk at least `min_risk`, riskiest first
pub async fn find_high_risk(
    db: &DatabaseConnection,
    min_risk: i32,
) -> Result<Vec<operation::Model>, DbErr> {
    operation::Entity::find()
        .filter(operation::Column::RiskLevel.gte(min_risk))
        .order_by_desc(operation::Column::RiskLevel)
        .order_by_asc(operation::Column::Id)
        .all(db)
        .await
}

/// Operations whose start date is on or after `since`
pub async fn count_started_between(
    db: &DatabaseConnection,
    since: chrono::NaiveDateTime,
    until: chrono::NaiveDateTime,
) -> Result<u64, DbErr> {
    operation::Entity::find()
        .filter(operation::Column::StartDate.between(since, until))
        .count(db)
        .await
}

pub async fn participant_ids(db: &DatabaseConnection, operation_id: i32) -> Result<Vec<i32>, DbErr> {
    operation_participant::Entity::find()
        .select_only()
        .column(operation_participant::Column::UserId)
        .filter(operation_participant::Column::OperationId.eq(operation_id))
        .order_by_asc(operation_participant::Column::UserId)
        .into_tuple()
        .all(db)
        .await
}

/// Participant user ids for each of `operation_ids`
pub async fn participant_ids_for(
    db: &DatabaseConnection,
    operation_ids: &[i32],
) -> Result<HashMap<i32, Vec<i32>>, DbErr> {
    let mut result: HashMap<i32, Vec<i32>> = HashMap::new();
    if operation_ids.is_empty() {
        return Ok(result);
    }
    let rows = operation_participant::Entity::find()
        .filter(operation_participant::Column::OperationId.is_in(operation_ids.iter().copied()))
        .order_by_asc(operation_participant::Column::UserId)
        .all(db)
        .await?;
    for row in rows {
        result.entry(row.operation_id).or_default().push(row.user_id);
    }
    Ok(result)
}

pub async fn is_participant<C: ConnectionTrait>(
    db: &C,
    operation_id: i32,
    user_id: i32,
) -> Result<bool, DbErr> {
    let row = operation_participant::Entity::find_by_id((operation_id, user_id))
        .one(db)
        .await?;
    Ok(row.is_some())
}

/// Replace the participant set. Ids with no matching user are dropped.
/// Returns the ids actually stored.
pub async fn replace_participants<C: ConnectionTrait>(
    db: &C,
    operation_id: i32,
    requested: &[i32],
) -> Result<Vec<i32>, DbErr> {
    operation_participant::Entity::delete_many()
        .filter(operation_participant::Column::OperationId.eq(operation_id))
        .exec(db)
        .await?;

    if requested.is_empty() {
        return Ok(Vec::new());
    }

    let mut known: Vec<i32> = user::Entity::find()
        .select_only()
        .column(user::Column::Id)
        .filter(user::Column::Id.is_in(requested.iter().copied()))
        .into_tuple()
        .all(db)
        .await?;
    known.sort_unstable();
    known.dedup();

    if known.is_empty() {
        return Ok(known);
    }

    let rows = known.iter().map(|&user_id| operation_participant::ActiveModel {
        operation_id: Set(operation_id),
        user_id: Set(user_id),
    });
    operation_participant::Entity::insert_many(rows)
        .exec_without_returning(db)
        .await?;

    Ok(known)
}
