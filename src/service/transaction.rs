//! Sales ledger

use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Order, Set};
use std::collections::HashMap;
use tracing::info;
use validator::Validate;

use super::operation as operation_service;
use crate::auth::CurrentUser;
use crate::dto::product::ProductResponse;
use crate::dto::transaction::{SalesReport, TransactionCreateRequest, TransactionResponse};
use crate::dto::user::UserResponse;
use crate::dto::{required, Page};
use crate::entity::{now, transaction};
use crate::error::{AppError, AppResult, OptionExt};
use crate::permission;
use crate::repository::{
    self, operation as operations, product as products, transaction as ledger, user as users,
    PageParams,
};

/// Attach operation, product, buyer and seller projections to a batch of rows
pub async fn project_many(
    db: &DatabaseConnection,
    models: Vec<transaction::Model>,
) -> AppResult<Vec<TransactionResponse>> {
    let operation_ids: Vec<i32> = models.iter().map(|t| t.operation_id).collect();
    let product_ids: Vec<i32> = models.iter().map(|t| t.product_id).collect();
    let user_ids: Vec<i32> = models
        .iter()
        .flat_map(|t| [t.buyer_id, t.seller_id])
        .collect();

    let operation_rows: Vec<_> = operations::find_by_ids(db, &operation_ids)
        .await?
        .into_values()
        .collect();
    let operation_map: HashMap<_, _> = operation_service::project_many(db, operation_rows)
        .await?
        .into_iter()
        .map(|o| (o.id, o))
        .collect();
    let product_map = products::find_by_ids(db, &product_ids).await?;
    let people = users::find_by_ids(db, &user_ids).await?;

    let person = |id: i32, role: &str| {
        people
            .get(&id)
            .cloned()
            .map(UserResponse::from)
            .ok_or_not_found(format!("{} not found", role))
    };

    models
        .into_iter()
        .map(|row| {
            let operation = operation_map
                .get(&row.operation_id)
                .cloned()
                .ok_or_not_found("Operation not found")?;
            let product = product_map
                .get(&row.product_id)
                .cloned()
                .map(ProductResponse::from)
                .ok_or_not_found("Product not found")?;
            let buyer = person(row.buyer_id, "Buyer")?;
            let seller = person(row.seller_id, "Seller")?;
            Ok(TransactionResponse::new(row, operation, product, buyer, seller))
        })
        .collect()
}

pub async fn project(
    db: &DatabaseConnection,
    model: transaction::Model,
) -> AppResult<TransactionResponse> {
    let mut projected = project_many(db, vec![model]).await?;
    projected
        .pop()
        .ok_or_else(|| AppError::Internal("transaction projection came back empty".into()))
}

/// Below BOSS rank, the actor must lead or take part in the operation
pub async fn create(
    db: &DatabaseConnection,
    req: TransactionCreateRequest,
    actor: &CurrentUser,
) -> AppResult<TransactionResponse> {
    req.validate()?;
    let operation_id = required(req.operation_id, "Operation ID is required")?;
    let product_id = required(req.product_id, "Product ID is required")?;
    let buyer_id = required(req.buyer_id, "Buyer ID is required")?;
    let seller_id = required(req.seller_id, "Seller ID is required")?;
    let quantity = required(req.quantity, "Quantity is required")?;
    let unit_price = required(req.unit_price, "Unit price is required")?;

    let operation = operations::find_by_id(db, operation_id)
        .await?
        .ok_or_not_found("Operation not found")?;
    products::find_by_id(db, product_id)
        .await?
        .ok_or_not_found("Product not found")?;
    users::find_by_id(db, buyer_id)
        .await?
        .ok_or_not_found("Buyer not found")?;
    users::find_by_id(db, seller_id)
        .await?
        .ok_or_not_found("Seller not found")?;

    if !permission::is_command(actor.role)
        && operation.leader_id != actor.id
        && !operations::is_participant(db, operation.id, actor.id).await?
    {
        tracing::warn!(
            "{} tried to record a sale on operation {} without taking part",
            actor.username,
            operation.code_name
        );
        return Err(AppError::Forbidden("Access denied".into()));
    }

    let model = transaction::ActiveModel {
        operation_id: Set(operation_id),
        product_id: Set(product_id),
        buyer_id: Set(buyer_id),
        seller_id: Set(seller_id),
        quantity: Set(quantity),
        unit_price: Set(unit_price),
        total_amount: Set(unit_price * f64::from(quantity)),
        transaction_location: Set(req.transaction_location),
        notes: Set(req.notes),
        transaction_date: Set(now()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!(
        "Recorded transaction {} on operation {}: {} x {:.2} = {:.2}",
        model.id, operation.code_name, quantity, unit_price, model.total_amount
    );
    project(db, model).await
}

pub async fn get(db: &DatabaseConnection, id: i32) -> AppResult<TransactionResponse> {
    let model = ledger::find_by_id(db, id)
        .await?
        .ok_or_not_found("Transaction not found")?;
    project(db, model).await
}

pub async fn list(
    db: &DatabaseConnection,
    params: &PageParams,
) -> AppResult<Page<TransactionResponse>> {
    let page = repository::paginate(
        db,
        transaction::Entity::find(),
        params,
        transaction::Column::TransactionDate,
        Order::Desc,
    )
    .await?;
    let (page, rows) = page.take_content();
    Ok(page.with_content(project_many(db, rows).await?))
}

/// Sales and purchases of one member, newest first
pub async fn list_by_user(
    db: &DatabaseConnection,
    user_id: i32,
    params: &PageParams,
) -> AppResult<Page<TransactionResponse>> {
    let page = repository::paginate(
        db,
        ledger::involving(user_id),
        params,
        transaction::Column::TransactionDate,
        Order::Desc,
    )
    .await?;
    let (page, rows) = page.take_content();
    Ok(page.with_content(project_many(db, rows).await?))
}

pub async fn list_by_date_range(
    db: &DatabaseConnection,
    start: chrono::NaiveDateTime,
    end: chrono::NaiveDateTime,
) -> AppResult<Vec<TransactionResponse>> {
    let found = ledger::find_by_date_range(db, start, end).await?;
    project_many(db, found).await
}

pub async fn sales_report(
    db: &DatabaseConnection,
    seller_id: i32,
    start: chrono::NaiveDateTime,
    end: chrono::NaiveDateTime,
) -> AppResult<SalesReport> {
    users::find_by_id(db, seller_id)
        .await?
        .ok_or_not_found("Seller not found")?;
    let total_sales = ledger::total_sales_by_seller(db, seller_id, start, end).await?;
    Ok(SalesReport {
        seller_id,
        start_date: start,
        end_date: end,
        total_sales,
        currency: "USD",
    })
}
