//! Product catalogue

use sea_orm::{ActiveModelTrait, DatabaseConnection, Order, Set};
use tracing::info;
use validator::Validate;

use crate::dto::product::{ProductCreateRequest, ProductResponse, ProductUpdateRequest};
use crate::dto::{required, Page};
use crate::entity::{now, product, ProductType};
use crate::error::{AppError, AppResult, OptionExt};
use crate::repository::{self, product as products, PageParams};

pub async fn create(db: &DatabaseConnection, req: ProductCreateRequest) -> AppResult<ProductResponse> {
    req.validate()?;
    let product_type = required(req.product_type, "Product type is required")?;

    if products::exists_by_code_name(db, &req.code_name).await? {
        return Err(AppError::BadRequest("Product code name already exists".into()));
    }

    let ts = now();
    let model = product::ActiveModel {
        name: Set(req.name),
        code_name: Set(req.code_name),
        product_type: Set(product_type),
        description: Set(req.description),
        price_per_unit: Set(req.price_per_unit),
        unit_measure: Set(req.unit_measure),
        origin_country: Set(req.origin_country),
        purity_level: Set(req.purity_level),
        is_available: Set(true),
        created_at: Set(ts),
        updated_at: Set(ts),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!("Created product {} ({})", model.code_name, model.product_type);
    Ok(model.into())
}

pub async fn find_model(db: &DatabaseConnection, id: i32) -> AppResult<product::Model> {
    products::find_by_id(db, id)
        .await?
        .ok_or_not_found(format!("Product not found with id: {}", id))
}

pub async fn get(db: &DatabaseConnection, id: i32) -> AppResult<ProductResponse> {
    Ok(find_model(db, id).await?.into())
}

pub async fn get_by_code_name(db: &DatabaseConnection, code_name: &str) -> AppResult<ProductResponse> {
    let model = products::find_by_code_name(db, code_name)
        .await?
        .ok_or_not_found(format!("Product not found with code name: {}", code_name))?;
    Ok(model.into())
}

pub async fn list_available(
    db: &DatabaseConnection,
    params: &PageParams,
) -> AppResult<Page<ProductResponse>> {
    let page =
        repository::paginate(db, products::available(), params, product::Column::Name, Order::Asc)
            .await?;
    Ok(page.map(ProductResponse::from))
}

pub async fn list_by_type(
    db: &DatabaseConnection,
    product_type: ProductType,
    params: &PageParams,
) -> AppResult<Page<ProductResponse>> {
    let page = repository::paginate(
        db,
        products::available_of_type(product_type),
        params,
        product::Column::Id,
        Order::Asc,
    )
    .await?;
    Ok(page.map(ProductResponse::from))
}

pub async fn search_by_name(
    db: &DatabaseConnection,
    name: &str,
    params: &PageParams,
) -> AppResult<Page<ProductResponse>> {
    let page = repository::paginate(
        db,
        products::available_name_containing(name),
        params,
        product::Column::Id,
        Order::Asc,
    )
    .await?;
    Ok(page.map(ProductResponse::from))
}

pub async fn list_by_price_range(
    db: &DatabaseConnection,
    min: f64,
    max: f64,
) -> AppResult<Vec<ProductResponse>> {
    let found = products::find_by_price_range(db, min, max).await?;
    Ok(found.into_iter().map(ProductResponse::from).collect())
}

pub async fn list_by_origin_country(
    db: &DatabaseConnection,
    country: &str,
) -> AppResult<Vec<ProductResponse>> {
    let found = products::find_by_origin_country(db, country).await?;
    Ok(found.into_iter().map(ProductResponse::from).collect())
}

pub async fn list_by_minimum_purity(
    db: &DatabaseConnection,
    min_purity: i32,
) -> AppResult<Vec<ProductResponse>> {
    let found = products::find_by_minimum_purity(db, min_purity).await?;
    Ok(found.into_iter().map(ProductResponse::from).collect())
}

pub async fn update(
    db: &DatabaseConnection,
    id: i32,
    req: ProductUpdateRequest,
) -> AppResult<ProductResponse> {
    req.validate()?;
    let mut active: product::ActiveModel = find_model(db, id).await?.into();

    if let Some(name) = req.name {
        active.name = Set(name);
    }
    if let Some(product_type) = req.product_type {
        active.product_type = Set(product_type);
    }
    if let Some(description) = req.description {
        active.description = Set(Some(description));
    }
    if let Some(price) = req.price_per_unit {
        active.price_per_unit = Set(Some(price));
    }
    if let Some(unit) = req.unit_measure {
        active.unit_measure = Set(Some(unit));
    }
    if let Some(country) = req.origin_country {
        active.origin_country = Set(Some(country));
    }
    if let Some(purity) = req.purity_level {
        active.purity_level = Set(Some(purity));
    }
    if let Some(available) = req.is_available {
        active.is_available = Set(available);
    }
    active.updated_at = Set(now());

    let model = active.update(db).await?;
    info!("Updated product {}", model.code_name);
    Ok(model.into())
}

/// Soft delete
pub async fn discontinue(db: &DatabaseConnection, id: i32) -> AppResult<()> {
    let mut active: product::ActiveModel = find_model(db, id).await?.into();
    active.is_available = Set(false);
    active.updated_at = Set(now());
    let model = active.update(db).await?;
    info!("Discontinued product {}", model.code_name);
    Ok(())
}
