use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use serde::Serialize;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::error::AppError;
use crate::handlers;
use crate::middleware::auth_layer;
use crate::state::AppState;

pub mod health;

/// Envelope used by the health check
#[derive(Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub code: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            code: true,
            message: "success".to_string(),
            data: Some(data),
        }
    }
}

/// Create the main router
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API routes
    let api_routes = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Auth routes
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/me", get(handlers::auth::me))
        // User routes
        .route(
            "/users",
            post(handlers::user::create_user).get(handlers::user::list_users),
        )
        .route("/users/search", get(handlers::user::search_users))
        .route("/users/role/:role", get(handlers::user::users_by_role))
        .route("/users/territory/:territory", get(handlers::user::users_by_territory))
        .route(
            "/users/:id",
            get(handlers::user::get_user)
                .put(handlers::user::update_user)
                .delete(handlers::user::delete_user),
        )
        // Product routes
        .route(
            "/products",
            post(handlers::product::create_product).get(handlers::product::list_products),
        )
        .route("/products/code/:code_name", get(handlers::product::get_product_by_code))
        .route("/products/type/:product_type", get(handlers::product::products_by_type))
        .route("/products/search", get(handlers::product::search_products))
        .route("/products/price-range", get(handlers::product::products_by_price_range))
        .route("/products/origin/:country", get(handlers::product::products_by_origin))
        .route("/products/purity/:min_purity", get(handlers::product::products_by_purity))
        .route(
            "/products/:id",
            get(handlers::product::get_product)
                .put(handlers::product::update_product)
                .delete(handlers::product::delete_product),
        )
        // Warehouse routes
        .route(
            "/warehouses",
            post(handlers::warehouse::create_warehouse).get(handlers::warehouse::list_warehouses),
        )
        .route("/warehouses/city/:city", get(handlers::warehouse::warehouses_by_city))
        .route(
            "/warehouses/:id",
            get(handlers::warehouse::get_warehouse)
                .put(handlers::warehouse::update_warehouse)
                .delete(handlers::warehouse::delete_warehouse),
        )
        // Inventory routes
        .route(
            "/inventory",
            post(handlers::inventory::create_inventory).get(handlers::inventory::list_inventory),
        )
        .route("/inventory/available", get(handlers::inventory::available_inventory))
        .route("/inventory/low-stock", get(handlers::inventory::low_stock))
        .route(
            "/inventory/:id",
            get(handlers::inventory::get_inventory).put(handlers::inventory::update_inventory),
        )
        // Operation routes
        .route(
            "/operations",
            post(handlers::operation::create_operation).get(handlers::operation::list_operations),
        )
        .route("/operations/leader/:leader_id", get(handlers::operation::operations_by_leader))
        .route("/operations/status/:status", get(handlers::operation::operations_by_status))
        .route(
            "/operations/participant/:user_id",
            get(handlers::operation::operations_by_participant),
        )
        .route("/operations/date-range", get(handlers::operation::operations_by_date_range))
        .route("/operations/location/:location", get(handlers::operation::operations_by_location))
        .route("/operations/high-risk/:min_risk", get(handlers::operation::high_risk_operations))
        .route("/operations/search", get(handlers::operation::search_operations))
        .route(
            "/operations/:id",
            get(handlers::operation::get_operation)
                .put(handlers::operation::update_operation)
                .delete(handlers::operation::delete_operation),
        )
        // Transaction routes
        .route(
            "/transactions",
            post(handlers::transaction::create_transaction)
                .get(handlers::transaction::list_transactions),
        )
        .route("/transactions/user/:user_id", get(handlers::transaction::transactions_by_user))
        .route(
            "/transactions/date-range",
            get(handlers::transaction::transactions_by_date_range),
        )
        .route(
            "/transactions/sales-report/:seller_id",
            get(handlers::transaction::sales_report),
        )
        .route("/transactions/:id", get(handlers::transaction::get_transaction))
        // Message routes
        .route("/messages", post(handlers::message::send_message))
        .route("/messages/inbox", get(handlers::message::inbox))
        .route("/messages/sent", get(handlers::message::sent))
        .route("/messages/unread", get(handlers::message::unread))
        .route("/messages/:id", get(handlers::message::get_message))
        .route("/messages/:id/read", put(handlers::message::mark_as_read))
        // AI routes
        .route("/ai/operation-suggestions", get(handlers::ai::operation_suggestions))
        .route("/ai/product-analysis", get(handlers::ai::product_analysis))
        .route("/ai/risk-assessment", get(handlers::ai::risk_assessment))
        .route("/ai/chat", post(handlers::ai::chat))
        .route("/ai/financial-forecast", get(handlers::ai::financial_forecast));

    Router::new()
        .nest("/api", api_routes)
        .fallback(fallback)
        .layer(middleware::from_fn_with_state(state.clone(), auth_layer))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Fallback handler for 404
pub async fn fallback() -> AppError {
    AppError::NotFound("Not Found".to_string())
}
