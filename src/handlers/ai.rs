//! Advisor handlers

use axum::{extract::State, Extension};

use crate::dto::ai::{
    ChatReply, ChatRequest, FinancialForecast, ForecastQuery, OperationSuggestions,
    ProductAnalysis, ProductAnalysisQuery, RiskAssessment, RiskAssessmentQuery, SuggestionQuery,
};
use crate::error::AppResult;
use crate::extract::{Json, Query};
use crate::middleware::DbConn;
use crate::service::ai as ai_service;
use crate::state::AppState;

/// GET /api/ai/operation-suggestions?territory=&riskLevel=
pub async fn operation_suggestions(
    State(state): State<AppState>,
    Extension(db): Extension<DbConn>,
    Query(query): Query<SuggestionQuery>,
) -> AppResult<Json<OperationSuggestions>> {
    let result =
        ai_service::operation_suggestions(&db, state.ai.as_ref(), query.territory, query.risk_level)
            .await?;
    Ok(Json(result))
}

/// GET /api/ai/product-analysis?productId=
pub async fn product_analysis(
    State(state): State<AppState>,
    Extension(db): Extension<DbConn>,
    Query(query): Query<ProductAnalysisQuery>,
) -> AppResult<Json<ProductAnalysis>> {
    let result = ai_service::product_analysis(&db, state.ai.as_ref(), query.product_id).await?;
    Ok(Json(result))
}

/// GET /api/ai/risk-assessment?operationId=
pub async fn risk_assessment(
    State(state): State<AppState>,
    Extension(db): Extension<DbConn>,
    Query(query): Query<RiskAssessmentQuery>,
) -> AppResult<Json<RiskAssessment>> {
    let result = ai_service::risk_assessment(&db, state.ai.as_ref(), query.operation_id).await?;
    Ok(Json(result))
}

/// POST /api/ai/chat
pub async fn chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> AppResult<Json<ChatReply>> {
    Ok(Json(ai_service::chat(state.ai.as_ref(), req.message).await?))
}

/// GET /api/ai/financial-forecast?months=
pub async fn financial_forecast(
    State(state): State<AppState>,
    Extension(db): Extension<DbConn>,
    Query(query): Query<ForecastQuery>,
) -> AppResult<Json<FinancialForecast>> {
    let result = ai_service::financial_forecast(&db, state.ai.as_ref(), query.months).await?;
    Ok(Json(result))
}
