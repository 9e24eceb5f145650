//! Advisor endpoints backed by the chat model
//!
//! Each call builds one prompt from current records, sends it through the
//! [`ChatClient`], and echoes the inputs next to the model's reply. A failed
//! model call surfaces as [`AppError::AiUnavailable`]; missing records are
//! still plain 404s.

use chrono::Months;
use sea_orm::DatabaseConnection;
use std::fmt::Display;
use tracing::info;

use crate::ai::ChatClient;
use crate::dto::ai::{
    ChatReply, FinancialForecast, OperationSuggestions, ProductAnalysis, RiskAssessment,
};
use crate::entity::now;
use crate::error::{AppError, AppResult, OptionExt};
use crate::repository::{
    operation as operations, product as products, transaction as ledger,
};

const CHAT_PREAMBLE: &str = "You are a strategic business advisor for a fictional cartel simulation game. \
Provide helpful, creative advice while keeping responses appropriate and clearly fictional. \
User question: ";

/// The last three months up to now, as summarised in prompts
fn context_window() -> (chrono::NaiveDateTime, chrono::NaiveDateTime) {
    let ts = now();
    let since = ts
        .checked_sub_months(Months::new(3))
        .unwrap_or(ts - chrono::Duration::days(90));
    (since, ts)
}

fn or_unknown<T: Display>(value: &Option<T>) -> String {
    value
        .as_ref()
        .map(|v| v.to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

async fn ask(ai: &dyn ChatClient, prompt: &str, action: &str) -> AppResult<String> {
    ai.complete(prompt)
        .await
        .map_err(|e| AppError::AiUnavailable(format!("Failed to {}: {}", action, e)))
}

pub async fn operation_suggestions(
    db: &DatabaseConnection,
    ai: &dyn ChatClient,
    territory: Option<String>,
    risk_level: Option<i32>,
) -> AppResult<OperationSuggestions> {
    let (since, until) = context_window();
    let recent = operations::count_started_between(db, since, until).await?;

    let prompt = format!(
        "As a strategic advisor for a fictional cartel business simulation, \
suggest 3 new operation ideas based on the following context:\n\
Territory: {}\n\
Preferred risk level: {} (1-10 scale)\n\
Recent operations count: {}\n\
Provide creative but realistic operation names, descriptions, and estimated risk levels.",
        territory.as_deref().unwrap_or("Any"),
        risk_level
            .map(|r| r.to_string())
            .unwrap_or_else(|| "Medium".to_string()),
        recent
    );

    let suggestions = ask(ai, &prompt, "generate operation suggestions").await?;
    info!("Generated operation suggestions from {} recent operation(s)", recent);
    Ok(OperationSuggestions {
        suggestions,
        territory,
        requested_risk_level: risk_level,
        context_operations: recent,
        generated_at: now(),
    })
}

pub async fn product_analysis(
    db: &DatabaseConnection,
    ai: &dyn ChatClient,
    product_id: i32,
) -> AppResult<ProductAnalysis> {
    let product = products::find_by_id(db, product_id)
        .await?
        .ok_or_not_found("Product not found")?;

    let prompt = format!(
        "Analyze the market for this fictional product in a business simulation:\n\
Product: {} ({})\n\
Type: {}\n\
Current price: ${} per {}\n\
Origin: {}\n\
Purity: {}%\n\n\
Provide market analysis including:\n\
1. Pricing recommendations\n\
2. Market trends\n\
3. Competitive positioning\n\
4. Risk factors",
        product.name,
        product.code_name,
        product.product_type,
        or_unknown(&product.price_per_unit),
        or_unknown(&product.unit_measure),
        or_unknown(&product.origin_country),
        or_unknown(&product.purity_level),
    );

    let analysis = ask(ai, &prompt, "analyze product market").await?;
    Ok(ProductAnalysis {
        product_id,
        product_name: product.name,
        analysis,
        current_price: product.price_per_unit,
        analyzed_at: now(),
    })
}

pub async fn risk_assessment(
    db: &DatabaseConnection,
    ai: &dyn ChatClient,
    operation_id: i32,
) -> AppResult<RiskAssessment> {
    let operation = operations::find_by_id(db, operation_id)
        .await?
        .ok_or_not_found("Operation not found")?;
    let crew = operations::participant_ids(db, operation.id).await?;

    let prompt = format!(
        "Assess the risk for this fictional business operation:\n\
Operation: {} ({})\n\
Location: {}\n\
Current risk level: {}/10\n\
Participants: {}\n\
Status: {}\n\
Estimated profit: ${}\n\n\
Provide a detailed risk assessment including:\n\
1. Risk factors analysis\n\
2. Mitigation strategies\n\
3. Success probability\n\
4. Contingency recommendations",
        operation.name,
        operation.code_name,
        or_unknown(&operation.location),
        or_unknown(&operation.risk_level),
        crew.len(),
        operation.status,
        or_unknown(&operation.estimated_profit),
    );

    let risk_assessment = ask(ai, &prompt, "assess operation risk").await?;
    Ok(RiskAssessment {
        operation_id,
        operation_name: operation.name,
        current_risk_level: operation.risk_level,
        risk_assessment,
        assessed_at: now(),
    })
}

pub async fn chat(ai: &dyn ChatClient, message: Option<String>) -> AppResult<ChatReply> {
    let message = match message {
        Some(m) if !m.trim().is_empty() => m,
        _ => return Err(AppError::BadRequest("Message is required".into())),
    };

    let prompt = format!("{}{}", CHAT_PREAMBLE, message);
    let response = ask(ai, &prompt, "process chat message").await?;
    Ok(ChatReply {
        message,
        response,
        timestamp: chrono::Utc::now().timestamp_millis(),
    })
}

pub async fn financial_forecast(
    db: &DatabaseConnection,
    ai: &dyn ChatClient,
    months: u32,
) -> AppResult<FinancialForecast> {
    let (since, until) = context_window();
    let history = ledger::count_between(db, since, until).await?;

    let prompt = format!(
        "Generate a financial forecast for the next {} months based on this fictional business data:\n\
Historical transactions: {} transactions in last 3 months\n\
Provide forecasting including:\n\
1. Revenue projections\n\
2. Market trends analysis\n\
3. Growth opportunities\n\
4. Risk factors\n\
5. Strategic recommendations",
        months, history
    );

    let forecast = ask(ai, &prompt, "generate financial forecast").await?;
    Ok(FinancialForecast {
        forecast_period: format!("{} months", months),
        historical_data_points: history,
        forecast,
        generated_at: now(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{ActiveModelTrait, Set};

    use crate::ai::stub::StubClient;
    use crate::db::test_db;
    use crate::entity::{operation, Role};
    use crate::repository::operation::replace_participants;
    use crate::service::testutil::{seed_operation, seed_product, seed_user};

    #[tokio::test]
    async fn test_suggestions_count_recent_operations() {
        let db = test_db().await;
        let boss = seed_user(&db, "tony", Role::Boss).await;
        seed_operation(&db, "NR-1", boss.id).await;
        seed_operation(&db, "NR-2", boss.id).await;
        let ai = StubClient::replying("Try the coast.");

        let result = operation_suggestions(&db, &ai, Some("Harbor".into()), Some(3))
            .await
            .unwrap();
        assert_eq!(result.suggestions, "Try the coast.");
        assert_eq!(result.context_operations, 2);
        assert_eq!(result.requested_risk_level, Some(3));

        let prompt = ai.last_prompt().unwrap();
        assert!(prompt.contains("Territory: Harbor"));
        assert!(prompt.contains("Recent operations count: 2"));

        operation_suggestions(&db, &ai, None, None).await.unwrap();
        let prompt = ai.last_prompt().unwrap();
        assert!(prompt.contains("Territory: Any"));
        assert!(prompt.contains("Preferred risk level: Medium"));
    }

    #[tokio::test]
    async fn test_planned_future_operations_are_not_recent() {
        let db = test_db().await;
        let boss = seed_user(&db, "tony", Role::Boss).await;
        seed_operation(&db, "NR-1", boss.id).await;
        let ahead = seed_operation(&db, "NR-2", boss.id).await;
        let mut active: operation::ActiveModel = ahead.into();
        active.start_date = Set(Some(now() + chrono::Duration::days(30)));
        active.update(&db).await.unwrap();
        let ai = StubClient::replying("Wait.");

        let result = operation_suggestions(&db, &ai, None, None).await.unwrap();
        assert_eq!(result.context_operations, 1);
    }

    #[tokio::test]
    async fn test_product_analysis() {
        let db = test_db().await;
        let product = seed_product(&db, "BLUE", 100.0).await;
        let ai = StubClient::replying("Raise prices.");

        let result = product_analysis(&db, &ai, product.id).await.unwrap();
        assert_eq!(result.analysis, "Raise prices.");
        assert_eq!(result.current_price, Some(100.0));
        let prompt = ai.last_prompt().unwrap();
        assert!(prompt.contains("(BLUE)"));
        assert!(prompt.contains("Type: CRYSTAL"));
        assert!(prompt.contains("Purity: 90%"));

        let err = product_analysis(&db, &ai, 404).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(ref m) if m == "Product not found"));
    }

    #[tokio::test]
    async fn test_risk_assessment_counts_participants() {
        let db = test_db().await;
        let boss = seed_user(&db, "tony", Role::Boss).await;
        let rico = seed_user(&db, "rico", Role::Lieutenant).await;
        let op = seed_operation(&db, "NR-1", boss.id).await;
        replace_participants(&db, op.id, &[boss.id, rico.id]).await.unwrap();
        let ai = StubClient::replying("Moderate.");

        let result = risk_assessment(&db, &ai, op.id).await.unwrap();
        assert_eq!(result.current_risk_level, Some(5));
        assert_eq!(result.operation_name, op.name);
        let prompt = ai.last_prompt().unwrap();
        assert!(prompt.contains("Participants: 2"));
        assert!(prompt.contains("Status: PLANNED"));
    }

    #[tokio::test]
    async fn test_chat_validation_and_preamble() {
        let ai = StubClient::replying("Stay fictional.");
        let err = chat(&ai, Some("   ".into())).await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(ref m) if m == "Message is required"));
        let err = chat(&ai, None).await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
        assert!(ai.last_prompt().is_none());

        let reply = chat(&ai, Some("Where next?".into())).await.unwrap();
        assert_eq!(reply.message, "Where next?");
        assert_eq!(reply.response, "Stay fictional.");
        assert!(reply.timestamp > 0);
        let prompt = ai.last_prompt().unwrap();
        assert!(prompt.starts_with("You are a strategic business advisor"));
        assert!(prompt.ends_with("User question: Where next?"));
    }

    #[tokio::test]
    async fn test_model_failure_maps_to_unavailable() {
        let db = test_db().await;
        let ai = StubClient::failing();

        let err = financial_forecast(&db, &ai, 6).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "AI service unavailable: Failed to generate financial forecast: connection refused"
        );
        assert_eq!(err.status(), axum::http::StatusCode::INTERNAL_SERVER_ERROR);

        let err = chat(&ai, Some("hi".into())).await.unwrap_err();
        assert!(matches!(err, AppError::AiUnavailable(ref m) if m.starts_with("Failed to process chat message")));
    }

    #[tokio::test]
    async fn test_forecast_period() {
        let db = test_db().await;
        let ai = StubClient::replying("Up and to the right.");
        let result = financial_forecast(&db, &ai, 6).await.unwrap();
        assert_eq!(result.forecast_period, "6 months");
        assert_eq!(result.historical_data_points, 0);
        assert!(ai.last_prompt().unwrap().contains("next 6 months"));
    }
}
