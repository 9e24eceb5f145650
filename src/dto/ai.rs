use serde::{Deserialize, Serialize};

fn default_months() -> u32 {
    3
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionQuery {
    pub territory: Option<String>,
    pub risk_level: Option<i32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductAnalysisQuery {
    pub product_id: i32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessmentQuery {
    pub operation_id: i32,
}

#[derive(Debug, Deserialize)]
pub struct ForecastQuery {
    #[serde(default = "default_months")]
    pub months: u32,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationSuggestions {
    pub suggestions: String,
    pub territory: Option<String>,
    pub requested_risk_level: Option<i32>,
    pub context_operations: u64,
    pub generated_at: chrono::NaiveDateTime,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductAnalysis {
    pub product_id: i32,
    pub product_name: String,
    pub analysis: String,
    pub current_price: Option<f64>,
    pub analyzed_at: chrono::NaiveDateTime,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessment {
    pub operation_id: i32,
    pub operation_name: String,
    pub current_risk_level: Option<i32>,
    pub risk_assessment: String,
    pub assessed_at: chrono::NaiveDateTime,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatReply {
    pub message: String,
    pub response: String,
    /// Unix epoch milliseconds
    pub timestamp: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialForecast {
    /// e.g. "3 months"
    pub forecast_period: String,
    pub historical_data_points: u64,
    pub forecast: String,
    pub generated_at: chrono::NaiveDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forecast_months_default() {
        let query: ForecastQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.months, 3);
    }

    #[test]
    fn test_suggestions_shape() {
        let body = OperationSuggestions {
            suggestions: "Go north".into(),
            territory: None,
            requested_risk_level: Some(4),
            context_operations: 2,
            generated_at: crate::entity::now(),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["requestedRiskLevel"], 4);
        assert_eq!(json["contextOperations"], 2);
        assert!(json["territory"].is_null());
        assert!(json.get("generatedAt").is_some());
    }
}
