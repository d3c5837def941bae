//! Rubric DTOs

use crate::scoring::RubricEngine;
use exam_grading_domain::rubric::{ItemBound, BASE_CREDIT, MAX_TOTAL};
use exam_grading_domain::ValidationResult;
use serde::{Deserialize, Serialize};

/// The bound table a grading form renders its inputs from
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RubricResponse {
    pub base_credit: i64,
    pub max_total: i64,
    pub max_achievable_total: i64,
    pub items: Vec<ItemBound>,
}

impl RubricResponse {
    pub fn from_engine(engine: &RubricEngine) -> Self {
        Self {
            base_credit: BASE_CREDIT,
            max_total: MAX_TOTAL,
            max_achievable_total: engine.max_total(),
            items: engine.items().iter().map(|item| item.bound()).collect(),
        }
    }
}

/// Aggregate total of a score record and its 1-10 mark
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalResponse {
    pub total: i64,
    pub final_mark: f64,
}

/// Validation outcome together with the total it was checked against
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateResponse {
    #[serde(flatten)]
    pub result: ValidationResult,
    pub total: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rubric_response_lists_every_item() {
        let response = RubricResponse::from_engine(&RubricEngine::new());
        assert_eq!(response.items.len(), 21);
        assert_eq!(response.base_credit, 10);
        assert_eq!(response.max_achievable_total, 91);

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["items"][0]["sectionLabel"], "Section I.A");
        assert_eq!(json["maxTotal"], 100);
    }

    #[test]
    fn test_validate_response_flattens_result() {
        let response = ValidateResponse {
            result: ValidationResult::with_errors(vec!["bad".into()]),
            total: 12,
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["isValid"], false);
        assert_eq!(json["errors"][0], "bad");
        assert_eq!(json["total"], 12);
    }
}
