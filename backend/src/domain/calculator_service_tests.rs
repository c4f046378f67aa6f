//! Tests for the calculator service.

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use mockall::predicate::eq;
use rstest::rstest;
use serde_json::json;

use super::*;
use crate::domain::ports::MockCalculationHistoryRepository;
use crate::domain::{CalculationId, ErrorCode};

fn make_service(
    repo: MockCalculationHistoryRepository,
) -> CalculatorService<MockCalculationHistoryRepository> {
    CalculatorService::new(Arc::new(repo))
}

fn stored(id: i64, calculation: &NewCalculation) -> Calculation {
    Calculation {
        id: CalculationId::new(id),
        expression: calculation.expression.clone(),
        result: calculation.result.clone(),
        created_at: Utc
            .with_ymd_and_hms(2026, 1, 2, 3, 4, 5)
            .single()
            .expect("valid timestamp"),
    }
}

#[tokio::test]
async fn calculate_records_successful_evaluation() {
    let mut repo = MockCalculationHistoryRepository::new();
    repo.expect_append()
        .with(eq(NewCalculation::new("2+2", "4")))
        .times(1)
        .returning(|calculation| Ok(stored(1, calculation)));

    let evaluation = make_service(repo)
        .calculate(Some("2+2".to_owned()))
        .await
        .expect("calculation succeeds");

    assert_eq!(evaluation.expression, "2+2");
    assert_eq!(evaluation.result, "4");
}

#[rstest]
#[case(None, "Expression is required")]
#[case(Some("2+x"), "Invalid characters in expression")]
#[case(Some("2+"), "Invalid expression")]
#[case(Some("10/(5-5)"), "Invalid calculation result")]
#[tokio::test]
async fn calculate_rejects_invalid_input_without_touching_history(
    #[case] expression: Option<&str>,
    #[case] message: &str,
) {
    let mut repo = MockCalculationHistoryRepository::new();
    repo.expect_append().never();

    let error = make_service(repo)
        .calculate(expression.map(str::to_owned))
        .await
        .expect_err("invalid expression");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    assert_eq!(error.message(), message);
}

#[tokio::test]
async fn invalid_characters_report_offending_character() {
    let mut repo = MockCalculationHistoryRepository::new();
    repo.expect_append().never();

    let error = make_service(repo)
        .calculate(Some("1+a".to_owned()))
        .await
        .expect_err("invalid characters");

    assert_eq!(
        error.details(),
        Some(&json!({ "code": "invalid_characters", "character": "a", "offset": 2 }))
    );
}

#[tokio::test]
async fn calculate_maps_store_failures_to_internal_error() {
    let mut repo = MockCalculationHistoryRepository::new();
    repo.expect_append()
        .times(1)
        .returning(|_| Err(HistoryRepositoryError::connection("refused")));

    let error = make_service(repo)
        .calculate(Some("1+1".to_owned()))
        .await
        .expect_err("store failure");

    assert_eq!(error.code(), ErrorCode::InternalError);
    assert_eq!(error.message(), SAVE_CALCULATION_FAILED);
}

#[tokio::test]
async fn recent_history_requests_the_history_limit() {
    let mut repo = MockCalculationHistoryRepository::new();
    repo.expect_list_recent()
        .with(eq(HISTORY_LIMIT))
        .times(1)
        .returning(|_| Ok(vec![stored(7, &NewCalculation::new("3*3", "9"))]));

    let history = make_service(repo)
        .recent_history()
        .await
        .expect("history loads");

    assert_eq!(history.len(), 1);
    assert_eq!(history.first().map(|entry| entry.id), Some(CalculationId::new(7)));
}

#[tokio::test]
async fn recent_history_failure_uses_generic_message() {
    let mut repo = MockCalculationHistoryRepository::new();
    repo.expect_list_recent()
        .times(1)
        .returning(|_| Err(HistoryRepositoryError::query("relation missing")));

    let error = make_service(repo)
        .recent_history()
        .await
        .expect_err("history failure");

    assert_eq!(error.code(), ErrorCode::InternalError);
    assert_eq!(error.message(), FETCH_HISTORY_FAILED);
    assert!(error.details().is_none());
}

#[tokio::test]
async fn clear_history_delegates_to_store() {
    let mut repo = MockCalculationHistoryRepository::new();
    repo.expect_clear().times(1).returning(|| Ok(()));

    make_service(repo)
        .clear_history()
        .await
        .expect("history cleared");
}

#[tokio::test]
async fn clear_history_failure_uses_generic_message() {
    let mut repo = MockCalculationHistoryRepository::new();
    repo.expect_clear()
        .times(1)
        .returning(|| Err(HistoryRepositoryError::connection("gone")));

    let error = make_service(repo)
        .clear_history()
        .await
        .expect_err("clear failure");

    assert_eq!(error.message(), CLEAR_HISTORY_FAILED);
}
