//! HTTP request handlers for the payroll engine API.
//!
//! This module contains the handler functions for all API endpoints.

use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{compute_mpf, reallocate_pay};
use crate::models::{Employee, MonthKey, PeriodRecord};
use crate::reporting::{contribution_due_date, ir56b_deadline};

use super::request::{
    AnnualSummaryQuery, DisregardedRequest, MpfRequest, ReallocateRequest, RecordsQuery,
};
use super::response::{
    AnnualSummaryResponse, ApiError, ApiErrorResponse, RegistryResponse, RemittanceResponse,
};
use super::state::AppState;

type ApiResult = Result<Response, ApiErrorResponse>;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/mpf", post(mpf_handler))
        .route("/mpf/remittance/:month", get(remittance_handler))
        .route("/reallocate", post(reallocate_handler))
        .route("/records", get(records_handler))
        .route("/employees", get(employees_handler))
        .route("/employees/:id/adw", get(adw_handler))
        .route("/employees/:id/annual-summary", get(annual_summary_handler))
        .route("/disregarded", get(list_disregarded_handler).post(add_disregarded_handler))
        .route(
            "/disregarded/:id",
            put(edit_disregarded_handler).delete(delete_disregarded_handler),
        )
        .with_state(state)
}

fn json_ok<T: Serialize>(body: T) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

/// Unwraps a JSON body, mapping extractor rejections to API errors.
fn parse_body<T>(
    payload: Result<Json<T>, JsonRejection>,
    correlation_id: Uuid,
) -> Result<T, ApiErrorResponse> {
    let rejection = match payload {
        Ok(Json(body)) => return Ok(body),
        Err(rejection) => rejection,
    };

    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };

    Err(ApiErrorResponse::bad_request(error))
}

fn parse_entry_id(raw: &str) -> Result<Uuid, ApiErrorResponse> {
    Uuid::parse_str(raw).map_err(|_| {
        ApiErrorResponse::bad_request(ApiError::validation_error(format!(
            "'{}' is not a valid entry id",
            raw
        )))
    })
}

fn rejected(correlation_id: Uuid, error: impl Into<ApiErrorResponse>) -> ApiErrorResponse {
    let error = error.into();
    warn!(
        correlation_id = %correlation_id,
        status = error.status.as_u16(),
        code = %error.error.code,
        "Request rejected"
    );
    error
}

/// Handler for POST /mpf.
async fn mpf_handler(
    State(state): State<AppState>,
    payload: Result<Json<MpfRequest>, JsonRejection>,
) -> ApiResult {
    let correlation_id = Uuid::new_v4();
    let request = parse_body(payload, correlation_id)?;

    let engine = state.engine().await;
    let result = compute_mpf(
        request.scheme,
        request.gross_pay,
        request.period_days,
        &engine.config().mpf,
    );

    info!(
        correlation_id = %correlation_id,
        scheme = request.scheme.label(),
        employer = %result.employer_mandatory,
        employee = %result.employee_mandatory,
        "MPF calculation completed"
    );
    Ok(json_ok(result))
}

/// Handler for POST /reallocate.
async fn reallocate_handler(
    State(state): State<AppState>,
    payload: Result<Json<ReallocateRequest>, JsonRejection>,
) -> ApiResult {
    let correlation_id = Uuid::new_v4();
    let request = parse_body(payload, correlation_id)?;
    request
        .validate()
        .map_err(|e| rejected(correlation_id, e))?;

    let engine = state.engine().await;
    let result = reallocate_pay(
        &request.pay_basis,
        request.total_days,
        request.disregarded_days,
        request.pay_rule,
        &engine.config().reallocation,
    );

    info!(
        correlation_id = %correlation_id,
        gross_pay = %result.gross_pay,
        excluded_pay = %result.excluded_pay,
        "Reallocation completed"
    );
    Ok(json_ok(result))
}

/// Handler for GET /records.
async fn records_handler(
    State(state): State<AppState>,
    Query(query): Query<RecordsQuery>,
) -> ApiResult {
    let engine = state.engine().await;
    let records: Vec<&PeriodRecord> = match query.employee_id.as_deref() {
        Some(employee_id) => engine.records_for(employee_id),
        None => engine.records().iter().collect(),
    };
    Ok(json_ok(records))
}

/// Handler for GET /employees.
async fn employees_handler(State(state): State<AppState>) -> ApiResult {
    let engine = state.engine().await;
    let employees: Vec<&Employee> = engine.store().employees().collect();
    Ok(json_ok(employees))
}

/// Handler for GET /employees/:id/adw.
async fn adw_handler(State(state): State<AppState>, Path(employee_id): Path<String>) -> ApiResult {
    let correlation_id = Uuid::new_v4();
    let engine = state.engine().await;

    let result = engine
        .compute_adw(&employee_id)
        .map_err(|e| rejected(correlation_id, e))?;

    info!(
        correlation_id = %correlation_id,
        employee_id = %employee_id,
        final_adw = %result.final_adw,
        "ADW calculation completed"
    );
    Ok(json_ok(result))
}

/// Handler for GET /employees/:id/annual-summary.
async fn annual_summary_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
    Query(query): Query<AnnualSummaryQuery>,
) -> ApiResult {
    let correlation_id = Uuid::new_v4();
    let (start, end) = query.bounds().map_err(|e| rejected(correlation_id, e))?;

    let engine = state.engine().await;
    let summary = engine
        .annual_summary(&employee_id, start, end)
        .map_err(|e| rejected(correlation_id, e))?;
    let deadline = ir56b_deadline(&summary.end, &engine.config().reporting)
        .map_err(|e| rejected(correlation_id, e))?;

    Ok(json_ok(AnnualSummaryResponse {
        summary,
        ir56b_deadline: deadline,
    }))
}

/// Handler for GET /mpf/remittance/:month.
async fn remittance_handler(
    State(state): State<AppState>,
    Path(month): Path<String>,
) -> ApiResult {
    let correlation_id = Uuid::new_v4();
    let month = MonthKey::parse(&month).map_err(|e| rejected(correlation_id, e))?;

    let engine = state.engine().await;
    let due_date = contribution_due_date(&month, &engine.config().reporting)
        .map_err(|e| rejected(correlation_id, e))?;

    Ok(json_ok(RemittanceResponse {
        summary: engine.remittance(&month),
        due_date,
    }))
}

/// Handler for GET /disregarded.
async fn list_disregarded_handler(State(state): State<AppState>) -> ApiResult {
    let engine = state.engine().await;
    Ok(json_ok(engine.entries()))
}

/// Handler for POST /disregarded.
async fn add_disregarded_handler(
    State(state): State<AppState>,
    payload: Result<Json<DisregardedRequest>, JsonRejection>,
) -> ApiResult {
    let correlation_id = Uuid::new_v4();
    let fields = parse_body(payload, correlation_id)?
        .into_fields()
        .map_err(|e| rejected(correlation_id, e))?;

    let mut engine = state.engine().await;
    let entry = engine
        .add_disregarded(fields)
        .map_err(|e| rejected(correlation_id, e))?;

    info!(correlation_id = %correlation_id, entry_id = %entry.id, "Registry add completed");
    Ok((
        StatusCode::CREATED,
        [(header::CONTENT_TYPE, "application/json")],
        Json(RegistryResponse {
            entry,
            records: engine.records().to_vec(),
        }),
    )
        .into_response())
}

/// Handler for PUT /disregarded/:id.
async fn edit_disregarded_handler(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    payload: Result<Json<DisregardedRequest>, JsonRejection>,
) -> ApiResult {
    let correlation_id = Uuid::new_v4();
    let entry_id = parse_entry_id(&raw_id)?;
    let fields = parse_body(payload, correlation_id)?
        .into_fields()
        .map_err(|e| rejected(correlation_id, e))?;

    let mut engine = state.engine().await;
    let entry = engine
        .edit_disregarded(entry_id, fields)
        .map_err(|e| rejected(correlation_id, e))?;

    info!(correlation_id = %correlation_id, entry_id = %entry.id, "Registry edit completed");
    Ok(json_ok(RegistryResponse {
        entry,
        records: engine.records().to_vec(),
    }))
}

/// Handler for DELETE /disregarded/:id.
async fn delete_disregarded_handler(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> ApiResult {
    let correlation_id = Uuid::new_v4();
    let entry_id = parse_entry_id(&raw_id)?;

    let mut engine = state.engine().await;
    let entry = engine
        .delete_disregarded(entry_id)
        .map_err(|e| rejected(correlation_id, e))?;

    info!(correlation_id = %correlation_id, entry_id = %entry.id, "Registry delete completed");
    Ok(json_ok(RegistryResponse {
        entry,
        records: engine.records().to_vec(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StatutoryConfig;
    use crate::store::SeedData;
    use axum::body::Body;
    use axum::http::Request;
    use serde_json::Value;
    use tower::ServiceExt;

    fn create_test_state() -> AppState {
        let seed = SeedData::load("./data/demo.yaml").expect("Failed to load seed");
        let engine = seed
            .into_engine(StatutoryConfig::default())
            .expect("Failed to build engine");
        AppState::new(engine)
    }

    async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_mpf_returns_contributions() {
        let router = create_router(create_test_state());
        let (status, body) = send(
            router,
            post_json("/mpf", r#"{"scheme": "master_trust", "gross_pay": "35000"}"#),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["employer_mandatory"], "1500");
        assert_eq!(body["employee_mandatory"], "1500");
        assert_eq!(body["period_days"], 30);
    }

    #[tokio::test]
    async fn test_mpf_malformed_json() {
        let router = create_router(create_test_state());
        let (status, body) = send(router, post_json("/mpf", "{not json")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_mpf_missing_field() {
        let router = create_router(create_test_state());
        let (status, body) = send(router, post_json("/mpf", r#"{"scheme": "master_trust"}"#)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_adw_unknown_employee() {
        let router = create_router(create_test_state());
        let (status, body) = send(router, get("/employees/EMP404/adw")).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "EMPLOYEE_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_remittance_invalid_month() {
        let router = create_router(create_test_state());
        let (status, body) = send(router, get("/mpf/remittance/2025-13")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_MONTH");
    }

    #[tokio::test]
    async fn test_delete_bad_entry_id() {
        let router = create_router(create_test_state());
        let request = Request::builder()
            .method("DELETE")
            .uri("/disregarded/not-a-uuid")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(router, request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_records_filtered_by_employee() {
        let router = create_router(create_test_state());
        let (status, body) = send(router, get("/records?employee_id=EMP002")).await;

        assert_eq!(status, StatusCode::OK);
        let records = body.as_array().unwrap();
        assert_eq!(records.len(), 12);
        assert!(records.iter().all(|r| r["employee_id"] == "EMP002"));
    }
}
