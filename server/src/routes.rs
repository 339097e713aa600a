use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use grimm_core::model::{SearchRequest, SearchResponse};
use serde_json::{json, Value};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::error::ApiError;
use crate::users::User;
use crate::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/hello", get(hello))
        .route("/api/users", get(list_users).post(create_user))
        .route("/api/search", post(search))
        .route("/api/search/tales", get(list_tales))
        .route("/api/search/tales/:id", get(tale_by_id))
        .route("/api/search/stats", get(stats))
        .with_state(state)
}

async fn hello() -> Json<Value> {
    let timestamp = OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_default();
    Json(json!({
        "message": "Hello from the fairy-tale search backend!",
        "timestamp": timestamp,
    }))
}

async fn list_users(State(state): State<AppState>) -> Json<Vec<User>> {
    Json(state.users.all())
}

async fn create_user(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let name = body
        .get("name")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty());
    let email = body
        .get("email")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty());
    let (Some(name), Some(email)) = (name, email) else {
        return Err(ApiError::validation("Name and email are required"));
    };
    let user = state.users.create(name, email);
    Ok((StatusCode::CREATED, Json(user)))
}

/// Body fields are validated by hand so a missing or wrong-typed `query`
/// yields the documented 400 body instead of a framework rejection.
async fn search(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<SearchResponse>, ApiError> {
    let query = body
        .get("query")
        .and_then(Value::as_str)
        .map(str::trim)
        .unwrap_or("");
    if query.is_empty() {
        return Err(ApiError::validation(
            "Query is required and must be a non-empty string",
        ));
    }

    let limit = match body.get("limit") {
        None | Some(Value::Null) => 10,
        Some(v) => match v.as_u64() {
            Some(n @ 1..=50) => n as usize,
            _ => return Err(ApiError::validation("Limit must be between 1 and 50")),
        },
    };

    let case_sensitive = body
        .get("caseSensitive")
        .and_then(Value::as_bool)
        .unwrap_or(false);

    let request = SearchRequest {
        query: query.to_string(),
        limit,
        case_sensitive,
    };
    let response = state.search.search(request).await.map_err(|err| {
        tracing::error!(error = %err, "search failed");
        ApiError::internal("Internal server error during search")
    })?;
    Ok(Json(response))
}

async fn list_tales(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let tales = state.search.tales().await.map_err(|err| {
        tracing::error!(error = %err, "tale index load failed");
        ApiError::internal("Failed to fetch fairy tales list")
    })?;
    Ok(Json(json!({ "tales": tales })))
}

async fn tale_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let tale = state.search.tale_by_id(&id).await.map_err(|err| {
        tracing::error!(error = %err, "tale lookup failed");
        ApiError::internal("Failed to fetch fairy tale")
    })?;
    match tale {
        Some(tale) => Ok(Json(json!({ "tale": tale }))),
        None => Err(ApiError::not_found("Fairy tale not found")),
    }
}

/// Reports current service state without forcing index initialization, so
/// stats stay cheap and network-free.
async fn stats(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "totalTales": state.search.tale_count(),
        "isInitialized": state.search.is_initialized(),
        "baseUrl": state.search.base_url(),
    }))
}
