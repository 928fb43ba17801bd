use axum::{
	Json, Router,
	extract::{State, rejection::JsonRejection},
	http::{HeaderMap, StatusCode},
	response::{IntoResponse, Response},
	routing::{get, post},
};
use serde::{Deserialize, Serialize};

use crate::state::AppState;
use scout_service::{Error as ServiceError, SearchOptions, SearchResponse};

/// Identifies the searching user. Takes precedence over `searching_user_id` in the body.
pub const USER_ID_HEADER: &str = "X-Scout-User-Id";

#[derive(Debug, Deserialize)]
pub struct SearchBody {
	#[serde(default)]
	pub term: String,
	#[serde(flatten)]
	pub options: SearchOptions,
}

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(health))
		.route("/v1/users/search", post(search_users))
		.with_state(state)
}

async fn health() -> StatusCode {
	StatusCode::OK
}

async fn search_users(
	State(state): State<AppState>,
	headers: HeaderMap,
	payload: Result<Json<SearchBody>, JsonRejection>,
) -> Result<Json<SearchResponse>, ApiError> {
	let Json(SearchBody { term, mut options }) = payload.map_err(|rejection| {
		json_error(StatusCode::BAD_REQUEST, "INVALID_REQUEST", rejection.body_text())
	})?;

	if let Some(user_id) = caller_from_headers(&headers)? {
		options.searching_user_id = Some(user_id);
	}

	let response = state.service.search(&term, options).await?;

	Ok(Json(response))
}

fn caller_from_headers(headers: &HeaderMap) -> Result<Option<i64>, ApiError> {
	let Some(raw) = headers.get(USER_ID_HEADER) else {
		return Ok(None);
	};
	let user_id = raw.to_str().ok().and_then(|value| value.trim().parse::<i64>().ok());

	match user_id {
		Some(user_id) => Ok(Some(user_id)),
		None => Err(json_error(
			StatusCode::BAD_REQUEST,
			"INVALID_REQUEST",
			format!("{USER_ID_HEADER} must be an integer user id."),
		)),
	}
}

#[derive(Debug, Serialize)]
struct ErrorBody {
	error_code: String,
	message: String,
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	error_code: String,
	message: String,
}
impl ApiError {
	fn new(status: StatusCode, error_code: impl Into<String>, message: impl Into<String>) -> Self {
		Self { status, error_code: error_code.into(), message: message.into() }
	}
}

impl From<ServiceError> for ApiError {
	fn from(err: ServiceError) -> Self {
		match err {
			ServiceError::InvalidRequest { message } =>
				json_error(StatusCode::BAD_REQUEST, "INVALID_REQUEST", message),
			ServiceError::Authorization { message } =>
				json_error(StatusCode::FORBIDDEN, "FORBIDDEN", message),
			ServiceError::Storage { message } => {
				tracing::error!(error = %message, "User search failed in storage.");

				json_error(
					StatusCode::SERVICE_UNAVAILABLE,
					"STORAGE_UNAVAILABLE",
					"User lookup is temporarily unavailable.",
				)
			},
		}
	}
}

impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let body = ErrorBody { error_code: self.error_code, message: self.message };

		(self.status, Json(body)).into_response()
	}
}

pub fn json_error(status: StatusCode, code: &str, message: impl Into<String>) -> ApiError {
	ApiError::new(status, code, message)
}
