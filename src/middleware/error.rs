use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppError {
    #[error("{description}")]
    Generic { description: String },
    #[error("Invalid configuration - {reason}")]
    Config { reason: String },
    #[error("No document in {collection} matched {filter}")]
    NotFound { collection: String, filter: String },
    #[error("Couldn't decode document from {collection} - {reason}")]
    Decode { collection: String, reason: String },
    #[error("Store error - {reason}")]
    Store { reason: String },
    #[error("Store call on {collection} timed out after {millis}ms")]
    StoreTimeout { collection: String, millis: u64 },
    #[error("Serde error - {reason}")]
    Serde { reason: String },
    #[error("Invalid filter field `{field}`")]
    InvalidField { field: String },
    #[error("You are not logged in")]
    AuthFailNoTokenCookie,
    #[error("Authentication failed")]
    AuthenticationFail,
    #[error("Auth gateway error - {reason}")]
    AuthGateway { reason: String },
}

pub type AppResult<T> = core::result::Result<T, AppError>;

impl AppError {
    /// A point query matched nothing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::NotFound { .. })
    }

    /// A stored document doesn't fit the requested shape.
    pub fn is_decode(&self) -> bool {
        matches!(self, AppError::Decode { .. })
    }

    /// Transport, driver or timeout failure talking to the store.
    pub fn is_store(&self) -> bool {
        matches!(self, AppError::Store { .. } | AppError::StoreTimeout { .. })
    }

    fn is_auth(&self) -> bool {
        matches!(
            self,
            AppError::AuthFailNoTokenCookie
                | AppError::AuthenticationFail
                | AppError::AuthGateway { .. }
        )
    }
}

impl From<surrealdb::Error> for AppError {
    fn from(value: surrealdb::Error) -> Self {
        Self::Store {
            reason: value.to_string(),
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serde {
            reason: value.to_string(),
        }
    }
}

/// Error returned from a route. The response only carries `reason`, the wrapped
/// `AppError` goes to the log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CtxError {
    pub error: AppError,
    pub status: StatusCode,
    pub reason: String,
}

pub type CtxResult<T> = core::result::Result<T, CtxError>;

impl CtxError {
    /// for slightly less verbose error mappings in handlers
    pub fn with(status: StatusCode, reason: &str) -> impl FnOnce(AppError) -> CtxError + '_ {
        move |error| CtxError {
            error,
            status,
            reason: reason.to_string(),
        }
    }
}

const UNAUTHORIZED: &str = "Unauthorized";
const INTERNAL: &str = "Internal error";

impl From<AppError> for CtxError {
    fn from(error: AppError) -> Self {
        let (status, reason) = match error.is_auth() {
            true => (StatusCode::UNAUTHORIZED, UNAUTHORIZED),
            false => (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL),
        };
        CtxError {
            error,
            status,
            reason: reason.to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct ErrorResponseBody {
    pub reason: String,
}

impl IntoResponse for CtxError {
    fn into_response(self) -> Response {
        tracing::warn!(status = %self.status, error = %self.error, "->> request failed");
        let mut response = (
            self.status,
            Json(ErrorResponseBody {
                reason: self.reason,
            }),
        )
            .into_response();
        // keep the real error around for response layers
        response.extensions_mut().insert(self.error);
        response
    }
}
