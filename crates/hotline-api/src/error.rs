use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use hotline_types::api::ErrorBody;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, error};

/// User-facing error texts. Clients display these verbatim.
pub mod msg {
    pub const INVALID_DATA: &str = "Geçersiz veri";
    pub const INVALID_PASSWORD: &str = "Geçersiz şifre";
    pub const PASSWORD_TAKEN: &str = "Bu şifre zaten kullanılıyor";
    pub const USERS_FETCH_FAILED: &str = "Kullanıcılar alınamadı";
    pub const USER_FETCH_FAILED: &str = "Kullanıcı alınamadı";
    pub const USER_NOT_FOUND: &str = "Kullanıcı bulunamadı";
    pub const MESSAGES_FETCH_FAILED: &str = "Mesajlar alınamadı";
    pub const INVALID_MESSAGE: &str = "Geçersiz mesaj verisi";
    pub const STATUS_FETCH_FAILED: &str = "Admin durumu alınamadı";
    pub const INVALID_STATUS: &str = "Geçersiz durum verisi";
    pub const SESSION_INVALID: &str = "Oturum geçersiz";
    pub const FORBIDDEN: &str = "Yetkisiz işlem";
    pub const NOT_FOUND: &str = "Bulunamadı";
    pub const INTERNAL: &str = "Internal Server Error";
}

#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed body or a broken business rule; nothing was written.
    #[error("{0}")]
    BadRequest(&'static str),

    #[error("{0}")]
    Unauthorized(&'static str),

    #[error("{0}")]
    Forbidden(&'static str),

    #[error("{0}")]
    NotFound(&'static str),

    /// The store (or another dependency) failed. The route decides which
    /// status the client sees.
    #[error("{message}: {source:#}")]
    Failed {
        status: StatusCode,
        message: &'static str,
        #[source]
        source: anyhow::Error,
    },
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Failed { status, .. } => *status,
        }
    }

    fn message(&self) -> &'static str {
        match self {
            Self::BadRequest(m) | Self::Unauthorized(m) | Self::Forbidden(m) | Self::NotFound(m) => *m,
            Self::Failed { message, .. } => *message,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Self::Failed { source, .. } = &self {
            error!("{}: {:#}", self.message(), source);
        }
        let body = ErrorBody {
            message: self.message().to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

/// Maps a store failure to a 500 carrying `message`.
pub fn internal(message: &'static str) -> impl FnOnce(anyhow::Error) -> ApiError {
    move |source| ApiError::Failed {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        message,
        source,
    }
}

/// Maps a store failure on a write route to a 400 carrying `message`. Those
/// routes report every failure as a rejected request.
pub fn rejected(message: &'static str) -> impl FnOnce(anyhow::Error) -> ApiError {
    move |source| ApiError::Failed {
        status: StatusCode::BAD_REQUEST,
        message,
        source,
    }
}

/// Validates an extracted JSON body against `T`. A request without a JSON
/// content type is read as an empty object and validated like one. Syntax
/// errors, non-object bodies, missing fields, wrong types and unknown enum
/// values all become a 400 carrying `message`.
pub fn parse_body<T: DeserializeOwned>(
    payload: Result<Json<Value>, JsonRejection>,
    message: &'static str,
) -> Result<T, ApiError> {
    let value = match payload {
        Ok(Json(value)) => value,
        Err(JsonRejection::MissingJsonContentType(_)) => Value::Object(Map::new()),
        Err(rejection) => {
            debug!("Rejected request body: {}", rejection.body_text());
            return Err(ApiError::BadRequest(message));
        }
    };
    if !value.is_object() {
        debug!("Rejected request body: expected a JSON object");
        return Err(ApiError::BadRequest(message));
    }

    serde_json::from_value(value).map_err(|e| {
        debug!("Rejected request body: {}", e);
        ApiError::BadRequest(message)
    })
}
