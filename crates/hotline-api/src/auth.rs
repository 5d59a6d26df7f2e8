use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    response::IntoResponse,
};
use jsonwebtoken::{EncodingKey, Header, encode};
use serde_json::Value;
use tracing::{info, warn};

use hotline_db::Store;
use hotline_types::api::{AuthResponse, Claims, LoginRequest, SignupRequest};
use hotline_types::models::User;

use crate::config::Config;
use crate::error::{ApiError, internal, msg, parse_body, rejected};

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub store: Store,
    pub jwt_secret: String,
    pub token_ttl: chrono::Duration,
    pub require_token: bool,
}

impl AppStateInner {
    /// Wraps an already-opened store together with the token settings.
    pub fn new(store: Store, config: &Config) -> AppState {
        Arc::new(Self {
            store,
            jwt_secret: config.jwt_secret.clone(),
            token_ttl: chrono::Duration::hours(config.token_ttl_hours),
            require_token: config.require_token,
        })
    }

    fn issue_token(&self, user: &User) -> Result<String, ApiError> {
        create_token(&self.jwt_secret, user, self.token_ttl).map_err(internal(msg::INTERNAL))
    }
}

/// POST /api/auth/login — the password alone identifies the account.
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let req: LoginRequest = parse_body(payload, msg::INVALID_DATA)?;
    if req.password.is_empty() {
        return Err(ApiError::BadRequest(msg::INVALID_DATA));
    }

    let user = state
        .store
        .get_user_by_password(&req.password)
        .map_err(rejected(msg::INVALID_DATA))?
        .ok_or_else(|| {
            warn!("Login failed: no user with the supplied password");
            ApiError::Unauthorized(msg::INVALID_PASSWORD)
        })?;

    let token = state.issue_token(&user)?;
    info!(user_id = %user.id, is_admin = user.is_admin, "User logged in");

    Ok(Json(AuthResponse { user, token }))
}

/// POST /api/auth/signup
pub async fn signup(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let req: SignupRequest = parse_body(payload, msg::INVALID_DATA)?;

    // Check and insert are separate store calls: two concurrent signups with
    // the same password can both get through.
    if state
        .store
        .get_user_by_password(&req.password)
        .map_err(rejected(msg::INVALID_DATA))?
        .is_some()
    {
        warn!("Signup rejected: password already in use");
        return Err(ApiError::BadRequest(msg::PASSWORD_TAKEN));
    }

    let user = state
        .store
        .create_user(&req.name, &req.password)
        .map_err(rejected(msg::INVALID_DATA))?;

    let token = state.issue_token(&user)?;
    info!(user_id = %user.id, "New user signed up");

    Ok(Json(AuthResponse { user, token }))
}

fn create_token(secret: &str, user: &User, ttl: chrono::Duration) -> anyhow::Result<String> {
    let claims = Claims {
        sub: user.id.clone(),
        name: user.name.clone(),
        is_admin: user.is_admin,
        exp: (chrono::Utc::now() + ttl).timestamp() as usize,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;

    Ok(token)
}
