use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{DecodingKey, Validation, decode};
use tracing::debug;

use hotline_types::api::Claims;

use crate::auth::AppState;
use crate::error::{ApiError, msg};

/// Extract and validate the session token from the Authorization header.
/// Installed only when token enforcement is switched on.
pub async fn require_token(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .ok_or(ApiError::Unauthorized(msg::SESSION_INVALID))?;

    let claims = decode_token(token, &state.jwt_secret)?;

    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

/// Lets the request through only if `require_token` attached admin claims.
pub async fn require_admin(req: Request, next: Next) -> Result<Response, ApiError> {
    match req.extensions().get::<Claims>() {
        Some(claims) if claims.is_admin => Ok(next.run(req).await),
        Some(claims) => {
            debug!(user_id = %claims.sub, "Non-admin attempted an admin operation");
            Err(ApiError::Forbidden(msg::FORBIDDEN))
        }
        None => Err(ApiError::Unauthorized(msg::SESSION_INVALID)),
    }
}

pub fn decode_token(token: &str, secret: &str) -> Result<Claims, ApiError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| {
        debug!("Token rejected: {}", e);
        ApiError::Unauthorized(msg::SESSION_INVALID)
    })
}
