use std::any::Any;

use axum::{
    Router,
    handler::Handler,
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use tower_http::catch_panic::CatchPanicLayer;
use tracing::error;

use crate::auth::{self, AppState};
use crate::error::{ApiError, msg};
use crate::middleware::{require_admin, require_token};
use crate::{admin, messages, users};

/// Builds the full `/api` router over `state`.
pub fn router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/signup", post(auth::signup));

    let update_status = if state.require_token {
        put(admin::update_status.layer(middleware::from_fn(require_admin)))
    } else {
        put(admin::update_status)
    };

    let mut protected_routes = Router::new()
        .route("/api/users", get(users::list_users))
        .route("/api/users/{id}", get(users::get_user))
        .route("/api/messages", post(messages::send_message))
        .route("/api/messages/{user_id}", get(messages::get_user_messages))
        .route(
            "/api/messages/between/{user_id1}/{user_id2}",
            get(messages::get_conversation),
        )
        .route("/api/admin/status", get(admin::get_status).merge(update_status));

    if state.require_token {
        protected_routes = protected_routes
            .route_layer(middleware::from_fn_with_state(state.clone(), require_token));
    }

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .fallback(not_found)
        .layer(CatchPanicLayer::custom(panic_response))
        .with_state(state)
}

async fn not_found() -> ApiError {
    ApiError::NotFound(msg::NOT_FOUND)
}

/// Last-resort handler: a panicking request gets a JSON 500 and the server
/// keeps running.
fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic payload"
    };
    error!("Request handler panicked: {}", detail);

    (
        axum::http::StatusCode::INTERNAL_SERVER_ERROR,
        axum::Json(hotline_types::api::ErrorBody {
            message: msg::INTERNAL.to_string(),
        }),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use axum::{body::Body, http::Request, http::StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use super::*;

    #[tokio::test]
    async fn panic_becomes_json_500() {
        async fn boom() -> &'static str {
            panic!("boom")
        }

        let app: Router = Router::new()
            .route("/boom", get(boom))
            .layer(CatchPanicLayer::custom(panic_response));

        let resp = app
            .oneshot(Request::get("/boom").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["message"], msg::INTERNAL);
    }
}
