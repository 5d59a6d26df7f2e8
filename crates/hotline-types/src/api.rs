use serde::{Deserialize, Serialize};

use crate::models::{Availability, User};

// -- Token Claims --

/// Claims carried by the session token issued at login/signup.
/// Shared by the issuing handlers and the bearer-token middleware.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    pub sub: String,
    pub name: String,
    pub is_admin: bool,
    pub exp: usize,
}

// -- Auth --

// Unknown fields are ignored rather than rejected: a client posting
// `isAdmin: true` at signup must still get a regular account.

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub password: String,
}

/// Body of a successful login or signup.
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    pub user: User,
    pub token: String,
}

// -- Messages --

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    pub sender_id: String,
    pub receiver_id: String,
    pub content: String,
}

// -- Admin status --

/// Partial update merged into the admin status record. An absent `status`
/// leaves the value alone and only refreshes the timestamp; an explicit
/// `null` is rejected like any other unknown value.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateAdminStatusRequest {
    #[serde(default, deserialize_with = "present_non_null")]
    pub status: Option<Availability>,
}

/// Only called when the key is present, so `null` fails in `T`'s deserializer.
fn present_non_null<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

// -- Errors --

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}
