//! In-memory mock of the Brigade Connect services.
//!
//! Implements the same wire contract the production backend speaks —
//! `POST /{package.Service}/{Method}` with snake_case JSON bodies,
//! protobuf-style enum strings, and Connect-style `{code, message}` error
//! bodies — backed by nothing but maps behind an `RwLock`. Integration
//! tests run the real clients against it; `main.rs` serves it standalone
//! for local development.

pub mod identity;
pub mod job;
pub mod profile;

use std::collections::HashMap;
use std::sync::Arc;

use axum::http::{header, HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use serde::Serialize;
use tokio::net::TcpListener;
use tokio::sync::RwLock;

/// Connect-style error body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

pub type RpcError = (StatusCode, Json<ErrorBody>);

pub(crate) fn rpc_error(status: StatusCode, code: &str, message: &str) -> RpcError {
    (
        status,
        Json(ErrorBody {
            code: code.to_string(),
            message: message.to_string(),
        }),
    )
}

#[derive(Clone, Debug)]
pub struct UserRecord {
    pub id: String,
    pub email: String,
    pub password: String,
    /// Wire role string, `USER_ROLE_*`.
    pub role: String,
}

#[derive(Default)]
pub struct Store {
    pub users: HashMap<String, UserRecord>,
    /// access token → user id
    pub access_tokens: HashMap<String, String>,
    /// refresh token → user id
    pub refresh_tokens: HashMap<String, String>,
    pub chef_profiles: HashMap<String, profile::ChefProfileRecord>,
    pub restaurant_profiles: HashMap<String, profile::RestaurantProfileRecord>,
    pub jobs: HashMap<String, job::JobRecord>,
    pub applications: HashMap<String, job::ApplicationRecord>,
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route(
            "/identity.v1.AuthService/Register",
            post(identity::register),
        )
        .route("/identity.v1.AuthService/Login", post(identity::login))
        .route(
            "/identity.v1.AuthService/RefreshToken",
            post(identity::refresh_token),
        )
        .route("/identity.v1.AuthService/Logout", post(identity::logout))
        .route("/identity.v1.AuthService/GetMe", post(identity::get_me))
        .route(
            "/chef.v1.ChefProfileService/CreateProfile",
            post(profile::chef_create),
        )
        .route(
            "/chef.v1.ChefProfileService/GetProfile",
            post(profile::chef_get),
        )
        .route(
            "/chef.v1.ChefProfileService/GetMyProfile",
            post(profile::chef_get_my),
        )
        .route(
            "/chef.v1.ChefProfileService/UpdateProfile",
            post(profile::chef_update),
        )
        .route(
            "/chef.v1.ChefProfileService/SearchProfiles",
            post(profile::chef_search),
        )
        .route(
            "/restaurant.v1.RestaurantProfileService/CreateProfile",
            post(profile::restaurant_create),
        )
        .route(
            "/restaurant.v1.RestaurantProfileService/GetProfile",
            post(profile::restaurant_get),
        )
        .route(
            "/restaurant.v1.RestaurantProfileService/GetMyProfile",
            post(profile::restaurant_get_my),
        )
        .route(
            "/restaurant.v1.RestaurantProfileService/UpdateProfile",
            post(profile::restaurant_update),
        )
        .route(
            "/restaurant.v1.RestaurantProfileService/SearchProfiles",
            post(profile::restaurant_search),
        )
        .route("/job.v1.JobService/CreateJob", post(job::create_job))
        .route("/job.v1.JobService/UpdateJob", post(job::update_job))
        .route("/job.v1.JobService/GetJob", post(job::get_job))
        .route("/job.v1.JobService/ListMyJobs", post(job::list_my_jobs))
        .route("/job.v1.JobService/SearchJobs", post(job::search_jobs))
        .route(
            "/job.v1.JobService/CreateApplication",
            post(job::create_application),
        )
        .route(
            "/job.v1.JobService/ListApplicationsForChef",
            post(job::list_applications_for_chef),
        )
        .route(
            "/job.v1.JobService/ListApplicationsForRestaurant",
            post(job::list_applications_for_restaurant),
        )
        .route(
            "/job.v1.JobService/UpdateApplicationStatus",
            post(job::update_application_status),
        )
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// Resolve the bearer token to its user, or fail with `unauthenticated`.
pub(crate) async fn authenticate(db: &Db, headers: &HeaderMap) -> Result<UserRecord, RpcError> {
    let token = bearer_token(headers).ok_or_else(|| {
        rpc_error(
            StatusCode::UNAUTHORIZED,
            "unauthenticated",
            "missing bearer token",
        )
    })?;
    let store = db.read().await;
    let user_id = store.access_tokens.get(token).ok_or_else(|| {
        rpc_error(
            StatusCode::UNAUTHORIZED,
            "unauthenticated",
            "invalid access token",
        )
    })?;
    store.users.get(user_id).cloned().ok_or_else(|| {
        rpc_error(StatusCode::UNAUTHORIZED, "unauthenticated", "unknown user")
    })
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

/// Empty filter matches everything; otherwise any overlap counts.
pub(crate) fn intersects(filter: &[String], values: &[String]) -> bool {
    filter.is_empty() || filter.iter().any(|f| values.contains(f))
}

pub(crate) fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

pub(crate) fn now_rfc3339() -> String {
    chrono::Utc::now().to_rfc3339()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intersects_treats_empty_filter_as_match_all() {
        let values = vec!["pastry".to_string()];
        assert!(intersects(&[], &values));
        assert!(intersects(&["pastry".to_string()], &values));
        assert!(!intersects(&["grill".to_string()], &values));
    }

    #[test]
    fn error_body_serializes_connect_shape() {
        let body = ErrorBody {
            code: "not_found".to_string(),
            message: "no profile".to_string(),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["code"], "not_found");
        assert_eq!(json["message"], "no profile");
    }
}
