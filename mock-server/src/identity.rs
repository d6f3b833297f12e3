//! `identity.v1.AuthService` handlers. Tokens are opaque minted uuids;
//! refreshing rotates the pair and consumes the old refresh token.

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::{authenticate, new_id, rpc_error, Db, RpcError, Store, UserRecord};

const ROLES: [&str; 2] = ["USER_ROLE_CHEF", "USER_ROLE_RESTAURANT"];

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub role: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

#[derive(Serialize)]
pub struct AuthResponse {
    pub user_id: String,
    pub email: String,
    pub role: String,
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Serialize)]
pub struct TokenPairResponse {
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Serialize)]
pub struct LogoutResponse {
    pub success: bool,
}

#[derive(Serialize)]
pub struct MeResponse {
    pub user_id: String,
    pub email: String,
    pub role: String,
}

pub async fn register(
    State(db): State<Db>,
    Json(input): Json<RegisterRequest>,
) -> Result<Json<AuthResponse>, RpcError> {
    if !ROLES.contains(&input.role.as_str()) {
        return Err(rpc_error(
            StatusCode::BAD_REQUEST,
            "invalid_argument",
            "unknown role",
        ));
    }
    if input.email.is_empty() || input.password.len() < 8 {
        return Err(rpc_error(
            StatusCode::BAD_REQUEST,
            "invalid_argument",
            "email and a password of at least 8 characters are required",
        ));
    }

    let mut store = db.write().await;
    if store.users.values().any(|u| u.email == input.email) {
        return Err(rpc_error(
            StatusCode::CONFLICT,
            "already_exists",
            "email already registered",
        ));
    }

    let user = UserRecord {
        id: new_id(),
        email: input.email,
        password: input.password,
        role: input.role,
    };
    let (access_token, refresh_token) = issue_tokens(&mut store, &user.id);
    let response = AuthResponse {
        user_id: user.id.clone(),
        email: user.email.clone(),
        role: user.role.clone(),
        access_token,
        refresh_token,
    };
    store.users.insert(user.id.clone(), user);
    Ok(Json(response))
}

pub async fn login(
    State(db): State<Db>,
    Json(input): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, RpcError> {
    let mut store = db.write().await;
    let user = store
        .users
        .values()
        .find(|u| u.email == input.email && u.password == input.password)
        .cloned()
        .ok_or_else(|| {
            rpc_error(
                StatusCode::UNAUTHORIZED,
                "unauthenticated",
                "invalid credentials",
            )
        })?;

    let (access_token, refresh_token) = issue_tokens(&mut store, &user.id);
    Ok(Json(AuthResponse {
        user_id: user.id,
        email: user.email,
        role: user.role,
        access_token,
        refresh_token,
    }))
}

pub async fn refresh_token(
    State(db): State<Db>,
    Json(input): Json<RefreshTokenRequest>,
) -> Result<Json<TokenPairResponse>, RpcError> {
    let mut store = db.write().await;
    let user_id = store
        .refresh_tokens
        .remove(&input.refresh_token)
        .ok_or_else(|| {
            rpc_error(
                StatusCode::UNAUTHORIZED,
                "unauthenticated",
                "unknown refresh token",
            )
        })?;

    let (access_token, refresh_token) = issue_tokens(&mut store, &user_id);
    Ok(Json(TokenPairResponse {
        access_token,
        refresh_token,
    }))
}

/// Invalidating an already-unknown token still reports success; logout is
/// idempotent.
pub async fn logout(
    State(db): State<Db>,
    Json(input): Json<RefreshTokenRequest>,
) -> Json<LogoutResponse> {
    db.write().await.refresh_tokens.remove(&input.refresh_token);
    Json(LogoutResponse { success: true })
}

pub async fn get_me(
    State(db): State<Db>,
    headers: HeaderMap,
) -> Result<Json<MeResponse>, RpcError> {
    let user = authenticate(&db, &headers).await?;
    Ok(Json(MeResponse {
        user_id: user.id,
        email: user.email,
        role: user.role,
    }))
}

fn issue_tokens(store: &mut Store, user_id: &str) -> (String, String) {
    let access = new_id();
    let refresh = new_id();
    store
        .access_tokens
        .insert(access.clone(), user_id.to_string());
    store
        .refresh_tokens
        .insert(refresh.clone(), user_id.to_string());
    (access, refresh)
}
