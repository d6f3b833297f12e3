//! Client for `identity.v1.AuthService`: account registration, login,
//! token lifecycle, and identity resolution.
//!
//! Token expiry is not interpreted here — an expired access token surfaces
//! as the server's RPC error, and the caller decides whether to `refresh`
//! or force a re-login.

use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::transport::{ClientOptions, Transport};
use crate::types::{AuthSession, AuthTokens, AuthUser, LoginParams, RegisterParams, UserRole};

const SERVICE: &str = "identity.v1.AuthService";

#[derive(Serialize)]
struct WireRegisterRequest<'a> {
    email: &'a str,
    password: &'a str,
    role: &'static str,
}

#[derive(Serialize)]
struct WireLoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct WireRefreshTokenRequest<'a> {
    refresh_token: &'a str,
}

#[derive(Serialize)]
struct WireGetMeRequest {}

/// Flat auth response shared by `Register` and `Login`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireAuthResponse {
    user_id: String,
    email: String,
    role: String,
    access_token: String,
    refresh_token: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireTokenPairResponse {
    access_token: String,
    refresh_token: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireLogoutResponse {
    #[allow(dead_code)]
    success: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireGetMeResponse {
    user_id: String,
    email: String,
    role: String,
}

/// Client for the identity service.
#[derive(Debug, Clone)]
pub struct IdentityClient {
    transport: Transport,
}

impl IdentityClient {
    pub fn new(options: ClientOptions) -> Self {
        Self {
            transport: Transport::new(options),
        }
    }

    /// Create an account and sign it in, in one round trip.
    pub fn register(&self, params: &RegisterParams) -> Result<AuthSession, ApiError> {
        let response: WireAuthResponse = self.transport.invoke(
            &format!("{SERVICE}/Register"),
            Some(&WireRegisterRequest {
                email: &params.email,
                password: &params.password,
                role: params.role.to_wire(),
            }),
            None,
        )?;
        Ok(to_session(response))
    }

    pub fn login(&self, params: &LoginParams) -> Result<AuthSession, ApiError> {
        let response: WireAuthResponse = self.transport.invoke(
            &format!("{SERVICE}/Login"),
            Some(&WireLoginRequest {
                email: &params.email,
                password: &params.password,
            }),
            None,
        )?;
        Ok(to_session(response))
    }

    /// Exchange a refresh token for a new token pair. No rotation
    /// bookkeeping happens client-side beyond returning the new pair.
    pub fn refresh(&self, refresh_token: &str) -> Result<AuthTokens, ApiError> {
        let response: WireTokenPairResponse = self.transport.invoke(
            &format!("{SERVICE}/RefreshToken"),
            Some(&WireRefreshTokenRequest { refresh_token }),
            None,
        )?;
        Ok(AuthTokens {
            access_token: response.access_token,
            refresh_token: response.refresh_token,
        })
    }

    /// Invalidate a refresh token server-side. Fire-and-forget: the wire
    /// `{success}` payload is decoded and discarded.
    pub fn logout(&self, refresh_token: &str) -> Result<(), ApiError> {
        let _: WireLogoutResponse = self.transport.invoke(
            &format!("{SERVICE}/Logout"),
            Some(&WireRefreshTokenRequest { refresh_token }),
            None,
        )?;
        Ok(())
    }

    /// Resolve the identity behind an access token.
    pub fn get_me(&self, access_token: &str) -> Result<AuthUser, ApiError> {
        let response: WireGetMeResponse = self.transport.invoke(
            &format!("{SERVICE}/GetMe"),
            Some(&WireGetMeRequest {}),
            Some(access_token),
        )?;
        Ok(AuthUser {
            id: response.user_id,
            email: response.email,
            role: UserRole::from_wire(&response.role),
        })
    }
}

fn to_session(response: WireAuthResponse) -> AuthSession {
    AuthSession {
        user: AuthUser {
            id: response.user_id,
            email: response.email,
            role: UserRole::from_wire(&response.role),
        },
        tokens: AuthTokens {
            access_token: response.access_token,
            refresh_token: response.refresh_token,
        },
    }
}
