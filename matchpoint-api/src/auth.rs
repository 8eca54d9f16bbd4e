use axum::{extract::State, routing::post, Json, Router};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use matchpoint_domain::Role;

use crate::{error::AppError, state::AppState};

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub role: String,
    pub exp: usize,
}

#[derive(Debug, Deserialize)]
struct LoginRequest {
    username: String,
    password: String,
    role: Role,
}

#[derive(Debug, Serialize)]
struct AuthResponse {
    token: String,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/auth/login", post(login))
}

async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let venue = state.venue.lock().await;
    let account = venue
        .accounts
        .authenticate(&req.username, &req.password, req.role)
        .ok_or_else(|| AppError::Authentication("invalid credentials".to_string()))?;

    let claims = Claims {
        sub: account.username.clone(),
        role: account.role.as_str().to_string(),
        exp: (Utc::now() + Duration::seconds(state.auth.expiration_seconds as i64)).timestamp()
            as usize,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(state.auth.secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("token encoding failed: {}", e)))?;

    tracing::info!(user = %claims.sub, role = %claims.role, "login accepted");
    Ok(Json(AuthResponse { token }))
}

/// Decode and validate a bearer token into its claims.
pub fn decode_claims(token: &str, secret: &str) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| AppError::Authentication(e.to_string()))
}

pub fn require_admin(claims: &Claims) -> Result<(), AppError> {
    if claims.role == Role::Admin.as_str() {
        Ok(())
    } else {
        Err(AppError::Authorization("admin role required".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_round_trip() {
        let secret = "test-secret";
        let claims = Claims {
            sub: "user1".to_string(),
            role: "user".to_string(),
            exp: (Utc::now() + Duration::hours(1)).timestamp() as usize,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap();

        let decoded = decode_claims(&token, secret).unwrap();
        assert_eq!(decoded.sub, "user1");
        assert_eq!(decoded.role, "user");

        assert!(decode_claims(&token, "other-secret").is_err());
    }

    #[test]
    fn admin_gate_checks_the_role_tag() {
        let mut claims = Claims {
            sub: "admin".to_string(),
            role: "admin".to_string(),
            exp: 0,
        };
        assert!(require_admin(&claims).is_ok());

        claims.role = "user".to_string();
        assert!(require_admin(&claims).is_err());
    }
}
