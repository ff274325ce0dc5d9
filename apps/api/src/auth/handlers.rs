//! Demo login endpoint. A single hardcoded credential pair; not a security
//! boundary.

use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::errors::AppError;

const DEMO_EMAIL: &str = "demo@example.com";
const DEMO_PASSWORD: &str = "demo123";

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserInfo,
}

#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub id: String,
    pub email: String,
    pub name: String,
}

/// POST /api/auth/login
pub async fn handle_login(
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let (email, password) = match (request.email, request.password) {
        (Some(email), Some(password)) if !email.is_empty() && !password.is_empty() => {
            (email, password)
        }
        _ => {
            return Err(AppError::Validation(
                "Email and password are required".to_string(),
            ))
        }
    };

    if email != DEMO_EMAIL || password != DEMO_PASSWORD {
        return Err(AppError::Unauthorized);
    }

    let token = issue_token(&email);
    Ok(Json(LoginResponse {
        token,
        user: UserInfo {
            id: "1".to_string(),
            email,
            name: "Demo User".to_string(),
        },
    }))
}

/// Opaque demo token: hex SHA-256 digest over the email and issue time.
fn issue_token(email: &str) -> String {
    let payload = format!("{}:{}", email, Utc::now().timestamp());
    let hash = Sha256::digest(payload.as_bytes());
    hash.iter().map(|b| format!("{b:02x}")).collect()
}
