//! Authentication DTOs

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::UserInfo;

/// Credentials sent with the login mutation
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Username cannot be empty"))]
    pub username: String,
    #[validate(length(min = 1, message = "Password cannot be empty"))]
    pub password: String,
}

/// Successful login payload: an opaque bearer token plus the user it names
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(rename = "accessToken")]
    pub access_token: String,
    pub user: UserInfo,
}
