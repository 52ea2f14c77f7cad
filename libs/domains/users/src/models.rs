use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// User roles
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Role {
    /// Counter staff
    #[default]
    User,
    Admin,
}

/// A person allowed into the back office
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: Uuid,
    /// Unique, compared case-insensitively
    pub email: String,
    pub name: String,
    /// Argon2 PHC string, never sent to clients
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub roles: Vec<Role>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub last_login_at: Option<DateTime<Utc>>,
}

impl User {
    /// New active user; an empty role list becomes `[User]`.
    pub fn new(email: String, name: String, password_hash: String, roles: Vec<Role>) -> Self {
        Self {
            id: Uuid::now_v7(),
            email,
            name,
            password_hash,
            roles: if roles.is_empty() {
                vec![Role::User]
            } else {
                roles
            },
            is_active: true,
            created_at: Utc::now(),
            last_login_at: None,
        }
    }

    pub fn role_names(&self) -> Vec<String> {
        self.roles.iter().map(Role::to_string).collect()
    }
}

/// User as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub roles: Vec<String>,
    pub last_login_at: Option<DateTime<Utc>>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            roles: user.role_names(),
            id: user.id,
            email: user.email,
            name: user.name,
            last_login_at: user.last_login_at,
        }
    }
}

/// DTO for creating a user
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateUser {
    #[validate(email, length(max = 255))]
    pub email: String,
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub password: String,
    #[serde(default)]
    pub roles: Vec<Role>,
}

/// Administrator account created at start-up when missing
#[derive(Clone)]
pub struct AdminSeed {
    pub email: String,
    pub name: String,
    pub password: String,
}

impl std::fmt::Debug for AdminSeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminSeed")
            .field("email", &self.email)
            .field("name", &self.name)
            .field("password", &"[redacted]")
            .finish()
    }
}

impl From<AdminSeed> for CreateUser {
    fn from(seed: AdminSeed) -> Self {
        Self {
            email: seed.email,
            name: seed.name,
            password: seed.password,
            roles: vec![Role::Admin],
        }
    }
}

/// Body of `POST /auth/login`
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email, length(max = 255))]
    pub email: String,
    #[validate(length(min = 1, max = 128))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub success: bool,
    pub message: String,
    /// Same value as the `authToken` cookie, for non-browser clients
    pub token: String,
    pub user: UserResponse,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LogoutResponse {
    pub success: bool,
    pub message: String,
}
