//! User model with role-based access control.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "user_role")]
pub enum UserRole {
    Patient,
    Admin,
}

/// Full user row from database (includes password_hash — never serialize to API).
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub full_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub phone: Option<String>,
    pub emergency_contact: Option<String>,
    pub role: UserRole,
    pub is_active: bool,
    pub failed_login_attempts: i32,
    pub locked_until: Option<DateTime<Utc>>,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// User response DTO — excludes password_hash and internal fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub phone: Option<String>,
    pub emergency_contact: Option<String>,
    pub role: UserRole,
    pub is_active: bool,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            username: u.username,
            email: u.email,
            full_name: u.full_name,
            date_of_birth: u.date_of_birth,
            phone: u.phone,
            emergency_contact: u.emergency_contact,
            role: u.role,
            is_active: u.is_active,
            last_login: u.last_login,
            created_at: u.created_at,
        }
    }
}

/// Self-service registration request. Registered accounts always start as
/// patients; admin accounts are created through the admin API.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 3, max = 64))]
    pub username: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8))]
    pub password: String,
    #[validate(length(min = 1, max = 128))]
    pub full_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub phone: Option<String>,
    pub emergency_contact: Option<String>,
}

/// Admin-initiated user creation with an explicit role.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateUser {
    #[validate(length(min = 3, max = 64))]
    pub username: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8))]
    pub password: String,
    #[validate(length(min = 1, max = 128))]
    pub full_name: String,
    pub phone: Option<String>,
    pub role: UserRole,
}

/// Profile update: only contact details may change. Emergency contact is
/// required so that high-risk follow-up always has someone to reach.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateProfile {
    pub date_of_birth: Option<NaiveDate>,
    pub phone: Option<String>,
    #[validate(length(min = 1))]
    pub emergency_contact: String,
}

/// User row with assessment usage, for the admin user list.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct UserWithActivity {
    pub id: Uuid,
    pub username: String,
    pub full_name: String,
    pub email: String,
    pub role: UserRole,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
    pub assessment_count: i64,
    pub last_assessment: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_role_serialization() {
        assert_eq!(serde_json::to_string(&UserRole::Patient).unwrap(), "\"Patient\"");
        assert_eq!(serde_json::to_string(&UserRole::Admin).unwrap(), "\"Admin\"");
    }

    #[test]
    fn user_response_excludes_password() {
        let json = serde_json::to_string(&UserResponse {
            id: Uuid::nil(),
            username: "maria".to_string(),
            email: "maria@example.com".to_string(),
            full_name: "Maria P.".to_string(),
            date_of_birth: None,
            phone: None,
            emergency_contact: Some("John P. +1555".to_string()),
            role: UserRole::Patient,
            is_active: true,
            last_login: None,
            created_at: Utc::now(),
        })
        .unwrap();
        assert!(!json.contains("password"));
        assert!(!json.contains("hash"));
    }

    #[test]
    fn register_request_validates_email_and_password() {
        let req = RegisterRequest {
            username: "pat".to_string(),
            email: "not-an-email".to_string(),
            password: "short".to_string(),
            full_name: "Pat".to_string(),
            date_of_birth: None,
            phone: None,
            emergency_contact: None,
        };
        let err = req.validate().unwrap_err();
        assert!(err.field_errors().contains_key("email"));
        assert!(err.field_errors().contains_key("password"));
    }

    #[test]
    fn user_to_response_conversion() {
        let user = User {
            id: Uuid::nil(),
            username: "test".to_string(),
            email: "test@test.com".to_string(),
            password_hash: "secret_hash".to_string(),
            full_name: "Test".to_string(),
            date_of_birth: None,
            phone: None,
            emergency_contact: None,
            role: UserRole::Patient,
            is_active: true,
            failed_login_attempts: 0,
            locked_until: None,
            last_login: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let response: UserResponse = user.into();
        assert_eq!(response.username, "test");
        assert_eq!(response.role, UserRole::Patient);
    }
}
