use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::User;

/// Request payload for registering a new account
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(length(
        min = 2,
        max = 255,
        message = "Name must be between 2 and 255 characters"
    ))]
    pub name: String,

    #[validate(
        email(message = "Email must be a valid address"),
        length(max = 255, message = "Email must be at most 255 characters")
    )]
    pub email: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
}

/// Request payload for exchanging credentials for a bearer token
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email(message = "Email must be a valid address"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Public view of a user account
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    pub token: String,
}

/// Emails are compared case-insensitively, so they are stored lower-cased.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

impl RegisterRequest {
    pub fn normalized(mut self) -> Self {
        self.email = normalize_email(&self.email);
        self.name = self.name.trim().to_string();
        self
    }
}

impl LoginRequest {
    pub fn normalized(mut self) -> Self {
        self.email = normalize_email(&self.email);
        self
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register(name: &str, email: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn test_valid_registration() {
        assert!(register("Ada", "ada@example.com", "secret1").validate().is_ok());
    }

    #[test]
    fn test_registration_field_rules() {
        let errors = register("A", "not-an-email", "12345").validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("password"));
    }

    #[test]
    fn test_name_is_trimmed_before_length_check() {
        let req = register("  A  ", "ada@example.com", "secret1").normalized();
        assert_eq!(req.name, "A");
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_email_normalization() {
        let req = register("Ada", "  Ada@Example.COM ", "secret1").normalized();
        assert_eq!(req.email, "ada@example.com");
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_email_must_fit_the_column() {
        let domain = vec!["b".repeat(60); 4].join(".");
        let email = format!("{}@{}.com", "a".repeat(64), domain);
        assert!(email.len() > 255);
        assert!(validator::ValidateEmail::validate_email(&email));

        let req = register("Ada", &email, "secret1").normalized();
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
    }

    #[test]
    fn test_login_requires_password() {
        let req = LoginRequest {
            email: "ada@example.com".to_string(),
            password: String::new(),
        };
        assert!(req.validate().unwrap_err().field_errors().contains_key("password"));
    }
}
