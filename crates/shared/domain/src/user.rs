//! User request and response types.

use serde::{Deserialize, Deserializer, Serialize};
use validator::{Validate, ValidationError};

/// User creation request, validated at the HTTP boundary.
#[derive(Clone, Deserialize, Serialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct UserRequest {
    /// Login name in the identity provider
    #[validate(length(
        min = 2,
        max = 30,
        message = "Username should be between 2 and 30 characters long"
    ))]
    #[cfg_attr(feature = "openapi", schema(example = "jdoe"))]
    #[serde(default, deserialize_with = "null_as_empty")]
    pub username: String,
    /// User email address
    #[validate(email(message = "Email should be valid"))]
    #[cfg_attr(feature = "openapi", schema(example = "john.doe@example.com"))]
    #[serde(default, deserialize_with = "null_as_empty")]
    pub email: String,
    /// Initial password (minimum 4 characters)
    #[validate(length(min = 4, message = "Password should be at least 4 characters long"))]
    #[serde(default, deserialize_with = "null_as_empty")]
    pub password: String,
    /// Given name
    #[validate(
        custom(function = "not_blank", message = "First name should not be blank"),
        length(max = 30, message = "First name should be at most 30 characters long")
    )]
    #[cfg_attr(feature = "openapi", schema(example = "John"))]
    #[serde(default, deserialize_with = "null_as_empty")]
    pub first_name: String,
    /// Family name
    #[validate(
        custom(function = "not_blank", message = "Last name should not be blank"),
        length(max = 30, message = "Last name should be at most 30 characters long")
    )]
    #[cfg_attr(feature = "openapi", schema(example = "Doe"))]
    #[serde(default, deserialize_with = "null_as_empty")]
    pub last_name: String,
}

impl UserRequest {
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            password: password.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }
}

impl std::fmt::Debug for UserRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserRequest")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .finish()
    }
}

/// Absent and `null` fields read as empty so the validators report them.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// User view returned to API callers.
///
/// Name and email are passed through from the identity provider untouched,
/// so a field the provider omits is serialized as `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    #[cfg_attr(feature = "openapi", schema(example = "John"))]
    pub first_name: Option<String>,
    #[cfg_attr(feature = "openapi", schema(example = "Doe"))]
    pub last_name: Option<String>,
    #[cfg_attr(feature = "openapi", schema(example = "john.doe@example.com"))]
    pub email: Option<String>,
    /// Realm role names, in provider order
    pub roles: Vec<String>,
    /// Group names, in provider order
    pub groups: Vec<String>,
}

impl UserResponse {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        roles: Vec<String>,
        groups: Vec<String>,
    ) -> Self {
        Self {
            first_name: Some(first_name.into()),
            last_name: Some(last_name.into()),
            email: Some(email.into()),
            roles,
            groups,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> UserRequest {
        UserRequest::new("testuser", "test@example.com", "password", "John", "Doe")
    }

    #[test]
    fn test_valid_request_passes() {
        assert!(valid_request().validate().is_ok());
    }

    #[test]
    fn test_every_invalid_field_is_reported() {
        let request = UserRequest::new("a", "invalid-email", "123", "", "");
        let errors = request.validate().unwrap_err();
        let fields = errors.field_errors();

        for field in ["username", "email", "password", "first_name", "last_name"] {
            assert!(fields.contains_key(field), "missing error for {field}");
        }
    }

    #[test]
    fn test_blank_names_are_rejected() {
        let mut request = valid_request();
        request.first_name = "   ".to_string();

        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("first_name"));
    }

    #[test]
    fn test_username_too_long() {
        let mut request = valid_request();
        request.username = "u".repeat(31);

        assert!(request.validate().is_err());
    }

    #[test]
    fn test_request_uses_camel_case() {
        let json = serde_json::json!({
            "username": "testuser",
            "email": "test@example.com",
            "password": "password",
            "firstName": "John",
            "lastName": "Doe"
        });

        let request: UserRequest = serde_json::from_value(json).unwrap();
        assert_eq!(request.first_name, "John");
        assert_eq!(request.last_name, "Doe");
    }

    #[test]
    fn test_missing_fields_reach_validation() {
        let json = serde_json::json!({
            "username": "testuser",
            "password": "password"
        });

        let request: UserRequest = serde_json::from_value(json).unwrap();
        assert!(request.email.is_empty());

        let errors = request.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("first_name"));
        assert!(fields.contains_key("last_name"));
        assert!(!fields.contains_key("username"));
        assert!(!fields.contains_key("password"));
    }

    #[test]
    fn test_null_fields_reach_validation() {
        let json = serde_json::json!({
            "username": null,
            "email": "test@example.com",
            "password": "password",
            "firstName": "John",
            "lastName": null
        });

        let request: UserRequest = serde_json::from_value(json).unwrap();
        let errors = request.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("username"));
        assert!(fields.contains_key("last_name"));
        assert_eq!(fields.len(), 2);
    }

    #[test]
    fn test_debug_hides_password() {
        let rendered = format!("{:?}", valid_request());
        assert!(!rendered.contains("\"password\""));
        assert!(rendered.contains("[REDACTED]"));
    }

    #[test]
    fn test_response_serializes_missing_fields_as_null() {
        let response = UserResponse {
            first_name: None,
            last_name: Some("Doe".to_string()),
            email: None,
            roles: vec!["user".to_string()],
            groups: vec![],
        };

        let value = serde_json::to_value(&response).unwrap();
        assert!(value["firstName"].is_null());
        assert_eq!(value["lastName"], "Doe");
        assert_eq!(value["roles"][0], "user");
        assert!(value["groups"].as_array().unwrap().is_empty());
    }
}
