//! Keycloak admin API representations.
//!
//! Only the fields this service reads or writes are modelled; unknown fields
//! in provider payloads are ignored.

use serde::{Deserialize, Serialize};

use domain::{UserRequest, CREDENTIAL_TYPE_PASSWORD};

/// A user as stored by the identity provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRepresentation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credentials: Option<Vec<CredentialRepresentation>>,
}

impl From<&UserRequest> for UserRepresentation {
    fn from(request: &UserRequest) -> Self {
        Self {
            id: None,
            username: Some(request.username.clone()),
            email: Some(request.email.clone()),
            first_name: Some(request.first_name.clone()),
            last_name: Some(request.last_name.clone()),
            enabled: Some(true),
            credentials: Some(vec![CredentialRepresentation::password(&request.password)]),
        }
    }
}

/// A user credential.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialRepresentation {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: String,
    pub temporary: bool,
}

impl CredentialRepresentation {
    /// Permanent password credential.
    pub fn password(value: &str) -> Self {
        Self {
            kind: CREDENTIAL_TYPE_PASSWORD.to_string(),
            value: value.to_string(),
            temporary: false,
        }
    }
}

impl std::fmt::Debug for CredentialRepresentation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialRepresentation")
            .field("kind", &self.kind)
            .field("value", &"[REDACTED]")
            .field("temporary", &self.temporary)
            .finish()
    }
}

/// A realm-level role.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleRepresentation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
}

impl RoleRepresentation {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
        }
    }
}

/// A group a user belongs to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupRepresentation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl GroupRepresentation {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            path: None,
        }
    }
}

/// Body of `GET /users/{id}/role-mappings`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingsRepresentation {
    #[serde(default)]
    pub realm_mappings: Option<Vec<RoleRepresentation>>,
}

/// Public realm document served at `GET /realms/{realm}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RealmInfo {
    pub realm: String,
    /// Base64 DER-encoded RSA key the realm signs tokens with
    #[serde(default)]
    pub public_key: Option<String>,
}

impl RealmInfo {
    /// The realm signing key in PEM form.
    pub fn public_key_pem(&self) -> Option<String> {
        let der = self.public_key.as_deref()?.trim();
        if der.is_empty() {
            return None;
        }

        let mut pem = String::from("-----BEGIN PUBLIC KEY-----\n");
        let chars: Vec<char> = der.chars().collect();
        for line in chars.chunks(64) {
            pem.extend(line);
            pem.push('\n');
        }
        pem.push_str("-----END PUBLIC KEY-----\n");
        Some(pem)
    }
}
