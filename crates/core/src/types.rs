//! Account, credential and envelope types shared by every Aula crate

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Backend identifier for users and academic records
pub type RecordId = i64;

/// Role assigned to an account by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "PROFESOR")]
    Teacher,
    #[serde(rename = "ESTUDIANTE")]
    Student,
    #[serde(rename = "ADMINISTRATIVO")]
    Administrator,
}

impl Role {
    /// Value used by the backend for this role
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Teacher => "PROFESOR",
            Self::Student => "ESTUDIANTE",
            Self::Administrator => "ADMINISTRATIVO",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Teacher => "teacher",
            Self::Student => "student",
            Self::Administrator => "administrator",
        };
        f.write_str(label)
    }
}

/// Optional contact details attached to a user
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(rename = "telefono", default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(rename = "direccion", default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(
        rename = "fecha_nacimiento",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub birth_date: Option<NaiveDate>,
    #[serde(rename = "foto", default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
}

/// Authenticated account as returned by the login and profile endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: RecordId,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub role: Role,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<UserProfile>,
}

const fn default_active() -> bool {
    true
}

impl User {
    /// Full name, falling back to the username when the backend has none
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name.trim(), self.last_name.trim());
        let full = full.trim();
        if full.is_empty() {
            self.username.clone()
        } else {
            full.to_string()
        }
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.role == role
    }
}

/// Username/password pair used only as the login request body
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Account registration body
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct UserDraft {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    pub password: String,
    #[serde(rename = "curso", skip_serializing_if = "Option::is_none")]
    pub course: Option<RecordId>,
}

impl fmt::Debug for UserDraft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserDraft")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("role", &self.role)
            .field("course", &self.course)
            .finish_non_exhaustive()
    }
}

/// Login response; every field is optional on the wire and validated by the caller
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub access: Option<String>,
    #[serde(default)]
    pub refresh: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
}

/// Body sent to the refresh and blacklist endpoints
#[derive(Debug, Clone, Serialize)]
pub struct RefreshRequest<'a> {
    pub refresh: &'a str,
}

/// Refresh response; the backend may rotate the refresh token
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RefreshResponse {
    #[serde(default)]
    pub access: Option<String>,
    #[serde(default)]
    pub refresh: Option<String>,
}

/// Paginated collection envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub count: u64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

/// Collection endpoints answer with either a bare array or a [`Page`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ListResponse<T> {
    Paginated(Page<T>),
    Plain(Vec<T>),
}

impl<T> ListResponse<T> {
    /// Items on this page, dropping pagination metadata
    pub fn into_items(self) -> Vec<T> {
        match self {
            Self::Paginated(page) => page.results,
            Self::Plain(items) => items,
        }
    }

    pub fn items(&self) -> &[T] {
        match self {
            Self::Paginated(page) => &page.results,
            Self::Plain(items) => items,
        }
    }

    /// Total number of records known to the server
    pub fn total(&self) -> u64 {
        match self {
            Self::Paginated(page) => page.count,
            Self::Plain(items) => items.len() as u64,
        }
    }

    pub fn next_page(&self) -> Option<&str> {
        match self {
            Self::Paginated(page) => page.next.as_deref(),
            Self::Plain(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn teacher_json() -> serde_json::Value {
        json!({
            "id": 7,
            "username": "prof1",
            "email": "prof1@school.test",
            "first_name": "Ana",
            "last_name": "Rojas",
            "role": "PROFESOR",
            "is_active": true
        })
    }

    #[test]
    fn test_user_roundtrip_uses_backend_role_names() {
        let user: User = serde_json::from_value(teacher_json()).unwrap();
        assert_eq!(user.role, Role::Teacher);
        assert_eq!(user.display_name(), "Ana Rojas");

        let value = serde_json::to_value(&user).unwrap();
        assert_eq!(value["role"], "PROFESOR");
        assert!(value.get("profile").is_none());
    }

    #[test]
    fn test_display_name_falls_back_to_username() {
        let mut user: User = serde_json::from_value(teacher_json()).unwrap();
        user.first_name = String::new();
        user.last_name = "  ".to_string();
        assert_eq!(user.display_name(), "prof1");
    }

    #[test]
    fn test_unknown_role_is_rejected() {
        let mut value = teacher_json();
        value["role"] = json!("JANITOR");
        assert!(serde_json::from_value::<User>(value).is_err());
    }

    #[test]
    fn test_credentials_debug_redacts_password() {
        let credentials = Credentials::new("prof1", "hunter2");
        let rendered = format!("{credentials:?}");
        assert!(rendered.contains("prof1"));
        assert!(!rendered.contains("hunter2"));
    }

    #[test]
    fn test_list_response_accepts_both_shapes() {
        let plain: ListResponse<i64> = serde_json::from_value(json!([1, 2, 3])).unwrap();
        assert_eq!(plain.total(), 3);
        assert_eq!(plain.next_page(), None);

        let paged: ListResponse<i64> = serde_json::from_value(json!({
            "count": 40,
            "next": "http://api/test/?page=2",
            "previous": null,
            "results": [1, 2]
        }))
        .unwrap();
        assert_eq!(paged.total(), 40);
        assert_eq!(paged.next_page(), Some("http://api/test/?page=2"));
        assert_eq!(paged.into_items(), vec![1, 2]);
    }
}
