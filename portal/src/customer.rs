//! Customer and authentication DTOs for the REST boundary.
//!
//! DESIGN
//! ======
//! Field names follow the backend's camelCase JSON so serde round-trips stay
//! lossless. These types are passed through to the UI unchanged.

#[cfg(test)]
#[path = "customer_test.rs"]
mod customer_test;

use std::fmt;

use serde::{Deserialize, Serialize};

/// Customer gender as the backend spells it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub const ALL: [Self; 2] = [Self::Male, Self::Female];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Male => "MALE",
            Self::Female => "FEMALE",
        }
    }

    /// Parse the wire spelling, ignoring case and surrounding whitespace.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "MALE" => Some(Self::Male),
            "FEMALE" => Some(Self::Female),
            _ => None,
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A customer as returned by `GET /api/v1/customers`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub age: u32,
    pub gender: Gender,
    #[serde(default)]
    pub roles: Vec<String>,
    /// Login name; the backend uses the email.
    #[serde(default)]
    pub username: String,
    /// Object-store key of the uploaded profile image, if any.
    #[serde(default)]
    pub profile_image_id: Option<String>,
}

/// Body of `POST /api/v1/customers` (signup and dashboard create).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerRegistrationRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub age: u32,
    pub gender: Gender,
}

/// Body of `PUT /api/v1/customers/{id}`. Absent fields are left unchanged.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerUpdateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
}

/// Body of `POST /api/v1/auth/login`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticationRequest {
    pub username: String,
    pub password: String,
}

/// Response of `POST /api/v1/auth/login`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticationResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(rename = "customerDTO", default)]
    pub customer: Option<Customer>,
}
