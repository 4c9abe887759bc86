//! Types for the authentication state exposed to UI callers

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Parsed token payload as exposed by the identity client
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_username: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub given_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub family_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_verified: Option<bool>,

    /// Every other claim in the token (exp, iat, realm_access, ...)
    #[serde(flatten)]
    pub other: HashMap<String, serde_json::Value>,
}

/// User data derived from the identity client's claims
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    /// The subject identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    /// The user's email address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// The user's full name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// The preferred username
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_username: Option<String>,

    /// The given (first) name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub given_name: Option<String>,

    /// The family (last) name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family_name: Option<String>,

    /// Whether the email has been verified
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_verified: Option<bool>,
}

impl From<&Claims> for UserInfo {
    fn from(claims: &Claims) -> Self {
        Self {
            sub: claims.sub.clone(),
            email: claims.email.clone(),
            name: claims.name.clone(),
            preferred_username: claims.preferred_username.clone(),
            given_name: claims.given_name.clone(),
            family_name: claims.family_name.clone(),
            email_verified: claims.email_verified,
        }
    }
}

/// Authentication state
///
/// `is_loading` implies no user and no error; `is_authenticated` implies a
/// user is present. Use the constructors to keep those invariants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthState {
    pub is_authenticated: bool,
    pub is_loading: bool,
    pub user: Option<UserInfo>,
    pub error: Option<String>,
}

impl AuthState {
    /// The initial state, before the identity client has settled
    pub fn loading() -> Self {
        Self {
            is_authenticated: false,
            is_loading: true,
            user: None,
            error: None,
        }
    }

    pub fn authenticated(user: UserInfo) -> Self {
        Self {
            is_authenticated: true,
            is_loading: false,
            user: Some(user),
            error: None,
        }
    }

    pub fn unauthenticated() -> Self {
        Self {
            is_authenticated: false,
            is_loading: false,
            user: None,
            error: None,
        }
    }

    /// Settled, not authenticated, with a user-visible error
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Self::unauthenticated()
        }
    }

    /// Build the settled state from a client's `authenticated` flag and claims.
    /// Authentication without claims counts as unauthenticated.
    pub fn settled(authenticated: bool, claims: Option<&Claims>) -> Self {
        match claims {
            Some(claims) if authenticated => Self::authenticated(UserInfo::from(claims)),
            _ => Self::unauthenticated(),
        }
    }
}

impl Default for AuthState {
    fn default() -> Self {
        Self::loading()
    }
}
