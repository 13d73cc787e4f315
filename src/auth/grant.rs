//! Token endpoint request bodies
//!
//! The token and revoke endpoints take JSON bodies built from the current
//! credentials plus a grant-specific field.

use super::types::Auth;
use serde::Serialize;

/// Body posted to the token or revoke endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TokenGrant {
    /// Exchange an authorization code for tokens
    AuthorizationCode {
        grant_type: &'static str,
        client_id: Option<String>,
        client_secret: Option<String>,
        code: String,
        redirect_uri: Option<String>,
    },
    /// Trade the refresh token for a new access token
    RefreshToken {
        grant_type: &'static str,
        client_id: Option<String>,
        client_secret: Option<String>,
        refresh_token: Option<String>,
    },
    /// Revoke the access token
    Revoke {
        client_id: Option<String>,
        client_secret: Option<String>,
        token: Option<String>,
    },
}

impl TokenGrant {
    /// Code exchange; an empty `redirect_uri` falls back to the stored one
    pub fn authorization_code(auth: &Auth, code: impl Into<String>, redirect_uri: &str) -> Self {
        let redirect_uri = if redirect_uri.is_empty() {
            auth.redirect_uri().map(ToString::to_string)
        } else {
            Some(redirect_uri.to_string())
        };

        Self::AuthorizationCode {
            grant_type: "authorization_code",
            client_id: auth.client_id().map(ToString::to_string),
            client_secret: auth.client_secret().map(ToString::to_string),
            code: code.into(),
            redirect_uri,
        }
    }

    pub fn refresh_token(auth: &Auth) -> Self {
        Self::RefreshToken {
            grant_type: "refresh_token",
            client_id: auth.client_id().map(ToString::to_string),
            client_secret: auth.client_secret().map(ToString::to_string),
            refresh_token: auth.refresh_token().map(ToString::to_string),
        }
    }

    pub fn revoke(auth: &Auth) -> Self {
        Self::Revoke {
            client_id: auth.client_id().map(ToString::to_string),
            client_secret: auth.client_secret().map(ToString::to_string),
            token: auth.access_token().map(ToString::to_string),
        }
    }

    /// Grant type name, `None` for revocation
    pub fn grant_type(&self) -> Option<&'static str> {
        match self {
            Self::AuthorizationCode { grant_type, .. } | Self::RefreshToken { grant_type, .. } => {
                Some(grant_type)
            }
            Self::Revoke { .. } => None,
        }
    }
}
