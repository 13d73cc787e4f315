//! Credential state
//!
//! `Auth` is plain data: it never talks to the network and never decides on
//! its own that a token needs refreshing. The client mutates it after each
//! token lifecycle event.

use chrono::{DateTime, Utc};
use reqwest::RequestBuilder;
use std::fmt;

/// OAuth credentials and token state for one account
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Auth {
    client_id: Option<String>,
    client_secret: Option<String>,
    access_token: Option<String>,
    refresh_token: Option<String>,
    authorization_datetime: Option<DateTime<Utc>>,
    expires_in: u64,
    redirect_uri: Option<String>,
}

impl Auth {
    /// Create credentials from any combination of client and token values
    pub fn new(
        client_id: Option<String>,
        client_secret: Option<String>,
        access_token: Option<String>,
        refresh_token: Option<String>,
    ) -> Self {
        Self {
            client_id,
            client_secret,
            access_token,
            refresh_token,
            ..Default::default()
        }
    }

    /// Credentials for an app that will run the OAuth flow
    pub fn with_client(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self::new(Some(client_id.into()), Some(client_secret.into()), None, None)
    }

    /// Credentials holding only an access token
    pub fn with_access_token(access_token: impl Into<String>) -> Self {
        Self::new(None, None, Some(access_token.into()), None)
    }

    pub fn client_id(&self) -> Option<&str> {
        self.client_id.as_deref()
    }

    pub fn client_secret(&self) -> Option<&str> {
        self.client_secret.as_deref()
    }

    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh_token.as_deref()
    }

    /// When the current access token was obtained
    pub fn authorization_datetime(&self) -> Option<DateTime<Utc>> {
        self.authorization_datetime
    }

    /// Access token lifetime in seconds, 0 when unknown or revoked
    pub fn expires_in(&self) -> u64 {
        self.expires_in
    }

    pub fn redirect_uri(&self) -> Option<&str> {
        self.redirect_uri.as_deref()
    }

    /// Token sent in the `Authorization` header; empty when unset
    pub fn bearer_token(&self) -> &str {
        self.access_token.as_deref().unwrap_or("")
    }

    /// Overwrite the fields set in `update`, leaving the others alone
    pub fn update(&mut self, update: AuthUpdate) {
        let AuthUpdate {
            client_id,
            client_secret,
            access_token,
            refresh_token,
            authorization_datetime,
            expires_in,
            redirect_uri,
        } = update;

        if let Some(value) = client_id {
            self.client_id = value;
        }
        if let Some(value) = client_secret {
            self.client_secret = value;
        }
        if let Some(value) = access_token {
            self.access_token = value;
        }
        if let Some(value) = refresh_token {
            self.refresh_token = value;
        }
        if let Some(value) = authorization_datetime {
            self.authorization_datetime = value;
        }
        if let Some(value) = expires_in {
            self.expires_in = value;
        }
        if let Some(value) = redirect_uri {
            self.redirect_uri = value;
        }
    }

    /// Drop the token state after revocation
    pub fn clear(&mut self) {
        self.update(
            AuthUpdate::new()
                .clear_access_token()
                .clear_refresh_token()
                .clear_authorization_datetime()
                .expires_in(0),
        );
    }

    /// Attach the bearer token to a request
    ///
    /// The header is sent even without a token; rejecting it is left to the
    /// server.
    pub fn apply(&self, req: RequestBuilder) -> RequestBuilder {
        req.bearer_auth(self.bearer_token())
    }
}

impl fmt::Debug for Auth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn redact(value: &Option<String>) -> &'static str {
            if value.is_some() {
                "<redacted>"
            } else {
                "<unset>"
            }
        }

        f.debug_struct("Auth")
            .field("client_id", &self.client_id)
            .field("client_secret", &redact(&self.client_secret))
            .field("access_token", &redact(&self.access_token))
            .field("refresh_token", &redact(&self.refresh_token))
            .field("authorization_datetime", &self.authorization_datetime)
            .field("expires_in", &self.expires_in)
            .field("redirect_uri", &self.redirect_uri)
            .finish()
    }
}

/// Partial overwrite of `Auth`
///
/// Each field is `None` when untouched and `Some(value)` when it should be
/// replaced, where `value` itself may be `None` to clear it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthUpdate {
    client_id: Option<Option<String>>,
    client_secret: Option<Option<String>>,
    access_token: Option<Option<String>>,
    refresh_token: Option<Option<String>>,
    authorization_datetime: Option<Option<DateTime<Utc>>>,
    expires_in: Option<u64>,
    redirect_uri: Option<Option<String>>,
}

impl AuthUpdate {
    /// Create an empty update
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn client_id(mut self, value: impl Into<String>) -> Self {
        self.client_id = Some(Some(value.into()));
        self
    }

    #[must_use]
    pub fn client_secret(mut self, value: impl Into<String>) -> Self {
        self.client_secret = Some(Some(value.into()));
        self
    }

    #[must_use]
    pub fn access_token(mut self, value: impl Into<String>) -> Self {
        self.access_token = Some(Some(value.into()));
        self
    }

    #[must_use]
    pub fn clear_access_token(mut self) -> Self {
        self.access_token = Some(None);
        self
    }

    #[must_use]
    pub fn refresh_token(mut self, value: impl Into<String>) -> Self {
        self.refresh_token = Some(Some(value.into()));
        self
    }

    #[must_use]
    pub fn clear_refresh_token(mut self) -> Self {
        self.refresh_token = Some(None);
        self
    }

    #[must_use]
    pub fn authorization_datetime(mut self, value: DateTime<Utc>) -> Self {
        self.authorization_datetime = Some(Some(value));
        self
    }

    #[must_use]
    pub fn clear_authorization_datetime(mut self) -> Self {
        self.authorization_datetime = Some(None);
        self
    }

    #[must_use]
    pub fn expires_in(mut self, seconds: u64) -> Self {
        self.expires_in = Some(seconds);
        self
    }

    #[must_use]
    pub fn redirect_uri(mut self, value: impl Into<String>) -> Self {
        self.redirect_uri = Some(Some(value.into()));
        self
    }

    /// Check if nothing would be changed
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
