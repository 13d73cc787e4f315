//! Cronofy client
//!
//! `CronofyClient` is the public face of the crate. Each operation maps to a
//! single request through its [`RequestHandler`]; the paginated reads hand
//! back a [`Pages`] that borrows the handler for later pages.
//!
//! The client is not internally synchronised. Token-changing operations take
//! `&mut self`, so a live `Pages` prevents a refresh or revocation from
//! running under it; sharing a client between tasks needs external locking.

mod query;

pub use query::{EventsQuery, FreeBusyQuery};

use crate::auth::{Auth, AuthUpdate, TokenGrant};
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::http::{RequestConfig, RequestHandler};
use crate::pagination::Pages;
use crate::types::{
    Account, Calendar, Channel, ChannelFilters, Event, EventDraft, FreeBusy, JsonObject,
    JsonValue, Profile, TokenResponse,
};
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::{debug, info, warn};

/// Client for the Cronofy API
#[derive(Debug)]
pub struct CronofyClient {
    handler: RequestHandler,
}

impl CronofyClient {
    /// Create a client against the production endpoints
    pub fn new(auth: Auth) -> Result<Self> {
        Self::with_config(ClientConfig::default(), auth)
    }

    /// Create a client with custom settings
    pub fn with_config(config: ClientConfig, auth: Auth) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            handler: RequestHandler::new(config, auth)?,
        })
    }

    pub fn auth(&self) -> &Auth {
        self.handler.auth()
    }

    pub fn config(&self) -> &ClientConfig {
        self.handler.config()
    }

    // ========================================================================
    // Account, Calendars, Profiles
    // ========================================================================

    /// Identifying information for the active account
    pub async fn account(&self) -> Result<Account> {
        self.get_keyed("account", "account").await
    }

    /// Calendars available to the active account
    pub async fn list_calendars(&self) -> Result<Vec<Calendar>> {
        self.get_keyed("calendars", "calendars").await
    }

    /// Calendar profiles connected to the active account
    pub async fn list_profiles(&self) -> Result<Vec<Profile>> {
        self.get_keyed("profiles", "profiles").await
    }

    // ========================================================================
    // Notification Channels
    // ========================================================================

    /// Notification channels of the active account
    pub async fn list_notification_channels(&self) -> Result<Vec<Channel>> {
        self.get_keyed("channels", "channels").await
    }

    /// Open a channel that pushes change notifications to `callback_url`
    ///
    /// The URL should be HTTPS and at most 128 characters. With
    /// `calendar_ids` empty, changes to every calendar are reported.
    pub async fn create_notification_channel(
        &self,
        callback_url: &str,
        calendar_ids: &[String],
    ) -> Result<Channel> {
        let mut body = json!({ "callback_url": callback_url });
        if !calendar_ids.is_empty() {
            let filters = ChannelFilters {
                calendar_ids: calendar_ids.to_vec(),
                only_managed: None,
            };
            body["filters"] = serde_json::to_value(filters)?;
        }

        let response: JsonValue = self
            .handler
            .post_json(RequestConfig::endpoint("channels").json(body))
            .await?;
        let channel = take_key(response, "channel")?;
        info!("opened notification channel");
        Ok(channel)
    }

    /// Stop push notifications on a channel
    pub async fn close_notification_channel(&self, channel_id: &str) -> Result<()> {
        self.handler
            .delete(RequestConfig::endpoint(format!("channels/{channel_id}")))
            .await?;
        info!("closed notification channel {}", channel_id);
        Ok(())
    }

    // ========================================================================
    // Events and Free/Busy
    // ========================================================================

    /// Events of the active account, optionally filtered
    pub async fn read_events(&self, query: &EventsQuery) -> Result<Pages<'_, Event>> {
        let request = query.to_request(&self.config().default_tzid);
        let body = self.handler.get(request).await?;
        Pages::new(&self.handler, body, "events", query.automatic_pagination)
    }

    /// Free/busy blocks of the active account, optionally filtered
    pub async fn read_free_busy(&self, query: &FreeBusyQuery) -> Result<Pages<'_, FreeBusy>> {
        let request = query.to_request(&self.config().default_tzid);
        let body = self.handler.get(request).await?;
        Pages::new(&self.handler, body, "free_busy", query.automatic_pagination)
    }

    /// Insert or update an event in a calendar
    ///
    /// Every field listed in `ClientConfig::events_required_fields` must be
    /// present; otherwise this fails with `Error::MissingEventField` without
    /// sending anything. `start` and `end` go out as ISO-8601 strings; a
    /// non-string value supplied through `EventDraft::field` fails with
    /// `Error::InvalidEventField`.
    pub async fn upsert_event(&self, calendar_id: &str, event: &EventDraft) -> Result<()> {
        let body = event.to_body()?;
        check_required_fields(&body, &self.config().events_required_fields)?;

        self.handler
            .post(
                RequestConfig::endpoint(format!("calendars/{calendar_id}/events"))
                    .json(JsonValue::Object(body)),
            )
            .await?;
        debug!("upserted event in calendar {}", calendar_id);
        Ok(())
    }

    /// Delete an event created through the API
    pub async fn delete_event(&self, calendar_id: &str, event_id: &str) -> Result<()> {
        self.handler
            .delete(
                RequestConfig::endpoint(format!("calendars/{calendar_id}/events"))
                    .query("event_id", event_id),
            )
            .await?;
        debug!("deleted event from calendar {}", calendar_id);
        Ok(())
    }

    // ========================================================================
    // OAuth
    // ========================================================================

    /// URL to send the user to for authorization
    ///
    /// Records `redirect_uri` for the later code exchange. Without a scope
    /// the configured default scopes are requested. The authorize endpoint is
    /// requested and its redirects followed; the final URL is returned.
    pub async fn user_auth_link(
        &mut self,
        redirect_uri: &str,
        scope: Option<&str>,
        state: Option<&str>,
    ) -> Result<String> {
        let scope = match scope {
            Some(scope) if !scope.is_empty() => scope.to_string(),
            _ => self.config().default_scope_string(),
        };
        self.handler
            .auth_mut()
            .update(AuthUpdate::new().redirect_uri(redirect_uri));

        let request = RequestConfig::url(self.config().authorize_url())
            .query("response_type", "code")
            .query_opt("client_id", self.auth().client_id())
            .query("redirect_uri", redirect_uri)
            .query("scope", scope)
            .query("state", state.unwrap_or(""));

        let response = self.handler.get_raw(request).await?;
        Ok(response.url().to_string())
    }

    /// Exchange an authorization code for tokens
    ///
    /// `redirect_uri` defaults to the one recorded by `user_auth_link`. On
    /// success the access and refresh tokens, lifetime and authorization time
    /// are written to `Auth`.
    pub async fn get_authorization_from_code(
        &mut self,
        code: &str,
        redirect_uri: Option<&str>,
    ) -> Result<TokenResponse> {
        let grant = TokenGrant::authorization_code(self.auth(), code, redirect_uri.unwrap_or(""));
        let token = self.request_token(&grant).await?;

        let access_token = required(&token.access_token, "access_token")?;
        let refresh_token = required(&token.refresh_token, "refresh_token")?;
        let expires_in = token
            .expires_in
            .ok_or_else(|| Error::missing_token_field("expires_in"))?;

        self.handler.auth_mut().update(
            AuthUpdate::new()
                .authorization_datetime(Utc::now())
                .access_token(access_token)
                .refresh_token(refresh_token)
                .expires_in(expires_in),
        );
        info!("authorization code exchanged, token valid for {}s", expires_in);
        Ok(token)
    }

    /// Obtain a new access token with the stored refresh token
    pub async fn refresh_access_token(&mut self) -> Result<TokenResponse> {
        let grant = TokenGrant::refresh_token(self.auth());
        let token = self.request_token(&grant).await?;

        let access_token = required(&token.access_token, "access_token")?;
        let expires_in = token
            .expires_in
            .ok_or_else(|| Error::missing_token_field("expires_in"))?;

        self.handler.auth_mut().update(
            AuthUpdate::new()
                .authorization_datetime(Utc::now())
                .access_token(access_token)
                .expires_in(expires_in),
        );
        info!("access token refreshed, valid for {}s", expires_in);
        Ok(token)
    }

    /// Revoke the access token
    ///
    /// Local token state is cleared whatever the remote call returns; its
    /// outcome is passed back to the caller afterwards.
    pub async fn revoke_authorization(&mut self) -> Result<()> {
        let grant = TokenGrant::revoke(self.auth());
        let outcome = match RequestConfig::url(self.config().revoke_url()).json_from(&grant) {
            Ok(request) => self.handler.post(request).await.map(|_| ()),
            Err(e) => Err(e),
        };

        self.handler.auth_mut().clear();
        match &outcome {
            Ok(()) => info!("authorization revoked"),
            Err(e) => warn!("revoke request failed, local tokens cleared anyway: {}", e),
        }
        outcome
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    /// GET an endpoint and deserialize the value under `key`
    async fn get_keyed<T: DeserializeOwned>(&self, endpoint: &str, key: &str) -> Result<T> {
        let body = self.handler.get(RequestConfig::endpoint(endpoint)).await?;
        take_key(body, key)
    }

    async fn request_token(&self, grant: &TokenGrant) -> Result<TokenResponse> {
        debug!("requesting token ({:?})", grant.grant_type());
        let request = RequestConfig::url(self.config().token_url()).json_from(grant)?;
        self.handler.post_json(request).await
    }
}

/// Deserialize the value stored under `key` in a response body
fn take_key<T: DeserializeOwned>(mut body: JsonValue, key: &str) -> Result<T> {
    let value = body
        .get_mut(key)
        .map(JsonValue::take)
        .ok_or_else(|| Error::missing_result_key(key))?;
    Ok(serde_json::from_value(value)?)
}

/// Fail with the first required field that is absent or null
fn check_required_fields(event: &JsonObject, required: &[String]) -> Result<()> {
    match required
        .iter()
        .find(|field| event.get(field.as_str()).map_or(true, JsonValue::is_null))
    {
        Some(field) => Err(Error::missing_event_field(field.as_str())),
        None => Ok(()),
    }
}

fn required(value: &Option<String>, field: &str) -> Result<String> {
    value
        .clone()
        .ok_or_else(|| Error::missing_token_field(field))
}
