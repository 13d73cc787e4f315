//! Common types used throughout the client
//!
//! Response records are deliberately narrow: the fields every caller relies
//! on are typed, anything else the service sends lands in `extra`.

use crate::datetime::Timestamp;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

// ============================================================================
// Account, Calendars, Profiles
// ============================================================================

/// The account the access token belongs to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub account_id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub default_tzid: Option<String>,
    #[serde(flatten)]
    pub extra: JsonObject,
}

/// A calendar on one of the account's connected profiles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Calendar {
    pub calendar_id: String,
    #[serde(default)]
    pub calendar_name: Option<String>,
    #[serde(default)]
    pub provider_name: Option<String>,
    #[serde(default)]
    pub profile_id: Option<String>,
    #[serde(default)]
    pub profile_name: Option<String>,
    #[serde(default)]
    pub calendar_readonly: bool,
    #[serde(default)]
    pub calendar_deleted: bool,
    #[serde(default)]
    pub calendar_primary: bool,
    #[serde(flatten)]
    pub extra: JsonObject,
}

/// A connected calendar provider account (Google, Exchange, iCloud, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub profile_id: String,
    #[serde(default)]
    pub profile_name: Option<String>,
    #[serde(default)]
    pub provider_name: Option<String>,
    #[serde(default)]
    pub profile_connected: bool,
    #[serde(default)]
    pub profile_relink_url: Option<String>,
    #[serde(flatten)]
    pub extra: JsonObject,
}

// ============================================================================
// Notification Channels
// ============================================================================

/// Push notification channel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Channel {
    pub channel_id: String,
    pub callback_url: String,
    #[serde(default)]
    pub filters: ChannelFilters,
}

/// Restrictions on which changes trigger a notification
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelFilters {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub calendar_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub only_managed: Option<bool>,
}

// ============================================================================
// Events and Free/Busy
// ============================================================================

/// Start or end of an event as returned by the API
///
/// Plain strings normally; objects carrying the zone when the query asked for
/// localized times.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EventTime {
    Plain(String),
    Localized { time: String, tzid: String },
}

impl EventTime {
    /// The ISO-8601 time string regardless of representation
    pub fn time(&self) -> &str {
        match self {
            Self::Plain(time) | Self::Localized { time, .. } => time,
        }
    }
}

/// Event read back from `events`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub calendar_id: String,
    #[serde(default)]
    pub event_uid: Option<String>,
    /// Only present on events created through the API
    #[serde(default)]
    pub event_id: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub start: EventTime,
    pub end: EventTime,
    #[serde(default)]
    pub deleted: bool,
    #[serde(flatten)]
    pub extra: JsonObject,
}

/// Busy block read back from `free_busy`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FreeBusy {
    pub calendar_id: String,
    pub start: EventTime,
    pub end: EventTime,
    #[serde(default)]
    pub free_busy_status: Option<String>,
    #[serde(flatten)]
    pub extra: JsonObject,
}

/// Event location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventLocation {
    pub description: String,
}

/// Event to insert or update through `upsert_event`
///
/// Fields are optional so that the required-field check can report what is
/// missing instead of the type system hiding it; anything not modelled can be
/// passed through `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EventDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tzid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<EventLocation>,
    #[serde(flatten)]
    pub extra: JsonObject,
}

impl EventDraft {
    /// Create a draft with the fields the API requires
    pub fn new(
        event_id: impl Into<String>,
        summary: impl Into<String>,
        start: impl Into<Timestamp>,
        end: impl Into<Timestamp>,
    ) -> Self {
        Self {
            event_id: Some(event_id.into()),
            summary: Some(summary.into()),
            start: Some(start.into()),
            end: Some(end.into()),
            ..Default::default()
        }
    }

    /// Set the description
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the location description
    #[must_use]
    pub fn location(mut self, description: impl Into<String>) -> Self {
        self.location = Some(EventLocation {
            description: description.into(),
        });
        self
    }

    /// Set the timezone the start/end are expressed in
    #[must_use]
    pub fn tzid(mut self, tzid: impl Into<String>) -> Self {
        self.tzid = Some(tzid.into());
        self
    }

    /// Add an arbitrary field
    ///
    /// Typed fields that are set take precedence over an extra field of the
    /// same name.
    #[must_use]
    pub fn field(mut self, key: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// JSON object sent to `calendars/{id}/events`
    ///
    /// `start` and `end` must end up as ISO-8601 strings; any other value
    /// supplied through `extra` fails with `Error::InvalidEventField`.
    pub fn to_body(&self) -> Result<JsonObject> {
        let typed = Self {
            extra: JsonObject::new(),
            ..self.clone()
        };
        let mut body = self.extra.clone();
        if let JsonValue::Object(fields) = serde_json::to_value(typed)? {
            body.extend(fields);
        }

        for key in ["start", "end"] {
            match body.get(key) {
                None | Some(JsonValue::Null | JsonValue::String(_)) => {}
                Some(other) => {
                    return Err(Error::invalid_event_field(
                        key,
                        format!("expected an ISO-8601 string, got {other}"),
                    ))
                }
            }
        }
        Ok(body)
    }
}

// ============================================================================
// OAuth
// ============================================================================

/// Body returned by the token endpoint
///
/// Fields are optional here; the client decides which ones a given grant
/// must return and reports the absent ones as `Error::AuthToken`.
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenResponse {
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
    #[serde(default)]
    pub scope: Option<String>,
    #[serde(default)]
    pub account_id: Option<String>,
    #[serde(flatten)]
    pub extra: JsonObject,
}

impl fmt::Debug for TokenResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn redact(value: &Option<String>) -> &'static str {
            if value.is_some() {
                "<redacted>"
            } else {
                "<unset>"
            }
        }

        f.debug_struct("TokenResponse")
            .field("token_type", &self.token_type)
            .field("access_token", &redact(&self.access_token))
            .field("refresh_token", &redact(&self.refresh_token))
            .field("expires_in", &self.expires_in)
            .field("scope", &self.scope)
            .field("account_id", &self.account_id)
            .field("extra", &self.extra)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_event_plain_times() {
        let event: Event = serde_json::from_value(json!({
            "calendar_id": "cal_1",
            "event_uid": "evt_external_1",
            "summary": "Standup",
            "start": "2024-03-01T09:00:00Z",
            "end": "2024-03-01T09:15:00Z",
            "participation_status": "accepted"
        }))
        .unwrap();

        assert_eq!(event.start.time(), "2024-03-01T09:00:00Z");
        assert_eq!(event.event_id, None);
        assert!(!event.deleted);
        assert_eq!(event.extra["participation_status"], "accepted");
    }

    #[test]
    fn test_event_localized_times() {
        let event: Event = serde_json::from_value(json!({
            "calendar_id": "cal_1",
            "start": {"time": "2024-03-01T09:00:00+01:00", "tzid": "Europe/Paris"},
            "end": {"time": "2024-03-01T10:00:00+01:00", "tzid": "Europe/Paris"}
        }))
        .unwrap();

        assert_eq!(
            event.end,
            EventTime::Localized {
                time: "2024-03-01T10:00:00+01:00".to_string(),
                tzid: "Europe/Paris".to_string(),
            }
        );
    }

    #[test]
    fn test_event_draft_serialization() {
        let start = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 5, 2).unwrap();
        let draft = EventDraft::new("evt-1", "Holiday", start, end)
            .location("Beach")
            .field("transparency", "transparent");

        assert_eq!(
            serde_json::to_value(&draft).unwrap(),
            json!({
                "event_id": "evt-1",
                "summary": "Holiday",
                "start": "2024-05-01",
                "end": "2024-05-02",
                "location": {"description": "Beach"},
                "transparency": "transparent"
            })
        );
    }

    #[test]
    fn test_event_draft_typed_fields_win_over_extra() {
        let day = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let draft = EventDraft::new("evt-1", "Holiday", day, day)
            .field("start", 12345)
            .field("summary", "Overridden");

        let body = draft.to_body().unwrap();
        assert_eq!(body["start"], json!("2024-05-01"));
        assert_eq!(body["summary"], json!("Holiday"));
    }

    #[test]
    fn test_event_draft_rejects_non_string_times() {
        let mut draft = EventDraft::new("evt-1", "Holiday", "2024-05-01", "2024-05-02")
            .field("start", 12345);
        draft.start = None;

        let err = draft.to_body().unwrap_err();
        assert!(matches!(err, Error::InvalidEventField { ref field, .. } if field == "start"));
        assert!(err.is_local());
    }

    #[test]
    fn test_event_draft_extra_string_time_passes_through() {
        let mut draft = EventDraft::new("evt-1", "Holiday", "2024-05-01", "2024-05-02")
            .field("end", "2024-05-03");
        draft.end = None;

        assert_eq!(draft.to_body().unwrap()["end"], json!("2024-05-03"));
    }

    #[test]
    fn test_token_response_debug_redacts_tokens() {
        let token = TokenResponse {
            access_token: Some("secret-access".to_string()),
            refresh_token: Some("secret-refresh".to_string()),
            expires_in: Some(3600),
            ..Default::default()
        };

        let debug = format!("{token:?}");
        assert!(!debug.contains("secret-access"));
        assert!(!debug.contains("secret-refresh"));
        assert!(debug.contains("<redacted>"));
        assert!(debug.contains("3600"));
    }

    #[test]
    fn test_channel_without_filters() {
        let channel: Channel = serde_json::from_value(json!({
            "channel_id": "chn_1",
            "callback_url": "https://example.com/hook"
        }))
        .unwrap();
        assert!(channel.filters.calendar_ids.is_empty());
    }
}
