//! Query parameters for the paginated read endpoints

use crate::datetime::{iso8601, Timestamp};
use crate::http::RequestConfig;

/// Filters for `read_events`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventsQuery {
    /// Restrict to these calendars (all calendars when empty)
    pub calendar_ids: Vec<String>,
    pub from: Option<Timestamp>,
    pub to: Option<Timestamp>,
    /// Only events modified on or after this instant
    pub last_modified: Option<Timestamp>,
    /// Timezone of the query; the client default when unset
    pub tzid: Option<String>,
    /// Only events created through the API
    pub only_managed: bool,
    /// Include events created through the API
    pub include_managed: bool,
    pub include_deleted: bool,
    pub include_moved: bool,
    /// Return start/end with their zone
    pub localized_times: bool,
    /// Fetch later pages while iterating
    pub automatic_pagination: bool,
}

impl Default for EventsQuery {
    fn default() -> Self {
        Self {
            calendar_ids: Vec::new(),
            from: None,
            to: None,
            last_modified: None,
            tzid: None,
            only_managed: false,
            include_managed: true,
            include_deleted: false,
            include_moved: false,
            localized_times: false,
            automatic_pagination: true,
        }
    }
}

impl EventsQuery {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn calendar_ids<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.calendar_ids = ids.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn from(mut self, from: impl Into<Timestamp>) -> Self {
        self.from = Some(from.into());
        self
    }

    #[must_use]
    pub fn to(mut self, to: impl Into<Timestamp>) -> Self {
        self.to = Some(to.into());
        self
    }

    #[must_use]
    pub fn last_modified(mut self, last_modified: impl Into<Timestamp>) -> Self {
        self.last_modified = Some(last_modified.into());
        self
    }

    #[must_use]
    pub fn tzid(mut self, tzid: impl Into<String>) -> Self {
        self.tzid = Some(tzid.into());
        self
    }

    #[must_use]
    pub fn only_managed(mut self, value: bool) -> Self {
        self.only_managed = value;
        self
    }

    #[must_use]
    pub fn include_managed(mut self, value: bool) -> Self {
        self.include_managed = value;
        self
    }

    #[must_use]
    pub fn include_deleted(mut self, value: bool) -> Self {
        self.include_deleted = value;
        self
    }

    #[must_use]
    pub fn include_moved(mut self, value: bool) -> Self {
        self.include_moved = value;
        self
    }

    #[must_use]
    pub fn localized_times(mut self, value: bool) -> Self {
        self.localized_times = value;
        self
    }

    #[must_use]
    pub fn automatic_pagination(mut self, value: bool) -> Self {
        self.automatic_pagination = value;
        self
    }

    /// Request against `events`, falling back to `default_tzid`
    pub fn to_request(&self, default_tzid: &str) -> RequestConfig {
        RequestConfig::endpoint("events")
            .query("tzid", self.tzid.as_deref().unwrap_or(default_tzid))
            .query_each("calendar_ids", &self.calendar_ids)
            .query_opt("from", iso8601(self.from.as_ref()))
            .query_opt("to", iso8601(self.to.as_ref()))
            .query_opt("last_modified", iso8601(self.last_modified.as_ref()))
            .query("only_managed", self.only_managed)
            .query("include_managed", self.include_managed)
            .query("include_deleted", self.include_deleted)
            .query("include_moved", self.include_moved)
            .query("localized_times", self.localized_times)
    }
}

/// Filters for `read_free_busy`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FreeBusyQuery {
    pub calendar_ids: Vec<String>,
    pub from: Option<Timestamp>,
    pub to: Option<Timestamp>,
    pub tzid: Option<String>,
    pub include_managed: bool,
    pub localized_times: bool,
    pub automatic_pagination: bool,
}

impl Default for FreeBusyQuery {
    fn default() -> Self {
        Self {
            calendar_ids: Vec::new(),
            from: None,
            to: None,
            tzid: None,
            include_managed: true,
            localized_times: false,
            automatic_pagination: true,
        }
    }
}

impl FreeBusyQuery {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn calendar_ids<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.calendar_ids = ids.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn from(mut self, from: impl Into<Timestamp>) -> Self {
        self.from = Some(from.into());
        self
    }

    #[must_use]
    pub fn to(mut self, to: impl Into<Timestamp>) -> Self {
        self.to = Some(to.into());
        self
    }

    #[must_use]
    pub fn tzid(mut self, tzid: impl Into<String>) -> Self {
        self.tzid = Some(tzid.into());
        self
    }

    #[must_use]
    pub fn include_managed(mut self, value: bool) -> Self {
        self.include_managed = value;
        self
    }

    #[must_use]
    pub fn localized_times(mut self, value: bool) -> Self {
        self.localized_times = value;
        self
    }

    #[must_use]
    pub fn automatic_pagination(mut self, value: bool) -> Self {
        self.automatic_pagination = value;
        self
    }

    /// Request against `free_busy`, falling back to `default_tzid`
    pub fn to_request(&self, default_tzid: &str) -> RequestConfig {
        RequestConfig::endpoint("free_busy")
            .query("tzid", self.tzid.as_deref().unwrap_or(default_tzid))
            .query_each("calendar_ids", &self.calendar_ids)
            .query_opt("from", iso8601(self.from.as_ref()))
            .query_opt("to", iso8601(self.to.as_ref()))
            .query("include_managed", self.include_managed)
            .query("localized_times", self.localized_times)
    }
}
