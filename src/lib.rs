// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::match_wildcard_for_single_variants)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # Cronofy client
//!
//! Async client for the [Cronofy](https://www.cronofy.com/developers/api/)
//! calendar API.
//!
//! ## Features
//!
//! - **OAuth 2.0**: authorization links, code exchange, refresh and revocation
//! - **Typed Records**: accounts, calendars, profiles, events, free/busy, channels
//! - **Transparent Pagination**: iterate events across pages, fetched on demand
//! - **Injectable Settings**: base URLs, default timezone and scopes in one config
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use cronofy::{Auth, CronofyClient, EventsQuery, Result};
//! use chrono::NaiveDate;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = CronofyClient::new(Auth::with_access_token("..."))?;
//!
//!     for calendar in client.list_calendars().await? {
//!         println!("{}", calendar.calendar_id);
//!     }
//!
//!     let query = EventsQuery::new()
//!         .from(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
//!         .to(NaiveDate::from_ymd_opt(2024, 1, 31).unwrap());
//!     let mut events = client.read_events(&query).await?;
//!     while let Some(event) = events.next_item().await? {
//!         println!("{:?}", event.summary);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CronofyClient                                              │
//! │  account / calendars / events / free_busy / channels / oauth│
//! └──────────────┬───────────────────────────────┬──────────────┘
//!                │                               │ list reads
//!                ▼                               ▼
//! ┌──────────────────────────────┐   ┌──────────────────────────┐
//! │  RequestHandler              │◄──│  Pages                   │
//! │  bearer token, URL, status   │   │  cursor + next_page link │
//! └──────────────┬───────────────┘   └──────────────────────────┘
//!                │
//!                ▼
//!          Auth (token state)
//! ```

pub mod auth;
pub mod cli;
pub mod client;
pub mod config;
pub mod datetime;
pub mod error;
pub mod http;
pub mod pagination;
pub mod types;

// Re-exports for convenience
pub use auth::{Auth, AuthUpdate};
pub use client::{CronofyClient, EventsQuery, FreeBusyQuery};
pub use config::ClientConfig;
pub use datetime::Timestamp;
pub use error::{Error, Result};
pub use pagination::{Page, PageInfo, Pages};
pub use types::{Account, Calendar, Channel, Event, EventDraft, FreeBusy, Profile, TokenResponse};
