//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Cronofy API command-line client
#[derive(Parser, Debug)]
#[command(name = "cronofy")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// OAuth client id
    #[arg(long, global = true, env = "CRONOFY_CLIENT_ID")]
    pub client_id: Option<String>,

    /// OAuth client secret
    #[arg(long, global = true, env = "CRONOFY_CLIENT_SECRET", hide_env_values = true)]
    pub client_secret: Option<String>,

    /// Access token for the account
    #[arg(long, global = true, env = "CRONOFY_ACCESS_TOKEN", hide_env_values = true)]
    pub access_token: Option<String>,

    /// Refresh token for the account
    #[arg(long, global = true, env = "CRONOFY_REFRESH_TOKEN", hide_env_values = true)]
    pub refresh_token: Option<String>,

    /// Client configuration file (YAML or JSON)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the active account
    Account,

    /// List calendars
    Calendars,

    /// List connected calendar profiles
    Profiles,

    /// List notification channels
    Channels,

    /// Open a notification channel
    CreateChannel {
        /// URL receiving push notifications
        callback_url: String,

        /// Only notify for these calendars (repeatable)
        #[arg(long = "calendar-id")]
        calendar_ids: Vec<String>,
    },

    /// Close a notification channel
    CloseChannel {
        channel_id: String,
    },

    /// Read events
    Events {
        /// Restrict to these calendars (repeatable)
        #[arg(long = "calendar-id")]
        calendar_ids: Vec<String>,

        /// Start date or date-time (ISO-8601)
        #[arg(long)]
        from: Option<String>,

        /// End date or date-time (ISO-8601)
        #[arg(long)]
        to: Option<String>,

        /// Query timezone
        #[arg(long)]
        tzid: Option<String>,

        /// Include deleted events
        #[arg(long)]
        include_deleted: bool,

        /// Only print the first page
        #[arg(long)]
        first_page: bool,
    },

    /// Read free/busy blocks
    FreeBusy {
        /// Restrict to these calendars (repeatable)
        #[arg(long = "calendar-id")]
        calendar_ids: Vec<String>,

        /// Start date or date-time (ISO-8601)
        #[arg(long)]
        from: Option<String>,

        /// End date or date-time (ISO-8601)
        #[arg(long)]
        to: Option<String>,

        /// Query timezone
        #[arg(long)]
        tzid: Option<String>,

        /// Only print the first page
        #[arg(long)]
        first_page: bool,
    },

    /// Delete an event created through the API
    DeleteEvent {
        calendar_id: String,
        event_id: String,
    },

    /// Print the authorization link for a user
    AuthLink {
        /// Where the user is sent after authorizing
        redirect_uri: String,

        /// Space separated scopes (defaults to the configured scopes)
        #[arg(long)]
        scope: Option<String>,

        /// Opaque value echoed back on redirect
        #[arg(long)]
        state: Option<String>,
    },

    /// Exchange an authorization code for tokens
    ExchangeCode {
        code: String,

        /// Redirect URI used for the authorization link
        #[arg(long)]
        redirect_uri: Option<String>,
    },

    /// Refresh the access token
    Refresh,

    /// Revoke the access token
    Revoke,
}
