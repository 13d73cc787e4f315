//! CLI module
//!
//! Command-line interface over the client.
//!
//! # Commands
//!
//! - `account`, `calendars`, `profiles`, `channels` - read account data
//! - `events`, `free-busy` - stream paginated results as JSON lines
//! - `create-channel`, `close-channel`, `delete-event` - mutations
//! - `auth-link`, `exchange-code`, `refresh`, `revoke` - OAuth lifecycle

mod commands;
mod runner;

pub use commands::{Cli, Commands};
pub use runner::Runner;
