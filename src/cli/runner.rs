//! CLI runner - executes commands

use crate::auth::Auth;
use crate::cli::commands::{Cli, Commands};
use crate::client::{CronofyClient, EventsQuery, FreeBusyQuery};
use crate::config::ClientConfig;
use crate::error::{Result, ResultExt};
use serde::Serialize;
use serde_json::json;
use tracing::debug;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        let mut client = self.client()?;

        match &self.cli.command {
            Commands::Account => print_json(&client.account().await?),
            Commands::Calendars => print_json(&client.list_calendars().await?),
            Commands::Profiles => print_json(&client.list_profiles().await?),
            Commands::Channels => print_json(&client.list_notification_channels().await?),
            Commands::CreateChannel {
                callback_url,
                calendar_ids,
            } => print_json(
                &client
                    .create_notification_channel(callback_url, calendar_ids)
                    .await?,
            ),
            Commands::CloseChannel { channel_id } => {
                client.close_notification_channel(channel_id).await
            }
            Commands::Events {
                calendar_ids,
                from,
                to,
                tzid,
                include_deleted,
                first_page,
            } => {
                let mut query = EventsQuery::new()
                    .calendar_ids(calendar_ids.iter().cloned())
                    .include_deleted(*include_deleted)
                    .automatic_pagination(!first_page);
                query.from = from.clone().map(Into::into);
                query.to = to.clone().map(Into::into);
                query.tzid = tzid.clone();

                let mut pages = client.read_events(&query).await?;
                while let Some(event) = pages.next_item().await? {
                    print_line(&event)?;
                }
                report_next_page(pages.next_page_url());
                Ok(())
            }
            Commands::FreeBusy {
                calendar_ids,
                from,
                to,
                tzid,
                first_page,
            } => {
                let mut query = FreeBusyQuery::new()
                    .calendar_ids(calendar_ids.iter().cloned())
                    .automatic_pagination(!first_page);
                query.from = from.clone().map(Into::into);
                query.to = to.clone().map(Into::into);
                query.tzid = tzid.clone();

                let mut pages = client.read_free_busy(&query).await?;
                while let Some(block) = pages.next_item().await? {
                    print_line(&block)?;
                }
                report_next_page(pages.next_page_url());
                Ok(())
            }
            Commands::DeleteEvent {
                calendar_id,
                event_id,
            } => client.delete_event(calendar_id, event_id).await,
            Commands::AuthLink {
                redirect_uri,
                scope,
                state,
            } => {
                let link = client
                    .user_auth_link(redirect_uri, scope.as_deref(), state.as_deref())
                    .await?;
                println!("{link}");
                Ok(())
            }
            Commands::ExchangeCode { code, redirect_uri } => {
                let token = client
                    .get_authorization_from_code(code, redirect_uri.as_deref())
                    .await?;
                print_json(&token)
            }
            Commands::Refresh => {
                let token = client.refresh_access_token().await?;
                print_json(&token)
            }
            Commands::Revoke => {
                client.revoke_authorization().await?;
                print_json(&json!({"revoked": true}))
            }
        }
    }

    /// Build the client from flags, environment and the optional config file
    fn client(&self) -> Result<CronofyClient> {
        let config = match &self.cli.config {
            Some(path) => ClientConfig::load(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => ClientConfig::default(),
        }
        .with_env_overrides();
        debug!("using API at {}", config.api_root());

        let auth = Auth::new(
            self.cli.client_id.clone(),
            self.cli.client_secret.clone(),
            self.cli.access_token.clone(),
            self.cli.refresh_token.clone(),
        );
        CronofyClient::with_config(config, auth)
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_line<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string(value)?);
    Ok(())
}

fn report_next_page(next: Option<&str>) {
    if let Some(url) = next {
        eprintln!("next page: {url}");
    }
}
