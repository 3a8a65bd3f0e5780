use super::output::print_success;
use crate::api::{ClientParams, create_client};
use crate::auth::credentials::{self, AuthStatus, TokenSource};
use crate::cli::AuthCommand;
use crate::config::{HOST_ENV, types::Config};
use anyhow::{Context, Result};
use colored::Colorize;

pub async fn handle_auth(command: AuthCommand, config: &Config) -> Result<()> {
    match command {
        AuthCommand::Login { token } => login(&token, config).await,
        AuthCommand::Logout => {
            credentials::clear_credentials()?;
            print_success("Logged out");
            Ok(())
        }
        AuthCommand::Status => {
            status();
            Ok(())
        }
    }
}

/// Verifies the token against `users/me` before storing it
async fn login(token: &str, config: &Config) -> Result<()> {
    let host = std::env::var(HOST_ENV).unwrap_or_else(|_| config.client.host.clone());
    let mut params = ClientParams::new(token).with_host(host).with_retry(false, 0);
    params.insecure = config.client.insecure;
    let client = create_client(params)?;
    let user = client
        .get_current_user()
        .await
        .context("token was rejected by the API")?;

    credentials::save_credentials(token, Some(&user.email))?;
    print_success(&format!("Logged in as {} ({})", user.display_name(), user.email));
    Ok(())
}

fn status() {
    match credentials::get_auth_status() {
        AuthStatus::NotAuthenticated => {
            println!("{} run `cma auth login --token <TOKEN>`", "Not logged in:".yellow());
        }
        AuthStatus::Authenticated { email, source } => {
            let from = match source {
                TokenSource::Environment => "CMA_ACCESS_TOKEN",
                TokenSource::ConfigFile => "config file",
            };
            match email {
                Some(email) => println!("{} as {} (token from {})", "Logged in".green(), email, from),
                None => println!("{} (token from {})", "Logged in".green(), from),
            }
        }
    }
}
