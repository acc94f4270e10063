use crate::cli::clipboard::SystemClipboard;
use crate::cli::command_handlers::{ConfigHandler, CredentialHandler};
use crate::cli::main_types::Commands;
use crate::cli::notifier::TerminalNotifier;
use keycloud_core::api::client::KeycloudClient;
use keycloud_core::core::store::CredentialListStore;
use keycloud_core::error::{AppError, ConfigError};
use keycloud_core::storage::config::Config;
use keycloud_core::storage::credentials::get_session_token;
use keycloud_core::utils::logging::print_verbose;
use keycloud_core::utils::validation::{validate_endpoint_path, validate_url};
use std::path::PathBuf;
use std::sync::Arc;

pub struct Dispatcher {
    config: Config,
    config_path: Option<PathBuf>,
    verbose: bool,
    server: Option<String>,
    session_token: Option<String>,
}

impl Dispatcher {
    fn log_verbose(&self, msg: &str) {
        print_verbose(self.verbose, msg);
    }

    pub fn new(
        config: Config,
        config_path: Option<PathBuf>,
        verbose: bool,
        server: Option<String>,
        session_token: Option<String>,
    ) -> Self {
        Self {
            config,
            config_path,
            verbose,
            server,
            session_token,
        }
    }

    // CLI argument > environment variable
    fn get_effective_session_token(&self) -> Option<String> {
        if let Some(ref token) = self.session_token {
            if !token.is_empty() {
                return Some(token.clone());
            }
        }
        get_session_token()
    }

    // --server > KEYCLOUD_URL > config file
    fn get_url(&self) -> Result<String, AppError> {
        self.server
            .clone()
            .filter(|s| !s.is_empty())
            .or_else(|| self.config.get_url())
            .ok_or_else(|| {
                AppError::Config(ConfigError::MissingField {
                    field: "url".to_string(),
                    hint: "Use 'keycloud config set --url <url>', pass --server, or set KEYCLOUD_URL"
                        .to_string(),
                })
            })
    }

    fn create_client(&self) -> Result<KeycloudClient, AppError> {
        let url = self.get_url()?;
        validate_url(&url)?;

        let endpoints = self.config.endpoints.clone();
        for path in [&endpoints.list, &endpoints.add, &endpoints.remove] {
            validate_endpoint_path(path)?;
        }

        let client = KeycloudClient::with_timeout(url, self.config.timeout_secs())?
            .with_endpoints(endpoints);
        match self.get_effective_session_token() {
            Some(token) => {
                self.log_verbose("Creating client with session token");
                Ok(client.with_session_token(token))
            }
            None => {
                self.log_verbose("Creating client without session token");
                Ok(client)
            }
        }
    }

    fn create_store(&self) -> Result<CredentialListStore<KeycloudClient>, AppError> {
        let client = self.create_client()?;
        Ok(
            CredentialListStore::new(client, Arc::new(TerminalNotifier::new()))
                .with_clipboard(Box::new(SystemClipboard)),
        )
    }

    pub async fn dispatch(&mut self, command: Commands) -> Result<(), AppError> {
        match command {
            Commands::Config { command } => {
                let handler = ConfigHandler::new();
                handler.handle(
                    command,
                    &mut self.config,
                    self.config_path.clone(),
                    self.verbose,
                )
            }
            Commands::List {
                show_passwords,
                format,
            } => {
                let store = self.create_store()?;
                CredentialHandler::new(&store, self.verbose)
                    .handle_list(show_passwords, &format)
                    .await
            }
            Commands::Add {
                username,
                url,
                password,
            } => {
                let store = self.create_store()?;
                CredentialHandler::new(&store, self.verbose)
                    .handle_add(&username, &url, password)
                    .await
            }
            Commands::Remove(selector) => {
                let store = self.create_store()?;
                CredentialHandler::new(&store, self.verbose)
                    .handle_remove(&selector)
                    .await
            }
            Commands::Copy(selector) => {
                let store = self.create_store()?;
                CredentialHandler::new(&store, self.verbose)
                    .handle_copy(&selector)
                    .await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dispatcher_with(config: Config, server: Option<&str>) -> Dispatcher {
        Dispatcher::new(config, None, false, server.map(str::to_string), None)
    }

    #[test]
    fn test_server_flag_overrides_config() {
        let mut config = Config::default();
        config.set_url("http://configured:8080".to_string());
        let dispatcher = dispatcher_with(config, Some("http://flag:9090"));
        assert_eq!(dispatcher.get_url().unwrap(), "http://flag:9090");
    }

    #[test]
    fn test_config_url_used_without_flag() {
        let mut config = Config::default();
        config.set_url("http://configured:8080".to_string());
        let dispatcher = dispatcher_with(config, None);
        assert_eq!(dispatcher.get_url().unwrap(), "http://configured:8080");
    }

    #[test]
    fn test_invalid_endpoint_path_rejected() {
        let mut config = Config::default();
        config.endpoints.list = "getPasswords".to_string();
        let dispatcher = dispatcher_with(config, Some("http://localhost:8080"));
        assert!(dispatcher.create_client().is_err());
    }

    #[test]
    fn test_explicit_token_authenticates_client() {
        let dispatcher = Dispatcher::new(
            Config::default(),
            None,
            false,
            Some("http://localhost:8080".to_string()),
            Some("tok".to_string()),
        );
        let client = dispatcher.create_client().unwrap();
        assert!(client.is_authenticated());
        assert_eq!(client.session_token.as_deref(), Some("tok"));
    }
}
