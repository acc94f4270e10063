use crate::cli::main_types::{ConfigCommands, EntrySelector};
use keycloud_core::core::entry::CredentialEntry;
use keycloud_core::core::remote::RemoteCredentialService;
use keycloud_core::core::store::CredentialListStore;
use keycloud_core::display::TableDisplay;
use keycloud_core::error::{AppError, CliError, ConfigError};
use keycloud_core::storage::config::Config;
use keycloud_core::storage::credentials::has_session_token;
use keycloud_core::utils::logging::print_verbose;
use keycloud_core::utils::validation::validate_url;
use std::path::PathBuf;

#[derive(Default)]
pub struct ConfigHandler;

impl ConfigHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle(
        &self,
        command: ConfigCommands,
        config: &mut Config,
        config_path: Option<PathBuf>,
        verbose: bool,
    ) -> Result<(), AppError> {
        match command {
            ConfigCommands::Show => {
                print_verbose(verbose, "Attempting config show command");

                println!("Current Configuration:");
                println!("=====================");

                match &config_path {
                    Some(path) => println!("Config File: {}", path.display()),
                    None => println!("Config File: {}", Config::config_file_path()?.display()),
                }

                match config.get_url() {
                    Some(url) => println!("Server URL: {}", url),
                    None => println!("Server URL: ❌ Not set"),
                }
                println!("Timeout: {}s", config.timeout_secs());

                if has_session_token() {
                    println!("Session Token: ✅ Set (KEYCLOUD_SESSION_TOKEN)");
                } else {
                    println!("Session Token: ❌ Not set");
                }

                let endpoints = &config.endpoints;
                println!("\nEndpoints:");
                println!("  List:   GET {}", endpoints.list);
                println!("  Add:    POST {}", endpoints.add);
                println!(
                    "  Remove: {} {}",
                    endpoints.remove_method.as_str(),
                    endpoints.remove
                );

                Ok(())
            }
            ConfigCommands::Set {
                url,
                timeout_seconds,
            } => {
                print_verbose(
                    verbose,
                    &format!(
                        "Attempting config set - url: {:?}, timeout_seconds: {:?}",
                        url, timeout_seconds
                    ),
                );

                let mut updated_fields = Vec::new();

                if let Some(url_value) = url {
                    validate_url(&url_value)?;
                    updated_fields.push(format!("URL to: {}", url_value));
                    config.set_url(url_value);
                }

                if let Some(secs) = timeout_seconds {
                    if secs == 0 {
                        return Err(AppError::Config(ConfigError::InvalidValue {
                            field: "timeout_seconds".to_string(),
                            value: secs.to_string(),
                            reason: "must be at least 1 second".to_string(),
                        }));
                    }
                    config.timeout_seconds = Some(secs);
                    updated_fields.push(format!("timeout to: {}s", secs));
                }

                if updated_fields.is_empty() {
                    return Err(AppError::Cli(CliError::InvalidArguments(
                        "No configuration values provided. Use --url and/or --timeout-seconds"
                            .to_string(),
                    )));
                }

                config.save(config_path)?;
                println!("✅ Set {}", updated_fields.join(", "));
                println!("Configuration saved successfully.");
                Ok(())
            }
        }
    }
}

/// Runs the credential commands against a store that has not been loaded yet.
pub struct CredentialHandler<'a, R> {
    store: &'a CredentialListStore<R>,
    verbose: bool,
}

impl<'a, R> CredentialHandler<'a, R>
where
    R: RemoteCredentialService,
{
    pub fn new(store: &'a CredentialListStore<R>, verbose: bool) -> Self {
        Self { store, verbose }
    }

    pub async fn handle_list(&self, show_passwords: bool, format: &str) -> Result<(), AppError> {
        if !matches!(format, "table" | "json") {
            return Err(AppError::Cli(CliError::InvalidArguments(format!(
                "Unknown format '{}'. Use 'table' or 'json'",
                format
            ))));
        }

        let count = self.store.load().await?;
        print_verbose(self.verbose, &format!("Loaded {} credentials", count));

        let entries = self.store.list();
        match format {
            "json" => match serde_json::to_string_pretty(&entries_to_json(&entries, show_passwords))
            {
                Ok(json_output) => println!("{}", json_output),
                Err(e) => {
                    return Err(AppError::Cli(CliError::InvalidArguments(format!(
                        "Failed to serialize credentials to JSON: {}",
                        e
                    ))));
                }
            },
            _ => {
                if entries.is_empty() {
                    println!("No credentials stored.");
                } else {
                    let display = TableDisplay::new().with_passwords(show_passwords);
                    println!("{}", display.render_entries(&entries));
                }
            }
        }
        Ok(())
    }

    pub async fn handle_add(
        &self,
        username: &str,
        url: &str,
        password: Option<String>,
    ) -> Result<(), AppError> {
        let password = match password {
            Some(p) => p,
            None => prompt_password(username)?,
        };

        self.store.load().await?;
        print_verbose(
            self.verbose,
            &format!("Adding credential for '{}' at '{}'", username, url),
        );
        let entry = self.store.add(username, &password, url).await?;
        print_verbose(self.verbose, &format!("New entry id: {}", entry.id()));
        Ok(())
    }

    pub async fn handle_remove(&self, selector: &EntrySelector) -> Result<(), AppError> {
        self.store.load().await?;
        let entry = self.select(selector)?;
        print_verbose(
            self.verbose,
            &format!("Removing entry with id {}", entry.id()),
        );
        self.store.remove(&entry).await?;
        Ok(())
    }

    pub async fn handle_copy(&self, selector: &EntrySelector) -> Result<(), AppError> {
        self.store.load().await?;
        let entry = self.select(selector)?;
        self.store.copy_secret(&entry)?;
        Ok(())
    }

    fn select(&self, selector: &EntrySelector) -> Result<CredentialEntry, AppError> {
        select_entry(
            self.store.find(&selector.username, &selector.url),
            selector,
        )
    }
}

/// Pick the `index`-th (1-based) entry among the matches.
fn select_entry(
    matches: Vec<CredentialEntry>,
    selector: &EntrySelector,
) -> Result<CredentialEntry, AppError> {
    if selector.index == 0 {
        return Err(AppError::Cli(CliError::InvalidArguments(
            "--index starts at 1".to_string(),
        )));
    }

    let total = matches.len();
    if total > 1 && selector.index <= total {
        log::info!(
            "{} entries share this username and url; using match {}",
            total,
            selector.index
        );
    }

    matches
        .into_iter()
        .nth(selector.index - 1)
        .ok_or_else(|| {
            AppError::Cli(CliError::NoMatchingEntry {
                username: selector.username.clone(),
                url: selector.url.clone(),
            })
        })
}

fn entries_to_json(entries: &[CredentialEntry], show_passwords: bool) -> serde_json::Value {
    let items = entries
        .iter()
        .map(|entry| {
            let password = if show_passwords {
                serde_json::Value::String(entry.password().expose().to_string())
            } else {
                serde_json::Value::Null
            };
            serde_json::json!({
                "id": entry.id().as_assigned(),
                "username": entry.username(),
                "password": password,
                "url": entry.url(),
            })
        })
        .collect();
    serde_json::Value::Array(items)
}

fn prompt_password(username: &str) -> Result<String, AppError> {
    rpassword::prompt_password(format!("Password for {}: ", username)).map_err(|e| {
        AppError::Cli(CliError::InvalidArguments(format!(
            "Failed to read password: {}",
            e
        )))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use keycloud_core::api::models::WireCredential;
    use keycloud_core::core::clipboard::MemoryClipboard;
    use keycloud_core::core::notify::{Notification, RecordingNotifier};
    use keycloud_core::error::ApiError;
    use std::sync::{Arc, Mutex};

    /// Serves a fixed list and records delete requests.
    struct FixedRemote {
        records: Vec<WireCredential>,
        removed: Mutex<Vec<(String, String)>>,
    }

    impl FixedRemote {
        fn new(records: &[(&str, &str, &str, &str)]) -> Self {
            let records = records
                .iter()
                .map(|(id, username, password, url)| WireCredential {
                    id: Some(id.to_string()),
                    username: username.to_string(),
                    password: password.to_string(),
                    url: url.to_string(),
                })
                .collect();
            Self {
                records,
                removed: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl RemoteCredentialService for FixedRemote {
        async fn fetch_all(&self) -> Result<Vec<WireCredential>, ApiError> {
            Ok(self.records.clone())
        }

        async fn add(&self, _username: &str, _password: &str, _url: &str) -> Result<(), ApiError> {
            Ok(())
        }

        async fn remove(&self, username: &str, url: &str) -> Result<(), ApiError> {
            self.removed
                .lock()
                .unwrap()
                .push((username.to_string(), url.to_string()));
            Ok(())
        }
    }

    fn selector(username: &str, url: &str, index: usize) -> EntrySelector {
        EntrySelector {
            username: username.to_string(),
            url: url.to_string(),
            index,
        }
    }

    fn duplicate_store() -> CredentialListStore<FixedRemote> {
        let remote = FixedRemote::new(&[
            ("1", "mark", "first", "https://x"),
            ("2", "mark", "second", "https://x"),
            ("3", "jacob", "third", "https://y"),
        ]);
        CredentialListStore::new(remote, Arc::new(RecordingNotifier::new()))
    }

    #[tokio::test]
    async fn test_remove_selects_nth_match() {
        let store = duplicate_store();
        let handler = CredentialHandler::new(&store, false);

        handler
            .handle_remove(&selector("mark", "https://x", 2))
            .await
            .unwrap();

        let left: Vec<String> = store
            .list()
            .iter()
            .map(|e| e.password().expose().to_string())
            .collect();
        assert_eq!(left, vec!["first", "third"]);
        assert_eq!(
            store.remote().removed.lock().unwrap().as_slice(),
            &[("mark".to_string(), "https://x".to_string())]
        );
    }

    #[tokio::test]
    async fn test_remove_without_match_fails() {
        let store = duplicate_store();
        let handler = CredentialHandler::new(&store, false);

        let result = handler
            .handle_remove(&selector("nobody", "https://x", 1))
            .await;
        assert!(matches!(
            result,
            Err(AppError::Cli(CliError::NoMatchingEntry { .. }))
        ));
        assert!(store.remote().removed.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_copy_puts_selected_password_on_clipboard() {
        let clipboard = MemoryClipboard::new();
        let store = duplicate_store().with_clipboard(Box::new(clipboard.clone()));
        let handler = CredentialHandler::new(&store, false);

        handler
            .handle_copy(&selector("mark", "https://x", 2))
            .await
            .unwrap();
        assert_eq!(clipboard.contents(), Some("second".to_string()));
    }

    #[tokio::test]
    async fn test_copy_on_default_store_reports_copied() {
        let notifier = Arc::new(RecordingNotifier::new());
        let store = CredentialListStore::new(
            FixedRemote::new(&[("3", "jacob", "third", "https://y")]),
            notifier.clone(),
        );
        let handler = CredentialHandler::new(&store, false);

        handler
            .handle_copy(&selector("jacob", "https://y", 1))
            .await
            .unwrap();
        assert_eq!(notifier.last(), Some(Notification::copied()));
    }

    #[test]
    fn test_config_set_rejects_zero_timeout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut config = Config::default();

        let result = ConfigHandler::new().handle(
            ConfigCommands::Set {
                url: None,
                timeout_seconds: Some(0),
            },
            &mut config,
            Some(path.clone()),
            false,
        );
        assert!(matches!(
            result,
            Err(AppError::Config(ConfigError::InvalidValue { .. }))
        ));
        assert!(config.timeout_seconds.is_none());
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_add_with_password_appends_entry() {
        let store = duplicate_store();
        let handler = CredentialHandler::new(&store, false);

        handler
            .handle_add("anna", "https://z", Some("pw".to_string()))
            .await
            .unwrap();
        assert_eq!(store.len(), 4);
        assert!(store.find("anna", "https://z")[0].id().is_pending());
    }

    #[tokio::test]
    async fn test_list_rejects_unknown_format() {
        let store = duplicate_store();
        let handler = CredentialHandler::new(&store, false);

        let result = handler.handle_list(false, "csv").await;
        assert!(matches!(
            result,
            Err(AppError::Cli(CliError::InvalidArguments(_)))
        ));
        assert!(store.is_empty());
    }

    #[test]
    fn test_select_entry_index_zero() {
        let result = select_entry(Vec::new(), &selector("mark", "https://x", 0));
        assert!(matches!(
            result,
            Err(AppError::Cli(CliError::InvalidArguments(_)))
        ));
    }

    #[tokio::test]
    async fn test_entries_to_json_hides_passwords() {
        let store = duplicate_store();
        store.load().await.unwrap();
        store.add("anna", "pw", "https://z").await.unwrap();

        let hidden = entries_to_json(&store.list(), false);
        assert_eq!(hidden[0]["id"], "1");
        assert_eq!(hidden[0]["username"], "mark");
        assert!(hidden[0]["password"].is_null());
        assert!(hidden[3]["id"].is_null());

        let shown = entries_to_json(&store.list(), true);
        assert_eq!(shown[1]["password"], "second");
    }
}
