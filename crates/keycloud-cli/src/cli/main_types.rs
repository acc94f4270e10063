use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "keycloud")]
#[command(about = "Command line dashboard for the keycloud password manager")]
#[command(version)]
#[command(after_help = "Examples:
  keycloud list                                      # List stored credentials
  keycloud list --format json                        # Output as JSON
  keycloud add --username mark --url https://x.com   # Add (prompts for the password)
  keycloud remove --username mark --url https://x.com
  keycloud copy --username mark --url https://x.com  # Copy the password
  keycloud config set --url http://localhost:8080    # Point at a server

Environment Variables:
  KEYCLOUD_SESSION_TOKEN   Session token sent as a bearer token
  KEYCLOUD_URL             keycloud server URL")]
pub struct Cli {
    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Custom configuration directory path
    #[arg(long, global = true)]
    pub config_dir: Option<String>,

    /// Server URL for this invocation (overrides the config file)
    #[arg(long, global = true)]
    pub server: Option<String>,

    /// Session token for authentication
    #[arg(long, global = true, env = "KEYCLOUD_SESSION_TOKEN", hide_env_values = true)]
    pub session_token: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Configuration management (show, set)
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// List stored credentials
    #[command(after_help = "Examples:
  keycloud list                     # Passwords masked
  keycloud list --show-passwords    # Passwords in clear text
  keycloud list --format json       # Output as JSON")]
    List {
        /// Print passwords in clear text
        #[arg(long)]
        show_passwords: bool,
        /// Output format: table or json
        #[arg(short, long, default_value = "table")]
        format: String,
    },
    /// Add a credential
    Add {
        #[arg(long)]
        username: String,
        /// Site the credential belongs to
        #[arg(long)]
        url: String,
        /// Password (prompted for when omitted)
        #[arg(long)]
        password: Option<String>,
    },
    /// Remove a credential
    Remove(EntrySelector),
    /// Copy a credential's password to the clipboard
    Copy(EntrySelector),
}

/// Picks one entry out of the list by username and url
#[derive(Args, Debug)]
pub struct EntrySelector {
    #[arg(long)]
    pub username: String,

    #[arg(long)]
    pub url: String,

    /// Which match to use when several entries share username and url (1-based)
    #[arg(long, default_value = "1")]
    pub index: usize,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the current configuration
    Show,
    /// Set configuration values
    #[command(after_help = "Examples:
  keycloud config set --url http://localhost:8080
  keycloud config set --timeout-seconds 10")]
    Set {
        /// keycloud server URL
        #[arg(long)]
        url: Option<String>,
        /// Per-request timeout in seconds
        #[arg(long)]
        timeout_seconds: Option<u64>,
    },
}
