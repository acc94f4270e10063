use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("CliError: {0}")]
    Cli(#[from] CliError),
    #[error("ApiError: {0}")]
    Api(#[from] ApiError),
    #[error("ConfigError: {0}")]
    Config(#[from] ConfigError),
    #[error("StorageError: {0}")]
    Storage(#[from] StorageError),
    #[error("StoreError: {0}")]
    Store(#[from] StoreError),
}

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),
    #[error("No entry matches username '{username}' and url '{url}'")]
    NoMatchingEntry { username: String, url: String },
}

/// Failures talking to the remote credential service.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// The service answered with a non-success status.
    #[error("{status}")]
    Rejected {
        status: u16,
        endpoint: String,
        message: String,
    },
    /// The request never produced a response.
    #[error("Transport error on {endpoint}: {message}")]
    Transport { endpoint: String, message: String },
    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64, endpoint: String },
    #[error("Failed to decode response from {endpoint}: {message}")]
    Decode { endpoint: String, message: String },
}

impl ApiError {
    /// Status code carried by a rejection, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True when the failure happened below HTTP (connection, timeout, body).
    pub fn is_transport(&self) -> bool {
        !matches!(self, ApiError::Rejected { .. })
    }

    /// Detail shown to the user: the literal status code for rejections,
    /// the underlying error text otherwise.
    pub fn detail(&self) -> String {
        match self {
            ApiError::Rejected { status, .. } => status.to_string(),
            ApiError::Transport { message, .. } => message.clone(),
            ApiError::Timeout { timeout_secs, .. } => {
                format!("request timed out after {}s", timeout_secs)
            }
            ApiError::Decode { message, .. } => message.clone(),
        }
    }
}

/// Failures of a credential list store operation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    #[error(transparent)]
    Remote(#[from] ApiError),
    #[error("Validation error: {field}: {message}")]
    Validation { field: String, message: String },
    #[error("Entry is no longer held by the store")]
    EntryNotFound,
    #[error("Another operation on '{username}' at '{url}' is still in flight")]
    OperationInFlight { username: String, url: String },
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("File I/O error at {path}: {source}")]
    FileIo {
        path: String,
        source: std::io::Error,
    },
    #[error("Configuration parse error: {message}")]
    ConfigParseError { message: String },
    #[error("Configuration directory not found")]
    ConfigDirNotFound,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration field '{field}' is missing")]
    MissingField { field: String, hint: String },
    #[error("Invalid configuration value for '{field}': {value}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum ErrorSeverity {
    High,
    Medium,
    Low,
}

impl ErrorSeverity {
    pub fn emoji(&self) -> &'static str {
        match self {
            ErrorSeverity::High => "❌",
            ErrorSeverity::Medium => "⚠️",
            ErrorSeverity::Low => "ℹ️",
        }
    }
}

impl AppError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            AppError::Cli(_) => ErrorSeverity::Medium,
            AppError::Api(api_error) => api_severity(api_error),
            AppError::Config(_) => ErrorSeverity::High,
            AppError::Storage(_) => ErrorSeverity::Medium,
            AppError::Store(store_error) => match store_error {
                StoreError::Remote(api_error) => api_severity(api_error),
                StoreError::Validation { .. } => ErrorSeverity::Medium,
                StoreError::EntryNotFound => ErrorSeverity::Low,
                StoreError::OperationInFlight { .. } => ErrorSeverity::Low,
            },
        }
    }

    pub fn display_friendly(&self) -> String {
        match self {
            AppError::Api(api_error) | AppError::Store(StoreError::Remote(api_error)) => {
                match api_error {
                    ApiError::Rejected { status, .. } => {
                        format!("Server rejected the request with status {}", status)
                    }
                    other => format!("Could not reach the server: {}", other.detail()),
                }
            }
            AppError::Config(ConfigError::MissingField { field, .. }) => {
                format!("Configuration is missing '{}'", field)
            }
            AppError::Config(ConfigError::InvalidValue {
                field,
                value,
                reason,
            }) => format!("Invalid value '{}' for '{}': {}", value, field, reason),
            _ => format!("{}", self),
        }
    }

    pub fn troubleshooting_hint(&self) -> Option<String> {
        match self {
            AppError::Config(ConfigError::MissingField { hint, .. }) => Some(hint.clone()),
            AppError::Api(ApiError::Rejected { status: 401 | 403, .. })
            | AppError::Store(StoreError::Remote(ApiError::Rejected {
                status: 401 | 403, ..
            })) => Some("Set KEYCLOUD_SESSION_TOKEN or pass --session-token".to_string()),
            AppError::Api(ApiError::Timeout { .. } | ApiError::Transport { .. })
            | AppError::Store(StoreError::Remote(
                ApiError::Timeout { .. } | ApiError::Transport { .. },
            )) => Some("Check your network connection and the configured server URL".to_string()),
            AppError::Cli(CliError::NoMatchingEntry { .. }) => {
                Some("'keycloud list' shows the stored entries".to_string())
            }
            _ => None,
        }
    }
}

fn api_severity(error: &ApiError) -> ErrorSeverity {
    match error {
        ApiError::Rejected {
            status: 401 | 403, ..
        } => ErrorSeverity::High,
        ApiError::Rejected { status, .. } if *status >= 500 => ErrorSeverity::High,
        ApiError::Timeout { .. } => ErrorSeverity::Medium,
        _ => ErrorSeverity::Medium,
    }
}
