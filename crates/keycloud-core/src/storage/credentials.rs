//! Session token lookup
//!
//! The backend session is established elsewhere (browser login); the CLI only
//! forwards a token taken from the KEYCLOUD_SESSION_TOKEN environment variable.

use std::env;

pub const SESSION_TOKEN_ENV: &str = "KEYCLOUD_SESSION_TOKEN";

/// Get the session token from environment variable
///
/// Returns the value of KEYCLOUD_SESSION_TOKEN if set and non-empty, otherwise None.
pub fn get_session_token() -> Option<String> {
    env::var(SESSION_TOKEN_ENV).ok().filter(|k| !k.is_empty())
}

pub fn has_session_token() -> bool {
    get_session_token().is_some()
}
