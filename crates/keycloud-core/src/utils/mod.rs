pub mod error_helpers;
pub mod logging;
pub mod text;
pub mod validation;
