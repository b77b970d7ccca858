//! Settings read from `FOLIO_*` environment variables.
//!
//! A variable that is unset or blank means "use the default". A value that
//! does not parse is reported once at warn level and also falls back.

use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

/// Trimmed value of `var`, or `None` when it is unset or blank.
#[must_use]
pub fn env_string(var: &str) -> Option<String> {
    let raw = std::env::var(var).ok()?;
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

/// Parse `var` as `T`, falling back to `default` when it is missing or malformed.
pub fn env_parse_with_default<T: FromStr + Display>(var: &str, default: T) -> T {
    let Some(raw) = env_string(var) else {
        return default;
    };
    raw.parse().unwrap_or_else(|_| {
        tracing::warn!(var, value = %raw, default = %default, "ignoring malformed setting");
        default
    })
}

/// Whole seconds read from `var` as a [`Duration`].
#[must_use]
pub fn env_secs(var: &str, default_secs: u64) -> Duration {
    Duration::from_secs(env_parse_with_default(var, default_secs))
}
