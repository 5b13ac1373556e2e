//! Runtime configuration.
//!
//! # Example
//!
//! ```
//! use taskboard::config::BoardConfig;
//!
//! let config = BoardConfig::default();
//! assert_eq!(config.search_debounce.as_millis(), 300);
//! assert_eq!(config.trend_window_days, 7);
//! ```

use camino::Utf8PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Environment variable naming the record store directory.
pub const DATA_DIR_VAR: &str = "TASKBOARD_DATA_DIR";
/// Environment variable holding the search quiet period in milliseconds.
pub const SEARCH_DEBOUNCE_VAR: &str = "TASKBOARD_SEARCH_DEBOUNCE_MS";
/// Environment variable holding the trend window length in days.
pub const TREND_DAYS_VAR: &str = "TASKBOARD_TREND_DAYS";
/// Environment variable holding the seeded administrator's name.
pub const ADMIN_NAME_VAR: &str = "TASKBOARD_ADMIN_NAME";
/// Environment variable holding the seeded administrator's email.
pub const ADMIN_EMAIL_VAR: &str = "TASKBOARD_ADMIN_EMAIL";

/// Errors returned while reading configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A numeric setting could not be parsed.
    #[error("{variable} must be a non-negative integer, got '{value}'")]
    InvalidNumber {
        /// Offending variable.
        variable: &'static str,
        /// Rejected value.
        value: String,
    },

    /// A setting that must not be blank was blank.
    #[error("{0} must not be empty")]
    Empty(&'static str),
}

/// Board configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardConfig {
    /// Directory holding the persisted collections.
    pub data_dir: Utf8PathBuf,
    /// Quiet period after the last keystroke before search recomputes.
    pub search_debounce: Duration,
    /// Number of calendar days in the analytics trend window.
    pub trend_window_days: u16,
    /// Name of the administrator seeded into an empty board.
    pub admin_name: String,
    /// Email of the administrator seeded into an empty board.
    pub admin_email: String,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            data_dir: Utf8PathBuf::from(".taskboard"),
            search_debounce: Duration::from_millis(300),
            trend_window_days: 7,
            admin_name: "Administrator".to_owned(),
            admin_email: "admin@taskboard.local".to_owned(),
        }
    }
}

impl BoardConfig {
    /// Reads configuration from the process environment, falling back to
    /// defaults for unset variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a set variable is malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads configuration through `lookup`, falling back to defaults for
    /// variables it does not return.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a returned value is malformed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let data_dir = lookup(DATA_DIR_VAR)
            .map(|value| non_empty(DATA_DIR_VAR, value))
            .transpose()?
            .map_or(defaults.data_dir, Utf8PathBuf::from);
        let search_debounce = lookup(SEARCH_DEBOUNCE_VAR)
            .map(|value| parse_number::<u64>(SEARCH_DEBOUNCE_VAR, &value))
            .transpose()?
            .map_or(defaults.search_debounce, Duration::from_millis);
        let trend_window_days = lookup(TREND_DAYS_VAR)
            .map(|value| parse_number::<u16>(TREND_DAYS_VAR, &value))
            .transpose()?
            .unwrap_or(defaults.trend_window_days);
        let admin_name = lookup(ADMIN_NAME_VAR)
            .map(|value| non_empty(ADMIN_NAME_VAR, value))
            .transpose()?
            .unwrap_or(defaults.admin_name);
        let admin_email = lookup(ADMIN_EMAIL_VAR)
            .map(|value| non_empty(ADMIN_EMAIL_VAR, value))
            .transpose()?
            .unwrap_or(defaults.admin_email);

        Ok(Self {
            data_dir,
            search_debounce,
            trend_window_days,
            admin_name,
            admin_email,
        })
    }
}

fn parse_number<T: std::str::FromStr>(variable: &'static str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidNumber {
            variable,
            value: value.to_owned(),
        })
}

fn non_empty(variable: &'static str, value: String) -> Result<String, ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Empty(variable));
    }
    Ok(trimmed.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[rstest]
    fn missing_variables_fall_back_to_defaults() {
        let config = BoardConfig::from_lookup(|_| None).expect("defaults should load");
        assert_eq!(config, BoardConfig::default());
    }

    #[rstest]
    fn variables_override_defaults() {
        let config = BoardConfig::from_lookup(lookup_from(&[
            (DATA_DIR_VAR, "/var/lib/taskboard"),
            (SEARCH_DEBOUNCE_VAR, "150"),
            (TREND_DAYS_VAR, "30"),
            (ADMIN_EMAIL_VAR, " ops@example.com "),
        ]))
        .expect("overrides should load");

        assert_eq!(config.data_dir.as_str(), "/var/lib/taskboard");
        assert_eq!(config.search_debounce, Duration::from_millis(150));
        assert_eq!(config.trend_window_days, 30);
        assert_eq!(config.admin_email, "ops@example.com");
        assert_eq!(config.admin_name, "Administrator");
    }

    #[rstest]
    #[case(SEARCH_DEBOUNCE_VAR, "soon")]
    #[case(TREND_DAYS_VAR, "-1")]
    #[case(TREND_DAYS_VAR, "70000")]
    fn malformed_numbers_are_rejected(#[case] variable: &'static str, #[case] value: &str) {
        let result = BoardConfig::from_lookup(lookup_from(&[(variable, value)]));
        assert_eq!(
            result,
            Err(ConfigError::InvalidNumber {
                variable,
                value: value.to_owned(),
            })
        );
    }

    #[rstest]
    fn blank_data_dir_is_rejected() {
        let result = BoardConfig::from_lookup(lookup_from(&[(DATA_DIR_VAR, "  ")]));
        assert_eq!(result, Err(ConfigError::Empty(DATA_DIR_VAR)));
    }
}
