//! Configuration for the demo binary.
//!
//! Loads configuration from environment variables with sensible defaults.

use draft_editor_runtime::StoreConfig;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Filter directive used when `EDITOR_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "event_editor=info,draft_editor_runtime=info";

/// Errors loading [`DemoConfig`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// `EDITOR_DEMO_SCENARIO` named no known scenario
    #[error("unknown demo scenario {0:?} (expected tickets, discounts, or all)")]
    UnknownScenario(String),

    /// A numeric variable did not parse
    #[error("{var} must be a positive integer, got {value:?}")]
    InvalidNumber {
        /// Variable name
        var: &'static str,
        /// Raw value
        value: String,
    },
}

/// Which editor sessions the demo runs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scenario {
    /// Ticket editor only
    Tickets,
    /// Discount-code editor only
    Discounts,
    /// Both
    #[default]
    All,
}

impl Scenario {
    /// Whether the ticket session runs
    #[must_use]
    pub const fn includes_tickets(self) -> bool {
        matches!(self, Self::Tickets | Self::All)
    }

    /// Whether the discount-code session runs
    #[must_use]
    pub const fn includes_discounts(self) -> bool {
        matches!(self, Self::Discounts | Self::All)
    }
}

impl FromStr for Scenario {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tickets" => Ok(Self::Tickets),
            "discounts" => Ok(Self::Discounts),
            "all" => Ok(Self::All),
            _ => Err(ConfigError::UnknownScenario(s.to_string())),
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Tickets => "tickets",
            Self::Discounts => "discounts",
            Self::All => "all",
        })
    }
}

/// Demo configuration loaded from environment variables
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemoConfig {
    /// Tracing filter directive (`EDITOR_LOG`)
    pub log_filter: String,
    /// Sessions to run (`EDITOR_DEMO_SCENARIO`)
    pub scenario: Scenario,
    /// Per-send action budget of each store (`EDITOR_MAX_ACTIONS`)
    pub max_actions_per_send: usize,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            scenario: Scenario::default(),
            max_actions_per_send: StoreConfig::default().max_actions_per_send,
        }
    }
}

impl DemoConfig {
    /// Load configuration from the process environment
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable is set to an unusable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable is set to an unusable value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let scenario = lookup("EDITOR_DEMO_SCENARIO")
            .map(|raw| raw.parse::<Scenario>())
            .transpose()?
            .unwrap_or(defaults.scenario);

        let max_actions_per_send = match lookup("EDITOR_MAX_ACTIONS") {
            Some(raw) => raw
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or(ConfigError::InvalidNumber {
                    var: "EDITOR_MAX_ACTIONS",
                    value: raw,
                })?,
            None => defaults.max_actions_per_send,
        };

        Ok(Self {
            log_filter: lookup("EDITOR_LOG").unwrap_or(defaults.log_filter),
            scenario,
            max_actions_per_send,
        })
    }

    /// Store configuration derived from this config
    #[must_use]
    pub const fn store_config(&self) -> StoreConfig {
        StoreConfig::new(self.max_actions_per_send)
    }
}
