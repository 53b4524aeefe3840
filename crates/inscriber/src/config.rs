//! Inscriber configuration, loaded from TOML.

use std::path::Path;
use std::time::Duration;
use std::{fs, io};

use ordkit_envelope_fmt::{DEFAULT_MAX_CONTENT_LEN, MAX_ENVELOPE_LEN};
use ordkit_esplora::NetworkKind;
use ordkit_tx_builder::{DEFAULT_MAX_SELECTION_ROUNDS, DUST_THRESHOLD, INSCRIPTION_POSTAGE};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors loading a config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("reading config: {0}")]
    Io(#[from] io::Error),

    /// The file is not valid TOML for this schema.
    #[error("parsing config: {0}")]
    Toml(#[from] toml::de::Error),

    /// A field holds a value the pipeline cannot work with.
    #[error("invalid {field}: {reason}")]
    Invalid {
        /// Offending field.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },
}

/// Tunables for the inscription pipeline. Every field has a default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InscriberConfig {
    /// Network to inscribe on.
    pub network: NetworkKind,

    /// Explorer API base, overriding the network's public explorer.
    pub explorer_base: Option<String>,

    /// Order service base URL, if orders are submitted.
    pub order_service_base: Option<String>,

    /// Largest accepted content body in bytes.
    pub max_content_len: usize,

    /// Value of the inscription output in sats.
    pub postage_sats: u64,

    /// Change at or below this many sats is folded into the fee.
    pub dust_threshold_sats: u64,

    /// Only fund from confirmed UTXOs.
    pub confirmed_only: bool,

    /// Bound on selection rounds.
    pub max_selection_rounds: usize,

    /// Timeout for each collaborator request, in seconds.
    pub request_timeout_secs: u64,
}

impl Default for InscriberConfig {
    fn default() -> Self {
        Self {
            network: NetworkKind::default(),
            explorer_base: None,
            order_service_base: None,
            max_content_len: DEFAULT_MAX_CONTENT_LEN,
            postage_sats: INSCRIPTION_POSTAGE.to_sat(),
            dust_threshold_sats: DUST_THRESHOLD.to_sat(),
            confirmed_only: false,
            max_selection_rounds: DEFAULT_MAX_SELECTION_ROUNDS,
            request_timeout_secs: 30,
        }
    }
}

impl InscriberConfig {
    /// Default config for `network`.
    pub fn for_network(network: NetworkKind) -> Self {
        Self {
            network,
            ..Default::default()
        }
    }

    /// Parses and validates a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_str(&fs::read_to_string(path)?)
    }

    /// Checks the values are usable.
    ///
    /// The inscription output must carry at least the dust minimum, change
    /// outputs must not fall below it, and a body must be able to fit in an
    /// envelope of [`MAX_ENVELOPE_LEN`] bytes.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let min = DUST_THRESHOLD.to_sat();
        if self.postage_sats < min {
            return Err(invalid(
                "postage_sats",
                format!("{} is below the {min} sat dust minimum", self.postage_sats),
            ));
        }
        if self.dust_threshold_sats < min {
            return Err(invalid(
                "dust_threshold_sats",
                format!("{} is below the {min} sat dust minimum", self.dust_threshold_sats),
            ));
        }
        if self.max_content_len > MAX_ENVELOPE_LEN {
            return Err(invalid(
                "max_content_len",
                format!(
                    "{} exceeds the {MAX_ENVELOPE_LEN} byte envelope limit",
                    self.max_content_len
                ),
            ));
        }
        if self.max_selection_rounds == 0 {
            return Err(invalid("max_selection_rounds", "must be at least 1".to_owned()));
        }
        if self.request_timeout_secs == 0 {
            return Err(invalid("request_timeout_secs", "must be at least 1".to_owned()));
        }
        Ok(())
    }

    /// Explorer API base to use.
    pub fn explorer_base(&self) -> &str {
        self.explorer_base
            .as_deref()
            .unwrap_or_else(|| self.network.explorer_base())
    }

    /// Per-request timeout.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn invalid(field: &'static str, reason: String) -> ConfigError {
    ConfigError::Invalid { field, reason }
}
