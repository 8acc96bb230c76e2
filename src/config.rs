//! Form configuration, read from an optional JSON file and overridden by CLI
//! flags.

use crate::application::challenge::RedirectPatterns;
use crate::domain::card::CardScheme;
use crate::domain::field_store::FieldStore;
use crate::error::{FormError, Result};
use serde::Deserialize;
use std::path::Path;
use strum::IntoEnumIterator;

/// Redirect URL fragments set up for the merchant account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ChallengeConfig {
    pub success_pattern: String,
    pub failure_pattern: String,
}

impl ChallengeConfig {
    pub fn patterns(&self) -> Result<RedirectPatterns> {
        RedirectPatterns::new(&self.success_pattern, &self.failure_pattern)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    pub accepted_cards: Vec<CardScheme>,
    pub include_billing: bool,
    pub challenge: ChallengeConfig,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            accepted_cards: CardScheme::iter().collect(),
            include_billing: true,
            challenge: ChallengeConfig::default(),
        }
    }
}

impl FormConfig {
    /// Reads a JSON configuration file. Missing keys keep their defaults.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            FormError::ConfigError(format!("cannot read {}: {}", path.display(), e))
        })?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Parses a comma separated scheme list such as `"visa, mastercard"`.
    pub fn parse_accepted_cards(list: &str) -> Result<Vec<CardScheme>> {
        list.split([',', '|'])
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(|name| {
                name.parse::<CardScheme>()
                    .map_err(|_| FormError::ConfigError(format!("unknown card scheme: {}", name)))
            })
            .collect()
    }

    /// Seeds the configuration flags of a session's field store.
    pub fn apply(&self, store: &mut FieldStore) {
        store.set_accepted_cards(self.accepted_cards.clone());
        store.set_show_billing(self.include_billing);
    }
}
