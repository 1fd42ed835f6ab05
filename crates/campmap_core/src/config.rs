//! Map widget configuration read from the process environment.
//!
//! # Responsibility
//! - Resolve the map service access key and loader options.
//! - Build the loader script reference injected by the widget loader.
//!
//! # Invariants
//! - The access key is never logged.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Environment variable holding the map service access key.
pub const MAPS_API_KEY_VAR: &str = "CAMPMAP_MAPS_API_KEY";
/// Environment variable overriding the comma-separated widget libraries.
pub const MAPS_LIBRARIES_VAR: &str = "CAMPMAP_MAPS_LIBRARIES";

const DEFAULT_SCRIPT_BASE_URL: &str = "https://maps.googleapis.com/maps/api/js";
const DEFAULT_LIBRARIES: &str = "places";

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Required variable is unset or blank.
    MissingVar(&'static str),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingVar(name) => write!(f, "environment variable `{name}` is not set"),
        }
    }
}

impl Error for ConfigError {}

/// Settings for loading the external map widget.
#[derive(Clone, PartialEq, Eq)]
pub struct MapConfig {
    api_key: String,
    pub libraries: Vec<String>,
    pub script_base_url: String,
}

impl std::fmt::Debug for MapConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MapConfig")
            .field("api_key", &"<redacted>")
            .field("libraries", &self.libraries)
            .field("script_base_url", &self.script_base_url)
            .finish()
    }
}

impl MapConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            libraries: vec![DEFAULT_LIBRARIES.to_string()],
            script_base_url: DEFAULT_SCRIPT_BASE_URL.to_string(),
        }
    }

    /// Reads configuration from the process environment.
    ///
    /// # Errors
    /// - Returns [`ConfigError::MissingVar`] when the access key is unset or blank.
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> ConfigResult<Self> {
        let api_key = lookup(MAPS_API_KEY_VAR)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .ok_or(ConfigError::MissingVar(MAPS_API_KEY_VAR))?;

        let mut config = Self::new(api_key);
        if let Some(raw) = lookup(MAPS_LIBRARIES_VAR) {
            let libraries = raw
                .split(',')
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(str::to_string)
                .collect::<Vec<_>>();
            if !libraries.is_empty() {
                config.libraries = libraries;
            }
        }
        Ok(config)
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Loader script reference, e.g. `.../js?key=KEY&libraries=places`.
    ///
    /// Key and library names are percent-encoded; the separating commas are not.
    pub fn loader_script_url(&self) -> String {
        let libraries = self
            .libraries
            .iter()
            .map(|library| urlencoding::encode(library))
            .collect::<Vec<_>>()
            .join(",");
        format!(
            "{}?key={}&libraries={}",
            self.script_base_url,
            urlencoding::encode(&self.api_key),
            libraries
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, MapConfig, MAPS_API_KEY_VAR, MAPS_LIBRARIES_VAR};
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<HashMap<_, _>>();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn builds_loader_url_with_default_libraries() {
        let config = MapConfig::from_lookup(lookup_from(&[(MAPS_API_KEY_VAR, " abc123 ")]))
            .expect("key is present");
        assert_eq!(
            config.loader_script_url(),
            "https://maps.googleapis.com/maps/api/js?key=abc123&libraries=places"
        );
    }

    #[test]
    fn libraries_override_is_split_and_trimmed() {
        let config = MapConfig::from_lookup(lookup_from(&[
            (MAPS_API_KEY_VAR, "k"),
            (MAPS_LIBRARIES_VAR, "places, geometry ,"),
        ]))
        .expect("key is present");
        assert_eq!(config.libraries, vec!["places", "geometry"]);
    }

    #[test]
    fn missing_or_blank_key_is_rejected() {
        let err = MapConfig::from_lookup(lookup_from(&[])).expect_err("missing key must fail");
        assert_eq!(err, ConfigError::MissingVar(MAPS_API_KEY_VAR));

        let err = MapConfig::from_lookup(lookup_from(&[(MAPS_API_KEY_VAR, "  ")]))
            .expect_err("blank key must fail");
        assert_eq!(err, ConfigError::MissingVar(MAPS_API_KEY_VAR));
    }

    #[test]
    fn loader_url_percent_encodes_key_and_libraries() {
        let config = MapConfig::from_lookup(lookup_from(&[
            (MAPS_API_KEY_VAR, "a&b=c d"),
            (MAPS_LIBRARIES_VAR, "places,visual ization"),
        ]))
        .expect("key is present");
        assert_eq!(
            config.loader_script_url(),
            "https://maps.googleapis.com/maps/api/js?key=a%26b%3Dc%20d&libraries=places,visual%20ization"
        );
    }

    #[test]
    fn debug_output_redacts_key() {
        let rendered = format!("{:?}", MapConfig::new("secret-key"));
        assert!(!rendered.contains("secret-key"));
    }
}
