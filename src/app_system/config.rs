use std::{env, fmt::Display, path::PathBuf, str::FromStr};

use thiserror::Error;
use tracing::{debug, info};

use crate::domain::Pricing;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid {key} value {value:?}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Runtime settings, read from the environment.
#[derive(Debug, Clone, PartialEq)]
pub struct StorefrontConfig {
    /// Mailbox size of every service.
    pub channel_buffer: usize,
    /// Directory holding the persisted cart; in-memory storage when unset.
    pub cart_dir: Option<PathBuf>,
    pub pricing: Pricing,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            channel_buffer: 32,
            cart_dir: None,
            pricing: Pricing::default(),
        }
    }
}

impl StorefrontConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let config = Self {
            channel_buffer: try_load(&lookup, "STOREFRONT_CHANNEL_BUFFER", defaults.channel_buffer)?,
            cart_dir: lookup("STOREFRONT_CART_DIR")
                .filter(|dir| !dir.trim().is_empty())
                .map(PathBuf::from),
            pricing: Pricing {
                delivery_fee: try_load(&lookup, "STOREFRONT_DELIVERY_FEE", defaults.pricing.delivery_fee)?,
                gst_rate: try_load(&lookup, "STOREFRONT_GST_RATE", defaults.pricing.gst_rate)?,
            },
        };

        if config.channel_buffer == 0 {
            return Err(invalid("STOREFRONT_CHANNEL_BUFFER", "0", "must be positive"));
        }
        for (key, value) in [
            ("STOREFRONT_DELIVERY_FEE", config.pricing.delivery_fee),
            ("STOREFRONT_GST_RATE", config.pricing.gst_rate),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(invalid(key, &value.to_string(), "must be a non-negative number"));
            }
        }

        match &config.cart_dir {
            Some(dir) => info!(cart_dir = %dir.display(), "Cart persisted to disk"),
            None => info!("STOREFRONT_CART_DIR not set, cart kept in memory"),
        }
        Ok(config)
    }
}

fn try_load<T>(lookup: &impl Fn(&str) -> Option<String>, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr + Display,
    T::Err: Display,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| invalid(key, &raw, &e.to_string())),
        None => {
            debug!("{key} not set, using default: {default}");
            Ok(default)
        }
    }
}

fn invalid(key: &'static str, value: &str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        key,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        assert_eq!(StorefrontConfig::from_lookup(lookup(&[])).unwrap(), StorefrontConfig::default());
    }

    #[test]
    fn reads_overrides() {
        let config = StorefrontConfig::from_lookup(lookup(&[
            ("STOREFRONT_CHANNEL_BUFFER", "64"),
            ("STOREFRONT_CART_DIR", "/tmp/carts"),
            ("STOREFRONT_DELIVERY_FEE", "25.5"),
            ("STOREFRONT_GST_RATE", "0.18"),
        ]))
        .unwrap();
        assert_eq!(config.channel_buffer, 64);
        assert_eq!(config.cart_dir, Some(PathBuf::from("/tmp/carts")));
        assert_eq!(config.pricing, Pricing { delivery_fee: 25.5, gst_rate: 0.18 });
    }

    #[test]
    fn rejects_malformed_values() {
        let err = StorefrontConfig::from_lookup(lookup(&[("STOREFRONT_GST_RATE", "five percent")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "STOREFRONT_GST_RATE", .. }));

        let err = StorefrontConfig::from_lookup(lookup(&[("STOREFRONT_DELIVERY_FEE", "-1")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "STOREFRONT_DELIVERY_FEE", .. }));

        assert!(StorefrontConfig::from_lookup(lookup(&[("STOREFRONT_CHANNEL_BUFFER", "0")])).is_err());
    }
}
