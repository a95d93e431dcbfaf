//! Configuration loading and validation.
//!
//! Reads an optional `.env` file and a fixed set of environment variables,
//! validates every field, and produces an immutable [`Config`]. Values from
//! the env file take precedence over already-present process variables; the
//! process environment itself is never mutated.

mod environment;
mod error;

pub use environment::Environment;
pub use error::{ConfigError, ValidationError};

use std::collections::HashMap;
use std::env;
use std::path::Path;

use tracing::{info, warn};

use crate::security;

/// Validated application configuration.
///
/// Every instance satisfies all field constraints simultaneously; a partially
/// valid `Config` cannot be constructed. Built once at startup and passed to
/// callers by reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Application name, non-empty after trimming. From `APP_NAME`.
    pub app_name: String,
    /// Version in MAJOR.MINOR.PATCH form, digits only. From `APP_VERSION`.
    pub app_version: String,
    /// Deployment environment. From `NODE_ENV`.
    pub environment: Environment,
    /// Listen port, 1-65535. From `PORT`.
    pub port: u16,
    /// Debug mode, enabled only by the literal string "true". From `DEBUG`.
    pub debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: "Project Template".to_string(),
            app_version: "1.0.0".to_string(),
            environment: Environment::Development,
            port: 3000,
            debug: false,
        }
    }
}

impl Config {
    /// Load configuration from the process environment, overlaid with the env
    /// file at `env_path` when it exists (strict variant).
    ///
    /// A missing file is not an error: a warning is logged and only process
    /// variables are used. A present-but-malformed file and any field failing
    /// validation are both fatal to the load call. Validation is fail-fast in
    /// the order: app_name, port, environment, app_version.
    pub async fn load(env_path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let env_path = env_path.as_ref();
        let mut vars: HashMap<String, String> = env::vars().collect();

        match tokio::fs::try_exists(env_path).await {
            Ok(true) => {
                info!(path = %env_path.display(), "Loading env file");
                for entry in dotenvy::from_path_iter(env_path)? {
                    let (key, value) = entry?;
                    vars.insert(key, value);
                }
            }
            _ => {
                warn!(
                    path = %env_path.display(),
                    "Env file not found, using process environment variables"
                );
            }
        }

        let config = Self::from_vars(&vars)?;

        if config.debug && config.environment.is_production() {
            warn!("Debug mode enabled in a production environment");
        }

        // Flag values that look like credentials left in plain environment.
        for (key, value) in &vars {
            if security::is_sensitive_value(key, value) {
                warn!(key = %key, "Environment variable looks sensitive, consider a secret store");
            }
        }

        Ok(config)
    }

    /// Load configuration, substituting the default [`Config`] on any failure
    /// (lenient variant). Never fails; the cause is logged as a warning.
    pub async fn load_or_default(env_path: impl AsRef<Path>) -> Self {
        match Self::load(env_path).await {
            Ok(config) => config,
            Err(e) => {
                warn!(error = %e, "Falling back to default configuration");
                Config::default()
            }
        }
    }

    /// Build and validate a `Config` from a flat variable map.
    fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ValidationError> {
        let defaults = Config::default();

        let app_name = vars
            .get("APP_NAME")
            .cloned()
            .unwrap_or(defaults.app_name);
        let app_version = vars
            .get("APP_VERSION")
            .cloned()
            .unwrap_or(defaults.app_version);
        let environment_raw = vars
            .get("NODE_ENV")
            .map(String::as_str)
            .unwrap_or(defaults.environment.as_str());
        let port_raw = vars.get("PORT").map(String::as_str);
        let debug = vars.get("DEBUG").map(String::as_str) == Some("true");

        // Fail-fast: the first invalid field aborts validation of the rest.
        if app_name.trim().is_empty() {
            return Err(ValidationError::new("app_name", "must not be empty"));
        }

        let port = match port_raw {
            Some(raw) => {
                let port: u32 = raw.trim().parse().map_err(|_| {
                    ValidationError::new("port", format!("'{}' is not an integer", raw))
                })?;
                if !(1..=65535).contains(&port) {
                    return Err(ValidationError::new(
                        "port",
                        format!("{} is outside the range 1-65535", port),
                    ));
                }
                port as u16
            }
            None => defaults.port,
        };

        let environment = Environment::parse(environment_raw).ok_or_else(|| {
            ValidationError::new(
                "environment",
                format!(
                    "'{}' must be one of development, staging, production",
                    environment_raw
                ),
            )
        })?;

        if !is_version(&app_version) {
            return Err(ValidationError::new(
                "app_version",
                format!("'{}' is not in MAJOR.MINOR.PATCH form", app_version),
            ));
        }

        Ok(Config {
            app_name,
            app_version,
            environment,
            port,
            debug,
        })
    }
}

/// Exactly three dot-separated components, each one or more ASCII digits.
fn is_version(version: &str) -> bool {
    let mut parts = version.split('.');
    let digits =
        |p: Option<&str>| p.is_some_and(|s| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()));
    digits(parts.next()) && digits(parts.next()) && digits(parts.next()) && parts.next().is_none()
}
