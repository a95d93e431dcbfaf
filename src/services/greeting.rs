//! Greeting generation with input validation and sanitization.

use thiserror::Error;
use tracing::debug;

use crate::config::Config;
use crate::security::{sanitize_input, RateLimiter};

const MAX_NAME_LENGTH: usize = 50;

/// Why a greeting request was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GreetingError {
    #[error("name cannot be empty")]
    EmptyName,
    #[error("name must be at most {MAX_NAME_LENGTH} characters long")]
    NameTooLong,
    #[error("name cannot contain newlines or tabs")]
    ControlCharacters,
    #[error("name can only contain letters, spaces, hyphens, and apostrophes")]
    ForbiddenCharacters,
    #[error("rate limit exceeded, try again later")]
    RateLimited,
}

/// Produces personalized greeting lines for the configured application.
pub struct GreetingService {
    app_name: String,
    limiter: RateLimiter,
}

impl GreetingService {
    pub fn new(config: &Config) -> Self {
        Self {
            app_name: config.app_name.clone(),
            limiter: RateLimiter::default(),
        }
    }

    /// Validate, sanitize, and greet a single name.
    pub fn greet(&mut self, name: &str) -> Result<String, GreetingError> {
        if !self.limiter.is_allowed("greet") {
            return Err(GreetingError::RateLimited);
        }

        if name.trim().is_empty() {
            return Err(GreetingError::EmptyName);
        }
        if name.chars().count() > MAX_NAME_LENGTH {
            return Err(GreetingError::NameTooLong);
        }
        if name.contains('\n') || name.contains('\t') {
            return Err(GreetingError::ControlCharacters);
        }

        let sanitized = sanitize_input(name, Some(MAX_NAME_LENGTH), true);
        if sanitized.is_empty() {
            return Err(GreetingError::EmptyName);
        }
        if !sanitized
            .chars()
            .all(|c| c.is_ascii_alphabetic() || c == ' ' || c == '-' || c == '\'')
        {
            return Err(GreetingError::ForbiddenCharacters);
        }

        debug!(
            name = %sanitized,
            remaining = self.limiter.remaining("greet"),
            "Generated greeting"
        );
        Ok(format!(
            "Hello, {}! Welcome to {}",
            sanitized, self.app_name
        ))
    }

    /// Greet a batch of names, failing on the first invalid one.
    pub fn greet_many(&mut self, names: &[&str]) -> Result<Vec<String>, GreetingError> {
        names.iter().map(|name| self.greet(name)).collect()
    }
}
