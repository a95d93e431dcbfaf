//! Input-hygiene utilities: sanitization, secret detection, rate limiting.

mod rate_limit;
mod sanitize;

pub use rate_limit::RateLimiter;
pub use sanitize::{is_sensitive_value, sanitize_input};
