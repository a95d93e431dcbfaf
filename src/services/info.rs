//! Application runtime information.

use std::time::Instant;

use serde::Serialize;

use crate::config::{Config, Environment};

/// Snapshot of application metadata for logs and diagnostics.
#[derive(Debug, Clone, Serialize)]
pub struct AppInfo {
    pub name: String,
    pub version: String,
    pub environment: Environment,
    pub debug: bool,
    /// OS platform name, e.g. "linux" or "macos".
    pub platform: &'static str,
    pub arch: &'static str,
    pub uptime_secs: u64,
}

/// Reports application and host metadata.
pub struct AppInfoService {
    config: Config,
    started_at: Instant,
}

impl AppInfoService {
    pub fn new(config: &Config) -> Self {
        Self {
            config: config.clone(),
            started_at: Instant::now(),
        }
    }

    pub fn app_info(&self) -> AppInfo {
        AppInfo {
            name: self.config.app_name.clone(),
            version: self.config.app_version.clone(),
            environment: self.config.environment,
            debug: self.config.debug,
            platform: std::env::consts::OS,
            arch: std::env::consts::ARCH,
            uptime_secs: self.started_at.elapsed().as_secs(),
        }
    }
}
