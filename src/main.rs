mod config;
mod security;
mod services;

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, reload, EnvFilter, Registry};

use config::Config;
use services::{AppInfoService, GreetingService};

const DEFAULT_ENV_PATH: &str = ".env";

struct Args {
    name: String,
    list_greetings: bool,
    verbose: bool,
    env_path: PathBuf,
}

fn parse_args() -> Args {
    let mut args = Args {
        name: "Developer".to_string(),
        list_greetings: false,
        verbose: false,
        env_path: PathBuf::from(DEFAULT_ENV_PATH),
    };

    let mut iter = env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--name" | "-n" => {
                if let Some(name) = iter.next() {
                    args.name = name;
                }
            }
            "--list-greetings" => args.list_greetings = true,
            "--verbose" | "-v" => args.verbose = true,
            other => {
                if let Some(name) = other.strip_prefix("--name=") {
                    args.name = name.to_string();
                } else if let Some(path) = other.strip_prefix("--env-file=") {
                    args.env_path = PathBuf::from(path);
                }
            }
        }
    }

    args
}

fn init_tracing(verbose: bool) -> reload::Handle<EnvFilter, Registry> {
    let default_level = if verbose { "debug" } else { "info" };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let (filter, handle) = reload::Layer::new(filter);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false),
        )
        .init();

    handle
}

/// Raise the active filter to debug when the loaded config enables debug
/// mode. An explicit RUST_LOG setting always wins.
fn apply_debug_level<S>(
    handle: &reload::Handle<EnvFilter, S>,
    config: &Config,
    rust_log_set: bool,
) {
    if config.debug && !rust_log_set {
        if let Err(e) = handle.reload(EnvFilter::new("debug")) {
            error!(error = %e, "Failed to raise log level");
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = parse_args();

    // Initialize tracing early so warnings from config loading are visible.
    let reload_handle = init_tracing(args.verbose);

    let config = match Config::load(&args.env_path).await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return ExitCode::from(1);
        }
    };

    apply_debug_level(
        &reload_handle,
        &config,
        env::var_os("RUST_LOG").is_some(),
    );

    info!(
        app = %config.app_name,
        version = %config.app_version,
        environment = %config.environment,
        port = config.port,
        "Starting application"
    );
    info!(platform = %env::consts::OS, "Platform");
    if config.debug {
        info!("Debug mode enabled");
    }

    let info_service = AppInfoService::new(&config);
    let mut greeting_service = GreetingService::new(&config);

    match greeting_service.greet(&args.name) {
        Ok(greeting) => info!("{}", greeting),
        Err(e) => {
            eprintln!("Greeting error: {}", e);
            return ExitCode::from(1);
        }
    }

    if args.list_greetings {
        let names = ["Alice", "Bob", "Charlie", "Diana"];
        match greeting_service.greet_many(&names) {
            Ok(greetings) => {
                info!("Multiple greetings:");
                for greeting in &greetings {
                    info!("  {}", greeting);
                }
            }
            Err(e) => {
                eprintln!("Greeting error: {}", e);
                return ExitCode::from(1);
            }
        }
    }

    match serde_json::to_string_pretty(&info_service.app_info()) {
        Ok(json) => info!("Application info:\n{}", json),
        Err(e) => error!(error = %e, "Failed to serialize application info"),
    }

    info!("Application completed successfully");
    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::Level;

    fn debug_config() -> Config {
        Config {
            debug: true,
            ..Config::default()
        }
    }

    #[test]
    fn test_debug_config_raises_log_level() {
        let (filter, handle) = reload::Layer::new(EnvFilter::new("info"));
        let subscriber = tracing_subscriber::registry().with(filter);
        let _guard = tracing::subscriber::set_default(subscriber);

        assert!(!tracing::enabled!(Level::DEBUG));

        apply_debug_level(&handle, &debug_config(), false);

        assert!(tracing::enabled!(Level::DEBUG));
    }

    #[test]
    fn test_rust_log_wins_over_debug_config() {
        let (filter, handle) = reload::Layer::new(EnvFilter::new("info"));
        let subscriber = tracing_subscriber::registry().with(filter);
        let _guard = tracing::subscriber::set_default(subscriber);

        apply_debug_level(&handle, &debug_config(), true);

        assert!(!tracing::enabled!(Level::DEBUG));
    }

    #[test]
    fn test_non_debug_config_keeps_log_level() {
        let (filter, handle) = reload::Layer::new(EnvFilter::new("info"));
        let subscriber = tracing_subscriber::registry().with(filter);
        let _guard = tracing::subscriber::set_default(subscriber);

        apply_debug_level(&handle, &Config::default(), false);

        assert!(!tracing::enabled!(Level::DEBUG));
    }
}
