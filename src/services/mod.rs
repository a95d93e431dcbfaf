//! Application services built on top of the loaded configuration.

mod greeting;
mod info;

pub use greeting::{GreetingError, GreetingService};
pub use info::{AppInfo, AppInfoService};
