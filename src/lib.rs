pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::{toml_config::TomlConfig, ClientSettings};
pub use core::{client::HttpApiClient, handler::AddHandler, sink::ConsoleSink};
pub use domain::model::{CalculationResult, FetchOutcome};
pub use utils::error::{CalcError, Result};
