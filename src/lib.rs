pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use adapters::{ClientSecretCredential, ConfidentialClient, GraphClient, StaticTokenProvider};
pub use config::{AuthFlow, Settings};
pub use core::inbox::{InboxReader, Outcome};
pub use utils::error::{GraphError, Result};
