pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::cli::LocalStorage;
#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::report_config::ReportConfig;

pub use adapters::api::{ApiSource, FileSource, SourceConfig};
pub use adapters::export::ReportExporter;
pub use core::panel::FilterPanel;
pub use core::pipeline::{ReportPipeline, ReportView};
pub use utils::error::{ReportError, Result};
