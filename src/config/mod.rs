pub mod cli;
pub mod report_config;

#[cfg(feature = "cli")]
use clap::Parser;

/// 命令列參數:報表宣告檔 + 記錄來源(本地檔或 API 端點覆寫)
#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "accred-report")]
#[command(about = "Run an accreditation report: filter, sort, aggregate, tabulate, export")]
pub struct CliConfig {
    #[arg(long, help = "Path to the TOML report definition")]
    pub report: String,

    #[arg(long, help = "Read records from a local JSON file instead of the API")]
    pub records_file: Option<String>,

    #[arg(long, help = "Override the source endpoint from the report definition")]
    pub endpoint: Option<String>,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    #[arg(long, help = "Write the CSV/TSV export bundle")]
    pub export: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}
