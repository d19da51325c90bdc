use accred_report::core::{Exporter, RecordSource, StatValue, TableState};
use accred_report::utils::{logger, validation::Validate};
use accred_report::{
    ApiSource, CliConfig, FileSource, LocalStorage, ReportConfig, ReportError, ReportExporter,
    SourceConfig,
};
use clap::Parser;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(cli.verbose);

    tracing::info!("Starting accred-report CLI");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let config = ReportConfig::from_file(&cli.report)?;

    // 驗證報表宣告
    if let Err(e) = config.validate() {
        tracing::error!("❌ Report definition validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    // 取得原始記錄:本地 JSON 檔優先,其次報表宣告的 API 端點
    let records = if let Some(path) = &cli.records_file {
        FileSource::new(LocalStorage::new("."), path).fetch().await?
    } else {
        let mut source = config
            .source
            .clone()
            .ok_or_else(|| ReportError::MissingConfigError {
                field: "source.endpoint".to_string(),
            })?;
        if let Some(endpoint) = &cli.endpoint {
            source = SourceConfig {
                endpoint: endpoint.clone(),
                ..source
            };
        }
        ApiSource::new(source).fetch().await?
    };

    let pipeline = config.pipeline();
    let filters = config.initial_filters();
    let sort = config.initial_sort();
    let view = pipeline.run(&records, &filters, &sort, false);

    // 表格輸出
    println!("📋 {}", config.report.name);
    match view.table.state {
        TableState::Ready => {
            let labels: Vec<&str> = view
                .table
                .header
                .iter()
                .map(|cell| cell.label.as_str())
                .collect();
            println!("{}", labels.join(" | "));
            for row in &view.table.rows {
                let cells: Vec<&str> = row.iter().map(|cell| cell.text.as_str()).collect();
                println!("{}", cells.join(" | "));
            }
        }
        _ => {
            if let Some(message) = view.table.message() {
                println!("{}", message);
            }
        }
    }

    // 摘要統計
    if !view.stats.values.is_empty() {
        println!();
        for (name, value) in &view.stats.values {
            match value {
                StatValue::Number(number) => println!("📊 {}: {}", name, number),
                StatValue::Groups(groups) => {
                    println!("📊 {}:", name);
                    for (group, count) in groups {
                        println!("   {} = {}", group, count);
                    }
                }
            }
        }
    }

    // 匯出:交給匯出端的序列就是上面顯示的序列
    if cli.export {
        let output_path = config
            .export
            .as_ref()
            .map(|export| export.output_path.clone())
            .unwrap_or_else(|| cli.output_path.clone());
        let storage = LocalStorage::new(output_path.clone());
        let exporter =
            ReportExporter::new(storage, config.column_specs(), config.export_filename());

        match exporter.export(&view.rows, &filters).await {
            Ok(filename) => {
                tracing::info!("✅ Export completed successfully!");
                println!("✅ Export saved to: {}/{}", output_path, filename);
            }
            Err(e) => {
                tracing::error!("❌ Export failed: {}", e);
                eprintln!("❌ {}", e);
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
