use mobile_backend::DataAnalyzer;
use mobile_backend::config::{AppConfig, load_config};
use mobile_backend::model::ConfigError;
use std::path::Path;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

const CONFIG_PATH: &str = "config.json";

#[tokio::main]
async fn main() {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // Set panic hook to log details about any panic
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("😱 Panic occurred: {:?}", panic_info);
    }));

    let config = match read_config(CONFIG_PATH) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Config load error: {}", e);
            return;
        }
    };
    info!(
        "Starting analyzer v{} (batch size {}, categories {:?})",
        config.system_version, config.synthetic_batch_size, config.categories
    );

    let mut analyzer = DataAnalyzer::new(&config);

    match analyzer.initialize().await {
        Ok(added) => info!("Generated {} synthetic records", added),
        Err(e) => {
            error!("Initialization failed: {}", e);
            analyzer.shutdown().await;
            return;
        }
    }

    match analyzer.process_data().await {
        Ok(result) => {
            for (name, value) in result.summary.as_map() {
                info!("{}: {:.2}", name, value);
            }
            for insight in &result.insights {
                info!("Insight: {}", insight);
            }
            for recommendation in &result.recommendations {
                info!("Recommendation: {}", recommendation);
            }
        }
        Err(e) => warn!("Processing failed: {}", e),
    }

    match analyzer.export_json().await {
        Ok(export) => match serde_json::to_string_pretty(&export) {
            Ok(text) => println!("{}", text),
            Err(e) => warn!("Failed to render export: {}", e),
        },
        Err(e) => warn!("Export failed: {}", e),
    }

    analyzer.shutdown().await;
}

/// Loads the config file, or the defaults when no file is present.
fn read_config(path: &str) -> Result<AppConfig, ConfigError> {
    if !Path::new(path).exists() {
        info!("No {} found, using defaults", path);
        return Ok(AppConfig::default());
    }
    load_config(path)
}
