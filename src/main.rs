mod client;
mod config;
mod error;
mod logging;
mod output;
mod pipeline;

use crate::client::Client;
use crate::config::Config;
use crate::error::Result;
use crate::logging::{init_logging, parse_log_level, LoggerConfig};
use crate::pipeline::Pipeline;
use std::path::Path;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load()?;

    let logger_config = LoggerConfig {
        directory: config.logging.directory.clone(),
        file_name: config.logging.filename.clone(),
        rotation: tracing_appender::rolling::Rotation::DAILY,
        level: parse_log_level(&config.logging.level)?,
    };
    init_logging(logger_config)?;

    log_info!("[main] Configuration loaded");
    log_info!("[main] Mirroring {} pages from {}", config.pages.len(), config.base_url);

    let client = Client::builder()
        .base_url(&config.base_url)
        .header("user-agent", &config.user_agent)?
        .timeout(Duration::from_secs(config.request_timeout))
        .chrome_impersonation(true)
        .build()?;

    let pipeline = Pipeline::new(&config.base_url)?;
    let output_root = Path::new(&config.output_dir);

    // Pages are processed sequentially in declaration order; the first
    // failure from any stage aborts the whole run.
    for page in &config.pages {
        let url = client.build_url(page)?;
        log_info!("[main] Fetching {} ...", url);

        let response = client.get(&url).await?;
        log_info!(
            "[main] Received response: Status: {}, Content Length: {} bytes",
            response.status,
            response.content.len()
        );

        if response.content.is_empty() {
            log_warn!("[main] Empty response body for {}", url);
        }

        let html = pipeline.process(&response.content);

        let out_path = output::page_path(output_root, &url)?;
        output::write_page(&out_path, &html)?;
        log_info!("[main] Wrote {}", out_path.display());
    }

    log_info!("[main] Mirror completed successfully");
    Ok(())
}
