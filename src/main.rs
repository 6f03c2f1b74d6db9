use clap::Parser;
use robot_orders::utils::{logger, validation::Validate};
use robot_orders::{CdpPage, CliConfig, HttpOrderSource, OrderEngine, OrderPipeline};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting robot-orders");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("error: {}", e);
        std::process::exit(2);
    }

    let page = CdpPage::launch().await?;
    let source = HttpOrderSource::new();
    let pipeline = OrderPipeline::new(page, source, config);
    let engine = OrderEngine::new(pipeline);

    match engine.run().await {
        Ok(archive_path) => {
            tracing::info!("Robot order run completed successfully");
            println!("Artifacts archived to: {}", archive_path.display());
        }
        Err(e) => {
            tracing::error!("Robot order run failed: {}", e);
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}
