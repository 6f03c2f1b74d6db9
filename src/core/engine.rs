use crate::domain::ports::Pipeline;
use crate::utils::error::Result;
use std::path::PathBuf;

/// Runs the pipeline stages strictly downstream: prepare, fetch, process,
/// archive. The first failing stage aborts the run.
pub struct OrderEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> OrderEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub fn pipeline(&self) -> &P {
        &self.pipeline
    }

    pub async fn run(&self) -> Result<PathBuf> {
        tracing::info!("starting robot order run");

        self.pipeline.prepare().await?;
        tracing::info!("workspace prepared");

        let orders = self.pipeline.fetch().await?;
        tracing::info!(count = orders.len(), "orders fetched");

        let receipts = self.pipeline.process(orders).await?;
        tracing::info!(count = receipts.len(), "receipts generated");

        let archive_path = self.pipeline.archive().await?;
        tracing::info!(path = %archive_path.display(), "artifacts archived");

        Ok(archive_path)
    }
}
