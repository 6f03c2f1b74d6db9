use crate::domain::ports::OrderSource;
use crate::utils::error::{OrderError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::fs;
use std::path::Path;

/// Downloads the orders CSV over HTTP. Transport errors and non-success
/// statuses propagate; there is no retry at this layer.
#[derive(Debug, Clone, Default)]
pub struct HttpOrderSource {
    client: Client,
}

impl HttpOrderSource {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }
}

#[async_trait]
impl OrderSource for HttpOrderSource {
    async fn download(&self, url: &str, target: &Path) -> Result<()> {
        tracing::debug!(url, target = %target.display(), "downloading order table");

        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(OrderError::DownloadFailed {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }

        let body = response.bytes().await?;
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(target, &body)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_download_writes_body_to_target() {
        let server = MockServer::start();
        let csv_body = "Order number,Head,Body,Legs,Address\n1,1,1,1,Street 1\n";
        let csv_mock = server.mock(|when, then| {
            when.method(GET).path("/orders.csv");
            then.status(200)
                .header("Content-Type", "text/csv")
                .body(csv_body);
        });

        let dir = TempDir::new().unwrap();
        let target = dir.path().join("data").join("orders.csv");

        let source = HttpOrderSource::new();
        source
            .download(&server.url("/orders.csv"), &target)
            .await
            .unwrap();

        csv_mock.assert();
        assert_eq!(fs::read_to_string(&target).unwrap(), csv_body);
    }

    #[tokio::test]
    async fn test_download_overwrites_existing_file() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/orders.csv");
            then.status(200).body("fresh");
        });

        let dir = TempDir::new().unwrap();
        let target = dir.path().join("orders.csv");
        fs::write(&target, "stale").unwrap();

        let source = HttpOrderSource::new();
        source
            .download(&server.url("/orders.csv"), &target)
            .await
            .unwrap();

        assert_eq!(fs::read_to_string(&target).unwrap(), "fresh");
    }

    #[tokio::test]
    async fn test_download_fails_on_server_error() {
        let server = MockServer::start();
        let csv_mock = server.mock(|when, then| {
            when.method(GET).path("/orders.csv");
            then.status(500);
        });

        let dir = TempDir::new().unwrap();
        let target = dir.path().join("orders.csv");

        let source = HttpOrderSource::new();
        let err = source
            .download(&server.url("/orders.csv"), &target)
            .await
            .unwrap_err();

        csv_mock.assert();
        assert!(matches!(
            err,
            OrderError::DownloadFailed { status: 500, .. }
        ));
        assert!(!target.exists());
    }
}
