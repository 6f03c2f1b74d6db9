use crate::domain::ports::OrderPage;
use crate::utils::error::{OrderError, Result};
use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::page::CaptureScreenshotFormat;
use chromiumoxide::Page;
use futures::StreamExt;
use std::path::Path;
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

fn driver_error(e: impl std::fmt::Display) -> OrderError {
    OrderError::DriverError {
        message: e.to_string(),
    }
}

fn js_str(value: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "\"\"".to_string())
}

/// Drives one headless Chromium tab over CDP. The tab is reused serially
/// across orders; the CDP message loop runs on a background task for the
/// lifetime of the adapter.
pub struct CdpPage {
    _browser: Browser,
    page: Page,
    _handler_task: JoinHandle<()>,
}

impl CdpPage {
    pub async fn launch() -> Result<Self> {
        tracing::info!("launching headless browser");

        let config = BrowserConfig::builder()
            .no_sandbox()
            .arg("--disable-gpu")
            .arg("--disable-dev-shm-usage")
            .window_size(1280, 720)
            .build()
            .map_err(|message| OrderError::DriverError { message })?;

        let (browser, mut handler) = Browser::launch(config).await.map_err(driver_error)?;

        // Pumps CDP websocket messages; ends when the browser goes away.
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    tracing::debug!("CDP handler loop ended");
                    break;
                }
            }
        });

        let page = browser
            .new_page("about:blank")
            .await
            .map_err(driver_error)?;

        Ok(Self {
            _browser: browser,
            page,
            _handler_task: handler_task,
        })
    }

    async fn eval_bool(&self, script: String) -> Result<bool> {
        let result = self.page.evaluate(script).await.map_err(driver_error)?;
        result.into_value::<bool>().map_err(driver_error)
    }

    /// Run `script` repeatedly until it reports success or `timeout` passes.
    async fn poll_until(&self, script: &str, descriptor: &str, timeout: Duration) -> Result<()> {
        let start = Instant::now();
        loop {
            if self.eval_bool(script.to_string()).await? {
                return Ok(());
            }
            if start.elapsed() >= timeout {
                return Err(OrderError::ElementTimeout {
                    selector: descriptor.to_string(),
                    timeout_ms: timeout.as_millis() as u64,
                });
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }
}

#[async_trait]
impl OrderPage for CdpPage {
    async fn goto(&self, url: &str) -> Result<()> {
        self.page.goto(url).await.map_err(driver_error)?;
        Ok(())
    }

    async fn wait_for_selector(&self, selector: &str, timeout: Duration) -> Result<()> {
        let start = Instant::now();
        loop {
            if self.page.find_element(selector).await.is_ok() {
                return Ok(());
            }
            if start.elapsed() >= timeout {
                return Err(OrderError::ElementTimeout {
                    selector: selector.to_string(),
                    timeout_ms: timeout.as_millis() as u64,
                });
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    async fn click(&self, selector: &str) -> Result<()> {
        let element = self.page.find_element(selector).await.map_err(driver_error)?;
        element.click().await.map_err(driver_error)?;
        Ok(())
    }

    async fn click_button_labeled(&self, label: &str, timeout: Duration) -> Result<()> {
        let script = format!(
            r#"(() => {{
                const label = {label};
                const button = Array.from(document.querySelectorAll('button'))
                    .find((b) => b.textContent.trim() === label);
                if (!button) return false;
                button.click();
                return true;
            }})()"#,
            label = js_str(label),
        );
        self.poll_until(&script, &format!("button:text('{}')", label), timeout)
            .await
    }

    async fn select_option(&self, selector: &str, value: &str) -> Result<()> {
        let script = format!(
            r#"(() => {{
                const el = document.querySelector({selector});
                if (!el) return false;
                el.value = {value};
                el.dispatchEvent(new Event('input', {{ bubbles: true }}));
                el.dispatchEvent(new Event('change', {{ bubbles: true }}));
                return true;
            }})()"#,
            selector = js_str(selector),
            value = js_str(value),
        );
        if !self.eval_bool(script).await? {
            return Err(OrderError::DriverError {
                message: format!("select element '{}' not found", selector),
            });
        }
        Ok(())
    }

    async fn check(&self, selector: &str) -> Result<()> {
        self.click(selector).await
    }

    async fn fill(&self, selector: &str, value: &str) -> Result<()> {
        let script = format!(
            r#"(() => {{
                const el = document.querySelector({selector});
                if (!el) return false;
                el.value = {value};
                el.dispatchEvent(new Event('input', {{ bubbles: true }}));
                el.dispatchEvent(new Event('change', {{ bubbles: true }}));
                return true;
            }})()"#,
            selector = js_str(selector),
            value = js_str(value),
        );
        if !self.eval_bool(script).await? {
            return Err(OrderError::DriverError {
                message: format!("input element '{}' not found", selector),
            });
        }
        Ok(())
    }

    async fn is_visible(&self, selector: &str) -> Result<bool> {
        let script = format!(
            r#"(() => {{
                const el = document.querySelector({selector});
                return !!(el && (el.offsetWidth || el.offsetHeight || el.getClientRects().length));
            }})()"#,
            selector = js_str(selector),
        );
        self.eval_bool(script).await
    }

    async fn reload(&self) -> Result<()> {
        self.page.reload().await.map_err(driver_error)?;
        Ok(())
    }

    async fn settle(&self, delay: Duration) -> Result<()> {
        tokio::time::sleep(delay).await;
        Ok(())
    }

    async fn text_content(&self, selector: &str) -> Result<String> {
        let element = self.page.find_element(selector).await.map_err(driver_error)?;
        let text = element.inner_text().await.map_err(driver_error)?;
        Ok(text.unwrap_or_default())
    }

    async fn inner_html(&self, selector: &str) -> Result<String> {
        let element = self.page.find_element(selector).await.map_err(driver_error)?;
        let html = element.inner_html().await.map_err(driver_error)?;
        Ok(html.unwrap_or_default())
    }

    async fn screenshot_element(&self, selector: &str, target: &Path) -> Result<()> {
        let element = self.page.find_element(selector).await.map_err(driver_error)?;
        let bytes = element
            .screenshot(CaptureScreenshotFormat::Png)
            .await
            .map_err(driver_error)?;
        tokio::fs::write(target, bytes).await?;
        Ok(())
    }
}
