use async_trait::async_trait;
use robot_orders::{OrderPage, Result};
use std::collections::VecDeque;
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;

const TIMESTAMP_TEXT: &str = "2024-01-15 12:00:00";
const ADDRESS_TEXT: &str = "Street 1";
pub const PARTS_HTML: &str = r#"<div class="head">Head: 1</div><div class="body">Body: 1</div>"#;

#[derive(Default)]
struct Inner {
    calls: Vec<String>,
    alert_checks: VecDeque<bool>,
    receipt_ids: VecDeque<String>,
}

/// Scripted stand-in for the browser page. `receipt_ids` supplies the order
/// id badge text for each processed order; `alert_checks` answers each
/// post-submit visibility probe (missing entries read as not-visible).
/// Element screenshots are written as real PNG files so the PDF renderer can
/// consume them.
pub struct FakePage {
    inner: Mutex<Inner>,
}

impl FakePage {
    pub fn new(receipt_ids: Vec<&str>, alert_checks: Vec<bool>) -> Self {
        Self {
            inner: Mutex::new(Inner {
                calls: Vec::new(),
                alert_checks: alert_checks.into(),
                receipt_ids: receipt_ids.into_iter().map(String::from).collect(),
            }),
        }
    }

    fn record(&self, call: impl Into<String>) {
        self.inner.lock().unwrap().calls.push(call.into());
    }

    pub fn count(&self, prefix: &str) -> usize {
        self.inner
            .lock()
            .unwrap()
            .calls
            .iter()
            .filter(|c| c.starts_with(prefix))
            .count()
    }
}

#[async_trait]
impl OrderPage for FakePage {
    async fn goto(&self, url: &str) -> Result<()> {
        self.record(format!("goto {}", url));
        Ok(())
    }

    async fn wait_for_selector(&self, selector: &str, _timeout: Duration) -> Result<()> {
        self.record(format!("wait {}", selector));
        Ok(())
    }

    async fn click(&self, selector: &str) -> Result<()> {
        self.record(format!("click {}", selector));
        Ok(())
    }

    async fn click_button_labeled(&self, label: &str, _timeout: Duration) -> Result<()> {
        self.record(format!("button {}", label));
        Ok(())
    }

    async fn select_option(&self, selector: &str, value: &str) -> Result<()> {
        self.record(format!("select {} {}", selector, value));
        Ok(())
    }

    async fn check(&self, selector: &str) -> Result<()> {
        self.record(format!("check {}", selector));
        Ok(())
    }

    async fn fill(&self, selector: &str, value: &str) -> Result<()> {
        self.record(format!("fill {} {}", selector, value));
        Ok(())
    }

    async fn is_visible(&self, selector: &str) -> Result<bool> {
        self.record(format!("visible {}", selector));
        Ok(self
            .inner
            .lock()
            .unwrap()
            .alert_checks
            .pop_front()
            .unwrap_or(false))
    }

    async fn reload(&self) -> Result<()> {
        self.record("reload");
        Ok(())
    }

    async fn settle(&self, _delay: Duration) -> Result<()> {
        self.record("settle");
        Ok(())
    }

    async fn text_content(&self, selector: &str) -> Result<String> {
        self.record(format!("text {}", selector));
        if selector.contains("badge") {
            let id = self
                .inner
                .lock()
                .unwrap()
                .receipt_ids
                .pop_front()
                .unwrap_or_else(|| "UNKNOWN".to_string());
            return Ok(id);
        }
        if selector.contains("p:nth-child(4)") {
            return Ok(ADDRESS_TEXT.to_string());
        }
        Ok(TIMESTAMP_TEXT.to_string())
    }

    async fn inner_html(&self, selector: &str) -> Result<String> {
        self.record(format!("html {}", selector));
        Ok(PARTS_HTML.to_string())
    }

    async fn screenshot_element(&self, selector: &str, target: &Path) -> Result<()> {
        self.record(format!("screenshot {}", selector));
        image::RgbImage::new(64, 48)
            .save(target)
            .expect("fake screenshot should encode");
        Ok(())
    }
}
