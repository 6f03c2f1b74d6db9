use crate::domain::model::RobotOrder;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub trait ConfigProvider: Send + Sync {
    fn order_url(&self) -> &str;
    fn orders_csv_url(&self) -> &str;
    fn output_path(&self) -> &str;
    fn max_attempts(&self) -> u32;
}

/// Transport for the orders CSV. Download failures are fatal and not retried.
#[async_trait]
pub trait OrderSource: Send + Sync {
    async fn download(&self, url: &str, target: &Path) -> Result<()>;
}

/// The browser capability surface consumed by the submission state machine
/// and the receipt pipeline. The production implementation drives a headless
/// Chromium tab over CDP; tests script a fake.
#[async_trait]
pub trait OrderPage: Send + Sync {
    async fn goto(&self, url: &str) -> Result<()>;

    /// Block until `selector` matches an element, up to `timeout`. A miss is
    /// an `ElementTimeout` error, never a retry.
    async fn wait_for_selector(&self, selector: &str, timeout: Duration) -> Result<()>;

    async fn click(&self, selector: &str) -> Result<()>;

    /// Wait for a `<button>` whose trimmed text equals `label`, then click it.
    async fn click_button_labeled(&self, label: &str, timeout: Duration) -> Result<()>;

    /// Set the value of a `<select>` element and fire its change event.
    async fn select_option(&self, selector: &str, value: &str) -> Result<()>;

    /// Check a radio or checkbox input.
    async fn check(&self, selector: &str) -> Result<()>;

    /// Replace the value of a text input and fire its input event.
    async fn fill(&self, selector: &str, value: &str) -> Result<()>;

    /// Whether `selector` matches an element with a non-empty box. A missing
    /// element is not-visible, not an error.
    async fn is_visible(&self, selector: &str) -> Result<bool>;

    async fn reload(&self) -> Result<()>;

    /// Fixed pause letting page state settle after an action.
    async fn settle(&self, delay: Duration) -> Result<()>;

    async fn text_content(&self, selector: &str) -> Result<String>;

    async fn inner_html(&self, selector: &str) -> Result<String>;

    /// Capture the rendered bitmap of one element to a PNG file.
    async fn screenshot_element(&self, selector: &str, target: &Path) -> Result<()>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn prepare(&self) -> Result<()>;
    async fn fetch(&self) -> Result<Vec<RobotOrder>>;
    async fn process(&self, orders: Vec<RobotOrder>) -> Result<Vec<PathBuf>>;
    async fn archive(&self) -> Result<PathBuf>;
}
