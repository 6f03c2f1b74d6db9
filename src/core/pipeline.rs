use crate::core::receipt::collect_receipt_fields;
use crate::core::submit::submit_order;
use crate::core::{archive, pdf};
use crate::domain::model::{ReceiptFields, RobotOrder};
use crate::domain::ports::{ConfigProvider, OrderPage, OrderSource, Pipeline};
use crate::utils::error::Result;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const SELECTOR_TIMEOUT: Duration = Duration::from_millis(10_000);
pub const SETTLE_DELAY: Duration = Duration::from_millis(1_000);

const ORDER_ANOTHER_LABEL: &str = "ORDER ANOTHER ROBOT";
const ROBOT_PREVIEW: &str = "#robot-preview-image";
const ORDERS_FILE_NAME: &str = "orders.csv";

const ORDER_NUMBER_COLUMN: &str = "Order number";
const HEAD_COLUMN: &str = "Head";
const BODY_COLUMN: &str = "Body";
const LEGS_COLUMN: &str = "Legs";
const ADDRESS_COLUMN: &str = "Address";

pub struct OrderPipeline<D: OrderPage, S: OrderSource, C: ConfigProvider> {
    page: D,
    source: S,
    config: C,
}

impl<D: OrderPage, S: OrderSource, C: ConfigProvider> OrderPipeline<D, S, C> {
    pub fn new(page: D, source: S, config: C) -> Self {
        Self {
            page,
            source,
            config,
        }
    }

    pub fn page(&self) -> &D {
        &self.page
    }

    fn output_root(&self) -> PathBuf {
        PathBuf::from(self.config.output_path())
    }

    fn data_dir(&self) -> PathBuf {
        self.output_root().join("data")
    }

    fn screenshots_dir(&self) -> PathBuf {
        self.output_root().join("screenshots")
    }

    fn receipts_dir(&self) -> PathBuf {
        self.output_root().join("receipts")
    }

    async fn save_robot_screenshot(&self, order: &RobotOrder) -> Result<PathBuf> {
        let dir = self.screenshots_dir();
        fs::create_dir_all(&dir)?;
        let screenshot_path = dir.join(format!("robot_{}.png", order.order_number));

        self.page
            .wait_for_selector(ROBOT_PREVIEW, SELECTOR_TIMEOUT)
            .await?;
        self.page
            .screenshot_element(ROBOT_PREVIEW, &screenshot_path)
            .await?;

        tracing::info!(path = %screenshot_path.display(), "robot screenshot saved");
        Ok(screenshot_path)
    }

    fn write_receipt(&self, fields: &ReceiptFields, screenshot_path: &Path) -> Result<PathBuf> {
        let receipt_path = self
            .receipts_dir()
            .join(format!("receipt_{}.pdf", fields.order_id));
        tracing::info!(path = %receipt_path.display(), "saving receipt PDF");
        pdf::render_receipt(fields, screenshot_path, &receipt_path)
    }
}

#[async_trait::async_trait]
impl<D: OrderPage, S: OrderSource, C: ConfigProvider> Pipeline for OrderPipeline<D, S, C> {
    /// Remove stale screenshots and receipts from a previous run. Artifact
    /// names are keyed by order number only, so reruns must start clean.
    async fn prepare(&self) -> Result<()> {
        clean_dir(&self.screenshots_dir())?;
        clean_dir(&self.receipts_dir())?;
        Ok(())
    }

    async fn fetch(&self) -> Result<Vec<RobotOrder>> {
        let csv_path = self.data_dir().join(ORDERS_FILE_NAME);
        self.source
            .download(self.config.orders_csv_url(), &csv_path)
            .await?;

        let orders = read_orders(&csv_path)?;
        tracing::info!(count = orders.len(), path = %csv_path.display(), "order table loaded");
        Ok(orders)
    }

    async fn process(&self, orders: Vec<RobotOrder>) -> Result<Vec<PathBuf>> {
        self.page.goto(self.config.order_url()).await?;
        tracing::info!("robot order page opened");

        let mut receipts = Vec::with_capacity(orders.len());
        for order in &orders {
            tracing::info!(order_number = %order.order_number, "processing order");

            let attempts = submit_order(
                &self.page,
                order,
                self.config.max_attempts(),
                SELECTOR_TIMEOUT,
                SETTLE_DELAY,
            )
            .await?;
            tracing::debug!(attempts, "order accepted");

            let screenshot_path = self.save_robot_screenshot(order).await?;
            let fields = collect_receipt_fields(&self.page, SELECTOR_TIMEOUT).await?;
            receipts.push(self.write_receipt(&fields, &screenshot_path)?);

            self.page
                .click_button_labeled(ORDER_ANOTHER_LABEL, SELECTOR_TIMEOUT)
                .await?;
        }

        Ok(receipts)
    }

    async fn archive(&self) -> Result<PathBuf> {
        archive::archive_artifacts(&self.output_root())
    }
}

fn clean_dir(path: &Path) -> Result<()> {
    if path.is_dir() {
        fs::remove_dir_all(path)?;
    }
    Ok(())
}

/// Parse the downloaded order table. Column lookup is by exact header name;
/// a missing column yields empty values for that field rather than a parse
/// failure.
pub fn read_orders(csv_path: &Path) -> Result<Vec<RobotOrder>> {
    let mut reader = csv::Reader::from_path(csv_path)?;
    let headers = reader.headers()?.clone();

    let column = |name: &str| headers.iter().position(|header| header == name);
    let order_number_idx = column(ORDER_NUMBER_COLUMN);
    let head_idx = column(HEAD_COLUMN);
    let body_idx = column(BODY_COLUMN);
    let legs_idx = column(LEGS_COLUMN);
    let address_idx = column(ADDRESS_COLUMN);

    let mut orders = Vec::new();
    for record in reader.records() {
        let record = record?;
        let field = |idx: Option<usize>| {
            idx.and_then(|i| record.get(i))
                .unwrap_or_default()
                .to_string()
        };

        orders.push(RobotOrder {
            order_number: field(order_number_idx),
            head: field(head_idx),
            body: field(body_idx),
            legs: field(legs_idx),
            address: field(address_idx),
        });
    }

    Ok(orders)
}
