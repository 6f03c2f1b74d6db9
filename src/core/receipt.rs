use crate::domain::model::ReceiptFields;
use crate::domain::ports::OrderPage;
use crate::utils::error::Result;
use regex::Regex;
use std::sync::OnceLock;
use std::time::Duration;

const RECEIPT_REGION: &str = "#receipt";
const ORDER_ID_BADGE: &str = "#receipt p[class='badge badge-success']";
const TIMESTAMP_LINE: &str = "#receipt div:nth-child(2)";
const PARTS_CONTAINER: &str = "#parts";
const ADDRESS_LINE: &str = "#receipt p:nth-child(4)";

/// Scrape the four receipt fields from the page shown after a successful
/// submission.
pub async fn collect_receipt_fields<P: OrderPage + ?Sized>(
    page: &P,
    selector_timeout: Duration,
) -> Result<ReceiptFields> {
    page.wait_for_selector(RECEIPT_REGION, selector_timeout)
        .await?;

    Ok(ReceiptFields {
        order_id: page.text_content(ORDER_ID_BADGE).await?,
        timestamp: page.text_content(TIMESTAMP_LINE).await?,
        parts_html: page.inner_html(PARTS_CONTAINER).await?,
        address: page.text_content(ADDRESS_LINE).await?,
    })
}

/// Strip `div` open/close tags from the parts markup and trim the result.
/// Only `div` tags are handled; receipts downstream are content-sensitive,
/// so the lossy behavior is kept as-is.
pub fn strip_div_tags(html: &str) -> String {
    static DIV_TAG: OnceLock<Regex> = OnceLock::new();
    let pattern = DIV_TAG.get_or_init(|| Regex::new(r"</?div[^>]*>").expect("static pattern"));
    pattern.replace_all(html, "").trim().to_string()
}
