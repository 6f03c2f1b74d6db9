use serde::{Deserialize, Serialize};

/// One robot purchase request, sourced from a single CSV row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RobotOrder {
    pub order_number: String,
    pub head: String,
    pub body: String,
    pub legs: String,
    pub address: String,
}

/// The receipt region fields scraped from the page after a successful
/// submission. `parts_html` is raw markup, not plain text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptFields {
    pub order_id: String,
    pub timestamp: String,
    pub parts_html: String,
    pub address: String,
}
