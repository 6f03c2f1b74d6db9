pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::cdp::CdpPage;
pub use adapters::http::HttpOrderSource;
pub use config::CliConfig;
pub use core::{engine::OrderEngine, pipeline::OrderPipeline};
pub use domain::model::{ReceiptFields, RobotOrder};
pub use domain::ports::{ConfigProvider, OrderPage, OrderSource, Pipeline};
pub use utils::error::{OrderError, Result};
