pub mod archive;
pub mod engine;
pub mod pdf;
pub mod pipeline;
pub mod receipt;
pub mod submit;

pub use crate::domain::model::{ReceiptFields, RobotOrder};
pub use crate::domain::ports::{ConfigProvider, OrderPage, OrderSource, Pipeline};
pub use crate::utils::error::Result;
