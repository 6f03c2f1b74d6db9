use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, validate_positive_number, validate_url, Validate};
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "robot-orders")]
#[command(about = "Orders robots from RobotSpareBin Industries and renders PDF receipts")]
pub struct CliConfig {
    #[arg(long, default_value = "https://robotsparebinindustries.com/#/robot-order")]
    pub order_url: String,

    #[arg(long, default_value = "https://robotsparebinindustries.com/orders.csv")]
    pub orders_csv_url: String,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    #[arg(long, default_value = "3")]
    pub max_attempts: u32,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl ConfigProvider for CliConfig {
    fn order_url(&self) -> &str {
        &self.order_url
    }

    fn orders_csv_url(&self) -> &str {
        &self.orders_csv_url
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn max_attempts(&self) -> u32 {
        self.max_attempts
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_url("order_url", &self.order_url)?;
        validate_url("orders_csv_url", &self.orders_csv_url)?;
        validate_path("output_path", &self.output_path)?;
        validate_positive_number("max_attempts", self.max_attempts as usize, 1)?;
        Ok(())
    }
}
