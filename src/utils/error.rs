use thiserror::Error;

#[derive(Error, Debug)]
pub enum OrderError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("PDF error: {0}")]
    PdfError(#[from] lopdf::Error),

    #[error("Image error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("element '{selector}' did not appear within {timeout_ms}ms")]
    ElementTimeout { selector: String, timeout_ms: u64 },

    #[error("failed to submit order {order_number} after {attempts} attempts")]
    SubmissionExhausted { order_number: String, attempts: u32 },

    #[error("download of {url} failed with status {status}")]
    DownloadFailed { url: String, status: u16 },

    #[error("browser driver error: {message}")]
    DriverError { message: String },

    #[error("invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, OrderError>;
