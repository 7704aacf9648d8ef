mod local_dir;
mod s3_sink;

pub use local_dir::LocalDirSink;
pub use s3_sink::S3Sink;

use crate::config::SinkConfig;
use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Storage configuration error: {0}")]
    Config(String),

    #[error("Storage write failed for {key}: {message}")]
    Storage { key: String, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Destination for the finished artifact. Writes overwrite silently.
pub trait ObjectSink {
    fn put(&self, key: &str, body: &[u8]) -> Result<(), UploadError>;

    /// Human-readable location, for logs.
    fn describe(&self, key: &str) -> String;
}

/// Object key for a run: the calendar date as `YYYY-MM-DD`.
pub fn object_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn sink_from_config(config: &SinkConfig) -> Result<Box<dyn ObjectSink>, UploadError> {
    Ok(match config {
        SinkConfig::S3 { bucket, region } => Box::new(S3Sink::new(bucket, region)?),
        SinkConfig::LocalDir(dir) => Box::new(LocalDirSink::new(dir.clone())),
    })
}
