use crate::upload::{ObjectSink, UploadError};
use s3::creds::Credentials;
use s3::{Bucket, Region};
use tracing::info;

/// Uploads to a fixed S3 bucket using the default AWS credential chain.
pub struct S3Sink {
    bucket: Box<Bucket>,
}

impl S3Sink {
    pub fn new(bucket: &str, region: &str) -> Result<Self, UploadError> {
        let region: Region = region
            .parse()
            .map_err(|e| UploadError::Config(format!("region {region:?}: {e}")))?;
        let credentials =
            Credentials::default().map_err(|e| UploadError::Config(format!("credentials: {e}")))?;
        let bucket = Bucket::new(bucket, region, credentials)
            .map_err(|e| UploadError::Config(format!("bucket {bucket:?}: {e}")))?;

        Ok(Self { bucket })
    }
}

impl ObjectSink for S3Sink {
    fn put(&self, key: &str, body: &[u8]) -> Result<(), UploadError> {
        let storage_error = |message: String| UploadError::Storage {
            key: key.to_string(),
            message,
        };

        let response = self
            .bucket
            .put_object(key, body)
            .map_err(|e| storage_error(e.to_string()))?;

        let status = response.status_code();
        if !(200..300).contains(&status) {
            return Err(storage_error(format!("HTTP {status}")));
        }

        info!(bucket = %self.bucket.name(), key, bytes = body.len(), "☁️ Uploaded to S3");
        Ok(())
    }

    fn describe(&self, key: &str) -> String {
        format!("s3://{}/{key}", self.bucket.name())
    }
}
