//! S3-backed paste store.
//!
//! Each paste is one object keyed `{prefix}paste:<id>` holding the JSON
//! record. Works against AWS S3 and S3-compatible services (MinIO, R2).
//! Credentials come from the standard AWS provider chain.

use crate::config::S3Settings;
use crate::error::{StoreError, StoreResult};
use crate::{PasteStore, paste_key};
use async_trait::async_trait;
use aws_sdk_s3::Client as S3Client;
use aws_sdk_s3::error::ProvideErrorMetadata;
use aws_sdk_s3::primitives::ByteStream;
use tracing::debug;

/// Error codes S3 returns when a conditional write loses to an existing object.
const CONDITIONAL_WRITE_CONFLICTS: &[&str] = &["PreconditionFailed", "ConditionalRequestConflict"];

/// Paste store backed by an S3 bucket.
pub struct S3Store {
    client: S3Client,
    bucket: String,
    prefix: String,
}

impl S3Store {
    /// Builds a client from the AWS provider chain and the given settings.
    pub async fn connect(settings: &S3Settings) -> StoreResult<Self> {
        let sdk_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_types::region::Region::new(settings.region.clone()))
            .load()
            .await;

        let mut config_builder = aws_sdk_s3::config::Builder::from(&sdk_config);
        if let Some(ref endpoint) = settings.endpoint_override {
            config_builder = config_builder
                .endpoint_url(endpoint)
                .force_path_style(true);
        }

        Ok(Self::with_client(
            S3Client::from_conf(config_builder.build()),
            settings.bucket.clone(),
            settings.prefix.clone(),
        ))
    }

    /// Wraps an already configured client.
    pub fn with_client(client: S3Client, bucket: String, prefix: String) -> Self {
        Self {
            client,
            bucket,
            prefix,
        }
    }

    /// Full object key for a paste id.
    pub fn object_key(&self, id: &str) -> String {
        format!("{}{}", self.prefix, paste_key(id))
    }
}

#[async_trait]
impl PasteStore for S3Store {
    async fn get(&self, id: &str) -> StoreResult<Option<String>> {
        let key = self.object_key(id);

        let resp = match self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(&key)
            .send()
            .await
        {
            Ok(resp) => resp,
            Err(e) => {
                let service_err = e.into_service_error();
                if service_err.is_no_such_key() {
                    return Ok(None);
                }
                return Err(StoreError::Unavailable(format!(
                    "get failed for {key}: {service_err}"
                )));
            }
        };

        let body = resp
            .body
            .collect()
            .await
            .map_err(|e| StoreError::Unavailable(format!("failed to read body for {key}: {e}")))?;

        let bytes = body.into_bytes().to_vec();
        debug!(
            "read {} bytes from s3://{}/{key}",
            bytes.len(),
            self.bucket
        );
        String::from_utf8(bytes)
            .map(Some)
            .map_err(|e| StoreError::InvalidRecord(format!("{key} is not UTF-8: {e}")))
    }

    async fn set(&self, id: &str, value: String) -> StoreResult<()> {
        let key = self.object_key(id);
        let size = value.len();

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .content_type("application/json")
            .body(ByteStream::from(value.into_bytes()))
            .send()
            .await
            .map_err(|e| StoreError::Unavailable(format!("put failed for {key}: {e}")))?;

        debug!("wrote {size} bytes to s3://{}/{key}", self.bucket);
        Ok(())
    }

    /// Conditional `PutObject` with `If-None-Match: *`; atomic on the server.
    async fn set_if_absent(&self, id: &str, value: String) -> StoreResult<bool> {
        let key = self.object_key(id);
        let size = value.len();

        let result = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .if_none_match("*")
            .content_type("application/json")
            .body(ByteStream::from(value.into_bytes()))
            .send()
            .await;

        match result {
            Ok(_) => {
                debug!("created {size} byte object s3://{}/{key}", self.bucket);
                Ok(true)
            }
            Err(e) => {
                let service_err = e.into_service_error();
                if service_err
                    .code()
                    .is_some_and(|code| CONDITIONAL_WRITE_CONFLICTS.contains(&code))
                {
                    debug!("s3://{}/{key} already exists", self.bucket);
                    Ok(false)
                } else {
                    Err(StoreError::Unavailable(format!(
                        "conditional put failed for {key}: {service_err}"
                    )))
                }
            }
        }
    }
}
