//! Store configuration.
//!
//! Provides [`S3TestConfig`] for configuring an [`crate::InMemoryS3`].
//! Values can be loaded from environment variables so a test suite can point
//! the same fixtures at a different bucket or region without code changes.

use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

/// Default bucket served by the store.
pub const DEFAULT_BUCKET: &str = "s3test";

/// Default region reported by `GetBucketLocation`.
pub const DEFAULT_REGION: &str = "us-east-1";

/// In-memory store configuration.
///
/// # Examples
///
/// ```
/// use s3test_core::config::S3TestConfig;
///
/// let config = S3TestConfig::default();
/// assert_eq!(config.bucket, "s3test");
/// assert_eq!(config.region, "us-east-1");
/// assert_eq!(config.max_retries, 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct S3TestConfig {
    /// The only bucket the store accepts requests for.
    #[builder(default = String::from(DEFAULT_BUCKET))]
    pub bucket: String,

    /// Region returned by `GetBucketLocation`.
    #[builder(default = String::from(DEFAULT_REGION))]
    pub region: String,

    /// Maximum number of retries callers are allowed for operations against
    /// this store. Reported only; the store never retries.
    #[builder(default = 0)]
    pub max_retries: u32,

    /// Log level filter string (e.g. `"info"`, `"debug"`).
    #[builder(default = String::from("info"))]
    pub log_level: String,
}

impl Default for S3TestConfig {
    fn default() -> Self {
        Self {
            bucket: String::from(DEFAULT_BUCKET),
            region: String::from(DEFAULT_REGION),
            max_retries: 0,
            log_level: String::from("info"),
        }
    }
}

impl S3TestConfig {
    /// Load configuration from environment variables.
    ///
    /// Reads the following environment variables (falling back to defaults):
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `S3TEST_BUCKET` | `s3test` |
    /// | `S3TEST_REGION` | value of `DEFAULT_REGION`, else `us-east-1` |
    /// | `S3TEST_MAX_RETRIES` | `0` |
    /// | `LOG_LEVEL` | `info` |
    ///
    /// # Examples
    ///
    /// ```
    /// use s3test_core::config::S3TestConfig;
    ///
    /// let config = S3TestConfig::from_env();
    /// assert!(!config.bucket.is_empty());
    /// ```
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(v) = std::env::var("S3TEST_BUCKET") {
            if !v.is_empty() {
                config.bucket = v;
            }
        }
        if let Some(v) = std::env::var("S3TEST_REGION")
            .or_else(|_| std::env::var("DEFAULT_REGION"))
            .ok()
            .filter(|v| !v.is_empty())
        {
            config.region = v;
        }
        if let Ok(v) = std::env::var("S3TEST_MAX_RETRIES") {
            if let Ok(n) = v.parse::<u32>() {
                config.max_retries = n;
            }
        }
        if let Ok(v) = std::env::var("LOG_LEVEL") {
            config.log_level = v;
        }

        config
    }
}
