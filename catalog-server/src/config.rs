//! Catalog server configuration

use crate::BoxError;

/// Default product table (fixed for this deployment)
const DEFAULT_TABLE: &str = "ThanhTong";

/// Default upload size cap in bytes
pub const DEFAULT_MAX_IMAGE_BYTES: usize = 2_000_000;

/// Which remote services back the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// DynamoDB table + S3 bucket
    Aws,
    /// In-process table and image store (local development)
    Memory,
}

impl std::str::FromStr for Backend {
    type Err = BoxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "aws" => Ok(Self::Aws),
            "memory" => Ok(Self::Memory),
            other => {
                Err(format!("CATALOG_BACKEND must be 'aws' or 'memory', got '{other}'").into())
            }
        }
    }
}

/// Image upload settings, present only when uploads are enabled
#[derive(Debug, Clone)]
pub struct ImageConfig {
    /// S3 bucket receiving uploads (unused by the memory backend)
    pub bucket: String,
    /// CloudFront (or S3) base URL objects are served from
    pub public_base_url: String,
    /// Largest accepted upload, in bytes
    pub max_bytes: usize,
}

/// Catalog server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Environment: development | staging | production
    pub environment: String,
    /// HTTP port
    pub http_port: u16,
    /// AWS region for both DynamoDB and S3
    pub aws_region: String,
    /// DynamoDB table holding products
    pub table_name: String,
    pub backend: Backend,
    /// `Some` when product creation requires an image
    pub images: Option<ImageConfig>,
}

impl Config {
    fn is_development(environment: &str) -> bool {
        environment == "development"
    }

    /// Require an env var outside development; fall back to `dev_default` in development.
    fn require(name: &str, environment: &str, dev_default: &str) -> Result<String, BoxError> {
        match std::env::var(name).ok().filter(|v| !v.trim().is_empty()) {
            Some(v) => Ok(v),
            None if Self::is_development(environment) => Ok(dev_default.to_string()),
            None => Err(format!("{name} must be set in {environment} environment").into()),
        }
    }

    fn parse_bool(name: &str, default: bool) -> Result<bool, BoxError> {
        match std::env::var(name) {
            Ok(v) => match v.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => Ok(true),
                "0" | "false" | "no" | "off" => Ok(false),
                other => Err(format!("{name} must be a boolean, got '{other}'").into()),
            },
            Err(_) => Ok(default),
        }
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, BoxError> {
        let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let http_port = match std::env::var("HTTP_PORT") {
            Ok(p) => p
                .parse()
                .map_err(|e| format!("HTTP_PORT must be a port number: {e}"))?,
            Err(_) => 3000,
        };

        let backend: Backend = std::env::var("CATALOG_BACKEND")
            .unwrap_or_else(|_| "aws".into())
            .parse()?;

        let images = if Self::parse_bool("IMAGE_UPLOAD_ENABLED", true)? {
            let bucket = match backend {
                Backend::Aws => std::env::var("AWS_S3_BUCKET_NAME")
                    .ok()
                    .filter(|b| !b.is_empty())
                    .ok_or("AWS_S3_BUCKET_NAME must be set when image upload is enabled")?,
                Backend::Memory => std::env::var("AWS_S3_BUCKET_NAME")
                    .unwrap_or_else(|_| "local-uploads".into()),
            };
            let public_base_url = Self::require(
                "AWS_CLOUDFRONT_URL",
                &environment,
                "http://localhost:3000",
            )?;
            let max_bytes = match std::env::var("MAX_IMAGE_BYTES") {
                Ok(v) => v
                    .parse()
                    .map_err(|e| format!("MAX_IMAGE_BYTES must be a byte count: {e}"))?,
                Err(_) => DEFAULT_MAX_IMAGE_BYTES,
            };
            Some(ImageConfig {
                bucket,
                public_base_url,
                max_bytes,
            })
        } else {
            None
        };

        Ok(Self {
            http_port,
            aws_region: std::env::var("AWS_REGION").unwrap_or_else(|_| "us-east-1".into()),
            table_name: std::env::var("CATALOG_TABLE").unwrap_or_else(|_| DEFAULT_TABLE.into()),
            backend,
            images,
            environment,
        })
    }
}
