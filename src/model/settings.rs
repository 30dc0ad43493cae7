use std::{collections::HashMap, fmt, time::Duration};

use serde::Deserialize;

use crate::model::error::SettingsError;

pub const DEFAULT_REGION: &str = "us-east-1";
pub const DEFAULT_URL_EXPIRY_SECS: u64 = 900;
/// SigV4 refuses presigned requests that live longer than seven days.
pub const MAX_URL_EXPIRY_SECS: u64 = 7 * 24 * 60 * 60;

pub const ACCESS_KEY_ID: &str = "aws_access_key_id";
pub const SECRET_ACCESS_KEY: &str = "aws_secret_access_key";

/// What the host hands over when it creates a datasource instance.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataSourceInstanceSettings {
    #[serde(default)]
    pub json_data: serde_json::Value,
    #[serde(default)]
    pub decrypted_secure_json_data: HashMap<String, String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct DataSourceOptions {
    pub bucket: Option<String>,
    pub region: Option<String>,
    pub url_expiry_secs: Option<u64>,
}

#[derive(Clone)]
pub struct Credentials {
    pub access_key_id: String,
    pub secret_access_key: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"** redacted **")
            .finish()
    }
}

/// Validated configuration for one datasource instance.
#[derive(Clone, Debug)]
pub struct Settings {
    pub bucket: String,
    pub region: String,
    pub url_expiry: Duration,
    pub credentials: Credentials,
}

impl Settings {
    pub fn parse(instance: &DataSourceInstanceSettings) -> Result<Self, SettingsError> {
        let json_data = match &instance.json_data {
            serde_json::Value::Null => serde_json::Value::Object(serde_json::Map::new()),
            json_data => json_data.clone(),
        };
        let options: DataSourceOptions = serde_json::from_value(json_data)?;

        let bucket = match options.bucket.as_deref().map(str::trim) {
            Some(bucket) if !bucket.is_empty() => bucket.to_string(),
            _ => return Err(SettingsError::MissingBucket),
        };

        let region = options
            .region
            .map(|region| region.trim().to_string())
            .filter(|region| !region.is_empty())
            .unwrap_or_else(|| DEFAULT_REGION.to_string());

        let expiry_secs = options.url_expiry_secs.unwrap_or(DEFAULT_URL_EXPIRY_SECS);
        if expiry_secs == 0 || expiry_secs > MAX_URL_EXPIRY_SECS {
            return Err(SettingsError::Expiry {
                got: expiry_secs,
                max: MAX_URL_EXPIRY_SECS,
            });
        }

        let secret = |name: &str| {
            instance
                .decrypted_secure_json_data
                .get(name)
                .cloned()
                .unwrap_or_default()
        };

        Ok(Self {
            bucket,
            region,
            url_expiry: Duration::from_secs(expiry_secs),
            credentials: Credentials {
                access_key_id: secret(ACCESS_KEY_ID),
                secret_access_key: secret(SECRET_ACCESS_KEY),
            },
        })
    }
}
