use std::{future, time::Duration};

use crate::{adapters, model};

/// Signs every key with a fake host, except the ones listed in `failing_keys`.
#[derive(Default)]
pub struct MockPresigner {
    pub failing_keys: Vec<String>,
}

impl MockPresigner {
    pub fn failing(keys: &[&str]) -> Self {
        Self {
            failing_keys: keys.iter().map(|key| key.to_string()).collect(),
        }
    }
}

impl adapters::Presign for MockPresigner {
    fn presign_get_object(
        &self,
        bucket: &str,
        key: &str,
        expires_in: Duration,
    ) -> adapters::PresignFuture {
        let result = if self.failing_keys.iter().any(|failing| failing == key) {
            Err(model::error::SignError {
                key: key.to_string(),
                message: "InvalidAccessKeyId".to_string(),
            })
        } else {
            Ok(format!(
                "https://{}.s3.mock/{}?X-Amz-Expires={}&X-Amz-Signature=mock",
                bucket,
                key,
                expires_in.as_secs()
            ))
        };

        Box::pin(future::ready(result))
    }
}
