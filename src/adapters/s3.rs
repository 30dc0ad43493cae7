use std::time::Duration;

use aws_sdk_s3::{
    config::{Credentials, Region},
    presigning::PresigningConfig,
};

use crate::{adapters, model};

/// Builds an S3 client bound to one region and one static credential pair.
/// Nothing is resolved over the network here; bad credentials only show up
/// once a signed url is used.
pub async fn client_from_settings(settings: &model::settings::Settings) -> aws_sdk_s3::Client {
    let credentials = Credentials::new(
        settings.credentials.access_key_id.clone(),
        settings.credentials.secret_access_key.clone(),
        None,
        None,
        "datasource-settings",
    );

    let config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(Region::new(settings.region.clone()))
        .credentials_provider(credentials)
        .load()
        .await;

    aws_sdk_s3::Client::new(&config)
}

impl adapters::Presign for aws_sdk_s3::Client {
    fn presign_get_object(
        &self,
        bucket: &str,
        key: &str,
        expires_in: Duration,
    ) -> adapters::PresignFuture {
        let req = self.get_object().bucket(bucket).key(key);
        let key = key.to_string();

        Box::pin(async move {
            let config =
                PresigningConfig::expires_in(expires_in).map_err(|err| model::error::SignError {
                    key: key.clone(),
                    message: err.to_string(),
                })?;

            let presigned = req
                .presigned(config)
                .await
                .map_err(|err| model::error::SignError {
                    key: key.clone(),
                    message: err.to_string(),
                })?;

            Ok(presigned.uri().to_string())
        })
    }
}
