use std::time::Duration;

use futures::future::join_all;
use tracing::{debug, error};

use crate::{adapters, model, util};

pub const CANARY_KEY: &str = "some/important/object";
pub const FRAME_NAME: &str = "response";
pub const URL_FIELD: &str = "URL";

/// Signs object keys from one bucket. Everything here is fixed at
/// construction; a settings change means building a new `Datasource`.
pub struct Datasource {
    pub presigner: Box<dyn adapters::Presign>,
    pub bucket: String,
    pub url_expiry: Duration,
}

impl Datasource {
    pub fn new(presigner: Box<dyn adapters::Presign>, bucket: &str, url_expiry: Duration) -> Self {
        Self {
            presigner,
            bucket: bucket.to_string(),
            url_expiry,
        }
    }

    /// Instance factory used by the host whenever settings are created or change.
    pub async fn from_settings(
        instance: &model::settings::DataSourceInstanceSettings,
    ) -> Result<Self, model::error::SettingsError> {
        let settings = model::settings::Settings::parse(instance)?;
        debug!(bucket=%settings.bucket, region=%settings.region, "parsed settings");

        let client = adapters::s3::client_from_settings(&settings).await;

        Ok(Self::new(
            Box::new(client),
            &settings.bucket,
            settings.url_expiry,
        ))
    }

    pub async fn query(&self, query: &model::query::DataQuery) -> model::query::DataResponse {
        let qm: model::query::QueryModel = match serde_json::from_slice(&query.json) {
            Err(err) => {
                return model::query::DataResponse::error(
                    model::query::Status::BadRequest,
                    format!("json unmarshal: {}", err),
                );
            }
            Ok(qm) => qm,
        };

        let keys = match qm.image_keys {
            Some(image_keys) => util::keys::split_keys(&image_keys),
            None => {
                debug!(ref_id=%query.ref_id, "no image_keys in query");
                Vec::new()
            }
        };
        debug!(ref_id=%query.ref_id, keys=?keys, "split image keys");

        let urls = self.sign_keys(&keys).await;

        let frame = model::query::Frame::new(FRAME_NAME)
            .with_field(model::query::Field::new(URL_FIELD, urls));

        model::query::DataResponse::frames(vec![frame])
    }

    /// Signs all keys concurrently. Keys that fail to sign are logged and
    /// left out; the remaining urls keep the input order.
    pub async fn sign_keys(&self, keys: &[String]) -> Vec<String> {
        let results = join_all(keys.iter().map(|key| {
            self.presigner
                .presign_get_object(&self.bucket, key, self.url_expiry)
        }))
        .await;

        results
            .into_iter()
            .filter_map(|res| match res {
                Err(err) => {
                    error!(error_message=%err, error_group="presign_get_object", key=%err.key);
                    None
                }
                Ok(url) => Some(url),
            })
            .collect()
    }

    pub async fn batch_query(
        &self,
        req: &model::query::QueryDataRequest,
    ) -> model::query::QueryDataResponse {
        let mut response = model::query::QueryDataResponse::default();

        for q in &req.queries {
            let res = self.query(q).await;
            response.responses.insert(q.ref_id.clone(), res);
        }

        response
    }

    pub async fn probe(
        &self,
    ) -> Result<model::health::CheckHealthResult, model::error::HealthError> {
        let res = self
            .presigner
            .presign_get_object(&self.bucket, CANARY_KEY, self.url_expiry)
            .await;

        match res {
            Err(err) => Err(model::error::HealthError {
                result: model::health::CheckHealthResult::error(err.to_string()),
                source: err,
            }),
            Ok(url) => Ok(model::health::CheckHealthResult::ok(format!(
                "ready to generate urls like: {}",
                url
            ))),
        }
    }
}
