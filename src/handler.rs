use tracing::{debug, error, info, span, Instrument, Level};

use crate::{datasource, model, plugin};

impl plugin::QueryDataHandler for datasource::Datasource {
    async fn query_data(
        &self,
        req: &model::query::QueryDataRequest,
    ) -> model::query::QueryDataResponse {
        let span = span!(Level::INFO, "query_data", context = "query_data");

        async move {
            info!(num_queries = req.queries.len(), "called");

            let response = self.batch_query(req).await;

            for (ref_id, res) in &response.responses {
                if let Some(err) = &res.error {
                    error!(ref_id=%ref_id, error_message=%err, error_group="query");
                }
            }

            response
        }
        .instrument(span)
        .await
    }
}

impl plugin::CheckHealthHandler for datasource::Datasource {
    async fn check_health(
        &self,
    ) -> Result<model::health::CheckHealthResult, model::error::HealthError> {
        let span = span!(Level::INFO, "check_health", context = "check_health");

        async move {
            info!(bucket=%self.bucket, "called");

            let res = self.probe().await;
            if let Err(err) = &res {
                error!(error_message=%err, error_group="check_health");
            }

            res
        }
        .instrument(span)
        .await
    }
}

impl plugin::InstanceDisposer for datasource::Datasource {
    fn dispose(self) {
        let span = span!(Level::INFO, "dispose", context = "dispose");
        let _e = span.enter();
        debug!(bucket=%self.bucket, "called");

        drop(self);
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::{
        adapters::mock::MockPresigner,
        plugin::{CheckHealthHandler, InstanceDisposer, QueryDataHandler},
    };

    fn new_datasource(presigner: MockPresigner) -> datasource::Datasource {
        datasource::Datasource::new(Box::new(presigner), "dummy-bucket", Duration::from_secs(900))
    }

    #[tokio::test]
    async fn test_query_data_handler() {
        let ds = new_datasource(MockPresigner::default());

        let req = model::query::QueryDataRequest {
            queries: vec![
                model::query::DataQuery {
                    ref_id: "A".to_string(),
                    json: br#"{"image_keys":"a"}"#.to_vec(),
                },
                model::query::DataQuery {
                    ref_id: "B".to_string(),
                    json: b"not json".to_vec(),
                },
            ],
        };

        let resp = QueryDataHandler::query_data(&ds, &req).await;

        assert_eq!(resp.responses["A"].status, model::query::Status::Ok);
        assert_eq!(resp.responses["B"].status, model::query::Status::BadRequest);

        ds.dispose();
    }

    #[tokio::test]
    async fn test_check_health_handler() {
        let ok = new_datasource(MockPresigner::default());
        let failing = new_datasource(MockPresigner::failing(&[datasource::CANARY_KEY]));

        let result = CheckHealthHandler::check_health(&ok).await.unwrap();
        assert_eq!(result.status, model::health::HealthStatus::Ok);

        let err = CheckHealthHandler::check_health(&failing).await.unwrap_err();
        assert_eq!(err.result.status, model::health::HealthStatus::Error);
    }
}
