//! Calls the visualization host makes into a datasource instance.

use std::future::Future;

use crate::model;

pub trait QueryDataHandler {
    /// Answers every query in the batch; the response holds one entry per `ref_id`.
    fn query_data(
        &self,
        req: &model::query::QueryDataRequest,
    ) -> impl Future<Output = model::query::QueryDataResponse> + Send;
}

pub trait CheckHealthHandler {
    /// A failed check comes back as `Err`, which still carries the
    /// error-status result to show the user.
    fn check_health(
        &self,
    ) -> impl Future<Output = Result<model::health::CheckHealthResult, model::error::HealthError>> + Send;
}

pub trait InstanceDisposer {
    /// Called when the host replaces this instance after a settings change.
    fn dispose(self);
}
