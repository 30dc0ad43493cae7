use std::{future::Future, pin::Pin, time::Duration};

use crate::model;

#[cfg(test)]
pub mod mock;
pub mod s3;

pub type PresignFuture =
    Pin<Box<dyn Future<Output = Result<String, model::error::SignError>> + Send>>;

/// Anything that can mint a time-limited GET url for one object.
pub trait Presign: Send + Sync {
    fn presign_get_object(&self, bucket: &str, key: &str, expires_in: Duration) -> PresignFuture;
}
