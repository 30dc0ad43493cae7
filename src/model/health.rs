use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Ok,
    Error,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CheckHealthResult {
    pub status: HealthStatus,
    pub message: String,
}

impl CheckHealthResult {
    pub fn ok(message: String) -> Self {
        Self {
            status: HealthStatus::Ok,
            message,
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            status: HealthStatus::Error,
            message,
        }
    }
}
