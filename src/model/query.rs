use std::collections::BTreeMap;

use serde::{Deserialize, Serialize, Serializer};

/// Payload of a single query as the query editor sends it. Anything else the
/// host puts next to `image_keys` is ignored.
#[derive(Clone, Debug, Deserialize)]
pub struct QueryModel {
    pub image_keys: Option<String>,
}

#[derive(Clone, Debug)]
pub struct DataQuery {
    pub ref_id: String,
    pub json: Vec<u8>,
}

#[derive(Clone, Debug, Default)]
pub struct QueryDataRequest {
    pub queries: Vec<DataQuery>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Ok,
    BadRequest,
}

impl Status {
    pub fn code(&self) -> u16 {
        match self {
            Status::Ok => 200,
            Status::BadRequest => 400,
        }
    }
}

impl Serialize for Status {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u16(self.code())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Field {
    pub name: String,
    pub values: Vec<String>,
}

impl Field {
    pub fn new(name: &str, values: Vec<String>) -> Self {
        Self {
            name: name.to_string(),
            values,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Frame {
    pub name: String,
    pub fields: Vec<Field>,
}

impl Frame {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            fields: Vec::new(),
        }
    }

    pub fn with_field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DataResponse {
    pub status: Status,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub frames: Vec<Frame>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DataResponse {
    pub fn frames(frames: Vec<Frame>) -> Self {
        Self {
            status: Status::Ok,
            frames,
            error: None,
        }
    }

    pub fn error(status: Status, message: String) -> Self {
        Self {
            status,
            frames: Vec::new(),
            error: Some(message),
        }
    }
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct QueryDataResponse {
    #[serde(rename = "results")]
    pub responses: BTreeMap<String, DataResponse>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_model_ignores_host_fields() {
        let payload = br#"{"datasource":{"type":"babylonmf-farmpics-datasource","uid":"PvTOH7x4z"},"datasourceId":1,"image_keys":"a,b","intervalMs":2000,"refId":"A"}"#;
        let model: QueryModel = serde_json::from_slice(payload).unwrap();

        assert_eq!(model.image_keys.as_deref(), Some("a,b"));
    }

    #[test]
    fn test_query_model_missing_keys() {
        let model: QueryModel = serde_json::from_slice(br#"{"refId":"A"}"#).unwrap();

        assert_eq!(model.image_keys, None);
    }

    #[test]
    fn test_response_json() {
        let mut response = QueryDataResponse::default();
        response.responses.insert(
            "A".to_string(),
            DataResponse::frames(vec![Frame::new("response")
                .with_field(Field::new("URL", vec!["https://u".to_string()]))]),
        );
        response.responses.insert(
            "B".to_string(),
            DataResponse::error(Status::BadRequest, "json unmarshal: eof".to_string()),
        );

        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(value["results"]["A"]["status"], 200);
        assert_eq!(value["results"]["A"]["frames"][0]["fields"][0]["name"], "URL");
        assert_eq!(value["results"]["A"]["frames"][0]["fields"][0]["values"][0], "https://u");
        assert!(value["results"]["A"].get("error").is_none());
        assert_eq!(value["results"]["B"]["status"], 400);
        assert_eq!(value["results"]["B"]["error"], "json unmarshal: eof");
    }
}
