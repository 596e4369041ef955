//! Document store access.
//!
//! The store speaks typed values (`{"stringValue": "x"}`); callers work with
//! plain `serde_json` maps and the conversion happens here.

use serde_json::{json, Map, Number, Value};

use crate::{decode_response, IdentityError, IdentityService};

/// Encode a plain JSON value into the store's typed representation.
pub fn encode_value(value: &Value) -> Value {
    match value {
        Value::Null => json!({ "nullValue": null }),
        Value::Bool(b) => json!({ "booleanValue": b }),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                // 64-bit integers travel as strings
                json!({ "integerValue": i.to_string() })
            } else {
                json!({ "doubleValue": n.as_f64().unwrap_or_default() })
            }
        }
        Value::String(s) => json!({ "stringValue": s }),
        Value::Array(items) => {
            let values: Vec<Value> = items.iter().map(encode_value).collect();
            json!({ "arrayValue": { "values": values } })
        }
        Value::Object(map) => json!({ "mapValue": { "fields": encode_fields(map) } }),
    }
}

pub fn encode_fields(map: &Map<String, Value>) -> Value {
    let fields: Map<String, Value> = map
        .iter()
        .map(|(key, value)| (key.clone(), encode_value(value)))
        .collect();
    Value::Object(fields)
}

/// Decode a typed value back to plain JSON. Unknown shapes decode to null.
pub fn decode_value(value: &Value) -> Value {
    let Some(object) = value.as_object() else {
        return Value::Null;
    };
    let Some((kind, inner)) = object.iter().next() else {
        return Value::Null;
    };

    match kind.as_str() {
        "booleanValue" => inner.as_bool().map(Value::Bool).unwrap_or(Value::Null),
        "integerValue" => match inner {
            Value::String(s) => s
                .parse::<i64>()
                .map(|i| Value::Number(i.into()))
                .unwrap_or(Value::Null),
            Value::Number(n) => Value::Number(n.clone()),
            _ => Value::Null,
        },
        "doubleValue" => inner
            .as_f64()
            .and_then(Number::from_f64)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        "stringValue" | "timestampValue" | "referenceValue" => inner.clone(),
        "arrayValue" => {
            let values = inner
                .get("values")
                .and_then(Value::as_array)
                .map(|items| items.iter().map(decode_value).collect())
                .unwrap_or_default();
            Value::Array(values)
        }
        "mapValue" => {
            let fields = inner
                .get("fields")
                .and_then(Value::as_object)
                .map(decode_fields)
                .unwrap_or_default();
            Value::Object(fields)
        }
        _ => Value::Null,
    }
}

pub fn decode_fields(fields: &Map<String, Value>) -> Map<String, Value> {
    fields
        .iter()
        .map(|(key, value)| (key.clone(), decode_value(value)))
        .collect()
}

impl IdentityService {
    fn document_url(&self, collection: &str, id: &str) -> String {
        format!(
            "{}/v1/projects/{}/databases/(default)/documents/{}/{}",
            self.options.documents_url.trim_end_matches('/'),
            self.options.project_id,
            collection,
            id
        )
    }

    /// Write `fields` into `collection/id`, leaving other fields untouched.
    ///
    /// Only the keys present in `fields` are listed in the update mask, so
    /// this behaves as a merge.
    pub async fn set_document(
        &self,
        collection: &str,
        id: &str,
        fields: &Map<String, Value>,
        id_token: &str,
    ) -> Result<(), IdentityError> {
        let mask: Vec<(&str, &str)> = fields
            .keys()
            .map(|key| ("updateMask.fieldPaths", key.as_str()))
            .collect();

        let response = self
            .client
            .patch(self.document_url(collection, id))
            .bearer_auth(id_token)
            .query(&mask)
            .json(&json!({ "fields": encode_fields(fields) }))
            .send()
            .await?;

        let _: Value = decode_response(response).await?;
        Ok(())
    }

    /// Read `collection/id`. Returns `None` when the document does not exist.
    pub async fn get_document(
        &self,
        collection: &str,
        id: &str,
        id_token: &str,
    ) -> Result<Option<Map<String, Value>>, IdentityError> {
        let response = self
            .client
            .get(self.document_url(collection, id))
            .bearer_auth(id_token)
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let document: Value = decode_response(response).await?;
        let fields = document
            .get("fields")
            .and_then(Value::as_object)
            .map(decode_fields)
            .unwrap_or_default();
        Ok(Some(fields))
    }
}
