//! Query-string serialization.
//!
//! A query is an ordered JSON object. Null values are dropped, arrays repeat
//! their key once per element, and everything else is stringified.

use serde::Serialize;
use serde_json::{Map, Value};
use url::form_urlencoded;

use crate::error::{Error, Result};

/// Ordered query mapping.
pub type QueryParams = Map<String, Value>;

/// Convert a serializable value (usually a query struct) into query params.
///
/// Fails with an `Unknown` error if the value is not an object.
pub fn to_query<Q: Serialize + ?Sized>(query: &Q) -> Result<QueryParams> {
    match serde_json::to_value(query) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(Value::Null) => Ok(QueryParams::new()),
        Ok(other) => Err(Error::unknown(format!(
            "Query must serialize to an object, got {}",
            other
        ))),
        Err(e) => Err(Error::unknown(format!("Failed to serialize query: {}", e))),
    }
}

/// Serialize params into percent-encoded form, without a leading `?`.
pub fn build_query_string(params: &QueryParams) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in params {
        match value {
            Value::Null => {}
            Value::Array(items) => {
                for item in items.iter().filter(|item| !item.is_null()) {
                    serializer.append_pair(key, &stringify(item));
                }
            }
            other => {
                serializer.append_pair(key, &stringify(other));
            }
        }
    }
    serializer.finish()
}

/// Append params to a URL, using `&` if it already has a query and `?` otherwise.
///
/// Returns the URL unchanged when nothing would be appended.
pub fn append_query(url: &str, params: &QueryParams) -> String {
    let query = build_query_string(params);
    if query.is_empty() {
        return url.to_string();
    }
    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{}{}{}", url, separator, query)
}

fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn params(value: Value) -> QueryParams {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_scalars_keep_insertion_order() {
        let q = params(json!({"page": 1, "is_active": true}));
        assert_eq!(build_query_string(&q), "page=1&is_active=true");
    }

    #[test]
    fn test_arrays_repeat_key() {
        let q = params(json!({"tags": ["a", "b"]}));
        assert_eq!(build_query_string(&q), "tags=a&tags=b");
    }

    #[test]
    fn test_null_values_omitted() {
        let q = params(json!({"search": null, "limit": 10, "ids": [null, "x"]}));
        assert_eq!(build_query_string(&q), "limit=10&ids=x");
    }

    #[test]
    fn test_values_are_percent_encoded() {
        let q = params(json!({"search": "daily report&more", "path": "a/b"}));
        assert_eq!(
            build_query_string(&q),
            "search=daily+report%26more&path=a%2Fb"
        );
    }

    #[test]
    fn test_append_empty_is_identity() {
        let url = "https://api.flowhub.io/workflows?page=2";
        assert_eq!(append_query(url, &QueryParams::new()), url);

        let only_nulls = params(json!({"search": null}));
        assert_eq!(append_query("/tools", &only_nulls), "/tools");
    }

    #[test]
    fn test_append_separator() {
        let q = params(json!({"limit": 5}));
        assert_eq!(append_query("/tools", &q), "/tools?limit=5");
        assert_eq!(append_query("/tools?page=1", &q), "/tools?page=1&limit=5");
    }

    #[test]
    fn test_to_query_from_struct() {
        #[derive(Serialize)]
        struct ListQuery {
            page: u32,
            #[serde(skip_serializing_if = "Option::is_none")]
            search: Option<String>,
            status: Option<String>,
        }

        let q = to_query(&ListQuery {
            page: 3,
            search: None,
            status: None,
        })
        .unwrap();
        assert_eq!(build_query_string(&q), "page=3");
    }

    #[test]
    fn test_to_query_rejects_scalars() {
        let err = to_query(&42).unwrap_err();
        assert_eq!(err.kind(), &crate::error::ErrorKind::Unknown);
    }
}
